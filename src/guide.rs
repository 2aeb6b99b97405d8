//! # msdf guide
//!
//! This module walks through the data model, the conventions every stage relies on, and the
//! knobs that change the output. Nothing here is needed to call the API; it is the shared mental
//! model for anyone changing the internals.
//!
//! ---
//!
//! ## Core concepts
//!
//! - [`Shape`](crate::Shape): a list of [`Contour`](crate::Contour)s plus a
//!   [`YAxisOrientation`](crate::YAxisOrientation)
//! - [`Edge`](crate::Edge): one [`Segment`](crate::Segment) (line, quadratic or cubic Bézier)
//!   tagged with an [`EdgeColor`](crate::EdgeColor)
//! - [`SdfTransform`](crate::SdfTransform): where the shape lands in the bitmap
//!   ([`Projection`](crate::Projection)) and how distances are encoded
//!   ([`DistanceRange`](crate::DistanceRange))
//! - [`Bitmap`](crate::Bitmap): the float output, 1, 3 or 4 channels per pixel
//!
//! A generation run is staged:
//!
//! 1. Build the outline, call [`Shape::normalize`](crate::Shape::normalize) and, for input of
//!    unknown direction, [`Shape::orient_contours`](crate::Shape::orient_contours)
//! 2. Color the edges: [`color_edges`](crate::color_edges)
//! 3. Rasterize: [`generate_msdf`](crate::generate_msdf) and friends
//! 4. Multi-channel output is then repaired by [`correct_errors`](crate::correct_errors),
//!    which the generators call for you
//!
//! ---
//!
//! ## Signs and orientation
//!
//! Distances are **positive outside** the filled area. The filled side of an edge is decided
//! by contour direction: outer contours run counter-clockwise in a y-up frame and holes run
//! clockwise, which is what [`Contour::winding`](crate::Contour::winding) reports as `+1` and
//! `-1`. [`Shape::orient_contours`](crate::Shape::orient_contours) rewrites every contour to
//! that convention using scanline parity, for input whose direction cannot be trusted.
//!
//! [`GeneratorConfig::fill_rule`](crate::GeneratorConfig::fill_rule) (nonzero by default) adds
//! a scanline pass after sampling that flips every pixel whose sign disagrees with the fill
//! rule, so the output does not depend on contour direction at all. TrueType outlines, for
//! instance, run clockwise and come out right either way. Error correction then takes the sign
//! of its reference distances from the same fill rule. Set it to `None` to trust contour
//! direction alone, after calling `orient_contours` on input that needs it.
//!
//! ---
//!
//! ## Pixel contract
//!
//! For pixel column `x` and pixel row `y` the sample point is the pixel center
//! `projection.unproject((x + 0.5, y + 0.5))`. Pixel space grows upward like shape space.
//! A distance `d` is stored as `0.5 - d / range.width()`: the outline sits at exactly `0.5`, the
//! inside reads above it, and values are **not** clamped to `[0, 1]`. Byte export
//! ([`Bitmap::to_bytes`](crate::Bitmap::to_bytes), [`quantize`](crate::quantize)) maps `0.5` to
//! the configured edge value (128 by convention) and saturates.
//!
//! Storage rows run from the bottom of the picture to the top. For upward shapes row 0 is pixel
//! row 0. Downward (SVG-style) shapes grow toward the bottom of the picture, so their pixel rows
//! are stored in reverse and row 0 holds the highest pixel row. The `image` exports reverse the
//! stored rows, so they always come out top row first with the shape upright.
//!
//! ---
//!
//! ## Coloring
//!
//! Each channel of an MSDF only sees the edges whose color contains it. Where two edges meet
//! at a sharp corner they must differ in at least one channel, otherwise the median of the
//! three channels rounds the corner off. [`ColoringStrategy`](crate::ColoringStrategy) picks
//! how colors are handed out:
//!
//! - `Simple`: walk each contour and switch color at every corner sharper than the angle
//!   threshold
//! - `InkTrap`: like `Simple`, but short edges between two corners (ink traps, serifs) do not
//!   get a color of their own and instead share one with their longer neighbour
//! - `ByDistance`: color corner-to-corner runs so that runs sharing a color are as far apart
//!   as possible, which avoids channel bleed between close but unconnected parts of the shape
//!
//! All strategies are deterministic for a given seed.
//!
//! ---
//!
//! ## Error correction
//!
//! Bilinear filtering of neighbouring MSDF texels can make channels cross in a way that moves
//! the median away from both texels, drawing stray dots or notches. The repair pass looks for
//! such crossings between every texel and its eight neighbours and flattens offending texels to
//! their median. [`ErrorCorrectionMode`](crate::ErrorCorrectionMode) decides what may be
//! touched and [`DistanceCheckMode`](crate::DistanceCheckMode) whether a suspected artifact is
//! confirmed against the real shape first. Detection reads the bitmap as sampled; repairs are
//! written only after the scan completes.
//!
//! ---
//!
//! ## Threading
//!
//! [`Threading`](crate::Threading) switches row-parallel processing on for both sampling and
//! artifact detection. Each worker owns its own distance query state; the result is identical
//! to sequential processing.
//!
//! ---
//!
//! ## A complete run
//!
//! ```rust
//! use msdf::{
//!     ColoringConfig, MsdfGeneratorConfig, SdfTransform, Vec2, color_edges, generate_msdf,
//!     parse_svg_path,
//! };
//!
//! # fn main() -> msdf::MsdfResult<()> {
//! let mut shape = parse_svg_path("M0,0 L10,0 L10,10 L0,10 Z", 0.0)?;
//! shape.normalize();
//! shape.orient_contours();
//! color_edges(&mut shape, &ColoringConfig::default())?;
//!
//! let transform = SdfTransform::from_pixel_range(Vec2::new(2.0, 2.0), Vec2::new(3.0, 3.0), 4.0)?;
//! let bitmap = generate_msdf(&shape, 32, 32, &transform, &MsdfGeneratorConfig::default())?;
//! assert_eq!(bitmap.channels(), 3);
//! let rgba = bitmap.to_rgba8(128)?;
//! assert_eq!(rgba.dimensions(), (32, 32));
//! # Ok(())
//! # }
//! ```
