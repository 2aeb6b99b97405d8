//! Signed and multi-channel signed distance fields from vector outlines.
//!
//! The pipeline is:
//!
//! - Build a [`Shape`] from segments, a [`BezPath`], SVG path data or a font glyph
//! - [`Shape::normalize`] it and assign channels with [`color_edges`]
//! - Rasterize with [`generate_sdf`], [`generate_psdf`], [`generate_msdf`] or
//!   [`generate_mtsdf`] into a float [`Bitmap`]
//! - Export bytes or `image` buffers from the bitmap
//!
//! See [`guide`] for the conventions (signs, orientation, encoding) in detail.
#![forbid(unsafe_code)]
#![deny(missing_docs)]

mod collab;
mod coloring;
mod correction;
mod distance;
mod foundation;
mod generate;
mod geometry;

/// Long-form walkthrough of the crate's conventions.
pub mod guide;

pub use crate::foundation::core::{
    BezPath, CubicBez, DistanceRange, Line, Point, Projection, QuadBez, Rect, SdfTransform, Vec2,
    YAxisOrientation,
};
pub use crate::foundation::error::{MsdfError, MsdfResult};
pub use crate::foundation::math::median;

pub use crate::distance::signed::SignedDistance;
pub use crate::geometry::contour::Contour;
pub use crate::geometry::scanline::{FillRule, Intersection, Scanline};
pub use crate::geometry::segment::{Edge, Segment};
pub use crate::geometry::shape::Shape;

pub use crate::coloring::by_distance::edge_coloring_by_distance;
pub use crate::coloring::color::EdgeColor;
pub use crate::coloring::ink_trap::edge_coloring_ink_trap;
pub use crate::coloring::simple::edge_coloring_simple;
pub use crate::coloring::{ColoringConfig, ColoringStrategy, color_edges};

pub use crate::correction::correct_errors;
pub use crate::generate::bitmap::Bitmap;
pub use crate::generate::config::{
    DistanceCheckMode, ErrorCorrectionConfig, ErrorCorrectionMode, GeneratorConfig,
    MsdfGeneratorConfig, Threading,
};
pub use crate::generate::framing::{Framing, auto_frame};
pub use crate::generate::quantize::{quantize, quantize_pixels};
pub use crate::generate::raster::{generate_msdf, generate_mtsdf, generate_psdf, generate_sdf};

#[cfg(feature = "ttf")]
pub use crate::collab::font::TtfFont;
pub use crate::collab::font::{FontMetrics, FontScaling, GlyphRef, GlyphSource, VariationAxis};
pub use crate::collab::overlap::{OverlapResolver, has_overlap_resolver, resolve_overlaps};
pub use crate::collab::path::parse_svg_path;

/// Crate version string.
pub fn version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}
