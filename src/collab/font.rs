//! Glyph outlines from fonts.

use crate::foundation::error::{MsdfError, MsdfResult};
use crate::geometry::shape::Shape;

/// Unit in which font coordinates are reported.
#[derive(
    Clone, Copy, Debug, Default, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize,
)]
pub enum FontScaling {
    /// Raw font units.
    None,
    /// Font units divided by units-per-em, so the em square is 1x1.
    #[default]
    EmNormalized,
    /// 26.6 fixed point units: font units divided by 64.
    Legacy,
}

impl FontScaling {
    /// Factor applied to font units for a font with `units_per_em`.
    pub fn factor(self, units_per_em: u16) -> f64 {
        match self {
            FontScaling::None => 1.0,
            FontScaling::EmNormalized => 1.0 / f64::from(units_per_em.max(1)),
            FontScaling::Legacy => 1.0 / 64.0,
        }
    }
}

/// Vertical font metrics, in the requested scaling.
#[derive(Clone, Copy, Debug, Default, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct FontMetrics {
    /// Size of the em square.
    pub em_size: f64,
    /// Baseline to top of the ascender.
    pub ascender_y: f64,
    /// Baseline to bottom of the descender (usually negative).
    pub descender_y: f64,
    /// Distance between consecutive baselines.
    pub line_height: f64,
    /// Vertical position of the underline.
    pub underline_y: f64,
    /// Thickness of the underline.
    pub underline_thickness: f64,
}

/// One axis of a variable font.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct VariationAxis {
    /// Human readable axis name, or the four-letter tag when the font has none.
    pub name: String,
    /// Four-letter axis tag such as `wght`.
    pub tag: String,
    /// Smallest allowed coordinate.
    pub min_value: f64,
    /// Largest allowed coordinate.
    pub max_value: f64,
    /// Coordinate used when nothing is set.
    pub default_value: f64,
}

/// Glyph addressed by Unicode scalar or by font-internal index.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum GlyphRef {
    /// Looked up through the font's character map.
    Char(char),
    /// Used as is.
    Index(u32),
}

impl From<char> for GlyphRef {
    fn from(c: char) -> Self {
        GlyphRef::Char(c)
    }
}

/// Source of glyph outlines and metrics.
pub trait GlyphSource {
    /// Vertical metrics.
    fn metrics(&self, scaling: FontScaling) -> MsdfResult<FontMetrics>;

    /// Advances of the space and tab characters.
    fn whitespace_advances(&self, scaling: FontScaling) -> MsdfResult<(f64, f64)>;

    /// Number of glyphs in the font.
    fn glyph_count(&self) -> u32;

    /// Glyph index of `c`, if mapped.
    fn glyph_index(&self, c: char) -> Option<u32>;

    /// Outline of `glyph` as an upward shape, plus its horizontal advance.
    fn load_glyph(&self, glyph: GlyphRef, scaling: FontScaling) -> MsdfResult<(Shape, f64)>;

    /// Horizontal kerning adjustment between two glyphs; 0 when the font
    /// has none for the pair.
    fn kerning(&self, left: GlyphRef, right: GlyphRef, scaling: FontScaling) -> MsdfResult<f64>;

    /// Variation axes of a variable font.
    fn variation_axes(&self) -> Vec<VariationAxis> {
        Vec::new()
    }

    /// Set the coordinate of the axis named `axis` (name or tag).
    fn set_variation(&mut self, axis: &str, _value: f64) -> MsdfResult<()> {
        Err(MsdfError::unavailable(format!(
            "font has no variation axis '{axis}'"
        )))
    }
}

#[cfg(feature = "ttf")]
pub use ttf::TtfFont;

#[cfg(feature = "ttf")]
mod ttf {
    use std::path::Path;

    use anyhow::Context;
    use kurbo::{BezPath, Point};
    use ttf_parser::{Face, GlyphId, Tag};

    use super::{FontMetrics, FontScaling, GlyphRef, GlyphSource, VariationAxis};
    use crate::foundation::error::{MsdfError, MsdfResult};
    use crate::geometry::shape::Shape;

    /// TrueType / OpenType font backed by `ttf-parser`.
    ///
    /// Owns the font bytes; the face is parsed on each query with the current
    /// variation coordinates applied.
    #[derive(Clone, Debug)]
    pub struct TtfFont {
        data: Vec<u8>,
        index: u32,
        variations: Vec<(Tag, f32)>,
    }

    impl TtfFont {
        /// Parse face `index` of a font file or collection held in memory.
        pub fn from_bytes(data: impl Into<Vec<u8>>, index: u32) -> MsdfResult<Self> {
            let font = Self {
                data: data.into(),
                index,
                variations: Vec::new(),
            };
            font.face()?;
            Ok(font)
        }

        /// Read and parse the first face of the font file at `path`.
        pub fn open(path: impl AsRef<Path>) -> MsdfResult<Self> {
            let path = path.as_ref();
            let data = std::fs::read(path)
                .with_context(|| format!("failed to read font file {}", path.display()))?;
            Self::from_bytes(data, 0)
        }

        fn face(&self) -> MsdfResult<Face<'_>> {
            let mut face = Face::parse(&self.data, self.index)
                .map_err(|e| MsdfError::font(format!("failed to parse font face {}: {e}", self.index)))?;
            for &(tag, value) in &self.variations {
                face.set_variation(tag, value);
            }
            Ok(face)
        }

        fn resolve(face: &Face<'_>, glyph: GlyphRef) -> MsdfResult<GlyphId> {
            match glyph {
                GlyphRef::Char(c) => face
                    .glyph_index(c)
                    .ok_or_else(|| MsdfError::font(format!("no glyph for {c:?}"))),
                GlyphRef::Index(i) => {
                    let id = u16::try_from(i)
                        .ok()
                        .filter(|&id| id < face.number_of_glyphs())
                        .ok_or_else(|| MsdfError::font(format!("glyph index {i} out of range")))?;
                    Ok(GlyphId(id))
                }
            }
        }

        fn advance(face: &Face<'_>, c: char) -> Option<f64> {
            face.glyph_index(c)
                .and_then(|g| face.glyph_hor_advance(g))
                .map(f64::from)
        }
    }

    /// Collects glyph outline commands into a scaled kurbo path.
    struct PathSink {
        path: BezPath,
        scale: f64,
    }

    impl PathSink {
        fn pt(&self, x: f32, y: f32) -> Point {
            Point::new(f64::from(x) * self.scale, f64::from(y) * self.scale)
        }
    }

    impl ttf_parser::OutlineBuilder for PathSink {
        fn move_to(&mut self, x: f32, y: f32) {
            let p = self.pt(x, y);
            self.path.move_to(p);
        }

        fn line_to(&mut self, x: f32, y: f32) {
            let p = self.pt(x, y);
            self.path.line_to(p);
        }

        fn quad_to(&mut self, x1: f32, y1: f32, x: f32, y: f32) {
            let (p1, p) = (self.pt(x1, y1), self.pt(x, y));
            self.path.quad_to(p1, p);
        }

        fn curve_to(&mut self, x1: f32, y1: f32, x2: f32, y2: f32, x: f32, y: f32) {
            let (p1, p2, p) = (self.pt(x1, y1), self.pt(x2, y2), self.pt(x, y));
            self.path.curve_to(p1, p2, p);
        }

        fn close(&mut self) {
            self.path.close_path();
        }
    }

    impl GlyphSource for TtfFont {
        fn metrics(&self, scaling: FontScaling) -> MsdfResult<FontMetrics> {
            let face = self.face()?;
            let upem = face.units_per_em();
            let k = scaling.factor(upem);
            let underline = face.underline_metrics();
            Ok(FontMetrics {
                em_size: f64::from(upem) * k,
                ascender_y: f64::from(face.ascender()) * k,
                descender_y: f64::from(face.descender()) * k,
                line_height: f64::from(face.height()) * k,
                underline_y: underline.map_or(0.0, |u| f64::from(u.position) * k),
                underline_thickness: underline.map_or(0.0, |u| f64::from(u.thickness) * k),
            })
        }

        fn whitespace_advances(&self, scaling: FontScaling) -> MsdfResult<(f64, f64)> {
            let face = self.face()?;
            let k = scaling.factor(face.units_per_em());
            let space = Self::advance(&face, ' ')
                .ok_or_else(|| MsdfError::font("font has no space glyph"))?;
            // Fonts without a tab glyph get four spaces.
            let tab = Self::advance(&face, '\t').unwrap_or(4.0 * space);
            Ok((space * k, tab * k))
        }

        fn glyph_count(&self) -> u32 {
            self.face()
                .map_or(0, |face| u32::from(face.number_of_glyphs()))
        }

        fn glyph_index(&self, c: char) -> Option<u32> {
            let face = self.face().ok()?;
            face.glyph_index(c).map(|g| u32::from(g.0))
        }

        fn load_glyph(&self, glyph: GlyphRef, scaling: FontScaling) -> MsdfResult<(Shape, f64)> {
            let face = self.face()?;
            let id = Self::resolve(&face, glyph)?;
            let k = scaling.factor(face.units_per_em());
            let mut sink = PathSink {
                path: BezPath::new(),
                scale: k,
            };
            // Blank glyphs (space) have no outline; they load as an empty shape.
            let _ = face.outline_glyph(id, &mut sink);
            let shape = Shape::from_bez_path(&sink.path, 0.0)?;
            let advance = face.glyph_hor_advance(id).map_or(0.0, f64::from) * k;
            tracing::debug!(glyph = id.0, contours = shape.contour_count(), "glyph loaded");
            Ok((shape, advance))
        }

        fn kerning(&self, left: GlyphRef, right: GlyphRef, scaling: FontScaling) -> MsdfResult<f64> {
            let face = self.face()?;
            let (l, r) = (Self::resolve(&face, left)?, Self::resolve(&face, right)?);
            let k = scaling.factor(face.units_per_em());
            let Some(kern) = face.tables().kern else {
                return Ok(0.0);
            };
            let value = kern
                .subtables
                .into_iter()
                .filter(|st| st.horizontal && !st.variable)
                .find_map(|st| st.glyphs_kerning(l, r))
                .unwrap_or(0);
            Ok(f64::from(value) * k)
        }

        fn variation_axes(&self) -> Vec<VariationAxis> {
            let Ok(face) = self.face() else {
                return Vec::new();
            };
            face.variation_axes()
                .into_iter()
                .map(|axis| {
                    let tag = String::from_utf8_lossy(&axis.tag.to_bytes()).into_owned();
                    let name = face
                        .names()
                        .into_iter()
                        .filter(|n| n.name_id == axis.name_id)
                        .find_map(|n| n.to_string())
                        .unwrap_or_else(|| tag.clone());
                    VariationAxis {
                        name,
                        tag,
                        min_value: f64::from(axis.min_value),
                        max_value: f64::from(axis.max_value),
                        default_value: f64::from(axis.def_value),
                    }
                })
                .collect()
        }

        fn set_variation(&mut self, axis: &str, value: f64) -> MsdfResult<()> {
            let Some(found) = self
                .variation_axes()
                .into_iter()
                .find(|a| a.name == axis || a.tag == axis)
            else {
                return Err(MsdfError::unavailable(format!(
                    "font has no variation axis '{axis}'"
                )));
            };
            let tag = Tag::from_bytes_lossy(found.tag.as_bytes());
            let value = value.clamp(found.min_value, found.max_value) as f32;
            self.variations.retain(|(t, _)| *t != tag);
            self.variations.push((tag, value));
            Ok(())
        }
    }
}

#[cfg(test)]
#[path = "../../tests/unit/collab/font.rs"]
mod tests;
