use crate::foundation::error::{MsdfError, MsdfResult};

pub use kurbo::{BezPath, CubicBez, Line, Point, QuadBez, Rect, Vec2};

/// Direction of the shape-space y axis.
///
/// Bitmaps always store the bottom row of the picture first; for
/// [`YAxisOrientation::Downward`] shapes that is the last pixel row.
#[derive(
    Clone, Copy, Debug, Default, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize,
)]
pub enum YAxisOrientation {
    /// y grows upward (font units, mathematical convention).
    #[default]
    Upward,
    /// y grows downward (SVG, screen coordinates).
    Downward,
}

/// Affine map from shape space into pixel space: `pixel = scale * (shape + translate)`.
///
/// Only built through [`Projection::new`]; documents are validated the same way.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(try_from = "ProjectionDoc")]
pub struct Projection {
    scale: Vec2,
    translate: Vec2,
}

#[derive(serde::Deserialize)]
struct ProjectionDoc {
    scale: Vec2,
    translate: Vec2,
}

impl TryFrom<ProjectionDoc> for Projection {
    type Error = MsdfError;

    fn try_from(doc: ProjectionDoc) -> MsdfResult<Self> {
        Self::new(doc.scale, doc.translate)
    }
}

impl Default for Projection {
    fn default() -> Self {
        Self {
            scale: Vec2::new(1.0, 1.0),
            translate: Vec2::ZERO,
        }
    }
}

impl Projection {
    /// Validated constructor; scale must be positive and finite.
    pub fn new(scale: Vec2, translate: Vec2) -> MsdfResult<Self> {
        if !(scale.x.is_finite() && scale.y.is_finite()) || scale.x <= 0.0 || scale.y <= 0.0 {
            return Err(MsdfError::invalid_argument(
                "projection scale must be finite and > 0 on both axes",
            ));
        }
        if !(translate.x.is_finite() && translate.y.is_finite()) {
            return Err(MsdfError::invalid_argument(
                "projection translate must be finite",
            ));
        }
        Ok(Self { scale, translate })
    }

    /// Pixels per shape unit on each axis.
    pub fn scale(&self) -> Vec2 {
        self.scale
    }

    /// Shape-space offset applied before scaling.
    pub fn translate(&self) -> Vec2 {
        self.translate
    }

    /// Shape point to pixel point.
    pub fn project(&self, p: Point) -> Point {
        Point::new(
            self.scale.x * (p.x + self.translate.x),
            self.scale.y * (p.y + self.translate.y),
        )
    }

    /// Pixel point to shape point.
    pub fn unproject(&self, p: Point) -> Point {
        Point::new(self.unproject_x(p.x), self.unproject_y(p.y))
    }

    /// Pixel x to shape x.
    pub fn unproject_x(&self, x: f64) -> f64 {
        x / self.scale.x - self.translate.x
    }

    /// Pixel y to shape y.
    pub fn unproject_y(&self, y: f64) -> f64 {
        y / self.scale.y - self.translate.y
    }

    /// Scale a shape-space vector into pixel space.
    pub fn project_vector(&self, v: Vec2) -> Vec2 {
        Vec2::new(self.scale.x * v.x, self.scale.y * v.y)
    }

    /// Scale a pixel-space vector into shape space.
    pub fn unproject_vector(&self, v: Vec2) -> Vec2 {
        Vec2::new(v.x / self.scale.x, v.y / self.scale.y)
    }
}

/// Symmetric shape-space distance span that maps onto the `[0, 1]` encoding.
///
/// Distances are signed positive outside the filled region, so the encoding is
/// `0.5 - d / width`: the outline sits at 0.5 and the inside reads above it.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(try_from = "DistanceRangeDoc")]
pub struct DistanceRange {
    width: f64,
}

#[derive(serde::Deserialize)]
struct DistanceRangeDoc {
    width: f64,
}

impl TryFrom<DistanceRangeDoc> for DistanceRange {
    type Error = MsdfError;

    fn try_from(doc: DistanceRangeDoc) -> MsdfResult<Self> {
        Self::new(doc.width)
    }
}

impl DistanceRange {
    /// Validated constructor; width must be positive and finite.
    pub fn new(width: f64) -> MsdfResult<Self> {
        if !width.is_finite() || width <= 0.0 {
            return Err(MsdfError::invalid_argument(
                "distance range must be finite and > 0",
            ));
        }
        Ok(Self { width })
    }

    /// Full width of the representable distance band, in shape units.
    pub fn width(self) -> f64 {
        self.width
    }

    /// Signed shape distance to encoded value.
    pub fn encode(self, distance: f64) -> f64 {
        0.5 - distance / self.width
    }

    /// Encoded value back to signed shape distance.
    pub fn decode(self, value: f64) -> f64 {
        (0.5 - value) * self.width
    }

    /// Encoded magnitude of a shape-space distance delta.
    pub fn encode_delta(self, delta: f64) -> f64 {
        delta / self.width
    }
}

/// Projection plus distance range: everything a generator needs to place pixels.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct SdfTransform {
    /// Shape to pixel mapping.
    pub projection: Projection,
    /// Distance encoding band.
    pub range: DistanceRange,
}

impl SdfTransform {
    /// Pair an already validated projection and range.
    pub fn new(projection: Projection, range: DistanceRange) -> Self {
        Self { projection, range }
    }

    /// Build a transform from a pixel-space range; the shape-space range is
    /// `range_px / min(scale.x, scale.y)`.
    pub fn from_pixel_range(scale: Vec2, translate: Vec2, range_px: f64) -> MsdfResult<Self> {
        let projection = Projection::new(scale, translate)?;
        let range = DistanceRange::new(range_px / scale.x.min(scale.y))?;
        Ok(Self { projection, range })
    }

    /// Encoded value change across one pixel step along `pixel_step`.
    pub(crate) fn encoded_pixel_span(&self, pixel_step: Vec2) -> f64 {
        let delta = self.range.encode_delta(1.0);
        self.projection
            .unproject_vector(pixel_step * delta)
            .length()
    }
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/core.rs"]
mod tests;
