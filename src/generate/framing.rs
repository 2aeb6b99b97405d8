use crate::foundation::core::{Rect, SdfTransform, Vec2};
use crate::foundation::error::{MsdfError, MsdfResult};
use crate::geometry::shape::Shape;

/// Uniform scale and translation that fit a shape into a canvas.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct Framing {
    /// Pixels per shape unit on both axes.
    pub scale: f64,
    /// Shape-space translation applied before scaling.
    pub translate: Vec2,
}

impl Framing {
    /// Transform for generating with this framing and a pixel range.
    pub fn transform(&self, range_px: f64) -> MsdfResult<SdfTransform> {
        SdfTransform::from_pixel_range(Vec2::new(self.scale, self.scale), self.translate, range_px)
    }
}

/// Fit `shape` into a `width` x `height` canvas, leaving `range_px / 2` pixels
/// of margin on every side and centering along the looser axis.
///
/// A shape without edges is framed as the unit square.
pub fn auto_frame(shape: &Shape, width: u32, height: u32, range_px: f64) -> MsdfResult<Framing> {
    if width == 0 || height == 0 {
        return Err(MsdfError::invalid_argument(format!(
            "canvas dimensions must be > 0 (got {width}x{height})"
        )));
    }
    if !range_px.is_finite() || range_px < 0.0 {
        return Err(MsdfError::invalid_argument(
            "pixel range must be finite and >= 0",
        ));
    }
    let bounds = shape
        .bounds()
        .filter(|b| b.x0 < b.x1 && b.y0 < b.y1)
        .unwrap_or(Rect::new(0.0, 0.0, 1.0, 1.0));

    let frame = Vec2::new(f64::from(width) - range_px, f64::from(height) - range_px);
    if frame.x <= 0.0 || frame.y <= 0.0 {
        return Err(MsdfError::invalid_argument(
            "pixel range leaves no room for the shape in the canvas",
        ));
    }
    let dims = Vec2::new(bounds.width(), bounds.height());
    let (scale, mut translate) = if dims.x * frame.y < dims.y * frame.x {
        (
            frame.y / dims.y,
            Vec2::new(
                0.5 * (frame.x / frame.y * dims.y - dims.x) - bounds.x0,
                -bounds.y0,
            ),
        )
    } else {
        (
            frame.x / dims.x,
            Vec2::new(
                -bounds.x0,
                0.5 * (frame.y / frame.x * dims.x - dims.y) - bounds.y0,
            ),
        )
    };
    let margin = 0.5 * range_px / scale;
    translate += Vec2::new(margin, margin);
    Ok(Framing { scale, translate })
}

#[cfg(test)]
#[path = "../../tests/unit/generate/framing.rs"]
mod tests;
