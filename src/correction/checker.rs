use crate::correction::artifacts::{ArtifactClassifier, BaseClassifier, Verdict};
use crate::distance::finder::ShapeDistanceFinder;
use crate::distance::selectors::PerpendicularDistanceSelector;
use crate::foundation::core::{Point, SdfTransform, Vec2, YAxisOrientation};
use crate::foundation::math::{median, mix_f32};
use crate::generate::bitmap::Bitmap;
use crate::generate::config::GeneratorConfig;
use crate::geometry::scanline::FillRule;
use crate::geometry::shape::Shape;

/// Classifier that confirms suspected artifacts against the real shape.
///
/// A candidate only counts when flattening the current texel would bring the
/// interpolated median meaningfully closer to the exact distance measured at
/// the same spot. With a fill rule the reference takes its sign from the
/// rule, matching a bitmap that went through the scanline sign pass.
#[derive(Clone, Debug)]
pub(crate) struct ShapeDistanceChecker<'a> {
    bitmap: &'a Bitmap,
    shape: &'a Shape,
    transform: SdfTransform,
    fill_rule: Option<FillRule>,
    finder: ShapeDistanceFinder<'a, PerpendicularDistanceSelector>,
    min_improve_ratio: f64,
    base: BaseClassifier,
    direction: Vec2,
    shape_coord: Point,
    sdf_coord: Point,
    msd: [f32; 3],
}

impl<'a> ShapeDistanceChecker<'a> {
    pub(crate) fn new(
        bitmap: &'a Bitmap,
        shape: &'a Shape,
        transform: &SdfTransform,
        generator: &GeneratorConfig,
        min_improve_ratio: f64,
    ) -> Self {
        Self {
            bitmap,
            shape,
            transform: *transform,
            fill_rule: generator.fill_rule,
            finder: ShapeDistanceFinder::new(shape, generator.overlap_support),
            min_improve_ratio,
            base: BaseClassifier::new(false),
            direction: Vec2::ZERO,
            shape_coord: Point::ZERO,
            sdf_coord: Point::ZERO,
            msd: [0.0; 3],
        }
    }

    /// Move to texel (`x`, `row`) in storage coordinates.
    pub(crate) fn focus(&mut self, x: usize, row: usize, protected: bool) {
        let y = self.bitmap.row_for_y(row as u32);
        self.shape_coord = self
            .transform
            .projection
            .unproject(Point::new(x as f64 + 0.5, f64::from(y) + 0.5));
        self.sdf_coord = Point::new(x as f64 + 0.5, row as f64 + 0.5);
        let c = self.bitmap.texel(x, row);
        self.msd = [c[0], c[1], c[2]];
        self.base.set_protected(protected);
    }

    /// Shape-space offset of a storage-space vector.
    fn shape_offset(&self, v: Vec2) -> Vec2 {
        let vy = match self.bitmap.y_axis() {
            YAxisOrientation::Upward => v.y,
            YAxisOrientation::Downward => -v.y,
        };
        self.transform.projection.unproject_vector(Vec2::new(v.x, vy))
    }

    /// Exact perpendicular distance at `origin`, signed by the fill rule when
    /// one is set.
    fn reference_distance(&mut self, origin: Point) -> f64 {
        let distance = self.finder.distance(origin);
        match self.fill_rule {
            Some(rule) if self.shape.scanline(origin.y).is_filled(origin.x, rule) => -distance.abs(),
            Some(_) => distance.abs(),
            None => distance,
        }
    }
}

impl ArtifactClassifier for ShapeDistanceChecker<'_> {
    fn aim(&mut self, direction: Vec2, span: f64) {
        self.direction = direction;
        self.base.aim(direction, span);
    }

    fn range_test(&self, at: f64, bt: f64, xt: f64, am: f32, bm: f32, xm: f32) -> Verdict {
        self.base.range_test(at, bt, xt, am, bm, xm)
    }

    fn evaluate(&mut self, t: f64, _m: f32, verdict: Verdict) -> bool {
        if !verdict.contains(Verdict::CANDIDATE) {
            return false;
        }
        if verdict.contains(Verdict::ARTIFACT) {
            return true;
        }
        let step = self.direction * t;
        let old = interpolate(self.bitmap, self.sdf_coord + step);
        // Weight of the current texel at the candidate position.
        let weight = (1.0 - step.x.abs()) * (1.0 - step.y.abs());
        let m = median(self.msd[0], self.msd[1], self.msd[2]);
        let new = [0, 1, 2].map(|i| (f64::from(old[i]) + weight * f64::from(m - self.msd[i])) as f32);

        let old_psd = median(old[0], old[1], old[2]);
        let new_psd = median(new[0], new[1], new[2]);
        let origin = self.shape_coord + self.shape_offset(step);
        let ref_psd = self.transform.range.encode(self.reference_distance(origin)) as f32;
        self.min_improve_ratio * f64::from((new_psd - ref_psd).abs())
            < f64::from((old_psd - ref_psd).abs())
    }
}

/// Bilinear sample of the color channels at storage-space position `pos`,
/// clamped to the bitmap.
fn interpolate(bitmap: &Bitmap, pos: Point) -> [f32; 3] {
    let (w, h) = (i64::from(bitmap.width()), i64::from(bitmap.height()));
    let px = pos.x - 0.5;
    let py = pos.y - 0.5;
    let l = px.floor() as i64;
    let b = py.floor() as i64;
    let lr = px - l as f64;
    let bt = py - b as f64;
    let col = |x: i64| x.clamp(0, w - 1) as usize;
    let row = |y: i64| y.clamp(0, h - 1) as usize;
    let (l, r, b, t) = (col(l), col(l + 1), row(b), row(b + 1));
    let (lb, rb, lt, rt) = (
        bitmap.texel(l, b),
        bitmap.texel(r, b),
        bitmap.texel(l, t),
        bitmap.texel(r, t),
    );
    [0, 1, 2].map(|i| {
        mix_f32(
            mix_f32(lb[i], rb[i], lr),
            mix_f32(lt[i], rt[i], lr),
            bt,
        )
    })
}

#[cfg(test)]
#[path = "../../tests/unit/correction/checker.rs"]
mod tests;
