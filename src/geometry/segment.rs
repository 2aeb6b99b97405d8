use kurbo::common::{solve_cubic, solve_quadratic};
use kurbo::{ParamCurve, ParamCurveArclen, ParamCurveExtrema};
use smallvec::SmallVec;

use crate::coloring::color::EdgeColor;
use crate::distance::signed::SignedDistance;
use crate::foundation::core::{CubicBez, Line, Point, QuadBez, Rect, Vec2};
use crate::foundation::math::{is_zero, mix_vec, non_zero_sign, normalize, orthonormal};
use crate::geometry::scanline::Intersection;

const CUBIC_SEARCH_STARTS: usize = 4;
const CUBIC_SEARCH_STEPS: usize = 4;
const SCANLINE_BISECT_STEPS: usize = 60;

/// One directed curve piece, parameterized over `t` in `[0, 1]`.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub enum Segment {
    /// Straight line from `p0` to `p1`.
    Linear(Line),
    /// Quadratic Bézier.
    Quadratic(QuadBez),
    /// Cubic Bézier.
    Cubic(CubicBez),
}

impl Segment {
    /// Straight segment.
    pub fn line(p0: Point, p1: Point) -> Self {
        Self::Linear(Line::new(p0, p1))
    }

    /// Quadratic segment with one control point.
    pub fn quadratic(p0: Point, p1: Point, p2: Point) -> Self {
        Self::Quadratic(QuadBez::new(p0, p1, p2))
    }

    /// Cubic segment with two control points.
    pub fn cubic(p0: Point, p1: Point, p2: Point, p3: Point) -> Self {
        Self::Cubic(CubicBez::new(p0, p1, p2, p3))
    }

    /// All defining points, endpoints included.
    pub fn control_points(&self) -> SmallVec<[Point; 4]> {
        match *self {
            Self::Linear(l) => SmallVec::from_slice(&[l.p0, l.p1]),
            Self::Quadratic(q) => SmallVec::from_slice(&[q.p0, q.p1, q.p2]),
            Self::Cubic(c) => SmallVec::from_slice(&[c.p0, c.p1, c.p2, c.p3]),
        }
    }

    /// Point at parameter `t`.
    pub fn point(&self, t: f64) -> Point {
        match self {
            Self::Linear(l) => l.eval(t),
            Self::Quadratic(q) => q.eval(t),
            Self::Cubic(c) => c.eval(t),
        }
    }

    /// Start point.
    pub fn start(&self) -> Point {
        match self {
            Self::Linear(l) => l.p0,
            Self::Quadratic(q) => q.p0,
            Self::Cubic(c) => c.p0,
        }
    }

    /// End point.
    pub fn end(&self) -> Point {
        match self {
            Self::Linear(l) => l.p1,
            Self::Quadratic(q) => q.p2,
            Self::Cubic(c) => c.p3,
        }
    }

    /// Unnormalized tangent direction at `t`.
    ///
    /// Where the derivative vanishes at an endpoint (a control point sitting
    /// on it), the chord to the next distinct control point is returned.
    pub fn direction(&self, t: f64) -> Vec2 {
        match *self {
            Self::Linear(l) => l.p1 - l.p0,
            Self::Quadratic(q) => {
                let tangent = mix_vec(q.p1 - q.p0, q.p2 - q.p1, t);
                if is_zero(tangent) {
                    q.p2 - q.p0
                } else {
                    tangent
                }
            }
            Self::Cubic(c) => {
                let tangent = mix_vec(
                    mix_vec(c.p1 - c.p0, c.p2 - c.p1, t),
                    mix_vec(c.p2 - c.p1, c.p3 - c.p2, t),
                    t,
                );
                if is_zero(tangent) {
                    if t == 0.0 {
                        return c.p2 - c.p0;
                    }
                    if t == 1.0 {
                        return c.p3 - c.p1;
                    }
                }
                tangent
            }
        }
    }

    /// Rate of change of [`Segment::direction`] at `t`.
    pub fn direction_change(&self, t: f64) -> Vec2 {
        match *self {
            Self::Linear(_) => Vec2::ZERO,
            Self::Quadratic(q) => (q.p2 - q.p1) - (q.p1 - q.p0),
            Self::Cubic(c) => mix_vec(
                (c.p2 - c.p1) - (c.p1 - c.p0),
                (c.p3 - c.p2) - (c.p2 - c.p1),
                t,
            ),
        }
    }

    /// Arc length estimate.
    pub fn length(&self) -> f64 {
        const ACCURACY: f64 = 1e-6;
        match self {
            Self::Linear(l) => l.arclen(ACCURACY),
            Self::Quadratic(q) => q.arclen(ACCURACY),
            Self::Cubic(c) => c.arclen(ACCURACY),
        }
    }

    /// Tight axis-aligned bounds (curve extrema included).
    pub fn bounds(&self) -> Rect {
        match self {
            Self::Linear(l) => l.bounding_box(),
            Self::Quadratic(q) => q.bounding_box(),
            Self::Cubic(c) => c.bounding_box(),
        }
    }

    /// True when every control point coincides.
    pub fn is_degenerate(&self) -> bool {
        let pts = self.control_points();
        pts.iter().all(|p| *p == pts[0])
    }

    /// True when any coordinate is NaN or infinite.
    pub(crate) fn is_finite(&self) -> bool {
        self.control_points()
            .iter()
            .all(|p| p.x.is_finite() && p.y.is_finite())
    }

    /// Same curve traversed backwards.
    pub fn reversed(&self) -> Self {
        match *self {
            Self::Linear(l) => Self::line(l.p1, l.p0),
            Self::Quadratic(q) => Self::quadratic(q.p2, q.p1, q.p0),
            Self::Cubic(c) => Self::cubic(c.p3, c.p2, c.p1, c.p0),
        }
    }

    /// Three pieces covering `[0, 1/3]`, `[1/3, 2/3]` and `[2/3, 1]`.
    ///
    /// The cut points are shared exactly so the pieces stay connected.
    pub fn split_in_thirds(&self) -> [Self; 3] {
        let a = 1.0 / 3.0;
        let b = 2.0 / 3.0;
        let mut parts = match self {
            Self::Linear(l) => [
                Self::Linear(l.subsegment(0.0..a)),
                Self::Linear(l.subsegment(a..b)),
                Self::Linear(l.subsegment(b..1.0)),
            ],
            Self::Quadratic(q) => [
                Self::Quadratic(q.subsegment(0.0..a)),
                Self::Quadratic(q.subsegment(a..b)),
                Self::Quadratic(q.subsegment(b..1.0)),
            ],
            Self::Cubic(c) => [
                Self::Cubic(c.subsegment(0.0..a)),
                Self::Cubic(c.subsegment(a..b)),
                Self::Cubic(c.subsegment(b..1.0)),
            ],
        };
        parts[0].set_start(self.start());
        let cut1 = parts[0].end();
        parts[1].set_start(cut1);
        let cut2 = parts[1].end();
        parts[2].set_start(cut2);
        parts[2].set_end(self.end());
        parts
    }

    /// Degree-elevated cubic form of this segment.
    pub(crate) fn to_cubic(&self) -> CubicBez {
        match *self {
            Self::Linear(l) => CubicBez::new(l.p0, l.eval(1.0 / 3.0), l.eval(2.0 / 3.0), l.p1),
            Self::Quadratic(q) => q.raise(),
            Self::Cubic(c) => c,
        }
    }

    fn set_start(&mut self, p: Point) {
        match self {
            Self::Linear(l) => l.p0 = p,
            Self::Quadratic(q) => q.p0 = p,
            Self::Cubic(c) => c.p0 = p,
        }
    }

    fn set_end(&mut self, p: Point) {
        match self {
            Self::Linear(l) => l.p1 = p,
            Self::Quadratic(q) => q.p2 = p,
            Self::Cubic(c) => c.p3 = p,
        }
    }

    /// Move the start point, dragging the adjacent control point so the
    /// starting tangent is preserved where possible.
    pub(crate) fn move_start(&mut self, to: Point) {
        match self {
            Self::Linear(l) => l.p0 = to,
            Self::Quadratic(q) => {
                let orig_dir = q.p0 - q.p1;
                let orig_p1 = q.p1;
                let denom = (q.p0 - q.p1).cross(q.p2 - q.p1);
                if denom != 0.0 {
                    q.p1 += (q.p2 - q.p1) * ((q.p0 - q.p1).cross(to - q.p0) / denom);
                }
                q.p0 = to;
                if orig_dir.dot(q.p0 - q.p1) < 0.0 {
                    q.p1 = orig_p1;
                }
            }
            Self::Cubic(c) => {
                c.p1 += to - c.p0;
                c.p0 = to;
            }
        }
    }

    /// Mirror of [`Segment::move_start`] for the end point.
    pub(crate) fn move_end(&mut self, to: Point) {
        match self {
            Self::Linear(l) => l.p1 = to,
            Self::Quadratic(q) => {
                let orig_dir = q.p2 - q.p1;
                let orig_p1 = q.p1;
                let denom = (q.p2 - q.p1).cross(q.p0 - q.p1);
                if denom != 0.0 {
                    q.p1 += (q.p0 - q.p1) * ((q.p2 - q.p1).cross(to - q.p2) / denom);
                }
                q.p2 = to;
                if orig_dir.dot(q.p2 - q.p1) < 0.0 {
                    q.p1 = orig_p1;
                }
            }
            Self::Cubic(c) => {
                c.p2 += to - c.p3;
                c.p3 = to;
            }
        }
    }

    /// Nudge the control point adjacent to `param` (0 or 1) sideways by
    /// `vector`, scaled by that control arm's length. Lines are left alone;
    /// quadratics are raised to cubics first.
    pub(crate) fn deconverge(&mut self, param: u8, vector: Vec2) {
        if let Self::Linear(_) = self {
            return;
        }
        let mut c = self.to_cubic();
        if param == 0 {
            c.p1 += (c.p1 - c.p0).length() * vector;
        } else {
            c.p2 += (c.p2 - c.p3).length() * vector;
        }
        *self = Self::Cubic(c);
    }

    /// Nearest-point signed distance from `origin`, with the curve parameter of
    /// the nearest point. The parameter falls outside `[0, 1]` when the
    /// nearest point is an endpoint and the origin lies beyond it.
    pub fn signed_distance(&self, origin: Point) -> (SignedDistance, f64) {
        match *self {
            Self::Linear(l) => linear_distance(l, origin),
            Self::Quadratic(q) => quadratic_distance(self, q, origin),
            Self::Cubic(c) => cubic_distance(self, c, origin),
        }
    }

    /// Replace `distance` by the distance to the endpoint's tangent line when
    /// the origin lies beyond that endpoint and the line is closer.
    pub fn distance_to_perpendicular(
        &self,
        distance: &mut SignedDistance,
        origin: Point,
        param: f64,
    ) {
        if param < 0.0 {
            let dir = normalize(self.direction(0.0), false);
            let aq = origin - self.start();
            if aq.dot(dir) < 0.0 {
                let perpendicular = aq.cross(dir);
                if perpendicular.abs() <= distance.distance.abs() {
                    *distance = SignedDistance::new(perpendicular, 0.0);
                }
            }
        } else if param > 1.0 {
            let dir = normalize(self.direction(1.0), false);
            let bq = origin - self.end();
            if bq.dot(dir) > 0.0 {
                let perpendicular = bq.cross(dir);
                if perpendicular.abs() <= distance.distance.abs() {
                    *distance = SignedDistance::new(perpendicular, 0.0);
                }
            }
        }
    }

    /// Append the crossings of the horizontal line at `y` to `out`.
    ///
    /// The curve is cut into y-monotone pieces and each piece counts the line
    /// when `min_y <= y < max_y`, so a vertex shared by two pieces is counted
    /// exactly once and a tangential touch at the top is not counted.
    pub(crate) fn scanline_intersections(&self, y: f64, out: &mut Vec<Intersection>) {
        let mut cuts: SmallVec<[f64; 4]> = SmallVec::new();
        cuts.push(0.0);
        for t in self.y_extrema() {
            if t > 0.0 && t < 1.0 {
                cuts.push(t);
            }
        }
        cuts.push(1.0);
        cuts.sort_by(f64::total_cmp);

        for w in cuts.windows(2) {
            let (ta, tb) = (w[0], w[1]);
            let ya = self.point(ta).y;
            let yb = self.point(tb).y;
            let direction = if ya < yb && ya <= y && y < yb {
                1
            } else if yb < ya && yb <= y && y < ya {
                -1
            } else {
                continue;
            };
            let t = self.bisect_y(ta, tb, y, direction > 0);
            out.push(Intersection {
                x: self.point(t).x,
                direction,
            });
        }
    }

    fn y_extrema(&self) -> SmallVec<[f64; 2]> {
        let mut out = SmallVec::new();
        match *self {
            Self::Linear(_) => {}
            Self::Quadratic(q) => {
                let denom = q.p0.y - 2.0 * q.p1.y + q.p2.y;
                if denom != 0.0 {
                    out.push((q.p0.y - q.p1.y) / denom);
                }
            }
            Self::Cubic(c) => {
                let d0 = c.p1.y - c.p0.y;
                let d1 = c.p2.y - c.p1.y;
                let d2 = c.p3.y - c.p2.y;
                for t in solve_quadratic(d0, 2.0 * (d1 - d0), d0 - 2.0 * d1 + d2) {
                    if t.is_finite() {
                        out.push(t);
                    }
                }
            }
        }
        out
    }

    fn bisect_y(&self, mut lo: f64, mut hi: f64, y: f64, increasing: bool) -> f64 {
        if let Self::Linear(l) = self {
            let dy = l.p1.y - l.p0.y;
            return ((y - l.p0.y) / dy).clamp(0.0, 1.0);
        }
        for _ in 0..SCANLINE_BISECT_STEPS {
            let mid = 0.5 * (lo + hi);
            let below = self.point(mid).y < y;
            if below == increasing {
                lo = mid;
            } else {
                hi = mid;
            }
        }
        0.5 * (lo + hi)
    }
}

fn linear_distance(l: Line, origin: Point) -> (SignedDistance, f64) {
    let aq = origin - l.p0;
    let ab = l.p1 - l.p0;
    let param = aq.dot(ab) / ab.dot(ab);
    let nearest = if param > 0.5 { l.p1 } else { l.p0 };
    let eq = nearest - origin;
    let endpoint_distance = eq.length();
    if param > 0.0 && param < 1.0 {
        let ortho = orthonormal(ab, false, false).dot(aq);
        if ortho.abs() < endpoint_distance {
            return (SignedDistance::new(ortho, 0.0), param);
        }
    }
    let sd = SignedDistance::new(
        non_zero_sign(aq.cross(ab)) * endpoint_distance,
        normalize(ab, false).dot(normalize(eq, false)).abs(),
    );
    (sd, param)
}

/// Shared endpoint candidates for curved segments: distance to whichever end
/// is closer, with the parameter extended along that end's tangent.
fn endpoint_candidate(seg: &Segment, origin: Point) -> (f64, f64) {
    let qa = seg.start() - origin;
    let mut dir = seg.direction(0.0);
    let mut min_distance = non_zero_sign(dir.cross(qa)) * qa.length();
    let mut param = -qa.dot(dir) / dir.dot(dir);

    let qb = seg.end() - origin;
    let distance = qb.length();
    if distance < min_distance.abs() {
        dir = seg.direction(1.0);
        min_distance = non_zero_sign(dir.cross(qb)) * distance;
        param = 1.0 - qb.dot(dir) / dir.dot(dir);
    }
    (min_distance, param)
}

fn finish_curve_distance(
    seg: &Segment,
    origin: Point,
    min_distance: f64,
    param: f64,
) -> (SignedDistance, f64) {
    if (0.0..=1.0).contains(&param) {
        return (SignedDistance::new(min_distance, 0.0), param);
    }
    let (dir, toward) = if param < 0.5 {
        (seg.direction(0.0), seg.start() - origin)
    } else {
        (seg.direction(1.0), seg.end() - origin)
    };
    let dot = normalize(dir, false).dot(normalize(toward, false)).abs();
    (SignedDistance::new(min_distance, dot), param)
}

fn quadratic_distance(seg: &Segment, q: QuadBez, origin: Point) -> (SignedDistance, f64) {
    let qa = q.p0 - origin;
    let ab = q.p1 - q.p0;
    let br = q.p2 - q.p1 - ab;
    let a = br.dot(br);
    let b = 3.0 * ab.dot(br);
    let c = 2.0 * ab.dot(ab) + qa.dot(br);
    let d = qa.dot(ab);

    let (mut min_distance, mut param) = endpoint_candidate(seg, origin);
    for t in solve_cubic(d, c, b, a) {
        if t > 0.0 && t < 1.0 {
            let qe = qa + 2.0 * t * ab + t * t * br;
            let distance = qe.length();
            if distance <= min_distance.abs() {
                min_distance = non_zero_sign((ab + t * br).cross(qe)) * distance;
                param = t;
            }
        }
    }
    finish_curve_distance(seg, origin, min_distance, param)
}

fn cubic_distance(seg: &Segment, c: CubicBez, origin: Point) -> (SignedDistance, f64) {
    let qa = c.p0 - origin;
    let ab = c.p1 - c.p0;
    let br = c.p2 - c.p1 - ab;
    let as_ = (c.p3 - c.p2) - (c.p2 - c.p1) - br;

    let qe_at = |t: f64| qa + 3.0 * t * ab + 3.0 * t * t * br + t * t * t * as_;
    let d1_at = |t: f64| 3.0 * ab + 6.0 * t * br + 3.0 * t * t * as_;
    let d2_at = |t: f64| 6.0 * br + 6.0 * t * as_;
    let newton = |t: f64, qe: Vec2, d1: Vec2| t - qe.dot(d1) / (d1.dot(d1) + qe.dot(d2_at(t)));

    let (mut min_distance, mut param) = endpoint_candidate(seg, origin);
    for i in 0..=CUBIC_SEARCH_STARTS {
        let mut t = i as f64 / CUBIC_SEARCH_STARTS as f64;
        let mut qe = qe_at(t);
        let mut d1 = d1_at(t);
        let mut improved = newton(t, qe, d1);
        if !(improved > 0.0 && improved < 1.0) {
            continue;
        }
        let mut remaining = CUBIC_SEARCH_STEPS;
        loop {
            t = improved;
            qe = qe_at(t);
            d1 = d1_at(t);
            remaining -= 1;
            if remaining == 0 {
                break;
            }
            improved = newton(t, qe, d1);
            if !(improved > 0.0 && improved < 1.0) {
                break;
            }
        }
        let distance = qe.length();
        if distance < min_distance.abs() {
            min_distance = non_zero_sign(d1.cross(qe)) * distance;
            param = t;
        }
    }
    finish_curve_distance(seg, origin, min_distance, param)
}

/// A segment together with the channels it feeds.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct Edge {
    segment: Segment,
    #[serde(with = "color_bits")]
    color: EdgeColor,
}

impl Edge {
    /// New edge colored [`EdgeColor::WHITE`].
    pub fn new(segment: Segment) -> Self {
        Self::with_color(segment, EdgeColor::WHITE)
    }

    /// New edge with an explicit color.
    pub fn with_color(segment: Segment, color: EdgeColor) -> Self {
        Self { segment, color }
    }

    /// Underlying curve.
    pub fn segment(&self) -> &Segment {
        &self.segment
    }

    pub(crate) fn segment_mut(&mut self) -> &mut Segment {
        &mut self.segment
    }

    /// Channel set.
    pub fn color(&self) -> EdgeColor {
        self.color
    }

    /// Replace the channel set.
    pub fn set_color(&mut self, color: EdgeColor) {
        self.color = color;
    }
}

mod color_bits {
    use super::EdgeColor;

    pub(super) fn serialize<S: serde::Serializer>(c: &EdgeColor, s: S) -> Result<S::Ok, S::Error> {
        s.serialize_u8(c.bits())
    }

    pub(super) fn deserialize<'de, D: serde::Deserializer<'de>>(d: D) -> Result<EdgeColor, D::Error> {
        let bits = <u8 as serde::Deserialize>::deserialize(d)?;
        EdgeColor::from_bits(bits)
            .ok_or_else(|| serde::de::Error::custom(format!("invalid edge color bits {bits:#05b}")))
    }
}

#[cfg(test)]
#[path = "../../tests/unit/geometry/segment.rs"]
mod tests;
