use crate::coloring::color::EdgeColor;
use crate::distance::signed::SignedDistance;
use crate::foundation::core::{Point, Vec2};
use crate::foundation::math::{median, normalize};
use crate::geometry::segment::{Edge, Segment};

/// Per-pixel distance result that a combiner can order by a single scalar.
pub(crate) trait DistanceValue: Copy {
    /// Value standing for "no edge seen": far outside.
    const FAR: Self;
    /// Scalar used for sign and magnitude decisions.
    fn resolve(&self) -> f64;
}

impl DistanceValue for f64 {
    const FAR: Self = f64::MAX;

    fn resolve(&self) -> f64 {
        *self
    }
}

/// One distance per color channel.
#[derive(Clone, Copy, Debug, PartialEq)]
pub(crate) struct MultiDistance {
    pub(crate) r: f64,
    pub(crate) g: f64,
    pub(crate) b: f64,
}

impl DistanceValue for MultiDistance {
    const FAR: Self = Self {
        r: f64::MAX,
        g: f64::MAX,
        b: f64::MAX,
    };

    fn resolve(&self) -> f64 {
        median(self.r, self.g, self.b)
    }
}

/// Channel distances plus the true distance in `a`.
#[derive(Clone, Copy, Debug, PartialEq)]
pub(crate) struct MultiAndTrueDistance {
    pub(crate) r: f64,
    pub(crate) g: f64,
    pub(crate) b: f64,
    pub(crate) a: f64,
}

impl DistanceValue for MultiAndTrueDistance {
    const FAR: Self = Self {
        r: f64::MAX,
        g: f64::MAX,
        b: f64::MAX,
        a: f64::MAX,
    };

    fn resolve(&self) -> f64 {
        median(self.r, self.g, self.b)
    }
}

/// Accumulates the edges of one contour (or a whole shape) as seen from a
/// fixed query point.
pub(crate) trait EdgeSelector: Clone {
    type Distance: DistanceValue;

    fn new(p: Point) -> Self;
    fn add_edge(&mut self, prev: &Edge, edge: &Edge, next: &Edge);
    fn merge(&mut self, other: &Self);
    fn distance(&self) -> Self::Distance;
}

/// Nearest true distance, ignoring colors.
#[derive(Clone, Debug)]
pub(crate) struct TrueDistanceSelector {
    p: Point,
    min: SignedDistance,
}

impl EdgeSelector for TrueDistanceSelector {
    type Distance = f64;

    fn new(p: Point) -> Self {
        Self {
            p,
            min: SignedDistance::FAR,
        }
    }

    fn add_edge(&mut self, _prev: &Edge, edge: &Edge, _next: &Edge) {
        let (d, _) = edge.segment().signed_distance(self.p);
        if d.closer_than(&self.min) {
            self.min = d;
        }
    }

    fn merge(&mut self, other: &Self) {
        if other.min.closer_than(&self.min) {
            self.min = other.min;
        }
    }

    fn distance(&self) -> f64 {
        self.min.distance
    }
}

/// Result of measuring one edge: its true distance plus the perpendicular
/// distances to the tangent extensions at either end, when the query point
/// lies in that end's domain.
struct EdgeMeasure {
    distance: SignedDistance,
    param: f64,
    start_perpendicular: Option<f64>,
    end_perpendicular: Option<f64>,
}

/// Perpendicular distance along `edge_dir` from the endpoint, if it beats
/// `distance` and the point is ahead of the endpoint.
fn perpendicular_distance(distance: f64, ep: Vec2, edge_dir: Vec2) -> Option<f64> {
    if ep.dot(edge_dir) > 0.0 {
        let perpendicular = ep.cross(edge_dir);
        if perpendicular.abs() < distance.abs() {
            return Some(perpendicular);
        }
    }
    None
}

fn measure_edge(p: Point, prev: &Edge, edge: &Edge, next: &Edge) -> EdgeMeasure {
    let seg = edge.segment();
    let (distance, param) = seg.signed_distance(p);

    let ap = p - seg.start();
    let bp = p - seg.end();
    let a_dir = normalize(seg.direction(0.0), true);
    let b_dir = normalize(seg.direction(1.0), true);
    let prev_dir = normalize(prev.segment().direction(1.0), true);
    let next_dir = normalize(next.segment().direction(0.0), true);
    let add = ap.dot(normalize(prev_dir + a_dir, true));
    let bdd = -bp.dot(normalize(b_dir + next_dir, true));

    let start_perpendicular = if add > 0.0 {
        perpendicular_distance(distance.distance, ap, -a_dir).map(|d| -d)
    } else {
        None
    };
    let end_perpendicular = if bdd > 0.0 {
        perpendicular_distance(distance.distance, bp, b_dir)
    } else {
        None
    };
    EdgeMeasure {
        distance,
        param,
        start_perpendicular,
        end_perpendicular,
    }
}

/// Shared state of the pseudo-distance selectors: the nearest edge by true
/// distance and the nearest perpendicular distances on either side.
#[derive(Clone, Debug)]
struct PerpendicularBase {
    min_true: SignedDistance,
    min_negative: f64,
    min_positive: f64,
    near: Option<(Segment, f64)>,
}

impl PerpendicularBase {
    fn new() -> Self {
        Self {
            min_true: SignedDistance::FAR,
            min_negative: -f64::MAX,
            min_positive: f64::MAX,
            near: None,
        }
    }

    fn add_true(&mut self, segment: &Segment, distance: SignedDistance, param: f64) {
        if distance.closer_than(&self.min_true) {
            self.min_true = distance;
            self.near = Some((*segment, param));
        }
    }

    fn add_perpendicular(&mut self, distance: f64) {
        if distance <= 0.0 && distance > self.min_negative {
            self.min_negative = distance;
        }
        if distance >= 0.0 && distance < self.min_positive {
            self.min_positive = distance;
        }
    }

    fn add_measure(&mut self, segment: &Segment, measure: &EdgeMeasure) {
        self.add_true(segment, measure.distance, measure.param);
        if let Some(d) = measure.start_perpendicular {
            self.add_perpendicular(d);
        }
        if let Some(d) = measure.end_perpendicular {
            self.add_perpendicular(d);
        }
    }

    fn merge(&mut self, other: &Self) {
        if other.min_true.closer_than(&self.min_true) {
            self.min_true = other.min_true;
            self.near = other.near;
        }
        if other.min_negative > self.min_negative {
            self.min_negative = other.min_negative;
        }
        if other.min_positive < self.min_positive {
            self.min_positive = other.min_positive;
        }
    }

    fn compute(&self, p: Point) -> f64 {
        let mut min = if self.min_true.distance < 0.0 {
            self.min_negative
        } else {
            self.min_positive
        };
        if let Some((segment, param)) = &self.near {
            let mut d = self.min_true;
            segment.distance_to_perpendicular(&mut d, p, *param);
            if d.distance.abs() < min.abs() {
                min = d.distance;
            }
        }
        min
    }
}

/// Single-channel pseudo-distance over all edges.
#[derive(Clone, Debug)]
pub(crate) struct PerpendicularDistanceSelector {
    p: Point,
    base: PerpendicularBase,
}

impl EdgeSelector for PerpendicularDistanceSelector {
    type Distance = f64;

    fn new(p: Point) -> Self {
        Self {
            p,
            base: PerpendicularBase::new(),
        }
    }

    fn add_edge(&mut self, prev: &Edge, edge: &Edge, next: &Edge) {
        let measure = measure_edge(self.p, prev, edge, next);
        self.base.add_measure(edge.segment(), &measure);
    }

    fn merge(&mut self, other: &Self) {
        self.base.merge(&other.base);
    }

    fn distance(&self) -> f64 {
        self.base.compute(self.p)
    }
}

/// Pseudo-distance per color channel; each channel only sees edges whose
/// color includes it.
#[derive(Clone, Debug)]
pub(crate) struct MultiDistanceSelector {
    p: Point,
    channels: [PerpendicularBase; 3],
}

impl MultiDistanceSelector {
    const CHANNEL_BITS: [EdgeColor; 3] = [EdgeColor::RED, EdgeColor::GREEN, EdgeColor::BLUE];

    fn true_distance(&self) -> SignedDistance {
        let mut best = self.channels[0].min_true;
        for ch in &self.channels[1..] {
            if ch.min_true.closer_than(&best) {
                best = ch.min_true;
            }
        }
        best
    }

    fn multi(&self) -> MultiDistance {
        MultiDistance {
            r: self.channels[0].compute(self.p),
            g: self.channels[1].compute(self.p),
            b: self.channels[2].compute(self.p),
        }
    }
}

impl EdgeSelector for MultiDistanceSelector {
    type Distance = MultiDistance;

    fn new(p: Point) -> Self {
        Self {
            p,
            channels: [
                PerpendicularBase::new(),
                PerpendicularBase::new(),
                PerpendicularBase::new(),
            ],
        }
    }

    fn add_edge(&mut self, prev: &Edge, edge: &Edge, next: &Edge) {
        let color = edge.color();
        if color.is_empty() {
            return;
        }
        let measure = measure_edge(self.p, prev, edge, next);
        for (bit, channel) in Self::CHANNEL_BITS.iter().zip(&mut self.channels) {
            if color.contains(*bit) {
                channel.add_measure(edge.segment(), &measure);
            }
        }
    }

    fn merge(&mut self, other: &Self) {
        for (mine, theirs) in self.channels.iter_mut().zip(&other.channels) {
            mine.merge(theirs);
        }
    }

    fn distance(&self) -> MultiDistance {
        self.multi()
    }
}

/// [`MultiDistanceSelector`] plus the true distance for an alpha channel.
#[derive(Clone, Debug)]
pub(crate) struct MultiAndTrueDistanceSelector {
    inner: MultiDistanceSelector,
}

impl EdgeSelector for MultiAndTrueDistanceSelector {
    type Distance = MultiAndTrueDistance;

    fn new(p: Point) -> Self {
        Self {
            inner: MultiDistanceSelector::new(p),
        }
    }

    fn add_edge(&mut self, prev: &Edge, edge: &Edge, next: &Edge) {
        self.inner.add_edge(prev, edge, next);
    }

    fn merge(&mut self, other: &Self) {
        self.inner.merge(&other.inner);
    }

    fn distance(&self) -> MultiAndTrueDistance {
        let m = self.inner.multi();
        MultiAndTrueDistance {
            r: m.r,
            g: m.g,
            b: m.b,
            a: self.inner.true_distance().distance,
        }
    }
}

#[cfg(test)]
#[path = "../../tests/unit/distance/selectors.rs"]
mod tests;
