use crate::distance::selectors::{DistanceValue, EdgeSelector};
use crate::foundation::core::Point;
use crate::geometry::contour::Contour;
use crate::geometry::shape::Shape;

/// How per-contour results are folded into one pixel value.
#[derive(Clone, Debug)]
enum Combiner {
    /// Nearest edge over the whole shape wins.
    Simple,
    /// Contours are kept apart and reconciled by winding, so overlapping
    /// contours do not cut into each other.
    Overlapping { windings: Vec<i32> },
}

/// Distance query against a fixed shape, reusable across many points.
#[derive(Clone, Debug)]
pub(crate) struct ShapeDistanceFinder<'a, S: EdgeSelector> {
    shape: &'a Shape,
    combiner: Combiner,
    scratch: Vec<S>,
}

impl<'a, S: EdgeSelector> ShapeDistanceFinder<'a, S> {
    pub(crate) fn new(shape: &'a Shape, overlap_support: bool) -> Self {
        let combiner = if overlap_support {
            Combiner::Overlapping {
                windings: shape.contours().iter().map(Contour::winding).collect(),
            }
        } else {
            Combiner::Simple
        };
        Self {
            shape,
            combiner,
            scratch: Vec::with_capacity(shape.contour_count()),
        }
    }

    pub(crate) fn distance(&mut self, origin: Point) -> S::Distance {
        match &self.combiner {
            Combiner::Simple => {
                let mut selector = S::new(origin);
                for contour in self.shape.contours() {
                    feed(&mut selector, contour);
                }
                selector.distance()
            }
            Combiner::Overlapping { windings } => {
                self.scratch.clear();
                for contour in self.shape.contours() {
                    let mut selector = S::new(origin);
                    feed(&mut selector, contour);
                    self.scratch.push(selector);
                }
                combine_overlapping(origin, &self.scratch, windings)
            }
        }
    }
}

/// Hand every edge of `contour` to the selector together with its neighbours.
fn feed<S: EdgeSelector>(selector: &mut S, contour: &Contour) {
    let edges = contour.edges();
    let n = edges.len();
    if n == 0 {
        return;
    }
    let mut prev = &edges[if n >= 2 { n - 2 } else { 0 }];
    let mut cur = &edges[n - 1];
    for next in edges {
        selector.add_edge(prev, cur, next);
        prev = cur;
        cur = next;
    }
}

/// Reconcile per-contour distances for possibly overlapping contours.
///
/// Counter-clockwise contours (winding > 0) that contain the point form the
/// inner candidate set; clockwise contours the point is outside of form the
/// outer set. Whichever boundary is nearer decides the sign, and contours of
/// the other orientation may only tighten the magnitude.
fn combine_overlapping<S: EdgeSelector>(origin: Point, selectors: &[S], windings: &[i32]) -> S::Distance {
    let mut shape_sel = S::new(origin);
    let mut inner_sel = S::new(origin);
    let mut outer_sel = S::new(origin);
    let distances: Vec<S::Distance> = selectors.iter().map(S::distance).collect();

    for ((sel, d), &winding) in selectors.iter().zip(&distances).zip(windings) {
        shape_sel.merge(sel);
        if winding > 0 && d.resolve() <= 0.0 {
            inner_sel.merge(sel);
        }
        if winding < 0 && d.resolve() >= 0.0 {
            outer_sel.merge(sel);
        }
    }

    let shape_distance = shape_sel.distance();
    let inner_distance = inner_sel.distance();
    let outer_distance = outer_sel.distance();
    let inner = inner_distance.resolve();
    let outer = outer_distance.resolve();

    let (mut distance, winding) = if inner <= 0.0 && inner.abs() <= outer.abs() {
        let mut best = inner_distance;
        for (d, &w) in distances.iter().zip(windings) {
            if w > 0 && d.resolve().abs() < outer.abs() && d.resolve() < best.resolve() {
                best = *d;
            }
        }
        (best, 1)
    } else if outer >= 0.0 && outer.abs() < inner.abs() {
        let mut best = outer_distance;
        for (d, &w) in distances.iter().zip(windings) {
            if w < 0 && d.resolve().abs() < inner.abs() && d.resolve() > best.resolve() {
                best = *d;
            }
        }
        (best, -1)
    } else {
        return shape_distance;
    };

    for (d, &w) in distances.iter().zip(windings) {
        if w != winding
            && d.resolve() * distance.resolve() >= 0.0
            && d.resolve().abs() < distance.resolve().abs()
        {
            distance = *d;
        }
    }
    if distance.resolve() == shape_distance.resolve() {
        distance = shape_distance;
    }
    distance
}

/// Convenience single-point query.
#[cfg(test)]
pub(crate) fn one_shot_distance<S: EdgeSelector>(
    shape: &Shape,
    origin: Point,
    overlap_support: bool,
) -> S::Distance {
    ShapeDistanceFinder::<S>::new(shape, overlap_support).distance(origin)
}

#[cfg(test)]
#[path = "../../tests/unit/distance/finder.rs"]
mod tests;
