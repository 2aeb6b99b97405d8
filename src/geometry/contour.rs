use crate::foundation::core::{Point, Rect, Vec2};
use crate::foundation::math::{normalize, sign};
use crate::geometry::scanline::Intersection;
use crate::geometry::segment::{Edge, Segment};

/// Closed loop of edges; each edge starts where the previous one ends.
#[derive(Clone, Debug, Default, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct Contour {
    edges: Vec<Edge>,
}

impl Contour {
    /// Empty contour.
    pub fn new() -> Self {
        Self::default()
    }

    /// Edges in traversal order.
    pub fn edges(&self) -> &[Edge] {
        &self.edges
    }

    /// Mutable edge access (colors only; geometry is not exposed mutably).
    pub fn edges_mut(&mut self) -> &mut [Edge] {
        &mut self.edges
    }

    pub(crate) fn edges_vec_mut(&mut self) -> &mut Vec<Edge> {
        &mut self.edges
    }

    /// Append an edge.
    pub fn add_edge(&mut self, edge: Edge) {
        self.edges.push(edge);
    }

    /// Append a white edge built from `segment`.
    pub fn add_segment(&mut self, segment: Segment) {
        self.edges.push(Edge::new(segment));
    }

    /// Number of edges.
    pub fn len(&self) -> usize {
        self.edges.len()
    }

    /// True when the contour has no edges.
    pub fn is_empty(&self) -> bool {
        self.edges.is_empty()
    }

    /// Orientation: +1 counter-clockwise (y-up), -1 clockwise, 0 degenerate.
    ///
    /// Computed from the polygon of edge start points; contours with one or
    /// two edges are sampled inside the curves so their area is not zero.
    pub fn winding(&self) -> i32 {
        fn area(a: Point, b: Point) -> f64 {
            a.to_vec2().cross(b.to_vec2())
        }
        let total = match self.edges.as_slice() {
            [] => return 0,
            [only] => {
                let s = only.segment();
                let (a, b, c) = (s.point(0.0), s.point(1.0 / 3.0), s.point(2.0 / 3.0));
                area(a, b) + area(b, c) + area(c, a)
            }
            [first, second] => {
                let (s0, s1) = (first.segment(), second.segment());
                let (a, b, c, d) = (s0.point(0.0), s0.point(0.5), s1.point(0.0), s1.point(0.5));
                area(a, b) + area(b, c) + area(c, d) + area(d, a)
            }
            edges => {
                let mut prev = edges[edges.len() - 1].segment().start();
                let mut total = 0.0;
                for edge in edges {
                    let cur = edge.segment().start();
                    total += area(prev, cur);
                    prev = cur;
                }
                total
            }
        };
        sign(total)
    }

    /// Reverse traversal direction, flipping the orientation.
    pub fn reverse(&mut self) {
        self.edges.reverse();
        for edge in &mut self.edges {
            let reversed = edge.segment().reversed();
            *edge.segment_mut() = reversed;
        }
    }

    /// Tight bounds of all edges, or `None` for an empty contour.
    pub fn bounds(&self) -> Option<Rect> {
        self.edges
            .iter()
            .map(|e| e.segment().bounds())
            .reduce(|a, b| a.union(b))
    }

    /// True when every edge starts exactly where its predecessor ends.
    pub fn is_closed(&self) -> bool {
        let Some(last) = self.edges.last() else {
            return true;
        };
        let mut prev_end = last.segment().end();
        for edge in &self.edges {
            if edge.segment().start() != prev_end {
                return false;
            }
            prev_end = edge.segment().end();
        }
        true
    }

    /// Grow `rect` by the miter points of the corners selected by `polarity`
    /// when the outline is stroked with half-width `border`.
    pub(crate) fn bound_miters(&self, rect: &mut Rect, border: f64, miter_limit: f64, polarity: i32) {
        let Some(last) = self.edges.last() else {
            return;
        };
        let mut prev_dir = normalize(last.segment().direction(1.0), true);
        for edge in &self.edges {
            let seg = edge.segment();
            let dir = -normalize(seg.direction(0.0), true);
            if f64::from(polarity) * prev_dir.cross(dir) <= 0.0 {
                let q = 0.5 * (1.0 - prev_dir.dot(dir));
                let miter_length = if q > 0.0 {
                    (1.0 / q.sqrt()).min(miter_limit)
                } else {
                    miter_limit
                };
                let miter: Vec2 = border * miter_length * normalize(prev_dir + dir, true);
                *rect = rect.union_pt(seg.start() + miter);
            }
            prev_dir = normalize(seg.direction(1.0), true);
        }
    }

    pub(crate) fn scanline_intersections(&self, y: f64, out: &mut Vec<Intersection>) {
        for edge in &self.edges {
            edge.segment().scanline_intersections(y, out);
        }
    }
}

#[cfg(test)]
#[path = "../../tests/unit/geometry/contour.rs"]
mod tests;
