use crate::foundation::core::{Point, Rect, YAxisOrientation};
use crate::foundation::error::{MsdfError, MsdfResult};
use crate::foundation::math::mix;
use crate::geometry::contour::Contour;
use crate::geometry::deconverge;
use crate::geometry::scanline::{Intersection, Scanline};
use crate::geometry::segment::{Edge, Segment};

/// Scanline height used to test contour orientation, as a fraction between
/// two distinct y values of the contour. Irrational, so it rarely hits a vertex.
const ORIENTATION_SCAN_RATIO: f64 = 0.618_033_988_749_894_9;

/// Vector outline: a set of closed contours plus the y-axis convention.
#[derive(Clone, Debug, Default, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct Shape {
    contours: Vec<Contour>,
    y_axis: YAxisOrientation,
}

impl Shape {
    /// Empty shape with an upward y axis.
    pub fn new() -> Self {
        Self::default()
    }

    /// Append an empty contour and return its index.
    pub fn add_contour(&mut self) -> usize {
        self.contours.push(Contour::new());
        self.contours.len() - 1
    }

    /// Append a finished contour; empty ones are ignored.
    pub(crate) fn push_contour(&mut self, contour: Contour) {
        if !contour.is_empty() {
            self.contours.push(contour);
        }
    }

    /// Append a white edge to contour `contour`.
    pub fn add_edge(&mut self, contour: usize, segment: Segment) -> MsdfResult<()> {
        self.add_colored_edge(contour, Edge::new(segment))
    }

    /// Append a pre-colored edge to contour `contour`.
    pub fn add_colored_edge(&mut self, contour: usize, edge: Edge) -> MsdfResult<()> {
        let count = self.contours.len();
        let target = self.contours.get_mut(contour).ok_or_else(|| {
            MsdfError::invalid_argument(format!(
                "contour index {contour} out of range (shape has {count})"
            ))
        })?;
        target.add_edge(edge);
        Ok(())
    }

    /// Append a straight edge.
    pub fn add_linear(&mut self, contour: usize, p0: Point, p1: Point) -> MsdfResult<()> {
        self.add_edge(contour, Segment::line(p0, p1))
    }

    /// Append a quadratic edge.
    pub fn add_quadratic(&mut self, contour: usize, p0: Point, p1: Point, p2: Point) -> MsdfResult<()> {
        self.add_edge(contour, Segment::quadratic(p0, p1, p2))
    }

    /// Append a cubic edge.
    pub fn add_cubic(
        &mut self,
        contour: usize,
        p0: Point,
        p1: Point,
        p2: Point,
        p3: Point,
    ) -> MsdfResult<()> {
        self.add_edge(contour, Segment::cubic(p0, p1, p2, p3))
    }

    /// All contours.
    pub fn contours(&self) -> &[Contour] {
        &self.contours
    }

    pub(crate) fn contours_mut(&mut self) -> &mut [Contour] {
        &mut self.contours
    }

    /// Contour by index.
    pub fn contour(&self, index: usize) -> Option<&Contour> {
        self.contours.get(index)
    }

    /// Mutable contour by index; `None` when out of range.
    pub fn contour_mut(&mut self, index: usize) -> Option<&mut Contour> {
        self.contours.get_mut(index)
    }

    /// Number of contours.
    pub fn contour_count(&self) -> usize {
        self.contours.len()
    }

    /// Total number of edges across contours.
    pub fn edge_count(&self) -> usize {
        self.contours.iter().map(Contour::len).sum()
    }

    /// Iterate every edge of every contour.
    pub fn edges(&self) -> impl Iterator<Item = &Edge> + '_ {
        self.contours.iter().flat_map(|c| c.edges().iter())
    }

    /// Y-axis convention.
    pub fn y_axis(&self) -> YAxisOrientation {
        self.y_axis
    }

    /// Set the y-axis convention.
    pub fn set_y_axis(&mut self, y_axis: YAxisOrientation) {
        self.y_axis = y_axis;
    }

    /// Put the shape into the form the coloring and sampling stages expect.
    ///
    /// Zero-length edges are dropped, single-edge contours are split into
    /// three pieces, and edges meeting at a near-180° cusp are nudged apart so
    /// their tangents no longer coincide. Running it twice changes nothing.
    pub fn normalize(&mut self) {
        for contour in &mut self.contours {
            deconverge::normalize_contour(contour);
        }
    }

    /// Read-only consistency check: every contour closed, no zero-length
    /// edge, all coordinates finite.
    pub fn validate(&self) -> bool {
        self.check().is_ok()
    }

    /// Like [`Shape::validate`] but reports the first problem found.
    pub fn check(&self) -> MsdfResult<()> {
        for (ci, contour) in self.contours.iter().enumerate() {
            for (ei, edge) in contour.edges().iter().enumerate() {
                if !edge.segment().is_finite() {
                    return Err(MsdfError::geometry(format!(
                        "contour {ci} edge {ei} has a non-finite coordinate"
                    )));
                }
                if edge.segment().is_degenerate() {
                    return Err(MsdfError::geometry(format!(
                        "contour {ci} edge {ei} has zero length"
                    )));
                }
            }
            if !contour.is_closed() {
                return Err(MsdfError::geometry(format!("contour {ci} is not closed")));
            }
        }
        Ok(())
    }

    /// Tight bounds, or `None` for a shape without edges.
    pub fn bounds(&self) -> Option<Rect> {
        self.get_bounds(0.0, 0.0, 0)
    }

    /// Bounds of the outline stroked with half-width `border`.
    ///
    /// With a positive `miter_limit`, miter joins are included, each capped at
    /// `miter_limit * border`. A `polarity` of 0 takes every corner; +1 keeps
    /// only the convex corners of counter-clockwise contours and -1 only the
    /// concave ones.
    pub fn get_bounds(&self, border: f64, miter_limit: f64, polarity: i32) -> Option<Rect> {
        let mut rect = self
            .contours
            .iter()
            .filter_map(Contour::bounds)
            .reduce(|a, b| a.union(b))?;
        if border > 0.0 {
            rect = rect.inflate(border, border);
            if miter_limit > 0.0 {
                for contour in &self.contours {
                    contour.bound_miters(&mut rect, border, miter_limit, polarity);
                }
            }
        }
        Some(rect)
    }

    /// Reverse contours as needed so outer contours run counter-clockwise and
    /// holes clockwise under the non-zero rule.
    ///
    /// Each contour is crossed by a horizontal scanline through it; crossings
    /// at even positions along the line are entries into the fill, and the
    /// contour is reversed when most of its crossings disagree.
    pub fn orient_contours(&mut self) {
        let mut orientations = vec![0i32; self.contours.len()];
        let mut hits: Vec<(Intersection, usize)> = Vec::new();
        let mut scratch = Vec::new();
        for i in 0..self.contours.len() {
            if orientations[i] != 0 {
                continue;
            }
            let Some(y) = scan_height(&self.contours[i]) else {
                continue;
            };
            hits.clear();
            for (ci, contour) in self.contours.iter().enumerate() {
                scratch.clear();
                contour.scanline_intersections(y, &mut scratch);
                hits.extend(scratch.iter().map(|&hit| (hit, ci)));
            }
            hits.sort_by(|a, b| a.0.x.total_cmp(&b.0.x));
            for j in 1..hits.len() {
                if hits[j].0.x == hits[j - 1].0.x {
                    hits[j].0.direction = 0;
                    hits[j - 1].0.direction = 0;
                }
            }
            for (j, (hit, ci)) in hits.iter().enumerate() {
                if hit.direction != 0 {
                    let entering_downward = (j % 2 == 0) == (hit.direction < 0);
                    orientations[*ci] += if entering_downward { 1 } else { -1 };
                }
            }
        }
        let mut flipped = 0usize;
        for (contour, orientation) in self.contours.iter_mut().zip(&orientations) {
            if *orientation < 0 {
                contour.reverse();
                flipped += 1;
            }
        }
        tracing::debug!(contours = self.contours.len(), flipped, "oriented contours");
    }

    /// Crossings of the horizontal line at `y` with every contour.
    pub fn scanline(&self, y: f64) -> Scanline {
        let mut out = Vec::new();
        for contour in &self.contours {
            contour.scanline_intersections(y, &mut out);
        }
        Scanline::new(out)
    }

    pub(crate) fn has_black_edges(&self) -> bool {
        self.edges().any(|e| e.color().is_empty())
    }
}

/// A y value strictly between two distinct heights reached by the contour.
fn scan_height(contour: &Contour) -> Option<f64> {
    let edges = contour.edges();
    let first = edges.first()?;
    let y0 = first.segment().start().y;
    let mut y1 = y0;
    for edge in edges {
        if y1 != y0 {
            break;
        }
        y1 = edge.segment().end().y;
    }
    for edge in edges {
        if y1 != y0 {
            break;
        }
        y1 = edge.segment().point(ORIENTATION_SCAN_RATIO).y;
    }
    Some(mix(y0, y1, ORIENTATION_SCAN_RATIO))
}

#[cfg(test)]
#[path = "../../tests/unit/geometry/shape.rs"]
mod tests;
