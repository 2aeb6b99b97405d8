use kurbo::{BezPath, PathEl};

use crate::foundation::core::{Point, YAxisOrientation};
use crate::foundation::error::{MsdfError, MsdfResult};
use crate::geometry::contour::Contour;
use crate::geometry::segment::Segment;
use crate::geometry::shape::Shape;

/// Accumulates one subpath into a contour.
struct ContourBuilder {
    contour: Contour,
    start: Point,
    current: Point,
}

impl ContourBuilder {
    fn new(start: Point) -> Self {
        Self {
            contour: Contour::new(),
            start,
            current: start,
        }
    }

    fn push(&mut self, segment: Segment) {
        self.current = segment.end();
        if !segment.is_degenerate() {
            self.contour.add_segment(segment);
        }
    }

    /// Close back to the subpath start. Gaps within `snap` move the last
    /// endpoint instead of adding a line.
    fn finish(mut self, snap: f64) -> Contour {
        if self.current != self.start {
            let gap = (self.current - self.start).hypot();
            let start = self.start;
            let snapped = gap <= snap
                && match self.contour.edges_vec_mut().last_mut() {
                    Some(last) => {
                        last.segment_mut().move_end(start);
                        true
                    }
                    None => false,
                };
            if !snapped {
                self.contour.add_segment(Segment::line(self.current, start));
            }
        }
        self.contour
    }
}

impl Shape {
    /// Build a shape from a kurbo path, one contour per subpath.
    ///
    /// Open subpaths are closed; when the gap is at most `endpoint_snap` the
    /// last edge is stretched to the start point, otherwise a closing line is
    /// added. Zero-length segments are skipped.
    pub fn from_bez_path(path: &BezPath, endpoint_snap: f64) -> MsdfResult<Shape> {
        if !endpoint_snap.is_finite() || endpoint_snap < 0.0 {
            return Err(MsdfError::invalid_argument(
                "endpoint snap distance must be finite and >= 0",
            ));
        }
        let mut shape = Shape::new();
        let mut builder: Option<ContourBuilder> = None;
        for el in path.elements() {
            match *el {
                PathEl::MoveTo(p) => {
                    if let Some(done) = builder.replace(ContourBuilder::new(p)) {
                        shape.push_contour(done.finish(endpoint_snap));
                    }
                }
                PathEl::LineTo(p) => {
                    let b = builder.get_or_insert_with(|| ContourBuilder::new(Point::ZERO));
                    b.push(Segment::line(b.current, p));
                }
                PathEl::QuadTo(p1, p2) => {
                    let b = builder.get_or_insert_with(|| ContourBuilder::new(Point::ZERO));
                    b.push(Segment::quadratic(b.current, p1, p2));
                }
                PathEl::CurveTo(p1, p2, p3) => {
                    let b = builder.get_or_insert_with(|| ContourBuilder::new(Point::ZERO));
                    b.push(Segment::cubic(b.current, p1, p2, p3));
                }
                PathEl::ClosePath => {
                    if let Some(done) = builder.take() {
                        let start = done.start;
                        shape.push_contour(done.finish(endpoint_snap));
                        // Drawing may continue from the start point.
                        builder = Some(ContourBuilder::new(start));
                    }
                }
            }
        }
        if let Some(done) = builder {
            shape.push_contour(done.finish(endpoint_snap));
        }
        if !shape.edges().all(|e| e.segment().is_finite()) {
            return Err(MsdfError::geometry("path has a non-finite coordinate"));
        }
        Ok(shape)
    }

    /// The outline as a kurbo path with one closed subpath per contour.
    pub fn to_bez_path(&self) -> BezPath {
        let mut path = BezPath::new();
        for contour in self.contours() {
            let Some(first) = contour.edges().first() else {
                continue;
            };
            path.move_to(first.segment().start());
            for edge in contour.edges() {
                match edge.segment() {
                    Segment::Linear(l) => path.line_to(l.p1),
                    Segment::Quadratic(q) => path.quad_to(q.p1, q.p2),
                    Segment::Cubic(c) => path.curve_to(c.p1, c.p2, c.p3),
                }
            }
            path.close_path();
        }
        path
    }
}

/// Parse SVG path data (the `d` attribute) into a y-down shape.
pub fn parse_svg_path(text: &str, endpoint_snap: f64) -> MsdfResult<Shape> {
    let path = BezPath::from_svg(text)
        .map_err(|e| MsdfError::invalid_argument(format!("bad SVG path data: {e}")))?;
    let mut shape = Shape::from_bez_path(&path, endpoint_snap)?;
    shape.set_y_axis(YAxisOrientation::Downward);
    Ok(shape)
}

#[cfg(test)]
#[path = "../../tests/unit/collab/path.rs"]
mod tests;
