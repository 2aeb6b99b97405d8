use super::*;
use crate::foundation::core::Point;

fn cusp_contour() -> Contour {
    let mut c = Contour::new();
    c.add_segment(Segment::line(Point::new(0.0, 0.0), Point::new(2.0, 0.0)));
    c.add_segment(Segment::quadratic(
        Point::new(2.0, 0.0),
        Point::new(0.0, 0.0),
        Point::new(0.0, 2.0),
    ));
    c.add_segment(Segment::line(Point::new(0.0, 2.0), Point::new(0.0, 0.0)));
    c
}

fn join_dot(c: &Contour, i: usize) -> f64 {
    let n = c.len();
    let prev = normalize(c.edges()[(i + n - 1) % n].segment().direction(1.0), false);
    let cur = normalize(c.edges()[i].segment().direction(0.0), false);
    prev.dot(cur)
}

#[test]
fn single_edge_contour_becomes_three_edges() {
    let p = Point::new(0.0, 0.0);
    let mut c = Contour::new();
    c.add_edge(Edge::with_color(
        Segment::cubic(p, Point::new(3.0, 0.0), Point::new(3.0, 3.0), p),
        crate::coloring::color::EdgeColor::MAGENTA,
    ));
    normalize_contour(&mut c);
    assert_eq!(c.len(), 3);
    assert!(c.is_closed());
    assert!(c
        .edges()
        .iter()
        .all(|e| e.color() == crate::coloring::color::EdgeColor::MAGENTA));
}

#[test]
fn zero_length_edges_are_dropped() {
    let mut c = cusp_contour();
    let p = Point::new(0.0, 0.0);
    c.add_segment(Segment::line(p, p));
    normalize_contour(&mut c);
    assert_eq!(c.len(), 3);
    assert!(c.is_closed());
}

#[test]
fn cusp_tangents_are_pushed_apart() {
    let mut c = cusp_contour();
    assert!(join_dot(&c, 1) < CORNER_DOT_EPSILON - 1.0);
    normalize_contour(&mut c);
    assert!(join_dot(&c, 1) >= CORNER_DOT_EPSILON - 1.0);
    assert!(c.is_closed());
    assert_eq!(c.edges()[1].segment().start(), Point::new(2.0, 0.0));
    assert!(matches!(c.edges()[1].segment(), Segment::Cubic(_)));
}

#[test]
fn normalize_is_idempotent() {
    let mut once = cusp_contour();
    normalize_contour(&mut once);
    let mut twice = once.clone();
    normalize_contour(&mut twice);
    assert_eq!(once, twice);
}

#[test]
fn ordering_needs_a_shared_corner() {
    let a = Segment::line(Point::new(0.0, 0.0), Point::new(1.0, 0.0));
    let b = Segment::line(Point::new(5.0, 5.0), Point::new(0.0, 0.0));
    assert_eq!(convergent_curve_ordering(&a, &b), 0);
}

#[test]
fn ordering_tells_sides_apart() {
    let a = Segment::quadratic(Point::new(0.0, 0.0), Point::new(1.0, 0.0), Point::new(2.0, 0.0));
    let up = Segment::quadratic(Point::new(2.0, 0.0), Point::new(1.0, 0.0), Point::new(0.0, 1.0));
    let down = Segment::quadratic(Point::new(2.0, 0.0), Point::new(1.0, 0.0), Point::new(0.0, -1.0));
    let s_up = convergent_curve_ordering(&a, &up);
    let s_down = convergent_curve_ordering(&a, &down);
    assert_ne!(s_up, 0);
    assert_eq!(s_up, -s_down);
}
