use super::*;

fn square(ccw: bool) -> Contour {
    let mut pts = vec![
        Point::new(0.0, 0.0),
        Point::new(1.0, 0.0),
        Point::new(1.0, 1.0),
        Point::new(0.0, 1.0),
    ];
    if !ccw {
        pts.reverse();
    }
    let mut c = Contour::new();
    for i in 0..pts.len() {
        c.add_segment(Segment::line(pts[i], pts[(i + 1) % pts.len()]));
    }
    c
}

#[test]
fn winding_follows_orientation() {
    assert_eq!(square(true).winding(), 1);
    assert_eq!(square(false).winding(), -1);
    assert_eq!(Contour::new().winding(), 0);
}

#[test]
fn single_edge_loop_has_a_winding() {
    let p = Point::new(0.0, 0.0);
    let mut c = Contour::new();
    c.add_segment(Segment::cubic(p, Point::new(2.0, 0.0), Point::new(2.0, 2.0), p));
    assert_eq!(c.winding(), 1);
}

#[test]
fn reverse_flips_winding_and_keeps_closure() {
    let mut c = square(true);
    c.reverse();
    assert_eq!(c.winding(), -1);
    assert!(c.is_closed());
}

#[test]
fn open_contour_is_detected() {
    let mut c = square(true);
    c.edges_vec_mut().pop();
    assert!(!c.is_closed());
}

#[test]
fn bounds_cover_all_edges() {
    let b = square(true).bounds().unwrap();
    assert_eq!(b, Rect::new(0.0, 0.0, 1.0, 1.0));
    assert!(Contour::new().bounds().is_none());
}

#[test]
fn miters_extend_past_convex_corners() {
    let c = square(true);
    let mut rect = Rect::new(0.0, 0.0, 1.0, 1.0);
    c.bound_miters(&mut rect, 0.1, 4.0, 1);
    for (got, want) in [(rect.x0, -0.1), (rect.y0, -0.1), (rect.x1, 1.1), (rect.y1, 1.1)] {
        assert!((got - want).abs() < 1e-12, "{got} vs {want}");
    }

    let mut untouched = Rect::new(0.0, 0.0, 1.0, 1.0);
    c.bound_miters(&mut untouched, 0.1, 4.0, -1);
    assert_eq!(untouched, Rect::new(0.0, 0.0, 1.0, 1.0));
}
