use super::*;
use crate::foundation::core::Point;
use crate::geometry::segment::Segment;

fn polygon(points: &[(f64, f64)]) -> Contour {
    let mut c = Contour::new();
    for i in 0..points.len() {
        let (x0, y0) = points[i];
        let (x1, y1) = points[(i + 1) % points.len()];
        c.add_segment(Segment::line(Point::new(x0, y0), Point::new(x1, y1)));
    }
    c
}

#[test]
fn square_has_four_corners() {
    let c = polygon(&[(0.0, 0.0), (1.0, 0.0), (1.0, 1.0), (0.0, 1.0)]);
    assert_eq!(find_corners(&c, 3.0f64.sin()), vec![0, 1, 2, 3]);
}

#[test]
fn shallow_bend_is_not_a_corner() {
    // Second join turns by about 0.1 rad, well under pi - 3.0.
    let c = polygon(&[(0.0, 0.0), (1.0, 0.0), (2.0, 0.1), (1.0, 2.0)]);
    let corners = find_corners(&c, 3.0f64.sin());
    assert!(!corners.contains(&1));
}

#[test]
fn trichotomy_splits_into_thirds() {
    let parts: Vec<i32> = (0..6).map(|i| symmetrical_trichotomy(i, 6)).collect();
    assert_eq!(parts.first(), Some(&-1));
    assert_eq!(parts.last(), Some(&1));
    assert!(parts.contains(&0));
    assert!(parts.windows(2).all(|w| w[0] <= w[1]));
}

#[test]
fn two_edge_teardrop_gets_two_colors() {
    let mut c = Contour::new();
    let a = Point::new(0.0, 0.0);
    let b = Point::new(2.0, 0.0);
    c.add_segment(Segment::quadratic(a, Point::new(1.0, -1.0), b));
    c.add_segment(Segment::quadratic(b, Point::new(1.0, 2.0), a));
    let mut cycle = ColorCycle::new(3);
    let mut color = cycle.initial();
    color_teardrop(&mut c, 0, &mut cycle, &mut color);
    let (c0, c1) = (c.edges()[0].color(), c.edges()[1].color());
    assert_ne!(c0, c1);
    assert_eq!(c0.bits().count_ones(), 2);
    assert_eq!(c1.bits().count_ones(), 2);
}

#[test]
fn empty_shape_is_a_no_op() {
    let mut shape = Shape::new();
    assert!(color_edges(&mut shape, &ColoringConfig::default()).is_ok());
    assert_eq!(shape, Shape::new());
}

#[test]
fn non_finite_threshold_is_rejected() {
    let mut shape = Shape::new();
    let cfg = ColoringConfig {
        angle_threshold: f64::NAN,
        ..ColoringConfig::default()
    };
    assert!(matches!(
        color_edges(&mut shape, &cfg),
        Err(MsdfError::InvalidArgument(_))
    ));
}

#[test]
fn config_deserializes_with_defaults() {
    let cfg: ColoringConfig = serde_json::from_str(r#"{"strategy":"InkTrap"}"#).unwrap();
    assert_eq!(cfg.strategy, ColoringStrategy::InkTrap);
    assert_eq!(cfg.angle_threshold, 3.0);
    assert_eq!(cfg.seed, 0);
}
