use super::*;

#[test]
fn projection_roundtrips_points() {
    let p = Projection::new(Vec2::new(28.0, 14.0), Vec2::new(0.5, -2.0)).unwrap();
    let q = Point::new(0.25, 3.0);
    let back = p.unproject(p.project(q));
    assert!((back - q).length() < 1e-12);
}

#[test]
fn projection_rejects_non_positive_scale() {
    assert!(Projection::new(Vec2::new(0.0, 1.0), Vec2::ZERO).is_err());
    assert!(Projection::new(Vec2::new(1.0, -1.0), Vec2::ZERO).is_err());
    assert!(Projection::new(Vec2::new(f64::NAN, 1.0), Vec2::ZERO).is_err());
}

#[test]
fn range_encodes_edge_at_half_and_inside_above() {
    let r = DistanceRange::new(2.0).unwrap();
    assert_eq!(r.encode(0.0), 0.5);
    assert!(r.encode(-0.5) > 0.5);
    assert!(r.encode(0.5) < 0.5);
    assert_eq!(r.decode(r.encode(0.75)), 0.75);
}

#[test]
fn pixel_range_uses_smaller_scale_axis() {
    let t = SdfTransform::from_pixel_range(Vec2::new(10.0, 40.0), Vec2::ZERO, 4.0).unwrap();
    assert!((t.range.width() - 0.4).abs() < 1e-12);
    assert!(SdfTransform::from_pixel_range(Vec2::new(10.0, 10.0), Vec2::ZERO, 0.0).is_err());
}

#[test]
fn documents_cannot_bypass_validation() {
    let p: Projection =
        serde_json::from_str(r#"{"scale":{"x":2.0,"y":3.0},"translate":{"x":0.5,"y":0.0}}"#)
            .unwrap();
    assert_eq!(p.scale(), Vec2::new(2.0, 3.0));
    assert_eq!(p.translate(), Vec2::new(0.5, 0.0));
    assert!(
        serde_json::from_str::<Projection>(r#"{"scale":{"x":0.0,"y":1.0},"translate":{"x":0.0,"y":0.0}}"#)
            .is_err()
    );

    let r: DistanceRange = serde_json::from_str(r#"{"width":0.25}"#).unwrap();
    assert_eq!(r.width(), 0.25);
    assert!(serde_json::from_str::<DistanceRange>(r#"{"width":0.0}"#).is_err());
    assert!(serde_json::from_str::<SdfTransform>(r#"{"projection":{"scale":{"x":1.0,"y":1.0},"translate":{"x":0.0,"y":0.0}},"range":{"width":-1.0}}"#).is_err());
}
