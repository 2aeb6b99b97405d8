use super::*;

#[test]
fn magnitude_orders_before_dot() {
    let near = SignedDistance::new(-0.5, 0.9);
    let far = SignedDistance::new(0.75, 0.0);
    assert!(near.closer_than(&far));
    assert!(!far.closer_than(&near));
}

#[test]
fn equal_magnitude_prefers_orthogonal_edge() {
    let square = SignedDistance::new(1.0, 0.1);
    let glancing = SignedDistance::new(-1.0, 0.8);
    assert!(square.closer_than(&glancing));
    assert!(!square.closer_than(&square));
}

#[test]
fn far_sentinel_loses_to_everything() {
    assert!(SignedDistance::new(1e300, 1.0).closer_than(&SignedDistance::FAR));
    assert_eq!(SignedDistance::default(), SignedDistance::FAR);
}
