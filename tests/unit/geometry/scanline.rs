use super::*;

fn line_of(xs: &[(f64, i32)]) -> Scanline {
    Scanline::new(
        xs.iter()
            .map(|&(x, direction)| Intersection { x, direction })
            .collect(),
    )
}

#[test]
fn intersections_are_sorted() {
    let s = line_of(&[(3.0, 1), (-1.0, -1)]);
    assert_eq!(s.intersections()[0].x, -1.0);
}

#[test]
fn winding_sums_crossings_to_the_right() {
    // Counter-clockwise box spanning x in [0, 2]: left side goes down, right side up.
    let s = line_of(&[(0.0, -1), (2.0, 1)]);
    assert_eq!(s.winding_at(-1.0), 0);
    assert_eq!(s.winding_at(1.0), 1);
    assert_eq!(s.winding_at(3.0), 0);
}

#[test]
fn fill_rules_disagree_on_double_winding() {
    let s = line_of(&[(0.0, -1), (1.0, -1), (2.0, 1), (3.0, 1)]);
    assert_eq!(s.winding_at(1.5), 2);
    assert!(s.is_filled(1.5, FillRule::NonZero));
    assert!(!s.is_filled(1.5, FillRule::EvenOdd));
    assert!(s.is_filled(1.5, FillRule::Positive));
    assert!(!s.is_filled(1.5, FillRule::Negative));
}
