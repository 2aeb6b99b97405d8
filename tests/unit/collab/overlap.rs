use super::*;
use crate::foundation::core::Point;

/// Keeps only the first contour.
struct FirstOnly;

impl OverlapResolver for FirstOnly {
    fn resolve(&self, shape: &mut Shape) -> MsdfResult<()> {
        let mut kept = Shape::new();
        kept.set_y_axis(shape.y_axis());
        if let Some(first) = shape.contour(0) {
            kept.push_contour(first.clone());
        }
        *shape = kept;
        Ok(())
    }
}

fn two_triangles() -> Shape {
    let mut shape = Shape::new();
    for dx in [0.0, 0.5] {
        let c = shape.add_contour();
        let pts = [
            Point::new(dx, 0.0),
            Point::new(dx + 1.0, 0.0),
            Point::new(dx, 1.0),
        ];
        for i in 0..3 {
            shape.add_linear(c, pts[i], pts[(i + 1) % 3]).unwrap();
        }
    }
    shape
}

#[test]
fn missing_resolver_is_unavailable_and_harmless() {
    let mut shape = two_triangles();
    let before = shape.clone();
    assert!(!has_overlap_resolver(None));
    assert!(matches!(
        resolve_overlaps(&mut shape, None),
        Err(MsdfError::Unavailable(_))
    ));
    assert_eq!(shape, before);
}

#[test]
fn resolver_rewrites_the_shape() {
    let mut shape = two_triangles();
    let resolver = FirstOnly;
    assert!(has_overlap_resolver(Some(&resolver)));
    resolve_overlaps(&mut shape, Some(&resolver)).unwrap();
    assert_eq!(shape.contour_count(), 1);
}
