use super::*;
use crate::foundation::core::Point;

fn rect_shape(x0: f64, y0: f64, x1: f64, y1: f64) -> Shape {
    let mut shape = Shape::new();
    let c = shape.add_contour();
    let pts = [
        Point::new(x0, y0),
        Point::new(x1, y0),
        Point::new(x1, y1),
        Point::new(x0, y1),
    ];
    for i in 0..4 {
        shape.add_linear(c, pts[i], pts[(i + 1) % 4]).unwrap();
    }
    shape
}

fn close(a: f64, b: f64) -> bool {
    (a - b).abs() < 1e-9
}

#[test]
fn unit_square_fills_the_canvas() {
    let f = auto_frame(&rect_shape(0.0, 0.0, 1.0, 1.0), 100, 100, 0.0).unwrap();
    assert!(close(f.scale, 100.0));
    assert!(close(f.translate.x, 0.0) && close(f.translate.y, 0.0));
}

#[test]
fn wide_shapes_are_centred_vertically() {
    let f = auto_frame(&rect_shape(0.0, 0.0, 2.0, 1.0), 100, 100, 10.0).unwrap();
    assert!(close(f.scale, 45.0));
    let margin = 5.0 / 45.0;
    assert!(close(f.translate.x, margin));
    assert!(close(f.translate.y, 0.5 + margin));

    let t = f.transform(10.0).unwrap();
    let low = t.projection.project(Point::new(0.0, 0.0));
    let high = t.projection.project(Point::new(2.0, 1.0));
    assert!(close(low.x, 5.0) && close(high.x, 95.0));
    assert!(close(low.y, 27.5) && close(high.y, 72.5));
}

#[test]
fn tall_shapes_are_centred_horizontally() {
    let f = auto_frame(&rect_shape(3.0, 0.0, 4.0, 2.0), 100, 100, 0.0).unwrap();
    assert!(close(f.scale, 50.0));
    assert!(close(f.translate.x, 0.5 - 3.0));
    assert!(close(f.translate.y, 0.0));
}

#[test]
fn empty_shape_frames_the_unit_box() {
    let f = auto_frame(&Shape::new(), 64, 64, 0.0).unwrap();
    assert!(close(f.scale, 64.0));
}

#[test]
fn range_wider_than_canvas_is_rejected() {
    let shape = rect_shape(0.0, 0.0, 1.0, 1.0);
    assert!(matches!(
        auto_frame(&shape, 8, 8, 8.0),
        Err(MsdfError::InvalidArgument(_))
    ));
    assert!(auto_frame(&shape, 0, 8, 1.0).is_err());
    assert!(auto_frame(&shape, 8, 8, f64::NAN).is_err());
}
