use super::*;
use crate::coloring::simple::edge_coloring_simple;
use crate::foundation::core::{Point, YAxisOrientation};

fn unit_square() -> Shape {
    let mut shape = Shape::new();
    let c = shape.add_contour();
    let pts = [
        Point::new(0.0, 0.0),
        Point::new(1.0, 0.0),
        Point::new(1.0, 1.0),
        Point::new(0.0, 1.0),
    ];
    for i in 0..4 {
        shape.add_linear(c, pts[i], pts[(i + 1) % 4]).unwrap();
    }
    shape
}

fn transform() -> SdfTransform {
    SdfTransform::from_pixel_range(
        Vec2::new(28.0, 28.0),
        Vec2::new(0.5 / 28.0, 0.5 / 28.0),
        4.0,
    )
    .unwrap()
}

#[test]
fn color_change_corners_protect_four_texels() {
    let mut shape = unit_square();
    edge_coloring_simple(&mut shape, 3.0, 0).unwrap();
    let bmp = Bitmap::new(32, 32, 3, YAxisOrientation::Upward).unwrap();
    let mut stencil = Stencil::new(32, 32).unwrap();
    stencil.protect_corners(&shape, &transform(), &bmp);
    for (x, y) in [(0, 0), (1, 0), (0, 1), (1, 1), (28, 28), (29, 29)] {
        assert!(stencil.get(x, y).contains(TexelFlags::PROTECTED), "({x},{y})");
    }
    assert!(stencil.get(14, 14).is_empty());
    assert!(stencil.get(2, 2).is_empty());
}

#[test]
fn corners_follow_the_storage_rows() {
    let mut shape = unit_square();
    edge_coloring_simple(&mut shape, 3.0, 0).unwrap();
    let bmp = Bitmap::new(32, 32, 3, YAxisOrientation::Downward).unwrap();
    let mut stencil = Stencil::new(32, 32).unwrap();
    stencil.protect_corners(&shape, &transform(), &bmp);
    assert!(stencil.get(0, 31).contains(TexelFlags::PROTECTED));
    assert!(stencil.get(0, 30).contains(TexelFlags::PROTECTED));
    assert!(stencil.get(0, 0).is_empty());
}

#[test]
fn uncolored_corners_are_not_protected() {
    let shape = unit_square();
    let bmp = Bitmap::new(32, 32, 3, YAxisOrientation::Upward).unwrap();
    let mut stencil = Stencil::new(32, 32).unwrap();
    stencil.protect_corners(&shape, &transform(), &bmp);
    assert!(stencil.flags.iter().all(|f| f.is_empty()));
}

#[test]
fn edge_pairs_protect_texels_holding_an_extreme_channel() {
    let unit = SdfTransform::from_pixel_range(Vec2::new(1.0, 1.0), Vec2::ZERO, 1.0).unwrap();
    let mut bmp = Bitmap::new(2, 1, 3, YAxisOrientation::Upward).unwrap();
    // The outline crosses in red, which is the median at the left texel but
    // an extreme at the right one.
    bmp.pixel_mut(0, 0).unwrap().copy_from_slice(&[0.6, 0.52, 0.95]);
    bmp.pixel_mut(1, 0).unwrap().copy_from_slice(&[0.4, 0.3, 0.2]);
    let mut stencil = Stencil::new(2, 1).unwrap();
    stencil.protect_edges(&bmp, &unit);
    assert!(stencil.get(0, 0).is_empty());
    assert!(stencil.get(1, 0).contains(TexelFlags::PROTECTED));

    // Equal channels carry nothing a repair could destroy.
    let mut flat = Bitmap::new(2, 1, 3, YAxisOrientation::Upward).unwrap();
    flat.pixel_mut(0, 0).unwrap().fill(0.55);
    flat.pixel_mut(1, 0).unwrap().fill(0.45);
    let mut stencil = Stencil::new(2, 1).unwrap();
    stencil.protect_edges(&flat, &unit);
    assert!(stencil.get(0, 0).is_empty());
}

#[test]
fn apply_flattens_only_error_texels() {
    let mut bmp = Bitmap::new(2, 1, 4, YAxisOrientation::Upward).unwrap();
    bmp.pixel_mut(0, 0).unwrap().copy_from_slice(&[0.9, 0.1, 0.6, 0.3]);
    bmp.pixel_mut(1, 0).unwrap().copy_from_slice(&[0.9, 0.1, 0.6, 0.3]);
    let mut stencil = Stencil::new(2, 1).unwrap();
    stencil.flags_mut()[0] |= TexelFlags::ERROR;
    stencil.protect_all();
    assert_eq!(stencil.apply(&mut bmp), 1);
    assert_eq!(bmp.pixel(0, 0).unwrap(), &[0.6, 0.6, 0.6, 0.3]);
    assert_eq!(bmp.pixel(1, 0).unwrap(), &[0.9, 0.1, 0.6, 0.3]);
}
