use super::*;
use crate::coloring::simple::edge_coloring_simple;
use crate::foundation::core::{Point, YAxisOrientation};
use crate::generate::config::{ErrorCorrectionConfig, Threading};
use crate::generate::raster::generate_msdf;

const KAPPA: f64 = 0.552_284_749_830_793_4;

fn circle(center: Point, r: f64) -> Shape {
    let mut shape = Shape::new();
    let c = shape.add_contour();
    let k = KAPPA * r;
    let quadrants = [
        (Vec2::new(r, 0.0), Vec2::new(0.0, r)),
        (Vec2::new(0.0, r), Vec2::new(-r, 0.0)),
        (Vec2::new(-r, 0.0), Vec2::new(0.0, -r)),
        (Vec2::new(0.0, -r), Vec2::new(r, 0.0)),
    ];
    for (from, to) in quadrants {
        let p0 = center + from;
        let p3 = center + to;
        let p1 = p0 + to.normalize() * k;
        let p2 = p3 + from.normalize() * k;
        shape.add_cubic(c, p0, p1, p2, p3).unwrap();
    }
    shape
}

fn square() -> Shape {
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

fn config(mode: ErrorCorrectionMode, distance_check: DistanceCheckMode) -> MsdfGeneratorConfig {
    MsdfGeneratorConfig {
        error_correction: ErrorCorrectionConfig {
            mode,
            distance_check,
            ..ErrorCorrectionConfig::default()
        },
        ..MsdfGeneratorConfig::default()
    }
}

fn circle_transform() -> SdfTransform {
    SdfTransform::from_pixel_range(Vec2::new(4.0, 4.0), Vec2::new(8.0, 8.0), 4.0).unwrap()
}

#[test]
fn disabled_mode_leaves_pixels_identical() {
    let mut shape = square();
    edge_coloring_simple(&mut shape, 3.0, 0).unwrap();
    let t = SdfTransform::from_pixel_range(Vec2::new(20.0, 20.0), Vec2::new(0.2, 0.2), 4.0).unwrap();
    let disabled = config(ErrorCorrectionMode::Disabled, DistanceCheckMode::AtEdge);
    let raw = generate_msdf(&shape, 28, 28, &t, &disabled).unwrap();
    let mut again = raw.clone();
    correct_errors(&mut again, &shape, &t, &disabled).unwrap();
    assert_eq!(raw, again);
}

#[test]
fn smooth_circle_is_barely_touched() {
    let mut shape = circle(Point::new(0.0, 0.0), 6.0);
    edge_coloring_simple(&mut shape, 3.0, 0).unwrap();
    let t = circle_transform();
    let raw = generate_msdf(
        &shape,
        64,
        64,
        &t,
        &config(ErrorCorrectionMode::Disabled, DistanceCheckMode::AtEdge),
    )
    .unwrap();
    for check in [
        DistanceCheckMode::Never,
        DistanceCheckMode::AtEdge,
        DistanceCheckMode::Always,
    ] {
        let mut fixed = raw.clone();
        correct_errors(
            &mut fixed,
            &shape,
            &t,
            &config(ErrorCorrectionMode::EdgePriority, check),
        )
        .unwrap();
        let changed = raw
            .pixels()
            .chunks_exact(3)
            .zip(fixed.pixels().chunks_exact(3))
            .filter(|(a, b)| a != b)
            .count();
        assert!(changed * 100 <= 64 * 64, "{check:?}: {changed} texels changed");
    }
}

#[test]
fn indiscriminate_mode_flattens_a_channel_swap() {
    let mut bmp = Bitmap::new(2, 1, 4, YAxisOrientation::Upward).unwrap();
    bmp.pixel_mut(0, 0).unwrap().copy_from_slice(&[0.9, 0.1, 0.9, 0.7]);
    bmp.pixel_mut(1, 0).unwrap().copy_from_slice(&[0.1, 0.9, 0.9, 0.7]);
    let t = SdfTransform::from_pixel_range(Vec2::new(1.0, 1.0), Vec2::ZERO, 10.0).unwrap();
    let cfg = config(ErrorCorrectionMode::Indiscriminate, DistanceCheckMode::Never);
    correct_errors(&mut bmp, &Shape::new(), &t, &cfg).unwrap();
    assert_eq!(bmp.pixel(0, 0).unwrap(), &[0.9, 0.9, 0.9, 0.7]);
    assert_eq!(bmp.pixel(1, 0).unwrap(), &[0.9, 0.9, 0.9, 0.7]);
}

#[test]
fn edge_only_mode_keeps_non_inverting_texels() {
    // Channels cross without the median changing side: only an inversion
    // would be repaired once everything is protected.
    let mut bmp = Bitmap::new(2, 1, 3, YAxisOrientation::Upward).unwrap();
    bmp.pixel_mut(0, 0).unwrap().copy_from_slice(&[0.9, 0.6, 0.95]);
    bmp.pixel_mut(1, 0).unwrap().copy_from_slice(&[0.6, 0.9, 0.95]);
    let before = bmp.clone();
    let t = SdfTransform::from_pixel_range(Vec2::new(1.0, 1.0), Vec2::ZERO, 10.0).unwrap();
    let cfg = config(ErrorCorrectionMode::EdgeOnly, DistanceCheckMode::Never);
    correct_errors(&mut bmp, &Shape::new(), &t, &cfg).unwrap();
    assert_eq!(bmp, before);
}

#[test]
fn single_channel_bitmaps_are_rejected() {
    let mut bmp = Bitmap::new(2, 2, 1, YAxisOrientation::Upward).unwrap();
    let t = circle_transform();
    assert!(matches!(
        correct_errors(&mut bmp, &Shape::new(), &t, &MsdfGeneratorConfig::default()),
        Err(MsdfError::InvalidArgument(_))
    ));
}

#[test]
fn parallel_detection_matches_sequential() {
    let mut shape = square();
    edge_coloring_simple(&mut shape, 3.0, 3).unwrap();
    let t = SdfTransform::from_pixel_range(Vec2::new(20.0, 20.0), Vec2::new(0.2, 0.2), 4.0).unwrap();
    let seq = config(ErrorCorrectionMode::EdgePriority, DistanceCheckMode::Always);
    let mut par = seq;
    par.generator.threading = Threading::parallel();
    let a = generate_msdf(&shape, 28, 28, &t, &seq).unwrap();
    let b = generate_msdf(&shape, 28, 28, &t, &par).unwrap();
    assert_eq!(a, b);
}
