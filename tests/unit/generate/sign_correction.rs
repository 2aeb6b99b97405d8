use super::*;
use crate::coloring::simple::edge_coloring_simple;
use crate::foundation::core::{Point, SdfTransform, Vec2};
use crate::generate::config::{GeneratorConfig, MsdfGeneratorConfig};
use crate::generate::raster::{generate_mtsdf, generate_sdf};

fn unit_square(ccw: bool) -> Shape {
    let mut shape = Shape::new();
    let c = shape.add_contour();
    let mut pts = vec![
        Point::new(0.0, 0.0),
        Point::new(1.0, 0.0),
        Point::new(1.0, 1.0),
        Point::new(0.0, 1.0),
    ];
    if !ccw {
        pts.reverse();
    }
    for i in 0..4 {
        shape.add_linear(c, pts[i], pts[(i + 1) % 4]).unwrap();
    }
    shape
}

fn transform() -> SdfTransform {
    SdfTransform::from_pixel_range(Vec2::new(10.0, 10.0), Vec2::new(0.25, 0.25), 4.0).unwrap()
}

#[test]
fn clockwise_outline_comes_out_like_counter_clockwise() {
    let reference = generate_sdf(&unit_square(true), 15, 15, &transform(), &GeneratorConfig::default()).unwrap();

    let trusting = GeneratorConfig {
        fill_rule: None,
        ..GeneratorConfig::default()
    };
    let plain = generate_sdf(&unit_square(false), 15, 15, &transform(), &trusting).unwrap();
    assert!(plain.pixel(7, 7).unwrap()[0] < 0.5);

    let config = GeneratorConfig {
        fill_rule: Some(FillRule::NonZero),
        ..GeneratorConfig::default()
    };
    let fixed = generate_sdf(&unit_square(false), 15, 15, &transform(), &config).unwrap();
    for (a, b) in reference.pixels().iter().zip(fixed.pixels()) {
        assert!((a - b).abs() < 1e-5, "{a} vs {b}");
    }
}

#[test]
fn agreeing_pixels_are_left_alone() {
    let shape = unit_square(true);
    let before = generate_sdf(&shape, 15, 15, &transform(), &GeneratorConfig::default()).unwrap();
    let mut after = before.clone();
    distance_sign_correction(&mut after, &shape, &transform().projection, FillRule::NonZero);
    assert_eq!(before, after);
}

#[test]
fn true_channel_is_corrected_on_its_own() {
    let mut shape = unit_square(false);
    edge_coloring_simple(&mut shape, 3.0, 0).unwrap();
    let mut config = MsdfGeneratorConfig::default();
    config.generator.fill_rule = Some(FillRule::NonZero);
    let bmp = generate_mtsdf(&shape, 15, 15, &transform(), &config).unwrap();
    let center = bmp.pixel(7, 7).unwrap();
    assert!(median(center[0], center[1], center[2]) > 0.5);
    assert!(center[3] > 0.5);
    assert!(bmp.pixel(0, 14).unwrap()[3] < 0.5);
}

#[test]
fn even_odd_hollows_out_nested_contours() {
    // Two nested squares with the same direction: nonzero fills the inner one,
    // even-odd leaves it empty.
    let mut shape = unit_square(true);
    let c = shape.add_contour();
    let pts = [
        Point::new(0.3, 0.3),
        Point::new(0.7, 0.3),
        Point::new(0.7, 0.7),
        Point::new(0.3, 0.7),
    ];
    for i in 0..4 {
        shape.add_linear(c, pts[i], pts[(i + 1) % 4]).unwrap();
    }
    let sample = |rule| {
        let config = GeneratorConfig {
            fill_rule: Some(rule),
            ..GeneratorConfig::default()
        };
        generate_sdf(&shape, 15, 15, &transform(), &config)
            .unwrap()
            .pixel(7, 7)
            .unwrap()[0]
    };
    assert!(sample(FillRule::NonZero) > 0.5);
    assert!(sample(FillRule::EvenOdd) < 0.5);
}
