use super::*;

#[test]
fn edge_maps_to_edge_value() {
    assert_eq!(quantize(0.5, 128), 128);
    assert_eq!(quantize(0.5, 100), 100);
}

#[test]
fn ends_map_to_byte_range() {
    assert_eq!(quantize(0.0, 128), 0);
    assert_eq!(quantize(1.0, 128), 255);
    assert_eq!(quantize(-3.0, 128), 0);
    assert_eq!(quantize(7.0, 128), 255);
    assert_eq!(quantize(f32::NAN, 128), 0);
}

#[test]
fn halves_are_linear() {
    assert_eq!(quantize(0.25, 128), 64);
    // (0.75 - 0.5) / 0.5 * 127 = 63.5 rounds away from zero.
    assert_eq!(quantize(0.75, 128), 192);
    assert_eq!(quantize_pixels(&[0.0, 0.5, 1.0], 128), vec![0, 128, 255]);
}
