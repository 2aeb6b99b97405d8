/// Byte encoding of one distance value with the outline mapped to `edge_value`.
///
/// `[0, 0.5]` maps linearly onto `[0, edge_value]` and `(0.5, 1]` onto
/// `(edge_value, 255]`. Values outside `[0, 1]` saturate; NaN maps to 0.
pub fn quantize(value: f32, edge_value: u8) -> u8 {
    if value.is_nan() {
        return 0;
    }
    let v = f64::from(value).clamp(0.0, 1.0);
    let edge = f64::from(edge_value);
    let byte = if v <= 0.5 {
        (v / 0.5 * edge).round()
    } else {
        edge + ((v - 0.5) / 0.5 * (255.0 - edge)).round()
    };
    byte.clamp(0.0, 255.0) as u8
}

/// [`quantize`] over a whole buffer, channel layout preserved.
pub fn quantize_pixels(pixels: &[f32], edge_value: u8) -> Vec<u8> {
    pixels.iter().map(|&v| quantize(v, edge_value)).collect()
}

#[cfg(test)]
#[path = "../../tests/unit/generate/quantize.rs"]
mod tests;
