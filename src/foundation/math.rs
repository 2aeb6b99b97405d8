use crate::foundation::core::Vec2;

/// Median of three values; the reconstruction rule for multi-channel fields.
pub fn median<T: PartialOrd + Copy>(a: T, b: T, c: T) -> T {
    max(min(a, b), min(max(a, b), c))
}

fn min<T: PartialOrd + Copy>(a: T, b: T) -> T {
    if b < a { b } else { a }
}

fn max<T: PartialOrd + Copy>(a: T, b: T) -> T {
    if a < b { b } else { a }
}

pub(crate) fn mix(a: f64, b: f64, t: f64) -> f64 {
    (1.0 - t) * a + t * b
}

pub(crate) fn mix_f32(a: f32, b: f32, t: f64) -> f32 {
    ((1.0 - t) * f64::from(a) + t * f64::from(b)) as f32
}

pub(crate) fn mix_vec(a: Vec2, b: Vec2, t: f64) -> Vec2 {
    a * (1.0 - t) + b * t
}

pub(crate) fn sign(x: f64) -> i32 {
    i32::from(x > 0.0) - i32::from(x < 0.0)
}

/// +1 for positive input, -1 otherwise (zero counts as negative).
pub(crate) fn non_zero_sign(x: f64) -> f64 {
    if x > 0.0 { 1.0 } else { -1.0 }
}

pub(crate) fn is_zero(v: Vec2) -> bool {
    v.x == 0.0 && v.y == 0.0
}

/// Unit vector in the direction of `v`. A zero vector maps to `(0, 1)`, or to
/// `(0, 0)` when `allow_zero` is set.
pub(crate) fn normalize(v: Vec2, allow_zero: bool) -> Vec2 {
    let len = v.length();
    if len != 0.0 {
        return v / len;
    }
    Vec2::new(0.0, if allow_zero { 0.0 } else { 1.0 })
}

/// Perpendicular of `v`, rotated counter-clockwise when `polarity` is set.
pub(crate) fn orthogonal(v: Vec2, polarity: bool) -> Vec2 {
    if polarity {
        Vec2::new(-v.y, v.x)
    } else {
        Vec2::new(v.y, -v.x)
    }
}

pub(crate) fn orthonormal(v: Vec2, polarity: bool, allow_zero: bool) -> Vec2 {
    let len = v.length();
    if len != 0.0 {
        return orthogonal(v / len, polarity);
    }
    let y = if allow_zero { 0.0 } else { 1.0 };
    Vec2::new(0.0, if polarity { y } else { -y })
}

/// Small deterministic generator used for reproducible tie breaking.
///
/// Every seed, including zero, yields a well-defined stream.
#[derive(Clone, Copy, Debug)]
pub(crate) struct SplitMix64(u64);

impl SplitMix64 {
    const GAMMA: u64 = 0x9E37_79B9_7F4A_7C15;

    pub(crate) fn new(seed: u64) -> Self {
        Self(seed)
    }

    pub(crate) fn next_u64(&mut self) -> u64 {
        self.0 = self.0.wrapping_add(Self::GAMMA);
        let mut z = self.0;
        z = (z ^ (z >> 30)).wrapping_mul(0xBF58_476D_1CE4_E5B9);
        z = (z ^ (z >> 27)).wrapping_mul(0x94D0_49BB_1331_11EB);
        z ^ (z >> 31)
    }
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/math.rs"]
mod tests;
