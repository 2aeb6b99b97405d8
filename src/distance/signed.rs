/// Signed distance to an edge plus a tie-breaker for equidistant edges.
///
/// `distance` is positive outside the filled region. `dot` is the absolute
/// cosine between the edge tangent and the direction to the query point at the
/// nearest endpoint; the smaller it is, the more squarely the edge faces the
/// point.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct SignedDistance {
    /// Signed distance in shape units.
    pub distance: f64,
    /// Orthogonality tie-breaker in `[0, 1]`.
    pub dot: f64,
}

impl SignedDistance {
    /// Sentinel that every real distance beats.
    pub const FAR: Self = Self {
        distance: f64::MAX,
        dot: 0.0,
    };

    /// Construct from raw parts.
    pub const fn new(distance: f64, dot: f64) -> Self {
        Self { distance, dot }
    }

    /// Strict "closer than" ordering: smaller magnitude wins, ties go to the
    /// smaller `dot`.
    pub fn closer_than(&self, other: &Self) -> bool {
        let a = self.distance.abs();
        let b = other.distance.abs();
        a < b || (a == b && self.dot < other.dot)
    }
}

impl Default for SignedDistance {
    fn default() -> Self {
        Self::FAR
    }
}

#[cfg(test)]
#[path = "../../tests/unit/distance/signed.rs"]
mod tests;
