/// Rule deciding which winding numbers count as filled.
#[derive(
    Clone, Copy, Debug, Default, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize,
)]
pub enum FillRule {
    /// Any non-zero winding is inside.
    #[default]
    NonZero,
    /// Odd winding is inside.
    EvenOdd,
    /// Strictly positive winding is inside.
    Positive,
    /// Strictly negative winding is inside.
    Negative,
}

impl FillRule {
    /// Whether a point with `winding` is filled.
    pub fn is_filled(self, winding: i32) -> bool {
        match self {
            Self::NonZero => winding != 0,
            Self::EvenOdd => winding % 2 != 0,
            Self::Positive => winding > 0,
            Self::Negative => winding < 0,
        }
    }
}

/// One crossing of a horizontal line with the outline.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Intersection {
    /// Shape-space x of the crossing.
    pub x: f64,
    /// +1 where the outline crosses upward, -1 downward.
    pub direction: i32,
}

/// Sorted crossings of a horizontal line with a shape.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Scanline {
    intersections: Vec<Intersection>,
}

impl Scanline {
    /// Build from unsorted crossings.
    pub fn new(mut intersections: Vec<Intersection>) -> Self {
        intersections.sort_by(|a, b| a.x.total_cmp(&b.x));
        Self { intersections }
    }

    /// Crossings ordered by x.
    pub fn intersections(&self) -> &[Intersection] {
        &self.intersections
    }

    /// Winding number at `x`: the sum of crossing directions strictly to the
    /// right. Counter-clockwise outlines wind +1.
    pub fn winding_at(&self, x: f64) -> i32 {
        let first_right = self.intersections.partition_point(|i| i.x <= x);
        self.intersections[first_right..]
            .iter()
            .map(|i| i.direction)
            .sum()
    }

    /// Whether `x` is inside under `rule`.
    pub fn is_filled(&self, x: f64, rule: FillRule) -> bool {
        rule.is_filled(self.winding_at(x))
    }
}

#[cfg(test)]
#[path = "../../tests/unit/geometry/scanline.rs"]
mod tests;
