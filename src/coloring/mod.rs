use crate::foundation::core::Vec2;
use crate::foundation::error::{MsdfError, MsdfResult};
use crate::foundation::math::normalize;
use crate::geometry::contour::Contour;
use crate::geometry::shape::Shape;

pub(crate) mod by_distance;
pub(crate) mod color;
pub(crate) mod ink_trap;
pub(crate) mod simple;

use color::{ColorCycle, EdgeColor};

/// Edge coloring algorithm.
#[derive(
    Clone, Copy, Debug, Default, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize,
)]
pub enum ColoringStrategy {
    /// Switch color at every corner.
    #[default]
    Simple,
    /// Like `Simple`, but short splines squeezed between two corners get a
    /// color distinct from both neighbours.
    InkTrap,
    /// Local search that keeps nearby same-colored splines apart.
    ByDistance,
}

/// Parameters for [`color_edges`].
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct ColoringConfig {
    /// Algorithm to run.
    pub strategy: ColoringStrategy,
    /// Joins whose direction changes by more than this many radians are corners.
    pub angle_threshold: f64,
    /// Tie-breaking seed. Zero is an ordinary seed.
    pub seed: u64,
}

impl Default for ColoringConfig {
    fn default() -> Self {
        Self {
            strategy: ColoringStrategy::Simple,
            angle_threshold: 3.0,
            seed: 0,
        }
    }
}

/// Assign channel colors to every edge of `shape` using `config.strategy`.
///
/// Only edge colors change; geometry and contour membership are left as they
/// are. A shape without contours is a no-op.
#[tracing::instrument(skip(shape), fields(edges = shape.edge_count()))]
pub fn color_edges(shape: &mut Shape, config: &ColoringConfig) -> MsdfResult<()> {
    match config.strategy {
        ColoringStrategy::Simple => simple::edge_coloring_simple(shape, config.angle_threshold, config.seed),
        ColoringStrategy::InkTrap => {
            ink_trap::edge_coloring_ink_trap(shape, config.angle_threshold, config.seed)
        }
        ColoringStrategy::ByDistance => {
            by_distance::edge_coloring_by_distance(shape, config.angle_threshold, config.seed)
        }
    }
}

pub(crate) fn cross_threshold(angle_threshold: f64) -> MsdfResult<f64> {
    if !angle_threshold.is_finite() {
        return Err(MsdfError::invalid_argument(
            "coloring angle threshold must be finite",
        ));
    }
    Ok(angle_threshold.sin())
}

fn is_corner(a: Vec2, b: Vec2, cross_threshold: f64) -> bool {
    a.dot(b) <= 0.0 || a.cross(b).abs() > cross_threshold
}

/// Indices of edges whose start is a corner.
pub(crate) fn find_corners(contour: &Contour, cross_threshold: f64) -> Vec<usize> {
    let edges = contour.edges();
    let Some(last) = edges.last() else {
        return Vec::new();
    };
    let mut prev_dir = last.segment().direction(1.0);
    let mut corners = Vec::new();
    for (i, edge) in edges.iter().enumerate() {
        let seg = edge.segment();
        if is_corner(
            normalize(prev_dir, false),
            normalize(seg.direction(0.0), false),
            cross_threshold,
        ) {
            corners.push(i);
        }
        prev_dir = seg.direction(1.0);
    }
    corners
}

/// Color every edge of a contour without corners with one fresh color.
pub(crate) fn color_smooth(contour: &mut Contour, cycle: &mut ColorCycle, color: &mut EdgeColor) {
    cycle.switch(color, EdgeColor::BLACK);
    for edge in contour.edges_mut() {
        edge.set_color(*color);
    }
}

/// Color a contour with a single corner: the two edges at the corner get two
/// different colors and the middle stretch is white.
pub(crate) fn color_teardrop(
    contour: &mut Contour,
    corner: usize,
    cycle: &mut ColorCycle,
    color: &mut EdgeColor,
) {
    cycle.switch(color, EdgeColor::BLACK);
    let first = *color;
    cycle.switch(color, EdgeColor::BLACK);
    let last = *color;
    let colors = [first, EdgeColor::WHITE, last];

    let edges = contour.edges_mut();
    let m = edges.len();
    match m {
        0 => {}
        1 => edges[0].set_color(EdgeColor::WHITE),
        2 => {
            edges[corner % 2].set_color(first);
            edges[(corner + 1) % 2].set_color(last);
        }
        _ => {
            for i in 0..m {
                let slot = 1 + symmetrical_trichotomy(i, m);
                edges[(corner + i) % m].set_color(colors[slot as usize]);
            }
        }
    }
}

/// Maps `position` in `0..n` onto -1, 0, +1 with equal-ish thirds, symmetric
/// about the middle.
fn symmetrical_trichotomy(position: usize, n: usize) -> i32 {
    let t = 3.0 + 2.875 * position as f64 / (n - 1) as f64 - 1.4375 + 0.5;
    t as i32 - 3
}

#[cfg(test)]
#[path = "../../tests/unit/coloring/mod.rs"]
mod tests;
