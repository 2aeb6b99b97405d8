use crate::foundation::core::{Point, Vec2};
use crate::foundation::math::{is_zero, normalize, orthogonal, sign};
use crate::geometry::contour::Contour;
use crate::geometry::segment::{Edge, Segment};

/// Cosine slack below -1 at which two joined tangents count as convergent.
pub(crate) const CORNER_DOT_EPSILON: f64 = 0.000_001;
const DECONVERGE_OVERSHOOT: f64 = 1.111_111_111_111_111_1;

pub(crate) fn normalize_contour(contour: &mut Contour) {
    let edges = contour.edges_vec_mut();
    edges.retain(|e| !e.segment().is_degenerate());

    if let [only] = edges.as_slice() {
        let color = only.color();
        let parts = only.segment().split_in_thirds();
        *edges = parts
            .into_iter()
            .map(|s| Edge::with_color(s, color))
            .collect();
        return;
    }

    let n = edges.len();
    if n < 2 {
        return;
    }
    for i in 0..n {
        let prev = (i + n - 1) % n;
        let prev_dir = normalize(edges[prev].segment().direction(1.0), false);
        let cur_dir = normalize(edges[i].segment().direction(0.0), false);
        if prev_dir.dot(cur_dir) >= CORNER_DOT_EPSILON - 1.0 {
            continue;
        }
        let e = CORNER_DOT_EPSILON - 1.0;
        let factor = DECONVERGE_OVERSHOOT * (1.0 - e * e).sqrt() / e;
        let mut axis = factor * normalize(cur_dir - prev_dir, false);
        if convergent_curve_ordering(edges[prev].segment(), edges[i].segment()) < 0 {
            axis = -axis;
        }
        edges[prev].segment_mut().deconverge(1, orthogonal(axis, true));
        edges[i].segment_mut().deconverge(0, orthogonal(axis, false));
    }
}

/// Which side of `a` the curve `b` leaves on, for two curves that meet at a
/// cusp with opposite tangents. Positive when `b` turns counter-clockwise
/// relative to `a` (seen from the shared corner), zero when undecidable.
pub(crate) fn convergent_curve_ordering(a: &Segment, b: &Segment) -> i32 {
    let corner = b.start();
    if a.end() != corner {
        return 0;
    }
    let before: Vec<_> = a.control_points().into_iter().rev().skip(1).collect();
    let after: Vec<_> = b.control_points().into_iter().skip(1).collect();

    let diff = |pts: &[Point], k: usize| -> Vec2 {
        let at = |j: usize| if j == 0 { corner } else { pts[j - 1] };
        at(k) - at(k - 1)
    };
    let a1 = diff(&before, 1);
    let b1 = diff(&after, 1);
    if is_zero(a1) || is_zero(b1) {
        return sampled_ordering(a, b);
    }

    let mut a2 = Vec2::ZERO;
    let mut b2 = Vec2::ZERO;
    let mut a3 = Vec2::ZERO;
    let mut b3 = Vec2::ZERO;
    if before.len() >= 2 {
        a2 = diff(&before, 2) - a1;
    }
    if after.len() >= 2 {
        b2 = diff(&after, 2) - b1;
    }
    if before.len() >= 3 {
        a3 = diff(&before, 3) - diff(&before, 2) - a2;
        a2 *= 3.0;
    }
    if after.len() >= 3 {
        b3 = diff(&after, 3) - diff(&after, 2) - b2;
        b2 *= 3.0;
    }
    let a1 = a1 * before.len() as f64;
    let b1 = b1 * after.len() as f64;

    let as_ = a1.length();
    let bs = b1.length();
    let candidates = [
        as_ * a1.cross(b2) + bs * a2.cross(b1),
        as_ * as_ * a1.cross(b3) + as_ * bs * a2.cross(b2) + bs * bs * a3.cross(b1),
        as_ * a2.cross(b3) + bs * a3.cross(b2),
        a3.cross(b3),
    ];
    candidates
        .into_iter()
        .find(|d| *d != 0.0)
        .map_or(0, sign)
}

/// Fallback for curves whose first control arm collapses onto the corner:
/// compare short chords taken from the corner along both curves.
fn sampled_ordering(a: &Segment, b: &Segment) -> i32 {
    let corner = b.start();
    for h in [1e-3, 1e-2, 1e-1] {
        let d = (a.point(1.0 - h) - corner).cross(b.point(h) - corner);
        if d != 0.0 {
            return sign(d);
        }
    }
    0
}

#[cfg(test)]
#[path = "../../tests/unit/geometry/deconverge.rs"]
mod tests;
