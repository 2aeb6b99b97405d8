use crate::coloring::color::{ColorCycle, EdgeColor};
use crate::coloring::{color_teardrop, cross_threshold, find_corners};
use crate::foundation::core::Point;
use crate::foundation::error::MsdfResult;
use crate::foundation::math::SplitMix64;
use crate::geometry::shape::Shape;

const SAMPLES_PER_EDGE: usize = 8;
const WINDOW: usize = 3;
const MAX_PASSES: usize = 16;
const DISTANCE_EPSILON: f64 = 1e-9;

/// Run of edges between two consecutive corners.
#[derive(Debug)]
struct Spline {
    contour: usize,
    edges: Vec<usize>,
    samples: Vec<Point>,
}

/// Splines of one contour, in order; neighbours in this list must differ.
#[derive(Debug)]
struct Ring {
    members: Vec<usize>,
}

/// Coloring that keeps splines of the same color far apart.
///
/// Every contour is cut into splines at its corners. A corner-switching
/// assignment seeds the search; then windows of three consecutive splines
/// are recolored exhaustively, keeping adjacent splines distinct and
/// minimizing the sum of `1 / distance` over non-adjacent same-colored
/// spline pairs across the whole shape. Equal-score candidates are ranked by
/// a hash of `seed`, so the result is reproducible for every seed.
pub fn edge_coloring_by_distance(
    shape: &mut Shape,
    angle_threshold: f64,
    seed: u64,
) -> MsdfResult<()> {
    let cross = cross_threshold(angle_threshold)?;
    let mut cycle = ColorCycle::new(seed);
    let mut color = cycle.initial();

    let mut splines: Vec<Spline> = Vec::new();
    let mut rings: Vec<Ring> = Vec::new();
    let mut colors: Vec<EdgeColor> = Vec::new();

    for (ci, contour) in shape.contours_mut().iter_mut().enumerate() {
        if contour.is_empty() {
            continue;
        }
        let corners = find_corners(contour, cross);
        if corners.len() == 1 {
            color_teardrop(contour, corners[0], &mut cycle, &mut color);
            continue;
        }
        let m = contour.len();
        let starts = if corners.is_empty() { vec![0] } else { corners };
        let mut members = Vec::with_capacity(starts.len());
        cycle.switch(&mut color, EdgeColor::BLACK);
        let initial = color;
        for (k, &start) in starts.iter().enumerate() {
            if k > 0 {
                let banned = if k == starts.len() - 1 {
                    initial
                } else {
                    EdgeColor::BLACK
                };
                cycle.switch(&mut color, banned);
            }
            let end = starts.get(k + 1).copied().unwrap_or(starts[0] + m);
            let edges: Vec<usize> = (start..end.max(start + 1)).map(|i| i % m).collect();
            let mut samples = Vec::with_capacity(edges.len() * SAMPLES_PER_EDGE + 1);
            for &e in &edges {
                let seg = contour.edges()[e].segment();
                for s in 0..SAMPLES_PER_EDGE {
                    samples.push(seg.point(s as f64 / SAMPLES_PER_EDGE as f64));
                }
            }
            if let Some(&last) = edges.last() {
                samples.push(contour.edges()[last].segment().end());
            }
            members.push(splines.len());
            splines.push(Spline {
                contour: ci,
                edges,
                samples,
            });
            colors.push(color);
        }
        rings.push(Ring { members });
    }

    if splines.is_empty() {
        return Ok(());
    }

    let weights = conflict_weights(&splines, &rings);
    let improved = optimize(&rings, &weights, &mut colors, seed);
    tracing::debug!(
        splines = splines.len(),
        improved,
        "distance-aware edge coloring done"
    );

    let contours = shape.contours_mut();
    for (spline, color) in splines.iter().zip(&colors) {
        let edges = contours[spline.contour].edges_mut();
        for &e in &spline.edges {
            edges[e].set_color(*color);
        }
    }
    Ok(())
}

/// Symmetric matrix of same-color penalties; zero for adjacent pairs.
fn conflict_weights(splines: &[Spline], rings: &[Ring]) -> Vec<Vec<f64>> {
    let n = splines.len();
    let mut w = vec![vec![0.0; n]; n];
    for a in 0..n {
        for b in (a + 1)..n {
            if adjacent(rings, a, b) {
                continue;
            }
            let d = min_distance(&splines[a].samples, &splines[b].samples);
            let weight = 1.0 / (d + DISTANCE_EPSILON);
            w[a][b] = weight;
            w[b][a] = weight;
        }
    }
    w
}

fn min_distance(a: &[Point], b: &[Point]) -> f64 {
    let mut best = f64::INFINITY;
    for p in a {
        for q in b {
            best = best.min((*p - *q).length_squared());
        }
    }
    best.sqrt()
}

fn ring_neighbours(ring: &Ring, pos: usize) -> Option<(usize, usize)> {
    let k = ring.members.len();
    if k < 2 {
        return None;
    }
    Some((ring.members[(pos + k - 1) % k], ring.members[(pos + 1) % k]))
}

fn adjacent(rings: &[Ring], a: usize, b: usize) -> bool {
    rings.iter().any(|ring| {
        ring.members.iter().enumerate().any(|(pos, &s)| {
            s == a && ring_neighbours(ring, pos).is_some_and(|(p, n)| p == b || n == b)
        })
    })
}

/// Windowed exhaustive recoloring; returns how many windows changed.
fn optimize(rings: &[Ring], weights: &[Vec<f64>], colors: &mut [EdgeColor], seed: u64) -> usize {
    let mut changes = 0usize;
    for pass in 0..MAX_PASSES {
        let mut changed = false;
        for (ri, ring) in rings.iter().enumerate() {
            let k = ring.members.len();
            let w = k.min(WINDOW);
            for start in 0..k {
                let window: Vec<usize> = (0..w).map(|j| ring.members[(start + j) % k]).collect();
                let tag = ((pass * rings.len() + ri) * k + start) as u64;
                if recolor_window(ring, &window, weights, colors, seed, tag) {
                    changed = true;
                    changes += 1;
                }
            }
        }
        if !changed {
            break;
        }
    }
    changes
}

fn recolor_window(
    ring: &Ring,
    window: &[usize],
    weights: &[Vec<f64>],
    colors: &mut [EdgeColor],
    seed: u64,
    tag: u64,
) -> bool {
    let current: Vec<EdgeColor> = window.iter().map(|&s| colors[s]).collect();
    let current_cost = window_cost(window, weights, colors);
    let mut best: Option<(f64, u64, Vec<EdgeColor>)> = None;

    let combos = EdgeColor::PALETTE.len().pow(window.len() as u32);
    for combo in 0..combos {
        let mut code = combo;
        for &s in window {
            colors[s] = EdgeColor::PALETTE[code % 3];
            code /= 3;
        }
        if !ring_is_proper(ring, colors) {
            continue;
        }
        let cost = window_cost(window, weights, colors);
        let key = tie_key(seed, tag, combo as u64);
        let better = match &best {
            None => true,
            Some((c, k, _)) => cost < *c || (cost == *c && key < *k),
        };
        if better {
            best = Some((cost, key, window.iter().map(|&s| colors[s]).collect()));
        }
    }

    let accept = best
        .as_ref()
        .is_some_and(|(cost, _, _)| *cost < current_cost * (1.0 - 1e-12));
    let chosen = match best {
        Some((_, _, assignment)) if accept => assignment,
        _ => current,
    };
    for (&s, c) in window.iter().zip(&chosen) {
        colors[s] = *c;
    }
    accept
}

fn ring_is_proper(ring: &Ring, colors: &[EdgeColor]) -> bool {
    let k = ring.members.len();
    if k < 2 {
        return true;
    }
    (0..k).all(|i| colors[ring.members[i]] != colors[ring.members[(i + 1) % k]])
}

/// Penalty of all same-colored pairs that involve a window member.
fn window_cost(window: &[usize], weights: &[Vec<f64>], colors: &[EdgeColor]) -> f64 {
    let mut cost = 0.0;
    for (i, &a) in window.iter().enumerate() {
        for (b, w) in weights[a].iter().enumerate() {
            if *w == 0.0 || colors[a] != colors[b] {
                continue;
            }
            // Pairs inside the window are visited twice; count them once.
            if window[..i].contains(&b) {
                continue;
            }
            cost += w;
        }
    }
    cost
}

fn tie_key(seed: u64, tag: u64, candidate: u64) -> u64 {
    let mut rng = SplitMix64::new(seed ^ tag.wrapping_mul(0xD6E8_FEB8_6659_FD93));
    rng.next_u64() ^ SplitMix64::new(candidate).next_u64()
}

#[cfg(test)]
#[path = "../../tests/unit/coloring/by_distance.rs"]
mod tests;
