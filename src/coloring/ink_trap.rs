use crate::coloring::color::{ColorCycle, EdgeColor};
use crate::coloring::{color_smooth, color_teardrop, cross_threshold, find_corners};
use crate::foundation::error::MsdfResult;
use crate::geometry::contour::Contour;
use crate::geometry::shape::Shape;

#[derive(Clone, Copy, Debug)]
struct Corner {
    index: usize,
    /// Length of the spline that ends at this corner.
    prev_length: f64,
    minor: bool,
    color: EdgeColor,
}

/// Corner-switching coloring that treats a spline shorter than both of its
/// neighbours as an ink trap: the corner in front of it gets a third color
/// instead of taking part in the alternation.
pub fn edge_coloring_ink_trap(
    shape: &mut Shape,
    angle_threshold: f64,
    seed: u64,
) -> MsdfResult<()> {
    let cross = cross_threshold(angle_threshold)?;
    let mut cycle = ColorCycle::new(seed);
    let mut color = cycle.initial();
    let mut minor_total = 0usize;

    for contour in shape.contours_mut() {
        if contour.is_empty() {
            continue;
        }
        let (mut corners, trailing) = measure_corners(contour, cross);
        match corners.len() {
            0 => color_smooth(contour, &mut cycle, &mut color),
            1 => color_teardrop(contour, corners[0].index, &mut cycle, &mut color),
            n => {
                let mut major = n;
                if n > 3 {
                    corners[0].prev_length += trailing;
                    for i in 0..n {
                        let next = corners[(i + 1) % n].prev_length;
                        if corners[i].prev_length > next && next < corners[(i + 2) % n].prev_length {
                            corners[i].minor = true;
                            major -= 1;
                        }
                    }
                }
                minor_total += n - major;

                let mut initial = EdgeColor::BLACK;
                for corner in corners.iter_mut().filter(|c| !c.minor) {
                    major -= 1;
                    let banned = if major == 0 { initial } else { EdgeColor::BLACK };
                    cycle.switch(&mut color, banned);
                    corner.color = color;
                    if initial.is_empty() {
                        initial = color;
                    }
                }
                for i in 0..n {
                    if corners[i].minor {
                        let next = corners[(i + 1) % n].color;
                        corners[i].color = (color & next) ^ EdgeColor::WHITE;
                    } else {
                        color = corners[i].color;
                    }
                }

                let m = contour.len();
                let start = corners[0].index;
                let mut spline = 0;
                let mut current = corners[0].color;
                let edges = contour.edges_mut();
                for i in 0..m {
                    let index = (start + i) % m;
                    if spline + 1 < n && corners[spline + 1].index == index {
                        spline += 1;
                        current = corners[spline].color;
                    }
                    edges[index].set_color(current);
                }
            }
        }
    }
    tracing::debug!(minor_corners = minor_total, "ink trap edge coloring done");
    Ok(())
}

/// Corners with the length of the spline leading into each, plus the length
/// of the spline after the last corner (which wraps into the first).
fn measure_corners(contour: &Contour, cross: f64) -> (Vec<Corner>, f64) {
    let corner_indices = find_corners(contour, cross);
    let mut corners = Vec::with_capacity(corner_indices.len());
    let mut spline_length = 0.0;
    let mut next = corner_indices.iter().peekable();
    for (i, edge) in contour.edges().iter().enumerate() {
        if next.peek().is_some_and(|&&c| c == i) {
            next.next();
            corners.push(Corner {
                index: i,
                prev_length: spline_length,
                minor: false,
                color: EdgeColor::BLACK,
            });
            spline_length = 0.0;
        }
        spline_length += edge.segment().length();
    }
    (corners, spline_length)
}

#[cfg(test)]
#[path = "../../tests/unit/coloring/ink_trap.rs"]
mod tests;
