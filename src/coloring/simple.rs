use crate::coloring::color::{ColorCycle, EdgeColor};
use crate::coloring::{color_smooth, color_teardrop, cross_threshold, find_corners};
use crate::foundation::error::MsdfResult;
use crate::geometry::shape::Shape;

/// Walk each contour and switch to a new color at every corner.
///
/// The last switch of a contour avoids the contour's first color so the
/// closing corner also changes color.
pub fn edge_coloring_simple(shape: &mut Shape, angle_threshold: f64, seed: u64) -> MsdfResult<()> {
    let cross = cross_threshold(angle_threshold)?;
    let mut cycle = ColorCycle::new(seed);
    let mut color = cycle.initial();
    let mut corner_total = 0usize;

    for contour in shape.contours_mut() {
        if contour.is_empty() {
            continue;
        }
        let corners = find_corners(contour, cross);
        corner_total += corners.len();
        match corners.as_slice() {
            [] => color_smooth(contour, &mut cycle, &mut color),
            [corner] => color_teardrop(contour, *corner, &mut cycle, &mut color),
            _ => {
                let m = contour.len();
                let start = corners[0];
                let mut spline = 0;
                cycle.switch(&mut color, EdgeColor::BLACK);
                let initial = color;
                let edges = contour.edges_mut();
                for i in 0..m {
                    let index = (start + i) % m;
                    if spline + 1 < corners.len() && corners[spline + 1] == index {
                        spline += 1;
                        let banned = if spline == corners.len() - 1 {
                            initial
                        } else {
                            EdgeColor::BLACK
                        };
                        cycle.switch(&mut color, banned);
                    }
                    edges[index].set_color(color);
                }
            }
        }
    }
    tracing::debug!(corners = corner_total, "simple edge coloring done");
    Ok(())
}

#[cfg(test)]
#[path = "../../tests/unit/coloring/simple.rs"]
mod tests;
