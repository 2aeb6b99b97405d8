use crate::foundation::core::Projection;
use crate::foundation::math::median;
use crate::generate::bitmap::Bitmap;
use crate::geometry::scanline::FillRule;
use crate::geometry::shape::Shape;

/// Make every pixel's inside/outside reading agree with `fill_rule`.
///
/// Each pixel center is tested against a scanline of the shape. Pixels whose
/// encoded value sits on the wrong side of 0.5 are mirrored about 0.5 (all
/// color channels together; a fourth true-distance channel on its own).
/// Pixels exactly at 0.5 are resolved afterwards by majority of their four
/// neighbours, so a shape that came out fully inverted is flipped whole.
#[tracing::instrument(skip(bitmap, shape, projection))]
pub(crate) fn distance_sign_correction(
    bitmap: &mut Bitmap,
    shape: &Shape,
    projection: &Projection,
    fill_rule: FillRule,
) {
    let w = bitmap.width() as usize;
    let h = bitmap.height() as usize;
    let color_channels = bitmap.channels().min(3);
    let has_true_channel = bitmap.channels() == 4;

    // +1 agreed, -1 flipped, 0 undecided.
    let mut matches = vec![0i8; w * h];
    let mut ambiguous = false;
    let mut flipped = 0usize;

    for y in 0..h {
        let row = bitmap.row_for_y(y as u32);
        let scanline = shape.scanline(projection.unproject_y(y as f64 + 0.5));
        for x in 0..w {
            let fill = scanline.is_filled(projection.unproject_x(x as f64 + 0.5), fill_rule);
            let Some(px) = bitmap.pixel_mut(x as u32, row) else {
                continue;
            };
            let sd = reconstructed(px, color_channels);
            let slot = &mut matches[y * w + x];
            if sd == 0.5 {
                ambiguous = true;
            } else if (sd > 0.5) != fill {
                mirror(&mut px[..color_channels]);
                *slot = -1;
                flipped += 1;
            } else {
                *slot = 1;
            }
            if has_true_channel && (px[3] > 0.5) != fill {
                px[3] = 1.0 - px[3];
            }
        }
    }

    if ambiguous {
        for y in 0..h {
            let row = bitmap.row_for_y(y as u32);
            for x in 0..w {
                if matches[y * w + x] != 0 {
                    continue;
                }
                let mut neighbours = 0i32;
                if x > 0 {
                    neighbours += i32::from(matches[y * w + x - 1]);
                }
                if x + 1 < w {
                    neighbours += i32::from(matches[y * w + x + 1]);
                }
                if y > 0 {
                    neighbours += i32::from(matches[(y - 1) * w + x]);
                }
                if y + 1 < h {
                    neighbours += i32::from(matches[(y + 1) * w + x]);
                }
                if neighbours < 0
                    && let Some(px) = bitmap.pixel_mut(x as u32, row)
                {
                    mirror(&mut px[..color_channels]);
                    flipped += 1;
                }
            }
        }
    }
    tracing::debug!(flipped, "sign correction done");
}

fn reconstructed(px: &[f32], color_channels: usize) -> f32 {
    if color_channels >= 3 {
        median(px[0], px[1], px[2])
    } else {
        px[0]
    }
}

fn mirror(values: &mut [f32]) {
    for v in values {
        *v = 1.0 - *v;
    }
}

#[cfg(test)]
#[path = "../../tests/unit/generate/sign_correction.rs"]
mod tests;
