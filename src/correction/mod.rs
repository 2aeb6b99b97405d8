//! Repair of multi-channel interpolation artifacts.

pub(crate) mod artifacts;
pub(crate) mod checker;
pub(crate) mod stencil;

use rayon::prelude::*;

use crate::correction::artifacts::{BaseClassifier, Spans, texel_has_artifact};
use crate::correction::checker::ShapeDistanceChecker;
use crate::correction::stencil::{Stencil, TexelFlags};
use crate::foundation::core::{SdfTransform, Vec2};
use crate::foundation::error::{MsdfError, MsdfResult};
use crate::generate::bitmap::Bitmap;
use crate::generate::config::{DistanceCheckMode, ErrorCorrectionMode, MsdfGeneratorConfig};
use crate::geometry::shape::Shape;

/// Find and flatten texels whose channels would interpolate into a visible
/// artifact.
///
/// Detection reads the bitmap as sampled and only marks a stencil; every
/// repair is written afterwards, so repairs never influence detection. Only
/// the three color channels are touched; a fourth true-distance channel is
/// left as is.
#[tracing::instrument(skip(bitmap, shape, transform, config), fields(mode = ?config.error_correction.mode))]
pub fn correct_errors(
    bitmap: &mut Bitmap,
    shape: &Shape,
    transform: &SdfTransform,
    config: &MsdfGeneratorConfig,
) -> MsdfResult<()> {
    config.validate()?;
    if bitmap.channels() < 3 {
        return Err(MsdfError::invalid_argument(format!(
            "error correction needs a 3 or 4 channel bitmap (got {})",
            bitmap.channels()
        )));
    }
    let ec = config.error_correction;
    if ec.mode == ErrorCorrectionMode::Disabled {
        return Ok(());
    }
    let pool = config.generator.threading.build_pool()?;
    let mut stencil = Stencil::new(bitmap.width(), bitmap.height())?;

    match ec.mode {
        ErrorCorrectionMode::EdgePriority => {
            stencil.protect_corners(shape, transform, bitmap);
            stencil.protect_edges(bitmap, transform);
        }
        ErrorCorrectionMode::EdgeOnly => stencil.protect_all(),
        ErrorCorrectionMode::Disabled | ErrorCorrectionMode::Indiscriminate => {}
    }

    let spans = Spans {
        horizontal: ec.min_deviation_ratio * transform.encoded_pixel_span(Vec2::new(1.0, 0.0)),
        vertical: ec.min_deviation_ratio * transform.encoded_pixel_span(Vec2::new(0.0, 1.0)),
        diagonal: ec.min_deviation_ratio * transform.encoded_pixel_span(Vec2::new(1.0, 1.0)),
    };
    let snapshot: &Bitmap = bitmap;

    let at_edge = ec.distance_check == DistanceCheckMode::AtEdge;
    if ec.distance_check == DistanceCheckMode::Never
        || (at_edge && ec.mode != ErrorCorrectionMode::EdgeOnly)
    {
        for_each_row(
            &mut stencil,
            pool.as_ref(),
            || BaseClassifier::new(false),
            |classifier, row, flags| {
                for (x, f) in flags.iter_mut().enumerate() {
                    classifier.set_protected(f.contains(TexelFlags::PROTECTED));
                    if texel_has_artifact(classifier, snapshot, x, row, &spans) {
                        *f |= TexelFlags::ERROR;
                    }
                }
            },
        );
        // What remains for the shape check is limited to inversions.
        if at_edge {
            stencil.protect_all();
        }
    }

    if ec.distance_check != DistanceCheckMode::Never {
        let generator = &config.generator;
        for_each_row(
            &mut stencil,
            pool.as_ref(),
            || {
                ShapeDistanceChecker::new(snapshot, shape, transform, generator, ec.min_improve_ratio)
            },
            |checker, row, flags| {
                for (x, f) in flags.iter_mut().enumerate() {
                    if f.contains(TexelFlags::ERROR) {
                        continue;
                    }
                    checker.focus(x, row, f.contains(TexelFlags::PROTECTED));
                    if texel_has_artifact(checker, snapshot, x, row, &spans) {
                        *f |= TexelFlags::ERROR;
                    }
                }
            },
        );
    }

    let repaired = stencil.apply(bitmap);
    tracing::debug!(repaired, "error correction applied");
    Ok(())
}

/// Run `op` over every stencil row, on `pool` when one is given. Each worker
/// owns one `init()` state.
fn for_each_row<T, I, F>(stencil: &mut Stencil, pool: Option<&rayon::ThreadPool>, init: I, op: F)
where
    I: Fn() -> T + Sync + Send,
    F: Fn(&mut T, usize, &mut [TexelFlags]) + Sync + Send,
{
    let width = stencil.width();
    match pool {
        Some(pool) => pool.install(|| {
            stencil
                .flags_mut()
                .par_chunks_mut(width)
                .enumerate()
                .for_each_init(&init, |state, (row, flags)| op(state, row, flags));
        }),
        None => {
            let mut state = init();
            for (row, flags) in stencil.flags_mut().chunks_mut(width).enumerate() {
                op(&mut state, row, flags);
            }
        }
    }
}

#[cfg(test)]
#[path = "../../tests/unit/correction/mod.rs"]
mod tests;
