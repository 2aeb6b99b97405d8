//! Detection of interpolation artifacts between neighbouring texels.
//!
//! Bilinear filtering of a multi-channel texel pair (or a 2x2 block) can make
//! two channels cross and swap which one is the median. Where that happens the
//! reconstructed distance may jump away from what the two endpoints suggest.
//! The tests here find those crossing points and hand the interpolated median
//! to a classifier that decides whether the jump is an artifact.

use kurbo::common::solve_quadratic;

use crate::foundation::core::Vec2;
use crate::foundation::math::{median, mix_f32};
use crate::generate::bitmap::Bitmap;

/// Crossings closer than this to either texel are ignored; channels routinely
/// meet exactly at texel centers.
pub(crate) const ARTIFACT_T_EPSILON: f64 = 0.01;

bitflags::bitflags! {
    /// Outcome of a range test.
    #[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
    pub(crate) struct Verdict: u8 {
        /// The interpolated median left the range of its endpoints.
        const CANDIDATE = 1;
        /// ...and by more than the expected change over that distance.
        const ARTIFACT = 2;
    }
}

/// Expected encoded change across one texel, scaled by the deviation ratio.
#[derive(Clone, Copy, Debug, PartialEq)]
pub(crate) struct Spans {
    pub(crate) horizontal: f64,
    pub(crate) vertical: f64,
    pub(crate) diagonal: f64,
}

/// Decides whether an interpolated median is an artifact.
pub(crate) trait ArtifactClassifier {
    /// Point the classifier at the neighbour in `direction` (storage coordinates).
    fn aim(&mut self, direction: Vec2, span: f64);

    /// Compare median `xm` at `xt` against medians `am`, `bm` at `at`, `bt`.
    fn range_test(&self, at: f64, bt: f64, xt: f64, am: f32, bm: f32, xm: f32) -> Verdict;

    /// Final call for the median `m` found at `t` along the current direction.
    fn evaluate(&mut self, t: f64, m: f32, verdict: Verdict) -> bool;
}

/// Classifier that trusts the bitmap alone.
#[derive(Clone, Copy, Debug)]
pub(crate) struct BaseClassifier {
    span: f64,
    protected: bool,
}

impl BaseClassifier {
    pub(crate) fn new(protected: bool) -> Self {
        Self {
            span: 0.0,
            protected,
        }
    }

    pub(crate) fn set_protected(&mut self, protected: bool) {
        self.protected = protected;
    }
}

impl ArtifactClassifier for BaseClassifier {
    fn aim(&mut self, _direction: Vec2, span: f64) {
        self.span = span;
    }

    fn range_test(&self, at: f64, bt: f64, xt: f64, am: f32, bm: f32, xm: f32) -> Verdict {
        // Protected texels only answer for sign inversions.
        let inverted = (am > 0.5 && bm > 0.5 && xm <= 0.5) || (am < 0.5 && bm < 0.5 && xm >= 0.5);
        if !(inverted || (!self.protected && median(am, bm, xm) != xm)) {
            return Verdict::empty();
        }
        let ax_span = (xt - at) * self.span;
        let bx_span = (bt - xt) * self.span;
        let (am, bm, xm) = (f64::from(am), f64::from(bm), f64::from(xm));
        let expected = xm >= am - ax_span
            && xm <= am + ax_span
            && xm >= bm - bx_span
            && xm <= bm + bx_span;
        if expected {
            Verdict::CANDIDATE
        } else {
            Verdict::CANDIDATE | Verdict::ARTIFACT
        }
    }

    fn evaluate(&mut self, _t: f64, _m: f32, verdict: Verdict) -> bool {
        verdict.contains(Verdict::ARTIFACT)
    }
}

fn interpolated_median(a: &[f32], b: &[f32], t: f64) -> f32 {
    median(
        mix_f32(a[0], b[0], t),
        mix_f32(a[1], b[1], t),
        mix_f32(a[2], b[2], t),
    )
}

/// Median along the diagonal of a bilinear patch: `a + l t + q t^2` per channel.
fn diagonal_median(a: &[f32], l: &[f64; 3], q: &[f64; 3], t: f64) -> f32 {
    let ch = |i: usize| t * (t * q[i] + l[i]) + f64::from(a[i]);
    median(ch(0), ch(1), ch(2)) as f32
}

fn linear_crossing<C: ArtifactClassifier>(
    classifier: &mut C,
    am: f32,
    bm: f32,
    a: &[f32],
    b: &[f32],
    da: f32,
    db: f32,
) -> bool {
    let t = f64::from(da) / f64::from(da - db);
    if t > ARTIFACT_T_EPSILON && t < 1.0 - ARTIFACT_T_EPSILON {
        let xm = interpolated_median(a, b, t);
        let verdict = classifier.range_test(0.0, 1.0, t, am, bm, xm);
        return classifier.evaluate(t, xm, verdict);
    }
    false
}

/// Artifact between texel `a` (median `am`) and its direct neighbour `b`.
pub(crate) fn has_linear_artifact<C: ArtifactClassifier>(classifier: &mut C, am: f32, a: &[f32], b: &[f32]) -> bool {
    let bm = median(b[0], b[1], b[2]);
    // Only the texel farther from the outline is blamed.
    (am - 0.5).abs() >= (bm - 0.5).abs()
        && (linear_crossing(classifier, am, bm, a, b, a[1] - a[0], b[1] - b[0])
            || linear_crossing(classifier, am, bm, a, b, a[2] - a[1], b[2] - b[1])
            || linear_crossing(classifier, am, bm, a, b, a[0] - a[2], b[0] - b[2]))
}

#[allow(clippy::too_many_arguments)]
fn diagonal_crossing<C: ArtifactClassifier>(
    classifier: &mut C,
    am: f32,
    dm: f32,
    a: &[f32],
    l: &[f64; 3],
    q: &[f64; 3],
    da: f64,
    dbc: f64,
    dd: f64,
    t_ex0: f64,
    t_ex1: f64,
) -> bool {
    for t in solve_quadratic(da, dbc - 2.0 * da, dd - dbc + da) {
        if !(t > ARTIFACT_T_EPSILON && t < 1.0 - ARTIFACT_T_EPSILON) {
            continue;
        }
        let xm = diagonal_median(a, l, q, t);
        let mut verdict = classifier.range_test(0.0, 1.0, t, am, dm, xm);
        // Also test against the channel extremes between the endpoints.
        for t_ex in [t_ex0, t_ex1] {
            if t_ex > 0.0 && t_ex < 1.0 {
                let mut ends = [0.0, 1.0];
                let mut medians = [am, dm];
                let side = usize::from(t_ex > t);
                ends[side] = t_ex;
                medians[side] = diagonal_median(a, l, q, t_ex);
                verdict |= classifier.range_test(ends[0], ends[1], t, medians[0], medians[1], xm);
            }
        }
        if classifier.evaluate(t, xm, verdict) {
            return true;
        }
    }
    false
}

/// Artifact across the 2x2 block spanned by `a`, its neighbours `b` and `c`,
/// and the diagonal texel `d`.
pub(crate) fn has_diagonal_artifact<C: ArtifactClassifier>(
    classifier: &mut C,
    am: f32,
    a: &[f32],
    b: &[f32],
    c: &[f32],
    d: &[f32],
) -> bool {
    let dm = median(d[0], d[1], d[2]);
    if (am - 0.5).abs() < (dm - 0.5).abs() {
        return false;
    }
    let abc = [0, 1, 2].map(|i| f64::from(a[i]) - f64::from(b[i]) - f64::from(c[i]));
    let l = [0, 1, 2].map(|i| -f64::from(a[i]) - abc[i]);
    let q = [0, 1, 2].map(|i| f64::from(d[i]) + abc[i]);
    let t_ex = [0, 1, 2].map(|i| -0.5 * l[i] / q[i]);
    let pair = |i: usize, j: usize| {
        (
            f64::from(a[j] - a[i]),
            f64::from(b[j] - b[i] + c[j] - c[i]),
            f64::from(d[j] - d[i]),
        )
    };
    [(0, 1), (1, 2), (2, 0)].into_iter().any(|(i, j)| {
        let (da, dbc, dd) = pair(i, j);
        diagonal_crossing(classifier, am, dm, a, &l, &q, da, dbc, dd, t_ex[i], t_ex[j])
    })
}

/// Whether interpolating texel (`x`, `row`) with any of its eight neighbours
/// produces an artifact the classifier accepts.
pub(crate) fn texel_has_artifact<C: ArtifactClassifier>(
    classifier: &mut C,
    bitmap: &Bitmap,
    x: usize,
    row: usize,
    spans: &Spans,
) -> bool {
    let (w, h) = (bitmap.width() as usize, bitmap.height() as usize);
    let c = bitmap.texel(x, row);
    let cm = median(c[0], c[1], c[2]);
    let l = (x > 0).then(|| bitmap.texel(x - 1, row));
    let b = (row > 0).then(|| bitmap.texel(x, row - 1));
    let r = (x + 1 < w).then(|| bitmap.texel(x + 1, row));
    let t = (row + 1 < h).then(|| bitmap.texel(x, row + 1));

    let linear = [
        (l, Vec2::new(-1.0, 0.0), spans.horizontal),
        (b, Vec2::new(0.0, -1.0), spans.vertical),
        (r, Vec2::new(1.0, 0.0), spans.horizontal),
        (t, Vec2::new(0.0, 1.0), spans.vertical),
    ];
    for (neighbour, direction, span) in linear {
        if let Some(n) = neighbour {
            classifier.aim(direction, span);
            if has_linear_artifact(classifier, cm, c, n) {
                return true;
            }
        }
    }

    let diagonal = [(l, b, -1, -1), (r, b, 1, -1), (l, t, -1, 1), (r, t, 1, 1)];
    for (horizontal, vertical, dx, dy) in diagonal {
        if let (Some(hn), Some(vn)) = (horizontal, vertical) {
            let d = bitmap.texel(x.wrapping_add_signed(dx), row.wrapping_add_signed(dy));
            classifier.aim(Vec2::new(dx as f64, dy as f64), spans.diagonal);
            if has_diagonal_artifact(classifier, cm, c, hn, vn, d) {
                return true;
            }
        }
    }
    false
}

#[cfg(test)]
#[path = "../../tests/unit/correction/artifacts.rs"]
mod tests;
