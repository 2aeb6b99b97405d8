use crate::coloring::color::EdgeColor;
use crate::foundation::core::{SdfTransform, Vec2};
use crate::foundation::error::{MsdfError, MsdfResult};
use crate::foundation::math::{median, mix_f32};
use crate::generate::bitmap::Bitmap;
use crate::geometry::shape::Shape;

bitflags::bitflags! {
    /// Per-texel state of the repair pass.
    #[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
    pub(crate) struct TexelFlags: u8 {
        /// The texel will be flattened to its median.
        const ERROR = 1;
        /// The texel carries a corner or edge and is only repaired for
        /// inversion artifacts.
        const PROTECTED = 2;
    }
}

/// Slack on the protection radius so texels exactly one span away still count.
const PROTECTION_RADIUS_TOLERANCE: f64 = 1.001;

/// Flags for every texel of a bitmap, in the bitmap's storage order.
#[derive(Clone, Debug)]
pub(crate) struct Stencil {
    width: usize,
    height: usize,
    flags: Vec<TexelFlags>,
}

impl Stencil {
    pub(crate) fn new(width: u32, height: u32) -> MsdfResult<Self> {
        let (width, height) = (width as usize, height as usize);
        let len = width
            .checked_mul(height)
            .ok_or_else(|| MsdfError::allocation("stencil size overflows usize"))?;
        let mut flags = Vec::new();
        flags
            .try_reserve_exact(len)
            .map_err(|e| MsdfError::allocation(format!("stencil of {len} texels: {e}")))?;
        flags.resize(len, TexelFlags::empty());
        Ok(Self {
            width,
            height,
            flags,
        })
    }

    pub(crate) fn width(&self) -> usize {
        self.width
    }

    pub(crate) fn get(&self, x: usize, row: usize) -> TexelFlags {
        self.flags[row * self.width + x]
    }

    pub(crate) fn flags_mut(&mut self) -> &mut [TexelFlags] {
        &mut self.flags
    }

    fn mark(&mut self, x: i64, row: i64, flag: TexelFlags) {
        if x >= 0 && row >= 0 && (x as usize) < self.width && (row as usize) < self.height {
            self.flags[row as usize * self.width + x as usize] |= flag;
        }
    }

    /// Protect the four texels around every corner where the color changes.
    pub(crate) fn protect_corners(&mut self, shape: &Shape, transform: &SdfTransform, bitmap: &Bitmap) {
        let height = self.height as i64;
        for contour in shape.contours() {
            let Some(last) = contour.edges().last() else {
                continue;
            };
            let mut prev_color = last.color();
            for edge in contour.edges() {
                let common = prev_color & edge.color();
                prev_color = edge.color();
                // A corner only matters when at most one channel continues across it.
                if common.bits().count_ones() > 1 {
                    continue;
                }
                let p = transform.projection.project(edge.segment().start());
                let l = (p.x - 0.5).floor() as i64;
                let b = (p.y - 0.5).floor() as i64;
                for y in [b, b + 1] {
                    if y < 0 || y >= height {
                        continue;
                    }
                    let row = i64::from(bitmap.row_for_y(y as u32));
                    self.mark(l, row, TexelFlags::PROTECTED);
                    self.mark(l + 1, row, TexelFlags::PROTECTED);
                }
            }
        }
    }

    /// Protect texel pairs straddling the outline in the channels that carry it.
    pub(crate) fn protect_edges(&mut self, bitmap: &Bitmap, transform: &SdfTransform) {
        let (w, h) = (self.width, self.height);
        let h_radius = PROTECTION_RADIUS_TOLERANCE * transform.encoded_pixel_span(Vec2::new(1.0, 0.0));
        let v_radius = PROTECTION_RADIUS_TOLERANCE * transform.encoded_pixel_span(Vec2::new(0.0, 1.0));
        let d_radius = PROTECTION_RADIUS_TOLERANCE * transform.encoded_pixel_span(Vec2::new(1.0, 1.0));

        for row in 0..h {
            for x in 0..w.saturating_sub(1) {
                self.protect_pair(bitmap, (x, row), (x + 1, row), h_radius);
            }
        }
        for row in 0..h.saturating_sub(1) {
            for x in 0..w {
                self.protect_pair(bitmap, (x, row), (x, row + 1), v_radius);
            }
        }
        for row in 0..h.saturating_sub(1) {
            for x in 0..w.saturating_sub(1) {
                self.protect_pair(bitmap, (x, row), (x + 1, row + 1), d_radius);
                self.protect_pair(bitmap, (x + 1, row), (x, row + 1), d_radius);
            }
        }
    }

    fn protect_pair(&mut self, bitmap: &Bitmap, a: (usize, usize), b: (usize, usize), radius: f64) {
        let ta = bitmap.texel(a.0, a.1);
        let tb = bitmap.texel(b.0, b.1);
        let am = median(ta[0], ta[1], ta[2]);
        let bm = median(tb[0], tb[1], tb[2]);
        if f64::from((am - 0.5).abs() + (bm - 0.5).abs()) >= radius {
            return;
        }
        let mask = edge_between_texels(ta, tb);
        if holds_extreme_channel(ta, am, mask) {
            self.flags[a.1 * self.width + a.0] |= TexelFlags::PROTECTED;
        }
        if holds_extreme_channel(tb, bm, mask) {
            self.flags[b.1 * self.width + b.0] |= TexelFlags::PROTECTED;
        }
    }

    pub(crate) fn protect_all(&mut self) {
        for f in &mut self.flags {
            *f |= TexelFlags::PROTECTED;
        }
    }

    /// Flatten every ERROR texel's color channels to their median; returns the
    /// number of texels touched.
    pub(crate) fn apply(&self, bitmap: &mut Bitmap) -> usize {
        let channels = bitmap.channels();
        let mut repaired = 0;
        for (texel, flags) in bitmap.pixels_mut().chunks_exact_mut(channels).zip(&self.flags) {
            if flags.contains(TexelFlags::ERROR) {
                let m = median(texel[0], texel[1], texel[2]);
                texel[..3].fill(m);
                repaired += 1;
            }
        }
        repaired
    }
}

/// Channels in which the outline crosses between `a` and `b` while staying the
/// median of the interpolated color.
fn edge_between_texels(a: &[f32], b: &[f32]) -> EdgeColor {
    let mut mask = EdgeColor::BLACK;
    for (channel, color) in [EdgeColor::RED, EdgeColor::GREEN, EdgeColor::BLUE]
        .into_iter()
        .enumerate()
    {
        let t = f64::from(a[channel] - 0.5) / f64::from(a[channel] - b[channel]);
        if t > 0.0 && t < 1.0 {
            let c = [0, 1, 2].map(|i| mix_f32(a[i], b[i], t));
            if median(c[0], c[1], c[2]) == c[channel] {
                mask |= color;
            }
        }
    }
    mask
}

fn holds_extreme_channel(texel: &[f32], m: f32, mask: EdgeColor) -> bool {
    [EdgeColor::RED, EdgeColor::GREEN, EdgeColor::BLUE]
        .into_iter()
        .enumerate()
        .any(|(i, color)| mask.contains(color) && texel[i] != m)
}

#[cfg(test)]
#[path = "../../tests/unit/correction/stencil.rs"]
mod tests;
