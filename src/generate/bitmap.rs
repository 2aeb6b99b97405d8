use image::{GrayImage, RgbImage, RgbaImage};

use crate::foundation::core::YAxisOrientation;
use crate::foundation::error::{MsdfError, MsdfResult};
use crate::foundation::math::median;
use crate::generate::quantize::{quantize, quantize_pixels};

/// Dense float raster produced by the generators.
///
/// Pixels are stored row-major with `channels` interleaved floats each, bottom
/// row of the picture first. For [`YAxisOrientation::Upward`] shapes row 0 is
/// pixel row 0; a [`YAxisOrientation::Downward`] shape's y grows toward the
/// bottom of the picture, so its pixel rows are stored in reverse. The image
/// exports reverse the stored rows so they always come out top row first.
#[derive(Clone, Debug, PartialEq)]
pub struct Bitmap {
    width: u32,
    height: u32,
    channels: usize,
    y_axis: YAxisOrientation,
    pixels: Vec<f32>,
}

impl Bitmap {
    /// Zero-filled bitmap. Fails without allocating on zero dimensions or
    /// channels, and reports allocation failure instead of aborting.
    pub fn new(width: u32, height: u32, channels: usize, y_axis: YAxisOrientation) -> MsdfResult<Self> {
        if width == 0 || height == 0 {
            return Err(MsdfError::invalid_argument(format!(
                "bitmap dimensions must be > 0 (got {width}x{height})"
            )));
        }
        if !(1..=4).contains(&channels) {
            return Err(MsdfError::invalid_argument(format!(
                "bitmap channel count must be 1..=4 (got {channels})"
            )));
        }
        let len = (width as usize)
            .checked_mul(height as usize)
            .and_then(|n| n.checked_mul(channels))
            .ok_or_else(|| MsdfError::allocation("bitmap size overflows usize"))?;
        let mut pixels = Vec::new();
        pixels
            .try_reserve_exact(len)
            .map_err(|e| MsdfError::allocation(format!("cannot allocate {len} floats: {e}")))?;
        pixels.resize(len, 0.0);
        Ok(Self {
            width,
            height,
            channels,
            y_axis,
            pixels,
        })
    }

    /// Width in pixels.
    pub fn width(&self) -> u32 {
        self.width
    }

    /// Height in pixels.
    pub fn height(&self) -> u32 {
        self.height
    }

    /// Floats per pixel.
    pub fn channels(&self) -> usize {
        self.channels
    }

    /// Y axis of the shape this bitmap was generated from.
    pub fn y_axis(&self) -> YAxisOrientation {
        self.y_axis
    }

    /// Raw interleaved pixel data.
    pub fn pixels(&self) -> &[f32] {
        &self.pixels
    }

    /// Mutable raw pixel data.
    pub fn pixels_mut(&mut self) -> &mut [f32] {
        &mut self.pixels
    }

    /// Take ownership of the pixel buffer.
    pub fn into_pixels(self) -> Vec<f32> {
        self.pixels
    }

    fn offset(&self, x: u32, row: u32) -> Option<usize> {
        (x < self.width && row < self.height)
            .then(|| (row as usize * self.width as usize + x as usize) * self.channels)
    }

    /// Channels of the pixel at column `x`, stored row `row`.
    pub fn pixel(&self, x: u32, row: u32) -> Option<&[f32]> {
        let at = self.offset(x, row)?;
        Some(&self.pixels[at..at + self.channels])
    }

    /// Mutable channels of one pixel.
    pub fn pixel_mut(&mut self, x: u32, row: u32) -> Option<&mut [f32]> {
        let at = self.offset(x, row)?;
        let n = self.channels;
        Some(&mut self.pixels[at..at + n])
    }

    /// Reconstructed single distance value: the median of the color channels
    /// for multi-channel bitmaps, the value itself otherwise.
    pub fn sample_median(&self, x: u32, row: u32) -> Option<f32> {
        let px = self.pixel(x, row)?;
        Some(if px.len() >= 3 {
            median(px[0], px[1], px[2])
        } else {
            px[0]
        })
    }

    /// Stored row index of pixel-space row `y`.
    pub(crate) fn row_for_y(&self, y: u32) -> u32 {
        match self.y_axis {
            YAxisOrientation::Upward => y,
            YAxisOrientation::Downward => self.height - 1 - y,
        }
    }

    pub(crate) fn row_len(&self) -> usize {
        self.width as usize * self.channels
    }

    /// Channels of an in-bounds texel in storage coordinates.
    pub(crate) fn texel(&self, x: usize, row: usize) -> &[f32] {
        let at = (row * self.width as usize + x) * self.channels;
        &self.pixels[at..at + self.channels]
    }

    /// Quantize every channel to bytes in storage order.
    pub fn to_bytes(&self, edge_value: u8) -> Vec<u8> {
        quantize_pixels(&self.pixels, edge_value)
    }

    fn export<const N: usize>(&self, edge_value: u8, map: impl Fn(&[f32]) -> [f32; N]) -> Vec<u8> {
        let mut out = Vec::with_capacity(self.width as usize * self.height as usize * N);
        for row in self.pixels.chunks_exact(self.row_len()).rev() {
            for px in row.chunks_exact(self.channels) {
                out.extend(map(px).iter().map(|&v| quantize(v, edge_value)));
            }
        }
        out
    }

    /// Grayscale image of the reconstructed distance, top row first.
    pub fn to_luma8(&self, edge_value: u8) -> MsdfResult<GrayImage> {
        let data = self.export(edge_value, |px| {
            [if px.len() >= 3 { median(px[0], px[1], px[2]) } else { px[0] }]
        });
        GrayImage::from_raw(self.width, self.height, data)
            .ok_or_else(|| anyhow::anyhow!("luma buffer does not match {}x{}", self.width, self.height).into())
    }

    /// RGB image; single-channel bitmaps are replicated into all three.
    pub fn to_rgb8(&self, edge_value: u8) -> MsdfResult<RgbImage> {
        let data = self.export(edge_value, |px| {
            if px.len() >= 3 {
                [px[0], px[1], px[2]]
            } else {
                [px[0]; 3]
            }
        });
        RgbImage::from_raw(self.width, self.height, data)
            .ok_or_else(|| anyhow::anyhow!("rgb buffer does not match {}x{}", self.width, self.height).into())
    }

    /// RGBA image. Alpha carries the fourth channel when present and is
    /// opaque otherwise.
    pub fn to_rgba8(&self, edge_value: u8) -> MsdfResult<RgbaImage> {
        let data = self.export(edge_value, |px| match px.len() {
            4 => [px[0], px[1], px[2], px[3]],
            3 => [px[0], px[1], px[2], 1.0],
            _ => [px[0], px[0], px[0], 1.0],
        });
        RgbaImage::from_raw(self.width, self.height, data)
            .ok_or_else(|| anyhow::anyhow!("rgba buffer does not match {}x{}", self.width, self.height).into())
    }
}

#[cfg(test)]
#[path = "../../tests/unit/generate/bitmap.rs"]
mod tests;
