use rayon::prelude::*;

use crate::correction::correct_errors;
use crate::distance::finder::ShapeDistanceFinder;
use crate::distance::selectors::{
    DistanceValue, EdgeSelector, MultiAndTrueDistance, MultiAndTrueDistanceSelector,
    MultiDistance, MultiDistanceSelector, PerpendicularDistanceSelector, TrueDistanceSelector,
};
use crate::foundation::core::{DistanceRange, Point, SdfTransform, YAxisOrientation};
use crate::foundation::error::{MsdfError, MsdfResult};
use crate::generate::bitmap::Bitmap;
use crate::generate::config::{GeneratorConfig, MsdfGeneratorConfig};
use crate::generate::sign_correction::distance_sign_correction;
use crate::geometry::shape::Shape;

/// Distance result that knows how to land in a pixel's channels.
trait ChannelWrite: DistanceValue {
    const CHANNELS: usize;
    fn write(&self, range: DistanceRange, out: &mut [f32]);
}

impl ChannelWrite for f64 {
    const CHANNELS: usize = 1;

    fn write(&self, range: DistanceRange, out: &mut [f32]) {
        out[0] = encode(range, *self);
    }
}

impl ChannelWrite for MultiDistance {
    const CHANNELS: usize = 3;

    fn write(&self, range: DistanceRange, out: &mut [f32]) {
        out[0] = encode(range, self.r);
        out[1] = encode(range, self.g);
        out[2] = encode(range, self.b);
    }
}

impl ChannelWrite for MultiAndTrueDistance {
    const CHANNELS: usize = 4;

    fn write(&self, range: DistanceRange, out: &mut [f32]) {
        out[0] = encode(range, self.r);
        out[1] = encode(range, self.g);
        out[2] = encode(range, self.b);
        out[3] = encode(range, self.a);
    }
}

/// Encoded value, saturated to the finite `f32` range. Channels that saw no
/// edge at all carry the far sentinel and come out as a large negative value.
fn encode(range: DistanceRange, distance: f64) -> f32 {
    range
        .encode(distance)
        .clamp(f64::from(f32::MIN), f64::from(f32::MAX)) as f32
}

/// Conventional single-channel true signed distance field.
#[tracing::instrument(skip(shape, transform, config), fields(edges = shape.edge_count()))]
pub fn generate_sdf(
    shape: &Shape,
    width: u32,
    height: u32,
    transform: &SdfTransform,
    config: &GeneratorConfig,
) -> MsdfResult<Bitmap> {
    let mut bitmap = rasterize::<TrueDistanceSelector>(shape, width, height, transform, config)?;
    finish(&mut bitmap, shape, transform, config);
    Ok(bitmap)
}

/// Single-channel pseudo-distance field: distances past an edge's endpoints
/// are measured along the edge's extension where that is the nearer reading.
#[tracing::instrument(skip(shape, transform, config), fields(edges = shape.edge_count()))]
pub fn generate_psdf(
    shape: &Shape,
    width: u32,
    height: u32,
    transform: &SdfTransform,
    config: &GeneratorConfig,
) -> MsdfResult<Bitmap> {
    let mut bitmap =
        rasterize::<PerpendicularDistanceSelector>(shape, width, height, transform, config)?;
    finish(&mut bitmap, shape, transform, config);
    Ok(bitmap)
}

/// Three-channel multi-signed distance field. Edges must have been colored.
#[tracing::instrument(skip(shape, transform, config), fields(edges = shape.edge_count()))]
pub fn generate_msdf(
    shape: &Shape,
    width: u32,
    height: u32,
    transform: &SdfTransform,
    config: &MsdfGeneratorConfig,
) -> MsdfResult<Bitmap> {
    check_multi_channel(shape, config)?;
    let mut bitmap =
        rasterize::<MultiDistanceSelector>(shape, width, height, transform, &config.generator)?;
    finish(&mut bitmap, shape, transform, &config.generator);
    correct_errors(&mut bitmap, shape, transform, config)?;
    Ok(bitmap)
}

/// Four-channel field: MSDF in RGB plus the true distance in alpha.
#[tracing::instrument(skip(shape, transform, config), fields(edges = shape.edge_count()))]
pub fn generate_mtsdf(
    shape: &Shape,
    width: u32,
    height: u32,
    transform: &SdfTransform,
    config: &MsdfGeneratorConfig,
) -> MsdfResult<Bitmap> {
    check_multi_channel(shape, config)?;
    let mut bitmap = rasterize::<MultiAndTrueDistanceSelector>(
        shape,
        width,
        height,
        transform,
        &config.generator,
    )?;
    finish(&mut bitmap, shape, transform, &config.generator);
    correct_errors(&mut bitmap, shape, transform, config)?;
    Ok(bitmap)
}

fn check_multi_channel(shape: &Shape, config: &MsdfGeneratorConfig) -> MsdfResult<()> {
    config.validate()?;
    if shape.has_black_edges() {
        tracing::warn!("shape has uncolored edges; run edge coloring before multi-channel generation");
        return Err(MsdfError::invalid_argument(
            "multi-channel generation needs colored edges (found BLACK)",
        ));
    }
    Ok(())
}

fn finish(bitmap: &mut Bitmap, shape: &Shape, transform: &SdfTransform, config: &GeneratorConfig) {
    if let Some(rule) = config.fill_rule {
        distance_sign_correction(bitmap, shape, &transform.projection, rule);
    }
}

/// Sample the shape at every pixel center with selector `S`.
fn rasterize<S>(
    shape: &Shape,
    width: u32,
    height: u32,
    transform: &SdfTransform,
    config: &GeneratorConfig,
) -> MsdfResult<Bitmap>
where
    S: EdgeSelector + Send,
    S::Distance: ChannelWrite,
{
    let pool = config.threading.build_pool()?;
    let mut bitmap = Bitmap::new(width, height, S::Distance::CHANNELS, shape.y_axis())?;
    let row_len = bitmap.row_len();
    let y_axis = bitmap.y_axis();
    let projection = transform.projection;
    let range = transform.range;
    let overlap = config.overlap_support;

    let fill_row = |finder: &mut ShapeDistanceFinder<'_, S>, row: usize, out: &mut [f32]| {
        let y = match y_axis {
            YAxisOrientation::Upward => row,
            YAxisOrientation::Downward => height as usize - 1 - row,
        };
        let py = projection.unproject_y(y as f64 + 0.5);
        for (x, px) in out.chunks_exact_mut(S::Distance::CHANNELS).enumerate() {
            let p = Point::new(projection.unproject_x(x as f64 + 0.5), py);
            finder.distance(p).write(range, px);
        }
    };

    match pool {
        Some(pool) => pool.install(|| {
            bitmap
                .pixels_mut()
                .par_chunks_mut(row_len)
                .enumerate()
                .for_each_init(
                    || ShapeDistanceFinder::<S>::new(shape, overlap),
                    |finder, (row, out)| fill_row(finder, row, out),
                );
        }),
        None => {
            let mut finder = ShapeDistanceFinder::<S>::new(shape, overlap);
            for (row, out) in bitmap.pixels_mut().chunks_mut(row_len).enumerate() {
                fill_row(&mut finder, row, out);
            }
        }
    }
    tracing::debug!(width, height, channels = S::Distance::CHANNELS, "rasterized");
    Ok(bitmap)
}

#[cfg(test)]
#[path = "../../tests/unit/generate/raster.rs"]
mod tests;
