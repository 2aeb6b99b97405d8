use crate::foundation::error::{MsdfError, MsdfResult};
use crate::geometry::scanline::FillRule;

/// Artifact repair strategy for multi-channel output.
#[derive(
    Clone, Copy, Debug, Default, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize,
)]
pub enum ErrorCorrectionMode {
    /// Leave the bitmap as sampled.
    Disabled,
    /// Repair every detected artifact.
    Indiscriminate,
    /// Repair artifacts, but keep corners and edges whose channels are needed
    /// for a sharp outline unless the repair is clearly an improvement.
    #[default]
    EdgePriority,
    /// Only repair texels away from the outline.
    EdgeOnly,
}

/// When the repair pass measures the true shape distance to confirm a
/// suspected artifact.
#[derive(
    Clone, Copy, Debug, Default, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize,
)]
pub enum DistanceCheckMode {
    /// Trust the bitmap alone.
    Never,
    /// Measure only for texels near the outline.
    #[default]
    AtEdge,
    /// Measure for every suspected texel.
    Always,
}

/// Settings of the multi-channel artifact repair pass.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct ErrorCorrectionConfig {
    /// Repair strategy.
    pub mode: ErrorCorrectionMode,
    /// Shape-distance confirmation policy.
    pub distance_check: DistanceCheckMode,
    /// How far an interpolated median may stray from the expected value,
    /// relative to the change across one texel, before it counts as an artifact.
    pub min_deviation_ratio: f64,
    /// How much closer to the true distance a repair must bring a texel,
    /// relative to the sampled value, before a confirmed artifact is repaired.
    pub min_improve_ratio: f64,
}

impl ErrorCorrectionConfig {
    /// Default deviation and improvement ratio.
    pub const DEFAULT_RATIO: f64 = 10.0 / 9.0;

    pub(crate) fn validate(&self) -> MsdfResult<()> {
        for (name, v) in [
            ("min_deviation_ratio", self.min_deviation_ratio),
            ("min_improve_ratio", self.min_improve_ratio),
        ] {
            if !v.is_finite() || v <= 0.0 {
                return Err(MsdfError::invalid_argument(format!(
                    "error correction {name} must be finite and > 0"
                )));
            }
        }
        Ok(())
    }
}

impl Default for ErrorCorrectionConfig {
    fn default() -> Self {
        Self {
            mode: ErrorCorrectionMode::EdgePriority,
            distance_check: DistanceCheckMode::AtEdge,
            min_deviation_ratio: Self::DEFAULT_RATIO,
            min_improve_ratio: Self::DEFAULT_RATIO,
        }
    }
}

/// Row scheduling for generation and artifact detection.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct Threading {
    /// Process rows on a rayon pool when `true`.
    pub parallel: bool,
    /// Optional explicit worker count; the global pool is sized by rayon otherwise.
    pub threads: Option<usize>,
}

impl Threading {
    /// Sequential processing.
    pub fn sequential() -> Self {
        Self::default()
    }

    /// Parallel processing on a pool with rayon's default size.
    pub fn parallel() -> Self {
        Self {
            parallel: true,
            threads: None,
        }
    }

    pub(crate) fn validate(&self) -> MsdfResult<()> {
        if let Some(n) = self.threads
            && n == 0
        {
            return Err(MsdfError::invalid_argument(
                "threading 'threads' must be >= 1 when set",
            ));
        }
        Ok(())
    }

    /// Pool for parallel work, or `None` for sequential processing.
    pub(crate) fn build_pool(&self) -> MsdfResult<Option<rayon::ThreadPool>> {
        self.validate()?;
        if !self.parallel {
            return Ok(None);
        }
        let mut builder = rayon::ThreadPoolBuilder::new();
        if let Some(n) = self.threads {
            builder = builder.num_threads(n);
        }
        builder
            .build()
            .map(Some)
            .map_err(|e| anyhow::anyhow!("failed to build rayon thread pool: {e}").into())
    }
}

/// Settings shared by every generator.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct GeneratorConfig {
    /// Combine contours by winding so overlapping contours do not carve
    /// into each other.
    pub overlap_support: bool,
    /// When set, a scanline pass forces every pixel's inside/outside status
    /// to agree with this fill rule, independent of contour orientation.
    /// Defaults to nonzero; `None` trusts contour direction alone.
    pub fill_rule: Option<FillRule>,
    /// Row scheduling.
    pub threading: Threading,
}

impl Default for GeneratorConfig {
    fn default() -> Self {
        Self {
            overlap_support: true,
            fill_rule: Some(FillRule::NonZero),
            threading: Threading::default(),
        }
    }
}

/// Settings for the multi-channel generators.
#[derive(Clone, Copy, Debug, Default, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct MsdfGeneratorConfig {
    /// Shared generator settings.
    pub generator: GeneratorConfig,
    /// Artifact repair settings.
    pub error_correction: ErrorCorrectionConfig,
}

impl MsdfGeneratorConfig {
    pub(crate) fn validate(&self) -> MsdfResult<()> {
        self.generator.threading.validate()?;
        self.error_correction.validate()
    }
}

#[cfg(test)]
#[path = "../../tests/unit/generate/config.rs"]
mod tests;
