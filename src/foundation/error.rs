/// Convenience result type used across the crate.
pub type MsdfResult<T> = Result<T, MsdfError>;

/// Top-level error taxonomy used by shape, coloring and generation APIs.
#[derive(thiserror::Error, Debug)]
pub enum MsdfError {
    /// A caller-supplied argument was rejected before any work was done
    /// (out-of-range contour index, non-positive dimensions, bad config values).
    #[error("invalid argument: {0}")]
    InvalidArgument(String),

    /// The outline is not usable as given (unclosed contour, degenerate edge).
    #[error("geometry error: {0}")]
    Geometry(String),

    /// An output buffer could not be obtained.
    #[error("allocation error: {0}")]
    Allocation(String),

    /// Errors reported by a glyph source.
    #[error("font error: {0}")]
    Font(String),

    /// An optional collaborator capability is not present.
    #[error("capability unavailable: {0}")]
    Unavailable(String),

    /// Wrapped lower-level error from dependencies.
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl MsdfError {
    /// Build a [`MsdfError::InvalidArgument`] value.
    pub fn invalid_argument(msg: impl Into<String>) -> Self {
        Self::InvalidArgument(msg.into())
    }

    /// Build a [`MsdfError::Geometry`] value.
    pub fn geometry(msg: impl Into<String>) -> Self {
        Self::Geometry(msg.into())
    }

    /// Build a [`MsdfError::Allocation`] value.
    pub fn allocation(msg: impl Into<String>) -> Self {
        Self::Allocation(msg.into())
    }

    /// Build a [`MsdfError::Font`] value.
    pub fn font(msg: impl Into<String>) -> Self {
        Self::Font(msg.into())
    }

    /// Build a [`MsdfError::Unavailable`] value.
    pub fn unavailable(msg: impl Into<String>) -> Self {
        Self::Unavailable(msg.into())
    }
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/error.rs"]
mod tests;
