use crate::foundation::error::{MsdfError, MsdfResult};
use crate::geometry::shape::Shape;

/// Boolean-geometry backend that merges overlapping contours into a
/// non-overlapping outline with the same filled area.
///
/// The crate ships no implementation; generation handles overlaps through
/// winding-aware distance combination instead.
pub trait OverlapResolver {
    /// Replace the contours of `shape` with an equivalent non-overlapping set.
    fn resolve(&self, shape: &mut Shape) -> MsdfResult<()>;
}

/// Whether a resolver is available to [`resolve_overlaps`].
pub fn has_overlap_resolver(resolver: Option<&dyn OverlapResolver>) -> bool {
    resolver.is_some()
}

/// Merge overlapping contours with `resolver`.
///
/// Fails with [`MsdfError::Unavailable`] and leaves the shape untouched when
/// no resolver is given.
pub fn resolve_overlaps(shape: &mut Shape, resolver: Option<&dyn OverlapResolver>) -> MsdfResult<()> {
    let Some(resolver) = resolver else {
        return Err(MsdfError::unavailable("no overlap resolver configured"));
    };
    let before = shape.contour_count();
    resolver.resolve(shape)?;
    tracing::debug!(before, after = shape.contour_count(), "overlaps resolved");
    Ok(())
}

#[cfg(test)]
#[path = "../../tests/unit/collab/overlap.rs"]
mod tests;
