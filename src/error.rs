use thiserror::Error;

use crate::geometry::ShapeKind;

/// Top-level error type for the plinth intersection engine.
#[derive(Debug, Error)]
pub enum PlinthError {
    #[error(transparent)]
    Geometry(#[from] GeometryError),

    #[error(transparent)]
    Intersect(#[from] IntersectError),
}

/// Errors related to malformed input geometry.
///
/// Degenerate-but-valid configurations (zero radii, parallel lines, ...) are
/// not errors; they are reported through result flags.
#[derive(Debug, Error)]
pub enum GeometryError {
    #[error("non-finite coordinate in {0}")]
    NonFinite(&'static str),

    #[error("degenerate geometry: {0}")]
    Degenerate(String),
}

/// Errors related to the shape-pair dispatch.
#[derive(Debug, Error)]
pub enum IntersectError {
    #[error("intersection of {a:?} with {b:?} is not supported")]
    Unsupported { a: ShapeKind, b: ShapeKind },
}

/// Convenience type alias for results using [`PlinthError`].
pub type Result<T> = std::result::Result<T, PlinthError>;
