//! # Errors
//! Errors emitted by photometry_core

/// photometry_core specific result.
pub type PhotometryResult<T> = Result<T, Error>;

/// Possible Errors which may be raised by this crate.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum Error {
    /// Phase function model index was not one of the known models (1 or 2).
    #[error("Phase function index must be 1 or 2, got {0}.")]
    InvalidIndex(i64),

    /// Input to a trigonometric or logarithmic term was outside of its domain.
    #[error("{0}")]
    DomainError(String),

    /// A geometry vector had zero length.
    #[error("{0}")]
    DivisionByZero(String),

    /// Input or variable exceeded expected or allowed bounds.
    #[error("{0}")]
    ValueError(String),
}
