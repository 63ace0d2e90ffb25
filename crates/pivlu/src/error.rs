//! Error types for factorization and solve operations.

use thiserror::Error;

/// Errors that can occur when factoring or solving.
///
/// Only precondition violations are errors. An exactly singular matrix
/// still factors; see [`crate::LuStatus`].
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum LuError {
    /// The input to a square-only operation was rectangular.
    #[error("Matrix must be square, got {nrows}x{ncols}")]
    NotSquare { nrows: usize, ncols: usize },

    /// Dimension mismatch.
    #[error("Dimension mismatch: {0}")]
    DimensionMismatch(String),

    /// Blocking or tiling parameters failed validation.
    #[error("Invalid parameters: {0}")]
    InvalidParams(&'static str),
}

/// Result type for LU operations.
pub type Result<T> = std::result::Result<T, LuError>;
