//! Error types for grid configuration and geometry.

use thiserror::Error;

/// Result type alias using SemError.
pub type SemResult<T> = Result<T, SemError>;

/// Errors raised while describing or building the simulation grid.
#[derive(Debug, Error)]
pub enum SemError {
    /// Malformed or inconsistent domain/discretization input.
    #[error("invalid configuration: {0}")]
    InvalidConfiguration(String),

    /// Polynomial degree outside the GLL lookup table.
    #[error("unsupported polynomial degree {degree} (supported: 2..=7)")]
    UnsupportedDegree { degree: usize },
}

impl SemError {
    /// Create an InvalidConfiguration error.
    pub fn invalid_config(msg: impl Into<String>) -> Self {
        Self::InvalidConfiguration(msg.into())
    }
}
