//! Error types for depth-slice extraction.

use field_parser::FieldError;
use sem_common::SemError;
use thiserror::Error;

/// Errors that can occur while extracting a depth slice.
#[derive(Error, Debug)]
pub enum SliceError {
    /// No processor box covers the requested depth.
    #[error("no processor box covers depth {depth_km} km (radius {radius_m} m)")]
    NoData { depth_km: f64, radius_m: f64 },

    /// Reading or slicing one box failed.
    #[error("processor box {box_index}: {source}")]
    Box {
        box_index: usize,
        #[source]
        source: FieldError,
    },

    /// Every contributing slice holds only NaN values.
    #[error("no finite values at depth {depth_km} km")]
    NoValidValues { depth_km: f64 },

    /// Every intersecting box failed and failures were being skipped.
    #[error("all {count} intersecting processor boxes failed")]
    AllBoxesFailed { count: usize },

    /// Request-level field error, such as an unknown component.
    #[error(transparent)]
    Field(#[from] FieldError),

    /// Invalid grid description.
    #[error(transparent)]
    Grid(#[from] SemError),

    /// Invalid extractor configuration or request.
    #[error("configuration error: {0}")]
    Config(String),
}

impl SliceError {
    /// Create a Config error.
    pub fn config(msg: impl Into<String>) -> Self {
        Self::Config(msg.into())
    }

    /// Processor box the error is attributed to, if any.
    pub fn box_index(&self) -> Option<usize> {
        match self {
            Self::Box { box_index, .. } => Some(*box_index),
            _ => None,
        }
    }
}

/// Result type for slice extraction.
pub type Result<T> = std::result::Result<T, SliceError>;
