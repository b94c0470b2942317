//! Error types for field record decoding.

use std::path::PathBuf;

use sem_common::{FieldType, SemError};
use thiserror::Error;

/// Result type for field parser operations.
pub type FieldResult<T> = Result<T, FieldError>;

/// Error types for field decoding.
#[derive(Error, Debug)]
pub enum FieldError {
    /// Expected record file is absent
    #[error("field file not found: {}", path.display())]
    NotFound { path: PathBuf },

    /// Byte length, marker or shape mismatch
    #[error("invalid record format: {0}")]
    Format(String),

    /// Component name not valid for the active field type
    #[error("unknown component '{component}' for field type {field_type}")]
    UnknownComponent {
        component: String,
        field_type: FieldType,
    },

    /// File I/O error other than a missing file
    #[error("I/O error reading {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Invalid grid description
    #[error(transparent)]
    Grid(#[from] SemError),

    /// Invalid reader configuration
    #[error("configuration error: {0}")]
    Config(String),
}

impl FieldError {
    /// Create a Format error.
    pub fn format(msg: impl Into<String>) -> Self {
        Self::Format(msg.into())
    }

    /// Create an UnknownComponent error.
    pub fn unknown_component(component: impl Into<String>, field_type: FieldType) -> Self {
        Self::UnknownComponent {
            component: component.into(),
            field_type,
        }
    }

    /// Build the error for a failed read of `path`.
    pub fn from_io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        let path = path.into();
        if source.kind() == std::io::ErrorKind::NotFound {
            Self::NotFound { path }
        } else {
            Self::Io { path, source }
        }
    }
}
