//! Configuration for the field reader.

use std::path::PathBuf;

use sem_common::FieldType;
use serde::{Deserialize, Serialize};

/// Where and how to read field records.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReaderConfig {
    /// Directory holding the per-box record files.
    pub directory: PathBuf,

    /// Kind of field stored in the directory.
    pub field_type: FieldType,

    /// Require both record markers to equal the payload byte count.
    pub verify_markers: bool,
}

impl Default for ReaderConfig {
    fn default() -> Self {
        Self {
            directory: PathBuf::from("."),
            field_type: FieldType::EarthModel,
            verify_markers: true,
        }
    }
}

impl ReaderConfig {
    /// Reader configuration for `directory` with default options.
    pub fn new(directory: impl Into<PathBuf>, field_type: FieldType) -> Self {
        Self {
            directory: directory.into(),
            field_type,
            ..Default::default()
        }
    }

    /// Load configuration from environment variables.
    pub fn from_env() -> Self {
        let mut config = Self::default();

        if let Ok(val) = std::env::var("SEM_FIELD_DIR") {
            config.directory = PathBuf::from(val);
        }

        if let Ok(val) = std::env::var("SEM_FIELD_TYPE") {
            if let Ok(field_type) = val.parse() {
                config.field_type = field_type;
            }
        }

        if let Ok(val) = std::env::var("SEM_VERIFY_MARKERS") {
            config.verify_markers = val.to_lowercase() == "true" || val == "1";
        }

        config
    }

    /// Validate the configuration.
    pub fn validate(&self) -> Result<(), String> {
        if self.directory.as_os_str().is_empty() {
            return Err("field directory must not be empty".to_string());
        }

        if !self.directory.is_dir() {
            return Err(format!(
                "field directory {} does not exist",
                self.directory.display()
            ));
        }

        Ok(())
    }
}
