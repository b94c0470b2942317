//! Configuration for the depth-slice extractor.

use serde::{Deserialize, Serialize};

/// Reference radius used to turn depths into radii.
pub const EARTH_RADIUS_KM: f64 = 6371.0;

/// Configuration for the depth-slice extractor.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ExtractorConfig {
    /// Radius that depth is measured from, in kilometres.
    pub earth_radius_km: f64,

    /// Read and slice boxes on the rayon thread pool.
    pub parallel: bool,

    /// Log and record failed boxes instead of aborting the extraction.
    pub skip_failed_boxes: bool,
}

impl Default for ExtractorConfig {
    fn default() -> Self {
        Self {
            earth_radius_km: EARTH_RADIUS_KM,
            parallel: false,
            skip_failed_boxes: false,
        }
    }
}

impl ExtractorConfig {
    /// Load configuration from environment variables.
    pub fn from_env() -> Self {
        let mut config = Self::default();

        if let Ok(val) = std::env::var("SEM_EARTH_RADIUS_KM") {
            if let Ok(radius) = val.parse() {
                config.earth_radius_km = radius;
            }
        }

        if let Ok(val) = std::env::var("SEM_PARALLEL") {
            config.parallel = val.to_lowercase() == "true" || val == "1";
        }

        if let Ok(val) = std::env::var("SEM_SKIP_FAILED_BOXES") {
            config.skip_failed_boxes = val.to_lowercase() == "true" || val == "1";
        }

        config
    }

    /// Validate the configuration.
    pub fn validate(&self) -> Result<(), String> {
        if !self.earth_radius_km.is_finite() || self.earth_radius_km <= 0.0 {
            return Err(format!(
                "earth_radius_km must be a positive number, got {}",
                self.earth_radius_km
            ));
        }

        Ok(())
    }

    /// Radius in metres at `depth_km` below the reference radius.
    pub fn radius_for_depth(&self, depth_km: f64) -> f64 {
        1000.0 * (self.earth_radius_km - depth_km)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = ExtractorConfig::default();
        assert_eq!(config.earth_radius_km, 6371.0);
        assert!(!config.parallel);
        assert!(!config.skip_failed_boxes);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_config_validation() {
        let mut config = ExtractorConfig::default();
        config.earth_radius_km = 0.0;
        assert!(config.validate().is_err());

        config.earth_radius_km = f64::NAN;
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_radius_for_depth() {
        let config = ExtractorConfig::default();
        assert_eq!(config.radius_for_depth(0.0), 6_371_000.0);
        assert_eq!(config.radius_for_depth(100.0), 6_271_000.0);
        assert_eq!(config.radius_for_depth(-2.0), 6_373_000.0);
    }
}
