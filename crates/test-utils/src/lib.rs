//! Shared test utilities for the sem-slicer workspace.
//!
//! This crate provides common testing infrastructure including:
//! - Synthetic setup descriptors
//! - Framed binary field records with known values
//! - Temporary snapshot directories
//! - Approximate float assertions
//!
//! # Usage
//!
//! Add to your crate's `Cargo.toml`:
//!
//! ```toml
//! [dev-dependencies]
//! test-utils = { path = "../test-utils" }
//! ```
//!
//! Then build a dataset in your tests:
//!
//! ```ignore
//! use test_utils::{SetupSpec, SyntheticDataset};
//!
//! let spec = SetupSpec::small();
//! let dataset = SyntheticDataset::new();
//! dataset.write_setup(&spec);
//! dataset.write_model_field("rhoinv", 0, &vec![0.5; spec.values_per_box()]);
//! ```

pub mod dataset;
pub mod fixtures;
pub mod generators;

// Re-export commonly used items at the crate root
pub use dataset::*;
pub use fixtures::*;
pub use generators::*;

/// Macro for approximate floating-point equality assertions.
///
/// # Usage
///
/// ```ignore
/// use test_utils::assert_approx_eq;
///
/// assert_approx_eq!(1.0001_f64, 1.0_f64, 0.001_f64); // passes
/// assert_approx_eq!(1.1_f32, 1.0_f32, 0.001_f32);    // fails
/// ```
#[macro_export]
macro_rules! assert_approx_eq {
    ($left:expr, $right:expr, $epsilon:expr) => {{
        let left: f64 = $left as f64;
        let right: f64 = $right as f64;
        let epsilon: f64 = $epsilon as f64;
        let diff = (left - right).abs();
        if diff > epsilon {
            panic!(
                "assertion failed: `(left ≈ right)`\n  left: `{:?}`,\n right: `{:?}`,\n  diff: `{:?}` > epsilon `{:?}`",
                left, right, diff, epsilon
            );
        }
    }};
}
