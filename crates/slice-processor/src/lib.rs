//! Depth-slice extraction for spectral-element snapshots.
//!
//! Given a depth below the reference radius, this crate finds every
//! processor box whose radial range contains it, reads that box's field,
//! cuts it at the nearest radial node layer and returns the per-box slices
//! with lon/lat meshes and the global value range, ready for a map renderer.
//!
//! # Architecture
//!
//! ```text
//! SliceRequest { component, depth_km, iteration, display_bounds }
//!      │
//!      ▼
//! DepthSliceExtractor::extract
//!      │
//!      ├─► depth ──► radius = 1000 * (R - depth)
//!      │
//!      ├─► GridGeometry::boxes_at_radius (inclusive z range) ──► NoData
//!      │
//!      ├─► per box (sequential or rayon):
//!      │         ├─► BinaryFieldReader::read_component
//!      │         ├─► nearest radial layer (lowest index on ties)
//!      │         └─► slice + lon/lat mesh + local min/max
//!      │
//!      └─► merge extrema ──► DepthSlice
//! ```
//!
//! # Example
//!
//! ```ignore
//! use field_parser::ReaderConfig;
//! use sem_common::{FieldType, Setup};
//! use slice_processor::{DepthSliceExtractor, ExtractorConfig, SliceRequest};
//!
//! let setup = Setup::from_path("../INPUT/setup")?;
//! let extractor = DepthSliceExtractor::from_setup(
//!     &setup,
//!     ReaderConfig::new("../MODELS/MODELS_3D", FieldType::EarthModel),
//!     ExtractorConfig::default(),
//! )?;
//!
//! let slice = extractor.extract(&SliceRequest::new("vsv", 150.0))?;
//! println!("{}: {} .. {}", slice.title(), slice.min, slice.max);
//! ```

pub mod config;
pub mod error;
pub mod extractor;
pub mod types;

// Re-export commonly used types at crate root
pub use config::{ExtractorConfig, EARTH_RADIUS_KM};
pub use error::{Result, SliceError};
pub use extractor::DepthSliceExtractor;
pub use types::{lon_lat_mesh, BoxFailure, BoxSlice, DepthSlice, SliceRequest};
