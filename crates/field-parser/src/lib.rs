//! Decoder for binary field records of spectral-element snapshots.
//!
//! Each processor box writes one unformatted record per component (and per
//! iteration, for velocity snapshots). This crate strips the record framing,
//! reorders the element-block layout into physical node order and evaluates
//! derived material quantities.
//!
//! # Architecture
//!
//! ```text
//! BinaryFieldReader::read("vp", box, iteration)
//!      │
//!      ├─► resolve name against FieldType ──► UnknownComponent
//!      │
//!      ├─► for each primitive (lambda, mu, rhoinv):
//!      │         ├─► fs::read("<name><box>")   ──► NotFound / Io
//!      │         ├─► decode_record              ──► Format
//!      │         └─► BoxLayout::to_physical
//!      │
//!      └─► derived::evaluate ──► FieldCube
//! ```
//!
//! # Example
//!
//! ```ignore
//! use field_parser::{BinaryFieldReader, ReaderConfig};
//! use sem_common::{FieldType, Setup};
//!
//! let setup = Setup::from_path("../INPUT/setup")?;
//! let config = ReaderConfig::new("../MODELS/MODELS_3D", FieldType::EarthModel);
//! let reader = BinaryFieldReader::new(config, &setup.discretization)?;
//!
//! let cube = reader.read("vsv", 3, 0)?;
//! let layer = cube.radial_slice(0);
//! ```

pub mod config;
pub mod derived;
pub mod error;
pub mod layout;
pub mod naming;
pub mod reader;
pub mod record;

pub use config::ReaderConfig;
pub use error::{FieldError, FieldResult};
pub use layout::BoxLayout;
pub use naming::field_file_name;
pub use reader::{BinaryFieldReader, FieldCube};
pub use record::decode_record;
