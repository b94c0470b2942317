//! Per-box field reader.
//!
//! Every call reads from disk. Nothing is cached between requests: a cube is
//! built, handed to the caller and dropped once sliced.

use std::path::PathBuf;

use ndarray::{Array2, Array3, Axis};
use sem_common::{Component, Discretization, FieldType, Primitive};
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::config::ReaderConfig;
use crate::derived;
use crate::error::{FieldError, FieldResult};
use crate::layout::BoxLayout;
use crate::naming::field_file_name;
use crate::record::decode_record;

/// One component of one processor box in physical node order.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FieldCube {
    pub component: Component,
    pub box_index: usize,
    /// Iteration for velocity snapshots, `None` for material models.
    pub iteration: Option<usize>,
    /// Values indexed `[theta, phi, z]`.
    pub data: Array3<f32>,
}

impl FieldCube {
    pub fn shape(&self) -> (usize, usize, usize) {
        self.data.dim()
    }

    /// Number of radial node layers.
    pub fn radial_layers(&self) -> usize {
        self.data.len_of(Axis(2))
    }

    /// Horizontal slice `[theta, phi]` at radial layer `idz`.
    pub fn radial_slice(&self, idz: usize) -> Option<Array2<f32>> {
        if idz >= self.radial_layers() {
            return None;
        }
        Some(self.data.index_axis(Axis(2), idz).to_owned())
    }
}

/// Reads field records of one snapshot directory.
#[derive(Debug, Clone)]
pub struct BinaryFieldReader {
    config: ReaderConfig,
    layout: BoxLayout,
}

impl BinaryFieldReader {
    /// Create a reader for boxes of the given discretization.
    pub fn new(config: ReaderConfig, discretization: &Discretization) -> FieldResult<Self> {
        config.validate().map_err(FieldError::Config)?;
        let layout = BoxLayout::from_discretization(discretization)?;
        Ok(Self { config, layout })
    }

    pub fn config(&self) -> &ReaderConfig {
        &self.config
    }

    pub fn field_type(&self) -> FieldType {
        self.config.field_type
    }

    pub fn layout(&self) -> BoxLayout {
        self.layout
    }

    /// Resolve a component name against the active field type.
    pub fn resolve(&self, name: &str) -> FieldResult<Component> {
        self.field_type()
            .resolve(name)
            .ok_or_else(|| FieldError::unknown_component(name, self.field_type()))
    }

    /// Path of the record for `component` of one box.
    pub fn path_for(&self, component: Primitive, box_index: usize, iteration: usize) -> PathBuf {
        self.config.directory.join(field_file_name(
            self.field_type(),
            component,
            box_index,
            iteration,
        ))
    }

    /// Read a component by name.
    pub fn read(&self, component: &str, box_index: usize, iteration: usize) -> FieldResult<FieldCube> {
        let component = self.resolve(component)?;
        self.read_component(component, box_index, iteration)
    }

    /// Read a resolved component, evaluating derived quantities from their
    /// primitives.
    pub fn read_component(
        &self,
        component: Component,
        box_index: usize,
        iteration: usize,
    ) -> FieldResult<FieldCube> {
        if self.field_type().resolve(component.name()) != Some(component) {
            return Err(FieldError::unknown_component(
                component.name(),
                self.field_type(),
            ));
        }

        let data = match component {
            Component::Primitive(p) => self.read_primitive(p, box_index, iteration)?,
            Component::Derived(kind) => {
                let inputs = kind
                    .inputs()
                    .iter()
                    .map(|p| self.read_primitive(*p, box_index, iteration))
                    .collect::<FieldResult<Vec<_>>>()?;
                derived::evaluate(kind, &inputs)?
            }
        };

        let iteration = self.field_type().is_time_dependent().then_some(iteration);
        Ok(FieldCube {
            component,
            box_index,
            iteration,
            data,
        })
    }

    /// Read one primitive record and reorder it into a physical cube.
    pub fn read_primitive(
        &self,
        component: Primitive,
        box_index: usize,
        iteration: usize,
    ) -> FieldResult<Array3<f32>> {
        let path = self.path_for(component, box_index, iteration);
        let bytes = std::fs::read(&path).map_err(|e| FieldError::from_io(&path, e))?;

        debug!(
            component = component.name(),
            box_index,
            path = %path.display(),
            bytes = bytes.len(),
            "Read field record"
        );

        let values = decode_record(&bytes, self.layout.raw_len(), self.config.verify_markers)
            .map_err(|e| match e {
                FieldError::Format(msg) => {
                    FieldError::format(format!("{}: {}", path.display(), msg))
                }
                other => other,
            })?;

        self.layout.to_physical(values)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use sem_common::Derived;
    use test_utils::{SetupSpec, SyntheticDataset};

    fn discretization(spec: &SetupSpec) -> Discretization {
        Discretization {
            nx_global: spec.nx_global,
            ny_global: spec.ny_global,
            nz_global: spec.nz_global,
            lpd: spec.lpd,
            px: spec.px,
            py: spec.py,
            pz: spec.pz,
        }
    }

    fn reader(dataset: &SyntheticDataset, spec: &SetupSpec, field_type: FieldType) -> BinaryFieldReader {
        BinaryFieldReader::new(
            ReaderConfig::new(dataset.path(), field_type),
            &discretization(spec),
        )
        .unwrap()
    }

    #[test]
    fn test_radial_slice() {
        let spec = SetupSpec::single_element();
        let dataset = SyntheticDataset::new();
        let values = test_utils::sequential_values(spec.values_per_box());
        dataset.write_model_field("A", 0, &values);

        let cube = reader(&dataset, &spec, FieldType::EarthModel)
            .read("A", 0, 0)
            .unwrap();
        assert_eq!(cube.iteration, None);
        assert_eq!(cube.radial_layers(), 3);

        let slice = cube.radial_slice(2).unwrap();
        assert_eq!(slice.dim(), (3, 3));
        assert_eq!(slice[[1, 2]], (1 + 3 * 2 + 9 * 2) as f32);
        assert!(cube.radial_slice(3).is_none());
    }

    #[test]
    fn test_unknown_component() {
        let spec = SetupSpec::single_element();
        let dataset = SyntheticDataset::new();
        let r = reader(&dataset, &spec, FieldType::VelocitySnapshot);

        assert!(matches!(
            r.read("vp", 0, 0),
            Err(FieldError::UnknownComponent { component, .. }) if component == "vp"
        ));
        assert!(matches!(
            r.read_component(Component::Derived(Derived::Rho), 0, 0),
            Err(FieldError::UnknownComponent { .. })
        ));
    }

    #[test]
    fn test_missing_record() {
        let spec = SetupSpec::single_element();
        let dataset = SyntheticDataset::new();
        let r = reader(&dataset, &spec, FieldType::EarthModel);

        match r.read("mu", 0, 0) {
            Err(FieldError::NotFound { path }) => assert!(path.ends_with("mu0")),
            other => panic!("expected NotFound, got {:?}", other),
        }
    }

    #[test]
    fn test_missing_directory_rejected() {
        let spec = SetupSpec::single_element();
        let config = ReaderConfig::new("/nonexistent/sem/fields", FieldType::EarthModel);
        assert!(matches!(
            BinaryFieldReader::new(config, &discretization(&spec)),
            Err(FieldError::Config(_))
        ));
    }
}
