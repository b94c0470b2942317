//! Temporary snapshot directories.

use std::path::{Path, PathBuf};

use tempfile::TempDir;

use crate::fixtures::SetupSpec;
use crate::generators::frame_record;

/// A snapshot directory in a temp dir, removed on drop.
///
/// File names follow the solver conventions: `<component><box>` for
/// material models and `<component>_<box>_<iteration>` for velocity
/// snapshots.
pub struct SyntheticDataset {
    dir: TempDir,
}

impl SyntheticDataset {
    pub fn new() -> Self {
        let dir = tempfile::Builder::new()
            .prefix("sem_snapshot")
            .tempdir()
            .expect("Failed to create temporary snapshot directory");
        Self { dir }
    }

    pub fn path(&self) -> &Path {
        self.dir.path()
    }

    /// Write `setup` into the directory and return its path.
    pub fn write_setup(&self, spec: &SetupSpec) -> PathBuf {
        self.write_bytes("setup", spec.to_setup_text().as_bytes())
    }

    /// Write a framed material-model record.
    pub fn write_model_field(&self, component: &str, box_index: usize, values: &[f32]) -> PathBuf {
        self.write_bytes(&format!("{}{}", component, box_index), &frame_record(values))
    }

    /// Write a framed velocity-snapshot record.
    pub fn write_snapshot_field(
        &self,
        component: &str,
        box_index: usize,
        iteration: usize,
        values: &[f32],
    ) -> PathBuf {
        self.write_bytes(
            &format!("{}_{}_{}", component, box_index, iteration),
            &frame_record(values),
        )
    }

    /// Write the same material-model record for every box.
    pub fn write_model_field_all_boxes(&self, spec: &SetupSpec, component: &str, value: f32) {
        let values = vec![value; spec.values_per_box()];
        for p in 0..spec.n_procs() {
            self.write_model_field(component, p, &values);
        }
    }

    /// Write arbitrary bytes under `name`.
    pub fn write_bytes(&self, name: &str, bytes: &[u8]) -> PathBuf {
        let path = self.dir.path().join(name);
        std::fs::write(&path, bytes).expect("Failed to write synthetic file");
        path
    }
}

impl Default for SyntheticDataset {
    fn default() -> Self {
        Self::new()
    }
}
