//! File names of per-box field records.

use sem_common::{FieldType, Primitive};

/// Name of the record holding `component` for one box.
///
/// Material models: `<component><box>`, e.g. `rhoinv12`.
/// Velocity snapshots: `<component>_<box>_<iteration>`, e.g. `vx_12_500`.
pub fn field_file_name(
    field_type: FieldType,
    component: Primitive,
    box_index: usize,
    iteration: usize,
) -> String {
    match field_type {
        FieldType::EarthModel => format!("{}{}", component.name(), box_index),
        FieldType::VelocitySnapshot => {
            format!("{}_{}_{}", component.name(), box_index, iteration)
        }
    }
}
