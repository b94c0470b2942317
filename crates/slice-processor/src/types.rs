//! Request and result types for depth slices.

use ndarray::Array2;
use sem_common::{Component, ProcessorBox};
use serde::{Deserialize, Serialize};

use crate::error::{Result, SliceError};

/// Parameters of one depth-slice request.
///
/// # Example
/// ```rust
/// use slice_processor::SliceRequest;
///
/// let request = SliceRequest::new("vsv", 150.0)
///     .at_iteration(0)
///     .with_display_bounds(4200.0, 4800.0);
/// ```
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SliceRequest {
    /// Component name (e.g. "vsv", "rhoinv", "vx").
    pub component: String,

    /// Depth below the reference radius in kilometres.
    pub depth_km: f64,

    /// Snapshot iteration; ignored for material models.
    pub iteration: usize,

    /// Colour-scale bounds for the renderer.
    pub display_bounds: Option<(f32, f32)>,
}

impl SliceRequest {
    pub fn new(component: impl Into<String>, depth_km: f64) -> Self {
        Self {
            component: component.into(),
            depth_km,
            iteration: 0,
            display_bounds: None,
        }
    }

    pub fn at_iteration(mut self, iteration: usize) -> Self {
        self.iteration = iteration;
        self
    }

    pub fn with_display_bounds(mut self, min: f32, max: f32) -> Self {
        self.display_bounds = Some((min, max));
        self
    }

    /// Check the request for values no extraction can satisfy.
    pub fn validate(&self) -> Result<()> {
        if !self.depth_km.is_finite() {
            return Err(SliceError::config(format!(
                "depth must be finite, got {}",
                self.depth_km
            )));
        }

        if let Some((min, max)) = self.display_bounds {
            if !(min < max) {
                return Err(SliceError::config(format!(
                    "display bounds must satisfy min < max, got ({}, {})",
                    min, max
                )));
            }
        }

        Ok(())
    }
}

/// Horizontal slice through one processor box.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BoxSlice {
    pub box_index: usize,
    /// Radial layer the slice was taken from.
    pub layer_index: usize,
    /// Radius of that layer in metres.
    pub radius_m: f64,
    /// Values indexed `[theta, phi]`.
    pub values: Array2<f32>,
    /// Longitude in degrees, same shape as `values`.
    pub lon: Array2<f64>,
    /// Latitude in degrees, same shape as `values`.
    pub lat: Array2<f64>,
    /// Smallest and largest value; `None` when every value is NaN.
    pub range: Option<(f32, f32)>,
}

/// A slice that could not be produced for one box.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BoxFailure {
    pub box_index: usize,
    pub message: String,
}

/// Result of a depth-slice extraction over all boxes.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DepthSlice {
    pub component: Component,
    /// Unit for colour-bar labels.
    pub unit: Option<String>,
    pub requested_depth_km: f64,
    /// Radius the requested depth maps to, in metres.
    pub radius_m: f64,
    /// Iteration for velocity snapshots.
    pub iteration: Option<usize>,
    /// Radius of the selected layer in the last contributing box, in km.
    pub label_radius_km: f64,
    /// Depth of the selected layer in the last contributing box, in km.
    pub label_depth_km: f64,
    /// Smallest value over all contributing boxes.
    pub min: f32,
    /// Largest value over all contributing boxes.
    pub max: f32,
    pub display_bounds: Option<(f32, f32)>,
    /// Per-box slices, ordered by box index.
    pub boxes: Vec<BoxSlice>,
    /// Boxes skipped after a failed read.
    pub failures: Vec<BoxFailure>,
}

impl DepthSlice {
    /// Plot title in the form "Depth slice of vsv at 150 km".
    pub fn title(&self) -> String {
        format!(
            "Depth slice of {} at {} km",
            self.component,
            self.label_depth_km.round() as i64
        )
    }

    /// Display bounds if requested, otherwise the observed range.
    pub fn color_range(&self) -> (f32, f32) {
        self.display_bounds.unwrap_or((self.min, self.max))
    }

    /// Indices of the contributing boxes.
    pub fn box_indices(&self) -> Vec<usize> {
        self.boxes.iter().map(|b| b.box_index).collect()
    }
}

/// Longitude/latitude mesh of a box, shaped `[theta, phi]`.
pub fn lon_lat_mesh(pbox: &ProcessorBox) -> (Array2<f64>, Array2<f64>) {
    let lats = pbox.latitudes_deg();
    let lons = pbox.longitudes_deg();
    let shape = (lats.len(), lons.len());

    let lon = Array2::from_shape_fn(shape, |(_, j)| lons[j]);
    let lat = Array2::from_shape_fn(shape, |(i, _)| lats[i]);
    (lon, lat)
}

/// Smallest and largest value, ignoring NaN.
///
/// Returns `None` when there is no value other than NaN.
pub fn extrema(values: &Array2<f32>) -> Option<(f32, f32)> {
    values
        .iter()
        .filter(|v| !v.is_nan())
        .fold(None, |acc, &v| match acc {
            None => Some((v, v)),
            Some((lo, hi)) => Some((lo.min(v), hi.max(v))),
        })
}

#[cfg(test)]
mod tests {
    use super::*;
    use ndarray::array;
    use sem_common::Derived;

    #[test]
    fn test_request_builder() {
        let request = SliceRequest::new("vx", 20.0)
            .at_iteration(400)
            .with_display_bounds(-1.0, 1.0);
        assert_eq!(request.component, "vx");
        assert_eq!(request.iteration, 400);
        assert_eq!(request.display_bounds, Some((-1.0, 1.0)));
        assert!(request.validate().is_ok());
    }

    #[test]
    fn test_request_validation() {
        assert!(SliceRequest::new("vp", f64::NAN).validate().is_err());
        assert!(SliceRequest::new("vp", 10.0)
            .with_display_bounds(2.0, 1.0)
            .validate()
            .is_err());
    }

    #[test]
    fn test_mesh_shape_and_values() {
        let pbox = ProcessorBox {
            index: 0,
            theta: vec![30f64.to_radians(), 40f64.to_radians()],
            phi: vec![0.0, 10f64.to_radians(), 20f64.to_radians()],
            z: vec![1.0],
        };
        let (lon, lat) = lon_lat_mesh(&pbox);
        assert_eq!(lon.dim(), (2, 3));
        assert_eq!(lat.dim(), (2, 3));
        assert!((lat[[0, 2]] - 60.0).abs() < 1e-9);
        assert!((lat[[1, 0]] - 50.0).abs() < 1e-9);
        assert!((lon[[1, 2]] - 20.0).abs() < 1e-9);
        assert!((lon[[0, 1]] - 10.0).abs() < 1e-9);
    }

    #[test]
    fn test_extrema_ignores_nan() {
        let values = array![[1.0, f32::NAN], [-3.0, 7.5]];
        assert_eq!(extrema(&values), Some((-3.0, 7.5)));
    }

    #[test]
    fn test_extrema_all_nan() {
        let values = array![[f32::NAN, f32::NAN]];
        assert_eq!(extrema(&values), None);
    }

    #[test]
    fn test_title_and_color_range() {
        let slice = DepthSlice {
            component: Component::Derived(Derived::Vsv),
            unit: Some("m/s".to_string()),
            requested_depth_km: 148.0,
            radius_m: 6_223_000.0,
            iteration: None,
            label_radius_km: 6221.0,
            label_depth_km: 150.0,
            min: 4100.0,
            max: 4700.0,
            display_bounds: None,
            boxes: vec![],
            failures: vec![],
        };
        assert_eq!(slice.title(), "Depth slice of vsv at 150 km");
        assert_eq!(slice.color_range(), (4100.0, 4700.0));

        let bounded = DepthSlice {
            display_bounds: Some((4000.0, 5000.0)),
            ..slice
        };
        assert_eq!(bounded.color_range(), (4000.0, 5000.0));
    }
}
