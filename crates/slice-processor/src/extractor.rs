//! Depth-slice extraction over all processor boxes.

use field_parser::{BinaryFieldReader, BoxLayout, FieldError, FieldResult, ReaderConfig};
use rayon::prelude::*;
use sem_common::{Component, GridGeometry, ProcessorBox, Setup};
use tracing::{debug, info, warn};

use crate::config::ExtractorConfig;
use crate::error::{Result, SliceError};
use crate::types::{extrema, lon_lat_mesh, BoxFailure, BoxSlice, DepthSlice, SliceRequest};

/// Extracts horizontal slices at a given depth.
///
/// Holds the box geometry and a field reader. Each extraction reads the
/// intersecting boxes from disk again.
#[derive(Debug, Clone)]
pub struct DepthSliceExtractor {
    geometry: GridGeometry,
    reader: BinaryFieldReader,
    config: ExtractorConfig,
}

impl DepthSliceExtractor {
    /// Create an extractor from prebuilt geometry and reader.
    pub fn new(
        geometry: GridGeometry,
        reader: BinaryFieldReader,
        config: ExtractorConfig,
    ) -> Result<Self> {
        config.validate().map_err(SliceError::Config)?;

        let expected = BoxLayout::from_discretization(geometry.discretization())?;
        if reader.layout() != expected {
            return Err(SliceError::config(format!(
                "reader layout {:?} does not match geometry layout {:?}",
                reader.layout(),
                expected
            )));
        }

        Ok(Self {
            geometry,
            reader,
            config,
        })
    }

    /// Build geometry and reader from a parsed setup descriptor.
    pub fn from_setup(
        setup: &Setup,
        reader_config: ReaderConfig,
        config: ExtractorConfig,
    ) -> Result<Self> {
        let geometry = GridGeometry::build(&setup.domain, &setup.discretization)?;
        let reader = BinaryFieldReader::new(reader_config, &setup.discretization)?;
        Self::new(geometry, reader, config)
    }

    pub fn geometry(&self) -> &GridGeometry {
        &self.geometry
    }

    pub fn reader(&self) -> &BinaryFieldReader {
        &self.reader
    }

    pub fn config(&self) -> &ExtractorConfig {
        &self.config
    }

    /// Indices of the boxes whose radial range contains `depth_km`.
    pub fn boxes_at_depth(&self, depth_km: f64) -> Vec<usize> {
        let radius = self.config.radius_for_depth(depth_km);
        self.geometry
            .boxes_at_radius(radius)
            .map(|b| b.index)
            .collect()
    }

    /// Extract the slice of `request.component` at `request.depth_km`.
    pub fn extract(&self, request: &SliceRequest) -> Result<DepthSlice> {
        request.validate()?;
        let component = self.reader.resolve(&request.component)?;

        let radius = self.config.radius_for_depth(request.depth_km);
        let candidates: Vec<&ProcessorBox> = self.geometry.boxes_at_radius(radius).collect();
        if candidates.is_empty() {
            return Err(SliceError::NoData {
                depth_km: request.depth_km,
                radius_m: radius,
            });
        }

        debug!(
            component = component.name(),
            depth_km = request.depth_km,
            radius_m = radius,
            n_boxes = candidates.len(),
            parallel = self.config.parallel,
            "Extracting depth slice"
        );

        let results: Vec<(usize, FieldResult<BoxSlice>)> = if self.config.parallel {
            candidates
                .par_iter()
                .map(|b| (b.index, self.slice_box(component, b, radius, request.iteration)))
                .collect()
        } else {
            candidates
                .iter()
                .map(|b| (b.index, self.slice_box(component, b, radius, request.iteration)))
                .collect()
        };

        let mut boxes = Vec::with_capacity(results.len());
        let mut failures = Vec::new();
        for (box_index, result) in results {
            match result {
                Ok(slice) => boxes.push(slice),
                Err(source) if self.config.skip_failed_boxes => {
                    warn!(box_index, error = %source, "Skipping processor box");
                    failures.push(BoxFailure {
                        box_index,
                        message: source.to_string(),
                    });
                }
                Err(source) => return Err(SliceError::Box { box_index, source }),
            }
        }

        let label_radius_m = match boxes.last() {
            Some(last) => last.radius_m,
            None => {
                return Err(SliceError::AllBoxesFailed {
                    count: failures.len(),
                })
            }
        };

        let (min, max) = boxes
            .iter()
            .filter_map(|b| b.range)
            .reduce(|(lo, hi), (bl, bh)| (lo.min(bl), hi.max(bh)))
            .ok_or(SliceError::NoValidValues {
                depth_km: request.depth_km,
            })?;

        let label_radius_km = label_radius_m / 1000.0;
        let slice = DepthSlice {
            component,
            unit: component.unit().map(str::to_string),
            requested_depth_km: request.depth_km,
            radius_m: radius,
            iteration: self
                .reader
                .field_type()
                .is_time_dependent()
                .then_some(request.iteration),
            label_radius_km,
            label_depth_km: self.config.earth_radius_km - label_radius_km,
            min,
            max,
            display_bounds: request.display_bounds,
            boxes,
            failures,
        };

        info!(
            component = component.name(),
            depth_km = slice.label_depth_km,
            boxes = slice.boxes.len(),
            skipped = slice.failures.len(),
            min = slice.min,
            max = slice.max,
            "Extracted depth slice"
        );

        Ok(slice)
    }

    /// Read one box and cut it at the layer nearest `radius`.
    fn slice_box(
        &self,
        component: Component,
        pbox: &ProcessorBox,
        radius: f64,
        iteration: usize,
    ) -> FieldResult<BoxSlice> {
        let layer_index = pbox
            .nearest_layer(radius)
            .ok_or_else(|| FieldError::format("processor box has no radial layers"))?;

        let cube = self.reader.read_component(component, pbox.index, iteration)?;
        if cube.radial_layers() != pbox.z.len() {
            return Err(FieldError::format(format!(
                "cube has {} radial layers, geometry has {}",
                cube.radial_layers(),
                pbox.z.len()
            )));
        }

        let values = cube.radial_slice(layer_index).ok_or_else(|| {
            FieldError::format(format!("radial layer {} out of range", layer_index))
        })?;

        let (lon, lat) = lon_lat_mesh(pbox);
        if values.dim() != lon.dim() {
            return Err(FieldError::format(format!(
                "slice shape {:?} does not match mesh shape {:?}",
                values.dim(),
                lon.dim()
            )));
        }

        let range = extrema(&values);
        if range.is_none() {
            warn!(box_index = pbox.index, layer_index, "Slice holds only NaN values");
        }
        debug!(
            box_index = pbox.index,
            layer_index,
            radius_m = pbox.z[layer_index],
            range = ?range,
            "Sliced processor box"
        );

        Ok(BoxSlice {
            box_index: pbox.index,
            layer_index,
            radius_m: pbox.z[layer_index],
            values,
            lon,
            lat,
            range,
        })
    }
}
