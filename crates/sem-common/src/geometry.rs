//! Node coordinates of every processor box.
//!
//! The domain is cut into `px * py * pz` blocks of equal angular/radial
//! width. Inside a block, every axis carries a knot line: one GLL node set
//! per element, laid end to end so that the last node of one element and the
//! first node of the next coincide.
//!
//! Boxes are numbered with z outermost, then y, then x. File names on disk
//! use that number, so the order here is not negotiable.
//!
//! The radial knot line of a box is stored reversed: `z[0]` is the outer
//! (largest) radius and the last entry the inner one.

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::domain::{Discretization, DomainDescriptor, LocalElements};
use crate::error::{SemError, SemResult};
use crate::gll::gll_points;

/// Coordinates of one processor box.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProcessorBox {
    /// Canonical processor index.
    pub index: usize,
    /// Colatitude of every node line, radians, ascending.
    pub theta: Vec<f64>,
    /// Longitude of every node line, radians, ascending.
    pub phi: Vec<f64>,
    /// Radius of every node layer, metres, descending.
    pub z: Vec<f64>,
}

impl ProcessorBox {
    /// Smallest and largest radius covered by this box.
    pub fn z_range(&self) -> (f64, f64) {
        self.z
            .iter()
            .fold((f64::INFINITY, f64::NEG_INFINITY), |(lo, hi), &z| {
                (lo.min(z), hi.max(z))
            })
    }

    /// Whether `radius` lies inside the radial range of this box, bounds included.
    pub fn contains_radius(&self, radius: f64) -> bool {
        let (lo, hi) = self.z_range();
        radius >= lo && radius <= hi
    }

    /// Index of the radial layer closest to `radius`.
    ///
    /// On ties the lowest index wins. Returns `None` for an empty box.
    pub fn nearest_layer(&self, radius: f64) -> Option<usize> {
        let mut best: Option<(usize, f64)> = None;
        for (i, &z) in self.z.iter().enumerate() {
            let distance = (z - radius).abs();
            match best {
                Some((_, d)) if distance >= d => {}
                _ => best = Some((i, distance)),
            }
        }
        best.map(|(i, _)| i)
    }

    /// Latitudes of the node lines in degrees (`90 - colatitude`).
    pub fn latitudes_deg(&self) -> Vec<f64> {
        self.theta.iter().map(|t| 90.0 - t.to_degrees()).collect()
    }

    /// Longitudes of the node lines in degrees.
    pub fn longitudes_deg(&self) -> Vec<f64> {
        self.phi.iter().map(|p| p.to_degrees()).collect()
    }
}

/// Geographic extent of the whole domain in degrees.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct MapExtent {
    pub lat_min: f64,
    pub lat_max: f64,
    pub lon_min: f64,
    pub lon_max: f64,
}

/// Reconstructed geometry of all processor boxes.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GridGeometry {
    domain: DomainDescriptor,
    discretization: Discretization,
    elements: LocalElements,
    boxes: Vec<ProcessorBox>,
}

impl GridGeometry {
    /// Build the coordinates of every processor box.
    ///
    /// Fails without exposing partial geometry if the domain or the
    /// discretization is invalid.
    pub fn build(domain: &DomainDescriptor, discretization: &Discretization) -> SemResult<Self> {
        domain.validate()?;
        let elements = discretization.local_elements()?;
        let gll = gll_points(discretization.lpd)?;

        let width_theta = domain.theta_width() / discretization.px as f64;
        let width_phi = domain.phi_width() / discretization.py as f64;
        let width_z = domain.z_width() / discretization.pz as f64;

        let boundaries_theta = block_boundaries(domain.theta_min, width_theta, discretization.px);
        let boundaries_phi = block_boundaries(domain.phi_min, width_phi, discretization.py);
        let boundaries_z = block_boundaries(domain.z_min, width_z, discretization.pz);

        let knot_x = knot_line(gll, elements.nx, width_theta)?;
        let knot_y = knot_line(gll, elements.ny, width_phi)?;
        let knot_z = knot_line(gll, elements.nz, width_z)?;

        let mut boxes = Vec::with_capacity(discretization.n_procs());
        for iz in 0..discretization.pz {
            for iy in 0..discretization.py {
                for ix in 0..discretization.px {
                    let mut z: Vec<f64> = knot_z.iter().map(|k| boundaries_z[iz] + k).collect();
                    z.reverse();

                    boxes.push(ProcessorBox {
                        index: boxes.len(),
                        theta: knot_x.iter().map(|k| boundaries_theta[ix] + k).collect(),
                        phi: knot_y.iter().map(|k| boundaries_phi[iy] + k).collect(),
                        z,
                    });
                }
            }
        }

        debug!(
            n_boxes = boxes.len(),
            nx = elements.nx,
            ny = elements.ny,
            nz = elements.nz,
            lpd = discretization.lpd,
            "Built processor box geometry"
        );

        Ok(Self {
            domain: *domain,
            discretization: *discretization,
            elements,
            boxes,
        })
    }

    pub fn domain(&self) -> &DomainDescriptor {
        &self.domain
    }

    pub fn discretization(&self) -> &Discretization {
        &self.discretization
    }

    /// Per-box element counts.
    pub fn elements(&self) -> LocalElements {
        self.elements
    }

    /// All boxes in canonical processor order.
    pub fn boxes(&self) -> &[ProcessorBox] {
        &self.boxes
    }

    /// Look up a box by processor index.
    pub fn get(&self, index: usize) -> Option<&ProcessorBox> {
        self.boxes.get(index)
    }

    pub fn len(&self) -> usize {
        self.boxes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.boxes.is_empty()
    }

    /// Boxes whose radial range contains `radius`.
    pub fn boxes_at_radius(&self, radius: f64) -> impl Iterator<Item = &ProcessorBox> {
        self.boxes.iter().filter(move |b| b.contains_radius(radius))
    }

    /// Lat/lon extent of the full domain.
    pub fn map_extent(&self) -> MapExtent {
        MapExtent {
            lat_min: 90.0 - self.domain.theta_max.to_degrees(),
            lat_max: 90.0 - self.domain.theta_min.to_degrees(),
            lon_min: self.domain.phi_min.to_degrees(),
            lon_max: self.domain.phi_max.to_degrees(),
        }
    }
}

/// Block edges `min, min + w, ..., min + n*w`.
fn block_boundaries(min: f64, width: f64, n_blocks: usize) -> Vec<f64> {
    (0..=n_blocks).map(|i| min + i as f64 * width).collect()
}

/// Local knot line of `n_elements` elements, rescaled to `[0, width]`.
fn knot_line(gll: &[f64], n_elements: usize, width: f64) -> SemResult<Vec<f64>> {
    if n_elements == 0 {
        return Err(SemError::invalid_config("processor box has no elements"));
    }
    if !(width > 0.0) {
        return Err(SemError::invalid_config(format!(
            "processor block width must be positive, got {}",
            width
        )));
    }

    let span = 2.0 * n_elements as f64;
    let knots = (0..n_elements)
        .flat_map(|k| gll.iter().map(move |g| g + 1.0 + 2.0 * k as f64))
        .map(|k| k * width / span)
        .collect();

    Ok(knots)
}
