//! Domain extents and discretization of a spectral-element run.

use serde::{Deserialize, Serialize};

use crate::error::{SemError, SemResult};
use crate::gll::gll_points;

/// Angular and radial extent of the full simulation volume.
///
/// Angles are colatitude (`theta`) and longitude (`phi`) in radians, the
/// radial coordinate `z` is the distance from the Earth's centre in metres.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct DomainDescriptor {
    pub theta_min: f64,
    pub theta_max: f64,
    pub phi_min: f64,
    pub phi_max: f64,
    pub z_min: f64,
    pub z_max: f64,
}

impl DomainDescriptor {
    /// Create a new domain descriptor, validating every axis.
    pub fn new(
        theta_min: f64,
        theta_max: f64,
        phi_min: f64,
        phi_max: f64,
        z_min: f64,
        z_max: f64,
    ) -> SemResult<Self> {
        let domain = Self {
            theta_min,
            theta_max,
            phi_min,
            phi_max,
            z_min,
            z_max,
        };
        domain.validate()?;
        Ok(domain)
    }

    /// Create a domain from angles given in degrees.
    pub fn from_degrees(
        theta_min: f64,
        theta_max: f64,
        phi_min: f64,
        phi_max: f64,
        z_min: f64,
        z_max: f64,
    ) -> SemResult<Self> {
        Self::new(
            theta_min.to_radians(),
            theta_max.to_radians(),
            phi_min.to_radians(),
            phi_max.to_radians(),
            z_min,
            z_max,
        )
    }

    /// Check that `min < max` holds on every axis.
    pub fn validate(&self) -> SemResult<()> {
        let axes = [
            ("theta", self.theta_min, self.theta_max),
            ("phi", self.phi_min, self.phi_max),
            ("z", self.z_min, self.z_max),
        ];

        for (axis, min, max) in axes {
            if !min.is_finite() || !max.is_finite() {
                return Err(SemError::invalid_config(format!(
                    "{} extent must be finite, got [{}, {}]",
                    axis, min, max
                )));
            }
            if min >= max {
                return Err(SemError::invalid_config(format!(
                    "{} extent must satisfy min < max, got [{}, {}]",
                    axis, min, max
                )));
            }
        }

        Ok(())
    }

    /// Colatitude extent in radians.
    pub fn theta_width(&self) -> f64 {
        self.theta_max - self.theta_min
    }

    /// Longitude extent in radians.
    pub fn phi_width(&self) -> f64 {
        self.phi_max - self.phi_min
    }

    /// Radial extent in metres.
    pub fn z_width(&self) -> f64 {
        self.z_max - self.z_min
    }
}

/// Element counts, polynomial degree and processor grid of a run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Discretization {
    pub nx_global: usize,
    pub ny_global: usize,
    pub nz_global: usize,
    /// Lagrange polynomial degree; each element edge carries `lpd + 1` nodes.
    pub lpd: usize,
    pub px: usize,
    pub py: usize,
    pub pz: usize,
}

/// Number of elements owned by one processor box along each axis.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct LocalElements {
    pub nx: usize,
    pub ny: usize,
    pub nz: usize,
}

impl Discretization {
    /// Validate the discretization and compute per-box element counts.
    ///
    /// The local count along an axis is `1 + n_global / p`. A global count
    /// that the processor count does not divide is rejected.
    pub fn local_elements(&self) -> SemResult<LocalElements> {
        gll_points(self.lpd)?;

        let axes = [
            ("x", self.nx_global, self.px),
            ("y", self.ny_global, self.py),
            ("z", self.nz_global, self.pz),
        ];

        let mut local = [0usize; 3];
        for (slot, (axis, n_global, procs)) in local.iter_mut().zip(axes) {
            if procs == 0 {
                return Err(SemError::invalid_config(format!(
                    "processor count along {} must be positive",
                    axis
                )));
            }
            if n_global % procs != 0 {
                return Err(SemError::invalid_config(format!(
                    "{} global elements along {} are not divisible by {} processors",
                    n_global, axis, procs
                )));
            }
            *slot = (n_global / procs).checked_add(1).ok_or_else(|| {
                SemError::invalid_config(format!(
                    "{} global elements along {} overflow the local element count",
                    n_global, axis
                ))
            })?;
        }

        let elements = LocalElements {
            nx: local[0],
            ny: local[1],
            nz: local[2],
        };

        // Every later size computation is bounded by the record byte count.
        let nodes = self.nodes_per_element();
        let record_bytes = [elements.nx, elements.ny, elements.nz, nodes, nodes, nodes]
            .into_iter()
            .try_fold(std::mem::size_of::<f32>(), |acc, n| acc.checked_mul(n));
        if record_bytes.is_none() {
            return Err(SemError::invalid_config(format!(
                "box of {}x{}x{} elements with {} nodes per edge is too large",
                elements.nx, elements.ny, elements.nz, nodes
            )));
        }

        if self
            .px
            .checked_mul(self.py)
            .and_then(|n| n.checked_mul(self.pz))
            .is_none()
        {
            return Err(SemError::invalid_config(format!(
                "processor grid {}x{}x{} is too large",
                self.px, self.py, self.pz
            )));
        }

        Ok(elements)
    }

    /// Nodes per element edge.
    pub fn nodes_per_element(&self) -> usize {
        self.lpd + 1
    }

    /// Total number of processor boxes.
    pub fn n_procs(&self) -> usize {
        self.px * self.py * self.pz
    }
}

impl LocalElements {
    /// Number of f32 values in one box record.
    ///
    /// Counts returned by [`Discretization::local_elements`] are known not to
    /// overflow here.
    pub fn values_per_box(&self, nodes_per_element: usize) -> usize {
        self.nx * self.ny * self.nz * nodes_per_element.pow(3)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn disc() -> Discretization {
        Discretization {
            nx_global: 22,
            ny_global: 27,
            nz_global: 7,
            lpd: 4,
            px: 2,
            py: 3,
            pz: 1,
        }
    }

    #[test]
    fn test_domain_validation() {
        assert!(DomainDescriptor::new(0.1, 0.2, 0.3, 0.4, 5.0e6, 6.0e6).is_ok());
        assert!(DomainDescriptor::new(0.2, 0.2, 0.3, 0.4, 5.0e6, 6.0e6).is_err());
        assert!(DomainDescriptor::new(0.1, 0.2, 0.5, 0.4, 5.0e6, 6.0e6).is_err());
        assert!(DomainDescriptor::new(0.1, 0.2, 0.3, 0.4, 6.0e6, 5.0e6).is_err());
        assert!(DomainDescriptor::new(f64::NAN, 0.2, 0.3, 0.4, 5.0e6, 6.0e6).is_err());
    }

    #[test]
    fn test_domain_from_degrees() {
        let domain = DomainDescriptor::from_degrees(45.0, 90.0, 0.0, 180.0, 1.0, 2.0).unwrap();
        assert!((domain.theta_min - std::f64::consts::FRAC_PI_4).abs() < 1e-12);
        assert!((domain.phi_width() - std::f64::consts::PI).abs() < 1e-12);
        assert_eq!(domain.z_width(), 1.0);
    }

    #[test]
    fn test_local_elements() {
        let local = disc().local_elements().unwrap();
        assert_eq!(local, LocalElements { nx: 12, ny: 10, nz: 8 });
        assert_eq!(local.values_per_box(5), 12 * 10 * 8 * 125);
        assert_eq!(disc().n_procs(), 6);
    }

    #[test]
    fn test_non_divisible_elements_rejected() {
        let mut d = disc();
        d.nx_global = 23;
        assert!(matches!(
            d.local_elements(),
            Err(SemError::InvalidConfiguration(_))
        ));
    }

    #[test]
    fn test_zero_processors_rejected() {
        let mut d = disc();
        d.pz = 0;
        assert!(matches!(
            d.local_elements(),
            Err(SemError::InvalidConfiguration(_))
        ));
    }

    #[test]
    fn test_unsupported_degree_rejected() {
        let mut d = disc();
        d.lpd = 8;
        assert!(matches!(
            d.local_elements(),
            Err(SemError::UnsupportedDegree { degree: 8 })
        ));
    }

    #[test]
    fn test_oversized_box_rejected() {
        let d = Discretization {
            nx_global: 1 << 40,
            ny_global: 1 << 40,
            lpd: 7,
            px: 1,
            py: 1,
            ..disc()
        };
        assert!(matches!(
            d.local_elements(),
            Err(SemError::InvalidConfiguration(msg)) if msg.contains("too large")
        ));
    }

    #[test]
    fn test_oversized_processor_grid_rejected() {
        let d = Discretization {
            nx_global: 0,
            ny_global: 0,
            nz_global: 0,
            px: usize::MAX,
            py: 2,
            ..disc()
        };
        assert!(matches!(
            d.local_elements(),
            Err(SemError::InvalidConfiguration(msg)) if msg.contains("processor grid")
        ));
    }
}
