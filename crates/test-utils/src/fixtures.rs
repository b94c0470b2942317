//! Setup descriptor fixtures.

/// Parameters of a synthetic run, rendered into a setup descriptor.
///
/// Angles are in degrees and radii in metres, as in the descriptor file.
#[derive(Debug, Clone, Copy)]
pub struct SetupSpec {
    pub theta_min: f64,
    pub theta_max: f64,
    pub phi_min: f64,
    pub phi_max: f64,
    pub z_min: f64,
    pub z_max: f64,
    pub nx_global: usize,
    pub ny_global: usize,
    pub nz_global: usize,
    pub lpd: usize,
    pub px: usize,
    pub py: usize,
    pub pz: usize,
}

impl SetupSpec {
    /// One box, one element per axis, degree 2 (27 values per record).
    pub const fn single_element() -> Self {
        Self {
            theta_min: 40.0,
            theta_max: 50.0,
            phi_min: 0.0,
            phi_max: 10.0,
            z_min: 5_971_000.0,
            z_max: 6_371_000.0,
            nx_global: 0,
            ny_global: 0,
            nz_global: 0,
            lpd: 2,
            px: 1,
            py: 1,
            pz: 1,
        }
    }

    /// Two boxes stacked radially, each 2x2x2 elements of degree 2.
    ///
    /// The inner box spans 5771-6071 km radius, the outer one 6071-6371 km.
    pub const fn two_layers() -> Self {
        Self {
            theta_min: 40.0,
            theta_max: 50.0,
            phi_min: 0.0,
            phi_max: 10.0,
            z_min: 5_771_000.0,
            z_max: 6_371_000.0,
            nx_global: 1,
            ny_global: 1,
            nz_global: 2,
            lpd: 2,
            px: 1,
            py: 1,
            pz: 2,
        }
    }

    /// Four boxes: 2 along theta, 1 along phi, 2 radially.
    pub const fn small() -> Self {
        Self {
            theta_min: 40.0,
            theta_max: 60.0,
            phi_min: 10.0,
            phi_max: 30.0,
            z_min: 5_771_000.0,
            z_max: 6_371_000.0,
            nx_global: 2,
            ny_global: 1,
            nz_global: 2,
            lpd: 2,
            px: 2,
            py: 1,
            pz: 2,
        }
    }

    /// Local element counts `1 + n_global / p`.
    pub fn local_elements(&self) -> (usize, usize, usize) {
        (
            1 + self.nx_global / self.px,
            1 + self.ny_global / self.py,
            1 + self.nz_global / self.pz,
        )
    }

    /// Number of f32 values in one box record.
    pub fn values_per_box(&self) -> usize {
        let (nx, ny, nz) = self.local_elements();
        nx * ny * nz * (self.lpd + 1).pow(3)
    }

    /// Number of processor boxes.
    pub fn n_procs(&self) -> usize {
        self.px * self.py * self.pz
    }

    /// Render the descriptor text in the layout the solver writes.
    pub fn to_setup_text(&self) -> String {
        let rows: Vec<(String, &str)> = vec![
            (format!("{:.1}", self.theta_min), "theta_min (colatitude) in degrees"),
            (format!("{:.1}", self.theta_max), "theta_max (colatitude) in degrees"),
            (format!("{:.1}", self.phi_min), "phi_min (longitude) in degrees"),
            (format!("{:.1}", self.phi_max), "phi_max (longitude) in degrees"),
            (format!("{:.1}", self.z_min), "z_min (radius) in m"),
            (format!("{:.1}", self.z_max), "z_max (radius) in m"),
            ("0".to_string(), "is_diss"),
            ("1".to_string(), "model_type"),
        ];
        let counts: Vec<(String, &str)> = vec![
            (self.nx_global.to_string(), "nx_global"),
            (self.ny_global.to_string(), "ny_global"),
            (self.nz_global.to_string(), "nz_global"),
            (self.lpd.to_string(), "lpd, LAGRANGE polynomial degree"),
            (self.px.to_string(), "px, processors in theta direction"),
            (self.py.to_string(), "py, processors in phi direction"),
            (self.pz.to_string(), "pz, processors in r direction"),
        ];

        let mut text = String::from("MODEL ==========================================\n\n");
        for (value, comment) in &rows {
            text.push_str(&format!("{:<38}! {}\n", value, comment));
        }
        text.push_str("\nCOMPUTATIONAL SETUP (PARALLELISATION) ==========\n");
        for (value, comment) in &counts {
            text.push_str(&format!("{:<38}! {}\n", value, comment));
        }
        text.push_str("\nADJOINT PARAMETERS =============================\n");
        text.push_str(&format!("{:<38}! {}\n", 0, "adjoint_flag"));
        text
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_values_per_box() {
        assert_eq!(SetupSpec::single_element().values_per_box(), 27);
        assert_eq!(SetupSpec::two_layers().values_per_box(), 2 * 2 * 2 * 27);
        assert_eq!(SetupSpec::small().n_procs(), 4);
    }

    #[test]
    fn test_setup_text_layout() {
        let text = SetupSpec::small().to_setup_text();
        let values: Vec<&str> = text
            .lines()
            .skip(1)
            .filter(|l| !l.trim().is_empty())
            .map(|l| l.split_whitespace().next().unwrap())
            .collect();
        assert_eq!(values[0], "40.0");
        assert_eq!(values[8], "COMPUTATIONAL");
        assert_eq!(values[9], "2");
        assert_eq!(values[15], "2");
    }
}
