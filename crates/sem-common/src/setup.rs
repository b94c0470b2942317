//! Reader for the plain-text setup descriptor of a run.
//!
//! The first line is a header. Every following non-blank line holds one
//! value as its first whitespace-separated token; the rest of the line is a
//! free-form comment. Values appear in a fixed order:
//!
//! ```text
//! theta_min, theta_max, phi_min, phi_max   (degrees)
//! z_min, z_max                             (metres)
//! is_diss, model_type, section header      (ignored)
//! nx_global, ny_global, nz_global
//! lpd
//! px, py, pz
//! ```
//!
//! Anything after `pz` is ignored.

use std::path::Path;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::domain::{Discretization, DomainDescriptor};
use crate::error::{SemError, SemResult};

/// Lines between the domain and the element counts: two solver flags and
/// the computational setup section header.
const SKIPPED_FIELDS: [&str; 3] = ["is_diss", "model_type", "computational setup header"];

/// Domain and discretization read from a setup descriptor.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Setup {
    pub domain: DomainDescriptor,
    pub discretization: Discretization,
}

impl Setup {
    /// Read and parse a setup file.
    pub fn from_path<P: AsRef<Path>>(path: P) -> SemResult<Self> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path).map_err(|e| {
            SemError::invalid_config(format!("cannot read setup file {}: {}", path.display(), e))
        })?;
        let setup = Self::parse(&text)?;
        debug!(path = %path.display(), "Loaded setup descriptor");
        Ok(setup)
    }

    /// Parse setup descriptor text.
    pub fn parse(text: &str) -> SemResult<Self> {
        let mut values = Values::new(text);

        let theta_min: f64 = values.next("theta_min")?;
        let theta_max: f64 = values.next("theta_max")?;
        let phi_min: f64 = values.next("phi_min")?;
        let phi_max: f64 = values.next("phi_max")?;
        let z_min: f64 = values.next("z_min")?;
        let z_max: f64 = values.next("z_max")?;
        let domain =
            DomainDescriptor::from_degrees(theta_min, theta_max, phi_min, phi_max, z_min, z_max)?;

        for field in SKIPPED_FIELDS {
            values.skip(field)?;
        }

        let discretization = Discretization {
            nx_global: values.next("nx_global")?,
            ny_global: values.next("ny_global")?,
            nz_global: values.next("nz_global")?,
            lpd: values.next("lpd")?,
            px: values.next("px")?,
            py: values.next("py")?,
            pz: values.next("pz")?,
        };
        discretization.local_elements()?;

        Ok(Self {
            domain,
            discretization,
        })
    }
}

/// Positional cursor over the value tokens of a descriptor.
struct Values<'a> {
    lines: std::iter::Skip<std::str::Lines<'a>>,
}

impl<'a> Values<'a> {
    fn new(text: &'a str) -> Self {
        Self {
            lines: text.lines().skip(1),
        }
    }

    fn token(&mut self, field: &str) -> SemResult<&'a str> {
        self.lines
            .by_ref()
            .map(str::trim)
            .find(|line| !line.is_empty())
            .and_then(|line| line.split_whitespace().next())
            .ok_or_else(|| {
                SemError::invalid_config(format!("setup descriptor ends before '{}'", field))
            })
    }

    fn skip(&mut self, field: &str) -> SemResult<()> {
        self.token(field).map(|_| ())
    }

    fn next<T: FromStr>(&mut self, field: &str) -> SemResult<T> {
        let token = self.token(field)?;
        token.parse().map_err(|_| {
            SemError::invalid_config(format!("invalid value '{}' for '{}'", token, field))
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const SETUP: &str = "\
MODEL ==============================================================================================================

30.0                                  ! theta_min (colatitude) in degrees
60.0                                  ! theta_max (colatitude) in degrees
10.0                                  ! phi_min (longitude) in degrees
40.0                                  ! phi_max (longitude) in degrees
5371000.0                             ! z_min (radius) in m
6371000.0                             ! z_max (radius) in m
0                                     ! is_diss
1                                     ! model_type

COMPUTATIONAL SETUP (PARALLELISATION) ===============================================================================
22                                    ! nx_global, (nx_global+px = global # elements in theta direction)
27                                    ! ny_global, (ny_global+py = global # elements in phi direction)
7                                     ! nz_global, (nz_global+pz = global # of elements in r direction)
4                                     ! lpd, LAGRANGE polynomial degree
2                                     ! px, processors in theta direction
3                                     ! py, processors in phi direction
1                                     ! pz, processors in r direction

ADJOINT PARAMETERS ==================================================================================================
1                                     ! adjoint_flag
";

    #[test]
    fn test_parse_setup() {
        let setup = Setup::parse(SETUP).unwrap();
        assert!((setup.domain.theta_min - 30f64.to_radians()).abs() < 1e-12);
        assert!((setup.domain.phi_max - 40f64.to_radians()).abs() < 1e-12);
        assert_eq!(setup.domain.z_min, 5_371_000.0);
        assert_eq!(setup.discretization.nx_global, 22);
        assert_eq!(setup.discretization.lpd, 4);
        assert_eq!(setup.discretization.px, 2);
        assert_eq!(setup.discretization.py, 3);
        assert_eq!(setup.discretization.pz, 1);
    }

    #[test]
    fn test_header_is_skipped_even_if_numeric() {
        let text = SETUP.replacen("MODEL", "99", 1);
        let setup = Setup::parse(&text).unwrap();
        assert!((setup.domain.theta_min - 30f64.to_radians()).abs() < 1e-12);
    }

    #[test]
    fn test_truncated_setup() {
        let truncated: String = SETUP.lines().take(12).collect::<Vec<_>>().join("\n");
        assert!(matches!(
            Setup::parse(&truncated),
            Err(SemError::InvalidConfiguration(msg)) if msg.contains("ends before")
        ));
    }

    #[test]
    fn test_truncated_inside_flags_names_missing_field() {
        let truncated: String = SETUP.lines().take(9).collect::<Vec<_>>().join("\n");
        assert!(matches!(
            Setup::parse(&truncated),
            Err(SemError::InvalidConfiguration(msg)) if msg.contains("'model_type'")
        ));
    }

    /// Replace the value on the line whose comment mentions `marker`.
    fn with_value(marker: &str, value: &str) -> String {
        replace_value(SETUP, marker, value)
    }

    fn replace_value(text: &str, marker: &str, value: &str) -> String {
        text.lines()
            .map(|line| {
                if line.contains(marker) {
                    let comment = &line[line.find('!').unwrap()..];
                    format!("{} {}", value, comment)
                } else {
                    line.to_string()
                }
            })
            .collect::<Vec<_>>()
            .join("\n")
    }

    #[test]
    fn test_non_numeric_value() {
        let text = with_value("! nx_global", "abc");
        assert!(matches!(
            Setup::parse(&text),
            Err(SemError::InvalidConfiguration(msg)) if msg.contains("nx_global")
        ));
    }

    #[test]
    fn test_negative_processor_count() {
        let text = with_value("! py,", "-3");
        assert!(matches!(
            Setup::parse(&text),
            Err(SemError::InvalidConfiguration(_))
        ));
    }

    #[test]
    fn test_inconsistent_discretization() {
        let text = with_value("! ny_global", "28");
        assert!(matches!(
            Setup::parse(&text),
            Err(SemError::InvalidConfiguration(msg)) if msg.contains("not divisible")
        ));
    }

    #[test]
    fn test_float_where_integer_expected() {
        let text = with_value("! lpd", "4.5");
        assert!(matches!(
            Setup::parse(&text),
            Err(SemError::InvalidConfiguration(msg)) if msg.contains("lpd")
        ));
    }

    #[test]
    fn test_element_count_overflow() {
        let text = with_value("! nx_global", &usize::MAX.to_string());
        let text = replace_value(&text, "! px,", "1");
        assert!(matches!(
            Setup::parse(&text),
            Err(SemError::InvalidConfiguration(msg)) if msg.contains("overflow")
        ));
    }

    #[test]
    fn test_record_size_overflow() {
        let huge = (1usize << 40).to_string();
        let mut text = SETUP.to_string();
        for (marker, value) in [
            ("! nx_global", huge.as_str()),
            ("! ny_global", huge.as_str()),
            ("! px,", "1"),
            ("! py,", "1"),
        ] {
            text = replace_value(&text, marker, value);
        }
        assert!(matches!(
            Setup::parse(&text),
            Err(SemError::InvalidConfiguration(msg)) if msg.contains("too large")
        ));
    }

    #[test]
    fn test_missing_file() {
        assert!(matches!(
            Setup::from_path("/nonexistent/setup"),
            Err(SemError::InvalidConfiguration(_))
        ));
    }
}
