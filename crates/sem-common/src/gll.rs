//! Gauss-Lobatto-Legendre node tables.

use crate::error::{SemError, SemResult};

const GLL_2: [f64; 3] = [-1.0, 0.0, 1.0];
const GLL_3: [f64; 4] = [-1.0, -0.4472135954999579, 0.4472135954999579, 1.0];
const GLL_4: [f64; 5] = [-1.0, -0.6546536707079772, 0.0, 0.6546536707079772, 1.0];
const GLL_5: [f64; 6] = [
    -1.0,
    -0.7650553239294647,
    -0.2852315164806451,
    0.2852315164806451,
    0.7650553239294647,
    1.0,
];
const GLL_6: [f64; 7] = [
    -1.0,
    -0.8302238962785670,
    -0.4688487934707142,
    0.0,
    0.4688487934707142,
    0.8302238962785670,
    1.0,
];
const GLL_7: [f64; 8] = [
    -1.0,
    -0.8717401485096066,
    -0.5917001814331423,
    -0.2092992179024789,
    0.2092992179024789,
    0.5917001814331423,
    0.8717401485096066,
    1.0,
];

/// GLL nodes on `[-1, 1]` for Lagrange polynomial degree `lpd`.
///
/// Only degrees 2 through 7 are tabulated.
pub fn gll_points(lpd: usize) -> SemResult<&'static [f64]> {
    match lpd {
        2 => Ok(&GLL_2),
        3 => Ok(&GLL_3),
        4 => Ok(&GLL_4),
        5 => Ok(&GLL_5),
        6 => Ok(&GLL_6),
        7 => Ok(&GLL_7),
        degree => Err(SemError::UnsupportedDegree { degree }),
    }
}
