//! Element-block layout of a box record and its physical reordering.
//!
//! On disk a box is stored column-major with shape
//! `(nx, ny, nz, n, n, n)`: element indices first, then the GLL node
//! indices within the element. The physical cube interleaves them so that
//! along each axis the node index varies faster than the element index:
//!
//! ```text
//! cube[ex * n + i, ey * n + j, ez * n + k] = raw[ex, ey, ez, i, j, k]
//! ```

use ndarray::{Array3, Array6, ShapeBuilder};
use sem_common::Discretization;

use crate::error::{FieldError, FieldResult};

/// Shape of one processor box record.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BoxLayout {
    pub nx: usize,
    pub ny: usize,
    pub nz: usize,
    /// GLL nodes per element edge (`lpd + 1`).
    pub nodes: usize,
}

impl BoxLayout {
    pub fn new(nx: usize, ny: usize, nz: usize, nodes: usize) -> Self {
        Self { nx, ny, nz, nodes }
    }

    /// Layout of every box of a validated discretization.
    pub fn from_discretization(discretization: &Discretization) -> FieldResult<Self> {
        let elements = discretization.local_elements()?;
        Ok(Self::new(
            elements.nx,
            elements.ny,
            elements.nz,
            discretization.nodes_per_element(),
        ))
    }

    /// Number of values in one record.
    pub fn raw_len(&self) -> usize {
        self.nx * self.ny * self.nz * self.nodes.pow(3)
    }

    /// Shape of the reordered cube.
    pub fn physical_shape(&self) -> (usize, usize, usize) {
        (
            self.nx * self.nodes,
            self.ny * self.nodes,
            self.nz * self.nodes,
        )
    }

    /// Reorder raw record values into the physical cube.
    pub fn to_physical(&self, values: Vec<f32>) -> FieldResult<Array3<f32>> {
        let n = self.nodes;
        let raw = Array6::from_shape_vec((self.nx, self.ny, self.nz, n, n, n).f(), values)
            .map_err(|e| {
                FieldError::format(format!("cannot view record as {:?}: {}", self, e))
            })?;

        // (ex, ey, ez, i, j, k) -> (ex, i, ey, j, ez, k)
        let interleaved = raw.permuted_axes([0, 3, 1, 4, 2, 5]);
        let ordered: Vec<f32> = interleaved.iter().copied().collect();

        Array3::from_shape_vec(self.physical_shape(), ordered)
            .map_err(|e| FieldError::format(format!("cannot build physical cube: {}", e)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use test_utils::sequential_values;

    #[test]
    fn test_single_element_matches_column_major() {
        let layout = BoxLayout::new(1, 1, 1, 3);
        let cube = layout.to_physical(sequential_values(27)).unwrap();
        assert_eq!(cube.dim(), (3, 3, 3));
        for i in 0..3 {
            for j in 0..3 {
                for k in 0..3 {
                    assert_eq!(cube[[i, j, k]], (i + 3 * j + 9 * k) as f32);
                }
            }
        }
    }

    #[test]
    fn test_elements_interleave_with_nodes() {
        // raw offset = ex + 2*(ey + 1*(ez + 1*(i + 3*(j + 3*k))))
        let layout = BoxLayout::new(2, 1, 1, 3);
        let cube = layout.to_physical(sequential_values(54)).unwrap();
        assert_eq!(cube.dim(), (6, 3, 3));
        for ex in 0..2 {
            for i in 0..3 {
                for j in 0..3 {
                    for k in 0..3 {
                        let expected = ex + 2 * i + 6 * j + 18 * k;
                        assert_eq!(cube[[ex * 3 + i, j, k]], expected as f32);
                    }
                }
            }
        }
    }

    #[test]
    fn test_all_axes_interleave() {
        let (nx, ny, nz, n) = (2, 3, 2, 3);
        let layout = BoxLayout::new(nx, ny, nz, n);
        let cube = layout.to_physical(sequential_values(layout.raw_len())).unwrap();

        for ex in 0..nx {
            for ey in 0..ny {
                for ez in 0..nz {
                    for i in 0..n {
                        for j in 0..n {
                            for k in 0..n {
                                let raw = ex + nx * (ey + ny * (ez + nz * (i + n * (j + n * k))));
                                let got = cube[[ex * n + i, ey * n + j, ez * n + k]];
                                assert_eq!(got, raw as f32);
                            }
                        }
                    }
                }
            }
        }
    }

    #[test]
    fn test_wrong_value_count() {
        let layout = BoxLayout::new(1, 1, 1, 3);
        assert!(matches!(
            layout.to_physical(sequential_values(26)),
            Err(FieldError::Format(_))
        ));
    }

    #[test]
    fn test_from_discretization() {
        let d = Discretization {
            nx_global: 4,
            ny_global: 2,
            nz_global: 0,
            lpd: 3,
            px: 2,
            py: 1,
            pz: 1,
        };
        let layout = BoxLayout::from_discretization(&d).unwrap();
        assert_eq!(layout, BoxLayout::new(3, 3, 1, 4));
        assert_eq!(layout.raw_len(), 9 * 64);
        assert_eq!(layout.physical_shape(), (12, 12, 4));
    }
}
