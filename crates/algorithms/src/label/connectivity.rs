//! Pixel adjacency rules

use morpho_core::{Error, Result};

/// Which neighbors count as adjacent
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Connectivity {
    /// Neighbors sharing a face: 4 in 2D, 6 in 3D
    Face,
    /// Any touching neighbor: 8 in 2D, 26 in 3D
    #[default]
    Full,
}

impl Connectivity {
    /// Map the conventional neighbor count (4, 8, 6, 26) to a connectivity
    pub fn from_neighbors(neighbors: usize, ndim: usize) -> Result<Self> {
        if ndim == 0 {
            return Err(Error::InvalidParameter {
                name: "ndim",
                value: "0".to_string(),
                reason: "connectivity needs at least one axis".to_string(),
            });
        }
        if neighbors == Connectivity::Face.neighbor_count(ndim) {
            Ok(Connectivity::Face)
        } else if neighbors == Connectivity::Full.neighbor_count(ndim) {
            Ok(Connectivity::Full)
        } else {
            Err(Error::InvalidParameter {
                name: "connectivity",
                value: neighbors.to_string(),
                reason: format!(
                    "expected {} or {} for {} dimensions",
                    Connectivity::Face.neighbor_count(ndim),
                    Connectivity::Full.neighbor_count(ndim),
                    ndim
                ),
            })
        }
    }

    /// Number of adjacent positions around an interior pixel
    pub fn neighbor_count(self, ndim: usize) -> usize {
        match self {
            Connectivity::Face => 2 * ndim,
            Connectivity::Full => 3usize.pow(ndim as u32) - 1,
        }
    }

    /// All adjacent offsets, in row-major order
    pub fn offsets(self, ndim: usize) -> Vec<Vec<isize>> {
        let total = 3usize.pow(ndim as u32);
        (0..total)
            .map(|mut code| {
                let mut offset = vec![0isize; ndim];
                for axis in (0..ndim).rev() {
                    offset[axis] = (code % 3) as isize - 1;
                    code /= 3;
                }
                offset
            })
            .filter(|o| {
                let nonzero = o.iter().filter(|&&d| d != 0).count();
                match self {
                    Connectivity::Face => nonzero == 1,
                    Connectivity::Full => nonzero > 0,
                }
            })
            .collect()
    }

    /// Offsets that point to already-scanned pixels in a row-major pass
    pub(crate) fn backward_offsets(self, ndim: usize) -> Vec<Vec<isize>> {
        self.offsets(ndim)
            .into_iter()
            .filter(|o| o.iter().find(|&&d| d != 0) == Some(&-1))
            .collect()
    }
}
