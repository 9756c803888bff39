//! Connected-component labeling
//!
//! Two-pass union-find labeling of binary grids of any dimension. The first
//! pass gives each foreground pixel the smallest label among its already
//! scanned neighbors (or a new one) and records equivalences; the second pass
//! renumbers components `1..=n` in the order their first pixel is scanned.

mod connectivity;
mod union_find;

use morpho_core::{Algorithm, Error, Grid, Result};
use tracing::debug;

pub use connectivity::Connectivity;
use union_find::UnionFind;

use crate::neighborhood::window::{advance, row_major_strides};

/// Label grid produced by [`label`]
#[derive(Debug, Clone, PartialEq)]
pub struct LabeledGrid {
    labels: Grid<u32>,
    num_labels: u32,
}

impl LabeledGrid {
    pub fn labels(&self) -> &Grid<u32> {
        &self.labels
    }

    pub fn into_labels(self) -> Grid<u32> {
        self.labels
    }

    /// Number of components; labels run from 1 to this value
    pub fn num_labels(&self) -> u32 {
        self.num_labels
    }

    pub fn shape(&self) -> &[usize] {
        self.labels.shape()
    }

    /// Foreground mask of a single component
    pub fn mask_of(&self, label: u32) -> Grid<bool> {
        self.labels.map(|l| l == label && l != 0)
    }
}

/// Parameters for labeling
#[derive(Debug, Clone, Copy, Default)]
pub struct LabelParams {
    pub connectivity: Connectivity,
}

/// Labeling algorithm
#[derive(Debug, Clone, Default)]
pub struct Label;

impl Algorithm for Label {
    type Input = Grid<bool>;
    type Output = LabeledGrid;
    type Params = LabelParams;
    type Error = Error;

    fn name(&self) -> &'static str {
        "Label"
    }

    fn description(&self) -> &'static str {
        "Connected-component labeling"
    }

    fn execute(&self, input: Self::Input, params: Self::Params) -> Result<Self::Output> {
        label(&input, params.connectivity)
    }
}

/// Label the connected foreground components of `binary`.
///
/// Background stays 0. The result is deterministic: the same input always
/// yields the same numbering.
pub fn label(binary: &Grid<bool>, connectivity: Connectivity) -> Result<LabeledGrid> {
    if binary.len() >= u32::MAX as usize {
        return Err(Error::InvalidParameter {
            name: "binary",
            value: format!("{:?}", binary.shape()),
            reason: "too many pixels for 32-bit labels".to_string(),
        });
    }

    let shape = binary.shape().to_vec();
    let ndim = shape.len();
    let strides = row_major_strides(&shape);
    let offsets = connectivity.backward_offsets(ndim);
    let pixels = binary.to_vec();

    let mut provisional = vec![0u32; pixels.len()];
    let mut forest = UnionFind::new();
    let mut index = vec![0usize; ndim];

    for (linear, &foreground) in pixels.iter().enumerate() {
        if foreground {
            let mut current = 0u32;
            for offset in &offsets {
                let Some(neighbor) = neighbor_index(&index, offset, &shape, &strides, linear) else {
                    continue;
                };
                let l = provisional[neighbor];
                if l == 0 {
                    continue;
                }
                current = if current == 0 { l } else { forest.union(current, l) };
            }
            if current == 0 {
                current = forest.make_set();
            }
            provisional[linear] = current;
        }
        advance(&mut index, &shape);
    }

    // Renumber roots in first-encounter order
    let mut renumber = vec![0u32; forest_len(&provisional)];
    let mut next = 0u32;
    let labels: Vec<u32> = provisional
        .iter()
        .map(|&l| {
            if l == 0 {
                return 0;
            }
            let root = forest.find(l) as usize;
            if renumber[root] == 0 {
                next += 1;
                renumber[root] = next;
            }
            renumber[root]
        })
        .collect();

    debug!(components = next, ?connectivity, "labeled grid");
    Ok(LabeledGrid {
        labels: Grid::from_vec(&shape, labels)?,
        num_labels: next,
    })
}

fn forest_len(provisional: &[u32]) -> usize {
    provisional.iter().copied().max().unwrap_or(0) as usize + 1
}

/// Linear index of `index + offset`, or `None` outside the grid
fn neighbor_index(
    index: &[usize],
    offset: &[isize],
    shape: &[usize],
    strides: &[usize],
    linear: usize,
) -> Option<usize> {
    let mut target = linear as isize;
    for axis in 0..index.len() {
        let i = index[axis] as isize + offset[axis];
        if i < 0 || i >= shape[axis] as isize {
            return None;
        }
        target += offset[axis] * strides[axis] as isize;
    }
    Some(target as usize)
}
