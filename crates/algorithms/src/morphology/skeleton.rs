//! Skeletonization by directional parallel thinning
//!
//! Each iteration runs four subpasses (north, south, east, west). A subpass
//! removes, all at once, every foreground pixel that
//! - has background on the side being peeled,
//! - is 8-simple (Yokoi connectivity number 1), and
//! - is not an end point (it has more than one 8-neighbor).
//!
//! Candidates are found in parallel from the frozen state of the previous
//! subpass; removals are committed afterwards. Iteration stops when a full
//! round removes nothing.

use crate::maybe_rayon::*;
use morpho_core::{Algorithm, Error, Grid, Result};
use tracing::debug;

/// Neighbor offsets in counter-clockwise order starting east:
/// E, NE, N, NW, W, SW, S, SE
const RING: [(isize, isize); 8] = [
    (0, 1),
    (-1, 1),
    (-1, 0),
    (-1, -1),
    (0, -1),
    (1, -1),
    (1, 0),
    (1, 1),
];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Side {
    North,
    South,
    East,
    West,
}

impl Side {
    /// Position of this side's neighbor in `RING`
    fn ring_index(self) -> usize {
        match self {
            Side::East => 0,
            Side::North => 2,
            Side::West => 4,
            Side::South => 6,
        }
    }
}

/// Parameters for skeletonization (none yet)
#[derive(Debug, Clone, Default)]
pub struct SkeletonizeParams;

/// Skeletonization algorithm
#[derive(Debug, Clone, Default)]
pub struct Skeletonize;

impl Algorithm for Skeletonize {
    type Input = Grid<bool>;
    type Output = Grid<bool>;
    type Params = SkeletonizeParams;
    type Error = Error;

    fn name(&self) -> &'static str {
        "Skeletonize"
    }

    fn description(&self) -> &'static str {
        "Topology-preserving thinning of 2D binary shapes to one-pixel-wide lines"
    }

    fn execute(&self, input: Self::Input, _params: Self::Params) -> Result<Self::Output> {
        skeletonize(&input)
    }
}

fn neighbors(pixels: &[bool], rows: usize, cols: usize, r: usize, c: usize) -> [bool; 8] {
    let mut ring = [false; 8];
    for (k, &(dr, dc)) in RING.iter().enumerate() {
        let nr = r as isize + dr;
        let nc = c as isize + dc;
        if nr >= 0 && nc >= 0 && (nr as usize) < rows && (nc as usize) < cols {
            ring[k] = pixels[nr as usize * cols + nc as usize];
        }
    }
    ring
}

/// Yokoi connectivity number for 8-connected foreground
fn yokoi_8(ring: &[bool; 8]) -> u8 {
    let bg = |k: usize| u8::from(!ring[k % 8]);
    [0, 2, 4, 6]
        .iter()
        .map(|&k| bg(k) - bg(k) * bg(k + 1) * bg(k + 2))
        .sum()
}

fn removable(ring: &[bool; 8], side: Side) -> bool {
    if ring[side.ring_index()] {
        return false;
    }
    let count = ring.iter().filter(|&&v| v).count();
    count > 1 && yokoi_8(ring) == 1
}

/// Thin a 2D binary grid to its skeleton.
///
/// The result is a subset of the input with the same 8-connected
/// foreground components and the same holes.
pub fn skeletonize(grid: &Grid<bool>) -> Result<Grid<bool>> {
    if grid.ndim() != 2 {
        return Err(Error::UnsupportedDimensionality {
            ndim: grid.ndim(),
            operation: "skeletonize",
        });
    }
    let (rows, cols) = (grid.shape()[0], grid.shape()[1]);
    let mut pixels = grid.to_vec();

    let mut iterations = 0usize;
    loop {
        iterations += 1;
        let mut removed = 0usize;

        for side in [Side::North, Side::South, Side::East, Side::West] {
            let frozen = &pixels;
            let candidates: Vec<usize> = (0..rows)
                .into_par_iter()
                .flat_map(|r| {
                    (0..cols)
                        .filter(|&c| {
                            frozen[r * cols + c]
                                && removable(&neighbors(frozen, rows, cols, r, c), side)
                        })
                        .map(|c| r * cols + c)
                        .collect::<Vec<_>>()
                })
                .collect();

            removed += candidates.len();
            for i in candidates {
                pixels[i] = false;
            }
        }

        if removed == 0 {
            break;
        }
    }

    debug!(iterations, "skeletonize converged");
    Grid::from_vec(grid.shape(), pixels)
}
