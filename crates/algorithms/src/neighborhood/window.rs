//! Sliding-window engine shared by every neighborhood operation
//!
//! The input is padded by the half extent of the footprint, so every window
//! lies inside the padded buffer. The output is split along axis 0 and each
//! slab is computed independently.

use crate::maybe_rayon::*;
use morpho_core::grid::pad;
use morpho_core::{BoundaryPolicy, Error, Grid, GridElement, Result};

use super::element::validate_extents;

pub(crate) fn row_major_strides(shape: &[usize]) -> Vec<usize> {
    let mut strides = vec![1usize; shape.len()];
    for k in (0..shape.len().saturating_sub(1)).rev() {
        strides[k] = strides[k + 1] * shape[k + 1];
    }
    strides
}

/// Step a multi-index through `shape` in row-major order
pub(crate) fn advance(index: &mut [usize], shape: &[usize]) {
    for k in (0..index.len()).rev() {
        index[k] += 1;
        if index[k] < shape[k] {
            return;
        }
        index[k] = 0;
    }
}

/// Evaluate `f` on the neighborhood of every sample.
///
/// `extents` is the footprint shape and `positions` lists the footprint
/// cells that take part, in the order their values are handed to `f`.
pub(crate) fn map_windows<T, U, F>(
    grid: &Grid<T>,
    extents: &[usize],
    positions: &[Vec<usize>],
    boundary: BoundaryPolicy<T>,
    f: F,
) -> Result<Grid<U>>
where
    T: GridElement,
    U: GridElement,
    F: Fn(&[T]) -> U + Send + Sync,
{
    validate_extents(extents)?;
    if extents.len() != grid.ndim() {
        return Err(Error::shape_mismatch(grid.shape(), extents));
    }

    let margins: Vec<usize> = extents.iter().map(|n| n / 2).collect();
    let padded = pad(grid, &margins, boundary)?;
    let strides = row_major_strides(padded.shape());
    let samples = padded
        .data()
        .as_slice()
        .ok_or_else(|| Error::Other("padded grid is not contiguous".to_string()))?;

    let offsets: Vec<usize> = positions
        .iter()
        .map(|p| p.iter().zip(&strides).map(|(i, s)| i * s).sum())
        .collect();

    let shape = grid.shape().to_vec();
    let inner_shape = &shape[1..];
    let inner_len: usize = inner_shape.iter().product();

    let output: Vec<U> = (0..shape[0])
        .into_par_iter()
        .flat_map(|i0| {
            let mut slab = Vec::with_capacity(inner_len);
            let mut values = Vec::with_capacity(offsets.len());
            let mut index = vec![0usize; inner_shape.len()];

            for _ in 0..inner_len {
                let base = i0 * strides[0]
                    + index
                        .iter()
                        .zip(&strides[1..])
                        .map(|(i, s)| i * s)
                        .sum::<usize>();
                values.clear();
                values.extend(offsets.iter().map(|&o| samples[base + o]));
                slab.push(f(&values));
                advance(&mut index, inner_shape);
            }
            slab
        })
        .collect();

    Grid::from_vec(&shape, output)
}
