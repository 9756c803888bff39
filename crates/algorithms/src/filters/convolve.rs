//! Linear filtering by true convolution

use morpho_core::{BoundaryPolicy, CastPolicy, DType, Error, Grid, GridElement, Result};

use crate::neighborhood::window::map_windows;
use crate::neighborhood::Kernel;

/// Convolve `grid` with `kernel`.
///
/// The kernel is flipped on every axis before it is slid over the padded
/// input, so an asymmetric kernel behaves as a convolution rather than a
/// correlation. The result is always `f64`. Boolean grids are rejected.
pub fn apply_convolution<T: GridElement>(
    grid: &Grid<T>,
    kernel: &Kernel,
    boundary: BoundaryPolicy<f64>,
) -> Result<Grid<f64>> {
    if T::DTYPE == DType::Bool {
        return Err(Error::UnsupportedDType {
            dtype: T::DTYPE,
            operation: "convolution",
        });
    }
    if kernel.ndim() != grid.ndim() {
        return Err(Error::shape_mismatch(grid.shape(), kernel.shape()));
    }

    let input: Grid<f64> = grid.cast(CastPolicy::Clip);
    let flipped = kernel.flipped();
    let (positions, weights) = flipped.taps();

    map_windows(&input, flipped.shape(), &positions, boundary, |values| {
        values.iter().zip(&weights).map(|(v, w)| v * w).sum()
    })
}

/// Convolve with the default zero boundary
pub fn convolve<T: GridElement>(grid: &Grid<T>, kernel: &Kernel) -> Result<Grid<f64>> {
    apply_convolution(grid, kernel, BoundaryPolicy::Constant(0.0))
}

/// Gradient magnitude from a horizontal and a vertical edge kernel
pub fn edge_magnitude<T: GridElement>(
    grid: &Grid<T>,
    horizontal: &Kernel,
    vertical: &Kernel,
    boundary: BoundaryPolicy<f64>,
) -> Result<Grid<f64>> {
    let gh = apply_convolution(grid, horizontal, boundary)?;
    let gv = apply_convolution(grid, vertical, boundary)?;
    gh.zip_map(&gv, |a, b| a.hypot(b))
}
