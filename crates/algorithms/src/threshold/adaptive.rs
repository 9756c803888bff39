//! Adaptive (local) thresholding
//!
//! Each sample is compared against a statistic of its own window:
//! `output[p] = grid[p] > stat(p) - offset`.

use morpho_core::{BoundaryPolicy, Error, Grid, Result};

use crate::filters::{apply_rank, smooth_separable, RankOp};
use crate::neighborhood::validate_extents;
use crate::neighborhood::window::map_windows;
use crate::neighborhood::StructuringElement;

/// Local statistic used as the per-pixel cutoff
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum AdaptiveMethod {
    /// Arithmetic mean of the window
    #[default]
    LocalMeanOffset,
    /// Median of the window
    LocalMedianOffset,
    /// Gaussian-weighted mean, sigma = (extent - 1) / 6 per axis
    LocalGaussianOffset,
}

/// Parameters for adaptive thresholding
#[derive(Debug, Clone)]
pub struct AdaptiveParams {
    /// Odd window extent per axis
    pub window: Vec<usize>,
    /// Subtracted from the local statistic
    pub offset: f64,
    pub method: AdaptiveMethod,
    pub boundary: BoundaryPolicy<f64>,
}

impl Default for AdaptiveParams {
    fn default() -> Self {
        Self {
            window: vec![35, 35],
            offset: 0.0,
            method: AdaptiveMethod::LocalMeanOffset,
            boundary: BoundaryPolicy::Reflect,
        }
    }
}

/// Threshold against a local statistic with the default (reflect) boundary
pub fn threshold_adaptive(
    grid: &Grid<f64>,
    window_extent: &[usize],
    k: f64,
    method: AdaptiveMethod,
) -> Result<Grid<bool>> {
    threshold_adaptive_with(
        grid,
        &AdaptiveParams {
            window: window_extent.to_vec(),
            offset: k,
            method,
            boundary: BoundaryPolicy::Reflect,
        },
    )
}

pub fn threshold_adaptive_with(grid: &Grid<f64>, params: &AdaptiveParams) -> Result<Grid<bool>> {
    validate_extents(&params.window)?;
    if params.window.len() != grid.ndim() {
        return Err(Error::shape_mismatch(grid.shape(), &params.window));
    }

    let local = local_statistic(grid, params)?;
    let k = params.offset;
    grid.zip_map(&local, |v, t| v > t - k)
}

fn local_statistic(grid: &Grid<f64>, params: &AdaptiveParams) -> Result<Grid<f64>> {
    let window = &params.window;
    match params.method {
        AdaptiveMethod::LocalMeanOffset => {
            let n = window.iter().product::<usize>() as f64;
            let positions = StructuringElement::square_extents(window)?.positions();
            map_windows(grid, window, &positions, params.boundary, |values| {
                values.iter().sum::<f64>() / n
            })
        }
        AdaptiveMethod::LocalMedianOffset => {
            let element = StructuringElement::square_extents(window)?;
            apply_rank(grid, &element, RankOp::Median, params.boundary)
        }
        AdaptiveMethod::LocalGaussianOffset => {
            let sigmas: Vec<Option<f64>> = window
                .iter()
                .map(|&n| Some((n as f64 - 1.0) / 6.0))
                .collect();
            smooth_separable(grid, &sigmas, 4.0, params.boundary)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Dark text on a left-to-right illumination gradient
    fn uneven_page() -> Grid<f64> {
        Grid::from_shape_fn(&[9, 30], |idx| {
            let background = 0.2 + idx[1] as f64 * 0.02;
            if idx[0] == 4 && idx[1] % 5 == 2 {
                background - 0.15
            } else {
                background
            }
        })
        .unwrap()
    }

    #[test]
    fn test_mean_offset_finds_dark_marks() {
        let page = uneven_page();
        let out = threshold_adaptive(&page, &[5, 5], 0.05, AdaptiveMethod::LocalMeanOffset).unwrap();
        // Marks fall below their local mean by more than the offset
        for c in (2..30).step_by(5) {
            assert!(!out.get(&[4, c]).unwrap(), "mark at column {}", c);
        }
        assert!(out.get(&[1, 10]).unwrap());
    }

    #[test]
    fn test_constant_grid_with_positive_offset_is_foreground() {
        let grid: Grid<f64> = Grid::filled(&[6, 6], 0.5).unwrap();
        for method in [
            AdaptiveMethod::LocalMeanOffset,
            AdaptiveMethod::LocalMedianOffset,
            AdaptiveMethod::LocalGaussianOffset,
        ] {
            let out = threshold_adaptive(&grid, &[3, 3], 0.01, method).unwrap();
            assert_eq!(out.count_true(), 36, "{:?}", method);
        }
        // Mean and median of a constant window are exact
        for method in [AdaptiveMethod::LocalMeanOffset, AdaptiveMethod::LocalMedianOffset] {
            let out = threshold_adaptive(&grid, &[3, 3], 0.0, method).unwrap();
            assert_eq!(out.count_true(), 0, "{:?}", method);
        }
    }

    #[test]
    fn test_even_window_rejected() {
        let grid: Grid<f64> = Grid::new(&[6, 6]).unwrap();
        assert!(matches!(
            threshold_adaptive(&grid, &[4, 3], 0.0, AdaptiveMethod::LocalMeanOffset),
            Err(Error::InvalidStructuringElement { .. })
        ));
        assert!(matches!(
            threshold_adaptive(&grid, &[3], 0.0, AdaptiveMethod::LocalMeanOffset),
            Err(Error::ShapeMismatch { .. })
        ));
    }

    #[test]
    fn test_window_of_one_compares_with_self() {
        let grid = Grid::from_vec(&[1, 3], vec![0.1, 0.5, 0.9]).unwrap();
        let out =
            threshold_adaptive(&grid, &[1, 1], 0.0, AdaptiveMethod::LocalGaussianOffset).unwrap();
        assert_eq!(out.count_true(), 0);
    }
}
