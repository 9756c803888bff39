//! Binary erosion
//!
//! A pixel survives only if every cell covered by the structuring element
//! centered on it is foreground. Samples outside the grid read as
//! background unless another boundary policy is given.

use morpho_core::{Algorithm, BoundaryPolicy, Error, Grid, Result};

use crate::neighborhood::window::map_windows;
use crate::neighborhood::StructuringElement;

/// Parameters for binary erosion
#[derive(Debug, Clone)]
pub struct ErodeParams {
    /// Structuring element shape
    pub element: StructuringElement,
    pub boundary: BoundaryPolicy<bool>,
}

impl Default for ErodeParams {
    fn default() -> Self {
        Self {
            element: StructuringElement::default(),
            boundary: BoundaryPolicy::Constant(false),
        }
    }
}

/// Erosion algorithm
#[derive(Debug, Clone, Default)]
pub struct Erode;

impl Algorithm for Erode {
    type Input = Grid<bool>;
    type Output = Grid<bool>;
    type Params = ErodeParams;
    type Error = Error;

    fn name(&self) -> &'static str {
        "Erode"
    }

    fn description(&self) -> &'static str {
        "Binary erosion (all covered neighbors must be foreground)"
    }

    fn execute(&self, input: Self::Input, params: Self::Params) -> Result<Self::Output> {
        erode_with(&input, &params.element, params.boundary)
    }
}

/// Erode with outside samples treated as background
pub fn erode(grid: &Grid<bool>, element: &StructuringElement) -> Result<Grid<bool>> {
    erode_with(grid, element, BoundaryPolicy::Constant(false))
}

pub fn erode_with(
    grid: &Grid<bool>,
    element: &StructuringElement,
    boundary: BoundaryPolicy<bool>,
) -> Result<Grid<bool>> {
    let positions = element.positions();
    map_windows(grid, element.shape(), &positions, boundary, |covered| {
        covered.iter().all(|&v| v)
    })
}
