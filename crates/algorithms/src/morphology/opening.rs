//! Binary opening (erosion followed by dilation)
//!
//! Removes foreground features the structuring element does not fit into.

use morpho_core::{Algorithm, BoundaryPolicy, Error, Grid, Result};

use super::dilate::dilate_with;
use super::erode::erode_with;
use crate::neighborhood::StructuringElement;

/// Parameters for binary opening
#[derive(Debug, Clone)]
pub struct OpeningParams {
    /// Structuring element shape
    pub element: StructuringElement,
    pub boundary: BoundaryPolicy<bool>,
}

impl Default for OpeningParams {
    fn default() -> Self {
        Self {
            element: StructuringElement::default(),
            boundary: BoundaryPolicy::Constant(false),
        }
    }
}

/// Opening algorithm
#[derive(Debug, Clone, Default)]
pub struct Opening;

impl Algorithm for Opening {
    type Input = Grid<bool>;
    type Output = Grid<bool>;
    type Params = OpeningParams;
    type Error = Error;

    fn name(&self) -> &'static str {
        "Opening"
    }

    fn description(&self) -> &'static str {
        "Binary opening (erosion then dilation) to remove small foreground features"
    }

    fn execute(&self, input: Self::Input, params: Self::Params) -> Result<Self::Output> {
        opening_with(&input, &params.element, params.boundary)
    }
}

/// Opening with outside samples treated as background
pub fn opening(grid: &Grid<bool>, element: &StructuringElement) -> Result<Grid<bool>> {
    opening_with(grid, element, BoundaryPolicy::Constant(false))
}

pub fn opening_with(
    grid: &Grid<bool>,
    element: &StructuringElement,
    boundary: BoundaryPolicy<bool>,
) -> Result<Grid<bool>> {
    let eroded = erode_with(grid, element, boundary)?;
    dilate_with(&eroded, element, boundary)
}
