//! Binary dilation
//!
//! Minkowski dilation: a pixel becomes foreground if any foreground pixel
//! reaches it through the structuring element. This is the "any covered
//! neighbor" rule applied with the element reflected through its center;
//! for symmetric elements the two are the same.

use morpho_core::{Algorithm, BoundaryPolicy, Error, Grid, Result};

use crate::neighborhood::window::map_windows;
use crate::neighborhood::StructuringElement;

/// Parameters for binary dilation
#[derive(Debug, Clone)]
pub struct DilateParams {
    /// Structuring element shape
    pub element: StructuringElement,
    pub boundary: BoundaryPolicy<bool>,
}

impl Default for DilateParams {
    fn default() -> Self {
        Self {
            element: StructuringElement::default(),
            boundary: BoundaryPolicy::Constant(false),
        }
    }
}

/// Dilation algorithm
#[derive(Debug, Clone, Default)]
pub struct Dilate;

impl Algorithm for Dilate {
    type Input = Grid<bool>;
    type Output = Grid<bool>;
    type Params = DilateParams;
    type Error = Error;

    fn name(&self) -> &'static str {
        "Dilate"
    }

    fn description(&self) -> &'static str {
        "Binary dilation (any covered neighbor is foreground)"
    }

    fn execute(&self, input: Self::Input, params: Self::Params) -> Result<Self::Output> {
        dilate_with(&input, &params.element, params.boundary)
    }
}

/// Dilate with outside samples treated as background
pub fn dilate(grid: &Grid<bool>, element: &StructuringElement) -> Result<Grid<bool>> {
    dilate_with(grid, element, BoundaryPolicy::Constant(false))
}

pub fn dilate_with(
    grid: &Grid<bool>,
    element: &StructuringElement,
    boundary: BoundaryPolicy<bool>,
) -> Result<Grid<bool>> {
    let reflected = element.reflected();
    let positions = reflected.positions();
    map_windows(grid, reflected.shape(), &positions, boundary, |covered| {
        covered.iter().any(|&v| v)
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_single_pixel_grows_to_element() {
        let mut grid: Grid<bool> = Grid::new(&[5, 5]).unwrap();
        grid.set(&[2, 2], true).unwrap();
        let out = dilate(&grid, &StructuringElement::disk(2, 1).unwrap()).unwrap();
        assert_eq!(out.count_true(), 5);
        assert!(out.get(&[1, 2]).unwrap());
        assert!(!out.get(&[1, 1]).unwrap());
    }

    #[test]
    fn test_asymmetric_element_shifts_forward() {
        // Element covering the center and the cell to its right
        let se = StructuringElement::from_rows(vec![vec![false, true, true]]).unwrap();
        let grid = Grid::from_vec(&[1, 5], vec![false, true, false, false, false]).unwrap();
        let out = dilate(&grid, &se).unwrap();
        assert_eq!(out.to_vec(), vec![false, true, true, false, false]);
    }

    #[test]
    fn test_dilate_clipped_at_border() {
        let mut grid: Grid<bool> = Grid::new(&[3, 3]).unwrap();
        grid.set(&[0, 0], true).unwrap();
        let out = dilate(&grid, &StructuringElement::default()).unwrap();
        assert_eq!(out.count_true(), 4);
    }

    #[test]
    fn test_algorithm_trait() {
        let mut grid: Grid<bool> = Grid::new(&[3, 3]).unwrap();
        grid.set(&[1, 1], true).unwrap();
        assert_eq!(Dilate.execute_default(grid).unwrap().count_true(), 9);
    }
}
