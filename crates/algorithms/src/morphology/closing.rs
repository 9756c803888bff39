//! Binary closing (dilation followed by erosion)
//!
//! Fills background gaps the structuring element does not fit into. The
//! grid is padded by the element's half extent first, following the
//! boundary policy, so foreground at the border is never eroded away by the
//! closing.

use morpho_core::grid::pad;
use morpho_core::{Algorithm, BoundaryPolicy, Error, Grid, Result};
use std::ops::Range;

use super::dilate::dilate_with;
use super::erode::erode_with;
use crate::neighborhood::StructuringElement;

/// Parameters for binary closing
#[derive(Debug, Clone)]
pub struct ClosingParams {
    /// Structuring element shape
    pub element: StructuringElement,
    pub boundary: BoundaryPolicy<bool>,
}

impl Default for ClosingParams {
    fn default() -> Self {
        Self {
            element: StructuringElement::default(),
            boundary: BoundaryPolicy::Constant(false),
        }
    }
}

/// Closing algorithm
#[derive(Debug, Clone, Default)]
pub struct Closing;

impl Algorithm for Closing {
    type Input = Grid<bool>;
    type Output = Grid<bool>;
    type Params = ClosingParams;
    type Error = Error;

    fn name(&self) -> &'static str {
        "Closing"
    }

    fn description(&self) -> &'static str {
        "Binary closing (dilation then erosion) to fill small background gaps"
    }

    fn execute(&self, input: Self::Input, params: Self::Params) -> Result<Self::Output> {
        closing_with(&input, &params.element, params.boundary)
    }
}

/// Closing with outside samples treated as background.
///
/// The result always contains the input and closing it again changes
/// nothing.
pub fn closing(grid: &Grid<bool>, element: &StructuringElement) -> Result<Grid<bool>> {
    closing_with(grid, element, BoundaryPolicy::Constant(false))
}

/// Closing with outside samples supplied by `boundary`. The result contains
/// the input for every policy.
pub fn closing_with(
    grid: &Grid<bool>,
    element: &StructuringElement,
    boundary: BoundaryPolicy<bool>,
) -> Result<Grid<bool>> {
    if element.ndim() != grid.ndim() {
        return Err(Error::shape_mismatch(grid.shape(), element.shape()));
    }

    let margins = element.half_extents();
    let padded = pad(grid, &margins, boundary)?;
    let dilated = dilate_with(&padded, element, boundary)?;
    let closed = erode_with(&dilated, element, boundary)?;

    let interior: Vec<Range<usize>> = margins
        .iter()
        .zip(grid.shape())
        .map(|(&m, &n)| m..m + n)
        .collect();
    closed.slice(&interior)?.to_grid()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_closing_fills_hole() {
        let mut grid = Grid::filled(&[7, 7], true).unwrap();
        grid.set(&[3, 3], false).unwrap();
        let out = closing(&grid, &StructuringElement::default()).unwrap();
        assert_eq!(out.count_true(), 49);
    }

    #[test]
    fn test_closing_keeps_border_foreground() {
        let mut grid: Grid<bool> = Grid::new(&[5, 5]).unwrap();
        grid.set(&[0, 0], true).unwrap();
        grid.set(&[0, 4], true).unwrap();
        let out = closing(&grid, &StructuringElement::square(2, 2).unwrap()).unwrap();
        assert!(out.get(&[0, 0]).unwrap());
        assert!(out.get(&[0, 4]).unwrap());
    }

    #[test]
    fn test_closing_superset_and_idempotent() {
        let grid = Grid::from_shape_fn(&[9, 7], |idx| (idx[0] * 5 + idx[1] * 3) % 7 < 2).unwrap();
        let se = StructuringElement::disk(2, 1).unwrap();
        let once = closing(&grid, &se).unwrap();
        assert!(grid.iter().zip(once.iter()).all(|(&g, &c)| !g || c));
        assert_eq!(closing(&once, &se).unwrap(), once);
    }

    #[test]
    fn test_algorithm_trait() {
        let grid = Grid::from_vec(&[1, 3], vec![true, false, true]).unwrap();
        let out = Closing.execute(grid, ClosingParams {
            element: StructuringElement::from_rows(vec![vec![true, true, true]]).unwrap(),
            ..Default::default()
        });
        assert_eq!(out.unwrap().count_true(), 3);
    }

    #[test]
    fn test_closing_boundary_policy() {
        let grid: Grid<bool> = Grid::new(&[1, 5]).unwrap();
        let se = StructuringElement::square(2, 1).unwrap();
        assert_eq!(closing(&grid, &se).unwrap().count_true(), 0);
        assert_eq!(
            closing_with(&grid, &se, BoundaryPolicy::Constant(false)).unwrap(),
            closing(&grid, &se).unwrap()
        );

        let out = Closing
            .execute(grid.clone(), ClosingParams {
                element: se.clone(),
                boundary: BoundaryPolicy::Constant(true),
            })
            .unwrap();
        assert_eq!(out.count_true(), 5);

        let edge = Grid::from_vec(&[1, 5], vec![true, false, false, false, false]).unwrap();
        let out = closing_with(&edge, &se, BoundaryPolicy::EdgeExtend).unwrap();
        assert!(edge.iter().zip(out.iter()).all(|(&g, &c)| !g || c));
    }
}
