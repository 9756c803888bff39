//! Structuring element definitions for morphology and rank filters
//!
//! A structuring element is a boolean footprint with an odd extent on every
//! axis. Its center is the geometric middle of the footprint.

use ndarray::{ArrayD, Dimension, IxDyn};
use morpho_core::{Error, Grid, Result};

/// Boolean footprint of a neighborhood operation
#[derive(Debug, Clone, PartialEq)]
pub struct StructuringElement {
    mask: ArrayD<bool>,
}

impl Default for StructuringElement {
    /// 3x3 square
    fn default() -> Self {
        Self {
            mask: ArrayD::from_elem(IxDyn(&[3, 3]), true),
        }
    }
}

/// Every extent must be odd (and therefore at least 1)
pub(crate) fn validate_extents(shape: &[usize]) -> Result<()> {
    if shape.is_empty() || shape.iter().any(|&n| n % 2 == 0) {
        return Err(Error::InvalidStructuringElement {
            shape: shape.to_vec(),
        });
    }
    Ok(())
}

fn check_ndim(ndim: usize) -> Result<()> {
    if ndim == 0 {
        return Err(Error::InvalidParameter {
            name: "ndim",
            value: "0".to_string(),
            reason: "a structuring element needs at least one axis".to_string(),
        });
    }
    Ok(())
}

impl StructuringElement {
    /// Build from an arbitrary boolean grid
    pub fn from_mask(mask: &Grid<bool>) -> Result<Self> {
        validate_extents(mask.shape())?;
        Ok(Self {
            mask: mask.data().clone(),
        })
    }

    /// Build a 2D element from rows of flags
    pub fn from_rows(rows: Vec<Vec<bool>>) -> Result<Self> {
        let height = rows.len();
        let width = rows.first().map_or(0, Vec::len);
        if height == 0 || width == 0 {
            return Err(Error::InvalidStructuringElement {
                shape: vec![height, width],
            });
        }
        if let Some(bad) = rows.iter().find(|r| r.len() != width) {
            return Err(Error::InvalidShape {
                shape: vec![height, bad.len()],
                reason: format!("ragged rows: expected {} columns", width),
            });
        }
        validate_extents(&[height, width])?;

        let flat: Vec<bool> = rows.into_iter().flatten().collect();
        let mask = ArrayD::from_shape_vec(IxDyn(&[height, width]), flat)
            .map_err(|e| Error::Other(e.to_string()))?;
        Ok(Self { mask })
    }

    fn from_offset_fn<F>(ndim: usize, radius: usize, keep: F) -> Result<Self>
    where
        F: Fn(&[isize]) -> bool,
    {
        check_ndim(ndim)?;
        let extent = 2 * radius + 1;
        let r = radius as isize;
        let mut offset = vec![0isize; ndim];
        let mask = ArrayD::from_shape_fn(IxDyn(&vec![extent; ndim]), |idx: IxDyn| {
            for (o, &i) in offset.iter_mut().zip(idx.slice()) {
                *o = i as isize - r;
            }
            keep(&offset)
        });
        Ok(Self { mask })
    }

    /// Square (2D) or box (3D) of side `2 * radius + 1`
    pub fn square(ndim: usize, radius: usize) -> Result<Self> {
        Self::from_offset_fn(ndim, radius, |_| true)
    }

    /// Full box with the given (odd) extent per axis
    pub fn square_extents(extents: &[usize]) -> Result<Self> {
        validate_extents(extents)?;
        Ok(Self {
            mask: ArrayD::from_elem(IxDyn(extents), true),
        })
    }

    /// Face-connected cross: offsets with at most one non-zero component
    pub fn cross(ndim: usize, radius: usize) -> Result<Self> {
        Self::from_offset_fn(ndim, radius, |o| o.iter().filter(|&&d| d != 0).count() <= 1)
    }

    /// Disk (2D) or ball (3D): offsets within Euclidean distance `radius`
    pub fn disk(ndim: usize, radius: usize) -> Result<Self> {
        let r2 = (radius * radius) as isize;
        Self::from_offset_fn(ndim, radius, |o| o.iter().map(|d| d * d).sum::<isize>() <= r2)
    }

    pub fn shape(&self) -> &[usize] {
        self.mask.shape()
    }

    pub fn ndim(&self) -> usize {
        self.mask.ndim()
    }

    /// Half extent per axis (the padding a filter needs)
    pub fn half_extents(&self) -> Vec<usize> {
        self.shape().iter().map(|n| n / 2).collect()
    }

    /// Number of active cells
    pub fn count(&self) -> usize {
        self.mask.iter().filter(|&&v| v).count()
    }

    pub fn contains_center(&self) -> bool {
        let center = self.half_extents();
        self.mask[center.as_slice()]
    }

    /// Active cells as positions inside the footprint, in row-major order
    pub fn positions(&self) -> Vec<Vec<usize>> {
        self.mask
            .indexed_iter()
            .filter(|&(_, &active)| active)
            .map(|(idx, _)| idx.slice().to_vec())
            .collect()
    }

    /// Active cells as offsets from the center
    pub fn offsets(&self) -> Vec<Vec<isize>> {
        let half = self.half_extents();
        self.positions()
            .into_iter()
            .map(|p| {
                p.iter()
                    .zip(&half)
                    .map(|(&i, &h)| i as isize - h as isize)
                    .collect()
            })
            .collect()
    }

    /// Point reflection through the center
    pub fn reflected(&self) -> Self {
        let mut mask = self.mask.clone();
        for axis in 0..mask.ndim() {
            mask.invert_axis(ndarray::Axis(axis));
        }
        Self {
            mask: mask.as_standard_layout().into_owned(),
        }
    }

    pub fn is_symmetric(&self) -> bool {
        self.reflected() == *self
    }

    /// The footprint as a boolean grid
    pub fn to_grid(&self) -> Result<Grid<bool>> {
        Grid::from_array(self.mask.clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn has(se: &StructuringElement, offset: &[isize]) -> bool {
        se.offsets().iter().any(|o| o.as_slice() == offset)
    }

    #[test]
    fn test_square_offsets() {
        let se = StructuringElement::square(2, 1).unwrap();
        assert_eq!(se.shape(), &[3, 3]);
        assert_eq!(se.count(), 9);
        assert!(has(&se, &[0, 0]));
        assert!(has(&se, &[-1, -1]));
        assert!(has(&se, &[1, 1]));
    }

    #[test]
    fn test_cross_offsets() {
        let se = StructuringElement::cross(2, 1).unwrap();
        assert_eq!(se.count(), 5);
        assert!(has(&se, &[-1, 0]));
        assert!(has(&se, &[0, 1]));
        assert!(!has(&se, &[-1, -1]));
        assert!(!has(&se, &[1, 1]));

        let ball = StructuringElement::cross(3, 1).unwrap();
        assert_eq!(ball.count(), 7);
    }

    #[test]
    fn test_disk_offsets() {
        // Diagonals of a radius-1 disk lie at sqrt(2)
        let se = StructuringElement::disk(2, 1).unwrap();
        assert_eq!(se.count(), 5);

        let se = StructuringElement::disk(2, 2).unwrap();
        assert_eq!(se.count(), 13);
        assert!(has(&se, &[1, 1]));
        assert!(!has(&se, &[2, 1]));
    }

    #[test]
    fn test_radius_zero_is_single_cell() {
        let se = StructuringElement::square(3, 0).unwrap();
        assert_eq!(se.shape(), &[1, 1, 1]);
        assert_eq!(se.offsets(), vec![vec![0, 0, 0]]);
    }

    #[test]
    fn test_from_rows() {
        let se = StructuringElement::from_rows(vec![
            vec![true, false, false],
            vec![true, false, false],
            vec![true, true, true],
        ])
        .unwrap();
        assert_eq!(se.count(), 5);
        assert!(has(&se, &[-1, -1]));
        assert!(has(&se, &[1, 1]));
        assert!(!se.contains_center());
    }

    #[test]
    fn test_even_extent_rejected() {
        let result = StructuringElement::from_rows(vec![vec![true, false], vec![false, true]]);
        assert!(matches!(
            result,
            Err(Error::InvalidStructuringElement { .. })
        ));

        let mask = Grid::filled(&[3, 4], true).unwrap();
        assert!(matches!(
            StructuringElement::from_mask(&mask),
            Err(Error::InvalidStructuringElement { .. })
        ));
        assert!(matches!(
            StructuringElement::from_rows(vec![]),
            Err(Error::InvalidStructuringElement { .. })
        ));
    }

    #[test]
    fn test_reflection() {
        let se = StructuringElement::from_rows(vec![
            vec![false, false, false],
            vec![false, true, true],
            vec![false, false, false],
        ])
        .unwrap();
        assert!(!se.is_symmetric());
        let r = se.reflected();
        assert!(has(&r, &[0, -1]));
        assert!(!has(&r, &[0, 1]));
        assert!(StructuringElement::disk(2, 2).unwrap().is_symmetric());
    }

    #[test]
    fn test_square_extents() {
        let se = StructuringElement::square_extents(&[1, 5]).unwrap();
        assert_eq!(se.count(), 5);
        assert_eq!(se.half_extents(), vec![0, 2]);
        assert!(StructuringElement::square_extents(&[3, 2]).is_err());
    }

    #[test]
    fn test_default() {
        let se = StructuringElement::default();
        assert_eq!(se, StructuringElement::square(2, 1).unwrap());
        assert_eq!(se.half_extents(), vec![1, 1]);
    }
}
