//! Boundary policies and explicit padding
//!
//! Neighborhood operations read outside the grid near its edges. A
//! [`BoundaryPolicy`] decides what those virtual samples are:
//!
//! ```text
//! grid:        a b c d
//! Constant(0): 0 0 | a b c d | 0 0
//! EdgeExtend:  a a | a b c d | d d
//! Reflect:     c b | a b c d | c b
//! ```

use crate::error::{Error, Result};
use crate::grid::{Grid, GridElement};

/// Rule for samples that lie outside the grid
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum BoundaryPolicy<T> {
    /// Fill with a fixed value
    Constant(T),
    /// Repeat the nearest border sample
    EdgeExtend,
    /// Mirror about the border sample without repeating it
    Reflect,
}

impl<T: Copy> BoundaryPolicy<T> {
    /// Map a possibly out-of-range coordinate on an axis of length `len` to
    /// the source coordinate it reads from. `None` means the constant value.
    pub fn source_index(&self, i: isize, len: usize) -> Option<usize> {
        if i >= 0 && (i as usize) < len {
            return Some(i as usize);
        }
        match self {
            BoundaryPolicy::Constant(_) => None,
            BoundaryPolicy::EdgeExtend => Some(i.clamp(0, len as isize - 1) as usize),
            BoundaryPolicy::Reflect => Some(reflect_index(i, len)),
        }
    }

    /// The fill value for `Constant`, otherwise `None`
    pub fn constant(&self) -> Option<T> {
        match self {
            BoundaryPolicy::Constant(v) => Some(*v),
            _ => None,
        }
    }
}

/// Mirror `i` into `[0, len)`; periodic with period `2 * (len - 1)`.
fn reflect_index(i: isize, len: usize) -> usize {
    if len == 1 {
        return 0;
    }
    let period = 2 * (len as isize - 1);
    let m = i.rem_euclid(period);
    if m >= len as isize {
        (period - m) as usize
    } else {
        m as usize
    }
}

/// Return a new grid enlarged by `margins[k]` samples on both sides of axis `k`.
pub fn pad<T: GridElement>(
    grid: &Grid<T>,
    margins: &[usize],
    policy: BoundaryPolicy<T>,
) -> Result<Grid<T>> {
    let shape = grid.shape();
    if margins.len() != shape.len() {
        return Err(Error::ShapeMismatch {
            expected: shape.to_vec(),
            actual: margins.to_vec(),
        });
    }

    let padded_shape: Vec<usize> = shape
        .iter()
        .zip(margins)
        .map(|(&n, &m)| n + 2 * m)
        .collect();

    let data = grid.data();
    let fill = policy.constant().unwrap_or_default();
    let mut source = vec![0usize; shape.len()];

    Grid::from_shape_fn(&padded_shape, |idx| {
        for (axis, &i) in idx.iter().enumerate() {
            let virtual_i = i as isize - margins[axis] as isize;
            match policy.source_index(virtual_i, shape[axis]) {
                Some(s) => source[axis] = s,
                None => return fill,
            }
        }
        data[source.as_slice()]
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn row(values: &[u8]) -> Grid<u8> {
        Grid::from_vec(&[values.len()], values.to_vec()).unwrap()
    }

    #[test]
    fn test_constant_padding() {
        let padded = pad(&row(&[1, 2, 3, 4]), &[2], BoundaryPolicy::Constant(9)).unwrap();
        assert_eq!(padded.to_vec(), vec![9, 9, 1, 2, 3, 4, 9, 9]);
    }

    #[test]
    fn test_edge_extend_padding() {
        let padded = pad(&row(&[1, 2, 3, 4]), &[2], BoundaryPolicy::EdgeExtend).unwrap();
        assert_eq!(padded.to_vec(), vec![1, 1, 1, 2, 3, 4, 4, 4]);
    }

    #[test]
    fn test_reflect_padding_skips_border_sample() {
        let padded = pad(&row(&[1, 2, 3, 4]), &[2], BoundaryPolicy::Reflect).unwrap();
        assert_eq!(padded.to_vec(), vec![3, 2, 1, 2, 3, 4, 3, 2]);
    }

    #[test]
    fn test_reflect_longer_than_axis() {
        let padded = pad(&row(&[1, 2]), &[3], BoundaryPolicy::Reflect).unwrap();
        assert_eq!(padded.to_vec(), vec![2, 1, 2, 1, 2, 1, 2, 1]);

        let single = pad(&row(&[7]), &[2], BoundaryPolicy::Reflect).unwrap();
        assert_eq!(single.to_vec(), vec![7; 5]);
    }

    #[test]
    fn test_pad_2d() {
        let grid = Grid::from_vec(&[2, 2], vec![1u8, 2, 3, 4]).unwrap();
        let padded = pad(&grid, &[1, 0], BoundaryPolicy::EdgeExtend).unwrap();
        assert_eq!(padded.shape(), &[4, 2]);
        assert_eq!(padded.to_vec(), vec![1, 2, 1, 2, 3, 4, 3, 4]);

        let corners = pad(&grid, &[1, 1], BoundaryPolicy::Constant(0)).unwrap();
        assert_eq!(corners.shape(), &[4, 4]);
        assert_eq!(corners.get(&[1, 1]).unwrap(), 1);
        assert_eq!(corners.get(&[0, 0]).unwrap(), 0);
        assert_eq!(corners.get(&[3, 3]).unwrap(), 0);
    }

    #[test]
    fn test_pad_margin_count_mismatch() {
        let grid: Grid<u8> = Grid::new(&[3, 3]).unwrap();
        assert!(matches!(
            pad(&grid, &[1], BoundaryPolicy::EdgeExtend),
            Err(Error::ShapeMismatch { .. })
        ));
    }
}
