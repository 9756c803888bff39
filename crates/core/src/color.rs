//! Color and polarity conversion

use crate::error::{Error, Result};
use crate::grid::{Grid, GridElement};

/// Luminance weights for linear RGB (ITU-R BT.709)
pub const LUMA_WEIGHTS: [f64; 3] = [0.2125, 0.7154, 0.0721];

/// Convert a `(rows, cols, 3)` RGB grid to a float grayscale grid.
///
/// Samples are first normalized to `[0, 1]` by the nominal range of their
/// type, so the result is in `[0, 1]` for any in-range input.
pub fn to_grayscale<T: GridElement>(color: &Grid<T>) -> Result<Grid<f64>> {
    let shape = color.shape();
    if shape.len() != 3 || shape[2] != 3 {
        let mut expected: Vec<usize> = shape.iter().take(2).copied().collect();
        expected.push(3);
        return Err(Error::ShapeMismatch {
            expected,
            actual: shape.to_vec(),
        });
    }

    let scale = 1.0 / T::DTYPE.nominal_max();
    let data = color.data();
    Grid::from_shape_fn(&shape[..2], |idx| {
        let (r, c) = (idx[0], idx[1]);
        LUMA_WEIGHTS
            .iter()
            .enumerate()
            .map(|(ch, w)| w * data[[r, c, ch].as_slice()].to_f64() * scale)
            .sum()
    })
}

/// Invert polarity: integers become `MAX - v`, floats `1 - v`, booleans `!v`.
pub fn invert<T: GridElement>(grid: &Grid<T>) -> Grid<T> {
    let max = T::DTYPE.nominal_max();
    grid.map(|v| T::from_f64_clipped(max - v.to_f64()))
}
