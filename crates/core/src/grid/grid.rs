//! Main Grid type

use std::ops::Range;

use ndarray::{ArrayD, ArrayViewD, ArrayViewMutD, Axis, Dimension, IxDyn, Slice};

use crate::error::{Error, Result};
use crate::grid::view::{GridView, GridViewMut};
use crate::grid::{DType, GridElement};

/// How values are brought into the range of a narrower (or different) type.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CastPolicy {
    /// Keep the numeric value; round to nearest and clamp to the target range
    Clip,
    /// Map the source type's nominal range onto the target's, then clamp
    Rescale,
}

/// Reduction applied along one axis by [`Grid::reduce`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReduceOp {
    Max,
    Min,
    Mean,
}

/// An N-dimensional grid of samples of a single type.
///
/// Axis order follows the image convention: `(row, col)` for 2D grayscale,
/// `(row, col, channel)` for RGB, `(plane, row, col)` for volumes. The shape
/// never changes after creation and every extent is at least 1; values may
/// be mutated in place.
///
/// # Example
///
/// ```
/// use morpho_core::Grid;
///
/// let mut grid: Grid<u8> = Grid::new(&[4, 5])?;
/// grid.set(&[1, 2], 200)?;
/// assert_eq!(grid.get(&[1, 2])?, 200);
/// assert!(grid.get(&[4, 0]).is_err());
/// # Ok::<(), morpho_core::Error>(())
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct Grid<T: GridElement> {
    /// Samples in row-major (C) order
    data: ArrayD<T>,
}

pub(crate) fn validate_shape(shape: &[usize]) -> Result<()> {
    if shape.is_empty() {
        return Err(Error::InvalidShape {
            shape: shape.to_vec(),
            reason: "a grid needs at least one axis".to_string(),
        });
    }
    if shape.contains(&0) {
        return Err(Error::InvalidShape {
            shape: shape.to_vec(),
            reason: "every axis extent must be at least 1".to_string(),
        });
    }
    Ok(())
}

pub(crate) fn check_index(index: &[usize], shape: &[usize]) -> Result<()> {
    if index.len() != shape.len() || index.iter().zip(shape).any(|(&i, &n)| i >= n) {
        return Err(Error::IndexOutOfRange {
            index: index.to_vec(),
            shape: shape.to_vec(),
        });
    }
    Ok(())
}

pub(crate) fn check_ranges(ranges: &[Range<usize>], shape: &[usize]) -> Result<()> {
    if ranges.len() != shape.len() {
        return Err(Error::ShapeMismatch {
            expected: shape.to_vec(),
            actual: ranges.iter().map(|r| r.len()).collect(),
        });
    }
    for (range, &extent) in ranges.iter().zip(shape) {
        if range.start >= range.end || range.end > extent {
            return Err(Error::IndexOutOfRange {
                index: ranges.iter().map(|r| r.end).collect(),
                shape: shape.to_vec(),
            });
        }
    }
    Ok(())
}

impl<T: GridElement> Grid<T> {
    /// Create a grid filled with the zero value of `T`
    pub fn new(shape: &[usize]) -> Result<Self> {
        Self::filled(shape, T::default())
    }

    /// Create a grid filled with a specific value
    pub fn filled(shape: &[usize], value: T) -> Result<Self> {
        validate_shape(shape)?;
        Ok(Self {
            data: ArrayD::from_elem(IxDyn(shape), value),
        })
    }

    /// Create a grid from row-major data
    pub fn from_vec(shape: &[usize], data: Vec<T>) -> Result<Self> {
        validate_shape(shape)?;
        let expected: usize = shape.iter().product();
        if data.len() != expected {
            return Err(Error::InvalidShape {
                shape: shape.to_vec(),
                reason: format!("{} values supplied, {} required", data.len(), expected),
            });
        }
        let array =
            ArrayD::from_shape_vec(IxDyn(shape), data).map_err(|e| Error::Other(e.to_string()))?;
        Ok(Self { data: array })
    }

    /// Create a grid by evaluating `f` at every index
    pub fn from_shape_fn<F>(shape: &[usize], mut f: F) -> Result<Self>
    where
        F: FnMut(&[usize]) -> T,
    {
        validate_shape(shape)?;
        Ok(Self {
            data: ArrayD::from_shape_fn(IxDyn(shape), |idx: IxDyn| f(idx.slice())),
        })
    }

    /// Wrap an existing ndarray
    pub fn from_array(data: ArrayD<T>) -> Result<Self> {
        validate_shape(data.shape())?;
        Ok(Self { data })
    }

    /// Create a grid with the same shape, filled with a value
    pub fn like<U: GridElement>(&self, value: U) -> Grid<U> {
        Grid {
            data: ArrayD::from_elem(self.data.raw_dim(), value),
        }
    }

    // Dimensions

    /// Per-axis extents
    pub fn shape(&self) -> &[usize] {
        self.data.shape()
    }

    /// Number of axes
    pub fn ndim(&self) -> usize {
        self.data.ndim()
    }

    /// Total number of samples
    pub fn len(&self) -> usize {
        self.data.len()
    }

    /// Always false: grids have at least one sample
    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    /// Sample type tag
    pub fn dtype(&self) -> DType {
        T::DTYPE
    }

    /// Fail with `ShapeMismatch` unless `other` has the same shape
    pub fn ensure_same_shape<U: GridElement>(&self, other: &Grid<U>) -> Result<()> {
        if self.shape() != other.shape() {
            return Err(Error::shape_mismatch(self.shape(), other.shape()));
        }
        Ok(())
    }

    // Data access

    /// Get the value at `index`
    pub fn get(&self, index: &[usize]) -> Result<T> {
        check_index(index, self.shape())?;
        Ok(self.data[index])
    }

    /// Set the value at `index`
    pub fn set(&mut self, index: &[usize], value: T) -> Result<()> {
        check_index(index, self.shape())?;
        self.data[index] = value;
        Ok(())
    }

    /// Non-owning view of a sub-block; `ranges` has one half-open range per axis
    pub fn slice(&self, ranges: &[Range<usize>]) -> Result<GridView<'_, T>> {
        check_ranges(ranges, self.shape())?;
        let view = self
            .data
            .slice_each_axis(|ax| Slice::from(ranges[ax.axis.index()].clone()));
        Ok(GridView::new(view))
    }

    /// Mutable non-owning view of a sub-block
    pub fn slice_mut(&mut self, ranges: &[Range<usize>]) -> Result<GridViewMut<'_, T>> {
        check_ranges(ranges, self.shape())?;
        let view = self
            .data
            .slice_each_axis_mut(|ax| Slice::from(ranges[ax.axis.index()].clone()));
        Ok(GridViewMut::new(view))
    }

    /// View of the whole grid
    pub fn view(&self) -> ArrayViewD<'_, T> {
        self.data.view()
    }

    /// Mutable view of the whole grid
    pub fn view_mut(&mut self) -> ArrayViewMutD<'_, T> {
        self.data.view_mut()
    }

    /// Reference to the underlying array
    pub fn data(&self) -> &ArrayD<T> {
        &self.data
    }

    /// Consume the grid and return the underlying array
    pub fn into_array(self) -> ArrayD<T> {
        self.data
    }

    /// Samples in row-major order
    pub fn to_vec(&self) -> Vec<T> {
        self.data.iter().copied().collect()
    }

    /// Iterate over samples in row-major order
    pub fn iter(&self) -> impl Iterator<Item = &T> {
        self.data.iter()
    }

    /// Iterate over `(index, value)` pairs in row-major order
    pub fn indexed_iter(&self) -> impl Iterator<Item = (IxDyn, &T)> {
        self.data.indexed_iter()
    }

    // Transforms

    /// Apply `f` to every sample
    pub fn map<U, F>(&self, f: F) -> Grid<U>
    where
        U: GridElement,
        F: Fn(T) -> U,
    {
        Grid {
            data: self.data.mapv(f),
        }
    }

    /// Combine two grids of the same shape sample by sample
    pub fn zip_map<U, V, F>(&self, other: &Grid<U>, f: F) -> Result<Grid<V>>
    where
        U: GridElement,
        V: GridElement,
        F: Fn(T, U) -> V,
    {
        self.ensure_same_shape(other)?;
        let mut out = ArrayD::from_elem(self.data.raw_dim(), V::default());
        ndarray::Zip::from(&mut out)
            .and(&self.data)
            .and(&other.data)
            .for_each(|o, &a, &b| *o = f(a, b));
        Ok(Grid { data: out })
    }

    /// Convert to another sample type under an explicit policy.
    ///
    /// Casting to `bool` yields `value != 0` under either policy.
    pub fn cast<U: GridElement>(&self, policy: CastPolicy) -> Grid<U> {
        let scale = match policy {
            CastPolicy::Clip => 1.0,
            CastPolicy::Rescale => U::DTYPE.nominal_max() / T::DTYPE.nominal_max(),
        };
        if U::DTYPE == DType::Bool || scale == 1.0 {
            self.map(|v| U::from_f64_clipped(v.to_f64()))
        } else {
            self.map(|v| U::from_f64_clipped(v.to_f64() * scale))
        }
    }

    /// Collapse `axis`, combining all samples that share the remaining
    /// coordinates. The result is a float grid with that axis removed.
    pub fn reduce(&self, axis: usize, op: ReduceOp) -> Result<Grid<f64>> {
        if axis >= self.ndim() {
            return Err(Error::InvalidParameter {
                name: "axis",
                value: axis.to_string(),
                reason: format!("grid has {} axes", self.ndim()),
            });
        }
        if self.ndim() < 2 {
            return Err(Error::InvalidParameter {
                name: "axis",
                value: axis.to_string(),
                reason: "cannot reduce the only axis of a 1-D grid".to_string(),
            });
        }

        let ax = Axis(axis);
        let data = match op {
            ReduceOp::Max => self
                .data
                .fold_axis(ax, f64::NEG_INFINITY, |&acc, &v| acc.max(v.to_f64())),
            ReduceOp::Min => self
                .data
                .fold_axis(ax, f64::INFINITY, |&acc, &v| acc.min(v.to_f64())),
            ReduceOp::Mean => {
                let n = self.shape()[axis] as f64;
                self.data
                    .fold_axis(ax, 0.0, |&acc, &v| acc + v.to_f64())
                    .mapv(|sum| sum / n)
            }
        };
        Ok(Grid { data })
    }

    // Statistics

    /// Minimum, maximum and mean over all samples, ignoring NaN
    pub fn statistics(&self) -> GridStatistics {
        let mut min = f64::INFINITY;
        let mut max = f64::NEG_INFINITY;
        let mut sum = 0.0;
        let mut count = 0usize;

        for &value in self.data.iter() {
            let v = value.to_f64();
            if v.is_nan() {
                continue;
            }
            min = min.min(v);
            max = max.max(v);
            sum += v;
            count += 1;
        }

        GridStatistics {
            min,
            max,
            mean: if count > 0 { sum / count as f64 } else { f64::NAN },
            count,
        }
    }
}

impl Grid<bool> {
    /// Number of foreground samples
    pub fn count_true(&self) -> usize {
        self.data.iter().filter(|&&v| v).count()
    }
}

/// Basic statistics for a grid
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GridStatistics {
    pub min: f64,
    pub max: f64,
    pub mean: f64,
    /// Number of non-NaN samples
    pub count: usize,
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    fn ramp(shape: &[usize]) -> Grid<f64> {
        let n: usize = shape.iter().product();
        Grid::from_vec(shape, (0..n).map(|v| v as f64).collect()).unwrap()
    }

    #[test]
    fn test_grid_creation() {
        let grid: Grid<u16> = Grid::filled(&[3, 4, 5], 7).unwrap();
        assert_eq!(grid.shape(), &[3, 4, 5]);
        assert_eq!(grid.len(), 60);
        assert_eq!(grid.dtype(), DType::U16);
        assert!(grid.iter().all(|&v| v == 7));
    }

    #[test]
    fn test_invalid_shapes() {
        assert!(matches!(
            Grid::<u8>::new(&[]),
            Err(Error::InvalidShape { .. })
        ));
        assert!(matches!(
            Grid::<u8>::new(&[3, 0]),
            Err(Error::InvalidShape { .. })
        ));
        assert!(Grid::from_vec(&[2, 2], vec![1u8, 2, 3]).is_err());
    }

    #[test]
    fn test_grid_access() {
        let mut grid: Grid<f64> = Grid::new(&[10, 10]).unwrap();
        grid.set(&[5, 5], 42.0).unwrap();
        assert_eq!(grid.get(&[5, 5]).unwrap(), 42.0);
    }

    #[test]
    fn test_index_out_of_range() {
        let mut grid: Grid<u8> = Grid::new(&[4, 4]).unwrap();
        assert!(matches!(
            grid.get(&[4, 0]),
            Err(Error::IndexOutOfRange { .. })
        ));
        assert!(matches!(
            grid.set(&[0, 0, 0], 1),
            Err(Error::IndexOutOfRange { .. })
        ));
        assert!(matches!(grid.get(&[1]), Err(Error::IndexOutOfRange { .. })));
    }

    #[test]
    fn test_slice_shares_storage() {
        let mut grid = ramp(&[4, 5]);
        {
            let view = grid.slice(&[1..3, 2..5]).unwrap();
            assert_eq!(view.shape(), &[2, 3]);
            assert_eq!(view.get(&[0, 0]).unwrap(), 7.0);
            assert_eq!(view.get(&[1, 2]).unwrap(), 14.0);
            assert!(view.get(&[2, 0]).is_err());
        }
        {
            let mut view = grid.slice_mut(&[0..1, 0..5]).unwrap();
            view.fill(-1.0);
        }
        assert_eq!(grid.get(&[0, 4]).unwrap(), -1.0);
        assert_eq!(grid.get(&[1, 0]).unwrap(), 5.0);
    }

    #[test]
    fn test_slice_rejects_bad_ranges() {
        let grid = ramp(&[4, 5]);
        assert!(matches!(
            grid.slice(&[0..5, 0..5]),
            Err(Error::IndexOutOfRange { .. })
        ));
        assert!(matches!(
            grid.slice(&[2..2, 0..5]),
            Err(Error::IndexOutOfRange { .. })
        ));
        assert!(matches!(
            grid.slice(&[0..2]),
            Err(Error::ShapeMismatch { .. })
        ));
    }

    #[test]
    fn test_cast_clip() {
        let grid = Grid::from_vec(&[4], vec![-5.0, 12.4, 300.0, 254.5]).unwrap();
        let cast: Grid<u8> = grid.cast(CastPolicy::Clip);
        assert_eq!(cast.to_vec(), vec![0, 12, 255, 255]);
    }

    #[test]
    fn test_cast_rescale() {
        let grid = Grid::from_vec(&[3], vec![0.0, 0.5, 1.0]).unwrap();
        let cast: Grid<u8> = grid.cast(CastPolicy::Rescale);
        assert_eq!(cast.to_vec(), vec![0, 128, 255]);

        let bytes = Grid::from_vec(&[2], vec![255u8, 1]).unwrap();
        let wide: Grid<u16> = bytes.cast(CastPolicy::Rescale);
        assert_eq!(wide.to_vec(), vec![65535, 257]);
        let float: Grid<f64> = bytes.cast(CastPolicy::Rescale);
        assert_relative_eq!(float.get(&[0]).unwrap(), 1.0);
    }

    #[test]
    fn test_cast_to_bool() {
        let grid = Grid::from_vec(&[3], vec![0u8, 1, 200]).unwrap();
        let mask: Grid<bool> = grid.cast(CastPolicy::Rescale);
        assert_eq!(mask.to_vec(), vec![false, true, true]);
    }

    #[test]
    fn test_reduce() {
        // Shape (2, 3): [[0, 1, 2], [3, 4, 5]]
        let grid = ramp(&[2, 3]);
        let max = grid.reduce(0, ReduceOp::Max).unwrap();
        assert_eq!(max.shape(), &[3]);
        assert_eq!(max.to_vec(), vec![3.0, 4.0, 5.0]);

        let min = grid.reduce(1, ReduceOp::Min).unwrap();
        assert_eq!(min.to_vec(), vec![0.0, 3.0]);

        let mean = grid.reduce(1, ReduceOp::Mean).unwrap();
        assert_relative_eq!(mean.get(&[0]).unwrap(), 1.0);
        assert_relative_eq!(mean.get(&[1]).unwrap(), 4.0);
    }

    #[test]
    fn test_reduce_channel_axis() {
        let grid: Grid<u8> =
            Grid::from_shape_fn(&[2, 2, 3], |idx| (idx[2] * 10) as u8).unwrap();
        let max = grid.reduce(2, ReduceOp::Max).unwrap();
        assert_eq!(max.shape(), &[2, 2]);
        assert!(max.iter().all(|&v| v == 20.0));
    }

    #[test]
    fn test_reduce_invalid_axis() {
        assert!(ramp(&[2, 3]).reduce(2, ReduceOp::Max).is_err());
        assert!(ramp(&[6]).reduce(0, ReduceOp::Max).is_err());
    }

    #[test]
    fn test_zip_map_shape_mismatch() {
        let a = ramp(&[2, 3]);
        let b = ramp(&[3, 2]);
        assert!(matches!(
            a.zip_map(&b, |x, y| x + y),
            Err(Error::ShapeMismatch { .. })
        ));
        let sum: Grid<f64> = a.zip_map(&a, |x, y| x + y).unwrap();
        assert_eq!(sum.get(&[1, 2]).unwrap(), 10.0);
    }

    #[test]
    fn test_statistics() {
        let grid = ramp(&[10, 10]);
        let stats = grid.statistics();
        assert_eq!(stats.min, 0.0);
        assert_eq!(stats.max, 99.0);
        assert_relative_eq!(stats.mean, 49.5);
        assert_eq!(stats.count, 100);
    }
}
