//! Non-owning views into a grid
//!
//! Views share storage with the grid they were sliced from; only the
//! bounds and strides differ. Indices are relative to the view origin.

use std::ops::Range;

use ndarray::{ArrayViewD, ArrayViewMutD, Slice};

use crate::error::Result;
use crate::grid::grid::{check_index, check_ranges, Grid};
use crate::grid::GridElement;

/// Read-only view of a rectangular block of a grid
#[derive(Debug, Clone)]
pub struct GridView<'a, T: GridElement> {
    data: ArrayViewD<'a, T>,
}

impl<'a, T: GridElement> GridView<'a, T> {
    pub(crate) fn new(data: ArrayViewD<'a, T>) -> Self {
        Self { data }
    }

    pub fn shape(&self) -> &[usize] {
        self.data.shape()
    }

    pub fn ndim(&self) -> usize {
        self.data.ndim()
    }

    pub fn len(&self) -> usize {
        self.data.len()
    }

    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    pub fn get(&self, index: &[usize]) -> Result<T> {
        check_index(index, self.shape())?;
        Ok(self.data[index])
    }

    /// Narrow the view further
    pub fn slice(&self, ranges: &[Range<usize>]) -> Result<GridView<'_, T>> {
        check_ranges(ranges, self.shape())?;
        let view = self
            .data
            .slice_each_axis(|ax| Slice::from(ranges[ax.axis.index()].clone()));
        Ok(GridView::new(view))
    }

    /// Underlying ndarray view
    pub fn as_array(&self) -> &ArrayViewD<'a, T> {
        &self.data
    }

    /// Copy the viewed samples into a new, owning grid
    pub fn to_grid(&self) -> Result<Grid<T>> {
        Grid::from_array(self.data.to_owned())
    }
}

/// Mutable view of a rectangular block of a grid
#[derive(Debug)]
pub struct GridViewMut<'a, T: GridElement> {
    data: ArrayViewMutD<'a, T>,
}

impl<'a, T: GridElement> GridViewMut<'a, T> {
    pub(crate) fn new(data: ArrayViewMutD<'a, T>) -> Self {
        Self { data }
    }

    pub fn shape(&self) -> &[usize] {
        self.data.shape()
    }

    pub fn get(&self, index: &[usize]) -> Result<T> {
        check_index(index, self.shape())?;
        Ok(self.data[index])
    }

    pub fn set(&mut self, index: &[usize], value: T) -> Result<()> {
        check_index(index, self.shape())?;
        self.data[index] = value;
        Ok(())
    }

    /// Set every viewed sample to `value`
    pub fn fill(&mut self, value: T) {
        self.data.fill(value);
    }

    /// Copy `source` into the view; shapes must match
    pub fn assign(&mut self, source: &Grid<T>) -> Result<()> {
        if self.shape() != source.shape() {
            return Err(crate::Error::shape_mismatch(self.shape(), source.shape()));
        }
        self.data.assign(source.data());
        Ok(())
    }
}
