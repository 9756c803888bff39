//! Dynamically typed grid
//!
//! `AnyGrid` is what loaders return and savers accept: a grid whose sample
//! type is only known at run time. Algorithms take typed [`Grid<T>`]s;
//! converting between the two is always explicit.

use crate::error::{Error, Result};
use crate::grid::{CastPolicy, DType, Grid, GridElement, GridStatistics, ReduceOp};

/// A grid tagged with its runtime sample type
#[derive(Debug, Clone, PartialEq)]
pub enum AnyGrid {
    U8(Grid<u8>),
    U16(Grid<u16>),
    U32(Grid<u32>),
    F64(Grid<f64>),
    Bool(Grid<bool>),
}

macro_rules! dispatch {
    ($self:expr, $g:ident => $body:expr) => {
        match $self {
            AnyGrid::U8($g) => $body,
            AnyGrid::U16($g) => $body,
            AnyGrid::U32($g) => $body,
            AnyGrid::F64($g) => $body,
            AnyGrid::Bool($g) => $body,
        }
    };
}

macro_rules! impl_from_grid {
    ($t:ty, $variant:ident) => {
        impl From<Grid<$t>> for AnyGrid {
            fn from(grid: Grid<$t>) -> Self {
                AnyGrid::$variant(grid)
            }
        }
    };
}

impl_from_grid!(u8, U8);
impl_from_grid!(u16, U16);
impl_from_grid!(u32, U32);
impl_from_grid!(f64, F64);
impl_from_grid!(bool, Bool);

fn cast_to<T: GridElement>(grid: &Grid<T>, target: DType, policy: CastPolicy) -> AnyGrid {
    match target {
        DType::U8 => AnyGrid::U8(grid.cast(policy)),
        DType::U16 => AnyGrid::U16(grid.cast(policy)),
        DType::U32 => AnyGrid::U32(grid.cast(policy)),
        DType::F64 => AnyGrid::F64(grid.cast(policy)),
        DType::Bool => AnyGrid::Bool(grid.cast(policy)),
    }
}

impl AnyGrid {
    /// Create a grid of the given type; `fill` is clipped into the type's range
    pub fn filled(shape: &[usize], dtype: DType, fill: f64) -> Result<Self> {
        Ok(match dtype {
            DType::U8 => AnyGrid::U8(Grid::filled(shape, u8::from_f64_clipped(fill))?),
            DType::U16 => AnyGrid::U16(Grid::filled(shape, u16::from_f64_clipped(fill))?),
            DType::U32 => AnyGrid::U32(Grid::filled(shape, u32::from_f64_clipped(fill))?),
            DType::F64 => AnyGrid::F64(Grid::filled(shape, fill)?),
            DType::Bool => AnyGrid::Bool(Grid::filled(shape, bool::from_f64_clipped(fill))?),
        })
    }

    pub fn dtype(&self) -> DType {
        dispatch!(self, g => g.dtype())
    }

    pub fn shape(&self) -> &[usize] {
        dispatch!(self, g => g.shape())
    }

    pub fn ndim(&self) -> usize {
        dispatch!(self, g => g.ndim())
    }

    pub fn len(&self) -> usize {
        dispatch!(self, g => g.len())
    }

    pub fn is_empty(&self) -> bool {
        dispatch!(self, g => g.is_empty())
    }

    /// Value at `index`, widened to f64
    pub fn get_f64(&self, index: &[usize]) -> Result<f64> {
        dispatch!(self, g => g.get(index).map(GridElement::to_f64))
    }

    /// Store `value` at `index`, clipped into the grid's type
    pub fn set_f64(&mut self, index: &[usize], value: f64) -> Result<()> {
        dispatch!(self, g => g.set(index, GridElement::from_f64_clipped(value)))
    }

    /// Convert to `target` under an explicit policy
    pub fn cast(&self, target: DType, policy: CastPolicy) -> AnyGrid {
        dispatch!(self, g => cast_to(g, target, policy))
    }

    /// See [`Grid::reduce`]
    pub fn reduce(&self, axis: usize, op: ReduceOp) -> Result<Grid<f64>> {
        dispatch!(self, g => g.reduce(axis, op))
    }

    pub fn statistics(&self) -> GridStatistics {
        dispatch!(self, g => g.statistics())
    }

    /// Unwrap a float grid; other types must be cast first
    pub fn into_f64(self) -> Result<Grid<f64>> {
        match self {
            AnyGrid::F64(g) => Ok(g),
            other => Err(Error::UnsupportedDType {
                dtype: other.dtype(),
                operation: "float operation (cast to f64 first)",
            }),
        }
    }

    /// Unwrap a binary grid; other types must be cast or thresholded first
    pub fn into_bool(self) -> Result<Grid<bool>> {
        match self {
            AnyGrid::Bool(g) => Ok(g),
            other => Err(Error::UnsupportedDType {
                dtype: other.dtype(),
                operation: "binary operation (threshold or cast to bool first)",
            }),
        }
    }
}
