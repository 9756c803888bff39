//! Grid data structures and operations

mod any;
mod element;
#[allow(clippy::module_inception)]
mod grid;
mod padding;
mod view;

pub use any::AnyGrid;
pub use element::{DType, GridElement};
pub use grid::{CastPolicy, Grid, GridStatistics, ReduceOp};
pub use padding::{pad, BoundaryPolicy};
pub use view::{GridView, GridViewMut};
