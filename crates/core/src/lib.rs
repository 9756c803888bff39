//! # Morpho Core
//!
//! Core types, traits and I/O for the morpho image-processing engine.
//!
//! This crate provides:
//! - `Grid<T>`: typed N-dimensional pixel grid, with views, casting and reduction
//! - `AnyGrid`: the same grid with a runtime dtype tag
//! - `BoundaryPolicy` and `pad`: edge handling for neighborhood operations
//! - Algorithm traits for a consistent API
//! - TIFF I/O and grayscale/invert helpers

pub mod color;
pub mod error;
pub mod grid;
pub mod io;

pub use error::{Error, Result};
pub use grid::{AnyGrid, BoundaryPolicy, CastPolicy, DType, Grid, GridElement, ReduceOp};

/// Prelude for convenient imports
pub mod prelude {
    pub use crate::error::{Error, Result};
    pub use crate::grid::{
        pad, AnyGrid, BoundaryPolicy, CastPolicy, DType, Grid, GridElement, ReduceOp,
    };
    pub use crate::Algorithm;
}

/// Core trait for all algorithms in morpho.
///
/// Algorithms are pure functions that transform input data according to parameters.
pub trait Algorithm {
    /// Input type for the algorithm
    type Input;
    /// Output type for the algorithm
    type Output;
    /// Parameters controlling algorithm behavior
    type Params: Default;
    /// Error type for algorithm execution
    type Error: std::error::Error;

    /// Returns the algorithm name
    fn name(&self) -> &'static str;

    /// Returns a description of what the algorithm does
    fn description(&self) -> &'static str;

    /// Execute the algorithm
    fn execute(&self, input: Self::Input, params: Self::Params) -> std::result::Result<Self::Output, Self::Error>;

    /// Execute with default parameters
    fn execute_default(&self, input: Self::Input) -> std::result::Result<Self::Output, Self::Error> {
        self.execute(input, Self::Params::default())
    }
}
