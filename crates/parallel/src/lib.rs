//! # Morpho Parallel
//!
//! Execution strategies for morpho operations.
//!
//! This crate provides:
//! - `ProcessingMode`: sequential, default-pool or fixed-size-pool execution
//! - `TiledProcessor`: runs a whole-grid operation on overlapping slabs of
//!   axis 0 and stitches the results
//!
//! Without the `parallel` feature every mode runs sequentially.

pub mod strategy;
pub mod tiled;

pub use strategy::{num_threads, set_num_threads, ParallelStrategy, ProcessingMode};
pub use tiled::{Tile, TileIterator, TiledProcessor};
