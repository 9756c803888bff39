//! Neighborhood footprints and the sliding-window engine
//!
//! - **StructuringElement**: boolean footprint (square, cross, disk, custom)
//! - **Kernel**: real-valued weights for linear filters

mod element;
mod kernel;
pub(crate) mod window;

pub use element::StructuringElement;
pub use kernel::{gaussian_1d, gaussian_radius, Kernel, MAX_GAUSSIAN_RADIUS};

pub(crate) use element::validate_extents;
