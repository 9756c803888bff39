//! Neighborhood filters
//!
//! - **Rank**: minimum, maximum and median over a structuring element
//! - **Convolution**: linear filtering with a flipped kernel
//! - **Gaussian**: separable smoothing

mod convolve;
mod gaussian;
mod rank;

pub use convolve::{apply_convolution, convolve, edge_magnitude};
pub use gaussian::{apply_gaussian, gaussian_filter, GaussianFilter, GaussianParams};
pub use rank::{apply_rank, median_filter, RankFilter, RankOp, RankParams};

pub(crate) use gaussian::smooth_separable;
