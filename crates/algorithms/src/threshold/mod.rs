//! Grayscale to binary conversion
//!
//! - **Global**: one cutoff, given or computed (Otsu, mean)
//! - **Adaptive**: a per-pixel cutoff from a local window statistic

mod adaptive;
mod global;

pub use adaptive::{threshold_adaptive, threshold_adaptive_with, AdaptiveMethod, AdaptiveParams};
pub use global::{compute_cutoff, threshold_auto, threshold_global, GlobalMethod};
