//! # Morpho Algorithms
//!
//! Image-processing algorithms for morpho.
//!
//! ## Available Algorithm Categories
//!
//! - **neighborhood**: Structuring elements and convolution kernels
//! - **filters**: Rank (min/max/median), convolution, Gaussian smoothing
//! - **threshold**: Global (fixed, Otsu, mean) and adaptive thresholding
//! - **morphology**: Erosion, dilation, opening, closing, skeletonization, cleanup
//! - **label**: Connected-component labeling
//! - **measure**: Per-region area, centroid, bounding box and intensity

pub mod filters;
pub mod label;
pub(crate) mod maybe_rayon;
pub mod measure;
pub mod morphology;
pub mod neighborhood;
pub mod threshold;

/// Prelude for convenient imports
pub mod prelude {
    pub use crate::filters::{
        apply_convolution, apply_gaussian, apply_rank, convolve, edge_magnitude,
        gaussian_filter, median_filter, GaussianFilter, GaussianParams, RankFilter, RankOp,
        RankParams,
    };
    pub use crate::label::{label, Connectivity, Label, LabelParams, LabeledGrid};
    pub use crate::measure::{
        measure, measure_one, measure_with_intensity, IntensityStats, RegionRecord,
    };
    pub use crate::morphology::{
        closing, dilate, erode, opening, remove_small_holes, remove_small_objects, skeletonize,
        Closing, Dilate, Erode, Opening, Skeletonize,
    };
    pub use crate::neighborhood::{Kernel, StructuringElement};
    pub use crate::threshold::{
        compute_cutoff, threshold_adaptive, threshold_auto, threshold_global, AdaptiveMethod,
        AdaptiveParams, GlobalMethod,
    };
    pub use morpho_core::prelude::*;
}
