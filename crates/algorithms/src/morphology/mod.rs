//! Binary mathematical morphology
//!
//! - **Erosion**: foreground survives where the element fits
//! - **Dilation**: foreground grows by the element (Minkowski sum)
//! - **Opening**: erosion then dilation (removes small foreground features)
//! - **Closing**: dilation then erosion (fills small background gaps)
//! - **Skeletonize**: thinning to one-pixel-wide lines (2D)
//! - **Cleanup**: removal of small objects and small holes

mod cleanup;
mod closing;
mod dilate;
mod erode;
mod opening;
mod skeleton;

pub use cleanup::{remove_small_holes, remove_small_objects};
pub use closing::{closing, closing_with, Closing, ClosingParams};
pub use dilate::{dilate, dilate_with, Dilate, DilateParams};
pub use erode::{erode, erode_with, Erode, ErodeParams};
pub use opening::{opening, opening_with, Opening, OpeningParams};
pub use skeleton::{skeletonize, Skeletonize, SkeletonizeParams};

pub use crate::neighborhood::StructuringElement;
