//! Reading and writing grids
//!
//! The format is chosen from the file extension. Only uncompressed TIFF is
//! handled natively; other extensions fail with `UnsupportedFormat`.

mod native;

use std::path::Path;

use crate::error::{Error, Result};
use crate::grid::AnyGrid;

pub use native::{read_tiff, read_tiff_from_buffer, write_tiff, write_tiff_to_buffer};

/// File formats `load` and `save` understand
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ImageFormat {
    Tiff,
}

impl ImageFormat {
    /// Pick a format from the extension of `path`
    pub fn from_path<P: AsRef<Path>>(path: P) -> Result<Self> {
        let ext = path
            .as_ref()
            .extension()
            .and_then(|e| e.to_str())
            .map(str::to_ascii_lowercase);
        match ext.as_deref() {
            Some("tif") | Some("tiff") => Ok(ImageFormat::Tiff),
            Some(other) => Err(Error::UnsupportedFormat(format!(".{}", other))),
            None => Err(Error::UnsupportedFormat(format!(
                "{} has no extension",
                path.as_ref().display()
            ))),
        }
    }
}

/// Load a grid from disk
pub fn load<P: AsRef<Path>>(path: P) -> Result<AnyGrid> {
    match ImageFormat::from_path(&path)? {
        ImageFormat::Tiff => read_tiff(path),
    }
}

/// Save a grid to disk
pub fn save<P: AsRef<Path>>(grid: &AnyGrid, path: P) -> Result<()> {
    match ImageFormat::from_path(&path)? {
        ImageFormat::Tiff => write_tiff(grid, path),
    }
}
