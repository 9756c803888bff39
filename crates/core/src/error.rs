//! Error types for morpho

use thiserror::Error;

use crate::grid::DType;

/// Main error type for morpho operations
#[derive(Error, Debug)]
pub enum Error {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("TIFF error: {0}")]
    Tiff(#[from] tiff::TiffError),

    #[error("Invalid grid shape {shape:?}: {reason}")]
    InvalidShape { shape: Vec<usize>, reason: String },

    #[error("Index out of range: {index:?} in grid of shape {shape:?}")]
    IndexOutOfRange { index: Vec<usize>, shape: Vec<usize> },

    #[error("Shape mismatch: expected {expected:?}, got {actual:?}")]
    ShapeMismatch {
        expected: Vec<usize>,
        actual: Vec<usize>,
    },

    #[error("Invalid structuring element of shape {shape:?}: every extent must be odd and >= 1")]
    InvalidStructuringElement { shape: Vec<usize> },

    #[error("Label {0} has no pixels")]
    EmptyLabel(u32),

    #[error("Unsupported data type {dtype} for {operation}")]
    UnsupportedDType {
        dtype: DType,
        operation: &'static str,
    },

    #[error("{operation} does not support {ndim}-dimensional grids")]
    UnsupportedDimensionality {
        ndim: usize,
        operation: &'static str,
    },

    #[error("Unsupported image format: {0}")]
    UnsupportedFormat(String),

    #[error("Invalid parameter: {name} = {value} ({reason})")]
    InvalidParameter {
        name: &'static str,
        value: String,
        reason: String,
    },

    #[error("{0}")]
    Other(String),
}

impl Error {
    pub fn shape_mismatch(expected: &[usize], actual: &[usize]) -> Self {
        Error::ShapeMismatch {
            expected: expected.to_vec(),
            actual: actual.to_vec(),
        }
    }
}

/// Result type alias for morpho operations
pub type Result<T> = std::result::Result<T, Error>;
