//! Real-valued convolution kernels

use ndarray::{ArrayD, Axis, Dimension, IxDyn};
use morpho_core::{Error, Grid, Result};

use super::element::validate_extents;

/// Weights of a linear filter; every extent is odd
#[derive(Debug, Clone, PartialEq)]
pub struct Kernel {
    weights: ArrayD<f64>,
}

impl Kernel {
    pub fn from_grid(weights: &Grid<f64>) -> Result<Self> {
        validate_extents(weights.shape())?;
        Ok(Self {
            weights: weights.data().clone(),
        })
    }

    /// Build a 2D kernel from rows of weights
    pub fn from_rows(rows: &[&[f64]]) -> Result<Self> {
        let height = rows.len();
        let width = rows.first().map_or(0, |r| r.len());
        validate_extents(&[height, width])?;
        if rows.iter().any(|r| r.len() != width) {
            return Err(Error::InvalidShape {
                shape: vec![height, width],
                reason: "ragged kernel rows".to_string(),
            });
        }
        let flat: Vec<f64> = rows.iter().flat_map(|r| r.iter().copied()).collect();
        let weights = ArrayD::from_shape_vec(IxDyn(&[height, width]), flat)
            .map_err(|e| Error::Other(e.to_string()))?;
        Ok(Self { weights })
    }

    /// Responds to vertical edges (intensity changing along columns)
    pub fn prewitt_vertical() -> Self {
        Self::fixed_3x3([[1.0, 0.0, -1.0], [1.0, 0.0, -1.0], [1.0, 0.0, -1.0]])
    }

    /// Responds to horizontal edges (intensity changing along rows)
    pub fn prewitt_horizontal() -> Self {
        Self::fixed_3x3([[1.0, 1.0, 1.0], [0.0, 0.0, 0.0], [-1.0, -1.0, -1.0]])
    }

    pub fn sobel_vertical() -> Self {
        Self::fixed_3x3([[1.0, 0.0, -1.0], [2.0, 0.0, -2.0], [1.0, 0.0, -1.0]])
    }

    pub fn sobel_horizontal() -> Self {
        Self::fixed_3x3([[1.0, 2.0, 1.0], [0.0, 0.0, 0.0], [-1.0, -2.0, -1.0]])
    }

    /// 4-neighbor discrete Laplacian
    pub fn laplacian() -> Self {
        Self::fixed_3x3([[0.0, 1.0, 0.0], [1.0, -4.0, 1.0], [0.0, 1.0, 0.0]])
    }

    fn fixed_3x3(rows: [[f64; 3]; 3]) -> Self {
        let weights = ArrayD::from_shape_fn(IxDyn(&[3, 3]), |idx: IxDyn| rows[idx[0]][idx[1]]);
        Self { weights }
    }

    /// Normalized box (mean) kernel of side `2 * radius + 1`
    pub fn box_mean(ndim: usize, radius: usize) -> Result<Self> {
        if ndim == 0 {
            return Err(Error::InvalidParameter {
                name: "ndim",
                value: "0".to_string(),
                reason: "a kernel needs at least one axis".to_string(),
            });
        }
        let extent = 2 * radius + 1;
        let n = extent.pow(ndim as u32) as f64;
        Ok(Self {
            weights: ArrayD::from_elem(IxDyn(&vec![extent; ndim]), 1.0 / n),
        })
    }

    /// 1D kernel laid along `axis` of an `ndim`-dimensional grid
    pub fn along_axis(weights: &[f64], ndim: usize, axis: usize) -> Result<Self> {
        if axis >= ndim {
            return Err(Error::InvalidParameter {
                name: "axis",
                value: axis.to_string(),
                reason: format!("kernel has {} axes", ndim),
            });
        }
        let mut shape = vec![1; ndim];
        shape[axis] = weights.len();
        validate_extents(&shape)?;
        let data = ArrayD::from_shape_vec(IxDyn(&shape), weights.to_vec())
            .map_err(|e| Error::Other(e.to_string()))?;
        Ok(Self { weights: data })
    }

    pub fn shape(&self) -> &[usize] {
        self.weights.shape()
    }

    pub fn ndim(&self) -> usize {
        self.weights.ndim()
    }

    pub fn weights(&self) -> &ArrayD<f64> {
        &self.weights
    }

    /// Kernel mirrored on every axis
    pub fn flipped(&self) -> Self {
        let mut weights = self.weights.clone();
        for axis in 0..weights.ndim() {
            weights.invert_axis(Axis(axis));
        }
        Self {
            weights: weights.as_standard_layout().into_owned(),
        }
    }

    /// Non-zero taps as (position in footprint, weight), row-major
    pub(crate) fn taps(&self) -> (Vec<Vec<usize>>, Vec<f64>) {
        self.weights
            .indexed_iter()
            .filter(|&(_, &w)| w != 0.0)
            .map(|(idx, &w)| (idx.slice().to_vec(), w))
            .unzip()
    }
}

/// Largest Gaussian half-width accepted, in samples
pub const MAX_GAUSSIAN_RADIUS: usize = 1 << 20;

/// Half-width `ceil(truncate * sigma)` of a sampled Gaussian, bounded by
/// [`MAX_GAUSSIAN_RADIUS`]
pub fn gaussian_radius(sigma: f64, truncate: f64) -> Result<usize> {
    if !(sigma > 0.0) || !sigma.is_finite() {
        return Err(Error::InvalidParameter {
            name: "sigma",
            value: sigma.to_string(),
            reason: "must be positive and finite".to_string(),
        });
    }
    if !(truncate > 0.0) || !truncate.is_finite() {
        return Err(Error::InvalidParameter {
            name: "truncate",
            value: truncate.to_string(),
            reason: "must be positive and finite".to_string(),
        });
    }

    let radius = (truncate * sigma).ceil();
    if radius > MAX_GAUSSIAN_RADIUS as f64 {
        return Err(Error::InvalidParameter {
            name: "sigma",
            value: sigma.to_string(),
            reason: format!(
                "kernel half-width {} exceeds {} samples",
                radius, MAX_GAUSSIAN_RADIUS
            ),
        });
    }
    Ok(radius as usize)
}

/// Sampled, normalized Gaussian of half-width `ceil(truncate * sigma)`
pub fn gaussian_1d(sigma: f64, truncate: f64) -> Result<Vec<f64>> {
    let radius = gaussian_radius(sigma, truncate)? as isize;
    let denom = 2.0 * sigma * sigma;
    let raw: Vec<f64> = (-radius..=radius)
        .map(|x| (-((x * x) as f64) / denom).exp())
        .collect();
    let sum: f64 = raw.iter().sum();
    Ok(raw.into_iter().map(|w| w / sum).collect())
}
