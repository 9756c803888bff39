//! Global thresholding: one cutoff for the whole grid

use morpho_core::{Error, Grid, Result};
use tracing::debug;

const OTSU_BINS: usize = 256;

/// Method for choosing a single cutoff from the grid itself
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum GlobalMethod {
    /// Maximize between-class variance of a 256-bin histogram
    #[default]
    Otsu,
    /// Mean of all samples
    Mean,
}

/// `output[p] = grid[p] > cutoff`
pub fn threshold_global(grid: &Grid<f64>, cutoff: f64) -> Grid<bool> {
    grid.map(|v| v > cutoff)
}

/// Compute a cutoff with `method`, ignoring NaN and infinite samples
pub fn compute_cutoff(grid: &Grid<f64>, method: GlobalMethod) -> Result<f64> {
    let (mut min, mut max, mut sum, mut count) = (f64::INFINITY, f64::NEG_INFINITY, 0.0, 0usize);
    for &v in finite(grid) {
        min = min.min(v);
        max = max.max(v);
        sum += v;
        count += 1;
    }
    if count == 0 {
        return Err(Error::InvalidParameter {
            name: "grid",
            value: format!("{:?}", grid.shape()),
            reason: "no finite samples to threshold".to_string(),
        });
    }
    match method {
        GlobalMethod::Mean => Ok(sum / count as f64),
        GlobalMethod::Otsu => Ok(otsu(grid, min, max)),
    }
}

/// Pick a cutoff with `method` and apply it
pub fn threshold_auto(grid: &Grid<f64>, method: GlobalMethod) -> Result<(f64, Grid<bool>)> {
    let cutoff = compute_cutoff(grid, method)?;
    debug!(?method, cutoff, "computed global threshold");
    Ok((cutoff, threshold_global(grid, cutoff)))
}

fn finite(grid: &Grid<f64>) -> impl Iterator<Item = &f64> {
    grid.iter().filter(|v| v.is_finite())
}

fn otsu(grid: &Grid<f64>, min: f64, max: f64) -> f64 {
    if min == max {
        return min;
    }

    let width = (max - min) / OTSU_BINS as f64;
    let mut counts = [0f64; OTSU_BINS];
    for &v in finite(grid) {
        let bin = (((v - min) / width) as usize).min(OTSU_BINS - 1);
        counts[bin] += 1.0;
    }
    let centers: Vec<f64> = (0..OTSU_BINS)
        .map(|i| min + (i as f64 + 0.5) * width)
        .collect();

    // Class weights and means for a split after bin i, from each side
    let mut weight_low = [0f64; OTSU_BINS];
    let mut mean_low = [0f64; OTSU_BINS];
    let (mut w, mut s) = (0.0, 0.0);
    for i in 0..OTSU_BINS {
        w += counts[i];
        s += counts[i] * centers[i];
        weight_low[i] = w;
        mean_low[i] = if w > 0.0 { s / w } else { 0.0 };
    }
    let mut weight_high = [0f64; OTSU_BINS];
    let mut mean_high = [0f64; OTSU_BINS];
    let (mut w, mut s) = (0.0, 0.0);
    for i in (0..OTSU_BINS).rev() {
        w += counts[i];
        s += counts[i] * centers[i];
        weight_high[i] = w;
        mean_high[i] = if w > 0.0 { s / w } else { 0.0 };
    }

    let mut best = 0;
    let mut best_variance = f64::NEG_INFINITY;
    for i in 0..OTSU_BINS - 1 {
        let diff = mean_low[i] - mean_high[i + 1];
        let variance = weight_low[i] * weight_high[i + 1] * diff * diff;
        if variance > best_variance {
            best_variance = variance;
            best = i;
        }
    }
    centers[best]
}
