//! Per-region measurement of label grids
//!
//! Each positive label yields one [`RegionRecord`] with its area, centroid
//! and bounding box. Labels need not be contiguous; 0 is background.

use std::collections::BTreeMap;

use morpho_core::{Error, Grid, GridElement, Result};
use ndarray::Dimension;
use serde::Serialize;

/// Intensity statistics of a region
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct IntensityStats {
    pub mean: f64,
    pub min: f64,
    pub max: f64,
}

/// Measurements of one labeled region
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RegionRecord {
    pub label: u32,
    /// Pixel count
    pub area: usize,
    /// Mean coordinate per axis
    pub centroid: Vec<f64>,
    /// Half-open `[min, max + 1)` extent per axis
    pub bbox: Vec<(usize, usize)>,
    /// Present only when measured against an intensity grid
    #[serde(skip_serializing_if = "Option::is_none")]
    pub intensity: Option<IntensityStats>,
}

#[derive(Debug, Clone)]
struct Accumulator {
    area: usize,
    coord_sum: Vec<f64>,
    lo: Vec<usize>,
    hi: Vec<usize>,
    value_sum: f64,
    value_min: f64,
    value_max: f64,
}

impl Accumulator {
    fn new(ndim: usize) -> Self {
        Self {
            area: 0,
            coord_sum: vec![0.0; ndim],
            lo: vec![usize::MAX; ndim],
            hi: vec![0; ndim],
            value_sum: 0.0,
            value_min: f64::INFINITY,
            value_max: f64::NEG_INFINITY,
        }
    }

    fn add(&mut self, index: &[usize], value: Option<f64>) {
        self.area += 1;
        for (axis, &i) in index.iter().enumerate() {
            self.coord_sum[axis] += i as f64;
            self.lo[axis] = self.lo[axis].min(i);
            self.hi[axis] = self.hi[axis].max(i + 1);
        }
        if let Some(v) = value {
            self.value_sum += v;
            self.value_min = self.value_min.min(v);
            self.value_max = self.value_max.max(v);
        }
    }

    fn finish(self, label: u32, with_intensity: bool) -> RegionRecord {
        let n = self.area as f64;
        RegionRecord {
            label,
            area: self.area,
            centroid: self.coord_sum.iter().map(|s| s / n).collect(),
            bbox: self.lo.into_iter().zip(self.hi).collect(),
            intensity: with_intensity.then(|| IntensityStats {
                mean: self.value_sum / n,
                min: self.value_min,
                max: self.value_max,
            }),
        }
    }
}

fn accumulate<F>(labels: &Grid<u32>, mut value_at: F) -> BTreeMap<u32, Accumulator>
where
    F: FnMut(&[usize]) -> Option<f64>,
{
    let ndim = labels.ndim();
    let mut regions: BTreeMap<u32, Accumulator> = BTreeMap::new();
    for (index, &l) in labels.indexed_iter() {
        if l == 0 {
            continue;
        }
        let index = index.slice();
        regions
            .entry(l)
            .or_insert_with(|| Accumulator::new(ndim))
            .add(index, value_at(index));
    }
    regions
}

/// Measure every positive label, ordered by ascending label.
///
/// A grid without foreground gives an empty vector.
pub fn measure(labels: &Grid<u32>) -> Vec<RegionRecord> {
    accumulate(labels, |_| None)
        .into_iter()
        .map(|(l, acc)| acc.finish(l, false))
        .collect()
}

/// Measure a single label; fails with `EmptyLabel` if it has no pixels
pub fn measure_one(labels: &Grid<u32>, label: u32) -> Result<RegionRecord> {
    if label == 0 {
        return Err(Error::InvalidParameter {
            name: "label",
            value: "0".to_string(),
            reason: "0 is the background".to_string(),
        });
    }
    let ndim = labels.ndim();
    let mut acc = Accumulator::new(ndim);
    for (index, &l) in labels.indexed_iter() {
        if l == label {
            acc.add(index.slice(), None);
        }
    }
    if acc.area == 0 {
        return Err(Error::EmptyLabel(label));
    }
    Ok(acc.finish(label, false))
}

/// Measure every label and add intensity statistics from `intensity`
pub fn measure_with_intensity<T: GridElement>(
    labels: &Grid<u32>,
    intensity: &Grid<T>,
) -> Result<Vec<RegionRecord>> {
    labels.ensure_same_shape(intensity)?;
    let values = intensity.data();
    Ok(accumulate(labels, |index| Some(values[index].to_f64()))
        .into_iter()
        .map(|(l, acc)| acc.finish(l, true))
        .collect())
}
