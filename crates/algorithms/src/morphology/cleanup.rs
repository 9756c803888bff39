//! Removal of small objects and small holes

use morpho_core::{Grid, Result};
use ndarray::Dimension;
use tracing::debug;

use crate::label::{label, Connectivity};

fn component_areas(labels: &Grid<u32>, count: u32) -> Vec<usize> {
    let mut areas = vec![0usize; count as usize + 1];
    for &l in labels.iter() {
        areas[l as usize] += 1;
    }
    areas
}

/// Drop foreground components with fewer than `min_size` pixels
pub fn remove_small_objects(
    grid: &Grid<bool>,
    min_size: usize,
    connectivity: Connectivity,
) -> Result<Grid<bool>> {
    let labeled = label(grid, connectivity)?;
    let areas = component_areas(labeled.labels(), labeled.num_labels());
    let removed = areas[1..].iter().filter(|&&a| a < min_size).count();
    debug!(removed, min_size, "removing small objects");
    Ok(labeled
        .labels()
        .map(|l| l != 0 && areas[l as usize] >= min_size))
}

/// Fill background components smaller than `area` that are enclosed by
/// foreground. Background touching the grid border is never filled.
pub fn remove_small_holes(
    grid: &Grid<bool>,
    area: usize,
    connectivity: Connectivity,
) -> Result<Grid<bool>> {
    let background = grid.map(|v| !v);
    let labeled = label(&background, connectivity)?;
    let labels = labeled.labels();
    let areas = component_areas(labels, labeled.num_labels());

    let shape = grid.shape();
    let mut touches_border = vec![false; areas.len()];
    for (index, &l) in labels.indexed_iter() {
        if l != 0
            && index
                .slice()
                .iter()
                .zip(shape)
                .any(|(&i, &n)| i == 0 || i + 1 == n)
        {
            touches_border[l as usize] = true;
        }
    }

    let fill: Vec<bool> = areas
        .iter()
        .zip(&touches_border)
        .map(|(&a, &border)| !border && a < area)
        .collect();
    debug!(filled = fill[1..].iter().filter(|&&f| f).count(), area, "filling small holes");
    grid.zip_map(labels, |v, l| v || (l != 0 && fill[l as usize]))
}
