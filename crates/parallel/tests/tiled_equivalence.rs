//! Tiled execution must reproduce whole-grid results exactly

use morpho_algorithms::prelude::*;
use morpho_parallel::{ProcessingMode, TiledProcessor};

fn noise(shape: &[usize], seed: u64) -> Grid<f64> {
    let mut state = seed;
    Grid::from_shape_fn(shape, |_| {
        state = state
            .wrapping_mul(6364136223846793005)
            .wrapping_add(1442695040888963407);
        ((state >> 33) % 256) as f64
    })
    .unwrap()
}

fn blobs(shape: &[usize], seed: u64) -> Grid<bool> {
    noise(shape, seed).map(|v| v > 110.0)
}

#[test]
fn median_matches_whole_grid() {
    let grid = noise(&[23, 17], 1);
    let element = StructuringElement::disk(2, 2).unwrap();
    let whole = median_filter(&grid, &element).unwrap();
    for tile_size in [1, 4, 7, 40] {
        let tiled = TiledProcessor::new(tile_size, 2).unwrap();
        let out = tiled.process(&grid, |g| median_filter(g, &element)).unwrap();
        assert_eq!(out, whole, "tile_size {}", tile_size);
    }
}

#[test]
fn gaussian_matches_whole_grid() {
    let grid = noise(&[30, 12], 2);
    let whole = apply_gaussian(&grid, 1.5, 4.0).unwrap();
    // radius = ceil(4 * 1.5)
    let tiled = TiledProcessor::new(5, 6).unwrap();
    let out = tiled.process(&grid, |g| apply_gaussian(g, 1.5, 4.0)).unwrap();
    assert_eq!(out, whole);
}

#[test]
fn morphology_matches_whole_grid() {
    let grid = blobs(&[25, 20], 3);
    let element = StructuringElement::square(2, 1).unwrap();

    let whole = erode(&grid, &element).unwrap();
    let tiled = TiledProcessor::new(6, 1).unwrap();
    assert_eq!(tiled.process(&grid, |g| erode(g, &element)).unwrap(), whole);

    // Two passes read twice as far
    let tiled = TiledProcessor::new(6, 2).unwrap().with_mode(ProcessingMode::Sequential);
    assert_eq!(
        tiled.process(&grid, |g| opening(g, &element)).unwrap(),
        opening(&grid, &element).unwrap()
    );
    assert_eq!(
        tiled.process(&grid, |g| closing(g, &element)).unwrap(),
        closing(&grid, &element).unwrap()
    );
}

#[test]
fn adaptive_threshold_matches_whole_grid() {
    let grid = noise(&[21, 21], 4);
    let whole = threshold_adaptive(&grid, &[7, 7], 2.0, AdaptiveMethod::LocalMeanOffset).unwrap();
    let tiled = TiledProcessor::new(4, 3).unwrap().with_mode(ProcessingMode::ParallelWith(2));
    let out = tiled
        .process(&grid, |g| {
            threshold_adaptive(g, &[7, 7], 2.0, AdaptiveMethod::LocalMeanOffset)
        })
        .unwrap();
    assert_eq!(out, whole);
}

#[test]
fn three_dimensional_grid() {
    let grid = blobs(&[9, 6, 5], 5);
    let element = StructuringElement::cross(3, 1).unwrap();
    let tiled = TiledProcessor::new(2, 1).unwrap();
    assert_eq!(
        tiled.process(&grid, |g| dilate(g, &element)).unwrap(),
        dilate(&grid, &element).unwrap()
    );
}
