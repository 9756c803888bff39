//! Halo-tiled processing along axis 0
//!
//! A grid is cut into slabs of `tile_size` indices along axis 0. Each slab is
//! read together with `halo` extra indices on both sides (clamped to the
//! grid), processed as an independent grid, and only the slab's own part of
//! the result is kept. When `halo` covers every sample the operation reads
//! around an output position, the stitched grid equals the whole-grid result
//! exactly.

use std::ops::Range;

use morpho_core::{Error, Grid, GridElement, Result};
use tracing::debug;

use crate::strategy::{ParallelStrategy, ProcessingMode};

/// One slab of axis 0
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Tile {
    /// First index owned by this tile
    pub start: usize,
    /// One past the last owned index
    pub end: usize,
    /// First index read, including the halo
    pub read_start: usize,
    /// One past the last index read
    pub read_end: usize,
}

impl Tile {
    /// Owned indices in grid coordinates
    pub fn owned(&self) -> Range<usize> {
        self.start..self.end
    }

    /// Read indices in grid coordinates
    pub fn read(&self) -> Range<usize> {
        self.read_start..self.read_end
    }

    /// Owned indices relative to the read slab
    pub fn interior(&self) -> Range<usize> {
        (self.start - self.read_start)..(self.end - self.read_start)
    }
}

/// Iterator over the tiles covering `0..len`
#[derive(Debug, Clone)]
pub struct TileIterator {
    len: usize,
    tile_size: usize,
    halo: usize,
    next_start: usize,
}

impl TileIterator {
    pub fn new(len: usize, tile_size: usize, halo: usize) -> Self {
        Self {
            len,
            tile_size: tile_size.max(1),
            halo,
            next_start: 0,
        }
    }
}

impl Iterator for TileIterator {
    type Item = Tile;

    fn next(&mut self) -> Option<Tile> {
        if self.next_start >= self.len {
            return None;
        }
        let start = self.next_start;
        let end = (start + self.tile_size).min(self.len);
        self.next_start = end;
        Some(Tile {
            start,
            end,
            read_start: start.saturating_sub(self.halo),
            read_end: (end + self.halo).min(self.len),
        })
    }
}

/// Runs whole-grid operations tile by tile
#[derive(Debug, Clone, Copy)]
pub struct TiledProcessor {
    tile_size: usize,
    halo: usize,
    mode: ProcessingMode,
}

impl TiledProcessor {
    pub fn new(tile_size: usize, halo: usize) -> Result<Self> {
        if tile_size == 0 {
            return Err(Error::InvalidParameter {
                name: "tile_size",
                value: "0".to_string(),
                reason: "tiles need at least one index".to_string(),
            });
        }
        Ok(Self {
            tile_size,
            halo,
            mode: ProcessingMode::default(),
        })
    }

    pub fn with_mode(mut self, mode: ProcessingMode) -> Self {
        self.mode = mode;
        self
    }

    pub fn tile_size(&self) -> usize {
        self.tile_size
    }

    pub fn halo(&self) -> usize {
        self.halo
    }

    /// Tiles covering axis 0 of a grid with this many indices
    pub fn tiles(&self, len: usize) -> TileIterator {
        TileIterator::new(len, self.tile_size, self.halo)
    }

    /// Apply `op` to every tile and stitch the owned parts.
    ///
    /// `op` must return a grid with the shape of its input; otherwise the
    /// call fails with `ShapeMismatch`. The first failing tile's error is
    /// returned.
    pub fn process<T, U, F>(&self, grid: &Grid<T>, op: F) -> Result<Grid<U>>
    where
        T: GridElement,
        U: GridElement,
        F: Fn(&Grid<T>) -> Result<Grid<U>> + Sync + Send,
    {
        let shape = grid.shape().to_vec();
        let tiles: Vec<Tile> = self.tiles(shape[0]).collect();
        debug!(
            tiles = tiles.len(),
            tile_size = self.tile_size,
            halo = self.halo,
            "tiled processing"
        );

        let pieces: Vec<Result<Vec<U>>> = self.mode.par_map(0..tiles.len(), |i| {
            let tile = tiles[i];
            let input = grid.slice(&axis0_ranges(&shape, tile.read()))?.to_grid()?;
            let output = op(&input)?;
            if output.shape() != input.shape() {
                return Err(Error::shape_mismatch(input.shape(), output.shape()));
            }
            let owned = output.slice(&axis0_ranges(output.shape(), tile.interior()))?;
            Ok(owned.to_grid()?.to_vec())
        });

        let mut data = Vec::with_capacity(grid.len());
        for piece in pieces {
            data.extend(piece?);
        }
        Grid::from_vec(&shape, data)
    }
}

/// `rows` on axis 0, everything on the other axes
fn axis0_ranges(shape: &[usize], rows: Range<usize>) -> Vec<Range<usize>> {
    std::iter::once(rows)
        .chain(shape[1..].iter().map(|&n| 0..n))
        .collect()
}
