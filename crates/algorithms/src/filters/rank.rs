//! Rank filters: minimum, maximum and median over a footprint

use std::cmp::Ordering;

use morpho_core::{Algorithm, BoundaryPolicy, Error, Grid, GridElement, Result};

use crate::neighborhood::window::map_windows;
use crate::neighborhood::StructuringElement;

/// Order statistic taken over each neighborhood
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum RankOp {
    Min,
    Max,
    #[default]
    Median,
}

/// Parameters for a rank filter
#[derive(Debug, Clone)]
pub struct RankParams {
    pub element: StructuringElement,
    pub op: RankOp,
    pub boundary: BoundaryPolicy<f64>,
}

impl Default for RankParams {
    fn default() -> Self {
        Self {
            element: StructuringElement::default(),
            op: RankOp::Median,
            boundary: BoundaryPolicy::EdgeExtend,
        }
    }
}

/// Rank filter algorithm
#[derive(Debug, Clone, Default)]
pub struct RankFilter;

impl Algorithm for RankFilter {
    type Input = Grid<f64>;
    type Output = Grid<f64>;
    type Params = RankParams;
    type Error = Error;

    fn name(&self) -> &'static str {
        "RankFilter"
    }

    fn description(&self) -> &'static str {
        "Minimum, maximum or median over a structuring element"
    }

    fn execute(&self, input: Self::Input, params: Self::Params) -> Result<Self::Output> {
        apply_rank(&input, &params.element, params.op, params.boundary)
    }
}

/// Total order used for ranking: NaN sorts above every number
fn rank_order<T: GridElement>(a: &T, b: &T) -> Ordering {
    a.partial_cmp(b)
        .unwrap_or_else(|| a.to_f64().is_nan().cmp(&b.to_f64().is_nan()))
}

fn median<T: GridElement>(values: &[T]) -> T {
    let mut v = values.to_vec();
    let mid = v.len() / 2;
    let (lower, upper, _) = v.select_nth_unstable_by(mid, rank_order);
    let upper = *upper;
    if values.len() % 2 == 1 {
        return upper;
    }
    match lower.iter().copied().max_by(rank_order) {
        Some(below) => T::from_f64_clipped((below.to_f64() + upper.to_f64()) / 2.0),
        None => upper,
    }
}

/// Apply a rank filter.
///
/// Each output sample is `op` over the (padded) input values covered by
/// `element` centered on it. The median of an even number of values is the
/// mean of the two central ones, rounded for integer types; for `bool` a
/// tie resolves to `true`. The output has the input's shape and type.
pub fn apply_rank<T: GridElement>(
    grid: &Grid<T>,
    element: &StructuringElement,
    op: RankOp,
    boundary: BoundaryPolicy<T>,
) -> Result<Grid<T>> {
    let positions = element.positions();
    if positions.is_empty() {
        return Err(Error::InvalidParameter {
            name: "element",
            value: format!("{:?}", element.shape()),
            reason: "rank filter needs at least one active cell".to_string(),
        });
    }

    match op {
        RankOp::Min => map_windows(grid, element.shape(), &positions, boundary, |v| {
            v.iter().copied().min_by(rank_order).unwrap_or_default()
        }),
        RankOp::Max => map_windows(grid, element.shape(), &positions, boundary, |v| {
            v.iter().copied().max_by(rank_order).unwrap_or_default()
        }),
        RankOp::Median => map_windows(grid, element.shape(), &positions, boundary, median),
    }
}

/// Median filter with the default (edge-extend) boundary
pub fn median_filter<T: GridElement>(grid: &Grid<T>, element: &StructuringElement) -> Result<Grid<T>> {
    apply_rank(grid, element, RankOp::Median, BoundaryPolicy::EdgeExtend)
}
