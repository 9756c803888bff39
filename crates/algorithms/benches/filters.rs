//! Benchmarks for neighborhood filters and thresholding

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use morpho_algorithms::filters::{apply_gaussian, convolve, median_filter};
use morpho_algorithms::neighborhood::{Kernel, StructuringElement};
use morpho_algorithms::threshold::{threshold_adaptive, AdaptiveMethod};
use morpho_core::Grid;

fn create_test_image(size: usize) -> Grid<f64> {
    Grid::from_shape_fn(&[size, size], |idx| {
        ((idx[0] * 7 + idx[1] * 13) % 256) as f64 / 255.0
    })
    .unwrap()
}

fn bench_median(c: &mut Criterion) {
    let mut group = c.benchmark_group("filters/median");
    for radius in [1, 2, 3] {
        let image = create_test_image(512);
        let se = StructuringElement::square(2, radius).unwrap();
        group.bench_with_input(BenchmarkId::from_parameter(radius), &radius, |b, _| {
            b.iter(|| median_filter(black_box(&image), &se).unwrap())
        });
    }
    group.finish();
}

fn bench_convolve(c: &mut Criterion) {
    let mut group = c.benchmark_group("filters/convolve");
    let kernel = Kernel::sobel_vertical();
    for size in [256, 512, 1024] {
        let image = create_test_image(size);
        group.bench_with_input(BenchmarkId::from_parameter(size), &size, |b, _| {
            b.iter(|| convolve(black_box(&image), &kernel).unwrap())
        });
    }
    group.finish();
}

fn bench_gaussian(c: &mut Criterion) {
    let mut group = c.benchmark_group("filters/gaussian");
    let image = create_test_image(512);
    for sigma in [1.0, 2.0, 4.0] {
        group.bench_with_input(BenchmarkId::from_parameter(sigma), &sigma, |b, &s| {
            b.iter(|| apply_gaussian(black_box(&image), s, 4.0).unwrap())
        });
    }
    group.finish();
}

fn bench_adaptive(c: &mut Criterion) {
    let mut group = c.benchmark_group("threshold/adaptive");
    let image = create_test_image(512);
    for method in [AdaptiveMethod::LocalMeanOffset, AdaptiveMethod::LocalGaussianOffset] {
        group.bench_with_input(BenchmarkId::new("method", format!("{:?}", method)), &method, |b, &m| {
            b.iter(|| threshold_adaptive(black_box(&image), &[15, 15], 0.01, m).unwrap())
        });
    }
    group.finish();
}

criterion_group!(benches, bench_median, bench_convolve, bench_gaussian, bench_adaptive);
criterion_main!(benches);
