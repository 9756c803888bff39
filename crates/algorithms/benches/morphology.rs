//! Benchmarks for binary morphology and labeling

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use morpho_algorithms::label::{label, Connectivity};
use morpho_algorithms::morphology::{
    closing, dilate, erode, opening, skeletonize, StructuringElement,
};
use morpho_core::Grid;

fn create_test_mask(size: usize) -> Grid<bool> {
    // Blobby pattern with holes and thin bridges
    Grid::from_shape_fn(&[size, size], |idx| {
        let (r, c) = (idx[0], idx[1]);
        (r * 7 + c * 13) % 29 < 17 || (r / 16 + c / 16) % 3 == 0
    })
    .unwrap()
}

fn bench_erode(c: &mut Criterion) {
    let mut group = c.benchmark_group("morphology/erode");
    let se = StructuringElement::square(2, 1).unwrap();
    for size in [256, 512, 1024] {
        let mask = create_test_mask(size);
        group.bench_with_input(BenchmarkId::from_parameter(size), &size, |b, _| {
            b.iter(|| erode(black_box(&mask), &se).unwrap())
        });
    }
    group.finish();
}

fn bench_dilate(c: &mut Criterion) {
    let mut group = c.benchmark_group("morphology/dilate");
    let se = StructuringElement::square(2, 1).unwrap();
    for size in [256, 512, 1024] {
        let mask = create_test_mask(size);
        group.bench_with_input(BenchmarkId::from_parameter(size), &size, |b, _| {
            b.iter(|| dilate(black_box(&mask), &se).unwrap())
        });
    }
    group.finish();
}

fn bench_open_close(c: &mut Criterion) {
    let mut group = c.benchmark_group("morphology/open_close");
    let se = StructuringElement::disk(2, 2).unwrap();
    let mask = create_test_mask(512);
    group.bench_function("opening", |b| {
        b.iter(|| opening(black_box(&mask), &se).unwrap())
    });
    group.bench_function("closing", |b| {
        b.iter(|| closing(black_box(&mask), &se).unwrap())
    });
    group.finish();
}

fn bench_se_shapes(c: &mut Criterion) {
    let mut group = c.benchmark_group("morphology/erode_shapes");
    let mask = create_test_mask(512);
    let shapes: Vec<(&str, StructuringElement)> = vec![
        ("square_3", StructuringElement::square(2, 1).unwrap()),
        ("cross_3", StructuringElement::cross(2, 1).unwrap()),
        ("disk_5", StructuringElement::disk(2, 2).unwrap()),
        ("square_9", StructuringElement::square(2, 4).unwrap()),
    ];
    for (name, se) in &shapes {
        group.bench_with_input(BenchmarkId::new("shape", name), name, |b, _| {
            b.iter(|| erode(black_box(&mask), se).unwrap())
        });
    }
    group.finish();
}

fn bench_skeletonize(c: &mut Criterion) {
    let mut group = c.benchmark_group("morphology/skeletonize");
    group.sample_size(10);
    for size in [128, 256] {
        let mask = create_test_mask(size);
        group.bench_with_input(BenchmarkId::from_parameter(size), &size, |b, _| {
            b.iter(|| skeletonize(black_box(&mask)).unwrap())
        });
    }
    group.finish();
}

fn bench_label(c: &mut Criterion) {
    let mut group = c.benchmark_group("label");
    for size in [256, 512, 1024] {
        let mask = create_test_mask(size);
        group.bench_with_input(BenchmarkId::new("full", size), &size, |b, _| {
            b.iter(|| label(black_box(&mask), Connectivity::Full).unwrap())
        });
    }
    group.finish();
}

criterion_group!(
    benches,
    bench_erode,
    bench_dilate,
    bench_open_close,
    bench_se_shapes,
    bench_skeletonize,
    bench_label,
);
criterion_main!(benches);
