//! Criterion benchmarks for pricer_core distribution functions.
//!
//! The normal CDF is evaluated twice per price and once more per Greek, so
//! its cost dominates every sweep.

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use pricer_core::math::distributions::{norm_cdf, norm_pdf};

/// Generate evenly spaced evaluation points across [-6, 6].
fn generate_points(n: usize) -> Vec<f64> {
    (0..n)
        .map(|i| -6.0 + 12.0 * i as f64 / (n - 1) as f64)
        .collect()
}

/// Benchmark the normal CDF on batches of points.
fn bench_norm_cdf(c: &mut Criterion) {
    let mut group = c.benchmark_group("norm_cdf");

    for size in [101, 1_000, 10_000] {
        let xs = generate_points(size);
        group.bench_with_input(BenchmarkId::new("f64", size), &xs, |b, xs| {
            b.iter(|| xs.iter().map(|&x| norm_cdf(black_box(x))).sum::<f64>());
        });
    }

    group.finish();
}

/// Benchmark the normal PDF on batches of points.
fn bench_norm_pdf(c: &mut Criterion) {
    let mut group = c.benchmark_group("norm_pdf");

    for size in [101, 1_000, 10_000] {
        let xs = generate_points(size);
        group.bench_with_input(BenchmarkId::new("f64", size), &xs, |b, xs| {
            b.iter(|| xs.iter().map(|&x| norm_pdf(black_box(x))).sum::<f64>());
        });
    }

    group.finish();
}

criterion_group!(benches, bench_norm_cdf, bench_norm_pdf);
criterion_main!(benches);
