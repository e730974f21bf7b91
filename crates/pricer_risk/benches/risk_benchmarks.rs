//! Criterion benchmarks for pricer_risk sweeps and grids.
//!
//! Benchmarks cover:
//! - Price sweep (101 points)
//! - Time-decay sweep for short and long-dated contracts
//! - Heat-map grid, sequential vs Rayon

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use pricer_core::types::{ContractSpec, MarketState, OptionType};
use pricer_models::instruments::Position;
use pricer_risk::grid::{build_heatmap, HeatmapRequest};
use pricer_risk::parallel::ParallelConfig;
use pricer_risk::simulation::{
    generate_pnl_simulation, generate_time_decay_simulation, PriceSweepRequest, TimeDecayRequest,
};

/// Benchmark the 101-point price sweep.
fn bench_price_sweep(c: &mut Criterion) {
    let request = PriceSweepRequest::new(100.0, 100.0, 3.0, 30.0 / 365.0, 0.25, OptionType::Call)
        .with_rate(0.045);

    c.bench_function("price_sweep", |b| {
        b.iter(|| generate_pnl_simulation(black_box(&request)))
    });
}

/// Benchmark the time-decay sweep across contract tenors.
fn bench_time_sweep(c: &mut Criterion) {
    let mut group = c.benchmark_group("time_sweep");

    for days in [7_u32, 30, 365] {
        let request = TimeDecayRequest::new(100.0, 100.0, 3.0, days, 0.25, OptionType::Put);
        group.bench_with_input(BenchmarkId::new("days", days), &request, |b, request| {
            b.iter(|| generate_time_decay_simulation(black_box(request)))
        });
    }

    group.finish();
}

/// Benchmark heat-map construction, sequential vs parallel.
fn bench_heatmap(c: &mut Criterion) {
    let mut group = c.benchmark_group("heatmap");
    let market = MarketState::new(100.0, 0.045, 0.0).unwrap();
    let contract = ContractSpec::from_days(100.0, OptionType::Call, 0.25, 60.0).unwrap();
    let position = Position::new(contract, 3.0).unwrap();

    for n_strikes in [15_usize, 100, 1_000] {
        let strikes: Vec<f64> = (0..n_strikes)
            .map(|i| 50.0 + 100.0 * i as f64 / n_strikes as f64)
            .collect();
        let request = HeatmapRequest::new(position, market)
            .with_rows(strikes)
            .with_otm_percentage(50.0);

        let sequential = request
            .clone()
            .with_parallel_config(ParallelConfig::sequential());
        group.bench_with_input(
            BenchmarkId::new("sequential", n_strikes),
            &sequential,
            |b, request| b.iter(|| build_heatmap(black_box(request))),
        );

        let parallel = request.with_parallel_config(ParallelConfig::default());
        group.bench_with_input(
            BenchmarkId::new("parallel", n_strikes),
            &parallel,
            |b, request| b.iter(|| build_heatmap(black_box(request))),
        );
    }

    group.finish();
}

criterion_group!(benches, bench_price_sweep, bench_time_sweep, bench_heatmap);
criterion_main!(benches);
