//! Benchmarks for the box least squares search
//!
//! Compares sequential and parallel evaluation over grids of increasing size,
//! and measures the single-period kernel on its own.

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use transit_bls::{
    BoxKernel, BoxSearchEngine, BoxSearchParameters, Candidate, CandidateGrid, DurationPolicy,
};
use transit_core::synthetic::SyntheticTransit;
use transit_core::TimeSeries;

fn light_curve(span: f64) -> TimeSeries {
    SyntheticTransit::default()
        .with_sampling(span, 0.02)
        .generate()
        .unwrap()
}

fn bench_kernel(c: &mut Criterion) {
    let mut group = c.benchmark_group("box_kernel");

    for &span in &[30.0, 90.0, 360.0] {
        let series = light_curve(span);
        let kernel = BoxKernel::new(&series, 10).unwrap();
        let candidate = Candidate::new(4.0, 0.1).unwrap();

        group.bench_with_input(
            BenchmarkId::new("evaluate", series.len()),
            &kernel,
            |b, kernel| b.iter(|| black_box(kernel.evaluate(black_box(&candidate)))),
        );
    }

    group.finish();
}

fn bench_search(c: &mut Criterion) {
    let mut group = c.benchmark_group("box_search");
    group.sample_size(10);

    let series = light_curve(90.0);
    let params = BoxSearchParameters::default();

    for &n_periods in &[100, 1000, 5000] {
        let grid = CandidateGrid::linear(0.3, 20.0, n_periods, DurationPolicy::Fixed(0.1)).unwrap();

        let sequential = BoxSearchEngine::sequential(params);
        group.bench_with_input(
            BenchmarkId::new("sequential", n_periods),
            &grid,
            |b, grid| b.iter(|| black_box(sequential.search(&series, grid).unwrap())),
        );

        #[cfg(feature = "parallel")]
        {
            let parallel = BoxSearchEngine::new(transit_core::parallel(), params);
            group.bench_with_input(
                BenchmarkId::new("parallel", n_periods),
                &grid,
                |b, grid| b.iter(|| black_box(parallel.search(&series, grid).unwrap())),
            );
        }
    }

    group.finish();
}

criterion_group!(benches, bench_kernel, bench_search);
criterion_main!(benches);
