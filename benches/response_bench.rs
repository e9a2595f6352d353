//! Benchmarks for the transfer function, synthesis and flushing estimates.
//!
//! Run with: `cargo bench --bench response_bench`

use criterion::{BenchmarkId, Criterion, black_box, criterion_group, criterion_main};
use embay::response::{MouthDesignStudy, SweepSettings, amplitude_curves};
use embay::{
    Catalog, EmbaymentId, FlushingEstimator, OscillatorParameters, ResponseSettings,
    ResponseSynthesizer, bay_amplitude,
};

/// Benchmark the closed-form amplitude over a frequency sweep.
fn bench_bay_amplitude(c: &mut Criterion) {
    let mut group = c.benchmark_group("bay_amplitude");

    let cfg = EmbaymentId::FrenchmansBay.config();
    let p = OscillatorParameters::from_config(&cfg).unwrap();
    let w0 = p.eigen_angular_frequency;

    for n in [1_000, 10_000, 100_000] {
        let grid: Vec<f64> = (0..n)
            .map(|i| 1e-4 + 3.5 * w0 * i as f64 / (n - 1) as f64)
            .collect();

        group.bench_with_input(BenchmarkId::new("sweep", n), &grid, |b, grid| {
            b.iter(|| {
                let mut total = 0.0;
                for &w in grid {
                    total += bay_amplitude(
                        black_box(0.0365),
                        black_box(w),
                        black_box(w0),
                        black_box(p.linearized_damping),
                    );
                }
                total
            });
        });
    }

    group.bench_function("catalog_curves", |b| {
        let catalog = Catalog::builtin();
        b.iter(|| {
            for cfg in catalog.iter() {
                black_box(amplitude_curves(cfg, SweepSettings::default()).unwrap());
            }
        });
    });

    group.finish();
}

/// Benchmark time-series synthesis against record length.
fn bench_synthesis(c: &mut Criterion) {
    let mut group = c.benchmark_group("synthesis");

    let cfg = EmbaymentId::FrenchmansBay.config();
    for days in [1.0, 10.0, 30.0] {
        let synthesizer = ResponseSynthesizer::new(ResponseSettings::new(days, 12));
        group.bench_with_input(BenchmarkId::new("fmb_days", days), &cfg, |b, cfg| {
            b.iter(|| black_box(synthesizer.synthesize(black_box(cfg)).unwrap()));
        });
    }

    let catalog = Catalog::builtin();
    let synthesizer = ResponseSynthesizer::new(ResponseSettings::new(5.0, 12));
    group.bench_function("catalog_serial", |b| {
        b.iter(|| black_box(synthesizer.synthesize_catalog(&catalog)));
    });

    #[cfg(feature = "parallel")]
    group.bench_function("catalog_parallel", |b| {
        b.iter(|| black_box(synthesizer.synthesize_catalog_parallel(&catalog)));
    });

    group.finish();
}

/// Benchmark flow and flushed-volume estimation.
fn bench_flushing(c: &mut Criterion) {
    let mut group = c.benchmark_group("flushing");

    let cfg = EmbaymentId::FrenchmansBay.config();
    let estimator = FlushingEstimator::for_embayment(&cfg);
    for days in [1.0, 30.0] {
        let response = ResponseSynthesizer::new(ResponseSettings::new(days, 12))
            .synthesize(&cfg)
            .unwrap();
        let levels = response.series.total_response().to_vec();
        let dt = response.series.sample_interval();

        group.bench_with_input(BenchmarkId::new("estimate", levels.len()), &levels, |b, levels| {
            b.iter(|| black_box(estimator.estimate(black_box(levels), dt).unwrap()));
        });
    }

    group.finish();
}

/// Benchmark the mouth design chart.
fn bench_mouth_design(c: &mut Criterion) {
    let study = MouthDesignStudy::default();
    let widths = MouthDesignStudy::default_widths();

    c.bench_function("mouth_design_chart", |b| {
        b.iter(|| {
            black_box(
                study
                    .curves(&MouthDesignStudy::DEFAULT_BASIN_AREAS, black_box(&widths))
                    .unwrap(),
            )
        });
    });
}

criterion_group!(
    benches,
    bench_bay_amplitude,
    bench_synthesis,
    bench_flushing,
    bench_mouth_design,
);
criterion_main!(benches);
