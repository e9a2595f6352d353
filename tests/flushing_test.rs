//! Integration tests for flow and flushed-volume estimates.

use embay::flow::FlushingComparison;
use embay::{
    EmbaymentId, FlushingConfig, FlushingEstimator, InMemoryLevelSource, LevelSeriesSource,
    TimeUnit, compare_flushing, compute_flow, estimate_flushed_volume, synthesize_response,
};

#[test]
fn test_flow_scenario() {
    let levels = [1.0, 0.9, 0.9, 1.1];
    let flow = compute_flow(850_000.0, &levels, 300.0).unwrap();

    let expected = [0.0, 850_000.0 * 0.1 / 300.0, 0.0, 850_000.0 * -0.2 / 300.0];
    for (q, e) in flow.iter().zip(&expected) {
        assert!((q - e).abs() < 1e-8, "flow {} vs {}", q, e);
    }

    let totals = estimate_flushed_volume(&flow, &levels, 300.0).unwrap();
    // only the first step is rising outflow
    assert!((totals.flushed_volume - flow[1] / 2.0 * 300.0).abs() < 1e-6);
    assert!((totals.level_change - 0.15).abs() < 1e-12);
}

#[test]
fn test_falling_level_gives_outflow() {
    let levels: Vec<f64> = (0..50).map(|i| 0.5 - 0.003 * i as f64).collect();
    let flow = compute_flow(64_000.0, &levels, 300.0).unwrap();
    assert_eq!(flow[0], 0.0);
    assert!(flow[1..].iter().all(|&q| q > 0.0));
}

#[test]
fn test_volume_never_negative() {
    let levels: Vec<f64> = (0..400)
        .map(|i| {
            let t = i as f64 * 300.0;
            0.03 * (t / 7000.0).sin() + 0.01 * (t / 1300.0).cos() - 0.004 * (t / 500.0).sin()
        })
        .collect();
    let estimator = FlushingEstimator::new(150_000.0);
    let result = estimator.estimate(&levels, 300.0).unwrap();
    assert!(result.flushed_volume >= 0.0);
    assert!(result.level_change > 0.0);
    assert_eq!(result.flow.len(), levels.len());
}

#[test]
fn test_predicted_vs_measured_flushing() {
    let cfg = EmbaymentId::FrenchmansBay.config();
    let source_id = cfg.measured_series_ref.clone().unwrap();

    // five-minute predicted series
    let response = synthesize_response(&cfg, 2.0, 12).unwrap();
    let series = &response.series;

    // a "measurement" that is the prediction at exact five-minute spacing,
    // with timestamps in days
    let n = series.len();
    let days: Vec<f64> = (0..n).map(|i| i as f64 * 300.0 / 86_400.0).collect();
    let source = InMemoryLevelSource::new()
        .with_series(
            source_id.clone(),
            &days,
            series.total_response(),
            TimeUnit::Days,
        )
        .unwrap();
    let measured = source.read(&source_id).unwrap();
    assert!((measured.sample_interval().unwrap() - 300.0).abs() < 1e-9);

    let cmp: FlushingComparison =
        compare_flushing(&cfg, &response, &source, FlushingConfig::default()).unwrap();
    let measured = cmp.measured.as_ref().unwrap();

    assert!(!measured.interval_mismatch);
    assert!(cmp.predicted.flushed_volume > 0.0);
    assert!(measured.flushed_volume > 0.0);
    // same levels, nearly the same spacing
    let ratio = cmp.volume_ratio().unwrap();
    assert!((ratio - 300.0 / series.sample_interval()).abs() < 1e-9, "ratio {}", ratio);
}
