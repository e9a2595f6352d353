//! Integration tests for harmonic fitting and comparison metrics.
//!
//! Tests the measured-comparison pipeline: fitting forcing modes from a lake
//! record, driving the model with them and scoring the prediction.

use embay::analysis::project_amplitude;
use embay::{
    ComparisonMetrics, EmbaymentConfig, EmbaymentId, ForcingMode, HarmonicAnalysis, TimeSeries,
    synthesize_response,
};

/// Lake levels from a set of sine-convention modes.
fn lake_record(modes: &[ForcingMode], mean: f64, times: &[f64]) -> Vec<f64> {
    times
        .iter()
        .map(|&t| mean + modes.iter().map(|m| m.evaluate(t)).sum::<f64>())
        .collect()
}

#[test]
fn test_fitted_forcing_reproduces_catalog_response() {
    let cfg = EmbaymentId::FrenchmansBay.config();

    // ten days of five-minute lake levels
    let times: Vec<f64> = (0..2880).map(|i| i as f64 * 300.0).collect();
    let values = lake_record(&cfg.forcing_modes, 75.1, &times);
    let series = TimeSeries::new(&times, &values).unwrap();

    let fit = HarmonicAnalysis::for_config(&cfg).fit(&series).unwrap();
    assert!((fit.mean - 75.1).abs() < 1e-8, "mean {}", fit.mean);

    let fitted_cfg = EmbaymentConfig {
        forcing_modes: fit.to_forcing_modes(),
        ..cfg.clone()
    };
    for (fitted, original) in fitted_cfg.forcing_modes.iter().zip(&cfg.forcing_modes) {
        assert!(
            (fitted.amplitude_meters - original.amplitude_meters).abs() < 1e-8,
            "T={} h amplitude {} vs {}",
            original.period_hours,
            fitted.amplitude_meters,
            original.amplitude_meters
        );
        // wrapped phases agree with the catalog's up to multiples of 2π
        let d = (fitted.evaluate(1000.0) - original.evaluate(1000.0)).abs();
        assert!(d < 1e-8, "T={} h mismatch {}", original.period_hours, d);
    }

    let from_catalog = synthesize_response(&cfg, 1.0, 12).unwrap();
    let from_fit = synthesize_response(&fitted_cfg, 1.0, 12).unwrap();

    let metrics = ComparisonMetrics::compute(
        from_fit.series.total_response(),
        from_catalog.series.total_response(),
    )
    .unwrap();
    assert!(metrics.rmse < 1e-8, "RMSE {}", metrics.rmse);
    assert!(metrics.is_highly_correlated());
    assert!(metrics.is_skillful());
}

#[test]
fn test_noisy_record_still_scores_well() {
    let modes = [
        ForcingMode::new(16.8 / 60.0, 0.02, 0.0),
        ForcingMode::new(12.0 / 60.0, 0.018, 1.0),
    ];
    let times: Vec<f64> = (0..2000).map(|i| i as f64 * 30.0).collect();
    let clean = lake_record(&modes, 0.0, &times);
    // deterministic pseudo-noise
    let noisy: Vec<f64> = clean
        .iter()
        .enumerate()
        .map(|(i, v)| v + 0.002 * ((i as f64 * 12.9898).sin() * 43_758.545).fract())
        .collect();

    let series = TimeSeries::new(&times, &noisy).unwrap();
    let fit = HarmonicAnalysis::for_periods_hours(&[16.8 / 60.0, 12.0 / 60.0])
        .fit(&series)
        .unwrap();

    for (fitted, original) in fit.modes.iter().zip(&modes) {
        assert!(
            (fitted.amplitude - original.amplitude_meters).abs() < 1e-3,
            "amplitude {} vs {}",
            fitted.amplitude,
            original.amplitude_meters
        );
    }

    let reconstructed = fit.reconstruct(&times);
    let metrics = ComparisonMetrics::compute(&reconstructed, &noisy).unwrap();
    assert!(metrics.correlation > 0.99, "correlation {}", metrics.correlation);
    assert!(metrics.rmse < 2e-3);
}

#[test]
fn test_projection_agrees_with_fit_on_whole_cycles() {
    // 20 cycles of the 1.38 h mode
    let period_hours = 1.38;
    let n = 20 * 1380 / 5;
    let times: Vec<f64> = (0..n).map(|i| i as f64 * 18.0).collect();
    let mode = ForcingMode::new(period_hours, 0.015, -15.0);
    let values = lake_record(&[mode], 0.3, &times);
    let series = TimeSeries::new(&times, &values).unwrap();

    let projected = project_amplitude(&series, period_hours).unwrap();
    let fitted = HarmonicAnalysis::for_periods_hours(&[period_hours])
        .fit(&series)
        .unwrap()
        .modes[0]
        .amplitude;
    assert!((projected - 0.015).abs() < 1e-9, "projected {}", projected);
    assert!((fitted - projected).abs() < 1e-9);
}
