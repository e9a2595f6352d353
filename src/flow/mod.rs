//! Channel flow and flushed volume from a water-level series.
//!
//! # Mathematical Background
//!
//! Flow through the channel is the backward difference of the basin level
//! scaled by the basin area, positive when the bay drains:
//!
//! ```text
//! q[0] = 0
//! q[i] = A (η[i-1] - η[i]) / Δt
//! ```
//!
//! The flushed volume integrates the exchange phase only: a trapezoid
//! `(q[i] + q[i-1]) / 2 * T` is added when the outflow is positive and
//! still rising (`q[i] > 0` and `q[i] > q[i-1]`). A step that crosses from
//! inflow to outflow adds nothing if its trapezoid is negative, so the volume
//! never decreases. `T` is the nominal flushing interval, 300 s unless
//! configured otherwise. Alongside the volume, `½ Σ |η[i] - η[i-1]|` is
//! accumulated as a level-change proxy.

mod comparison;

pub use comparison::{ComparisonError, FlushingComparison, compare_flushing};

use crate::config::EmbaymentConfig;
use crate::error::{ModelError, ModelResult, ensure_positive};

/// Nominal flushing interval of the reference five-minute records (s).
pub const DEFAULT_FLUSHING_INTERVAL: f64 = 300.0;

/// Relative spacing difference tolerated before flagging a mismatch.
pub const DEFAULT_MISMATCH_TOLERANCE: f64 = 0.01;

/// Channel flow for a level series (m³/s).
///
/// # Errors
/// - `Domain` if `basin_area` or `sample_interval` is not positive
pub fn compute_flow(basin_area: f64, levels: &[f64], sample_interval: f64) -> ModelResult<Vec<f64>> {
    ensure_positive("basin area", basin_area)?;
    ensure_positive("sample interval", sample_interval)?;

    let mut flow = Vec::with_capacity(levels.len());
    if !levels.is_empty() {
        flow.push(0.0);
    }
    flow.extend(
        levels
            .windows(2)
            .map(|w| basin_area * (w[0] - w[1]) / sample_interval),
    );
    Ok(flow)
}

/// Accumulated flushed volume and level-change proxy.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct FlushingTotals {
    /// Volume exchanged during rising positive outflow (m³)
    pub flushed_volume: f64,
    /// Half the summed absolute level steps (m)
    pub level_change: f64,
}

/// Integrate the exchange phase of a flow series.
///
/// Each counted step adds `max(0, (q[i] + q[i-1]) / 2 * interval)`. The
/// unclamped trapezoid goes negative on a step that rises from strong inflow
/// to weak outflow (flow `[0, -5, 1]` at 300 s would add -600 m³); such a
/// step adds nothing here, so the volume never decreases.
///
/// # Errors
/// - `LengthMismatch` if `flow` and `levels` differ in length
/// - `Domain` if `interval` is not positive
pub fn estimate_flushed_volume(
    flow: &[f64],
    levels: &[f64],
    interval: f64,
) -> ModelResult<FlushingTotals> {
    if flow.len() != levels.len() {
        return Err(ModelError::LengthMismatch {
            expected: levels.len(),
            actual: flow.len(),
        });
    }
    ensure_positive("flushing interval", interval)?;

    let totals = flow.windows(2).zip(levels.windows(2)).fold(
        FlushingTotals::default(),
        |mut acc, (q, eta)| {
            acc.level_change += 0.5 * (eta[1] - eta[0]).abs();
            // count only the rising part of an outflow event
            if q[1] - q[0] > 0.0 && q[1] > 0.0 {
                acc.flushed_volume += ((q[1] + q[0]) / 2.0 * interval).max(0.0);
            }
            acc
        },
    );
    Ok(totals)
}

/// Flushing estimate settings.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct FlushingConfig {
    /// Nominal interval used in the volume integral (s)
    pub interval_seconds: f64,
    /// Relative difference between actual and nominal spacing that raises
    /// [`FlowResult::interval_mismatch`]
    pub mismatch_tolerance: f64,
}

impl Default for FlushingConfig {
    fn default() -> Self {
        Self {
            interval_seconds: DEFAULT_FLUSHING_INTERVAL,
            mismatch_tolerance: DEFAULT_MISMATCH_TOLERANCE,
        }
    }
}

impl FlushingConfig {
    /// Set the nominal interval.
    pub fn with_interval(mut self, seconds: f64) -> Self {
        self.interval_seconds = seconds;
        self
    }

    /// Set the mismatch tolerance.
    pub fn with_mismatch_tolerance(mut self, tolerance: f64) -> Self {
        self.mismatch_tolerance = tolerance;
        self
    }

    /// Check if the actual spacing differs from the nominal interval.
    pub fn is_mismatch(&self, sample_interval: f64) -> bool {
        (sample_interval - self.interval_seconds).abs()
            > self.mismatch_tolerance * self.interval_seconds
    }
}

/// Flow series and flushing estimate for one level series.
#[derive(Clone, Debug, PartialEq)]
pub struct FlowResult {
    /// Channel flow, `flow[0] = 0` (m³/s)
    pub flow: Vec<f64>,
    /// Flushed volume (m³)
    pub flushed_volume: f64,
    /// Level-change proxy (m)
    pub level_change: f64,
    /// Actual sample spacing (s)
    pub sample_interval: f64,
    /// Spacing differs from the nominal flushing interval
    pub interval_mismatch: bool,
}

/// Flow and flushing for a basin of fixed area.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct FlushingEstimator {
    basin_area: f64,
    config: FlushingConfig,
}

impl FlushingEstimator {
    /// Create an estimator with the default interval.
    pub fn new(basin_area: f64) -> Self {
        Self {
            basin_area,
            config: FlushingConfig::default(),
        }
    }

    /// Create an estimator for an embayment's basin.
    pub fn for_embayment(config: &EmbaymentConfig) -> Self {
        Self::new(config.basin_area)
    }

    /// Replace the settings.
    pub fn with_config(mut self, config: FlushingConfig) -> Self {
        self.config = config;
        self
    }

    /// Basin area (m²).
    pub fn basin_area(&self) -> f64 {
        self.basin_area
    }

    /// Settings in use.
    pub fn config(&self) -> FlushingConfig {
        self.config
    }

    /// Flow and flushed volume of a level series sampled every
    /// `sample_interval` seconds.
    ///
    /// # Errors
    /// - `Domain` for a non-positive area, spacing or interval
    pub fn estimate(&self, levels: &[f64], sample_interval: f64) -> ModelResult<FlowResult> {
        let flow = compute_flow(self.basin_area, levels, sample_interval)?;
        let totals = estimate_flushed_volume(&flow, levels, self.config.interval_seconds)?;

        let interval_mismatch = self.config.is_mismatch(sample_interval);
        if interval_mismatch {
            tracing::warn!(
                sample_interval,
                flushing_interval = self.config.interval_seconds,
                "sample spacing differs from the flushing interval"
            );
        }

        Ok(FlowResult {
            flow,
            flushed_volume: totals.flushed_volume,
            level_change: totals.level_change,
            sample_interval,
            interval_mismatch,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const TOL: f64 = 1e-9;

    #[test]
    fn test_flow_sign_convention() {
        let levels = [1.0, 0.9, 0.9, 1.1];
        let flow = compute_flow(850_000.0, &levels, 300.0).unwrap();

        assert_eq!(flow.len(), 4);
        assert_eq!(flow[0], 0.0);
        // falling level drains the bay: positive flow
        assert!((flow[1] - 850_000.0 * 0.1 / 300.0).abs() < TOL);
        assert!(flow[2].abs() < TOL);
        assert!((flow[3] + 850_000.0 * 0.2 / 300.0).abs() < TOL);
    }

    #[test]
    fn test_flow_short_series() {
        assert!(compute_flow(1.0, &[], 1.0).unwrap().is_empty());
        assert_eq!(compute_flow(1.0, &[0.5], 1.0).unwrap(), vec![0.0]);
    }

    #[test]
    fn test_flow_invalid() {
        assert!(matches!(
            compute_flow(0.0, &[1.0, 2.0], 1.0),
            Err(ModelError::Domain(_))
        ));
        assert!(matches!(
            compute_flow(1.0, &[1.0, 2.0], -300.0),
            Err(ModelError::Domain(_))
        ));
    }

    #[test]
    fn test_flushed_volume_counts_rising_outflow_only() {
        let flow = [0.0, 2.0, 3.0, 1.0, -1.0, 0.5];
        let levels = [0.0; 6];
        let totals = estimate_flushed_volume(&flow, &levels, 10.0).unwrap();

        // rising and positive at i = 1, 2, 5; the crossing step at 5 has a
        // negative trapezoid and adds nothing
        let expected = (2.0 + 0.0) / 2.0 * 10.0 + (3.0 + 2.0) / 2.0 * 10.0;
        assert!((totals.flushed_volume - expected).abs() < TOL);

        let crossing = [-0.2, 1.0];
        let totals = estimate_flushed_volume(&crossing, &[0.0, 0.0], 10.0).unwrap();
        assert!((totals.flushed_volume - 4.0).abs() < TOL);
        assert_eq!(totals.level_change, 0.0);
    }

    #[test]
    fn test_inflow_to_outflow_step_adds_nothing() {
        // rising and positive at i = 2, but (1 - 5) / 2 * 300 = -600
        let totals = estimate_flushed_volume(&[0.0, -5.0, 1.0], &[0.0; 3], 300.0).unwrap();
        assert_eq!(totals.flushed_volume, 0.0);

        // a later rising outflow step still counts in full
        let totals =
            estimate_flushed_volume(&[0.0, -5.0, 1.0, 3.0], &[0.0; 4], 300.0).unwrap();
        assert!((totals.flushed_volume - 600.0).abs() < TOL);
    }

    #[test]
    fn test_level_change_proxy() {
        let levels = [1.0, 0.9, 0.9, 1.1];
        let flow = compute_flow(1.0, &levels, 1.0).unwrap();
        let totals = estimate_flushed_volume(&flow, &levels, 300.0).unwrap();
        assert!((totals.level_change - 0.15).abs() < TOL);
    }

    #[test]
    fn test_flushed_volume_length_mismatch() {
        let result = estimate_flushed_volume(&[0.0, 1.0], &[0.0], 300.0);
        assert!(matches!(result, Err(ModelError::LengthMismatch { .. })));
    }

    #[test]
    fn test_estimator_flags_interval_mismatch() {
        let estimator = FlushingEstimator::new(1000.0);
        let levels = [0.0, -0.01, -0.03];

        let matched = estimator.estimate(&levels, 300.0).unwrap();
        assert!(!matched.interval_mismatch);

        let slightly_off = estimator.estimate(&levels, 302.0).unwrap();
        assert!(!slightly_off.interval_mismatch);

        let mismatched = estimator.estimate(&levels, 60.0).unwrap();
        assert!(mismatched.interval_mismatch);
        // the nominal interval is used regardless of the spacing
        let q1 = 1000.0 * 0.01 / 60.0;
        let q2 = 1000.0 * 0.02 / 60.0;
        let expected = q1 / 2.0 * 300.0 + (q1 + q2) / 2.0 * 300.0;
        assert!((mismatched.flushed_volume - expected).abs() < TOL);
    }

    #[test]
    fn test_configured_interval() {
        let estimator =
            FlushingEstimator::new(1000.0).with_config(FlushingConfig::default().with_interval(60.0));
        let result = estimator.estimate(&[0.0, -0.01], 60.0).unwrap();
        assert!(!result.interval_mismatch);
        assert!((result.flushed_volume - 1000.0 * 0.01 / 60.0 / 2.0 * 60.0).abs() < TOL);
    }
}
