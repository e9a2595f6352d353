//! Level-record analysis.
//!
//! - [`HarmonicAnalysis`]: recover forcing modes of known period from a
//!   lake or bay record
//! - [`ComparisonMetrics`]: score a predicted series against a measured one
//! - [`relative_amplitude_survey`]: compare measured and calculated
//!   amplification across a catalog, with a [`LinearRegression`] through
//!   the points
//!
//! All series carry times in seconds; see [`TimeSeries`].
//!
//! # Example
//!
//! ```
//! use embay::analysis::{HarmonicAnalysis, TimeSeries};
//!
//! let times: Vec<f64> = (0..500).map(|i| i as f64 * 300.0).collect();
//! let values: Vec<f64> = times
//!     .iter()
//!     .map(|&t| 0.03 * (2.0 * std::f64::consts::PI * t / (12.2 * 3600.0)).cos())
//!     .collect();
//! let series = TimeSeries::new(&times, &values).unwrap();
//!
//! let result = HarmonicAnalysis::for_periods_hours(&[12.2]).fit(&series).unwrap();
//! assert!((result.modes[0].amplitude - 0.03).abs() < 1e-6);
//! ```

mod harmonic;
mod metrics;
mod regression;
mod survey;

pub use harmonic::{HarmonicAnalysis, HarmonicResult, ModeFit, project_amplitude};
pub use metrics::ComparisonMetrics;
pub use regression::LinearRegression;
pub use survey::{
    SurveyOutlier, SurveyPoint, SurveyResult, default_outliers, relative_amplitude_survey,
};

use std::f64::consts::TAU;

use crate::error::{ModelError, ModelResult};

/// Water levels paired with their sample times.
///
/// Times are in seconds. Ordering is not enforced here; level sources
/// reject non-monotonic input before building a series.
#[derive(Clone, Debug, PartialEq)]
pub struct TimeSeries {
    time: Vec<f64>,
    level: Vec<f64>,
    /// Source identifier, if any
    pub name: Option<String>,
}

impl TimeSeries {
    /// Pair sample times (s) with levels (m).
    ///
    /// # Errors
    /// - `LengthMismatch` if the slices differ in length
    pub fn new(times: &[f64], levels: &[f64]) -> ModelResult<Self> {
        if times.len() != levels.len() {
            return Err(ModelError::LengthMismatch {
                expected: times.len(),
                actual: levels.len(),
            });
        }
        Ok(Self {
            time: times.to_vec(),
            level: levels.to_vec(),
            name: None,
        })
    }

    /// Label the series.
    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    /// Sample count.
    pub fn len(&self) -> usize {
        self.time.len()
    }

    /// Check if there are no samples.
    pub fn is_empty(&self) -> bool {
        self.time.is_empty()
    }

    /// Sample times (s).
    pub fn times(&self) -> &[f64] {
        &self.time
    }

    /// Levels (m).
    pub fn values(&self) -> &[f64] {
        &self.level
    }

    /// Iterate over `(time, level)` pairs.
    pub fn samples(&self) -> impl Iterator<Item = (f64, f64)> + '_ {
        self.time.iter().copied().zip(self.level.iter().copied())
    }

    /// Time spanned from first to last sample (s).
    pub fn duration(&self) -> f64 {
        match (self.time.first(), self.time.last()) {
            (Some(start), Some(end)) => end - start,
            _ => 0.0,
        }
    }

    /// Spacing of the first two samples (s).
    pub fn sample_interval(&self) -> Option<f64> {
        match self.time.as_slice() {
            [t0, t1, ..] => Some(t1 - t0),
            _ => None,
        }
    }

    /// Mean level, 0 for an empty series.
    pub fn mean(&self) -> f64 {
        if self.level.is_empty() {
            0.0
        } else {
            self.level.iter().sum::<f64>() / self.level.len() as f64
        }
    }

    /// Unbiased variance of the levels.
    pub fn variance(&self) -> f64 {
        let n = self.level.len();
        if n < 2 {
            return 0.0;
        }
        let mean = self.mean();
        self.level.iter().map(|v| (v - mean) * (v - mean)).sum::<f64>() / (n - 1) as f64
    }

    /// Sample standard deviation of the levels (m).
    pub fn std_dev(&self) -> f64 {
        self.variance().sqrt()
    }
}

/// Map a phase into `[0, 2π)`.
pub fn wrap_phase(phase: f64) -> f64 {
    let p = phase.rem_euclid(TAU);
    // rem_euclid can round up to exactly 2π for tiny negative inputs
    if p >= TAU { 0.0 } else { p }
}

/// Signed difference `a - b` mapped into `(-π, π]`.
pub fn phase_difference(a: f64, b: f64) -> f64 {
    let d = wrap_phase(a - b);
    if d > TAU / 2.0 { d - TAU } else { d }
}
