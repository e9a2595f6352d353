//! Level series sources.
//!
//! A source maps an opaque identifier (the `measured_series_ref` of an
//! embayment) to a water-level [`TimeSeries`] with times in seconds.
//! Implementations must reject empty and non-monotonic series; gaps are left
//! as they are.

use std::collections::BTreeMap;

use thiserror::Error;

use crate::analysis::TimeSeries;
use crate::error::ModelError;

/// Error type for level series sources.
#[derive(Debug, Error)]
pub enum SourceError {
    /// No series registered under this identifier
    #[error("Unknown level series: {0}")]
    Unknown(String),

    /// Series has no samples
    #[error("Level series {0} contains no data")]
    Empty(String),

    /// Time values not strictly increasing
    #[error("Non-monotonic time in level series {source_id} at sample {index}")]
    NonMonotonic { source_id: String, index: usize },

    /// Times and values could not be paired
    #[error(transparent)]
    Model(#[from] ModelError),
}

/// Unit of the timestamps handed to a source.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum TimeUnit {
    /// Seconds
    #[default]
    Seconds,
    /// Hours
    Hours,
    /// Days
    Days,
}

impl TimeUnit {
    /// Length of one unit in seconds.
    pub fn seconds(self) -> f64 {
        match self {
            TimeUnit::Seconds => 1.0,
            TimeUnit::Hours => 3600.0,
            TimeUnit::Days => 86_400.0,
        }
    }

    /// Convert a timestamp in this unit to seconds.
    pub fn to_seconds(self, value: f64) -> f64 {
        value * self.seconds()
    }
}

/// Provider of measured water-level series.
pub trait LevelSeriesSource {
    /// Read the series registered under `source_id`, times in seconds.
    fn read(&self, source_id: &str) -> Result<TimeSeries, SourceError>;
}

/// Check that a series is non-empty and strictly increasing in time.
///
/// # Errors
/// - `Empty` if the series has no samples
/// - `NonMonotonic` at the first sample not after its predecessor
pub fn validate_series(source_id: &str, series: &TimeSeries) -> Result<(), SourceError> {
    if series.is_empty() {
        return Err(SourceError::Empty(source_id.to_string()));
    }
    if let Some(index) = series.times().windows(2).position(|w| w[1] <= w[0]) {
        return Err(SourceError::NonMonotonic {
            source_id: source_id.to_string(),
            index: index + 1,
        });
    }
    Ok(())
}

/// Level series held in memory, keyed by identifier.
#[derive(Clone, Debug, Default)]
pub struct InMemoryLevelSource {
    series: BTreeMap<String, TimeSeries>,
}

impl InMemoryLevelSource {
    /// Create an empty source.
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a series, converting its timestamps from `unit` to seconds.
    ///
    /// Replaces any series already registered under `source_id`.
    ///
    /// # Errors
    /// - `Model(LengthMismatch)` if `times` and `levels` differ in length
    /// - `Empty`/`NonMonotonic` as in [`validate_series`]
    pub fn insert(
        &mut self,
        source_id: impl Into<String>,
        times: &[f64],
        levels: &[f64],
        unit: TimeUnit,
    ) -> Result<(), SourceError> {
        let source_id = source_id.into();
        let seconds: Vec<f64> = times.iter().map(|&t| unit.to_seconds(t)).collect();
        let series = TimeSeries::new(&seconds, levels)?.with_name(source_id.clone());
        validate_series(&source_id, &series)?;
        self.series.insert(source_id, series);
        Ok(())
    }

    /// Builder form of [`Self::insert`].
    pub fn with_series(
        mut self,
        source_id: impl Into<String>,
        times: &[f64],
        levels: &[f64],
        unit: TimeUnit,
    ) -> Result<Self, SourceError> {
        self.insert(source_id, times, levels, unit)?;
        Ok(self)
    }

    /// Registered identifiers.
    pub fn ids(&self) -> Vec<&str> {
        self.series.keys().map(String::as_str).collect()
    }

    /// Number of registered series.
    pub fn len(&self) -> usize {
        self.series.len()
    }

    /// Check if no series is registered.
    pub fn is_empty(&self) -> bool {
        self.series.is_empty()
    }
}

impl LevelSeriesSource for InMemoryLevelSource {
    fn read(&self, source_id: &str) -> Result<TimeSeries, SourceError> {
        self.series
            .get(source_id)
            .cloned()
            .ok_or_else(|| SourceError::Unknown(source_id.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_time_unit_conversion() {
        assert_eq!(TimeUnit::Seconds.to_seconds(5.0), 5.0);
        assert_eq!(TimeUnit::Hours.to_seconds(0.5), 1800.0);
        assert_eq!(TimeUnit::Days.to_seconds(0.25), 21_600.0);
        assert_eq!(TimeUnit::default(), TimeUnit::Seconds);
    }

    #[test]
    fn test_in_memory_read_converts_units() {
        let source = InMemoryLevelSource::new()
            .with_series("gauge", &[0.0, 1.0, 2.0], &[0.1, 0.2, 0.15], TimeUnit::Hours)
            .unwrap();

        let series = source.read("gauge").unwrap();
        assert_eq!(series.times(), &[0.0, 3600.0, 7200.0]);
        assert_eq!(series.values(), &[0.1, 0.2, 0.15]);
        assert_eq!(series.name.as_deref(), Some("gauge"));
    }

    #[test]
    fn test_unknown_source() {
        let source = InMemoryLevelSource::new();
        assert!(matches!(source.read("missing"), Err(SourceError::Unknown(_))));
    }

    #[test]
    fn test_empty_series_rejected() {
        let mut source = InMemoryLevelSource::new();
        let result = source.insert("empty", &[], &[], TimeUnit::Seconds);
        assert!(matches!(result, Err(SourceError::Empty(_))));
        assert!(source.is_empty());
    }

    #[test]
    fn test_non_monotonic_rejected() {
        let mut source = InMemoryLevelSource::new();
        let result = source.insert(
            "gauge",
            &[0.0, 300.0, 300.0, 900.0],
            &[0.0; 4],
            TimeUnit::Seconds,
        );
        match result {
            Err(SourceError::NonMonotonic { index, .. }) => assert_eq!(index, 2),
            other => panic!("expected non-monotonic error, got {:?}", other),
        }
    }

    #[test]
    fn test_length_mismatch() {
        let mut source = InMemoryLevelSource::new();
        let result = source.insert("gauge", &[0.0, 1.0], &[0.0], TimeUnit::Seconds);
        assert!(matches!(
            result,
            Err(SourceError::Model(ModelError::LengthMismatch { .. }))
        ));
    }
}
