//! Predicted against measured flushing.

use thiserror::Error;

use super::{FlowResult, FlushingConfig, FlushingEstimator};
use crate::config::EmbaymentConfig;
use crate::error::ModelError;
use crate::io::{LevelSeriesSource, SourceError};
use crate::response::SynthesizedResponse;

/// Error type for flushing comparisons.
#[derive(Debug, Error)]
pub enum ComparisonError {
    /// Flow or volume computation failed
    #[error(transparent)]
    Model(#[from] ModelError),

    /// Measured series could not be read
    #[error("Measured series: {0}")]
    Source(#[from] SourceError),
}

/// Flushing estimates for one embayment.
#[derive(Clone, Debug)]
pub struct FlushingComparison {
    /// Embayment name
    pub name: String,
    /// Estimate from the synthesized total response
    pub predicted: FlowResult,
    /// Estimate from the measured series, if the embayment names one
    pub measured: Option<FlowResult>,
}

impl FlushingComparison {
    /// Predicted over measured flushed volume.
    pub fn volume_ratio(&self) -> Option<f64> {
        self.measured
            .as_ref()
            .filter(|m| m.flushed_volume > 0.0)
            .map(|m| self.predicted.flushed_volume / m.flushed_volume)
    }
}

/// Run the flushing estimate on the predicted and the measured levels.
///
/// The measured spacing is taken from the first two timestamps. Both
/// estimates are reported as they are; no statistics are computed.
///
/// # Errors
/// - `Model` for a degenerate series or spacing
/// - `Source` if the measured series cannot be read
pub fn compare_flushing(
    config: &EmbaymentConfig,
    response: &SynthesizedResponse,
    source: &dyn LevelSeriesSource,
    flushing: FlushingConfig,
) -> Result<FlushingComparison, ComparisonError> {
    let estimator = FlushingEstimator::for_embayment(config).with_config(flushing);

    let series = &response.series;
    let predicted = estimator.estimate(series.total_response(), series.sample_interval())?;

    let measured = match config.measured_series_ref.as_deref() {
        Some(source_id) => {
            let levels = source.read(source_id)?;
            let dt = levels
                .sample_interval()
                .ok_or(ModelError::InsufficientData {
                    required: 2,
                    actual: levels.len(),
                })?;
            Some(estimator.estimate(levels.values(), dt)?)
        }
        None => None,
    };

    tracing::info!(
        embayment = %config.name,
        predicted_volume = predicted.flushed_volume,
        measured_volume = measured.as_ref().map(|m| m.flushed_volume),
        "flushing comparison"
    );

    Ok(FlushingComparison {
        name: config.name.clone(),
        predicted,
        measured,
    })
}
