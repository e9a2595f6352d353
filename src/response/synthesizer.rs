//! Time-domain synthesis of the bay response to a multi-mode forcing.
//!
//! For each forcing mode the bay is assumed to oscillate at the forcing
//! frequency with the amplitude given by the transfer function; the
//! composite response is the superposition of all modes:
//!
//! ```text
//! z(t) = Σᵢ |zᵢ| cos(ωᵢ t),      |zᵢ| = bay_amplitude(aᵢ, ωᵢ, ω0, n0)
//! ```
//!
//! The result is data only; plotting and reporting consume it.

use crate::analysis::TimeSeries;
use crate::config::{Catalog, EmbaymentConfig, ForcingMode};
use crate::error::{ModelError, ModelResult};
use crate::oscillator::{OscillatorParameters, Safeguard, supplementary_period};

use super::linspace;

/// Seconds per day.
pub const SECONDS_PER_DAY: f64 = 86_400.0;

/// Reference time resolution: 5-minute steps.
pub const DEFAULT_SAMPLES_PER_HOUR: u32 = 12;

/// Duration of the reference synthesis run (days).
pub const DEFAULT_DURATION_DAYS: f64 = 0.2;

/// Mass of the equivalent oscillator.
const UNIT_MASS: f64 = 1.0;

/// Duration and resolution of a synthesized series.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ResponseSettings {
    /// Length of the series (days)
    pub duration_days: f64,
    /// Samples per hour
    pub samples_per_hour: u32,
}

impl Default for ResponseSettings {
    fn default() -> Self {
        Self {
            duration_days: DEFAULT_DURATION_DAYS,
            samples_per_hour: DEFAULT_SAMPLES_PER_HOUR,
        }
    }
}

impl ResponseSettings {
    /// Create settings.
    pub fn new(duration_days: f64, samples_per_hour: u32) -> Self {
        Self {
            duration_days,
            samples_per_hour,
        }
    }

    /// Total duration (s).
    pub fn duration_seconds(&self) -> f64 {
        self.duration_days * SECONDS_PER_DAY
    }

    /// Number of samples, `floor(days * 24 * samples_per_hour)`.
    pub fn n_samples(&self) -> usize {
        (self.duration_days * 24.0 * f64::from(self.samples_per_hour)).floor() as usize
    }

    /// Uniform time base from 0 to the duration, both ends included.
    ///
    /// # Errors
    /// - `Domain` if the duration is not positive or fewer than two samples
    ///   would be produced
    pub fn time_base(&self) -> ModelResult<Vec<f64>> {
        if !(self.duration_days.is_finite() && self.duration_days > 0.0) {
            return Err(ModelError::domain(format!(
                "duration must be positive, got {} days",
                self.duration_days
            )));
        }
        let n = self.n_samples();
        if n < 2 {
            return Err(ModelError::domain(format!(
                "{} days at {} samples/hour gives {} samples, need at least 2",
                self.duration_days, self.samples_per_hour, n
            )));
        }
        Ok(linspace(0.0, self.duration_seconds(), n))
    }
}

/// Diagnostics for one forcing mode.
#[derive(Clone, Debug, PartialEq)]
pub struct ModeResponse {
    /// Forcing period (hours)
    pub period_hours: f64,
    /// Lake amplitude a (m)
    pub forcing_amplitude: f64,
    /// Angular frequency ω (rad/s)
    pub angular_frequency: f64,
    /// ω / ω0
    pub relative_frequency: f64,
    /// Steady-state bay amplitude |z| (m)
    pub bay_amplitude: f64,
    /// Equivalent linear damping c = n0 ω |z|
    pub damping: f64,
    /// Equivalent stiffness k = ω0² (unit mass)
    pub stiffness: f64,
    /// Equivalent forcing magnitude Fa = k a
    pub forcing_magnitude: f64,
    /// Phase lag φ (rad, [0, π])
    pub phase_lag: f64,
    /// Time lag φ / ω (s)
    pub supplementary_period: f64,
    /// Peak of the resonance curve for this forcing amplitude (m)
    pub max_amplification: f64,
    /// Safeguards applied while evaluating this mode
    pub safeguards: Vec<Safeguard>,
}

impl ModeResponse {
    /// Evaluate one forcing mode.
    pub fn compute(parameters: &OscillatorParameters, mode: &ForcingMode) -> Self {
        let a = mode.amplitude_meters;
        let w = mode.angular_frequency();

        let bay = parameters.bay_amplitude(a, w);
        let phase = parameters.phase_lag(a, w);
        let max = parameters.max_amplification(a);

        let stiffness = parameters.eigen_angular_frequency.powi(2) * UNIT_MASS;
        let safeguards = [bay.safeguard, phase.safeguard, max.safeguard]
            .into_iter()
            .flatten()
            .collect();

        Self {
            period_hours: mode.period_hours,
            forcing_amplitude: a,
            angular_frequency: w,
            relative_frequency: parameters.relative_frequency(w),
            bay_amplitude: bay.value,
            damping: parameters.linearized_damping * w * bay.value.abs(),
            stiffness,
            forcing_magnitude: stiffness * a,
            phase_lag: phase.value,
            supplementary_period: supplementary_period(phase.value, w),
            max_amplification: max.value,
            safeguards,
        }
    }

    /// Bay-to-lake amplitude ratio.
    pub fn amplification(&self) -> f64 {
        self.bay_amplitude / self.forcing_amplitude.abs()
    }
}

/// Synthesized time series.
#[derive(Clone, Debug, PartialEq)]
pub struct ResponseSeries {
    /// Time (s from start), uniform and strictly increasing
    pub time: Vec<f64>,
    /// Bay displacement per mode, aligned with `time`
    pub per_mode_displacement: Vec<Vec<f64>>,
    /// Lake forcing per mode, `a cos(ω t)`, aligned with `time`
    pub per_mode_forcing: Vec<Vec<f64>>,
    /// Combined lake forcing `Σ a sin(ω t + φ)` (diagnostic)
    pub forcing: Vec<f64>,
    /// Sum of all mode displacements
    pub total_displacement: Vec<f64>,
}

impl ResponseSeries {
    /// Number of samples.
    pub fn len(&self) -> usize {
        self.time.len()
    }

    /// Check if the series is empty.
    pub fn is_empty(&self) -> bool {
        self.time.is_empty()
    }

    /// Number of modes.
    pub fn n_modes(&self) -> usize {
        self.per_mode_displacement.len()
    }

    /// Time step (s).
    pub fn sample_interval(&self) -> f64 {
        match self.time.as_slice() {
            [t0, t1, ..] => t1 - t0,
            _ => 0.0,
        }
    }

    /// Displacement of one mode.
    pub fn mode_displacement(&self, index: usize) -> Option<&[f64]> {
        self.per_mode_displacement.get(index).map(Vec::as_slice)
    }

    /// Composite bay response.
    pub fn total_response(&self) -> &[f64] {
        &self.total_displacement
    }

    /// Composite bay response as a level series.
    pub fn total_series(&self) -> ModelResult<TimeSeries> {
        TimeSeries::new(&self.time, &self.total_displacement)
    }
}

/// Full result of a synthesis run.
#[derive(Clone, Debug, PartialEq)]
pub struct SynthesizedResponse {
    /// Embayment name
    pub name: String,
    /// Coefficients derived from the geometry
    pub parameters: OscillatorParameters,
    /// Per-mode diagnostics, in forcing order
    pub modes: Vec<ModeResponse>,
    /// Time-domain series
    pub series: ResponseSeries,
}

impl SynthesizedResponse {
    /// All safeguards applied across modes.
    pub fn safeguards(&self) -> impl Iterator<Item = &Safeguard> {
        self.modes.iter().flat_map(|m| m.safeguards.iter())
    }
}

/// Drives the oscillator model across the forcing modes of an embayment.
#[derive(Clone, Copy, Debug, Default)]
pub struct ResponseSynthesizer {
    settings: ResponseSettings,
}

impl ResponseSynthesizer {
    /// Create a synthesizer with the given settings.
    pub fn new(settings: ResponseSettings) -> Self {
        Self { settings }
    }

    /// Settings in use.
    pub fn settings(&self) -> ResponseSettings {
        self.settings
    }

    /// Synthesize the response of one embayment.
    ///
    /// # Errors
    /// - `InvalidConfig` for invalid geometry or no forcing modes
    /// - `Domain` for a non-positive period or an unusable time base
    pub fn synthesize(&self, config: &EmbaymentConfig) -> ModelResult<SynthesizedResponse> {
        config.validate()?;
        let time = self.settings.time_base()?;
        let parameters = OscillatorParameters::from_config(config)?;

        tracing::info!(
            embayment = %config.name,
            eigen_angular_frequency = parameters.eigen_angular_frequency,
            eigen_period_hours = parameters.eigen_period_seconds() / 3600.0,
            linearized_damping = parameters.linearized_damping,
            "derived oscillator parameters"
        );

        let n = time.len();
        let mut forcing = vec![0.0; n];
        let mut total_displacement = vec![0.0; n];
        let mut per_mode_displacement = Vec::with_capacity(config.n_modes());
        let mut per_mode_forcing = Vec::with_capacity(config.n_modes());
        let mut modes = Vec::with_capacity(config.n_modes());

        for mode in &config.forcing_modes {
            let response = ModeResponse::compute(&parameters, mode);
            let w = response.angular_frequency;

            tracing::debug!(
                embayment = %config.name,
                period_hours = mode.period_hours,
                bay_amplitude = response.bay_amplitude,
                phase_lag = response.phase_lag,
                max_amplification = response.max_amplification,
                "mode response"
            );

            for (f, &t) in forcing.iter_mut().zip(&time) {
                *f += mode.evaluate(t);
            }

            let displacement: Vec<f64> = time
                .iter()
                .map(|&t| response.bay_amplitude * (w * t).cos())
                .collect();
            for (z, d) in total_displacement.iter_mut().zip(&displacement) {
                *z += d;
            }

            per_mode_forcing.push(
                time.iter()
                    .map(|&t| mode.amplitude_meters * (w * t).cos())
                    .collect(),
            );
            per_mode_displacement.push(displacement);
            modes.push(response);
        }

        Ok(SynthesizedResponse {
            name: config.name.clone(),
            parameters,
            modes,
            series: ResponseSeries {
                time,
                per_mode_displacement,
                per_mode_forcing,
                forcing,
                total_displacement,
            },
        })
    }

    /// Synthesize every catalog entry, in name order.
    ///
    /// Entries fail independently; one bad entry does not affect the others.
    pub fn synthesize_catalog(
        &self,
        catalog: &Catalog,
    ) -> Vec<(String, ModelResult<SynthesizedResponse>)> {
        catalog
            .iter()
            .map(|cfg| (cfg.name.clone(), self.synthesize(cfg)))
            .collect()
    }

    /// Parallel version of [`Self::synthesize_catalog`] using Rayon.
    #[cfg(feature = "parallel")]
    pub fn synthesize_catalog_parallel(
        &self,
        catalog: &Catalog,
    ) -> Vec<(String, ModelResult<SynthesizedResponse>)> {
        use rayon::prelude::*;

        let configs: Vec<&EmbaymentConfig> = catalog.iter().collect();
        configs
            .into_par_iter()
            .map(|cfg| (cfg.name.clone(), self.synthesize(cfg)))
            .collect()
    }
}

/// Synthesize the response of one embayment.
///
/// Convenience wrapper around [`ResponseSynthesizer::synthesize`].
pub fn synthesize_response(
    config: &EmbaymentConfig,
    duration_days: f64,
    samples_per_hour: u32,
) -> ModelResult<SynthesizedResponse> {
    ResponseSynthesizer::new(ResponseSettings::new(duration_days, samples_per_hour))
        .synthesize(config)
}
