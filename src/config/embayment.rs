//! Embayment geometry and forcing spectrum.
//!
//! An [`EmbaymentConfig`] is a value object: it is built once (from a
//! catalog preset, a TOML file or user code) and only read afterwards.
//!
//! # Geometry
//!
//! ```text
//!      lake / sea            channel              basin
//!   ~~~~~~~~~~~~~~~~~   |<---- L ---->|   +----------------------+
//!   forcing ze(t)  ===> | B wide, H deep | ==> |   area A, level z(t)   |
//!   ~~~~~~~~~~~~~~~~~   |              |   +----------------------+
//! ```
//!
//! The forcing spectrum is a list of [`ForcingMode`]s, one per harmonic
//! observed (or assumed) in the lake signal.

use serde::{Deserialize, Serialize};
use std::f64::consts::PI;

use crate::error::{ModelError, ModelResult};

/// Seconds per hour.
pub const SECONDS_PER_HOUR: f64 = 3600.0;

/// One sinusoidal component of the lake oscillation.
///
/// The lake level contributed by the mode is `a * sin(ω t + φ)` with
/// `ω = 2π / (T * 3600)`.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ForcingMode {
    /// Period (hours)
    pub period_hours: f64,
    /// Lake amplitude (m)
    pub amplitude_meters: f64,
    /// Phase (radians)
    #[serde(default)]
    pub phase_radians: f64,
    /// Measured amplitude of the same mode inside the bay (m), when known
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub bay_amplitude_meters: Option<f64>,
}

impl ForcingMode {
    /// Create a forcing mode without a measured bay amplitude.
    pub fn new(period_hours: f64, amplitude_meters: f64, phase_radians: f64) -> Self {
        Self {
            period_hours,
            amplitude_meters,
            phase_radians,
            bay_amplitude_meters: None,
        }
    }

    /// Attach the amplitude measured inside the bay for this mode.
    pub fn with_bay_amplitude(mut self, amplitude: f64) -> Self {
        self.bay_amplitude_meters = Some(amplitude);
        self
    }

    /// Period in seconds.
    pub fn period_seconds(&self) -> f64 {
        self.period_hours * SECONDS_PER_HOUR
    }

    /// Angular frequency ω = 2π / T (rad/s).
    pub fn angular_frequency(&self) -> f64 {
        2.0 * PI / self.period_seconds()
    }

    /// Lake level contribution at time `t` (s).
    pub fn evaluate(&self, t: f64) -> f64 {
        self.amplitude_meters * (self.angular_frequency() * t + self.phase_radians).sin()
    }

    /// Check that the mode can be turned into a frequency.
    ///
    /// # Errors
    /// - `Domain` if the period is zero, negative or not finite, or the
    ///   amplitude is not finite
    pub fn validate(&self) -> ModelResult<()> {
        if !(self.period_hours.is_finite() && self.period_hours > 0.0) {
            return Err(ModelError::domain(format!(
                "forcing period must be positive, got {} h",
                self.period_hours
            )));
        }
        if !self.amplitude_meters.is_finite() {
            return Err(ModelError::domain(format!(
                "forcing amplitude must be finite, got {}",
                self.amplitude_meters
            )));
        }
        Ok(())
    }
}

/// Physical parameters of a named embayment.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct EmbaymentConfig {
    /// Catalog key (e.g. "FMB")
    pub name: String,
    /// Basin surface area A (m²)
    pub basin_area: f64,
    /// Channel width B (m)
    pub channel_width: f64,
    /// Channel depth H (m)
    pub channel_depth: f64,
    /// Channel length L (m)
    pub channel_length: f64,
    /// Bottom drag coefficient Cd (dimensionless)
    pub drag_coefficient: f64,
    /// Reference to a measured bay level series for validation
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub measured_series_ref: Option<String>,
    /// Forcing spectrum, in the order the modes were identified
    #[serde(default)]
    pub forcing_modes: Vec<ForcingMode>,
}

impl EmbaymentConfig {
    /// Create a configuration with geometry only; add modes with [`Self::with_mode`].
    pub fn new(
        name: impl Into<String>,
        basin_area: f64,
        channel_width: f64,
        channel_depth: f64,
        channel_length: f64,
        drag_coefficient: f64,
    ) -> Self {
        Self {
            name: name.into(),
            basin_area,
            channel_width,
            channel_depth,
            channel_length,
            drag_coefficient,
            measured_series_ref: None,
            forcing_modes: Vec::new(),
        }
    }

    /// Append a forcing mode.
    pub fn with_mode(mut self, mode: ForcingMode) -> Self {
        self.forcing_modes.push(mode);
        self
    }

    /// Replace the forcing spectrum.
    pub fn with_modes(mut self, modes: Vec<ForcingMode>) -> Self {
        self.forcing_modes = modes;
        self
    }

    /// Set the measured series reference.
    pub fn with_measured_series(mut self, source_id: impl Into<String>) -> Self {
        self.measured_series_ref = Some(source_id.into());
        self
    }

    /// Channel cross-section O = B * H (m²).
    pub fn mouth_cross_section(&self) -> f64 {
        self.channel_width * self.channel_depth
    }

    /// Forcing periods in hours.
    pub fn periods_hours(&self) -> Vec<f64> {
        self.forcing_modes.iter().map(|m| m.period_hours).collect()
    }

    /// Number of forcing modes.
    pub fn n_modes(&self) -> usize {
        self.forcing_modes.len()
    }

    /// Validate the geometry only.
    ///
    /// # Errors
    /// - `InvalidConfig` if any length or area is not positive and finite,
    ///   or the drag coefficient is negative
    pub fn validate_geometry(&self) -> ModelResult<()> {
        let lengths = [
            ("basin_area", self.basin_area),
            ("channel_width", self.channel_width),
            ("channel_depth", self.channel_depth),
            ("channel_length", self.channel_length),
        ];
        for (field, value) in lengths {
            if !(value.is_finite() && value > 0.0) {
                return Err(ModelError::invalid_config(
                    &self.name,
                    format!("{field} must be positive, got {value}"),
                ));
            }
        }
        if !(self.drag_coefficient.is_finite() && self.drag_coefficient >= 0.0) {
            return Err(ModelError::invalid_config(
                &self.name,
                format!(
                    "drag_coefficient must be non-negative, got {}",
                    self.drag_coefficient
                ),
            ));
        }
        Ok(())
    }

    /// Validate geometry and forcing spectrum.
    ///
    /// # Errors
    /// - `InvalidConfig` for bad geometry or an empty forcing spectrum
    /// - `Domain` for a mode with a non-positive period
    pub fn validate(&self) -> ModelResult<()> {
        self.validate_geometry()?;
        if self.forcing_modes.is_empty() {
            return Err(ModelError::invalid_config(
                &self.name,
                "at least one forcing mode is required",
            ));
        }
        for mode in &self.forcing_modes {
            mode.validate()?;
        }
        Ok(())
    }
}
