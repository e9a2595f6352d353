//! Nonlinear damped-oscillator model of an embayment.
//!
//! The basin and its channel behave as a Helmholtz resonator: the water in
//! the channel is the mass, the basin surface provides the restoring force,
//! and quadratic channel friction dissipates energy. This module provides
//!
//! - [`OscillatorParameters`]: eigenfrequency and linearized damping derived
//!   from geometry
//! - the closed-form transfer function ([`bay_amplitude`],
//!   [`max_amplification`], [`dimensionless_amplitude`], [`phase_lag`])
//! - the generic linear forced response ([`forced_oscillator_magnitude`])
//! - [`Safeguard`] diagnostics for singular inputs
//!
//! # Mathematical Background
//!
//! ```text
//! O  = B H                            mouth cross-section
//! fm = L (f / L + Cd / H)             head loss (separation + friction)
//! n0 = 8 fm A / (3π O L)              linearized damping
//! ω0 = √(g O / (L A))                 eigenfrequency
//! ```
//!
//! with `f = 1.55` the flow-separation loss and `g = 9.81 m/s²`.

mod forced;
mod safeguard;
mod transfer;

pub use forced::{
    CRITICAL_DAMPING_PERTURBATION, ForcedResponse, ZERO_DAMPING_FRACTION,
    forced_oscillator_magnitude,
};
pub use safeguard::{Evaluation, Safeguard};
pub use transfer::{
    PHASE_CLAMP_TOLERANCE, SINGULAR_TOLERANCE, bay_amplitude, bay_amplitude_at,
    dimensionless_amplitude, max_amplification, max_amplification_at, phase_fraction, phase_lag,
    phase_lag_at, supplementary_period,
};

use std::f64::consts::PI;

use crate::config::EmbaymentConfig;
use crate::error::{ModelResult, ensure_positive};

/// Gravitational acceleration (m/s²).
pub const GRAVITY: f64 = 9.81;

/// Head loss due to flow separation at the channel ends.
pub const FLOW_SEPARATION_LOSS: f64 = 1.55;

/// Universal linearized damping of the scale-free formulation, 8 / (3π).
pub const DIMENSIONLESS_DAMPING: f64 = 8.0 / (3.0 * PI);

/// Oscillator coefficients derived from embayment geometry.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct OscillatorParameters {
    /// Basin surface area A (m²)
    pub basin_area: f64,
    /// Channel length L (m)
    pub channel_length: f64,
    /// Mouth cross-section O = B H (m²)
    pub mouth_cross_section: f64,
    /// Head loss coefficient fm (dimensionless)
    pub head_loss_coefficient: f64,
    /// Linearized damping coefficient n0 (1/m)
    pub linearized_damping: f64,
    /// Eigen angular frequency ω0 (rad/s)
    pub eigen_angular_frequency: f64,
}

impl OscillatorParameters {
    /// Derive the coefficients from a configuration's geometry.
    ///
    /// # Errors
    /// - `InvalidConfig` if the geometry does not validate
    pub fn from_config(config: &EmbaymentConfig) -> ModelResult<Self> {
        config.validate_geometry()?;
        let head_loss = Self::head_loss(
            config.channel_length,
            config.channel_depth,
            config.drag_coefficient,
        );
        Self::from_parts(
            config.basin_area,
            config.mouth_cross_section(),
            config.channel_length,
            head_loss,
        )
    }

    /// Build from basin area, mouth cross-section, channel length and head loss.
    ///
    /// Used by the area and mouth scaling studies, which vary A or O while
    /// keeping the channel's head loss.
    ///
    /// # Errors
    /// - `Domain` if any argument is not positive and finite
    pub fn from_parts(
        basin_area: f64,
        mouth_cross_section: f64,
        channel_length: f64,
        head_loss_coefficient: f64,
    ) -> ModelResult<Self> {
        ensure_positive("basin area", basin_area)?;
        ensure_positive("mouth cross-section", mouth_cross_section)?;
        ensure_positive("channel length", channel_length)?;
        ensure_positive("head loss coefficient", head_loss_coefficient)?;

        let linearized_damping = 8.0 * head_loss_coefficient * basin_area
            / (3.0 * PI * mouth_cross_section * channel_length);
        let eigen_angular_frequency =
            (GRAVITY * mouth_cross_section / channel_length / basin_area).sqrt();

        Ok(Self {
            basin_area,
            channel_length,
            mouth_cross_section,
            head_loss_coefficient,
            linearized_damping,
            eigen_angular_frequency,
        })
    }

    /// Head loss fm = L (f / L + Cd / H).
    pub fn head_loss(channel_length: f64, channel_depth: f64, drag_coefficient: f64) -> f64 {
        channel_length * (FLOW_SEPARATION_LOSS / channel_length + drag_coefficient / channel_depth)
    }

    /// Factor A fm / (O L) turning amplitudes (m) into the scale-free form.
    ///
    /// `n0 = DIMENSIONLESS_DAMPING * dimensionless_scale()`.
    pub fn dimensionless_scale(&self) -> f64 {
        self.basin_area * self.head_loss_coefficient
            / (self.mouth_cross_section * self.channel_length)
    }

    /// Eigenfrequency in Hz.
    pub fn eigen_frequency_hz(&self) -> f64 {
        self.eigen_angular_frequency / (2.0 * PI)
    }

    /// Eigenperiod in seconds.
    pub fn eigen_period_seconds(&self) -> f64 {
        2.0 * PI / self.eigen_angular_frequency
    }

    /// Frequency ratio ω / ω0.
    pub fn relative_frequency(&self, angular_frequency: f64) -> f64 {
        angular_frequency / self.eigen_angular_frequency
    }

    /// Bay amplitude for forcing `(a, ω)` with these coefficients.
    pub fn bay_amplitude(&self, forcing_amplitude: f64, angular_frequency: f64) -> Evaluation {
        bay_amplitude_at(
            forcing_amplitude,
            angular_frequency,
            self.eigen_angular_frequency,
            self.linearized_damping,
        )
    }

    /// Resonance-curve peak for forcing amplitude `a`.
    pub fn max_amplification(&self, forcing_amplitude: f64) -> Evaluation {
        max_amplification_at(forcing_amplitude, self.linearized_damping)
    }

    /// Phase lag at angular frequency ω.
    pub fn phase_lag(&self, forcing_amplitude: f64, angular_frequency: f64) -> Evaluation {
        phase_lag_at(
            self.linearized_damping,
            self.eigen_angular_frequency,
            forcing_amplitude,
            angular_frequency,
        )
    }
}
