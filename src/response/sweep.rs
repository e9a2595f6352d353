//! Frequency sweeps for the hypothetical-response studies.
//!
//! Each sweep evaluates one transfer quantity over
//! `linspace(SWEEP_START, ω0 * multiple, steps)` and returns the curve as
//! data. Variants perturb one ingredient of the model:
//!
//! - forcing mode (amplitude curves)
//! - linear damping c (forced-oscillator curves)
//! - linearized damping n0 (phase curves)
//! - basin area A or mouth cross-section O (scaled curves)
//!
//! [`MouthDesignStudy`] instead fixes the forcing and varies the mouth width.

use crate::config::EmbaymentConfig;
use crate::error::{ModelError, ModelResult, ensure_positive};
use crate::oscillator::{
    OscillatorParameters, bay_amplitude, dimensionless_amplitude, forced_oscillator_magnitude,
    phase_lag,
};

use super::{ModeResponse, linspace};

/// Lowest angular frequency of every sweep (rad/s).
pub const SWEEP_START: f64 = 1e-4;

/// Default area and mouth scaling factors.
pub const DEFAULT_SCALE_FACTORS: [f64; 3] = [1.0 / 6.0, 1.0, 6.0];

/// Sweep resolution and extent.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct SweepSettings {
    /// Number of frequencies
    pub steps: usize,
    /// Upper end of the sweep as a multiple of ω0
    pub multiple: f64,
}

/// Points per sweep in every preset.
const DEFAULT_STEPS: usize = 1000;

/// Same as [`SweepSettings::amplitude`].
impl Default for SweepSettings {
    fn default() -> Self {
        Self::amplitude()
    }
}

impl SweepSettings {
    /// Create settings.
    pub fn new(steps: usize, multiple: f64) -> Self {
        Self { steps, multiple }
    }

    /// Extent of the amplitude curves, up to 3.5 ω0.
    pub fn amplitude() -> Self {
        Self::new(DEFAULT_STEPS, 3.5)
    }

    /// Extent of the friction and phase curves, up to 4 ω0.
    pub fn friction() -> Self {
        Self::new(DEFAULT_STEPS, 4.0)
    }

    /// Extent of the area and mouth scaled curves, up to 3 ω0.
    pub fn scaled() -> Self {
        Self::new(DEFAULT_STEPS, 3.0)
    }

    /// Frequencies from [`SWEEP_START`] to `ω0 * multiple`.
    ///
    /// # Errors
    /// - `Domain` if fewer than two steps are requested or the upper end does
    ///   not exceed the start
    pub fn grid(&self, eigen_frequency: f64) -> ModelResult<Vec<f64>> {
        let stop = eigen_frequency * self.multiple;
        if self.steps < 2 {
            return Err(ModelError::domain(format!(
                "a sweep needs at least 2 steps, got {}",
                self.steps
            )));
        }
        if !(stop.is_finite() && stop > SWEEP_START) {
            return Err(ModelError::domain(format!(
                "sweep upper end {stop} must exceed {SWEEP_START}"
            )));
        }
        Ok(linspace(SWEEP_START, stop, self.steps))
    }
}

/// One response curve over a frequency grid.
#[derive(Clone, Debug, PartialEq)]
pub struct ResponseCurve {
    /// Curve label (period, factor or multiplier)
    pub label: String,
    /// Eigen angular frequency of the system that produced the curve
    pub eigen_angular_frequency: f64,
    /// Sweep frequencies (rad/s)
    pub angular_frequencies: Vec<f64>,
    /// Response value at each frequency
    pub values: Vec<f64>,
    /// Forcing lies within ω0 / 8 of the eigenfrequency
    pub near_resonance: bool,
}

impl ResponseCurve {
    fn new(
        label: String,
        eigen_angular_frequency: f64,
        angular_frequencies: Vec<f64>,
        values: Vec<f64>,
    ) -> Self {
        Self {
            label,
            eigen_angular_frequency,
            angular_frequencies,
            values,
            near_resonance: false,
        }
    }

    /// Frequencies relative to ω0.
    pub fn relative_frequencies(&self) -> Vec<f64> {
        self.angular_frequencies
            .iter()
            .map(|w| w / self.eigen_angular_frequency)
            .collect()
    }

    /// Frequency and value of the largest sample.
    pub fn peak(&self) -> Option<(f64, f64)> {
        self.angular_frequencies
            .iter()
            .zip(&self.values)
            .filter(|(_, v)| v.is_finite())
            .max_by(|a, b| a.1.total_cmp(b.1))
            .map(|(&w, &v)| (w, v))
    }

    /// Number of samples.
    pub fn len(&self) -> usize {
        self.values.len()
    }

    /// Check if the curve is empty.
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }
}

fn near_resonance(angular_frequency: f64, eigen_frequency: f64) -> bool {
    (eigen_frequency - angular_frequency).abs() < eigen_frequency / 8.0
}

/// Bay amplitude against frequency for every forcing mode of `config`.
///
/// # Errors
/// - `InvalidConfig`/`Domain` if the configuration does not validate
pub fn amplitude_curves(
    config: &EmbaymentConfig,
    settings: SweepSettings,
) -> ModelResult<Vec<ResponseCurve>> {
    config.validate()?;
    let p = OscillatorParameters::from_config(config)?;
    let w0 = p.eigen_angular_frequency;
    let grid = settings.grid(w0)?;

    Ok(config
        .forcing_modes
        .iter()
        .map(|mode| {
            let values = grid
                .iter()
                .map(|&w| bay_amplitude(mode.amplitude_meters, w, w0, p.linearized_damping))
                .collect();
            let mut curve = ResponseCurve::new(
                format!("T={:.2} h", mode.period_hours),
                w0,
                grid.clone(),
                values,
            );
            curve.near_resonance = near_resonance(mode.angular_frequency(), w0);
            curve
        })
        .collect())
}

/// Forced-oscillator magnitude for increasing linear damping.
///
/// Uses the stiffness and forcing of `mode` with damping `c * (i + 1) / 2`
/// for `i` in `0..count`. [`SweepSettings::friction`] gives the usual extent.
///
/// # Errors
/// - `Domain` if the mode's coefficients are unusable
pub fn friction_curves(
    mode: &ModeResponse,
    count: usize,
    settings: SweepSettings,
) -> ModelResult<Vec<ResponseCurve>> {
    let w0 = mode.stiffness.sqrt();
    let grid = settings.grid(w0)?;

    (0..count)
        .map(|i| {
            let multiplier = (i + 1) as f64 / 2.0;
            let c = mode.damping * multiplier;
            let response =
                forced_oscillator_magnitude(1.0, c, mode.stiffness, mode.forcing_magnitude, &grid)?;
            Ok(ResponseCurve::new(
                format!("c x {multiplier:.1}"),
                w0,
                grid.clone(),
                response.magnitudes,
            ))
        })
        .collect()
}

/// Phase lag against frequency for linearized damping `n0 * (i + 1)`,
/// usually over [`SweepSettings::friction`].
///
/// # Errors
/// - `Domain` if the sweep grid cannot be built
pub fn phase_curves(
    parameters: &OscillatorParameters,
    forcing_amplitude: f64,
    count: usize,
    settings: SweepSettings,
) -> ModelResult<Vec<ResponseCurve>> {
    let w0 = parameters.eigen_angular_frequency;
    let grid = settings.grid(w0)?;

    Ok((0..count)
        .map(|i| {
            let n0 = parameters.linearized_damping * (i + 1) as f64;
            let values = phase_lag(n0, w0, forcing_amplitude, &grid);
            ResponseCurve::new(format!("n0 x {}", i + 1), w0, grid.clone(), values)
        })
        .collect())
}

/// Dimensionless forcings of the reference chart: 0.04 tripled up to 52.
pub fn default_dimensionless_forcings() -> Vec<f64> {
    std::iter::successors(Some(0.04), |a| Some(a * 3.0))
        .take_while(|&a| a < 52.0)
        .collect()
}

/// Relative amplitude `α / αe` against `ω / ω0` for each dimensionless
/// forcing αe.
///
/// Frequencies run from 0 to `stop` in `steps` points.
///
/// # Errors
/// - `Domain` if a forcing is not positive, `steps < 2` or `stop <= 0`
pub fn dimensionless_curves(
    forcings: &[f64],
    steps: usize,
    stop: f64,
) -> ModelResult<Vec<ResponseCurve>> {
    if steps < 2 || !(stop.is_finite() && stop > 0.0) {
        return Err(ModelError::domain(format!(
            "dimensionless sweep needs steps >= 2 and stop > 0, got {steps} and {stop}"
        )));
    }
    let grid = linspace(0.0, stop, steps);

    forcings
        .iter()
        .map(|&forcing| {
            ensure_positive("dimensionless forcing", forcing)?;
            let values = grid
                .iter()
                .map(|&w| dimensionless_amplitude(forcing, w) / forcing)
                .collect();
            Ok(ResponseCurve::new(
                format!("forcing={forcing:5.2}"),
                1.0,
                grid.clone(),
                values,
            ))
        })
        .collect()
}

/// Which geometric quantity a scaled sweep varies.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ScaledQuantity {
    /// Basin surface area A
    BasinArea,
    /// Mouth cross-section O
    MouthCrossSection,
}

/// Bay amplitude of one forcing mode with A or O scaled by each factor.
///
/// Each variant recomputes ω0 and n0 and sweeps its own frequency range,
/// normally [`SweepSettings::scaled`].
///
/// # Errors
/// - `InvalidConfig`/`Domain` if the configuration does not validate
/// - `Domain` for an out-of-range mode index or a non-positive factor
pub fn scaled_curves(
    config: &EmbaymentConfig,
    mode_index: usize,
    quantity: ScaledQuantity,
    factors: &[f64],
    settings: SweepSettings,
) -> ModelResult<Vec<ResponseCurve>> {
    config.validate()?;
    let base = OscillatorParameters::from_config(config)?;
    let mode = config.forcing_modes.get(mode_index).ok_or_else(|| {
        ModelError::domain(format!(
            "mode index {} out of range for {} modes",
            mode_index,
            config.n_modes()
        ))
    })?;

    factors
        .iter()
        .map(|&factor| {
            let (area, mouth) = match quantity {
                ScaledQuantity::BasinArea => (base.basin_area * factor, base.mouth_cross_section),
                ScaledQuantity::MouthCrossSection => {
                    (base.basin_area, base.mouth_cross_section * factor)
                }
            };
            let p = OscillatorParameters::from_parts(
                area,
                mouth,
                base.channel_length,
                base.head_loss_coefficient,
            )?;
            let w0 = p.eigen_angular_frequency;
            let grid = settings.grid(w0)?;
            let values = grid
                .iter()
                .map(|&w| bay_amplitude(mode.amplitude_meters, w, w0, p.linearized_damping))
                .collect();
            let mut curve = ResponseCurve::new(format!("x {factor:.3}"), w0, grid, values);
            curve.near_resonance = near_resonance(mode.angular_frequency(), w0);
            Ok(curve)
        })
        .collect()
}

/// Bay amplitude against mouth cross-section for one basin area.
#[derive(Clone, Debug, PartialEq)]
pub struct DesignCurve {
    /// Basin area (m²)
    pub basin_area: f64,
    /// Mouth cross-sections B H (m²)
    pub mouth_cross_sections: Vec<f64>,
    /// Lake forcing amplitude (m)
    pub forcing_amplitude: f64,
    /// Bay amplitude at each cross-section (m)
    pub bay_amplitudes: Vec<f64>,
}

impl DesignCurve {
    /// Bay-to-lake amplitude ratio at each cross-section.
    pub fn relative_amplitudes(&self) -> Vec<f64> {
        let a = self.forcing_amplitude.abs();
        self.bay_amplitudes.iter().map(|z| z / a).collect()
    }
}

/// Fixed channel and forcing used to size an embayment mouth.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct MouthDesignStudy {
    /// Channel depth H (m)
    pub channel_depth: f64,
    /// Channel length L (m)
    pub channel_length: f64,
    /// Drag coefficient Cd
    pub drag_coefficient: f64,
    /// Lake forcing amplitude (m)
    pub forcing_amplitude: f64,
    /// Forcing period (hours)
    pub period_hours: f64,
}

impl Default for MouthDesignStudy {
    fn default() -> Self {
        Self {
            channel_depth: 1.5,
            channel_length: 2000.0,
            drag_coefficient: 0.0032,
            forcing_amplitude: 0.1,
            period_hours: 1.5,
        }
    }
}

impl MouthDesignStudy {
    /// Basin areas of the reference design chart (m²).
    pub const DEFAULT_BASIN_AREAS: [f64; 6] = [5_000.0, 30_000.0, 65_000.0, 150_000.0, 500_000.0, 1e6];

    /// Mouth widths of the reference design chart (m).
    pub fn default_widths() -> Vec<f64> {
        linspace(0.01, 40.0, 1000)
    }

    /// Set the forcing.
    pub fn with_forcing(mut self, amplitude: f64, period_hours: f64) -> Self {
        self.forcing_amplitude = amplitude;
        self.period_hours = period_hours;
        self
    }

    /// Set the channel.
    pub fn with_channel(mut self, depth: f64, length: f64, drag_coefficient: f64) -> Self {
        self.channel_depth = depth;
        self.channel_length = length;
        self.drag_coefficient = drag_coefficient;
        self
    }

    /// Curve for a single basin area.
    ///
    /// # Errors
    /// - `Domain` for a non-positive area, width, depth, length or period
    pub fn curve(&self, basin_area: f64, widths: &[f64]) -> ModelResult<DesignCurve> {
        if !(self.period_hours.is_finite() && self.period_hours > 0.0) {
            return Err(ModelError::domain(format!(
                "forcing period must be positive, got {} h",
                self.period_hours
            )));
        }
        let w = 2.0 * std::f64::consts::PI / (self.period_hours * 3600.0);
        let head_loss = OscillatorParameters::head_loss(
            self.channel_length,
            self.channel_depth,
            self.drag_coefficient,
        );

        let mut mouth_cross_sections = Vec::with_capacity(widths.len());
        let mut bay_amplitudes = Vec::with_capacity(widths.len());
        for &width in widths {
            let mouth = width * self.channel_depth;
            let p = OscillatorParameters::from_parts(
                basin_area,
                mouth,
                self.channel_length,
                head_loss,
            )?;
            mouth_cross_sections.push(mouth);
            bay_amplitudes.push(p.bay_amplitude(self.forcing_amplitude, w).value);
        }

        Ok(DesignCurve {
            basin_area,
            forcing_amplitude: self.forcing_amplitude,
            mouth_cross_sections,
            bay_amplitudes,
        })
    }

    /// Curves for several basin areas.
    pub fn curves(&self, basin_areas: &[f64], widths: &[f64]) -> ModelResult<Vec<DesignCurve>> {
        basin_areas
            .iter()
            .map(|&area| self.curve(area, widths))
            .collect()
    }
}
