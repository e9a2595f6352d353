//! Least-squares fitting of forcing modes to a level series.
//!
//! Each requested period contributes a cosine and a sine column next to a
//! constant column for the mean level:
//! ```text
//! level(t) ≈ c₀ + Σₖ [pₖ cos(ωₖt) + qₖ sin(ωₖt)]
//! ```
//! The column weights come from the normal equations `XᵀX c = Xᵀy`. A mode
//! is then reported as `√(pₖ² + qₖ²) cos(ωₖt + atan2(-qₖ, pₖ))`.
//!
//! Forcing modes use the sine convention `a sin(ωt + φ)`, so converting a
//! fit to a [`ForcingMode`] shifts the phase by π/2.

use std::f64::consts::{FRAC_PI_2, PI};

use faer::{Mat, linalg::solvers::Solve};

use super::{TimeSeries, wrap_phase};
use crate::config::{EmbaymentConfig, ForcingMode, SECONDS_PER_HOUR};
use crate::error::{ModelError, ModelResult, ensure_positive};

/// One fitted mode, `amplitude * cos(ωt + phase)`.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ModeFit {
    /// Period in hours
    pub period_hours: f64,
    /// Half the peak-to-trough swing (m)
    pub amplitude: f64,
    /// Cosine phase (rad), wrapped into [0, 2π)
    pub phase: f64,
}

impl ModeFit {
    /// Angular frequency (rad/s).
    pub fn angular_frequency(&self) -> f64 {
        2.0 * PI / (self.period_hours * SECONDS_PER_HOUR)
    }

    /// Evaluate the mode at time t.
    pub fn evaluate(&self, t: f64) -> f64 {
        self.amplitude * (self.angular_frequency() * t + self.phase).cos()
    }

    /// Same oscillation as a sine-convention forcing mode.
    pub fn to_forcing_mode(&self) -> ForcingMode {
        ForcingMode::new(
            self.period_hours,
            self.amplitude,
            wrap_phase(self.phase + FRAC_PI_2),
        )
    }
}

/// Mean level plus the fitted modes of one record.
#[derive(Clone, Debug)]
pub struct HarmonicResult {
    /// Constant term of the fit (m)
    pub mean: f64,
    /// Fitted modes, in the order requested
    pub modes: Vec<ModeFit>,
    /// Variance left after subtracting the fit (m²)
    pub residual_variance: f64,
    /// Share of the level variance the modes explain
    pub r_squared: f64,
}

impl HarmonicResult {
    /// Fitted level at `t` seconds.
    pub fn evaluate(&self, t: f64) -> f64 {
        self.mean + self.modes.iter().map(|m| m.evaluate(t)).sum::<f64>()
    }

    /// Fitted levels at each of `times`.
    pub fn reconstruct(&self, times: &[f64]) -> Vec<f64> {
        times.iter().map(|&t| self.evaluate(t)).collect()
    }

    /// Look up the fit for `period_hours`.
    pub fn get_mode(&self, period_hours: f64) -> Option<&ModeFit> {
        self.modes
            .iter()
            .find(|m| (m.period_hours - period_hours).abs() < 1e-9)
    }

    /// Fitted modes as sine-convention forcing modes.
    pub fn to_forcing_modes(&self) -> Vec<ForcingMode> {
        self.modes.iter().map(ModeFit::to_forcing_mode).collect()
    }
}

/// Harmonic fitting for a fixed set of periods.
#[derive(Clone, Debug)]
pub struct HarmonicAnalysis {
    periods_hours: Vec<f64>,
}

impl HarmonicAnalysis {
    /// Fit the given periods (hours).
    pub fn for_periods_hours(periods_hours: &[f64]) -> Self {
        Self {
            periods_hours: periods_hours.to_vec(),
        }
    }

    /// Fit the forcing periods of an embayment.
    pub fn for_config(config: &EmbaymentConfig) -> Self {
        Self {
            periods_hours: config.periods_hours(),
        }
    }

    /// Periods being fitted (hours).
    pub fn periods_hours(&self) -> &[f64] {
        &self.periods_hours
    }

    /// Number of unknowns: mean plus a cos/sin pair per period.
    pub fn n_unknowns(&self) -> usize {
        1 + 2 * self.periods_hours.len()
    }

    /// Shortest record (s) on which every pair of periods is resolved,
    /// `max 1 / |f₁ - f₂|` over the pairs. 0 for a single period.
    pub fn minimum_record_length(&self) -> f64 {
        let freqs: Vec<f64> = self
            .periods_hours
            .iter()
            .map(|p| 1.0 / (p * SECONDS_PER_HOUR))
            .collect();

        freqs
            .iter()
            .enumerate()
            .flat_map(|(i, f1)| freqs[i + 1..].iter().map(move |f2| (f1 - f2).abs()))
            .filter(|&df| df > 1e-12)
            .map(|df| 1.0 / df)
            .fold(0.0, f64::max)
    }

    /// Least-squares fit of every period to `series`.
    ///
    /// # Errors
    /// - `Domain` if a period is not positive, or the periods cannot be
    ///   separated on this record (singular normal equations)
    /// - `InsufficientData` if the series has fewer points than unknowns
    pub fn fit(&self, series: &TimeSeries) -> ModelResult<HarmonicResult> {
        for &p in &self.periods_hours {
            ensure_positive("fit period", p)?;
        }

        let n_data = series.len();
        let n_unknowns = self.n_unknowns();
        if n_data < n_unknowns {
            return Err(ModelError::InsufficientData {
                required: n_unknowns,
                actual: n_data,
            });
        }

        let omegas: Vec<f64> = self
            .periods_hours
            .iter()
            .map(|p| 2.0 * PI / (p * SECONDS_PER_HOUR))
            .collect();
        let times = series.times();
        let values = series.values();

        // Design matrix rows: [1, cos(ω₁t), sin(ω₁t), cos(ω₂t), ...]
        let design = Mat::<f64>::from_fn(n_data, n_unknowns, |i, j| {
            if j == 0 {
                1.0
            } else {
                let phase = omegas[(j - 1) / 2] * times[i];
                if j % 2 == 1 { phase.cos() } else { phase.sin() }
            }
        });

        let ata = Mat::<f64>::from_fn(n_unknowns, n_unknowns, |i, j| {
            (0..n_data).map(|k| design[(k, i)] * design[(k, j)]).sum()
        });
        let aty = Mat::<f64>::from_fn(n_unknowns, 1, |i, _| {
            (0..n_data).map(|k| design[(k, i)] * values[k]).sum()
        });

        let lu = ata.as_ref().full_piv_lu();
        let x = lu.solve(&aty);

        let coefficients: Vec<f64> = (0..n_unknowns).map(|i| x[(i, 0)]).collect();
        if coefficients.iter().any(|c| !c.is_finite()) {
            return Err(ModelError::domain(
                "normal equations are singular; periods cannot be separated on this record",
            ));
        }

        let mean = coefficients[0];
        let modes: Vec<ModeFit> = self
            .periods_hours
            .iter()
            .zip(coefficients[1..].chunks_exact(2))
            .map(|(&period_hours, ab)| ModeFit {
                period_hours,
                amplitude: ab[0].hypot(ab[1]),
                phase: wrap_phase((-ab[1]).atan2(ab[0])),
            })
            .collect();

        let residual_ss: f64 = (0..n_data)
            .map(|i| {
                let fitted: f64 = (0..n_unknowns)
                    .map(|j| design[(i, j)] * coefficients[j])
                    .sum();
                (values[i] - fitted).powi(2)
            })
            .sum();
        let residual_variance = if n_data > 1 {
            residual_ss / (n_data - 1) as f64
        } else {
            0.0
        };

        let total_variance = series.variance();
        let r_squared = if total_variance > 1e-12 {
            1.0 - residual_variance / total_variance
        } else {
            1.0
        };

        tracing::debug!(
            n_modes = modes.len(),
            n_samples = n_data,
            r_squared,
            "harmonic fit"
        );

        Ok(HarmonicResult {
            mean,
            modes,
            residual_variance,
            r_squared,
        })
    }
}

/// Single-frequency amplitude by Fourier projection.
///
/// The series mean is removed and the projection
/// `(2/N) √((Σ y cos ωt)² + (Σ y sin ωt)²)` is taken with `t` measured from
/// the first sample. Exact for an integer number of cycles, approximate
/// otherwise; [`HarmonicAnalysis::fit`] is the least-squares alternative.
///
/// # Errors
/// - `Domain` if the period is not positive
/// - `InsufficientData` for fewer than two samples
pub fn project_amplitude(series: &TimeSeries, period_hours: f64) -> ModelResult<f64> {
    ensure_positive("projection period", period_hours)?;
    if series.len() < 2 {
        return Err(ModelError::InsufficientData {
            required: 2,
            actual: series.len(),
        });
    }

    let omega = 2.0 * PI / (period_hours * SECONDS_PER_HOUR);
    let mean = series.mean();
    let t0 = series.times()[0];

    let (a, b) = series.samples().fold((0.0, 0.0), |(a, b), (t, level)| {
        let phase = omega * (t - t0);
        let y = level - mean;
        (a + y * phase.cos(), b + y * phase.sin())
    });

    let scale = 2.0 / series.len() as f64;
    Ok(scale * a.hypot(b))
}
