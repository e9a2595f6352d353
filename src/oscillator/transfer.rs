//! Closed-form transfer function of the nonlinearly damped basin oscillator.
//!
//! The basin level `z` obeys
//!
//! ```text
//! z'' + n0 ω |z| z' + ω0² z = ω0² ze(t),     ze(t) = a cos(ω t)
//! ```
//!
//! where the quadratic channel friction has been linearized with the
//! coefficient `n0`. The steady-state amplitude is (r = ω / ω0)
//!
//! ```text
//! |z| = |a| √( (√((1 - r²)⁴ + 4 n0² r⁴ a²) - (1 - r²)²) / (2 n0² r⁴ a²) )
//! ```
//!
//! Rationalizing the numerator gives the equivalent, cancellation-free
//!
//! ```text
//! |z| = |a| √( 2 / (√(x² + ε) + x) ),   x = (1 - r²)²,  ε = 4 n0² r⁴ a²
//! ```
//!
//! which is what is evaluated. When `ε` is negligible against `x²` the
//! expression degenerates to the undamped limit `|a| / |1 - r²|`, which is
//! returned explicitly and reported as [`Safeguard::LinearLimit`].
//!
//! Forcing amplitudes are always treated as non-negative magnitudes: a
//! negative amplitude is taken by absolute value, never rejected.

use std::f64::consts::{FRAC_PI_2, PI};

use super::{DIMENSIONLESS_DAMPING, Evaluation, Safeguard};

/// Relative size of the damping term below which the linear limit is used.
pub const SINGULAR_TOLERANCE: f64 = 1e-12;

/// Overshoot of the `arccos` argument tolerated as floating-point drift.
pub const PHASE_CLAMP_TOLERANCE: f64 = 1e-9;

/// Amplification `|z| / |a|` for frequency ratio `r`.
fn gain(forcing_amplitude: f64, ratio: f64, damping_factor: f64) -> Evaluation {
    let a = forcing_amplitude.abs();
    let r2 = ratio * ratio;
    let detuning = (1.0 - r2) * (1.0 - r2);
    let damping_term = 4.0 * damping_factor * damping_factor * r2 * r2 * a * a;

    if damping_term <= SINGULAR_TOLERANCE * detuning * detuning {
        return Evaluation::guarded(1.0 / (1.0 - r2).abs(), Safeguard::LinearLimit);
    }

    let denom = (detuning * detuning + damping_term).sqrt() + detuning;
    Evaluation::exact((2.0 / denom).sqrt())
}

/// Bay amplitude with the safeguard that produced it.
///
/// See [`bay_amplitude`].
pub fn bay_amplitude_at(
    forcing_amplitude: f64,
    angular_frequency: f64,
    eigen_frequency: f64,
    damping_factor: f64,
) -> Evaluation {
    debug_assert!(
        eigen_frequency > 0.0,
        "Eigenfrequency must be positive, got {}",
        eigen_frequency
    );

    let a = forcing_amplitude.abs();
    let g = gain(a, angular_frequency / eigen_frequency, damping_factor);
    // 0 * ∞ at undamped resonance with no forcing
    let value = if a == 0.0 { 0.0 } else { a * g.value };

    Evaluation {
        value,
        safeguard: g.safeguard,
    }
}

/// Steady-state bay amplitude (m).
///
/// # Arguments
/// * `forcing_amplitude` - Lake amplitude `a` (m), used as `|a|`
/// * `angular_frequency` - Forcing angular frequency ω (rad/s)
/// * `eigen_frequency` - Basin eigenfrequency ω0 (rad/s), must be positive
/// * `damping_factor` - Linearized damping coefficient n0 (1/m)
///
/// Undamped exact resonance (`ω = ω0`, `n0 a = 0`) is unbounded and returns
/// `f64::INFINITY` (or 0 when `a = 0`).
pub fn bay_amplitude(
    forcing_amplitude: f64,
    angular_frequency: f64,
    eigen_frequency: f64,
    damping_factor: f64,
) -> f64 {
    bay_amplitude_at(
        forcing_amplitude,
        angular_frequency,
        eigen_frequency,
        damping_factor,
    )
    .value
}

/// Peak of the resonance curve with the safeguard that produced it.
pub fn max_amplification_at(forcing_amplitude: f64, damping_factor: f64) -> Evaluation {
    let a = forcing_amplitude.abs();
    if a == 0.0 {
        return Evaluation::exact(0.0);
    }

    let na = damping_factor.abs() * a;
    if na == 0.0 {
        return Evaluation::guarded(f64::INFINITY, Safeguard::LinearLimit);
    }

    Evaluation::exact(a * (0.5 + 0.5 * (1.0 + 4.0 / (na * na)).sqrt()).sqrt())
}

/// Maximum bay amplitude over all forcing frequencies (m).
///
/// ```text
/// |z|max = |a| √(0.5 + 0.5 √(1 + 4 / (n0² a²)))
/// ```
///
/// The peak lies slightly below ω0; for weak damping it tends to
/// `√(|a| / n0)`, the amplitude at exact resonance.
pub fn max_amplification(forcing_amplitude: f64, damping_factor: f64) -> f64 {
    max_amplification_at(forcing_amplitude, damping_factor).value
}

/// Scale-free bay amplitude.
///
/// Same transfer function with `ω0 = 1` and the universal damping
/// `n0 = 8 / (3π)`; both arguments are already dimensionless
/// (see [`super::OscillatorParameters::dimensionless_scale`]).
pub fn dimensionless_amplitude(dimensionless_forcing: f64, dimensionless_frequency: f64) -> f64 {
    bay_amplitude(
        dimensionless_forcing,
        dimensionless_frequency,
        1.0,
        DIMENSIONLESS_DAMPING,
    )
}

/// Phase lag of the bay behind the lake at one frequency.
///
/// `φ = arccos((1 - r²) |z| / |a|)`, with the argument clamped to `[-1, 1]`.
/// Undamped exact resonance returns π/2.
pub fn phase_lag_at(
    damping_factor: f64,
    eigen_frequency: f64,
    forcing_amplitude: f64,
    angular_frequency: f64,
) -> Evaluation {
    let ratio = angular_frequency / eigen_frequency;
    let g = gain(forcing_amplitude, ratio, damping_factor);

    if !g.value.is_finite() {
        return Evaluation {
            value: FRAC_PI_2,
            safeguard: g.safeguard,
        };
    }

    let argument = (1.0 - ratio * ratio) * g.value;
    if argument.abs() > 1.0 {
        return clamp_phase_argument(argument, g.safeguard);
    }

    Evaluation {
        value: argument.acos(),
        safeguard: g.safeguard,
    }
}

/// `arccos` of an argument that left `[-1, 1]`.
///
/// A linear-limit gain behind the argument stays visible in the returned
/// [`Safeguard::PhaseClamped`].
fn clamp_phase_argument(argument: f64, gain_safeguard: Option<Safeguard>) -> Evaluation {
    if argument.abs() > 1.0 + PHASE_CLAMP_TOLERANCE {
        tracing::warn!(argument, "phase argument beyond floating-point drift, clamping");
    }
    Evaluation::guarded(
        argument.clamp(-1.0, 1.0).acos(),
        Safeguard::PhaseClamped {
            argument,
            linear_limit: gain_safeguard == Some(Safeguard::LinearLimit),
        },
    )
}

/// Phase lag (rad, in `[0, π]`) for each angular frequency.
pub fn phase_lag(
    damping_factor: f64,
    eigen_frequency: f64,
    forcing_amplitude: f64,
    angular_frequencies: &[f64],
) -> Vec<f64> {
    angular_frequencies
        .iter()
        .map(|&w| phase_lag_at(damping_factor, eigen_frequency, forcing_amplitude, w).value)
        .collect()
}

/// Time by which the bay lags the lake, `φ / ω` (s).
pub fn supplementary_period(phase: f64, angular_frequency: f64) -> f64 {
    debug_assert!(angular_frequency != 0.0);
    phase / angular_frequency
}

/// Phase lag expressed as a fraction of the forcing cycle.
pub fn phase_fraction(phase: f64) -> f64 {
    phase / (2.0 * PI)
}
