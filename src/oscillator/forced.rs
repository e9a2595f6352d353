//! Steady-state response of a linear mass-damper-spring system.
//!
//! ```text
//! m x'' + c x' + k x = Fa cos(ω t)
//! |X(ω)| = Fa / √((k - m ω²)² + (c ω)²)
//! ```
//!
//! Used for the hypothetical variable-friction studies, where the basin is
//! replaced by its equivalent linear oscillator (`m = 1`, `k = ω0²`,
//! `c = n0 ω |z|`).

use super::Safeguard;
use crate::error::{ModelError, ModelResult};

/// Fraction of critical damping substituted for zero damping.
pub const ZERO_DAMPING_FRACTION: f64 = 1e-6;

/// Relative perturbation applied to exactly critical damping.
pub const CRITICAL_DAMPING_PERTURBATION: f64 = 1e-6;

/// Magnitudes of the forced response over a frequency sweep.
#[derive(Clone, Debug)]
pub struct ForcedResponse {
    /// |X(ω)| for each requested frequency
    pub magnitudes: Vec<f64>,
    /// Damping actually used (after any substitution)
    pub damping: f64,
    /// Critical damping 2√(m k)
    pub critical_damping: f64,
    /// Safeguard applied to the damping, if any
    pub safeguard: Option<Safeguard>,
}

impl ForcedResponse {
    /// Undamped natural frequency √(k / m) of the system.
    pub fn natural_frequency(&self, mass: f64) -> f64 {
        let k = self.critical_damping * self.critical_damping / (4.0 * mass);
        (k / mass).sqrt()
    }

    /// Damping ratio c / c_crit.
    pub fn damping_ratio(&self) -> f64 {
        self.damping / self.critical_damping
    }
}

/// Forced-response magnitude for each angular frequency.
///
/// Zero damping is replaced by `c_crit / 1e6` so resonance stays bounded;
/// exactly critical damping is perturbed by a relative `1e-6`. Both
/// substitutions are reported in [`ForcedResponse::safeguard`].
///
/// # Errors
/// - `Domain` if `mass <= 0`, `stiffness < 0`, `damping < 0` or any input is
///   not finite
pub fn forced_oscillator_magnitude(
    mass: f64,
    damping: f64,
    stiffness: f64,
    forcing_magnitude: f64,
    angular_frequencies: &[f64],
) -> ModelResult<ForcedResponse> {
    if !(mass.is_finite() && mass > 0.0) {
        return Err(ModelError::domain(format!(
            "mass must be positive, got {mass}"
        )));
    }
    if !(stiffness.is_finite() && stiffness >= 0.0) {
        return Err(ModelError::domain(format!(
            "stiffness must be non-negative, got {stiffness}"
        )));
    }
    if !(damping.is_finite() && damping >= 0.0) {
        return Err(ModelError::domain(format!(
            "damping must be non-negative, got {damping}"
        )));
    }
    if !forcing_magnitude.is_finite() {
        return Err(ModelError::domain("forcing magnitude must be finite"));
    }

    let critical_damping = 2.0 * (mass * stiffness).sqrt();

    let (c, safeguard) = if damping == 0.0 {
        let c = critical_damping * ZERO_DAMPING_FRACTION;
        (c, Some(Safeguard::ZeroDamping { substituted: c }.record()))
    } else if damping == critical_damping {
        let c = damping * (1.0 + CRITICAL_DAMPING_PERTURBATION);
        (c, Some(Safeguard::CriticalDamping { substituted: c }.record()))
    } else {
        (damping, None)
    };

    let magnitudes = angular_frequencies
        .iter()
        .map(|&w| {
            let elastic = stiffness - mass * w * w;
            let viscous = c * w;
            forcing_magnitude / (elastic * elastic + viscous * viscous).sqrt()
        })
        .collect();

    Ok(ForcedResponse {
        magnitudes,
        damping: c,
        critical_damping,
        safeguard,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_static_response() {
        // ω → 0: |X| = Fa / k
        let r = forced_oscillator_magnitude(1.0, 0.3, 4.0, 2.0, &[0.0]).unwrap();
        assert!((r.magnitudes[0] - 0.5).abs() < 1e-12);
        assert!(r.safeguard.is_none());
    }

    #[test]
    fn test_resonance_response() {
        // At ω = √(k/m): |X| = Fa / (c ω)
        let r = forced_oscillator_magnitude(1.0, 0.5, 4.0, 1.0, &[2.0]).unwrap();
        assert!((r.magnitudes[0] - 1.0).abs() < 1e-12);
    }

    #[test]
    fn test_zero_damping_safeguard() {
        let r = forced_oscillator_magnitude(1.0, 0.0, 4.0, 1.0, &[2.0]).unwrap();
        let c_crit = 4.0;
        match r.safeguard {
            Some(Safeguard::ZeroDamping { substituted }) => {
                assert!((substituted - c_crit / 1e6).abs() < 1e-18);
            }
            other => panic!("expected zero-damping safeguard, got {:?}", other),
        }
        assert!(r.magnitudes[0].is_finite());
        assert!((r.magnitudes[0] - 1.0 / (c_crit / 1e6 * 2.0)).abs() < 1e-6);
    }

    #[test]
    fn test_critical_damping_safeguard() {
        let r = forced_oscillator_magnitude(1.0, 4.0, 4.0, 1.0, &[1.0]).unwrap();
        assert!(matches!(
            r.safeguard,
            Some(Safeguard::CriticalDamping { .. })
        ));
        assert!((r.damping - 4.0 * (1.0 + 1e-6)).abs() < 1e-15);
        assert!(r.damping_ratio() > 1.0);
    }

    #[test]
    fn test_natural_frequency() {
        let r = forced_oscillator_magnitude(2.0, 0.1, 8.0, 1.0, &[]).unwrap();
        assert!((r.natural_frequency(2.0) - 2.0).abs() < 1e-12);
        assert!(r.magnitudes.is_empty());
    }

    #[test]
    fn test_invalid_inputs() {
        assert!(forced_oscillator_magnitude(0.0, 0.1, 1.0, 1.0, &[1.0]).is_err());
        assert!(forced_oscillator_magnitude(1.0, -0.1, 1.0, 1.0, &[1.0]).is_err());
        assert!(forced_oscillator_magnitude(1.0, 0.1, -1.0, 1.0, &[1.0]).is_err());
        assert!(forced_oscillator_magnitude(1.0, 0.1, 1.0, f64::NAN, &[1.0]).is_err());
    }
}
