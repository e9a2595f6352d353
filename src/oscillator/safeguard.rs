//! Numerical safeguards and evaluations that report them.
//!
//! A safeguard is not an error: it is a deterministic substitution applied at
//! a singular input so that the closed-form expressions stay finite and
//! NaN-free. Every substitution is returned to the caller and emitted as a
//! `tracing` debug event.

use std::fmt;

/// A singular-value substitution applied during an evaluation.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum Safeguard {
    /// Damping term negligible against the detuning: the undamped transfer
    /// `|a| / |1 - r²|` was returned instead of the 0/0 closed form.
    LinearLimit,
    /// Zero damping replaced by `c_crit / 1e6`.
    ZeroDamping { substituted: f64 },
    /// Critical damping perturbed by a relative `1e-6`.
    CriticalDamping { substituted: f64 },
    /// `arccos` argument outside `[-1, 1]`, clamped. `linear_limit` is set
    /// when the gain behind the argument came from [`Safeguard::LinearLimit`].
    PhaseClamped { argument: f64, linear_limit: bool },
}

impl Safeguard {
    /// Short identifier used in log events.
    pub fn kind(&self) -> &'static str {
        match self {
            Safeguard::LinearLimit => "linear_limit",
            Safeguard::ZeroDamping { .. } => "zero_damping",
            Safeguard::CriticalDamping { .. } => "critical_damping",
            Safeguard::PhaseClamped { .. } => "phase_clamped",
        }
    }

    /// Emit the safeguard as a debug event and hand it back.
    pub(crate) fn record(self) -> Self {
        tracing::debug!(safeguard = self.kind(), detail = %self, "numerical safeguard applied");
        self
    }
}

impl fmt::Display for Safeguard {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Safeguard::LinearLimit => write!(f, "undamped linear limit"),
            Safeguard::ZeroDamping { substituted } => {
                write!(f, "zero damping replaced by {substituted:.3e}")
            }
            Safeguard::CriticalDamping { substituted } => {
                write!(f, "critical damping perturbed to {substituted:.6e}")
            }
            Safeguard::PhaseClamped {
                argument,
                linear_limit,
            } => {
                write!(f, "arccos argument {argument:.12} clamped to [-1, 1]")?;
                if *linear_limit {
                    write!(f, " after undamped linear limit")?;
                }
                Ok(())
            }
        }
    }
}

/// A scalar result together with the safeguard (if any) that produced it.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Evaluation {
    /// Computed value
    pub value: f64,
    /// Safeguard applied, `None` on the regular path
    pub safeguard: Option<Safeguard>,
}

impl Evaluation {
    /// Value from the regular closed-form path.
    pub fn exact(value: f64) -> Self {
        Self {
            value,
            safeguard: None,
        }
    }

    /// Value obtained through a safeguard.
    pub fn guarded(value: f64, safeguard: Safeguard) -> Self {
        Self {
            value,
            safeguard: Some(safeguard.record()),
        }
    }

    /// Check if a safeguard fired.
    pub fn is_guarded(&self) -> bool {
        self.safeguard.is_some()
    }
}
