//! Error type shared by the oscillator, response and flow computations.
//!
//! All failures are raised synchronously at the point of detection. The
//! computations are deterministic, so there is nothing to retry and no
//! partial result is ever returned alongside an error.

use thiserror::Error;

/// Error type for model evaluation.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ModelError {
    /// Malformed or incomplete embayment configuration
    #[error("Invalid configuration for '{name}': {message}")]
    InvalidConfig { name: String, message: String },

    /// Input for which a formula is mathematically undefined
    #[error("Domain error: {0}")]
    Domain(String),

    /// Paired series of different lengths
    #[error("Length mismatch: expected {expected} samples, got {actual}")]
    LengthMismatch { expected: usize, actual: usize },

    /// Too few samples for the requested fit or estimate
    #[error("Need at least {required} samples, got {actual}")]
    InsufficientData { required: usize, actual: usize },
}

impl ModelError {
    pub(crate) fn invalid_config(name: &str, message: impl Into<String>) -> Self {
        Self::InvalidConfig {
            name: name.to_string(),
            message: message.into(),
        }
    }

    pub(crate) fn domain(message: impl Into<String>) -> Self {
        Self::Domain(message.into())
    }
}

/// Result alias for model evaluation.
pub type ModelResult<T> = Result<T, ModelError>;

/// Require a strictly positive, finite value.
pub(crate) fn ensure_positive(what: &str, value: f64) -> ModelResult<()> {
    if value.is_finite() && value > 0.0 {
        Ok(())
    } else {
        Err(ModelError::domain(format!(
            "{what} must be positive and finite, got {value}"
        )))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ensure_positive() {
        assert!(ensure_positive("area", 1.0).is_ok());
        assert!(ensure_positive("area", 0.0).is_err());
        assert!(ensure_positive("area", -3.0).is_err());
        assert!(ensure_positive("area", f64::NAN).is_err());
        assert!(ensure_positive("area", f64::INFINITY).is_err());
    }

    #[test]
    fn test_error_messages() {
        let err = ModelError::invalid_config("FMB", "no forcing modes");
        assert_eq!(
            err.to_string(),
            "Invalid configuration for 'FMB': no forcing modes"
        );

        let err = ModelError::LengthMismatch {
            expected: 4,
            actual: 3,
        };
        assert_eq!(err.to_string(), "Length mismatch: expected 4 samples, got 3");
    }
}
