//! Ordinary least-squares line fit.

use crate::error::{ModelError, ModelResult};

/// Fitted line `y = slope * x + intercept`.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct LinearRegression {
    /// Slope
    pub slope: f64,
    /// Intercept
    pub intercept: f64,
    /// Pearson correlation coefficient r
    pub r_value: f64,
    /// Standard error of the slope (0 for two points)
    pub std_err: f64,
    /// Number of points
    pub n_points: usize,
}

impl LinearRegression {
    /// Fit a line through paired samples.
    ///
    /// # Errors
    /// - `LengthMismatch` if `x` and `y` differ in length
    /// - `InsufficientData` for fewer than two points
    /// - `Domain` if all `x` are equal
    pub fn fit(x: &[f64], y: &[f64]) -> ModelResult<Self> {
        if x.len() != y.len() {
            return Err(ModelError::LengthMismatch {
                expected: x.len(),
                actual: y.len(),
            });
        }
        let n = x.len();
        if n < 2 {
            return Err(ModelError::InsufficientData {
                required: 2,
                actual: n,
            });
        }

        let nf = n as f64;
        let x_mean = x.iter().sum::<f64>() / nf;
        let y_mean = y.iter().sum::<f64>() / nf;

        let (sxx, syy, sxy) = x.iter().zip(y).fold((0.0, 0.0, 0.0), |(sxx, syy, sxy), (&xi, &yi)| {
            let dx = xi - x_mean;
            let dy = yi - y_mean;
            (sxx + dx * dx, syy + dy * dy, sxy + dx * dy)
        });

        if sxx <= f64::EPSILON * x_mean.abs().max(1.0) {
            return Err(ModelError::domain("regression needs at least two distinct x values"));
        }

        let slope = sxy / sxx;
        let intercept = y_mean - slope * x_mean;
        let r_value = if syy > 0.0 {
            (sxy / (sxx * syy).sqrt()).clamp(-1.0, 1.0)
        } else {
            // flat y is fitted exactly by a zero slope
            1.0
        };

        let std_err = if n > 2 {
            ((1.0 - r_value * r_value).max(0.0) * syy / sxx / (nf - 2.0)).sqrt()
        } else {
            0.0
        };

        Ok(Self {
            slope,
            intercept,
            r_value,
            std_err,
            n_points: n,
        })
    }

    /// Coefficient of determination r².
    pub fn r_squared(&self) -> f64 {
        self.r_value * self.r_value
    }

    /// Evaluate the fitted line.
    pub fn predict(&self, x: f64) -> f64 {
        self.slope * x + self.intercept
    }
}
