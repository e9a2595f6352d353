//! Skill of a predicted level series against a measured one.

use crate::error::{ModelError, ModelResult};

/// Error statistics of `predicted - measured`.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ComparisonMetrics {
    /// √ of the mean squared difference (m)
    pub rmse: f64,
    /// Mean absolute difference (m)
    pub mae: f64,
    /// Mean signed difference (m), positive when the model runs high
    pub bias: f64,
    /// Pearson r in [-1, 1]
    pub correlation: f64,
    /// 1 - MSE / Var(measured); 1 is perfect, below 0 is worse than the mean
    pub skill_score: f64,
    /// Largest absolute difference (m)
    pub max_error: f64,
    /// Number of paired samples
    pub n_points: usize,
}

/// Threshold below which a variance counts as a flat series.
const FLAT_VARIANCE: f64 = 1e-12;

impl ComparisonMetrics {
    /// Score `predicted` against `measured`, sample by sample.
    ///
    /// # Errors
    /// - `LengthMismatch` if the series are not aligned
    /// - `InsufficientData` if both are empty
    pub fn compute(predicted: &[f64], measured: &[f64]) -> ModelResult<Self> {
        if predicted.len() != measured.len() {
            return Err(ModelError::LengthMismatch {
                expected: predicted.len(),
                actual: measured.len(),
            });
        }
        let n = predicted.len();
        if n == 0 {
            return Err(ModelError::InsufficientData {
                required: 1,
                actual: 0,
            });
        }
        let nf = n as f64;

        let mean_p = predicted.iter().sum::<f64>() / nf;
        let mean_m = measured.iter().sum::<f64>() / nf;

        let mut sum_d = 0.0;
        let mut sum_d2 = 0.0;
        let mut sum_abs = 0.0;
        let mut max_error = 0.0_f64;
        let mut var_p = 0.0;
        let mut var_m = 0.0;
        let mut cov = 0.0;
        for (&p, &m) in predicted.iter().zip(measured) {
            let d = p - m;
            sum_d += d;
            sum_d2 += d * d;
            sum_abs += d.abs();
            max_error = max_error.max(d.abs());

            let dp = p - mean_p;
            let dm = m - mean_m;
            var_p += dp * dp;
            var_m += dm * dm;
            cov += dp * dm;
        }
        let mse = sum_d2 / nf;
        var_p /= nf;
        var_m /= nf;
        cov /= nf;

        let flat_p = var_p <= FLAT_VARIANCE;
        let flat_m = var_m <= FLAT_VARIANCE;

        let skill_score = match (flat_m, mse < FLAT_VARIANCE) {
            (false, _) => 1.0 - mse / var_m,
            (true, true) => 1.0,
            (true, false) => f64::NEG_INFINITY,
        };
        let correlation = match (flat_p, flat_m) {
            (false, false) => cov / (var_p * var_m).sqrt(),
            (true, true) => 1.0,
            _ => 0.0,
        };

        Ok(Self {
            rmse: mse.sqrt(),
            mae: sum_abs / nf,
            bias: sum_d / nf,
            correlation,
            skill_score,
            max_error,
            n_points: n,
        })
    }

    /// r above 0.95.
    pub fn is_highly_correlated(&self) -> bool {
        self.correlation > 0.95
    }

    /// Skill above 0.9.
    pub fn is_skillful(&self) -> bool {
        self.skill_score > 0.9
    }
}
