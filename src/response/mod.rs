//! Bay response to a multi-mode forcing spectrum.
//!
//! - [`ResponseSynthesizer`]: per-mode diagnostics and the superposed
//!   time-domain response
//! - [`sweep`]: frequency sweeps for the hypothetical-response studies

mod synthesizer;
pub mod sweep;

pub use synthesizer::{
    DEFAULT_DURATION_DAYS, DEFAULT_SAMPLES_PER_HOUR, ModeResponse, ResponseSeries,
    ResponseSettings, ResponseSynthesizer, SECONDS_PER_DAY, SynthesizedResponse,
    synthesize_response,
};
pub use sweep::{
    DesignCurve, MouthDesignStudy, ResponseCurve, ScaledQuantity, SweepSettings,
    amplitude_curves, dimensionless_curves, friction_curves, phase_curves, scaled_curves,
};

/// `n` evenly spaced values from `start` to `stop`, both included.
pub fn linspace(start: f64, stop: f64, n: usize) -> Vec<f64> {
    match n {
        0 => Vec::new(),
        1 => vec![start],
        _ => {
            let step = (stop - start) / (n - 1) as f64;
            (0..n)
                .map(|i| if i == n - 1 { stop } else { start + step * i as f64 })
                .collect()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_linspace() {
        assert!(linspace(0.0, 1.0, 0).is_empty());
        assert_eq!(linspace(2.0, 5.0, 1), vec![2.0]);
        let v = linspace(0.0, 1.0, 5);
        assert_eq!(v, vec![0.0, 0.25, 0.5, 0.75, 1.0]);
    }
}
