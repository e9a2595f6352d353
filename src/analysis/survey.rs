//! Relative-amplitude survey across a catalog.
//!
//! Every forcing mode with a measured bay amplitude becomes one point in the
//! scale-free plane:
//!
//! ```text
//! x = ω / ω0                              dimensionless frequency
//! measured   = a_bay / a
//! calculated = dimensionless_amplitude(s a, ω / ω0) / (s a),   s = A fm / (O L)
//! ```
//!
//! A line is then fitted through (measured, calculated), leaving out the
//! named outliers.

use super::LinearRegression;
use crate::config::Catalog;
use crate::error::ModelResult;
use crate::oscillator::{OscillatorParameters, dimensionless_amplitude};

/// Mode excluded from the survey regression.
#[derive(Clone, Debug, PartialEq)]
pub struct SurveyOutlier {
    /// Embayment name
    pub name: String,
    /// Mode period (hours)
    pub period_hours: f64,
}

impl SurveyOutlier {
    /// Periods closer than this are the same mode (hours).
    pub const PERIOD_TOLERANCE: f64 = 0.005;

    /// Create an outlier entry.
    pub fn new(name: impl Into<String>, period_hours: f64) -> Self {
        Self {
            name: name.into(),
            period_hours,
        }
    }

    /// Check if this entry names the given mode.
    pub fn matches(&self, name: &str, period_hours: f64) -> bool {
        self.name.eq_ignore_ascii_case(name)
            && (self.period_hours - period_hours).abs() < Self::PERIOD_TOLERANCE
    }
}

/// Outliers of [`Catalog::survey`]: the 8 and 12 minute Inner Boat Passage
/// modes.
pub fn default_outliers() -> Vec<SurveyOutlier> {
    vec![
        SurveyOutlier::new("Tob-IBP", 8.0 / 60.0),
        SurveyOutlier::new("Tob-IBP", 12.0 / 60.0),
    ]
}

/// One surveyed mode.
#[derive(Clone, Debug, PartialEq)]
pub struct SurveyPoint {
    /// Embayment name
    pub name: String,
    /// Mode period (hours)
    pub period_hours: f64,
    /// ω / ω0
    pub dimensionless_frequency: f64,
    /// Measured bay-to-lake amplitude ratio
    pub measured_ratio: f64,
    /// Calculated bay-to-lake amplitude ratio
    pub calculated_ratio: f64,
    /// Left out of the regression
    pub outlier: bool,
}

impl SurveyPoint {
    /// Label in the form `name(period)`.
    pub fn label(&self) -> String {
        format!("{}({:.2})", self.name, self.period_hours)
    }
}

/// Survey points and the regression of calculated on measured ratios.
#[derive(Clone, Debug)]
pub struct SurveyResult {
    /// All surveyed modes, outliers included
    pub points: Vec<SurveyPoint>,
    /// Fit over the non-outlier points, `None` if fewer than two remain or
    /// the measured ratios are all equal
    pub regression: Option<LinearRegression>,
}

impl SurveyResult {
    /// Points used by the regression.
    pub fn inliers(&self) -> impl Iterator<Item = &SurveyPoint> {
        self.points.iter().filter(|p| !p.outlier)
    }
}

/// Survey every catalog mode that has a measured bay amplitude.
///
/// Entries without measurements are skipped.
///
/// # Errors
/// - `InvalidConfig`/`Domain` if a surveyed entry's geometry is invalid
pub fn relative_amplitude_survey(
    catalog: &Catalog,
    outliers: &[SurveyOutlier],
) -> ModelResult<SurveyResult> {
    let mut points = Vec::new();

    for cfg in catalog.iter() {
        let measured: Vec<_> = cfg
            .forcing_modes
            .iter()
            .filter_map(|m| m.bay_amplitude_meters.map(|bay| (m, bay)))
            .filter(|(m, _)| m.amplitude_meters != 0.0)
            .collect();
        if measured.is_empty() {
            continue;
        }

        let p = OscillatorParameters::from_config(cfg)?;
        let scale = p.dimensionless_scale();

        for (mode, bay) in measured {
            let forcing = scale * mode.amplitude_meters;
            let wp = p.relative_frequency(mode.angular_frequency());
            let outlier = outliers
                .iter()
                .any(|o| o.matches(&cfg.name, mode.period_hours));

            points.push(SurveyPoint {
                name: cfg.name.clone(),
                period_hours: mode.period_hours,
                dimensionless_frequency: wp,
                measured_ratio: bay / mode.amplitude_meters,
                calculated_ratio: dimensionless_amplitude(forcing, wp) / forcing.abs(),
                outlier,
            });
        }
    }

    let (x, y): (Vec<f64>, Vec<f64>) = points
        .iter()
        .filter(|p| !p.outlier)
        .map(|p| (p.measured_ratio, p.calculated_ratio))
        .unzip();
    let regression = LinearRegression::fit(&x, &y).ok();

    tracing::info!(
        n_points = points.len(),
        n_outliers = points.iter().filter(|p| p.outlier).count(),
        r_value = regression.map(|r| r.r_value),
        "relative amplitude survey"
    );

    Ok(SurveyResult { points, regression })
}
