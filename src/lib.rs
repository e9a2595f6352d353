//! # embay-rs
//!
//! Hydrodynamic response of tidal embayments to periodic lake forcing.
//!
//! An embayment (a basin joined to a lake by a narrow channel) is modeled as
//! a Helmholtz resonator with quadratic channel friction. This crate provides:
//! - Embayment geometry, forcing spectra and a catalog of named embayments
//! - The closed-form nonlinear transfer function (amplitude, phase lag,
//!   maximum amplification) with explicit numerical safeguards
//! - Multi-mode time-domain synthesis of the bay response
//! - Channel flow and flushed-volume estimates from level series
//! - Harmonic fitting, comparison metrics and the relative-amplitude survey
//!
//! # Example
//!
//! ```
//! use embay::{EmbaymentId, FlushingEstimator, synthesize_response};
//!
//! let cfg = EmbaymentId::FrenchmansBay.config();
//! let response = synthesize_response(&cfg, 1.0, 12).unwrap();
//!
//! let series = &response.series;
//! let flushing = FlushingEstimator::for_embayment(&cfg)
//!     .estimate(series.total_response(), series.sample_interval())
//!     .unwrap();
//! assert!(flushing.flushed_volume > 0.0);
//! ```

pub mod analysis;
pub mod config;
pub mod error;
pub mod flow;
pub mod io;
pub mod oscillator;
pub mod response;

pub use analysis::{
    ComparisonMetrics, HarmonicAnalysis, HarmonicResult, LinearRegression, TimeSeries,
    relative_amplitude_survey,
};
pub use config::{Catalog, ConfigError, EmbaymentConfig, EmbaymentId, ForcingMode};
pub use error::{ModelError, ModelResult};
pub use flow::{
    FlowResult, FlushingConfig, FlushingEstimator, compare_flushing, compute_flow,
    estimate_flushed_volume,
};
pub use io::{InMemoryLevelSource, LevelSeriesSource, SourceError, TimeUnit};
pub use oscillator::{
    Evaluation, OscillatorParameters, Safeguard, bay_amplitude, dimensionless_amplitude,
    forced_oscillator_magnitude, max_amplification, phase_lag,
};
pub use response::{
    ModeResponse, ResponseSeries, ResponseSettings, ResponseSynthesizer, SynthesizedResponse,
    synthesize_response,
};
