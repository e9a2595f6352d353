//! Measured water-level input.
//!
//! The model consumes measured series through the [`LevelSeriesSource`]
//! trait. Parsing instrument files is left to implementors; this module
//! provides the trait, timestamp units and an in-memory source.
//!
//! # Example
//!
//! ```
//! use embay::io::{InMemoryLevelSource, LevelSeriesSource, TimeUnit};
//!
//! let source = InMemoryLevelSource::new()
//!     .with_series("FMB-gauge", &[0.0, 5.0, 10.0], &[0.02, 0.01, -0.01], TimeUnit::Hours)
//!     .unwrap();
//! let series = source.read("FMB-gauge").unwrap();
//! assert_eq!(series.times()[1], 18_000.0);
//! ```

mod level_source;

pub use level_source::{
    InMemoryLevelSource, LevelSeriesSource, SourceError, TimeUnit, validate_series,
};
