//! Embayment configuration and the named-embayment catalog.
//!
//! - [`EmbaymentConfig`] / [`ForcingMode`]: geometry and forcing spectrum
//! - [`Catalog`] / [`EmbaymentId`]: immutable registry of named embayments
//!
//! # Example
//!
//! ```
//! use embay::config::{Catalog, EmbaymentId};
//!
//! let catalog = Catalog::builtin();
//! let fmb = catalog.preset(EmbaymentId::FrenchmansBay).unwrap();
//! assert_eq!(fmb.forcing_modes.len(), 5);
//! ```

mod catalog;
mod embayment;

pub use catalog::{Catalog, EmbaymentId};
pub use embayment::{EmbaymentConfig, ForcingMode, SECONDS_PER_HOUR};

use thiserror::Error;

use crate::error::ModelError;

/// Error type for catalog assembly.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// I/O error reading a catalog file
    #[error("I/O error: {0}")]
    IoError(#[from] std::io::Error),

    /// TOML syntax or schema error
    #[error("Parse error: {0}")]
    ParseError(#[from] toml::de::Error),

    /// Name not present in the catalog
    #[error("Unknown embayment: {0}")]
    UnknownEmbayment(String),

    /// Name registered twice
    #[error("Duplicate embayment: {0}")]
    Duplicate(String),

    /// Entry failed validation
    #[error(transparent)]
    Invalid(#[from] ModelError),
}
