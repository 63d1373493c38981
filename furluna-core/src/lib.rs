//! Furluna Core - configuration, geo types and page patching
//!
//! Shared building blocks for the Furluna pet-care site backend: the
//! environment-driven configuration, coordinate and radius types used by the
//! hospital search, tracing setup, and the region patcher that splices
//! generated markup into static HTML pages.

pub mod config;
pub mod geo;
pub mod mode;
pub mod storage;
pub mod tracing_setup;

// Re-export main types for convenient access
pub use config::{FurlunaConfig, MissingRegionPolicy, SearchFailurePolicy};
pub use geo::{Coordinate, GeoError, SearchRadius};
pub use mode::RuntimeMode;
pub use storage::{PatchError, PatchOutcome, RegionPatcher};

/// Errors raised while assembling Furluna's configuration.
#[derive(Debug, thiserror::Error)]
pub enum FurlunaError {
    #[error("Invalid search location: {0}")]
    Geo(#[from] GeoError),

    #[error("Configuration error: {reason}")]
    Configuration { reason: String },
}

pub type Result<T> = std::result::Result<T, FurlunaError>;
