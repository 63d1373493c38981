//! Furluna Search - nearby veterinary hospital discovery

#![deny(missing_docs)]
#![deny(clippy::missing_errors_doc)]
#![deny(clippy::missing_panics_doc)]
#![warn(clippy::too_many_lines)]
//!
//! Queries a places-search service for veterinary-care facilities around a
//! coordinate and normalizes the answer into [`PlaceResult`] records.

pub mod errors;
pub mod photo;
pub mod providers;
pub mod service;
pub mod types;

// Re-export main types
pub use errors::PlaceSearchError;
pub use photo::PhotoUrlBuilder;
pub use providers::{DemoPlacesProvider, GooglePlacesProvider, PlacesProvider};
pub use service::HospitalFinder;
pub use types::PlaceResult;

/// Convenience type alias for Results with PlaceSearchError.
pub type Result<T> = std::result::Result<T, PlaceSearchError>;
