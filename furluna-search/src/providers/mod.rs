//! Provider implementations for nearby places search.

use async_trait::async_trait;
use furluna_core::geo::{Coordinate, SearchRadius};

use crate::errors::PlaceSearchError;
use crate::types::PlaceResult;

pub mod demo;
pub mod google;
#[cfg(any(test, feature = "test-utils"))]
pub mod mock;

pub use demo::DemoPlacesProvider;
pub use google::GooglePlacesProvider;
#[cfg(any(test, feature = "test-utils"))]
pub use mock::MockPlacesProvider;

/// Trait for nearby places search providers.
///
/// Implementations provide search through different backends (the real
/// places API, demo data for offline development, mocks for tests).
#[async_trait]
pub trait PlacesProvider: Send + Sync + std::fmt::Debug {
    /// Search for places of `category` within `radius` of `coordinate`.
    ///
    /// Results keep the provider's order.
    ///
    /// # Errors
    /// - `PlaceSearchError::MissingCredential` - No API key configured
    /// - `PlaceSearchError::NetworkError` - Network connectivity issues or timeout
    /// - `PlaceSearchError::SearchFailed` - Non-success HTTP status
    /// - `PlaceSearchError::ParseError` - Malformed response payload
    /// - `PlaceSearchError::ProviderError` - Service reported an error status
    async fn search_nearby(
        &self,
        coordinate: Coordinate,
        radius: SearchRadius,
        category: &str,
    ) -> Result<Vec<PlaceResult>, PlaceSearchError>;
}
