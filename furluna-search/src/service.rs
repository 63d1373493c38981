//! Hospital finder service
//!
//! Front door for nearby veterinary hospital searches. Picks the provider
//! for the runtime mode and decides how failures reach the caller.

use std::sync::Arc;

use furluna_core::config::FurlunaConfig;
use furluna_core::geo::{Coordinate, SearchRadius};
use furluna_core::mode::RuntimeMode;

use crate::errors::PlaceSearchError;
use crate::providers::{DemoPlacesProvider, GooglePlacesProvider, PlacesProvider};
use crate::types::PlaceResult;

/// Place category every hospital search is filtered to.
pub const VETERINARY_CARE: &str = "veterinary_care";

/// Finds veterinary hospitals near a coordinate.
#[derive(Debug, Clone)]
pub struct HospitalFinder {
    provider: Arc<dyn PlacesProvider>,
    category: String,
}

impl HospitalFinder {
    /// Creates a finder backed by `provider`.
    pub fn new(provider: Arc<dyn PlacesProvider>) -> Self {
        Self {
            provider,
            category: VETERINARY_CARE.to_string(),
        }
    }

    /// Creates a finder for the configured runtime mode.
    ///
    /// Production talks to the places API, development serves demo data.
    ///
    /// # Errors
    /// - `PlaceSearchError::NetworkError` - HTTP client could not be built
    pub fn from_config(config: &FurlunaConfig) -> Result<Self, PlaceSearchError> {
        let provider: Arc<dyn PlacesProvider> = match config.runtime_mode {
            RuntimeMode::Production => {
                Arc::new(GooglePlacesProvider::with_config(&config.places)?)
            }
            RuntimeMode::Development => Arc::new(DemoPlacesProvider::new()),
        };

        Ok(Self {
            provider,
            category: config.places.category.to_string(),
        })
    }

    /// Search for hospitals, surfacing any failure.
    ///
    /// # Errors
    /// - `PlaceSearchError::MissingCredential` - No API key configured
    /// - `PlaceSearchError::NetworkError` - Network connectivity issues or timeout
    /// - `PlaceSearchError::SearchFailed` - Non-success HTTP status
    /// - `PlaceSearchError::ParseError` - Malformed response payload
    /// - `PlaceSearchError::ProviderError` - Service reported an error status
    pub async fn try_find(
        &self,
        coordinate: Coordinate,
        radius: SearchRadius,
    ) -> Result<Vec<PlaceResult>, PlaceSearchError> {
        self.provider
            .search_nearby(coordinate, radius, &self.category)
            .await
    }

    /// Search for hospitals; failures are logged and yield an empty list.
    pub async fn find(&self, coordinate: Coordinate, radius: SearchRadius) -> Vec<PlaceResult> {
        match self.try_find(coordinate, radius).await {
            Ok(places) => places,
            Err(e) => {
                tracing::error!(%coordinate, %radius, error = %e, "Error fetching nearby hospitals");
                Vec::new()
            }
        }
    }
}
