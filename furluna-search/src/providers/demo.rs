//! Demo provider implementation for offline development.

use async_trait::async_trait;
use furluna_core::geo::{Coordinate, SearchRadius};

use super::PlacesProvider;
use crate::errors::PlaceSearchError;
use crate::types::PlaceResult;

/// Demo provider for development.
///
/// Returns a fixed set of veterinary hospitals without any network access,
/// so the listing page can be built with no API key.
#[derive(Debug, Default)]
pub struct DemoPlacesProvider;

impl DemoPlacesProvider {
    /// Creates the demo provider.
    pub fn new() -> Self {
        Self
    }
}

#[async_trait]
impl PlacesProvider for DemoPlacesProvider {
    async fn search_nearby(
        &self,
        coordinate: Coordinate,
        radius: SearchRadius,
        category: &str,
    ) -> Result<Vec<PlaceResult>, PlaceSearchError> {
        tracing::debug!(%coordinate, %radius, category, "serving demo places");

        Ok(vec![
            PlaceResult::with_photo("Mission Pet Hospital", "demo-photo-mission"),
            PlaceResult::with_photo("Sunset Veterinary Clinic", "demo-photo-sunset"),
            PlaceResult::without_photo("Bay Area Animal Emergency"),
        ])
    }
}
