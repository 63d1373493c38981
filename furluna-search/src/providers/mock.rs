//! Mock provider implementation for testing.

use std::sync::atomic::{AtomicUsize, Ordering};

use async_trait::async_trait;
use furluna_core::geo::{Coordinate, SearchRadius};

use super::PlacesProvider;
use crate::errors::PlaceSearchError;
use crate::types::PlaceResult;

/// Mock provider for testing.
///
/// Answers every search with the same places, or with a network failure,
/// and counts how often it was asked.
#[derive(Debug, Default)]
pub struct MockPlacesProvider {
    places: Vec<PlaceResult>,
    fail_with: Option<String>,
    calls: AtomicUsize,
}

impl MockPlacesProvider {
    /// Creates a mock that returns `places` on every search.
    pub fn returning(places: Vec<PlaceResult>) -> Self {
        Self {
            places,
            ..Default::default()
        }
    }

    /// Creates a mock whose searches fail with a network error.
    pub fn failing(reason: impl Into<String>) -> Self {
        Self {
            fail_with: Some(reason.into()),
            ..Default::default()
        }
    }

    /// Number of searches issued so far.
    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl PlacesProvider for MockPlacesProvider {
    async fn search_nearby(
        &self,
        _coordinate: Coordinate,
        _radius: SearchRadius,
        _category: &str,
    ) -> Result<Vec<PlaceResult>, PlaceSearchError> {
        self.calls.fetch_add(1, Ordering::SeqCst);

        match &self.fail_with {
            Some(reason) => Err(PlaceSearchError::NetworkError {
                reason: reason.clone(),
            }),
            None => Ok(self.places.clone()),
        }
    }
}
