//! Data types for places search.

use serde::{Deserialize, Serialize};

/// One facility returned by a nearby search.
///
/// Lists of results keep the order the service returned them in.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlaceResult {
    /// Display name of the facility
    pub name: String,
    /// Opaque token for the facility's first photo, if it has one
    pub photo_reference: Option<String>,
}

impl PlaceResult {
    /// Creates a result with a photo reference.
    pub fn with_photo(name: impl Into<String>, photo_reference: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            photo_reference: Some(photo_reference.into()),
        }
    }

    /// Creates a result without a photo.
    pub fn without_photo(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            photo_reference: None,
        }
    }

    /// Whether a photo reference is available.
    pub fn has_photo(&self) -> bool {
        self.photo_reference.is_some()
    }
}
