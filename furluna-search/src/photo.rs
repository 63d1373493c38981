//! Photo URL construction.
//!
//! Photo URLs are embedded as image sources in the listing page; the browser
//! fetches them, this crate never does.

use furluna_core::config::{ApiKey, PlacesConfig};
use url::Url;

use crate::errors::PlaceSearchError;

const PHOTO_PATH: &str = "/maps/api/place/photo";

/// Builds place photo URLs from photo references.
#[derive(Debug, Clone)]
pub struct PhotoUrlBuilder {
    endpoint: Url,
    max_width: u32,
    api_key: Option<ApiKey>,
}

impl PhotoUrlBuilder {
    /// Creates a builder for the service at `base_url`.
    ///
    /// # Errors
    /// - `PlaceSearchError::InvalidEndpoint` - `base_url` is not a valid URL
    pub fn new(
        base_url: &str,
        max_width: u32,
        api_key: Option<ApiKey>,
    ) -> Result<Self, PlaceSearchError> {
        let raw = format!("{}{PHOTO_PATH}", base_url.trim_end_matches('/'));
        let endpoint = Url::parse(&raw).map_err(|e| PlaceSearchError::InvalidEndpoint {
            url: raw.clone(),
            reason: e.to_string(),
        })?;

        Ok(Self {
            endpoint,
            max_width,
            api_key,
        })
    }

    /// Creates a builder from the places configuration.
    ///
    /// # Errors
    /// - `PlaceSearchError::InvalidEndpoint` - Configured base URL is not a valid URL
    pub fn from_config(config: &PlacesConfig) -> Result<Self, PlaceSearchError> {
        Self::new(
            &config.base_url,
            config.photo_max_width,
            config.api_key.clone(),
        )
    }

    /// URL of the photo identified by `photo_reference`.
    pub fn url_for(&self, photo_reference: &str) -> String {
        let mut url = self.endpoint.clone();
        {
            let mut query = url.query_pairs_mut();
            query.append_pair("maxwidth", &self.max_width.to_string());
            query.append_pair("photo_reference", photo_reference);
            if let Some(key) = &self.api_key {
                query.append_pair("key", key.expose());
            }
        }
        url.into()
    }

    /// Image source for an optional photo reference; empty when absent.
    pub fn src_for(&self, photo_reference: Option<&str>) -> String {
        match photo_reference {
            Some(reference) if !reference.is_empty() => self.url_for(reference),
            _ => String::new(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn builder() -> PhotoUrlBuilder {
        PhotoUrlBuilder::new(
            "https://maps.googleapis.com",
            400,
            Some(ApiKey::new("test-key")),
        )
        .unwrap()
    }

    #[test]
    fn test_photo_url_layout() {
        assert_eq!(
            builder().url_for("abc123"),
            "https://maps.googleapis.com/maps/api/place/photo?maxwidth=400&photo_reference=abc123&key=test-key"
        );
    }

    #[test]
    fn test_photo_reference_is_encoded() {
        let url = builder().url_for("a b&c=d");
        assert!(url.contains("photo_reference=a+b%26c%3Dd"));
        assert!(Url::parse(&url).is_ok());
    }

    #[test]
    fn test_missing_reference_yields_empty_src() {
        assert_eq!(builder().src_for(None), "");
        assert_eq!(builder().src_for(Some("")), "");
        assert!(builder().src_for(Some("abc123")).contains("abc123"));
    }

    #[test]
    fn test_trailing_slash_in_base_url() {
        let builder = PhotoUrlBuilder::new("http://localhost:8080/", 200, None).unwrap();
        assert_eq!(
            builder.url_for("ref"),
            "http://localhost:8080/maps/api/place/photo?maxwidth=200&photo_reference=ref"
        );
    }

    #[test]
    fn test_invalid_base_url() {
        let result = PhotoUrlBuilder::new("not a url", 400, None);
        assert!(matches!(
            result,
            Err(PlaceSearchError::InvalidEndpoint { .. })
        ));
    }
}
