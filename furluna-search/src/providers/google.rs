//! Google Places nearby-search provider for production use.

use async_trait::async_trait;
use furluna_core::config::{ApiKey, PlacesConfig};
use furluna_core::geo::{Coordinate, SearchRadius};
use serde::Deserialize;

use super::PlacesProvider;
use crate::errors::PlaceSearchError;
use crate::types::PlaceResult;

const NEARBY_SEARCH_PATH: &str = "/maps/api/place/nearbysearch/json";

/// Google Places provider for real hospital discovery.
///
/// Issues one nearby-search request per call. No retries and no caching:
/// every call reflects what the service returns right now.
#[derive(Debug)]
pub struct GooglePlacesProvider {
    client: reqwest::Client,
    base_url: String,
    api_key: Option<ApiKey>,
    page_size: u32,
}

/// Response from the nearby-search endpoint.
#[derive(Debug, Deserialize)]
struct NearbySearchResponse {
    status: String,
    #[serde(default)]
    results: Vec<NearbyPlace>,
    #[serde(default)]
    error_message: Option<String>,
}

/// Single place in a nearby-search response.
#[derive(Debug, Deserialize)]
struct NearbyPlace {
    name: String,
    #[serde(default)]
    photos: Vec<NearbyPhoto>,
}

#[derive(Debug, Deserialize)]
struct NearbyPhoto {
    #[serde(default)]
    photo_reference: Option<String>,
}

impl GooglePlacesProvider {
    /// Create provider from the places configuration.
    ///
    /// # Errors
    /// - `PlaceSearchError::NetworkError` - HTTP client could not be built
    pub fn with_config(config: &PlacesConfig) -> Result<Self, PlaceSearchError> {
        let client = reqwest::Client::builder()
            .timeout(config.request_timeout)
            .build()
            .map_err(|e| PlaceSearchError::NetworkError {
                reason: format!("HTTP client setup failed: {e}"),
            })?;

        Ok(Self {
            client,
            base_url: config.base_url.trim_end_matches('/').to_string(),
            api_key: config.api_key.clone(),
            page_size: config.page_size,
        })
    }

    /// Map raw places to results, keeping the service order.
    fn normalize(places: Vec<NearbyPlace>, page_size: u32) -> Vec<PlaceResult> {
        places
            .into_iter()
            .take(page_size as usize)
            .map(|place| PlaceResult {
                name: place.name,
                photo_reference: place
                    .photos
                    .into_iter()
                    .find_map(|photo| photo.photo_reference.filter(|r| !r.is_empty())),
            })
            .collect()
    }
}

#[async_trait]
impl PlacesProvider for GooglePlacesProvider {
    async fn search_nearby(
        &self,
        coordinate: Coordinate,
        radius: SearchRadius,
        category: &str,
    ) -> Result<Vec<PlaceResult>, PlaceSearchError> {
        let api_key = self
            .api_key
            .as_ref()
            .ok_or(PlaceSearchError::MissingCredential)?;

        let url = format!("{}{NEARBY_SEARCH_PATH}", self.base_url);
        let location = coordinate.to_query_value();
        let radius_param = radius.meters().to_string();
        let limit = self.page_size.to_string();

        let params = [
            ("key", api_key.expose()),
            ("location", location.as_str()),
            ("radius", radius_param.as_str()),
            ("type", category),
            ("limit", limit.as_str()),
        ];

        tracing::debug!(%coordinate, %radius, category, "querying nearby search");

        let response = self
            .client
            .get(&url)
            .query(&params)
            .send()
            .await
            .map_err(|e| PlaceSearchError::NetworkError {
                // without_url keeps the key out of the message
                reason: format!("nearby search request failed: {}", e.without_url()),
            })?;

        let status = response.status();
        if !status.is_success() {
            return Err(PlaceSearchError::SearchFailed {
                status: status.as_u16(),
                reason: status
                    .canonical_reason()
                    .unwrap_or("unknown status")
                    .to_string(),
            });
        }

        let body: NearbySearchResponse =
            response
                .json()
                .await
                .map_err(|e| PlaceSearchError::ParseError {
                    reason: format!("nearby search JSON parsing failed: {}", e.without_url()),
                })?;

        match body.status.as_str() {
            "OK" | "ZERO_RESULTS" => {}
            other => {
                return Err(PlaceSearchError::ProviderError {
                    status: other.to_string(),
                    reason: body
                        .error_message
                        .unwrap_or_else(|| "no error message".to_string()),
                });
            }
        }

        let places = Self::normalize(body.results, self.page_size);
        tracing::debug!(count = places.len(), "nearby search returned places");
        Ok(places)
    }
}

#[cfg(test)]
mod tests {
    use std::time::Duration;

    use httpmock::prelude::*;
    use serde_json::json;

    use super::*;

    fn provider_for(server: &MockServer, api_key: Option<&str>) -> GooglePlacesProvider {
        let config = PlacesConfig {
            api_key: api_key.map(ApiKey::new),
            base_url: server.base_url(),
            request_timeout: Duration::from_secs(2),
            ..Default::default()
        };
        GooglePlacesProvider::with_config(&config).unwrap()
    }

    fn san_francisco() -> Coordinate {
        Coordinate::new(37.7749, -122.4194).unwrap()
    }

    #[tokio::test]
    async fn test_search_sends_expected_query() {
        let server = MockServer::start_async().await;
        let mock = server
            .mock_async(|when, then| {
                when.method(GET)
                    .path("/maps/api/place/nearbysearch/json")
                    .query_param("key", "test-key")
                    .query_param("location", "37.7749,-122.4194")
                    .query_param("radius", "482803")
                    .query_param("type", "veterinary_care")
                    .query_param("limit", "10");
                then.status(200).json_body(json!({
                    "status": "OK",
                    "results": [
                        {"name": "Happy Paws Vet", "photos": [{"photo_reference": "abc123"}, {"photo_reference": "second"}]},
                        {"name": "City Animal Hospital"}
                    ]
                }));
            })
            .await;

        let provider = provider_for(&server, Some("test-key"));
        let places = provider
            .search_nearby(san_francisco(), SearchRadius::default(), "veterinary_care")
            .await
            .unwrap();

        mock.assert_async().await;
        assert_eq!(
            places,
            vec![
                PlaceResult::with_photo("Happy Paws Vet", "abc123"),
                PlaceResult::without_photo("City Animal Hospital"),
            ]
        );
    }

    #[tokio::test]
    async fn test_zero_results_is_empty_success() {
        let server = MockServer::start_async().await;
        server
            .mock_async(|when, then| {
                when.method(GET).path("/maps/api/place/nearbysearch/json");
                then.status(200)
                    .json_body(json!({"status": "ZERO_RESULTS", "results": []}));
            })
            .await;

        let places = provider_for(&server, Some("k"))
            .search_nearby(san_francisco(), SearchRadius::default(), "veterinary_care")
            .await
            .unwrap();
        assert!(places.is_empty());
    }

    #[tokio::test]
    async fn test_results_are_capped_at_page_size() {
        let server = MockServer::start_async().await;
        let results: Vec<_> = (0..15)
            .map(|i| json!({"name": format!("Vet {i}")}))
            .collect();
        server
            .mock_async(|when, then| {
                when.method(GET).path("/maps/api/place/nearbysearch/json");
                then.status(200)
                    .json_body(json!({"status": "OK", "results": results}));
            })
            .await;

        let places = provider_for(&server, Some("k"))
            .search_nearby(san_francisco(), SearchRadius::default(), "veterinary_care")
            .await
            .unwrap();
        assert_eq!(places.len(), 10);
        assert_eq!(places[0].name, "Vet 0");
        assert_eq!(places[9].name, "Vet 9");
    }

    #[tokio::test]
    async fn test_denied_request_is_provider_error() {
        let server = MockServer::start_async().await;
        server
            .mock_async(|when, then| {
                when.method(GET).path("/maps/api/place/nearbysearch/json");
                then.status(200).json_body(json!({
                    "status": "REQUEST_DENIED",
                    "error_message": "The provided API key is invalid.",
                    "results": []
                }));
            })
            .await;

        let result = provider_for(&server, Some("bad"))
            .search_nearby(san_francisco(), SearchRadius::default(), "veterinary_care")
            .await;

        match result {
            Err(PlaceSearchError::ProviderError { status, reason }) => {
                assert_eq!(status, "REQUEST_DENIED");
                assert_eq!(reason, "The provided API key is invalid.");
            }
            other => panic!("Expected provider error, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn test_http_error_status() {
        let server = MockServer::start_async().await;
        server
            .mock_async(|when, then| {
                when.method(GET).path("/maps/api/place/nearbysearch/json");
                then.status(503);
            })
            .await;

        let result = provider_for(&server, Some("k"))
            .search_nearby(san_francisco(), SearchRadius::default(), "veterinary_care")
            .await;
        assert!(matches!(
            result,
            Err(PlaceSearchError::SearchFailed { status: 503, .. })
        ));
    }

    #[tokio::test]
    async fn test_malformed_payload_is_parse_error() {
        let server = MockServer::start_async().await;
        server
            .mock_async(|when, then| {
                when.method(GET).path("/maps/api/place/nearbysearch/json");
                then.status(200).body("<html>not json</html>");
            })
            .await;

        let result = provider_for(&server, Some("k"))
            .search_nearby(san_francisco(), SearchRadius::default(), "veterinary_care")
            .await;
        assert!(matches!(result, Err(PlaceSearchError::ParseError { .. })));
    }

    #[tokio::test]
    async fn test_missing_key_skips_network() {
        let server = MockServer::start_async().await;
        let mock = server
            .mock_async(|when, then| {
                when.method(GET);
                then.status(200);
            })
            .await;

        let result = provider_for(&server, None)
            .search_nearby(san_francisco(), SearchRadius::default(), "veterinary_care")
            .await;

        assert!(matches!(result, Err(PlaceSearchError::MissingCredential)));
        mock.assert_hits_async(0).await;
    }

    #[tokio::test]
    async fn test_photo_without_reference_is_skipped() {
        let server = MockServer::start_async().await;
        server
            .mock_async(|when, then| {
                when.method(GET).path("/maps/api/place/nearbysearch/json");
                then.status(200).json_body(json!({
                    "status": "OK",
                    "results": [
                        {"name": "Happy Paws Vet", "photos": [{"height": 400}, {"photo_reference": "abc123"}]},
                        {"name": "City Animal Hospital", "photos": [{"width": 300}]}
                    ]
                }));
            })
            .await;

        let places = provider_for(&server, Some("k"))
            .search_nearby(san_francisco(), SearchRadius::default(), "veterinary_care")
            .await
            .unwrap();
        assert_eq!(
            places,
            vec![
                PlaceResult::with_photo("Happy Paws Vet", "abc123"),
                PlaceResult::without_photo("City Animal Hospital"),
            ]
        );
    }

    #[tokio::test]
    async fn test_slow_service_times_out() {
        let server = MockServer::start_async().await;
        server
            .mock_async(|when, then| {
                when.method(GET).path("/maps/api/place/nearbysearch/json");
                then.status(200)
                    .delay(Duration::from_secs(3))
                    .json_body(json!({"status": "OK", "results": []}));
            })
            .await;

        let config = PlacesConfig {
            api_key: Some(ApiKey::new("k")),
            base_url: server.base_url(),
            request_timeout: Duration::from_millis(200),
            ..Default::default()
        };
        let provider = GooglePlacesProvider::with_config(&config).unwrap();

        let started = std::time::Instant::now();
        let result = provider
            .search_nearby(san_francisco(), SearchRadius::default(), "veterinary_care")
            .await;

        assert!(matches!(result, Err(PlaceSearchError::NetworkError { .. })));
        assert!(started.elapsed() < Duration::from_secs(2));
    }

    #[tokio::test]
    async fn test_unreachable_service_is_network_error() {
        let config = PlacesConfig {
            api_key: Some(ApiKey::new("k")),
            // Port 9 (discard) is not expected to accept connections
            base_url: "http://127.0.0.1:9".to_string(),
            request_timeout: Duration::from_secs(2),
            ..Default::default()
        };
        let provider = GooglePlacesProvider::with_config(&config).unwrap();

        let error = provider
            .search_nearby(san_francisco(), SearchRadius::default(), "veterinary_care")
            .await
            .unwrap_err();
        assert!(error.is_transport());
        assert!(!error.to_string().contains("key=k"));
    }
}
