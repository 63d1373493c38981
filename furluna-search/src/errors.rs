//! Error types for places search.

use thiserror::Error;

/// Errors that can occur while querying the places-search service.
#[derive(Debug, Error)]
pub enum PlaceSearchError {
    /// The configured service URL is not a valid URL.
    #[error("Invalid endpoint '{url}': {reason}")]
    InvalidEndpoint {
        /// The URL that failed to parse
        url: String,
        /// The reason it was rejected
        reason: String,
    },

    /// No API credential is configured.
    #[error("Places API key is not configured")]
    MissingCredential,

    /// Network communication failed or timed out.
    #[error("Network error: {reason}")]
    NetworkError {
        /// The reason for the network error
        reason: String,
    },

    /// The service answered with a non-success HTTP status.
    #[error("Search failed with HTTP {status}: {reason}")]
    SearchFailed {
        /// HTTP status code returned
        status: u16,
        /// The reason for the failure
        reason: String,
    },

    /// The response body could not be decoded.
    #[error("Parse error: {reason}")]
    ParseError {
        /// The reason for the parse error
        reason: String,
    },

    /// The service decoded fine but reported an error status.
    #[error("Provider error {status}: {reason}")]
    ProviderError {
        /// Status string reported by the service
        status: String,
        /// Message reported by the service, if any
        reason: String,
    },
}

impl PlaceSearchError {
    /// Whether the failure is on the network path rather than in the answer.
    pub fn is_transport(&self) -> bool {
        matches!(self, PlaceSearchError::NetworkError { .. })
    }
}
