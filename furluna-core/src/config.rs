//! Centralized configuration for Furluna.
//!
//! All tunable parameters and settings are defined here to avoid
//! hard-coded values scattered throughout the codebase.

use std::fmt;
use std::path::PathBuf;
use std::str::FromStr;
use std::time::Duration;

use crate::geo::{Coordinate, SearchRadius};
use crate::mode::RuntimeMode;
use crate::{FurlunaError, Result};

/// Central configuration for all Furluna components.
///
/// Groups related configuration settings into logical sections.
/// Supports environment variable overrides for runtime customization.
#[derive(Debug, Clone, Default)]
pub struct FurlunaConfig {
    pub server: ServerConfig,
    pub places: PlacesConfig,
    pub listing: ListingConfig,
    pub runtime_mode: RuntimeMode,
}

/// HTTP server configuration.
#[derive(Debug, Clone)]
pub struct ServerConfig {
    /// Address to bind to
    pub host: String,
    /// Listening port
    pub port: u16,
    /// Directory holding the site's pages and assets
    pub public_dir: PathBuf,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "127.0.0.1".to_string(),
            port: 3000,
            public_dir: PathBuf::from("public"),
        }
    }
}

/// Places-search API credential.
///
/// Never printed: `Debug` and `Display` both redact the value.
#[derive(Clone, PartialEq, Eq)]
pub struct ApiKey(String);

impl ApiKey {
    pub fn new(key: impl Into<String>) -> Self {
        Self(key.into())
    }

    /// Raw key for building outbound requests.
    pub fn expose(&self) -> &str {
        &self.0
    }
}

impl fmt::Debug for ApiKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "ApiKey(***)")
    }
}

impl fmt::Display for ApiKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "***")
    }
}

/// Places-search API configuration.
#[derive(Debug, Clone)]
pub struct PlacesConfig {
    /// Credential sent with every search and embedded in photo URLs
    pub api_key: Option<ApiKey>,
    /// Scheme and host of the places API
    pub base_url: String,
    /// Timeout for the outbound search request
    pub request_timeout: Duration,
    /// Result-count hint sent with each search
    pub page_size: u32,
    /// Place category the search is filtered to
    pub category: &'static str,
    /// Maximum width requested for photo URLs
    pub photo_max_width: u32,
}

impl Default for PlacesConfig {
    fn default() -> Self {
        Self {
            api_key: None,
            base_url: "https://maps.googleapis.com".to_string(),
            request_timeout: Duration::from_secs(10),
            page_size: 10,
            category: "veterinary_care",
            photo_max_width: 400,
        }
    }
}

/// What to do when the target page has no listing region.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum MissingRegionPolicy {
    /// Leave the file untouched and report an error
    #[default]
    Fail,
    /// Insert a fresh region before `</body>` (or at end of file)
    Append,
}

impl FromStr for MissingRegionPolicy {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "fail" => Ok(Self::Fail),
            "append" => Ok(Self::Append),
            _ => Err(format!(
                "Invalid missing-region policy: '{s}'. Valid options are: fail, append"
            )),
        }
    }
}

/// What to do with the listing region when the places search fails.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum SearchFailurePolicy {
    /// Replace the region with a static error notice
    #[default]
    ErrorNotice,
    /// Replace the region with an empty listing
    EmptyListing,
    /// Do not touch the file
    KeepExisting,
}

impl FromStr for SearchFailurePolicy {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "error-notice" | "error_notice" => Ok(Self::ErrorNotice),
            "empty-listing" | "empty_listing" | "empty" => Ok(Self::EmptyListing),
            "keep-existing" | "keep_existing" | "keep" => Ok(Self::KeepExisting),
            _ => Err(format!(
                "Invalid search-failure policy: '{s}'. \
                 Valid options are: error-notice, empty-listing, keep-existing"
            )),
        }
    }
}

/// Hospital listing generation configuration.
#[derive(Debug, Clone)]
pub struct ListingConfig {
    /// Center of the nearby search
    pub coordinate: Coordinate,
    /// Search radius
    pub radius: SearchRadius,
    /// Page whose listing region gets rewritten
    pub target_file: PathBuf,
    /// Re-run the refresh on this interval (None = startup only)
    pub refresh_interval: Option<Duration>,
    pub missing_region: MissingRegionPolicy,
    pub search_failure: SearchFailurePolicy,
}

impl Default for ListingConfig {
    fn default() -> Self {
        Self {
            coordinate: Coordinate::DEFAULT,
            radius: SearchRadius::default(),
            target_file: PathBuf::from("public").join("schedule_appt.html"),
            refresh_interval: None,
            missing_region: MissingRegionPolicy::default(),
            search_failure: SearchFailurePolicy::default(),
        }
    }
}

impl FurlunaConfig {
    /// Creates configuration with environment variable overrides.
    ///
    /// Blank variables count as unset.
    ///
    /// # Errors
    /// - `FurlunaError::Configuration` - A variable is set but cannot be parsed
    /// - `FurlunaError::Geo` - Listing coordinate or radius out of range
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|name| {
            std::env::var(name)
                .ok()
                .filter(|value| !value.trim().is_empty())
        })
    }

    /// Creates configuration from an arbitrary variable source.
    ///
    /// Unset variables keep their defaults. The listing target follows the
    /// public directory unless it is set explicitly.
    ///
    /// # Errors
    /// - `FurlunaError::Configuration` - A variable is set but cannot be parsed
    /// - `FurlunaError::Geo` - Listing coordinate or radius out of range
    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut config = Self::default();

        if let Some(port) = lookup("PORT") {
            config.server.port = parse_var("PORT", &port)?;
        }

        if let Some(host) = lookup("FURLUNA_HOST") {
            config.server.host = host;
        }

        if let Some(dir) = lookup("FURLUNA_PUBLIC_DIR") {
            config.server.public_dir = PathBuf::from(dir);
        }
        config.listing.target_file = match lookup("FURLUNA_LISTING_TARGET") {
            Some(target) => PathBuf::from(target),
            None => config.server.public_dir.join("schedule_appt.html"),
        };

        if let Some(mode) = lookup("FURLUNA_RUNTIME_MODE") {
            config.runtime_mode = parse_var("FURLUNA_RUNTIME_MODE", &mode)?;
        }

        // Places API overrides
        if let Some(key) = lookup("FURLUNA_PLACES_API_KEY") {
            let key = key.trim();
            if !key.is_empty() {
                config.places.api_key = Some(ApiKey::new(key));
            }
        }

        if let Some(base_url) = lookup("FURLUNA_PLACES_BASE_URL") {
            config.places.base_url = base_url.trim_end_matches('/').to_string();
        }

        if let Some(timeout) = lookup("FURLUNA_PLACES_TIMEOUT_SECS") {
            let seconds: u64 = parse_var("FURLUNA_PLACES_TIMEOUT_SECS", &timeout)?;
            if seconds == 0 {
                return Err(FurlunaError::Configuration {
                    reason: "FURLUNA_PLACES_TIMEOUT_SECS must be at least 1".to_string(),
                });
            }
            config.places.request_timeout = Duration::from_secs(seconds);
        }

        // Listing overrides
        let latitude = lookup("FURLUNA_LISTING_LAT")
            .map(|v| parse_var::<f64>("FURLUNA_LISTING_LAT", &v))
            .transpose()?;
        let longitude = lookup("FURLUNA_LISTING_LNG")
            .map(|v| parse_var::<f64>("FURLUNA_LISTING_LNG", &v))
            .transpose()?;
        if latitude.is_some() || longitude.is_some() {
            let current = config.listing.coordinate;
            config.listing.coordinate = Coordinate::new(
                latitude.unwrap_or(current.latitude()),
                longitude.unwrap_or(current.longitude()),
            )?;
        }

        if let Some(radius) = lookup("FURLUNA_LISTING_RADIUS") {
            let meters: u32 = parse_var("FURLUNA_LISTING_RADIUS", &radius)?;
            config.listing.radius = SearchRadius::new(meters)?;
        }

        if let Some(interval) = lookup("FURLUNA_LISTING_REFRESH_SECS") {
            let seconds: u64 = parse_var("FURLUNA_LISTING_REFRESH_SECS", &interval)?;
            config.listing.refresh_interval = (seconds > 0).then(|| Duration::from_secs(seconds));
        }

        if let Some(policy) = lookup("FURLUNA_LISTING_ON_MISSING_REGION") {
            config.listing.missing_region = parse_var("FURLUNA_LISTING_ON_MISSING_REGION", &policy)?;
        }

        if let Some(policy) = lookup("FURLUNA_LISTING_ON_SEARCH_FAILURE") {
            config.listing.search_failure = parse_var("FURLUNA_LISTING_ON_SEARCH_FAILURE", &policy)?;
        }

        Ok(config)
    }

    /// Creates a configuration for tests: demo data, everything rooted in `public_dir`.
    pub fn for_testing(public_dir: impl Into<PathBuf>) -> Self {
        let public_dir = public_dir.into();
        Self {
            listing: ListingConfig {
                target_file: public_dir.join("schedule_appt.html"),
                ..Default::default()
            },
            server: ServerConfig {
                public_dir,
                port: 0,
                ..Default::default()
            },
            runtime_mode: RuntimeMode::Development,
            ..Default::default()
        }
    }

    /// Socket address string the server binds to.
    pub fn bind_address(&self) -> String {
        format!("{}:{}", self.server.host, self.server.port)
    }
}

fn parse_var<T>(name: &str, value: &str) -> Result<T>
where
    T: FromStr,
    T::Err: fmt::Display,
{
    value
        .trim()
        .parse::<T>()
        .map_err(|e| FurlunaError::Configuration {
            reason: format!("{name}={value:?}: {e}"),
        })
}
