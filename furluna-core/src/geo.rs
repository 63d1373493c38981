//! Geographic inputs for nearby-place searches.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Errors raised when constructing search inputs.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum GeoError {
    #[error("Latitude {value} is outside [-90, 90]")]
    LatitudeOutOfRange { value: f64 },

    #[error("Longitude {value} is outside [-180, 180]")]
    LongitudeOutOfRange { value: f64 },

    #[error("Search radius must be a positive integer")]
    ZeroRadius,
}

/// Latitude/longitude pair in degrees.
///
/// Both components are finite and within range once constructed.
/// Deserialization goes through [`Coordinate::new`].
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "CoordinateFields")]
pub struct Coordinate {
    latitude: f64,
    longitude: f64,
}

impl Coordinate {
    /// San Francisco, the location the listing page has always covered.
    pub const DEFAULT: Coordinate = Coordinate {
        latitude: 37.7749,
        longitude: -122.4194,
    };

    /// Creates a validated coordinate.
    ///
    /// # Errors
    /// - `GeoError::LatitudeOutOfRange` - Latitude not finite or outside [-90, 90]
    /// - `GeoError::LongitudeOutOfRange` - Longitude not finite or outside [-180, 180]
    pub fn new(latitude: f64, longitude: f64) -> Result<Self, GeoError> {
        if !latitude.is_finite() || !(-90.0..=90.0).contains(&latitude) {
            return Err(GeoError::LatitudeOutOfRange { value: latitude });
        }
        if !longitude.is_finite() || !(-180.0..=180.0).contains(&longitude) {
            return Err(GeoError::LongitudeOutOfRange { value: longitude });
        }
        Ok(Self {
            latitude,
            longitude,
        })
    }

    pub fn latitude(&self) -> f64 {
        self.latitude
    }

    pub fn longitude(&self) -> f64 {
        self.longitude
    }

    /// Formats as `lat,lng`, the location parameter places APIs expect.
    pub fn to_query_value(&self) -> String {
        format!("{},{}", self.latitude, self.longitude)
    }
}

#[derive(Deserialize)]
struct CoordinateFields {
    latitude: f64,
    longitude: f64,
}

impl TryFrom<CoordinateFields> for Coordinate {
    type Error = GeoError;

    fn try_from(fields: CoordinateFields) -> Result<Self, Self::Error> {
        Self::new(fields.latitude, fields.longitude)
    }
}

impl fmt::Display for Coordinate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.latitude, self.longitude)
    }
}

/// Search radius in the unit the places API defines (meters for Google).
///
/// Always positive. The upper bound is left to the remote service.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "u32")]
pub struct SearchRadius(u32);

impl SearchRadius {
    /// Radius the site has always searched with.
    pub const DEFAULT_METERS: u32 = 482_803;

    /// Creates a validated radius.
    ///
    /// # Errors
    /// - `GeoError::ZeroRadius` - Radius is zero
    pub fn new(meters: u32) -> Result<Self, GeoError> {
        if meters == 0 {
            return Err(GeoError::ZeroRadius);
        }
        Ok(Self(meters))
    }

    pub fn meters(&self) -> u32 {
        self.0
    }
}

impl TryFrom<u32> for SearchRadius {
    type Error = GeoError;

    fn try_from(meters: u32) -> Result<Self, Self::Error> {
        Self::new(meters)
    }
}

impl Default for SearchRadius {
    fn default() -> Self {
        Self(Self::DEFAULT_METERS)
    }
}

impl fmt::Display for SearchRadius {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}m", self.0)
    }
}
