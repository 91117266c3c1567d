use crate::error::ValidationError;
use serde::{Deserialize, Serialize};

/// A point of interest chosen by the caller.
///
/// Coordinates are validated on construction and the value is immutable
/// afterwards. On the wire the coordinates are named `lat` and `lon`.
#[derive(Debug, PartialEq, Clone, Serialize, Deserialize)]
#[serde(try_from = "LocationInput")]
pub struct Location {
    name: String,
    #[serde(rename = "lat")]
    latitude: f64,
    #[serde(rename = "lon")]
    longitude: f64,
    method: String,
}

/// Unvalidated wire form of a [`Location`].
#[derive(Debug, Deserialize)]
struct LocationInput {
    name: String,
    lat: f64,
    lon: f64,
    method: String,
}

impl TryFrom<LocationInput> for Location {
    type Error = ValidationError;

    fn try_from(value: LocationInput) -> Result<Self, Self::Error> {
        Location::new(value.name, value.lat, value.lon, value.method)
    }
}

impl Location {
    /// Build a location, rejecting latitude outside [-90, 90] and longitude
    /// outside [-180, 180].
    pub fn new(
        name: impl Into<String>,
        latitude: f64,
        longitude: f64,
        method: impl Into<String>,
    ) -> Result<Self, ValidationError> {
        if !(-90.0..=90.0).contains(&latitude) {
            return Err(ValidationError::Latitude(latitude));
        }
        if !(-180.0..=180.0).contains(&longitude) {
            return Err(ValidationError::Longitude(longitude));
        }
        Ok(Location {
            name: name.into(),
            latitude,
            longitude,
            method: method.into(),
        })
    }

    /// Display name, e.g. "Quito".
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Latitude in decimal degrees
    pub fn latitude(&self) -> f64 {
        self.latitude
    }

    /// Longitude in decimal degrees
    pub fn longitude(&self) -> f64 {
        self.longitude
    }

    /// How the caller picked the location (map click, search, ...).
    pub fn method(&self) -> &str {
        &self.method
    }
}
