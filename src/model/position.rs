//! Position record: where the ISS was, and when.

use std::fmt;

use jiff::civil::DateTime;
use serde::Serialize;

/// The ISS position at a single moment.
///
/// Immutable once built. The only constructor is crate-private and is
/// called by the mapper after every field has been extracted, so a
/// partially populated record is never observable.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PositionRecord {
    /// Civil date-time of the observation, in the zone used for mapping.
    observed_at: DateTime,

    /// Status string reported by the API (`"success"` in practice).
    message: String,

    latitude: f64,
    longitude: f64,
}

impl PositionRecord {
    pub(crate) fn new(observed_at: DateTime, message: String, latitude: f64, longitude: f64) -> Self {
        Self {
            observed_at,
            message,
            latitude,
            longitude,
        }
    }

    /// When the position was observed.
    ///
    /// This is a civil date-time with no offset attached: its meaning
    /// depends on the time zone that was handed to the mapper.
    pub fn observed_at(&self) -> DateTime {
        self.observed_at
    }

    pub fn message(&self) -> &str {
        &self.message
    }

    /// Latitude in decimal degrees.
    pub fn latitude(&self) -> f64 {
        self.latitude
    }

    /// Longitude in decimal degrees.
    pub fn longitude(&self) -> f64 {
        self.longitude
    }
}

impl fmt::Display for PositionRecord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "ISS position at {}: latitude={}, longitude={} ({})",
            self.observed_at, self.latitude, self.longitude, self.message
        )
    }
}
