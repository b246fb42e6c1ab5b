//! Normalized satellite position snapshot.

use std::fmt;

use chrono::{DateTime, Utc};
use serde::Serialize;

/// Snapshot of satellite telemetry at one point in time.
///
/// Latitude and longitude are taken as-is from the upstream API; range
/// checking is left to the source. The extended fields are only populated by
/// providers that publish them.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PositionRecord {
    pub latitude: f64,
    pub longitude: f64,
    /// Unix epoch seconds, as reported by the source.
    pub timestamp: i64,
    /// Altitude in kilometres.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub altitude: Option<f64>,
    /// Ground speed in km/h.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub velocity: Option<f64>,
    /// Illumination state, e.g. `daylight` or `eclipsed`.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub visibility: Option<String>,
}

impl PositionRecord {
    /// Create a record with only the required fields.
    #[must_use]
    pub const fn new(latitude: f64, longitude: f64, timestamp: i64) -> Self {
        Self {
            latitude,
            longitude,
            timestamp,
            altitude: None,
            velocity: None,
            visibility: None,
        }
    }

    #[must_use]
    pub fn with_altitude(mut self, km: f64) -> Self {
        self.altitude = Some(km);
        self
    }

    #[must_use]
    pub fn with_velocity(mut self, km_per_hour: f64) -> Self {
        self.velocity = Some(km_per_hour);
        self
    }

    #[must_use]
    pub fn with_visibility(mut self, visibility: impl Into<String>) -> Self {
        self.visibility = Some(visibility.into());
        self
    }

    /// The source timestamp as a UTC datetime.
    ///
    /// Returns `None` when the timestamp is outside chrono's range.
    #[must_use]
    pub fn observed_at(&self) -> Option<DateTime<Utc>> {
        DateTime::from_timestamp(self.timestamp, 0)
    }

    /// Whether any of the extended telemetry fields are present.
    #[must_use]
    pub const fn has_extended(&self) -> bool {
        self.altitude.is_some() || self.velocity.is_some() || self.visibility.is_some()
    }
}

impl fmt::Display for PositionRecord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "lat {:.4}, lon {:.4} @ {}",
            self.latitude, self.longitude, self.timestamp
        )
    }
}
