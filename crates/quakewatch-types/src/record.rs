//! Seismic event records.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Epicenter location reported alongside an event.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Coordinates {
    /// Longitude in decimal degrees.
    pub longitude: f64,
    /// Latitude in decimal degrees.
    pub latitude: f64,
    /// Depth below the surface in kilometres, when reported.
    pub depth_km: Option<f64>,
}

impl Coordinates {
    /// Creates a new coordinate triple.
    #[must_use]
    pub const fn new(longitude: f64, latitude: f64, depth_km: Option<f64>) -> Self {
        Self {
            longitude,
            latitude,
            depth_km,
        }
    }
}

/// A single seismic event as returned by the feed.
///
/// Records are immutable once built; all fields are exposed through
/// accessors only. The order of a record sequence is the order the service
/// returned, typically newest first.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Record {
    magnitude: f64,
    place: String,
    occurred_at_millis: i64,
    detail_url: String,
    raw_id: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    coordinates: Option<Coordinates>,
}

impl Record {
    /// Creates a new record.
    #[must_use]
    pub const fn new(
        magnitude: f64,
        place: String,
        occurred_at_millis: i64,
        detail_url: String,
        raw_id: String,
    ) -> Self {
        Self {
            magnitude,
            place,
            occurred_at_millis,
            detail_url,
            raw_id,
            coordinates: None,
        }
    }

    /// Attaches an epicenter location.
    #[must_use]
    pub const fn with_coordinates(mut self, coordinates: Coordinates) -> Self {
        self.coordinates = Some(coordinates);
        self
    }

    /// Returns the event magnitude.
    #[must_use]
    pub const fn magnitude(&self) -> f64 {
        self.magnitude
    }

    /// Returns the human readable place description, e.g. `"74km NW of Rumoi, Japan"`.
    #[must_use]
    pub fn place(&self) -> &str {
        &self.place
    }

    /// Returns the event time in milliseconds since the Unix epoch.
    #[must_use]
    pub const fn occurred_at_millis(&self) -> i64 {
        self.occurred_at_millis
    }

    /// Returns the event time as a UTC timestamp.
    ///
    /// Returns `None` if the millisecond value is outside chrono's range.
    #[must_use]
    pub fn occurred_at(&self) -> Option<DateTime<Utc>> {
        DateTime::from_timestamp_millis(self.occurred_at_millis)
    }

    /// Returns the URL of the event detail page.
    #[must_use]
    pub fn detail_url(&self) -> &str {
        &self.detail_url
    }

    /// Returns the identifier the service assigned to the event.
    #[must_use]
    pub fn raw_id(&self) -> &str {
        &self.raw_id
    }

    /// Returns the epicenter location, if the feed carried one.
    #[must_use]
    pub const fn coordinates(&self) -> Option<Coordinates> {
        self.coordinates
    }
}
