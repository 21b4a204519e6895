//! Feed filter options.

use serde::{Deserialize, Serialize};
use std::str::FromStr;

/// Sort order requested from the event service.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum OrderBy {
    /// Newest events first.
    #[default]
    Time,
    /// Largest events first.
    Magnitude,
}

impl OrderBy {
    /// Returns the value sent as the `orderby` query parameter.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Time => "time",
            Self::Magnitude => "magnitude",
        }
    }

    /// Returns all available sort orders.
    #[must_use]
    pub const fn all() -> &'static [Self] {
        &[Self::Time, Self::Magnitude]
    }
}

impl std::fmt::Display for OrderBy {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for OrderBy {
    type Err = OrderByParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "time" => Ok(Self::Time),
            "magnitude" | "mag" => Ok(Self::Magnitude),
            _ => Err(OrderByParseError(s.to_string())),
        }
    }
}

/// Error returned when parsing an invalid sort order string.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OrderByParseError(String);

impl std::fmt::Display for OrderByParseError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "invalid sort order '{}', expected one of: time, magnitude",
            self.0
        )
    }
}

impl std::error::Error for OrderByParseError {}

/// Filter and sort options for a single feed request.
///
/// Values are taken as-is: validation and defaulting belong to whoever owns
/// the settings, not to the query builder.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(default)]
pub struct FilterOptions {
    /// Minimum magnitude, sent verbatim as `minmag`.
    pub min_magnitude: String,
    /// Sort order, sent as `orderby`.
    pub order_by: OrderBy,
    /// Maximum number of events, sent as `limit`.
    pub limit: u32,
    /// Response format, sent as `format`.
    pub format: String,
}

impl FilterOptions {
    /// Response format the parser understands.
    pub const GEOJSON: &'static str = "geojson";

    /// Sets the minimum magnitude.
    #[must_use]
    pub fn with_min_magnitude(mut self, min_magnitude: impl Into<String>) -> Self {
        self.min_magnitude = min_magnitude.into();
        self
    }

    /// Sets the sort order.
    #[must_use]
    pub const fn with_order_by(mut self, order_by: OrderBy) -> Self {
        self.order_by = order_by;
        self
    }

    /// Sets the result limit.
    #[must_use]
    pub const fn with_limit(mut self, limit: u32) -> Self {
        self.limit = limit;
        self
    }
}

impl Default for FilterOptions {
    fn default() -> Self {
        Self {
            min_magnitude: "6".to_string(),
            order_by: OrderBy::Time,
            limit: 10,
            format: Self::GEOJSON.to_string(),
        }
    }
}
