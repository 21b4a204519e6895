//! Benchmark utilities for quakewatch.

use serde_json::{Value, json};

/// Shape of a synthetic feed document.
#[derive(Debug, Clone, Copy)]
pub struct FeedConfig {
    /// Number of feature entries.
    pub features: usize,
    /// Every n-th entry lacks a magnitude and is skipped by the parser.
    /// Zero means every entry is well formed.
    pub broken_every: usize,
}

impl Default for FeedConfig {
    fn default() -> Self {
        Self {
            features: 1_000,
            broken_every: 0,
        }
    }
}

impl FeedConfig {
    /// Number of entries the parser should keep.
    pub fn expected_records(&self) -> usize {
        if self.broken_every == 0 {
            self.features
        } else {
            self.features - self.features.div_ceil(self.broken_every)
        }
    }
}

fn feature(index: usize, broken: bool) -> Value {
    let id = format!("bench{index:06}");
    let mut properties = json!({
        "mag": 2.0 + (index % 60) as f64 / 10.0,
        "place": format!("{}km NNE of Somewhere, Testland", index % 300),
        "time": 1_700_000_000_000_i64 - index as i64 * 60_000,
        "updated": 1_700_000_100_000_i64,
        "tz": null,
        "url": format!("https://earthquake.usgs.gov/earthquakes/eventpage/{id}"),
        "status": "reviewed",
        "tsunami": 0,
        "sig": 400,
        "net": "us",
        "type": "earthquake",
        "title": "synthetic event",
    });
    if broken && let Some(props) = properties.as_object_mut() {
        props.remove("mag");
    }
    json!({
        "type": "Feature",
        "id": id,
        "properties": properties,
        "geometry": {
            "type": "Point",
            "coordinates": [
                -180.0 + (index % 360) as f64,
                -60.0 + (index % 120) as f64,
                10.0 + (index % 50) as f64,
            ],
        },
    })
}

/// Builds a USGS-shaped GeoJSON feature collection.
pub fn synthetic_feed(config: FeedConfig) -> Vec<u8> {
    let features: Vec<Value> = (0..config.features)
        .map(|i| feature(i, config.broken_every != 0 && i % config.broken_every == 0))
        .collect();
    let document = json!({
        "type": "FeatureCollection",
        "metadata": {
            "generated": 1_700_000_000_000_i64,
            "title": "USGS Earthquakes",
            "status": 200,
            "count": config.features,
        },
        "features": features,
    });
    document.to_string().into_bytes()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_expected_records() {
        let clean = FeedConfig {
            features: 10,
            broken_every: 0,
        };
        assert_eq!(clean.expected_records(), 10);

        let broken = FeedConfig {
            features: 10,
            broken_every: 4,
        };
        // Entries 0, 4 and 8 are broken.
        assert_eq!(broken.expected_records(), 7);
    }

    #[test]
    fn test_synthetic_feed_shape() {
        let feed = synthetic_feed(FeedConfig {
            features: 3,
            broken_every: 2,
        });
        let doc: Value = serde_json::from_slice(&feed).unwrap();
        let features = doc["features"].as_array().unwrap();
        assert_eq!(features.len(), 3);
        assert!(features[0]["properties"].get("mag").is_none());
        assert!(features[1]["properties"].get("mag").is_some());
    }
}
