//! GeoJSON feature collection parsing.

use quakewatch_types::{Coordinates, ParseError, Record};
use serde_json::Value;
use tracing::debug;

/// Base of the event detail page synthesized when an entry has no `url`.
pub const EVENT_PAGE_BASE: &str = "https://earthquake.usgs.gov/earthquakes/eventpage/";

/// Parses a feed document into records, in document order.
///
/// The document must be a JSON object with a `features` array. Each entry
/// needs a `properties` object carrying a numeric `mag` and an integer
/// `time`; entries that lack either, or that are otherwise unreadable, are
/// skipped. A valid document with no usable entries yields an empty list.
///
/// # Errors
///
/// Returns [`ParseError::Malformed`] if the body is not JSON, is not an
/// object, or has no `features` array.
pub fn parse_records(data: &[u8]) -> Result<Vec<Record>, ParseError> {
    let document: Value = serde_json::from_slice(data)
        .map_err(|e| ParseError::Malformed(format!("invalid JSON: {e}")))?;

    let features = document
        .as_object()
        .ok_or_else(|| ParseError::Malformed("document is not a JSON object".to_string()))?
        .get("features")
        .and_then(Value::as_array)
        .ok_or_else(|| ParseError::Malformed("missing `features` array".to_string()))?;

    let records: Vec<Record> = features
        .iter()
        .enumerate()
        .filter_map(|(index, entry)| match parse_feature(entry) {
            Ok(record) => Some(record),
            Err(reason) => {
                debug!(index, reason, "skipping feed entry");
                None
            }
        })
        .collect();

    debug!(
        entries = features.len(),
        records = records.len(),
        "parsed feed document"
    );
    Ok(records)
}

/// Converts one feature entry, or says why it was rejected.
///
/// Only `mag` and `time` are required. Optional fields of the wrong type
/// read as empty.
fn parse_feature(entry: &Value) -> Result<Record, &'static str> {
    let props = entry
        .get("properties")
        .filter(|props| props.is_object())
        .ok_or("missing properties")?;

    let magnitude = props
        .get("mag")
        .and_then(Value::as_f64)
        .ok_or("missing magnitude")?;
    let time = props
        .get("time")
        .and_then(Value::as_i64)
        .ok_or("missing time")?;
    let raw_id = entry.get("id").map(id_text).unwrap_or_default();
    let place = text(props.get("place"));

    let detail_url = match text(props.get("url")) {
        url if !url.is_empty() => url,
        _ if !raw_id.is_empty() => format!("{EVENT_PAGE_BASE}{raw_id}"),
        _ => String::new(),
    };

    let record = Record::new(magnitude, place, time, detail_url, raw_id);

    Ok(match entry.get("geometry").and_then(coordinates) {
        Some(coords) => record.with_coordinates(coords),
        None => record,
    })
}

/// GeoJSON allows a string or a number as the feature id.
fn id_text(id: &Value) -> String {
    match id {
        Value::String(s) => s.clone(),
        Value::Number(n) => n.to_string(),
        _ => String::new(),
    }
}

fn text(value: Option<&Value>) -> String {
    value.and_then(Value::as_str).unwrap_or_default().to_string()
}

/// Reads `[longitude, latitude, depth?]` from a point geometry.
fn coordinates(geometry: &Value) -> Option<Coordinates> {
    let coords = geometry.get("coordinates")?.as_array()?;
    let longitude = coords.first()?.as_f64()?;
    let latitude = coords.get(1)?.as_f64()?;
    let depth_km = coords.get(2).and_then(Value::as_f64);
    Some(Coordinates::new(longitude, latitude, depth_km))
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    fn feature(id: &str, mag: f64, place: &str, time: i64) -> String {
        format!(
            r#"{{"type":"Feature","id":"{id}","properties":{{"mag":{mag},"place":"{place}","time":{time},"url":"https://earthquake.usgs.gov/earthquakes/eventpage/{id}"}},"geometry":{{"type":"Point","coordinates":[142.7,38.3,29.0]}}}}"#
        )
    }

    fn collection(features: &[String]) -> String {
        format!(
            r#"{{"type":"FeatureCollection","metadata":{{"count":{}}},"features":[{}]}}"#,
            features.len(),
            features.join(",")
        )
    }

    #[test]
    fn test_parse_well_formed_entries() {
        let doc = collection(&[
            feature("us1", 6.1, "10km S of A", 1_000),
            feature("us2", 7.0, "20km N of B", 2_000),
            feature("us3", 5.9, "30km E of C", 3_000),
        ]);
        let records = parse_records(doc.as_bytes()).unwrap();

        assert_eq!(records.len(), 3);
        let mags: Vec<f64> = records.iter().map(Record::magnitude).collect();
        assert_eq!(mags, vec![6.1, 7.0, 5.9]);

        let second = &records[1];
        assert_eq!(second.raw_id(), "us2");
        assert_eq!(second.place(), "20km N of B");
        assert_eq!(second.occurred_at_millis(), 2_000);
        assert_eq!(
            second.detail_url(),
            "https://earthquake.usgs.gov/earthquakes/eventpage/us2"
        );
        let coords = second.coordinates().unwrap();
        assert_relative_eq!(coords.longitude, 142.7);
        assert_relative_eq!(coords.latitude, 38.3);
        assert_eq!(coords.depth_km, Some(29.0));
    }

    #[test]
    fn test_entry_missing_magnitude_is_skipped() {
        let broken =
            r#"{"id":"us9","properties":{"place":"nowhere","time":5,"url":"u"}}"#.to_string();
        let doc = collection(&[
            feature("us1", 6.1, "A", 1),
            broken,
            feature("us3", 5.9, "C", 3),
        ]);
        let records = parse_records(doc.as_bytes()).unwrap();

        assert_eq!(records.len(), 2);
        assert_eq!(records[0].raw_id(), "us1");
        assert_eq!(records[1].raw_id(), "us3");
    }

    #[test]
    fn test_entry_missing_time_or_null_mag_is_skipped() {
        let no_time = r#"{"id":"a","properties":{"mag":5.0,"place":"x"}}"#.to_string();
        let null_mag = r#"{"id":"b","properties":{"mag":null,"time":1}}"#.to_string();
        let wrong_type = r#"{"id":"c","properties":{"mag":"big","time":1}}"#.to_string();
        let not_object = "42".to_string();
        let doc = collection(&[no_time, null_mag, wrong_type, not_object]);

        let records = parse_records(doc.as_bytes()).unwrap();
        assert!(records.is_empty());
    }

    #[test]
    fn test_detail_url_synthesized_from_id() {
        let doc = collection(&[r#"{"id":"ci3","properties":{"mag":2.5,"time":7}}"#.to_string()]);
        let records = parse_records(doc.as_bytes()).unwrap();

        assert_eq!(records[0].detail_url(), format!("{EVENT_PAGE_BASE}ci3"));
        assert_eq!(records[0].place(), "");
        assert!(records[0].coordinates().is_none());
    }

    #[test]
    fn test_detail_url_empty_without_id() {
        let doc = collection(&[r#"{"properties":{"mag":2.5,"time":7}}"#.to_string()]);
        let records = parse_records(doc.as_bytes()).unwrap();

        assert_eq!(records[0].detail_url(), "");
        assert_eq!(records[0].raw_id(), "");
    }

    #[test]
    fn test_numeric_id_is_kept_as_text() {
        let doc = collection(&[
            r#"{"id":12345,"properties":{"mag":6.1,"place":"A","time":1}}"#.to_string(),
            feature("b", 5.0, "B", 2),
        ]);
        let records = parse_records(doc.as_bytes()).unwrap();

        assert_eq!(records.len(), 2);
        assert_eq!(records[0].raw_id(), "12345");
        assert_eq!(records[0].detail_url(), format!("{EVENT_PAGE_BASE}12345"));
        assert_eq!(records[1].raw_id(), "b");
    }

    #[test]
    fn test_wrongly_typed_optional_fields_read_as_empty() {
        let doc = collection(&[
            r#"{"id":["x"],"properties":{"mag":4.2,"place":42,"time":9,"url":false}}"#
                .to_string(),
        ]);
        let records = parse_records(doc.as_bytes()).unwrap();

        assert_eq!(records.len(), 1);
        assert_eq!(records[0].place(), "");
        assert_eq!(records[0].raw_id(), "");
        assert_eq!(records[0].detail_url(), "");
        assert_eq!(records[0].occurred_at_millis(), 9);
    }

    #[test]
    fn test_entry_without_properties_object_is_skipped() {
        let doc = collection(&[
            r#"{"id":"a","properties":"mag 6"}"#.to_string(),
            r#"{"id":"b"}"#.to_string(),
            feature("c", 5.5, "C", 3),
        ]);
        let records = parse_records(doc.as_bytes()).unwrap();

        assert_eq!(records.len(), 1);
        assert_eq!(records[0].raw_id(), "c");
    }

    #[test]
    fn test_bad_geometry_does_not_drop_entry() {
        let doc = collection(&[
            r#"{"id":"x","properties":{"mag":3.0,"time":1},"geometry":{"coordinates":null}}"#
                .to_string(),
        ]);
        let records = parse_records(doc.as_bytes()).unwrap();

        assert_eq!(records.len(), 1);
        assert!(records[0].coordinates().is_none());
    }

    #[test]
    fn test_empty_features_is_success() {
        let records = parse_records(br#"{"type":"FeatureCollection","features":[]}"#).unwrap();
        assert!(records.is_empty());
    }

    #[test]
    fn test_missing_features_is_malformed() {
        let result = parse_records(br#"{"type":"FeatureCollection","metadata":{}}"#);
        assert!(matches!(result, Err(ParseError::Malformed(_))));
    }

    #[test]
    fn test_features_not_array_is_malformed() {
        let result = parse_records(br#"{"features":{"0":{}}}"#);
        assert!(matches!(result, Err(ParseError::Malformed(_))));
    }

    #[test]
    fn test_non_object_document_is_malformed() {
        assert!(matches!(
            parse_records(b"[[]]"),
            Err(ParseError::Malformed(_))
        ));
        assert!(matches!(
            parse_records(b"<html>busy</html>"),
            Err(ParseError::Malformed(_))
        ));
        assert!(matches!(parse_records(b""), Err(ParseError::Malformed(_))));
    }
}
