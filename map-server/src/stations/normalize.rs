//! Station record normalization.
//!
//! The stations upstream enforces no schema: key names vary by
//! deployment, coordinates arrive as numbers or strings (sometimes with
//! a decimal comma), and the interesting fields may sit under a nested
//! `station` object. Each recognized field is resolved through an
//! ordered chain of extractors, first hit wins, and every failure
//! degrades to a per-field fallback rather than rejecting the record.

use chrono::{DateTime, TimeZone, Utc};
use serde_json::Value;

use crate::domain::{FALLBACK_NAME, LatLng, NormalizedStation};

/// The stations payload was neither an array nor `{"items": [...]}`.
///
/// This is the one fatal shape error: individual record problems are
/// absorbed field-by-field, but a body we cannot even iterate fails the
/// whole load.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unexpected stations payload: expected an array or an object with an `items` array")]
pub struct PayloadError;

/// Top-level key spellings tried for the name, in priority order
/// (after the nested `station.name`).
const NAME_KEYS: &[&str] = &["name", "title", "stationName"];

/// Key spellings accepted for each coordinate axis.
const LAT_KEYS: &[&str] = &["latitude", "lat", "Latitude", "Lat"];
const LNG_KEYS: &[&str] = &["longitude", "lng", "Longitude", "Lng"];

/// Keys tried for the display-only last-updated timestamp.
const TIMESTAMP_KEYS: &[&str] = &["lastUpdated", "updatedAt", "modified", "lastModified"];

/// Normalize a whole upstream payload.
///
/// Accepts a bare array of records or an object carrying an `items`
/// array; anything else is a [`PayloadError`].
pub fn normalize_payload(
    payload: &Value,
    now: DateTime<Utc>,
) -> Result<Vec<NormalizedStation>, PayloadError> {
    let records = match payload {
        Value::Array(records) => records.as_slice(),
        Value::Object(map) => map
            .get("items")
            .and_then(Value::as_array)
            .map(Vec::as_slice)
            .ok_or(PayloadError)?,
        _ => return Err(PayloadError),
    };

    Ok(records.iter().map(|record| normalize(record, now)).collect())
}

/// Normalize a single raw record, total and pure.
///
/// `now` is passed in (rather than read from the clock) so repeated
/// calls over literal fixtures are deterministic; it only feeds the
/// display timestamp fallback.
pub fn normalize(raw: &Value, now: DateTime<Utc>) -> NormalizedStation {
    let nested = raw.get("station");

    NormalizedStation {
        name: resolve_name(raw, nested),
        coordinates: resolve_coordinates(raw, nested),
        last_updated: resolve_timestamp(raw).unwrap_or(now),
        station_type: resolve_type(raw, nested),
    }
}

/// `station.name`, then top-level `name`/`title`/`stationName`, else the
/// fixed fallback. Blank strings count as absent so the name is never
/// empty.
fn resolve_name(raw: &Value, nested: Option<&Value>) -> String {
    nested
        .and_then(|station| string_field(station, "name"))
        .or_else(|| NAME_KEYS.iter().find_map(|key| string_field(raw, key)))
        .unwrap_or_else(|| FALLBACK_NAME.to_string())
}

/// Each axis is resolved independently through the candidate objects;
/// the pair is kept only when both axes resolve.
fn resolve_coordinates(raw: &Value, nested: Option<&Value>) -> Option<LatLng> {
    let lat = resolve_axis(raw, nested, LAT_KEYS)?;
    let lng = resolve_axis(raw, nested, LNG_KEYS)?;
    LatLng::new(lat, lng)
}

/// First coercible value for `keys` across the geolocation candidates:
/// `station.geolocation`, top-level `geolocation`, `geo`, then the
/// record itself (which covers plain top-level `lat`/`Latitude` fields).
fn resolve_axis(raw: &Value, nested: Option<&Value>, keys: &[&str]) -> Option<f64> {
    let candidates = [
        nested.and_then(|station| station.get("geolocation")),
        raw.get("geolocation"),
        raw.get("geo"),
        Some(raw),
    ];

    candidates
        .into_iter()
        .flatten()
        .find_map(|object| keys.iter().find_map(|key| object.get(key).and_then(coerce_number)))
}

/// `station.stationType` then top-level `stationType`.
fn resolve_type(raw: &Value, nested: Option<&Value>) -> Option<String> {
    nested
        .and_then(|station| string_field(station, "stationType"))
        .or_else(|| string_field(raw, "stationType"))
}

/// First coercible timestamp among the recognized keys.
fn resolve_timestamp(raw: &Value) -> Option<DateTime<Utc>> {
    TIMESTAMP_KEYS
        .iter()
        .find_map(|key| raw.get(key).and_then(coerce_timestamp))
}

/// Tolerant numeric coercion: finite numbers pass through, strings get
/// one decimal comma converted to a point before parsing. Parses that
/// produce non-finite values ("inf", "NaN") count as absent, as does
/// every other JSON type.
fn coerce_number(value: &Value) -> Option<f64> {
    match value {
        Value::Number(n) => n.as_f64().filter(|v| v.is_finite()),
        Value::String(s) => s
            .trim()
            .replacen(',', ".", 1)
            .parse::<f64>()
            .ok()
            .filter(|v| v.is_finite()),
        _ => None,
    }
}

/// RFC 3339 strings or unix seconds; anything else is absent.
fn coerce_timestamp(value: &Value) -> Option<DateTime<Utc>> {
    match value {
        Value::String(s) => DateTime::parse_from_rfc3339(s.trim())
            .ok()
            .map(|t| t.with_timezone(&Utc)),
        Value::Number(n) => n
            .as_i64()
            .and_then(|secs| Utc.timestamp_opt(secs, 0).single()),
        _ => None,
    }
}

/// Non-empty trimmed string field, else absent.
fn string_field(object: &Value, key: &str) -> Option<String> {
    object
        .get(key)
        .and_then(Value::as_str)
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(str::to_string)
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;
    use serde_json::json;

    fn fixed_now() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 6, 1, 12, 0, 0).unwrap()
    }

    #[test]
    fn decimal_comma_strings_parse() {
        let record = json!({ "name": "Comma", "lat": "59,91", "lng": "10,75" });
        let station = normalize(&record, fixed_now());
        assert_eq!(
            station.coordinates,
            Some(LatLng { lat: 59.91, lng: 10.75 })
        );
    }

    #[test]
    fn missing_name_falls_back() {
        let record = json!({ "lat": 1.0, "lng": 2.0 });
        let station = normalize(&record, fixed_now());
        assert_eq!(station.name, FALLBACK_NAME);
        assert!(!station.name.is_empty());
    }

    #[test]
    fn blank_name_falls_back() {
        let record = json!({ "name": "   " });
        assert_eq!(normalize(&record, fixed_now()).name, FALLBACK_NAME);
    }

    #[test]
    fn name_resolution_order() {
        let record = json!({
            "station": { "name": "Nested" },
            "name": "Top",
            "title": "Title",
            "stationName": "StationName"
        });
        assert_eq!(normalize(&record, fixed_now()).name, "Nested");

        let record = json!({ "title": "Title", "stationName": "StationName" });
        assert_eq!(normalize(&record, fixed_now()).name, "Title");

        let record = json!({ "stationName": "StationName" });
        assert_eq!(normalize(&record, fixed_now()).name, "StationName");
    }

    #[test]
    fn every_latitude_spelling_is_accepted() {
        for key in ["latitude", "lat", "Latitude", "Lat"] {
            let record = json!({ "geolocation": { (key): 59.0, "lng": 10.0 } });
            let station = normalize(&record, fixed_now());
            assert_eq!(
                station.coordinates,
                Some(LatLng { lat: 59.0, lng: 10.0 }),
                "spelling {key}"
            );
        }
    }

    #[test]
    fn every_longitude_spelling_is_accepted() {
        for key in ["longitude", "lng", "Longitude", "Lng"] {
            let record = json!({ "geolocation": { "lat": 59.0, (key): 10.0 } });
            let station = normalize(&record, fixed_now());
            assert_eq!(
                station.coordinates,
                Some(LatLng { lat: 59.0, lng: 10.0 }),
                "spelling {key}"
            );
        }
    }

    #[test]
    fn nested_geolocation_wins_over_top_level() {
        let record = json!({
            "station": { "geolocation": { "lat": 1.0, "lng": 2.0 } },
            "geolocation": { "lat": 3.0, "lng": 4.0 },
            "lat": 5.0,
            "lng": 6.0
        });
        assert_eq!(
            normalize(&record, fixed_now()).coordinates,
            Some(LatLng { lat: 1.0, lng: 2.0 })
        );
    }

    #[test]
    fn geo_object_and_record_itself_are_fallbacks() {
        let record = json!({ "geo": { "lat": 3.0, "lng": 4.0 } });
        assert_eq!(
            normalize(&record, fixed_now()).coordinates,
            Some(LatLng { lat: 3.0, lng: 4.0 })
        );

        let record = json!({ "Latitude": "7,5", "Longitude": 8.25 });
        assert_eq!(
            normalize(&record, fixed_now()).coordinates,
            Some(LatLng { lat: 7.5, lng: 8.25 })
        );
    }

    #[test]
    fn axes_resolve_independently_across_objects() {
        // Latitude only in the geo object, longitude only at top level.
        let record = json!({ "geo": { "lat": 3.0 }, "lng": 4.0 });
        assert_eq!(
            normalize(&record, fixed_now()).coordinates,
            Some(LatLng { lat: 3.0, lng: 4.0 })
        );
    }

    #[test]
    fn one_unusable_axis_drops_the_pair() {
        let record = json!({ "lat": "not-a-number", "lng": "5" });
        assert_eq!(normalize(&record, fixed_now()).coordinates, None);

        let record = json!({ "lat": "59,9" });
        assert_eq!(normalize(&record, fixed_now()).coordinates, None);
    }

    #[test]
    fn non_finite_values_are_absent() {
        assert_eq!(coerce_number(&json!("inf")), None);
        assert_eq!(coerce_number(&json!("NaN")), None);
        assert_eq!(coerce_number(&json!(true)), None);
        assert_eq!(coerce_number(&json!(null)), None);
        assert_eq!(coerce_number(&json!({ "lat": 1.0 })), None);
        assert_eq!(coerce_number(&json!("  60,5  ")), Some(60.5));
        assert_eq!(coerce_number(&json!(12)), Some(12.0));
    }

    #[test]
    fn station_type_resolution_order() {
        let record = json!({
            "station": { "stationType": "Wash" },
            "stationType": "Truck"
        });
        assert_eq!(
            normalize(&record, fixed_now()).station_type.as_deref(),
            Some("Wash")
        );

        let record = json!({ "stationType": "Truck" });
        assert_eq!(
            normalize(&record, fixed_now()).station_type.as_deref(),
            Some("Truck")
        );

        let record = json!({ "name": "untyped" });
        assert_eq!(normalize(&record, fixed_now()).station_type, None);
    }

    #[test]
    fn timestamp_keys_in_order_else_now() {
        let record = json!({ "updatedAt": "2023-01-02T03:04:05Z" });
        let station = normalize(&record, fixed_now());
        assert_eq!(
            station.last_updated,
            Utc.with_ymd_and_hms(2023, 1, 2, 3, 4, 5).unwrap()
        );

        let record = json!({ "lastUpdated": 1_700_000_000 });
        let station = normalize(&record, fixed_now());
        assert_eq!(station.last_updated.timestamp(), 1_700_000_000);

        // Present but unparsable degrades to the fallback.
        let record = json!({ "modified": "last tuesday" });
        assert_eq!(normalize(&record, fixed_now()).last_updated, fixed_now());

        let record = json!({});
        assert_eq!(normalize(&record, fixed_now()).last_updated, fixed_now());
    }

    #[test]
    fn payload_accepts_array_and_items_object() {
        let array = json!([{ "name": "A" }, { "name": "B" }]);
        assert_eq!(normalize_payload(&array, fixed_now()).unwrap().len(), 2);

        let wrapped = json!({ "items": [{ "name": "A" }] });
        assert_eq!(normalize_payload(&wrapped, fixed_now()).unwrap().len(), 1);

        let empty = json!([]);
        assert!(normalize_payload(&empty, fixed_now()).unwrap().is_empty());
    }

    #[test]
    fn payload_rejects_other_shapes() {
        for payload in [
            json!({ "stations": [] }),
            json!({ "items": "nope" }),
            json!("text"),
            json!(42),
            json!(null),
        ] {
            assert_eq!(
                normalize_payload(&payload, fixed_now()),
                Err(PayloadError),
                "{payload}"
            );
        }
    }

    /// Arbitrary JSON trees, a few levels deep, with key names drawn
    /// from the spellings the normalizer knows plus noise.
    fn json_value() -> impl Strategy<Value = Value> {
        let leaf = prop_oneof![
            Just(Value::Null),
            any::<bool>().prop_map(Value::Bool),
            (-1.0e6..1.0e6f64).prop_map(|f| json!(f)),
            any::<i32>().prop_map(|i| json!(i)),
            "[ -~]{0,12}".prop_map(Value::String),
        ];
        let key = prop_oneof![
            Just("station".to_string()),
            Just("geolocation".to_string()),
            Just("geo".to_string()),
            Just("name".to_string()),
            Just("lat".to_string()),
            Just("lng".to_string()),
            Just("stationType".to_string()),
            Just("lastUpdated".to_string()),
            "[a-zA-Z]{1,8}",
        ];
        leaf.prop_recursive(3, 24, 4, move |inner| {
            prop_oneof![
                proptest::collection::vec(inner.clone(), 0..4).prop_map(Value::Array),
                proptest::collection::hash_map(key.clone(), inner, 0..4)
                    .prop_map(|map| Value::Object(map.into_iter().collect())),
            ]
        })
    }

    proptest! {
        #[test]
        fn normalize_is_total(record in json_value()) {
            let station = normalize(&record, fixed_now());
            prop_assert!(!station.name.is_empty());
            if let Some(coords) = station.coordinates {
                prop_assert!(coords.lat.is_finite());
                prop_assert!(coords.lng.is_finite());
            }
        }

        #[test]
        fn comma_and_point_strings_agree(
            lat in -90.0..90.0f64,
            lng in -180.0..180.0f64,
        ) {
            let point = json!({ "lat": format!("{lat}"), "lng": format!("{lng}") });
            let comma = json!({
                "lat": format!("{lat}").replace('.', ","),
                "lng": format!("{lng}").replace('.', ","),
            });
            let a = normalize(&point, fixed_now()).coordinates;
            let b = normalize(&comma, fixed_now()).coordinates;
            prop_assert_eq!(a, b);
            prop_assert!(a.is_some());
        }
    }
}
