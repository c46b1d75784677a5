//! Defensive parsing of geocoding responses.
//!
//! The upstream returns an array of hits with `display_name`, `lat`,
//! `lon` (stringly-typed) and an optional 4-element `boundingbox` in
//! south/north/west/east order. Entries that don't coerce are dropped;
//! a malformed bounding box only costs that entry its box.

use serde_json::Value;

use crate::domain::{BoundingBox, SearchResult};

/// Parse an upstream payload into usable search results.
///
/// A payload that isn't an array yields no results.
pub fn parse_results(payload: &Value) -> Vec<SearchResult> {
    payload
        .as_array()
        .map(|hits| hits.iter().filter_map(parse_result).collect())
        .unwrap_or_default()
}

fn parse_result(hit: &Value) -> Option<SearchResult> {
    let display = hit
        .get("display_name")
        .and_then(Value::as_str)
        .map(str::trim)
        .filter(|s| !s.is_empty())?
        .to_string();

    let lat = hit.get("lat").and_then(coerce_number)?;
    let lon = hit.get("lon").and_then(coerce_number)?;

    let bbox = hit.get("boundingbox").and_then(parse_bbox);

    Some(SearchResult {
        display,
        lat,
        lon,
        bbox,
    })
}

/// South/north/west/east, all four coercible, or no box at all.
fn parse_bbox(value: &Value) -> Option<BoundingBox> {
    let parts = value.as_array()?;
    if parts.len() != 4 {
        return None;
    }

    let south = coerce_number(&parts[0])?;
    let north = coerce_number(&parts[1])?;
    let west = coerce_number(&parts[2])?;
    let east = coerce_number(&parts[3])?;

    Some(BoundingBox {
        south,
        north,
        west,
        east,
    })
}

/// Finite numbers or dot-decimal numeric strings; everything else is
/// absent. (Decimal commas are a stations-upstream quirk, not accepted
/// here.)
fn coerce_number(value: &Value) -> Option<f64> {
    match value {
        Value::Number(n) => n.as_f64().filter(|v| v.is_finite()),
        Value::String(s) => s.trim().parse::<f64>().ok().filter(|v| v.is_finite()),
        _ => None,
    }
}
