//! Conversion of raw provider JSON into [`Place`] values.

use serde_json::Value;

use crate::place::{FetchResult, Place};

/// Result lists the provider may answer with, in order of preference.
const RESULT_KEYS: [&str; 3] = ["places_results", "local_results", "results"];

/// Picks the first non-empty result list and normalizes its top entries.
pub fn normalize_response(response: &Value) -> FetchResult {
    let locations = RESULT_KEYS
        .iter()
        .filter_map(|key| response.get(key).and_then(Value::as_array))
        .find(|list| !list.is_empty());

    match locations {
        Some(list) => list.iter().map(normalize_place).collect(),
        None => FetchResult::default(),
    }
}

/// Normalizes one provider location.
///
/// Coordinates come from `gps_coordinates` when both values are present,
/// otherwise from `geometry.location`.
pub fn normalize_place(location: &Value) -> Place {
    let gps = location.get("gps_coordinates");
    let gps_lat = gps.and_then(|g| g.get("latitude")).and_then(Value::as_f64);
    let gps_lon = gps.and_then(|g| g.get("longitude")).and_then(Value::as_f64);

    let (latitude, longitude) = match (gps_lat, gps_lon) {
        (Some(lat), Some(lon)) => (Some(lat), Some(lon)),
        _ => {
            let geo = location.get("geometry").and_then(|g| g.get("location"));
            (
                geo.and_then(|g| g.get("lat")).and_then(Value::as_f64),
                geo.and_then(|g| g.get("lng")).and_then(Value::as_f64),
            )
        }
    };

    let hours = ["hours", "open_state"]
        .iter()
        .filter_map(|key| location.get(key))
        .find(|v| !v.is_null())
        .cloned();

    Place {
        name: text(location.get("title")),
        address: text(location.get("address")),
        rating: location.get("rating").and_then(Value::as_f64),
        price: text(location.get("price")),
        hours,
        latitude,
        longitude,
    }
}

fn text(value: Option<&Value>) -> Option<String> {
    match value? {
        Value::Null => None,
        Value::String(s) => Some(s.clone()),
        other => Some(other.to_string()),
    }
}
