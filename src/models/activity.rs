// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@kernel.org>

//! Strava activity record as stored in the local ledger.

use serde::{Deserialize, Deserializer, Serialize, Serializer};
use serde_json::{Map, Value};

/// One activity in the ledger.
///
/// Field names follow the Strava summary-activity JSON so the cache file is a
/// lossless copy of what the API returned; fields this crate does not use are
/// carried in `extra`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ActivityRecord {
    /// Strava activity ID (primary key of the ledger)
    pub id: u64,
    /// Activity title
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    /// Activity type (Run, Ride, Hike, etc.)
    #[serde(rename = "type", default, deserialize_with = "null_as_default")]
    pub kind: String,
    /// Local wall-clock start, `YYYY-MM-DDTHH:MM:SSZ`
    #[serde(
        rename = "start_date_local",
        default,
        deserialize_with = "null_as_default"
    )]
    pub start_time_local: String,
    /// Distance in meters
    #[serde(rename = "distance", default, deserialize_with = "null_as_default")]
    pub distance_meters: f64,
    /// Time in motion, seconds
    #[serde(rename = "moving_time", default, deserialize_with = "null_as_default")]
    pub moving_time_seconds: u64,
    /// Start point, if the activity has GPS
    #[serde(
        rename = "start_latlng",
        default,
        serialize_with = "serialize_latlng",
        deserialize_with = "deserialize_latlng"
    )]
    pub start_lat_lon: Option<LatLon>,
    /// Map data carrying the encoded route
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub map: Option<ActivityMap>,
    /// Every other field the remote service sent
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl ActivityRecord {
    /// Minimal record, mostly for tests and fixtures.
    pub fn new(id: u64, kind: &str, start_time_local: &str) -> Self {
        Self {
            id,
            name: None,
            kind: kind.to_string(),
            start_time_local: start_time_local.to_string(),
            distance_meters: 0.0,
            moving_time_seconds: 0,
            start_lat_lon: None,
            map: None,
            extra: Map::new(),
        }
    }

    /// Encoded summary polyline, opaque to this crate.
    pub fn summary_polyline(&self) -> Option<&str> {
        self.map.as_ref()?.summary_polyline.as_deref()
    }
}

/// Activity map data.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct ActivityMap {
    #[serde(default)]
    pub summary_polyline: Option<String>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// Latitude/longitude pair, stored as `[lat, lon]`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LatLon {
    pub lat: f64,
    pub lon: f64,
}

/// `null` reads as the field's default. Records left with an empty start are
/// skipped when a year is selected.
fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

/// Strava sends `[]` or `null` for activities without GPS.
fn deserialize_latlng<'de, D>(deserializer: D) -> Result<Option<LatLon>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw: Option<Vec<f64>> = Option::deserialize(deserializer)?;
    Ok(match raw.as_deref() {
        Some([lat, lon]) => Some(LatLon {
            lat: *lat,
            lon: *lon,
        }),
        _ => None,
    })
}

fn serialize_latlng<S>(value: &Option<LatLon>, serializer: S) -> Result<S::Ok, S::Error>
where
    S: Serializer,
{
    match value {
        Some(p) => [p.lat, p.lon].serialize(serializer),
        None => serializer.serialize_none(),
    }
}
