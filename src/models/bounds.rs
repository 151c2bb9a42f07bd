// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@kernel.org>

//! Rectangular geofence for the main summary map.

use std::str::FromStr;

use geo::{coord, Intersects, Rect};
use serde::{Deserialize, Serialize};

use crate::models::LatLon;

/// Lon/lat rectangle, serialized as `[[minLon, minLat], [maxLon, maxLat]]`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(from = "[[f64; 2]; 2]", into = "[[f64; 2]; 2]")]
pub struct BoundingBox {
    pub min_lon: f64,
    pub min_lat: f64,
    pub max_lon: f64,
    pub max_lat: f64,
}

impl Default for BoundingBox {
    /// Cardiff and surroundings.
    fn default() -> Self {
        Self {
            min_lon: -3.32322,
            min_lat: 51.38586,
            max_lon: -3.14065,
            max_lat: 51.51634,
        }
    }
}

impl BoundingBox {
    pub fn new(min_lon: f64, min_lat: f64, max_lon: f64, max_lat: f64) -> Self {
        Self {
            min_lon,
            min_lat,
            max_lon,
            max_lat,
        }
    }

    fn rect(&self) -> Rect<f64> {
        Rect::new(
            coord! { x: self.min_lon, y: self.min_lat },
            coord! { x: self.max_lon, y: self.max_lat },
        )
    }

    /// Inclusive on every edge.
    pub fn contains(&self, point: LatLon) -> bool {
        self.rect()
            .intersects(&coord! { x: point.lon, y: point.lat })
    }
}

impl From<[[f64; 2]; 2]> for BoundingBox {
    fn from([[min_lon, min_lat], [max_lon, max_lat]]: [[f64; 2]; 2]) -> Self {
        Self::new(min_lon, min_lat, max_lon, max_lat)
    }
}

impl From<BoundingBox> for [[f64; 2]; 2] {
    fn from(b: BoundingBox) -> Self {
        [[b.min_lon, b.min_lat], [b.max_lon, b.max_lat]]
    }
}

/// Parses `minLon,minLat,maxLon,maxLat`.
impl FromStr for BoundingBox {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let values = s
            .split(',')
            .map(|part| part.trim().parse::<f64>())
            .collect::<Result<Vec<_>, _>>()
            .map_err(|e| format!("expected four numbers: {}", e))?;

        let [min_lon, min_lat, max_lon, max_lat] = values[..] else {
            return Err(format!(
                "expected minLon,minLat,maxLon,maxLat, got {} values",
                values.len()
            ));
        };

        if min_lon > max_lon || min_lat > max_lat {
            return Err("minimum corner must not exceed maximum corner".to_string());
        }

        Ok(Self::new(min_lon, min_lat, max_lon, max_lat))
    }
}
