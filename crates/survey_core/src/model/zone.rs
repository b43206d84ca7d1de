//! Zone fixture for the choropleth overlay.
//!
//! Zones are demo data compiled into the binary; nothing mutates them.

use serde::{Deserialize, Serialize};

/// A fixed polygon region with precomputed vegetation and temperature values.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Zone {
    pub name: String,
    /// Closed ring of `[lon, lat]` points; first point equals last.
    pub boundary: Vec<[f64; 2]>,
    pub ndvi_past: Option<f64>,
    pub ndvi_now: Option<f64>,
    /// Current temperature in degrees Celsius.
    pub temp_now: Option<f64>,
}

impl Zone {
    /// Axis-aligned rectangle zone, closed ring in counter-clockwise order
    /// starting at the north-west corner.
    fn rect(
        name: &str,
        (west, east): (f64, f64),
        (north, south): (f64, f64),
        ndvi_past: f64,
        ndvi_now: f64,
        temp_now: f64,
    ) -> Self {
        Self {
            name: name.to_string(),
            boundary: vec![
                [west, north],
                [east, north],
                [east, south],
                [west, south],
                [west, north],
            ],
            ndvi_past: Some(ndvi_past),
            ndvi_now: Some(ndvi_now),
            temp_now: Some(temp_now),
        }
    }

    pub fn ndvi_delta(&self) -> Option<f64> {
        crate::bands::ndvi_delta(self.ndvi_past, self.ndvi_now)
    }

    /// Even-odd ray cast against the boundary ring.
    pub fn contains(&self, lon: f64, lat: f64) -> bool {
        let ring = &self.boundary;
        if ring.len() < 3 {
            return false;
        }
        let mut inside = false;
        let mut j = ring.len() - 1;
        for i in 0..ring.len() {
            let [xi, yi] = ring[i];
            let [xj, yj] = ring[j];
            if (yi > lat) != (yj > lat) && lon < (xj - xi) * (lat - yi) / (yj - yi) + xi {
                inside = !inside;
            }
            j = i;
        }
        inside
    }
}

/// Returns the six demo zones around Mangalagiri and Vijayawada.
pub fn demo_zones() -> Vec<Zone> {
    vec![
        Zone::rect(
            "Mangalagiri North",
            (80.565, 80.575),
            (16.428, 16.421),
            0.62,
            0.39,
            34.5,
        ),
        Zone::rect(
            "Mangalagiri South",
            (80.565, 80.575),
            (16.421, 16.414),
            0.58,
            0.41,
            33.8,
        ),
        Zone::rect(
            "Vijayawada Central",
            (80.642, 80.652),
            (16.503, 16.493),
            0.48,
            0.22,
            36.2,
        ),
        Zone::rect(
            "Market Area",
            (80.645, 80.655),
            (16.510, 16.500),
            0.45,
            0.18,
            36.8,
        ),
        Zone::rect(
            "Residential Block A",
            (80.580, 80.590),
            (16.420, 16.410),
            0.68,
            0.55,
            32.3,
        ),
        Zone::rect(
            "Park Zone",
            (80.600, 80.610),
            (16.450, 16.440),
            0.72,
            0.68,
            30.8,
        ),
    ]
}
