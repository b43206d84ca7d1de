//! Choropleth overlay over the fixed demo zones.
//!
//! # Responsibility
//! - Hold the zone fixture and the active display mode.
//! - Produce one fill style per zone for the active mode.
//!
//! # Invariants
//! - Zones are never mutated; switching mode only changes computed styles.
//! - Independent of the observation store.

use crate::bands::{format_delta, DeclineBand, TemperatureBand};
use crate::model::zone::{demo_zones, Zone};
use crate::views::{format_number, SelectionSummary};
use log::debug;
use serde::Serialize;
use std::fmt::{Display, Formatter};
use std::str::FromStr;

const ZONE_STROKE: &str = "#8a4b22";
const ZONE_HIGHLIGHT_STROKE: &str = "#3b2a20";
const NDVI_FILL_OPACITY: f64 = 0.9;
const TEMPERATURE_FILL_OPACITY: f64 = 0.95;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum OverlayMode {
    /// Color by vegetation-index decline.
    #[default]
    Ndvi,
    /// Color by current zone temperature.
    Temperature,
}

impl OverlayMode {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Ndvi => "ndvi",
            Self::Temperature => "temperature",
        }
    }
}

impl Display for OverlayMode {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for OverlayMode {
    type Err = String;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.trim().to_ascii_lowercase().as_str() {
            "ndvi" => Ok(Self::Ndvi),
            "temperature" | "temp" => Ok(Self::Temperature),
            other => Err(format!(
                "unsupported overlay mode `{other}`; expected ndvi|temperature"
            )),
        }
    }
}

/// Fill/stroke for one zone polygon.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ZoneStyle {
    pub zone: String,
    pub stroke_color: &'static str,
    pub weight: u32,
    pub fill_color: &'static str,
    pub fill_opacity: f64,
}

/// Stroke override applied while the pointer hovers a zone.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct HighlightStyle {
    pub stroke_color: &'static str,
    pub weight: u32,
}

pub struct StaticOverlay {
    zones: Vec<Zone>,
    mode: OverlayMode,
}

impl Default for StaticOverlay {
    fn default() -> Self {
        Self::new(demo_zones())
    }
}

impl StaticOverlay {
    pub fn new(zones: Vec<Zone>) -> Self {
        Self {
            zones,
            mode: OverlayMode::default(),
        }
    }

    pub fn zones(&self) -> &[Zone] {
        &self.zones
    }

    pub fn mode(&self) -> OverlayMode {
        self.mode
    }

    /// Switches the coloring mode; the next `styles()` call reflects it.
    pub fn set_mode(&mut self, mode: OverlayMode) {
        if self.mode != mode {
            debug!(
                "event=overlay_mode module=overlay status=ok from={} to={}",
                self.mode, mode
            );
        }
        self.mode = mode;
    }

    pub fn styles(&self) -> Vec<ZoneStyle> {
        self.zones.iter().map(|zone| self.style_for(zone)).collect()
    }

    pub fn style_for(&self, zone: &Zone) -> ZoneStyle {
        let (fill_color, fill_opacity) = match self.mode {
            OverlayMode::Ndvi => (
                DeclineBand::classify_or_low(zone.ndvi_delta()).color(),
                NDVI_FILL_OPACITY,
            ),
            // Unknown temperature renders as the coolest band.
            OverlayMode::Temperature => (
                zone.temp_now
                    .map_or(TemperatureBand::Cool, TemperatureBand::classify)
                    .color(),
                TEMPERATURE_FILL_OPACITY,
            ),
        };

        ZoneStyle {
            zone: zone.name.clone(),
            stroke_color: ZONE_STROKE,
            weight: 1,
            fill_color,
            fill_opacity,
        }
    }

    pub fn highlight_style(&self) -> HighlightStyle {
        HighlightStyle {
            stroke_color: ZONE_HIGHLIGHT_STROKE,
            weight: 2,
        }
    }

    pub fn zone_summary(&self, name: &str) -> Option<SelectionSummary> {
        self.zones
            .iter()
            .find(|zone| zone.name == name)
            .map(summarize)
    }

    /// First zone whose boundary contains the point.
    pub fn zone_at(&self, lon: f64, lat: f64) -> Option<&Zone> {
        self.zones.iter().find(|zone| zone.contains(lon, lat))
    }
}

fn summarize(zone: &Zone) -> SelectionSummary {
    SelectionSummary {
        area: zone.name.clone(),
        temp: zone
            .temp_now
            .map_or_else(|| "n/a".to_string(), format_number),
        ndvi_delta: format_delta(zone.ndvi_delta()),
    }
}
