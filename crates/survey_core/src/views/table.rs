use super::{format_number, format_optional};
use crate::model::observation::{Observation, ObservationId};
use serde::Serialize;

/// One rendered table row. Cells are display text; `id` drives the
/// remove action.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TableRow {
    /// 1-based display position.
    pub position: usize,
    pub id: ObservationId,
    pub area: String,
    pub lat: String,
    pub lon: String,
    pub temp: String,
    pub high_temp: String,
    pub aqi: String,
    pub green: String,
    pub ndvi_now: String,
    pub ndvi_past: String,
    pub note: String,
}

pub const HEADERS: [&str; 11] = [
    "#", "Area", "Lat", "Lon", "Temp", "High", "AQI", "Green", "NDVI now", "NDVI past", "Note",
];

impl TableRow {
    pub fn cells(&self) -> [String; 11] {
        [
            self.position.to_string(),
            self.area.clone(),
            self.lat.clone(),
            self.lon.clone(),
            self.temp.clone(),
            self.high_temp.clone(),
            self.aqi.clone(),
            self.green.clone(),
            self.ndvi_now.clone(),
            self.ndvi_past.clone(),
            self.note.clone(),
        ]
    }
}

pub fn rows(observations: &[Observation]) -> Vec<TableRow> {
    observations
        .iter()
        .enumerate()
        .map(|(idx, item)| TableRow {
            position: idx + 1,
            id: item.id,
            area: item.area.clone(),
            lat: format_number(item.lat),
            lon: format_number(item.lon),
            temp: format_number(item.temp),
            high_temp: item.high_temp.to_string(),
            aqi: format_number(item.aqi),
            green: format_number(item.green),
            ndvi_now: format_optional(item.ndvi_now),
            ndvi_past: format_optional(item.ndvi_past),
            note: item.note.clone(),
        })
        .collect()
}
