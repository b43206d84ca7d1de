use super::{escape_html, format_number, SelectionSummary};
use crate::bands::{format_delta, TemperatureBand};
use crate::model::observation::{Observation, ObservationId};
use serde::Serialize;

const MARKER_RADIUS_PX: f64 = 8.0;
const MARKER_STROKE: &str = "#5a3822";
const MARKER_FILL_OPACITY: f64 = 0.95;

/// Circle marker for one observation, colored by temperature band.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MapMarker {
    pub id: ObservationId,
    pub lat: f64,
    pub lon: f64,
    pub radius: f64,
    pub band: TemperatureBand,
    pub fill_color: &'static str,
    pub stroke_color: &'static str,
    pub weight: u32,
    pub fill_opacity: f64,
    /// Pre-escaped HTML.
    pub popup_html: String,
    pub selection: SelectionSummary,
}

pub fn markers(observations: &[Observation]) -> Vec<MapMarker> {
    observations.iter().map(marker).collect()
}

fn marker(item: &Observation) -> MapMarker {
    let band = TemperatureBand::classify(item.temp);
    MapMarker {
        id: item.id,
        lat: item.lat,
        lon: item.lon,
        radius: MARKER_RADIUS_PX,
        band,
        fill_color: band.color(),
        stroke_color: MARKER_STROKE,
        weight: 1,
        fill_opacity: MARKER_FILL_OPACITY,
        popup_html: popup_html(item),
        selection: SelectionSummary {
            area: item.area.clone(),
            temp: format_number(item.temp),
            ndvi_delta: format_delta(item.ndvi_delta()),
        },
    }
}

fn popup_html(item: &Observation) -> String {
    let ndvi_now = item
        .ndvi_now
        .map_or_else(|| "n/a".to_string(), format_number);
    format!(
        "<strong>{}</strong><br>Temp: {} °C<br>Higher Temp: {}<br>AQI: {}<br>Green: {}%<br>NDVI now: {}<br>Notes: {}",
        escape_html(&item.area),
        format_number(item.temp),
        item.high_temp,
        format_number(item.aqi),
        format_number(item.green),
        ndvi_now,
        escape_html(&item.note),
    )
}

#[cfg(test)]
mod tests {
    use super::markers;
    use crate::bands::TemperatureBand;
    use crate::model::observation::default_observations;

    #[test]
    fn markers_follow_temperature_bands() {
        let built = markers(&default_observations());
        let bands: Vec<_> = built.iter().map(|marker| marker.band).collect();
        assert_eq!(
            bands,
            vec![
                TemperatureBand::Warm,
                TemperatureBand::Warm,
                TemperatureBand::Hot,
                TemperatureBand::Warm,
            ]
        );
        assert_eq!(built[2].fill_color, "#ff8a6a");
        assert_eq!(built[0].selection.ndvi_delta, "0.23");
    }

    #[test]
    fn popup_escapes_user_text() {
        let mut observations = default_observations();
        observations[0].note = "<script>".to_string();
        observations[0].ndvi_now = None;

        let built = markers(&observations);
        assert!(built[0].popup_html.contains("Notes: &lt;script&gt;"));
        assert!(built[0].popup_html.contains("NDVI now: n/a"));
        assert_eq!(built[0].selection.ndvi_delta, "n/a");
    }
}
