//! CSV export of the observation sequence.
//!
//! # Invariants
//! - Field order is fixed: area, lat, lon, temp, highTemp, aqi, green,
//!   ndvi_now, ndvi_past, note.
//! - Text fields are always quoted with embedded quotes doubled.
//! - Absent NDVI readings export as empty cells.

use crate::model::observation::Observation;
use crate::views::{format_number, format_optional};
use log::info;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};

pub const CSV_FILE_NAME: &str = "vijayawada_survey.csv";
pub const CSV_HEADER: &str = "Area,Lat,Lon,Temp,HighTemp,AQI,Green,NDVI_now,NDVI_past,Note";

/// Renders the header plus one `\n`-terminated line per observation.
pub fn to_csv(observations: &[Observation]) -> String {
    let mut csv = String::with_capacity(CSV_HEADER.len() + 1 + observations.len() * 96);
    csv.push_str(CSV_HEADER);
    csv.push('\n');

    for item in observations {
        let fields = [
            quote(&item.area),
            format_number(item.lat),
            format_number(item.lon),
            format_number(item.temp),
            item.high_temp.to_string(),
            format_number(item.aqi),
            format_number(item.green),
            format_optional(item.ndvi_now),
            format_optional(item.ndvi_past),
            quote(&item.note),
        ];
        csv.push_str(&fields.join(","));
        csv.push('\n');
    }

    csv
}

/// Writes [`CSV_FILE_NAME`] into `dir`, creating the directory if needed.
pub fn write_csv(dir: &Path, observations: &[Observation]) -> io::Result<PathBuf> {
    fs::create_dir_all(dir)?;
    let path = dir.join(CSV_FILE_NAME);
    fs::write(&path, to_csv(observations))?;
    info!(
        "event=csv_export module=export status=ok rows={}",
        observations.len()
    );
    Ok(path)
}

fn quote(value: &str) -> String {
    format!("\"{}\"", value.replace('"', "\"\""))
}

#[cfg(test)]
mod tests {
    use super::{quote, to_csv, CSV_HEADER};
    use crate::model::observation::default_observations;

    #[test]
    fn quote_doubles_embedded_quotes() {
        assert_eq!(quote(r#"say "hi""#), r#""say ""hi""""#);
        assert_eq!(quote(""), r#""""#);
    }

    #[test]
    fn first_fixture_row_matches_dashboard_export() {
        let csv = to_csv(&default_observations());
        let mut lines = csv.lines();
        assert_eq!(lines.next(), Some(CSV_HEADER));
        assert_eq!(
            lines.next(),
            Some(r#""St. Francis School (Mangalagiri)",16.426194,80.566196,34.5,Yes,118,22,0.39,0.62,"Playground exposed""#)
        );
    }

    #[test]
    fn empty_sequence_exports_header_only() {
        assert_eq!(to_csv(&[]), format!("{CSV_HEADER}\n"));
    }
}
