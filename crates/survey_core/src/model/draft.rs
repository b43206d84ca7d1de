//! Raw form input and its validation into an `Observation`.
//!
//! # Responsibility
//! - Hold the survey form exactly as typed (every field is text).
//! - Parse and range-check it into a new `Observation` with a fresh id.
//!
//! # Invariants
//! - An invalid draft never yields an `Observation`.
//! - Empty NDVI inputs mean "not measured", not zero.

use crate::model::observation::{
    FieldError, FieldErrorKind, HighTemp, Observation, ValidationErrors,
};
use once_cell::sync::Lazy;
use regex::Regex;
use uuid::Uuid;

static WHITESPACE_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"\s+").expect("valid ws regex"));

/// Survey form fields as entered by the surveyor.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ObservationDraft {
    pub area: String,
    pub lat: String,
    pub lon: String,
    pub temp: String,
    /// Empty means `No`.
    pub high_temp: String,
    pub aqi: String,
    pub green: String,
    pub ndvi_now: String,
    pub ndvi_past: String,
    pub note: String,
}

impl ObservationDraft {
    /// Validates the draft and builds a new observation with a generated id.
    ///
    /// # Errors
    /// - Returns every field that is missing, non-numeric, non-finite or out
    ///   of range; see `Observation::validate` for the range policy.
    pub fn validate(&self) -> Result<Observation, ValidationErrors> {
        self.validate_with_id(Uuid::new_v4())
    }

    /// Same as [`validate`](Self::validate) but with a caller-provided id.
    pub fn validate_with_id(&self, id: Uuid) -> Result<Observation, ValidationErrors> {
        let mut errors = Vec::new();

        let lat = parse_required(&mut errors, "lat", &self.lat);
        let lon = parse_required(&mut errors, "lon", &self.lon);
        let temp = parse_required(&mut errors, "temp", &self.temp);
        let aqi = parse_required(&mut errors, "aqi", &self.aqi);
        let green = parse_required(&mut errors, "green", &self.green);
        let ndvi_now = parse_optional(&mut errors, "ndvi_now", &self.ndvi_now);
        let ndvi_past = parse_optional(&mut errors, "ndvi_past", &self.ndvi_past);

        let high_temp = if self.high_temp.trim().is_empty() {
            HighTemp::No
        } else {
            HighTemp::parse(&self.high_temp).unwrap_or_else(|| {
                errors.push(FieldError::new(
                    "highTemp",
                    FieldErrorKind::InvalidChoice(self.high_temp.trim().to_string()),
                ));
                HighTemp::No
            })
        };

        // Parse failures already recorded; range checks would only repeat them.
        if !errors.is_empty() {
            if self.area.trim().is_empty() {
                errors.insert(0, FieldError::new("area", FieldErrorKind::Missing));
            }
            return Err(ValidationErrors(errors));
        }

        let observation = Observation {
            id,
            area: normalize_area(&self.area),
            lat: lat.unwrap_or_default(),
            lon: lon.unwrap_or_default(),
            temp: temp.unwrap_or_default(),
            high_temp,
            aqi: aqi.unwrap_or_default(),
            green: green.unwrap_or_default(),
            ndvi_now: ndvi_now.flatten(),
            ndvi_past: ndvi_past.flatten(),
            note: self.note.trim().to_string(),
        };
        observation.validate()?;
        Ok(observation)
    }
}

/// Collapses internal whitespace runs so the same place typed twice renders
/// identically in table and chart labels.
pub fn normalize_area(raw: &str) -> String {
    WHITESPACE_RE.replace_all(raw.trim(), " ").into_owned()
}

fn parse_required(errors: &mut Vec<FieldError>, field: &'static str, raw: &str) -> Option<f64> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        errors.push(FieldError::new(field, FieldErrorKind::Missing));
        return None;
    }
    parse_number(errors, field, trimmed)
}

/// Returns `Some(None)` for an empty input, `None` when parsing failed.
fn parse_optional(
    errors: &mut Vec<FieldError>,
    field: &'static str,
    raw: &str,
) -> Option<Option<f64>> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return Some(None);
    }
    parse_number(errors, field, trimmed).map(Some)
}

fn parse_number(errors: &mut Vec<FieldError>, field: &'static str, raw: &str) -> Option<f64> {
    match raw.parse::<f64>() {
        Ok(value) if value.is_finite() => Some(value),
        Ok(_) => {
            errors.push(FieldError::new(field, FieldErrorKind::NotFinite));
            None
        }
        Err(_) => {
            errors.push(FieldError::new(
                field,
                FieldErrorKind::NotANumber(raw.to_string()),
            ));
            None
        }
    }
}
