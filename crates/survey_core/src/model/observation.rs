//! Observation domain model.
//!
//! # Responsibility
//! - Define the canonical survey record shared by table/map/chart views.
//! - Enforce the numeric range policy applied to every persisted record.
//!
//! # Invariants
//! - `id` is stable and never reused for another observation.
//! - Numeric fields are finite; NaN never reaches storage.
//! - Wire field names match the legacy browser payload (`highTemp`, `ndvi_now`).

use serde::{Deserialize, Serialize};
use std::error::Error;
use std::fmt::{Display, Formatter};
use uuid::Uuid;

/// Stable identifier assigned when an observation is created.
pub type ObservationId = Uuid;

pub const LAT_RANGE: (f64, f64) = (-90.0, 90.0);
pub const LON_RANGE: (f64, f64) = (-180.0, 180.0);
pub const GREEN_RANGE: (f64, f64) = (0.0, 100.0);
pub const NDVI_RANGE: (f64, f64) = (-1.0, 1.0);

/// Surveyor's yes/no answer to "is it hotter here than nearby?".
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum HighTemp {
    Yes,
    #[default]
    No,
}

impl HighTemp {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Yes => "Yes",
            Self::No => "No",
        }
    }

    /// Parses `Yes`/`No` case-insensitively; no other spellings.
    pub fn parse(value: &str) -> Option<Self> {
        match value.trim().to_ascii_lowercase().as_str() {
            "yes" => Some(Self::Yes),
            "no" => Some(Self::No),
            _ => None,
        }
    }
}

impl Display for HighTemp {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One environmental survey record tied to a location.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Observation {
    pub id: ObservationId,
    /// Free-text display name of the surveyed place.
    pub area: String,
    pub lat: f64,
    pub lon: f64,
    /// Degrees Celsius.
    pub temp: f64,
    #[serde(rename = "highTemp", default)]
    pub high_temp: HighTemp,
    pub aqi: f64,
    /// Greenery cover in percent.
    pub green: f64,
    #[serde(default)]
    pub ndvi_now: Option<f64>,
    #[serde(default)]
    pub ndvi_past: Option<f64>,
    #[serde(default)]
    pub note: String,
}

impl Observation {
    /// Vegetation-index decline (`past - now`), `None` when either reading
    /// is absent.
    pub fn ndvi_delta(&self) -> Option<f64> {
        crate::bands::ndvi_delta(self.ndvi_past, self.ndvi_now)
    }

    /// Checks every field against the range policy.
    ///
    /// Collects all violations instead of stopping at the first one, so form
    /// callers can highlight every bad input at once.
    pub fn validate(&self) -> Result<(), ValidationErrors> {
        let mut errors = Vec::new();

        if self.id.is_nil() {
            errors.push(FieldError::new("id", FieldErrorKind::NilId));
        }
        if self.area.trim().is_empty() {
            errors.push(FieldError::new("area", FieldErrorKind::Missing));
        }

        check_range(&mut errors, "lat", self.lat, Some(LAT_RANGE));
        check_range(&mut errors, "lon", self.lon, Some(LON_RANGE));
        check_range(&mut errors, "temp", self.temp, None);
        check_range(&mut errors, "aqi", self.aqi, Some((0.0, f64::INFINITY)));
        check_range(&mut errors, "green", self.green, Some(GREEN_RANGE));
        if let Some(value) = self.ndvi_now {
            check_range(&mut errors, "ndvi_now", value, Some(NDVI_RANGE));
        }
        if let Some(value) = self.ndvi_past {
            check_range(&mut errors, "ndvi_past", value, Some(NDVI_RANGE));
        }

        if errors.is_empty() {
            Ok(())
        } else {
            Err(ValidationErrors(errors))
        }
    }
}

fn check_range(
    errors: &mut Vec<FieldError>,
    field: &'static str,
    value: f64,
    range: Option<(f64, f64)>,
) {
    if !value.is_finite() {
        errors.push(FieldError::new(field, FieldErrorKind::NotFinite));
        return;
    }
    if let Some((min, max)) = range {
        if value < min || value > max {
            errors.push(FieldError::new(
                field,
                FieldErrorKind::OutOfRange { value, min, max },
            ));
        }
    }
}

/// Reason a single field was rejected.
#[derive(Debug, Clone, PartialEq)]
pub enum FieldErrorKind {
    Missing,
    NilId,
    NotANumber(String),
    NotFinite,
    OutOfRange { value: f64, min: f64, max: f64 },
    InvalidChoice(String),
}

/// One rejected field.
#[derive(Debug, Clone, PartialEq)]
pub struct FieldError {
    pub field: &'static str,
    pub kind: FieldErrorKind,
}

impl FieldError {
    pub fn new(field: &'static str, kind: FieldErrorKind) -> Self {
        Self { field, kind }
    }
}

impl Display for FieldError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match &self.kind {
            FieldErrorKind::Missing => write!(f, "{} is required", self.field),
            FieldErrorKind::NilId => write!(f, "{} must not be nil", self.field),
            FieldErrorKind::NotANumber(raw) => {
                write!(f, "{} must be a number, got `{raw}`", self.field)
            }
            FieldErrorKind::NotFinite => write!(f, "{} must be a finite number", self.field),
            FieldErrorKind::OutOfRange { value, min, max } if max.is_infinite() => {
                write!(f, "{} ({value}) must be >= {min}", self.field)
            }
            FieldErrorKind::OutOfRange { value, min, max } => {
                write!(f, "{} ({value}) must be within [{min}, {max}]", self.field)
            }
            FieldErrorKind::InvalidChoice(raw) => {
                write!(f, "{} must be Yes or No, got `{raw}`", self.field)
            }
        }
    }
}

/// Non-empty set of field errors produced by one validation pass.
#[derive(Debug, Clone, PartialEq)]
pub struct ValidationErrors(pub Vec<FieldError>);

impl ValidationErrors {
    pub fn fields(&self) -> impl Iterator<Item = &'static str> + '_ {
        self.0.iter().map(|error| error.field)
    }

    pub fn contains_field(&self, field: &str) -> bool {
        self.0.iter().any(|error| error.field == field)
    }
}

impl Display for ValidationErrors {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        for (idx, error) in self.0.iter().enumerate() {
            if idx > 0 {
                f.write_str("; ")?;
            }
            write!(f, "{error}")?;
        }
        Ok(())
    }
}

impl Error for ValidationErrors {}

/// Ids of the seeded demo entries; stable so that removing a default entry
/// by id works before anything has been persisted.
const DEFAULT_IDS: [u128; 4] = [
    0x00000000_0000_4000_8000_000000000001,
    0x00000000_0000_4000_8000_000000000002,
    0x00000000_0000_4000_8000_000000000003,
    0x00000000_0000_4000_8000_000000000004,
];

/// Returns the four demo observations shown on first run and after reset.
pub fn default_observations() -> Vec<Observation> {
    let rows: [(&str, f64, f64, f64, HighTemp, f64, f64, f64, f64, &str); 4] = [
        (
            "St. Francis School (Mangalagiri)",
            16.426194,
            80.566196,
            34.5,
            HighTemp::Yes,
            118.0,
            22.0,
            0.39,
            0.62,
            "Playground exposed",
        ),
        (
            "Vijeta High School",
            16.413359,
            80.604022,
            33.8,
            HighTemp::No,
            125.0,
            28.0,
            0.41,
            0.58,
            "Near main road",
        ),
        (
            "Market Road - Vijayawada",
            16.506174,
            80.648015,
            36.2,
            HighTemp::Yes,
            160.0,
            8.0,
            0.18,
            0.45,
            "Traffic hotspot",
        ),
        (
            "Residential Block A",
            16.42,
            80.58,
            32.3,
            HighTemp::No,
            95.0,
            50.0,
            0.55,
            0.68,
            "Shaded street",
        ),
    ];

    rows.into_iter()
        .zip(DEFAULT_IDS)
        .map(
            |((area, lat, lon, temp, high_temp, aqi, green, now, past, note), id)| Observation {
                id: Uuid::from_u128(id),
                area: area.to_string(),
                lat,
                lon,
                temp,
                high_temp,
                aqi,
                green,
                ndvi_now: Some(now),
                ndvi_past: Some(past),
                note: note.to_string(),
            },
        )
        .collect()
}

#[cfg(test)]
mod tests {
    use super::{default_observations, FieldErrorKind, HighTemp};

    #[test]
    fn defaults_are_valid_and_have_distinct_ids() {
        let defaults = default_observations();
        assert_eq!(defaults.len(), 4);
        for item in &defaults {
            item.validate().expect("default entries must validate");
        }
        assert_ne!(defaults[0].id, defaults[1].id);
        assert_eq!(defaults, default_observations());
    }

    #[test]
    fn high_temp_parse_is_case_insensitive() {
        assert_eq!(HighTemp::parse(" YES "), Some(HighTemp::Yes));
        assert_eq!(HighTemp::parse("no"), Some(HighTemp::No));
        assert_eq!(HighTemp::parse("maybe"), None);
        assert_eq!(HighTemp::parse("y"), None);
        assert_eq!(HighTemp::parse("N"), None);
    }

    #[test]
    fn validate_reports_every_bad_field() {
        let mut item = default_observations().remove(0);
        item.area = "   ".to_string();
        item.lat = 120.0;
        item.temp = f64::NAN;
        item.ndvi_now = Some(1.5);

        let errors = item.validate().expect_err("invalid record must be rejected");
        let fields: Vec<_> = errors.fields().collect();
        assert_eq!(fields, vec!["area", "lat", "temp", "ndvi_now"]);
        assert_eq!(errors.0[2].kind, FieldErrorKind::NotFinite);
    }

    #[test]
    fn absent_ndvi_is_not_validated() {
        let mut item = default_observations().remove(0);
        item.ndvi_now = None;
        item.ndvi_past = None;
        assert!(item.validate().is_ok());
        assert_eq!(item.ndvi_delta(), None);
    }
}
