//! Severity bucketing shared by markers, charts and the zone overlay.
//!
//! # Responsibility
//! - Map continuous readings to a small set of named classes.
//! - Own the palette so every view colors a class the same way.
//!
//! # Invariants
//! - Boundaries are inclusive on the cooler/greener/lower-decline side:
//!   `t <= 32` is cool, `g >= 50` is high, `delta <= 0.05` is low.
//! - Absent NDVI readings are surfaced as `None`; callers pick the fallback.

use serde::Serialize;

const COOL_MAX_C: f64 = 32.0;
const WARM_MAX_C: f64 = 35.0;
const GREEN_HIGH_MIN_PCT: f64 = 50.0;
const GREEN_MEDIUM_MIN_PCT: f64 = 25.0;
const DECLINE_LOW_MAX: f64 = 0.05;
const DECLINE_MID_MAX: f64 = 0.18;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum TemperatureBand {
    Cool,
    Warm,
    Hot,
}

impl TemperatureBand {
    pub fn classify(temp_c: f64) -> Self {
        if temp_c <= COOL_MAX_C {
            Self::Cool
        } else if temp_c <= WARM_MAX_C {
            Self::Warm
        } else {
            Self::Hot
        }
    }

    pub fn color(self) -> &'static str {
        match self {
            Self::Cool => "#ffdba8",
            Self::Warm => "#ffb56b",
            Self::Hot => "#ff8a6a",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum GreeneryBand {
    High,
    Medium,
    Low,
}

impl GreeneryBand {
    pub fn classify(green_pct: f64) -> Self {
        if green_pct >= GREEN_HIGH_MIN_PCT {
            Self::High
        } else if green_pct >= GREEN_MEDIUM_MIN_PCT {
            Self::Medium
        } else {
            Self::Low
        }
    }

    pub fn color(self) -> &'static str {
        match self {
            Self::High => "#c8f7d9",
            Self::Medium => "#ffe8c9",
            Self::Low => "#ffd6d0",
        }
    }
}

/// Vegetation-index decline class for `past - now`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum DeclineBand {
    Low,
    Mid,
    High,
}

impl DeclineBand {
    pub fn classify(delta: f64) -> Self {
        if delta <= DECLINE_LOW_MAX {
            Self::Low
        } else if delta <= DECLINE_MID_MAX {
            Self::Mid
        } else {
            Self::High
        }
    }

    /// Classifies a possibly-unknown delta, treating "unknown" as no decline.
    ///
    /// This is the overlay's policy for zones missing a reading; use
    /// [`classify`](Self::classify) directly when absence must be shown.
    pub fn classify_or_low(delta: Option<f64>) -> Self {
        delta.map_or(Self::Low, Self::classify)
    }

    pub fn color(self) -> &'static str {
        match self {
            Self::Low => "#dff7ee",
            Self::Mid => "#ffe8c9",
            Self::High => "#ffd6d0",
        }
    }
}

/// Returns `past - now`, or `None` when either reading is absent.
pub fn ndvi_delta(past: Option<f64>, now: Option<f64>) -> Option<f64> {
    match (past, now) {
        (Some(past), Some(now)) => Some(past - now),
        _ => None,
    }
}

/// Formats a delta to two decimals, `n/a` when unknown.
pub fn format_delta(delta: Option<f64>) -> String {
    delta.map_or_else(|| "n/a".to_string(), |value| format!("{value:.2}"))
}

#[cfg(test)]
mod tests {
    use super::{format_delta, ndvi_delta, DeclineBand, GreeneryBand, TemperatureBand};

    #[test]
    fn temperature_boundaries() {
        assert_eq!(TemperatureBand::classify(32.0), TemperatureBand::Cool);
        assert_eq!(TemperatureBand::classify(32.1), TemperatureBand::Warm);
        assert_eq!(TemperatureBand::classify(35.0), TemperatureBand::Warm);
        assert_eq!(TemperatureBand::classify(35.1), TemperatureBand::Hot);
    }

    #[test]
    fn greenery_boundaries() {
        assert_eq!(GreeneryBand::classify(50.0), GreeneryBand::High);
        assert_eq!(GreeneryBand::classify(49.9), GreeneryBand::Medium);
        assert_eq!(GreeneryBand::classify(25.0), GreeneryBand::Medium);
        assert_eq!(GreeneryBand::classify(24.9), GreeneryBand::Low);
    }

    #[test]
    fn decline_from_fixture_readings() {
        let classify = |past, now| DeclineBand::classify_or_low(ndvi_delta(Some(past), Some(now)));
        assert_eq!(classify(0.62, 0.39), DeclineBand::High);
        assert_eq!(classify(0.58, 0.41), DeclineBand::Mid);
        assert_eq!(classify(0.68, 0.55), DeclineBand::Mid);
        assert_eq!(classify(0.72, 0.68), DeclineBand::Low);
    }

    #[test]
    fn missing_reading_is_low_decline() {
        assert_eq!(ndvi_delta(None, Some(0.4)), None);
        assert_eq!(ndvi_delta(Some(0.4), None), None);
        assert_eq!(DeclineBand::classify_or_low(None), DeclineBand::Low);
    }

    #[test]
    fn format_delta_uses_two_decimals() {
        assert_eq!(format_delta(Some(0.62 - 0.39)), "0.23");
        assert_eq!(format_delta(None), "n/a");
    }
}
