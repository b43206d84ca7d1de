//! Derived dashboard views.
//!
//! # Responsibility
//! - Turn an observation snapshot into table rows, map markers and chart data.
//!
//! # Invariants
//! - Every view is a pure function of the slice it is given; nothing here
//!   holds a reference back into the store.
//! - Views are rebuilt wholesale after each mutation, never patched.
//! - Text destined for HTML popups is escaped here, not by the renderer.

pub mod charts;
pub mod markers;
pub mod table;

use crate::model::observation::Observation;
use serde::Serialize;

pub use charts::{BarChart, ChartSet, LineChart};
pub use markers::MapMarker;
pub use table::TableRow;

/// Everything a renderer needs for one frame of the dashboard.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DashboardViews {
    pub table: Vec<TableRow>,
    pub markers: Vec<MapMarker>,
    pub charts: ChartSet,
}

impl DashboardViews {
    pub fn recompute(observations: &[Observation]) -> Self {
        Self {
            table: table::rows(observations),
            markers: markers::markers(observations),
            charts: ChartSet::from_observations(observations),
        }
    }
}

/// Details panel content shown when a marker or zone is clicked.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SelectionSummary {
    pub area: String,
    /// Temperature text, `n/a` when unknown.
    pub temp: String,
    /// NDVI decline with two decimals, `n/a` when unknown.
    pub ndvi_delta: String,
}

/// Shortest round-trip decimal, matching how the dashboard prints numbers.
pub fn format_number(value: f64) -> String {
    format!("{value}")
}

pub fn format_optional(value: Option<f64>) -> String {
    value.map(format_number).unwrap_or_default()
}

/// Escapes `& < > " '` for safe interpolation into HTML.
pub fn escape_html(value: &str) -> String {
    let mut escaped = String::with_capacity(value.len());
    for ch in value.chars() {
        match ch {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&#39;"),
            other => escaped.push(other),
        }
    }
    escaped
}
