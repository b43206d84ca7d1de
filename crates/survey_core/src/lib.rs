//! Core logic for the city environmental survey dashboard.
//! This crate is the single source of truth for observation invariants.

pub mod bands;
pub mod db;
pub mod export;
pub mod logging;
pub mod model;
pub mod overlay;
pub mod repo;
pub mod service;
pub mod storage;
pub mod views;

pub use bands::{ndvi_delta, DeclineBand, GreeneryBand, TemperatureBand};
pub use export::{to_csv, write_csv, CSV_FILE_NAME};
pub use logging::{default_log_level, init_logging, logging_status, LoggingError};
pub use model::draft::ObservationDraft;
pub use model::observation::{
    default_observations, FieldError, FieldErrorKind, HighTemp, Observation, ObservationId,
    ValidationErrors,
};
pub use model::zone::{demo_zones, Zone};
pub use overlay::{OverlayMode, StaticOverlay, ZoneStyle};
pub use repo::observation_repo::{ObservationStore, StoreError, StoreResult, STORAGE_KEY};
pub use service::survey_service::{DashboardSnapshot, ExportError, Removal, SurveyService};
pub use storage::{KeyValueStore, MemoryStore, SqliteStore, StorageError};
pub use views::{DashboardViews, SelectionSummary};

/// Returns the core crate version.
pub fn core_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}
