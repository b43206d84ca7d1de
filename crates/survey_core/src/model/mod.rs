//! Survey domain model.
//!
//! # Responsibility
//! - Define the observation record persisted by the store.
//! - Define the read-only zone fixture used by the choropleth overlay.
//! - Validate raw form input before it can become an observation.
//!
//! # Invariants
//! - Every observation is identified by a stable `ObservationId`.
//! - Absent vegetation-index readings are `None`, never a sentinel number.

pub mod draft;
pub mod observation;
pub mod zone;
