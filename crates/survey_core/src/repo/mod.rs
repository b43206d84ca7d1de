//! Persistence-facing repositories.
//!
//! # Invariants
//! - Repository writes enforce `Observation::validate()` before persistence.
//! - Repository APIs return semantic errors (`NotFound`, `IndexOutOfRange`)
//!   in addition to backend errors.

pub mod observation_repo;
