//! Core use-case services.
//!
//! Keeps CLI and other front ends decoupled from storage details.

pub mod survey_service;
