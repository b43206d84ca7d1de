//! Observation store over an injected key-value backend.
//!
//! # Responsibility
//! - Own the ordered observation sequence persisted under one key.
//! - Provide load/save/append/remove/reset with total-replace writes.
//!
//! # Invariants
//! - New entries pass `Observation::validate()` before touching the backend;
//!   records already persisted are loaded as stored, without range checks.
//! - A missing key means "first run": `load()` returns the demo defaults.
//! - Unreadable persisted data is logged and treated as missing, and is never
//!   overwritten by a read.
//! - `load()` writes back only to stamp ids on legacy records, keeping every
//!   stored element, including ones it could not decode.
//! - Insertion order is display order; removal preserves the order of the rest.
//! - Load-modify-save is not atomic; callers must serialize mutations.

use crate::model::observation::{
    default_observations, Observation, ObservationId, ValidationErrors,
};
use crate::storage::{KeyValueStore, StorageError};
use log::{info, warn};
use serde::Deserialize;
use serde_json::Value;
use std::error::Error;
use std::fmt::{Display, Formatter};
use uuid::Uuid;

/// Key used by the original browser dashboard; kept so exported local
/// storage dumps load unchanged.
pub const STORAGE_KEY: &str = "csp_vijayawada_softwarm_v1";

pub type StoreResult<T> = Result<T, StoreError>;

#[derive(Debug)]
pub enum StoreError {
    Storage(StorageError),
    Serialization(serde_json::Error),
    Validation(ValidationErrors),
    NotFound(ObservationId),
    DuplicateId(ObservationId),
    IndexOutOfRange { index: usize, len: usize },
}

impl Display for StoreError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Storage(err) => write!(f, "{err}"),
            Self::Serialization(err) => write!(f, "failed to encode observations: {err}"),
            Self::Validation(err) => write!(f, "invalid observation: {err}"),
            Self::NotFound(id) => write!(f, "observation not found: {id}"),
            Self::DuplicateId(id) => write!(f, "observation already exists: {id}"),
            Self::IndexOutOfRange { index, len } => write!(
                f,
                "observation index {index} out of range for {len} observations"
            ),
        }
    }
}

impl Error for StoreError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Storage(err) => Some(err),
            Self::Serialization(err) => Some(err),
            Self::Validation(err) => Some(err),
            _ => None,
        }
    }
}

impl From<StorageError> for StoreError {
    fn from(value: StorageError) -> Self {
        Self::Storage(value)
    }
}

impl From<ValidationErrors> for StoreError {
    fn from(value: ValidationErrors) -> Self {
        Self::Validation(value)
    }
}

impl From<serde_json::Error> for StoreError {
    fn from(value: serde_json::Error) -> Self {
        Self::Serialization(value)
    }
}

/// Sole owner of the persisted observation sequence.
pub struct ObservationStore<S: KeyValueStore> {
    backend: S,
    key: String,
}

impl<S: KeyValueStore> ObservationStore<S> {
    /// Creates a store using the default dashboard key.
    pub fn new(backend: S) -> Self {
        Self::with_key(backend, STORAGE_KEY)
    }

    pub fn with_key(backend: S, key: impl Into<String>) -> Self {
        Self {
            backend,
            key: key.into(),
        }
    }

    pub fn key(&self) -> &str {
        &self.key
    }

    /// Returns the persisted sequence, or the demo defaults on first run.
    ///
    /// Records written by the legacy page carry no `id`; they get one here and
    /// the stamped payload is written back so ids stay stable. Elements that
    /// do not decode (e.g. `null` numbers) are skipped but stay in storage.
    /// A payload with no decodable record at all yields the defaults.
    ///
    /// # Errors
    /// - Backend read failures. A failed id write-back is only logged.
    pub fn load(&self) -> StoreResult<Vec<Observation>> {
        let Some(raw) = self.backend.get(&self.key)? else {
            return Ok(default_observations());
        };

        let decoded = match decode(&raw) {
            Some(decoded) if decoded.observations.is_empty() && decoded.skipped > 0 => None,
            other => other,
        };
        let Some(decoded) = decoded else {
            warn!(
                "event=store_load module=store status=corrupt fallback=defaults bytes={}",
                raw.len()
            );
            return Ok(default_observations());
        };

        if decoded.skipped > 0 {
            warn!(
                "event=store_load module=store status=partial skipped={} loaded={}",
                decoded.skipped,
                decoded.observations.len()
            );
        }
        if decoded.assigned_ids > 0 {
            self.stamp_ids(&decoded);
        }

        Ok(decoded.observations)
    }

    /// Replaces the whole persisted sequence.
    pub fn save(&self, observations: &[Observation]) -> StoreResult<()> {
        for observation in observations {
            observation.validate()?;
        }
        self.write(observations)
    }

    /// Appends `entry` at the end and returns the new sequence.
    pub fn append(&self, entry: Observation) -> StoreResult<Vec<Observation>> {
        entry.validate()?;

        let mut observations = self.load()?;
        if observations.iter().any(|item| item.id == entry.id) {
            return Err(StoreError::DuplicateId(entry.id));
        }

        let id = entry.id;
        observations.push(entry);
        self.write(&observations)?;
        info!(
            "event=observation_append module=store status=ok id={id} count={}",
            observations.len()
        );
        Ok(observations)
    }

    /// Removes the observation with `id`; returns it with the remaining sequence.
    pub fn remove(&self, id: ObservationId) -> StoreResult<(Observation, Vec<Observation>)> {
        let mut observations = self.load()?;
        let index = observations
            .iter()
            .position(|item| item.id == id)
            .ok_or(StoreError::NotFound(id))?;

        let removed = observations.remove(index);
        self.write(&observations)?;
        info!(
            "event=observation_remove module=store status=ok id={id} count={}",
            observations.len()
        );
        Ok((removed, observations))
    }

    /// Removes by zero-based position in the current sequence.
    ///
    /// Prefer [`remove`](Self::remove): a position captured before another
    /// mutation may point at a different record.
    pub fn remove_at(&self, index: usize) -> StoreResult<(Observation, Vec<Observation>)> {
        let mut observations = self.load()?;
        if index >= observations.len() {
            warn!(
                "event=observation_remove module=store status=error error_code=index_out_of_range index={} count={}",
                index,
                observations.len()
            );
            return Err(StoreError::IndexOutOfRange {
                index,
                len: observations.len(),
            });
        }

        let removed = observations.remove(index);
        self.write(&observations)?;
        info!(
            "event=observation_remove module=store status=ok id={} index={index} count={}",
            removed.id,
            observations.len()
        );
        Ok((removed, observations))
    }

    pub fn get(&self, id: ObservationId) -> StoreResult<Option<Observation>> {
        Ok(self.load()?.into_iter().find(|item| item.id == id))
    }

    /// Drops persisted state; the next `load()` returns the defaults.
    pub fn reset(&self) -> StoreResult<()> {
        self.backend.remove(&self.key)?;
        info!("event=store_reset module=store status=ok");
        Ok(())
    }

    fn write(&self, observations: &[Observation]) -> StoreResult<()> {
        let payload = serde_json::to_string(observations)?;
        self.backend.set(&self.key, &payload)?;
        Ok(())
    }

    fn stamp_ids(&self, decoded: &Decoded) {
        let written = serde_json::to_string(&decoded.stamped)
            .map_err(StoreError::from)
            .and_then(|payload| {
                self.backend
                    .set(&self.key, &payload)
                    .map_err(StoreError::from)
            });
        match written {
            Ok(()) => info!(
                "event=store_load module=store status=ids_assigned count={}",
                decoded.assigned_ids
            ),
            Err(err) => warn!(
                "event=store_load module=store status=error error_code=id_writeback_failed count={} reason={err}",
                decoded.assigned_ids
            ),
        }
    }
}

struct Decoded {
    observations: Vec<Observation>,
    /// Every stored element, with ids inserted where they were missing.
    stamped: Vec<Value>,
    assigned_ids: usize,
    skipped: usize,
}

/// Returns `None` when the payload is not a JSON array at all.
fn decode(raw: &str) -> Option<Decoded> {
    let Value::Array(items) = serde_json::from_str::<Value>(raw).ok()? else {
        return None;
    };

    let mut decoded = Decoded {
        observations: Vec::with_capacity(items.len()),
        stamped: Vec::with_capacity(items.len()),
        assigned_ids: 0,
        skipped: 0,
    };

    for (index, mut item) in items.into_iter().enumerate() {
        if let Value::Object(fields) = &mut item {
            if !fields.contains_key("id") {
                fields.insert("id".to_string(), Value::String(Uuid::new_v4().to_string()));
                decoded.assigned_ids += 1;
            }
        }

        match Observation::deserialize(&item) {
            Ok(observation) => decoded.observations.push(observation),
            Err(err) => {
                warn!("event=store_load module=store status=skip index={index} reason={err}");
                decoded.skipped += 1;
            }
        }
        decoded.stamped.push(item);
    }

    Some(decoded)
}

#[cfg(test)]
mod tests {
    use super::decode;

    #[test]
    fn decode_rejects_non_array_payloads() {
        assert!(decode("{not json").is_none());
        assert!(decode(r#"{"area":"x"}"#).is_none());
        assert!(decode("[]").is_some());
    }

    #[test]
    fn decode_assigns_ids_and_keeps_out_of_range_records() {
        let raw = r#"[
            {"area":"A","lat":16.4,"lon":80.5,"temp":33,"highTemp":"No","aqi":90,"green":120,"ndvi_now":0.4,"ndvi_past":0.5,"note":""},
            {"area":"B","lat":16.4,"lon":80.5,"temp":null,"highTemp":"No","aqi":90,"green":30,"ndvi_now":0.4,"ndvi_past":0.5,"note":""}
        ]"#;

        let decoded = decode(raw).expect("array payload decodes");
        assert_eq!(decoded.observations.len(), 1);
        assert_eq!(decoded.observations[0].green, 120.0);
        assert!(!decoded.observations[0].id.is_nil());
        assert_eq!(decoded.assigned_ids, 2);
        assert_eq!(decoded.skipped, 1);
        assert_eq!(decoded.stamped.len(), 2);
        assert!(decoded.stamped[1].get("id").is_some());
    }
}
