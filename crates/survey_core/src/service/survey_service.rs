//! Survey use-case service.
//!
//! # Responsibility
//! - Run the mutation cycle: validate → update store → persist → recompute.
//! - Hand callers a complete snapshot so no view is ever stale.
//!
//! # Invariants
//! - Every successful mutation returns views rebuilt from the persisted state.
//! - A failed mutation leaves persisted state unchanged.
//! - Service layer remains storage-agnostic.

use crate::export::{to_csv, write_csv};
use crate::model::draft::ObservationDraft;
use crate::model::observation::{Observation, ObservationId};
use crate::repo::observation_repo::{ObservationStore, StoreError, StoreResult};
use crate::storage::KeyValueStore;
use crate::views::DashboardViews;
use log::warn;
use serde::Serialize;
use std::error::Error;
use std::fmt::{Display, Formatter};
use std::path::{Path, PathBuf};

/// Observations plus every view derived from them.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DashboardSnapshot {
    pub observations: Vec<Observation>,
    pub views: DashboardViews,
}

impl DashboardSnapshot {
    pub fn from_observations(observations: Vec<Observation>) -> Self {
        let views = DashboardViews::recompute(&observations);
        Self {
            observations,
            views,
        }
    }
}

/// Outcome of a removal: the record that went away and the new state.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Removal {
    pub removed: Observation,
    pub snapshot: DashboardSnapshot,
}

#[derive(Debug)]
pub enum ExportError {
    Store(StoreError),
    Io(std::io::Error),
}

impl Display for ExportError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Store(err) => write!(f, "{err}"),
            Self::Io(err) => write!(f, "failed to write csv export: {err}"),
        }
    }
}

impl Error for ExportError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Store(err) => Some(err),
            Self::Io(err) => Some(err),
        }
    }
}

impl From<StoreError> for ExportError {
    fn from(value: StoreError) -> Self {
        Self::Store(value)
    }
}

impl From<std::io::Error> for ExportError {
    fn from(value: std::io::Error) -> Self {
        Self::Io(value)
    }
}

/// Dashboard facade over an observation store.
pub struct SurveyService<S: KeyValueStore> {
    store: ObservationStore<S>,
}

impl<S: KeyValueStore> SurveyService<S> {
    pub fn new(store: ObservationStore<S>) -> Self {
        Self { store }
    }

    /// Builds a service over `backend` with the default storage key.
    pub fn with_backend(backend: S) -> Self {
        Self::new(ObservationStore::new(backend))
    }

    pub fn store(&self) -> &ObservationStore<S> {
        &self.store
    }

    /// Current state; used once at startup and after external changes.
    pub fn snapshot(&self) -> StoreResult<DashboardSnapshot> {
        Ok(DashboardSnapshot::from_observations(self.store.load()?))
    }

    /// Validates form input and appends it.
    ///
    /// # Errors
    /// - `StoreError::Validation` lists every rejected field; nothing is saved.
    pub fn submit(&self, draft: &ObservationDraft) -> StoreResult<DashboardSnapshot> {
        let observation = draft.validate().map_err(|err| {
            warn!(
                "event=observation_submit module=service status=rejected fields={}",
                err.fields().collect::<Vec<_>>().join("|")
            );
            StoreError::Validation(err)
        })?;
        self.add(observation)
    }

    /// Appends an already-built observation.
    pub fn add(&self, observation: Observation) -> StoreResult<DashboardSnapshot> {
        let observations = self.store.append(observation)?;
        Ok(DashboardSnapshot::from_observations(observations))
    }

    pub fn remove(&self, id: ObservationId) -> StoreResult<Removal> {
        let (removed, remaining) = self.store.remove(id)?;
        Ok(Removal {
            removed,
            snapshot: DashboardSnapshot::from_observations(remaining),
        })
    }

    /// Positional removal; `index` is zero-based.
    pub fn remove_at(&self, index: usize) -> StoreResult<Removal> {
        let (removed, remaining) = self.store.remove_at(index)?;
        Ok(Removal {
            removed,
            snapshot: DashboardSnapshot::from_observations(remaining),
        })
    }

    /// Restores the demo defaults.
    pub fn reset(&self) -> StoreResult<DashboardSnapshot> {
        self.store.reset()?;
        self.snapshot()
    }

    pub fn export_csv(&self) -> StoreResult<String> {
        Ok(to_csv(&self.store.load()?))
    }

    /// Writes `vijayawada_survey.csv` into `dir` and returns its path.
    pub fn export_csv_to(&self, dir: &Path) -> Result<PathBuf, ExportError> {
        let observations = self.store.load()?;
        Ok(write_csv(dir, &observations)?)
    }
}
