use std::cell::Cell;
use survey_core::{
    default_observations, KeyValueStore, MemoryStore, ObservationDraft, StorageError,
    StoreError, SurveyService, TemperatureBand,
};

/// Serves a fixed number of reads, then reports the backend as unavailable.
struct LimitedReads {
    inner: MemoryStore,
    reads_left: Cell<usize>,
}

impl KeyValueStore for LimitedReads {
    fn get(&self, key: &str) -> Result<Option<String>, StorageError> {
        let left = self.reads_left.get();
        if left == 0 {
            return Err(StorageError::Unavailable("reads exhausted".to_string()));
        }
        self.reads_left.set(left - 1);
        self.inner.get(key)
    }

    fn set(&self, key: &str, value: &str) -> Result<(), StorageError> {
        self.inner.set(key, value)
    }

    fn remove(&self, key: &str) -> Result<(), StorageError> {
        self.inner.remove(key)
    }
}

fn draft(area: &str, temp: &str) -> ObservationDraft {
    ObservationDraft {
        area: area.to_string(),
        lat: "16.45".to_string(),
        lon: "80.60".to_string(),
        temp: temp.to_string(),
        high_temp: "Yes".to_string(),
        aqi: "101".to_string(),
        green: "61".to_string(),
        ndvi_now: "0.6".to_string(),
        ndvi_past: "0.7".to_string(),
        note: "He said \"shade\"".to_string(),
    }
}

#[test]
fn startup_snapshot_shows_defaults_in_every_view() {
    let backend = MemoryStore::new();
    let service = SurveyService::with_backend(&backend);

    let snapshot = service.snapshot().unwrap();
    assert_eq!(snapshot.observations, default_observations());
    assert_eq!(snapshot.views.table.len(), 4);
    assert_eq!(snapshot.views.markers.len(), 4);
    assert_eq!(snapshot.views.charts.greenery.values.len(), 4);
}

#[test]
fn submit_recomputes_all_views() {
    let backend = MemoryStore::new();
    let service = SurveyService::with_backend(&backend);

    let snapshot = service.submit(&draft("Park Zone", "30.8")).unwrap();

    assert_eq!(snapshot.observations.len(), 5);
    let row = snapshot.views.table.last().unwrap();
    assert_eq!(row.position, 5);
    assert_eq!(row.area, "Park Zone");
    assert_eq!(row.high_temp, "Yes");

    let marker = snapshot.views.markers.last().unwrap();
    assert_eq!(marker.band, TemperatureBand::Cool);
    assert_eq!(marker.id, row.id);
    assert_eq!(
        snapshot.views.charts.temperature.labels.last().map(String::as_str),
        Some("Park Zone")
    );
    assert_eq!(snapshot.views.charts.greenery.colors.last(), Some(&"#c8f7d9"));
}

#[test]
fn rejected_submit_persists_nothing() {
    let backend = MemoryStore::new();
    let service = SurveyService::with_backend(&backend);

    let err = service.submit(&draft("Park Zone", "warm")).unwrap_err();
    match err {
        StoreError::Validation(errors) => assert!(errors.contains_field("temp")),
        other => panic!("unexpected error: {other}"),
    }
    assert!(backend.is_empty());
    assert_eq!(service.snapshot().unwrap().observations.len(), 4);
}

#[test]
fn remove_and_reset_return_fresh_snapshots() {
    let backend = MemoryStore::new();
    let service = SurveyService::with_backend(&backend);
    let added = service.submit(&draft("Temporary", "33")).unwrap();
    let added_id = added.observations[4].id;

    let removal = service.remove(added_id).unwrap();
    assert_eq!(removal.removed.area, "Temporary");
    assert_eq!(removal.snapshot.views.table.len(), 4);

    let removal = service.remove_at(0).unwrap();
    assert_eq!(removal.removed.area, "St. Francis School (Mangalagiri)");
    assert_eq!(removal.snapshot.views.table[0].position, 1);
    assert_eq!(removal.snapshot.views.table[0].area, "Vijeta High School");

    assert!(matches!(
        service.remove_at(10).unwrap_err(),
        StoreError::IndexOutOfRange { index: 10, len: 3 }
    ));

    let reset = service.reset().unwrap();
    assert_eq!(reset.observations, default_observations());
}

#[test]
fn export_reflects_current_state() {
    let backend = MemoryStore::new();
    let service = SurveyService::with_backend(&backend);
    service.submit(&draft("Quoted", "34")).unwrap();

    let csv = service.export_csv().unwrap();
    assert_eq!(csv.lines().count(), 6);
    assert!(csv
        .lines()
        .last()
        .unwrap()
        .ends_with(r#","He said ""shade""""#));

    let dir = tempfile::tempdir().unwrap();
    let path = service.export_csv_to(dir.path()).unwrap();
    assert_eq!(std::fs::read_to_string(path).unwrap(), csv);
}

#[test]
fn removal_snapshot_comes_from_the_written_sequence() {
    let backend = LimitedReads {
        inner: MemoryStore::new(),
        reads_left: Cell::new(1),
    };
    let service = SurveyService::with_backend(&backend);
    let target = default_observations()[1].id;

    let removal = service.remove(target).unwrap();
    assert_eq!(removal.removed.id, target);
    assert_eq!(removal.snapshot.observations.len(), 3);
    assert_eq!(removal.snapshot.views.table.len(), 3);

    backend.reads_left.set(1);
    let removal = service.remove_at(0).unwrap();
    assert_eq!(removal.snapshot.observations.len(), 2);
    assert!(backend.inner.get(survey_core::STORAGE_KEY).unwrap().is_some());
}
