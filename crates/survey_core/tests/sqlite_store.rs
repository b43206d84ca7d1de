use rusqlite::Connection;
use survey_core::db::migrations::{latest_version, schema_version};
use survey_core::db::{open_db, open_db_in_memory, DbError};
use survey_core::{
    default_observations, KeyValueStore, ObservationStore, SqliteStore, SurveyService,
};

#[test]
fn open_db_in_memory_applies_all_migrations() {
    let conn = open_db_in_memory().unwrap();

    assert_eq!(schema_version(&conn).unwrap(), latest_version());
    let exists: i64 = conn
        .query_row(
            "SELECT EXISTS(SELECT 1 FROM sqlite_master WHERE type = 'table' AND name = 'kv_entries');",
            [],
            |row| row.get(0),
        )
        .unwrap();
    assert_eq!(exists, 1);
}

#[test]
fn sqlite_store_set_get_remove() {
    let conn = open_db_in_memory().unwrap();
    let store = SqliteStore::new(&conn);

    assert_eq!(store.get("k").unwrap(), None);
    store.set("k", "one").unwrap();
    store.set("k", "two").unwrap();
    assert_eq!(store.get("k").unwrap().as_deref(), Some("two"));

    store.remove("k").unwrap();
    store.remove("k").unwrap();
    assert_eq!(store.get("k").unwrap(), None);
}

#[test]
fn observations_survive_reopening_the_file() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("survey.sqlite3");

    let removed_id = default_observations()[0].id;
    {
        let conn = open_db(&path).unwrap();
        let store = ObservationStore::new(SqliteStore::new(&conn));
        store.remove(removed_id).unwrap();
    }

    let conn = open_db(&path).unwrap();
    let service = SurveyService::with_backend(SqliteStore::new(&conn));
    let snapshot = service.snapshot().unwrap();
    assert_eq!(snapshot.observations.len(), 3);
    assert!(snapshot
        .observations
        .iter()
        .all(|item| item.id != removed_id));
}

#[test]
fn opening_database_with_newer_schema_version_returns_error() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("future.sqlite3");

    let conn = Connection::open(&path).unwrap();
    conn.execute_batch("PRAGMA user_version = 999;").unwrap();
    drop(conn);

    match open_db(&path).unwrap_err() {
        DbError::UnsupportedSchemaVersion {
            db_version,
            latest_supported,
        } => {
            assert_eq!(db_version, 999);
            assert_eq!(latest_supported, latest_version());
        }
        other => panic!("unexpected error: {other}"),
    }
}
