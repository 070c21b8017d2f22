//! Tests for the SQLite storage backend.

use couch_core::{HeuristicOpponent, Mark};
use couch_tictactoe::{
    GameController, Mode, RecordStore, SCORE_KEY, SETTINGS_KEY, Settings, SqliteStorage, Storage,
};
use tempfile::NamedTempFile;

/// Creates a temporary database with migrations applied. The returned file
/// handle must stay in scope to keep the file alive.
fn setup_test_db() -> (NamedTempFile, SqliteStorage) {
    let db_file = NamedTempFile::new().expect("Failed to create temp file");
    let db_path = db_file.path().to_str().expect("Invalid path").to_string();
    let storage = SqliteStorage::open(db_path).expect("Failed to open storage");
    (db_file, storage)
}

#[test]
fn test_get_missing_key() {
    let (_db, storage) = setup_test_db();
    assert_eq!(storage.get("nothing").expect("Query failed"), None);
}

#[test]
fn test_set_then_get() {
    let (_db, storage) = setup_test_db();
    storage.set("greeting", "hello").expect("Set failed");
    assert_eq!(
        storage.get("greeting").expect("Query failed").as_deref(),
        Some("hello")
    );
}

#[test]
fn test_set_replaces_value() {
    let (_db, storage) = setup_test_db();
    storage.set("k", "one").expect("Set failed");
    storage.set("k", "two").expect("Set failed");
    assert_eq!(storage.get("k").unwrap().as_deref(), Some("two"));
    assert_eq!(storage.records().expect("List failed").len(), 1);
}

#[test]
fn test_remove_is_idempotent() {
    let (_db, storage) = setup_test_db();
    storage.set("k", "v").unwrap();
    storage.remove("k").expect("Remove failed");
    storage.remove("k").expect("Second remove failed");
    assert_eq!(storage.get("k").unwrap(), None);
}

#[test]
fn test_records_listed_by_key() {
    let (_db, storage) = setup_test_db();
    storage.set("b", "2").unwrap();
    storage.set("a", "1").unwrap();
    let keys: Vec<String> = storage
        .records()
        .unwrap()
        .iter()
        .map(|r| r.key().clone())
        .collect();
    assert_eq!(keys, vec!["a".to_string(), "b".to_string()]);
}

#[test]
fn test_reopen_runs_no_duplicate_migrations() {
    let (db, storage) = setup_test_db();
    storage.set("k", "v").unwrap();

    let reopened = SqliteStorage::open(db.path().to_str().unwrap()).expect("Reopen failed");
    assert_eq!(reopened.get("k").unwrap().as_deref(), Some("v"));
}

#[test]
fn test_game_state_survives_restart() {
    let (_db, storage) = setup_test_db();
    {
        let mut game = GameController::with_settings(
            storage.clone(),
            HeuristicOpponent::with_seed(3),
            Settings::new(Mode::VsHuman, Mark::O),
        );
        // X: 0 1 2, O: 3 4
        for index in [0, 3, 1, 4, 2] {
            assert!(game.apply_move(index));
        }
    }
    assert!(storage.get(SCORE_KEY).unwrap().is_some());
    assert!(storage.get(SETTINGS_KEY).unwrap().is_some());

    let records = RecordStore::load(storage.clone());
    assert_eq!(records.score().wins(Mark::X), 1);
    assert_eq!(records.history().len(), 1);
    assert_eq!(Settings::load(&storage), Settings::new(Mode::VsHuman, Mark::O));
}
