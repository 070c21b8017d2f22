//! Tests for loading the TOML configuration.

use std::io::Write;
use std::time::Duration;

use couch_tictactoe::AppConfig;
use tempfile::NamedTempFile;

#[test]
fn test_from_file() {
    let mut file = NamedTempFile::new().expect("Failed to create temp file");
    writeln!(file, "db_path = \"games.db\"\nopponent_delay_ms = 250").unwrap();

    let config = AppConfig::from_file(file.path()).expect("Load failed");
    assert_eq!(config.db_path(), "games.db");
    assert_eq!(config.opponent_delay(), Duration::from_millis(250));
    assert_eq!(config.log_filter(), "warn");
}

#[test]
fn test_missing_file_uses_defaults() {
    let dir = tempfile::tempdir().unwrap();
    let config = AppConfig::load_or_default(dir.path().join("absent.toml")).expect("Load failed");
    assert_eq!(config, AppConfig::default());
}

#[test]
fn test_malformed_file_is_error() {
    let mut file = NamedTempFile::new().unwrap();
    writeln!(file, "db_path = [").unwrap();
    assert!(AppConfig::from_file(file.path()).is_err());
}

#[test]
fn test_db_path_override() {
    let config = AppConfig::default().with_db_path("/tmp/other.db");
    assert_eq!(config.db_path(), "/tmp/other.db");
    assert_eq!(*config.opponent_delay_ms(), 500);
}
