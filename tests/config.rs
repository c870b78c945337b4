use std::time::Duration;

use assert_matches::assert_matches;

use fungidb_orthologs::config::{Config, DEFAULT_REPORT_URL, Settings, SettingsLoader};
use fungidb_orthologs::error::OrthologError;

#[test]
fn explicit_file_overrides_fields() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("settings.json");
    std::fs::write(
        &path,
        r#"{"downloads_url": "http://127.0.0.1:8081/listing/", "listing_timeout_secs": 2}"#,
    )
    .unwrap();

    let settings = SettingsLoader::resolve(Some(path.to_str().unwrap())).unwrap();
    assert_eq!(settings.downloads_url, "http://127.0.0.1:8081/listing/");
    assert_eq!(settings.listing_timeout, Duration::from_secs(2));
    assert_eq!(settings.report_url, DEFAULT_REPORT_URL);
    assert_eq!(settings.report_timeout, Duration::from_secs(300));
}

#[test]
fn missing_explicit_file_is_an_error() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("absent.json");
    let err = SettingsLoader::resolve(Some(path.to_str().unwrap())).unwrap_err();
    assert_matches!(err, OrthologError::ConfigRead(_));
}

#[test]
fn malformed_file_is_an_error() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("bad.json");
    std::fs::write(&path, "{ not json").unwrap();
    let err = SettingsLoader::resolve(Some(path.to_str().unwrap())).unwrap_err();
    assert_matches!(err, OrthologError::ConfigParse(_));
}

#[test]
fn empty_config_is_default() {
    assert_eq!(
        SettingsLoader::resolve_config(Config::default()),
        Settings::default()
    );
}
