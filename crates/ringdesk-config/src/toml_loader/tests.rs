//! Tests for TOML config loading, creation, and path resolution.

use super::*;
use crate::schema::{RingdeskConfig, SelectionMode};
use std::path::Path;

#[test]
fn load_from_nonexistent_returns_file_not_found() {
    let result = load_from_path(Path::new("/tmp/nonexistent_ringdesk_config.toml"));
    assert!(matches!(
        result,
        Err(ringdesk_common::ConfigError::FileNotFound(_))
    ));
}

#[test]
fn load_valid_partial_toml() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("config.toml");
    std::fs::write(
        &path,
        r#"
[app]
url = "https://example.com/app"

[capture]
selection = "auto"
"#,
    )
    .unwrap();

    let config = load_from_path(&path).unwrap();
    assert_eq!(config.app.url, "https://example.com/app");
    assert_eq!(config.capture.selection, SelectionMode::Auto);
    assert_eq!(config.window.width, 1200);
}

#[test]
fn load_invalid_toml_returns_parse_error() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("config.toml");
    std::fs::write(&path, "this is not valid toml {{{").unwrap();

    let result = load_from_path(&path);
    assert!(matches!(
        result,
        Err(ringdesk_common::ConfigError::ParseError(_))
    ));
}

#[test]
fn load_config_with_invalid_values_falls_back_to_default() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("config.toml");
    std::fs::write(
        &path,
        r#"
[app]
url = "ftp://files.example.com"
"#,
    )
    .unwrap();

    let config = load_from_path(&path).unwrap();
    assert_eq!(config.app.url, RingdeskConfig::default().app.url);
}

#[test]
fn create_default_config_writes_parseable_template() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("nested").join("config.toml");
    create_default_config(&path).unwrap();

    assert!(path.exists());
    let config = load_from_path(&path).unwrap();
    assert_eq!(config.app.title, "RingCentral (Community)");
}

#[test]
fn default_config_path_ends_with_ringdesk() {
    if let Ok(path) = default_config_path() {
        assert!(path.ends_with("ringdesk/config.toml"));
    }
}
