//! Integration tests for Settings config loading with layered merge semantics.
//!
//! Merge Semantics:
//! - Defaults → Global: REPLACE
//! - Global → Local: UNION with negation support
//! - Any → Env vars: REPLACE
//!
//! Note: These tests write only local configs into temp directories, so they
//! effectively test local config merging with whatever global config exists.

use std::fs;

use tempfile::TempDir;

use cuecard::application::ApplicationError;
use cuecard::config::{local_config_path, Settings};

// ============================================================
// Settings::load() local config tests
// ============================================================

#[test]
fn given_local_config_with_extensions_when_load_then_unions_with_current() {
    // Arrange
    let dir = TempDir::new().unwrap();
    fs::write(
        local_config_path(dir.path()),
        "text_extensions = [\"outline\"]\n",
    )
    .unwrap();
    let baseline = Settings::load(None).expect("load baseline");

    // Act
    let settings = Settings::load(Some(dir.path())).expect("load settings");

    // Assert
    assert!(settings.text_extensions.contains(&"outline".to_string()));
    for ext in &baseline.text_extensions {
        assert!(
            settings.text_extensions.contains(ext),
            "inherited extension {ext} should survive a union merge"
        );
    }
}

#[test]
fn given_local_config_with_negation_when_load_then_removes_item() {
    let dir = TempDir::new().unwrap();
    fs::write(
        local_config_path(dir.path()),
        "text_extensions = [\"!txt\", \"!md\", \"outline\"]\n",
    )
    .unwrap();

    let settings = Settings::load(Some(dir.path())).expect("load settings");

    assert!(!settings.text_extensions.contains(&"txt".to_string()));
    assert!(!settings.text_extensions.contains(&"md".to_string()));
    assert!(settings.text_extensions.contains(&"outline".to_string()));
}

#[test]
fn given_local_config_with_scalars_when_load_then_overrides() {
    let dir = TempDir::new().unwrap();
    fs::write(
        local_config_path(dir.path()),
        "new_item_title = \"Point\"\npretty_json = false\n",
    )
    .unwrap();

    let settings = Settings::load(Some(dir.path())).expect("load settings");

    assert_eq!(settings.new_item_title, "Point");
    assert!(!settings.pretty_json);
}

#[test]
fn given_dir_without_config_when_load_then_matches_baseline() {
    let dir = TempDir::new().unwrap();

    let with_dir = Settings::load(Some(dir.path())).expect("load settings");
    let without = Settings::load(None).expect("load settings");

    assert_eq!(with_dir, without);
}

#[test]
fn given_malformed_local_config_when_load_then_config_error() {
    let dir = TempDir::new().unwrap();
    fs::write(local_config_path(dir.path()), "text_extensions = [unclosed").unwrap();

    let err = Settings::load(Some(dir.path())).unwrap_err();

    assert!(matches!(err, ApplicationError::Config { .. }));
}

// ============================================================
// Show / template
// ============================================================

#[test]
fn given_settings_when_rendering_toml_then_parses_back_identically() {
    let settings = Settings::default();

    let rendered = settings.to_toml().unwrap();
    let parsed: Settings = toml::from_str(&rendered).unwrap();

    assert_eq!(parsed, settings);
}

#[test]
fn given_template_when_written_as_local_config_then_load_is_unchanged() {
    let dir = TempDir::new().unwrap();
    fs::write(local_config_path(dir.path()), Settings::template()).unwrap();

    let with_template = Settings::load(Some(dir.path())).expect("load settings");
    let without = Settings::load(None).expect("load settings");

    assert_eq!(with_template, without);
}
