//! Integration tests for ConfigManager and settings file handling
//!
//! These tests verify:
//! - Default settings when no file exists
//! - Saving and reloading settings
//! - Partial settings files fall back to defaults per field

use camino::Utf8PathBuf;
use std::fs;
use tempfile::TempDir;
use trinity_shaders::{ConfigManager, Settings};

fn create_test_config_dir() -> (TempDir, Utf8PathBuf) {
    let temp_dir = TempDir::new().unwrap();
    let config_path = Utf8PathBuf::try_from(temp_dir.path().to_path_buf()).unwrap();
    (temp_dir, config_path)
}

#[test]
fn test_create_config_manager() {
    let (_temp_dir, config_path) = create_test_config_dir();
    let manager = ConfigManager::new(&config_path);

    assert_eq!(manager.config_dir(), &config_path);
    assert_eq!(manager.settings_path(), config_path.join("settings.yaml"));
}

#[test]
fn test_load_default_settings() {
    let (_temp_dir, config_path) = create_test_config_dir();
    let manager = ConfigManager::new(&config_path);

    let settings = manager.load_settings().unwrap();

    assert!(!settings.debug_mode);
    assert_eq!(settings.max_packs, 100);
    assert!(settings.extra_install_roots.is_empty());
}

#[test]
fn test_save_and_load_settings() {
    let (_temp_dir, config_path) = create_test_config_dir();
    let manager = ConfigManager::new(&config_path);

    let settings = Settings {
        debug_mode: true,
        log_dir: Some(config_path.join("logs")),
        extra_install_roots: vec![Utf8PathBuf::from("/opt/mcpelauncher")],
        max_packs: 250,
    };
    manager.save_settings(&settings).unwrap();

    let loaded = manager.load_settings().unwrap();
    assert_eq!(loaded, settings);
}

#[test]
fn test_partial_settings_file() {
    let (_temp_dir, config_path) = create_test_config_dir();
    fs::write(
        config_path.join("settings.yaml"),
        "Extra Install Roots:\n  - ~/games/mcpelauncher\n",
    )
    .unwrap();
    let manager = ConfigManager::new(&config_path);

    let settings = manager.load_settings().unwrap();

    assert_eq!(
        settings.extra_install_roots,
        vec![Utf8PathBuf::from("~/games/mcpelauncher")]
    );
    assert_eq!(settings.max_packs, 100);
    assert!(settings.log_dir.is_none());
}

#[test]
fn test_corrupt_settings_file_is_an_error() {
    let (_temp_dir, config_path) = create_test_config_dir();
    fs::write(config_path.join("settings.yaml"), "Debug Mode: [unclosed\n").unwrap();
    let manager = ConfigManager::new(&config_path);

    assert!(manager.load_settings().is_err());
}
