use super::data::{Config, DEFAULT_BASE_URL};
use super::io::ConfigError;
use std::fs;
use std::path::PathBuf;
use tempfile::TempDir;

#[test]
fn test_load_nonexistent_config() {
    let temp_dir = TempDir::new().expect("Failed to create temp directory");
    let config_path = temp_dir.path().join("nonexistent_settings.toml");

    let config = Config::load_from_path(&config_path).expect("Failed to load config");

    assert_eq!(config, Config::default());
    assert_eq!(config.base_url(), DEFAULT_BASE_URL);
    assert_eq!(config.export_dir(), PathBuf::from("."));
}

#[test]
fn test_config_persistence_lifecycle() {
    let temp_dir = TempDir::new().expect("Failed to create temp directory");
    let config_path = temp_dir.path().join("nested").join("settings.toml");

    let config = Config {
        base_url: Some("http://localhost:8080/v1".to_string()),
        default_model: Some("gemma2-9b-it".to_string()),
        export_dir: Some(temp_dir.path().join("exports")),
    };
    config
        .save_to_path(&config_path)
        .expect("Failed to save config");

    let loaded = Config::load_from_path(&config_path).expect("Failed to load config");
    assert_eq!(loaded, config);
    assert_eq!(loaded.base_url(), "http://localhost:8080/v1");

    let mut modified = loaded;
    modified.default_model = None;
    modified
        .save_to_path(&config_path)
        .expect("Failed to save config");

    let reloaded = Config::load_from_path(&config_path).expect("Failed to load config");
    assert_eq!(reloaded.default_model, None);
    assert_eq!(reloaded.base_url, Some("http://localhost:8080/v1".to_string()));
}

#[test]
fn blank_base_url_falls_back_to_default() {
    let config = Config {
        base_url: Some("  ".to_string()),
        ..Default::default()
    };
    assert_eq!(config.base_url(), DEFAULT_BASE_URL);
}

#[test]
fn malformed_settings_report_parse_error() {
    let temp_dir = TempDir::new().expect("Failed to create temp directory");
    let config_path = temp_dir.path().join("settings.toml");
    fs::write(&config_path, "default_model = [unterminated").expect("write failed");

    let err = Config::load_from_path(&config_path).expect_err("parse should fail");
    assert!(matches!(err, ConfigError::Parse { .. }));
    assert!(err.to_string().starts_with("Failed to parse settings at "));
}
