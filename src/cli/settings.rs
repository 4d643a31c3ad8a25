//! `nexbot set` / `nexbot unset`.

use std::error::Error;
use std::fmt;
use std::path::PathBuf;

use crate::core::config::{path_display, Config};
use crate::core::models;

/// Errors that can occur when modifying configuration settings.
#[derive(Debug, PartialEq, Eq)]
pub enum SettingError {
    /// The provided setting key is not recognized.
    UnknownKey(String),
    /// The model is not in the catalog.
    UnknownModel(String),
    /// A value is required for this key.
    MissingValue { key: &'static str, example: &'static str },
}

impl fmt::Display for SettingError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SettingError::UnknownKey(key) => write!(
                f,
                "Unknown config key: {key} (expected default-model, base-url, or export-dir)"
            ),
            SettingError::UnknownModel(model) => write!(
                f,
                "Unknown model: {model}. Run 'nexbot models' to list available models."
            ),
            SettingError::MissingValue { key, example } => {
                write!(f, "A value is required for {key}. Example: {example}")
            }
        }
    }
}

impl Error for SettingError {}

fn require<'a>(
    value: &'a str,
    key: &'static str,
    example: &'static str,
) -> Result<&'a str, SettingError> {
    let value = value.trim();
    if value.is_empty() {
        Err(SettingError::MissingValue { key, example })
    } else {
        Ok(value)
    }
}

/// Apply `key = value` to `config`, returning a confirmation line.
pub fn apply_set(config: &mut Config, key: &str, value: &str) -> Result<String, SettingError> {
    match key {
        "default-model" => {
            let value = require(value, "default-model", "nexbot set default-model gemma2-9b-it")?;
            let model = models::find_model(value)
                .ok_or_else(|| SettingError::UnknownModel(value.to_string()))?;
            config.default_model = Some(model.to_string());
            Ok(format!("Set default-model to: {model}"))
        }
        "base-url" => {
            let value = require(value, "base-url", "nexbot set base-url http://localhost:8080/v1")?;
            config.base_url = Some(value.to_string());
            Ok(format!("Set base-url to: {value}"))
        }
        "export-dir" => {
            let value = require(value, "export-dir", "nexbot set export-dir ~/chats")?;
            let dir = PathBuf::from(value);
            let message = format!("Set export-dir to: {}", path_display(&dir));
            config.export_dir = Some(dir);
            Ok(message)
        }
        other => Err(SettingError::UnknownKey(other.to_string())),
    }
}

pub fn apply_unset(config: &mut Config, key: &str) -> Result<String, SettingError> {
    match key {
        "default-model" => config.default_model = None,
        "base-url" => config.base_url = None,
        "export-dir" => config.export_dir = None,
        other => return Err(SettingError::UnknownKey(other.to_string())),
    }
    Ok(format!("Unset {key}"))
}

pub fn run_set(mut config: Config, key: &str, value: &str) -> Result<(), Box<dyn Error>> {
    finish(apply_set(&mut config, key, value), &config)
}

pub fn run_unset(mut config: Config, key: &str) -> Result<(), Box<dyn Error>> {
    finish(apply_unset(&mut config, key), &config)
}

fn finish(result: Result<String, SettingError>, config: &Config) -> Result<(), Box<dyn Error>> {
    match result {
        Ok(message) => {
            config.save()?;
            println!("✅ {message}");
            Ok(())
        }
        Err(err) => {
            eprintln!("❌ {err}");
            std::process::exit(1);
        }
    }
}
