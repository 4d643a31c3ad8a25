use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Base URL of the OpenAI-compatible endpoint used when none is configured.
pub const DEFAULT_BASE_URL: &str = "https://api.groq.com/openai/v1";

/// Optional application settings read from `settings.toml`.
///
/// Every field is optional; an absent file is equivalent to
/// `Config::default()`.
#[derive(Debug, Serialize, Deserialize, Default, Clone, PartialEq, Eq)]
pub struct Config {
    /// Base URL of the completion API (e.g. "https://api.groq.com/openai/v1")
    pub base_url: Option<String>,
    /// Model selected when a session starts
    pub default_model: Option<String>,
    /// Directory that receives exported transcripts
    pub export_dir: Option<PathBuf>,
}

impl Config {
    pub fn base_url(&self) -> &str {
        self.base_url
            .as_deref()
            .filter(|url| !url.trim().is_empty())
            .unwrap_or(DEFAULT_BASE_URL)
    }

    pub fn export_dir(&self) -> PathBuf {
        self.export_dir
            .clone()
            .unwrap_or_else(|| PathBuf::from("."))
    }

    /// Print every setting, marking unset values.
    pub fn print_all(&self) {
        println!("Current configuration:");
        match &self.base_url {
            Some(url) => println!("  base-url: {url}"),
            None => println!("  base-url: (unset, using {DEFAULT_BASE_URL})"),
        }
        match &self.default_model {
            Some(model) => println!("  default-model: {model}"),
            None => println!("  default-model: (unset)"),
        }
        match &self.export_dir {
            Some(dir) => println!("  export-dir: {}", path_display(dir)),
            None => println!("  export-dir: (unset, using current directory)"),
        }
    }
}

/// Get a user-friendly display string for a path, using `~` for the home
/// directory on Unix-like systems.
pub fn path_display<P: AsRef<Path>>(path: P) -> String {
    let path = path.as_ref();

    #[cfg(unix)]
    {
        if let Some(home) = std::env::var_os("HOME") {
            let home_path = PathBuf::from(home);
            if let Ok(relative) = path.strip_prefix(&home_path) {
                return format!("~/{}", relative.display());
            }
        }
    }

    path.display().to_string()
}
