//! API credential and its JSON file store.
//!
//! The file keeps the key names the desktop build of the bot used, so an
//! existing `config.json` keeps working:
//!
//! ```json
//! {"GROQ_API_KEY": "gsk_...", "USERNAME": "ada"}
//! ```

use crate::core::config::data::path_display;
use crate::core::config::io::{config_dir, write_atomically, ConfigError};
use serde::{Deserialize, Serialize};
use std::error::Error as StdError;
use std::fmt;
use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

const CREDENTIALS_FILE: &str = "config.json";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Credential {
    #[serde(rename = "GROQ_API_KEY", default)]
    pub api_key: String,
    #[serde(rename = "USERNAME", default)]
    pub user_identity: String,
}

impl Credential {
    pub fn new(user_identity: impl Into<String>, api_key: impl Into<String>) -> Self {
        Self {
            api_key: api_key.into(),
            user_identity: user_identity.into(),
        }
    }

    /// A stored credential only counts once it carries an API key.
    pub fn is_configured(&self) -> bool {
        !self.api_key.trim().is_empty()
    }

    /// Messages may only be sent once both the key and a username are set.
    pub fn is_usable(&self) -> bool {
        self.is_configured() && !self.user_identity.trim().is_empty()
    }
}

#[derive(Debug)]
pub enum CredentialError {
    /// No credential file exists at the expected location.
    Missing { path: PathBuf },
    /// The credential file exists but is not valid JSON.
    Malformed {
        path: PathBuf,
        source: serde_json::Error,
    },
    /// The file parsed but holds no API key.
    KeyMissing { path: PathBuf },
    Read {
        path: PathBuf,
        source: std::io::Error,
    },
    Write {
        path: PathBuf,
        source: Box<dyn StdError + Send + Sync>,
    },
}

impl fmt::Display for CredentialError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CredentialError::Missing { path } => {
                write!(f, "Config file not found at {}", path_display(path))
            }
            CredentialError::Malformed { path, source } => {
                write!(f, "JSON decode error in {}: {}", path_display(path), source)
            }
            CredentialError::KeyMissing { path } => {
                write!(f, "GROQ_API_KEY not found in {}", path_display(path))
            }
            CredentialError::Read { path, source } => {
                write!(f, "Failed to read {}: {}", path_display(path), source)
            }
            CredentialError::Write { path, source } => write!(
                f,
                "Failed to register API Key and Username at {}: {}",
                path_display(path),
                source
            ),
        }
    }
}

impl StdError for CredentialError {
    fn source(&self) -> Option<&(dyn StdError + 'static)> {
        match self {
            CredentialError::Malformed { source, .. } => Some(source),
            CredentialError::Read { source, .. } => Some(source),
            CredentialError::Write { source, .. } => Some(source.as_ref()),
            CredentialError::Missing { .. } | CredentialError::KeyMissing { .. } => None,
        }
    }
}

/// File-backed credential persistence at a fixed path.
#[derive(Debug, Clone)]
pub struct CredentialStore {
    path: PathBuf,
}

impl CredentialStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Store rooted at the platform configuration directory.
    pub fn default_location() -> Result<Self, ConfigError> {
        Ok(Self::new(config_dir()?.join(CREDENTIALS_FILE)))
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Read the stored credential without judging whether it is usable.
    pub fn read(&self) -> Result<Credential, CredentialError> {
        let contents = match fs::read_to_string(&self.path) {
            Ok(contents) => contents,
            Err(err) if err.kind() == ErrorKind::NotFound => {
                return Err(CredentialError::Missing {
                    path: self.path.clone(),
                })
            }
            Err(source) => {
                return Err(CredentialError::Read {
                    path: self.path.clone(),
                    source,
                })
            }
        };

        serde_json::from_str(&contents).map_err(|source| CredentialError::Malformed {
            path: self.path.clone(),
            source,
        })
    }

    /// Read the stored credential, requiring an API key to be present.
    pub fn load(&self) -> Result<Credential, CredentialError> {
        let credential = self.read()?;
        if !credential.is_configured() {
            return Err(CredentialError::KeyMissing {
                path: self.path.clone(),
            });
        }
        Ok(credential)
    }

    pub fn save(&self, credential: &Credential) -> Result<(), CredentialError> {
        let write_error = |source: Box<dyn StdError + Send + Sync>| CredentialError::Write {
            path: self.path.clone(),
            source,
        };

        let contents = serde_json::to_vec(credential).map_err(|err| write_error(Box::new(err)))?;
        write_atomically(&self.path, &contents).map_err(|err| write_error(Box::new(err)))?;
        tracing::info!(path = %self.path.display(), "credential saved");
        Ok(())
    }
}
