//! Client configuration loaded from a TOML file.

use std::fs;
use std::path::{Path, PathBuf};

use derive_getters::Getters;
use derive_more::{Display, Error};
use serde::{Deserialize, Serialize};
use tracing::{debug, instrument};

/// A configuration loading failure with its origin location.
#[derive(Debug, Clone, Display, Error)]
#[display("Config error: {} at {}:{}", message, file, line)]
pub struct ConfigError {
    /// Description of the failure.
    pub message: String,
    /// Line number where the error was created.
    pub line: u32,
    /// Source file where the error was created.
    pub file: &'static str,
}

impl ConfigError {
    /// Creates a new config error, capturing the caller location.
    #[track_caller]
    pub fn new(message: impl Into<String>) -> Self {
        let location = std::panic::Location::caller();
        Self {
            message: message.into(),
            line: location.line(),
            file: location.file(),
        }
    }
}

fn default_server_url() -> String {
    "http://localhost:5000".to_string()
}

/// Settings read from `wortspiel.toml`.
///
/// Every field has a default, so a missing file or a partial file both
/// work. Command-line flags override whatever is loaded here.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Getters)]
pub struct ClientConfig {
    /// Base URL of the word service.
    #[serde(default = "default_server_url")]
    server_url: String,
    /// Username to play as when no flag is given.
    #[serde(default)]
    username: Option<String>,
    /// Directory for placement attempts; platform default when unset.
    #[serde(default)]
    data_dir: Option<PathBuf>,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            server_url: default_server_url(),
            username: None,
            data_dir: None,
        }
    }
}

impl ClientConfig {
    /// Parses the config from a TOML file.
    ///
    /// # Errors
    ///
    /// Returns a [`ConfigError`] when the file cannot be read or parsed.
    #[instrument]
    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let raw = fs::read_to_string(path)
            .map_err(|e| ConfigError::new(format!("reading {}: {e}", path.display())))?;
        toml::from_str(&raw)
            .map_err(|e| ConfigError::new(format!("parsing {}: {e}", path.display())))
    }

    /// Loads the config, falling back to defaults when the file is absent.
    ///
    /// # Errors
    ///
    /// Returns a [`ConfigError`] when the file exists but cannot be parsed.
    #[instrument]
    pub fn load_or_default(path: &Path) -> Result<Self, ConfigError> {
        if path.exists() {
            debug!("Loading config from {}", path.display());
            Self::from_file(path)
        } else {
            debug!("No config file at {}; using defaults", path.display());
            Ok(Self::default())
        }
    }
}
