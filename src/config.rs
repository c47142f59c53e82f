//! iss-now configuration.
//!
//! Loaded from `~/.iss-now/config.toml`. Every key is optional; a missing
//! file means all defaults.

use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use std::time::Duration;

use serde::Deserialize;

use crate::fetch::{DEFAULT_TIMEOUT, DEFAULT_URL, MAX_TIMEOUT_SECS};

/// iss-now configuration.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "kebab-case", default)]
pub struct Config {
    /// Endpoint to fetch the position document from.
    pub url: String,

    /// Request deadline in seconds.
    pub timeout_secs: u64,

    /// Zone used to turn the epoch timestamp into civil time.
    /// The system zone is used when unset.
    pub time_zone: Option<String>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            url: DEFAULT_URL.to_string(),
            timeout_secs: DEFAULT_TIMEOUT.as_secs(),
            time_zone: None,
        }
    }
}

impl Config {
    /// Load config from `~/.iss-now/config.toml`, falling back to defaults
    /// when there is no home directory or no file.
    pub fn load() -> Result<Self, String> {
        match Self::path() {
            Some(path) => Self::load_from(&path),
            None => Ok(Self::default()),
        }
    }

    /// Load config from a specific path.
    /// Returns defaults if the file does not exist.
    pub fn load_from(path: &Path) -> Result<Self, String> {
        let contents = match fs::read_to_string(path) {
            Ok(s) => s,
            Err(e) if e.kind() == io::ErrorKind::NotFound => return Ok(Self::default()),
            Err(e) => return Err(format!("failed to read {}: {e}", path.display())),
        };

        let config: Self = toml::from_str(&contents)
            .map_err(|e| format!("invalid config at {}: {e}", path.display()))?;

        if config.url.is_empty() {
            return Err(format!("url is empty in {}", path.display()));
        }

        if !(1..=MAX_TIMEOUT_SECS).contains(&config.timeout_secs) {
            return Err(format!(
                "timeout-secs must be between 1 and {MAX_TIMEOUT_SECS} in {}",
                path.display()
            ));
        }

        Ok(config)
    }

    /// The config file path: `~/.iss-now/config.toml`.
    pub fn path() -> Option<PathBuf> {
        dirs::home_dir().map(|h| h.join(".iss-now").join("config.toml"))
    }

    /// The request deadline.
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }
}
