//! Runtime configuration for the stopwatch
//!
//! Everything is taken from the environment; there is no config file.
//!
//! - `SW_DATA_DIR`: directory holding one stopwatch file per parent process
//!   (default: the platform data directory joined with `sw`)
//! - `SW_LOG`: tracing filter directive, falling back to `RUST_LOG`

use crate::{CoreError, Result};
use std::fs;
use std::path::{Path, PathBuf};
use tracing::debug;

/// Environment variable overriding the data directory
pub const DATA_DIR_ENV: &str = "SW_DATA_DIR";

/// Environment variable holding the tracing filter
pub const LOG_ENV: &str = "SW_LOG";

/// Filter used when neither `SW_LOG` nor `RUST_LOG` is set
pub const DEFAULT_LOG_LEVEL: &str = "warn";

/// Name of the application subdirectory under the platform data directory
const APP_DIR_NAME: &str = "sw";

/// Resolved configuration
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    /// Directory where stopwatch files live
    pub data_dir: PathBuf,
}

impl Config {
    /// Build a configuration rooted at an explicit directory
    pub fn new(data_dir: impl Into<PathBuf>) -> Self {
        Self {
            data_dir: data_dir.into(),
        }
    }

    /// Resolve the configuration from the process environment
    pub fn from_env() -> Result<Self> {
        let data_dir = match std::env::var_os(DATA_DIR_ENV) {
            Some(dir) if !dir.is_empty() => PathBuf::from(dir),
            _ => default_data_dir()?,
        };
        let config = Self { data_dir };
        config.validate()?;
        Ok(config)
    }

    /// Validate configuration values
    pub fn validate(&self) -> Result<()> {
        if self.data_dir.as_os_str().is_empty() {
            return Err(CoreError::ConfigurationError(
                "data directory cannot be empty".to_string(),
            ));
        }
        if !self.data_dir.is_absolute() {
            return Err(CoreError::ConfigurationError(format!(
                "data directory must be absolute: {}",
                self.data_dir.display()
            )));
        }
        Ok(())
    }

    /// Create the data directory if it does not exist yet
    pub fn ensure_data_dir(&self) -> Result<&Path> {
        fs::create_dir_all(&self.data_dir).map_err(|e| {
            CoreError::ConfigurationError(format!(
                "Could not create directory {}: {}",
                self.data_dir.display(),
                e
            ))
        })?;
        debug!("Using data directory {}", self.data_dir.display());
        Ok(&self.data_dir)
    }
}

/// The platform data directory for `sw`
///
/// - Linux: `$XDG_DATA_HOME/sw` or `$HOME/.local/share/sw`
/// - MacOS: `$HOME/Library/Application Support/sw`
/// - Windows: `%APPDATA%\sw`
pub fn default_data_dir() -> Result<PathBuf> {
    dirs::data_dir()
        .map(|dir| dir.join(APP_DIR_NAME))
        .ok_or_else(|| {
            CoreError::ConfigurationError("no data directory for this user".to_string())
        })
}
