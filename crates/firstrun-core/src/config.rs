//! Run configuration for Firstrun
//!
//! The tracked show list and the reporting window are plain configuration
//! values. Defaults cover the standard invocation; an optional TOML file
//! can override any field.

use std::fs;
use std::io;
use std::path::Path;

use chrono::{Duration, NaiveDate};
use serde::Deserialize;

use crate::client::ClientConfig;
use crate::error::{FirstrunError, Result};

/// Shows tracked when no configuration file is present
pub const DEFAULT_SHOWS: [&str; 6] = [
    "The Blacklist",
    "Castle",
    "How I Met Your Mother",
    "Suits",
    "The Mentalist",
    "White Collar",
];

/// Reporting window in days when no configuration file is present
pub const DEFAULT_WINDOW_DAYS: i64 = 14;

/// Upper bound on the reporting window, keeps date arithmetic in range
const MAX_WINDOW_DAYS: i64 = 36_500;

/// Run configuration: which shows to query and how far back to report
///
/// # Example
/// ```
/// use firstrun_core::Config;
///
/// let config = Config::default();
/// assert_eq!(config.window_days, 14);
/// assert!(config.shows.iter().any(|s| s == "Castle"));
/// ```
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Ordered list of show names to query
    pub shows: Vec<String>,
    /// Inclusive reporting window in days before today
    pub window_days: i64,
    /// Provider API key override
    pub api_key: Option<String>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            shows: DEFAULT_SHOWS.iter().map(|s| s.to_string()).collect(),
            window_days: DEFAULT_WINDOW_DAYS,
            api_key: None,
        }
    }
}

impl Config {
    /// Parse a configuration from TOML text.
    ///
    /// Missing fields fall back to their defaults.
    ///
    /// # Errors
    /// * `FirstrunError::ConfigParse` when the text is not valid TOML
    /// * `FirstrunError::InvalidConfig` when a value fails validation
    pub fn from_toml(text: &str) -> Result<Self> {
        let config: Config = toml::from_str(text)?;
        config.validate()?;
        Ok(config)
    }

    /// Load the configuration file at `path`, or fall back to defaults
    /// when no file exists there.
    ///
    /// # Errors
    /// * `FirstrunError::ConfigIo` when the file exists but cannot be read
    /// * `FirstrunError::ConfigParse` / `FirstrunError::InvalidConfig` as
    ///   for [`Config::from_toml`]
    pub fn load_or_default(path: &Path) -> Result<Self> {
        match fs::read_to_string(path) {
            Ok(text) => Self::from_toml(&text),
            Err(err) if err.kind() == io::ErrorKind::NotFound => Ok(Self::default()),
            Err(err) => Err(err.into()),
        }
    }

    /// Inclusive lower bound on broadcast dates, counted back from `today`.
    pub fn cutoff(&self, today: NaiveDate) -> NaiveDate {
        today - Duration::days(self.window_days)
    }

    /// Provider client configuration derived from this run configuration.
    pub fn client_config(&self) -> ClientConfig {
        let mut client = ClientConfig::default();
        if let Some(key) = &self.api_key {
            client.api_key = key.clone();
        }
        client
    }

    /// Check value constraints: show names must be non-empty and the
    /// window must stay within range.
    fn validate(&self) -> Result<()> {
        if self.shows.iter().any(|name| name.trim().is_empty()) {
            return Err(FirstrunError::InvalidConfig(
                "show names must be non-empty".to_string(),
            ));
        }
        if !(0..=MAX_WINDOW_DAYS).contains(&self.window_days) {
            return Err(FirstrunError::InvalidConfig(format!(
                "window_days out of range: {}",
                self.window_days
            )));
        }
        Ok(())
    }
}
