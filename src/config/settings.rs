//! Application settings loading from config.toml.
//!
//! Settings are optional: a missing config.toml yields defaults, and the
//! `DATABASE_URL` environment variable overrides the configured database URL.

use crate::errors::{Error, Result};
use serde::Deserialize;
use std::path::Path;

fn default_database_url() -> String {
    "sqlite://data/cougarcs.sqlite?mode=rwc".to_string()
}

const fn default_leaderboard_limit() -> u64 {
    10
}

/// Application settings parsed from config.toml.
#[derive(Debug, Clone, Deserialize)]
pub struct Settings {
    /// Database URL; overridden by the `DATABASE_URL` environment variable
    #[serde(default = "default_database_url")]
    pub database_url: String,
    /// Default number of entries shown by `/leaderboard`
    #[serde(default = "default_leaderboard_limit")]
    pub leaderboard_limit: u64,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            database_url: default_database_url(),
            leaderboard_limit: default_leaderboard_limit(),
        }
    }
}

impl Settings {
    /// The database URL to connect to, after the environment override.
    #[must_use]
    pub fn effective_database_url(&self) -> String {
        std::env::var("DATABASE_URL").unwrap_or_else(|_| self.database_url.clone())
    }
}

/// Loads settings from a TOML file; a missing file is defaults, a malformed
/// file is an error.
pub fn load_settings<P: AsRef<Path>>(path: P) -> Result<Settings> {
    let path = path.as_ref();
    if !path.exists() {
        return Ok(Settings::default());
    }

    let contents = std::fs::read_to_string(path).map_err(|e| Error::Config {
        message: format!("Failed to read config file: {e}"),
    })?;

    toml::from_str(&contents).map_err(|e| Error::Config {
        message: format!("Failed to parse config.toml: {e}"),
    })
}

/// Loads settings from the default location (./config.toml).
pub fn load_default_settings() -> Result<Settings> {
    load_settings("config.toml")
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]
    use super::*;

    #[test]
    fn test_parse_settings() {
        let toml_str = r#"
            database_url = "sqlite://test.sqlite"
            leaderboard_limit = 25
        "#;

        let settings: Settings = toml::from_str(toml_str).unwrap();
        assert_eq!(settings.database_url, "sqlite://test.sqlite");
        assert_eq!(settings.leaderboard_limit, 25);
    }

    #[test]
    fn test_defaults_fill_missing_fields() {
        let settings: Settings = toml::from_str("").unwrap();
        assert_eq!(settings.leaderboard_limit, 10);
        assert!(settings.database_url.starts_with("sqlite://"));
    }

    #[test]
    fn test_missing_file_is_defaults() {
        let settings = load_settings("definitely/not/a/real/config.toml").unwrap();
        assert_eq!(settings.leaderboard_limit, 10);
    }
}
