//! Configuration module for slotbook.

use serde::Deserialize;
use std::path::Path;

use crate::{Result, SlotbookError};

/// Database configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct DatabaseConfig {
    /// Path to the SQLite database file.
    #[serde(default = "default_db_path")]
    pub path: String,
}

fn default_db_path() -> String {
    "data/slotbook.db".to_string()
}

impl Default for DatabaseConfig {
    fn default() -> Self {
        Self {
            path: default_db_path(),
        }
    }
}

/// Business identity configuration.
///
/// Used for reminder message text. Business *hours* are runtime settings and
/// live in the settings store, not here.
#[derive(Debug, Clone, Deserialize)]
pub struct BusinessConfig {
    /// Display name of the business.
    #[serde(default = "default_business_name")]
    pub name: String,
}

fn default_business_name() -> String {
    "Slotbook".to_string()
}

impl Default for BusinessConfig {
    fn default() -> Self {
        Self {
            name: default_business_name(),
        }
    }
}

/// Logging configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct LoggingConfig {
    /// Log level (trace, debug, info, warn, error).
    #[serde(default = "default_log_level")]
    pub level: String,
    /// Path to the log file.
    #[serde(default = "default_log_file")]
    pub file: String,
}

fn default_log_level() -> String {
    "info".to_string()
}

fn default_log_file() -> String {
    "logs/slotbook.log".to_string()
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            file: default_log_file(),
        }
    }
}

/// Top-level application configuration.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Config {
    /// Database configuration.
    #[serde(default)]
    pub database: DatabaseConfig,
    /// Business identity configuration.
    #[serde(default)]
    pub business: BusinessConfig,
    /// Logging configuration.
    #[serde(default)]
    pub logging: LoggingConfig,
}

impl Config {
    /// Load configuration from a TOML file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let content = std::fs::read_to_string(path.as_ref())?;
        toml::from_str(&content).map_err(|e| SlotbookError::Config(e.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = Config::default();
        assert_eq!(config.database.path, "data/slotbook.db");
        assert_eq!(config.business.name, "Slotbook");
        assert_eq!(config.logging.level, "info");
        assert_eq!(config.logging.file, "logs/slotbook.log");
    }

    #[test]
    fn test_parse_full_config() {
        let toml_str = r#"
            [database]
            path = "test.db"

            [business]
            name = "Corner Barbershop"

            [logging]
            level = "debug"
            file = "test.log"
        "#;
        let config: Config = toml::from_str(toml_str).unwrap();
        assert_eq!(config.database.path, "test.db");
        assert_eq!(config.business.name, "Corner Barbershop");
        assert_eq!(config.logging.level, "debug");
        assert_eq!(config.logging.file, "test.log");
    }

    #[test]
    fn test_parse_partial_config_uses_defaults() {
        let toml_str = r#"
            [business]
            name = "Studio One"
        "#;
        let config: Config = toml::from_str(toml_str).unwrap();
        assert_eq!(config.business.name, "Studio One");
        assert_eq!(config.database.path, "data/slotbook.db");
        assert_eq!(config.logging.level, "info");
    }

    #[test]
    fn test_parse_empty_config() {
        let config: Config = toml::from_str("").unwrap();
        assert_eq!(config.database.path, "data/slotbook.db");
    }

    #[test]
    fn test_load_missing_file() {
        let result = Config::load("does/not/exist.toml");
        assert!(result.is_err());
    }

    #[test]
    fn test_load_from_file() {
        use std::io::Write;

        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "[database]\npath = \"from_file.db\"").unwrap();

        let config = Config::load(file.path()).unwrap();
        assert_eq!(config.database.path, "from_file.db");
    }
}
