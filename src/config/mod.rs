//! Configuration loading and validation.

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::info;

use crate::calculate::StatsOptions;
use crate::compare::CompareMode;

/// Configuration errors.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config file: {0}")]
    ReadError(#[from] std::io::Error),

    #[error("Failed to parse config: {0}")]
    ParseError(#[from] toml::de::Error),

    #[error("Invalid configuration: {0}")]
    ValidationError(String),
}

const LOG_LEVELS: [&str; 5] = ["trace", "debug", "info", "warn", "error"];

/// Match comparison defaults.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CompareConfig {
    /// "standard" or "legacy"
    #[serde(default)]
    pub mode: CompareMode,
}

/// Main configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EngineConfig {
    #[serde(default = "default_data_dir")]
    pub data_dir: PathBuf,

    #[serde(default = "default_log_level")]
    pub log_level: String,

    #[serde(default)]
    pub compare: CompareConfig,

    #[serde(default)]
    pub stats: StatsOptions,
}

fn default_data_dir() -> PathBuf {
    PathBuf::from("./data")
}

fn default_log_level() -> String {
    "info".to_string()
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            data_dir: default_data_dir(),
            log_level: default_log_level(),
            compare: CompareConfig::default(),
            stats: StatsOptions::default(),
        }
    }
}

impl EngineConfig {
    /// Load configuration from a TOML file.
    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let contents = std::fs::read_to_string(path)?;
        Self::from_toml(&contents)
    }

    /// Load from a file if it exists, otherwise fall back to defaults.
    pub fn load_or_default(path: &Path) -> Result<Self, ConfigError> {
        if path.exists() {
            Self::from_file(path)
        } else {
            info!("Config {:?} not found, using defaults", path);
            Ok(Self::default())
        }
    }

    /// Parse and validate TOML text.
    pub fn from_toml(contents: &str) -> Result<Self, ConfigError> {
        let config: EngineConfig = toml::from_str(contents)?;
        config.validate()?;
        Ok(config)
    }

    /// Validate the configuration.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if !LOG_LEVELS.contains(&self.log_level.as_str()) {
            return Err(ConfigError::ValidationError(format!(
                "log_level must be one of {}, got {:?}",
                LOG_LEVELS.join(", "),
                self.log_level
            )));
        }

        if self.data_dir.as_os_str().is_empty() {
            return Err(ConfigError::ValidationError(
                "data_dir must not be empty".to_string(),
            ));
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_default_config() {
        let config = EngineConfig::default();

        assert_eq!(config.data_dir, PathBuf::from("./data"));
        assert_eq!(config.log_level, "info");
        assert_eq!(config.compare.mode, CompareMode::Standard);
        assert!(!config.stats.tolerate_parse_failures);
    }

    #[test]
    fn test_parse_full_config() {
        let config = EngineConfig::from_toml(
            r#"
            data_dir = "/srv/oth"
            log_level = "debug"

            [compare]
            mode = "legacy"

            [stats]
            tolerate_parse_failures = true
            "#,
        )
        .unwrap();

        assert_eq!(config.data_dir, PathBuf::from("/srv/oth"));
        assert_eq!(config.compare.mode, CompareMode::Legacy);
        assert!(config.stats.tolerate_parse_failures);
    }

    #[test]
    fn test_partial_config_uses_defaults() {
        let config = EngineConfig::from_toml("[stats]\n").unwrap();

        assert_eq!(config.log_level, "info");
        assert!(!config.stats.tolerate_parse_failures);
    }

    #[test]
    fn test_config_validation_bad_log_level() {
        let mut config = EngineConfig::default();
        config.log_level = "verbose".to_string();

        assert!(matches!(
            config.validate(),
            Err(ConfigError::ValidationError(_))
        ));
    }

    #[test]
    fn test_config_validation_empty_data_dir() {
        let mut config = EngineConfig::default();
        config.data_dir = PathBuf::new();

        assert!(config.validate().is_err());
    }

    #[test]
    fn test_unknown_mode_is_parse_error() {
        let err = EngineConfig::from_toml("[compare]\nmode = \"fuzzy\"\n").unwrap_err();
        assert!(matches!(err, ConfigError::ParseError(_)));
    }

    #[test]
    fn test_load_from_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "log_level = \"warn\"").unwrap();

        let config = EngineConfig::load_or_default(file.path()).unwrap();
        assert_eq!(config.log_level, "warn");
    }

    #[test]
    fn test_missing_file_falls_back_to_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let config = EngineConfig::load_or_default(&dir.path().join("absent.toml")).unwrap();

        assert_eq!(config.log_level, "info");
    }

    #[test]
    fn test_config_serialization() {
        let config = EngineConfig::default();
        let toml_str = toml::to_string(&config).unwrap();

        let parsed: EngineConfig = toml::from_str(&toml_str).unwrap();
        assert_eq!(config.data_dir, parsed.data_dir);
        assert_eq!(config.compare.mode, parsed.compare.mode);
    }
}
