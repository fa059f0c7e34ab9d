//! Application configuration module
//!
//! Type-safe configuration loading from environment variables using the
//! `config` and `dotenvy` crates. Values are read with the `LAY_ADVISOR`
//! prefix and nested fields use `__` as the separator.
//!
//! # Example
//!
//! ```no_run
//! use lay_advisor::config::AppConfig;
//!
//! let config = AppConfig::load().expect("Failed to load configuration");
//! config.validate().expect("Invalid configuration");
//! ```

mod error;

pub use error::{ConfigError, ValidationError};

use std::path::PathBuf;

use serde::Deserialize;

use crate::content::{ContentPack, DEFAULT_PACK};

/// Root application configuration
#[derive(Debug, Clone, Deserialize, Default)]
pub struct AppConfig {
    /// Dialogue engine tuning
    #[serde(default)]
    pub engine: EngineConfig,

    /// Content pack source
    #[serde(default)]
    pub content: ContentConfig,
}

/// Dialogue engine configuration
#[derive(Debug, Clone, Deserialize)]
pub struct EngineConfig {
    /// Bound on each turn's fragment channel
    #[serde(default = "default_stream_buffer")]
    pub stream_buffer: usize,

    /// Host-side delay between rendered fragments, in milliseconds
    #[serde(default = "default_typing_delay_ms")]
    pub typing_delay_ms: u64,

    /// Rust log filter directive
    #[serde(default = "default_log_level")]
    pub log_level: String,
}

/// Content pack configuration
#[derive(Debug, Clone, Deserialize, Default)]
pub struct ContentConfig {
    /// Path to a YAML content pack; the built-in pack is used when unset
    pub pack_path: Option<PathBuf>,
}

impl AppConfig {
    /// Load configuration from environment variables
    ///
    /// Loads `.env` if present, then reads variables with the
    /// `LAY_ADVISOR` prefix:
    ///
    /// - `LAY_ADVISOR__ENGINE__STREAM_BUFFER=32` -> `engine.stream_buffer = 32`
    /// - `LAY_ADVISOR__CONTENT__PACK_PATH=...` -> `content.pack_path = ...`
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if values cannot be parsed into the expected
    /// types.
    pub fn load() -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok();

        let config = config::Config::builder()
            .add_source(
                config::Environment::default()
                    .prefix("LAY_ADVISOR")
                    .separator("__"),
            )
            .build()?
            .try_deserialize()?;

        Ok(config)
    }

    /// Validate all configuration values
    ///
    /// # Errors
    ///
    /// Returns `ValidationError` if any configuration value is invalid.
    pub fn validate(&self) -> Result<(), ValidationError> {
        self.engine.validate()?;
        self.content.validate()?;
        Ok(())
    }

    /// Resolve the content pack this configuration names
    ///
    /// Loads and validates the YAML pack at `content.pack_path` when set,
    /// otherwise returns the built-in pack.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if the file cannot be read, parsed, or fails
    /// pack validation.
    pub fn content_pack(&self) -> Result<ContentPack, ConfigError> {
        match &self.content.pack_path {
            Some(path) => Ok(ContentPack::from_yaml_file(path)?),
            None => Ok(DEFAULT_PACK.clone()),
        }
    }
}

impl EngineConfig {
    /// Validate engine configuration
    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.stream_buffer == 0 || self.stream_buffer > 1024 {
            return Err(ValidationError::InvalidStreamBuffer);
        }
        if self.typing_delay_ms > 1000 {
            return Err(ValidationError::TypingDelayTooLarge);
        }
        Ok(())
    }
}

impl ContentConfig {
    /// Validate content configuration
    pub fn validate(&self) -> Result<(), ValidationError> {
        if let Some(path) = &self.pack_path {
            if !path.exists() {
                return Err(ValidationError::ContentPackNotFound(
                    path.display().to_string(),
                ));
            }
        }
        Ok(())
    }
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            stream_buffer: default_stream_buffer(),
            typing_delay_ms: default_typing_delay_ms(),
            log_level: default_log_level(),
        }
    }
}

fn default_stream_buffer() -> usize {
    16
}

fn default_typing_delay_ms() -> u64 {
    30
}

fn default_log_level() -> String {
    "info".to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::content::default_pack;
    use std::env;
    use std::io::Write;
    use std::sync::Mutex;

    // Mutex to ensure tests don't run in parallel (env vars are global)
    static ENV_MUTEX: Mutex<()> = Mutex::new(());

    fn clear_env() {
        env::remove_var("LAY_ADVISOR__ENGINE__STREAM_BUFFER");
        env::remove_var("LAY_ADVISOR__ENGINE__TYPING_DELAY_MS");
        env::remove_var("LAY_ADVISOR__ENGINE__LOG_LEVEL");
        env::remove_var("LAY_ADVISOR__CONTENT__PACK_PATH");
    }

    #[test]
    fn loads_with_defaults_when_env_is_empty() {
        let _guard = ENV_MUTEX.lock().unwrap();
        clear_env();
        let config = AppConfig::load().unwrap();
        assert_eq!(config.engine.stream_buffer, 16);
        assert_eq!(config.engine.typing_delay_ms, 30);
        assert_eq!(config.engine.log_level, "info");
        assert!(config.content.pack_path.is_none());
        config.validate().unwrap();
    }

    #[test]
    fn reads_nested_values_from_environment() {
        let _guard = ENV_MUTEX.lock().unwrap();
        env::set_var("LAY_ADVISOR__ENGINE__STREAM_BUFFER", "64");
        env::set_var("LAY_ADVISOR__ENGINE__LOG_LEVEL", "debug");
        let config = AppConfig::load().unwrap();
        clear_env();
        assert_eq!(config.engine.stream_buffer, 64);
        assert_eq!(config.engine.log_level, "debug");
    }

    #[test]
    fn rejects_zero_stream_buffer() {
        let config = AppConfig {
            engine: EngineConfig {
                stream_buffer: 0,
                ..EngineConfig::default()
            },
            ..AppConfig::default()
        };
        assert!(matches!(
            config.validate(),
            Err(ValidationError::InvalidStreamBuffer)
        ));
    }

    #[test]
    fn rejects_missing_pack_path() {
        let config = AppConfig {
            content: ContentConfig {
                pack_path: Some(PathBuf::from("/nonexistent/pack.yaml")),
            },
            ..AppConfig::default()
        };
        assert!(matches!(
            config.validate(),
            Err(ValidationError::ContentPackNotFound(_))
        ));
    }

    #[test]
    fn default_content_pack_is_the_built_in_one() {
        let config = AppConfig::default();
        let pack = config.content_pack().unwrap();
        assert_eq!(pack.fallback_template, default_pack().fallback_template);
    }

    #[test]
    fn loads_a_pack_from_a_yaml_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("pack.yaml");
        let yaml = serde_yaml::to_string(&default_pack()).unwrap();
        let mut file = std::fs::File::create(&path).unwrap();
        file.write_all(yaml.as_bytes()).unwrap();

        let config = AppConfig {
            content: ContentConfig {
                pack_path: Some(path),
            },
            ..AppConfig::default()
        };
        config.validate().unwrap();
        let pack = config.content_pack().unwrap();
        assert!(!pack.templates.is_empty());
    }
}
