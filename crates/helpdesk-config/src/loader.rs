//! Configuration loading utilities

use crate::Config;
use helpdesk_common::{HelpdeskError, Result as HelpdeskResult};
use std::env;
use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::{debug, info};

/// Environment variable naming an explicit configuration file
pub const CONFIG_PATH_ENV: &str = "HELPDESK_CONFIG_PATH";

/// Configuration loading errors
#[derive(Debug, Error)]
pub enum ConfigError {
    /// I/O error when reading configuration file
    #[error("Failed to read configuration file: {0}")]
    IoError(#[from] std::io::Error),

    /// YAML parsing error
    #[error("Failed to parse YAML configuration: {0}")]
    ParseError(#[from] serde_yaml::Error),

    /// Configuration validation error
    #[error("Configuration validation failed: {0}")]
    ValidationError(#[from] validator::ValidationErrors),

    /// Environment variable parsing error
    #[error("Failed to parse environment variable '{var}': {source}")]
    EnvParseError {
        /// Name of the offending variable
        var: String,
        /// Parse failure
        #[source]
        source: Box<dyn std::error::Error + Send + Sync>,
    },
}

impl From<ConfigError> for HelpdeskError {
    fn from(err: ConfigError) -> Self {
        match err {
            ConfigError::IoError(e) => HelpdeskError::Io(e),
            ConfigError::ValidationError(errors) => {
                let message = errors.to_string();
                match errors.errors().keys().map(|field| field.to_string()).min() {
                    Some(field) => HelpdeskError::validation_field(message, field),
                    None => HelpdeskError::Validation {
                        message,
                        field: None,
                    },
                }
            }
            other => HelpdeskError::config_with_source("Failed to load configuration", other),
        }
    }
}

/// Configuration loader for the application
pub struct ConfigLoader;

impl ConfigLoader {
    /// Load configuration from a YAML file with environment variable overrides
    pub fn load_config<P: AsRef<Path>>(path: P) -> Result<Config, ConfigError> {
        debug!(path = %path.as_ref().display(), "Loading configuration file");

        let content = std::fs::read_to_string(path.as_ref())?;
        let mut config: Config = serde_yaml::from_str(&content)?;

        Self::apply_env_overrides(&mut config)?;
        config.validate_all()?;

        Ok(config)
    }

    /// Load configuration from the environment and the usual file locations
    ///
    /// Lookup order: `HELPDESK_CONFIG_PATH`, `helpdesk.yaml`, `helpdesk.yml`,
    /// then built-in defaults. Environment overrides apply in every case.
    pub fn load() -> HelpdeskResult<Config> {
        let config = if let Ok(config_path) = env::var(CONFIG_PATH_ENV) {
            Self::load_config(&config_path)?
        } else if Path::new("helpdesk.yaml").exists() {
            Self::load_config("helpdesk.yaml")?
        } else if Path::new("helpdesk.yml").exists() {
            Self::load_config("helpdesk.yml")?
        } else {
            info!("No configuration file found, using defaults");
            Self::from_defaults()?
        };

        Ok(config)
    }

    /// Built-in defaults with environment overrides applied
    pub fn from_defaults() -> Result<Config, ConfigError> {
        let mut config = Config::default();
        Self::apply_env_overrides(&mut config)?;
        config.validate_all()?;
        Ok(config)
    }

    /// Apply environment variable overrides to configuration
    fn apply_env_overrides(config: &mut Config) -> Result<(), ConfigError> {
        if let Ok(locale) = env::var("HELPDESK_DEFAULT_LOCALE") {
            config.i18n.default_locale = locale;
        }

        if let Ok(locale) = env::var("HELPDESK_FALLBACK_LOCALE") {
            config.i18n.fallback_locale = locale;
        }

        if let Ok(cookie) = env::var("HELPDESK_LOCALE_COOKIE") {
            config.i18n.cookie_name = cookie;
        }

        if let Ok(dir) = env::var("HELPDESK_LOCALES_DIR") {
            config.i18n.locales_dir = Some(PathBuf::from(dir));
        }

        if let Ok(debounce) = env::var("HELPDESK_PERSIST_DEBOUNCE_MS") {
            config.i18n.persist_debounce_ms =
                debounce.parse().map_err(|e| ConfigError::EnvParseError {
                    var: "HELPDESK_PERSIST_DEBOUNCE_MS".to_string(),
                    source: Box::new(e),
                })?;
        }

        if let Ok(level) = env::var("HELPDESK_LOG_LEVEL") {
            config.logging.level = level;
        }

        if let Ok(json) = env::var("HELPDESK_LOG_JSON") {
            config.logging.json = json.parse().map_err(|e| ConfigError::EnvParseError {
                var: "HELPDESK_LOG_JSON".to_string(),
                source: Box::new(e),
            })?;
        }

        Ok(())
    }
}
