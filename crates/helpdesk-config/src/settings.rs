//! Application configuration structures

use helpdesk_common::LoggingConfig;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use validator::Validate;

/// Main configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize, Validate)]
#[serde(default)]
pub struct Config {
    /// Locale resolution and translation settings
    #[validate(nested)]
    pub i18n: I18nConfig,

    /// Logging configuration
    #[validate(nested)]
    pub logging: LoggingSettings,
}

/// Locale resolution and translation settings
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
#[serde(default)]
pub struct I18nConfig {
    /// Locale used when no request or client signal names a known locale
    #[validate(custom(function = "crate::validation::validate_locale_code"))]
    pub default_locale: String,

    /// Locale consulted when a key is missing from the active locale
    #[validate(custom(function = "crate::validation::validate_locale_code"))]
    pub fallback_locale: String,

    /// Cookie read by the server-side resolver
    #[validate(custom(function = "crate::validation::validate_cookie_name"))]
    pub cookie_name: String,

    /// Cookie written by the client-side locale switcher
    #[validate(custom(function = "crate::validation::validate_cookie_name"))]
    pub client_cookie_name: String,

    /// Client storage key holding the last chosen locale
    #[validate(length(min = 1, message = "Storage key cannot be empty"))]
    pub storage_key: String,

    /// Directory with one `<code>.json` catalog per locale.
    /// The catalogs compiled into the binary are used when unset.
    pub locales_dir: Option<PathBuf>,

    /// Delay before a locale change is persisted to client storage
    #[validate(range(max = 60000, message = "Debounce cannot exceed 60000 ms"))]
    pub persist_debounce_ms: u64,
}

impl Default for I18nConfig {
    fn default() -> Self {
        Self {
            default_locale: "es".to_string(),
            fallback_locale: "en".to_string(),
            cookie_name: "locale".to_string(),
            client_cookie_name: "trudesk_locale".to_string(),
            storage_key: "helpone.locale".to_string(),
            locales_dir: None,
            persist_debounce_ms: 250,
        }
    }
}

/// Logging settings as they appear in the configuration file
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
#[serde(default)]
pub struct LoggingSettings {
    /// Log level
    #[validate(custom(function = "crate::validation::validate_log_level"))]
    pub level: String,

    /// Emit JSON lines instead of human-readable output
    pub json: bool,

    /// Optional log file path
    pub file_path: Option<String>,
}

impl Default for LoggingSettings {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            json: false,
            file_path: None,
        }
    }
}

impl From<&LoggingSettings> for LoggingConfig {
    fn from(settings: &LoggingSettings) -> Self {
        Self {
            level: settings.level.clone(),
            json_format: settings.json,
            file_path: settings.file_path.clone(),
            ..LoggingConfig::default()
        }
    }
}

impl Config {
    /// Validate the whole configuration tree
    pub fn validate_all(&self) -> Result<(), validator::ValidationErrors> {
        self.validate()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_is_valid() {
        let config = Config::default();
        assert!(config.validate_all().is_ok());
        assert_eq!(config.i18n.default_locale, "es");
        assert_eq!(config.i18n.fallback_locale, "en");
        assert_eq!(config.i18n.cookie_name, "locale");
    }

    #[test]
    fn test_region_tagged_default_locale_is_rejected() {
        let mut config = Config::default();
        config.i18n.default_locale = "es-ES".to_string();
        assert!(config.validate_all().is_err());
    }

    #[test]
    fn test_excessive_debounce_is_rejected() {
        let mut config = Config::default();
        config.i18n.persist_debounce_ms = 120_000;
        assert!(config.validate_all().is_err());
    }

    #[test]
    fn test_logging_settings_conversion() {
        let settings = LoggingSettings {
            level: "debug".to_string(),
            json: true,
            file_path: Some("i18n.log".to_string()),
        };
        let logging = LoggingConfig::from(&settings);
        assert_eq!(logging.level, "debug");
        assert!(logging.json_format);
        assert_eq!(logging.file_path.as_deref(), Some("i18n.log"));
    }

    #[test]
    fn test_partial_yaml_uses_defaults() {
        let config: Config = serde_yaml::from_str("i18n:\n  default_locale: en\n").unwrap();
        assert_eq!(config.i18n.default_locale, "en");
        assert_eq!(config.i18n.fallback_locale, "en");
        assert_eq!(config.logging.level, "info");
    }
}
