//! Error types for internationalization operations
//!
//! Only catalog loading and client-storage persistence can fail. Lookups,
//! resolution and interpolation are total and never produce these errors.

use helpdesk_common::HelpdeskError;
use thiserror::Error;

/// Errors that can occur while loading catalogs or persisting the locale
#[derive(Error, Debug)]
pub enum I18nError {
    /// A catalog file could not be read
    #[error("Failed to load resource file: {path}")]
    ResourceLoad {
        path: String,
        #[source]
        source: std::io::Error,
    },

    /// A catalog file is not valid JSON
    #[error("Failed to parse catalog for locale '{locale}': {source}")]
    Parse {
        locale: String,
        #[source]
        source: serde_json::Error,
    },

    /// A catalog parsed but does not have the expected shape
    #[error("Invalid catalog for locale '{locale}': {reason}")]
    InvalidCatalog { locale: String, reason: String },

    /// No catalog was found at all
    #[error("No translation catalogs found in {location}")]
    NoCatalogs { location: String },

    /// A configured locale has no catalog
    #[error("No catalog for configured locale '{0}'")]
    UnknownLocale(String),

    /// Writing the chosen locale to client storage failed
    #[error("Failed to persist locale preference: {message}")]
    Persistence {
        message: String,
        #[source]
        source: Option<std::io::Error>,
    },
}

impl I18nError {
    /// The locale the error is about, when there is one
    pub fn locale(&self) -> Option<&str> {
        match self {
            Self::Parse { locale, .. } | Self::InvalidCatalog { locale, .. } => Some(locale),
            Self::UnknownLocale(locale) => Some(locale),
            _ => None,
        }
    }
}

impl From<I18nError> for HelpdeskError {
    fn from(err: I18nError) -> Self {
        let locale = err.locale().map(str::to_string);
        HelpdeskError::localization_with_source("Translation subsystem failed", locale, err)
    }
}

/// Result type for i18n operations
pub type I18nResult<T> = Result<T, I18nError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_conversion_keeps_locale() {
        let err = I18nError::InvalidCatalog {
            locale: "es".to_string(),
            reason: "'nav' is an array".to_string(),
        };
        assert_eq!(err.locale(), Some("es"));

        match HelpdeskError::from(err) {
            HelpdeskError::Localization { locale, source, .. } => {
                assert_eq!(locale.as_deref(), Some("es"));
                assert!(source.unwrap().to_string().contains("'nav' is an array"));
            }
            other => panic!("expected a localization error, got {other:?}"),
        }
    }

    #[test]
    fn test_persistence_has_no_locale() {
        let err = I18nError::Persistence {
            message: "storage disabled".to_string(),
            source: None,
        };
        assert_eq!(err.locale(), None);
        assert_eq!(err.to_string(), "Failed to persist locale preference: storage disabled");
    }
}
