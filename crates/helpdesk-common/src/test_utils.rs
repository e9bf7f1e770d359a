//! Test utilities shared by the workspace crates.
//!
//! Enabled for this crate's own tests and, through the `testing` feature,
//! for the dev-dependencies of the other crates.

use std::sync::Once;
use tracing_subscriber::{fmt, EnvFilter};

/// Initialize test logging once per test run.
static INIT: Once = Once::new();

/// Initialize logging for tests with a sensible default configuration.
/// This function is safe to call multiple times and will only initialize once.
pub fn init_test_logging() {
    INIT.call_once(|| {
        let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("debug"));

        // Another test harness may already own the global subscriber
        let _ = fmt()
            .with_test_writer()
            .with_env_filter(filter)
            .try_init();
    });
}

/// Create a temporary directory for tests that automatically cleans up.
#[cfg(feature = "testing")]
pub fn create_temp_dir() -> tempfile::TempDir {
    tempfile::tempdir().expect("Failed to create temporary directory")
}

/// Catalog fixtures shared by the localization tests.
pub mod catalog_fixtures {
    /// A small English catalog with nested keys and placeholders.
    pub fn english_catalog_json() -> &'static str {
        r#"{
  "sidebar": { "title": "Help Desk", "collapse": "Collapse Menu" },
  "tickets": {
    "title": "Tickets",
    "ticketNumber": "Ticket #{{number}}",
    "summary": "Hello {{name}}, you have {{count}} tickets"
  },
  "language": {
    "changeLanguage": "Change language",
    "options": { "en": "English", "es": "Spanish" }
  },
  "onlyInEnglish": "Fallback text"
}"#
    }

    /// A Spanish catalog that lacks `onlyInEnglish`.
    pub fn spanish_catalog_json() -> &'static str {
        r#"{
  "sidebar": { "title": "Mesa de Ayuda", "collapse": "Contraer Menú" },
  "tickets": {
    "title": "Tickets",
    "ticketNumber": "Ticket #{{number}}",
    "summary": "Hola {{name}}, tienes {{count}} tickets"
  },
  "language": {
    "changeLanguage": "Cambiar idioma",
    "options": { "en": "Inglés", "es": "Español" }
  }
}"#
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_init_logging_multiple_calls() {
        init_test_logging();
        init_test_logging();
        init_test_logging();
    }

    #[test]
    fn test_fixtures_are_valid_json() {
        let en: serde_json::Value =
            serde_json::from_str(catalog_fixtures::english_catalog_json()).unwrap();
        let es: serde_json::Value =
            serde_json::from_str(catalog_fixtures::spanish_catalog_json()).unwrap();

        assert!(en.get("onlyInEnglish").is_some());
        assert!(es.get("onlyInEnglish").is_none());
    }
}
