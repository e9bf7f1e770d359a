//! Validation helpers for configuration values

use regex::Regex;
use std::sync::LazyLock;
use unic_langid::LanguageIdentifier;
use validator::ValidationError;

/// Cookie names are restricted to RFC 6265 token characters we actually use
pub static COOKIE_NAME_REGEX: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^[A-Za-z0-9_.\-]+$").expect("Invalid cookie name regex pattern")
});

const LOG_LEVELS: [&str; 5] = ["trace", "debug", "info", "warn", "error"];

/// Validate a configured locale code.
///
/// Catalog keys are primary language subtags, so the code must be a valid
/// BCP 47 language identifier with no script or region, in canonical
/// (lowercase) form: `"es"` passes, `"es-ES"` and `"ES"` do not.
pub fn validate_locale_code(code: &str) -> Result<(), ValidationError> {
    if code.is_empty() {
        return Err(ValidationError::new("empty_locale_code"));
    }

    let langid: LanguageIdentifier = code
        .parse()
        .map_err(|_| ValidationError::new("invalid_locale_code"))?;

    if code.contains('-') || code.contains('_') || langid.to_string() != code {
        return Err(ValidationError::new("locale_code_not_primary_subtag"));
    }

    Ok(())
}

/// Validate a cookie name
pub fn validate_cookie_name(name: &str) -> Result<(), ValidationError> {
    if COOKIE_NAME_REGEX.is_match(name) {
        Ok(())
    } else {
        Err(ValidationError::new("invalid_cookie_name"))
    }
}

/// Validate a log level, optionally written as an `EnvFilter` directive list
pub fn validate_log_level(level: &str) -> Result<(), ValidationError> {
    let valid = !level.is_empty()
        && level.split(',').all(|directive| {
            let level = directive.rsplit('=').next().unwrap_or(directive).trim();
            LOG_LEVELS.contains(&level.to_ascii_lowercase().as_str())
        });

    if valid {
        Ok(())
    } else {
        Err(ValidationError::new("invalid_log_level"))
    }
}
