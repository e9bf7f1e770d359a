//! Locale codes and normalization

use serde::{Deserialize, Serialize};
use std::borrow::Borrow;
use std::fmt;

/// Reduce a language tag to its lowercase primary subtag.
///
/// `"es-ES"`, `"ES"` and `"es"` all normalize to `"es"`. The result never
/// contains a hyphen, so normalizing twice is the same as normalizing once.
/// Values that are not tags (a whole `Accept-Language` header, garbage)
/// still normalize to *something*; it simply won't match a catalog.
pub fn normalize(raw: &str) -> String {
    let primary = raw.split('-').next().unwrap_or_default();
    primary.trim().to_lowercase()
}

/// A normalized locale code such as `"en"` or `"es"`.
///
/// Constructed only through normalization, so every value is already in
/// the form used as a catalog key.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct LocaleCode(String);

impl LocaleCode {
    /// Normalize `raw` into a locale code. Returns `None` when nothing is left.
    pub fn new(raw: &str) -> Option<Self> {
        let code = normalize(raw);
        if code.is_empty() {
            None
        } else {
            Some(Self(code))
        }
    }

    /// The code as a string slice
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for LocaleCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl AsRef<str> for LocaleCode {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl Borrow<str> for LocaleCode {
    fn borrow(&self) -> &str {
        &self.0
    }
}

impl PartialEq<str> for LocaleCode {
    fn eq(&self, other: &str) -> bool {
        self.0 == other
    }
}

impl PartialEq<&str> for LocaleCode {
    fn eq(&self, other: &&str) -> bool {
        self.0 == *other
    }
}

impl TryFrom<String> for LocaleCode {
    type Error = String;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(&value).ok_or_else(|| format!("'{value}' is not a locale code"))
    }
}

impl From<LocaleCode> for String {
    fn from(code: LocaleCode) -> Self {
        code.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_normalize_strips_region_and_case() {
        assert_eq!(normalize("es-ES"), "es");
        assert_eq!(normalize("EN-us"), "en");
        assert_eq!(normalize("es"), "es");
        assert_eq!(normalize(""), "");
    }

    #[test]
    fn test_region_variant_matches_bare_code() {
        assert_eq!(normalize("es-ES"), normalize("es"));
    }

    #[test]
    fn test_header_string_normalizes_to_first_tag() {
        assert_eq!(normalize("en-US,en;q=0.9"), "en");
        assert_eq!(normalize("es;q=0.9,en"), "es;q=0.9,en");
    }

    #[test]
    fn test_locale_code_rejects_empty() {
        assert!(LocaleCode::new("").is_none());
        assert!(LocaleCode::new("-US").is_none());
        assert_eq!(LocaleCode::new("pt-BR").unwrap(), "pt");
    }

    #[test]
    fn test_locale_code_serde() {
        let code: LocaleCode = serde_json::from_str("\"ES-mx\"").unwrap();
        assert_eq!(code.as_str(), "es");
        assert_eq!(serde_json::to_string(&code).unwrap(), "\"es\"");
        assert!(serde_json::from_str::<LocaleCode>("\"\"").is_err());
    }

    proptest! {
        #[test]
        fn test_normalize_is_idempotent(raw in ".*") {
            let once = normalize(&raw);
            prop_assert_eq!(normalize(&once), once.clone());
            prop_assert!(!once.contains('-'));
        }
    }
}
