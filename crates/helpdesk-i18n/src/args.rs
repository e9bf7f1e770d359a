//! Named arguments for template interpolation

use serde_json::Value;
use std::borrow::Cow;
use std::collections::HashMap;

/// Named parameters substituted into `{{ name }}` placeholders.
///
/// Values keep their JSON type so that numbers, booleans and explicit
/// nulls can all be passed; [`TranslationArgs::text`] gives the string
/// form used during interpolation.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TranslationArgs {
    values: HashMap<String, Value>,
}

impl TranslationArgs {
    /// Create an empty argument set
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a parameter (builder style)
    pub fn with<K, V>(mut self, key: K, value: V) -> Self
    where
        K: Into<String>,
        V: Into<Value>,
    {
        self.set(key, value);
        self
    }

    /// Add or replace a parameter
    pub fn set<K, V>(&mut self, key: K, value: V)
    where
        K: Into<String>,
        V: Into<Value>,
    {
        self.values.insert(key.into(), value.into());
    }

    /// Raw value of a parameter
    pub fn get(&self, key: &str) -> Option<&Value> {
        self.values.get(key)
    }

    /// String form of a parameter; `None` when missing or null.
    ///
    /// Floats with no fractional part render like integers.
    pub fn text(&self, key: &str) -> Option<Cow<'_, str>> {
        match self.values.get(key)? {
            Value::Null => None,
            Value::String(text) => Some(Cow::Borrowed(text)),
            // whole floats print without a fraction: 3.0 -> "3"
            Value::Number(number) if number.is_f64() => {
                number.as_f64().map(|float| Cow::Owned(float.to_string()))
            }
            other => Some(Cow::Owned(other.to_string())),
        }
    }

    /// Number of parameters
    pub fn len(&self) -> usize {
        self.values.len()
    }

    /// Whether no parameter was given
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }
}

impl<K, V> FromIterator<(K, V)> for TranslationArgs
where
    K: Into<String>,
    V: Into<Value>,
{
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut args = Self::new();
        for (key, value) in iter {
            args.set(key, value);
        }
        args
    }
}

/// Build [`TranslationArgs`] from `key => value` pairs
///
/// ```
/// use helpdesk_i18n::translation_args;
///
/// let args = translation_args!["name" => "Ana", "count" => 3];
/// assert_eq!(args.text("count").as_deref(), Some("3"));
/// ```
#[macro_export]
macro_rules! translation_args {
    () => {
        $crate::TranslationArgs::new()
    };
    ($($key:expr => $value:expr),+ $(,)?) => {{
        let mut args = $crate::TranslationArgs::new();
        $(
            args.set($key, $value);
        )+
        args
    }};
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_text_forms() {
        let args = TranslationArgs::new()
            .with("name", "Ana")
            .with("count", 3)
            .with("ratio", 0.5)
            .with("urgent", true)
            .with("agent", Value::Null)
            .with("missing", None::<String>);

        assert_eq!(args.text("name").as_deref(), Some("Ana"));
        assert_eq!(args.text("count").as_deref(), Some("3"));
        assert_eq!(args.text("ratio").as_deref(), Some("0.5"));
        assert_eq!(args.text("urgent").as_deref(), Some("true"));
        assert_eq!(args.text("agent"), None);
        assert_eq!(args.text("missing"), None);
        assert_eq!(args.text("absent"), None);
        assert_eq!(args.len(), 6);
    }

    #[test]
    fn test_whole_floats_render_without_fraction() {
        let args = translation_args!["count" => 3.0, "ratio" => 2.25];
        assert_eq!(args.text("count").as_deref(), Some("3"));
        assert_eq!(args.text("ratio").as_deref(), Some("2.25"));
    }

    #[test]
    fn test_macro_and_from_iter_agree() {
        let from_macro = translation_args!["name" => "Ana", "count" => 3];
        let collected: TranslationArgs = vec![("name", Value::from("Ana")), ("count", Value::from(3))]
            .into_iter()
            .collect();
        assert_eq!(from_macro, collected);
        assert!(translation_args![].is_empty());
    }
}
