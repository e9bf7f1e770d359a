//! Key lookup with fallback and placeholder interpolation
//!
//! Every operation here is total: missing locales, missing keys and
//! missing parameters all degrade to a usable string. Rendering UI text
//! must never fail because a translation is incomplete.

use crate::args::TranslationArgs;
use crate::catalog::{CatalogNode, TranslationCatalog};
use crate::hook::{MissKind, MissingKey, MissingKeyHook};
use crate::locale::normalize;
use once_cell::sync::Lazy;
use regex::{Captures, Regex};
use std::borrow::Cow;
use std::fmt;
use std::sync::Arc;

/// `{{ name }}` with optional whitespace inside the braces
static PLACEHOLDER: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"\{\{\s*([A-Za-z0-9_]+)\s*\}\}").expect("Invalid placeholder regex pattern")
});

/// Replace every placeholder in `template` with the matching argument.
///
/// Missing and null arguments become the empty string. Substituted text
/// is not scanned again.
pub fn interpolate<'t>(template: &'t str, args: Option<&TranslationArgs>) -> Cow<'t, str> {
    PLACEHOLDER.replace_all(template, |caps: &Captures<'_>| {
        args.and_then(|args| args.text(&caps[1]))
            .map(Cow::into_owned)
            .unwrap_or_default()
    })
}

/// Outcome of resolving a key
#[derive(Debug, Clone, PartialEq)]
pub enum Translation<'a> {
    /// An interpolated template
    Text(String),
    /// The key named a group of messages rather than a single one
    Branch(&'a CatalogNode),
    /// Nothing matched; carries the raw key
    Untranslated(String),
}

impl Translation<'_> {
    /// Render as a string. Branches render as the key that produced them.
    pub fn into_string_or(self, key: &str) -> String {
        match self {
            Self::Text(text) | Self::Untranslated(text) => text,
            Self::Branch(_) => key.to_string(),
        }
    }

    /// Whether a catalog entry was found
    pub fn is_translated(&self) -> bool {
        !matches!(self, Self::Untranslated(_))
    }
}

/// Resolves dotted keys against a shared catalog
#[derive(Clone)]
pub struct Translator {
    catalog: Arc<TranslationCatalog>,
    hook: Option<Arc<dyn MissingKeyHook>>,
}

impl fmt::Debug for Translator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Translator")
            .field("locales", &self.catalog.locales())
            .field("fallback_locale", self.catalog.fallback_locale())
            .field("hook", &self.hook.is_some())
            .finish()
    }
}

impl Translator {
    /// Create a translator over `catalog`
    pub fn new(catalog: Arc<TranslationCatalog>) -> Self {
        Self {
            catalog,
            hook: None,
        }
    }

    /// Attach a missing-key hook
    pub fn with_hook(mut self, hook: Arc<dyn MissingKeyHook>) -> Self {
        self.hook = Some(hook);
        self
    }

    /// The catalog this translator reads
    pub fn catalog(&self) -> &Arc<TranslationCatalog> {
        &self.catalog
    }

    /// Resolve `key` for `locale`.
    ///
    /// Walks the active locale's tree, then the fallback locale's tree.
    /// Leaves are interpolated; branches are returned untouched.
    pub fn resolve(
        &self,
        key: &str,
        locale: &str,
        args: Option<&TranslationArgs>,
    ) -> Translation<'_> {
        if key.is_empty() {
            return Translation::Untranslated(String::new());
        }

        let active = self.catalog.tree(locale);
        let fallback = self.catalog.tree(self.catalog.fallback_locale().as_str());

        let node = match active.walk(key) {
            Some(node) => node,
            None => match fallback.walk(key) {
                Some(node) => {
                    self.report(key, locale, MissKind::FallbackUsed);
                    node
                }
                None => {
                    self.report(key, locale, MissKind::Untranslated);
                    return Translation::Untranslated(key.to_string());
                }
            },
        };

        match node {
            CatalogNode::Text(template) => Translation::Text(interpolate(template, args).into_owned()),
            CatalogNode::Branch(_) => Translation::Branch(node),
        }
    }

    /// Translate `key` for `locale`, falling back to the key itself
    pub fn translate(&self, key: &str, locale: &str, args: Option<&TranslationArgs>) -> String {
        self.resolve(key, locale, args).into_string_or(key)
    }

    /// Translate `key`, returning `default` when nothing matched
    pub fn translate_or(
        &self,
        key: &str,
        locale: &str,
        args: Option<&TranslationArgs>,
        default: &str,
    ) -> String {
        match self.resolve(key, locale, args) {
            Translation::Untranslated(_) => default.to_string(),
            translation => translation.into_string_or(key),
        }
    }

    /// Whether `key` resolves in `locale` or the fallback locale
    pub fn has_key(&self, key: &str, locale: &str) -> bool {
        self.catalog.tree(locale).walk(key).is_some()
            || self
                .catalog
                .tree(self.catalog.fallback_locale().as_str())
                .walk(key)
                .is_some()
    }

    fn report(&self, key: &str, locale: &str, kind: MissKind) {
        if let Some(hook) = &self.hook {
            let locale = normalize(locale);
            hook.on_missing(&MissingKey {
                key,
                locale: &locale,
                fallback_locale: self.catalog.fallback_locale().as_str(),
                kind,
            });
        }
    }
}
