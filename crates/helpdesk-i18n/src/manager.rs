//! Internationalization manager

use crate::args::TranslationArgs;
use crate::catalog::{CatalogNode, TranslationCatalog};
use crate::error::{I18nError, I18nResult};
use crate::hook::{MissingKeyHook, TracingMissingKeyReporter};
use crate::locale::LocaleCode;
use crate::resolver::{ClientSignals, LocaleRequest, LocaleResolver};
use crate::state::LocaleState;
use crate::store::FileLocaleStore;
use crate::translator::Translator;
use helpdesk_config::I18nConfig;
use serde::Serialize;
use std::collections::BTreeMap;
use std::path::Path;
use std::sync::Arc;
use std::time::Duration;
use tracing::info;

/// Entry of a language selector
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LanguageOption {
    /// Locale code sent back when the entry is picked
    pub code: LocaleCode,
    /// Display name in the current locale
    pub label: String,
}

/// Catalog data handed to a client at page load.
///
/// Holds the active locale's tree and the fallback tree, which is all a
/// client needs to translate without fetching the catalog again.
#[derive(Debug, Clone, Serialize)]
pub struct ClientBootstrap<'a> {
    /// Locale the page was rendered in
    pub locale: LocaleCode,
    /// Locale consulted for missing keys
    pub fallback: LocaleCode,
    /// Trees keyed by locale code
    pub translations: BTreeMap<&'a str, &'a CatalogNode>,
}

/// Translator bound to the locale resolved for one request
#[derive(Debug, Clone)]
pub struct RequestTranslator<'a> {
    translator: &'a Translator,
    locale: LocaleCode,
}

impl RequestTranslator<'_> {
    /// Locale resolved for the request
    pub fn locale(&self) -> &LocaleCode {
        &self.locale
    }

    /// Translate `key` in the request's locale
    pub fn t(&self, key: &str, args: Option<&TranslationArgs>) -> String {
        self.translator.translate(key, self.locale.as_str(), args)
    }

    /// Translate `key`, or return `default` when no catalog has it
    pub fn t_or(&self, key: &str, args: Option<&TranslationArgs>, default: &str) -> String {
        self.translator
            .translate_or(key, self.locale.as_str(), args, default)
    }
}

/// Manages internationalization for the application
#[derive(Debug, Clone)]
pub struct I18nManager {
    catalog: Arc<TranslationCatalog>,
    translator: Translator,
    resolver: LocaleResolver,
    client_cookie_name: String,
    storage_key: String,
    persist_debounce: Duration,
}

impl I18nManager {
    /// Create a new I18n manager from configuration.
    ///
    /// Catalogs come from `locales_dir` when set and from the embedded
    /// `locales/` resources otherwise. Both the default and the fallback
    /// locale must have a catalog.
    pub fn new(config: &I18nConfig) -> I18nResult<Self> {
        let default_locale = LocaleCode::new(&config.default_locale)
            .ok_or_else(|| I18nError::UnknownLocale(config.default_locale.clone()))?;
        let fallback_locale = LocaleCode::new(&config.fallback_locale)
            .ok_or_else(|| I18nError::UnknownLocale(config.fallback_locale.clone()))?;

        let catalog = match &config.locales_dir {
            Some(dir) => TranslationCatalog::from_dir(dir, default_locale, fallback_locale)?,
            None => TranslationCatalog::embedded(default_locale, fallback_locale)?,
        };

        for required in [catalog.default_locale(), catalog.fallback_locale()] {
            if !catalog.contains(required.as_str()) {
                return Err(I18nError::UnknownLocale(required.to_string()));
            }
        }

        let catalog = Arc::new(catalog);
        let manager = Self {
            translator: Translator::new(catalog.clone())
                .with_hook(Arc::new(TracingMissingKeyReporter)),
            resolver: LocaleResolver::new(catalog.clone()).with_cookie_name(&config.cookie_name),
            catalog,
            client_cookie_name: config.client_cookie_name.clone(),
            storage_key: config.storage_key.clone(),
            persist_debounce: Duration::from_millis(config.persist_debounce_ms),
        };

        info!(
            default = %manager.default_locale(),
            fallback = %manager.fallback_locale(),
            locales = ?manager.available_locales(),
            "I18nManager initialized"
        );
        Ok(manager)
    }

    /// Replace the missing-key hook
    pub fn with_hook(mut self, hook: Arc<dyn MissingKeyHook>) -> Self {
        self.translator = Translator::new(self.catalog.clone()).with_hook(hook);
        self
    }

    /// The shared catalog
    pub fn catalog(&self) -> &Arc<TranslationCatalog> {
        &self.catalog
    }

    /// The translator
    pub fn translator(&self) -> &Translator {
        &self.translator
    }

    /// The locale resolver
    pub fn resolver(&self) -> &LocaleResolver {
        &self.resolver
    }

    /// Get the default locale
    pub fn default_locale(&self) -> &LocaleCode {
        self.catalog.default_locale()
    }

    /// Get the fallback locale
    pub fn fallback_locale(&self) -> &LocaleCode {
        self.catalog.fallback_locale()
    }

    /// All locales with a catalog, sorted
    pub fn available_locales(&self) -> Vec<&LocaleCode> {
        self.catalog.locales()
    }

    /// Cookie the client writes when the user switches locale
    pub fn client_cookie_name(&self) -> &str {
        &self.client_cookie_name
    }

    /// Client storage key for the chosen locale
    pub fn storage_key(&self) -> &str {
        &self.storage_key
    }

    /// Delay before a locale switch is persisted
    pub fn persist_debounce(&self) -> Duration {
        self.persist_debounce
    }

    /// Resolve the locale of a request; `None` yields the default locale
    pub fn resolve_request<R>(&self, request: Option<&R>) -> LocaleCode
    where
        R: LocaleRequest + ?Sized,
    {
        self.resolver.resolve_request(request)
    }

    /// Translator bound to the locale of `request`
    pub fn for_request<R>(&self, request: Option<&R>) -> RequestTranslator<'_>
    where
        R: LocaleRequest + ?Sized,
    {
        RequestTranslator {
            translator: &self.translator,
            locale: self.resolve_request(request),
        }
    }

    /// Translate `key` in `locale`
    pub fn translate(&self, key: &str, locale: &str, args: Option<&TranslationArgs>) -> String {
        self.translator.translate(key, locale, args)
    }

    /// Language selector entries, labelled in `locale`.
    ///
    /// Labels come from `language.options.<code>`; codes without one are
    /// shown upper-cased.
    pub fn language_options(&self, locale: &str) -> Vec<LanguageOption> {
        self.available_locales()
            .into_iter()
            .map(|code| LanguageOption {
                label: self.translator.translate_or(
                    &format!("language.options.{code}"),
                    locale,
                    None,
                    &code.as_str().to_uppercase(),
                ),
                code: code.clone(),
            })
            .collect()
    }

    /// Locale state for a client session, started from `signals`
    pub fn client_state(&self, signals: &ClientSignals) -> LocaleState {
        LocaleState::from_signals(self.translator.clone(), self.resolver.clone(), signals)
    }

    /// File-backed store for the chosen locale under `dir`
    pub fn client_store<P: AsRef<Path>>(&self, dir: P) -> FileLocaleStore {
        FileLocaleStore::in_dir(dir, &self.storage_key)
    }

    /// Page-load payload for a client rendering in `locale`
    pub fn client_bootstrap(&self, locale: &str) -> ClientBootstrap<'_> {
        let locale = self
            .resolver
            .supported(locale)
            .unwrap_or_else(|| self.default_locale().clone());
        let fallback = self.fallback_locale().clone();

        let translations = [&locale, &fallback]
            .into_iter()
            .filter_map(|code| self.catalog.entry(code.as_str()))
            .map(|(code, tree)| (code.as_str(), tree))
            .collect();

        ClientBootstrap {
            locale,
            fallback,
            translations,
        }
    }
}
