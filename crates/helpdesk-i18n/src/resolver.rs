//! Locale resolution from request and client signals
//!
//! Both the server-side (per request) and the client-side (stored
//! preference) paths build an ordered candidate list and hand it to the
//! same matching routine: normalize each candidate, return the first one
//! with a catalog, otherwise the default locale.

use crate::catalog::TranslationCatalog;
use crate::locale::LocaleCode;
use std::collections::HashMap;
use std::sync::Arc;
use tracing::trace;

/// Cookie read by [`LocaleResolver::resolve_request`] unless configured otherwise
pub const DEFAULT_LOCALE_COOKIE: &str = "locale";

/// Request-like input to locale resolution.
///
/// Hosts expose whatever they have; every signal is optional.
pub trait LocaleRequest {
    /// Value of the cookie named `name`
    fn cookie(&self, name: &str) -> Option<&str>;

    /// Preferred locales from the host's language negotiation, best first.
    /// `None` when the host has no negotiation support.
    fn accepted_languages(&self) -> Option<Vec<String>> {
        None
    }

    /// Raw `Accept-Language` header
    fn accept_language(&self) -> Option<&str>;
}

/// Parse an `Accept-Language` header into tags ordered by preference.
///
/// Tags keep their header order among equal weights. `q=0` entries and
/// the `*` wildcard are dropped; an unparsable weight counts as 1.
pub fn parse_accept_language(header: &str) -> Vec<String> {
    let mut weighted: Vec<(usize, f32, String)> = header
        .split(',')
        .enumerate()
        .filter_map(|(position, part)| {
            let mut pieces = part.split(';');
            let tag = pieces.next()?.trim();
            if tag.is_empty() || tag == "*" {
                return None;
            }

            let quality = pieces
                .filter_map(|param| {
                    let (name, value) = param.split_once('=')?;
                    (name.trim() == "q").then(|| value.trim().parse::<f32>().ok())?
                })
                .next()
                .unwrap_or(1.0);

            (quality > 0.0).then(|| (position, quality, tag.to_string()))
        })
        .collect();

    weighted.sort_by(|a, b| b.1.total_cmp(&a.1).then(a.0.cmp(&b.0)));
    weighted.into_iter().map(|(_, _, tag)| tag).collect()
}

/// Plain request signals for hosts without their own request type
#[derive(Debug, Clone, Default)]
pub struct RequestSignals {
    cookies: HashMap<String, String>,
    accept_language: Option<String>,
    negotiated: Option<Vec<String>>,
}

impl RequestSignals {
    /// Create an empty set of signals
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a cookie
    pub fn with_cookie(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.cookies.insert(name.into(), value.into());
        self
    }

    /// Set the raw `Accept-Language` header
    pub fn with_accept_language(mut self, header: impl Into<String>) -> Self {
        self.accept_language = Some(header.into());
        self
    }

    /// Use an explicit negotiation result instead of parsing the header
    pub fn with_accepted_languages<I, S>(mut self, languages: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.negotiated = Some(languages.into_iter().map(Into::into).collect());
        self
    }
}

impl LocaleRequest for RequestSignals {
    fn cookie(&self, name: &str) -> Option<&str> {
        self.cookies.get(name).map(String::as_str)
    }

    fn accepted_languages(&self) -> Option<Vec<String>> {
        self.negotiated.clone().or_else(|| {
            self.accept_language
                .as_deref()
                .map(parse_accept_language)
        })
    }

    fn accept_language(&self) -> Option<&str> {
        self.accept_language.as_deref()
    }
}

/// Signals available to the client-side locale state, in priority order
#[derive(Debug, Clone, Default)]
pub struct ClientSignals {
    /// Locale previously chosen and persisted (cookie or client storage)
    pub stored_preference: Option<String>,
    /// Session user's `preferences.language`
    pub user_preference: Option<String>,
    /// Session user's `language`
    pub user_language: Option<String>,
    /// Locale passed down with the page view data
    pub view_locale: Option<String>,
    /// The document's `lang` attribute
    pub document_language: Option<String>,
    /// Locale reported by the platform
    pub system_locale: Option<String>,
}

impl ClientSignals {
    /// Candidates in priority order
    pub fn candidates(&self) -> impl Iterator<Item = &str> {
        [
            &self.stored_preference,
            &self.user_preference,
            &self.user_language,
            &self.view_locale,
            &self.document_language,
            &self.system_locale,
        ]
        .into_iter()
        .filter_map(Option::as_deref)
    }
}

/// Picks the active locale from ordered signals
#[derive(Debug, Clone)]
pub struct LocaleResolver {
    catalog: Arc<TranslationCatalog>,
    cookie_name: String,
}

impl LocaleResolver {
    /// Create a resolver reading the default `locale` cookie
    pub fn new(catalog: Arc<TranslationCatalog>) -> Self {
        Self {
            catalog,
            cookie_name: DEFAULT_LOCALE_COOKIE.to_string(),
        }
    }

    /// Read the locale cookie from `name` instead
    pub fn with_cookie_name(mut self, name: impl Into<String>) -> Self {
        self.cookie_name = name.into();
        self
    }

    /// Cookie consulted first during request resolution
    pub fn cookie_name(&self) -> &str {
        &self.cookie_name
    }

    /// The configured default locale
    pub fn default_locale(&self) -> &LocaleCode {
        self.catalog.default_locale()
    }

    /// Normalize `raw` and keep it only if a catalog exists for it
    pub fn supported(&self, raw: &str) -> Option<LocaleCode> {
        self.catalog.supported(raw)
    }

    /// First candidate with a catalog; the default locale is always tried last.
    pub fn resolve_candidates<I, S>(&self, candidates: I) -> LocaleCode
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let default = self.default_locale();

        candidates
            .into_iter()
            .find_map(|candidate| {
                let resolved = self.supported(candidate.as_ref());
                trace!(candidate = candidate.as_ref(), matched = resolved.is_some(), "Locale candidate");
                resolved
            })
            .or_else(|| self.supported(default.as_str()))
            .unwrap_or_else(|| default.clone())
    }

    /// Resolve the locale for an incoming request.
    ///
    /// Order: locale cookie, each negotiated language, the raw
    /// `Accept-Language` header, then the default locale.
    pub fn resolve_request<R>(&self, request: Option<&R>) -> LocaleCode
    where
        R: LocaleRequest + ?Sized,
    {
        let Some(request) = request else {
            return self.default_locale().clone();
        };

        let mut candidates: Vec<String> = Vec::new();
        if let Some(cookie) = request.cookie(&self.cookie_name) {
            candidates.push(cookie.to_string());
        }
        if let Some(accepted) = request.accepted_languages() {
            candidates.extend(accepted);
        }
        if let Some(header) = request.accept_language() {
            candidates.push(header.to_string());
        }

        self.resolve_candidates(candidates)
    }

    /// Resolve the initial client-side locale
    pub fn resolve_client(&self, signals: &ClientSignals) -> LocaleCode {
        self.resolve_candidates(signals.candidates())
    }
}
