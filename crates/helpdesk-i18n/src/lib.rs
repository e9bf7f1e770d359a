//! Locale resolution and translation for the help-desk application
//!
//! This crate turns request or client signals into a locale code and
//! dotted keys into display text. It includes:
//!
//! - Locale normalization and resolution (cookie, language negotiation,
//!   `Accept-Language`, stored client preference)
//! - Immutable JSON translation catalogs, validated and embedded at build time
//! - Lookup with fallback to a second locale, then to the key itself
//! - `{{ name }}` placeholder interpolation
//! - A client-side locale state with change notification and debounced
//!   persistence
//!
//! Translation never fails: missing locales, keys and arguments all
//! degrade to a usable string.
//!
//! # Example
//!
//! ```rust
//! use helpdesk_config::I18nConfig;
//! use helpdesk_i18n::{translation_args, I18nManager, RequestSignals};
//!
//! # fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let manager = I18nManager::new(&I18nConfig::default())?;
//!
//! let request = RequestSignals::new().with_accept_language("en-US,en;q=0.9");
//! let t = manager.for_request(Some(&request));
//!
//! let args = translation_args!["name" => "Ana", "count" => 3];
//! assert_eq!(t.t("tickets.summary", Some(&args)), "Hello Ana, you have 3 tickets");
//! # Ok(())
//! # }
//! # example().unwrap();
//! ```

#![warn(clippy::all)]

pub mod args;
pub mod catalog;
pub mod error;
pub mod hook;
pub mod locale;
pub mod manager;
pub mod resolver;
pub mod resource;
pub mod state;
pub mod store;
pub mod translator;

pub use args::TranslationArgs;
pub use catalog::{CatalogNode, TranslationCatalog};
pub use error::{I18nError, I18nResult};
pub use hook::{MissKind, MissingKey, MissingKeyCounter, MissingKeyHook, TracingMissingKeyReporter};
pub use locale::{normalize, LocaleCode};
pub use manager::{ClientBootstrap, I18nManager, LanguageOption, RequestTranslator};
pub use resolver::{parse_accept_language, ClientSignals, LocaleRequest, LocaleResolver, RequestSignals};
pub use resource::ResourceLoader;
pub use state::LocaleState;
pub use store::{FileLocaleStore, LocaleStore, MemoryLocaleStore};
pub use translator::{interpolate, Translation, Translator};
