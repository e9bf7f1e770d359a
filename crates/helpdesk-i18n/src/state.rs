//! Client-side locale state
//!
//! A [`LocaleState`] is the single "current locale" value of a client
//! session. It is passed around by handle instead of living in a global,
//! publishes every switch on a watch channel so views can re-render, and
//! can persist the chosen locale through a [`LocaleStore`].

use crate::args::TranslationArgs;
use crate::locale::LocaleCode;
use crate::resolver::{ClientSignals, LocaleResolver};
use crate::store::LocaleStore;
use crate::translator::Translator;
use std::fmt;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::watch;
use tokio::task::JoinHandle;
use tracing::{debug, warn};

/// Debounce applied to persistence when none is configured
pub const DEFAULT_PERSIST_DEBOUNCE: Duration = Duration::from_millis(250);

struct Inner {
    current: watch::Sender<LocaleCode>,
    translator: Translator,
    resolver: LocaleResolver,
}

/// Shared handle to the active client locale
#[derive(Clone)]
pub struct LocaleState {
    inner: Arc<Inner>,
}

impl fmt::Debug for LocaleState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("LocaleState")
            .field("locale", &*self.inner.current.borrow())
            .field("subscribers", &self.inner.current.receiver_count())
            .finish()
    }
}

impl LocaleState {
    /// Create a state starting at `initial`
    pub fn new(translator: Translator, resolver: LocaleResolver, initial: LocaleCode) -> Self {
        let (current, _) = watch::channel(initial);
        Self {
            inner: Arc::new(Inner {
                current,
                translator,
                resolver,
            }),
        }
    }

    /// Create a state starting at the locale the client signals resolve to
    pub fn from_signals(
        translator: Translator,
        resolver: LocaleResolver,
        signals: &ClientSignals,
    ) -> Self {
        let initial = resolver.resolve_client(signals);
        debug!(locale = %initial, "Initial client locale");
        Self::new(translator, resolver, initial)
    }

    /// The active locale
    pub fn locale(&self) -> LocaleCode {
        self.inner.current.borrow().clone()
    }

    /// Switch to `raw` if a catalog exists for it.
    ///
    /// Returns `false` and leaves the state untouched for unsupported
    /// locales. Subscribers are notified only when the value changes.
    pub fn set_locale(&self, raw: &str) -> bool {
        let Some(code) = self.inner.resolver.supported(raw) else {
            debug!(requested = raw, "Ignoring switch to unsupported locale");
            return false;
        };

        let changed = self.inner.current.send_if_modified(|current| {
            if *current == code {
                false
            } else {
                *current = code.clone();
                true
            }
        });

        if changed {
            debug!(locale = %code, "Locale switched");
        }
        true
    }

    /// Receiver notified on every locale switch
    pub fn subscribe(&self) -> watch::Receiver<LocaleCode> {
        self.inner.current.subscribe()
    }

    /// Translate `key` in the active locale
    pub fn t(&self, key: &str, args: Option<&TranslationArgs>) -> String {
        let locale = self.locale();
        self.inner.translator.translate(key, locale.as_str(), args)
    }

    /// Translate `key` in an explicit locale
    pub fn t_in(&self, key: &str, locale: &str, args: Option<&TranslationArgs>) -> String {
        self.inner.translator.translate(key, locale, args)
    }

    /// The translator backing [`LocaleState::t`]
    pub fn translator(&self) -> &Translator {
        &self.inner.translator
    }

    /// Apply the locale held by `store`, if it is supported
    pub fn restore(&self, store: &dyn LocaleStore) -> bool {
        match store.load() {
            Some(stored) => self.set_locale(&stored),
            None => false,
        }
    }

    /// Persist every locale switch to `store`.
    ///
    /// Switches are debounced: the task waits until `debounce` has passed
    /// without another switch and writes only the latest locale. Failed
    /// writes are logged and otherwise ignored. The task ends once every
    /// handle to this state is dropped.
    ///
    /// # Panics
    ///
    /// Panics when called outside a Tokio runtime.
    pub fn spawn_persistence(
        &self,
        store: Arc<dyn LocaleStore>,
        debounce: Duration,
    ) -> JoinHandle<()> {
        let mut changes = self.subscribe();

        tokio::spawn(async move {
            while changes.changed().await.is_ok() {
                loop {
                    tokio::select! {
                        _ = tokio::time::sleep(debounce) => break,
                        next = changes.changed() => {
                            if next.is_err() {
                                break;
                            }
                        }
                    }
                }

                let locale = changes.borrow_and_update().clone();
                match store.save(locale.as_str()) {
                    Ok(()) => debug!(locale = %locale, "Persisted locale preference"),
                    Err(e) => warn!(locale = %locale, error = %e, "Failed to persist locale preference"),
                }
            }
        })
    }
}
