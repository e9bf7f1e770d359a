//! Observability for missing translations
//!
//! Lookups never fail; a hook only gets to *see* misses. Hooks must not
//! panic and should be cheap, since they run on the translation path.

use dashmap::DashMap;
use std::sync::atomic::{AtomicU64, Ordering};
use tracing::debug;

/// How far a lookup had to fall back
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MissKind {
    /// Found only in the fallback locale
    FallbackUsed,
    /// Found nowhere; the raw key was returned
    Untranslated,
}

/// A single missing-key observation
#[derive(Debug, Clone, Copy)]
pub struct MissingKey<'a> {
    /// Dotted key that was requested
    pub key: &'a str,
    /// Locale the lookup started from
    pub locale: &'a str,
    /// Fallback locale that was consulted
    pub fallback_locale: &'a str,
    /// Outcome of the lookup
    pub kind: MissKind,
}

/// Receives missing-key observations
pub trait MissingKeyHook: Send + Sync {
    /// Called once per lookup that missed the active locale
    fn on_missing(&self, event: &MissingKey<'_>);
}

impl<F> MissingKeyHook for F
where
    F: Fn(&MissingKey<'_>) + Send + Sync,
{
    fn on_missing(&self, event: &MissingKey<'_>) {
        self(event)
    }
}

/// Logs each miss at debug level
#[derive(Debug, Default, Clone, Copy)]
pub struct TracingMissingKeyReporter;

impl MissingKeyHook for TracingMissingKeyReporter {
    fn on_missing(&self, event: &MissingKey<'_>) {
        debug!(
            key = event.key,
            locale = event.locale,
            fallback = event.fallback_locale,
            kind = ?event.kind,
            "Translation key missing"
        );
    }
}

/// Counts misses per key
#[derive(Debug, Default)]
pub struct MissingKeyCounter {
    by_key: DashMap<String, u64>,
    fallback_hits: AtomicU64,
    untranslated: AtomicU64,
}

impl MissingKeyCounter {
    /// Create an empty counter
    pub fn new() -> Self {
        Self::default()
    }

    /// Misses recorded for `key`
    pub fn count(&self, key: &str) -> u64 {
        self.by_key.get(key).map(|entry| *entry).unwrap_or(0)
    }

    /// Lookups served by the fallback locale
    pub fn fallback_hits(&self) -> u64 {
        self.fallback_hits.load(Ordering::Relaxed)
    }

    /// Lookups that returned the raw key
    pub fn untranslated(&self) -> u64 {
        self.untranslated.load(Ordering::Relaxed)
    }

    /// Keys with their miss counts, most frequent first
    pub fn snapshot(&self) -> Vec<(String, u64)> {
        let mut counts: Vec<_> = self
            .by_key
            .iter()
            .map(|entry| (entry.key().clone(), *entry.value()))
            .collect();
        counts.sort_by(|a, b| b.1.cmp(&a.1).then_with(|| a.0.cmp(&b.0)));
        counts
    }
}

impl MissingKeyHook for MissingKeyCounter {
    fn on_missing(&self, event: &MissingKey<'_>) {
        *self.by_key.entry(event.key.to_string()).or_insert(0) += 1;
        let counter = match event.kind {
            MissKind::FallbackUsed => &self.fallback_hits,
            MissKind::Untranslated => &self.untranslated,
        };
        counter.fetch_add(1, Ordering::Relaxed);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn miss(key: &str, kind: MissKind) -> MissingKey<'_> {
        MissingKey {
            key,
            locale: "es",
            fallback_locale: "en",
            kind,
        }
    }

    #[test]
    fn test_counter_tracks_keys_and_kinds() {
        let counter = MissingKeyCounter::new();
        counter.on_missing(&miss("webhooks.deliveryLog", MissKind::FallbackUsed));
        counter.on_missing(&miss("webhooks.deliveryLog", MissKind::FallbackUsed));
        counter.on_missing(&miss("does.not.exist", MissKind::Untranslated));

        assert_eq!(counter.count("webhooks.deliveryLog"), 2);
        assert_eq!(counter.count("does.not.exist"), 1);
        assert_eq!(counter.count("nav.dashboard"), 0);
        assert_eq!(counter.fallback_hits(), 2);
        assert_eq!(counter.untranslated(), 1);
        assert_eq!(
            counter.snapshot(),
            vec![
                ("webhooks.deliveryLog".to_string(), 2),
                ("does.not.exist".to_string(), 1)
            ]
        );
    }

    #[test]
    fn test_closures_are_hooks() {
        let seen = std::sync::Mutex::new(Vec::new());
        let hook = |event: &MissingKey<'_>| seen.lock().unwrap().push(event.key.to_string());
        hook.on_missing(&miss("a.b", MissKind::Untranslated));
        assert_eq!(*seen.lock().unwrap(), vec!["a.b".to_string()]);
    }
}
