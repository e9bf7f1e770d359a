//! Integration tests for helpdesk-config crate.

use helpdesk_common::test_utils::init_test_logging;
use helpdesk_config::{Config, ConfigCache, ConfigLoader};
use std::fs;

#[test]
fn test_default_config_validation() {
    let mut config = Config::default();
    assert!(config.validate_all().is_ok());

    config.i18n.cookie_name = "bad cookie".to_string();
    assert!(config.validate_all().is_err());
}

#[test]
fn test_config_cache() {
    init_test_logging();

    let config = Config::default();
    let cache = ConfigCache::new(config.clone());

    let cached_config = cache.get();
    assert_eq!(cached_config.i18n.default_locale, config.i18n.default_locale);

    let mut new_config = config;
    new_config.i18n.default_locale = "en".to_string();
    cache.update(new_config).unwrap();
    assert_eq!(cache.get().i18n.default_locale, "en");
}

#[test]
fn test_config_cache_rejects_invalid_update() {
    let cache = ConfigCache::default();

    let mut invalid = Config::default();
    invalid.i18n.fallback_locale = "en-GB".to_string();

    assert!(cache.update(invalid).is_err());
    assert_eq!(cache.get().i18n.fallback_locale, "en");
}

#[test]
fn test_load_config_with_locales_dir() {
    let dir = helpdesk_common::test_utils::create_temp_dir();
    let path = dir.path().join("helpdesk.yaml");
    fs::write(
        &path,
        "i18n:\n  default_locale: en\n  locales_dir: /srv/helpdesk/locales\n  persist_debounce_ms: 0\n",
    )
    .unwrap();

    let config = ConfigLoader::load_config(&path).unwrap();
    assert_eq!(
        config.i18n.locales_dir.as_deref(),
        Some(std::path::Path::new("/srv/helpdesk/locales"))
    );
    assert_eq!(config.i18n.persist_debounce_ms, 0);
}
