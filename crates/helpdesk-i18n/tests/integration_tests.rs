//! Integration tests for the i18n system

use helpdesk_common::test_utils::{catalog_fixtures, create_temp_dir, init_test_logging};
use helpdesk_config::I18nConfig;
use helpdesk_i18n::{
    normalize, translation_args, ClientSignals, I18nError, I18nManager, LocaleStore,
    MemoryLocaleStore, MissingKeyCounter, RequestSignals,
};
use std::fs;
use std::sync::Arc;
use std::time::Duration;
use tempfile::TempDir;

/// Create a temporary directory with test locale files
fn create_test_locales() -> TempDir {
    let temp_dir = create_temp_dir();
    fs::write(
        temp_dir.path().join("en.json"),
        catalog_fixtures::english_catalog_json(),
    )
    .unwrap();
    fs::write(
        temp_dir.path().join("es.json"),
        catalog_fixtures::spanish_catalog_json(),
    )
    .unwrap();
    temp_dir
}

fn manager_for(dir: &TempDir) -> I18nManager {
    init_test_logging();
    let config = I18nConfig {
        locales_dir: Some(dir.path().to_path_buf()),
        ..I18nConfig::default()
    };
    I18nManager::new(&config).unwrap()
}

#[test]
fn test_literal_lookup_per_locale() {
    let temp_dir = create_test_locales();
    let manager = manager_for(&temp_dir);

    assert_eq!(manager.translate("sidebar.title", "en", None), "Help Desk");
    assert_eq!(manager.translate("sidebar.title", "es", None), "Mesa de Ayuda");
    assert_eq!(manager.translate("sidebar.title", "es-ES", None), "Mesa de Ayuda");
}

#[test]
fn test_fallback_locale_and_identity() {
    let temp_dir = create_test_locales();
    let manager = manager_for(&temp_dir);

    assert_eq!(manager.translate("onlyInEnglish", "es", None), "Fallback text");
    assert_eq!(
        manager.translate("does.not.exist", "es", None),
        "does.not.exist"
    );
    // unknown locales read the default (es) catalog
    assert_eq!(manager.translate("sidebar.title", "fr", None), "Mesa de Ayuda");
}

#[test]
fn test_interpolation() {
    let temp_dir = create_test_locales();
    let manager = manager_for(&temp_dir);

    let full = translation_args!["name" => "Ana", "count" => 3];
    assert_eq!(
        manager.translate("tickets.summary", "en", Some(&full)),
        "Hello Ana, you have 3 tickets"
    );

    let partial = translation_args!["name" => "Ana"];
    assert_eq!(
        manager.translate("tickets.summary", "en", Some(&partial)),
        "Hello Ana, you have  tickets"
    );
}

#[test]
fn test_request_resolution() {
    let temp_dir = create_test_locales();
    let manager = manager_for(&temp_dir);

    let request = RequestSignals::new()
        .with_cookie("locale", "es")
        .with_accept_language("en-US,en;q=0.9");
    assert_eq!(manager.resolve_request(Some(&request)), "es");

    let header_only = RequestSignals::new().with_accept_language("en-US,en;q=0.9");
    assert_eq!(manager.resolve_request(Some(&header_only)), "en");

    assert_eq!(manager.resolve_request::<RequestSignals>(None), "es");
}

#[test]
fn test_normalization_properties() {
    for raw in ["es-ES", "ES", " es ", "es"] {
        let once = normalize(raw);
        assert_eq!(once, "es");
        assert_eq!(normalize(&once), once);
    }
}

#[test]
fn test_region_tagged_files_are_normalized() {
    let temp_dir = create_temp_dir();
    fs::write(
        temp_dir.path().join("en-US.json"),
        catalog_fixtures::english_catalog_json(),
    )
    .unwrap();
    fs::write(
        temp_dir.path().join("es.json"),
        catalog_fixtures::spanish_catalog_json(),
    )
    .unwrap();

    let manager = manager_for(&temp_dir);
    assert_eq!(manager.available_locales(), vec!["en", "es"]);
    assert_eq!(manager.translate("sidebar.title", "en", None), "Help Desk");
}

#[test]
fn test_malformed_catalog_fails_startup() {
    let temp_dir = create_test_locales();
    fs::write(temp_dir.path().join("es.json"), "{ \"sidebar\": ").unwrap();

    let config = I18nConfig {
        locales_dir: Some(temp_dir.path().to_path_buf()),
        ..I18nConfig::default()
    };
    let err = I18nManager::new(&config).unwrap_err();
    assert!(matches!(err, I18nError::Parse { ref locale, .. } if locale == "es"));
}

#[test]
fn test_unreachable_key_segment_fails_startup() {
    let temp_dir = create_test_locales();
    fs::write(
        temp_dir.path().join("en.json"),
        r#"{"nav": {"a.b": "Dotted"}, "x": "X"}"#,
    )
    .unwrap();

    let config = I18nConfig {
        locales_dir: Some(temp_dir.path().to_path_buf()),
        ..I18nConfig::default()
    };
    let err = I18nManager::new(&config).unwrap_err();
    assert!(matches!(err, I18nError::InvalidCatalog { ref locale, .. } if locale == "en"));
}

#[test]
fn test_every_enumerated_key_resolves_from_directory() {
    let temp_dir = create_test_locales();
    let manager = manager_for(&temp_dir);
    let fallback = manager.fallback_locale().as_str();

    for key in manager.catalog().keys(fallback) {
        assert_ne!(manager.translate(&key, fallback, None), key);
    }
}

#[test]
fn test_missing_fallback_catalog_fails_startup() {
    let temp_dir = create_temp_dir();
    fs::write(
        temp_dir.path().join("es.json"),
        catalog_fixtures::spanish_catalog_json(),
    )
    .unwrap();

    let config = I18nConfig {
        locales_dir: Some(temp_dir.path().to_path_buf()),
        ..I18nConfig::default()
    };
    let err = I18nManager::new(&config).unwrap_err();
    assert!(matches!(err, I18nError::UnknownLocale(ref code) if code == "en"));
}

#[test]
fn test_missing_directory_is_an_error() {
    let temp_dir = create_temp_dir();
    let config = I18nConfig {
        locales_dir: Some(temp_dir.path().join("missing")),
        ..I18nConfig::default()
    };
    assert!(matches!(
        I18nManager::new(&config),
        Err(I18nError::ResourceLoad { .. })
    ));
}

#[test]
fn test_missing_key_hook_counts() {
    let temp_dir = create_test_locales();
    let counter = Arc::new(MissingKeyCounter::new());
    let manager = manager_for(&temp_dir).with_hook(counter.clone());

    manager.translate("onlyInEnglish", "es", None);
    manager.translate("onlyInEnglish", "es", None);
    manager.translate("ghost.key", "en", None);

    assert_eq!(counter.count("onlyInEnglish"), 2);
    assert_eq!(counter.fallback_hits(), 2);
    assert_eq!(counter.untranslated(), 1);
}

#[tokio::test(start_paused = true)]
async fn test_client_state_round_trip_through_file_store() {
    let temp_dir = create_test_locales();
    let state_dir = create_temp_dir();
    let manager = manager_for(&temp_dir);

    let store = Arc::new(manager.client_store(state_dir.path()));
    let state = manager.client_state(&ClientSignals::default());
    assert_eq!(state.locale(), "es");

    let persistence = state.spawn_persistence(store.clone(), manager.persist_debounce());
    assert!(state.set_locale("en"));
    tokio::time::sleep(manager.persist_debounce() + Duration::from_millis(100)).await;
    assert_eq!(store.load().as_deref(), Some("en"));

    // next session starts from the stored preference
    let restored = manager.client_state(&ClientSignals {
        stored_preference: store.load(),
        document_language: Some("es".to_string()),
        ..ClientSignals::default()
    });
    assert_eq!(restored.locale(), "en");
    assert_eq!(restored.t("sidebar.title", None), "Help Desk");

    drop(state);
    persistence.await.unwrap();
}

#[test]
fn test_restore_from_memory_store() {
    let temp_dir = create_test_locales();
    let manager = manager_for(&temp_dir);
    let state = manager.client_state(&ClientSignals::default());

    let store = MemoryLocaleStore::with_value("en-GB");
    assert!(state.restore(&store));
    assert_eq!(state.locale(), "en");
}
