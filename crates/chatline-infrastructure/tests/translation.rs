use chatline_core::translation::{TranslationCache, TranslationProvider, Translations};
use chatline_infrastructure::{BundledTranslationProvider, MemoryTranslationCache};
use std::sync::Arc;

#[tokio::test]
async fn test_english_catalog() {
    let provider = BundledTranslationProvider::new(Arc::new(MemoryTranslationCache::new()));

    let translations = provider.translations("en").await.expect("en catalog");

    assert_eq!(translations.get("button.send"), Some("Send"));
    assert_eq!(translations.get("text.placeholder"), Some("Type your message here..."));
}

#[tokio::test]
async fn test_cached_catalog_wins_over_bundled() {
    let cache = Arc::new(MemoryTranslationCache::new());
    cache.set("i18n.en", r#"{"button.send":"Go"}"#.to_string());
    let provider = BundledTranslationProvider::new(cache);

    let translations = provider.translations("en").await.unwrap();

    assert_eq!(translations.get("button.send"), Some("Go"));
    assert_eq!(translations.get("text.placeholder"), None);
}

#[tokio::test]
async fn test_empty_cached_catalog_is_ignored() {
    let cache = Arc::new(MemoryTranslationCache::new());
    cache.set("i18n.en", "{}".to_string());
    let provider = BundledTranslationProvider::new(cache.clone());

    let translations = provider.translations("en").await.unwrap();

    assert_eq!(translations.get("button.send"), Some("Send"));
    let stored: Translations = serde_json::from_str(&cache.get("i18n.en").unwrap()).unwrap();
    assert_eq!(stored, translations);
}

#[tokio::test]
async fn test_unknown_locale_yields_none() {
    let cache = Arc::new(MemoryTranslationCache::new());
    let provider = BundledTranslationProvider::new(cache.clone());

    assert!(provider.translations("fr").await.is_none());
    assert!(cache.get("i18n.fr").is_none());
}

#[tokio::test]
async fn test_custom_catalog() {
    let provider = BundledTranslationProvider::empty(Arc::new(MemoryTranslationCache::new()))
        .with_catalog("es", Translations::new().with("button.send", "Enviar"));

    assert!(provider.translations("en").await.is_none());
    assert_eq!(
        provider.translations("es").await.unwrap().get("button.send"),
        Some("Enviar")
    );
}
