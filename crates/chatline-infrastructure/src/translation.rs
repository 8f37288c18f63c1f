//! Translation cache and bundled catalogs.

use async_trait::async_trait;
use chatline_core::translation::{TranslationCache, TranslationProvider, Translations, cache_key};
use std::collections::HashMap;
use std::sync::{Arc, PoisonError, RwLock};

/// Process-local cache, the equivalent of browser session storage.
#[derive(Debug, Default)]
pub struct MemoryTranslationCache {
    entries: RwLock<HashMap<String, String>>,
}

impl MemoryTranslationCache {
    pub fn new() -> Self {
        Self::default()
    }
}

impl TranslationCache for MemoryTranslationCache {
    fn get(&self, key: &str) -> Option<String> {
        self.entries
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .get(key)
            .cloned()
    }

    fn set(&self, key: &str, value: String) {
        self.entries
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .insert(key.to_string(), value);
    }
}

fn english() -> Translations {
    Translations::new()
        .with("button.send", "Send")
        .with("text.placeholder", "Type your message here...")
}

fn brazilian_portuguese() -> Translations {
    Translations::new()
        .with("button.send", "Enviar")
        .with("text.placeholder", "Digite uma mensagem...")
}

/// Serves the built-in catalogs, cache first.
///
/// A non-empty cached catalog always wins; otherwise the bundled catalog is
/// written to the cache and returned.
pub struct BundledTranslationProvider {
    cache: Arc<dyn TranslationCache>,
    catalogs: HashMap<String, Translations>,
}

impl BundledTranslationProvider {
    /// Provider with the `en` and `pt-br` catalogs.
    pub fn new(cache: Arc<dyn TranslationCache>) -> Self {
        Self::empty(cache)
            .with_catalog("en", english())
            .with_catalog("pt-br", brazilian_portuguese())
    }

    /// Provider without any catalog.
    pub fn empty(cache: Arc<dyn TranslationCache>) -> Self {
        Self {
            cache,
            catalogs: HashMap::new(),
        }
    }

    pub fn with_catalog(mut self, locale: &str, translations: Translations) -> Self {
        self.catalogs.insert(locale.to_lowercase(), translations);
        self
    }

    fn cached(&self, key: &str) -> Option<Translations> {
        let raw = self.cache.get(key)?;
        match serde_json::from_str::<Translations>(&raw) {
            Ok(translations) if !translations.is_empty() => Some(translations),
            Ok(_) => None,
            Err(e) => {
                tracing::warn!(key, "[Translation] ignoring unreadable cache entry: {}", e);
                None
            }
        }
    }
}

#[async_trait]
impl TranslationProvider for BundledTranslationProvider {
    async fn translations(&self, locale: &str) -> Option<Translations> {
        let locale = locale.to_lowercase();
        let key = cache_key(&locale);

        if let Some(translations) = self.cached(&key) {
            return Some(translations);
        }

        let Some(translations) = self.catalogs.get(&locale).cloned() else {
            tracing::warn!(locale = %locale, "[Translation] no catalog for locale");
            return None;
        };

        match serde_json::to_string(&translations) {
            Ok(serialized) => self.cache.set(&key, serialized),
            Err(e) => tracing::warn!(locale = %locale, "[Translation] failed to cache catalog: {}", e),
        }
        Some(translations)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_memory_cache_roundtrip() {
        let cache = MemoryTranslationCache::new();
        assert_eq!(cache.get("i18n.en"), None);
        cache.set("i18n.en", "{}".to_string());
        assert_eq!(cache.get("i18n.en").as_deref(), Some("{}"));
    }

    #[tokio::test]
    async fn test_bundled_catalog_is_cached_on_first_lookup() {
        let cache = Arc::new(MemoryTranslationCache::new());
        let provider = BundledTranslationProvider::new(cache.clone());

        let translations = provider.translations("pt-BR").await.expect("pt-br catalog");
        assert_eq!(translations.get("button.send"), Some("Enviar"));
        assert!(cache.get("i18n.pt-br").is_some());
    }
}
