use super::model::Translations;

/// Key-value store for serialized catalogs (session-scoped in practice).
pub trait TranslationCache: Send + Sync {
    fn get(&self, key: &str) -> Option<String>;
    fn set(&self, key: &str, value: String);
}

/// Resolves the UI string catalog for a locale.
#[async_trait::async_trait]
pub trait TranslationProvider: Send + Sync {
    /// Returns `None` when no catalog exists for `locale`.
    async fn translations(&self, locale: &str) -> Option<Translations>;
}
