use serde::{Deserialize, Serialize};
use std::collections::HashMap;

pub const DEFAULT_LOCALE: &str = "en";

/// Cache key under which the catalog of `locale` is stored.
pub fn cache_key(locale: &str) -> String {
    format!("i18n.{}", locale)
}

/// Catalog of UI strings for one locale, keyed like `button.send`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Translations(HashMap<String, String>);

impl Translations {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.0.insert(key.into(), value.into());
        self
    }

    pub fn get(&self, key: &str) -> Option<&str> {
        self.0.get(key).map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl<K: Into<String>, V: Into<String>> FromIterator<(K, V)> for Translations {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Self(iter.into_iter().map(|(k, v)| (k.into(), v.into())).collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cache_key() {
        assert_eq!(cache_key("pt-br"), "i18n.pt-br");
    }

    #[test]
    fn test_serializes_as_flat_object() {
        let t = Translations::new().with("button.send", "Send");
        let json = serde_json::to_string(&t).unwrap();
        assert_eq!(json, r#"{"button.send":"Send"}"#);
        let back: Translations = serde_json::from_str(&json).unwrap();
        assert_eq!(back.get("button.send"), Some("Send"));
    }
}
