//! String lookup for user-facing text
//!
//! Source strings double as catalog keys. Lookups are case-insensitive on
//! the key because layered config sources do not all preserve key case.

use std::collections::HashMap;

use crate::config::Config;

/// Maps a source string to the text shown to the user
pub trait Translate: Send + Sync {
    fn translate(&self, text: &str) -> String;
}

impl<F> Translate for F
where
    F: Fn(&str) -> String + Send + Sync,
{
    fn translate(&self, text: &str) -> String {
        self(text)
    }
}

/// Catalog-backed translator; unknown strings pass through unchanged
#[derive(Debug, Clone, Default)]
pub struct Catalog {
    entries: HashMap<String, String>,
}

impl Catalog {
    pub fn new(entries: HashMap<String, String>) -> Self {
        Self {
            entries: entries
                .into_iter()
                .map(|(k, v)| (k.to_lowercase(), v))
                .collect(),
        }
    }

    /// Build from the `[strings]` config table
    pub fn from_config(config: &Config) -> Self {
        Self::new(config.strings.clone())
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl Translate for Catalog {
    fn translate(&self, text: &str) -> String {
        self.entries
            .get(&text.to_lowercase())
            .cloned()
            .unwrap_or_else(|| text.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unknown_text_passes_through() {
        let catalog = Catalog::default();
        assert_eq!(catalog.translate("Sign up"), "Sign up");
    }

    #[test]
    fn test_lookup_ignores_key_case() {
        let mut entries = HashMap::new();
        entries.insert("sign up".to_string(), "Inscribirse".to_string());
        let catalog = Catalog::new(entries);

        assert_eq!(catalog.translate("Sign up"), "Inscribirse");
        assert_eq!(catalog.translate("SIGN UP"), "Inscribirse");
        assert_eq!(catalog.len(), 1);
    }

    #[test]
    fn test_from_config() {
        let mut config = Config::default();
        config
            .strings
            .insert("Continue".to_string(), "Weiter".to_string());
        let catalog = Catalog::from_config(&config);
        assert_eq!(catalog.translate("Continue"), "Weiter");
    }

    #[test]
    fn test_closure_translator() {
        let upper = |text: &str| text.to_uppercase();
        assert_eq!(upper.translate("hello"), "HELLO");
    }
}
