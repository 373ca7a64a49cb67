//! Message catalogs for user-facing upload text.
//!
//! Catalogs are embedded JSON documents parsed once on first lookup. The
//! locale is always passed in by the caller; there is no process-wide
//! "current locale".

use serde_json::Value;
use std::collections::HashMap;
use std::sync::OnceLock;

static CATALOGS: OnceLock<HashMap<Locale, Value>> = OnceLock::new();

const EN_CATALOG: &str = include_str!("../../locales/en.json");

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Locale {
    #[default]
    En,
}

fn catalogs() -> &'static HashMap<Locale, Value> {
    CATALOGS.get_or_init(|| {
        let mut catalogs = HashMap::new();
        match serde_json::from_str::<Value>(EN_CATALOG) {
            Ok(value) => {
                catalogs.insert(Locale::En, value);
            }
            Err(e) => tracing::warn!("Failed to parse en catalog: {}", e),
        }
        catalogs
    })
}

/// Look up a dotted key (e.g. `imageUpload.error.network`).
///
/// Returns the key itself when the path is missing or does not end on a string.
pub fn t(locale: Locale, key: &str) -> String {
    let Some(mut value) = catalogs().get(&locale) else {
        return key.to_string();
    };

    for segment in key.split('.') {
        match value.get(segment) {
            Some(next) => value = next,
            None => return key.to_string(),
        }
    }

    value
        .as_str()
        .map(str::to_string)
        .unwrap_or_else(|| key.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_resolves_nested_keys() {
        assert_eq!(
            t(Locale::En, "imageUpload.error.generic"),
            "Failed to upload image"
        );
        assert!(t(Locale::En, "imageUpload.error.network").starts_with("Network error"));
    }

    #[test]
    fn test_missing_key_returns_key() {
        assert_eq!(t(Locale::En, "imageUpload.nope"), "imageUpload.nope");
        assert_eq!(t(Locale::En, ""), "");
    }

    #[test]
    fn test_non_string_leaf_returns_key() {
        assert_eq!(t(Locale::En, "imageUpload.error"), "imageUpload.error");
    }
}
