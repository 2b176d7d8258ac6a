//! Localized widget strings

use once_cell::sync::Lazy;
use std::collections::HashMap;

pub const DEFAULT_LOCALE: &str = "en";

type Catalog = HashMap<&'static str, HashMap<&'static str, &'static str>>;

static MESSAGES: Lazy<Catalog> = Lazy::new(|| {
    let en = HashMap::from([
        ("star_popup_title", "Star History"),
        ("influence_chart_title", "Influence Trend"),
        ("chart_tooltip_stars", "Stars"),
        ("chart_tooltip_influence", "Influence"),
    ]);
    let zh_cn = HashMap::from([
        ("star_popup_title", "Star 历史"),
        ("influence_chart_title", "影响力趋势"),
        ("chart_tooltip_stars", "Star 数"),
        ("chart_tooltip_influence", "影响力"),
    ]);
    HashMap::from([("en", en), ("zh_CN", zh_cn)])
});

/// Map browser-style tags onto catalog locales: `zh-CN` → `zh_CN`, `en-US` → `en`
pub fn normalize_locale(locale: &str) -> String {
    let tag = locale.trim().replace('-', "_");
    if MESSAGES.contains_key(tag.as_str()) {
        return tag;
    }
    let lang = tag.split('_').next().unwrap_or_default().to_ascii_lowercase();
    match lang.as_str() {
        "zh" => "zh_CN".to_string(),
        _ => DEFAULT_LOCALE.to_string(),
    }
}

/// Look up `key` in `locale`, then in English, then fall back to the key
pub fn message_by_locale(key: &str, locale: &str) -> String {
    let locale = normalize_locale(locale);
    MESSAGES
        .get(locale.as_str())
        .and_then(|m| m.get(key))
        .or_else(|| MESSAGES.get(DEFAULT_LOCALE).and_then(|m| m.get(key)))
        .map(|s| s.to_string())
        .unwrap_or_else(|| {
            tracing::debug!(key, locale = %locale, "Missing message key");
            key.to_string()
        })
}

/// Locales with a catalog
pub fn supported_locales() -> Vec<&'static str> {
    let mut locales: Vec<&'static str> = MESSAGES.keys().copied().collect();
    locales.sort_unstable();
    locales
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_message_lookup() {
        assert_eq!(message_by_locale("star_popup_title", "en"), "Star History");
        assert_eq!(message_by_locale("star_popup_title", "zh_CN"), "Star 历史");
    }

    #[test]
    fn test_locale_normalization() {
        assert_eq!(normalize_locale("zh-CN"), "zh_CN");
        assert_eq!(normalize_locale("zh-TW"), "zh_CN");
        assert_eq!(normalize_locale("en-US"), "en");
        assert_eq!(normalize_locale("fr"), "en");
        assert_eq!(message_by_locale("influence_chart_title", "en-GB"), "Influence Trend");
    }

    #[test]
    fn test_unknown_key_falls_back_to_key() {
        assert_eq!(message_by_locale("no_such_key", "zh_CN"), "no_such_key");
    }

    #[test]
    fn test_catalogs_have_same_keys() {
        let en = &MESSAGES["en"];
        for locale in supported_locales() {
            for key in en.keys() {
                assert!(MESSAGES[locale].contains_key(key), "{} missing {}", locale, key);
            }
        }
    }
}
