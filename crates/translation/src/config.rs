use serde::{Deserialize, Serialize};
use std::path::PathBuf;

pub const DEFAULT_LOCALE: &str = "en";
pub const DEFAULT_LOCALE_PATH: &str = "locales";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TranslationConfig {
    /// Locale used when a lookup does not name one.
    #[serde(default = "default_locale")]
    pub locale: String,
    /// Language consulted after the requested locale misses.
    #[serde(default = "default_locale")]
    pub fallback_locale: String,
    /// Directory holding the per-language message files.
    #[serde(default = "default_path_locale")]
    pub path_locale: PathBuf,
}

fn default_locale() -> String {
    DEFAULT_LOCALE.to_string()
}

fn default_path_locale() -> PathBuf {
    PathBuf::from(DEFAULT_LOCALE_PATH)
}

impl Default for TranslationConfig {
    fn default() -> Self {
        Self {
            locale: default_locale(),
            fallback_locale: default_locale(),
            path_locale: default_path_locale(),
        }
    }
}

impl TranslationConfig {
    pub fn new(locale: impl Into<String>, path_locale: impl Into<PathBuf>) -> Self {
        Self {
            locale: locale.into(),
            path_locale: path_locale.into(),
            ..Self::default()
        }
    }

    pub fn with_fallback_locale(mut self, fallback_locale: impl Into<String>) -> Self {
        self.fallback_locale = fallback_locale.into();
        self
    }

    /// Reads `LOCALE`, `LOCALE_FALLBACK` and `LOCALE_PATH`, keeping defaults
    /// for anything unset or blank.
    pub fn from_env() -> Self {
        let mut config = Self::default();

        if let Some(locale) = non_empty_var("LOCALE") {
            config.locale = locale;
        }
        if let Some(fallback) = non_empty_var("LOCALE_FALLBACK") {
            config.fallback_locale = fallback;
        }
        if let Some(path) = non_empty_var("LOCALE_PATH") {
            config.path_locale = PathBuf::from(path);
        }

        config
    }
}

fn non_empty_var(name: &str) -> Option<String> {
    std::env::var(name)
        .ok()
        .map(|value| value.trim().to_string())
        .filter(|value| !value.is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_deserialize_applies_defaults() {
        let config: TranslationConfig = serde_json::from_str(r#"{"locale": "fa"}"#).unwrap();
        assert_eq!(config.locale, "fa");
        assert_eq!(config.fallback_locale, DEFAULT_LOCALE);
        assert_eq!(config.path_locale, PathBuf::from(DEFAULT_LOCALE_PATH));
    }

    #[test]
    fn test_deserialize_camel_case_fields() {
        let config: TranslationConfig =
            serde_json::from_str(r#"{"fallbackLocale": "de", "pathLocale": "/srv/i18n"}"#)
                .unwrap();
        assert_eq!(config.locale, DEFAULT_LOCALE);
        assert_eq!(config.fallback_locale, "de");
        assert_eq!(config.path_locale, PathBuf::from("/srv/i18n"));
    }
}
