use crate::catalog::{ensure_locale_path, Catalog};
use crate::config::{TranslationConfig, DEFAULT_LOCALE};
use crate::locale::LanguageTag;
use crate::{Args, Translate};
use once_cell::sync::{Lazy, OnceCell};
use regex::{Captures, Regex};
use serde_json::Value;
use tracing::{debug, warn};

static PLACEHOLDER: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"\{\{\s*\.?([A-Za-z_][A-Za-z0-9_]*)\s*\}\}")
        .expect("placeholder pattern must compile")
});

/// Catalog-backed [`Translate`] implementation.
///
/// The catalog is read from `path_locale` on first use and is immutable
/// afterwards, so one instance can be shared behind an `Arc` by every
/// request handler.
pub struct Translator {
    config: TranslationConfig,
    catalog: OnceCell<Catalog>,
}

impl Translator {
    /// Creates a translator whose catalog loads lazily on the first lookup.
    pub fn new(config: TranslationConfig) -> Self {
        Self {
            config,
            catalog: OnceCell::new(),
        }
    }

    /// Creates a translator and loads its catalog immediately.
    pub fn load(config: TranslationConfig) -> Self {
        let translator = Self::new(config);
        translator.catalog();
        translator
    }

    pub fn from_catalog(config: TranslationConfig, catalog: Catalog) -> Self {
        let cell = OnceCell::new();
        let _ = cell.set(catalog);
        Self {
            config,
            catalog: cell,
        }
    }

    pub fn config(&self) -> &TranslationConfig {
        &self.config
    }

    pub fn catalog(&self) -> &Catalog {
        self.catalog.get_or_init(|| {
            ensure_locale_path(&self.config.path_locale, &self.config.locale);
            Catalog::load_dir(&self.config.path_locale)
        })
    }

    /// Picks the locale for a lookup: the requested one, else the configured
    /// default. Unparsable tags degrade to the fallback language.
    fn resolve_locale(&self, requested: Option<&str>) -> LanguageTag {
        let raw = requested
            .map(str::trim)
            .filter(|locale| !locale.is_empty())
            .unwrap_or(&self.config.locale);

        match LanguageTag::parse(raw) {
            Some(tag) => tag,
            None => {
                warn!("Failed to parse language tag: {:?}", raw);
                self.fallback_locale()
            }
        }
    }

    fn fallback_locale(&self) -> LanguageTag {
        LanguageTag::parse(&self.config.fallback_locale)
            .or_else(|| LanguageTag::parse(DEFAULT_LOCALE))
            .unwrap_or_else(|| LanguageTag(DEFAULT_LOCALE.to_string()))
    }

    fn localize(&self, tag: &LanguageTag, key: &str, args: &Args) -> Option<String> {
        let catalog = self.catalog();

        let template = catalog.lookup(tag, key).or_else(|| {
            if !tag.has_region() {
                return None;
            }
            LanguageTag::parse(tag.base()).and_then(|base| catalog.lookup(&base, key))
        })?;

        Some(render(template, args))
    }
}

impl Translate for Translator {
    fn trans(&self, key: &str, args: &Args, locale: Option<&str>) -> String {
        let tag = self.resolve_locale(locale);
        if let Some(message) = self.localize(&tag, key, args) {
            return message;
        }

        let fallback = self.fallback_locale();
        if fallback != tag {
            if let Some(message) = self.localize(&fallback, key, args) {
                return message;
            }
        }

        debug!("Failed to localize message {:?} for {}", key, tag);
        key.to_string()
    }
}

/// Substitutes `{{.name}}` placeholders with values from `args`. String
/// values are inserted unquoted; missing or null values render empty.
pub fn render(template: &str, args: &Args) -> String {
    PLACEHOLDER
        .replace_all(template, |caps: &Captures| match args.get(&caps[1]) {
            Some(Value::String(text)) => text.clone(),
            Some(Value::Null) | None => String::new(),
            Some(other) => other.to_string(),
        })
        .into_owned()
}
