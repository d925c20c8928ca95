use crate::locale::LanguageTag;
use serde_json::Value;
use std::collections::HashMap;
use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::{debug, info, instrument, warn};
use walkdir::WalkDir;

#[derive(Error, Debug)]
pub enum CatalogError {
    #[error("IO error: {path} - {message}")]
    Io { path: String, message: String },

    #[error("Failed to parse message file: {path} - {message}")]
    Parse { path: String, message: String },

    #[error("Unsupported message file format: {path}")]
    UnsupportedFormat { path: String },

    #[error("Message file name carries no language tag: {path}")]
    MissingLanguageTag { path: String },
}

/// Message templates keyed by normalized language tag, then message id.
#[derive(Debug, Clone, Default)]
pub struct Catalog {
    messages: HashMap<String, HashMap<String, String>>,
}

impl Catalog {
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers one template. Locales that do not parse as a language tag
    /// are ignored.
    pub fn insert(
        &mut self,
        locale: &str,
        key: impl Into<String>,
        template: impl Into<String>,
    ) -> bool {
        let Some(tag) = LanguageTag::parse(locale) else {
            warn!("Ignoring message for unparsable locale: {}", locale);
            return false;
        };

        self.messages
            .entry(tag.as_str().to_string())
            .or_default()
            .insert(key.into(), template.into());
        true
    }

    pub fn with_message(
        mut self,
        locale: &str,
        key: impl Into<String>,
        template: impl Into<String>,
    ) -> Self {
        self.insert(locale, key, template);
        self
    }

    pub fn lookup(&self, tag: &LanguageTag, key: &str) -> Option<&str> {
        self.messages
            .get(tag.as_str())
            .and_then(|messages| messages.get(key))
            .map(String::as_str)
    }

    pub fn has_locale(&self, tag: &LanguageTag) -> bool {
        self.messages.contains_key(tag.as_str())
    }

    pub fn locales(&self) -> Vec<&str> {
        let mut locales: Vec<&str> = self.messages.keys().map(String::as_str).collect();
        locales.sort_unstable();
        locales
    }

    pub fn len(&self) -> usize {
        self.messages.values().map(HashMap::len).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Registers every message of a parsed message document. Nested objects
    /// flatten into dotted keys (`{"validation": {"required": ..}}` becomes
    /// `validation.required`); an object with a string `other` member is a
    /// single message.
    pub fn merge_document(&mut self, locale: &str, document: &Value) -> usize {
        let mut flattened = Vec::new();
        flatten_messages(None, document, &mut flattened);

        flattened
            .into_iter()
            .filter(|(key, template)| self.insert(locale, key.clone(), template.clone()))
            .count()
    }

    /// Loads one message file. The language tag is the last dot-separated
    /// segment of the file stem, so both `fa.json` and `active.en-US.yaml`
    /// are accepted. An empty file is an empty catalog.
    pub fn load_file(&mut self, path: &Path) -> Result<usize, CatalogError> {
        let format = MessageFormat::from_path(path).ok_or_else(|| {
            CatalogError::UnsupportedFormat {
                path: path.display().to_string(),
            }
        })?;

        let locale = language_tag_from_path(path).ok_or_else(|| {
            CatalogError::MissingLanguageTag {
                path: path.display().to_string(),
            }
        })?;

        let content = fs::read_to_string(path).map_err(|e| CatalogError::Io {
            path: path.display().to_string(),
            message: e.to_string(),
        })?;

        if content.trim().is_empty() {
            debug!("Message file is empty: {:?}", path);
            return Ok(0);
        }

        let document = format.parse(&content).map_err(|message| CatalogError::Parse {
            path: path.display().to_string(),
            message,
        })?;

        let loaded = self.merge_document(locale.as_str(), &document);
        debug!("Loaded {} messages for {} from {:?}", loaded, locale, path);
        Ok(loaded)
    }

    /// Walks `root` recursively and loads every message file found. Files that
    /// fail to load are logged and skipped.
    #[instrument]
    pub fn load_dir(root: &Path) -> Self {
        let mut catalog = Self::new();

        for path in collect_message_files(root) {
            if let Err(e) = catalog.load_file(&path) {
                warn!("Failed to load message file: {}", e);
            }
        }

        info!(
            "Loaded {} messages across locales {:?}",
            catalog.len(),
            catalog.locales()
        );
        catalog
    }
}

/// Creates the locale directory and an empty `<locale>.json` default file
/// when they are missing. Failures are logged, never returned.
#[instrument]
pub fn ensure_locale_path(root: &Path, locale: &str) {
    if !root.exists() {
        if let Err(e) = fs::create_dir_all(root) {
            warn!("Failed to create locale path {:?}: {}", root, e);
            return;
        }
        info!("Locale path {:?} did not exist, created it", root);
    }

    let default_file = root.join(format!("{}.json", locale));
    if default_file.exists() {
        return;
    }

    match fs::File::create(&default_file) {
        Ok(_) => info!("Created empty default locale file {:?}", default_file),
        Err(e) => warn!(
            "Failed to create default locale file {:?}: {}",
            default_file, e
        ),
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum MessageFormat {
    Json,
    Yaml,
}

impl MessageFormat {
    fn from_path(path: &Path) -> Option<Self> {
        match path.extension().and_then(|ext| ext.to_str()) {
            Some("json") => Some(Self::Json),
            Some("yaml") | Some("yml") => Some(Self::Yaml),
            _ => None,
        }
    }

    fn parse(self, content: &str) -> Result<Value, String> {
        match self {
            Self::Json => serde_json::from_str(content).map_err(|e| e.to_string()),
            Self::Yaml => serde_yaml::from_str(content).map_err(|e| e.to_string()),
        }
    }
}

fn language_tag_from_path(path: &Path) -> Option<LanguageTag> {
    let stem = path.file_stem()?.to_str()?;
    let tag = stem.rsplit('.').next()?;
    LanguageTag::parse(tag)
}

fn collect_message_files(root: &Path) -> Vec<PathBuf> {
    let mut files: Vec<PathBuf> = WalkDir::new(root)
        .follow_links(false)
        .into_iter()
        .filter_map(|entry| match entry {
            Ok(entry) => Some(entry),
            Err(e) => {
                warn!("Failed to walk locale path {:?}: {}", root, e);
                None
            }
        })
        .filter(|entry| entry.file_type().is_file())
        .map(|entry| entry.into_path())
        .filter(|path| MessageFormat::from_path(path).is_some())
        .collect();

    files.sort();
    files
}

fn flatten_messages(prefix: Option<&str>, value: &Value, out: &mut Vec<(String, String)>) {
    match value {
        Value::String(template) => {
            if let Some(key) = prefix {
                out.push((key.to_string(), template.clone()));
            }
        }
        Value::Object(map) => {
            if let (Some(key), Some(Value::String(other))) = (prefix, map.get("other")) {
                out.push((key.to_string(), other.clone()));
                return;
            }

            for (name, nested) in map {
                let key = match prefix {
                    Some(parent) => format!("{}.{}", parent, name),
                    None => name.clone(),
                };
                flatten_messages(Some(&key), nested, out);
            }
        }
        _ => {
            debug!("Skipping non-text message under {:?}", prefix);
        }
    }
}
