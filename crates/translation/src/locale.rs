use once_cell::sync::Lazy;
use regex::Regex;
use std::fmt;

static TAG_PATTERN: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^[A-Za-z]{2,3}(-[A-Za-z0-9]{1,8})*$").expect("language tag pattern must compile")
});

/// A BCP 47 style language tag, normalized to lowercase with `-` separators.
/// The primary subtag is two or three letters, so words such as `messages`
/// are not tags.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct LanguageTag(pub(crate) String);

impl LanguageTag {
    /// Parses a tag such as `en`, `en-US` or `pt_BR`. Returns `None` for
    /// anything that does not look like a language tag.
    pub fn parse(raw: &str) -> Option<Self> {
        let normalized = raw.trim().replace('_', "-");
        if !TAG_PATTERN.is_match(&normalized) {
            return None;
        }
        Some(Self(normalized.to_ascii_lowercase()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// The primary language subtag (`en` for `en-us`).
    pub fn base(&self) -> &str {
        self.0.split('-').next().unwrap_or(&self.0)
    }

    pub fn has_region(&self) -> bool {
        self.0.contains('-')
    }
}

impl fmt::Display for LanguageTag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}
