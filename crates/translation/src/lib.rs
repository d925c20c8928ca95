//! # Translation
//!
//! Localizes message keys against per-language catalogs loaded from a
//! directory of JSON or YAML message files.
//!
//! Lookups never fail. A key is resolved under the requested locale (or the
//! configured default), then under the fallback language, and finally the key
//! itself is returned as the displayed text.
//!
//! ```rust
//! use serde_json::json;
//! use translation::*;
//!
//! let catalog = Catalog::new()
//!     .with_message("en", "greeting", "Hello {{.name}}")
//!     .with_message("fa", "greeting", "سلام {{.name}}");
//!
//! let translator = Translator::from_catalog(TranslationConfig::default(), catalog);
//! let args = args_from(json!({ "name": "Sara" }));
//!
//! assert_eq!(translator.trans("greeting", &args, None), "Hello Sara");
//! assert_eq!(translator.trans("greeting", &args, Some("fa")), "سلام Sara");
//! assert_eq!(translator.trans("missing.key", &args, None), "missing.key");
//! ```

mod catalog;
mod config;
mod locale;
mod translator;

pub use catalog::*;
pub use config::*;
pub use locale::*;
pub use translator::*;

/// Template arguments passed alongside a message key.
pub type Args = serde_json::Map<String, serde_json::Value>;

/// Builds [`Args`] from a JSON object literal. Anything other than an object
/// yields empty args.
pub fn args_from(value: serde_json::Value) -> Args {
    match value {
        serde_json::Value::Object(map) => map,
        _ => Args::new(),
    }
}

/// Localization capability consumed by response assembly.
///
/// Implementations must never fail: when nothing matches, the key is the
/// displayed text.
pub trait Translate: Send + Sync {
    fn trans(&self, key: &str, args: &Args, locale: Option<&str>) -> String;

    fn trans_key(&self, key: &str) -> String {
        self.trans(key, &Args::new(), None)
    }
}

/// Translator that echoes every key back.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoopTranslator;

impl Translate for NoopTranslator {
    fn trans(&self, key: &str, _args: &Args, _locale: Option<&str>) -> String {
        key.to_string()
    }
}
