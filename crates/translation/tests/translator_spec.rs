use serde_json::json;
use std::fs;
use std::sync::Arc;
use tempfile::TempDir;
use translation::*;

fn catalog() -> Catalog {
    Catalog::new()
        .with_message("en", "greeting", "Hello {{.name}}")
        .with_message("en", "only.english", "English only")
        .with_message("fa", "greeting", "سلام {{.name}}")
        .with_message("de", "greeting", "Hallo {{.name}}")
}

fn translator(locale: &str) -> Translator {
    Translator::from_catalog(TranslationConfig::new(locale, "unused"), catalog())
}

#[test]
fn given_key_absent_everywhere_when_translating_then_returns_key_verbatim() {
    let translator = translator("en");

    let message = translator.trans("no.such.key", &Args::new(), Some("fa"));

    assert_eq!(message, "no.such.key");
}

#[test]
fn given_requested_locale_when_key_exists_then_uses_that_locale() {
    let translator = translator("en");
    let args = args_from(json!({ "name": "Ali" }));

    assert_eq!(translator.trans("greeting", &args, Some("de")), "Hallo Ali");
}

#[test]
fn given_no_requested_locale_when_translating_then_uses_configured_default() {
    let translator = translator("fa");
    let args = args_from(json!({ "name": "Ali" }));

    assert_eq!(translator.trans("greeting", &args, None), "سلام Ali");
}

#[test]
fn given_requested_locale_miss_when_translating_then_falls_back_to_base_language() {
    let translator = translator("fa");

    assert_eq!(
        translator.trans("only.english", &Args::new(), None),
        "English only"
    );
}

#[test]
fn given_region_tag_when_translating_then_matches_base_language_catalog() {
    let translator = translator("en");
    let args = args_from(json!({ "name": "Ana" }));

    assert_eq!(translator.trans("greeting", &args, Some("de_AT")), "Hallo Ana");
}

#[test]
fn given_unparsable_locale_when_translating_then_uses_fallback_language() {
    let translator = translator("en");
    let args = args_from(json!({ "name": "Ana" }));

    assert_eq!(
        translator.trans("greeting", &args, Some("??not-a-tag")),
        "Hello Ana"
    );
}

#[test]
fn given_custom_fallback_when_default_misses_then_uses_custom_fallback() {
    let config = TranslationConfig::new("fa", "unused").with_fallback_locale("de");
    let translator = Translator::from_catalog(config, catalog());

    assert_eq!(
        translator.trans("only.english", &Args::new(), None),
        "only.english"
    );
    assert_eq!(
        translator.trans("greeting", &args_from(json!({ "name": "X" })), Some("it")),
        "Hallo X"
    );
}

#[test]
fn given_missing_locale_dir_when_first_lookup_then_creates_dir_and_default_file() {
    let temp_dir = TempDir::new().unwrap();
    let locale_dir = temp_dir.path().join("locales");
    let translator = Translator::new(TranslationConfig::new("fa", &locale_dir));

    assert!(!locale_dir.exists());

    let message = translator.trans("anything", &Args::new(), None);

    assert_eq!(message, "anything");
    assert!(locale_dir.is_dir());
    let default_file = locale_dir.join("fa.json");
    assert!(default_file.is_file());
    assert_eq!(fs::read_to_string(default_file).unwrap(), "");
}

#[test]
fn given_message_files_when_loading_then_reads_json_yaml_and_nested_dirs() {
    let temp_dir = TempDir::new().unwrap();
    let root = temp_dir.path();
    fs::create_dir_all(root.join("nested")).unwrap();

    fs::write(
        root.join("en.json"),
        r#"{"validation": {"required": "{{.attribute}} is required"}, "attributes": {"Name": "name"}}"#,
    )
    .unwrap();
    fs::write(
        root.join("nested/active.fa.yaml"),
        "validation:\n  required: \"{{.attribute}} الزامی است\"\n",
    )
    .unwrap();
    fs::write(root.join("broken.json"), "{ not json").unwrap();
    fs::write(root.join("notes.txt"), "ignored").unwrap();

    let translator = Translator::load(TranslationConfig::new("en", root));
    let args = args_from(json!({ "attribute": "name" }));

    assert_eq!(
        translator.trans("validation.required", &args, None),
        "name is required"
    );
    assert_eq!(
        translator.trans("validation.required", &args, Some("fa")),
        "name الزامی است"
    );
    assert_eq!(translator.trans("attributes.Name", &Args::new(), None), "name");
    assert_eq!(translator.catalog().locales(), vec!["en", "fa"]);
}

#[test]
fn given_untagged_message_file_when_loading_then_it_is_not_a_locale() {
    let temp_dir = TempDir::new().unwrap();
    let root = temp_dir.path();
    fs::write(root.join("en.json"), r#"{"greeting": "Hello"}"#).unwrap();
    fs::write(root.join("messages.json"), r#"{"greeting": "Stray"}"#).unwrap();
    fs::write(root.join("common.yaml"), "greeting: Shared\n").unwrap();

    let translator = Translator::load(TranslationConfig::new("en", root));

    assert_eq!(translator.catalog().locales(), vec!["en"]);
    assert_eq!(translator.trans("greeting", &Args::new(), None), "Hello");
}

#[test]
fn given_shared_translator_when_threads_race_first_lookup_then_all_agree() {
    let temp_dir = TempDir::new().unwrap();
    fs::write(temp_dir.path().join("en.json"), r#"{"ping": "pong"}"#).unwrap();
    let translator = Arc::new(Translator::new(TranslationConfig::new(
        "en",
        temp_dir.path(),
    )));

    let handles: Vec<_> = (0..8)
        .map(|_| {
            let translator = Arc::clone(&translator);
            std::thread::spawn(move || translator.trans("ping", &Args::new(), None))
        })
        .collect();

    for handle in handles {
        assert_eq!(handle.join().unwrap(), "pong");
    }
    assert_eq!(translator.catalog().len(), 1);
}

#[test]
fn given_noop_translator_when_translating_then_echoes_key() {
    let translator = NoopTranslator;

    assert_eq!(translator.trans_key("validation.required"), "validation.required");
}
