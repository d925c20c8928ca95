use response::*;
use serde_json::json;
use std::sync::Arc;
use translation::{Catalog, TranslationConfig, Translator};

#[derive(Debug, thiserror::Error)]
#[error("request rejected")]
struct RequestRejected {
    #[source]
    source: ValidationErrors,
}

fn translator() -> Arc<Translator> {
    let catalog = Catalog::new()
        .with_message("en", "validation.required", "{{.attribute}} is required")
        .with_message("en", "validation.max", "{{.attribute}} may not exceed {{.max}}")
        .with_message("en", "attributes.Email", "email address");

    Arc::new(Translator::from_catalog(TranslationConfig::default(), catalog))
}

#[test]
fn given_non_validation_error_when_translating_then_absent() {
    let io = std::io::Error::new(std::io::ErrorKind::Other, "nope");

    assert!(ValidationTranslator::new(None).translate(&io).is_none());
}

#[test]
fn given_empty_violation_list_when_translating_then_empty_set_not_absent() {
    let failures = ValidationErrors::new();

    let translated = ValidationTranslator::new(None).translate(&failures);

    assert_eq!(translated, Some(ValidationFailureSet::new()));
}

#[test]
fn given_wrapped_validation_errors_when_translating_then_found_in_chain() {
    let err = RequestRejected {
        source: ValidationErrors::new().with_violation(FieldViolation::new("Email", "required")),
    };

    let translated = ValidationTranslator::new(None).translate(&err).unwrap();

    assert_eq!(translated["Email"], vec!["validation.required"]);
}

#[test]
fn given_translator_when_translating_then_attribute_and_param_are_interpolated() {
    let translator = translator();
    let failures: ValidationErrors = vec![
        FieldViolation::new("Email", "required"),
        FieldViolation::new("Email", "max").with_param("64"),
        FieldViolation::new("Age", "required"),
    ]
    .into_iter()
    .collect();

    let translated = ValidationTranslator::new(Some(&*translator))
        .translate(&failures)
        .unwrap();

    assert_eq!(
        translated["Email"],
        vec!["email address is required", "email address may not exceed 64"]
    );
    // No attribute translation: the key itself is interpolated.
    assert_eq!(translated["Age"], vec!["attributes.Age is required"]);
    assert_eq!(translated.len(), 2);
}

#[test]
fn given_violation_when_serializing_then_param_defaults_to_empty() {
    let violation: FieldViolation =
        serde_json::from_value(json!({ "field": "Name", "tag": "required" })).unwrap();

    assert_eq!(violation, FieldViolation::new("Name", "required"));
}

#[test]
fn given_validation_errors_when_displayed_then_reports_count() {
    let failures = ValidationErrors::new()
        .with_violation(FieldViolation::new("A", "required"))
        .with_violation(FieldViolation::new("B", "required"));

    assert_eq!(failures.to_string(), "validation failed with 2 violation(s)");
}
