use response::*;
use serde_json::Map;

fn domain(message: &str, kind: &str) -> ClassifiedError {
    ClassifiedError::Domain {
        message: message.to_string(),
        kind: kind.to_string(),
        attributes: Map::new(),
    }
}

#[test]
fn given_no_error_when_resolving_then_200() {
    assert_eq!(resolve_status(&ClassifiedError::None, &StatusCodeMapping::new()), 200);
}

#[test]
fn given_native_error_when_resolving_then_500_even_if_message_is_mapped() {
    let mapping = StatusCodeMapping::new().with("boom", 400);

    assert_eq!(mapping.resolve(&ClassifiedError::native("boom")), 500);
}

#[test]
fn given_domain_error_when_message_is_mapped_then_uses_mapping() {
    let mapping: StatusCodeMapping = [("user.not_found", 404), ("user.exists", 409)]
        .into_iter()
        .collect();

    assert_eq!(mapping.resolve(&domain("user.exists", "conflict")), 409);
    assert_eq!(mapping.resolve(&domain("user.not_found", "missing")), 404);
}

#[test]
fn given_domain_error_when_only_kind_is_mapped_then_message_keying_ignores_it() {
    let mapping = StatusCodeMapping::new().with("conflict", 409);

    assert_eq!(mapping.key(), MappingKey::Message);
    assert_eq!(mapping.resolve(&domain("user.exists", "conflict")), 500);
}

#[test]
fn given_domain_error_with_empty_message_when_resolving_then_500() {
    let mapping = StatusCodeMapping::new().with("", 418);

    assert_eq!(mapping.resolve(&domain("", "teapot")), 500);
}

#[test]
fn given_kind_keyed_mapping_when_resolving_then_uses_kind() {
    let mapping = StatusCodeMapping::keyed_by(MappingKey::Kind)
        .with("conflict", 409)
        .with("not_found", 404);

    assert_eq!(mapping.resolve(&domain("reworded message", "conflict")), 409);
    assert_eq!(mapping.resolve(&domain("user.exists", "")), 500);
}

#[test]
fn given_serialized_mapping_when_deserializing_then_defaults_to_message_key() {
    let mapping: StatusCodeMapping =
        serde_json::from_str(r#"{"codes": {"user.not_found": 404}}"#).unwrap();

    assert_eq!(mapping.key(), MappingKey::Message);
    assert_eq!(mapping.get("user.not_found"), Some(404));
    assert_eq!(mapping.len(), 1);
}
