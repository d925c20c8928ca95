use crate::envelope::Envelope;
use jsonschema::{Draft, JSONSchema};
use once_cell::sync::OnceCell;
use serde::Serialize;
use serde_json::Value;
use thiserror::Error;

const RESPONSE_CONTRACT: &str = include_str!("../../../contracts/envelopes/response.json");

static SHARED: OnceCell<EnvelopeValidator> = OnceCell::new();

#[derive(Error, Debug)]
pub enum ContractError {
    #[error("Response contract is unusable: {0}")]
    Contract(String),

    #[error("Envelope is not serializable: {0}")]
    Serialize(#[from] serde_json::Error),

    #[error("Envelope breaks the response contract: {}", .violations.join(", "))]
    Violations { violations: Vec<String> },
}

impl ContractError {
    /// One entry per failed rule, formatted as `<reason> at <json pointer>`.
    pub fn violations(&self) -> &[String] {
        match self {
            Self::Violations { violations } => violations,
            _ => &[],
        }
    }
}

/// Compiled form of `contracts/envelopes/response.json`.
pub struct EnvelopeValidator {
    schema: JSONSchema,
}

impl EnvelopeValidator {
    pub fn new() -> Result<Self, ContractError> {
        let contract: Value = serde_json::from_str(RESPONSE_CONTRACT)
            .map_err(|e| ContractError::Contract(e.to_string()))?;

        let schema = JSONSchema::options()
            .with_draft(Draft::Draft7)
            .compile(&contract)
            .map_err(|e| ContractError::Contract(e.to_string()))?;

        Ok(Self { schema })
    }

    /// Process-wide validator, compiled on first use.
    pub fn shared() -> Result<&'static Self, ContractError> {
        SHARED.get_or_try_init(Self::new)
    }

    pub fn validate<T, M>(&self, envelope: &Envelope<T, M>) -> Result<(), ContractError>
    where
        T: Serialize,
        M: Serialize,
    {
        self.validate_json(&serde_json::to_value(envelope)?)
    }

    pub fn validate_json(&self, body: &Value) -> Result<(), ContractError> {
        let violations: Vec<String> = match self.schema.validate(body) {
            Ok(()) => return Ok(()),
            Err(errors) => errors
                .map(|error| format!("{} at {}", error, error.instance_path))
                .collect(),
        };

        Err(ContractError::Violations { violations })
    }
}

impl<T, M> Envelope<T, M>
where
    T: Serialize,
    M: Serialize,
{
    /// Checks this envelope against the response contract.
    pub fn validate(&self) -> Result<(), ContractError> {
        EnvelopeValidator::shared()?.validate(self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::envelope::{ErrorDetail, Errors};
    use serde_json::json;

    fn detail(status: u16) -> Envelope {
        Envelope {
            errors: Some(Errors::Details(vec![ErrorDetail {
                type_info: "stub".to_string(),
                status,
                detail: "stub".to_string(),
                attributes: Default::default(),
            }])),
            ..Envelope::default()
        }
    }

    #[test]
    fn test_shared_validator_compiles_once() {
        let first = EnvelopeValidator::shared().unwrap();
        let second = EnvelopeValidator::shared().unwrap();
        assert!(std::ptr::eq(first, second));
    }

    #[test]
    fn test_empty_envelope_is_valid() {
        assert!(Envelope::<Value, Value>::default().validate().is_ok());
    }

    #[test]
    fn test_any_u16_status_is_valid() {
        assert!(detail(500).validate().is_ok());
        assert!(detail(600).validate().is_ok());
        assert!(detail(u16::MAX).validate().is_ok());
    }

    #[test]
    fn test_unknown_top_level_field_is_rejected() {
        let validator = EnvelopeValidator::shared().unwrap();
        let err = validator
            .validate_json(&json!({ "data": 1, "payload": 2 }))
            .unwrap_err();
        assert_eq!(err.violations().len(), 1);
    }

    #[test]
    fn test_errors_mixing_details_and_fields_is_rejected() {
        let validator = EnvelopeValidator::shared().unwrap();
        let result = validator.validate_json(&json!({
            "errors": { "Name": [{ "type_info": "x", "status": 500, "detail": "x" }] }
        }));
        assert!(matches!(result, Err(ContractError::Violations { .. })));
    }

    #[test]
    fn test_malformed_pagination_meta_is_rejected() {
        let validator = EnvelopeValidator::shared().unwrap();
        let result = validator.validate_json(&json!({ "meta": { "pagination": { "page": 1 } } }));
        assert!(result.is_err());
    }
}
