use crate::envelope::ValidationFailureSet;
use serde::{Deserialize, Serialize};
use std::error::Error as StdError;
use thiserror::Error;
use translation::{Args, Translate};

/// One failed rule on one field, as reported by a validation engine.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FieldViolation {
    pub field: String,
    pub tag: String,
    #[serde(default)]
    pub param: String,
}

impl FieldViolation {
    pub fn new(field: impl Into<String>, tag: impl Into<String>) -> Self {
        Self {
            field: field.into(),
            tag: tag.into(),
            param: String::new(),
        }
    }

    pub fn with_param(mut self, param: impl Into<String>) -> Self {
        self.param = param.into();
        self
    }
}

/// The structured failure a validation engine hands back. Adapters for a
/// concrete engine convert its report into this type.
#[derive(Debug, Clone, Default, PartialEq, Eq, Error)]
#[error("validation failed with {count} violation(s)", count = .violations.len())]
pub struct ValidationErrors {
    violations: Vec<FieldViolation>,
}

impl ValidationErrors {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, violation: FieldViolation) {
        self.violations.push(violation);
    }

    pub fn with_violation(mut self, violation: FieldViolation) -> Self {
        self.push(violation);
        self
    }

    pub fn violations(&self) -> &[FieldViolation] {
        &self.violations
    }

    pub fn is_empty(&self) -> bool {
        self.violations.is_empty()
    }

    /// Finds a `ValidationErrors` in the source chain of `err`.
    pub fn find<'a>(err: &'a (dyn StdError + 'static)) -> Option<&'a ValidationErrors> {
        let mut current = Some(err);
        while let Some(cause) = current {
            if let Some(validation) = cause.downcast_ref::<ValidationErrors>() {
                return Some(validation);
            }
            current = cause.source();
        }
        None
    }
}

impl FromIterator<FieldViolation> for ValidationErrors {
    fn from_iter<I: IntoIterator<Item = FieldViolation>>(iter: I) -> Self {
        Self {
            violations: iter.into_iter().collect(),
        }
    }
}

/// Turns field violations into localized, field-keyed messages.
///
/// Each violation is rendered from `validation.<tag>` with the arguments
/// `attribute` (the localized `attributes.<field>`) and `<tag>` (the rule
/// parameter).
pub struct ValidationTranslator<'a> {
    translator: Option<&'a dyn Translate>,
    locale: Option<&'a str>,
}

impl<'a> ValidationTranslator<'a> {
    pub fn new(translator: Option<&'a dyn Translate>) -> Self {
        Self {
            translator,
            locale: None,
        }
    }

    pub fn with_locale(mut self, locale: Option<&'a str>) -> Self {
        self.locale = locale;
        self
    }

    /// Returns `None` when `err` is not a validation failure, which is
    /// different from an empty set.
    pub fn translate(&self, err: &(dyn StdError + 'static)) -> Option<ValidationFailureSet> {
        ValidationErrors::find(err).map(|errors| self.translate_violations(errors.violations()))
    }

    pub fn translate_violations(&self, violations: &[FieldViolation]) -> ValidationFailureSet {
        let mut failures = ValidationFailureSet::new();
        for violation in violations {
            failures
                .entry(violation.field.clone())
                .or_default()
                .push(self.message(violation));
        }
        failures
    }

    fn message(&self, violation: &FieldViolation) -> String {
        let key = format!("validation.{}", violation.tag);
        let Some(translator) = self.translator else {
            return key;
        };

        let attribute = translator.trans(
            &format!("attributes.{}", violation.field),
            &Args::new(),
            self.locale,
        );

        let mut args = Args::new();
        args.insert("attribute".to_string(), attribute.into());
        args.insert(violation.tag.clone(), violation.param.clone().into());

        translator.trans(&key, &args, self.locale)
    }
}
