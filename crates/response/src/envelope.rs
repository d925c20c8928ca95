use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::collections::BTreeMap;

/// Field name to its localized validation messages, in the order the
/// violations were reported.
pub type ValidationFailureSet = BTreeMap<String, Vec<String>>;

/// The normalized body returned for every request outcome.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Envelope<T = Value, M = Value> {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<T>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub errors: Option<Errors>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub meta: Option<M>,
}

impl<T, M> Default for Envelope<T, M> {
    fn default() -> Self {
        Self {
            data: None,
            message: None,
            errors: None,
            meta: None,
        }
    }
}

/// Either the single top-level failure or the per-field validation set.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Errors {
    Details(Vec<ErrorDetail>),
    Validation(ValidationFailureSet),
}

impl Errors {
    pub fn details(&self) -> Option<&[ErrorDetail]> {
        match self {
            Self::Details(details) => Some(details),
            Self::Validation(_) => None,
        }
    }

    pub fn validation(&self) -> Option<&ValidationFailureSet> {
        match self {
            Self::Validation(set) => Some(set),
            Self::Details(_) => None,
        }
    }

    pub fn is_validation(&self) -> bool {
        matches!(self, Self::Validation(_))
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ErrorDetail {
    pub type_info: String,
    pub status: u16,
    pub detail: String,
    #[serde(skip_serializing_if = "Map::is_empty")]
    #[serde(default)]
    pub attributes: Map<String, Value>,
}
