use crate::error::ClassifiedError;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

pub const STATUS_OK: u16 = 200;
pub const STATUS_INTERNAL_SERVER_ERROR: u16 = 500;

/// Which property of a domain error selects its status code.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MappingKey {
    /// The error message text. Any rewording of a message silently drops its
    /// mapping.
    #[default]
    Message,
    Kind,
}

/// Caller supplied table from domain error to status code. Built once at
/// startup and shared read-only by every builder.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct StatusCodeMapping {
    #[serde(default)]
    key: MappingKey,
    #[serde(default)]
    codes: HashMap<String, u16>,
}

impl StatusCodeMapping {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn keyed_by(key: MappingKey) -> Self {
        Self {
            key,
            codes: HashMap::new(),
        }
    }

    pub fn with(mut self, key: impl Into<String>, status: u16) -> Self {
        self.codes.insert(key.into(), status);
        self
    }

    pub fn key(&self) -> MappingKey {
        self.key
    }

    pub fn get(&self, key: &str) -> Option<u16> {
        self.codes.get(key).copied()
    }

    pub fn len(&self) -> usize {
        self.codes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.codes.is_empty()
    }

    pub fn resolve(&self, error: &ClassifiedError) -> u16 {
        resolve_status(error, self)
    }
}

impl<K: Into<String>> FromIterator<(K, u16)> for StatusCodeMapping {
    fn from_iter<I: IntoIterator<Item = (K, u16)>>(iter: I) -> Self {
        Self {
            key: MappingKey::default(),
            codes: iter.into_iter().map(|(k, v)| (k.into(), v)).collect(),
        }
    }
}

/// Computes the status for a classified error when no explicit status was
/// set: 200 without an error, 500 for native errors, and the mapped code
/// (or 500) for domain errors.
pub fn resolve_status(error: &ClassifiedError, mapping: &StatusCodeMapping) -> u16 {
    match error {
        ClassifiedError::None => STATUS_OK,
        ClassifiedError::Native { .. } => STATUS_INTERNAL_SERVER_ERROR,
        ClassifiedError::Domain { message, kind, .. } => {
            let lookup = match mapping.key {
                MappingKey::Message => message,
                MappingKey::Kind => kind,
            };
            if lookup.is_empty() {
                return STATUS_INTERNAL_SERVER_ERROR;
            }
            mapping.get(lookup).unwrap_or(STATUS_INTERNAL_SERVER_ERROR)
        }
    }
}
