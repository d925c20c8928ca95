use serde_json::{Map, Value};
use std::error::Error as StdError;
use thiserror::Error;

/// An application failure classified with a stable kind and free-form
/// attributes. Its message doubles as the status mapping key and as the
/// translation key for the error detail.
#[derive(Debug, Error)]
#[error("{message}")]
pub struct ServiceError {
    message: String,
    kind: String,
    attributes: Map<String, Value>,
    #[source]
    source: Option<Box<dyn StdError + Send + Sync + 'static>>,
}

impl ServiceError {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            kind: String::new(),
            attributes: Map::new(),
            source: None,
        }
    }

    /// Classifies an existing error, keeping it as the source.
    pub fn wrap<E>(err: E) -> Self
    where
        E: StdError + Send + Sync + 'static,
    {
        Self {
            message: err.to_string(),
            kind: String::new(),
            attributes: Map::new(),
            source: Some(Box::new(err)),
        }
    }

    pub fn with_kind(mut self, kind: impl Into<String>) -> Self {
        self.kind = kind.into();
        self
    }

    pub fn with_attributes(mut self, attributes: Map<String, Value>) -> Self {
        self.attributes = attributes;
        self
    }

    pub fn with_attribute(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        self.attributes.insert(key.into(), value.into());
        self
    }

    pub fn message(&self) -> &str {
        &self.message
    }

    pub fn kind(&self) -> &str {
        &self.kind
    }

    pub fn attributes(&self) -> &Map<String, Value> {
        &self.attributes
    }
}

/// The error slot of a response, classified once when it is stored.
#[derive(Debug, Clone, Default, PartialEq)]
pub enum ClassifiedError {
    #[default]
    None,
    /// Any failure that is not a [`ServiceError`]. Its message is echoed to
    /// the client as is, so wrap anything sensitive in a `ServiceError`.
    Native { message: String },
    Domain {
        message: String,
        kind: String,
        attributes: Map<String, Value>,
    },
}

impl ClassifiedError {
    pub fn native(message: impl Into<String>) -> Self {
        Self::Native {
            message: message.into(),
        }
    }

    /// Searches the source chain of `err` for a [`ServiceError`]; the first
    /// one found makes this a domain error, otherwise it is native.
    pub fn from_error(err: &(dyn StdError + 'static)) -> Self {
        let mut current = Some(err);
        while let Some(cause) = current {
            if let Some(service) = cause.downcast_ref::<ServiceError>() {
                return service.into();
            }
            current = cause.source();
        }

        Self::native(err.to_string())
    }

    pub fn is_none(&self) -> bool {
        matches!(self, Self::None)
    }

    pub fn is_native(&self) -> bool {
        matches!(self, Self::Native { .. })
    }

    pub fn is_domain(&self) -> bool {
        matches!(self, Self::Domain { .. })
    }

    pub fn message(&self) -> Option<&str> {
        match self {
            Self::None => None,
            Self::Native { message } | Self::Domain { message, .. } => Some(message),
        }
    }
}

impl From<&ServiceError> for ClassifiedError {
    fn from(err: &ServiceError) -> Self {
        Self::Domain {
            message: err.message.clone(),
            kind: err.kind.clone(),
            attributes: err.attributes.clone(),
        }
    }
}

impl From<ServiceError> for ClassifiedError {
    fn from(err: ServiceError) -> Self {
        Self::Domain {
            message: err.message,
            kind: err.kind,
            attributes: err.attributes,
        }
    }
}

impl From<anyhow::Error> for ClassifiedError {
    fn from(err: anyhow::Error) -> Self {
        err.chain()
            .find_map(|cause| cause.downcast_ref::<ServiceError>())
            .map(Self::from)
            .unwrap_or_else(|| Self::native(err.to_string()))
    }
}

impl<E> From<Option<E>> for ClassifiedError
where
    E: Into<ClassifiedError>,
{
    fn from(err: Option<E>) -> Self {
        err.map(Into::into).unwrap_or_default()
    }
}
