//! # Response
//!
//! Builds the single normalized envelope an API returns for a request
//! outcome: a payload, a classified error, field-level validation failures,
//! or a mix of them, together with the status code to answer with.
//!
//! ## Basic Usage
//!
//! ```rust
//! use response::*;
//! use serde_json::json;
//!
//! let (status, envelope) = ResponseBuilder::<_, ()>::new()
//!     .with_payload(json!({ "id": 7 }))
//!     .finalize();
//!
//! assert_eq!(status, 200);
//! assert_eq!(envelope.data, Some(json!({ "id": 7 })));
//! assert!(envelope.errors.is_none());
//! ```
//!
//! ## Errors and Status Mapping
//!
//! Domain errors are [`ServiceError`]s. Their message selects a status code
//! from the [`StatusCodeMapping`] shared by the [`ResponseFactory`]; any other
//! error answers 500 and echoes its message.
//!
//! ```rust
//! use response::*;
//! use serde_json::Value;
//!
//! let factory = ResponseFactory::new(
//!     None,
//!     StatusCodeMapping::new().with("user.not_found", 404),
//! );
//!
//! let err = ServiceError::new("user.not_found").with_kind("not_found");
//! let (status, envelope) = factory.builder::<Value, Value>().with_error(err).finalize();
//!
//! assert_eq!(status, 404);
//! let errors = envelope.errors.unwrap();
//! let detail = &errors.details().unwrap()[0];
//! assert_eq!(detail.type_info, "not_found");
//! assert_eq!(detail.detail, "user.not_found");
//! ```
//!
//! ## Validation Failures
//!
//! Validation failures replace the error body but leave the status alone:
//!
//! ```rust
//! use response::*;
//! use serde_json::Value;
//!
//! let failures = ValidationErrors::new()
//!     .with_violation(FieldViolation::new("Name", "required"));
//!
//! let (status, envelope) = ResponseBuilder::<Value, Value>::new()
//!     .with_validation(&failures)
//!     .with_status_code(422)
//!     .finalize();
//!
//! assert_eq!(status, 422);
//! let set = envelope.errors.unwrap();
//! assert_eq!(set.validation().unwrap()["Name"], vec!["validation.required"]);
//! ```
//!
//! ## Schema Validation
//!
//! Produced envelopes can be checked against the published contract:
//!
//! ```rust
//! use response::*;
//! use serde_json::Value;
//!
//! let (_, envelope) = ResponseBuilder::<Value, Value>::new()
//!     .with_error(ClassifiedError::native("boom"))
//!     .finalize();
//!
//! assert!(envelope.validate().is_ok());
//! ```

mod builder;
mod envelope;
mod error;
#[cfg(feature = "axum")]
mod http;
mod schema;
mod status;
mod validation;

pub use builder::*;
pub use envelope::*;
pub use error::*;
pub use schema::*;
pub use status::*;
pub use validation::*;

pub use translation::{args_from, Args, NoopTranslator, Translate};
