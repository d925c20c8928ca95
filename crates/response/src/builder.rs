use crate::envelope::*;
use crate::error::ClassifiedError;
use crate::status::{resolve_status, StatusCodeMapping};
use crate::validation::{FieldViolation, ValidationErrors, ValidationTranslator};
use serde_json::{Map, Value};
use std::error::Error as StdError;
use std::sync::Arc;
use tracing::debug;
use translation::{Args, Translate};

pub const ERR_TYPE_INFO_SOMETHING_IS_WRONG: &str = "something_is_wrong";
pub const ERR_DETAIL_SOMETHING_IS_WRONG: &str = "server.errors.something_is_wrong";

/// Holds the services shared by every response of a process: the translator
/// and the status code mapping. Cheap to clone; hands out one builder per
/// request.
#[derive(Clone, Default)]
pub struct ResponseFactory {
    translator: Option<Arc<dyn Translate>>,
    status_mapping: Arc<StatusCodeMapping>,
}

impl ResponseFactory {
    pub fn new(translator: Option<Arc<dyn Translate>>, status_mapping: StatusCodeMapping) -> Self {
        Self {
            translator,
            status_mapping: Arc::new(status_mapping),
        }
    }

    pub fn status_mapping(&self) -> &StatusCodeMapping {
        &self.status_mapping
    }

    pub fn builder<T, M>(&self) -> ResponseBuilder<T, M> {
        ResponseBuilder {
            translator: self.translator.clone(),
            status_mapping: Arc::clone(&self.status_mapping),
            ..ResponseBuilder::default()
        }
    }
}

/// Accumulates the outcome of one request and turns it into an
/// [`Envelope`] plus a status code.
///
/// Every slot is optional and the last write to a slot wins. Localization
/// happens in [`finalize`](Self::finalize), so the order of configuration
/// calls never matters.
pub struct ResponseBuilder<T = Value, M = Value> {
    translator: Option<Arc<dyn Translate>>,
    status_mapping: Arc<StatusCodeMapping>,
    locale: Option<String>,
    payload: Option<T>,
    error: ClassifiedError,
    validation: Option<Vec<FieldViolation>>,
    message: Option<(String, Args)>,
    meta: Option<M>,
    status_code: Option<u16>,
}

impl<T, M> Default for ResponseBuilder<T, M> {
    fn default() -> Self {
        Self {
            translator: None,
            status_mapping: Arc::new(StatusCodeMapping::default()),
            locale: None,
            payload: None,
            error: ClassifiedError::None,
            validation: None,
            message: None,
            meta: None,
            status_code: None,
        }
    }
}

impl<T, M> ResponseBuilder<T, M> {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_translator(mut self, translator: Arc<dyn Translate>) -> Self {
        self.translator = Some(translator);
        self
    }

    pub fn with_status_mapping(mut self, status_mapping: Arc<StatusCodeMapping>) -> Self {
        self.status_mapping = status_mapping;
        self
    }

    /// Locale for every message localized by this response. Defaults to the
    /// translator's configured locale.
    pub fn with_locale(mut self, locale: impl Into<String>) -> Self {
        self.locale = Some(locale.into());
        self
    }

    pub fn with_payload(mut self, data: T) -> Self {
        self.payload = Some(data);
        self
    }

    /// Stores the classified error. An absent error (`None`) leaves the
    /// previously stored one untouched.
    pub fn with_error(mut self, err: impl Into<ClassifiedError>) -> Self {
        let classified = err.into();
        if !classified.is_none() {
            self.error = classified;
        }
        self
    }

    /// Classifies any error by searching its chain for a `ServiceError`.
    pub fn with_dyn_error(self, err: &(dyn StdError + 'static)) -> Self {
        self.with_error(ClassifiedError::from_error(err))
    }

    /// Records the validation failures carried by `err`. When `err` is not a
    /// validation failure the validation slot becomes absent (`None`), which
    /// is distinct from an empty set.
    pub fn with_validation(mut self, err: &(dyn StdError + 'static)) -> Self {
        self.validation = ValidationErrors::find(err).map(|errors| errors.violations().to_vec());
        if self.validation.is_none() {
            debug!("Not a validation failure, leaving validation unset: {}", err);
        }
        self
    }

    pub fn with_message(mut self, key: impl Into<String>, args: Option<Args>) -> Self {
        self.message = Some((key.into(), args.unwrap_or_default()));
        self
    }

    pub fn with_meta(mut self, data: M) -> Self {
        self.meta = Some(data);
        self
    }

    /// Explicit status; takes precedence over anything derived from errors.
    pub fn with_status_code(mut self, status_code: u16) -> Self {
        self.status_code = Some(status_code);
        self
    }

    pub fn error(&self) -> &ClassifiedError {
        &self.error
    }

    /// Computes the status code and envelope without consuming the builder.
    pub fn finalize(&self) -> (u16, Envelope<T, M>)
    where
        T: Clone,
        M: Clone,
    {
        self.assemble(self.payload.clone(), self.meta.clone())
    }

    /// Consuming variant of [`finalize`](Self::finalize) that needs no
    /// `Clone` on the payload or metadata.
    pub fn build(mut self) -> FinalizedResponse<T, M> {
        let payload = self.payload.take();
        let meta = self.meta.take();
        let (status, envelope) = self.assemble(payload, meta);
        FinalizedResponse { status, envelope }
    }

    fn assemble(&self, payload: Option<T>, meta: Option<M>) -> (u16, Envelope<T, M>) {
        let status = self
            .status_code
            .unwrap_or_else(|| resolve_status(&self.error, &self.status_mapping));

        let mut envelope = Envelope::default();

        if let Some(detail) = self.error_detail(status) {
            envelope.errors = Some(Errors::Details(vec![detail]));
        }

        // Validation failures replace the error body but never the status.
        if let Some(violations) = &self.validation {
            let failures = ValidationTranslator::new(self.translator.as_deref())
                .with_locale(self.locale.as_deref())
                .translate_violations(violations);
            envelope.errors = Some(Errors::Validation(failures));
        }

        envelope.data = payload;
        envelope.message = self.message.as_ref().map(|(key, args)| self.localize(key, args));
        envelope.meta = meta;

        (status, envelope)
    }

    fn error_detail(&self, status: u16) -> Option<ErrorDetail> {
        let mut type_info = ERR_TYPE_INFO_SOMETHING_IS_WRONG.to_string();
        let mut detail = ERR_DETAIL_SOMETHING_IS_WRONG.to_string();
        let mut attributes = Map::new();

        match &self.error {
            ClassifiedError::None => return None,
            ClassifiedError::Native { message } => {
                if !message.is_empty() {
                    type_info = message.clone();
                    detail = message.clone();
                }
            }
            ClassifiedError::Domain {
                message,
                kind,
                attributes: domain_attributes,
            } => {
                if !kind.is_empty() {
                    type_info = kind.clone();
                }
                if !message.is_empty() {
                    detail = message.clone();
                }
                attributes = domain_attributes.clone();
            }
        }

        Some(ErrorDetail {
            type_info,
            status,
            detail: self.localize(&detail, &attributes),
            attributes,
        })
    }

    fn localize(&self, key: &str, args: &Args) -> String {
        match &self.translator {
            Some(translator) => translator.trans(key, args, self.locale.as_deref()),
            None => key.to_string(),
        }
    }
}

/// Status code and envelope produced by [`ResponseBuilder::build`].
#[derive(Debug, Clone, PartialEq)]
pub struct FinalizedResponse<T = Value, M = Value> {
    pub status: u16,
    pub envelope: Envelope<T, M>,
}

impl<T, M> FinalizedResponse<T, M> {
    /// Anything below 400 is delivered as a normal response, including 1xx
    /// overrides; 400 and above abort the request with the envelope as
    /// error body.
    pub fn is_success(&self) -> bool {
        self.status < 400
    }

    pub fn into_parts(self) -> (u16, Envelope<T, M>) {
        (self.status, self.envelope)
    }
}
