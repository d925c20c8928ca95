use crate::builder::{FinalizedResponse, ResponseBuilder};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Json, Response};
use serde::Serialize;
use tracing::debug;

impl<T, M> IntoResponse for FinalizedResponse<T, M>
where
    T: Serialize,
    M: Serialize,
{
    fn into_response(self) -> Response {
        let status = StatusCode::from_u16(self.status).unwrap_or_else(|_| {
            debug!("Invalid status code {}, answering 500", self.status);
            StatusCode::INTERNAL_SERVER_ERROR
        });

        if !self.is_success() {
            debug!("Aborting request with status {}", status);
        }

        (status, Json(self.envelope)).into_response()
    }
}

impl<T, M> IntoResponse for ResponseBuilder<T, M>
where
    T: Serialize,
    M: Serialize,
{
    fn into_response(self) -> Response {
        self.build().into_response()
    }
}
