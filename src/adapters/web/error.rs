//! HTTP error responses for web adapter.

use axum::{
    Json,
    extract::rejection::JsonRejection,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde_json::json;

use crate::domain::error::HedgefundError;

#[derive(Debug)]
pub struct WebError {
    pub status: StatusCode,
    pub message: String,
}

impl WebError {
    pub fn new(status: StatusCode, message: impl Into<String>) -> Self {
        Self {
            status,
            message: message.into(),
        }
    }

    pub fn not_found(message: impl Into<String>) -> Self {
        Self::new(StatusCode::NOT_FOUND, message)
    }
}

pub fn status_from_error(err: &HedgefundError) -> StatusCode {
    match err {
        HedgefundError::InvalidTimeframe { .. } | HedgefundError::InvalidInput { .. } => {
            StatusCode::BAD_REQUEST
        }
        HedgefundError::NotFound { .. } => StatusCode::NOT_FOUND,
        HedgefundError::ConfigParse { .. }
        | HedgefundError::ConfigInvalid { .. }
        | HedgefundError::Storage { .. }
        | HedgefundError::Json(_)
        | HedgefundError::Io(_) => StatusCode::INTERNAL_SERVER_ERROR,
    }
}

impl From<HedgefundError> for WebError {
    fn from(err: HedgefundError) -> Self {
        Self::new(status_from_error(&err), err.to_string())
    }
}

impl From<JsonRejection> for WebError {
    fn from(rejection: JsonRejection) -> Self {
        Self::new(rejection.status(), rejection.body_text())
    }
}

impl IntoResponse for WebError {
    fn into_response(self) -> Response {
        if self.status.is_server_error() {
            tracing::error!(status = self.status.as_u16(), message = %self.message, "request failed");
        } else {
            tracing::debug!(status = self.status.as_u16(), message = %self.message, "request rejected");
        }
        (self.status, Json(json!({ "detail": self.message }))).into_response()
    }
}
