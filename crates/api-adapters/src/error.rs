//! Maps `DomainError` onto HTTP responses.
//!
//! Every error body is `{"message": "..."}`. Internal failures are logged
//! with their detail and answered with a generic message.

use axum::extract::rejection::{JsonRejection, PathRejection};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use domains::DomainError;
use serde_json::json;
use tracing::{error, warn};

#[derive(Debug)]
pub struct ApiError {
    inner: DomainError,
    /// Replaces the generic text for 500 responses.
    internal_message: Option<&'static str>,
}

impl ApiError {
    pub fn validation(message: impl Into<String>) -> Self {
        DomainError::ValidationError(message.into()).into()
    }

    /// Message the client sees if this turns out to be an internal failure.
    pub fn or_internal(mut self, message: &'static str) -> Self {
        self.internal_message = Some(message);
        self
    }

    pub fn status(&self) -> StatusCode {
        match self.inner {
            DomainError::ValidationError(_) => StatusCode::BAD_REQUEST,
            DomainError::NotFound(..) => StatusCode::NOT_FOUND,
            DomainError::Unauthorized(_) => StatusCode::UNAUTHORIZED,
            DomainError::Conflict(_) => StatusCode::CONFLICT,
            DomainError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl From<DomainError> for ApiError {
    fn from(inner: DomainError) -> Self {
        Self { inner, internal_message: None }
    }
}

impl From<JsonRejection> for ApiError {
    fn from(rejection: JsonRejection) -> Self {
        warn!(error = %rejection, "malformed JSON body");
        ApiError::validation(rejection.body_text())
    }
}

impl From<PathRejection> for ApiError {
    fn from(rejection: PathRejection) -> Self {
        warn!(error = %rejection, "bad path parameter");
        ApiError::validation("Invalid video id")
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();
        let message = match &self.inner {
            DomainError::Internal(detail) => {
                error!(error = %detail, "request failed");
                self.internal_message.unwrap_or("Internal server error").to_string()
            }
            DomainError::ValidationError(msg) => msg.clone(),
            DomainError::Unauthorized(msg) => msg.clone(),
            DomainError::Conflict(msg) => msg.clone(),
            other => other.to_string(),
        };
        (status, Json(json!({ "message": message }))).into_response()
    }
}
