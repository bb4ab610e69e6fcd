//! API error handling
//!
//! Every failure is rendered as `{"success": false, "error": message}`.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use ss_core::error::{SsError, ValidationErrors};
use tracing::error;

use crate::response::ErrorBody;

/// API error types
#[derive(Debug)]
pub enum ApiError {
    NotFound(String),
    Validation(ValidationErrors),
    BadRequest(String),
    Internal(String),
}

impl ApiError {
    pub fn not_found(msg: impl Into<String>) -> Self {
        ApiError::NotFound(msg.into())
    }

    pub fn bad_request(msg: impl Into<String>) -> Self {
        ApiError::BadRequest(msg.into())
    }

    pub fn status_code(&self) -> StatusCode {
        match self {
            ApiError::NotFound(_) => StatusCode::NOT_FOUND,
            ApiError::Validation(_) | ApiError::BadRequest(_) => StatusCode::BAD_REQUEST,
            ApiError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    pub fn message(&self) -> String {
        match self {
            ApiError::Validation(errors) => errors.to_string(),
            ApiError::NotFound(msg) | ApiError::BadRequest(msg) | ApiError::Internal(msg) => {
                msg.clone()
            }
        }
    }
}

impl From<SsError> for ApiError {
    fn from(err: SsError) -> Self {
        match err {
            SsError::Validation(errors) => ApiError::Validation(errors),
            missing @ SsError::NotFound { .. } => ApiError::NotFound(missing.to_string()),
            SsError::Storage(msg) => ApiError::Internal(msg),
            other => ApiError::Internal(other.to_string()),
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        let message = self.message();
        if status.is_server_error() {
            error!(status = status.as_u16(), error = %message, "Request failed");
        }

        (status, Json(ErrorBody::new(message))).into_response()
    }
}

pub type ApiResult<T> = Result<T, ApiError>;
