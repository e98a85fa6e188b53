//! Error handling for the requirement graph API
//!
//! Every failure is rendered as
//! `{"error": ..., "detail": ..., "errorDetails": {"errorCode": ..., "errorMessage": ...}}`.
//! `detail` repeats the message for clients that only read that field.

use axum::{http::StatusCode, response::IntoResponse, Json};
use reqgraph_extract::{ErrorKind, ExtractError};
use serde_json::json;
use tracing::error;

use crate::error::ServerError;

/// API Error type for returning standard error responses
#[derive(Debug)]
pub enum ApiError {
    /// Bad request (400)
    BadRequest(String),
    /// Wrapped server error
    ServerError(ServerError),
}

impl From<ServerError> for ApiError {
    fn from(err: ServerError) -> Self {
        ApiError::ServerError(err)
    }
}

impl From<ExtractError> for ApiError {
    fn from(err: ExtractError) -> Self {
        ApiError::ServerError(ServerError::Extraction(err))
    }
}

impl std::fmt::Display for ApiError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ApiError::BadRequest(msg) => write!(f, "Bad Request: {}", msg),
            ApiError::ServerError(err) => write!(f, "Server Error: {}", err),
        }
    }
}

/// Status code for an extraction failure
pub fn extraction_status(err: &ExtractError) -> StatusCode {
    match err.kind() {
        ErrorKind::ModelUnavailable => StatusCode::BAD_GATEWAY,
        ErrorKind::NoStructuredBlock | ErrorKind::Decode | ErrorKind::Validation => {
            StatusCode::UNPROCESSABLE_ENTITY
        }
        ErrorKind::Internal => StatusCode::INTERNAL_SERVER_ERROR,
    }
}

/// Status code, error code and message for a server error
fn server_error_parts(err: &ServerError) -> (StatusCode, String, String) {
    match err {
        ServerError::Extraction(err) => (
            extraction_status(err),
            err.error_code().to_string(),
            err.to_string(),
        ),
        ServerError::ConfigError(msg) => (
            StatusCode::INTERNAL_SERVER_ERROR,
            "ERR_CONFIG_ERROR".to_string(),
            msg.clone(),
        ),
        ServerError::InternalError(msg) => (
            StatusCode::INTERNAL_SERVER_ERROR,
            "ERR_INTERNAL_SERVER_ERROR".to_string(),
            msg.clone(),
        ),
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> axum::response::Response {
        let (status, error_code, message) = match &self {
            ApiError::BadRequest(msg) => (
                StatusCode::BAD_REQUEST,
                "ERR_BAD_REQUEST".to_string(),
                msg.clone(),
            ),
            ApiError::ServerError(err) => server_error_parts(err),
        };

        if status.is_server_error() {
            error!(%status, code = %error_code, "Request failed: {}", message);
        }

        let body = Json(json!({
            "error": message,
            "detail": message,
            "errorDetails": {
                "errorCode": error_code,
                "errorMessage": message,
            }
        }));

        (status, body).into_response()
    }
}
