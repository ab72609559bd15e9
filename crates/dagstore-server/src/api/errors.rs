//! Error handling for the DagStore API
//!
//! Every failure is rendered with the same body:
//! `{"error": msg, "errorDetails": {"errorCode": code, "errorMessage": msg}}`.

use axum::{
    extract::rejection::{JsonRejection, PathRejection},
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use dagstore_core::CoreError;
use serde_json::json;
use tracing::error;

use crate::error::ServerError;

/// API Error type for returning standard error responses
#[derive(Debug)]
pub enum ApiError {
    /// Request body or path could not be parsed into the expected shape (422)
    UnprocessableEntity(String),
    /// Not found (404)
    NotFound(String),
    /// Wrapped server error
    ServerError(ServerError),
}

impl From<ServerError> for ApiError {
    fn from(err: ServerError) -> Self {
        ApiError::ServerError(err)
    }
}

impl From<CoreError> for ApiError {
    fn from(err: CoreError) -> Self {
        ApiError::ServerError(ServerError::Core(err))
    }
}

impl From<JsonRejection> for ApiError {
    fn from(rejection: JsonRejection) -> Self {
        ApiError::UnprocessableEntity(rejection.body_text())
    }
}

impl From<PathRejection> for ApiError {
    fn from(rejection: PathRejection) -> Self {
        ApiError::UnprocessableEntity(rejection.body_text())
    }
}

impl std::fmt::Display for ApiError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ApiError::UnprocessableEntity(msg) => write!(f, "Unprocessable Entity: {}", msg),
            ApiError::NotFound(msg) => write!(f, "Not Found: {}", msg),
            ApiError::ServerError(err) => write!(f, "Server Error: {}", err),
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, error_code, message) = match self {
            ApiError::UnprocessableEntity(msg) => {
                (StatusCode::UNPROCESSABLE_ENTITY, "ERR_MALFORMED_REQUEST", msg)
            }
            ApiError::NotFound(msg) => (StatusCode::NOT_FOUND, "ERR_NOT_FOUND", msg),
            ApiError::ServerError(err) => return api_error_response(&err),
        };

        error_body(status, error_code, &message)
    }
}

/// Convert a server error into a standardized API error response
pub fn api_error_response(err: &ServerError) -> Response {
    let (status_code, error_code) = match err {
        ServerError::Core(core) => (core_status(core), core.error_code()),
        ServerError::ConfigError(_) => (StatusCode::INTERNAL_SERVER_ERROR, "ERR_CONFIG_ERROR"),
        ServerError::InternalError(_) => (StatusCode::INTERNAL_SERVER_ERROR, "ERR_INTERNAL_SERVER_ERROR"),
    };

    if status_code.is_server_error() {
        error!(error_code, %err, "Request failed");
    }

    error_body(status_code, error_code, &err.to_string())
}

/// HTTP status for a core error
pub fn core_status(err: &CoreError) -> StatusCode {
    match err {
        CoreError::InvalidNodeName(_) | CoreError::InvalidStructure(_) | CoreError::NotADag { .. } => {
            StatusCode::BAD_REQUEST
        }
        CoreError::GraphNotFound(_) | CoreError::NodeNotFound { .. } => StatusCode::NOT_FOUND,
        CoreError::StateStoreError(_) => StatusCode::INTERNAL_SERVER_ERROR,
    }
}

fn error_body(status: StatusCode, error_code: &str, message: &str) -> Response {
    let body = Json(json!({
        "error": message,
        "errorDetails": {
            "errorCode": error_code,
            "errorMessage": message,
        }
    }));

    (status, body).into_response()
}
