use axum::{
    http::StatusCode,
    response::{IntoResponse, Json},
};
use serde_json::json;

use crate::store::StoreError;

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Bad request: {0}")]
    BadRequest(String),

    #[error("Unauthorized: {0}")]
    Unauthorized(String),

    #[error("Forbidden: {0}")]
    Forbidden(String),

    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Validation error: {0}")]
    Validation(#[from] validator::ValidationErrors),

    #[error("Upstream failure: {reason}")]
    Upstream { reason: String },

    #[error("Internal error: {0}")]
    Internal(String),
}

impl Error {
    /// Upstream failure carrying the collaborator's reason, or `fallback` when it gave none.
    pub fn upstream(err: &StoreError, fallback: &str) -> Self {
        Error::Upstream {
            reason: err.reason().unwrap_or_else(|| fallback.to_string()),
        }
    }
}

impl IntoResponse for Error {
    fn into_response(self) -> axum::response::Response {
        let (status, error_message) = match self {
            Error::BadRequest(msg) => (StatusCode::BAD_REQUEST, msg),
            Error::Unauthorized(msg) => (StatusCode::UNAUTHORIZED, msg),
            Error::Forbidden(msg) => (StatusCode::FORBIDDEN, msg),
            Error::NotFound(msg) => (StatusCode::NOT_FOUND, msg),
            Error::Validation(err) => (StatusCode::BAD_REQUEST, err.to_string()),
            Error::Upstream { reason } => {
                tracing::error!(%reason, "upstream failure");
                (StatusCode::INTERNAL_SERVER_ERROR, reason)
            }
            Error::Config(msg) | Error::Internal(msg) => {
                tracing::error!(error = %msg, "internal error");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "An unexpected error occurred".to_string(),
                )
            }
        };

        let body = Json(json!({ "error": error_message }));
        (status, body).into_response()
    }
}

/// Outcome of a step whose failure must never abort the surrounding workflow.
#[derive(Debug)]
pub enum Advisory<T> {
    Done(T),
    Skipped(StoreError),
}

impl<T> Advisory<T> {
    pub fn from_result(result: std::result::Result<T, StoreError>) -> Self {
        match result {
            Ok(value) => Advisory::Done(value),
            Err(err) => Advisory::Skipped(err),
        }
    }

    /// Logs a skipped step and hands back whatever value the step produced.
    pub fn into_option(self, step: &str) -> Option<T> {
        match self {
            Advisory::Done(value) => Some(value),
            Advisory::Skipped(err) => {
                tracing::warn!(step, error = %err, "advisory step failed, continuing without it");
                None
            }
        }
    }
}
