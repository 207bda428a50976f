//! Application error type mapping to HTTP status codes and the envelope format.
//!
//! The envelope is `{"error": <kind>}` with an optional `"message"` field.
//! The access-gate bodies are exact contract surfaces (clients match on
//! them), and the 500/501 envelopes are fixed -- internal detail is logged,
//! never leaked.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::Serialize;

use parlance_types::error::{AccessError, ChatError, RepositoryError};

/// Application-level error that maps to HTTP responses.
#[derive(Debug)]
pub enum AppError {
    /// `x-app-key` header absent or empty.
    MissingAppKey,
    /// `x-app-key` header present but wrong.
    InvalidAppKey,
    /// A required field is absent or malformed.
    Validation(String),
    /// A referenced entity does not exist.
    NotFound(String),
    /// Route exists but is not implemented.
    NotImplemented,
    /// Anything else; detail is logged, the response body is fixed.
    Internal(String),
}

impl From<AccessError> for AppError {
    fn from(e: AccessError) -> Self {
        match e {
            AccessError::MissingCredential => AppError::MissingAppKey,
            AccessError::InvalidCredential => AppError::InvalidAppKey,
        }
    }
}

impl From<RepositoryError> for AppError {
    fn from(e: RepositoryError) -> Self {
        match e {
            RepositoryError::NotFound => AppError::NotFound("instruction not found".to_string()),
            other => AppError::Internal(other.to_string()),
        }
    }
}

impl From<ChatError> for AppError {
    fn from(e: ChatError) -> Self {
        match e {
            ChatError::Repository(repo) => repo.into(),
            ChatError::Invocation(llm) => AppError::Internal(llm.to_string()),
        }
    }
}

/// Wire shape of the error envelope.
#[derive(Debug, Serialize)]
struct ErrorBody {
    error: &'static str,
    #[serde(skip_serializing_if = "Option::is_none")]
    message: Option<String>,
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, body) = match self {
            AppError::MissingAppKey => (
                StatusCode::BAD_REQUEST,
                ErrorBody {
                    error: "Missing x-app-key",
                    message: None,
                },
            ),
            AppError::InvalidAppKey => (
                StatusCode::FORBIDDEN,
                ErrorBody {
                    error: "Invalid x-app-key",
                    message: None,
                },
            ),
            AppError::Validation(message) => (
                StatusCode::BAD_REQUEST,
                ErrorBody {
                    error: "Validation error",
                    message: Some(message),
                },
            ),
            AppError::NotFound(message) => (
                StatusCode::NOT_FOUND,
                ErrorBody {
                    error: "Not Found",
                    message: Some(message),
                },
            ),
            AppError::NotImplemented => (
                StatusCode::NOT_IMPLEMENTED,
                ErrorBody {
                    error: "Not Implemented",
                    message: Some("This feature is not implemented yet.".to_string()),
                },
            ),
            AppError::Internal(detail) => {
                tracing::error!(detail = %detail, "request failed");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    ErrorBody {
                        error: "Internal server error",
                        message: Some("Something wrong!".to_string()),
                    },
                )
            }
        };

        (status, Json(body)).into_response()
    }
}
