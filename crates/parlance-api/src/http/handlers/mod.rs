//! Request handlers for the REST API.
//!
//! Response shapes are contract surfaces; they serialize exactly as the
//! endpoint table specifies. Required fields arrive as `Option` and are
//! checked here, before any store access, so validation failures are
//! always 400s that commit nothing.

use serde::Serialize;

use crate::http::error::AppError;

pub mod chat;
pub mod instruction;
pub mod legacy;
pub mod verify;

/// `{"success": true}` body shared by the mutating v2 endpoints.
#[derive(Debug, Serialize)]
pub struct SuccessResponse {
    pub success: bool,
}

impl SuccessResponse {
    pub fn ok() -> Self {
        Self { success: true }
    }
}

/// Unwrap a required field, failing validation when absent.
pub(crate) fn required<T>(value: Option<T>, field: &str) -> Result<T, AppError> {
    value.ok_or_else(|| AppError::Validation(format!("missing required field '{field}'")))
}

/// Unwrap a required string field, treating empty/blank as absent.
pub(crate) fn required_str(value: Option<String>, field: &str) -> Result<String, AppError> {
    match value {
        Some(s) if !s.trim().is_empty() => Ok(s),
        _ => Err(AppError::Validation(format!(
            "missing required field '{field}'"
        ))),
    }
}
