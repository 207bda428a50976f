//! Shared-secret authentication extractor.
//!
//! Extracting [`AppKey`] validates the `x-app-key` header against the
//! configured secret before the handler body runs, so gate failures
//! short-circuit ahead of any store access. v1 handlers simply do not
//! declare the extractor.

use axum::extract::FromRequestParts;
use axum::http::request::Parts;

use crate::http::error::AppError;
use crate::state::AppState;

/// Authenticated request marker. Extracting this validates the app key.
pub struct AppKey;

impl FromRequestParts<AppState> for AppKey {
    type Rejection = AppError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let credential = match parts.headers.get("x-app-key") {
            Some(value) => Some(value.to_str().map_err(|_| AppError::InvalidAppKey)?),
            None => None,
        };

        state.gate.authorize(credential)?;
        Ok(AppKey)
    }
}
