//! v1 onboarding verification handler.

use axum::extract::State;
use axum::Json;
use serde::Deserialize;

use crate::http::error::AppError;
use crate::http::handlers::{required_str, SuccessResponse};
use crate::state::AppState;

#[derive(Debug, Deserialize)]
pub struct VerifyRequest {
    pub telegram: Option<String>,
    pub wallet_address: Option<String>,
    pub signature: Option<String>,
    pub dob: Option<String>,
}

/// POST /v1/verify - mark a member verified and notify them (best effort).
pub async fn verify(
    State(state): State<AppState>,
    Json(body): Json<VerifyRequest>,
) -> Result<Json<SuccessResponse>, AppError> {
    let telegram = required_str(body.telegram, "telegram")?;
    let wallet_address = required_str(body.wallet_address, "wallet_address")?;
    // TODO: verify the signed message against the wallet address before
    // trusting the submission.
    let _signature = required_str(body.signature, "signature")?;
    let dob = required_str(body.dob, "dob")?;

    state
        .onboarding_service
        .verify(&telegram, &wallet_address, &dob)
        .await?;

    Ok(Json(SuccessResponse::ok()))
}
