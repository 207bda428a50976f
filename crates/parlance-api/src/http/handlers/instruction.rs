//! v2 instruction CRUD handlers.

use axum::extract::{Query, State};
use axum::Json;
use serde::{Deserialize, Serialize};

use parlance_types::agent::TokenAddress;

use crate::http::error::AppError;
use crate::http::extractors::auth::AppKey;
use crate::http::handlers::{required, required_str, SuccessResponse};
use crate::state::AppState;

#[derive(Debug, Deserialize)]
pub struct InstructionListQuery {
    pub token_address: Option<String>,
}

/// One instruction in the list response: `{id, content}`.
#[derive(Debug, Serialize)]
pub struct InstructionEntry {
    pub id: i64,
    pub content: String,
}

/// GET /v2/instructions?token_address= - list an agent's instructions.
pub async fn list_instructions(
    State(state): State<AppState>,
    _auth: AppKey,
    Query(query): Query<InstructionListQuery>,
) -> Result<Json<Vec<InstructionEntry>>, AppError> {
    let token = required_str(query.token_address, "token_address")?;

    let instructions = state
        .instruction_service
        .list_instructions(&TokenAddress::new(&token))
        .await?;

    Ok(Json(
        instructions
            .into_iter()
            .map(|i| InstructionEntry {
                id: i.id,
                content: i.content,
            })
            .collect(),
    ))
}

#[derive(Debug, Deserialize)]
pub struct CreateInstructionRequest {
    pub token_address: Option<String>,
    pub instruction: Option<String>,
    pub owner_address: Option<String>,
}

/// POST /v2/instructions - append an instruction, creating the agent lazily.
pub async fn create_instruction(
    State(state): State<AppState>,
    _auth: AppKey,
    Json(body): Json<CreateInstructionRequest>,
) -> Result<Json<SuccessResponse>, AppError> {
    let token = required_str(body.token_address, "token_address")?;
    let instruction = required_str(body.instruction, "instruction")?;
    let owner = required_str(body.owner_address, "owner_address")?;

    state
        .instruction_service
        .add_instruction(&TokenAddress::new(&token), &owner, &instruction)
        .await?;

    Ok(Json(SuccessResponse::ok()))
}

#[derive(Debug, Deserialize)]
pub struct UpdateInstructionRequest {
    pub instruction_id: Option<i64>,
    pub instruction: Option<String>,
}

/// PATCH /v2/instructions - replace the content of an existing instruction.
pub async fn update_instruction(
    State(state): State<AppState>,
    _auth: AppKey,
    Json(body): Json<UpdateInstructionRequest>,
) -> Result<Json<SuccessResponse>, AppError> {
    let id = required(body.instruction_id, "instruction_id")?;
    let instruction = required_str(body.instruction, "instruction")?;

    state
        .instruction_service
        .update_instruction(id, &instruction)
        .await?;

    Ok(Json(SuccessResponse::ok()))
}

#[derive(Debug, Deserialize)]
pub struct DeleteInstructionRequest {
    pub instruction_id: Option<i64>,
}

/// DELETE /v2/instructions - remove an instruction by id.
pub async fn delete_instruction(
    State(state): State<AppState>,
    _auth: AppKey,
    Json(body): Json<DeleteInstructionRequest>,
) -> Result<Json<SuccessResponse>, AppError> {
    let id = required(body.instruction_id, "instruction_id")?;

    state.instruction_service.delete_instruction(id).await?;

    Ok(Json(SuccessResponse::ok()))
}
