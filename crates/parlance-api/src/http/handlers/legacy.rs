//! v1 handlers, preserved for backward compatibility.
//!
//! These routes predate both the shared-secret gate and per-user history
//! segregation; they are intentionally ungated and single-threaded per
//! agent. A missing `agent_id` is reported as 404 (historical behavior),
//! not as a validation failure.

use axum::extract::{Query, State};
use axum::Json;
use serde::{Deserialize, Serialize};

use crate::http::error::AppError;
use crate::http::handlers::chat::{ChatRequest, ChatResponse, HistoryEntry, HistoryResponse};
use crate::http::handlers::required_str;
use crate::state::AppState;

#[derive(Debug, Deserialize)]
pub struct NewAgentRequest {
    pub topic: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct NewAgentResponse {
    pub agent_id: String,
}

#[derive(Debug, Deserialize)]
pub struct LegacyChatQuery {
    pub agent_id: Option<String>,
}

fn required_agent_id(query: LegacyChatQuery) -> Result<String, AppError> {
    match query.agent_id {
        Some(id) if !id.trim().is_empty() => Ok(id),
        _ => Err(AppError::NotFound("agent_id is required".to_string())),
    }
}

/// POST /new-agent - create a v1 agent from a free-text topic.
pub async fn new_agent(
    State(state): State<AppState>,
    Json(body): Json<NewAgentRequest>,
) -> Result<Json<NewAgentResponse>, AppError> {
    let topic = required_str(body.topic, "topic")?;

    let agent_id = state.legacy_service.new_agent(&topic).await?;

    Ok(Json(NewAgentResponse { agent_id }))
}

/// POST /chat?agent_id= - run one turn against the shared history.
pub async fn chat(
    State(state): State<AppState>,
    Query(query): Query<LegacyChatQuery>,
    Json(body): Json<ChatRequest>,
) -> Result<Json<ChatResponse>, AppError> {
    let agent_id = required_agent_id(query)?;
    let msg = required_str(body.msg, "msg")?;

    let response = state.legacy_service.chat(&agent_id, &msg).await?;

    Ok(Json(ChatResponse { response }))
}

/// GET /chat?agent_id= - read the shared history.
pub async fn get_history(
    State(state): State<AppState>,
    Query(query): Query<LegacyChatQuery>,
) -> Result<Json<HistoryResponse>, AppError> {
    let agent_id = required_agent_id(query)?;

    let messages = state.legacy_service.history(&agent_id).await?;

    Ok(Json(HistoryResponse {
        messages: messages.into_iter().map(HistoryEntry::from).collect(),
    }))
}
