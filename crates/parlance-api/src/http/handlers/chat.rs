//! v2 chat handlers: per-(agent, user) history reads and turn execution.

use axum::extract::{Query, State};
use axum::Json;
use serde::{Deserialize, Serialize};

use parlance_types::agent::{TokenAddress, UserAddress};
use parlance_types::message::{Message, MessageRole};

use crate::http::error::AppError;
use crate::http::extractors::auth::AppKey;
use crate::http::handlers::required_str;
use crate::state::AppState;

#[derive(Debug, Deserialize)]
pub struct ChatThreadQuery {
    pub token_address: Option<String>,
    pub user_address: Option<String>,
}

/// One history entry: `{role, content}` with the role label, not the
/// stored smallint.
#[derive(Debug, Serialize)]
pub struct HistoryEntry {
    pub role: MessageRole,
    pub content: String,
}

impl From<Message> for HistoryEntry {
    fn from(message: Message) -> Self {
        Self {
            role: message.role,
            content: message.content,
        }
    }
}

#[derive(Debug, Serialize)]
pub struct HistoryResponse {
    pub messages: Vec<HistoryEntry>,
}

#[derive(Debug, Deserialize)]
pub struct ChatRequest {
    pub msg: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct ChatResponse {
    pub response: String,
}

/// GET /v2/chat?token_address=&user_address= - read one thread.
pub async fn get_history(
    State(state): State<AppState>,
    _auth: AppKey,
    Query(query): Query<ChatThreadQuery>,
) -> Result<Json<HistoryResponse>, AppError> {
    let token = required_str(query.token_address, "token_address")?;
    let user = required_str(query.user_address, "user_address")?;

    let messages = state
        .chat_service
        .history(&TokenAddress::new(&token), &UserAddress::new(&user))
        .await?;

    Ok(Json(HistoryResponse {
        messages: messages.into_iter().map(HistoryEntry::from).collect(),
    }))
}

/// POST /v2/chat?token_address=&user_address= - run one turn.
pub async fn chat(
    State(state): State<AppState>,
    _auth: AppKey,
    Query(query): Query<ChatThreadQuery>,
    Json(body): Json<ChatRequest>,
) -> Result<Json<ChatResponse>, AppError> {
    let token = required_str(query.token_address, "token_address")?;
    let user = required_str(query.user_address, "user_address")?;
    let msg = required_str(body.msg, "msg")?;

    let response = state
        .chat_service
        .chat(&TokenAddress::new(&token), &UserAddress::new(&user), &msg)
        .await?;

    Ok(Json(ChatResponse { response }))
}

/// DELETE /v2/chat - messages are append-only and never deleted.
pub async fn delete_history(
    State(_state): State<AppState>,
    _auth: AppKey,
) -> Result<Json<HistoryResponse>, AppError> {
    Err(AppError::NotImplemented)
}
