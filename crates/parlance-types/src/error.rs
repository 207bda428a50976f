use thiserror::Error;

use crate::llm::LlmError;

/// Errors from the shared-secret access gate.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum AccessError {
    #[error("missing credential")]
    MissingCredential,

    #[error("invalid credential")]
    InvalidCredential,
}

/// Errors from repository operations (used by trait definitions in parlance-core).
#[derive(Debug, Error)]
pub enum RepositoryError {
    #[error("database connection error")]
    Connection,

    #[error("query error: {0}")]
    Query(String),

    #[error("entity not found")]
    NotFound,
}

/// Errors from a chat turn: either the stores or the model invocation failed.
///
/// Invocation errors are surfaced without retrying; a failed invocation
/// commits no partial state (the turn is persisted only after a reply).
#[derive(Debug, Error)]
pub enum ChatError {
    #[error(transparent)]
    Repository(#[from] RepositoryError),

    #[error("model invocation failed: {0}")]
    Invocation(#[from] LlmError),
}

/// Errors from the outbound notification collaborator.
///
/// Always logged and swallowed by callers; delivery failures never change
/// the response sent to the original caller.
#[derive(Debug, Error)]
pub enum NotifyError {
    #[error("notifier disabled (no delivery token configured)")]
    Disabled,

    #[error("delivery failed: {0}")]
    Delivery(String),
}
