//! LlmProvider trait definition.
//!
//! The model is an opaque external function: it receives the assembled
//! context array and returns reply text, and may fail or time out. The
//! core surfaces any failure as-is; it never retries internally.

use parlance_types::llm::{ContextMessage, LlmError};

/// Trait for language-model backends.
///
/// Uses native async fn in traits (RPITIT, Rust 2024 edition).
/// Implementations live in parlance-infra (e.g., `OllamaProvider`).
pub trait LlmProvider: Send + Sync {
    /// Human-readable provider name (e.g., "ollama").
    fn name(&self) -> &str;

    /// Send the full ordered context and receive the reply text.
    fn complete(
        &self,
        context: &[ContextMessage],
    ) -> impl std::future::Future<Output = Result<String, LlmError>> + Send;
}
