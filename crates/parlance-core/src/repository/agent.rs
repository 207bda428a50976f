//! Agent repository trait definition.

use parlance_types::agent::{Agent, TokenAddress};
use parlance_types::error::RepositoryError;

/// Repository trait for agent identity persistence.
///
/// Implementations live in parlance-infra (e.g., SqliteAgentRepository).
/// Uses native async fn in traits (Rust 2024 edition, no async_trait macro).
pub trait AgentRepository: Send + Sync {
    /// Idempotently create the agent row for `token_address`.
    ///
    /// No-ops when a row already exists for that key: the stored owner
    /// address is never overwritten, and repeat calls never error.
    fn ensure_agent(
        &self,
        token_address: &TokenAddress,
        owner_address: &str,
    ) -> impl std::future::Future<Output = Result<(), RepositoryError>> + Send;

    /// Fetch an agent by its canonical key.
    fn get_agent(
        &self,
        token_address: &TokenAddress,
    ) -> impl std::future::Future<Output = Result<Option<Agent>, RepositoryError>> + Send;
}
