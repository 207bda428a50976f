//! Instruction repository trait definition.

use parlance_types::agent::{Instruction, TokenAddress};
use parlance_types::error::RepositoryError;

/// Repository trait for per-agent instruction persistence.
///
/// Instruction ids are monotonic and store-assigned; listing returns
/// ascending creation order because the concatenation order of
/// instructions is part of the system-prompt contract.
pub trait InstructionRepository: Send + Sync {
    /// Append an instruction for the agent. Returns the new id.
    fn insert(
        &self,
        token_address: &TokenAddress,
        content: &str,
    ) -> impl std::future::Future<Output = Result<i64, RepositoryError>> + Send;

    /// List the agent's instructions in ascending creation order.
    ///
    /// An unknown agent yields an empty list, not an error.
    fn list(
        &self,
        token_address: &TokenAddress,
    ) -> impl std::future::Future<Output = Result<Vec<Instruction>, RepositoryError>> + Send;

    /// Replace the content of the instruction with the given id.
    ///
    /// Fails with `RepositoryError::NotFound` when no such row exists.
    fn update_content(
        &self,
        id: i64,
        content: &str,
    ) -> impl std::future::Future<Output = Result<(), RepositoryError>> + Send;

    /// Delete the instruction with the given id.
    ///
    /// Same not-found policy as `update_content`.
    fn delete(
        &self,
        id: i64,
    ) -> impl std::future::Future<Output = Result<(), RepositoryError>> + Send;
}
