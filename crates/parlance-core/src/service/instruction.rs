//! Instruction management service.
//!
//! Orchestrates the lazy agent create plus instruction CRUD. The agent row
//! is created on the first instruction write for a token address; the
//! owner recorded then is permanent.

use parlance_types::agent::{Instruction, TokenAddress};
use parlance_types::error::RepositoryError;
use tracing::debug;

use crate::repository::agent::AgentRepository;
use crate::repository::instruction::InstructionRepository;

/// Service for operator-authored instruction sets.
///
/// Generic over the repository traits to maintain clean architecture --
/// parlance-core never depends on parlance-infra.
pub struct InstructionService<A: AgentRepository, I: InstructionRepository> {
    agents: A,
    instructions: I,
}

impl<A: AgentRepository, I: InstructionRepository> InstructionService<A, I> {
    /// Create a new instruction service with the given repositories.
    pub fn new(agents: A, instructions: I) -> Self {
        Self {
            agents,
            instructions,
        }
    }

    /// Append an instruction for the agent, creating the agent row first
    /// if this is its first instruction. Returns the new instruction id.
    pub async fn add_instruction(
        &self,
        token_address: &TokenAddress,
        owner_address: &str,
        content: &str,
    ) -> Result<i64, RepositoryError> {
        self.agents
            .ensure_agent(token_address, &owner_address.to_ascii_lowercase())
            .await?;
        let id = self.instructions.insert(token_address, content).await?;
        debug!(token = %token_address, id, "instruction added");
        Ok(id)
    }

    /// List the agent's instructions in creation order.
    pub async fn list_instructions(
        &self,
        token_address: &TokenAddress,
    ) -> Result<Vec<Instruction>, RepositoryError> {
        self.instructions.list(token_address).await
    }

    /// Replace the content of an existing instruction.
    ///
    /// Fails with `RepositoryError::NotFound` for an unknown id.
    pub async fn update_instruction(
        &self,
        id: i64,
        content: &str,
    ) -> Result<(), RepositoryError> {
        self.instructions.update_content(id, content).await?;
        debug!(id, "instruction updated");
        Ok(())
    }

    /// Delete an instruction. Same not-found policy as update.
    pub async fn delete_instruction(&self, id: i64) -> Result<(), RepositoryError> {
        self.instructions.delete(id).await?;
        debug!(id, "instruction deleted");
        Ok(())
    }
}
