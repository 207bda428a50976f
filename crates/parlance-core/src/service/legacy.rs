//! v1 compatibility bridge.
//!
//! The v1 surface predates per-user segregation: an agent is created with
//! a generated opaque identifier and a single instruction equal to its
//! free-text topic, and every chat turn for that identifier shares one
//! global history. This service adapts that shape onto the same stores by
//! using the identifier as both the agent key and the shared user key.
//!
//! The divergence from v2 is deliberate and preserved as observed: v1
//! histories are never partitioned per user, and the endpoints stay
//! ungated. Do not "fix" either without retiring the surface.

use parlance_types::agent::{TokenAddress, UserAddress};
use parlance_types::error::{ChatError, RepositoryError};
use parlance_types::message::Message;
use tracing::info;
use uuid::Uuid;

use crate::context::assemble_context;
use crate::llm::LlmProvider;
use crate::repository::agent::AgentRepository;
use crate::repository::instruction::InstructionRepository;
use crate::repository::message::MessageRepository;

/// Service backing the v1 endpoints.
pub struct LegacyService<A, I, M, L>
where
    A: AgentRepository,
    I: InstructionRepository,
    M: MessageRepository,
    L: LlmProvider,
{
    agents: A,
    instructions: I,
    messages: M,
    provider: L,
}

impl<A, I, M, L> LegacyService<A, I, M, L>
where
    A: AgentRepository,
    I: InstructionRepository,
    M: MessageRepository,
    L: LlmProvider,
{
    /// Create a new legacy service with the given repositories and provider.
    pub fn new(agents: A, instructions: I, messages: M, provider: L) -> Self {
        Self {
            agents,
            instructions,
            messages,
            provider,
        }
    }

    /// Create a v1 agent from a free-text topic.
    ///
    /// Generates an opaque identifier, registers it as an agent owned by
    /// itself, and stores the topic as the agent's single instruction.
    /// Returns the identifier handed back to the caller.
    pub async fn new_agent(&self, topic: &str) -> Result<String, RepositoryError> {
        let agent_id = Uuid::now_v7().to_string();
        let token = TokenAddress::new(&agent_id);

        self.agents.ensure_agent(&token, &agent_id).await?;
        self.instructions.insert(&token, topic).await?;

        info!(agent_id = %agent_id, "legacy agent created");
        Ok(agent_id)
    }

    /// Run one turn against the agent's single shared history.
    pub async fn chat(&self, agent_id: &str, incoming: &str) -> Result<String, ChatError> {
        let token = TokenAddress::new(agent_id);
        // The identifier doubles as the user key: one global thread per agent.
        let shared_user = UserAddress::new(agent_id);

        let instructions = self.instructions.list(&token).await?;
        let history = self.messages.list(&token, &shared_user).await?;

        let context = assemble_context(&instructions, &history, incoming);
        let reply = self.provider.complete(&context).await?;

        self.messages
            .append_turn(&token, &shared_user, incoming, &reply)
            .await?;

        Ok(reply)
    }

    /// Read the agent's shared history, oldest first.
    pub async fn history(&self, agent_id: &str) -> Result<Vec<Message>, RepositoryError> {
        let token = TokenAddress::new(agent_id);
        let shared_user = UserAddress::new(agent_id);
        self.messages.list(&token, &shared_user).await
    }
}
