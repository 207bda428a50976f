//! Chat turn orchestration.
//!
//! One turn per request: read instructions and history, assemble the
//! context array, make the single model invocation, persist the turn
//! atomically, return the reply. Invocation failures surface to the
//! caller without retrying, and nothing is persisted for a failed turn.

use parlance_types::agent::{TokenAddress, UserAddress};
use parlance_types::error::{ChatError, RepositoryError};
use parlance_types::message::Message;
use tracing::info;

use crate::context::assemble_context;
use crate::llm::LlmProvider;
use crate::repository::instruction::InstructionRepository;
use crate::repository::message::MessageRepository;

/// Service running v2 conversation turns.
///
/// Generic over the repository and provider traits to maintain clean
/// architecture -- parlance-core never depends on parlance-infra.
pub struct ChatService<I: InstructionRepository, M: MessageRepository, L: LlmProvider> {
    instructions: I,
    messages: M,
    provider: L,
}

impl<I: InstructionRepository, M: MessageRepository, L: LlmProvider> ChatService<I, M, L> {
    /// Create a new chat service with the given repositories and provider.
    pub fn new(instructions: I, messages: M, provider: L) -> Self {
        Self {
            instructions,
            messages,
            provider,
        }
    }

    /// Run one conversation turn for the (token, user) thread.
    pub async fn chat(
        &self,
        token_address: &TokenAddress,
        user_address: &UserAddress,
        incoming: &str,
    ) -> Result<String, ChatError> {
        let instructions = self.instructions.list(token_address).await?;
        let history = self.messages.list(token_address, user_address).await?;

        let context = assemble_context(&instructions, &history, incoming);

        let reply = self.provider.complete(&context).await?;

        self.messages
            .append_turn(token_address, user_address, incoming, &reply)
            .await?;

        info!(
            token = %token_address,
            user = %user_address,
            context_len = context.len(),
            provider = self.provider.name(),
            "turn completed"
        );

        Ok(reply)
    }

    /// Read the stored thread for (token, user), oldest first.
    pub async fn history(
        &self,
        token_address: &TokenAddress,
        user_address: &UserAddress,
    ) -> Result<Vec<Message>, RepositoryError> {
        self.messages.list(token_address, user_address).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use parlance_types::llm::{ContextMessage, MessageRole};

    use crate::repository::instruction::InstructionRepository;
    use crate::testing::{FailingProvider, FixedReplyProvider, InMemoryRepos};

    fn keys() -> (TokenAddress, UserAddress) {
        (TokenAddress::new("t1"), UserAddress::new("u1"))
    }

    #[tokio::test]
    async fn test_chat_persists_turn_in_order() {
        let repos = InMemoryRepos::new();
        let service = ChatService::new(
            repos.clone(),
            repos.clone(),
            FixedReplyProvider::new("hello!"),
        );
        let (token, user) = keys();

        let reply = service.chat(&token, &user, "hi").await.unwrap();
        assert_eq!(reply, "hello!");

        let history = service.history(&token, &user).await.unwrap();
        assert_eq!(history.len(), 2);
        assert_eq!(history[0].role, MessageRole::User);
        assert_eq!(history[0].content, "hi");
        assert_eq!(history[1].role, MessageRole::Assistant);
        assert_eq!(history[1].content, "hello!");
    }

    #[tokio::test]
    async fn test_two_turns_listed_in_insertion_order() {
        let repos = InMemoryRepos::new();
        let service = ChatService::new(
            repos.clone(),
            repos.clone(),
            FixedReplyProvider::new("hello!"),
        );
        let (token, user) = keys();

        service.chat(&token, &user, "hi").await.unwrap();

        let service = ChatService::new(
            repos.clone(),
            repos.clone(),
            FixedReplyProvider::new("goodbye!"),
        );
        service.chat(&token, &user, "bye").await.unwrap();

        let history = service.history(&token, &user).await.unwrap();
        let turns: Vec<(MessageRole, &str)> = history
            .iter()
            .map(|m| (m.role, m.content.as_str()))
            .collect();
        assert_eq!(
            turns,
            vec![
                (MessageRole::User, "hi"),
                (MessageRole::Assistant, "hello!"),
                (MessageRole::User, "bye"),
                (MessageRole::Assistant, "goodbye!"),
            ]
        );
    }

    #[tokio::test]
    async fn test_context_includes_instructions_history_and_incoming() {
        let repos = InMemoryRepos::new();
        let token = TokenAddress::new("t1");
        let user = UserAddress::new("u1");

        repos.insert(&token, "Be polite").await.unwrap();
        repos.insert(&token, "Answer briefly").await.unwrap();

        let provider = FixedReplyProvider::new("ok");
        let service = ChatService::new(repos.clone(), repos.clone(), provider.clone());

        service.chat(&token, &user, "first").await.unwrap();
        service.chat(&token, &user, "second").await.unwrap();

        let contexts = provider.contexts.lock().unwrap();
        assert_eq!(
            contexts[0],
            vec![
                ContextMessage::new(MessageRole::System, "Be polite\nAnswer briefly"),
                ContextMessage::new(MessageRole::User, "first"),
            ]
        );
        assert_eq!(
            contexts[1],
            vec![
                ContextMessage::new(MessageRole::System, "Be polite\nAnswer briefly"),
                ContextMessage::new(MessageRole::User, "first"),
                ContextMessage::new(MessageRole::Assistant, "ok"),
                ContextMessage::new(MessageRole::User, "second"),
            ]
        );
    }

    #[tokio::test]
    async fn test_failed_invocation_persists_nothing() {
        let repos = InMemoryRepos::new();
        let service = ChatService::new(repos.clone(), repos.clone(), FailingProvider);
        let (token, user) = keys();

        let err = service.chat(&token, &user, "hi").await.unwrap_err();
        assert!(matches!(err, ChatError::Invocation(_)));

        let history = service.history(&token, &user).await.unwrap();
        assert!(history.is_empty());
    }

    #[tokio::test]
    async fn test_distinct_users_have_isolated_threads() {
        let repos = InMemoryRepos::new();
        let service = ChatService::new(
            repos.clone(),
            repos.clone(),
            FixedReplyProvider::new("reply"),
        );
        let token = TokenAddress::new("t1");
        let alice = UserAddress::new("alice");
        let bob = UserAddress::new("bob");

        service.chat(&token, &alice, "from alice").await.unwrap();

        let bobs = service.history(&token, &bob).await.unwrap();
        assert!(bobs.is_empty());

        let alices = service.history(&token, &alice).await.unwrap();
        assert_eq!(alices.len(), 2);
    }
}
