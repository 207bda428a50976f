//! In-memory fakes for service tests.
//!
//! Single shared store implementing every repository trait, so a test can
//! hand the same storage to several services and inspect it afterwards.
//! Cloning shares the underlying store.

use std::collections::HashMap;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex};

use chrono::Utc;

use parlance_types::agent::{Agent, Instruction, TokenAddress, UserAddress};
use parlance_types::error::{NotifyError, RepositoryError};
use parlance_types::llm::{ContextMessage, LlmError};
use parlance_types::member::Member;
use parlance_types::message::{Message, MessageRole};

use crate::llm::LlmProvider;
use crate::notify::Notifier;
use crate::repository::agent::AgentRepository;
use crate::repository::instruction::InstructionRepository;
use crate::repository::member::MemberRepository;
use crate::repository::message::MessageRepository;

#[derive(Default)]
struct Inner {
    agents: Mutex<HashMap<String, Agent>>,
    instructions: Mutex<Vec<Instruction>>,
    next_instruction_id: Mutex<i64>,
    messages: Mutex<Vec<Message>>,
    next_message_id: Mutex<i64>,
    members: Mutex<HashMap<i64, Member>>,
}

/// Shared in-memory implementation of all repository traits.
#[derive(Clone, Default)]
pub struct InMemoryRepos {
    inner: Arc<Inner>,
}

impl InMemoryRepos {
    pub fn new() -> Self {
        Self::default()
    }
}

impl AgentRepository for InMemoryRepos {
    async fn ensure_agent(
        &self,
        token_address: &TokenAddress,
        owner_address: &str,
    ) -> Result<(), RepositoryError> {
        let mut agents = self.inner.agents.lock().unwrap();
        agents
            .entry(token_address.as_str().to_string())
            .or_insert_with(|| Agent {
                token_address: token_address.clone(),
                owner_address: owner_address.to_ascii_lowercase(),
                created_at: Utc::now(),
            });
        Ok(())
    }

    async fn get_agent(
        &self,
        token_address: &TokenAddress,
    ) -> Result<Option<Agent>, RepositoryError> {
        let agents = self.inner.agents.lock().unwrap();
        Ok(agents.get(token_address.as_str()).cloned())
    }
}

impl InstructionRepository for InMemoryRepos {
    async fn insert(
        &self,
        token_address: &TokenAddress,
        content: &str,
    ) -> Result<i64, RepositoryError> {
        let mut next_id = self.inner.next_instruction_id.lock().unwrap();
        *next_id += 1;
        let id = *next_id;

        self.inner.instructions.lock().unwrap().push(Instruction {
            id,
            token_address: token_address.clone(),
            content: content.to_string(),
            created_at: Utc::now(),
        });
        Ok(id)
    }

    async fn list(
        &self,
        token_address: &TokenAddress,
    ) -> Result<Vec<Instruction>, RepositoryError> {
        let instructions = self.inner.instructions.lock().unwrap();
        Ok(instructions
            .iter()
            .filter(|i| i.token_address == *token_address)
            .cloned()
            .collect())
    }

    async fn update_content(&self, id: i64, content: &str) -> Result<(), RepositoryError> {
        let mut instructions = self.inner.instructions.lock().unwrap();
        match instructions.iter_mut().find(|i| i.id == id) {
            Some(instruction) => {
                instruction.content = content.to_string();
                Ok(())
            }
            None => Err(RepositoryError::NotFound),
        }
    }

    async fn delete(&self, id: i64) -> Result<(), RepositoryError> {
        let mut instructions = self.inner.instructions.lock().unwrap();
        let before = instructions.len();
        instructions.retain(|i| i.id != id);
        if instructions.len() == before {
            return Err(RepositoryError::NotFound);
        }
        Ok(())
    }
}

impl MessageRepository for InMemoryRepos {
    async fn append_turn(
        &self,
        token_address: &TokenAddress,
        user_address: &UserAddress,
        user_message: &str,
        assistant_message: &str,
    ) -> Result<(), RepositoryError> {
        let mut next_id = self.inner.next_message_id.lock().unwrap();
        let mut messages = self.inner.messages.lock().unwrap();
        for (role, content) in [
            (MessageRole::User, user_message),
            (MessageRole::Assistant, assistant_message),
        ] {
            *next_id += 1;
            messages.push(Message {
                id: *next_id,
                token_address: token_address.clone(),
                user_address: user_address.clone(),
                role,
                content: content.to_string(),
                created_at: Utc::now(),
            });
        }
        Ok(())
    }

    async fn list(
        &self,
        token_address: &TokenAddress,
        user_address: &UserAddress,
    ) -> Result<Vec<Message>, RepositoryError> {
        let messages = self.inner.messages.lock().unwrap();
        Ok(messages
            .iter()
            .filter(|m| m.token_address == *token_address && m.user_address == *user_address)
            .cloned()
            .collect())
    }
}

impl MemberRepository for InMemoryRepos {
    async fn insert_member(&self, tg_id: i64, tg_handle: &str) -> Result<(), RepositoryError> {
        let mut members = self.inner.members.lock().unwrap();
        members.entry(tg_id).or_insert_with(|| Member {
            tg_id,
            tg_handle: tg_handle.to_string(),
            wallet_address: None,
            dob: None,
            created_at: Utc::now(),
            verified_at: None,
        });
        Ok(())
    }

    async fn verify_member(
        &self,
        tg_handle: &str,
        wallet_address: &str,
        dob: &str,
    ) -> Result<Option<i64>, RepositoryError> {
        let mut members = self.inner.members.lock().unwrap();
        for member in members.values_mut() {
            if member.tg_handle == tg_handle {
                member.wallet_address = Some(wallet_address.to_string());
                member.dob = Some(dob.to_string());
                member.verified_at = Some(Utc::now());
                return Ok(Some(member.tg_id));
            }
        }
        Ok(None)
    }

    async fn get_member(&self, tg_id: i64) -> Result<Option<Member>, RepositoryError> {
        let members = self.inner.members.lock().unwrap();
        Ok(members.get(&tg_id).cloned())
    }
}

/// Provider returning a fixed reply, recording every context it receives.
#[derive(Clone)]
pub struct FixedReplyProvider {
    reply: String,
    pub contexts: Arc<Mutex<Vec<Vec<ContextMessage>>>>,
}

impl FixedReplyProvider {
    pub fn new(reply: &str) -> Self {
        Self {
            reply: reply.to_string(),
            contexts: Arc::new(Mutex::new(Vec::new())),
        }
    }
}

impl LlmProvider for FixedReplyProvider {
    fn name(&self) -> &str {
        "fixed"
    }

    async fn complete(&self, context: &[ContextMessage]) -> Result<String, LlmError> {
        self.contexts.lock().unwrap().push(context.to_vec());
        Ok(self.reply.clone())
    }
}

/// Provider that always fails, for invocation-error paths.
pub struct FailingProvider;

impl LlmProvider for FailingProvider {
    fn name(&self) -> &str {
        "failing"
    }

    async fn complete(&self, _context: &[ContextMessage]) -> Result<String, LlmError> {
        Err(LlmError::Provider {
            message: "model unavailable".to_string(),
        })
    }
}

/// Notifier recording deliveries, optionally failing every call.
#[derive(Clone, Default)]
pub struct RecordingNotifier {
    pub delivered: Arc<Mutex<Vec<(i64, String)>>>,
    fail: Arc<AtomicBool>,
}

impl RecordingNotifier {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn failing() -> Self {
        let notifier = Self::default();
        notifier.fail.store(true, Ordering::SeqCst);
        notifier
    }
}

impl Notifier for RecordingNotifier {
    async fn notify(&self, chat_id: i64, text: &str) -> Result<(), NotifyError> {
        if self.fail.load(Ordering::SeqCst) {
            return Err(NotifyError::Delivery("simulated outage".to_string()));
        }
        self.delivered
            .lock()
            .unwrap()
            .push((chat_id, text.to_string()));
        Ok(())
    }
}
