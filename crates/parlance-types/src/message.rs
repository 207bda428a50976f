//! Stored conversation messages.
//!
//! Messages are append-only: a turn inserts exactly one user message
//! immediately followed by one assistant message, and the pair becomes
//! visible atomically. Messages are never updated or deleted.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::agent::{TokenAddress, UserAddress};

// Re-export MessageRole from the llm module (it's used in both stored and
// context shapes).
pub use crate::llm::MessageRole;

/// A single persisted message within one (agent, user) conversation thread.
///
/// Ordered by `id` within a thread; ids are monotonic and store-assigned.
/// The role is persisted as a smallint (0 = user, 1 = assistant) but that
/// mapping lives at the persistence edge only -- domain code sees the enum.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Message {
    pub id: i64,
    pub token_address: TokenAddress,
    pub user_address: UserAddress,
    pub role: MessageRole,
    pub content: String,
    pub created_at: DateTime<Utc>,
}
