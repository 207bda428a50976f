//! Message repository trait definition.
//!
//! The message log is append-only and keyed by (token, user); that keying
//! is the sole isolation mechanism between conversation threads.

use parlance_types::agent::{TokenAddress, UserAddress};
use parlance_types::error::RepositoryError;
use parlance_types::message::Message;

/// Repository trait for conversation message persistence.
pub trait MessageRepository: Send + Sync {
    /// Persist one turn: the user message immediately followed by the
    /// assistant message, as a single atomic unit.
    ///
    /// A partial write (only one of the two visible to a concurrent
    /// reader) is a correctness violation; implementations must execute
    /// both inserts inside one transaction.
    fn append_turn(
        &self,
        token_address: &TokenAddress,
        user_address: &UserAddress,
        user_message: &str,
        assistant_message: &str,
    ) -> impl std::future::Future<Output = Result<(), RepositoryError>> + Send;

    /// List the thread for (token, user) in ascending creation order.
    ///
    /// An unknown pair yields an empty list, not an error.
    fn list(
        &self,
        token_address: &TokenAddress,
        user_address: &UserAddress,
    ) -> impl std::future::Future<Output = Result<Vec<Message>, RepositoryError>> + Send;
}
