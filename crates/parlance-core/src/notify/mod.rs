//! Outbound notification collaborator trait.
//!
//! Delivery is best-effort: callers log failures and swallow them, so a
//! broken notifier never changes the response sent to the original caller.

use parlance_types::error::NotifyError;

/// Trait for best-effort message delivery to a user identifier.
///
/// Uses native async fn in traits (RPITIT, Rust 2024 edition).
/// Implementations live in parlance-infra (e.g., `TelegramNotifier`).
pub trait Notifier: Send + Sync {
    /// Deliver `text` to the user identified by `chat_id`.
    fn notify(
        &self,
        chat_id: i64,
        text: &str,
    ) -> impl std::future::Future<Output = Result<(), NotifyError>> + Send;
}
