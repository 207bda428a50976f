//! Member repository trait definition (onboarding flow).

use parlance_types::error::RepositoryError;
use parlance_types::member::Member;

/// Repository trait for community member persistence.
pub trait MemberRepository: Send + Sync {
    /// Record a member joining. Idempotent: a repeat insert for the same
    /// Telegram id no-ops.
    fn insert_member(
        &self,
        tg_id: i64,
        tg_handle: &str,
    ) -> impl std::future::Future<Output = Result<(), RepositoryError>> + Send;

    /// Mark the member with the given handle as verified, storing the
    /// wallet address (canonical lowercase) and date of birth.
    ///
    /// Returns the member's Telegram id for notification delivery, or
    /// `None` when no member with that handle exists.
    fn verify_member(
        &self,
        tg_handle: &str,
        wallet_address: &str,
        dob: &str,
    ) -> impl std::future::Future<Output = Result<Option<i64>, RepositoryError>> + Send;

    /// Fetch a member by Telegram id.
    fn get_member(
        &self,
        tg_id: i64,
    ) -> impl std::future::Future<Output = Result<Option<Member>, RepositoryError>> + Send;
}
