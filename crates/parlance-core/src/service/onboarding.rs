//! Community onboarding flow.
//!
//! Members are registered when they join the chat group and marked
//! verified when the KYC form posts back. Verification triggers a
//! best-effort notification to the member; delivery failures are logged
//! and swallowed so they never change the caller's response.

use parlance_types::error::RepositoryError;
use tracing::{info, warn};

use crate::notify::Notifier;
use crate::repository::member::MemberRepository;

/// Text delivered to a member when verification completes.
const VERIFIED_NOTICE: &str = "🔔 Your telegram account has passed KYC";

/// Service for member registration and verification.
pub struct OnboardingService<R: MemberRepository, N: Notifier> {
    members: R,
    notifier: N,
}

impl<R: MemberRepository, N: Notifier> OnboardingService<R, N> {
    /// Create a new onboarding service.
    pub fn new(members: R, notifier: N) -> Self {
        Self { members, notifier }
    }

    /// Record a member joining the group. Idempotent.
    pub async fn register(&self, tg_id: i64, tg_handle: &str) -> Result<(), RepositoryError> {
        self.members.insert_member(tg_id, tg_handle).await?;
        info!(tg_id, handle = %tg_handle, "member registered");
        Ok(())
    }

    /// Mark the member with `tg_handle` as verified and notify them.
    ///
    /// The wallet address is stored in canonical lowercase. An unknown
    /// handle is not an error: verification is recorded as a no-op and
    /// no notification is sent.
    pub async fn verify(
        &self,
        tg_handle: &str,
        wallet_address: &str,
        dob: &str,
    ) -> Result<(), RepositoryError> {
        let tg_id = self
            .members
            .verify_member(tg_handle, &wallet_address.to_ascii_lowercase(), dob)
            .await?;

        match tg_id {
            Some(tg_id) => {
                if let Err(err) = self.notifier.notify(tg_id, VERIFIED_NOTICE).await {
                    warn!(tg_id, handle = %tg_handle, error = %err, "verification notice not delivered");
                } else {
                    info!(tg_id, handle = %tg_handle, "member verified and notified");
                }
            }
            None => {
                warn!(handle = %tg_handle, "verification for unknown member handle");
            }
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::repository::member::MemberRepository;
    use crate::testing::{InMemoryRepos, RecordingNotifier};

    #[tokio::test]
    async fn test_verify_notifies_registered_member() {
        let repos = InMemoryRepos::new();
        let notifier = RecordingNotifier::new();
        let service = OnboardingService::new(repos.clone(), notifier.clone());

        service.register(42, "alice").await.unwrap();
        service
            .verify("alice", "0xABCDEF", "1990/01/01")
            .await
            .unwrap();

        let delivered = notifier.delivered.lock().unwrap();
        assert_eq!(delivered.len(), 1);
        assert_eq!(delivered[0].0, 42);

        let member = repos.get_member(42).await.unwrap().unwrap();
        assert_eq!(member.wallet_address.as_deref(), Some("0xabcdef"));
        assert!(member.verified_at.is_some());
    }

    #[tokio::test]
    async fn test_delivery_failure_is_swallowed() {
        let repos = InMemoryRepos::new();
        let service = OnboardingService::new(repos.clone(), RecordingNotifier::failing());

        service.register(7, "bob").await.unwrap();
        // Verification succeeds even though the notice can't be delivered.
        service.verify("bob", "0x1", "2000/02/02").await.unwrap();

        let member = repos.get_member(7).await.unwrap().unwrap();
        assert!(member.verified_at.is_some());
    }

    #[tokio::test]
    async fn test_unknown_handle_is_a_quiet_no_op() {
        let repos = InMemoryRepos::new();
        let notifier = RecordingNotifier::new();
        let service = OnboardingService::new(repos, notifier.clone());

        service.verify("ghost", "0x1", "2000/02/02").await.unwrap();

        assert!(notifier.delivered.lock().unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_register_is_idempotent() {
        let repos = InMemoryRepos::new();
        let service = OnboardingService::new(repos.clone(), RecordingNotifier::new());

        service.register(9, "carol").await.unwrap();
        service.register(9, "carol-renamed").await.unwrap();

        let member = repos.get_member(9).await.unwrap().unwrap();
        assert_eq!(member.tg_handle, "carol");
    }
}
