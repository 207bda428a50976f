//! Community member records for the onboarding flow.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A chat-community member going through onboarding.
///
/// Inserted with just the Telegram id and handle when the user joins;
/// the wallet address and date of birth are filled in when verification
/// completes.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Member {
    /// Telegram user id, used as the delivery target for notifications.
    pub tg_id: i64,
    /// Telegram handle the verification request refers to.
    pub tg_handle: String,
    /// Wallet address supplied at verification, canonical lowercase.
    pub wallet_address: Option<String>,
    pub dob: Option<String>,
    pub created_at: DateTime<Utc>,
    pub verified_at: Option<DateTime<Utc>>,
}
