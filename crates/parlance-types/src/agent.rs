use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use std::fmt;

/// Canonical key for an agent: a token address normalized to ASCII lowercase.
///
/// Callers may pass addresses in any casing ("0xAbC..." and "0xabc..." name
/// the same agent); construction canonicalizes so that every store lookup
/// and write operates on the same key.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub struct TokenAddress(String);

impl TokenAddress {
    /// Create a canonical token address from any casing.
    pub fn new(raw: &str) -> Self {
        Self(raw.to_ascii_lowercase())
    }

    /// The canonical (lowercase) form.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl From<String> for TokenAddress {
    fn from(raw: String) -> Self {
        Self::new(&raw)
    }
}

impl From<TokenAddress> for String {
    fn from(addr: TokenAddress) -> Self {
        addr.0
    }
}

impl fmt::Display for TokenAddress {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Canonical key for an end user of an agent, normalized like [`TokenAddress`].
///
/// Together with a token address this keys one conversation thread; distinct
/// pairs never share history.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub struct UserAddress(String);

impl UserAddress {
    /// Create a canonical user address from any casing.
    pub fn new(raw: &str) -> Self {
        Self(raw.to_ascii_lowercase())
    }

    /// The canonical (lowercase) form.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl From<String> for UserAddress {
    fn from(raw: String) -> Self {
        Self::new(&raw)
    }
}

impl From<UserAddress> for String {
    fn from(addr: UserAddress) -> Self {
        addr.0
    }
}

impl fmt::Display for UserAddress {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A configured conversational agent.
///
/// Created lazily on the first instruction write and never deleted.
/// The owner address is fixed at creation; later writes for the same
/// token address leave it untouched.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Agent {
    pub token_address: TokenAddress,
    pub owner_address: String,
    pub created_at: DateTime<Utc>,
}

/// One operator-authored fragment of system-level guidance for an agent.
///
/// Instruction ids are monotonic and store-assigned; instructions
/// concatenate in ascending-id order to form the agent's system prompt,
/// so creation order is significant.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Instruction {
    pub id: i64,
    pub token_address: TokenAddress,
    pub content: String,
    pub created_at: DateTime<Utc>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_token_address_canonicalizes() {
        let addr = TokenAddress::new("0xAbCdEf");
        assert_eq!(addr.as_str(), "0xabcdef");
    }

    #[test]
    fn test_token_address_case_insensitive_equality() {
        assert_eq!(TokenAddress::new("ABC"), TokenAddress::new("abc"));
    }

    #[test]
    fn test_user_address_canonicalizes() {
        let addr = UserAddress::new("User-One");
        assert_eq!(addr.as_str(), "user-one");
    }

    #[test]
    fn test_token_address_serde_canonicalizes_on_deserialize() {
        let addr: TokenAddress = serde_json::from_str("\"0xABC\"").unwrap();
        assert_eq!(addr.as_str(), "0xabc");
    }

    #[test]
    fn test_token_address_serde_roundtrip() {
        let addr = TokenAddress::new("0xabc");
        let json = serde_json::to_string(&addr).unwrap();
        assert_eq!(json, "\"0xabc\"");
    }
}
