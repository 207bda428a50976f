//! Shared-secret gate wrapping every v2 operation.
//!
//! The configured secret is SHA-256 hashed once at construction; each
//! presented credential is hashed and the fixed-width digests compared,
//! so the comparison cost never depends on where the values diverge.

use sha2::{Digest, Sha256};

use parlance_types::error::AccessError;

/// Validates the `x-app-key` header value against the configured secret.
///
/// v1 operations bypass this gate entirely (preserved legacy behavior);
/// everything on the v2 surface authorizes through it before any store
/// access.
pub struct AccessGate {
    secret_digest: [u8; 32],
}

impl AccessGate {
    /// Create a gate for the given shared secret.
    pub fn new(secret: &str) -> Self {
        Self {
            secret_digest: Sha256::digest(secret.as_bytes()).into(),
        }
    }

    /// Check a presented credential.
    ///
    /// - absent or empty header -> `MissingCredential`
    /// - present but not equal to the configured secret -> `InvalidCredential`
    pub fn authorize(&self, credential: Option<&str>) -> Result<(), AccessError> {
        let credential = match credential {
            Some(value) if !value.is_empty() => value,
            _ => return Err(AccessError::MissingCredential),
        };

        let presented: [u8; 32] = Sha256::digest(credential.as_bytes()).into();

        // Accumulate the comparison over every byte instead of returning at
        // the first mismatch.
        let mut diff = 0u8;
        for (a, b) in presented.iter().zip(self.secret_digest.iter()) {
            diff |= a ^ b;
        }

        if diff == 0 {
            Ok(())
        } else {
            Err(AccessError::InvalidCredential)
        }
    }
}
