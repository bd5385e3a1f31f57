//! One-way password hashing.
//!
//! bcrypt with the library default cost keeps interactive login latency
//! acceptable while salting every hash.

use anyhow::{Context, Result};

/// Hash a plaintext password. Output embeds the salt and cost factor.
pub fn hash(plaintext: &str) -> Result<String> {
    bcrypt::hash(plaintext, bcrypt::DEFAULT_COST).context("failed to hash password")
}

/// Verify a plaintext password against a stored hash.
///
/// Malformed stored hashes verify as `false` instead of erroring, so a
/// corrupt row behaves like a wrong password.
#[must_use]
pub fn verify(stored_hash: &str, plaintext: &str) -> bool {
    bcrypt::verify(plaintext, stored_hash).unwrap_or(false)
}

#[cfg(test)]
mod tests {
    use super::{hash, verify};
    use anyhow::Result;

    #[test]
    fn hash_then_verify_round_trip() -> Result<()> {
        let hashed = hash("correct horse battery staple")?;
        assert!(verify(&hashed, "correct horse battery staple"));
        assert!(!verify(&hashed, "wrong password"));
        Ok(())
    }

    #[test]
    fn hashes_are_salted() -> Result<()> {
        let first = hash("same input")?;
        let second = hash("same input")?;
        assert_ne!(first, second);
        Ok(())
    }

    #[test]
    fn malformed_hash_verifies_false() {
        assert!(!verify("not-a-bcrypt-hash", "anything"));
        assert!(!verify("", "anything"));
    }
}
