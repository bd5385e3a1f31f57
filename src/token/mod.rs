//! Bearer token issue/verify.
//!
//! HS256-signed claims carrying the subject id and email. Tokens are
//! deliberately short-lived (60 seconds by default); callers needing a
//! longer session re-issue through `GET /auth/me`.

use anyhow::{Context, Result};
use jsonwebtoken::{decode, encode, DecodingKey, EncodingKey, Header, Validation};
use secrecy::{ExposeSecret, SecretString};
use serde::{Deserialize, Serialize};
use thiserror::Error;
use uuid::Uuid;

/// Identity claims embedded in every bearer token.
#[derive(Debug, Serialize, Deserialize)]
pub struct Claims {
    /// Subject: the user id.
    pub sub: String,
    pub email: String,
    /// Issued at (Unix timestamp).
    pub iat: i64,
    /// Expiration (Unix timestamp).
    pub exp: i64,
}

/// Any verification failure collapses into this single kind so callers
/// cannot distinguish forged from expired tokens.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum TokenError {
    #[error("Invalid token")]
    InvalidToken,
}

pub struct TokenIssuer {
    encoding_key: EncodingKey,
    decoding_key: DecodingKey,
    ttl_seconds: i64,
}

impl TokenIssuer {
    #[must_use]
    pub fn new(secret: &SecretString, ttl_seconds: i64) -> Self {
        let secret_bytes = secret.expose_secret().as_bytes();
        Self {
            encoding_key: EncodingKey::from_secret(secret_bytes),
            decoding_key: DecodingKey::from_secret(secret_bytes),
            ttl_seconds,
        }
    }

    /// Sign a token for the given identity with the configured TTL.
    ///
    /// # Errors
    /// Returns an error if signing fails.
    pub fn issue(&self, user_id: Uuid, email: &str) -> Result<String> {
        self.issue_with_ttl(user_id, email, self.ttl_seconds)
    }

    fn issue_with_ttl(&self, user_id: Uuid, email: &str, ttl_seconds: i64) -> Result<String> {
        let now = chrono::Utc::now().timestamp();
        let claims = Claims {
            sub: user_id.to_string(),
            email: email.to_string(),
            iat: now,
            exp: now + ttl_seconds,
        };
        encode(&Header::default(), &claims, &self.encoding_key).context("failed to sign token")
    }

    /// Verify a token's signature and expiry, returning its claims.
    ///
    /// # Errors
    /// Returns `TokenError::InvalidToken` on signature mismatch, malformed
    /// input, or expiry.
    pub fn verify(&self, token: &str) -> Result<Claims, TokenError> {
        let mut validation = Validation::default();
        // Tokens live for seconds, so the default leeway would double their
        // effective lifetime.
        validation.leeway = 0;
        decode::<Claims>(token, &self.decoding_key, &validation)
            .map(|data| data.claims)
            .map_err(|_| TokenError::InvalidToken)
    }
}
