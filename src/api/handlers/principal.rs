//! Authenticated principal extraction.
//!
//! The gate for protected routes: pull the bearer token from the
//! `Authorization` header, verify it, and hand back the identity claims
//! as a [`Principal`]. Failures reject with 401 before any handler logic
//! runs.

use axum::http::{header::AUTHORIZATION, HeaderMap, StatusCode};
use uuid::Uuid;

use crate::token::TokenIssuer;

/// Authenticated user context derived from a bearer token.
#[derive(Clone, Debug)]
pub struct Principal {
    pub user_id: Uuid,
    pub email: String,
}

/// Resolve the `Authorization` header into a principal, or 401.
///
/// # Errors
/// Returns `StatusCode::UNAUTHORIZED` when the header is missing, the
/// token fails verification, or the subject is not a valid id.
pub fn require_auth(headers: &HeaderMap, issuer: &TokenIssuer) -> Result<Principal, StatusCode> {
    let token = extract_bearer_token(headers).ok_or(StatusCode::UNAUTHORIZED)?;
    let claims = issuer
        .verify(&token)
        .map_err(|_| StatusCode::UNAUTHORIZED)?;
    let user_id = Uuid::parse_str(&claims.sub).map_err(|_| StatusCode::UNAUTHORIZED)?;
    Ok(Principal {
        user_id,
        email: claims.email,
    })
}

fn extract_bearer_token(headers: &HeaderMap) -> Option<String> {
    let value = headers.get(AUTHORIZATION)?.to_str().ok()?;
    let trimmed = value.trim();
    let token = trimmed
        .strip_prefix("Bearer ")
        .or_else(|| trimmed.strip_prefix("bearer "))?
        .trim();
    if token.is_empty() {
        None
    } else {
        Some(token.to_string())
    }
}
