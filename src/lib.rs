//! # Cadastro (User Registration & Authentication)
//!
//! `cadastro` is a small multi-tenant user-registration and authentication
//! service: account creation with mailed verification codes,
//! credential-based login issuing short-lived bearer tokens, and profile
//! and location updates gated on a verified email address.
//!
//! ## Account lifecycle
//!
//! - **Registration** creates a user in pending state and mails a
//!   6-character verification code valid for one hour.
//! - **Verification** consumes the code, unlocking profile mutations.
//! - **Login** checks credentials and issues an HS256 bearer token; tokens
//!   are short-lived by design and `GET /auth/me` re-issues them.
//!
//! Email uniqueness is enforced by the database; concurrent registrations
//! for the same address resolve at the unique constraint, not in
//! application code.
//!
//! ## Client core
//!
//! The [`client`] module carries the frontend's non-visual core: a typed
//! API client, the auth session state container with derived flags, and
//! the route-guard policy evaluated on navigation.

pub mod api;
pub mod cli;
pub mod client;
pub mod token;
pub mod users;

#[allow(clippy::doc_markdown, clippy::needless_raw_string_hashes)]
pub mod built_info {
    include!(concat!(env!("OUT_DIR"), "/built.rs"));
}

pub const GIT_COMMIT_HASH: &str = match built_info::GIT_COMMIT_HASH {
    Some(hash) => hash,
    None => "unknown",
};

pub const APP_USER_AGENT: &str = concat!(env!("CARGO_PKG_NAME"), "/", env!("CARGO_PKG_VERSION"),);
