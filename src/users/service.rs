//! User lifecycle orchestration.
//!
//! Owns the Pending -> Verified -> Profiled state machine described in the
//! crate docs. Each operation checks its precondition, mutates through
//! [`UserRepo`], and reports failures as tagged [`UserError`] kinds.

use sqlx::PgPool;
use std::sync::Arc;
use tracing::debug;
use uuid::Uuid;

use crate::api::email::EmailSender;

use super::error::UserError;
use super::models::{LocationUpdate, NewUser, ProfileUpdate, UserResponse};
use super::repo::{InsertOutcome, UserRepo};
use super::{password, verification};

pub(crate) const MSG_CODE_SENT: &str = "Verification code sent to email";
pub(crate) const MSG_EMAIL_VERIFIED: &str = "Email verified successfully";
pub(crate) const MSG_CODE_RESENT: &str = "New verification code sent to email";

#[derive(Clone)]
pub struct UserService {
    pool: PgPool,
    mailer: Arc<dyn EmailSender>,
}

impl UserService {
    #[must_use]
    pub fn new(pool: PgPool, mailer: Arc<dyn EmailSender>) -> Self {
        Self { pool, mailer }
    }

    /// Create a pending account and mail its first verification code.
    ///
    /// The existence pre-check is advisory; two racing creates resolve at
    /// the unique constraint, surfaced here as `AlreadyExists`.
    ///
    /// # Errors
    /// `AlreadyExists` for a taken email; `Internal` on store or mail failure.
    pub async fn create(&self, new_user: NewUser) -> Result<&'static str, UserError> {
        let password_hash = password::hash(&new_user.password)?;

        if UserRepo::find_by_email(&self.pool, &new_user.email)
            .await?
            .is_some()
        {
            return Err(UserError::AlreadyExists);
        }

        let issued = verification::generate()?;
        let user = match UserRepo::create(
            &self.pool,
            &new_user,
            &password_hash,
            &issued.code,
            issued.expires_at,
        )
        .await?
        {
            InsertOutcome::Created(user) => user,
            InsertOutcome::Conflict => return Err(UserError::AlreadyExists),
        };

        debug!(user_id = %user.id, "user created, sending verification code");
        self.mailer
            .send_verification_code(&user.email, &issued.code)
            .await?;

        Ok(MSG_CODE_SENT)
    }

    /// Consume a verification code, transitioning Pending -> Verified.
    ///
    /// # Errors
    /// `NotFound`, `AlreadyVerified`, or `InvalidOrExpiredCode` per
    /// precondition; `Internal` on store failure.
    pub async fn verify_email(&self, email: &str, code: &str) -> Result<UserResponse, UserError> {
        let user = UserRepo::find_by_email(&self.pool, email)
            .await?
            .ok_or(UserError::NotFound)?;

        if user.email_verified {
            return Err(UserError::AlreadyVerified);
        }

        if !verification::matches(
            user.verification_code.as_deref(),
            user.verification_code_expires_at,
            code,
        ) {
            return Err(UserError::InvalidOrExpiredCode);
        }

        let verified = UserRepo::mark_verified(&self.pool, user.id)
            .await?
            .ok_or(UserError::NotFound)?;

        Ok(verified.into())
    }

    /// Issue a fresh code for a still-pending user and mail it.
    ///
    /// # Errors
    /// `NotFound` or `AlreadyVerified` per precondition; `Internal` on
    /// store or mail failure.
    pub async fn resend_code(&self, email: &str) -> Result<&'static str, UserError> {
        let user = UserRepo::find_by_email(&self.pool, email)
            .await?
            .ok_or(UserError::NotFound)?;

        if user.email_verified {
            return Err(UserError::AlreadyVerified);
        }

        let issued = verification::generate()?;
        UserRepo::refresh_code(&self.pool, user.id, &issued.code, issued.expires_at).await?;

        self.mailer
            .send_verification_code(&user.email, &issued.code)
            .await?;

        Ok(MSG_CODE_RESENT)
    }

    /// Overwrite business and address fields for a verified user.
    ///
    /// # Errors
    /// `NotFound` or `EmailNotVerified` per precondition; `Internal` on
    /// store failure.
    pub async fn update_profile(
        &self,
        user_id: Uuid,
        update: ProfileUpdate,
    ) -> Result<UserResponse, UserError> {
        let user = UserRepo::find_by_id(&self.pool, user_id)
            .await?
            .ok_or(UserError::NotFound)?;

        if !user.email_verified {
            return Err(UserError::EmailNotVerified);
        }

        let updated = UserRepo::update_profile(&self.pool, user.id, &update)
            .await?
            .ok_or(UserError::NotFound)?;

        Ok(updated.into())
    }

    /// Overwrite address and geo fields for a verified user.
    ///
    /// # Errors
    /// `NotFound` or `EmailNotVerified` per precondition; `Internal` on
    /// store failure.
    pub async fn update_location(
        &self,
        user_id: Uuid,
        update: LocationUpdate,
    ) -> Result<UserResponse, UserError> {
        let user = UserRepo::find_by_id(&self.pool, user_id)
            .await?
            .ok_or(UserError::NotFound)?;

        if !user.email_verified {
            return Err(UserError::EmailNotVerified);
        }

        let updated = UserRepo::update_location(&self.pool, user.id, &update)
            .await?
            .ok_or(UserError::NotFound)?;

        Ok(updated.into())
    }

    /// Look up a user by email, redacted for callers.
    ///
    /// # Errors
    /// `NotFound` if no row matches; `Internal` on store failure.
    pub async fn find_by_email(&self, email: &str) -> Result<UserResponse, UserError> {
        let user = UserRepo::find_by_email(&self.pool, email)
            .await?
            .ok_or(UserError::NotFound)?;
        Ok(user.into())
    }

    /// Check credentials for login.
    ///
    /// Unknown emails and wrong passwords both fold into
    /// `InvalidCredentials` so callers cannot probe for registered
    /// addresses.
    ///
    /// # Errors
    /// `InvalidCredentials` on any mismatch; `Internal` on store failure.
    pub async fn authenticate(
        &self,
        email: &str,
        plaintext_password: &str,
    ) -> Result<UserResponse, UserError> {
        let user = UserRepo::find_by_email(&self.pool, email)
            .await?
            .ok_or(UserError::InvalidCredentials)?;

        if !password::verify(&user.password_hash, plaintext_password) {
            return Err(UserError::InvalidCredentials);
        }

        Ok(user.into())
    }
}
