//! Database access for `users` rows.
//!
//! Raw sqlx queries instrumented with `db.query` spans. The unique
//! constraint on `email` is the real duplicate guard; the service's
//! pre-check is a best-effort optimization only.

use anyhow::{Context, Result};
use chrono::{DateTime, Utc};
use sqlx::PgPool;
use tracing::{info_span, Instrument, Span};
use uuid::Uuid;

use super::models::{LocationUpdate, NewUser, ProfileUpdate, User};

/// Outcome of an insert attempt; `Conflict` maps the unique-email
/// violation without bubbling a database error to the service layer.
#[derive(Debug)]
pub enum InsertOutcome {
    Created(Box<User>),
    Conflict,
}

fn query_span(operation: &str, statement: &str) -> Span {
    info_span!(
        "db.query",
        db.system = "postgresql",
        db.operation = operation,
        db.statement = statement
    )
}

pub(crate) fn is_unique_violation(err: &sqlx::Error) -> bool {
    match err {
        sqlx::Error::Database(db_err) => db_err.code().is_some_and(|code| code.as_ref() == "23505"),
        _ => false,
    }
}

pub struct UserRepo;

impl UserRepo {
    /// Insert a pending user with its first verification code.
    ///
    /// # Errors
    /// Returns an error on any database failure other than the email
    /// unique violation, which is reported as `InsertOutcome::Conflict`.
    pub async fn create(
        pool: &PgPool,
        new_user: &NewUser,
        password_hash: &str,
        code: &str,
        code_expires_at: DateTime<Utc>,
    ) -> Result<InsertOutcome> {
        let query = r"
            INSERT INTO users
                (name, email, password_hash, phone, verification_code, verification_code_expires_at)
            VALUES ($1, $2, $3, $4, $5, $6)
            RETURNING *
        ";
        let result = sqlx::query_as::<_, User>(query)
            .bind(&new_user.name)
            .bind(&new_user.email)
            .bind(password_hash)
            .bind(&new_user.phone)
            .bind(code)
            .bind(code_expires_at)
            .fetch_one(pool)
            .instrument(query_span("INSERT", query))
            .await;

        match result {
            Ok(user) => Ok(InsertOutcome::Created(Box::new(user))),
            Err(err) if is_unique_violation(&err) => Ok(InsertOutcome::Conflict),
            Err(err) => Err(err).context("failed to insert user"),
        }
    }

    /// # Errors
    /// Returns an error if the database query fails.
    pub async fn find_by_email(pool: &PgPool, email: &str) -> Result<Option<User>> {
        let query = "SELECT * FROM users WHERE email = $1";
        sqlx::query_as::<_, User>(query)
            .bind(email)
            .fetch_optional(pool)
            .instrument(query_span("SELECT", query))
            .await
            .context("failed to fetch user by email")
    }

    /// # Errors
    /// Returns an error if the database query fails.
    pub async fn find_by_id(pool: &PgPool, id: Uuid) -> Result<Option<User>> {
        let query = "SELECT * FROM users WHERE id = $1";
        sqlx::query_as::<_, User>(query)
            .bind(id)
            .fetch_optional(pool)
            .instrument(query_span("SELECT", query))
            .await
            .context("failed to fetch user by id")
    }

    /// Flip a user to verified and clear the code and expiry together,
    /// keeping the verified-implies-no-code invariant in one statement.
    ///
    /// # Errors
    /// Returns an error if the database update fails.
    pub async fn mark_verified(pool: &PgPool, id: Uuid) -> Result<Option<User>> {
        let query = r"
            UPDATE users
            SET email_verified = TRUE,
                verification_code = NULL,
                verification_code_expires_at = NULL,
                updated_at = NOW()
            WHERE id = $1
            RETURNING *
        ";
        sqlx::query_as::<_, User>(query)
            .bind(id)
            .fetch_optional(pool)
            .instrument(query_span("UPDATE", query))
            .await
            .context("failed to mark user verified")
    }

    /// Overwrite the verification code and expiry for a resend.
    ///
    /// # Errors
    /// Returns an error if the database update fails.
    pub async fn refresh_code(
        pool: &PgPool,
        id: Uuid,
        code: &str,
        code_expires_at: DateTime<Utc>,
    ) -> Result<()> {
        let query = r"
            UPDATE users
            SET verification_code = $2,
                verification_code_expires_at = $3,
                updated_at = NOW()
            WHERE id = $1
        ";
        sqlx::query(query)
            .bind(id)
            .bind(code)
            .bind(code_expires_at)
            .execute(pool)
            .instrument(query_span("UPDATE", query))
            .await
            .context("failed to refresh verification code")?;
        Ok(())
    }

    /// Allow-listed profile update; columns outside the list are never
    /// touched regardless of what the caller deserialized.
    ///
    /// # Errors
    /// Returns an error if the database update fails.
    pub async fn update_profile(
        pool: &PgPool,
        id: Uuid,
        update: &ProfileUpdate,
    ) -> Result<Option<User>> {
        let query = r"
            UPDATE users
            SET business_id = $2,
                postal_code = $3,
                state = $4,
                city = $5,
                neighborhood = $6,
                street_address = $7,
                street_number = $8,
                complement = $9,
                latitude = $10,
                longitude = $11,
                updated_at = NOW()
            WHERE id = $1
            RETURNING *
        ";
        sqlx::query_as::<_, User>(query)
            .bind(id)
            .bind(&update.business_id)
            .bind(&update.postal_code)
            .bind(&update.state)
            .bind(&update.city)
            .bind(&update.neighborhood)
            .bind(&update.street_address)
            .bind(&update.street_number)
            .bind(&update.complement)
            .bind(&update.latitude)
            .bind(&update.longitude)
            .fetch_optional(pool)
            .instrument(query_span("UPDATE", query))
            .await
            .context("failed to update profile")
    }

    /// Allow-listed location update.
    ///
    /// # Errors
    /// Returns an error if the database update fails.
    pub async fn update_location(
        pool: &PgPool,
        id: Uuid,
        update: &LocationUpdate,
    ) -> Result<Option<User>> {
        let query = r"
            UPDATE users
            SET postal_code = $2,
                state = $3,
                city = $4,
                neighborhood = $5,
                street_address = $6,
                latitude = $7,
                longitude = $8,
                updated_at = NOW()
            WHERE id = $1
            RETURNING *
        ";
        sqlx::query_as::<_, User>(query)
            .bind(id)
            .bind(&update.postal_code)
            .bind(&update.state)
            .bind(&update.city)
            .bind(&update.neighborhood)
            .bind(&update.street_address)
            .bind(&update.latitude)
            .bind(&update.longitude)
            .fetch_optional(pool)
            .instrument(query_span("UPDATE", query))
            .await
            .context("failed to update location")
    }
}
