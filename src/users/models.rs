//! User row model and the redacted response shape returned to callers.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::{postgres::PgRow, FromRow, Row};
use utoipa::ToSchema;
use uuid::Uuid;

/// One `users` row. Crate-internal: carries the password hash and the
/// active verification code, so it must never be serialized to callers.
/// Convert to [`UserResponse`] before leaving the service boundary.
#[derive(Debug, Clone)]
pub struct User {
    pub id: Uuid,
    pub name: String,
    pub email: String,
    pub password_hash: String,
    pub phone: String,
    pub business_id: Option<String>,
    pub postal_code: Option<String>,
    pub state: Option<String>,
    pub city: Option<String>,
    pub neighborhood: Option<String>,
    pub street_address: Option<String>,
    pub street_number: Option<String>,
    pub complement: Option<String>,
    pub latitude: Option<String>,
    pub longitude: Option<String>,
    pub email_verified: bool,
    pub verification_code: Option<String>,
    pub verification_code_expires_at: Option<DateTime<Utc>>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl<'r> FromRow<'r, PgRow> for User {
    fn from_row(row: &'r PgRow) -> Result<Self, sqlx::Error> {
        Ok(Self {
            id: row.try_get("id")?,
            name: row.try_get("name")?,
            email: row.try_get("email")?,
            password_hash: row.try_get("password_hash")?,
            phone: row.try_get("phone")?,
            business_id: row.try_get("business_id")?,
            postal_code: row.try_get("postal_code")?,
            state: row.try_get("state")?,
            city: row.try_get("city")?,
            neighborhood: row.try_get("neighborhood")?,
            street_address: row.try_get("street_address")?,
            street_number: row.try_get("street_number")?,
            complement: row.try_get("complement")?,
            latitude: row.try_get("latitude")?,
            longitude: row.try_get("longitude")?,
            email_verified: row.try_get("email_verified")?,
            verification_code: row.try_get("verification_code")?,
            verification_code_expires_at: row.try_get("verification_code_expires_at")?,
            created_at: row.try_get("created_at")?,
            updated_at: row.try_get("updated_at")?,
        })
    }
}

/// User shape returned to callers. Structurally excludes the password hash
/// and verification code, so redaction cannot be forgotten at a call site.
#[derive(ToSchema, Serialize, Deserialize, Debug, Clone)]
pub struct UserResponse {
    pub id: Uuid,
    pub name: String,
    pub email: String,
    pub phone: String,
    pub business_id: Option<String>,
    pub postal_code: Option<String>,
    pub state: Option<String>,
    pub city: Option<String>,
    pub neighborhood: Option<String>,
    pub street_address: Option<String>,
    pub street_number: Option<String>,
    pub complement: Option<String>,
    pub latitude: Option<String>,
    pub longitude: Option<String>,
    pub email_verified: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<User> for UserResponse {
    fn from(user: User) -> Self {
        Self {
            id: user.id,
            name: user.name,
            email: user.email,
            phone: user.phone,
            business_id: user.business_id,
            postal_code: user.postal_code,
            state: user.state,
            city: user.city,
            neighborhood: user.neighborhood,
            street_address: user.street_address,
            street_number: user.street_number,
            complement: user.complement,
            latitude: user.latitude,
            longitude: user.longitude,
            email_verified: user.email_verified,
            created_at: user.created_at,
            updated_at: user.updated_at,
        }
    }
}

/// Input for account creation. Email is expected to be normalized and the
/// password still plaintext; hashing happens inside the service.
#[derive(Debug, Clone)]
pub struct NewUser {
    pub name: String,
    pub email: String,
    pub password: String,
    pub phone: String,
}

/// Allow-listed profile fields. Only these columns are written by
/// `UpdateProfile`; anything else in a request payload is rejected at
/// deserialization.
#[derive(Debug, Clone)]
pub struct ProfileUpdate {
    pub business_id: String,
    pub postal_code: String,
    pub state: String,
    pub city: String,
    pub neighborhood: String,
    pub street_address: String,
    pub street_number: String,
    pub complement: Option<String>,
    pub latitude: Option<String>,
    pub longitude: Option<String>,
}

/// Allow-listed location fields for `UpdateLocation`.
#[derive(Debug, Clone)]
pub struct LocationUpdate {
    pub postal_code: String,
    pub state: String,
    pub city: String,
    pub neighborhood: String,
    pub street_address: String,
    pub latitude: Option<String>,
    pub longitude: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::{User, UserResponse};
    use anyhow::Result;
    use chrono::Utc;
    use uuid::Uuid;

    fn sample_user() -> User {
        User {
            id: Uuid::new_v4(),
            name: "Alice".to_string(),
            email: "alice@example.com".to_string(),
            password_hash: "$2b$12$secret".to_string(),
            phone: "5511999999999".to_string(),
            business_id: None,
            postal_code: None,
            state: None,
            city: None,
            neighborhood: None,
            street_address: None,
            street_number: None,
            complement: None,
            latitude: None,
            longitude: None,
            email_verified: false,
            verification_code: Some("A1B2C3".to_string()),
            verification_code_expires_at: Some(Utc::now()),
            created_at: Utc::now(),
            updated_at: Utc::now(),
        }
    }

    #[test]
    fn response_never_serializes_sensitive_fields() -> Result<()> {
        let response = UserResponse::from(sample_user());
        let value = serde_json::to_value(&response)?;
        let object = value.as_object().expect("response serializes to object");
        assert!(!object.contains_key("password_hash"));
        assert!(!object.contains_key("password"));
        assert!(!object.contains_key("verification_code"));
        assert!(!object.contains_key("verification_code_expires_at"));
        assert!(object.contains_key("email_verified"));
        Ok(())
    }

    #[test]
    fn response_preserves_identity_fields() {
        let user = sample_user();
        let id = user.id;
        let response = UserResponse::from(user);
        assert_eq!(response.id, id);
        assert_eq!(response.email, "alice@example.com");
        assert!(!response.email_verified);
    }
}
