//! Request/response types for the users and auth endpoints.

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::users::UserResponse;

#[derive(ToSchema, Serialize, Deserialize, Debug)]
pub struct CreateUserRequest {
    pub name: String,
    pub email: String,
    pub password: String,
    pub phone: String,
}

#[derive(ToSchema, Serialize, Deserialize, Debug)]
pub struct VerifyEmailRequest {
    pub email: String,
    pub code: String,
}

/// Profile payload. Unknown fields are rejected so nothing outside the
/// allow-list can ride along into the update.
#[derive(ToSchema, Serialize, Deserialize, Debug)]
#[serde(deny_unknown_fields)]
pub struct UpdateProfileRequest {
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

#[derive(ToSchema, Serialize, Deserialize, Debug)]
#[serde(deny_unknown_fields)]
pub struct UpdateLocationRequest {
    pub postal_code: String,
    pub state: String,
    pub city: String,
    pub neighborhood: String,
    pub street_address: String,
    pub latitude: Option<String>,
    pub longitude: Option<String>,
}

#[derive(ToSchema, Serialize, Deserialize, Debug)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

#[derive(ToSchema, Serialize, Deserialize, Debug)]
pub struct MessageResponse {
    pub message: String,
}

#[derive(ToSchema, Serialize, Deserialize, Debug)]
pub struct VerifyEmailResponse {
    pub message: String,
    pub user: UserResponse,
}

#[derive(ToSchema, Serialize, Deserialize, Debug)]
pub struct AuthResponse {
    pub access_token: String,
    pub user: UserResponse,
}

#[cfg(test)]
mod tests {
    use super::*;
    use anyhow::Result;

    #[test]
    fn create_user_request_round_trips() -> Result<()> {
        let request = CreateUserRequest {
            name: "Alice".to_string(),
            email: "alice@example.com".to_string(),
            password: "secret".to_string(),
            phone: "5511999999999".to_string(),
        };
        let value = serde_json::to_value(&request)?;
        let decoded: CreateUserRequest = serde_json::from_value(value)?;
        assert_eq!(decoded.email, "alice@example.com");
        Ok(())
    }

    #[test]
    fn profile_request_rejects_unknown_fields() {
        let result = serde_json::from_value::<UpdateProfileRequest>(serde_json::json!({
            "business_id": "12345678000195",
            "postal_code": "01310100",
            "state": "SP",
            "city": "Sao Paulo",
            "neighborhood": "Bela Vista",
            "street_address": "Av. Paulista",
            "street_number": "1000",
            "email_verified": true
        }));
        assert!(result.is_err());
    }

    #[test]
    fn location_request_rejects_unknown_fields() {
        let result = serde_json::from_value::<UpdateLocationRequest>(serde_json::json!({
            "postal_code": "01310100",
            "state": "SP",
            "city": "Sao Paulo",
            "neighborhood": "Bela Vista",
            "street_address": "Av. Paulista",
            "password_hash": "sneaky"
        }));
        assert!(result.is_err());
    }
}
