//! Registration, verification, and profile endpoints.

use axum::{
    extract::{Extension, Path},
    http::{HeaderMap, StatusCode},
    response::IntoResponse,
    Json,
};
use std::sync::Arc;

use crate::token::TokenIssuer;
use crate::users::service::MSG_EMAIL_VERIFIED;
use crate::users::{
    validate::{non_empty, normalize_email, valid_business_id, valid_email, valid_postal_code},
    LocationUpdate, NewUser, ProfileUpdate, UserService,
};

use super::principal::require_auth;
use super::types::{
    CreateUserRequest, MessageResponse, UpdateLocationRequest, UpdateProfileRequest,
    VerifyEmailRequest, VerifyEmailResponse,
};

#[utoipa::path(
    post,
    path = "/users",
    request_body = CreateUserRequest,
    responses(
        (status = 201, description = "Account created, verification code mailed", body = MessageResponse),
        (status = 400, description = "Invalid payload"),
        (status = 409, description = "Email already registered", body = MessageResponse),
    ),
    tag = "users"
)]
pub async fn register(
    service: Extension<Arc<UserService>>,
    payload: Option<Json<CreateUserRequest>>,
) -> impl IntoResponse {
    let request: CreateUserRequest = match payload {
        Some(Json(payload)) => payload,
        None => return (StatusCode::BAD_REQUEST, "Missing payload".to_string()).into_response(),
    };

    let email = normalize_email(&request.email);
    if !valid_email(&email) {
        return (StatusCode::BAD_REQUEST, "Invalid email".to_string()).into_response();
    }
    if !non_empty(&request.name) || !non_empty(&request.phone) {
        return (StatusCode::BAD_REQUEST, "Missing required fields".to_string()).into_response();
    }
    if request.password.is_empty() {
        return (StatusCode::BAD_REQUEST, "Invalid password".to_string()).into_response();
    }

    let new_user = NewUser {
        name: request.name.trim().to_string(),
        email,
        password: request.password,
        phone: request.phone.trim().to_string(),
    };

    match service.create(new_user).await {
        Ok(message) => (
            StatusCode::CREATED,
            Json(MessageResponse {
                message: message.to_string(),
            }),
        )
            .into_response(),
        Err(err) => err.into_response(),
    }
}

#[utoipa::path(
    post,
    path = "/users/verify-email",
    request_body = VerifyEmailRequest,
    responses(
        (status = 200, description = "Email verified", body = VerifyEmailResponse),
        (status = 400, description = "Invalid or expired code / already verified"),
        (status = 404, description = "User not found"),
    ),
    tag = "users"
)]
pub async fn verify_email(
    service: Extension<Arc<UserService>>,
    payload: Option<Json<VerifyEmailRequest>>,
) -> impl IntoResponse {
    let request: VerifyEmailRequest = match payload {
        Some(Json(payload)) => payload,
        None => return (StatusCode::BAD_REQUEST, "Missing payload".to_string()).into_response(),
    };

    let email = normalize_email(&request.email);
    let code = request.code.trim();
    if code.is_empty() {
        return (StatusCode::BAD_REQUEST, "Missing code".to_string()).into_response();
    }

    match service.verify_email(&email, code).await {
        Ok(user) => (
            StatusCode::OK,
            Json(VerifyEmailResponse {
                message: MSG_EMAIL_VERIFIED.to_string(),
                user,
            }),
        )
            .into_response(),
        Err(err) => err.into_response(),
    }
}

#[utoipa::path(
    post,
    path = "/users/resend-code/{email}",
    params(
        ("email" = String, Path, description = "Registered email address")
    ),
    responses(
        (status = 200, description = "New verification code mailed", body = MessageResponse),
        (status = 400, description = "Email already verified"),
        (status = 404, description = "User not found"),
    ),
    tag = "users"
)]
pub async fn resend_code(
    service: Extension<Arc<UserService>>,
    Path(email): Path<String>,
) -> impl IntoResponse {
    let email = normalize_email(&email);

    match service.resend_code(&email).await {
        Ok(message) => (
            StatusCode::OK,
            Json(MessageResponse {
                message: message.to_string(),
            }),
        )
            .into_response(),
        Err(err) => err.into_response(),
    }
}

#[utoipa::path(
    get,
    path = "/users/profile",
    responses(
        (status = 200, description = "Current user", body = crate::users::UserResponse),
        (status = 401, description = "Missing or invalid bearer token"),
        (status = 404, description = "User not found"),
    ),
    security(("bearer_token" = [])),
    tag = "users"
)]
pub async fn get_profile(
    headers: HeaderMap,
    service: Extension<Arc<UserService>>,
    issuer: Extension<Arc<TokenIssuer>>,
) -> impl IntoResponse {
    let principal = match require_auth(&headers, &issuer) {
        Ok(principal) => principal,
        Err(status) => return status.into_response(),
    };

    match service.find_by_email(&principal.email).await {
        Ok(user) => (StatusCode::OK, Json(user)).into_response(),
        Err(err) => err.into_response(),
    }
}

#[utoipa::path(
    put,
    path = "/users/profile",
    request_body = UpdateProfileRequest,
    responses(
        (status = 200, description = "Updated user", body = crate::users::UserResponse),
        (status = 400, description = "Invalid payload or email not verified"),
        (status = 401, description = "Missing or invalid bearer token"),
        (status = 404, description = "User not found"),
    ),
    security(("bearer_token" = [])),
    tag = "users"
)]
pub async fn update_profile(
    headers: HeaderMap,
    service: Extension<Arc<UserService>>,
    issuer: Extension<Arc<TokenIssuer>>,
    payload: Option<Json<UpdateProfileRequest>>,
) -> impl IntoResponse {
    let principal = match require_auth(&headers, &issuer) {
        Ok(principal) => principal,
        Err(status) => return status.into_response(),
    };

    let request: UpdateProfileRequest = match payload {
        Some(Json(payload)) => payload,
        None => return (StatusCode::BAD_REQUEST, "Missing payload".to_string()).into_response(),
    };

    let update = match validate_profile(request) {
        Ok(update) => update,
        Err(message) => return (StatusCode::BAD_REQUEST, message).into_response(),
    };

    match service.update_profile(principal.user_id, update).await {
        Ok(user) => (StatusCode::OK, Json(user)).into_response(),
        Err(err) => err.into_response(),
    }
}

#[utoipa::path(
    put,
    path = "/users/profile/location",
    request_body = UpdateLocationRequest,
    responses(
        (status = 200, description = "Updated user", body = crate::users::UserResponse),
        (status = 400, description = "Invalid payload or email not verified"),
        (status = 401, description = "Missing or invalid bearer token"),
        (status = 404, description = "User not found"),
    ),
    security(("bearer_token" = [])),
    tag = "users"
)]
pub async fn update_location(
    headers: HeaderMap,
    service: Extension<Arc<UserService>>,
    issuer: Extension<Arc<TokenIssuer>>,
    payload: Option<Json<UpdateLocationRequest>>,
) -> impl IntoResponse {
    let principal = match require_auth(&headers, &issuer) {
        Ok(principal) => principal,
        Err(status) => return status.into_response(),
    };

    let request: UpdateLocationRequest = match payload {
        Some(Json(payload)) => payload,
        None => return (StatusCode::BAD_REQUEST, "Missing payload".to_string()).into_response(),
    };

    let update = match validate_location(request) {
        Ok(update) => update,
        Err(message) => return (StatusCode::BAD_REQUEST, message).into_response(),
    };

    match service.update_location(principal.user_id, update).await {
        Ok(user) => (StatusCode::OK, Json(user)).into_response(),
        Err(err) => err.into_response(),
    }
}

fn validate_profile(request: UpdateProfileRequest) -> Result<ProfileUpdate, String> {
    if !valid_business_id(request.business_id.trim()) {
        return Err("Business identifier must have 14 digits".to_string());
    }
    if !valid_postal_code(request.postal_code.trim()) {
        return Err("Postal code must have 8 digits".to_string());
    }
    for (field, value) in [
        ("state", &request.state),
        ("city", &request.city),
        ("neighborhood", &request.neighborhood),
        ("street_address", &request.street_address),
        ("street_number", &request.street_number),
    ] {
        if !non_empty(value) {
            return Err(format!("Missing required field: {field}"));
        }
    }

    Ok(ProfileUpdate {
        business_id: request.business_id.trim().to_string(),
        postal_code: request.postal_code.trim().to_string(),
        state: request.state.trim().to_string(),
        city: request.city.trim().to_string(),
        neighborhood: request.neighborhood.trim().to_string(),
        street_address: request.street_address.trim().to_string(),
        street_number: request.street_number.trim().to_string(),
        complement: normalize_optional(request.complement),
        latitude: normalize_optional(request.latitude),
        longitude: normalize_optional(request.longitude),
    })
}

fn validate_location(request: UpdateLocationRequest) -> Result<LocationUpdate, String> {
    if !valid_postal_code(request.postal_code.trim()) {
        return Err("Postal code must have 8 digits".to_string());
    }
    for (field, value) in [
        ("state", &request.state),
        ("city", &request.city),
        ("neighborhood", &request.neighborhood),
        ("street_address", &request.street_address),
    ] {
        if !non_empty(value) {
            return Err(format!("Missing required field: {field}"));
        }
    }

    Ok(LocationUpdate {
        postal_code: request.postal_code.trim().to_string(),
        state: request.state.trim().to_string(),
        city: request.city.trim().to_string(),
        neighborhood: request.neighborhood.trim().to_string(),
        street_address: request.street_address.trim().to_string(),
        latitude: normalize_optional(request.latitude),
        longitude: normalize_optional(request.longitude),
    })
}

fn normalize_optional(value: Option<String>) -> Option<String> {
    value
        .map(|value| value.trim().to_string())
        .filter(|value| !value.is_empty())
}

#[cfg(test)]
mod tests {
    use super::{register, update_profile, validate_location, validate_profile, verify_email};
    use crate::api::email::LogEmailSender;
    use crate::token::TokenIssuer;
    use crate::users::UserService;
    use anyhow::Result;
    use axum::{
        extract::Extension,
        http::{HeaderMap, StatusCode},
        response::IntoResponse,
        Json,
    };
    use secrecy::SecretString;
    use sqlx::postgres::PgPoolOptions;
    use std::sync::Arc;

    use super::super::types::{CreateUserRequest, UpdateLocationRequest, UpdateProfileRequest};

    fn service() -> Result<Extension<Arc<UserService>>> {
        let pool = PgPoolOptions::new().connect_lazy("postgres://postgres@localhost/postgres")?;
        Ok(Extension(Arc::new(UserService::new(
            pool,
            Arc::new(LogEmailSender),
        ))))
    }

    fn issuer() -> Extension<Arc<TokenIssuer>> {
        Extension(Arc::new(TokenIssuer::new(
            &SecretString::from("test-secret"),
            60,
        )))
    }

    fn profile_request() -> UpdateProfileRequest {
        UpdateProfileRequest {
            business_id: "12345678000195".to_string(),
            postal_code: "01310100".to_string(),
            state: "SP".to_string(),
            city: "Sao Paulo".to_string(),
            neighborhood: "Bela Vista".to_string(),
            street_address: "Av. Paulista".to_string(),
            street_number: "1000".to_string(),
            complement: Some("  ".to_string()),
            latitude: Some("-23.5614".to_string()),
            longitude: None,
        }
    }

    #[tokio::test]
    async fn register_missing_payload() -> Result<()> {
        let response = register(service()?, None).await.into_response();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        Ok(())
    }

    #[tokio::test]
    async fn register_invalid_email() -> Result<()> {
        let request = CreateUserRequest {
            name: "Alice".to_string(),
            email: "not-an-email".to_string(),
            password: "secret".to_string(),
            phone: "5511999999999".to_string(),
        };
        let response = register(service()?, Some(Json(request)))
            .await
            .into_response();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        Ok(())
    }

    #[tokio::test]
    async fn verify_email_empty_code() -> Result<()> {
        let request = super::VerifyEmailRequest {
            email: "alice@example.com".to_string(),
            code: "  ".to_string(),
        };
        let response = verify_email(service()?, Some(Json(request)))
            .await
            .into_response();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        Ok(())
    }

    #[tokio::test]
    async fn update_profile_requires_token() -> Result<()> {
        let response = update_profile(HeaderMap::new(), service()?, issuer(), None)
            .await
            .into_response();
        assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
        Ok(())
    }

    #[test]
    fn validate_profile_checks_digit_rules() {
        let mut request = profile_request();
        request.business_id = "123".to_string();
        assert_eq!(
            validate_profile(request).err(),
            Some("Business identifier must have 14 digits".to_string())
        );

        let mut request = profile_request();
        request.postal_code = "0131".to_string();
        assert_eq!(
            validate_profile(request).err(),
            Some("Postal code must have 8 digits".to_string())
        );
    }

    #[test]
    fn validate_profile_blanks_empty_optionals() {
        let update = validate_profile(profile_request()).expect("valid payload");
        assert_eq!(update.complement, None);
        assert_eq!(update.latitude, Some("-23.5614".to_string()));
    }

    #[test]
    fn validate_location_requires_address_fields() {
        let request = UpdateLocationRequest {
            postal_code: "01310100".to_string(),
            state: "SP".to_string(),
            city: String::new(),
            neighborhood: "Bela Vista".to_string(),
            street_address: "Av. Paulista".to_string(),
            latitude: None,
            longitude: None,
        };
        assert_eq!(
            validate_location(request).err(),
            Some("Missing required field: city".to_string())
        );
    }
}
