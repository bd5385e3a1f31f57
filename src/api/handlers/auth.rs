//! Login and session endpoints.

use axum::{
    extract::Extension,
    http::{HeaderMap, StatusCode},
    response::IntoResponse,
    Json,
};
use std::sync::Arc;

use crate::token::TokenIssuer;
use crate::users::{
    validate::{normalize_email, valid_email},
    UserError, UserService,
};

use super::principal::require_auth;
use super::types::{AuthResponse, LoginRequest};

#[utoipa::path(
    post,
    path = "/auth/login",
    request_body = LoginRequest,
    responses(
        (status = 200, description = "Login successful", body = AuthResponse),
        (status = 400, description = "Invalid payload"),
        (status = 401, description = "Invalid credentials"),
    ),
    tag = "auth"
)]
pub async fn login(
    service: Extension<Arc<UserService>>,
    issuer: Extension<Arc<TokenIssuer>>,
    payload: Option<Json<LoginRequest>>,
) -> impl IntoResponse {
    let request: LoginRequest = match payload {
        Some(Json(payload)) => payload,
        None => return (StatusCode::BAD_REQUEST, "Missing payload".to_string()).into_response(),
    };

    let email = normalize_email(&request.email);
    if !valid_email(&email) {
        return (StatusCode::BAD_REQUEST, "Invalid email".to_string()).into_response();
    }
    if request.password.is_empty() {
        return (StatusCode::BAD_REQUEST, "Invalid password".to_string()).into_response();
    }

    let user = match service.authenticate(&email, &request.password).await {
        Ok(user) => user,
        Err(err) => return err.into_response(),
    };

    let access_token = match issuer.issue(user.id, &user.email) {
        Ok(token) => token,
        Err(err) => return UserError::Internal(err).into_response(),
    };

    (StatusCode::OK, Json(AuthResponse { access_token, user })).into_response()
}

#[utoipa::path(
    get,
    path = "/auth/me",
    responses(
        (status = 200, description = "Current session with a re-issued token", body = AuthResponse),
        (status = 401, description = "Missing or invalid bearer token"),
        (status = 404, description = "User not found"),
    ),
    security(("bearer_token" = [])),
    tag = "auth"
)]
pub async fn me(
    headers: HeaderMap,
    service: Extension<Arc<UserService>>,
    issuer: Extension<Arc<TokenIssuer>>,
) -> impl IntoResponse {
    let principal = match require_auth(&headers, &issuer) {
        Ok(principal) => principal,
        Err(status) => return status.into_response(),
    };

    let user = match service.find_by_email(&principal.email).await {
        Ok(user) => user,
        Err(err) => return err.into_response(),
    };

    // Tokens are short-lived; the identity check doubles as a refresh.
    let access_token = match issuer.issue(user.id, &user.email) {
        Ok(token) => token,
        Err(err) => return UserError::Internal(err).into_response(),
    };

    (StatusCode::OK, Json(AuthResponse { access_token, user })).into_response()
}

#[cfg(test)]
mod tests {
    use super::{login, me};
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

    use super::super::types::LoginRequest;

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

    #[tokio::test]
    async fn login_missing_payload() -> Result<()> {
        let response = login(service()?, issuer(), None).await.into_response();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        Ok(())
    }

    #[tokio::test]
    async fn login_invalid_email() -> Result<()> {
        let request = LoginRequest {
            email: "nope".to_string(),
            password: "secret".to_string(),
        };
        let response = login(service()?, issuer(), Some(Json(request)))
            .await
            .into_response();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        Ok(())
    }

    #[tokio::test]
    async fn login_empty_password() -> Result<()> {
        let request = LoginRequest {
            email: "alice@example.com".to_string(),
            password: String::new(),
        };
        let response = login(service()?, issuer(), Some(Json(request)))
            .await
            .into_response();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        Ok(())
    }

    #[tokio::test]
    async fn me_requires_token() -> Result<()> {
        let response = me(HeaderMap::new(), service()?, issuer())
            .await
            .into_response();
        assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
        Ok(())
    }
}
