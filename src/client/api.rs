//! Typed HTTP client for the service API.
//!
//! Centralizes base-url handling, bearer attachment, and error mapping so
//! flow code never touches raw requests. Server-provided error messages
//! are surfaced verbatim for the UI.

use serde::de::DeserializeOwned;
use serde::Serialize;
use thiserror::Error;

use crate::api::handlers::types::{
    AuthResponse, CreateUserRequest, LoginRequest, MessageResponse, UpdateLocationRequest,
    UpdateProfileRequest, VerifyEmailRequest, VerifyEmailResponse,
};
use crate::users::UserResponse;

#[derive(Debug, Error)]
pub enum ClientError {
    #[error("Unable to reach the server: {0}")]
    Network(#[from] reqwest::Error),

    /// Non-success response; `message` is what the server said.
    #[error("{message}")]
    Api { status: u16, message: String },

    #[error("Failed to decode response: {0}")]
    Parse(String),
}

pub struct ApiClient {
    http: reqwest::Client,
    base_url: String,
    bearer_token: Option<String>,
}

impl ApiClient {
    #[must_use]
    pub fn new(base_url: &str) -> Self {
        Self {
            http: reqwest::Client::new(),
            base_url: base_url.trim_end_matches('/').to_string(),
            bearer_token: None,
        }
    }

    /// Set or clear the token attached to outgoing request defaults.
    pub fn set_bearer_token(&mut self, token: Option<String>) {
        self.bearer_token = token;
    }

    #[must_use]
    pub fn bearer_token(&self) -> Option<&str> {
        self.bearer_token.as_deref()
    }

    /// # Errors
    /// Returns `ClientError` on transport failure or non-2xx response.
    pub async fn register(&self, request: &CreateUserRequest) -> Result<MessageResponse, ClientError> {
        self.post_json("/users", request).await
    }

    /// # Errors
    /// Returns `ClientError` on transport failure or non-2xx response.
    pub async fn verify_email(
        &self,
        request: &VerifyEmailRequest,
    ) -> Result<VerifyEmailResponse, ClientError> {
        self.post_json("/users/verify-email", request).await
    }

    /// # Errors
    /// Returns `ClientError` on transport failure or non-2xx response.
    pub async fn resend_code(&self, email: &str) -> Result<MessageResponse, ClientError> {
        let url = format!("{}/users/resend-code/{email}", self.base_url);
        let response = self.http.post(url).send().await?;
        Self::handle(response).await
    }

    /// # Errors
    /// Returns `ClientError` on transport failure or non-2xx response.
    pub async fn login(&self, request: &LoginRequest) -> Result<AuthResponse, ClientError> {
        self.post_json("/auth/login", request).await
    }

    /// Silent identity check; requires a bearer token to be set.
    ///
    /// # Errors
    /// Returns `ClientError` on transport failure or non-2xx response.
    pub async fn me(&self) -> Result<AuthResponse, ClientError> {
        let response = self
            .authorize(self.http.get(format!("{}/auth/me", self.base_url)))
            .send()
            .await?;
        Self::handle(response).await
    }

    /// # Errors
    /// Returns `ClientError` on transport failure or non-2xx response.
    pub async fn get_profile(&self) -> Result<UserResponse, ClientError> {
        let response = self
            .authorize(self.http.get(format!("{}/users/profile", self.base_url)))
            .send()
            .await?;
        Self::handle(response).await
    }

    /// # Errors
    /// Returns `ClientError` on transport failure or non-2xx response.
    pub async fn update_profile(
        &self,
        request: &UpdateProfileRequest,
    ) -> Result<UserResponse, ClientError> {
        let response = self
            .authorize(self.http.put(format!("{}/users/profile", self.base_url)))
            .json(request)
            .send()
            .await?;
        Self::handle(response).await
    }

    /// # Errors
    /// Returns `ClientError` on transport failure or non-2xx response.
    pub async fn update_location(
        &self,
        request: &UpdateLocationRequest,
    ) -> Result<UserResponse, ClientError> {
        let response = self
            .authorize(
                self.http
                    .put(format!("{}/users/profile/location", self.base_url)),
            )
            .json(request)
            .send()
            .await?;
        Self::handle(response).await
    }

    async fn post_json<B: Serialize, T: DeserializeOwned>(
        &self,
        path: &str,
        body: &B,
    ) -> Result<T, ClientError> {
        let response = self
            .http
            .post(format!("{}{path}", self.base_url))
            .json(body)
            .send()
            .await?;
        Self::handle(response).await
    }

    fn authorize(&self, builder: reqwest::RequestBuilder) -> reqwest::RequestBuilder {
        match &self.bearer_token {
            Some(token) => builder.bearer_auth(token),
            None => builder,
        }
    }

    async fn handle<T: DeserializeOwned>(response: reqwest::Response) -> Result<T, ClientError> {
        let status = response.status();
        if status.is_success() {
            return response
                .json::<T>()
                .await
                .map_err(|err| ClientError::Parse(err.to_string()));
        }

        let body = response.text().await.unwrap_or_default();
        // Domain errors arrive as {"message": ...}; validation errors may be
        // plain text.
        let message = serde_json::from_str::<MessageResponse>(&body)
            .map(|parsed| parsed.message)
            .unwrap_or_else(|_| {
                let trimmed = body.trim();
                if trimmed.is_empty() {
                    "Request failed.".to_string()
                } else {
                    trimmed.to_string()
                }
            });

        Err(ClientError::Api {
            status: status.as_u16(),
            message,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::{ApiClient, ClientError};
    use crate::api::handlers::types::LoginRequest;
    use anyhow::Result;
    use serde_json::json;
    use wiremock::matchers::{body_json, header, method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn user_json() -> serde_json::Value {
        json!({
            "id": "7f8ac1ae-5c43-4f19-9a2a-0d2a1f6a3b10",
            "name": "Alice",
            "email": "alice@example.com",
            "phone": "5511999999999",
            "business_id": null,
            "postal_code": null,
            "state": null,
            "city": null,
            "neighborhood": null,
            "street_address": null,
            "street_number": null,
            "complement": null,
            "latitude": null,
            "longitude": null,
            "email_verified": true,
            "created_at": "2025-01-15T12:00:00Z",
            "updated_at": "2025-01-15T12:00:00Z"
        })
    }

    #[tokio::test]
    async fn login_decodes_token_and_user() -> Result<()> {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/auth/login"))
            .and(body_json(json!({
                "email": "alice@example.com",
                "password": "secret"
            })))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "access_token": "signed-token",
                "user": user_json()
            })))
            .mount(&server)
            .await;

        let client = ApiClient::new(&server.uri());
        let response = client
            .login(&LoginRequest {
                email: "alice@example.com".to_string(),
                password: "secret".to_string(),
            })
            .await
            .expect("login succeeds");

        assert_eq!(response.access_token, "signed-token");
        assert_eq!(response.user.email, "alice@example.com");
        Ok(())
    }

    #[tokio::test]
    async fn me_attaches_bearer_token() -> Result<()> {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/auth/me"))
            .and(header("authorization", "Bearer stored-token"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "access_token": "fresh-token",
                "user": user_json()
            })))
            .mount(&server)
            .await;

        let mut client = ApiClient::new(&server.uri());
        client.set_bearer_token(Some("stored-token".to_string()));
        let response = client.me().await.expect("me succeeds");
        assert_eq!(response.access_token, "fresh-token");
        Ok(())
    }

    #[tokio::test]
    async fn error_body_message_is_surfaced() -> Result<()> {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/auth/login"))
            .respond_with(
                ResponseTemplate::new(401).set_body_json(json!({"message": "Invalid credentials"})),
            )
            .mount(&server)
            .await;

        let client = ApiClient::new(&server.uri());
        let err = client
            .login(&LoginRequest {
                email: "alice@example.com".to_string(),
                password: "wrong".to_string(),
            })
            .await
            .expect_err("login fails");

        match err {
            ClientError::Api { status, message } => {
                assert_eq!(status, 401);
                assert_eq!(message, "Invalid credentials");
            }
            other => panic!("unexpected error: {other:?}"),
        }
        Ok(())
    }

    #[tokio::test]
    async fn plain_text_error_falls_back_to_body() -> Result<()> {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/users"))
            .respond_with(ResponseTemplate::new(400).set_body_string("Invalid email"))
            .mount(&server)
            .await;

        let client = ApiClient::new(&server.uri());
        let err = client
            .register(&crate::api::handlers::types::CreateUserRequest {
                name: "Alice".to_string(),
                email: "nope".to_string(),
                password: "secret".to_string(),
                phone: "5511999999999".to_string(),
            })
            .await
            .expect_err("register fails");

        match err {
            ClientError::Api { message, .. } => assert_eq!(message, "Invalid email"),
            other => panic!("unexpected error: {other:?}"),
        }
        Ok(())
    }
}
