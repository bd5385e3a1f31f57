//! Auth session state for the client.
//!
//! Holds `{user, token, loading, initialized}`, persists the token through
//! a [`TokenStore`], and exposes the derived flags guards key off. On app
//! start, [`AuthSession::check_auth`] runs the silent identity check: a
//! stored token is attached to request defaults and traded for a fresh
//! session via `/auth/me`; any failure clears the session without
//! surfacing an error.

use crate::users::UserResponse;

use super::api::{ApiClient, ClientError};
use super::guards::{evaluate, RouteDecision, RouteMeta};
use super::store::TokenStore;

pub struct AuthSession {
    client: ApiClient,
    store: Box<dyn TokenStore>,
    user: Option<UserResponse>,
    token: Option<String>,
    loading: bool,
    initialized: bool,
}

impl AuthSession {
    #[must_use]
    pub fn new(client: ApiClient, store: Box<dyn TokenStore>) -> Self {
        Self {
            client,
            store,
            user: None,
            token: None,
            loading: false,
            initialized: false,
        }
    }

    /// Silent identity check on application start.
    ///
    /// Failures are intentionally swallowed: an invalid or expired stored
    /// token just means starting logged out.
    pub async fn check_auth(&mut self) {
        let Some(stored) = self.store.load() else {
            self.initialized = true;
            return;
        };

        if !self.initialized {
            self.client.set_bearer_token(Some(stored));
        }

        self.loading = true;
        match self.client.me().await {
            Ok(response) => {
                self.set_user(response.user);
                self.set_token(response.access_token);
            }
            Err(_) => self.logout(),
        }
        self.loading = false;
        self.initialized = true;
    }

    /// Authenticate with credentials and store the resulting session.
    ///
    /// # Errors
    /// Propagates the server's error message on failure so the UI can
    /// surface it.
    pub async fn login(&mut self, email: &str, password: &str) -> Result<(), ClientError> {
        let request = crate::api::handlers::types::LoginRequest {
            email: email.to_string(),
            password: password.to_string(),
        };
        let response = self.client.login(&request).await?;
        self.set_user(response.user);
        self.set_token(response.access_token);
        Ok(())
    }

    pub fn set_user(&mut self, user: UserResponse) {
        self.user = Some(user);
    }

    pub fn set_token(&mut self, token: String) {
        self.store.save(&token);
        self.client.set_bearer_token(Some(token.clone()));
        self.token = Some(token);
    }

    /// Clear the session in memory and in durable storage.
    pub fn logout(&mut self) {
        self.user = None;
        self.token = None;
        self.initialized = false;
        self.store.clear();
        self.client.set_bearer_token(None);
    }

    /// Per-navigation hook: refresh the session before entering open
    /// routes, then apply the guard policy.
    pub async fn before_navigation(&mut self, route: RouteMeta) -> RouteDecision {
        if !route.requires_auth {
            self.check_auth().await;
        }
        self.evaluate_route(route)
    }

    /// Apply the route-guard policy with this session's flags.
    #[must_use]
    pub fn evaluate_route(&self, route: RouteMeta) -> RouteDecision {
        evaluate(
            route,
            self.is_authenticated(),
            self.is_registration_complete(),
        )
    }

    #[must_use]
    pub fn user(&self) -> Option<&UserResponse> {
        self.user.as_ref()
    }

    #[must_use]
    pub fn token(&self) -> Option<&str> {
        self.token.as_deref()
    }

    #[must_use]
    pub fn loading(&self) -> bool {
        self.loading
    }

    #[must_use]
    pub fn initialized(&self) -> bool {
        self.initialized
    }

    #[must_use]
    pub fn is_authenticated(&self) -> bool {
        self.token.is_some()
    }

    /// Registration is complete once postal code and street address are
    /// both filled in.
    #[must_use]
    pub fn is_registration_complete(&self) -> bool {
        self.user.as_ref().is_some_and(|user| {
            present(user.postal_code.as_deref()) && present(user.street_address.as_deref())
        })
    }

    #[must_use]
    pub fn is_email_verified(&self) -> bool {
        self.user.as_ref().is_some_and(|user| user.email_verified)
    }

    #[must_use]
    pub fn has_location(&self) -> bool {
        self.user.as_ref().is_some_and(|user| {
            present(user.latitude.as_deref()) && present(user.longitude.as_deref())
        })
    }

    /// Access the underlying API client (with the session token attached).
    #[must_use]
    pub fn client(&self) -> &ApiClient {
        &self.client
    }
}

fn present(value: Option<&str>) -> bool {
    value.is_some_and(|value| !value.is_empty())
}
