//! Tagged error kinds for user lifecycle operations.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use thiserror::Error;
use tracing::error;

/// Domain failure taxonomy. Every lifecycle operation returns one of these
/// kinds; the HTTP mapping lives in the [`IntoResponse`] impl so handlers
/// stay free of status-code ladders.
#[derive(Debug, Error)]
pub enum UserError {
    #[error("User not found")]
    NotFound,

    #[error("Email already registered")]
    AlreadyExists,

    #[error("Email already verified")]
    AlreadyVerified,

    #[error("Invalid or expired verification code")]
    InvalidOrExpiredCode,

    #[error("Email not verified")]
    EmailNotVerified,

    #[error("Invalid credentials")]
    InvalidCredentials,

    /// Unexpected store or mail failure. The cause is logged server-side
    /// and never surfaced to callers.
    #[error("Internal server error")]
    Internal(#[from] anyhow::Error),
}

impl UserError {
    #[must_use]
    pub fn status(&self) -> StatusCode {
        match self {
            Self::NotFound => StatusCode::NOT_FOUND,
            Self::AlreadyExists => StatusCode::CONFLICT,
            Self::AlreadyVerified | Self::InvalidOrExpiredCode | Self::EmailNotVerified => {
                StatusCode::BAD_REQUEST
            }
            Self::InvalidCredentials => StatusCode::UNAUTHORIZED,
            Self::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for UserError {
    fn into_response(self) -> Response {
        if let Self::Internal(ref cause) = self {
            error!("Internal error: {cause:?}");
        }
        let body = Json(json!({ "message": self.to_string() }));
        (self.status(), body).into_response()
    }
}
