//! OpenAPI document for the HTTP surface.
//!
//! Handlers carry `#[utoipa::path]` annotations; this module collects them
//! into the document served at `/api-docs/openapi.json` and rendered by
//! swagger-ui.

use utoipa::{
    openapi::security::{HttpAuthScheme, HttpBuilder, SecurityScheme},
    Modify, OpenApi,
};

use super::handlers::{auth, health, types, users};
use crate::users::UserResponse;

#[derive(OpenApi)]
#[openapi(
    paths(
        health::health,
        users::register,
        users::verify_email,
        users::resend_code,
        users::get_profile,
        users::update_profile,
        users::update_location,
        auth::login,
        auth::me,
    ),
    components(schemas(
        health::Health,
        types::CreateUserRequest,
        types::VerifyEmailRequest,
        types::UpdateProfileRequest,
        types::UpdateLocationRequest,
        types::LoginRequest,
        types::MessageResponse,
        types::VerifyEmailResponse,
        types::AuthResponse,
        UserResponse,
    )),
    modifiers(&SecurityAddon),
    tags(
        (name = "users", description = "Registration, verification, and profile management"),
        (name = "auth", description = "Login and bearer-token sessions"),
        (name = "health", description = "Service health"),
    )
)]
pub struct ApiDoc;

struct SecurityAddon;

impl Modify for SecurityAddon {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        let components = openapi
            .components
            .get_or_insert(utoipa::openapi::Components::new());
        components.add_security_scheme(
            "bearer_token",
            SecurityScheme::Http(
                HttpBuilder::new()
                    .scheme(HttpAuthScheme::Bearer)
                    .bearer_format("JWT")
                    .build(),
            ),
        );
    }
}
