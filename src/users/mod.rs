//! User lifecycle domain: registration, email verification, and profile
//! management.
//!
//! A user moves through three states:
//!
//! 1. **Pending**: created with a hashed password and a short-lived
//!    verification code that was mailed to the address on file.
//! 2. **Verified**: the code was submitted before expiry; code and expiry
//!    are cleared and profile mutations become available.
//! 3. **Profiled**: business identifier and address fields are populated.
//!
//! The service layer returns tagged [`error::UserError`] kinds; callers
//! match on the kind instead of inspecting strings.

pub mod error;
pub mod models;
pub mod password;
pub mod repo;
pub mod service;
pub mod validate;
pub mod verification;

pub use error::UserError;
pub use models::{LocationUpdate, NewUser, ProfileUpdate, User, UserResponse};
pub use service::UserService;
