//! API handlers for the registration and authentication routes.

pub mod auth;
pub mod health;
pub mod principal;
pub mod root;
pub mod types;
pub mod users;
