//! Headless client core for the single-page frontend.
//!
//! Implements the non-visual parts of the client: a typed API client, the
//! auth session state container with its derived flags, durable token
//! storage, and the route-guard policy. A UI layer renders on top of
//! these; nothing here draws anything.

pub mod api;
pub mod guards;
pub mod state;
pub mod store;

pub use api::{ApiClient, ClientError};
pub use guards::{evaluate, RouteDecision, RouteMeta};
pub use state::AuthSession;
pub use store::{FileTokenStore, MemoryTokenStore, TokenStore};
