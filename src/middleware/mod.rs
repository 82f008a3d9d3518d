//! Middleware components for HTTP request processing.
//!
//! Layered onto the router in [`crate::app::build_router`]: the API key check
//! guards everything except the health probes, the JWT check guards the resource
//! routes, and security headers are added to every response.

pub mod api_key;
pub mod auth;
pub mod security_headers;

pub use auth::AuthUser;
