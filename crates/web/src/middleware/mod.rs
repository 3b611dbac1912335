//! HTTP middleware stack for the marketplace API.
//!
//! # Middleware Order (bottom to top in Router)
//!
//! 1. Sentry layers (capture errors, transactions)
//! 2. `TraceLayer` (request tracing)
//! 3. Request ID (add unique ID to each request)

pub mod identity;
pub mod request_id;

pub use identity::{CurrentUser, USER_ID_HEADER};
pub use request_id::request_id_middleware;
