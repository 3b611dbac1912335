//! HonduMarket web library.
//!
//! This crate provides the marketplace API as a library, allowing it to be
//! tested and reused.

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod config;
pub mod error;
pub mod middleware;
pub mod routes;
pub mod state;
pub mod store;

use axum::Router;

use state::AppState;

/// Build the full application router over the given state.
///
/// Health endpoints and the Sentry layers are added by the binary; this is
/// the surface the router tests exercise.
#[must_use]
pub fn app(state: AppState) -> Router {
    Router::new()
        .merge(routes::routes())
        .layer(axum::middleware::from_fn(
            middleware::request_id_middleware,
        ))
        .with_state(state)
}
