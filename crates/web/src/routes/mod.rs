//! HTTP route handlers for the marketplace API.
//!
//! # Route Structure
//!
//! ```text
//! GET  /health                  - Liveness check (in main)
//! GET  /health/ready            - Readiness check (in main)
//!
//! # Cart
//! GET  /api/cart                - Current user's cart
//! POST /api/cart/items          - Add item
//! POST /api/cart/items/update   - Update line quantity (0 removes)
//! POST /api/cart/items/remove   - Remove line
//! POST /api/cart/checkout       - Check cart out (terminal)
//! POST /api/cart/abandon        - Abandon cart (terminal)
//!
//! # Messaging (backs the /mensajes panel)
//! GET  /api/conversations                  - Current user's conversations
//! POST /api/conversations                  - Start a conversation
//! GET  /api/conversations/{id}/messages    - Message history
//! POST /api/conversations/{id}/messages    - Post a message
//!
//! # Social
//! POST /api/social/share        - Share acknowledgment (body ignored)
//! ```
//!
//! Identity comes from the `x-user-id` header set by the auth layer; see
//! [`crate::middleware::identity`].

pub mod cart;
pub mod messages;
pub mod share;

use axum::{
    Router,
    routing::{get, post},
};

use crate::state::AppState;

/// Create the cart routes router.
pub fn cart_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(cart::show))
        .route("/items", post(cart::add))
        .route("/items/update", post(cart::update))
        .route("/items/remove", post(cart::remove))
        .route("/checkout", post(cart::checkout))
        .route("/abandon", post(cart::abandon))
}

/// Create the messaging routes router.
pub fn messaging_routes() -> Router<AppState> {
    Router::new()
        .route(
            "/",
            get(messages::list_conversations).post(messages::start_conversation),
        )
        .route(
            "/{id}/messages",
            get(messages::list_messages).post(messages::post_message),
        )
}

/// Create all API routes for the marketplace.
pub fn routes() -> Router<AppState> {
    Router::new()
        .nest("/api/cart", cart_routes())
        .nest("/api/conversations", messaging_routes())
        .route("/api/social/share", post(share::share))
}
