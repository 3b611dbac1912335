//! Request identity binding.
//!
//! JWT verification is owned by the external auth collaborator, which runs
//! in front of this service and forwards the verified subject in the
//! `x-user-id` header. Requests without the header fall back to the demo
//! user so the marketplace stays usable in development without the auth
//! layer running.

use std::convert::Infallible;

use axum::{extract::FromRequestParts, http::request::Parts};
use hondumarket_core::UserId;

/// Header carrying the verified user ID, set by the auth layer.
pub const USER_ID_HEADER: &str = "x-user-id";

/// Extractor for the user a request acts on behalf of.
#[derive(Debug, Clone)]
pub struct CurrentUser(pub UserId);

impl<S> FromRequestParts<S> for CurrentUser
where
    S: Send + Sync,
{
    type Rejection = Infallible;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        let user_id = parts
            .headers
            .get(USER_ID_HEADER)
            .and_then(|h| h.to_str().ok())
            .filter(|v| !v.is_empty())
            .map_or_else(UserId::demo, UserId::new);

        Ok(Self(user_id))
    }
}
