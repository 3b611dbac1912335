//! Social share route handler.
//!
//! The share endpoint acknowledges a share request with the public link for
//! the demo product. The request body is accepted but never read: the
//! frontend posts whatever share-widget payload it has, and the response is
//! the same regardless.

use axum::{Json, body::Bytes, extract::State};
use serde::Serialize;
use tracing::instrument;

use crate::error::{AppError, Result};
use crate::state::AppState;

/// User-facing confirmation message.
pub const SHARE_SUCCESS_MESSAGE: &str = "Producto compartido exitosamente";

/// Slug of the demo product every share currently points at.
pub const DEMO_PRODUCT_SLUG: &str = "producto-demo";

/// Share acknowledgment payload.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ShareResponse {
    /// Confirmation message shown to the user.
    pub message: String,
    /// Public link to the shared product.
    pub share_url: String,
}

/// Acknowledge a social share request.
///
/// Accepts any body (empty, malformed, oversized) and ignores it.
#[instrument(skip(state, _body))]
pub async fn share(State(state): State<AppState>, _body: Bytes) -> Result<Json<ShareResponse>> {
    let share_url = state
        .config()
        .share_url(DEMO_PRODUCT_SLUG)
        .map_err(|e| AppError::Internal(format!("failed to build share url: {e}")))?;

    Ok(Json(ShareResponse {
        message: SHARE_SUCCESS_MESSAGE.to_string(),
        share_url: share_url.into(),
    }))
}
