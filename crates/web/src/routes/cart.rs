//! Cart route handlers.
//!
//! Every mutation goes through the session store's transactional
//! `with_cart`, so the cart returned in the response is the exact state the
//! store committed, totals included.

use axum::{Json, extract::State};
use chrono::Utc;
use serde::Deserialize;
use tracing::instrument;

use hondumarket_core::{Cart, CurrencyCode, LineItemId, Money, ProductId};

use crate::error::Result;
use crate::middleware::CurrentUser;
use crate::state::AppState;
use crate::store::CartOps;

/// Add to cart request body.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AddItemRequest {
    pub product_id: ProductId,
    pub title: String,
    pub unit_price: Money,
    pub quantity: Option<u32>,
}

/// Update cart line request body.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateItemRequest {
    pub line_id: LineItemId,
    pub quantity: u32,
}

/// Remove cart line request body.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RemoveItemRequest {
    pub line_id: LineItemId,
}

/// Get the current user's cart.
///
/// Users without a stored cart get an empty active cart; nothing is written
/// until their first mutation.
#[instrument(skip(state))]
pub async fn show(State(state): State<AppState>, CurrentUser(user): CurrentUser) -> Result<Json<Cart>> {
    let cart = match state.store().cart(&user)? {
        Some(cart) => cart,
        None => Cart::empty(user, CurrencyCode::default(), Utc::now()),
    };
    Ok(Json(cart))
}

/// Add an item to the current user's cart.
#[instrument(skip(state, request), fields(product_id = %request.product_id))]
pub async fn add(
    State(state): State<AppState>,
    CurrentUser(user): CurrentUser,
    Json(request): Json<AddItemRequest>,
) -> Result<Json<Cart>> {
    let cart = state.store().add_item(
        &user,
        request.product_id,
        request.title,
        request.unit_price,
        request.quantity.unwrap_or(1),
    )?;
    Ok(Json(cart))
}

/// Update a cart line's quantity. Quantity 0 removes the line.
#[instrument(skip(state, request))]
pub async fn update(
    State(state): State<AppState>,
    CurrentUser(user): CurrentUser,
    Json(request): Json<UpdateItemRequest>,
) -> Result<Json<Cart>> {
    let cart = state
        .store()
        .update_item_quantity(&user, &request.line_id, request.quantity)?;
    Ok(Json(cart))
}

/// Remove a line from the current user's cart.
#[instrument(skip(state, request))]
pub async fn remove(
    State(state): State<AppState>,
    CurrentUser(user): CurrentUser,
    Json(request): Json<RemoveItemRequest>,
) -> Result<Json<Cart>> {
    let cart = state.store().remove_item(&user, &request.line_id)?;
    Ok(Json(cart))
}

/// Check the current user's cart out. Terminal; further mutations conflict.
#[instrument(skip(state))]
pub async fn checkout(
    State(state): State<AppState>,
    CurrentUser(user): CurrentUser,
) -> Result<Json<Cart>> {
    let cart = state.store().checkout(&user)?;
    Ok(Json(cart))
}

/// Abandon the current user's cart. Terminal; further mutations conflict.
#[instrument(skip(state))]
pub async fn abandon(
    State(state): State<AppState>,
    CurrentUser(user): CurrentUser,
) -> Result<Json<Cart>> {
    let cart = state.store().abandon(&user)?;
    Ok(Json(cart))
}
