//! Cart route handlers.
//!
//! All cart routes require a bearer credential; the cart owner is always the
//! verified caller, never a client-asserted ID.

use axum::{Json, extract::State, http::StatusCode};
use serde::{Deserialize, Serialize};
use tracing::instrument;

use hemline_core::ProductId;

use crate::error::{AppError, Result};
use crate::middleware::RequireAuth;
use crate::models::cart::HydratedCart;
use crate::services::cart::{CartError, CartService};
use crate::state::AppState;

impl From<CartError> for AppError {
    fn from(err: CartError) -> Self {
        match err {
            CartError::Database(e) => Self::Database(e),
            CartError::ProductNotFound => Self::NotFound("Product not found".to_string()),
            CartError::CartNotFound => Self::NotFound("Cart not found".to_string()),
            CartError::LineNotFound => Self::NotFound("Item not found in cart".to_string()),
        }
    }
}

/// Add-to-cart request body.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AddToCartRequest {
    pub product_id: ProductId,
    pub quantity: Option<i64>,
}

/// Update-quantity request body.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateCartRequest {
    pub product_id: ProductId,
    pub quantity: i64,
}

/// Remove-line request body.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RemoveFromCartRequest {
    pub product_id: ProductId,
}

/// Response for clearing the cart.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ClearCartResponse {
    pub message: String,
    pub cart: HydratedCart,
}

/// Get the caller's hydrated cart.
///
/// GET /api/cart
///
/// A shopper with no cart yet gets an empty cart, not an error.
#[instrument(skip(state))]
pub async fn show(
    State(state): State<AppState>,
    RequireAuth(user_id): RequireAuth,
) -> Result<Json<HydratedCart>> {
    let cart = CartService::new(state.pool()).get(user_id).await?;
    Ok(Json(cart))
}

/// Add an item to the caller's cart.
///
/// POST /api/cart/add
#[instrument(skip(state))]
pub async fn add(
    State(state): State<AppState>,
    RequireAuth(user_id): RequireAuth,
    Json(request): Json<AddToCartRequest>,
) -> Result<(StatusCode, Json<HydratedCart>)> {
    let quantity = request.quantity.unwrap_or(1);
    let cart = CartService::new(state.pool())
        .add(user_id, request.product_id, quantity)
        .await?;

    Ok((StatusCode::CREATED, Json(cart)))
}

/// Set a line's quantity.
///
/// POST /api/cart/update
///
/// A quantity of zero or less removes the line.
#[instrument(skip(state))]
pub async fn update(
    State(state): State<AppState>,
    RequireAuth(user_id): RequireAuth,
    Json(request): Json<UpdateCartRequest>,
) -> Result<Json<HydratedCart>> {
    let cart = CartService::new(state.pool())
        .update(user_id, request.product_id, request.quantity)
        .await?;

    Ok(Json(cart))
}

/// Remove a line from the caller's cart.
///
/// POST /api/cart/remove
///
/// Removing an absent line from an existing cart is a no-op.
#[instrument(skip(state))]
pub async fn remove(
    State(state): State<AppState>,
    RequireAuth(user_id): RequireAuth,
    Json(request): Json<RemoveFromCartRequest>,
) -> Result<Json<HydratedCart>> {
    let cart = CartService::new(state.pool())
        .remove(user_id, request.product_id)
        .await?;

    Ok(Json(cart))
}

/// Empty the caller's cart.
///
/// DELETE /api/cart/clear
#[instrument(skip(state))]
pub async fn clear(
    State(state): State<AppState>,
    RequireAuth(user_id): RequireAuth,
) -> Result<Json<ClearCartResponse>> {
    let cart = CartService::new(state.pool()).clear(user_id).await?;

    Ok(Json(ClearCartResponse {
        message: "Cart cleared successfully".to_string(),
        cart,
    }))
}
