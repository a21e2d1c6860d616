//! Catalog route handlers.

use axum::{Json, extract::State, http::StatusCode};
use tracing::instrument;

use crate::db::ProductRepository;
use crate::error::{AppError, Result};
use crate::models::product::{NewProduct, Product};
use crate::state::AppState;

/// List the full catalog.
///
/// GET /api/products
#[instrument(skip(state))]
pub async fn index(State(state): State<AppState>) -> Result<Json<Vec<Product>>> {
    let products = ProductRepository::new(state.pool()).list().await?;
    Ok(Json(products))
}

/// Create a product (administrative write).
///
/// POST /api/products
#[instrument(skip(state, new))]
pub async fn create(
    State(state): State<AppState>,
    Json(new): Json<NewProduct>,
) -> Result<(StatusCode, Json<Product>)> {
    new.validate().map_err(AppError::BadRequest)?;

    let product = ProductRepository::new(state.pool()).create(&new).await?;
    Ok((StatusCode::CREATED, Json(product)))
}
