//! Product route handlers.
//!
//! Pure passthrough to the catalog gateway: an unreachable upstream surfaces
//! as empty lists, never as an error, so these handlers are infallible apart
//! from the single-product 404.

use axum::{
    Json,
    extract::{Path, Query, State},
};
use cartwheel_core::ProductId;
use tracing::instrument;

use crate::catalog::{Category, Product, ProductFilters};
use crate::error::{AppError, Result};
use crate::state::AppState;

/// List all products.
#[instrument(skip(state))]
pub async fn index(State(state): State<AppState>) -> Json<Vec<Product>> {
    Json(state.catalog().products().await)
}

/// Fetch a single product by id.
///
/// # Errors
///
/// Returns 404 if the catalog does not know the product.
#[instrument(skip(state))]
pub async fn show(
    State(state): State<AppState>,
    Path(id): Path<ProductId>,
) -> Result<Json<Product>> {
    state
        .catalog()
        .product(id)
        .await
        .map(Json)
        .ok_or_else(|| AppError::NotFound(format!("Product {id} not found")))
}

/// Search products with optional filters.
#[instrument(skip(state))]
pub async fn search(
    State(state): State<AppState>,
    Query(filters): Query<ProductFilters>,
) -> Json<Vec<Product>> {
    Json(state.catalog().search(&filters).await)
}

/// List all product categories.
#[instrument(skip(state))]
pub async fn categories(State(state): State<AppState>) -> Json<Vec<Category>> {
    Json(state.catalog().categories().await)
}
