//! Cart route handlers.
//!
//! Every mutating endpoint responds with the updated [`CartSummary`] so
//! clients never need a follow-up read, except `clear` which responds
//! 204 No Content.

use axum::{
    Json,
    extract::{Path, Query, State},
    http::StatusCode,
};
use cartwheel_core::ProductId;
use serde::Deserialize;
use tracing::instrument;

use crate::cart::CartSummary;
use crate::error::{AppError, Result};
use crate::state::AppState;

/// Query parameters for adding a product to the cart.
#[derive(Debug, Deserialize)]
pub struct AddToCartQuery {
    /// How many to add. Defaults to 1 when omitted; must be at least 1.
    pub quantity: Option<u32>,
}

/// Query parameters for updating a cart line's quantity.
#[derive(Debug, Deserialize)]
pub struct UpdateQuantityQuery {
    /// The new quantity. 0 removes the line.
    pub quantity: u32,
}

/// Return the current cart with recomputed totals.
#[instrument(skip(state))]
pub async fn show(State(state): State<AppState>) -> Json<CartSummary> {
    Json(state.cart().summary())
}

/// Add a product to the cart, or increase its quantity if already present.
///
/// Resolves the product against the catalog first.
///
/// # Errors
///
/// Returns 400 for a non-positive quantity and 404 for an unknown product.
#[instrument(skip(state))]
pub async fn add(
    State(state): State<AppState>,
    Path(product_id): Path<ProductId>,
    Query(query): Query<AddToCartQuery>,
) -> Result<Json<CartSummary>> {
    let quantity = query.quantity.unwrap_or(1);
    if quantity == 0 {
        return Err(AppError::BadRequest(
            "Quantity must be greater than 0".to_string(),
        ));
    }

    let product = state
        .catalog()
        .product(product_id)
        .await
        .ok_or_else(|| AppError::NotFound("Product not found".to_string()))?;

    // Resolve before locking: the cart lock must not be held across an await
    let summary = {
        let mut cart = state.cart();
        cart.add(&product, quantity)?;
        cart.summary()
    };

    Ok(Json(summary))
}

/// Update the quantity of a product in the cart. A quantity of 0 removes
/// the line; an absent product is a no-op.
#[instrument(skip(state))]
pub async fn update(
    State(state): State<AppState>,
    Path(product_id): Path<ProductId>,
    Query(query): Query<UpdateQuantityQuery>,
) -> Json<CartSummary> {
    let mut cart = state.cart();
    cart.update_quantity(product_id, query.quantity);
    Json(cart.summary())
}

/// Remove a product from the cart entirely. No-op if absent.
#[instrument(skip(state))]
pub async fn remove(
    State(state): State<AppState>,
    Path(product_id): Path<ProductId>,
) -> Json<CartSummary> {
    let mut cart = state.cart();
    cart.remove(product_id);
    Json(cart.summary())
}

/// Empty the cart.
#[instrument(skip(state))]
pub async fn clear(State(state): State<AppState>) -> StatusCode {
    state.cart().clear();
    StatusCode::NO_CONTENT
}
