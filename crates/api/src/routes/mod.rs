//! HTTP route handlers for the cart API.
//!
//! # Route Structure
//!
//! ```text
//! GET  /health                     - Liveness check
//! GET  /health/ready               - Readiness check (upstream probe)
//!
//! # Cart
//! GET    /cart                     - Current cart with totals
//! POST   /cart/add/{product_id}    - Add product (quantity query param, default 1)
//! PUT    /cart/update/{product_id} - Set quantity (0 removes the line)
//! DELETE /cart/remove/{product_id} - Remove product
//! DELETE /cart/clear               - Empty the cart
//!
//! # Products
//! GET  /products                   - All products
//! GET  /products/search            - Filtered products (title, categoryId, price_min, price_max)
//! GET  /products/categories        - All categories
//! GET  /products/{id}              - Product detail
//! ```

pub mod cart;
pub mod products;

use axum::{
    Router,
    routing::{delete, get, post, put},
};

use crate::state::AppState;

/// Create the cart routes router.
pub fn cart_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(cart::show))
        .route("/add/{product_id}", post(cart::add))
        .route("/update/{product_id}", put(cart::update))
        .route("/remove/{product_id}", delete(cart::remove))
        .route("/clear", delete(cart::clear))
}

/// Create the product routes router.
pub fn product_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(products::index))
        .route("/search", get(products::search))
        .route("/categories", get(products::categories))
        .route("/{id}", get(products::show))
}

/// Create all routes for the cart API.
pub fn routes() -> Router<AppState> {
    Router::new()
        .nest("/cart", cart_routes())
        .nest("/products", product_routes())
}
