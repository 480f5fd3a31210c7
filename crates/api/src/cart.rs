//! In-memory shopping cart aggregate.
//!
//! The cart is an ordered list of lines (one per product) plus derived
//! totals. It is owned by [`crate::state::AppState`] behind a mutex, so
//! mutations are serialized; the aggregate itself is synchronous and does
//! no I/O.
//!
//! Totals are recomputed from the current lines on every [`Cart::summary`]
//! call - they are never cached across a mutation.

use cartwheel_core::{CartLineId, ProductId};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::catalog::Product;

/// Errors a cart mutation can reject with.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum CartError {
    /// The requested quantity cannot be applied.
    #[error("quantity must be at least 1 (got {0})")]
    InvalidQuantity(u32),
}

/// One product's entry in the cart.
///
/// Title, price, and image are snapshots taken when the product was first
/// added; they are not re-fetched on later mutations.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CartLine {
    /// Cart line identifier, unique for the process lifetime.
    pub id: CartLineId,
    /// The product this line refers to.
    pub product_id: ProductId,
    /// Product title at add time.
    pub title: String,
    /// Product price at add time.
    pub price: Decimal,
    /// Primary product image at add time.
    pub image: Option<String>,
    /// How many of this product are in the cart. Positive while the line
    /// is present.
    pub quantity: u32,
}

impl CartLine {
    /// The total cost of this line (price x quantity).
    #[must_use]
    pub fn line_price(&self) -> Decimal {
        self.price * Decimal::from(self.quantity)
    }
}

/// Snapshot of the cart: items in insertion order plus derived totals.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CartSummary {
    /// Cart lines in insertion order.
    pub items: Vec<CartLine>,
    /// Sum of all line quantities.
    pub total_items: u64,
    /// Sum of all line prices x quantities.
    pub total_price: Decimal,
}

/// The cart aggregate.
///
/// Invariants:
/// - at most one line per product id
/// - every line has a positive quantity
/// - line ids increase monotonically and are never reused, even across
///   [`Cart::clear`]
#[derive(Debug)]
pub struct Cart {
    lines: Vec<CartLine>,
    next_line_id: i32,
}

impl Default for Cart {
    fn default() -> Self {
        Self::new()
    }
}

impl Cart {
    /// Create an empty cart.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            lines: Vec::new(),
            next_line_id: 1,
        }
    }

    /// Recompute totals and return the current cart contents.
    #[must_use]
    pub fn summary(&self) -> CartSummary {
        let total_items = self.lines.iter().map(|line| u64::from(line.quantity)).sum();
        let total_price = self.lines.iter().map(CartLine::line_price).sum();

        CartSummary {
            items: self.lines.clone(),
            total_items,
            total_price,
        }
    }

    /// Add a product to the cart.
    ///
    /// If a line for the product already exists its quantity is incremented,
    /// otherwise a new line is appended with a freshly allocated id and the
    /// product's title, price, and primary image snapshotted.
    ///
    /// # Errors
    ///
    /// Returns [`CartError::InvalidQuantity`] if `quantity` is zero.
    pub fn add(&mut self, product: &Product, quantity: u32) -> Result<(), CartError> {
        if quantity == 0 {
            return Err(CartError::InvalidQuantity(quantity));
        }

        if let Some(line) = self
            .lines
            .iter_mut()
            .find(|line| line.product_id == product.id)
        {
            line.quantity = line.quantity.saturating_add(quantity);
        } else {
            let id = self.allocate_line_id();
            self.lines.push(CartLine {
                id,
                product_id: product.id,
                title: product.title.clone(),
                price: product.price,
                image: product.primary_image().map(str::to_owned),
                quantity,
            });
        }

        tracing::info!(
            product_id = %product.id,
            quantity,
            "Added product to cart"
        );
        Ok(())
    }

    /// Remove the line matching `product_id`, if present.
    pub fn remove(&mut self, product_id: ProductId) {
        let before = self.lines.len();
        self.lines.retain(|line| line.product_id != product_id);

        if self.lines.len() != before {
            tracing::info!(product_id = %product_id, "Removed product from cart");
        }
    }

    /// Set the quantity of the line matching `product_id`.
    ///
    /// A quantity of zero behaves as [`Cart::remove`]. No-op if the product
    /// is not in the cart.
    pub fn update_quantity(&mut self, product_id: ProductId, quantity: u32) {
        if quantity == 0 {
            self.remove(product_id);
            return;
        }

        if let Some(line) = self
            .lines
            .iter_mut()
            .find(|line| line.product_id == product_id)
        {
            line.quantity = quantity;
            tracing::info!(
                product_id = %product_id,
                quantity,
                "Updated product quantity"
            );
        }
    }

    /// Empty the cart. The line id counter is not reset.
    pub fn clear(&mut self) {
        self.lines.clear();
        tracing::info!("Cart cleared");
    }

    fn allocate_line_id(&mut self) -> CartLineId {
        let id = CartLineId::new(self.next_line_id);
        self.next_line_id += 1;
        id
    }
}
