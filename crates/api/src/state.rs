//! Application state shared across handlers.

use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use crate::cart::Cart;
use crate::catalog::{CatalogClient, CatalogError};
use crate::config::ApiConfig;

/// Application state shared across all handlers.
///
/// This struct is cheaply cloneable via `Arc` and provides access to the
/// configuration, the catalog client, and the process-wide cart.
#[derive(Clone)]
pub struct AppState {
    inner: Arc<AppStateInner>,
}

struct AppStateInner {
    config: ApiConfig,
    catalog: CatalogClient,
    /// The single process-lifetime cart. The mutex serializes mutations so
    /// concurrent adds cannot lose increments; it is never held across an
    /// await point.
    cart: Mutex<Cart>,
}

impl AppState {
    /// Create a new application state with an empty cart.
    ///
    /// # Errors
    ///
    /// Returns an error if the catalog HTTP client fails to build.
    pub fn new(config: ApiConfig) -> Result<Self, CatalogError> {
        let catalog = CatalogClient::new(&config.catalog)?;

        Ok(Self {
            inner: Arc::new(AppStateInner {
                config,
                catalog,
                cart: Mutex::new(Cart::new()),
            }),
        })
    }

    /// Get a reference to the API configuration.
    #[must_use]
    pub fn config(&self) -> &ApiConfig {
        &self.inner.config
    }

    /// Get a reference to the catalog client.
    #[must_use]
    pub fn catalog(&self) -> &CatalogClient {
        &self.inner.catalog
    }

    /// Lock and return the cart.
    ///
    /// A poisoned lock is recovered rather than propagated: the cart holds
    /// no invariants that a panicking reader could have broken mid-update.
    pub fn cart(&self) -> MutexGuard<'_, Cart> {
        self.inner
            .cart
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use std::time::Duration;

    use url::Url;

    use super::*;
    use crate::config::CatalogConfig;

    fn test_state() -> AppState {
        let config = ApiConfig {
            host: "127.0.0.1".parse().unwrap(),
            port: 0,
            catalog: CatalogConfig {
                base_url: Url::parse("https://api.example.com/api/v1/").unwrap(),
                timeout: Duration::from_secs(1),
            },
            sentry_dsn: None,
        };
        AppState::new(config).unwrap()
    }

    #[test]
    fn test_state_starts_with_empty_cart() {
        let state = test_state();
        assert!(state.cart().summary().items.is_empty());
    }

    #[test]
    fn test_clones_share_one_cart() {
        let state = test_state();
        let clone = state.clone();

        state.cart().update_quantity(1.into(), 0); // no-op mutation
        assert!(clone.cart().summary().items.is_empty());
        // Bind each read to a local so the first cart guard is dropped before
        // the second is acquired: clones share one Arc<Mutex<Cart>>, and
        // std::sync::Mutex is not reentrant, so holding both guards at once
        // (as `assert_eq!(clone.cart()..., state.cart()...)` would) deadlocks.
        let clone_total_items = clone.cart().summary().total_items;
        let state_total_items = state.cart().summary().total_items;
        assert_eq!(clone_total_items, state_total_items);
    }
}
