//! Integration tests for Cartwheel.
//!
//! # Running Tests
//!
//! ```bash
//! # Start the server
//! cargo run -p cartwheel-api
//!
//! # Run integration tests
//! cargo test -p cartwheel-integration-tests -- --ignored
//! ```
//!
//! # Test Categories
//!
//! - `cart_flow` - Cart mutation round trips
//! - `products` - Catalog passthrough endpoints
//!
//! The tests require a running server (`API_BASE_URL`, default
//! `http://localhost:3000`) with the upstream catalog reachable.

/// Base URL for the API under test (configurable via environment).
#[must_use]
pub fn api_base_url() -> String {
    std::env::var("API_BASE_URL").unwrap_or_else(|_| "http://localhost:3000".to_string())
}

/// Build the shared HTTP client used by the test suites.
///
/// # Panics
///
/// Panics if the client cannot be constructed.
#[must_use]
pub fn client() -> reqwest::Client {
    reqwest::Client::builder()
        .build()
        .expect("Failed to create HTTP client")
}
