//! Integration tests for cart mutation round trips.
//!
//! These tests require:
//! - The API server running (cargo run -p cartwheel-api)
//! - The upstream catalog reachable from the server
//!
//! Run with: cargo test -p cartwheel-integration-tests -- --ignored
//!
//! The cart is process-wide shared state, so every test starts by clearing
//! it and the suite should not run in parallel with itself against one
//! server instance.

use cartwheel_integration_tests::{api_base_url, client};
use reqwest::{Client, StatusCode};
use serde_json::Value;

/// Test helper: empty the cart and assert it worked.
async fn clear_cart(client: &Client) {
    let base_url = api_base_url();
    let resp = client
        .delete(format!("{base_url}/cart/clear"))
        .send()
        .await
        .expect("Failed to clear cart");
    assert_eq!(resp.status(), StatusCode::NO_CONTENT);
}

/// Test helper: fetch the id of some existing product from the catalog.
async fn any_product_id(client: &Client) -> i64 {
    let base_url = api_base_url();
    let products: Value = client
        .get(format!("{base_url}/products"))
        .send()
        .await
        .expect("Failed to list products")
        .json()
        .await
        .expect("Failed to parse products");

    products
        .as_array()
        .and_then(|list| list.first())
        .and_then(|p| p["id"].as_i64())
        .expect("Catalog returned no products")
}

#[tokio::test]
#[ignore = "Requires running API server and reachable catalog"]
async fn test_empty_cart_shape() {
    let client = client();
    let base_url = api_base_url();
    clear_cart(&client).await;

    let cart: Value = client
        .get(format!("{base_url}/cart"))
        .send()
        .await
        .expect("Failed to get cart")
        .json()
        .await
        .expect("Failed to parse cart");

    assert_eq!(cart["items"], serde_json::json!([]));
    assert_eq!(cart["total_items"], 0);
}

#[tokio::test]
#[ignore = "Requires running API server and reachable catalog"]
async fn test_add_update_remove_round_trip() {
    let client = client();
    let base_url = api_base_url();
    clear_cart(&client).await;

    let product_id = any_product_id(&client).await;

    // Add two of the product
    let resp = client
        .post(format!("{base_url}/cart/add/{product_id}?quantity=2"))
        .send()
        .await
        .expect("Failed to add to cart");
    assert_eq!(resp.status(), StatusCode::OK);
    let cart: Value = resp.json().await.expect("Failed to parse cart");
    assert_eq!(cart["total_items"], 2);
    assert_eq!(cart["items"].as_array().map(Vec::len), Some(1));

    // Adding again increments the same line
    let cart: Value = client
        .post(format!("{base_url}/cart/add/{product_id}"))
        .send()
        .await
        .expect("Failed to add to cart")
        .json()
        .await
        .expect("Failed to parse cart");
    assert_eq!(cart["total_items"], 3);
    assert_eq!(cart["items"].as_array().map(Vec::len), Some(1));

    // Set the quantity explicitly
    let cart: Value = client
        .put(format!("{base_url}/cart/update/{product_id}?quantity=5"))
        .send()
        .await
        .expect("Failed to update cart")
        .json()
        .await
        .expect("Failed to parse cart");
    assert_eq!(cart["total_items"], 5);

    // Remove the line
    let cart: Value = client
        .delete(format!("{base_url}/cart/remove/{product_id}"))
        .send()
        .await
        .expect("Failed to remove from cart")
        .json()
        .await
        .expect("Failed to parse cart");
    assert_eq!(cart["total_items"], 0);
    assert_eq!(cart["items"], serde_json::json!([]));
}

#[tokio::test]
#[ignore = "Requires running API server and reachable catalog"]
async fn test_update_to_zero_removes_line() {
    let client = client();
    let base_url = api_base_url();
    clear_cart(&client).await;

    let product_id = any_product_id(&client).await;

    client
        .post(format!("{base_url}/cart/add/{product_id}?quantity=3"))
        .send()
        .await
        .expect("Failed to add to cart");

    let cart: Value = client
        .put(format!("{base_url}/cart/update/{product_id}?quantity=0"))
        .send()
        .await
        .expect("Failed to update cart")
        .json()
        .await
        .expect("Failed to parse cart");
    assert_eq!(cart["items"], serde_json::json!([]));
    assert_eq!(cart["total_items"], 0);
}

#[tokio::test]
#[ignore = "Requires running API server and reachable catalog"]
async fn test_add_zero_quantity_rejected() {
    let client = client();
    let base_url = api_base_url();

    let product_id = any_product_id(&client).await;

    let resp = client
        .post(format!("{base_url}/cart/add/{product_id}?quantity=0"))
        .send()
        .await
        .expect("Failed to send add request");
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
#[ignore = "Requires running API server and reachable catalog"]
async fn test_add_negative_quantity_rejected() {
    let client = client();
    let base_url = api_base_url();

    let product_id = any_product_id(&client).await;

    let resp = client
        .post(format!("{base_url}/cart/add/{product_id}?quantity=-1"))
        .send()
        .await
        .expect("Failed to send add request");
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
#[ignore = "Requires running API server and reachable catalog"]
async fn test_add_unknown_product_is_404() {
    let client = client();
    let base_url = api_base_url();

    let resp = client
        .post(format!("{base_url}/cart/add/99999999"))
        .send()
        .await
        .expect("Failed to send add request");
    assert_eq!(resp.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
#[ignore = "Requires running API server and reachable catalog"]
async fn test_remove_unknown_product_is_noop() {
    let client = client();
    let base_url = api_base_url();
    clear_cart(&client).await;

    let resp = client
        .delete(format!("{base_url}/cart/remove/99999999"))
        .send()
        .await
        .expect("Failed to send remove request");
    assert_eq!(resp.status(), StatusCode::OK);

    let cart: Value = resp.json().await.expect("Failed to parse cart");
    assert_eq!(cart["items"], serde_json::json!([]));
}
