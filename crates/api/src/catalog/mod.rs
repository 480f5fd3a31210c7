//! Upstream product catalog client.
//!
//! # Architecture
//!
//! - Plain REST over `reqwest`, JSON in/out
//! - The upstream is the source of truth - no local sync, direct API calls
//! - In-memory caching via `moka` for list/product/category responses
//!   (5 minute TTL); search results are not cached
//!
//! # Error handling
//!
//! Transport and decode failures never escape this module: the public
//! methods log the failure and return an empty or absent result, so the
//! dispatch layer treats an unreachable catalog the same as an empty one.
//! The private fetch helper returns [`CatalogError`] so log lines carry the
//! cause.

mod cache;
pub mod types;

pub use types::{Category, Product, ProductFilters};

use std::sync::Arc;
use std::time::Duration;

use cartwheel_core::ProductId;
use moka::future::Cache;
use serde::de::DeserializeOwned;
use thiserror::Error;
use tracing::instrument;
use url::Url;

use crate::config::CatalogConfig;

use cache::{CacheKey, CacheValue};

/// Cached responses expire after this long.
const CACHE_TTL: Duration = Duration::from_secs(300);

/// Maximum number of cached responses.
const CACHE_CAPACITY: u64 = 1000;

/// Errors that can occur when talking to the upstream catalog.
#[derive(Debug, Error)]
pub enum CatalogError {
    /// HTTP request failed.
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// Request URL could not be built from the configured base.
    #[error("Invalid catalog URL: {0}")]
    Url(#[from] url::ParseError),

    /// Upstream returned a non-success status.
    #[error("Catalog returned status {status}")]
    Status { status: u16 },
}

impl CatalogError {
    /// Whether the upstream reported the resource as missing rather than
    /// failing outright.
    const fn is_not_found(&self) -> bool {
        // The upstream answers unknown product ids with 400 as well as 404
        matches!(self, Self::Status { status: 400 | 404 })
    }
}

/// Client for the upstream product catalog API.
///
/// Cheaply cloneable; all clones share one HTTP connection pool and one
/// response cache.
#[derive(Clone)]
pub struct CatalogClient {
    inner: Arc<CatalogClientInner>,
}

struct CatalogClientInner {
    client: reqwest::Client,
    base_url: Url,
    cache: Cache<CacheKey, CacheValue>,
}

impl CatalogClient {
    /// Create a new catalog client.
    ///
    /// # Errors
    ///
    /// Returns an error if the HTTP client fails to build.
    pub fn new(config: &CatalogConfig) -> Result<Self, CatalogError> {
        let client = reqwest::Client::builder()
            .timeout(config.timeout)
            .build()?;

        let cache = Cache::builder()
            .max_capacity(CACHE_CAPACITY)
            .time_to_live(CACHE_TTL)
            .build();

        Ok(Self {
            inner: Arc::new(CatalogClientInner {
                client,
                base_url: config.base_url.clone(),
                cache,
            }),
        })
    }

    /// Fetch all products. Returns an empty list if the catalog is
    /// unreachable.
    #[instrument(skip(self))]
    pub async fn products(&self) -> Vec<Product> {
        if let Some(CacheValue::Products(products)) = self.inner.cache.get(&CacheKey::Products).await
        {
            return products;
        }

        match self.fetch::<Vec<Product>>("products", &[]).await {
            Ok(products) => {
                self.inner
                    .cache
                    .insert(CacheKey::Products, CacheValue::Products(products.clone()))
                    .await;
                products
            }
            Err(e) => {
                tracing::warn!(error = %e, "Failed to fetch products from catalog");
                Vec::new()
            }
        }
    }

    /// Fetch a single product by id. Returns `None` if the product does not
    /// exist or the catalog is unreachable.
    #[instrument(skip(self))]
    pub async fn product(&self, id: ProductId) -> Option<Product> {
        let key = CacheKey::Product(id);
        if let Some(CacheValue::Product(product)) = self.inner.cache.get(&key).await {
            return Some(*product);
        }

        match self.fetch::<Product>(&format!("products/{id}"), &[]).await {
            Ok(product) => {
                self.inner
                    .cache
                    .insert(key, CacheValue::Product(Box::new(product.clone())))
                    .await;
                Some(product)
            }
            Err(e) if e.is_not_found() => {
                tracing::debug!(product_id = %id, "Product not found in catalog");
                None
            }
            Err(e) => {
                tracing::warn!(product_id = %id, error = %e, "Failed to fetch product from catalog");
                None
            }
        }
    }

    /// Search products with the given filters. Returns an empty list if the
    /// catalog is unreachable.
    ///
    /// Results are not cached: the filter combination space is unbounded.
    #[instrument(skip(self))]
    pub async fn search(&self, filters: &ProductFilters) -> Vec<Product> {
        match self
            .fetch::<Vec<Product>>("products", &filters.query_pairs())
            .await
        {
            Ok(products) => products,
            Err(e) => {
                tracing::warn!(error = %e, "Failed to search products in catalog");
                Vec::new()
            }
        }
    }

    /// Fetch all categories. Returns an empty list if the catalog is
    /// unreachable.
    #[instrument(skip(self))]
    pub async fn categories(&self) -> Vec<Category> {
        if let Some(CacheValue::Categories(categories)) =
            self.inner.cache.get(&CacheKey::Categories).await
        {
            return categories;
        }

        match self.fetch::<Vec<Category>>("categories", &[]).await {
            Ok(categories) => {
                self.inner
                    .cache
                    .insert(
                        CacheKey::Categories,
                        CacheValue::Categories(categories.clone()),
                    )
                    .await;
                categories
            }
            Err(e) => {
                tracing::warn!(error = %e, "Failed to fetch categories from catalog");
                Vec::new()
            }
        }
    }

    /// Readiness probe: whether the upstream answers at all.
    ///
    /// Bypasses the cache so a stale entry cannot mask an outage.
    #[instrument(skip(self))]
    pub async fn ping(&self) -> bool {
        match self.request("categories", &[]).await {
            Ok(response) => response.status().is_success(),
            Err(e) => {
                tracing::warn!(error = %e, "Catalog readiness probe failed");
                false
            }
        }
    }

    /// Execute a GET request against the catalog.
    async fn request(
        &self,
        path: &str,
        query: &[(&str, String)],
    ) -> Result<reqwest::Response, CatalogError> {
        let url = self.inner.base_url.join(path)?;

        let mut request = self.inner.client.get(url);
        if !query.is_empty() {
            request = request.query(query);
        }

        Ok(request.send().await?)
    }

    /// Execute a GET request and decode the JSON body.
    async fn fetch<T: DeserializeOwned>(
        &self,
        path: &str,
        query: &[(&str, String)],
    ) -> Result<T, CatalogError> {
        let response = self.request(path, query).await?;

        let status = response.status();
        if !status.is_success() {
            return Err(CatalogError::Status {
                status: status.as_u16(),
            });
        }

        Ok(response.json::<T>().await?)
    }
}
