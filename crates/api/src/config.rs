//! API configuration loaded from environment variables.
//!
//! # Environment Variables
//!
//! ## Optional
//! - `CARTWHEEL_HOST` - Bind address (default: 127.0.0.1)
//! - `CARTWHEEL_PORT` - Listen port (default: 3000)
//! - `CATALOG_BASE_URL` - Upstream catalog API root
//!   (default: <https://api.escuelajs.co/api/v1/>)
//! - `CATALOG_TIMEOUT_SECS` - Upstream request timeout in seconds (default: 10)
//! - `SENTRY_DSN` - Sentry error tracking DSN

use std::net::{IpAddr, SocketAddr};
use std::time::Duration;

use thiserror::Error;
use url::Url;

/// Configuration errors that can occur during loading.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Missing environment variable: {0}")]
    MissingEnvVar(String),
    #[error("Invalid environment variable {0}: {1}")]
    InvalidEnvVar(String, String),
}

/// Cart API application configuration.
#[derive(Debug, Clone)]
pub struct ApiConfig {
    /// IP address to bind the server to
    pub host: IpAddr,
    /// Port to listen on
    pub port: u16,
    /// Upstream catalog API configuration
    pub catalog: CatalogConfig,
    /// Sentry DSN for error tracking
    pub sentry_dsn: Option<String>,
}

/// Upstream catalog API configuration.
#[derive(Debug, Clone)]
pub struct CatalogConfig {
    /// Root URL of the upstream REST API. Always ends with a slash so that
    /// `Url::join` preserves the base path.
    pub base_url: Url,
    /// Per-request timeout for upstream calls.
    pub timeout: Duration,
}

impl ApiConfig {
    /// Load configuration from environment variables.
    ///
    /// Calls `dotenvy::dotenv()` to load from `.env` file if present.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if a variable is present but invalid.
    pub fn from_env() -> Result<Self, ConfigError> {
        // Load .env file if present (ignore errors if not found)
        let _ = dotenvy::dotenv();

        let host = get_env_or_default("CARTWHEEL_HOST", "127.0.0.1")
            .parse::<IpAddr>()
            .map_err(|e| ConfigError::InvalidEnvVar("CARTWHEEL_HOST".to_string(), e.to_string()))?;
        let port = get_env_or_default("CARTWHEEL_PORT", "3000")
            .parse::<u16>()
            .map_err(|e| ConfigError::InvalidEnvVar("CARTWHEEL_PORT".to_string(), e.to_string()))?;

        let catalog = CatalogConfig::from_env()?;
        let sentry_dsn = get_optional_env("SENTRY_DSN");

        Ok(Self {
            host,
            port,
            catalog,
            sentry_dsn,
        })
    }

    /// Returns the socket address for binding the server.
    #[must_use]
    pub const fn socket_addr(&self) -> SocketAddr {
        SocketAddr::new(self.host, self.port)
    }
}

/// Default upstream catalog API root.
const DEFAULT_CATALOG_BASE_URL: &str = "https://api.escuelajs.co/api/v1/";

impl CatalogConfig {
    fn from_env() -> Result<Self, ConfigError> {
        let base_url = parse_base_url(&get_env_or_default(
            "CATALOG_BASE_URL",
            DEFAULT_CATALOG_BASE_URL,
        ))?;
        let timeout_secs = get_env_or_default("CATALOG_TIMEOUT_SECS", "10")
            .parse::<u64>()
            .map_err(|e| {
                ConfigError::InvalidEnvVar("CATALOG_TIMEOUT_SECS".to_string(), e.to_string())
            })?;

        Ok(Self {
            base_url,
            timeout: Duration::from_secs(timeout_secs),
        })
    }
}

/// Parse the catalog base URL, enforcing a trailing slash.
///
/// Without the trailing slash, `Url::join("products")` would replace the
/// final path segment of the base instead of appending to it.
fn parse_base_url(raw: &str) -> Result<Url, ConfigError> {
    let normalized = if raw.ends_with('/') {
        raw.to_string()
    } else {
        format!("{raw}/")
    };

    Url::parse(&normalized)
        .map_err(|e| ConfigError::InvalidEnvVar("CATALOG_BASE_URL".to_string(), e.to_string()))
}

// =============================================================================
// Helper Functions
// =============================================================================

/// Get an optional environment variable.
fn get_optional_env(key: &str) -> Option<String> {
    std::env::var(key).ok()
}

/// Get an environment variable with a default value.
fn get_env_or_default(key: &str, default: &str) -> String {
    std::env::var(key).unwrap_or_else(|_| default.to_string())
}
