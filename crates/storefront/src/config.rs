//! Storefront configuration loaded from environment variables.
//!
//! # Environment Variables
//!
//! ## Optional
//! - `SHOPFRONT_API_BASE_URL` - Backend origin (default: <http://127.0.0.1:8000>)
//! - `SHOPFRONT_HOST` - UI bind address (default: 127.0.0.1)
//! - `SHOPFRONT_PORT` - UI listen port (default: 3000)
//! - `SHOPFRONT_ORDERS_POLL_SECS` - Order refresh interval (default: 10)
//! - `SHOPFRONT_PRODUCTS_POLL_SECS` - Product refresh interval (default: 15)
//! - `SHOPFRONT_CUSTOMERS_POLL_SECS` - Customer refresh interval (default: load once)
//! - `SHOPFRONT_NOTIFICATION_SECS` - Notification dismiss delay (default: 5)
//! - `SHOPFRONT_REQUEST_TIMEOUT_SECS` - Per-request HTTP timeout (default: 30)
//! - `SENTRY_DSN` - Sentry error tracking DSN
//! - `SENTRY_ENVIRONMENT` - Sentry environment name

use std::net::{IpAddr, SocketAddr};
use std::time::Duration;

use thiserror::Error;
use url::Url;

const DEFAULT_API_BASE_URL: &str = "http://127.0.0.1:8000";

/// Configuration errors that can occur during loading.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Invalid environment variable {0}: {1}")]
    InvalidEnvVar(String, String),
}

/// Storefront application configuration.
#[derive(Debug, Clone)]
pub struct StorefrontConfig {
    /// IP address to bind the UI server to
    pub host: IpAddr,
    /// Port to listen on
    pub port: u16,
    /// Backend API configuration
    pub api: ApiConfig,
    /// Recurring refresh intervals
    pub polling: PollConfig,
    /// How long a notification banner stays visible
    pub notification_ttl: Duration,
    /// Sentry DSN for error tracking
    pub sentry_dsn: Option<String>,
    /// Sentry environment name
    pub sentry_environment: Option<String>,
}

/// Backend REST API configuration.
#[derive(Debug, Clone)]
pub struct ApiConfig {
    /// Backend origin; collection paths are resolved against it
    pub base_url: Url,
    /// Per-request timeout
    pub request_timeout: Duration,
}

/// Recurring refresh intervals.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PollConfig {
    pub products: Duration,
    pub orders: Duration,
    /// `None` loads customers once at startup.
    pub customers: Option<Duration>,
}

impl Default for PollConfig {
    fn default() -> Self {
        Self {
            products: Duration::from_secs(15),
            orders: Duration::from_secs(10),
            customers: None,
        }
    }
}

impl StorefrontConfig {
    /// Load configuration from environment variables.
    ///
    /// Calls `dotenvy::dotenv()` to load from `.env` file if present.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if a variable is present but invalid. Every
    /// variable has a default, so nothing is required.
    pub fn from_env() -> Result<Self, ConfigError> {
        // Load .env file if present (ignore errors if not found)
        let _ = dotenvy::dotenv();

        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Load configuration from an arbitrary key lookup.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if a variable is present but invalid.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let env = Env(&lookup);

        let host = env
            .or_default("SHOPFRONT_HOST", "127.0.0.1")
            .parse::<IpAddr>()
            .map_err(|e| ConfigError::InvalidEnvVar("SHOPFRONT_HOST".to_string(), e.to_string()))?;
        let port = env
            .or_default("SHOPFRONT_PORT", "3000")
            .parse::<u16>()
            .map_err(|e| ConfigError::InvalidEnvVar("SHOPFRONT_PORT".to_string(), e.to_string()))?;

        let api = ApiConfig::from_env(&env)?;
        let defaults = PollConfig::default();
        let polling = PollConfig {
            products: env
                .seconds("SHOPFRONT_PRODUCTS_POLL_SECS")?
                .unwrap_or(defaults.products),
            orders: env
                .seconds("SHOPFRONT_ORDERS_POLL_SECS")?
                .unwrap_or(defaults.orders),
            customers: env.seconds("SHOPFRONT_CUSTOMERS_POLL_SECS")?,
        };
        let notification_ttl = env
            .seconds("SHOPFRONT_NOTIFICATION_SECS")?
            .unwrap_or(Duration::from_secs(5));

        Ok(Self {
            host,
            port,
            api,
            polling,
            notification_ttl,
            sentry_dsn: env.optional("SENTRY_DSN"),
            sentry_environment: env.optional("SENTRY_ENVIRONMENT"),
        })
    }

    /// Returns the socket address for binding the server.
    #[must_use]
    pub const fn socket_addr(&self) -> SocketAddr {
        SocketAddr::new(self.host, self.port)
    }
}

impl ApiConfig {
    fn from_env(env: &Env<'_>) -> Result<Self, ConfigError> {
        let raw = env.or_default("SHOPFRONT_API_BASE_URL", DEFAULT_API_BASE_URL);
        let base_url = Url::parse(&raw).map_err(|e| {
            ConfigError::InvalidEnvVar("SHOPFRONT_API_BASE_URL".to_string(), e.to_string())
        })?;
        if base_url.cannot_be_a_base() {
            return Err(ConfigError::InvalidEnvVar(
                "SHOPFRONT_API_BASE_URL".to_string(),
                "must be an absolute http(s) URL".to_string(),
            ));
        }

        let request_timeout = env
            .seconds("SHOPFRONT_REQUEST_TIMEOUT_SECS")?
            .unwrap_or(Duration::from_secs(30));

        Ok(Self {
            base_url,
            request_timeout,
        })
    }

    /// Config pointing at `base_url` with the default timeout.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if `base_url` is not a valid URL.
    pub fn for_base_url(base_url: &str) -> Result<Self, ConfigError> {
        let lookup = |key: &str| (key == "SHOPFRONT_API_BASE_URL").then(|| base_url.to_string());
        Self::from_env(&Env(&lookup))
    }
}

// =============================================================================
// Helper Functions
// =============================================================================

struct Env<'a>(&'a dyn Fn(&str) -> Option<String>);

impl Env<'_> {
    /// Get an optional environment variable.
    fn optional(&self, key: &str) -> Option<String> {
        (self.0)(key).filter(|v| !v.trim().is_empty())
    }

    /// Get an environment variable with a default value.
    fn or_default(&self, key: &str, default: &str) -> String {
        self.optional(key).unwrap_or_else(|| default.to_string())
    }

    /// Get an optional positive number of seconds.
    fn seconds(&self, key: &str) -> Result<Option<Duration>, ConfigError> {
        let Some(raw) = self.optional(key) else {
            return Ok(None);
        };
        let secs = raw
            .trim()
            .parse::<u64>()
            .map_err(|e| ConfigError::InvalidEnvVar(key.to_string(), e.to_string()))?;
        if secs == 0 {
            return Err(ConfigError::InvalidEnvVar(
                key.to_string(),
                "must be greater than zero".to_string(),
            ));
        }
        Ok(Some(Duration::from_secs(secs)))
    }
}
