//! Application state shared across handlers.

use std::sync::Arc;
use std::time::Duration;

use crate::api::{ApiClient, StorefrontApi};
use crate::config::StorefrontConfig;
use crate::services::Storefront;

/// Application state shared across all handlers.
///
/// Cheaply cloneable via `Arc`. Generic over the backend so handlers can be
/// exercised against an in-memory API.
pub struct AppState<A = ApiClient> {
    inner: Arc<AppStateInner<A>>,
}

struct AppStateInner<A> {
    storefront: Storefront<A>,
    reload_interval: Duration,
}

impl<A> Clone for AppState<A> {
    fn clone(&self) -> Self {
        Self {
            inner: Arc::clone(&self.inner),
        }
    }
}

impl<A: StorefrontApi> AppState<A> {
    /// Wrap a controller.
    ///
    /// `reload_interval` is how often an idle page reloads itself to show
    /// polled changes.
    #[must_use]
    pub fn new(storefront: Storefront<A>, reload_interval: Duration) -> Self {
        Self {
            inner: Arc::new(AppStateInner {
                storefront,
                reload_interval,
            }),
        }
    }

    /// Get a reference to the storefront controller.
    #[must_use]
    pub fn storefront(&self) -> &Storefront<A> {
        &self.inner.storefront
    }

    #[must_use]
    pub fn reload_interval(&self) -> Duration {
        self.inner.reload_interval
    }
}

impl AppState<ApiClient> {
    /// Build state for a configured backend.
    ///
    /// The page reloads at the fastest poll interval.
    #[must_use]
    pub fn from_config(config: &StorefrontConfig, api: ApiClient) -> Self {
        let storefront = Storefront::new(api, config.notification_ttl);
        let polling = &config.polling;
        let reload = polling
            .customers
            .map_or(polling.orders, |c| c.min(polling.orders))
            .min(polling.products);
        Self::new(storefront, reload)
    }
}
