//! Storefront controller.
//!
//! Owns the cart, the product cache, and the three rendered lists, and turns
//! user actions and timer ticks into backend calls.
//!
//! # Concurrency
//!
//! All state sits behind one `RwLock` that is held only for synchronous
//! updates, never across a backend call. Every list refresh takes a ticket
//! before its request is sent; a response is applied only if no newer ticket
//! has been applied already, so a slow response can never overwrite a faster,
//! later one.

use std::fmt;
use std::future::Future;
use std::sync::Arc;
use std::time::Duration;

use reqwest::StatusCode;
use shopfront_core::{Cart, Customer, Order, Price, Product, ProductCache, ProductId};
use tokio::sync::RwLock;
use tokio::time::Instant;
use tracing::{debug, error, info, instrument, warn};

use crate::api::{ApiError, StorefrontApi};
use crate::error::{Result, StorefrontError, add_breadcrumb};
use crate::models::{Document, ListState, Notification, NotificationKind, ProductForm};

/// A backend collection the storefront renders.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Resource {
    Products,
    Customers,
    Orders,
}

impl Resource {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Products => "products",
            Self::Customers => "customers",
            Self::Orders => "orders",
        }
    }

    /// Only product load failures are shown to the user; the others are
    /// logged.
    const fn notifies_on_failure(self) -> bool {
        matches!(self, Self::Products)
    }
}

impl fmt::Display for Resource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Outcome of a successful list fetch.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Refresh {
    /// The fetched list replaced the rendered one.
    Applied(usize),
    /// A newer fetch had already been applied; this one was discarded.
    Stale,
}

/// One rendered list plus its refresh bookkeeping.
#[derive(Debug)]
struct Section<T> {
    state: ListState<T>,
    issued: u64,
    applied: u64,
}

impl<T> Default for Section<T> {
    fn default() -> Self {
        Self {
            state: ListState::Idle,
            issued: 0,
            applied: 0,
        }
    }
}

impl<T> Section<T> {
    /// Take a ticket for a new fetch.
    fn begin(&mut self) -> u64 {
        self.issued += 1;
        if matches!(self.state, ListState::Idle) {
            self.state = ListState::Loading;
        }
        self.issued
    }

    const fn is_stale(&self, ticket: u64) -> bool {
        ticket <= self.applied
    }

    fn apply(&mut self, ticket: u64, items: Vec<T>) {
        self.applied = ticket;
        self.state = ListState::Loaded(items);
    }
}

#[derive(Debug, Default)]
struct StorefrontState {
    products: Section<Product>,
    customers: Section<Customer>,
    orders: Section<Order>,
    cache: ProductCache,
    cart: Cart,
    notification: Option<Notification>,
    form: ProductForm,
}

impl StorefrontState {
    fn notify(&mut self, message: impl Into<String>, kind: NotificationKind) {
        self.notification = Some(Notification::new(message, kind));
    }

    fn products_mut(&mut self) -> &mut Section<Product> {
        &mut self.products
    }

    fn customers_mut(&mut self) -> &mut Section<Customer> {
        &mut self.customers
    }

    fn orders_mut(&mut self) -> &mut Section<Order> {
        &mut self.orders
    }
}

/// The storefront client.
///
/// Cheaply cloneable via `Arc`; the poller tasks and UI handlers share one
/// instance.
pub struct Storefront<A> {
    inner: Arc<StorefrontInner<A>>,
}

struct StorefrontInner<A> {
    api: A,
    state: RwLock<StorefrontState>,
    notification_ttl: Duration,
}

impl<A> Clone for Storefront<A> {
    fn clone(&self) -> Self {
        Self {
            inner: Arc::clone(&self.inner),
        }
    }
}

impl<A: StorefrontApi> Storefront<A> {
    /// Create a storefront with an empty cart and nothing loaded.
    #[must_use]
    pub fn new(api: A, notification_ttl: Duration) -> Self {
        Self {
            inner: Arc::new(StorefrontInner {
                api,
                state: RwLock::new(StorefrontState::default()),
                notification_ttl,
            }),
        }
    }

    /// Get a reference to the backend API.
    #[must_use]
    pub fn api(&self) -> &A {
        &self.inner.api
    }

    /// How long a notification stays visible.
    #[must_use]
    pub fn notification_ttl(&self) -> Duration {
        self.inner.notification_ttl
    }

    // =========================================================================
    // List refreshes
    // =========================================================================

    /// Refresh one list.
    ///
    /// # Errors
    ///
    /// Returns the fetch error after it has been logged (and, for products,
    /// shown to the user).
    pub async fn refresh(&self, resource: Resource) -> Result<Refresh> {
        match resource {
            Resource::Products => self.refresh_products().await,
            Resource::Customers => self.refresh_customers().await,
            Resource::Orders => self.refresh_orders().await,
        }
    }

    /// Fetch products, replacing the rendered list and the product cache.
    ///
    /// # Errors
    ///
    /// Returns the fetch error after showing `Failed to load products: ...`.
    #[instrument(skip(self))]
    pub async fn refresh_products(&self) -> Result<Refresh> {
        self.refresh_section(
            Resource::Products,
            StorefrontState::products_mut,
            self.inner.api.list_products(),
            |state, products| state.cache.replace(products),
        )
        .await
    }

    /// Fetch customers, replacing the rendered list.
    ///
    /// # Errors
    ///
    /// Returns the fetch error after logging it.
    #[instrument(skip(self))]
    pub async fn refresh_customers(&self) -> Result<Refresh> {
        self.refresh_section(
            Resource::Customers,
            StorefrontState::customers_mut,
            self.inner.api.list_customers(),
            |_, _| {},
        )
        .await
    }

    /// Fetch orders, replacing the rendered list.
    ///
    /// # Errors
    ///
    /// Returns the fetch error after logging it.
    #[instrument(skip(self))]
    pub async fn refresh_orders(&self) -> Result<Refresh> {
        self.refresh_section(
            Resource::Orders,
            StorefrontState::orders_mut,
            self.inner.api.list_orders(),
            |_, _| {},
        )
        .await
    }

    async fn refresh_section<T>(
        &self,
        resource: Resource,
        section: fn(&mut StorefrontState) -> &mut Section<T>,
        fetch: impl Future<Output = std::result::Result<Vec<T>, ApiError>>,
        on_apply: impl FnOnce(&mut StorefrontState, &[T]),
    ) -> Result<Refresh> {
        let ticket = section(&mut *self.inner.state.write().await).begin();

        let result = fetch.await;

        let mut state = self.inner.state.write().await;
        match result {
            Ok(items) => {
                if section(&mut *state).is_stale(ticket) {
                    debug!(%resource, ticket, "Discarding stale response");
                    return Ok(Refresh::Stale);
                }
                on_apply(&mut *state, &items);
                let count = items.len();
                section(&mut *state).apply(ticket, items);
                debug!(%resource, count, "List refreshed");
                Ok(Refresh::Applied(count))
            }
            Err(e) => {
                error!(%resource, error = %e, "Error fetching {resource}");
                if resource.notifies_on_failure() && !section(&mut *state).is_stale(ticket) {
                    state.notify(
                        format!("Failed to load {resource}: {}", e.user_message()),
                        NotificationKind::Error,
                    );
                }
                Err(e.into())
            }
        }
    }

    // =========================================================================
    // Product mutations
    // =========================================================================

    /// Create a product from the submitted form.
    ///
    /// On success the form is cleared and the product list refreshed. On
    /// failure the submitted values are kept so they can be shown again.
    ///
    /// # Errors
    ///
    /// Returns `StorefrontError::InvalidForm` if the form does not parse, or
    /// `StorefrontError::Api` if the backend rejects the product.
    #[instrument(skip(self, form), fields(name = %form.name))]
    pub async fn create_product(&self, form: ProductForm) -> Result<Product> {
        add_breadcrumb("products", "Create product", Some(&[("name", form.name.as_str())]));

        let result = match form.to_new_product() {
            Ok(payload) => self
                .inner
                .api
                .create_product(&payload)
                .await
                .map_err(StorefrontError::from),
            Err(e) => Err(e),
        };

        match result {
            Ok(product) => {
                {
                    let mut state = self.inner.state.write().await;
                    state.form = ProductForm::default();
                    state.notify(
                        format!("Product \"{}\" added successfully!", form.name.trim()),
                        NotificationKind::Success,
                    );
                }
                info!(product_id = %product.product_id, "Product created");
                // Failures are already surfaced by the refresh itself
                let _ = self.refresh_products().await;
                Ok(product)
            }
            Err(e) => {
                error!(error = %e, "Error adding product");
                let mut state = self.inner.state.write().await;
                state.notify(
                    format!("Error adding product: {}", e.user_message()),
                    NotificationKind::Error,
                );
                state.form = form;
                Err(e)
            }
        }
    }

    /// Delete a product.
    ///
    /// Only `204 No Content` counts as success and triggers a product
    /// refresh. Any other status is reported to the user and returned as
    /// `StorefrontError::UnexpectedDeleteStatus`.
    ///
    /// # Errors
    ///
    /// Returns `StorefrontError::UnexpectedDeleteStatus` for non-204 answers
    /// and `StorefrontError::Api` for transport failures.
    #[instrument(skip(self), fields(product_id = %product_id))]
    pub async fn delete_product(&self, product_id: &ProductId) -> Result<()> {
        add_breadcrumb(
            "products",
            "Delete product",
            Some(&[("product_id", product_id.as_str())]),
        );

        match self.inner.api.delete_product(product_id).await {
            Ok(StatusCode::NO_CONTENT) => {
                self.notify(
                    format!("Product ID: {product_id} deleted successfully."),
                    NotificationKind::Success,
                )
                .await;
                info!("Product deleted");
                let _ = self.refresh_products().await;
                Ok(())
            }
            Ok(status) => {
                warn!(status = %status, "Delete did not return 204");
                self.notify(
                    format!(
                        "Failed to delete product ID: {product_id} (HTTP {}).",
                        status.as_u16()
                    ),
                    NotificationKind::Error,
                )
                .await;
                Err(StorefrontError::UnexpectedDeleteStatus {
                    product_id: product_id.clone(),
                    status,
                })
            }
            Err(e) => {
                error!(error = %e, "Error deleting product");
                self.notify(
                    format!("Error deleting product: {}", e.user_message()),
                    NotificationKind::Error,
                )
                .await;
                Err(e.into())
            }
        }
    }

    // =========================================================================
    // Cart
    // =========================================================================

    /// Add one unit of a product to the cart using the given snapshot.
    ///
    /// Returns the line's new quantity.
    pub async fn add_to_cart(&self, product_id: ProductId, name: &str, price: Price) -> u32 {
        add_breadcrumb(
            "cart",
            "Added to cart",
            Some(&[("product_id", product_id.as_str())]),
        );

        let mut state = self.inner.state.write().await;
        let quantity = state.cart.add(product_id.clone(), name, price);
        debug!(
            product_id = %product_id,
            quantity,
            total = %state.cart.total(),
            "Cart updated"
        );
        quantity
    }

    /// Add one unit of a cached product to the cart.
    ///
    /// Name and price are taken from the product cache as of the last
    /// successful fetch.
    ///
    /// # Errors
    ///
    /// Returns `StorefrontError::UnknownProduct` (and shows a notification)
    /// if the product is not in the cache.
    pub async fn add_cached_to_cart(&self, product_id: &ProductId) -> Result<u32> {
        let snapshot = self
            .inner
            .state
            .read()
            .await
            .cache
            .get(product_id)
            .map(|p| (p.name.clone(), p.price));

        let Some((name, price)) = snapshot else {
            warn!(product_id = %product_id, "Add to cart for unknown product");
            self.notify(
                format!("Product ID: {product_id} is no longer available."),
                NotificationKind::Error,
            )
            .await;
            return Err(StorefrontError::UnknownProduct(product_id.clone()));
        };

        Ok(self.add_to_cart(product_id.clone(), &name, price).await)
    }

    /// Current cart contents.
    pub async fn cart(&self) -> Cart {
        self.inner.state.read().await.cart.clone()
    }

    /// Cached product as of the last successful fetch.
    pub async fn cached_product(&self, product_id: &ProductId) -> Option<Product> {
        self.inner.state.read().await.cache.get(product_id).cloned()
    }

    // =========================================================================
    // Document
    // =========================================================================

    /// Show a notification banner, replacing any current one.
    pub async fn notify(&self, message: impl Into<String>, kind: NotificationKind) {
        self.inner.state.write().await.notify(message, kind);
    }

    /// Snapshot of everything the page shows right now.
    pub async fn document(&self) -> Document {
        let state = self.inner.state.read().await;
        let now = Instant::now();

        Document {
            products: state.products.state.clone(),
            customers: state.customers.state.clone(),
            orders: state.orders.state.clone(),
            cart: state.cart.clone(),
            notification: state
                .notification
                .clone()
                .filter(|n| n.is_visible(now, self.inner.notification_ttl)),
            form: state.form.clone(),
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::indexing_slicing)]
mod tests {
    use rust_decimal::Decimal;

    use super::*;
    use crate::services::fake::{FakeApi, product};

    fn storefront(api: FakeApi) -> Storefront<FakeApi> {
        Storefront::new(api, Duration::from_secs(5))
    }

    fn dollars(cents: i64) -> Price {
        Price::new(Decimal::new(cents, 2))
    }

    #[tokio::test]
    async fn test_add_same_product_twice_yields_one_line() {
        let sf = storefront(FakeApi::default());

        sf.add_to_cart(ProductId::from(1), "Lamp", dollars(1000)).await;
        let quantity = sf.add_to_cart(ProductId::from(1), "Lamp", dollars(1000)).await;

        let cart = sf.cart().await;
        assert_eq!(quantity, 2);
        assert_eq!(cart.len(), 1);
        assert_eq!(cart.lines()[0].quantity, 2);
    }

    #[tokio::test]
    async fn test_cart_total() {
        let sf = storefront(FakeApi::default());

        sf.add_to_cart(ProductId::from(1), "Lamp", dollars(1000)).await;
        sf.add_to_cart(ProductId::from(1), "Lamp", dollars(1000)).await;
        sf.add_to_cart(ProductId::from(2), "Chair", dollars(500)).await;

        assert_eq!(sf.cart().await.total().to_string(), "$25.00");
    }

    #[tokio::test]
    async fn test_refresh_replaces_cache_entirely() {
        let api = FakeApi::with_products(vec![product(1, "Lamp"), product(2, "Chair")]);
        let sf = storefront(api);

        sf.refresh_products().await.unwrap();
        assert!(sf.cached_product(&ProductId::from(1)).await.is_some());

        sf.api().set_products(vec![product(2, "Chair")]);
        let outcome = sf.refresh_products().await.unwrap();

        assert_eq!(outcome, Refresh::Applied(1));
        assert!(sf.cached_product(&ProductId::from(1)).await.is_none());
        assert!(sf.cached_product(&ProductId::from(2)).await.is_some());
    }

    #[tokio::test]
    async fn test_failed_product_refresh_keeps_prior_content_and_notifies() {
        let sf = storefront(FakeApi::with_products(vec![product(1, "Lamp")]));
        sf.refresh_products().await.unwrap();

        sf.api()
            .fail_products(StatusCode::SERVICE_UNAVAILABLE, r#"{"detail":"db down"}"#);
        assert!(sf.refresh_products().await.is_err());

        let doc = sf.document().await;
        assert_eq!(doc.products.items().map(<[Product]>::len), Some(1));
        assert!(sf.cached_product(&ProductId::from(1)).await.is_some());

        let notification = doc.notification.unwrap();
        assert_eq!(notification.kind, NotificationKind::Error);
        assert_eq!(notification.message, "Failed to load products: db down");
    }

    #[tokio::test]
    async fn test_failed_order_refresh_is_only_logged() {
        let sf = storefront(FakeApi::default());
        sf.api().fail_orders(StatusCode::INTERNAL_SERVER_ERROR, "boom");

        assert!(sf.refresh_orders().await.is_err());

        let doc = sf.document().await;
        assert!(doc.notification.is_none());
        assert_eq!(doc.orders, ListState::Loading);
    }

    #[tokio::test]
    async fn test_stale_response_is_discarded() {
        let api = FakeApi::with_products(vec![product(1, "Lamp")]);
        let release = api.hold_next_products();
        let sf = storefront(api);

        let slow = tokio::spawn({
            let sf = sf.clone();
            async move { sf.refresh_products().await }
        });
        // Let the slow refresh take its ticket before the fast one starts
        tokio::task::yield_now().await;
        while sf.api().held_waiting() == 0 {
            tokio::task::yield_now().await;
        }

        sf.api().set_products(vec![product(2, "Chair")]);
        assert_eq!(sf.refresh_products().await.unwrap(), Refresh::Applied(1));

        release.send(vec![product(3, "Old stock")]).unwrap();
        assert_eq!(slow.await.unwrap().unwrap(), Refresh::Stale);

        assert!(sf.cached_product(&ProductId::from(2)).await.is_some());
        assert!(sf.cached_product(&ProductId::from(3)).await.is_none());
    }

    #[tokio::test]
    async fn test_create_product_clears_form_and_refreshes() {
        let sf = storefront(FakeApi::default());
        let form = ProductForm {
            name: "Lamp".to_string(),
            price: "12.50".to_string(),
            stock_quantity: "3".to_string(),
            description: String::new(),
        };

        let created = sf.create_product(form).await.unwrap();

        assert_eq!(created.name, "Lamp");
        let doc = sf.document().await;
        assert_eq!(doc.form, ProductForm::default());
        assert_eq!(doc.products.items().map(<[Product]>::len), Some(1));
        assert_eq!(
            doc.notification.map(|n| n.message),
            Some("Product \"Lamp\" added successfully!".to_string())
        );
        assert_eq!(sf.api().created().len(), 1);
    }

    #[tokio::test]
    async fn test_create_message_uses_submitted_name() {
        let api = FakeApi::default();
        api.normalize_names();
        let sf = storefront(api);
        let form = ProductForm {
            name: "  Desk lamp ".to_string(),
            price: "12.50".to_string(),
            stock_quantity: "3".to_string(),
            description: String::new(),
        };

        let created = sf.create_product(form).await.unwrap();

        assert_eq!(created.name, "DESK LAMP");
        assert_eq!(
            sf.document().await.notification.map(|n| n.message),
            Some("Product \"Desk lamp\" added successfully!".to_string())
        );
    }

    #[tokio::test]
    async fn test_customer_refresh_replaces_list() {
        let sf = storefront(FakeApi::default());
        sf.api().set_customers(vec![Customer {
            customer_id: None,
            first_name: "Ada".to_string(),
            last_name: "Lovelace".to_string(),
            email: "ada@example.com".to_string(),
        }]);

        assert_eq!(sf.refresh(Resource::Customers).await.unwrap(), Refresh::Applied(1));

        let doc = sf.document().await;
        assert_eq!(
            doc.customers.items().map(|c| c[0].email.as_str()),
            Some("ada@example.com")
        );
        assert!(doc.notification.is_none());

        sf.api().set_customers(Vec::new());
        sf.refresh_customers().await.unwrap();
        assert_eq!(sf.document().await.customers.items().map(<[Customer]>::len), Some(0));
    }

    #[tokio::test]
    async fn test_create_product_rejection_shows_detail_and_keeps_form() {
        let sf = storefront(FakeApi::default());
        sf.api().fail_create(
            StatusCode::BAD_REQUEST,
            r#"{"detail":"Product already exists"}"#,
        );
        let form = ProductForm {
            name: "Lamp".to_string(),
            price: "1".to_string(),
            stock_quantity: "1".to_string(),
            description: String::new(),
        };

        assert!(sf.create_product(form.clone()).await.is_err());

        let doc = sf.document().await;
        assert_eq!(doc.form, form);
        assert_eq!(
            doc.notification.map(|n| n.message),
            Some("Error adding product: Product already exists".to_string())
        );
    }

    #[tokio::test]
    async fn test_create_product_invalid_form_never_reaches_backend() {
        let sf = storefront(FakeApi::default());
        let form = ProductForm {
            name: "Lamp".to_string(),
            price: "free".to_string(),
            stock_quantity: "1".to_string(),
            description: String::new(),
        };

        let err = sf.create_product(form).await.unwrap_err();

        assert!(matches!(err, StorefrontError::InvalidForm(_)));
        assert!(sf.api().created().is_empty());
    }

    #[tokio::test]
    async fn test_delete_204_refreshes() {
        let sf = storefront(FakeApi::with_products(vec![product(1, "Lamp")]));
        sf.refresh_products().await.unwrap();
        sf.api().set_products(Vec::new());

        sf.delete_product(&ProductId::from(1)).await.unwrap();

        assert!(sf.cached_product(&ProductId::from(1)).await.is_none());
        assert_eq!(
            sf.document().await.notification.map(|n| n.kind),
            Some(NotificationKind::Success)
        );
    }

    #[tokio::test]
    async fn test_delete_404_does_not_refresh() {
        let sf = storefront(FakeApi::with_products(vec![product(1, "Lamp")]));
        sf.refresh_products().await.unwrap();
        sf.api().set_delete_status(StatusCode::NOT_FOUND);
        let fetches = sf.api().product_fetches();

        let err = sf.delete_product(&ProductId::from(9)).await.unwrap_err();

        assert!(matches!(
            err,
            StorefrontError::UnexpectedDeleteStatus {
                status: StatusCode::NOT_FOUND,
                ..
            }
        ));
        assert_eq!(sf.api().product_fetches(), fetches);
        assert!(sf.cached_product(&ProductId::from(1)).await.is_some());
    }

    #[tokio::test]
    async fn test_add_cached_to_cart_uses_cache_snapshot() {
        let sf = storefront(FakeApi::with_products(vec![product(1, "Lamp")]));
        sf.refresh_products().await.unwrap();

        sf.add_cached_to_cart(&ProductId::from(1)).await.unwrap();

        let cart = sf.cart().await;
        assert_eq!(cart.lines()[0].name, "Lamp");
    }

    #[tokio::test]
    async fn test_add_unknown_product_leaves_cart_untouched() {
        let sf = storefront(FakeApi::default());

        let err = sf.add_cached_to_cart(&ProductId::from(5)).await.unwrap_err();

        assert!(matches!(err, StorefrontError::UnknownProduct(_)));
        assert!(sf.cart().await.is_empty());
    }

    #[tokio::test(start_paused = true)]
    async fn test_notification_expires_from_document() {
        let sf = storefront(FakeApi::default());
        sf.notify("Hello", NotificationKind::Info).await;
        assert!(sf.document().await.notification.is_some());

        tokio::time::advance(Duration::from_secs(5)).await;
        assert!(sf.document().await.notification.is_none());
    }

    #[tokio::test]
    async fn test_lists_start_idle() {
        let sf = storefront(FakeApi::default());
        let doc = sf.document().await;
        assert_eq!(doc.products, ListState::Idle);
        assert_eq!(doc.customers, ListState::Idle);
        assert_eq!(doc.orders, ListState::Idle);
    }
}
