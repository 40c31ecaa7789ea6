//! `reqwest` implementation of [`StorefrontApi`].

use std::sync::Arc;

use reqwest::StatusCode;
use serde::de::DeserializeOwned;
use shopfront_core::{Customer, NewProduct, Order, Product, ProductId};
use tracing::{debug, instrument};
use url::Url;

use super::{ApiError, StorefrontApi, error_detail};
use crate::config::ApiConfig;

const PRODUCTS_PATH: &str = "/api/products/";
const CUSTOMERS_PATH: &str = "/api/customers/";
const ORDERS_PATH: &str = "/api/orders/";

/// Client for the backend's REST collection endpoints.
///
/// Cheaply cloneable; clones share one connection pool.
#[derive(Clone)]
pub struct ApiClient {
    inner: Arc<ApiClientInner>,
}

struct ApiClientInner {
    client: reqwest::Client,
    products_url: Url,
    customers_url: Url,
    orders_url: Url,
}

impl std::fmt::Debug for ApiClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ApiClient")
            .field("products_url", &self.inner.products_url.as_str())
            .field("customers_url", &self.inner.customers_url.as_str())
            .field("orders_url", &self.inner.orders_url.as_str())
            .finish_non_exhaustive()
    }
}

impl ApiClient {
    /// Create a new API client.
    ///
    /// # Errors
    ///
    /// Returns `ApiError::Http` if the HTTP client cannot be built.
    pub fn new(config: &ApiConfig) -> Result<Self, ApiError> {
        let client = reqwest::Client::builder()
            .timeout(config.request_timeout)
            .build()?;

        Ok(Self {
            inner: Arc::new(ApiClientInner {
                client,
                products_url: config.base_url.join(PRODUCTS_PATH)?,
                customers_url: config.base_url.join(CUSTOMERS_PATH)?,
                orders_url: config.base_url.join(ORDERS_PATH)?,
            }),
        })
    }

    /// URL of a single product: the collection path with the ID appended.
    fn product_url(&self, product_id: &ProductId) -> Result<Url, ApiError> {
        let mut url = self.inner.products_url.clone();
        url.path_segments_mut()
            .map_err(|()| ApiError::InvalidUrl(url::ParseError::RelativeUrlWithCannotBeABaseBase))?
            .pop_if_empty()
            .push(product_id.as_str());
        Ok(url)
    }

    /// GET a collection and decode its JSON array.
    async fn get_list<T: DeserializeOwned>(&self, url: &Url) -> Result<Vec<T>, ApiError> {
        let response = self.inner.client.get(url.clone()).send().await?;
        decode(response).await
    }
}

/// Decode a 2xx JSON body, or turn the response into `ApiError::Status`.
async fn decode<T: DeserializeOwned>(response: reqwest::Response) -> Result<T, ApiError> {
    let status = response.status();
    let body = response.text().await?;

    if !status.is_success() {
        let detail = error_detail(status, &body);
        tracing::warn!(
            status = %status,
            detail = %detail,
            "Backend returned non-success status"
        );
        return Err(ApiError::Status { status, detail });
    }

    serde_json::from_str(&body).map_err(|e| {
        tracing::error!(
            error = %e,
            body = %body.chars().take(500).collect::<String>(),
            "Failed to parse backend response"
        );
        ApiError::Parse(e)
    })
}

impl StorefrontApi for ApiClient {
    #[instrument(skip(self))]
    async fn list_products(&self) -> Result<Vec<Product>, ApiError> {
        let products: Vec<Product> = self.get_list(&self.inner.products_url).await?;
        debug!(count = products.len(), "Fetched products");
        Ok(products)
    }

    #[instrument(skip(self))]
    async fn list_customers(&self) -> Result<Vec<Customer>, ApiError> {
        let customers: Vec<Customer> = self.get_list(&self.inner.customers_url).await?;
        debug!(count = customers.len(), "Fetched customers");
        Ok(customers)
    }

    #[instrument(skip(self))]
    async fn list_orders(&self) -> Result<Vec<Order>, ApiError> {
        let orders: Vec<Order> = self.get_list(&self.inner.orders_url).await?;
        debug!(count = orders.len(), "Fetched orders");
        Ok(orders)
    }

    #[instrument(skip(self, product), fields(name = %product.name))]
    async fn create_product(&self, product: &NewProduct) -> Result<Product, ApiError> {
        let response = self
            .inner
            .client
            .post(self.inner.products_url.clone())
            .json(product)
            .send()
            .await?;

        let created: Product = decode(response).await?;
        debug!(product_id = %created.product_id, "Created product");
        Ok(created)
    }

    #[instrument(skip(self), fields(product_id = %product_id))]
    async fn delete_product(&self, product_id: &ProductId) -> Result<StatusCode, ApiError> {
        let url = self.product_url(product_id)?;
        let response = self.inner.client.delete(url).send().await?;
        let status = response.status();
        debug!(status = %status, "Delete answered");
        Ok(status)
    }
}
