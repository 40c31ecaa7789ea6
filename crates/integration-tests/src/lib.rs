//! Integration tests for Shopfront.
//!
//! # Running Tests
//!
//! ```bash
//! cargo test -p shopfront-integration-tests
//! ```
//!
//! The tests need no external services: [`FakeBackend`] serves the REST
//! collection endpoints from memory on an ephemeral local port.
//!
//! # Test Categories
//!
//! - `api_client` - HTTP client against the backend endpoints
//! - `storefront_flow` - Controller flows over real HTTP
//! - `storefront_ui` - Rendered page and form routes end to end

#![allow(clippy::unwrap_used, clippy::expect_used)]

use std::net::SocketAddr;
use std::sync::{Arc, Mutex};

use axum::{
    Json, Router,
    extract::{Path, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{delete, get},
};
use serde_json::{Value, json};
use shopfront_core::{Customer, NewProduct, Order, Product, ProductId};
use shopfront_storefront::api::ApiClient;
use shopfront_storefront::config::ApiConfig;
use tokio::task::JoinHandle;

#[derive(Default)]
struct BackendState {
    products: Vec<Product>,
    customers: Vec<Customer>,
    orders: Vec<Order>,
    products_failure: Option<(StatusCode, Value)>,
    next_id: i64,
    requests: Vec<String>,
}

type Shared = Arc<Mutex<BackendState>>;

/// In-memory backend serving `/api/products/`, `/api/customers/` and
/// `/api/orders/`.
pub struct FakeBackend {
    addr: SocketAddr,
    state: Shared,
    server: JoinHandle<()>,
}

impl FakeBackend {
    /// Start serving on `127.0.0.1` with an OS-assigned port.
    pub async fn start() -> Self {
        let state: Shared = Arc::new(Mutex::new(BackendState {
            next_id: 1,
            ..BackendState::default()
        }));

        let app = Router::new()
            .route("/api/products/", get(list_products).post(create_product))
            .route("/api/products/{id}", delete(delete_product))
            .route("/api/customers/", get(list_customers))
            .route("/api/orders/", get(list_orders))
            .with_state(Arc::clone(&state));

        let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
            .await
            .expect("Failed to bind fake backend");
        let addr = listener.local_addr().expect("Failed to read local address");
        let server = tokio::spawn(async move {
            axum::serve(listener, app).await.expect("Fake backend failed");
        });

        Self {
            addr,
            state,
            server,
        }
    }

    /// Base URL for [`ApiConfig`].
    #[must_use]
    pub fn base_url(&self) -> String {
        format!("http://{}", self.addr)
    }

    /// A client pointed at this backend.
    #[must_use]
    pub fn client(&self) -> ApiClient {
        ApiClient::new(&ApiConfig::for_base_url(&self.base_url()).unwrap()).unwrap()
    }

    /// Insert a product directly, bypassing the API.
    pub fn seed_product(&self, name: &str, price: &str, stock: i64) -> ProductId {
        let mut state = self.state.lock().unwrap();
        let id = ProductId::from(state.next_id);
        state.next_id += 1;
        state.products.push(Product {
            product_id: id.clone(),
            name: name.to_string(),
            price: price.parse().unwrap(),
            stock_quantity: stock,
            description: None,
            image_url: None,
        });
        id
    }

    pub fn set_customers(&self, customers: Vec<Customer>) {
        self.state.lock().unwrap().customers = customers;
    }

    pub fn set_orders(&self, orders: Vec<Order>) {
        self.state.lock().unwrap().orders = orders;
    }

    /// Make product listing answer `status` with a JSON body.
    pub fn fail_products(&self, status: StatusCode, body: Value) {
        self.state.lock().unwrap().products_failure = Some((status, body));
    }

    /// Products as currently stored.
    #[must_use]
    pub fn products(&self) -> Vec<Product> {
        self.state.lock().unwrap().products.clone()
    }

    /// `METHOD path` of every request served so far.
    #[must_use]
    pub fn requests(&self) -> Vec<String> {
        self.state.lock().unwrap().requests.clone()
    }
}

impl Drop for FakeBackend {
    fn drop(&mut self) {
        self.server.abort();
    }
}

async fn list_products(State(state): State<Shared>) -> Response {
    let mut state = state.lock().unwrap();
    state.requests.push("GET /api/products/".to_string());
    match &state.products_failure {
        Some((status, body)) => (*status, Json(body.clone())).into_response(),
        None => Json(state.products.clone()).into_response(),
    }
}

async fn create_product(
    State(state): State<Shared>,
    Json(payload): Json<NewProduct>,
) -> Response {
    let mut state = state.lock().unwrap();
    state.requests.push("POST /api/products/".to_string());

    if payload.name.is_empty() {
        return (
            StatusCode::BAD_REQUEST,
            Json(json!({"detail": "name: This field may not be blank."})),
        )
            .into_response();
    }

    let product = Product {
        product_id: ProductId::from(state.next_id),
        name: payload.name,
        price: payload.price,
        stock_quantity: payload.stock_quantity,
        description: Some(payload.description).filter(|d| !d.is_empty()),
        image_url: None,
    };
    state.next_id += 1;
    state.products.push(product.clone());
    (StatusCode::CREATED, Json(product)).into_response()
}

async fn delete_product(State(state): State<Shared>, Path(id): Path<String>) -> Response {
    let mut state = state.lock().unwrap();
    state.requests.push(format!("DELETE /api/products/{id}"));

    let before = state.products.len();
    state.products.retain(|p| p.product_id.as_str() != id);
    if state.products.len() == before {
        return (StatusCode::NOT_FOUND, Json(json!({"detail": "Not found."}))).into_response();
    }
    StatusCode::NO_CONTENT.into_response()
}

async fn list_customers(State(state): State<Shared>) -> Json<Vec<Customer>> {
    let mut state = state.lock().unwrap();
    state.requests.push("GET /api/customers/".to_string());
    Json(state.customers.clone())
}

async fn list_orders(State(state): State<Shared>) -> Json<Vec<Order>> {
    let mut state = state.lock().unwrap();
    state.requests.push("GET /api/orders/".to_string());
    Json(state.orders.clone())
}
