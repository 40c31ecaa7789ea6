//! In-memory [`StorefrontApi`] for unit tests.

#![allow(clippy::unwrap_used)]

use std::collections::VecDeque;
use std::sync::Mutex;
use std::sync::atomic::{AtomicUsize, Ordering};

use reqwest::StatusCode;
use rust_decimal::Decimal;
use shopfront_core::{Customer, NewProduct, Order, Price, Product, ProductId};
use tokio::sync::oneshot;

use crate::api::{ApiError, StorefrontApi, error_detail};

/// A product priced at $10.00 with five in stock.
pub fn product(id: i64, name: &str) -> Product {
    Product {
        product_id: ProductId::from(id),
        name: name.to_string(),
        price: Price::new(Decimal::new(1000, 2)),
        stock_quantity: 5,
        description: None,
        image_url: None,
    }
}

struct FakeState {
    products: Vec<Product>,
    customers: Vec<Customer>,
    orders: Vec<Order>,
    products_error: Option<(StatusCode, String)>,
    orders_error: Option<(StatusCode, String)>,
    create_error: Option<(StatusCode, String)>,
    delete_status: StatusCode,
    created: Vec<NewProduct>,
    next_id: i64,
    uppercase_names: bool,
}

impl Default for FakeState {
    fn default() -> Self {
        Self {
            products: Vec::new(),
            customers: Vec::new(),
            orders: Vec::new(),
            products_error: None,
            orders_error: None,
            create_error: None,
            delete_status: StatusCode::NO_CONTENT,
            created: Vec::new(),
            next_id: 100,
            uppercase_names: false,
        }
    }
}

/// Scriptable backend.
#[derive(Default)]
pub struct FakeApi {
    state: Mutex<FakeState>,
    held: Mutex<VecDeque<oneshot::Receiver<Vec<Product>>>>,
    waiting: AtomicUsize,
    product_fetches: AtomicUsize,
}

fn status_error(status: StatusCode, body: &str) -> ApiError {
    ApiError::Status {
        status,
        detail: error_detail(status, body),
    }
}

impl FakeApi {
    pub fn with_products(products: Vec<Product>) -> Self {
        let api = Self::default();
        api.set_products(products);
        api
    }

    pub fn set_products(&self, products: Vec<Product>) {
        let mut state = self.state.lock().unwrap();
        state.products = products;
        state.products_error = None;
    }

    pub fn set_customers(&self, customers: Vec<Customer>) {
        self.state.lock().unwrap().customers = customers;
    }

    pub fn set_orders(&self, orders: Vec<Order>) {
        self.state.lock().unwrap().orders = orders;
    }

    pub fn fail_products(&self, status: StatusCode, body: &str) {
        self.state.lock().unwrap().products_error = Some((status, body.to_string()));
    }

    pub fn fail_orders(&self, status: StatusCode, body: &str) {
        self.state.lock().unwrap().orders_error = Some((status, body.to_string()));
    }

    pub fn fail_create(&self, status: StatusCode, body: &str) {
        self.state.lock().unwrap().create_error = Some((status, body.to_string()));
    }

    pub fn set_delete_status(&self, status: StatusCode) {
        self.state.lock().unwrap().delete_status = status;
    }

    /// Store created products under an upper-cased name.
    pub fn normalize_names(&self) {
        self.state.lock().unwrap().uppercase_names = true;
    }

    /// Make the next product fetch wait for a list sent through the
    /// returned channel.
    pub fn hold_next_products(&self) -> oneshot::Sender<Vec<Product>> {
        let (tx, rx) = oneshot::channel();
        self.held.lock().unwrap().push_back(rx);
        tx
    }

    /// Product fetches currently parked on a held channel.
    pub fn held_waiting(&self) -> usize {
        self.waiting.load(Ordering::SeqCst)
    }

    pub fn product_fetches(&self) -> usize {
        self.product_fetches.load(Ordering::SeqCst)
    }

    pub fn created(&self) -> Vec<NewProduct> {
        self.state.lock().unwrap().created.clone()
    }
}

impl StorefrontApi for FakeApi {
    async fn list_products(&self) -> Result<Vec<Product>, ApiError> {
        self.product_fetches.fetch_add(1, Ordering::SeqCst);

        let held = self.held.lock().unwrap().pop_front();
        if let Some(rx) = held {
            self.waiting.fetch_add(1, Ordering::SeqCst);
            let products = rx.await.unwrap_or_default();
            self.waiting.fetch_sub(1, Ordering::SeqCst);
            return Ok(products);
        }

        let state = self.state.lock().unwrap();
        match &state.products_error {
            Some((status, body)) => Err(status_error(*status, body)),
            None => Ok(state.products.clone()),
        }
    }

    async fn list_customers(&self) -> Result<Vec<Customer>, ApiError> {
        Ok(self.state.lock().unwrap().customers.clone())
    }

    async fn list_orders(&self) -> Result<Vec<Order>, ApiError> {
        let state = self.state.lock().unwrap();
        match &state.orders_error {
            Some((status, body)) => Err(status_error(*status, body)),
            None => Ok(state.orders.clone()),
        }
    }

    async fn create_product(&self, product: &NewProduct) -> Result<Product, ApiError> {
        let mut state = self.state.lock().unwrap();
        if let Some((status, body)) = &state.create_error {
            return Err(status_error(*status, body));
        }

        let created = Product {
            product_id: ProductId::from(state.next_id),
            name: if state.uppercase_names {
                product.name.to_uppercase()
            } else {
                product.name.clone()
            },
            price: product.price,
            stock_quantity: product.stock_quantity,
            description: Some(product.description.clone()).filter(|d| !d.is_empty()),
            image_url: None,
        };
        state.next_id += 1;
        state.created.push(product.clone());
        state.products.push(created.clone());
        Ok(created)
    }

    async fn delete_product(&self, product_id: &ProductId) -> Result<StatusCode, ApiError> {
        let mut state = self.state.lock().unwrap();
        let status = state.delete_status;
        if status == StatusCode::NO_CONTENT {
            state.products.retain(|p| &p.product_id != product_id);
        }
        Ok(status)
    }
}
