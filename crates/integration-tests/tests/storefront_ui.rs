//! End-to-end tests for the storefront page over real HTTP.

#![allow(clippy::unwrap_used)]

use std::time::Duration;

use reqwest::StatusCode;
use shopfront_integration_tests::FakeBackend;
use shopfront_storefront::api::ApiClient;
use shopfront_storefront::routes;
use shopfront_storefront::services::Storefront;
use shopfront_storefront::state::AppState;
use shopfront_storefront::views::NO_PRODUCTS_TEXT;
use tokio::task::JoinHandle;

struct Ui {
    base_url: String,
    storefront: Storefront<ApiClient>,
    http: reqwest::Client,
    server: JoinHandle<()>,
}

impl Ui {
    async fn start(backend: &FakeBackend) -> Self {
        let storefront = Storefront::new(backend.client(), Duration::from_secs(5));
        let state = AppState::new(storefront.clone(), Duration::from_secs(10));
        let app = routes::routes().with_state(state);

        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        let server = tokio::spawn(async move {
            axum::serve(listener, app).await.unwrap();
        });

        Self {
            base_url: format!("http://{addr}"),
            storefront,
            http: reqwest::Client::new(),
            server,
        }
    }

    async fn page(&self) -> String {
        let response = self.http.get(&self.base_url).send().await.unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        response.text().await.unwrap()
    }

    /// POST a form; the redirect back to the page is followed.
    async fn submit(&self, path: &str, form: &[(&str, &str)]) -> String {
        let response = self
            .http
            .post(format!("{}{path}", self.base_url))
            .form(form)
            .send()
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(response.url().path(), "/");
        response.text().await.unwrap()
    }
}

impl Drop for Ui {
    fn drop(&mut self) {
        self.server.abort();
    }
}

#[tokio::test]
async fn test_empty_catalog_shows_placeholder() {
    let backend = FakeBackend::start().await;
    let ui = Ui::start(&backend).await;
    ui.storefront.refresh_products().await.unwrap();

    let page = ui.page().await;

    assert!(page.contains(NO_PRODUCTS_TEXT));
    assert!(page.contains("Total: $0.00"));
}

#[tokio::test]
async fn test_add_product_through_form() {
    let backend = FakeBackend::start().await;
    let ui = Ui::start(&backend).await;

    let page = ui
        .submit(
            "/products",
            &[
                ("name", "Desk"),
                ("price", "120.5"),
                ("stock_quantity", "3"),
                ("description", "Solid oak"),
            ],
        )
        .await;

    assert_eq!(backend.products().len(), 1);
    assert!(page.contains("Desk (ID: 1)"));
    assert!(page.contains("$120.50"));
    assert!(page.contains("Stock: 3"));
    assert!(page.contains("Solid oak"));
    assert!(page.contains("message-box success"));
}

#[tokio::test]
async fn test_cart_total_after_adds() {
    let backend = FakeBackend::start().await;
    let lamp = backend.seed_product("Lamp", "10.00", 1);
    let chair = backend.seed_product("Chair", "5.00", 1);
    let ui = Ui::start(&backend).await;
    ui.storefront.refresh_products().await.unwrap();

    ui.submit("/cart", &[("product_id", lamp.as_str())]).await;
    ui.submit("/cart", &[("product_id", lamp.as_str())]).await;
    let page = ui.submit("/cart", &[("product_id", chair.as_str())]).await;

    assert!(page.contains("Lamp (x2) - $20.00"));
    assert!(page.contains("Chair (x1) - $5.00"));
    assert!(page.contains("Total: $25.00"));
}

#[tokio::test]
async fn test_delete_missing_product_does_not_break_page() {
    let backend = FakeBackend::start().await;
    let lamp = backend.seed_product("Lamp", "10.00", 1);
    let ui = Ui::start(&backend).await;
    ui.storefront.refresh_products().await.unwrap();

    let page = ui.submit("/products/999/delete", &[]).await;

    assert!(page.contains("Failed to delete product ID: 999 (HTTP 404)."));
    assert!(page.contains(&format!("Lamp (ID: {lamp})")));
}
