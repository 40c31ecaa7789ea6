//! Storefront page route handler.

use askama::Template;
use askama_web::WebTemplate;
use axum::{extract::State, response::IntoResponse};
use tokio::time::Instant;
use tracing::instrument;

use crate::api::StorefrontApi;
use crate::state::AppState;
use crate::views::{
    DocumentView, LOADING_CUSTOMERS_TEXT, LOADING_ORDERS_TEXT, LOADING_PRODUCTS_TEXT,
    NO_PRODUCTS_TEXT,
};

/// Storefront page template.
#[derive(Template, WebTemplate)]
#[template(path = "index.html")]
pub struct IndexTemplate {
    pub view: DocumentView,
    pub loading_products: &'static str,
    pub loading_customers: &'static str,
    pub loading_orders: &'static str,
    pub no_products: &'static str,
    pub reload_ms: u128,
    /// Milliseconds until the notification banner hides itself.
    pub dismiss_ms: u128,
}

/// Display the storefront page.
#[instrument(skip(state))]
pub async fn index<A: StorefrontApi>(State(state): State<AppState<A>>) -> impl IntoResponse {
    let document = state.storefront().document().await;
    let ttl = state.storefront().notification_ttl();
    let dismiss_ms = document
        .notification
        .as_ref()
        .map_or(0, |n| n.remaining(Instant::now(), ttl).as_millis());

    IndexTemplate {
        view: DocumentView::from(&document),
        loading_products: LOADING_PRODUCTS_TEXT,
        loading_customers: LOADING_CUSTOMERS_TEXT,
        loading_orders: LOADING_ORDERS_TEXT,
        no_products: NO_PRODUCTS_TEXT,
        reload_ms: state.reload_interval().as_millis(),
        dismiss_ms,
    }
}
