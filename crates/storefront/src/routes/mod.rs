//! HTTP route handlers for storefront.
//!
//! # Route Structure
//!
//! ```text
//! GET  /                       - Storefront page
//! GET  /health                 - Health check
//!
//! # Products
//! POST /products               - Create product (form), redirects to /
//! POST /products/{id}/delete   - Delete product, redirects to /
//!
//! # Cart
//! POST /cart                   - Add one unit of a product (form), redirects to /
//! ```
//!
//! Every mutation answers with `303 See Other` back to the page; outcomes are
//! shown through the page's notification banner.

pub mod cart;
pub mod home;
pub mod products;

use axum::{
    Router,
    routing::{get, post},
};

use crate::api::StorefrontApi;
use crate::state::AppState;

/// Create all routes for the storefront.
pub fn routes<A: StorefrontApi>() -> Router<AppState<A>> {
    Router::new()
        .route("/", get(home::index::<A>))
        .route("/products", post(products::create::<A>))
        .route("/products/{id}/delete", post(products::delete::<A>))
        .route("/cart", post(cart::add::<A>))
}
