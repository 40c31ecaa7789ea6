//! Cart route handlers.
//!
//! The cart lives in the storefront controller; it is never sent to the
//! backend and does not survive a restart.

use axum::{
    Form,
    extract::State,
    response::{IntoResponse, Redirect},
};
use serde::Deserialize;
use shopfront_core::ProductId;
use tracing::instrument;

use crate::api::StorefrontApi;
use crate::state::AppState;

/// Add to cart form data.
#[derive(Debug, Deserialize)]
pub struct AddToCartForm {
    pub product_id: ProductId,
}

/// Add one unit of a product to the cart.
///
/// Name and price come from the last fetched product list.
#[instrument(skip(state), fields(product_id = %form.product_id))]
pub async fn add<A: StorefrontApi>(
    State(state): State<AppState<A>>,
    Form(form): Form<AddToCartForm>,
) -> impl IntoResponse {
    let _ = state.storefront().add_cached_to_cart(&form.product_id).await;
    Redirect::to("/")
}
