//! Product route handlers.

use axum::{
    Form,
    extract::{Path, State},
    response::{IntoResponse, Redirect},
};
use shopfront_core::ProductId;
use tracing::instrument;

use crate::api::StorefrontApi;
use crate::models::ProductForm;
use crate::state::AppState;

/// Create a product from the submitted form.
///
/// The outcome is reported through the page notification.
#[instrument(skip(state, form))]
pub async fn create<A: StorefrontApi>(
    State(state): State<AppState<A>>,
    Form(form): Form<ProductForm>,
) -> impl IntoResponse {
    // Errors are already logged and shown by the controller
    let _ = state.storefront().create_product(form).await;
    Redirect::to("/")
}

/// Delete a product.
#[instrument(skip(state), fields(product_id = %id))]
pub async fn delete<A: StorefrontApi>(
    State(state): State<AppState<A>>,
    Path(id): Path<String>,
) -> impl IntoResponse {
    let _ = state.storefront().delete_product(&ProductId::new(id)).await;
    Redirect::to("/")
}
