//! Product management commands.
//!
//! # Usage
//!
//! ```bash
//! sf-cli products list
//! sf-cli products create -n "Desk" -p 120.50 -s 3
//! sf-cli products delete 42
//! ```

#![allow(clippy::print_stdout)]

use reqwest::StatusCode;
use shopfront_core::ProductId;
use shopfront_storefront::api::{ApiError, StorefrontApi};
use shopfront_storefront::error::StorefrontError;
use shopfront_storefront::models::ProductForm;
use shopfront_storefront::views::{NO_PRODUCTS_TEXT, ProductView};
use thiserror::Error;

/// Errors that can occur during product operations.
#[derive(Debug, Error)]
pub enum ProductCommandError {
    /// Backend call failed.
    #[error("{}", .0.user_message())]
    Api(#[from] ApiError),

    /// Arguments do not form a valid product.
    #[error("{}", .0.user_message())]
    Invalid(#[from] StorefrontError),

    /// DELETE answered with something other than 204 No Content.
    #[error("Failed to delete product ID: {id} (HTTP {})", .status.as_u16())]
    DeleteRejected { id: ProductId, status: StatusCode },
}

/// Print one block per product.
pub async fn list(api: &impl StorefrontApi) -> Result<(), ProductCommandError> {
    let products = api.list_products().await?;
    if products.is_empty() {
        println!("{NO_PRODUCTS_TEXT}");
        return Ok(());
    }

    for product in &products {
        let view = ProductView::from(product);
        println!("{}", view.heading);
        println!("  {}", view.price);
        println!("  {}", view.stock);
        println!("  {}", view.description);
    }
    Ok(())
}

/// Create a product and print its new ID.
pub async fn create(
    api: &impl StorefrontApi,
    name: String,
    price: String,
    stock: String,
    description: String,
) -> Result<(), ProductCommandError> {
    let form = ProductForm {
        name,
        price,
        stock_quantity: stock,
        description,
    };
    let payload = form.to_new_product()?;

    tracing::info!("Creating product: {}", payload.name);
    let product = api.create_product(&payload).await?;

    println!(
        "Product \"{}\" added successfully! (ID: {})",
        product.name, product.product_id
    );
    Ok(())
}

/// Delete a product; anything but 204 is a failure.
pub async fn delete(api: &impl StorefrontApi, id: &str) -> Result<(), ProductCommandError> {
    let id = ProductId::from(id);

    match api.delete_product(&id).await? {
        StatusCode::NO_CONTENT => {
            println!("Product ID: {id} deleted successfully.");
            Ok(())
        }
        status => Err(ProductCommandError::DeleteRejected { id, status }),
    }
}
