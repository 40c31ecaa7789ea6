//! Read-only customer and order listings.

#![allow(clippy::print_stdout)]

use shopfront_storefront::api::{ApiError, StorefrontApi};
use shopfront_storefront::views::{customer_line, order_line};

pub async fn customers(api: &impl StorefrontApi) -> Result<(), ApiError> {
    for customer in api.list_customers().await? {
        println!("{}", customer_line(&customer));
    }
    Ok(())
}

pub async fn orders(api: &impl StorefrontApi) -> Result<(), ApiError> {
    for order in api.list_orders().await? {
        println!("{}", order_line(&order));
    }
    Ok(())
}
