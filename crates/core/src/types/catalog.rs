//! Records served by the backend's collection endpoints.
//!
//! Field names match the backend's JSON. Unknown fields are ignored so the
//! backend can grow without breaking the client.

use serde::{Deserialize, Serialize};

use super::id::{CustomerId, OrderId, ProductId};
use super::price::Price;

/// A product from `/api/products/`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Product {
    pub product_id: ProductId,
    pub name: String,
    pub price: Price,
    pub stock_quantity: i64,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub image_url: Option<String>,
}

/// A customer from `/api/customers/`. Read-only.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Customer {
    #[serde(default)]
    pub customer_id: Option<CustomerId>,
    pub first_name: String,
    pub last_name: String,
    pub email: String,
}

impl Customer {
    /// `First Last`.
    #[must_use]
    pub fn full_name(&self) -> String {
        format!("{} {}", self.first_name, self.last_name)
    }
}

/// An order from `/api/orders/`. Read-only.
///
/// `status` is opaque: whatever the backend reports is shown verbatim.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Order {
    pub order_id: OrderId,
    pub status: String,
}

/// Payload for `POST /api/products/`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewProduct {
    pub name: String,
    pub price: Price,
    pub stock_quantity: i64,
    pub description: String,
}
