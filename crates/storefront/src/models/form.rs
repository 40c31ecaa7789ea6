//! Product creation form.

use serde::{Deserialize, Serialize};
use shopfront_core::{NewProduct, Price};

use crate::error::StorefrontError;

/// Raw values of the "add product" form.
///
/// Kept as typed-in text so a rejected submission can be shown back to the
/// user unchanged. Cleared after a successful create.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ProductForm {
    pub name: String,
    pub price: String,
    pub stock_quantity: String,
    pub description: String,
}

impl ProductForm {
    /// Build the create payload.
    ///
    /// # Errors
    ///
    /// Returns `StorefrontError::InvalidForm` if the name is blank, the price
    /// is not a non-negative decimal, or the stock is not an integer.
    pub fn to_new_product(&self) -> Result<NewProduct, StorefrontError> {
        let name = self.name.trim();
        if name.is_empty() {
            return Err(StorefrontError::InvalidForm(
                "name cannot be empty".to_string(),
            ));
        }

        let price =
            Price::parse(&self.price).map_err(|e| StorefrontError::InvalidForm(e.to_string()))?;

        let stock_quantity = self.stock_quantity.trim().parse::<i64>().map_err(|_| {
            StorefrontError::InvalidForm(format!(
                "stock quantity must be a whole number, got '{}'",
                self.stock_quantity.trim()
            ))
        })?;

        Ok(NewProduct {
            name: name.to_string(),
            price,
            stock_quantity,
            description: self.description.trim().to_string(),
        })
    }
}
