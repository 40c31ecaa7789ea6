//! The local shopping cart.
//!
//! The cart lives only in process memory: it is never persisted and is reset
//! only when the process restarts. Lines keep insertion order and there is at
//! most one line per product.

use serde::Serialize;

use crate::types::{Price, ProductId};

/// One product's aggregated quantity in the cart.
///
/// `name` and `price` are snapshots taken when the product was first added;
/// later catalog changes do not affect them.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CartLine {
    pub product_id: ProductId,
    pub name: String,
    pub price: Price,
    pub quantity: u32,
}

impl CartLine {
    /// Quantity x snapshot price.
    #[must_use]
    pub fn subtotal(&self) -> Price {
        self.price * self.quantity
    }
}

/// Ordered collection of cart lines keyed by product.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Cart {
    lines: Vec<CartLine>,
}

impl Cart {
    /// Create an empty cart.
    #[must_use]
    pub const fn new() -> Self {
        Self { lines: Vec::new() }
    }

    /// Add one unit of a product.
    ///
    /// Increments the existing line for `product_id` if there is one,
    /// otherwise appends a new line with quantity one. Returns the line's new
    /// quantity.
    pub fn add(&mut self, product_id: ProductId, name: impl Into<String>, price: Price) -> u32 {
        if let Some(line) = self.lines.iter_mut().find(|l| l.product_id == product_id) {
            line.quantity = line.quantity.saturating_add(1);
            return line.quantity;
        }

        self.lines.push(CartLine {
            product_id,
            name: name.into(),
            price,
            quantity: 1,
        });
        1
    }

    /// Lines in insertion order.
    #[must_use]
    pub fn lines(&self) -> &[CartLine] {
        &self.lines
    }

    /// Line for a product, if present.
    #[must_use]
    pub fn line(&self, product_id: &ProductId) -> Option<&CartLine> {
        self.lines.iter().find(|l| &l.product_id == product_id)
    }

    /// Sum of all line subtotals.
    #[must_use]
    pub fn total(&self) -> Price {
        self.lines.iter().map(CartLine::subtotal).sum()
    }

    /// Total number of units across all lines.
    #[must_use]
    pub fn item_count(&self) -> u32 {
        self.lines
            .iter()
            .fold(0, |count, l| count.saturating_add(l.quantity))
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.lines.len()
    }
}
