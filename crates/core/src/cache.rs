//! Read-through product cache.
//!
//! The cache mirrors the most recent successful product list fetch. It is
//! replaced wholesale on every fetch; there is no incremental merge, so a
//! product missing from the latest fetch is gone from the cache.

use std::collections::HashMap;

use crate::types::{Product, ProductId};

/// Products from the last successful fetch, keyed by ID.
#[derive(Debug, Clone, Default)]
pub struct ProductCache {
    products: HashMap<ProductId, Product>,
}

impl ProductCache {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Replace the whole cache with the given products.
    pub fn replace<'a>(&mut self, products: impl IntoIterator<Item = &'a Product>) {
        self.products = products
            .into_iter()
            .map(|p| (p.product_id.clone(), p.clone()))
            .collect();
    }

    #[must_use]
    pub fn get(&self, product_id: &ProductId) -> Option<&Product> {
        self.products.get(product_id)
    }

    #[must_use]
    pub fn contains(&self, product_id: &ProductId) -> bool {
        self.products.contains_key(product_id)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.products.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.products.is_empty()
    }
}
