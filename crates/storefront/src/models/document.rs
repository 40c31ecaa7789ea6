//! Snapshot of everything the storefront page shows.

use shopfront_core::{Cart, Customer, Order, Product};

use super::{Notification, ProductForm};

/// Load state of one rendered list.
///
/// A list that has loaded once stays `Loaded` through later refreshes and
/// failures, so prior content remains on screen until a newer fetch succeeds.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ListState<T> {
    /// No fetch issued yet.
    Idle,
    /// First fetch in flight (or failed) with nothing to show yet.
    Loading,
    /// Contents of the most recent successful fetch.
    Loaded(Vec<T>),
}

impl<T> ListState<T> {
    /// Items of the last successful fetch, if any.
    #[must_use]
    pub fn items(&self) -> Option<&[T]> {
        match self {
            Self::Loaded(items) => Some(items),
            Self::Idle | Self::Loading => None,
        }
    }

    #[must_use]
    pub const fn is_loaded(&self) -> bool {
        matches!(self, Self::Loaded(_))
    }
}

impl<T> Default for ListState<T> {
    fn default() -> Self {
        Self::Idle
    }
}

/// The rendered storefront page as data.
///
/// `notification` is already filtered: it is `None` once the banner's
/// dismiss delay has passed.
#[derive(Debug, Clone, Default)]
pub struct Document {
    pub products: ListState<Product>,
    pub customers: ListState<Customer>,
    pub orders: ListState<Order>,
    pub cart: Cart,
    pub notification: Option<Notification>,
    pub form: ProductForm,
}
