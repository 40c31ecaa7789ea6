//! Business logic services for storefront.
//!
//! # Services
//!
//! - `storefront` - The storefront controller (cart, product cache, lists, mutations)
//! - `poller` - Recurring list refresh tasks

pub mod poller;
pub mod storefront;

#[cfg(test)]
pub(crate) mod fake;

pub use poller::Poller;
pub use storefront::{Refresh, Resource, Storefront};
