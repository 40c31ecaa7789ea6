//! Core types for Shopfront.
//!
//! This module provides type-safe wrappers for common domain concepts and the
//! records exchanged with the backend's collection endpoints.

pub mod catalog;
pub mod id;
pub mod price;

pub use catalog::{Customer, NewProduct, Order, Product};
pub use id::*;
pub use price::{Price, PriceError};
