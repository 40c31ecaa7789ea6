//! Shopfront Core - Shared types library.
//!
//! This crate provides common types used across all Shopfront components:
//! - `storefront` - Storefront client (UI process, API client, poller)
//! - `cli` - Command-line tools for one-shot backend calls
//!
//! # Architecture
//!
//! The core crate contains only types and in-memory bookkeeping - no I/O, no
//! HTTP clients. This keeps it lightweight and allows it to be used anywhere.
//!
//! # Modules
//!
//! - [`types`] - Newtype IDs, prices, and the backend's catalog records
//! - [`cart`] - The local, unpersisted shopping cart
//! - [`cache`] - The read-through product cache rebuilt on every fetch

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod cache;
pub mod cart;
pub mod types;

pub use cache::ProductCache;
pub use cart::{Cart, CartLine};
pub use types::*;
