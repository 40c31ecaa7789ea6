//! CLI commands.

pub mod listings;
pub mod products;
