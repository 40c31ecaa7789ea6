//! Domain models for the storefront document.
//!
//! Everything here is process-local: the document is rebuilt from backend
//! fetches and user actions and is never persisted.

pub mod document;
pub mod form;
pub mod notification;

pub use document::{Document, ListState};
pub use form::ProductForm;
pub use notification::{Notification, NotificationKind};
