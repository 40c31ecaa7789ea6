//! Unified error handling with Sentry integration.
//!
//! Provides [`StorefrontError`], returned by every controller operation. The
//! controller has already surfaced (or deliberately suppressed) a
//! notification by the time a caller sees one of these, so callers only need
//! to log.

use reqwest::StatusCode;
use shopfront_core::ProductId;
use thiserror::Error;

use crate::api::ApiError;

/// Storefront operation error.
#[derive(Debug, Error)]
pub enum StorefrontError {
    /// Backend call failed.
    #[error("API error: {0}")]
    Api(#[from] ApiError),

    /// The product form could not be turned into a create payload.
    #[error("Invalid product form: {0}")]
    InvalidForm(String),

    /// The product is not in the product cache.
    #[error("Unknown product: {0}")]
    UnknownProduct(ProductId),

    /// DELETE answered with something other than 204 No Content.
    #[error("Delete of product {product_id} returned {status}")]
    UnexpectedDeleteStatus {
        product_id: ProductId,
        status: StatusCode,
    },
}

impl StorefrontError {
    /// Text suitable for a notification banner.
    #[must_use]
    pub fn user_message(&self) -> String {
        match self {
            Self::Api(err) => err.user_message(),
            Self::InvalidForm(msg) => msg.clone(),
            other => other.to_string(),
        }
    }
}

/// Result type alias for `StorefrontError`.
pub type Result<T> = std::result::Result<T, StorefrontError>;

/// Add a breadcrumb for user actions.
///
/// Breadcrumbs appear in Sentry error reports to show the trail of user actions
/// leading up to an error.
///
/// # Example
///
/// ```rust,ignore
/// add_breadcrumb("cart", "Added to cart", Some(&[("product_id", "123")]));
/// ```
pub fn add_breadcrumb(category: &str, message: &str, data: Option<&[(&str, &str)]>) {
    let mut breadcrumb = sentry::Breadcrumb {
        category: Some(category.to_string()),
        message: Some(message.to_string()),
        level: sentry::Level::Info,
        ..Default::default()
    };

    if let Some(pairs) = data {
        for (key, value) in pairs {
            breadcrumb.data.insert(
                (*key).to_string(),
                serde_json::Value::String((*value).to_string()),
            );
        }
    }

    sentry::add_breadcrumb(breadcrumb);
}
