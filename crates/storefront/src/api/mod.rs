//! Backend REST API access.
//!
//! # Endpoints
//!
//! ```text
//! GET    /api/products/        - list products
//! POST   /api/products/        - create product (JSON body)
//! DELETE /api/products/{id}    - delete product (204 on success)
//! GET    /api/customers/       - list customers
//! GET    /api/orders/          - list orders
//! ```
//!
//! The backend is the source of truth for every record; nothing here is
//! persisted. [`StorefrontApi`] is the seam the controller talks through, and
//! [`ApiClient`] is its `reqwest` implementation.

mod client;

use std::future::Future;

pub use client::ApiClient;

use reqwest::StatusCode;
use shopfront_core::{Customer, NewProduct, Order, Product, ProductId};
use thiserror::Error;

/// Errors that can occur when talking to the backend.
#[derive(Debug, Error)]
pub enum ApiError {
    /// Transport-level failure (connect, timeout, body read).
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// The backend answered with a non-success status.
    #[error("HTTP {status}: {detail}")]
    Status {
        /// Response status code.
        status: StatusCode,
        /// `detail` from the error body, the raw body, or a generic message.
        detail: String,
    },

    /// JSON parsing failed.
    #[error("JSON parse error: {0}")]
    Parse(#[from] serde_json::Error),

    /// Endpoint URL could not be built.
    #[error("Invalid URL: {0}")]
    InvalidUrl(#[from] url::ParseError),
}

impl ApiError {
    /// Text suitable for a notification banner.
    ///
    /// Backend rejections show only the backend's own message.
    #[must_use]
    pub fn user_message(&self) -> String {
        match self {
            Self::Status { detail, .. } => detail.clone(),
            other => other.to_string(),
        }
    }

    /// Status code of a backend rejection.
    #[must_use]
    pub const fn status(&self) -> Option<StatusCode> {
        match self {
            Self::Status { status, .. } => Some(*status),
            _ => None,
        }
    }
}

/// Operations the storefront needs from the backend.
///
/// Implementations must be cheap to share across tasks; the poller and the
/// UI handlers call into the same instance concurrently.
pub trait StorefrontApi: Send + Sync + 'static {
    /// `GET /api/products/`.
    fn list_products(&self) -> impl Future<Output = Result<Vec<Product>, ApiError>> + Send;

    /// `GET /api/customers/`.
    fn list_customers(&self) -> impl Future<Output = Result<Vec<Customer>, ApiError>> + Send;

    /// `GET /api/orders/`.
    fn list_orders(&self) -> impl Future<Output = Result<Vec<Order>, ApiError>> + Send;

    /// `POST /api/products/`. Returns the created product.
    fn create_product(
        &self,
        product: &NewProduct,
    ) -> impl Future<Output = Result<Product, ApiError>> + Send;

    /// `DELETE /api/products/{id}`.
    ///
    /// Returns whatever status the backend answered with; only transport
    /// failures are errors. Callers decide what counts as success.
    fn delete_product(
        &self,
        product_id: &ProductId,
    ) -> impl Future<Output = Result<StatusCode, ApiError>> + Send;
}

/// Extract a displayable message from an error response body.
///
/// Prefers the JSON `detail` field, then the raw body, then a generic
/// `HTTP error! status: N` message.
pub(crate) fn error_detail(status: StatusCode, body: &str) -> String {
    if let Ok(serde_json::Value::Object(map)) = serde_json::from_str::<serde_json::Value>(body)
        && let Some(detail) = map.get("detail")
    {
        return match detail {
            serde_json::Value::String(s) => s.clone(),
            other => other.to_string(),
        };
    }

    let trimmed = body.trim();
    if trimmed.is_empty() {
        format!("HTTP error! status: {}", status.as_u16())
    } else {
        trimmed.chars().take(500).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_detail_prefers_detail_field() {
        let detail = error_detail(
            StatusCode::BAD_REQUEST,
            r#"{"detail": "Product name already exists"}"#,
        );
        assert_eq!(detail, "Product name already exists");
    }

    #[test]
    fn test_error_detail_structured_detail() {
        let detail = error_detail(
            StatusCode::UNPROCESSABLE_ENTITY,
            r#"{"detail": [{"loc": ["body", "price"], "msg": "field required"}]}"#,
        );
        assert!(detail.contains("field required"));
    }

    #[test]
    fn test_error_detail_falls_back_to_raw_body() {
        let detail = error_detail(StatusCode::INTERNAL_SERVER_ERROR, "Internal Server Error");
        assert_eq!(detail, "Internal Server Error");
    }

    #[test]
    fn test_error_detail_empty_body() {
        let detail = error_detail(StatusCode::BAD_GATEWAY, "");
        assert_eq!(detail, "HTTP error! status: 502");
    }

    #[test]
    fn test_user_message_hides_status_prefix() {
        let err = ApiError::Status {
            status: StatusCode::NOT_FOUND,
            detail: "Product not found".to_string(),
        };
        assert_eq!(err.to_string(), "HTTP 404 Not Found: Product not found");
        assert_eq!(err.user_message(), "Product not found");
        assert_eq!(err.status(), Some(StatusCode::NOT_FOUND));
    }
}
