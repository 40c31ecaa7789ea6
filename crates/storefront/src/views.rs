//! Display data for the storefront document.
//!
//! View structs hold pre-formatted strings so templates and the CLI only ever
//! print them.

use shopfront_core::{Cart, CartLine, Customer, Order, Product};

use crate::models::{Document, ListState, Notification, ProductForm};

/// Image shown for products without an image reference.
pub const PLACEHOLDER_IMAGE_URL: &str =
    "https://placehold.co/300x200/cccccc/333333?text=No+Image";

pub const LOADING_PRODUCTS_TEXT: &str = "Loading products...";
pub const LOADING_CUSTOMERS_TEXT: &str = "Loading customers...";
pub const LOADING_ORDERS_TEXT: &str = "Loading orders...";

/// Shown instead of an empty product list.
pub const NO_PRODUCTS_TEXT: &str = "No products available yet. Add some above!";

/// Shown for products without a description.
pub const NO_DESCRIPTION_TEXT: &str = "No description available.";

/// Product card display data.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProductView {
    pub id: String,
    pub name: String,
    /// `<name> (ID: <id>)`
    pub heading: String,
    pub description: String,
    pub price: String,
    /// `Stock: <n>`
    pub stock: String,
    pub image_url: String,
}

impl From<&Product> for ProductView {
    fn from(product: &Product) -> Self {
        Self {
            id: product.product_id.to_string(),
            name: product.name.clone(),
            heading: format!("{} (ID: {})", product.name, product.product_id),
            description: product
                .description
                .clone()
                .filter(|d| !d.is_empty())
                .unwrap_or_else(|| NO_DESCRIPTION_TEXT.to_string()),
            price: product.price.to_string(),
            stock: format!("Stock: {}", product.stock_quantity),
            image_url: product
                .image_url
                .clone()
                .filter(|u| !u.is_empty())
                .unwrap_or_else(|| PLACEHOLDER_IMAGE_URL.to_string()),
        }
    }
}

/// `<first> <last> (<email>)`
#[must_use]
pub fn customer_line(customer: &Customer) -> String {
    format!("{} ({})", customer.full_name(), customer.email)
}

/// `Order <id> - Status: <status>`
#[must_use]
pub fn order_line(order: &Order) -> String {
    format!("Order {} - Status: {}", order.order_id, order.status)
}

/// Cart line display data.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CartItemView {
    pub product_id: String,
    pub name: String,
    pub quantity: u32,
    pub subtotal: String,
}

impl CartItemView {
    /// `<name> (x<qty>) - <subtotal>`
    #[must_use]
    pub fn line(&self) -> String {
        format!("{} (x{}) - {}", self.name, self.quantity, self.subtotal)
    }
}

impl From<&CartLine> for CartItemView {
    fn from(line: &CartLine) -> Self {
        Self {
            product_id: line.product_id.to_string(),
            name: line.name.clone(),
            quantity: line.quantity,
            subtotal: line.subtotal().to_string(),
        }
    }
}

/// Cart display data.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CartView {
    pub items: Vec<CartItemView>,
    /// `Total: <total>`
    pub total: String,
    pub item_count: u32,
}

impl From<&Cart> for CartView {
    fn from(cart: &Cart) -> Self {
        Self {
            items: cart.lines().iter().map(CartItemView::from).collect(),
            total: format!("Total: {}", cart.total()),
            item_count: cart.item_count(),
        }
    }
}

/// Notification banner display data.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NotificationView {
    pub message: String,
    /// `message-box <kind>`
    pub class: String,
}

impl From<&Notification> for NotificationView {
    fn from(notification: &Notification) -> Self {
        Self {
            message: notification.message.clone(),
            class: format!("message-box {}", notification.kind.as_str()),
        }
    }
}

/// One rendered list section.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SectionView<T> {
    /// Nothing loaded yet; show the loading placeholder.
    pub loading: bool,
    pub items: Vec<T>,
}

impl<T> SectionView<T> {
    fn from_state<S>(state: &ListState<S>, view: impl Fn(&S) -> T) -> Self {
        match state.items() {
            Some(items) => Self {
                loading: false,
                items: items.iter().map(view).collect(),
            },
            None => Self {
                loading: true,
                items: Vec::new(),
            },
        }
    }
}

/// The whole page, ready for a template.
#[derive(Debug, Clone)]
pub struct DocumentView {
    pub products: SectionView<ProductView>,
    pub customers: SectionView<String>,
    pub orders: SectionView<String>,
    pub cart: CartView,
    pub notification: Option<NotificationView>,
    /// Values to prefill the "add product" form with.
    pub form: ProductForm,
}

impl From<&Document> for DocumentView {
    fn from(doc: &Document) -> Self {
        Self {
            products: SectionView::from_state(&doc.products, |p: &Product| ProductView::from(p)),
            customers: SectionView::from_state(&doc.customers, customer_line),
            orders: SectionView::from_state(&doc.orders, order_line),
            cart: CartView::from(&doc.cart),
            notification: doc.notification.as_ref().map(NotificationView::from),
            form: doc.form.clone(),
        }
    }
}
