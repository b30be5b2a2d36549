//! Order entity, order items and order placement.

mod entity;
mod item;
mod service;

pub use entity::Order;
pub use item::OrderItem;
pub use service::OrderService;

use thiserror::Error;

/// Errors that can occur during order operations.
#[derive(Debug, Error)]
pub enum OrderError {
    #[error("Id is required")]
    IdRequired,

    #[error("CustomerId is required")]
    CustomerIdRequired,

    #[error("Items are required")]
    ItemsRequired,

    /// An item has a zero quantity.
    #[error("Quantity must be greater than 0")]
    InvalidQuantity { item_id: String },

    /// Order placement was attempted without items.
    #[error("Order must have at least one item")]
    NoItems,

    /// An item or order total does not fit in the money range.
    #[error("Total exceeds the supported amount")]
    AmountOverflow,
}
