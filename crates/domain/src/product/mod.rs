//! Product entity and product-wide operations.

mod entity;
mod service;

pub use entity::Product;
pub use service::ProductService;

use thiserror::Error;

/// Errors that can occur during product operations.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ProductError {
    #[error("Id is required")]
    IdRequired,

    #[error("Name is required")]
    NameRequired,

    #[error("Price must be greater than zero")]
    InvalidPrice { cents: i64 },

    /// A computed price does not fit in the money range.
    #[error("Price exceeds the supported amount")]
    PriceOverflow { product_id: String },
}
