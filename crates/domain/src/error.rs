//! Domain error types.

use thiserror::Error;

use crate::customer::{AddressError, CustomerError};
use crate::event::HandlerError;
use crate::order::OrderError;
use crate::product::ProductError;

/// Errors that can occur during domain operations.
#[derive(Debug, Error)]
pub enum DomainError {
    #[error("Customer error: {0}")]
    Customer(#[from] CustomerError),

    #[error("Address error: {0}")]
    Address(#[from] AddressError),

    #[error("Product error: {0}")]
    Product(#[from] ProductError),

    #[error("Order error: {0}")]
    Order(#[from] OrderError),

    #[error("Event handler error: {0}")]
    Handler(#[from] HandlerError),
}
