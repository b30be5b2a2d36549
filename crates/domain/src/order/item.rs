//! Order line item.

use common::Money;
use serde::{Deserialize, Serialize};

use super::OrderError;

/// An item in an order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OrderItem {
    id: String,
    name: String,

    /// Price per unit.
    price: Money,
    product_id: String,
    quantity: u32,
}

impl OrderItem {
    /// Creates a new order item.
    pub fn new(
        id: impl Into<String>,
        name: impl Into<String>,
        price: Money,
        product_id: impl Into<String>,
        quantity: u32,
    ) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            price,
            product_id: product_id.into(),
            quantity,
        }
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn price(&self) -> Money {
        self.price
    }

    pub fn product_id(&self) -> &str {
        &self.product_id
    }

    pub fn quantity(&self) -> u32 {
        self.quantity
    }

    /// Returns the total price for this item (price * quantity).
    pub fn total(&self) -> Result<Money, OrderError> {
        self.price
            .checked_mul(self.quantity)
            .ok_or(OrderError::AmountOverflow)
    }
}
