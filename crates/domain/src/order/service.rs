//! Order service: totals and order placement.

use common::Money;
use uuid::Uuid;

use crate::customer::Customer;

use super::{Order, OrderError, OrderItem};

/// Stateless operations over orders.
pub struct OrderService;

impl OrderService {
    /// Returns the sum of the totals of `orders`.
    pub fn total(orders: &[Order]) -> Money {
        orders.iter().map(Order::total).sum()
    }

    /// Places an order for `customer` and credits reward points.
    ///
    /// The order gets a fresh UUID. The customer earns half of the order
    /// total, in whole currency units, as reward points.
    #[tracing::instrument(skip(customer, items), fields(customer_id = %customer.id(), items = items.len()))]
    pub fn place_order(customer: &mut Customer, items: Vec<OrderItem>) -> Result<Order, OrderError> {
        if items.is_empty() {
            return Err(OrderError::NoItems);
        }

        let order = Order::new(Uuid::new_v4().to_string(), customer.id(), items)?;
        customer.add_reward_points(reward_points_for(order.total()));

        tracing::info!(order_id = %order.id(), total = %order.total(), "order placed");
        Ok(order)
    }
}

fn reward_points_for(total: Money) -> u64 {
    u64::try_from(total.units() / 2).unwrap_or(0)
}
