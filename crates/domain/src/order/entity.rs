//! Order entity.

use common::Money;

use super::{OrderError, OrderItem};

/// An order placed by a customer.
///
/// Always holds at least one item, and every item has a positive quantity.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Order {
    id: String,
    customer_id: String,
    items: Vec<OrderItem>,
    total: Money,
}

impl Order {
    /// Creates a validated order.
    pub fn new(
        id: impl Into<String>,
        customer_id: impl Into<String>,
        items: Vec<OrderItem>,
    ) -> Result<Self, OrderError> {
        let id = id.into();
        let customer_id = customer_id.into();

        if id.is_empty() {
            return Err(OrderError::IdRequired);
        }
        if customer_id.is_empty() {
            return Err(OrderError::CustomerIdRequired);
        }
        let total = validate_items(&items)?;

        Ok(Self {
            id,
            customer_id,
            items,
            total,
        })
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn customer_id(&self) -> &str {
        &self.customer_id
    }

    pub fn items(&self) -> &[OrderItem] {
        &self.items
    }

    /// Returns the sum of all item totals.
    pub fn total(&self) -> Money {
        self.total
    }

    /// Replaces every item. Invalid item lists are rejected and nothing changes.
    pub fn change_items(&mut self, items: Vec<OrderItem>) -> Result<(), OrderError> {
        self.total = validate_items(&items)?;
        self.items = items;
        Ok(())
    }
}

/// Checks the item list and returns its total.
fn validate_items(items: &[OrderItem]) -> Result<Money, OrderError> {
    if items.is_empty() {
        return Err(OrderError::ItemsRequired);
    }
    if let Some(item) = items.iter().find(|item| item.quantity() == 0) {
        return Err(OrderError::InvalidQuantity {
            item_id: item.id().to_string(),
        });
    }

    let totals = items
        .iter()
        .map(OrderItem::total)
        .collect::<Result<Vec<_>, _>>()?;
    Money::checked_sum(totals).ok_or(OrderError::AmountOverflow)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn item(id: &str, units: i64, quantity: u32) -> OrderItem {
        OrderItem::new(id, format!("Item {id}"), Money::from_units(units), "p1", quantity)
    }

    #[test]
    fn validation_errors() {
        let err = Order::new("", "123", vec![item("i1", 10, 1)]).unwrap_err();
        assert_eq!(err.to_string(), "Id is required");

        let err = Order::new("123", "", vec![item("i1", 10, 1)]).unwrap_err();
        assert_eq!(err.to_string(), "CustomerId is required");

        let err = Order::new("123", "123", vec![]).unwrap_err();
        assert_eq!(err.to_string(), "Items are required");

        let err = Order::new("123", "123", vec![item("i1", 10, 0)]).unwrap_err();
        assert_eq!(err.to_string(), "Quantity must be greater than 0");
    }

    #[test]
    fn total_sums_items() {
        let order = Order::new("o1", "c1", vec![item("i1", 100, 2)]).unwrap();
        assert_eq!(order.total(), Money::from_units(200));

        let order = Order::new("o1", "c1", vec![item("i1", 100, 2), item("i2", 200, 2)]).unwrap();
        assert_eq!(order.total(), Money::from_units(600));
    }

    #[test]
    fn change_items_recomputes_total() {
        let mut order = Order::new("o1", "c1", vec![item("i1", 10, 2)]).unwrap();

        order
            .change_items(vec![item("i1", 10, 2), item("i2", 5, 1)])
            .unwrap();

        assert_eq!(order.items().len(), 2);
        assert_eq!(order.total(), Money::from_units(25));
    }

    #[test]
    fn change_items_rejects_invalid_lists() {
        let mut order = Order::new("o1", "c1", vec![item("i1", 10, 2)]).unwrap();

        assert!(matches!(
            order.change_items(vec![]),
            Err(OrderError::ItemsRequired)
        ));
        assert!(matches!(
            order.change_items(vec![item("i2", 10, 0)]),
            Err(OrderError::InvalidQuantity { ref item_id }) if item_id == "i2"
        ));
        assert_eq!(order.items(), &[item("i1", 10, 2)]);
        assert_eq!(order.total(), Money::from_units(20));
    }

    #[test]
    fn overflowing_totals_are_rejected() {
        let huge = |id: &str, quantity| {
            OrderItem::new(id, "Huge", Money::from_cents(i64::MAX / 2), "p1", quantity)
        };

        let err = Order::new("o1", "c1", vec![huge("i1", 1), huge("i2", 1), huge("i3", 1)])
            .unwrap_err();
        assert!(matches!(err, OrderError::AmountOverflow));

        let err = Order::new("o1", "c1", vec![item("i1", 10, 1), huge("i2", 3)]).unwrap_err();
        assert!(matches!(err, OrderError::AmountOverflow));

        let mut order = Order::new("o1", "c1", vec![item("i1", 10, 2)]).unwrap();
        assert!(matches!(
            order.change_items(vec![huge("i1", 1), huge("i2", 1), huge("i3", 1)]),
            Err(OrderError::AmountOverflow)
        ));
        assert_eq!(order.total(), Money::from_units(20));
    }
}
