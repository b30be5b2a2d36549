//! Storage records and their mapping to domain entities.
//!
//! Records are flat, storage-shaped copies of entity state. Both the
//! in-memory and PostgreSQL repositories store records and rebuild
//! entities through [`Persisted::from_record`].

use std::sync::Arc;

use common::Money;
use domain::{Address, Customer, DomainError, LineSink, Order, OrderItem, Product, StdoutSink};

use crate::{RepositoryError, Result};

/// An entity that can be stored as a record.
pub trait Persisted: Sized + Send + Sync + 'static {
    /// Storage-shaped state of the entity.
    type Record: Clone + Send + Sync + 'static;

    /// State handed to entities rebuilt from records.
    type Context: Clone + Send + Sync + 'static;

    /// Entity name used in errors, e.g. `"Order"`.
    const ENTITY: &'static str;

    fn default_context() -> Self::Context;

    /// Returns the id of a record.
    fn record_id(record: &Self::Record) -> &str;

    fn to_record(&self) -> Self::Record;

    fn from_record(record: Self::Record, context: &Self::Context) -> Result<Self>;
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CustomerRecord {
    pub id: String,
    pub name: String,
    pub street: Option<String>,
    pub number: Option<u32>,
    pub zip: Option<String>,
    pub city: Option<String>,
    pub active: bool,
    pub reward_points: u64,
}

impl CustomerRecord {
    fn address(&self) -> Result<Option<Address>> {
        match (&self.street, self.number, &self.zip, &self.city) {
            (Some(street), Some(number), Some(zip), Some(city)) => {
                let address = Address::new(street.as_str(), number, zip.as_str(), city.as_str())
                    .map_err(DomainError::from)?;
                Ok(Some(address))
            }
            (None, None, None, None) => Ok(None),
            _ => Err(RepositoryError::InvalidRecord {
                entity: Customer::ENTITY,
                id: self.id.clone(),
                reason: "address is partially stored".to_string(),
            }),
        }
    }
}

/// Loaded customers write their event lines to the context sink.
impl Persisted for Customer {
    type Record = CustomerRecord;
    type Context = Arc<dyn LineSink>;

    const ENTITY: &'static str = "Customer";

    fn default_context() -> Arc<dyn LineSink> {
        Arc::new(StdoutSink)
    }

    fn record_id(record: &CustomerRecord) -> &str {
        &record.id
    }

    fn to_record(&self) -> CustomerRecord {
        let address = self.address();
        CustomerRecord {
            id: self.id().to_string(),
            name: self.name().to_string(),
            street: address.map(|a| a.street().to_string()),
            number: address.map(Address::number),
            zip: address.map(|a| a.zip().to_string()),
            city: address.map(|a| a.city().to_string()),
            active: self.is_active(),
            reward_points: self.reward_points(),
        }
    }

    fn from_record(record: CustomerRecord, sink: &Arc<dyn LineSink>) -> Result<Self> {
        let address = record.address()?;
        let customer = Customer::restore_with_sink(
            record.id,
            record.name,
            address,
            record.active,
            record.reward_points,
            Arc::clone(sink),
        )
        .map_err(DomainError::from)?;
        Ok(customer)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProductRecord {
    pub id: String,
    pub name: String,
    pub price_cents: i64,
}

impl Persisted for Product {
    type Record = ProductRecord;
    type Context = ();

    const ENTITY: &'static str = "Product";

    fn default_context() {}

    fn record_id(record: &ProductRecord) -> &str {
        &record.id
    }

    fn to_record(&self) -> ProductRecord {
        ProductRecord {
            id: self.id().to_string(),
            name: self.name().to_string(),
            price_cents: self.price().cents(),
        }
    }

    fn from_record(record: ProductRecord, _: &()) -> Result<Self> {
        let product = Product::new(record.id, record.name, Money::from_cents(record.price_cents))
            .map_err(DomainError::from)?;
        Ok(product)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OrderItemRecord {
    pub id: String,
    pub name: String,
    pub price_cents: i64,
    pub product_id: String,
    pub quantity: u32,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OrderRecord {
    pub id: String,
    pub customer_id: String,
    pub total_cents: i64,

    /// Items in order position.
    pub items: Vec<OrderItemRecord>,
}

impl Persisted for Order {
    type Record = OrderRecord;
    type Context = ();

    const ENTITY: &'static str = "Order";

    fn default_context() {}

    fn record_id(record: &OrderRecord) -> &str {
        &record.id
    }

    fn to_record(&self) -> OrderRecord {
        OrderRecord {
            id: self.id().to_string(),
            customer_id: self.customer_id().to_string(),
            total_cents: self.total().cents(),
            items: self
                .items()
                .iter()
                .map(|item| OrderItemRecord {
                    id: item.id().to_string(),
                    name: item.name().to_string(),
                    price_cents: item.price().cents(),
                    product_id: item.product_id().to_string(),
                    quantity: item.quantity(),
                })
                .collect(),
        }
    }

    /// The stored total is derived data; the rebuilt order recomputes it.
    fn from_record(record: OrderRecord, _: &()) -> Result<Self> {
        let items = record
            .items
            .into_iter()
            .map(|item| {
                OrderItem::new(
                    item.id,
                    item.name,
                    Money::from_cents(item.price_cents),
                    item.product_id,
                    item.quantity,
                )
            })
            .collect();

        let order = Order::new(record.id, record.customer_id, items).map_err(DomainError::from)?;
        if order.total().cents() != record.total_cents {
            tracing::warn!(
                order_id = order.id(),
                stored = record.total_cents,
                computed = order.total().cents(),
                "stored order total differs from item sum"
            );
        }
        Ok(order)
    }
}
