//! Customer domain events.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::event::{DomainEvent, Event};

use super::Address;

/// Registration key for [`CustomerEvent::CustomerCreated`].
pub const CUSTOMER_CREATED: &str = "CustomerCreatedEvent";

/// Registration key for [`CustomerEvent::CustomerAddressChanged`].
pub const CUSTOMER_ADDRESS_CHANGED: &str = "CustomerAddressChangedEvent";

/// Events raised by a customer.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", content = "data")]
pub enum CustomerEvent {
    /// Customer was created.
    CustomerCreated(Event<CustomerCreatedData>),

    /// Customer address was changed.
    CustomerAddressChanged(Event<CustomerAddressChangedData>),
}

impl DomainEvent for CustomerEvent {
    fn event_type(&self) -> &'static str {
        match self {
            CustomerEvent::CustomerCreated(_) => CUSTOMER_CREATED,
            CustomerEvent::CustomerAddressChanged(_) => CUSTOMER_ADDRESS_CHANGED,
        }
    }

    fn occurred_at(&self) -> DateTime<Utc> {
        match self {
            CustomerEvent::CustomerCreated(event) => event.occurred_at(),
            CustomerEvent::CustomerAddressChanged(event) => event.occurred_at(),
        }
    }
}

/// Data for CustomerCreated event.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CustomerCreatedData {
    pub id: String,
    pub name: String,
}

/// Data for CustomerAddressChanged event.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CustomerAddressChangedData {
    pub id: String,
    pub name: String,

    /// The new address.
    pub address: Address,
}

// Convenience constructors for events
impl CustomerEvent {
    /// Creates a CustomerCreated event.
    pub fn customer_created(id: impl Into<String>, name: impl Into<String>) -> Self {
        CustomerEvent::CustomerCreated(Event::new(CustomerCreatedData {
            id: id.into(),
            name: name.into(),
        }))
    }

    /// Creates a CustomerAddressChanged event.
    pub fn customer_address_changed(
        id: impl Into<String>,
        name: impl Into<String>,
        address: Address,
    ) -> Self {
        CustomerEvent::CustomerAddressChanged(Event::new(CustomerAddressChangedData {
            id: id.into(),
            name: name.into(),
            address,
        }))
    }
}
