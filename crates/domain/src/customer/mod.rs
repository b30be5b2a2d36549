//! Customer entity, its address value object and its domain events.

mod address;
mod entity;
mod events;
pub mod handlers;

pub use address::{Address, AddressError};
pub use entity::Customer;
pub use events::{
    CUSTOMER_ADDRESS_CHANGED, CUSTOMER_CREATED, CustomerAddressChangedData, CustomerCreatedData,
    CustomerEvent,
};

use thiserror::Error;

use crate::event::HandlerError;

/// Errors that can occur during customer operations.
#[derive(Debug, Error)]
pub enum CustomerError {
    #[error("Id is required")]
    IdRequired,

    #[error("Name is required")]
    NameRequired,

    #[error("Address is mandatory to activate a customer")]
    AddressRequiredForActivation,

    /// A handler for an event raised by the customer failed.
    #[error(transparent)]
    Handler(#[from] HandlerError),
}
