//! Domain layer for the order-management system.
//!
//! This crate provides:
//! - In-process domain events: [`Event`], [`EventHandler`] and the
//!   synchronous [`EventDispatcher`]
//! - Customer entity raising events on creation and address change
//! - Product and order entities with their services

pub mod customer;
pub mod error;
pub mod event;
pub mod order;
pub mod product;

pub use common::Money;
pub use customer::{Address, AddressError, Customer, CustomerError, CustomerEvent};
pub use error::DomainError;
pub use event::{
    DomainEvent, Event, EventDispatcher, EventHandler, HandlerError, LineSink, MemorySink,
    StdoutSink,
};
pub use order::{Order, OrderError, OrderItem, OrderService};
pub use product::{Product, ProductError, ProductService};
