//! Persistence layer for the order-management domain.
//!
//! Repositories store fully-constructed entities and rebuild them on load.
//! They never see an entity's event dispatcher: loading a customer does not
//! raise its creation event again.

pub mod config;
pub mod error;
pub mod memory;
pub mod postgres;
pub mod record;
pub mod repository;

pub use config::PersistenceConfig;
pub use error::{RepositoryError, Result};
pub use memory::InMemoryRepository;
pub use postgres::{
    PostgresCustomerRepository, PostgresOrderRepository, PostgresProductRepository,
    run_migrations,
};
pub use record::{CustomerRecord, OrderItemRecord, OrderRecord, Persisted, ProductRecord};
pub use repository::{CustomerRepository, OrderRepository, ProductRepository, Repository};
