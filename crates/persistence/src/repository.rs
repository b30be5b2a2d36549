//! Repository traits.

use async_trait::async_trait;
use domain::{Customer, Order, Product};

use crate::Result;

/// Core trait for entity repositories.
///
/// All implementations must be thread-safe (Send + Sync).
#[async_trait]
pub trait Repository<T: Send + Sync>: Send + Sync {
    /// Stores a new entity.
    ///
    /// Fails with `AlreadyExists` if an entity with the same id is stored.
    async fn create(&self, entity: &T) -> Result<()>;

    /// Replaces a stored entity.
    ///
    /// Fails with `NotFound` if no entity with the same id is stored.
    async fn update(&self, entity: &T) -> Result<()>;

    /// Loads an entity by id.
    async fn find(&self, id: &str) -> Result<T>;

    /// Loads every entity, in creation order.
    async fn find_all(&self) -> Result<Vec<T>>;
}

pub trait CustomerRepository: Repository<Customer> {}

impl<R: Repository<Customer> + ?Sized> CustomerRepository for R {}

pub trait ProductRepository: Repository<Product> {}

impl<R: Repository<Product> + ?Sized> ProductRepository for R {}

pub trait OrderRepository: Repository<Order> {}

impl<R: Repository<Order> + ?Sized> OrderRepository for R {}
