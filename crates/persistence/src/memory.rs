use std::sync::Arc;

use async_trait::async_trait;
use tokio::sync::RwLock;

use crate::{Persisted, RepositoryError, Result, repository::Repository};

/// In-memory repository implementation for testing.
///
/// Stores records in creation order and provides the same interface as
/// the PostgreSQL repositories.
pub struct InMemoryRepository<T: Persisted> {
    records: Arc<RwLock<Vec<T::Record>>>,
    context: T::Context,
}

impl<T: Persisted> InMemoryRepository<T> {
    /// Creates a new empty repository.
    pub fn new() -> Self {
        Self::with_context(T::default_context())
    }

    /// Creates a new empty repository that rebuilds entities with `context`.
    pub fn with_context(context: T::Context) -> Self {
        Self {
            records: Arc::new(RwLock::new(Vec::new())),
            context,
        }
    }

    /// Returns the number of stored entities.
    pub async fn len(&self) -> usize {
        self.records.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.records.read().await.is_empty()
    }

    /// Removes every stored entity.
    pub async fn clear(&self) {
        self.records.write().await.clear();
    }
}

impl<T: Persisted> Default for InMemoryRepository<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: Persisted> Clone for InMemoryRepository<T> {
    fn clone(&self) -> Self {
        Self {
            records: Arc::clone(&self.records),
            context: self.context.clone(),
        }
    }
}

#[async_trait]
impl<T: Persisted> Repository<T> for InMemoryRepository<T> {
    async fn create(&self, entity: &T) -> Result<()> {
        let record = entity.to_record();
        let mut records = self.records.write().await;

        let id = T::record_id(&record);
        if records.iter().any(|r| T::record_id(r) == id) {
            return Err(RepositoryError::AlreadyExists {
                entity: T::ENTITY,
                id: id.to_string(),
            });
        }

        records.push(record);
        Ok(())
    }

    async fn update(&self, entity: &T) -> Result<()> {
        let record = entity.to_record();
        let id = T::record_id(&record).to_string();
        let mut records = self.records.write().await;

        match records.iter_mut().find(|r| T::record_id(r) == id) {
            Some(slot) => {
                *slot = record;
                Ok(())
            }
            None => Err(RepositoryError::NotFound {
                entity: T::ENTITY,
                id,
            }),
        }
    }

    async fn find(&self, id: &str) -> Result<T> {
        let record = self
            .records
            .read()
            .await
            .iter()
            .find(|r| T::record_id(r) == id)
            .cloned()
            .ok_or_else(|| RepositoryError::NotFound {
                entity: T::ENTITY,
                id: id.to_string(),
            })?;

        T::from_record(record, &self.context)
    }

    async fn find_all(&self) -> Result<Vec<T>> {
        let records = self.records.read().await.clone();
        records
            .into_iter()
            .map(|record| T::from_record(record, &self.context))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use common::Money;
    use domain::{Address, Customer, LineSink, MemorySink, Order, OrderItem, Product};

    fn order(id: &str, quantity: u32) -> Order {
        let item = OrderItem::new("i1", "Product 1", Money::from_units(10), "p1", quantity);
        Order::new(id, "c1", vec![item]).unwrap()
    }

    #[tokio::test]
    async fn create_and_find_order() {
        let repo = InMemoryRepository::<Order>::new();
        let order = order("123", 2);

        repo.create(&order).await.unwrap();

        let found = repo.find("123").await.unwrap();
        assert_eq!(found, order);
        assert_eq!(found.total(), Money::from_units(20));
        assert_eq!(repo.len().await, 1);
    }

    #[tokio::test]
    async fn create_duplicate_fails() {
        let repo = InMemoryRepository::<Order>::new();
        repo.create(&order("123", 1)).await.unwrap();

        let err = repo.create(&order("123", 1)).await.unwrap_err();

        assert!(matches!(
            err,
            RepositoryError::AlreadyExists { entity: "Order", .. }
        ));
        assert_eq!(repo.len().await, 1);
    }

    #[tokio::test]
    async fn update_replaces_items() {
        let repo = InMemoryRepository::<Order>::new();
        let mut order = order("123", 2);
        repo.create(&order).await.unwrap();

        let extra = OrderItem::new("i2", "Product 2", Money::from_units(5), "p2", 4);
        let mut items = order.items().to_vec();
        items.push(extra);
        order.change_items(items).unwrap();
        repo.update(&order).await.unwrap();

        let found = repo.find("123").await.unwrap();
        assert_eq!(found.items().len(), 2);
        assert_eq!(found.total(), Money::from_units(40));
    }

    #[tokio::test]
    async fn update_missing_fails() {
        let repo = InMemoryRepository::<Product>::new();
        let product = Product::new("p1", "Product 1", Money::from_units(1)).unwrap();

        let err = repo.update(&product).await.unwrap_err();

        assert!(matches!(err, RepositoryError::NotFound { entity: "Product", .. }));
        assert!(repo.is_empty().await);
    }

    #[tokio::test]
    async fn find_missing_order() {
        let repo = InMemoryRepository::<Order>::new();
        let err = repo.find("456ABC").await.unwrap_err();
        assert_eq!(err.to_string(), "Order not found");
    }

    #[tokio::test]
    async fn find_all_in_creation_order() {
        let repo = InMemoryRepository::<Order>::new();
        repo.create(&order("b", 1)).await.unwrap();
        repo.create(&order("a", 1)).await.unwrap();
        repo.create(&order("c", 1)).await.unwrap();

        let ids: Vec<String> = repo
            .find_all()
            .await
            .unwrap()
            .iter()
            .map(|o| o.id().to_string())
            .collect();

        assert_eq!(ids, vec!["b", "a", "c"]);
    }

    #[tokio::test]
    async fn loaded_customer_keeps_state_without_logging() {
        let sink = Arc::new(MemorySink::new());
        let context: Arc<dyn LineSink> = sink.clone();
        let repo = InMemoryRepository::<Customer>::with_context(context);
        let mut customer = Customer::with_sink("c1", "Customer 1", sink.clone()).unwrap();
        customer.set_address(Address::new("Street 1", 1, "Zipcode 1", "City 1").unwrap());
        customer.activate().unwrap();
        customer.add_reward_points(3);

        repo.create(&customer).await.unwrap();
        sink.clear();

        let found = repo.find("c1").await.unwrap();

        assert_eq!(found, customer);
        assert!(found.is_active());
        assert!(sink.lines().is_empty());
    }

    #[tokio::test]
    async fn loaded_customer_logs_address_change_to_context_sink() {
        let sink = Arc::new(MemorySink::new());
        let context: Arc<dyn LineSink> = sink.clone();
        let repo = InMemoryRepository::<Customer>::with_context(context);
        let stored = Customer::with_sink("c1", "Customer 1", Arc::new(MemorySink::new())).unwrap();
        repo.create(&stored).await.unwrap();

        let mut loaded = repo.find("c1").await.unwrap();
        loaded
            .change_address(Address::new("Street 2", 2, "Zipcode 2", "City 2").unwrap())
            .unwrap();

        assert_eq!(
            sink.lines(),
            vec!["Endereço do cliente c1, Customer 1 foi alterado para: Street 2, 2, Zipcode 2, City 2"]
        );
    }

    #[tokio::test]
    async fn clones_share_storage() {
        let repo = InMemoryRepository::<Product>::new();
        let other = repo.clone();
        let product = Product::new("p1", "Product 1", Money::from_units(1)).unwrap();

        other.create(&product).await.unwrap();

        assert_eq!(repo.find("p1").await.unwrap(), product);
        repo.clear().await;
        assert!(other.is_empty().await);
    }
}
