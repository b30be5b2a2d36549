//! PostgreSQL-backed repositories.
//!
//! Each repository maps its entity to the tables created by
//! `migrations/001_create_tables.sql`. Listing queries order rows by the
//! `seq` column, which follows insertion order.

use std::collections::HashMap;
use std::sync::Arc;

use async_trait::async_trait;
use domain::{Customer, LineSink, Order, Product};
use sqlx::{PgConnection, PgPool, Row, postgres::PgRow};

use crate::{
    CustomerRecord, OrderItemRecord, OrderRecord, Persisted, ProductRecord, RepositoryError,
    Result, repository::Repository,
};

/// Runs the database migrations.
pub async fn run_migrations(pool: &PgPool) -> Result<()> {
    sqlx::migrate!("../../migrations").run(pool).await?;
    tracing::info!("database migrations applied");
    Ok(())
}

/// Maps an insert failure, turning a primary-key clash into `AlreadyExists`.
fn insert_error(entity: &'static str, id: &str, error: sqlx::Error) -> RepositoryError {
    if let sqlx::Error::Database(ref db_err) = error
        && db_err.is_unique_violation()
    {
        return RepositoryError::AlreadyExists {
            entity,
            id: id.to_string(),
        };
    }
    RepositoryError::Database(error)
}

fn not_found(entity: &'static str, id: &str) -> RepositoryError {
    RepositoryError::NotFound {
        entity,
        id: id.to_string(),
    }
}

fn out_of_range(entity: &'static str, id: &str, column: &str) -> RepositoryError {
    RepositoryError::InvalidRecord {
        entity,
        id: id.to_string(),
        reason: format!("{column} is out of range"),
    }
}

/// PostgreSQL-backed customer repository.
///
/// Loaded customers write their event lines to the repository's sink.
#[derive(Clone)]
pub struct PostgresCustomerRepository {
    pool: PgPool,
    sink: Arc<dyn LineSink>,
}

impl PostgresCustomerRepository {
    /// Creates a repository whose loaded customers write to standard output.
    pub fn new(pool: PgPool) -> Self {
        Self::with_sink(pool, Customer::default_context())
    }

    pub fn with_sink(pool: PgPool, sink: Arc<dyn LineSink>) -> Self {
        Self { pool, sink }
    }

    /// Gets a reference to the underlying connection pool.
    pub fn pool(&self) -> &PgPool {
        &self.pool
    }

    fn row_to_record(row: PgRow) -> Result<CustomerRecord> {
        let id: String = row.try_get("id")?;
        let number = row
            .try_get::<Option<i32>, _>("number")?
            .map(u32::try_from)
            .transpose()
            .map_err(|_| out_of_range(Customer::ENTITY, &id, "number"))?;
        let reward_points = u64::try_from(row.try_get::<i64, _>("reward_points")?)
            .map_err(|_| out_of_range(Customer::ENTITY, &id, "reward_points"))?;

        Ok(CustomerRecord {
            name: row.try_get("name")?,
            street: row.try_get("street")?,
            number,
            zip: row.try_get("zipcode")?,
            city: row.try_get("city")?,
            active: row.try_get("active")?,
            reward_points,
            id,
        })
    }

    /// Converts the unsigned columns to their SQL types.
    fn sql_columns(record: &CustomerRecord) -> Result<(Option<i32>, i64)> {
        let number = record
            .number
            .map(i32::try_from)
            .transpose()
            .map_err(|_| out_of_range(Customer::ENTITY, &record.id, "number"))?;
        let reward_points = i64::try_from(record.reward_points)
            .map_err(|_| out_of_range(Customer::ENTITY, &record.id, "reward_points"))?;
        Ok((number, reward_points))
    }
}

#[async_trait]
impl Repository<Customer> for PostgresCustomerRepository {
    #[tracing::instrument(skip(self, entity), fields(customer_id = %entity.id()))]
    async fn create(&self, entity: &Customer) -> Result<()> {
        let record = entity.to_record();
        let (number, reward_points) = Self::sql_columns(&record)?;

        sqlx::query(
            r#"
            INSERT INTO customers (id, name, street, number, zipcode, city, active, reward_points)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8)
            "#,
        )
        .bind(&record.id)
        .bind(&record.name)
        .bind(&record.street)
        .bind(number)
        .bind(&record.zip)
        .bind(&record.city)
        .bind(record.active)
        .bind(reward_points)
        .execute(&self.pool)
        .await
        .map_err(|e| insert_error(Customer::ENTITY, &record.id, e))?;

        Ok(())
    }

    #[tracing::instrument(skip(self, entity), fields(customer_id = %entity.id()))]
    async fn update(&self, entity: &Customer) -> Result<()> {
        let record = entity.to_record();
        let (number, reward_points) = Self::sql_columns(&record)?;

        let result = sqlx::query(
            r#"
            UPDATE customers
            SET name = $2, street = $3, number = $4, zipcode = $5, city = $6,
                active = $7, reward_points = $8
            WHERE id = $1
            "#,
        )
        .bind(&record.id)
        .bind(&record.name)
        .bind(&record.street)
        .bind(number)
        .bind(&record.zip)
        .bind(&record.city)
        .bind(record.active)
        .bind(reward_points)
        .execute(&self.pool)
        .await?;

        if result.rows_affected() == 0 {
            return Err(not_found(Customer::ENTITY, &record.id));
        }
        Ok(())
    }

    async fn find(&self, id: &str) -> Result<Customer> {
        let row = sqlx::query(
            r#"
            SELECT id, name, street, number, zipcode, city, active, reward_points
            FROM customers
            WHERE id = $1
            "#,
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?
        .ok_or_else(|| not_found(Customer::ENTITY, id))?;

        Customer::from_record(Self::row_to_record(row)?, &self.sink)
    }

    async fn find_all(&self) -> Result<Vec<Customer>> {
        let rows = sqlx::query(
            r#"
            SELECT id, name, street, number, zipcode, city, active, reward_points
            FROM customers
            ORDER BY seq ASC
            "#,
        )
        .fetch_all(&self.pool)
        .await?;

        rows.into_iter()
            .map(|row| Customer::from_record(Self::row_to_record(row)?, &self.sink))
            .collect()
    }
}

/// PostgreSQL-backed product repository.
#[derive(Clone)]
pub struct PostgresProductRepository {
    pool: PgPool,
}

impl PostgresProductRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    pub fn pool(&self) -> &PgPool {
        &self.pool
    }

    fn row_to_record(row: PgRow) -> Result<ProductRecord> {
        Ok(ProductRecord {
            id: row.try_get("id")?,
            name: row.try_get("name")?,
            price_cents: row.try_get("price_cents")?,
        })
    }
}

#[async_trait]
impl Repository<Product> for PostgresProductRepository {
    #[tracing::instrument(skip(self, entity), fields(product_id = %entity.id()))]
    async fn create(&self, entity: &Product) -> Result<()> {
        let record = entity.to_record();

        sqlx::query("INSERT INTO products (id, name, price_cents) VALUES ($1, $2, $3)")
            .bind(&record.id)
            .bind(&record.name)
            .bind(record.price_cents)
            .execute(&self.pool)
            .await
            .map_err(|e| insert_error(Product::ENTITY, &record.id, e))?;

        Ok(())
    }

    #[tracing::instrument(skip(self, entity), fields(product_id = %entity.id()))]
    async fn update(&self, entity: &Product) -> Result<()> {
        let record = entity.to_record();

        let result = sqlx::query("UPDATE products SET name = $2, price_cents = $3 WHERE id = $1")
            .bind(&record.id)
            .bind(&record.name)
            .bind(record.price_cents)
            .execute(&self.pool)
            .await?;

        if result.rows_affected() == 0 {
            return Err(not_found(Product::ENTITY, &record.id));
        }
        Ok(())
    }

    async fn find(&self, id: &str) -> Result<Product> {
        let row = sqlx::query("SELECT id, name, price_cents FROM products WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await?
            .ok_or_else(|| not_found(Product::ENTITY, id))?;

        Product::from_record(Self::row_to_record(row)?, &())
    }

    async fn find_all(&self) -> Result<Vec<Product>> {
        let rows = sqlx::query("SELECT id, name, price_cents FROM products ORDER BY seq ASC")
            .fetch_all(&self.pool)
            .await?;

        rows.into_iter()
            .map(|row| Product::from_record(Self::row_to_record(row)?, &()))
            .collect()
    }
}

/// PostgreSQL-backed order repository.
///
/// An order and its items are written in a single transaction. Updates
/// replace the whole item list.
#[derive(Clone)]
pub struct PostgresOrderRepository {
    pool: PgPool,
}

impl PostgresOrderRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    pub fn pool(&self) -> &PgPool {
        &self.pool
    }

    async fn insert_items(conn: &mut PgConnection, record: &OrderRecord) -> Result<()> {
        for (line_no, item) in (1_i32..).zip(&record.items) {
            let quantity = i32::try_from(item.quantity)
                .map_err(|_| out_of_range(Order::ENTITY, &record.id, "quantity"))?;

            sqlx::query(
                r#"
                INSERT INTO order_items (order_id, line_no, id, name, price_cents, product_id, quantity)
                VALUES ($1, $2, $3, $4, $5, $6, $7)
                "#,
            )
            .bind(&record.id)
            .bind(line_no)
            .bind(&item.id)
            .bind(&item.name)
            .bind(item.price_cents)
            .bind(&item.product_id)
            .bind(quantity)
            .execute(&mut *conn)
            .await?;
        }
        Ok(())
    }

    fn row_to_item(order_id: &str, row: &PgRow) -> Result<OrderItemRecord> {
        let quantity = u32::try_from(row.try_get::<i32, _>("quantity")?)
            .map_err(|_| out_of_range(Order::ENTITY, order_id, "quantity"))?;

        Ok(OrderItemRecord {
            id: row.try_get("id")?,
            name: row.try_get("name")?,
            price_cents: row.try_get("price_cents")?,
            product_id: row.try_get("product_id")?,
            quantity,
        })
    }

    fn row_to_record(row: PgRow, items: Vec<OrderItemRecord>) -> Result<OrderRecord> {
        Ok(OrderRecord {
            id: row.try_get("id")?,
            customer_id: row.try_get("customer_id")?,
            total_cents: row.try_get("total_cents")?,
            items,
        })
    }
}

#[async_trait]
impl Repository<Order> for PostgresOrderRepository {
    #[tracing::instrument(skip(self, entity), fields(order_id = %entity.id(), items = entity.items().len()))]
    async fn create(&self, entity: &Order) -> Result<()> {
        let record = entity.to_record();
        let mut tx = self.pool.begin().await?;

        sqlx::query("INSERT INTO orders (id, customer_id, total_cents) VALUES ($1, $2, $3)")
            .bind(&record.id)
            .bind(&record.customer_id)
            .bind(record.total_cents)
            .execute(&mut *tx)
            .await
            .map_err(|e| insert_error(Order::ENTITY, &record.id, e))?;

        Self::insert_items(&mut tx, &record).await?;

        tx.commit().await?;
        Ok(())
    }

    #[tracing::instrument(skip(self, entity), fields(order_id = %entity.id(), items = entity.items().len()))]
    async fn update(&self, entity: &Order) -> Result<()> {
        let record = entity.to_record();
        let mut tx = self.pool.begin().await?;

        let result =
            sqlx::query("UPDATE orders SET customer_id = $2, total_cents = $3 WHERE id = $1")
                .bind(&record.id)
                .bind(&record.customer_id)
                .bind(record.total_cents)
                .execute(&mut *tx)
                .await?;

        if result.rows_affected() == 0 {
            return Err(not_found(Order::ENTITY, &record.id));
        }

        sqlx::query("DELETE FROM order_items WHERE order_id = $1")
            .bind(&record.id)
            .execute(&mut *tx)
            .await?;

        Self::insert_items(&mut tx, &record).await?;

        tx.commit().await?;
        Ok(())
    }

    async fn find(&self, id: &str) -> Result<Order> {
        let row = sqlx::query("SELECT id, customer_id, total_cents FROM orders WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await?
            .ok_or_else(|| not_found(Order::ENTITY, id))?;

        let items = sqlx::query(
            r#"
            SELECT id, name, price_cents, product_id, quantity
            FROM order_items
            WHERE order_id = $1
            ORDER BY line_no ASC
            "#,
        )
        .bind(id)
        .fetch_all(&self.pool)
        .await?
        .iter()
        .map(|row| Self::row_to_item(id, row))
        .collect::<Result<Vec<_>>>()?;

        Order::from_record(Self::row_to_record(row, items)?, &())
    }

    async fn find_all(&self) -> Result<Vec<Order>> {
        let rows = sqlx::query("SELECT id, customer_id, total_cents FROM orders ORDER BY seq ASC")
            .fetch_all(&self.pool)
            .await?;

        let item_rows = sqlx::query(
            r#"
            SELECT order_id, id, name, price_cents, product_id, quantity
            FROM order_items
            ORDER BY order_id, line_no ASC
            "#,
        )
        .fetch_all(&self.pool)
        .await?;

        let mut items: HashMap<String, Vec<OrderItemRecord>> = HashMap::new();
        for row in &item_rows {
            let order_id: String = row.try_get("order_id")?;
            let item = Self::row_to_item(&order_id, row)?;
            items.entry(order_id).or_default().push(item);
        }

        rows.into_iter()
            .map(|row| {
                let id: String = row.try_get("id")?;
                let order_items = items.remove(&id).unwrap_or_default();
                Order::from_record(Self::row_to_record(row, order_items)?, &())
            })
            .collect()
    }
}
