//! `PostgreSQL` repository over one shared connection pool.
//!
//! Order lines are stored as JSONB; everything else is plain columns.
//! Connections are acquired per statement from the pool and released when
//! the statement completes.

use super::{
    CategoryRepository, ItemRepository, OrderRepository, RepoResult, RepositoryError,
    UserRepository,
};
use crate::config::PostgresConfig;
use async_trait::async_trait;
use cucina_types::{
    Category, CategoryId, ItemId, MenuItem, Order, OrderId, OrderStatus, User, UserId,
};
use sqlx::postgres::{PgPool, PgPoolOptions, PgRow};
use sqlx::Row;
use std::time::Duration;
use uuid::Uuid;

/// Repository backed by a `PostgreSQL` pool.
#[derive(Debug, Clone)]
pub struct PostgresRepository {
    pool: PgPool,
}

impl PostgresRepository {
    /// Wrap an existing pool
    #[must_use]
    pub const fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Connect a pool per the configuration
    ///
    /// # Errors
    ///
    /// Returns an error when the database is unreachable.
    pub async fn connect(config: &PostgresConfig) -> RepoResult<Self> {
        let pool = PgPoolOptions::new()
            .max_connections(config.max_connections)
            .min_connections(config.min_connections)
            .acquire_timeout(Duration::from_secs(config.connect_timeout))
            .idle_timeout(Duration::from_secs(config.idle_timeout))
            .connect(&config.url)
            .await?;

        Ok(Self::new(pool))
    }

    /// Access the underlying pool (readiness checks)
    #[must_use]
    pub const fn pool(&self) -> &PgPool {
        &self.pool
    }

    /// Create the tables if they don't already exist.
    ///
    /// # Errors
    ///
    /// Returns an error when a statement fails.
    pub async fn ensure_schema(&self) -> RepoResult<()> {
        sqlx::query(
            r"
            CREATE TABLE IF NOT EXISTS menu_items (
                id UUID PRIMARY KEY,
                item_name TEXT NOT NULL,
                description TEXT,
                category TEXT NOT NULL,
                price_cents BIGINT NOT NULL,
                image_src TEXT,
                is_available BOOLEAN NOT NULL DEFAULT TRUE
            )
            ",
        )
        .execute(&self.pool)
        .await?;

        sqlx::query(
            r"
            CREATE TABLE IF NOT EXISTS orders (
                id UUID PRIMARY KEY,
                customer TEXT NOT NULL,
                items JSONB NOT NULL,
                total_cents BIGINT NOT NULL,
                status TEXT NOT NULL,
                is_archived BOOLEAN NOT NULL DEFAULT FALSE,
                created_at TIMESTAMPTZ NOT NULL
            )
            ",
        )
        .execute(&self.pool)
        .await?;

        sqlx::query("CREATE INDEX IF NOT EXISTS idx_orders_customer ON orders(customer)")
            .execute(&self.pool)
            .await?;

        sqlx::query(
            r"
            CREATE TABLE IF NOT EXISTS users (
                id UUID PRIMARY KEY,
                username TEXT NOT NULL UNIQUE,
                password TEXT NOT NULL,
                first_name TEXT NOT NULL,
                last_name TEXT NOT NULL,
                email TEXT NOT NULL,
                address TEXT,
                phone TEXT,
                is_admin BOOLEAN NOT NULL DEFAULT FALSE
            )
            ",
        )
        .execute(&self.pool)
        .await?;

        sqlx::query(
            r"
            CREATE TABLE IF NOT EXISTS categories (
                id UUID PRIMARY KEY,
                name TEXT NOT NULL UNIQUE
            )
            ",
        )
        .execute(&self.pool)
        .await?;

        Ok(())
    }
}

fn item_from_row(row: &PgRow) -> Result<MenuItem, sqlx::Error> {
    Ok(MenuItem {
        id: ItemId::from_uuid(row.try_get::<Uuid, _>("id")?),
        item_name: row.try_get("item_name")?,
        description: row.try_get("description")?,
        category: row.try_get("category")?,
        price_cents: row.try_get("price_cents")?,
        image_src: row.try_get("image_src")?,
        is_available: row.try_get("is_available")?,
    })
}

fn order_from_row(row: &PgRow) -> Result<Order, RepositoryError> {
    let items: serde_json::Value = row.try_get("items")?;
    let items = serde_json::from_value(items)
        .map_err(|e| RepositoryError::Database(format!("bad order lines: {e}")))?;

    let status: String = row.try_get("status")?;
    let status: OrderStatus = status
        .parse()
        .map_err(RepositoryError::Database)?;

    Ok(Order {
        id: OrderId::from_uuid(row.try_get::<Uuid, _>("id")?),
        customer: row.try_get("customer")?,
        items,
        total_cents: row.try_get("total_cents")?,
        status,
        is_archived: row.try_get("is_archived")?,
        created_at: row.try_get("created_at")?,
    })
}

fn user_from_row(row: &PgRow) -> Result<User, sqlx::Error> {
    Ok(User {
        id: UserId::from_uuid(row.try_get::<Uuid, _>("id")?),
        username: row.try_get("username")?,
        password: row.try_get("password")?,
        first_name: row.try_get("first_name")?,
        last_name: row.try_get("last_name")?,
        email: row.try_get("email")?,
        address: row.try_get("address")?,
        phone: row.try_get("phone")?,
        is_admin: row.try_get("is_admin")?,
    })
}

fn lines_to_json(order: &Order) -> Result<serde_json::Value, RepositoryError> {
    serde_json::to_value(&order.items)
        .map_err(|e| RepositoryError::Database(format!("bad order lines: {e}")))
}

#[async_trait]
impl ItemRepository for PostgresRepository {
    async fn list(&self) -> RepoResult<Vec<MenuItem>> {
        let rows = sqlx::query("SELECT * FROM menu_items ORDER BY item_name")
            .fetch_all(&self.pool)
            .await?;
        rows.iter().map(|r| item_from_row(r).map_err(Into::into)).collect()
    }

    async fn list_by_category(&self, category: &str) -> RepoResult<Vec<MenuItem>> {
        let rows = sqlx::query("SELECT * FROM menu_items WHERE category = $1 ORDER BY item_name")
            .bind(category)
            .fetch_all(&self.pool)
            .await?;
        rows.iter().map(|r| item_from_row(r).map_err(Into::into)).collect()
    }

    async fn get(&self, id: ItemId) -> RepoResult<Option<MenuItem>> {
        let row = sqlx::query("SELECT * FROM menu_items WHERE id = $1")
            .bind(id.as_uuid())
            .fetch_optional(&self.pool)
            .await?;
        row.as_ref().map(item_from_row).transpose().map_err(Into::into)
    }

    async fn insert(&self, item: MenuItem) -> RepoResult<()> {
        sqlx::query(
            r"
            INSERT INTO menu_items
                (id, item_name, description, category, price_cents, image_src, is_available)
            VALUES ($1, $2, $3, $4, $5, $6, $7)
            ",
        )
        .bind(item.id.as_uuid())
        .bind(&item.item_name)
        .bind(&item.description)
        .bind(&item.category)
        .bind(item.price_cents)
        .bind(&item.image_src)
        .bind(item.is_available)
        .execute(&self.pool)
        .await?;
        Ok(())
    }

    async fn update(&self, item: MenuItem) -> RepoResult<bool> {
        let result = sqlx::query(
            r"
            UPDATE menu_items
            SET item_name = $2, description = $3, category = $4,
                price_cents = $5, image_src = $6, is_available = $7
            WHERE id = $1
            ",
        )
        .bind(item.id.as_uuid())
        .bind(&item.item_name)
        .bind(&item.description)
        .bind(&item.category)
        .bind(item.price_cents)
        .bind(&item.image_src)
        .bind(item.is_available)
        .execute(&self.pool)
        .await?;
        Ok(result.rows_affected() > 0)
    }

    async fn delete(&self, id: ItemId) -> RepoResult<bool> {
        let result = sqlx::query("DELETE FROM menu_items WHERE id = $1")
            .bind(id.as_uuid())
            .execute(&self.pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }
}

#[async_trait]
impl OrderRepository for PostgresRepository {
    async fn list(&self) -> RepoResult<Vec<Order>> {
        let rows = sqlx::query("SELECT * FROM orders ORDER BY created_at")
            .fetch_all(&self.pool)
            .await?;
        rows.iter().map(order_from_row).collect()
    }

    async fn list_for_customer(&self, username: &str) -> RepoResult<Vec<Order>> {
        let rows = sqlx::query("SELECT * FROM orders WHERE customer = $1 ORDER BY created_at")
            .bind(username)
            .fetch_all(&self.pool)
            .await?;
        rows.iter().map(order_from_row).collect()
    }

    async fn get(&self, id: OrderId) -> RepoResult<Option<Order>> {
        let row = sqlx::query("SELECT * FROM orders WHERE id = $1")
            .bind(id.as_uuid())
            .fetch_optional(&self.pool)
            .await?;
        row.as_ref().map(order_from_row).transpose()
    }

    async fn insert(&self, order: Order) -> RepoResult<()> {
        sqlx::query(
            r"
            INSERT INTO orders
                (id, customer, items, total_cents, status, is_archived, created_at)
            VALUES ($1, $2, $3, $4, $5, $6, $7)
            ",
        )
        .bind(order.id.as_uuid())
        .bind(&order.customer)
        .bind(lines_to_json(&order)?)
        .bind(order.total_cents)
        .bind(order.status.as_str())
        .bind(order.is_archived)
        .bind(order.created_at)
        .execute(&self.pool)
        .await?;
        Ok(())
    }

    async fn update(&self, order: Order) -> RepoResult<bool> {
        let result = sqlx::query(
            r"
            UPDATE orders
            SET customer = $2, items = $3, total_cents = $4,
                status = $5, is_archived = $6
            WHERE id = $1
            ",
        )
        .bind(order.id.as_uuid())
        .bind(&order.customer)
        .bind(lines_to_json(&order)?)
        .bind(order.total_cents)
        .bind(order.status.as_str())
        .bind(order.is_archived)
        .execute(&self.pool)
        .await?;
        Ok(result.rows_affected() > 0)
    }

    async fn delete(&self, id: OrderId) -> RepoResult<bool> {
        let result = sqlx::query("DELETE FROM orders WHERE id = $1")
            .bind(id.as_uuid())
            .execute(&self.pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }
}

#[async_trait]
impl UserRepository for PostgresRepository {
    async fn list(&self) -> RepoResult<Vec<User>> {
        let rows = sqlx::query("SELECT * FROM users ORDER BY username")
            .fetch_all(&self.pool)
            .await?;
        rows.iter().map(|r| user_from_row(r).map_err(Into::into)).collect()
    }

    async fn get(&self, id: UserId) -> RepoResult<Option<User>> {
        let row = sqlx::query("SELECT * FROM users WHERE id = $1")
            .bind(id.as_uuid())
            .fetch_optional(&self.pool)
            .await?;
        row.as_ref().map(user_from_row).transpose().map_err(Into::into)
    }

    async fn find_by_username(&self, username: &str) -> RepoResult<Option<User>> {
        let row = sqlx::query("SELECT * FROM users WHERE username = $1")
            .bind(username)
            .fetch_optional(&self.pool)
            .await?;
        row.as_ref().map(user_from_row).transpose().map_err(Into::into)
    }

    async fn insert(&self, user: User) -> RepoResult<()> {
        sqlx::query(
            r"
            INSERT INTO users
                (id, username, password, first_name, last_name, email, address, phone, is_admin)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9)
            ",
        )
        .bind(user.id.as_uuid())
        .bind(&user.username)
        .bind(&user.password)
        .bind(&user.first_name)
        .bind(&user.last_name)
        .bind(&user.email)
        .bind(&user.address)
        .bind(&user.phone)
        .bind(user.is_admin)
        .execute(&self.pool)
        .await?;
        Ok(())
    }

    async fn update(&self, user: User) -> RepoResult<bool> {
        let result = sqlx::query(
            r"
            UPDATE users
            SET username = $2, password = $3, first_name = $4, last_name = $5,
                email = $6, address = $7, phone = $8, is_admin = $9
            WHERE id = $1
            ",
        )
        .bind(user.id.as_uuid())
        .bind(&user.username)
        .bind(&user.password)
        .bind(&user.first_name)
        .bind(&user.last_name)
        .bind(&user.email)
        .bind(&user.address)
        .bind(&user.phone)
        .bind(user.is_admin)
        .execute(&self.pool)
        .await?;
        Ok(result.rows_affected() > 0)
    }

    async fn delete(&self, id: UserId) -> RepoResult<bool> {
        let result = sqlx::query("DELETE FROM users WHERE id = $1")
            .bind(id.as_uuid())
            .execute(&self.pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }
}

#[async_trait]
impl CategoryRepository for PostgresRepository {
    async fn list(&self) -> RepoResult<Vec<Category>> {
        let rows = sqlx::query("SELECT * FROM categories ORDER BY name")
            .fetch_all(&self.pool)
            .await?;
        rows.iter()
            .map(|row| {
                Ok(Category {
                    id: CategoryId::from_uuid(row.try_get::<Uuid, _>("id")?),
                    name: row.try_get("name")?,
                })
            })
            .collect()
    }

    async fn insert(&self, category: Category) -> RepoResult<()> {
        sqlx::query("INSERT INTO categories (id, name) VALUES ($1, $2)")
            .bind(category.id.as_uuid())
            .bind(&category.name)
            .execute(&self.pool)
            .await?;
        Ok(())
    }

    async fn rename(&self, id: CategoryId, name: &str) -> RepoResult<bool> {
        let result = sqlx::query("UPDATE categories SET name = $2 WHERE id = $1")
            .bind(id.as_uuid())
            .bind(name)
            .execute(&self.pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }

    async fn delete(&self, id: CategoryId) -> RepoResult<bool> {
        let result = sqlx::query("DELETE FROM categories WHERE id = $1")
            .bind(id.as_uuid())
            .execute(&self.pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }
}
