//! Storage traits and implementations.
//!
//! Handlers talk to these traits only. Production wires up
//! [`postgres::PostgresRepository`] over one shared connection pool; tests
//! wire up [`memory::InMemoryRepository`].
//!
//! Trait methods report "not there" as `Ok(None)` or `Ok(false)`, never as
//! an error, so each route keeps its own choice of 400 vs 404.

pub mod memory;
pub mod postgres;

use async_trait::async_trait;
use cucina_types::{Category, CategoryId, ItemId, MenuItem, Order, OrderId, User, UserId};
use thiserror::Error;

/// Failure inside a storage backend.
#[derive(Debug, Error)]
pub enum RepositoryError {
    /// The database rejected or could not execute the operation
    #[error("database error: {0}")]
    Database(String),
}

impl From<sqlx::Error> for RepositoryError {
    fn from(err: sqlx::Error) -> Self {
        Self::Database(err.to_string())
    }
}

/// Convenience alias for repository results.
pub type RepoResult<T> = Result<T, RepositoryError>;

/// Storage for menu items.
#[async_trait]
pub trait ItemRepository: Send + Sync {
    /// All menu items
    async fn list(&self) -> RepoResult<Vec<MenuItem>>;

    /// Menu items in one category
    async fn list_by_category(&self, category: &str) -> RepoResult<Vec<MenuItem>>;

    /// One item, if present
    async fn get(&self, id: ItemId) -> RepoResult<Option<MenuItem>>;

    /// Store a new item
    async fn insert(&self, item: MenuItem) -> RepoResult<()>;

    /// Replace an item; `false` when absent
    async fn update(&self, item: MenuItem) -> RepoResult<bool>;

    /// Delete an item; `false` when absent
    async fn delete(&self, id: ItemId) -> RepoResult<bool>;
}

/// Storage for orders.
#[async_trait]
pub trait OrderRepository: Send + Sync {
    /// All orders
    async fn list(&self) -> RepoResult<Vec<Order>>;

    /// Orders placed by one customer
    async fn list_for_customer(&self, username: &str) -> RepoResult<Vec<Order>>;

    /// One order, if present
    async fn get(&self, id: OrderId) -> RepoResult<Option<Order>>;

    /// Store a new order
    async fn insert(&self, order: Order) -> RepoResult<()>;

    /// Replace an order; `false` when absent
    async fn update(&self, order: Order) -> RepoResult<bool>;

    /// Delete an order; `false` when absent
    async fn delete(&self, id: OrderId) -> RepoResult<bool>;
}

/// Storage for user accounts.
#[async_trait]
pub trait UserRepository: Send + Sync {
    /// All accounts
    async fn list(&self) -> RepoResult<Vec<User>>;

    /// One account by id, if present
    async fn get(&self, id: UserId) -> RepoResult<Option<User>>;

    /// One account by username, if present
    async fn find_by_username(&self, username: &str) -> RepoResult<Option<User>>;

    /// Store a new account
    async fn insert(&self, user: User) -> RepoResult<()>;

    /// Replace an account; `false` when absent
    async fn update(&self, user: User) -> RepoResult<bool>;

    /// Delete an account; `false` when absent
    async fn delete(&self, id: UserId) -> RepoResult<bool>;
}

/// Storage for menu categories.
#[async_trait]
pub trait CategoryRepository: Send + Sync {
    /// All categories
    async fn list(&self) -> RepoResult<Vec<Category>>;

    /// Store a new category
    async fn insert(&self, category: Category) -> RepoResult<()>;

    /// Rename a category; `false` when absent
    async fn rename(&self, id: CategoryId, name: &str) -> RepoResult<bool>;

    /// Delete a category; `false` when absent
    async fn delete(&self, id: CategoryId) -> RepoResult<bool>;
}
