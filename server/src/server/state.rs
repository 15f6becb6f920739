//! Shared application state for handlers.

use crate::repository::memory::InMemoryRepository;
use crate::repository::postgres::PostgresRepository;
use crate::repository::{
    CategoryRepository, ItemRepository, OrderRepository, UserRepository,
};
use std::sync::Arc;

/// Handler state: one trait object per resource.
///
/// All four usually point at the same backing store; the split keeps
/// handlers written against the narrowest trait.
#[derive(Clone)]
pub struct AppState {
    /// Menu item storage
    pub items: Arc<dyn ItemRepository>,

    /// Order storage
    pub orders: Arc<dyn OrderRepository>,

    /// User account storage
    pub users: Arc<dyn UserRepository>,

    /// Category storage
    pub categories: Arc<dyn CategoryRepository>,
}

impl AppState {
    /// State over a `PostgreSQL` repository
    #[must_use]
    pub fn postgres(repository: PostgresRepository) -> Self {
        let repository = Arc::new(repository);
        Self {
            items: Arc::clone(&repository) as Arc<dyn ItemRepository>,
            orders: Arc::clone(&repository) as Arc<dyn OrderRepository>,
            users: Arc::clone(&repository) as Arc<dyn UserRepository>,
            categories: repository as Arc<dyn CategoryRepository>,
        }
    }

    /// State over a fresh in-memory repository (tests, local development)
    #[must_use]
    pub fn in_memory() -> Self {
        let repository = Arc::new(InMemoryRepository::new());
        Self {
            items: Arc::clone(&repository) as Arc<dyn ItemRepository>,
            orders: Arc::clone(&repository) as Arc<dyn OrderRepository>,
            users: Arc::clone(&repository) as Arc<dyn UserRepository>,
            categories: repository as Arc<dyn CategoryRepository>,
        }
    }

    /// Whether the backing store answers queries
    pub async fn storage_ready(&self) -> bool {
        self.items.list().await.is_ok()
    }
}

impl std::fmt::Debug for AppState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AppState").finish_non_exhaustive()
    }
}
