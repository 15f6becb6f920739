//! In-memory repository for tests and local development.

use super::{
    CategoryRepository, ItemRepository, OrderRepository, RepoResult, UserRepository,
};
use async_trait::async_trait;
use cucina_types::{Category, CategoryId, ItemId, MenuItem, Order, OrderId, User, UserId};
use std::collections::HashMap;
use std::sync::{PoisonError, RwLock};

/// One store backing all four repository traits.
///
/// Shared between handlers behind an `Arc`, so all traits see the same data.
#[derive(Debug, Default)]
pub struct InMemoryRepository {
    items: RwLock<HashMap<ItemId, MenuItem>>,
    orders: RwLock<HashMap<OrderId, Order>>,
    users: RwLock<HashMap<UserId, User>>,
    categories: RwLock<HashMap<CategoryId, Category>>,
}

impl InMemoryRepository {
    /// An empty store
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    fn read<T>(lock: &RwLock<T>) -> std::sync::RwLockReadGuard<'_, T> {
        lock.read().unwrap_or_else(PoisonError::into_inner)
    }

    fn write<T>(lock: &RwLock<T>) -> std::sync::RwLockWriteGuard<'_, T> {
        lock.write().unwrap_or_else(PoisonError::into_inner)
    }
}

#[async_trait]
impl ItemRepository for InMemoryRepository {
    async fn list(&self) -> RepoResult<Vec<MenuItem>> {
        let mut items: Vec<MenuItem> = Self::read(&self.items).values().cloned().collect();
        items.sort_by(|a, b| a.item_name.cmp(&b.item_name));
        Ok(items)
    }

    async fn list_by_category(&self, category: &str) -> RepoResult<Vec<MenuItem>> {
        let mut items: Vec<MenuItem> = Self::read(&self.items)
            .values()
            .filter(|i| i.category == category)
            .cloned()
            .collect();
        items.sort_by(|a, b| a.item_name.cmp(&b.item_name));
        Ok(items)
    }

    async fn get(&self, id: ItemId) -> RepoResult<Option<MenuItem>> {
        Ok(Self::read(&self.items).get(&id).cloned())
    }

    async fn insert(&self, item: MenuItem) -> RepoResult<()> {
        Self::write(&self.items).insert(item.id, item);
        Ok(())
    }

    async fn update(&self, item: MenuItem) -> RepoResult<bool> {
        let mut items = Self::write(&self.items);
        if items.contains_key(&item.id) {
            items.insert(item.id, item);
            Ok(true)
        } else {
            Ok(false)
        }
    }

    async fn delete(&self, id: ItemId) -> RepoResult<bool> {
        Ok(Self::write(&self.items).remove(&id).is_some())
    }
}

#[async_trait]
impl OrderRepository for InMemoryRepository {
    async fn list(&self) -> RepoResult<Vec<Order>> {
        let mut orders: Vec<Order> = Self::read(&self.orders).values().cloned().collect();
        orders.sort_by_key(|o| o.created_at);
        Ok(orders)
    }

    async fn list_for_customer(&self, username: &str) -> RepoResult<Vec<Order>> {
        let mut orders: Vec<Order> = Self::read(&self.orders)
            .values()
            .filter(|o| o.customer == username)
            .cloned()
            .collect();
        orders.sort_by_key(|o| o.created_at);
        Ok(orders)
    }

    async fn get(&self, id: OrderId) -> RepoResult<Option<Order>> {
        Ok(Self::read(&self.orders).get(&id).cloned())
    }

    async fn insert(&self, order: Order) -> RepoResult<()> {
        Self::write(&self.orders).insert(order.id, order);
        Ok(())
    }

    async fn update(&self, order: Order) -> RepoResult<bool> {
        let mut orders = Self::write(&self.orders);
        if orders.contains_key(&order.id) {
            orders.insert(order.id, order);
            Ok(true)
        } else {
            Ok(false)
        }
    }

    async fn delete(&self, id: OrderId) -> RepoResult<bool> {
        Ok(Self::write(&self.orders).remove(&id).is_some())
    }
}

#[async_trait]
impl UserRepository for InMemoryRepository {
    async fn list(&self) -> RepoResult<Vec<User>> {
        let mut users: Vec<User> = Self::read(&self.users).values().cloned().collect();
        users.sort_by(|a, b| a.username.cmp(&b.username));
        Ok(users)
    }

    async fn get(&self, id: UserId) -> RepoResult<Option<User>> {
        Ok(Self::read(&self.users).get(&id).cloned())
    }

    async fn find_by_username(&self, username: &str) -> RepoResult<Option<User>> {
        Ok(Self::read(&self.users)
            .values()
            .find(|u| u.username == username)
            .cloned())
    }

    async fn insert(&self, user: User) -> RepoResult<()> {
        Self::write(&self.users).insert(user.id, user);
        Ok(())
    }

    async fn update(&self, user: User) -> RepoResult<bool> {
        let mut users = Self::write(&self.users);
        if users.contains_key(&user.id) {
            users.insert(user.id, user);
            Ok(true)
        } else {
            Ok(false)
        }
    }

    async fn delete(&self, id: UserId) -> RepoResult<bool> {
        Ok(Self::write(&self.users).remove(&id).is_some())
    }
}

#[async_trait]
impl CategoryRepository for InMemoryRepository {
    async fn list(&self) -> RepoResult<Vec<Category>> {
        let mut categories: Vec<Category> =
            Self::read(&self.categories).values().cloned().collect();
        categories.sort_by(|a, b| a.name.cmp(&b.name));
        Ok(categories)
    }

    async fn insert(&self, category: Category) -> RepoResult<()> {
        Self::write(&self.categories).insert(category.id, category);
        Ok(())
    }

    async fn rename(&self, id: CategoryId, name: &str) -> RepoResult<bool> {
        let mut categories = Self::write(&self.categories);
        match categories.get_mut(&id) {
            Some(category) => {
                category.name = name.to_string();
                Ok(true)
            },
            None => Ok(false),
        }
    }

    async fn delete(&self, id: CategoryId) -> RepoResult<bool> {
        Ok(Self::write(&self.categories).remove(&id).is_some())
    }
}
