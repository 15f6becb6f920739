//! API gateway: the trait reducers fetch through, and its implementations.
//!
//! Reducers never touch the network directly. They describe the call as an
//! `Effect::Future` closing over the [`Api`] trait object from the
//! environment. Production uses [`HttpApi`]; tests use [`mock::MockApi`].

use async_trait::async_trait;
use cucina_types::{
    Credentials, Envelope, ItemId, MenuItem, NewUser, Order, OrderId, OrderStatus,
    PlaceOrderReceipt, PlaceOrderRequest, User, UserId,
};
use serde::de::DeserializeOwned;
use thiserror::Error;

/// Failure of a fetch, as seen by a reducer.
///
/// Both categories collapse to a display string in slice state; the split
/// exists so callers can distinguish "the server said no" from "the server
/// was unreachable".
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FetchError {
    /// The server answered with an error envelope
    #[error("{0}")]
    Rejected(String),

    /// The request never produced a decodable envelope
    #[error("network failure: {0}")]
    Transport(String),
}

/// The remote surface the client state layer fetches against.
///
/// One method per operation the slices perform. Every method returns a
/// `Result` so reducer effects can convert failures into error actions.
#[async_trait]
pub trait Api: Send + Sync {
    /// Fetch the full menu
    async fn fetch_items(&self) -> Result<Vec<MenuItem>, FetchError>;

    /// Update a menu item (admin)
    async fn update_item(&self, item: MenuItem) -> Result<MenuItem, FetchError>;

    /// Delete a menu item (admin)
    async fn delete_item(&self, id: ItemId) -> Result<ItemId, FetchError>;

    /// Authenticate with username and password
    async fn login(&self, credentials: Credentials) -> Result<User, FetchError>;

    /// Create an account
    async fn register(&self, new_user: NewUser) -> Result<User, FetchError>;

    /// Fetch every order (admin)
    async fn fetch_orders(&self) -> Result<Vec<Order>, FetchError>;

    /// Fetch the orders placed by one customer
    async fn fetch_user_orders(&self, username: &str) -> Result<Vec<Order>, FetchError>;

    /// Place an order
    async fn place_order(&self, request: PlaceOrderRequest)
        -> Result<PlaceOrderReceipt, FetchError>;

    /// Move an order to a new fulfillment status (admin)
    async fn update_order_status(
        &self,
        id: OrderId,
        status: OrderStatus,
    ) -> Result<Order, FetchError>;

    /// Delete an order
    async fn delete_order(&self, id: OrderId) -> Result<OrderId, FetchError>;

    /// Fetch a user's profile
    async fn fetch_profile(&self, id: UserId) -> Result<User, FetchError>;

    /// Update a user's profile
    async fn update_profile(&self, user: User) -> Result<User, FetchError>;
}

/// Live [`Api`] implementation over HTTP.
///
/// Decodes the uniform `{status, data|message}` envelope: an error envelope
/// becomes [`FetchError::Rejected`] regardless of the HTTP status code, and
/// anything that fails before a decodable envelope arrives becomes
/// [`FetchError::Transport`].
#[derive(Debug, Clone)]
pub struct HttpApi {
    client: reqwest::Client,
    base_url: String,
}

impl HttpApi {
    /// Create a gateway against the given base URL (e.g. `http://localhost:3001`)
    #[must_use]
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            client: reqwest::Client::new(),
            base_url: base_url.into(),
        }
    }

    fn url(&self, path: &str) -> String {
        format!("{}{path}", self.base_url)
    }

    async fn decode<T: DeserializeOwned>(
        response: Result<reqwest::Response, reqwest::Error>,
    ) -> Result<T, FetchError> {
        let response = response.map_err(|e| FetchError::Transport(e.to_string()))?;

        let envelope: Envelope<T> = response
            .json()
            .await
            .map_err(|e| FetchError::Transport(e.to_string()))?;

        if envelope.is_success() {
            envelope
                .data
                .ok_or_else(|| FetchError::Transport("success envelope without data".into()))
        } else {
            Err(FetchError::Rejected(
                envelope
                    .message
                    .unwrap_or_else(|| "request failed".into()),
            ))
        }
    }
}

#[async_trait]
impl Api for HttpApi {
    async fn fetch_items(&self) -> Result<Vec<MenuItem>, FetchError> {
        Self::decode(self.client.get(self.url("/api/items")).send().await)
            .await
    }

    async fn update_item(&self, item: MenuItem) -> Result<MenuItem, FetchError> {
        let url = self.url(&format!("/api/items/{}", item.id));
        Self::decode(self.client.put(url).json(&item).send().await).await
    }

    async fn delete_item(&self, id: ItemId) -> Result<ItemId, FetchError> {
        let url = self.url(&format!("/api/items/{id}"));
        Self::decode::<serde_json::Value>(self.client.delete(url).send().await).await?;
        Ok(id)
    }

    async fn login(&self, credentials: Credentials) -> Result<User, FetchError> {
        let url = self.url("/api/users/login");
        Self::decode(self.client.post(url).json(&credentials).send().await)
            .await
    }

    async fn register(&self, new_user: NewUser) -> Result<User, FetchError> {
        let url = self.url("/api/users");
        Self::decode(self.client.post(url).json(&new_user).send().await)
            .await
    }

    async fn fetch_orders(&self) -> Result<Vec<Order>, FetchError> {
        Self::decode(self.client.get(self.url("/api/orders")).send().await)
            .await
    }

    async fn fetch_user_orders(&self, username: &str) -> Result<Vec<Order>, FetchError> {
        let url = self.url(&format!("/api/orders/user/{username}"));
        Self::decode(self.client.get(url).send().await).await
    }

    async fn place_order(
        &self,
        request: PlaceOrderRequest,
    ) -> Result<PlaceOrderReceipt, FetchError> {
        let url = self.url("/api/orders");
        Self::decode(self.client.post(url).json(&request).send().await).await
    }

    async fn update_order_status(
        &self,
        id: OrderId,
        status: OrderStatus,
    ) -> Result<Order, FetchError> {
        let url = self.url(&format!("/api/orders/{id}"));
        let body = serde_json::json!({ "status": status });
        Self::decode(self.client.put(url).json(&body).send().await).await
    }

    async fn delete_order(&self, id: OrderId) -> Result<OrderId, FetchError> {
        let url = self.url(&format!("/api/orders/{id}"));
        Self::decode::<serde_json::Value>(self.client.delete(url).send().await).await?;
        Ok(id)
    }

    async fn fetch_profile(&self, id: UserId) -> Result<User, FetchError> {
        let url = self.url(&format!("/api/users/{id}"));
        Self::decode(self.client.get(url).send().await).await
    }

    async fn update_profile(&self, user: User) -> Result<User, FetchError> {
        let url = self.url(&format!("/api/users/{}", user.id));
        Self::decode(self.client.put(url).json(&user).send().await).await
    }
}

/// In-memory [`Api`] for tests.
pub mod mock {
    use super::{
        async_trait, Api, Credentials, FetchError, ItemId, MenuItem, NewUser, Order, OrderId,
        OrderStatus, PlaceOrderReceipt, PlaceOrderRequest, User, UserId,
    };
    use chrono::Utc;
    use std::sync::RwLock;

    /// Configurable in-memory API double.
    ///
    /// Seed it with data via the builder methods, or arrange a failure with
    /// [`MockApi::failing`]; every call then returns the configured error.
    #[derive(Debug, Default)]
    pub struct MockApi {
        items: RwLock<Vec<MenuItem>>,
        orders: RwLock<Vec<Order>>,
        users: RwLock<Vec<User>>,
        failure: Option<FetchError>,
    }

    impl MockApi {
        /// An empty mock where every call succeeds
        #[must_use]
        pub fn new() -> Self {
            Self::default()
        }

        /// A mock where every call fails with the given message
        #[must_use]
        pub fn failing(message: impl Into<String>) -> Self {
            Self {
                failure: Some(FetchError::Transport(message.into())),
                ..Self::default()
            }
        }

        /// Seed menu items
        #[must_use]
        pub fn with_items(self, items: Vec<MenuItem>) -> Self {
            *self.items.write().unwrap_or_else(std::sync::PoisonError::into_inner) = items;
            self
        }

        /// Seed orders
        #[must_use]
        pub fn with_orders(self, orders: Vec<Order>) -> Self {
            *self.orders.write().unwrap_or_else(std::sync::PoisonError::into_inner) = orders;
            self
        }

        /// Seed user accounts (login matches against these)
        #[must_use]
        pub fn with_users(self, users: Vec<User>) -> Self {
            *self.users.write().unwrap_or_else(std::sync::PoisonError::into_inner) = users;
            self
        }

        fn check_failure(&self) -> Result<(), FetchError> {
            match &self.failure {
                Some(err) => Err(err.clone()),
                None => Ok(()),
            }
        }

        fn read<T>(lock: &RwLock<T>) -> std::sync::RwLockReadGuard<'_, T> {
            lock.read().unwrap_or_else(std::sync::PoisonError::into_inner)
        }

        fn write<T>(lock: &RwLock<T>) -> std::sync::RwLockWriteGuard<'_, T> {
            lock.write().unwrap_or_else(std::sync::PoisonError::into_inner)
        }
    }

    #[async_trait]
    impl Api for MockApi {
        async fn fetch_items(&self) -> Result<Vec<MenuItem>, FetchError> {
            self.check_failure()?;
            Ok(Self::read(&self.items).clone())
        }

        async fn update_item(&self, item: MenuItem) -> Result<MenuItem, FetchError> {
            self.check_failure()?;
            let mut items = Self::write(&self.items);
            match items.iter_mut().find(|i| i.id == item.id) {
                Some(existing) => {
                    *existing = item.clone();
                    Ok(item)
                },
                None => Err(FetchError::Rejected("Item not found".into())),
            }
        }

        async fn delete_item(&self, id: ItemId) -> Result<ItemId, FetchError> {
            self.check_failure()?;
            let mut items = Self::write(&self.items);
            let before = items.len();
            items.retain(|i| i.id != id);
            if items.len() == before {
                return Err(FetchError::Rejected("Item not found".into()));
            }
            Ok(id)
        }

        async fn login(&self, credentials: Credentials) -> Result<User, FetchError> {
            self.check_failure()?;
            Self::read(&self.users)
                .iter()
                .find(|u| u.username == credentials.username && u.password == credentials.password)
                .cloned()
                .ok_or_else(|| FetchError::Rejected("Invalid credentials".into()))
        }

        async fn register(&self, new_user: NewUser) -> Result<User, FetchError> {
            self.check_failure()?;
            let mut users = Self::write(&self.users);
            if users.iter().any(|u| u.username == new_user.username) {
                return Err(FetchError::Rejected("Username already taken".into()));
            }
            let user = User {
                id: UserId::new(),
                username: new_user.username,
                password: new_user.password,
                first_name: new_user.first_name,
                last_name: new_user.last_name,
                email: new_user.email,
                address: new_user.address,
                phone: new_user.phone,
                is_admin: false,
            };
            users.push(user.clone());
            Ok(user)
        }

        async fn fetch_orders(&self) -> Result<Vec<Order>, FetchError> {
            self.check_failure()?;
            Ok(Self::read(&self.orders).clone())
        }

        async fn fetch_user_orders(&self, username: &str) -> Result<Vec<Order>, FetchError> {
            self.check_failure()?;
            let orders: Vec<Order> = Self::read(&self.orders)
                .iter()
                .filter(|o| o.customer == username)
                .cloned()
                .collect();
            if orders.is_empty() {
                return Err(FetchError::Rejected("No orders found".into()));
            }
            Ok(orders)
        }

        async fn place_order(
            &self,
            request: PlaceOrderRequest,
        ) -> Result<PlaceOrderReceipt, FetchError> {
            self.check_failure()?;
            let order = Order {
                id: OrderId::new(),
                customer: request.username.clone(),
                items: request.items.clone(),
                total_cents: request.total_cents,
                status: OrderStatus::Received,
                is_archived: false,
                created_at: Utc::now(),
            };
            let receipt = PlaceOrderReceipt {
                order_id: order.id,
                customer: order.customer.clone(),
                items: order.items.clone(),
                total_cents: order.total_cents,
            };
            Self::write(&self.orders).push(order);
            Ok(receipt)
        }

        async fn update_order_status(
            &self,
            id: OrderId,
            status: OrderStatus,
        ) -> Result<Order, FetchError> {
            self.check_failure()?;
            let mut orders = Self::write(&self.orders);
            match orders.iter_mut().find(|o| o.id == id) {
                Some(order) => {
                    order.status = status;
                    Ok(order.clone())
                },
                None => Err(FetchError::Rejected("Order not found".into())),
            }
        }

        async fn delete_order(&self, id: OrderId) -> Result<OrderId, FetchError> {
            self.check_failure()?;
            let mut orders = Self::write(&self.orders);
            let before = orders.len();
            orders.retain(|o| o.id != id);
            if orders.len() == before {
                return Err(FetchError::Rejected("Order not found".into()));
            }
            Ok(id)
        }

        async fn fetch_profile(&self, id: UserId) -> Result<User, FetchError> {
            self.check_failure()?;
            Self::read(&self.users)
                .iter()
                .find(|u| u.id == id)
                .cloned()
                .ok_or_else(|| FetchError::Rejected("User not found".into()))
        }

        async fn update_profile(&self, user: User) -> Result<User, FetchError> {
            self.check_failure()?;
            let mut users = Self::write(&self.users);
            match users.iter_mut().find(|u| u.id == user.id) {
                Some(existing) => {
                    *existing = user.clone();
                    Ok(user)
                },
                None => Err(FetchError::Rejected("User not found".into())),
            }
        }
    }
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)] // Test code can unwrap

    use super::mock::MockApi;
    use super::*;
    use cucina_types::OrderLine;

    fn item(name: &str, price_cents: i64) -> MenuItem {
        MenuItem {
            id: ItemId::new(),
            item_name: name.into(),
            description: None,
            category: "Pizza".into(),
            price_cents,
            image_src: None,
            is_available: true,
        }
    }

    #[tokio::test]
    async fn mock_serves_seeded_items() {
        let api = MockApi::new().with_items(vec![item("Margherita", 1250)]);
        let items = api.fetch_items().await.unwrap();
        assert_eq!(items.len(), 1);
        assert_eq!(items[0].item_name, "Margherita");
    }

    #[tokio::test]
    async fn failing_mock_rejects_every_call() {
        let api = MockApi::failing("connection refused");
        let err = api.fetch_items().await.unwrap_err();
        assert_eq!(err, FetchError::Transport("connection refused".into()));
    }

    #[tokio::test]
    async fn mock_login_checks_credentials() {
        let user = User {
            id: UserId::new(),
            username: "alice".into(),
            password: "hunter2".into(),
            first_name: "Alice".into(),
            last_name: "Martin".into(),
            email: "alice@example.com".into(),
            address: None,
            phone: None,
            is_admin: false,
        };
        let api = MockApi::new().with_users(vec![user]);

        let ok = api
            .login(Credentials {
                username: "alice".into(),
                password: "hunter2".into(),
            })
            .await;
        assert!(ok.is_ok());

        let err = api
            .login(Credentials {
                username: "alice".into(),
                password: "wrong".into(),
            })
            .await
            .unwrap_err();
        assert_eq!(err, FetchError::Rejected("Invalid credentials".into()));
    }

    #[tokio::test]
    async fn mock_place_order_returns_receipt_and_stores_order() {
        let api = MockApi::new();
        let dish = item("Margherita", 600);
        let receipt = api
            .place_order(PlaceOrderRequest {
                username: "alice".into(),
                items: vec![OrderLine {
                    item_id: dish.id,
                    item_name: dish.item_name,
                    quantity: 2,
                    price_cents: 600,
                }],
                total_cents: 1200,
            })
            .await
            .unwrap();

        assert_eq!(receipt.customer, "alice");
        assert_eq!(receipt.total_cents, 1200);

        let orders = api.fetch_user_orders("alice").await.unwrap();
        assert_eq!(orders.len(), 1);
        assert_eq!(orders[0].id, receipt.order_id);
    }

    #[tokio::test]
    async fn mock_user_orders_empty_is_an_error() {
        let api = MockApi::new();
        let err = api.fetch_user_orders("nobody").await.unwrap_err();
        assert_eq!(err, FetchError::Rejected("No orders found".into()));
    }
}
