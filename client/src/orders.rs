//! Orders slice.
//!
//! Covers both the customer view (own orders) and the admin view (all
//! orders). `Cleanup` resets the slice on logout; it is an explicit message,
//! not an error side effect, so error handling never wipes the list.

use crate::app::ClientEnvironment;
use cucina_core::{
    effect::Effect, reducer::Reducer, remote::RemoteData, smallvec, SmallVec,
};
use cucina_types::{Order, OrderId, OrderStatus, PlaceOrderReceipt, PlaceOrderRequest};
use std::sync::Arc;

/// Slice state for orders.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct OrdersState {
    /// The fetched order list
    pub orders: RemoteData<Vec<Order>>,

    /// Receipt of the most recently placed order, if any
    pub last_receipt: Option<PlaceOrderReceipt>,
}

/// Messages owned by the orders slice.
#[derive(Debug, Clone, PartialEq)]
pub enum OrdersAction {
    /// Request every order (admin)
    FetchAll,

    /// Request one customer's orders
    FetchForUser(String),

    /// Orders arrived
    Received(Vec<Order>),

    /// A fetch failed
    Failed(String),

    /// Request placing an order
    Place(PlaceOrderRequest),

    /// The order was accepted
    Placed(PlaceOrderReceipt),

    /// The order was rejected
    PlaceFailed(String),

    /// Request a fulfillment-status change (admin)
    EditStatus(OrderId, OrderStatus),

    /// The status change was applied
    StatusEdited(Order),

    /// The status change was rejected
    EditFailed(String),

    /// Request an order deletion
    Delete(OrderId),

    /// The deletion was applied
    Deleted(OrderId),

    /// The deletion was rejected
    DeleteFailed(String),

    /// Reset the slice to its initial state (dispatched on logout)
    Cleanup,
}

/// Reducer for the orders slice.
#[derive(Debug, Clone, Copy, Default)]
pub struct OrdersReducer;

impl Reducer for OrdersReducer {
    type State = OrdersState;
    type Action = OrdersAction;
    type Environment = ClientEnvironment;

    #[allow(clippy::too_many_lines)] // One arm per message kind
    fn reduce(
        &self,
        state: &mut Self::State,
        action: Self::Action,
        env: &Self::Environment,
    ) -> SmallVec<[Effect<Self::Action>; 4]> {
        match action {
            OrdersAction::FetchAll => {
                state.orders.begin();

                let api = Arc::clone(&env.api);
                smallvec![Effect::Future(Box::pin(async move {
                    Some(match api.fetch_orders().await {
                        Ok(orders) => OrdersAction::Received(orders),
                        Err(e) => OrdersAction::Failed(e.to_string()),
                    })
                }))]
            },
            OrdersAction::FetchForUser(username) => {
                state.orders.begin();

                let api = Arc::clone(&env.api);
                smallvec![Effect::Future(Box::pin(async move {
                    Some(match api.fetch_user_orders(&username).await {
                        Ok(orders) => OrdersAction::Received(orders),
                        Err(e) => OrdersAction::Failed(e.to_string()),
                    })
                }))]
            },
            OrdersAction::Received(orders) => {
                state.orders.resolve(orders);
                SmallVec::new()
            },
            OrdersAction::Failed(error) => {
                state.orders.reject(error);
                SmallVec::new()
            },
            OrdersAction::Place(request) => {
                let api = Arc::clone(&env.api);
                smallvec![Effect::Future(Box::pin(async move {
                    Some(match api.place_order(request).await {
                        Ok(receipt) => OrdersAction::Placed(receipt),
                        Err(e) => OrdersAction::PlaceFailed(e.to_string()),
                    })
                }))]
            },
            OrdersAction::Placed(receipt) => {
                state.last_receipt = Some(receipt);
                SmallVec::new()
            },
            OrdersAction::EditStatus(id, status) => {
                let api = Arc::clone(&env.api);
                smallvec![Effect::Future(Box::pin(async move {
                    Some(match api.update_order_status(id, status).await {
                        Ok(order) => OrdersAction::StatusEdited(order),
                        Err(e) => OrdersAction::EditFailed(e.to_string()),
                    })
                }))]
            },
            OrdersAction::StatusEdited(order) => {
                if let Some(orders) = state.orders.data.as_mut() {
                    if let Some(existing) = orders.iter_mut().find(|o| o.id == order.id) {
                        *existing = order;
                    }
                }
                SmallVec::new()
            },
            OrdersAction::Delete(id) => {
                let api = Arc::clone(&env.api);
                smallvec![Effect::Future(Box::pin(async move {
                    Some(match api.delete_order(id).await {
                        Ok(id) => OrdersAction::Deleted(id),
                        Err(e) => OrdersAction::DeleteFailed(e.to_string()),
                    })
                }))]
            },
            OrdersAction::Deleted(id) => {
                if let Some(orders) = state.orders.data.as_mut() {
                    orders.retain(|o| o.id != id);
                }
                SmallVec::new()
            },
            OrdersAction::PlaceFailed(error)
            | OrdersAction::EditFailed(error)
            | OrdersAction::DeleteFailed(error) => {
                state.orders.reject(error);
                SmallVec::new()
            },
            OrdersAction::Cleanup => {
                *state = OrdersState::default();
                SmallVec::new()
            },
        }
    }
}
