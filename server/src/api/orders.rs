//! Order endpoints.
//!
//! - GET /api/orders - every order (404 when none exist)
//! - GET /api/orders/:order_id - one order
//! - GET /api/orders/user/:username - one customer's orders (404 when none)
//! - POST /api/orders - place an order
//! - PUT /api/orders/:order_id - update lines, total, status, or archive flag
//! - DELETE /api/orders/:order_id - delete an order

use super::{ok, parse_id};
use crate::error::ServerError;
use crate::server::state::AppState;
use axum::{
    extract::{Path, State},
    Json,
};
use chrono::Utc;
use cucina_types::{
    Envelope, Order, OrderId, OrderLine, OrderStatus, PlaceOrderReceipt, PlaceOrderRequest,
};
use serde::Deserialize;

/// Request to update an order; absent fields keep their value.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateOrderRequest {
    /// Replacement lines
    pub items: Option<Vec<OrderLine>>,
    /// Replacement total in cents
    #[serde(rename = "total")]
    pub total_cents: Option<i64>,
    /// New fulfillment status
    pub status: Option<OrderStatus>,
    /// Archive or unarchive
    pub is_archived: Option<bool>,
}

/// List every order.
pub async fn list_orders(
    State(state): State<AppState>,
) -> Result<Json<Envelope<Vec<Order>>>, ServerError> {
    let orders = state.orders.list().await?;

    if orders.is_empty() {
        return Err(ServerError::not_found("No orders found"));
    }

    Ok(ok(orders))
}

/// List one customer's orders.
pub async fn list_user_orders(
    State(state): State<AppState>,
    Path(username): Path<String>,
) -> Result<Json<Envelope<Vec<Order>>>, ServerError> {
    let orders = state.orders.list_for_customer(&username).await?;

    if orders.is_empty() {
        return Err(ServerError::not_found("No orders found"));
    }

    Ok(ok(orders))
}

/// Get one order.
pub async fn get_order(
    State(state): State<AppState>,
    Path(order_id): Path<String>,
) -> Result<Json<Envelope<Order>>, ServerError> {
    let id: OrderId = parse_id(&order_id, "Order not found")?;

    let order = state
        .orders
        .get(id)
        .await?
        .ok_or_else(|| ServerError::validation("Order not found"))?;

    Ok(ok(order))
}

/// Place an order.
pub async fn place_order(
    State(state): State<AppState>,
    Json(request): Json<PlaceOrderRequest>,
) -> Result<Json<Envelope<PlaceOrderReceipt>>, ServerError> {
    if request.username.trim().is_empty() {
        return Err(ServerError::validation("Username is required"));
    }
    if request.items.is_empty() {
        return Err(ServerError::validation("Order must contain at least one item"));
    }
    if request.total_cents <= 0 {
        return Err(ServerError::validation("Total must be positive"));
    }

    let order = Order {
        id: OrderId::new(),
        customer: request.username,
        items: request.items,
        total_cents: request.total_cents,
        status: OrderStatus::Received,
        is_archived: false,
        created_at: Utc::now(),
    };

    state.orders.insert(order.clone()).await?;
    tracing::info!(order_id = %order.id, customer = %order.customer, "Order placed");

    Ok(ok(PlaceOrderReceipt {
        order_id: order.id,
        customer: order.customer,
        items: order.items,
        total_cents: order.total_cents,
    }))
}

/// Update an order.
pub async fn update_order(
    State(state): State<AppState>,
    Path(order_id): Path<String>,
    Json(request): Json<UpdateOrderRequest>,
) -> Result<Json<Envelope<Order>>, ServerError> {
    let id: OrderId = parse_id(&order_id, "Order not found")?;

    let mut order = state
        .orders
        .get(id)
        .await?
        .ok_or_else(|| ServerError::validation("Order not found"))?;

    if let Some(items) = request.items {
        if items.is_empty() {
            return Err(ServerError::validation("Order must contain at least one item"));
        }
        order.items = items;
    }
    if let Some(total_cents) = request.total_cents {
        if total_cents <= 0 {
            return Err(ServerError::validation("Total must be positive"));
        }
        order.total_cents = total_cents;
    }
    if let Some(status) = request.status {
        order.status = status;
    }
    if let Some(is_archived) = request.is_archived {
        order.is_archived = is_archived;
    }

    if !state.orders.update(order.clone()).await? {
        return Err(ServerError::validation("Order not found"));
    }

    Ok(ok(order))
}

/// Delete an order.
pub async fn delete_order(
    State(state): State<AppState>,
    Path(order_id): Path<String>,
) -> Result<Json<Envelope<String>>, ServerError> {
    let id: OrderId = parse_id(&order_id, "Order not found")?;

    if !state.orders.delete(id).await? {
        return Err(ServerError::validation("Order not found"));
    }

    tracing::info!(order_id = %id, "Order deleted");
    Ok(ok("Order deleted".to_string()))
}
