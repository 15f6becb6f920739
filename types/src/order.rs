//! Orders and the place-order wire shapes.

use crate::ids::{ItemId, OrderId};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Fulfillment state of an order.
///
/// Orders move forward only: Received, then Preparing, then Delivered.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OrderStatus {
    /// Placed, not yet picked up by the kitchen
    Received,

    /// Being prepared
    Preparing,

    /// Handed off to the customer
    Delivered,
}

impl Default for OrderStatus {
    fn default() -> Self {
        Self::Received
    }
}

impl OrderStatus {
    /// Canonical lowercase name, matching the wire and storage encoding
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Received => "received",
            Self::Preparing => "preparing",
            Self::Delivered => "delivered",
        }
    }
}

impl std::fmt::Display for OrderStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for OrderStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "received" => Ok(Self::Received),
            "preparing" => Ok(Self::Preparing),
            "delivered" => Ok(Self::Delivered),
            other => Err(format!("unknown order status: {other}")),
        }
    }
}

/// One line of an order: an item and how many of it.
///
/// The item name and price are captured at order time, so later menu edits
/// never rewrite past orders.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OrderLine {
    /// The ordered menu item
    pub item_id: ItemId,

    /// Item name at order time
    pub item_name: String,

    /// How many of this item
    pub quantity: u32,

    /// Unit price in cents at order time
    #[serde(rename = "price")]
    pub price_cents: i64,
}

impl OrderLine {
    /// Line total in cents (unit price times quantity)
    #[must_use]
    pub fn total_cents(&self) -> i64 {
        self.price_cents * i64::from(self.quantity)
    }
}

/// A placed order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Order {
    /// Order identifier
    pub id: OrderId,

    /// Username of the customer who placed the order
    pub customer: String,

    /// Ordered lines
    pub items: Vec<OrderLine>,

    /// Order total in cents
    #[serde(rename = "total")]
    pub total_cents: i64,

    /// Fulfillment state
    #[serde(default)]
    pub status: OrderStatus,

    /// Archived orders are hidden from active listings
    #[serde(default)]
    pub is_archived: bool,

    /// When the order was placed
    pub created_at: DateTime<Utc>,
}

/// Request body for placing an order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PlaceOrderRequest {
    /// Username of the ordering customer
    pub username: String,

    /// Lines to order
    pub items: Vec<OrderLine>,

    /// Claimed total in cents
    #[serde(rename = "total")]
    pub total_cents: i64,
}

/// Response payload confirming a placed order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PlaceOrderReceipt {
    /// Identifier assigned to the new order
    pub order_id: OrderId,

    /// Username the order was placed for
    pub customer: String,

    /// Confirmed lines
    pub items: Vec<OrderLine>,

    /// Confirmed total in cents
    #[serde(rename = "total")]
    pub total_cents: i64,
}
