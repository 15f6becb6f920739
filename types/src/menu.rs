//! Menu items and categories.

use crate::ids::{CategoryId, ItemId};
use serde::{Deserialize, Serialize};

/// A dish on the menu.
///
/// Prices are integer cents; `price_cents` serializes as `price` on the wire.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MenuItem {
    /// Item identifier
    pub id: ItemId,

    /// Display name
    pub item_name: String,

    /// Short description shown on the menu
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,

    /// Category name this item is listed under
    pub category: String,

    /// Price in cents
    #[serde(rename = "price")]
    pub price_cents: i64,

    /// Image location for the menu card
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image_src: Option<String>,

    /// Whether the item can currently be ordered
    #[serde(default = "default_available")]
    pub is_available: bool,
}

const fn default_available() -> bool {
    true
}

/// A menu category.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Category {
    /// Category identifier
    pub id: CategoryId,

    /// Category name, unique across the menu
    pub name: String,
}
