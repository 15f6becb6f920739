//! Menu item endpoints.
//!
//! - GET /api/items - full menu (404 when the menu is empty)
//! - GET /api/items/:item_id - one item
//! - GET /api/items/category/:category - menu filtered by category
//! - POST /api/items - create an item
//! - PUT /api/items/:item_id - update an item
//! - DELETE /api/items/:item_id - delete an item

use super::{ok, parse_id};
use crate::error::ServerError;
use crate::server::state::AppState;
use axum::{
    extract::{Path, State},
    Json,
};
use cucina_types::{Envelope, ItemId, MenuItem};
use serde::Deserialize;

/// Request to create a menu item.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateItemRequest {
    /// Display name
    pub item_name: String,
    /// Short description
    pub description: Option<String>,
    /// Category name
    pub category: String,
    /// Price in cents
    #[serde(rename = "price")]
    pub price_cents: i64,
    /// Image location
    pub image_src: Option<String>,
}

/// Request to update a menu item; absent fields keep their value.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateItemRequest {
    /// Updated name
    pub item_name: Option<String>,
    /// Updated description
    pub description: Option<String>,
    /// Updated category
    pub category: Option<String>,
    /// Updated price in cents
    #[serde(rename = "price")]
    pub price_cents: Option<i64>,
    /// Updated image location
    pub image_src: Option<String>,
    /// Updated availability
    pub is_available: Option<bool>,
}

/// List the full menu.
pub async fn list_items(
    State(state): State<AppState>,
) -> Result<Json<Envelope<Vec<MenuItem>>>, ServerError> {
    let items = state.items.list().await?;

    if items.is_empty() {
        return Err(ServerError::not_found("No items found"));
    }

    Ok(ok(items))
}

/// List the menu filtered by category.
pub async fn list_items_by_category(
    State(state): State<AppState>,
    Path(category): Path<String>,
) -> Result<Json<Envelope<Vec<MenuItem>>>, ServerError> {
    let items = state.items.list_by_category(&category).await?;

    if items.is_empty() {
        return Err(ServerError::not_found("No items found"));
    }

    Ok(ok(items))
}

/// Get one menu item.
pub async fn get_item(
    State(state): State<AppState>,
    Path(item_id): Path<String>,
) -> Result<Json<Envelope<MenuItem>>, ServerError> {
    let id: ItemId = parse_id(&item_id, "Item not found")?;

    let item = state
        .items
        .get(id)
        .await?
        .ok_or_else(|| ServerError::validation("Item not found"))?;

    Ok(ok(item))
}

/// Create a menu item.
pub async fn create_item(
    State(state): State<AppState>,
    Json(request): Json<CreateItemRequest>,
) -> Result<Json<Envelope<MenuItem>>, ServerError> {
    if request.item_name.trim().is_empty() || request.category.trim().is_empty() {
        return Err(ServerError::validation("Item name and category are required"));
    }
    if request.price_cents <= 0 {
        return Err(ServerError::validation("Price must be positive"));
    }

    let item = MenuItem {
        id: ItemId::new(),
        item_name: request.item_name,
        description: request.description,
        category: request.category,
        price_cents: request.price_cents,
        image_src: request.image_src,
        is_available: true,
    };

    state.items.insert(item.clone()).await?;
    tracing::info!(item_id = %item.id, item_name = %item.item_name, "Menu item created");

    Ok(ok(item))
}

/// Update a menu item.
pub async fn update_item(
    State(state): State<AppState>,
    Path(item_id): Path<String>,
    Json(request): Json<UpdateItemRequest>,
) -> Result<Json<Envelope<MenuItem>>, ServerError> {
    let id: ItemId = parse_id(&item_id, "Item not found")?;

    let mut item = state
        .items
        .get(id)
        .await?
        .ok_or_else(|| ServerError::validation("Item not found"))?;

    if let Some(item_name) = request.item_name {
        item.item_name = item_name;
    }
    if let Some(description) = request.description {
        item.description = Some(description);
    }
    if let Some(category) = request.category {
        item.category = category;
    }
    if let Some(price_cents) = request.price_cents {
        if price_cents <= 0 {
            return Err(ServerError::validation("Price must be positive"));
        }
        item.price_cents = price_cents;
    }
    if let Some(image_src) = request.image_src {
        item.image_src = Some(image_src);
    }
    if let Some(is_available) = request.is_available {
        item.is_available = is_available;
    }

    if !state.items.update(item.clone()).await? {
        return Err(ServerError::validation("Item not found"));
    }

    Ok(ok(item))
}

/// Delete a menu item.
pub async fn delete_item(
    State(state): State<AppState>,
    Path(item_id): Path<String>,
) -> Result<Json<Envelope<String>>, ServerError> {
    let id: ItemId = parse_id(&item_id, "Item not found")?;

    if !state.items.delete(id).await? {
        return Err(ServerError::validation("Item not found"));
    }

    tracing::info!(item_id = %id, "Menu item deleted");
    Ok(ok("Item deleted".to_string()))
}
