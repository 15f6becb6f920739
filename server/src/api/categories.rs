//! Menu category endpoints.
//!
//! - GET /api/categories - list categories
//! - POST /api/categories - create a category
//! - PUT /api/categories/:category_id - rename a category
//! - DELETE /api/categories/:category_id - delete a category

use super::{ok, parse_id};
use crate::error::ServerError;
use crate::server::state::AppState;
use axum::{
    extract::{Path, State},
    Json,
};
use cucina_types::{Category, CategoryId, Envelope};
use serde::Deserialize;

/// Request carrying a category name.
#[derive(Debug, Deserialize)]
pub struct CategoryNameRequest {
    /// Category name
    pub name: String,
}

/// List every category.
pub async fn list_categories(
    State(state): State<AppState>,
) -> Result<Json<Envelope<Vec<Category>>>, ServerError> {
    let categories = state.categories.list().await?;
    Ok(ok(categories))
}

/// Create a category.
pub async fn create_category(
    State(state): State<AppState>,
    Json(request): Json<CategoryNameRequest>,
) -> Result<Json<Envelope<Category>>, ServerError> {
    if request.name.trim().is_empty() {
        return Err(ServerError::validation("Category name is required"));
    }

    let category = Category {
        id: CategoryId::new(),
        name: request.name,
    };

    state.categories.insert(category.clone()).await?;
    tracing::info!(category_id = %category.id, name = %category.name, "Category created");

    Ok(ok(category))
}

/// Rename a category.
pub async fn rename_category(
    State(state): State<AppState>,
    Path(category_id): Path<String>,
    Json(request): Json<CategoryNameRequest>,
) -> Result<Json<Envelope<String>>, ServerError> {
    let id: CategoryId = parse_id(&category_id, "Category not found")?;

    if request.name.trim().is_empty() {
        return Err(ServerError::validation("Category name is required"));
    }

    if !state.categories.rename(id, &request.name).await? {
        return Err(ServerError::validation("Category not found"));
    }

    Ok(ok("Category updated".to_string()))
}

/// Delete a category.
pub async fn delete_category(
    State(state): State<AppState>,
    Path(category_id): Path<String>,
) -> Result<Json<Envelope<String>>, ServerError> {
    let id: CategoryId = parse_id(&category_id, "Category not found")?;

    if !state.categories.delete(id).await? {
        return Err(ServerError::validation("Category not found"));
    }

    Ok(ok("Category deleted".to_string()))
}
