//! Router configuration.
//!
//! Builds the complete Axum router with all endpoints.

use super::health::{health_check, readiness_check};
use super::state::AppState;
use crate::api::{categories, items, orders, users};
use axum::{
    routing::{delete, get, post, put},
    Router,
};
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;

/// Build the complete Axum router.
///
/// All resource endpoints live under `/api`; health checks sit at the root.
pub fn build_router(state: AppState) -> Router {
    let api_routes = Router::new()
        // Menu items
        .route("/items", get(items::list_items))
        .route("/items", post(items::create_item))
        .route("/items/:item_id", get(items::get_item))
        .route("/items/:item_id", put(items::update_item))
        .route("/items/:item_id", delete(items::delete_item))
        .route("/items/category/:category", get(items::list_items_by_category))
        // Orders
        .route("/orders", get(orders::list_orders))
        .route("/orders", post(orders::place_order))
        .route("/orders/:order_id", get(orders::get_order))
        .route("/orders/:order_id", put(orders::update_order))
        .route("/orders/:order_id", delete(orders::delete_order))
        .route("/orders/user/:username", get(orders::list_user_orders))
        // Users
        .route("/users", get(users::list_users))
        .route("/users", post(users::register))
        .route("/users/login", post(users::login))
        .route("/users/:user_id", get(users::get_user))
        .route("/users/:user_id", put(users::update_user))
        .route("/users/:user_id", delete(users::delete_user))
        // Categories
        .route("/categories", get(categories::list_categories))
        .route("/categories", post(categories::create_category))
        .route("/categories/:category_id", put(categories::rename_category))
        .route("/categories/:category_id", delete(categories::delete_category));

    Router::new()
        .route("/health", get(health_check))
        .route("/ready", get(readiness_check))
        .nest("/api", api_routes)
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
        .with_state(state)
}
