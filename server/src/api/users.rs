//! User account endpoints.
//!
//! - GET /api/users - list accounts
//! - GET /api/users/:user_id - one account
//! - POST /api/users - register
//! - POST /api/users/login - authenticate
//! - PUT /api/users/:user_id - update an account
//! - DELETE /api/users/:user_id - delete an account

use super::{ok, parse_id};
use crate::error::ServerError;
use crate::server::state::AppState;
use axum::{
    extract::{Path, State},
    Json,
};
use cucina_types::{Credentials, Envelope, NewUser, User, UserId};
use serde::Deserialize;

/// Request to update an account; absent fields keep their value.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateUserRequest {
    /// New password
    pub password: Option<String>,
    /// Updated given name
    pub first_name: Option<String>,
    /// Updated family name
    pub last_name: Option<String>,
    /// Updated email
    pub email: Option<String>,
    /// Updated delivery address
    pub address: Option<String>,
    /// Updated phone number
    pub phone: Option<String>,
}

/// List every account.
pub async fn list_users(
    State(state): State<AppState>,
) -> Result<Json<Envelope<Vec<User>>>, ServerError> {
    let users = state.users.list().await?;
    Ok(ok(users))
}

/// Get one account.
pub async fn get_user(
    State(state): State<AppState>,
    Path(user_id): Path<String>,
) -> Result<Json<Envelope<User>>, ServerError> {
    let id: UserId = parse_id(&user_id, "User not found")?;

    let user = state
        .users
        .get(id)
        .await?
        .ok_or_else(|| ServerError::validation("User not found"))?;

    Ok(ok(user))
}

/// Register an account.
pub async fn register(
    State(state): State<AppState>,
    Json(new_user): Json<NewUser>,
) -> Result<Json<Envelope<User>>, ServerError> {
    if let Some(field) = new_user.first_missing_field() {
        return Err(ServerError::validation(format!(
            "Missing required field: {field}"
        )));
    }

    if state
        .users
        .find_by_username(&new_user.username)
        .await?
        .is_some()
    {
        return Err(ServerError::validation("Username already taken"));
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

    state.users.insert(user.clone()).await?;
    tracing::info!(user_id = %user.id, username = %user.username, "Account registered");

    Ok(ok(user))
}

/// Authenticate with username and password.
pub async fn login(
    State(state): State<AppState>,
    Json(credentials): Json<Credentials>,
) -> Result<Json<Envelope<User>>, ServerError> {
    let user = state
        .users
        .find_by_username(&credentials.username)
        .await?
        .filter(|user| user.password == credentials.password)
        .ok_or_else(|| ServerError::unauthorized("Invalid credentials"))?;

    tracing::debug!(username = %user.username, "Login succeeded");
    Ok(ok(user))
}

/// Update an account.
pub async fn update_user(
    State(state): State<AppState>,
    Path(user_id): Path<String>,
    Json(request): Json<UpdateUserRequest>,
) -> Result<Json<Envelope<User>>, ServerError> {
    let id: UserId = parse_id(&user_id, "User not found")?;

    let mut user = state
        .users
        .get(id)
        .await?
        .ok_or_else(|| ServerError::validation("User not found"))?;

    if let Some(password) = request.password {
        user.password = password;
    }
    if let Some(first_name) = request.first_name {
        user.first_name = first_name;
    }
    if let Some(last_name) = request.last_name {
        user.last_name = last_name;
    }
    if let Some(email) = request.email {
        user.email = email;
    }
    if let Some(address) = request.address {
        user.address = Some(address);
    }
    if let Some(phone) = request.phone {
        user.phone = Some(phone);
    }

    if !state.users.update(user.clone()).await? {
        return Err(ServerError::validation("User not found"));
    }

    Ok(ok(user))
}

/// Delete an account.
pub async fn delete_user(
    State(state): State<AppState>,
    Path(user_id): Path<String>,
) -> Result<Json<Envelope<String>>, ServerError> {
    let id: UserId = parse_id(&user_id, "User not found")?;

    if !state.users.delete(id).await? {
        return Err(ServerError::validation("User not found"));
    }

    tracing::info!(user_id = %id, "Account deleted");
    Ok(ok("User deleted".to_string()))
}
