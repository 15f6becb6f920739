//! # Cucina Server
//!
//! HTTP API for the food-ordering system.
//!
//! Every endpoint responds with the uniform `{status, data|message}`
//! envelope, and the HTTP status code always agrees with the body's
//! `status` field.
//!
//! Handlers are thin: they validate input, call a repository trait, and map
//! the outcome into the envelope. Storage is behind the [`repository`]
//! traits, with a `PostgreSQL` implementation for production and an
//! in-memory implementation for tests.

pub mod api;
pub mod config;
pub mod error;
pub mod repository;
pub mod server;

pub use config::Config;
pub use error::ServerError;
pub use server::{build_router, AppState};
