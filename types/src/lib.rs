//! # Cucina Types
//!
//! Shared domain model for the cucina food-ordering system.
//!
//! This crate is the vocabulary both sides of the wire speak:
//! - Domain entities: [`MenuItem`], [`Order`], [`User`], [`Category`]
//! - The response [`Envelope`] every endpoint returns
//! - The [`ApiError`] taxonomy handlers and clients map failures into
//!
//! All wire types serialize with camelCase field names.

pub mod envelope;
pub mod error;
pub mod ids;
pub mod menu;
pub mod order;
pub mod user;

pub use envelope::Envelope;
pub use error::ApiError;
pub use ids::{CategoryId, ItemId, OrderId, UserId};
pub use menu::{Category, MenuItem};
pub use order::{Order, OrderLine, OrderStatus, PlaceOrderReceipt, PlaceOrderRequest};
pub use user::{Credentials, NewUser, User};
