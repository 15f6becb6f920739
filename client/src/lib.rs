//! # Cucina Client
//!
//! Client-side state layer for the food-ordering system.
//!
//! Each remotely fetched resource (menu items, orders, the profile, the
//! session) lives in its own slice with its own action enum and reducer.
//! [`app`] composes the slices into one [`app::AppState`] behind a single
//! [`app::AppReducer`], run by a `cucina_runtime::Store`.
//!
//! Network access goes through the [`api::Api`] trait injected via
//! [`app::ClientEnvironment`], so reducers stay pure and tests swap in
//! [`api::mock::MockApi`].
//!
//! ## Fetch contract
//!
//! Every fetch follows the same shape: the request action moves its slice to
//! `Loading` synchronously and returns exactly one `Effect::Future` that
//! resolves to exactly one terminal action, success or error. Failures inside
//! the future are converted to the error action, never dropped.

pub mod api;
pub mod app;
pub mod auth;
pub mod cart;
pub mod items;
pub mod orders;
pub mod profile;

pub use api::{Api, FetchError, HttpApi};
pub use app::{AppAction, AppReducer, AppState, ClientEnvironment};
pub use auth::{AuthAction, AuthReducer, AuthState};
pub use cart::{CartAction, CartLine, CartReducer, CartState};
pub use items::{ItemsAction, ItemsReducer, ItemsState};
pub use orders::{OrdersAction, OrdersReducer, OrdersState};
pub use profile::{ProfileAction, ProfileReducer, ProfileState};
