//! Application state tree and the composed reducer.
//!
//! Slices stay mutually independent: each action is routed to exactly one
//! slice reducer, and its effects are lifted into [`AppAction`] with
//! `Effect::map`. The single cross-slice rule lives here: a confirmed logout
//! also resets the orders slice.

use crate::api::{Api, HttpApi};
use crate::auth::{AuthAction, AuthReducer, AuthState};
use crate::cart::{CartAction, CartReducer, CartState};
use crate::items::{ItemsAction, ItemsReducer, ItemsState};
use crate::orders::{OrdersAction, OrdersReducer, OrdersState};
use crate::profile::{ProfileAction, ProfileReducer, ProfileState};
use cucina_core::{effect::Effect, reducer::Reducer, SmallVec};
use std::sync::Arc;

/// Dependencies injected into every slice reducer.
#[derive(Clone)]
pub struct ClientEnvironment {
    /// Gateway to the remote API
    pub api: Arc<dyn Api>,
}

impl ClientEnvironment {
    /// Build an environment around any [`Api`] implementation
    #[must_use]
    pub fn new(api: Arc<dyn Api>) -> Self {
        Self { api }
    }

    /// Build the production environment against a server base URL
    #[must_use]
    pub fn live(base_url: impl Into<String>) -> Self {
        Self::new(Arc::new(HttpApi::new(base_url)))
    }
}

impl std::fmt::Debug for ClientEnvironment {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ClientEnvironment").finish_non_exhaustive()
    }
}

/// The whole client state tree.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct AppState {
    /// Session slice
    pub auth: AuthState,

    /// Menu slice
    pub items: ItemsState,

    /// Orders slice
    pub orders: OrdersState,

    /// Profile slice
    pub profile: ProfileState,

    /// Cart slice
    pub cart: CartState,
}

/// Any message the application can process, tagged by owning slice.
#[derive(Debug, Clone, PartialEq)]
pub enum AppAction {
    /// Session messages
    Auth(AuthAction),

    /// Menu messages
    Items(ItemsAction),

    /// Orders messages
    Orders(OrdersAction),

    /// Profile messages
    Profile(ProfileAction),

    /// Cart messages
    Cart(CartAction),
}

/// The composed application reducer.
///
/// Routing is total: every action belongs to exactly one slice, and a slice
/// never observes another slice's actions, so dispatching a menu action can
/// never disturb the orders slice.
#[derive(Debug, Clone, Copy, Default)]
pub struct AppReducer;

impl Reducer for AppReducer {
    type State = AppState;
    type Action = AppAction;
    type Environment = ClientEnvironment;

    fn reduce(
        &self,
        state: &mut Self::State,
        action: Self::Action,
        env: &Self::Environment,
    ) -> SmallVec<[Effect<Self::Action>; 4]> {
        match action {
            AppAction::Auth(action) => {
                let logged_out = action == AuthAction::LogoutSucceeded;

                let mut effects: SmallVec<[Effect<AppAction>; 4]> = AuthReducer
                    .reduce(&mut state.auth, action, env)
                    .into_iter()
                    .map(|e| e.map(AppAction::Auth))
                    .collect();

                // Cross-slice rule: a confirmed logout clears the orders list
                if logged_out {
                    effects.extend(
                        OrdersReducer
                            .reduce(&mut state.orders, OrdersAction::Cleanup, env)
                            .into_iter()
                            .map(|e| e.map(AppAction::Orders)),
                    );
                }

                effects
            },
            AppAction::Items(action) => ItemsReducer
                .reduce(&mut state.items, action, env)
                .into_iter()
                .map(|e| e.map(AppAction::Items))
                .collect(),
            AppAction::Orders(action) => OrdersReducer
                .reduce(&mut state.orders, action, env)
                .into_iter()
                .map(|e| e.map(AppAction::Orders))
                .collect(),
            AppAction::Profile(action) => ProfileReducer
                .reduce(&mut state.profile, action, env)
                .into_iter()
                .map(|e| e.map(AppAction::Profile))
                .collect(),
            AppAction::Cart(action) => CartReducer
                .reduce(&mut state.cart, action, env)
                .into_iter()
                .map(|e| e.map(AppAction::Cart))
                .collect(),
        }
    }
}
