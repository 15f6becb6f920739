//! Menu items slice.

use crate::app::ClientEnvironment;
use cucina_core::{
    effect::Effect, reducer::Reducer, remote::RemoteData, smallvec, SmallVec,
};
use cucina_types::{ItemId, MenuItem};
use std::sync::Arc;

/// Slice state for the menu.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct ItemsState {
    /// The fetched menu
    pub items: RemoteData<Vec<MenuItem>>,
}

/// Messages owned by the menu slice.
#[derive(Debug, Clone, PartialEq)]
pub enum ItemsAction {
    /// Request the full menu
    Fetch,

    /// The menu arrived
    Received(Vec<MenuItem>),

    /// The fetch failed
    Failed(String),

    /// Request an item update (admin)
    Edit(MenuItem),

    /// The update was applied
    EditSucceeded(MenuItem),

    /// The update was rejected
    EditFailed(String),

    /// Request an item deletion (admin)
    Delete(ItemId),

    /// The deletion was applied
    DeleteSucceeded(ItemId),

    /// The deletion was rejected
    DeleteFailed(String),
}

/// Reducer for the menu slice.
#[derive(Debug, Clone, Copy, Default)]
pub struct ItemsReducer;

impl Reducer for ItemsReducer {
    type State = ItemsState;
    type Action = ItemsAction;
    type Environment = ClientEnvironment;

    fn reduce(
        &self,
        state: &mut Self::State,
        action: Self::Action,
        env: &Self::Environment,
    ) -> SmallVec<[Effect<Self::Action>; 4]> {
        match action {
            ItemsAction::Fetch => {
                state.items.begin();

                let api = Arc::clone(&env.api);
                smallvec![Effect::Future(Box::pin(async move {
                    Some(match api.fetch_items().await {
                        Ok(items) => ItemsAction::Received(items),
                        Err(e) => ItemsAction::Failed(e.to_string()),
                    })
                }))]
            },
            ItemsAction::Received(items) => {
                state.items.resolve(items);
                SmallVec::new()
            },
            ItemsAction::Failed(error) => {
                state.items.reject(error);
                SmallVec::new()
            },
            ItemsAction::Edit(item) => {
                let api = Arc::clone(&env.api);
                smallvec![Effect::Future(Box::pin(async move {
                    Some(match api.update_item(item).await {
                        Ok(item) => ItemsAction::EditSucceeded(item),
                        Err(e) => ItemsAction::EditFailed(e.to_string()),
                    })
                }))]
            },
            ItemsAction::EditSucceeded(item) => {
                if let Some(items) = state.items.data.as_mut() {
                    if let Some(existing) = items.iter_mut().find(|i| i.id == item.id) {
                        *existing = item;
                    }
                }
                SmallVec::new()
            },
            ItemsAction::Delete(id) => {
                let api = Arc::clone(&env.api);
                smallvec![Effect::Future(Box::pin(async move {
                    Some(match api.delete_item(id).await {
                        Ok(id) => ItemsAction::DeleteSucceeded(id),
                        Err(e) => ItemsAction::DeleteFailed(e.to_string()),
                    })
                }))]
            },
            ItemsAction::DeleteSucceeded(id) => {
                if let Some(items) = state.items.data.as_mut() {
                    items.retain(|i| i.id != id);
                }
                SmallVec::new()
            },
            ItemsAction::EditFailed(error) | ItemsAction::DeleteFailed(error) => {
                state.items.reject(error);
                SmallVec::new()
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::mock::MockApi;
    use cucina_testing::{assertions, ReducerTest};

    fn env() -> ClientEnvironment {
        ClientEnvironment::new(Arc::new(MockApi::new()))
    }

    fn item(name: &str) -> MenuItem {
        MenuItem {
            id: ItemId::new(),
            item_name: name.into(),
            description: None,
            category: "Pizza".into(),
            price_cents: 900,
            image_src: None,
            is_available: true,
        }
    }

    #[test]
    fn fetch_moves_slice_to_loading_with_one_future() {
        ReducerTest::new(ItemsReducer)
            .with_env(env())
            .given_state(ItemsState::default())
            .when_action(ItemsAction::Fetch)
            .then_state(|state| assert!(state.items.is_loading()))
            .then_effects(|effects| {
                assertions::assert_effects_count(effects, 1);
                assertions::assert_has_future_effect(effects);
            })
            .run();
    }

    #[test]
    fn received_resolves_the_slice() {
        let menu = vec![item("Margherita")];
        let expected = menu.clone();

        ReducerTest::new(ItemsReducer)
            .with_env(env())
            .given_state(ItemsState::default())
            .when_action(ItemsAction::Received(menu))
            .then_state(move |state| {
                assert!(state.items.is_success());
                assert_eq!(state.items.data.as_ref(), Some(&expected));
            })
            .then_effects(assertions::assert_no_effects)
            .run();
    }

    #[test]
    fn failed_keeps_last_good_menu() {
        let mut state = ItemsState::default();
        state.items.resolve(vec![item("Margherita")]);

        ReducerTest::new(ItemsReducer)
            .with_env(env())
            .given_state(state)
            .when_action(ItemsAction::Failed("connection refused".into()))
            .then_state(|state| {
                assert!(state.items.is_error());
                assert_eq!(state.items.error.as_deref(), Some("connection refused"));
                assert!(state.items.data.is_some());
            })
            .run();
    }

    #[test]
    fn delete_succeeded_removes_the_item() {
        let keep = item("Margherita");
        let gone = item("Hawaiian");
        let gone_id = gone.id;

        let mut state = ItemsState::default();
        state.items.resolve(vec![keep.clone(), gone]);

        ReducerTest::new(ItemsReducer)
            .with_env(env())
            .given_state(state)
            .when_action(ItemsAction::DeleteSucceeded(gone_id))
            .then_state(move |state| {
                assert_eq!(state.items.data, Some(vec![keep.clone()]));
            })
            .run();
    }
}
