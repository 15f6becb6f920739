//! Profile slice: viewing and editing one account.

use crate::app::ClientEnvironment;
use cucina_core::{
    effect::Effect, reducer::Reducer, remote::RemoteData, smallvec, SmallVec,
};
use cucina_types::{User, UserId};
use std::sync::Arc;

/// Slice state for the profile page.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct ProfileState {
    /// The fetched account record
    pub profile: RemoteData<User>,
}

/// Messages owned by the profile slice.
#[derive(Debug, Clone, PartialEq)]
pub enum ProfileAction {
    /// Request the account record
    Fetch(UserId),

    /// The record arrived
    Received(User),

    /// The fetch failed
    Failed(String),

    /// Request a profile update
    Update(User),

    /// The update was applied
    Updated(User),

    /// The update was rejected
    UpdateFailed(String),
}

/// Reducer for the profile slice.
#[derive(Debug, Clone, Copy, Default)]
pub struct ProfileReducer;

impl Reducer for ProfileReducer {
    type State = ProfileState;
    type Action = ProfileAction;
    type Environment = ClientEnvironment;

    fn reduce(
        &self,
        state: &mut Self::State,
        action: Self::Action,
        env: &Self::Environment,
    ) -> SmallVec<[Effect<Self::Action>; 4]> {
        match action {
            ProfileAction::Fetch(id) => {
                state.profile.begin();

                let api = Arc::clone(&env.api);
                smallvec![Effect::Future(Box::pin(async move {
                    Some(match api.fetch_profile(id).await {
                        Ok(user) => ProfileAction::Received(user),
                        Err(e) => ProfileAction::Failed(e.to_string()),
                    })
                }))]
            },
            ProfileAction::Received(user) | ProfileAction::Updated(user) => {
                state.profile.resolve(user);
                SmallVec::new()
            },
            ProfileAction::Update(user) => {
                state.profile.begin();

                let api = Arc::clone(&env.api);
                smallvec![Effect::Future(Box::pin(async move {
                    Some(match api.update_profile(user).await {
                        Ok(user) => ProfileAction::Updated(user),
                        Err(e) => ProfileAction::UpdateFailed(e.to_string()),
                    })
                }))]
            },
            ProfileAction::Failed(error) | ProfileAction::UpdateFailed(error) => {
                state.profile.reject(error);
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

    fn user() -> User {
        User {
            id: UserId::new(),
            username: "alice".into(),
            password: "hunter2".into(),
            first_name: "Alice".into(),
            last_name: "Martin".into(),
            email: "alice@example.com".into(),
            address: Some("1 Rue de la Paix".into()),
            phone: None,
            is_admin: false,
        }
    }

    #[test]
    fn fetch_starts_loading_with_one_future() {
        ReducerTest::new(ProfileReducer)
            .with_env(env())
            .given_state(ProfileState::default())
            .when_action(ProfileAction::Fetch(UserId::new()))
            .then_state(|state| assert!(state.profile.is_loading()))
            .then_effects(|effects| {
                assertions::assert_effects_count(effects, 1);
                assertions::assert_has_future_effect(effects);
            })
            .run();
    }

    #[test]
    fn update_failure_keeps_the_last_fetched_record() {
        let mut state = ProfileState::default();
        state.profile.resolve(user());

        ReducerTest::new(ProfileReducer)
            .with_env(env())
            .given_state(state)
            .when_action(ProfileAction::UpdateFailed("User not found".into()))
            .then_state(|state| {
                assert!(state.profile.is_error());
                assert!(state.profile.data.is_some());
            })
            .run();
    }

    #[test]
    fn updated_replaces_the_record() {
        let mut edited = user();
        edited.phone = Some("0600000000".into());
        let expected = edited.clone();

        let mut state = ProfileState::default();
        state.profile.resolve(user());

        ReducerTest::new(ProfileReducer)
            .with_env(env())
            .given_state(state)
            .when_action(ProfileAction::Updated(edited))
            .then_state(move |state| {
                assert!(state.profile.is_success());
                assert_eq!(state.profile.data.as_ref().and_then(|u| u.phone.as_deref()), expected.phone.as_deref());
            })
            .run();
    }
}
