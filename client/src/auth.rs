//! Session slice: login, registration, logout.
//!
//! A failed login sets `login_error` and schedules a delayed
//! `ClearLoginError`, so the banner disappears on its own after two seconds.

use crate::app::ClientEnvironment;
use cucina_core::{
    effect::Effect, reducer::Reducer, remote::FetchStatus, smallvec, SmallVec,
};
use cucina_types::{Credentials, NewUser, User};
use std::sync::Arc;
use std::time::Duration;

/// How long a login failure stays on screen before auto-clearing.
pub const LOGIN_ERROR_TTL: Duration = Duration::from_secs(2);

/// Slice state for the session.
#[derive(Debug, Clone, PartialEq)]
pub struct AuthState {
    /// Username of the signed-in user, if any
    pub current_user: Option<String>,

    /// Full account record of the signed-in user
    pub profile: Option<User>,

    /// Status of the most recent auth request
    pub status: FetchStatus,

    /// Failure message from the most recent login or registration attempt
    pub login_error: Option<String>,
}

impl Default for AuthState {
    fn default() -> Self {
        Self {
            current_user: None,
            profile: None,
            // Nothing in flight before the first auth request
            status: FetchStatus::Success,
            login_error: None,
        }
    }
}

impl AuthState {
    /// Whether someone is signed in
    #[must_use]
    pub const fn is_logged_in(&self) -> bool {
        self.current_user.is_some()
    }
}

/// Messages owned by the session slice.
#[derive(Debug, Clone, PartialEq)]
pub enum AuthAction {
    /// Request a login
    Login(Credentials),

    /// The credentials were accepted
    LoginSucceeded(User),

    /// The credentials were rejected
    LoginFailed(String),

    /// Remove the login failure banner
    ClearLoginError,

    /// Request account creation
    Register(NewUser),

    /// The account was created and the user is signed in
    RegisterSucceeded(User),

    /// The registration was rejected
    RegisterFailed(String),

    /// Sign out
    Logout,

    /// The session has ended
    LogoutSucceeded,
}

/// Reducer for the session slice.
#[derive(Debug, Clone, Copy, Default)]
pub struct AuthReducer;

impl Reducer for AuthReducer {
    type State = AuthState;
    type Action = AuthAction;
    type Environment = ClientEnvironment;

    fn reduce(
        &self,
        state: &mut Self::State,
        action: Self::Action,
        env: &Self::Environment,
    ) -> SmallVec<[Effect<Self::Action>; 4]> {
        match action {
            AuthAction::Login(credentials) => {
                state.status = FetchStatus::Loading;
                state.login_error = None;

                let api = Arc::clone(&env.api);
                smallvec![Effect::Future(Box::pin(async move {
                    Some(match api.login(credentials).await {
                        Ok(user) => AuthAction::LoginSucceeded(user),
                        Err(e) => AuthAction::LoginFailed(e.to_string()),
                    })
                }))]
            },
            AuthAction::LoginSucceeded(user) | AuthAction::RegisterSucceeded(user) => {
                state.status = FetchStatus::Success;
                state.current_user = Some(user.username.clone());
                state.profile = Some(user);
                state.login_error = None;
                SmallVec::new()
            },
            AuthAction::LoginFailed(error) => {
                state.status = FetchStatus::Error;
                state.login_error = Some(error);

                smallvec![Effect::Delay {
                    duration: LOGIN_ERROR_TTL,
                    action: Box::new(AuthAction::ClearLoginError),
                }]
            },
            AuthAction::ClearLoginError => {
                state.login_error = None;
                SmallVec::new()
            },
            AuthAction::Register(new_user) => {
                state.status = FetchStatus::Loading;
                state.login_error = None;

                let api = Arc::clone(&env.api);
                smallvec![Effect::Future(Box::pin(async move {
                    Some(match api.register(new_user).await {
                        Ok(user) => AuthAction::RegisterSucceeded(user),
                        Err(e) => AuthAction::RegisterFailed(e.to_string()),
                    })
                }))]
            },
            AuthAction::RegisterFailed(error) => {
                state.status = FetchStatus::Error;
                state.login_error = Some(error);
                SmallVec::new()
            },
            AuthAction::Logout => {
                state.current_user = None;
                state.profile = None;
                state.status = FetchStatus::Success;

                // Confirmation action drives the cross-slice orders cleanup
                smallvec![Effect::Future(Box::pin(async {
                    Some(AuthAction::LogoutSucceeded)
                }))]
            },
            AuthAction::LogoutSucceeded => SmallVec::new(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::mock::MockApi;
    use cucina_testing::{assertions, ReducerTest};
    use cucina_types::UserId;

    fn env() -> ClientEnvironment {
        ClientEnvironment::new(Arc::new(MockApi::new()))
    }

    fn user(username: &str) -> User {
        User {
            id: UserId::new(),
            username: username.into(),
            password: "hunter2".into(),
            first_name: "Alice".into(),
            last_name: "Martin".into(),
            email: "alice@example.com".into(),
            address: None,
            phone: None,
            is_admin: false,
        }
    }

    #[test]
    fn login_request_clears_error_and_loads() {
        let mut state = AuthState::default();
        state.login_error = Some("stale".into());

        ReducerTest::new(AuthReducer)
            .with_env(env())
            .given_state(state)
            .when_action(AuthAction::Login(Credentials {
                username: "alice".into(),
                password: "hunter2".into(),
            }))
            .then_state(|state| {
                assert_eq!(state.status, FetchStatus::Loading);
                assert!(state.login_error.is_none());
            })
            .then_effects(|effects| {
                assertions::assert_effects_count(effects, 1);
                assertions::assert_has_future_effect(effects);
            })
            .run();
    }

    #[test]
    fn login_failure_sets_error_and_schedules_the_clear() {
        ReducerTest::new(AuthReducer)
            .with_env(env())
            .given_state(AuthState::default())
            .when_action(AuthAction::LoginFailed("Invalid credentials".into()))
            .then_state(|state| {
                assert_eq!(state.status, FetchStatus::Error);
                assert_eq!(state.login_error.as_deref(), Some("Invalid credentials"));
            })
            .then_effects(|effects| {
                assertions::assert_effects_count(effects, 1);
                assertions::assert_has_delay_effect(effects);
                match &effects[0] {
                    Effect::Delay { duration, action } => {
                        assert_eq!(*duration, LOGIN_ERROR_TTL);
                        assert_eq!(**action, AuthAction::ClearLoginError);
                    },
                    other => unreachable!("expected Delay, got {other:?}"),
                }
            })
            .run();
    }

    #[test]
    fn clear_login_error_removes_the_banner() {
        let mut state = AuthState::default();
        state.status = FetchStatus::Error;
        state.login_error = Some("Invalid credentials".into());

        ReducerTest::new(AuthReducer)
            .with_env(env())
            .given_state(state)
            .when_action(AuthAction::ClearLoginError)
            .then_state(|state| assert!(state.login_error.is_none()))
            .then_effects(assertions::assert_no_effects)
            .run();
    }

    #[test]
    fn login_success_signs_the_user_in() {
        ReducerTest::new(AuthReducer)
            .with_env(env())
            .given_state(AuthState::default())
            .when_action(AuthAction::LoginSucceeded(user("alice")))
            .then_state(|state| {
                assert!(state.is_logged_in());
                assert_eq!(state.current_user.as_deref(), Some("alice"));
                assert_eq!(state.status, FetchStatus::Success);
            })
            .then_effects(assertions::assert_no_effects)
            .run();
    }

    #[test]
    fn logout_clears_the_session_and_confirms() {
        let mut state = AuthState::default();
        state.current_user = Some("alice".into());
        state.profile = Some(user("alice"));

        ReducerTest::new(AuthReducer)
            .with_env(env())
            .given_state(state)
            .when_action(AuthAction::Logout)
            .then_state(|state| {
                assert!(!state.is_logged_in());
                assert!(state.profile.is_none());
            })
            .then_effects(|effects| {
                assertions::assert_effects_count(effects, 1);
                assertions::assert_has_future_effect(effects);
            })
            .run();
    }
}
