//! End-to-end flows through the composed store with a mock API.

#![allow(clippy::unwrap_used, clippy::panic)] // Test code can unwrap/panic

use cucina_client::api::mock::MockApi;
use cucina_client::{
    AppAction, AppReducer, AppState, AuthAction, ClientEnvironment, ItemsAction, OrdersAction,
    OrdersState,
};
use cucina_runtime::Store;
use cucina_types::{Credentials, ItemId, MenuItem, User, UserId};
use std::sync::Arc;
use std::time::Duration;

type AppStore = Store<AppState, AppAction, ClientEnvironment, AppReducer>;

fn store_with(api: MockApi) -> AppStore {
    let env = ClientEnvironment::new(Arc::new(api));
    Store::new(AppState::default(), AppReducer, env)
}

fn menu_item(name: &str, price_cents: i64) -> MenuItem {
    MenuItem {
        id: ItemId::new(),
        item_name: name.into(),
        description: None,
        category: "Pizza".into(),
        price_cents,
        image_src: None,
        is_available: true,
    }
}

fn account(username: &str, password: &str) -> User {
    User {
        id: UserId::new(),
        username: username.into(),
        password: password.into(),
        first_name: "Alice".into(),
        last_name: "Martin".into(),
        email: "alice@example.com".into(),
        address: None,
        phone: None,
        is_admin: false,
    }
}

/// Poll the store until the predicate holds or the deadline passes.
async fn wait_for_state<F>(store: &AppStore, predicate: F)
where
    F: Fn(&AppState) -> bool,
{
    for _ in 0..100 {
        if store.state(&predicate).await {
            return;
        }
        tokio::time::sleep(Duration::from_millis(10)).await;
    }
    panic!("state never reached the expected condition");
}

#[tokio::test]
async fn menu_fetch_resolves_into_success_state() {
    let store = store_with(MockApi::new().with_items(vec![menu_item("Margherita", 1250)]));

    let received = store
        .send_and_wait_for(
            AppAction::Items(ItemsAction::Fetch),
            |a| matches!(a, AppAction::Items(ItemsAction::Received(_))),
            Duration::from_secs(1),
        )
        .await
        .unwrap();

    match received {
        AppAction::Items(ItemsAction::Received(items)) => assert_eq!(items.len(), 1),
        other => panic!("unexpected action {other:?}"),
    }

    wait_for_state(&store, |s| s.items.items.is_success()).await;
    let names: Vec<String> = store
        .state(|s| {
            s.items
                .items
                .data
                .clone()
                .unwrap_or_default()
                .into_iter()
                .map(|i| i.item_name)
                .collect()
        })
        .await;
    assert_eq!(names, vec!["Margherita".to_string()]);
}

#[tokio::test]
async fn unreachable_backend_lands_the_slice_in_error() {
    let store = store_with(MockApi::failing("connection refused"));

    store
        .send_and_wait_for(
            AppAction::Orders(OrdersAction::FetchAll),
            |a| matches!(a, AppAction::Orders(OrdersAction::Failed(_))),
            Duration::from_secs(1),
        )
        .await
        .unwrap();

    wait_for_state(&store, |s| s.orders.orders.is_error()).await;
    let error = store.state(|s| s.orders.orders.error.clone()).await;
    assert_eq!(error.as_deref(), Some("network failure: connection refused"));
}

#[tokio::test(start_paused = true)]
async fn failed_login_error_clears_itself_after_two_seconds() {
    let store = store_with(MockApi::new().with_users(vec![account("alice", "hunter2")]));

    let mut actions = store.subscribe_actions();

    store
        .send(AppAction::Auth(AuthAction::Login(Credentials {
            username: "alice".into(),
            password: "wrong".into(),
        })))
        .await
        .unwrap();

    // First the rejection...
    loop {
        if let AppAction::Auth(AuthAction::LoginFailed(_)) = actions.recv().await.unwrap() {
            break;
        }
    }
    wait_for_state(&store, |s| s.auth.login_error.is_some()).await;

    // ...then the delayed clear.
    loop {
        if let AppAction::Auth(AuthAction::ClearLoginError) = actions.recv().await.unwrap() {
            break;
        }
    }
    wait_for_state(&store, |s| s.auth.login_error.is_none()).await;
}

#[tokio::test]
async fn logout_cleans_up_the_orders_slice() {
    let store = store_with(MockApi::new());

    // Seed a logged-in session with fetched orders.
    store
        .send(AppAction::Auth(AuthAction::LoginSucceeded(account(
            "alice", "hunter2",
        ))))
        .await
        .unwrap();
    store
        .send(AppAction::Orders(OrdersAction::Received(vec![])))
        .await
        .unwrap();
    wait_for_state(&store, |s| s.orders.orders.is_success()).await;

    store.send(AppAction::Auth(AuthAction::Logout)).await.unwrap();

    wait_for_state(&store, |s| {
        !s.auth.is_logged_in() && s.orders == OrdersState::default()
    })
    .await;
}
