//! Integration tests for Store action broadcasting.
//!
//! Request-response waiting (`send_and_wait_for`) and action observation
//! (`subscribe_actions`) both ride on the broadcast channel; these tests
//! pin down its semantics.

#![allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)]

use cucina_core::{effect::Effect, reducer::Reducer, smallvec, SmallVec};
use cucina_runtime::{Store, StoreConfig, StoreError};
use std::sync::Arc;
use std::time::Duration;

#[derive(Debug, Clone, PartialEq)]
enum FetchAction {
    Request { id: u64 },
    Step { id: u64, step: u32 },
    Resolved { id: u64 },
    Increment,
    Incremented { value: u32 },
}

#[derive(Debug, Clone, Default)]
struct FetchState {
    counter: u32,
    steps: Vec<u32>,
}

#[derive(Clone)]
struct FetchReducer;

impl Reducer for FetchReducer {
    type State = FetchState;
    type Action = FetchAction;
    type Environment = ();

    fn reduce(
        &self,
        state: &mut Self::State,
        action: Self::Action,
        (): &Self::Environment,
    ) -> SmallVec<[Effect<Self::Action>; 4]> {
        match action {
            FetchAction::Request { id } => {
                smallvec![Effect::Future(Box::pin(async move {
                    tokio::time::sleep(Duration::from_millis(10)).await;
                    Some(FetchAction::Step { id, step: 1 })
                }))]
            },
            FetchAction::Step { id, step } => {
                state.steps.push(step);

                if step < 3 {
                    smallvec![Effect::Future(Box::pin(async move {
                        tokio::time::sleep(Duration::from_millis(10)).await;
                        Some(FetchAction::Step { id, step: step + 1 })
                    }))]
                } else {
                    smallvec![Effect::Future(Box::pin(async move {
                        Some(FetchAction::Resolved { id })
                    }))]
                }
            },
            FetchAction::Resolved { .. } => SmallVec::new(),
            FetchAction::Increment => {
                state.counter += 1;
                let value = state.counter;
                smallvec![Effect::Future(Box::pin(async move {
                    Some(FetchAction::Incremented { value })
                }))]
            },
            FetchAction::Incremented { .. } => SmallVec::new(),
        }
    }
}

#[tokio::test]
async fn wait_for_resolves_on_immediate_terminal_action() {
    let store = Store::new(FetchState::default(), FetchReducer, ());

    let result = store
        .send_and_wait_for(
            FetchAction::Increment,
            |action| matches!(action, FetchAction::Incremented { .. }),
            Duration::from_secs(1),
        )
        .await
        .unwrap();

    assert_eq!(result, FetchAction::Incremented { value: 1 });
}

#[tokio::test]
async fn wait_for_follows_a_multi_step_chain() {
    let store = Store::new(FetchState::default(), FetchReducer, ());

    let result = store
        .send_and_wait_for(
            FetchAction::Request { id: 42 },
            |action| matches!(action, FetchAction::Resolved { id: 42 }),
            Duration::from_secs(1),
        )
        .await
        .unwrap();

    assert_eq!(result, FetchAction::Resolved { id: 42 });
    assert_eq!(store.state(|s| s.steps.clone()).await, vec![1, 2, 3]);
}

#[tokio::test]
async fn wait_for_times_out_when_no_action_matches() {
    let store = Store::new(FetchState::default(), FetchReducer, ());

    let result = store
        .send_and_wait_for(
            FetchAction::Increment,
            |action| matches!(action, FetchAction::Resolved { .. }),
            Duration::from_millis(50),
        )
        .await;

    assert!(matches!(result, Err(StoreError::Timeout)));
}

#[tokio::test]
async fn concurrent_waiters_match_their_own_requests() {
    let config = StoreConfig::default().with_broadcast_capacity(64);
    let store = Arc::new(Store::with_config(FetchState::default(), FetchReducer, (), config));

    let mut handles = vec![];
    for id in 1..=5 {
        let store = Arc::clone(&store);
        handles.push(tokio::spawn(async move {
            store
                .send_and_wait_for(
                    FetchAction::Request { id },
                    move |action| {
                        matches!(action, FetchAction::Resolved { id: resolved } if *resolved == id)
                    },
                    Duration::from_secs(2),
                )
                .await
        }));
    }

    for (i, handle) in handles.into_iter().enumerate() {
        let result = handle.await.expect("task panicked");
        assert!(result.is_ok(), "request {} should resolve", i + 1);
    }

    // 5 chains of 3 steps each, interleaved
    assert_eq!(store.state(|s| s.steps.len()).await, 15);
}

#[tokio::test]
async fn initial_actions_are_not_broadcast() {
    let store = Store::new(FetchState::default(), FetchReducer, ());
    let mut rx = store.subscribe_actions();

    store.send(FetchAction::Increment).await.unwrap();
    tokio::time::sleep(Duration::from_millis(50)).await;

    let actions: Vec<_> = std::iter::from_fn(|| rx.try_recv().ok()).collect();
    assert_eq!(actions.len(), 1);
    assert!(matches!(actions[0], FetchAction::Incremented { .. }));
}

#[tokio::test]
async fn sequential_effects_broadcast_in_order() {
    #[derive(Debug, Clone, PartialEq)]
    enum SeqAction {
        Start,
        First,
        Second,
    }

    #[derive(Clone)]
    struct SeqReducer;

    impl Reducer for SeqReducer {
        type State = ();
        type Action = SeqAction;
        type Environment = ();

        fn reduce(
            &self,
            (): &mut Self::State,
            action: Self::Action,
            (): &Self::Environment,
        ) -> SmallVec<[Effect<Self::Action>; 4]> {
            match action {
                SeqAction::Start => smallvec![Effect::Sequential(vec![
                    Effect::Future(Box::pin(async {
                        tokio::time::sleep(Duration::from_millis(10)).await;
                        Some(SeqAction::First)
                    })),
                    Effect::Future(Box::pin(async {
                        tokio::time::sleep(Duration::from_millis(10)).await;
                        Some(SeqAction::Second)
                    })),
                ])],
                SeqAction::First | SeqAction::Second => SmallVec::new(),
            }
        }
    }

    let store = Store::new((), SeqReducer, ());
    let mut rx = store.subscribe_actions();

    store.send(SeqAction::Start).await.unwrap();

    let first = tokio::time::timeout(Duration::from_secs(1), rx.recv())
        .await
        .expect("timeout")
        .expect("channel closed");
    let second = tokio::time::timeout(Duration::from_secs(1), rx.recv())
        .await
        .expect("timeout")
        .expect("channel closed");

    assert_eq!(first, SeqAction::First);
    assert_eq!(second, SeqAction::Second);
}

#[tokio::test]
async fn parallel_effects_all_broadcast() {
    #[derive(Debug, Clone, PartialEq)]
    enum ParAction {
        Start,
        Left,
        Right,
    }

    #[derive(Clone)]
    struct ParReducer;

    impl Reducer for ParReducer {
        type State = ();
        type Action = ParAction;
        type Environment = ();

        fn reduce(
            &self,
            (): &mut Self::State,
            action: Self::Action,
            (): &Self::Environment,
        ) -> SmallVec<[Effect<Self::Action>; 4]> {
            match action {
                ParAction::Start => smallvec![Effect::Parallel(vec![
                    Effect::Future(Box::pin(async {
                        tokio::time::sleep(Duration::from_millis(10)).await;
                        Some(ParAction::Left)
                    })),
                    Effect::Future(Box::pin(async {
                        tokio::time::sleep(Duration::from_millis(15)).await;
                        Some(ParAction::Right)
                    })),
                ])],
                ParAction::Left | ParAction::Right => SmallVec::new(),
            }
        }
    }

    let store = Store::new((), ParReducer, ());
    let mut rx = store.subscribe_actions();

    store.send(ParAction::Start).await.unwrap();

    let mut results = Vec::new();
    for _ in 0..2 {
        if let Ok(Ok(action)) = tokio::time::timeout(Duration::from_secs(1), rx.recv()).await {
            results.push(action);
        }
    }

    // Order between the two branches is unspecified
    assert_eq!(results.len(), 2);
    assert!(results.contains(&ParAction::Left));
    assert!(results.contains(&ParAction::Right));
}

#[tokio::test]
async fn multiple_subscribers_each_see_every_action() {
    let store = Store::new(FetchState::default(), FetchReducer, ());

    let mut rx1 = store.subscribe_actions();
    let mut rx2 = store.subscribe_actions();

    store.send(FetchAction::Increment).await.unwrap();
    store.send(FetchAction::Increment).await.unwrap();
    tokio::time::sleep(Duration::from_millis(50)).await;

    let count1 = std::iter::from_fn(|| rx1.try_recv().ok()).count();
    let count2 = std::iter::from_fn(|| rx2.try_recv().ok()).count();
    assert_eq!(count1, 2);
    assert_eq!(count2, 2);
}

#[tokio::test]
async fn slow_subscribers_lag_instead_of_blocking_the_store() {
    let config = StoreConfig::default().with_broadcast_capacity(4);
    let store = Store::with_config(FetchState::default(), FetchReducer, (), config);

    let mut rx = store.subscribe_actions();

    for _ in 0..20 {
        store.send(FetchAction::Increment).await.unwrap();
    }
    tokio::time::sleep(Duration::from_millis(100)).await;

    let mut received = 0;
    let mut lagged = false;
    loop {
        match rx.try_recv() {
            Ok(_) => received += 1,
            Err(tokio::sync::broadcast::error::TryRecvError::Lagged(_)) => lagged = true,
            Err(_) => break,
        }
    }

    assert!(lagged, "a capacity-4 buffer should overflow under 20 sends");
    assert!(received > 0);
    assert!(received < 20);
}

#[tokio::test]
async fn dropping_the_store_closes_subscriptions() {
    let store = Store::new(FetchState::default(), FetchReducer, ());
    let mut rx = store.subscribe_actions();

    let waiter = tokio::spawn(async move { rx.recv().await });

    tokio::time::sleep(Duration::from_millis(20)).await;
    drop(store);

    let result = waiter.await.expect("task panicked");
    assert!(matches!(
        result,
        Err(tokio::sync::broadcast::error::RecvError::Closed)
    ));
}
