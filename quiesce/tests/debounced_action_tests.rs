// Copyright 2025 Umberto Gotti <umberto.gotti@umbertogotti.dev>
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

use std::sync::{Arc, Mutex};
use std::time::Duration;

use quiesce::DebouncedAction;
use quiesce_test_utils::drain;
use tokio::time::advance;

fn recorder() -> (Arc<Mutex<Vec<String>>>, impl FnMut(String) + Send + 'static) {
    let seen = Arc::new(Mutex::new(Vec::new()));
    let sink = Arc::clone(&seen);
    (seen, move |args: String| sink.lock().unwrap().push(args))
}

#[tokio::test]
async fn burst_fires_once_with_last_arguments() {
    tokio::time::pause();

    let (seen, action) = recorder();
    let debounced = DebouncedAction::new(Duration::from_millis(300), action);

    debounced.call("first".to_string());
    debounced.call("second".to_string());
    debounced.call("third".to_string());
    drain().await;
    assert!(seen.lock().unwrap().is_empty());

    // Strictly past the deadline; the timer wheel rounds deadlines up.
    advance(Duration::from_millis(301)).await;
    drain().await;
    assert_eq!(*seen.lock().unwrap(), vec!["third".to_string()]);
}

#[tokio::test]
async fn each_call_reschedules_the_invocation() {
    tokio::time::pause();

    let (seen, action) = recorder();
    let debounced = DebouncedAction::new(Duration::from_millis(300), action);

    debounced.call("a".to_string());
    drain().await;
    advance(Duration::from_millis(200)).await;

    debounced.call("b".to_string());
    drain().await;
    advance(Duration::from_millis(200)).await;
    drain().await;

    // 400ms in, but only 200ms since the last call.
    assert!(seen.lock().unwrap().is_empty());

    advance(Duration::from_millis(101)).await;
    drain().await;
    assert_eq!(*seen.lock().unwrap(), vec!["b".to_string()]);
}

#[tokio::test]
async fn separate_quiet_periods_fire_separately() {
    tokio::time::pause();

    let (seen, action) = recorder();
    let debounced = DebouncedAction::new(Duration::from_millis(100), action);

    debounced.call("one".to_string());
    drain().await;
    advance(Duration::from_millis(101)).await;
    drain().await;

    debounced.call("two".to_string());
    drain().await;
    advance(Duration::from_millis(101)).await;
    drain().await;

    assert_eq!(
        *seen.lock().unwrap(),
        vec!["one".to_string(), "two".to_string()]
    );
}

#[tokio::test]
async fn dispose_drops_the_pending_invocation() {
    tokio::time::pause();

    let (seen, action) = recorder();
    let debounced = DebouncedAction::new(Duration::from_millis(300), action);

    debounced.call("doomed".to_string());
    drain().await;
    debounced.dispose();

    advance(Duration::from_millis(1000)).await;
    drain().await;
    assert!(seen.lock().unwrap().is_empty());
}

#[tokio::test]
async fn drop_cancels_like_dispose() {
    tokio::time::pause();

    let (seen, action) = recorder();
    let debounced = DebouncedAction::new(Duration::from_millis(300), action);

    debounced.call("doomed".to_string());
    drain().await;
    drop(debounced);

    advance(Duration::from_millis(1000)).await;
    drain().await;
    assert!(seen.lock().unwrap().is_empty());
}
