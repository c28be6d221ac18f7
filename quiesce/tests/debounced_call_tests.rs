// Copyright 2025 Umberto Gotti <umberto.gotti@umbertogotti.dev>
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

use std::sync::{Arc, Mutex};
use std::time::Duration;

use quiesce::{CallOptions, CancellationToken, DebouncedCall, QuiesceError};
use quiesce_test_utils::drain;
use tokio::time::{advance, sleep};

/// Echo operation: resolves to `result:<value>` after the given latency.
async fn echo_after(
    value: String,
    latency: Duration,
    _token: CancellationToken,
) -> quiesce::Result<String> {
    if !latency.is_zero() {
        sleep(latency).await;
    }
    Ok(format!("result:{value}"))
}

fn options(delay_ms: u64) -> CallOptions {
    CallOptions {
        delay: Duration::from_millis(delay_ms),
        ..CallOptions::default()
    }
}

#[tokio::test]
async fn auto_dispatches_when_the_trigger_settles() {
    tokio::time::pause();

    let caller = DebouncedCall::new(String::new(), options(300), |value, token| {
        echo_after(value, Duration::ZERO, token)
    });

    caller.set_trigger("q".to_string());
    drain().await;
    assert!(!caller.is_loading());
    assert_eq!(caller.data(), None);

    // Strictly past the deadline; the timer wheel rounds deadlines up.
    advance(Duration::from_millis(301)).await;
    drain().await;

    assert_eq!(caller.data(), Some("result:q".to_string()));
    assert!(!caller.is_loading());
    assert!(caller.error().is_none());
}

#[tokio::test]
async fn immediate_option_dispatches_on_construction() {
    tokio::time::pause();

    let caller = DebouncedCall::new(
        "init".to_string(),
        CallOptions {
            immediate: true,
            ..options(300)
        },
        |value, token| echo_after(value, Duration::ZERO, token),
    );

    drain().await;
    assert_eq!(caller.data(), Some("result:init".to_string()));
}

#[tokio::test]
async fn rapid_calls_apply_only_the_newest_result() {
    tokio::time::pause();

    let caller = DebouncedCall::new(String::new(), options(0), |value: String, token| {
        // Earlier triggers take longer, simulating out-of-order I/O:
        // "a" would resolve after "abc".
        let latency = Duration::from_millis(600 - 100 * value.len() as u64);
        echo_after(value, latency, token)
    });

    caller.call(Some("a".to_string()));
    drain().await;
    caller.call(Some("ab".to_string()));
    drain().await;
    caller.call(Some("abc".to_string()));
    drain().await;
    assert!(caller.is_loading());

    advance(Duration::from_millis(600)).await;
    drain().await;

    assert_eq!(caller.data(), Some("result:abc".to_string()));
    assert!(caller.error().is_none());
    assert!(!caller.is_loading());
}

#[tokio::test]
async fn skip_empty_clears_state_and_issues_no_call() {
    tokio::time::pause();

    let issued = Arc::new(Mutex::new(0u32));
    let counter = Arc::clone(&issued);
    let caller = DebouncedCall::new(
        String::new(),
        CallOptions {
            skip_empty: true,
            immediate: true,
            ..options(100)
        },
        move |value, token| {
            *counter.lock().unwrap() += 1;
            echo_after(value, Duration::ZERO, token)
        },
    );

    drain().await;
    let state = caller.state();
    assert_eq!(state.data, None);
    assert!(state.error.is_none());
    assert!(!state.loading);
    assert_eq!(*issued.lock().unwrap(), 0);

    // Whitespace-only counts as empty too.
    caller.call(Some("   ".to_string()));
    drain().await;
    assert_eq!(*issued.lock().unwrap(), 0);

    caller.call(Some("real".to_string()));
    drain().await;
    assert_eq!(*issued.lock().unwrap(), 1);
    assert_eq!(caller.data(), Some("result:real".to_string()));
}

#[tokio::test]
async fn empty_trigger_supersedes_an_inflight_call() {
    tokio::time::pause();

    let caller = DebouncedCall::new(
        String::new(),
        CallOptions {
            skip_empty: true,
            ..options(0)
        },
        |value, token| echo_after(value, Duration::from_millis(500), token),
    );

    caller.call(Some("slow".to_string()));
    drain().await;
    assert!(caller.is_loading());

    caller.call(Some(String::new()));
    drain().await;
    assert!(!caller.is_loading());

    // The superseded call's result is never applied.
    advance(Duration::from_millis(501)).await;
    drain().await;
    assert_eq!(caller.data(), None);
}

#[tokio::test]
async fn failure_populates_error_and_keeps_previous_data() {
    tokio::time::pause();

    let caller = DebouncedCall::new(String::new(), options(0), |value: String, token| async move {
        if value == "bad" {
            Err(QuiesceError::call_error("backend rejected request"))
        } else {
            echo_after(value, Duration::ZERO, token).await
        }
    });

    caller.call(Some("good".to_string()));
    drain().await;
    assert_eq!(caller.data(), Some("result:good".to_string()));

    caller.call(Some("bad".to_string()));
    drain().await;

    let state = caller.state();
    assert_eq!(state.data, Some("result:good".to_string()));
    assert!(matches!(state.error, Some(QuiesceError::Call { .. })));
    assert!(!state.loading);

    // A new dispatch clears the previous error.
    caller.call(Some("good".to_string()));
    drain().await;
    assert!(caller.error().is_none());
}

#[tokio::test]
async fn callbacks_fire_only_for_applied_outcomes() {
    tokio::time::pause();

    let successes: Arc<Mutex<Vec<String>>> = Arc::new(Mutex::new(Vec::new()));
    let failures: Arc<Mutex<Vec<String>>> = Arc::new(Mutex::new(Vec::new()));
    let on_success = {
        let successes = Arc::clone(&successes);
        move |data: &String| successes.lock().unwrap().push(data.clone())
    };
    let on_failure = {
        let failures = Arc::clone(&failures);
        move |error: &QuiesceError| failures.lock().unwrap().push(error.to_string())
    };

    let caller = DebouncedCall::with_callbacks(
        String::new(),
        options(0),
        |value: String, token| {
            let latency = Duration::from_millis(600 - 100 * value.len() as u64);
            echo_after(value, latency, token)
        },
        Some(on_success),
        Some(on_failure),
    );

    // "a" is superseded before it resolves; its callback never fires.
    caller.call(Some("a".to_string()));
    drain().await;
    caller.call(Some("abc".to_string()));
    drain().await;

    advance(Duration::from_millis(600)).await;
    drain().await;

    assert_eq!(*successes.lock().unwrap(), vec!["result:abc".to_string()]);
    assert!(failures.lock().unwrap().is_empty());
}

#[tokio::test]
async fn manual_call_defaults_to_the_debounced_trigger() {
    tokio::time::pause();

    let caller = DebouncedCall::new("preset".to_string(), options(300), |value, token| {
        echo_after(value, Duration::ZERO, token)
    });

    caller.call(None);
    drain().await;
    assert_eq!(caller.data(), Some("result:preset".to_string()));
}

#[tokio::test]
async fn dispose_cancels_the_inflight_call() {
    tokio::time::pause();

    let caller = DebouncedCall::new(String::new(), options(0), |value, token| {
        echo_after(value, Duration::from_millis(500), token)
    });

    caller.call(Some("pending".to_string()));
    drain().await;
    let before = caller.state();
    assert!(before.loading);

    caller.dispose();
    advance(Duration::from_millis(1000)).await;
    drain().await;

    // No observable mutation after teardown.
    let after = caller.state();
    assert_eq!(after.data, before.data);
    assert!(after.error.is_none());
    assert_eq!(after.loading, before.loading);

    // Dispatch after dispose is inert.
    caller.call(Some("late".to_string()));
    drain().await;
    assert_eq!(caller.data(), None);
}
