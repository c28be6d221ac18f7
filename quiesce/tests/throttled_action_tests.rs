// Copyright 2025 Umberto Gotti <umberto.gotti@umbertogotti.dev>
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

use std::sync::{Arc, Mutex};
use std::time::Duration;

use quiesce::ThrottledAction;
use quiesce_test_utils::drain;
use tokio::time::advance;

fn recorder() -> (Arc<Mutex<Vec<&'static str>>>, impl FnMut(&'static str) + Send + 'static) {
    let seen = Arc::new(Mutex::new(Vec::new()));
    let sink = Arc::clone(&seen);
    (seen, move |args| sink.lock().unwrap().push(args))
}

#[tokio::test]
async fn leading_call_fires_immediately_then_one_trailing() {
    tokio::time::pause();

    let (seen, action) = recorder();
    let throttled = ThrottledAction::new(Duration::from_millis(1000), action);

    // interval=1000ms; calls at t=0,200,400,900 with A,B,C,D.
    throttled.call("A");
    drain().await;
    assert_eq!(*seen.lock().unwrap(), vec!["A"]);

    advance(Duration::from_millis(200)).await;
    throttled.call("B");
    drain().await;

    advance(Duration::from_millis(200)).await;
    throttled.call("C");
    drain().await;

    advance(Duration::from_millis(500)).await;
    throttled.call("D");
    drain().await;
    assert_eq!(*seen.lock().unwrap(), vec!["A"]);

    // Single trailing firing just past t=1000 with the latest arguments.
    advance(Duration::from_millis(101)).await;
    drain().await;
    assert_eq!(*seen.lock().unwrap(), vec!["A", "D"]);

    // Nothing else is queued.
    advance(Duration::from_millis(2000)).await;
    drain().await;
    assert_eq!(*seen.lock().unwrap(), vec!["A", "D"]);
}

#[tokio::test]
async fn call_after_the_window_fires_immediately() {
    tokio::time::pause();

    let (seen, action) = recorder();
    let throttled = ThrottledAction::new(Duration::from_millis(1000), action);

    throttled.call("early");
    drain().await;

    advance(Duration::from_millis(1500)).await;
    throttled.call("late");
    drain().await;

    assert_eq!(*seen.lock().unwrap(), vec!["early", "late"]);
}

#[tokio::test]
async fn dispose_drops_the_pending_trailing_firing() {
    tokio::time::pause();

    let (seen, action) = recorder();
    let throttled = ThrottledAction::new(Duration::from_millis(1000), action);

    throttled.call("lead");
    drain().await;
    throttled.call("tail");
    drain().await;
    assert_eq!(*seen.lock().unwrap(), vec!["lead"]);

    throttled.dispose();
    advance(Duration::from_millis(2000)).await;
    drain().await;

    // The trailing firing was dropped, not flushed.
    assert_eq!(*seen.lock().unwrap(), vec!["lead"]);
}
