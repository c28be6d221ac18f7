// Copyright 2025 Umberto Gotti <umberto.gotti@umbertogotti.dev>
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

use std::time::Duration;

use futures::stream::StreamExt;
use futures::Stream;
use tokio::task::yield_now;
use tokio::time::sleep;

/// Let spawned driver tasks run until chained notifications quiesce.
///
/// Used between `advance()` calls under a paused clock.
pub async fn drain() {
    for _ in 0..16 {
        yield_now().await;
    }
}

/// Assert the stream yields nothing right now (single poll, no waiting).
pub async fn assert_no_item<S, T>(stream: &mut S)
where
    S: Stream<Item = T> + Unpin,
{
    let poll = futures::poll!(stream.next());
    assert!(poll.is_pending(), "unexpected item, expected no output");
}

/// Assert the stream yields an item on a single poll and return it.
///
/// Deterministic companion to [`assert_no_item`] for paused-clock tests:
/// after `advance()` strictly past a deadline the item must be ready
/// immediately. The timer wheel rounds deadlines up, so advancing to the
/// exact deadline is not enough.
pub async fn expect_item<S, T>(stream: &mut S) -> T
where
    S: Stream<Item = T> + Unpin,
{
    match futures::poll!(stream.next()) {
        std::task::Poll::Ready(Some(item)) => item,
        std::task::Poll::Ready(None) => panic!("stream ended, expected an item"),
        std::task::Poll::Pending => panic!("expected an item to be ready"),
    }
}

/// Next item, or `None` if nothing arrives within the window.
pub async fn next_within<S, T>(stream: &mut S, window_ms: u64) -> Option<T>
where
    S: Stream<Item = T> + Unpin,
{
    tokio::select! {
        item = stream.next() => item,
        () = sleep(Duration::from_millis(window_ms)) => None,
    }
}
