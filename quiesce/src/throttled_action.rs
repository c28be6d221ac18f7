// Copyright 2025 Umberto Gotti <umberto.gotti@umbertogotti.dev>
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

//! Rate-limited wrapper around a callback.

use std::time::Duration;

use futures::StreamExt;
use tokio::sync::mpsc;
use tokio::task::JoinHandle;
use tokio_stream::wrappers::UnboundedReceiverStream;

use crate::throttle::ThrottleExt;

/// Throttled invocation of an action.
///
/// Calls fire at most once per `interval`: a call with the window open
/// fires immediately; calls inside the window share a single trailing
/// firing at the window boundary, carrying the arguments of the most
/// recent call. A later call in the same window replaces the pending
/// trailing arguments rather than queuing another firing.
///
/// [`dispose`](Self::dispose) (also run on drop) drops the pending
/// trailing firing; it is not flushed.
pub struct ThrottledAction<A> {
    input: mpsc::UnboundedSender<A>,
    driver: JoinHandle<()>,
}

impl<A> ThrottledAction<A>
where
    A: Send + 'static,
{
    /// Wrap `action` so calls are rate-limited to one per `interval`.
    pub fn new<F>(interval: Duration, mut action: F) -> Self
    where
        F: FnMut(A) + Send + 'static,
    {
        let (input, feed) = mpsc::unbounded_channel();

        let driver = tokio::spawn(async move {
            let mut gated = Box::pin(UnboundedReceiverStream::new(feed).throttle(interval));
            while let Some(args) = gated.next().await {
                action(args);
            }
        });

        Self { input, driver }
    }

    /// Request an invocation with `args`.
    pub fn call(&self, args: A) {
        let _ = self.input.send(args);
    }

    /// Drop any pending trailing firing and stop firing. Idempotent.
    pub fn dispose(&self) {
        self.driver.abort();
    }
}

impl<A> Drop for ThrottledAction<A> {
    fn drop(&mut self) {
        self.driver.abort();
    }
}
