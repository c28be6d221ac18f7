// Copyright 2025 Umberto Gotti <umberto.gotti@umbertogotti.dev>
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

//! Burst-coalescing wrapper around a callback.

use std::time::Duration;

use futures::StreamExt;
use tokio::sync::mpsc;
use tokio::task::JoinHandle;
use tokio_stream::wrappers::UnboundedReceiverStream;

use crate::debounce::DebounceExt;

/// Debounced invocation of an action.
///
/// Repeated [`call`](Self::call)s within `delay` collapse into a single
/// invocation carrying the arguments of the last call, fired after the
/// quiet period. Each call cancels the pending invocation and reschedules.
///
/// [`dispose`](Self::dispose) (also run on drop) drops the pending
/// invocation without firing it.
pub struct DebouncedAction<A> {
    input: mpsc::UnboundedSender<A>,
    driver: JoinHandle<()>,
}

impl<A> DebouncedAction<A>
where
    A: Send + 'static,
{
    /// Wrap `action` so bursts of calls fire it once, trailing-edge.
    pub fn new<F>(delay: Duration, mut action: F) -> Self
    where
        F: FnMut(A) + Send + 'static,
    {
        let (input, feed) = mpsc::unbounded_channel();

        let driver = tokio::spawn(async move {
            let mut quiet = Box::pin(UnboundedReceiverStream::new(feed).debounce(delay));
            while let Some(args) = quiet.next().await {
                action(args);
            }
        });

        Self { input, driver }
    }

    /// Request an invocation with `args`, superseding any pending one.
    pub fn call(&self, args: A) {
        let _ = self.input.send(args);
    }

    /// Drop any pending invocation and stop firing. Idempotent.
    pub fn dispose(&self) {
        self.driver.abort();
    }
}

impl<A> Drop for DebouncedAction<A> {
    fn drop(&mut self) {
        self.driver.abort();
    }
}
