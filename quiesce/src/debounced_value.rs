// Copyright 2025 Umberto Gotti <umberto.gotti@umbertogotti.dev>
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

//! Push-style debounced value with an explicit lifecycle.

use std::time::Duration;

use futures::StreamExt;
use tokio::sync::{mpsc, watch};
use tokio::task::JoinHandle;
use tokio_stream::wrappers::UnboundedReceiverStream;

use crate::debounce::DebounceExt;

/// A value that settles once its input pauses for the configured delay.
///
/// [`set`](Self::set) updates the raw value immediately; the settled value
/// follows only after the input has remained unchanged for the full delay.
/// Every `set` cancels the previously scheduled update, so at most one
/// deferred update is live at any time.
///
/// [`dispose`](Self::dispose) (also run on drop) cancels any pending
/// update; the settled value never mutates after teardown.
pub struct DebouncedValue<T> {
    input: mpsc::UnboundedSender<T>,
    raw: watch::Sender<T>,
    settled: watch::Receiver<T>,
    driver: JoinHandle<()>,
}

impl<T> DebouncedValue<T>
where
    T: Clone + Send + Sync + 'static,
{
    /// Create a debouncer seeded with `initial` (both raw and settled).
    pub fn new(initial: T, delay: Duration) -> Self {
        let (input, feed) = mpsc::unbounded_channel();
        let (raw, _) = watch::channel(initial.clone());
        let (settled_tx, settled) = watch::channel(initial);

        let driver = tokio::spawn(async move {
            // The adapter pins its sleep future, so it is !Unpin.
            let mut quiet = Box::pin(UnboundedReceiverStream::new(feed).debounce(delay));
            while let Some(value) = quiet.next().await {
                settled_tx.send_replace(value);
            }
        });

        Self {
            input,
            raw,
            settled,
            driver,
        }
    }

    /// Feed a new input value. The raw value updates immediately; the
    /// settled value follows after the quiet period.
    pub fn set(&self, value: T) {
        self.raw.send_replace(value.clone());
        // Inert after dispose: the driver (and its receiver) are gone.
        let _ = self.input.send(value);
    }

    /// The last settled value.
    pub fn get(&self) -> T {
        self.settled.borrow().clone()
    }

    /// The most recent raw input.
    pub fn raw(&self) -> T {
        self.raw.borrow().clone()
    }

    /// Watch settled-value changes.
    pub fn subscribe(&self) -> watch::Receiver<T> {
        self.settled.clone()
    }

    /// Watch raw-value changes.
    pub fn subscribe_raw(&self) -> watch::Receiver<T> {
        self.raw.subscribe()
    }

    /// Cancel any pending update and stop settling. Idempotent.
    pub fn dispose(&self) {
        self.driver.abort();
    }
}

impl<T> DebouncedValue<T>
where
    T: Clone + PartialEq + Send + Sync + 'static,
{
    /// Whether the settled value has caught up with the raw input.
    pub fn is_settled(&self) -> bool {
        *self.raw.borrow() == *self.settled.borrow()
    }
}

impl<T> Drop for DebouncedValue<T> {
    fn drop(&mut self) {
        self.driver.abort();
    }
}
