// Copyright 2025 Umberto Gotti <umberto.gotti@umbertogotti.dev>
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

//! The `debounce` operator: emit only after a quiet period.
//!
//! Trailing debounce semantics:
//! - When an item arrives, start/restart the timer
//! - If no new item arrives before the timer expires, emit the latest item
//! - If a new item arrives first, discard the pending item and restart
//! - When the source ends, flush any pending item immediately
//!
//! At most one sleep is live at a time; scheduling a new one replaces and
//! cancels the previous one. Dropping the adapter drops the pending item.
//!
//! # Example
//!
//! ```no_run
//! use quiesce::DebounceExt;
//! use futures::stream::{self, StreamExt};
//! use std::time::Duration;
//!
//! # async fn example() {
//! let keystrokes = stream::iter(["q", "qu", "quiet"]);
//! // The adapter pins its sleep future, so pin it to poll it.
//! let mut settled = Box::pin(keystrokes.debounce(Duration::from_millis(300)));
//! assert_eq!(settled.next().await, Some("quiet"));
//! # }
//! ```

use std::pin::Pin;
use std::task::{Context, Poll};
use std::time::Duration;

use futures::{Future, Stream};
use pin_project::pin_project;
use quiesce_runtime::timer::Timer;

/// Extension trait providing the `debounce` operator for streams.
pub trait DebounceExt: Stream + Sized {
    /// Debounce the stream with an explicit timer backend.
    fn debounce_with_timer<TM>(self, duration: Duration, timer: TM) -> Debounce<Self, TM>
    where
        TM: Timer,
    {
        Debounce {
            stream: self,
            timer,
            duration,
            pending: None,
            sleep: None,
            done: false,
        }
    }

    /// Debounce the stream by the specified quiet period.
    ///
    /// Uses the timer of the enabled runtime feature.
    #[cfg(any(feature = "runtime-tokio", feature = "runtime-smol"))]
    fn debounce(self, duration: Duration) -> Debounce<Self, crate::DefaultTimer> {
        self.debounce_with_timer(duration, crate::DefaultTimer::default())
    }
}

impl<S: Stream> DebounceExt for S {}

/// Stream returned by [`DebounceExt::debounce`].
#[pin_project]
pub struct Debounce<S: Stream, TM: Timer> {
    #[pin]
    stream: S,
    timer: TM,
    duration: Duration,
    pending: Option<S::Item>,
    #[pin]
    sleep: Option<TM::Sleep>,
    done: bool,
}

impl<S: Stream, TM: Timer> Stream for Debounce<S, TM> {
    type Item = S::Item;

    fn poll_next(self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<Option<Self::Item>> {
        let mut this = self.project();

        loop {
            // Source ended: flush the pending item, then terminate.
            if *this.done {
                return Poll::Ready(this.pending.take());
            }

            // A pending item waits on its quiet-period timer.
            if this.pending.is_some() {
                if let Some(sleep) = this.sleep.as_mut().as_pin_mut() {
                    if sleep.poll(cx).is_ready() {
                        this.sleep.set(None);
                        return Poll::Ready(this.pending.take());
                    }
                }
            }

            match this.stream.as_mut().poll_next(cx) {
                Poll::Ready(Some(item)) => {
                    // Restart the quiet period; the replaced sleep is the
                    // cancelled timer handle.
                    this.sleep
                        .set(Some(this.timer.sleep_future(*this.duration)));
                    *this.pending = Some(item);

                    // Re-check the timer; a zero duration fires at once.
                    continue;
                }
                Poll::Ready(None) => {
                    *this.done = true;
                    continue;
                }
                Poll::Pending => {
                    // Waiting either on the timer (waker registered above)
                    // or on the next source item.
                    return Poll::Pending;
                }
            }
        }
    }
}
