// Copyright 2025 Umberto Gotti <umberto.gotti@umbertogotti.dev>
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

//! The `throttle` operator: at most one emission per interval.
//!
//! Leading + trailing semantics:
//! - An item arriving with the window open (no firing within `interval`)
//!   is emitted immediately and the firing instant is recorded
//! - Items arriving inside the window fill a single trailing slot; a later
//!   item replaces the slot's contents rather than queuing, and the
//!   trailing deadline stays fixed at `last_fire + interval`
//! - The trailing emission records a new firing instant
//! - When the source ends, flush any pending trailing item immediately
//!
//! Dropping the adapter drops the pending trailing item.

use std::pin::Pin;
use std::task::{Context, Poll};
use std::time::Duration;

use futures::{Future, Stream};
use pin_project::pin_project;
use quiesce_runtime::timer::Timer;

/// Extension trait providing the `throttle` operator for streams.
pub trait ThrottleExt: Stream + Sized {
    /// Throttle the stream with an explicit timer backend.
    fn throttle_with_timer<TM>(self, interval: Duration, timer: TM) -> Throttle<Self, TM>
    where
        TM: Timer,
    {
        Throttle {
            stream: self,
            timer,
            interval,
            last_fire: None,
            trailing: None,
            sleep: None,
            done: false,
        }
    }

    /// Throttle the stream to at most one emission per interval.
    ///
    /// Uses the timer of the enabled runtime feature.
    #[cfg(any(feature = "runtime-tokio", feature = "runtime-smol"))]
    fn throttle(self, interval: Duration) -> Throttle<Self, crate::DefaultTimer> {
        self.throttle_with_timer(interval, crate::DefaultTimer::default())
    }
}

impl<S: Stream> ThrottleExt for S {}

/// Stream returned by [`ThrottleExt::throttle`].
#[pin_project]
pub struct Throttle<S: Stream, TM: Timer> {
    #[pin]
    stream: S,
    timer: TM,
    interval: Duration,
    last_fire: Option<TM::Instant>,
    trailing: Option<S::Item>,
    #[pin]
    sleep: Option<TM::Sleep>,
    done: bool,
}

impl<S: Stream, TM: Timer> Stream for Throttle<S, TM> {
    type Item = S::Item;

    fn poll_next(self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<Option<Self::Item>> {
        let mut this = self.project();

        loop {
            // A trailing item waits on the window deadline.
            if this.trailing.is_some() {
                if let Some(sleep) = this.sleep.as_mut().as_pin_mut() {
                    if sleep.poll(cx).is_ready() {
                        this.sleep.set(None);
                        *this.last_fire = Some(this.timer.now());
                        return Poll::Ready(this.trailing.take());
                    }
                }
            }

            // Source ended: flush the trailing item, then terminate.
            if *this.done {
                if let Some(item) = this.trailing.take() {
                    this.sleep.set(None);
                    return Poll::Ready(Some(item));
                }
                return Poll::Ready(None);
            }

            match this.stream.as_mut().poll_next(cx) {
                Poll::Ready(Some(item)) => {
                    let now = this.timer.now();
                    let window_open = match this.last_fire {
                        None => true,
                        Some(last) => now - *last >= *this.interval,
                    };

                    if window_open && this.trailing.is_none() {
                        *this.last_fire = Some(now);
                        return Poll::Ready(Some(item));
                    }

                    // Inside the window: the single trailing slot takes the
                    // most recent item. The deadline was fixed when the slot
                    // was first filled, so replacement does not reschedule.
                    *this.trailing = Some(item);
                    if this.sleep.is_none() {
                        let remaining = match this.last_fire {
                            Some(last) => this.interval.saturating_sub(now - *last),
                            None => Duration::ZERO,
                        };
                        this.sleep.set(Some(this.timer.sleep_future(remaining)));
                    }
                    continue;
                }
                Poll::Ready(None) => {
                    *this.done = true;
                    continue;
                }
                Poll::Pending => {
                    return Poll::Pending;
                }
            }
        }
    }
}
