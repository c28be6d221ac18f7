// Copyright 2025 Umberto Gotti <umberto.gotti@umbertogotti.dev>
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

use std::fmt::Debug;
use std::future::Future;
use std::ops::{Add, Sub};
use std::time::Duration;

/// Deferred-action scheduler abstraction.
///
/// A `Timer` hands out sleep futures (the "timer handles" of the quiesce
/// utilities; dropping the future cancels the scheduled action) and reads
/// a monotonic clock used for throttle window arithmetic.
pub trait Timer: Clone + Default + Debug + Send + Sync + 'static {
    /// Future resolving after the requested duration.
    type Sleep: Future<Output = ()> + Send;

    /// Monotonic instant with the arithmetic the throttle window needs.
    type Instant: Copy
        + Debug
        + Ord
        + Send
        + Sync
        + Add<Duration, Output = Self::Instant>
        + Sub<Self::Instant, Output = Duration>;

    /// Schedule a deferred wakeup. The returned future is inert until
    /// polled and cancelled by dropping it.
    fn sleep_future(&self, duration: Duration) -> Self::Sleep;

    /// Current instant on the monotonic clock.
    fn now(&self) -> Self::Instant;
}
