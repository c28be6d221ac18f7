// Copyright 2025 Umberto Gotti <umberto.gotti@umbertogotti.dev>
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

use std::time::Duration;

use crate::timer::Timer;

/// Timer backed by `async-io`, usable on smol.
#[derive(Clone, Copy, Debug, Default)]
pub struct SmolTimer;

/// `async_io::Timer` resolves to the firing `Instant`; the [`Timer`]
/// contract wants `()`.
pub struct SmolSleep {
    timer: async_io::Timer,
}

impl std::future::Future for SmolSleep {
    type Output = ();

    fn poll(
        mut self: std::pin::Pin<&mut Self>,
        cx: &mut std::task::Context<'_>,
    ) -> std::task::Poll<Self::Output> {
        std::pin::Pin::new(&mut self.timer).poll(cx).map(|_| ())
    }
}

impl Timer for SmolTimer {
    type Sleep = SmolSleep;

    type Instant = std::time::Instant;

    fn sleep_future(&self, duration: Duration) -> Self::Sleep {
        SmolSleep {
            timer: async_io::Timer::after(duration),
        }
    }

    fn now(&self) -> Self::Instant {
        std::time::Instant::now()
    }
}
