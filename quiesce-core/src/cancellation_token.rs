// Copyright 2025 Umberto Gotti <umberto.gotti@umbertogotti.dev>
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

//! Runtime-agnostic cancellation token.
//!
//! A token identifies one in-flight operation. When a newer operation
//! supersedes it, the owner cancels the old token; the operation may honor
//! the signal cooperatively, but the owner must also treat a cancelled
//! token as authoritative and discard the operation's outcome.

use std::future::Future;
use std::pin::Pin;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::task::{Context, Poll};

use event_listener::{Event, EventListener};

/// Cancellation token for one asynchronous operation.
///
/// Clones share the same cancellation state: cancelling any clone wakes
/// every waiter on [`cancelled()`](CancellationToken::cancelled). Built on
/// `event-listener`, so it works on any async runtime.
///
/// # Example
///
/// ```
/// use quiesce_core::CancellationToken;
///
/// let token = CancellationToken::new();
/// let for_operation = token.clone();
///
/// // The owner supersedes the operation:
/// token.cancel();
/// assert!(for_operation.is_cancelled());
/// ```
#[derive(Clone, Debug, Default)]
pub struct CancellationToken {
    shared: Arc<Shared>,
}

#[derive(Debug, Default)]
struct Shared {
    flag: AtomicBool,
    event: Event,
}

impl CancellationToken {
    /// Create a fresh, uncancelled token.
    pub fn new() -> Self {
        Self::default()
    }

    /// Cancel the token, waking all waiters. Idempotent.
    pub fn cancel(&self) {
        // Release so writes made before cancelling are visible to waiters.
        self.shared.flag.store(true, Ordering::Release);
        self.shared.event.notify(usize::MAX);
    }

    /// Whether the token has been cancelled (non-blocking).
    pub fn is_cancelled(&self) -> bool {
        self.shared.flag.load(Ordering::Acquire)
    }

    /// Resolve once the token is cancelled.
    ///
    /// Returns immediately if the token is already cancelled.
    pub fn cancelled(&self) -> Cancelled<'_> {
        Cancelled {
            token: self,
            listener: None,
        }
    }

    /// Tie cancellation to a scope: the returned guard cancels the token
    /// when dropped. Used for deterministic teardown.
    pub fn drop_guard(self) -> DropGuard {
        DropGuard { token: self }
    }
}

/// Future returned by [`CancellationToken::cancelled()`].
pub struct Cancelled<'a> {
    token: &'a CancellationToken,
    listener: Option<EventListener>,
}

impl Future for Cancelled<'_> {
    type Output = ();

    fn poll(mut self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<()> {
        if self.token.is_cancelled() {
            return Poll::Ready(());
        }

        if self.listener.is_none() {
            self.listener = Some(self.token.shared.event.listen());

            // cancel() may have slipped in between the flag check and
            // listen(); recheck so we never miss the notification.
            if self.token.is_cancelled() {
                return Poll::Ready(());
            }
        }

        match Pin::new(self.listener.as_mut().unwrap()).poll(cx) {
            Poll::Ready(()) => Poll::Ready(()),
            Poll::Pending => Poll::Pending,
        }
    }
}

/// Cancels its token on drop.
#[derive(Debug)]
pub struct DropGuard {
    token: CancellationToken,
}

impl DropGuard {
    /// Release the guard without cancelling.
    pub fn disarm(self) -> CancellationToken {
        // Destructure via ManuallyDrop to skip our Drop impl.
        let this = std::mem::ManuallyDrop::new(self);
        this.token.clone()
    }
}

impl Drop for DropGuard {
    fn drop(&mut self) {
        self.token.cancel();
    }
}
