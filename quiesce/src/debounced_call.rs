// Copyright 2025 Umberto Gotti <umberto.gotti@umbertogotti.dev>
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

//! Debounced, cancellable asynchronous calls with last-call-wins results.

use std::future::Future;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::Duration;

use futures::future::BoxFuture;
use futures::FutureExt;
use parking_lot::Mutex;
use quiesce_core::{Blank, CancellationToken, QuiesceError, Result};
use tokio::sync::watch;
use tokio::task::JoinHandle;

use crate::debounced_value::DebouncedValue;

/// Configuration for [`DebouncedCall`].
#[derive(Clone, Copy, Debug)]
pub struct CallOptions {
    /// Quiet period applied to the trigger value.
    pub delay: Duration,
    /// Skip the call (and clear state) when the trigger is blank.
    pub skip_empty: bool,
    /// Dispatch once with the initial trigger at construction.
    pub immediate: bool,
}

impl Default for CallOptions {
    fn default() -> Self {
        Self {
            delay: Duration::from_millis(300),
            skip_empty: false,
            immediate: false,
        }
    }
}

/// Snapshot of a caller's observable state.
///
/// Published as one value through a watch channel, so `data`, `error` and
/// `loading` are always mutually consistent.
#[derive(Clone, Debug)]
pub struct CallState<T> {
    /// Result of the most recent non-superseded successful call.
    pub data: Option<T>,
    /// Failure of the most recent non-superseded call, if any.
    pub error: Option<QuiesceError>,
    /// True from dispatch until the owning call settles or is superseded.
    pub loading: bool,
}

impl<T> Default for CallState<T> {
    fn default() -> Self {
        Self {
            data: None,
            error: None,
            loading: false,
        }
    }
}

type CallOp<V, T> = Arc<dyn Fn(V, CancellationToken) -> BoxFuture<'static, Result<T>> + Send + Sync>;
type SuccessCallback<T> = Arc<dyn Fn(&T) + Send + Sync>;
type FailureCallback = Arc<dyn Fn(&QuiesceError) + Send + Sync>;

/// A debounced trigger wired to a cancellable asynchronous operation.
///
/// The trigger value is debounced; every settled change dispatches the
/// operation with a fresh [`CancellationToken`], cancelling the token of
/// any in-flight call first. A superseded call's outcome is never applied,
/// even if its I/O completes after the newer call's - results are strictly
/// last-call-wins.
///
/// The operation receives the token and may honor it cooperatively;
/// correctness does not depend on it doing so.
///
/// [`dispose`](Self::dispose) (also run on drop) cancels the in-flight
/// call and stops auto-dispatch; no state mutates after teardown.
pub struct DebouncedCall<V, T> {
    trigger: DebouncedValue<V>,
    shared: Arc<CallShared<V, T>>,
    driver: JoinHandle<()>,
}

struct CallShared<V, T> {
    op: CallOp<V, T>,
    state: watch::Sender<CallState<T>>,
    /// The one active token; dispatch installs a fresh token here and
    /// cancels the displaced one.
    active: Mutex<Option<CancellationToken>>,
    skip_empty: bool,
    disposed: AtomicBool,
    on_success: Option<SuccessCallback<T>>,
    on_failure: Option<FailureCallback>,
}

impl<V, T> DebouncedCall<V, T>
where
    V: Blank + Clone + Send + Sync + 'static,
    T: Clone + Send + Sync + 'static,
{
    /// Create a caller without completion callbacks.
    pub fn new<F, Fut>(initial: V, options: CallOptions, op: F) -> Self
    where
        F: Fn(V, CancellationToken) -> Fut + Send + Sync + 'static,
        Fut: Future<Output = Result<T>> + Send + 'static,
    {
        Self::with_callbacks(
            initial,
            options,
            op,
            None::<fn(&T)>,
            None::<fn(&QuiesceError)>,
        )
    }

    /// Create a caller with optional success/failure callbacks, invoked
    /// only for non-superseded outcomes.
    pub fn with_callbacks<F, Fut, OnSuccess, OnFailure>(
        initial: V,
        options: CallOptions,
        op: F,
        on_success: Option<OnSuccess>,
        on_failure: Option<OnFailure>,
    ) -> Self
    where
        F: Fn(V, CancellationToken) -> Fut + Send + Sync + 'static,
        Fut: Future<Output = Result<T>> + Send + 'static,
        OnSuccess: Fn(&T) + Send + Sync + 'static,
        OnFailure: Fn(&QuiesceError) + Send + Sync + 'static,
    {
        let trigger = DebouncedValue::new(initial.clone(), options.delay);
        let (state, _) = watch::channel(CallState::default());

        let shared = Arc::new(CallShared {
            op: Arc::new(move |value, token| op(value, token).boxed()),
            state,
            active: Mutex::new(None),
            skip_empty: options.skip_empty,
            disposed: AtomicBool::new(false),
            on_success: on_success.map(|f| Arc::new(f) as SuccessCallback<T>),
            on_failure: on_failure.map(|f| Arc::new(f) as FailureCallback),
        });

        let mut settled = trigger.subscribe();
        let auto = Arc::clone(&shared);
        let immediate = options.immediate;
        let driver = tokio::spawn(async move {
            if immediate {
                auto.dispatch(initial);
            }
            while settled.changed().await.is_ok() {
                let value = settled.borrow_and_update().clone();
                auto.dispatch(value);
            }
        });

        Self {
            trigger,
            shared,
            driver,
        }
    }

    /// Feed a new trigger value; a call dispatches once it settles.
    pub fn set_trigger(&self, value: V) {
        self.trigger.set(value);
    }

    /// The current debounced trigger value.
    pub fn trigger(&self) -> V {
        self.trigger.get()
    }

    /// Dispatch manually, with an explicit value or the debounced trigger.
    pub fn call(&self, value: Option<V>) {
        let value = value.unwrap_or_else(|| self.trigger.get());
        self.shared.dispatch(value);
    }

    /// Snapshot of the current state.
    pub fn state(&self) -> CallState<T> {
        self.shared.state.borrow().clone()
    }

    /// Result of the most recent applied call.
    pub fn data(&self) -> Option<T> {
        self.shared.state.borrow().data.clone()
    }

    /// Failure of the most recent applied call.
    pub fn error(&self) -> Option<QuiesceError> {
        self.shared.state.borrow().error.clone()
    }

    /// Whether a call is in flight.
    pub fn is_loading(&self) -> bool {
        self.shared.state.borrow().loading
    }

    /// Watch state changes.
    pub fn subscribe(&self) -> watch::Receiver<CallState<T>> {
        self.shared.state.subscribe()
    }

    /// Cancel the in-flight call and stop dispatching. Idempotent.
    pub fn dispose(&self) {
        self.shared.disposed.store(true, Ordering::Release);
        self.driver.abort();
        self.trigger.dispose();
        if let Some(token) = self.shared.active.lock().take() {
            token.cancel();
        }
    }
}

impl<V, T> CallShared<V, T>
where
    V: Blank + Send + 'static,
    T: Clone + Send + Sync + 'static,
{
    fn dispatch(self: &Arc<Self>, value: V) {
        if self.disposed.load(Ordering::Acquire) {
            return;
        }

        // Blank trigger with skip-empty: reset state, supersede any
        // in-flight call, issue nothing.
        if self.skip_empty && value.is_blank() {
            if let Some(previous) = self.active.lock().take() {
                previous.cancel();
            }
            self.state.send_replace(CallState::default());
            return;
        }

        let token = CancellationToken::new();
        if let Some(previous) = self.active.lock().replace(token.clone()) {
            tracing::trace!("superseding in-flight call");
            previous.cancel();
        }
        self.state.send_modify(|s| {
            s.loading = true;
            s.error = None;
        });

        let shared = Arc::clone(self);
        let future = (self.op)(value, token.clone());
        tokio::spawn(async move {
            let outcome = tokio::select! {
                result = future => Some(result),
                () = token.cancelled() => None,
            };
            let Some(result) = outcome else { return };

            // Apply under the supersession lock: a dispatch racing with
            // this completion either cancels the token before we check it
            // here, or waits until the stale state is fully applied and
            // then overwrites it.
            let guard = shared.active.lock();
            if token.is_cancelled() {
                return;
            }
            match result {
                Ok(data) => {
                    shared.state.send_modify(|s| {
                        s.data = Some(data.clone());
                        s.loading = false;
                    });
                    drop(guard);
                    if let Some(callback) = &shared.on_success {
                        callback(&data);
                    }
                }
                Err(error) => {
                    shared.state.send_modify(|s| {
                        s.error = Some(error.clone());
                        s.loading = false;
                    });
                    drop(guard);
                    if let Some(callback) = &shared.on_failure {
                        callback(&error);
                    }
                }
            }
        });
    }
}

impl<V, T> Drop for DebouncedCall<V, T> {
    fn drop(&mut self) {
        self.shared.disposed.store(true, Ordering::Release);
        self.driver.abort();
        if let Some(token) = self.shared.active.lock().take() {
            token.cancel();
        }
    }
}
