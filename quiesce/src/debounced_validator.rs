// Copyright 2025 Umberto Gotti <umberto.gotti@umbertogotti.dev>
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

//! Debounced synchronous validation with tiered responsiveness.

use std::panic::{catch_unwind, AssertUnwindSafe};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::Duration;

use parking_lot::Mutex;
use quiesce_core::Blank;
use tokio::sync::watch;
use tokio::task::JoinHandle;

use crate::debounced_value::DebouncedValue;

/// Error message published when the validator itself raises.
pub const VALIDATION_FAILURE_MESSAGE: &str = "validation error occurred";

/// Snapshot of a validator's observable state.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct ValidationState {
    /// The validator's verdict for the last settled value; `None` = valid.
    pub error: Option<String>,
    /// True while a non-blank input has not settled yet.
    pub validating: bool,
}

type ValidatorFn<V> = Arc<dyn Fn(&V) -> Option<String> + Send + Sync>;

/// A debounced value wired to a synchronous validator.
///
/// Responsiveness is tiered per input change:
/// - blank input clears the error and the pending flag immediately,
///   without waiting for the quiet period
/// - non-blank input raises the pending flag until it settles
/// - a settled non-blank input runs the validator; its `Some(message)`
///   verdict becomes the error, `None` clears it
///
/// A validator panic is caught and mapped to
/// [`VALIDATION_FAILURE_MESSAGE`]; it never crosses the handle boundary.
///
/// [`dispose`](Self::dispose) (also run on drop) stops validation; no
/// state mutates after teardown.
pub struct DebouncedValidator<V> {
    value: DebouncedValue<V>,
    shared: Arc<ValidatorShared>,
    driver: JoinHandle<()>,
}

struct ValidatorShared {
    state: watch::Sender<ValidationState>,
    /// Serializes the blank-input clear against the driver's verdict
    /// publication, so a clear can never be overwritten by a verdict for
    /// input that is no longer there.
    gate: Mutex<()>,
    disposed: AtomicBool,
}

impl<V> DebouncedValidator<V>
where
    V: Blank + Clone + PartialEq + Send + Sync + 'static,
{
    /// Create a validator over a debounced value seeded with `initial`.
    ///
    /// The initial value is not validated; validation starts with the
    /// first [`set`](Self::set).
    pub fn new<F>(initial: V, delay: Duration, validator: F) -> Self
    where
        F: Fn(&V) -> Option<String> + Send + Sync + 'static,
    {
        let value = DebouncedValue::new(initial, delay);
        let (state, _) = watch::channel(ValidationState::default());
        let shared = Arc::new(ValidatorShared {
            state,
            gate: Mutex::new(()),
            disposed: AtomicBool::new(false),
        });

        let validator: ValidatorFn<V> = Arc::new(validator);
        let mut settled = value.subscribe();
        let raw = value.subscribe_raw();
        let worker = Arc::clone(&shared);
        let driver = tokio::spawn(async move {
            while settled.changed().await.is_ok() {
                let candidate = settled.borrow_and_update().clone();

                // Blank values were already cleared eagerly in set().
                if candidate.is_blank() {
                    continue;
                }
                // A stale settle that lost the race to newer input keeps
                // the pending flag up; the newer value will settle later.
                if *raw.borrow() != candidate {
                    continue;
                }

                let verdict = catch_unwind(AssertUnwindSafe(|| validator(&candidate)));
                let error = match verdict {
                    Ok(error) => error,
                    Err(_) => {
                        tracing::warn!("validator panicked; reporting generic failure");
                        Some(VALIDATION_FAILURE_MESSAGE.to_string())
                    }
                };

                // Publish under the gate: a concurrent blank set() either
                // already made the input blank (drop the verdict) or will
                // clear the state after this write.
                let _gate = worker.gate.lock();
                if raw.borrow().is_blank() {
                    continue;
                }
                worker.state.send_replace(ValidationState {
                    error,
                    validating: false,
                });
            }
        });

        Self {
            value,
            shared,
            driver,
        }
    }

    /// Feed a new input value.
    pub fn set(&self, input: V) {
        if self.shared.disposed.load(Ordering::Acquire) {
            return;
        }
        if input.is_blank() {
            // Skip the debounce entirely for empty input. Raw must turn
            // blank under the gate too, so the driver's recheck observes
            // it whenever it loses the race for the lock.
            let _gate = self.shared.gate.lock();
            self.value.set(input);
            self.shared.state.send_replace(ValidationState::default());
            return;
        }
        self.shared.state.send_modify(|s| s.validating = true);
        self.value.set(input);
    }

    /// Snapshot of the current state.
    pub fn state(&self) -> ValidationState {
        self.shared.state.borrow().clone()
    }

    /// The current validation error, if any.
    pub fn error(&self) -> Option<String> {
        self.shared.state.borrow().error.clone()
    }

    /// Whether a non-blank input is awaiting settlement.
    pub fn is_validating(&self) -> bool {
        self.shared.state.borrow().validating
    }

    /// Watch state changes.
    pub fn subscribe(&self) -> watch::Receiver<ValidationState> {
        self.shared.state.subscribe()
    }

    /// The last settled value.
    pub fn value(&self) -> V {
        self.value.get()
    }

    /// Stop validating and drop any pending settlement. Idempotent.
    pub fn dispose(&self) {
        self.shared.disposed.store(true, Ordering::Release);
        self.driver.abort();
        self.value.dispose();
    }
}

impl<V> Drop for DebouncedValidator<V> {
    fn drop(&mut self) {
        self.shared.disposed.store(true, Ordering::Release);
        self.driver.abort();
    }
}
