// Copyright 2025 Umberto Gotti <umberto.gotti@umbertogotti.dev>
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

//! Composable timing utilities for interactive async clients.
//!
//! Two layers:
//!
//! - **Stream operators** - [`DebounceExt`] and [`ThrottleExt`] extend any
//!   `futures::Stream` with quiet-period and rate-limit semantics, generic
//!   over the [`Timer`](quiesce_runtime::timer::Timer) abstraction.
//! - **Handles** - push-style utilities with explicit lifecycles
//!   (`new` / `dispose`), built on the operators and tokio tasks:
//!   [`DebouncedValue`], [`DebouncedAction`], [`ThrottledAction`],
//!   [`DebouncedCall`], [`DebouncedValidator`].
//!
//! Every handle owns its timers and cancellation tokens exclusively;
//! `dispose()` (also run on drop) releases them deterministically, so no
//! callback fires and no state mutates after teardown.
//!
//! # Example
//!
//! ```no_run
//! use quiesce::DebouncedValue;
//! use std::time::Duration;
//!
//! # async fn example() {
//! let search = DebouncedValue::new(String::new(), Duration::from_millis(300));
//! search.set("q".into());
//! search.set("qu".into());
//! // 300ms after the last set(), search.get() becomes "qu".
//! # }
//! ```

pub mod debounce;
pub mod throttle;

// The handle layer drives the operators with spawned tasks and tokio sync
// primitives, so it is tokio-only; the operators themselves stay
// runtime-generic.
#[cfg(feature = "runtime-tokio")]
mod debounced_action;
#[cfg(feature = "runtime-tokio")]
mod debounced_call;
#[cfg(feature = "runtime-tokio")]
mod debounced_validator;
#[cfg(feature = "runtime-tokio")]
mod debounced_value;
#[cfg(feature = "runtime-tokio")]
mod throttled_action;

pub mod prelude;

pub use debounce::{Debounce, DebounceExt};
pub use throttle::{Throttle, ThrottleExt};

#[cfg(feature = "runtime-tokio")]
pub use debounced_action::DebouncedAction;
#[cfg(feature = "runtime-tokio")]
pub use debounced_call::{CallOptions, CallState, DebouncedCall};
#[cfg(feature = "runtime-tokio")]
pub use debounced_validator::{DebouncedValidator, ValidationState, VALIDATION_FAILURE_MESSAGE};
#[cfg(feature = "runtime-tokio")]
pub use debounced_value::DebouncedValue;
#[cfg(feature = "runtime-tokio")]
pub use throttled_action::ThrottledAction;

pub use quiesce_core::{Blank, CancellationToken, QuiesceError, Result};

/// Timer selected by the enabled runtime feature.
#[cfg(feature = "runtime-tokio")]
pub type DefaultTimer = quiesce_runtime::TokioTimer;

#[cfg(all(feature = "runtime-smol", not(feature = "runtime-tokio")))]
pub type DefaultTimer = quiesce_runtime::SmolTimer;
