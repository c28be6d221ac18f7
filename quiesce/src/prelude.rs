// Copyright 2025 Umberto Gotti <umberto.gotti@umbertogotti.dev>
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

//! Prelude re-exporting the commonly used traits and handles.
//!
//! ```ignore
//! use quiesce::prelude::*;
//!
//! let settled = keystrokes.debounce(Duration::from_millis(300));
//! let gated = clicks.throttle(Duration::from_secs(1));
//! ```

pub use crate::debounce::DebounceExt;
pub use crate::throttle::ThrottleExt;

pub use quiesce_core::{Blank, CancellationToken, QuiesceError, Result};

#[cfg(feature = "runtime-tokio")]
pub use crate::{
    CallOptions, CallState, DebouncedAction, DebouncedCall, DebouncedValidator, DebouncedValue,
    ThrottledAction, ValidationState,
};
