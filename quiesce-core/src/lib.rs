// Copyright 2025 Umberto Gotti <umberto.gotti@umbertogotti.dev>
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

//! Core types shared by the quiesce utility family.
//!
//! - [`CancellationToken`] - runtime-agnostic cancellation with supersession
//!   semantics ("at most one active operation per caller")
//! - [`QuiesceError`] / [`Result`] - error taxonomy for caller-supplied
//!   operations
//! - [`Blank`] - empty-value detection (falsy-or-blank-string semantics)

pub mod blank;
pub mod cancellation_token;
pub mod error;

pub use self::blank::Blank;
pub use self::cancellation_token::{CancellationToken, Cancelled, DropGuard};
pub use self::error::{QuiesceError, Result};
