// Copyright 2025 Umberto Gotti <umberto.gotti@umbertogotti.dev>
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

//! Runtime-agnostic timer abstraction.
//!
//! The quiesce stream adapters schedule deferred emissions through the
//! [`Timer`](timer::Timer) trait, so they run on any async runtime that
//! can provide a sleep future and a monotonic clock.
//!
//! Enable a backend via features:
//! - `runtime-tokio` (default) - [`TokioTimer`](impls::tokio::TokioTimer)
//! - `runtime-smol` - [`SmolTimer`](impls::smol::SmolTimer) via `async-io`

pub mod impls;
pub mod timer;

#[cfg(feature = "runtime-tokio")]
pub use impls::tokio::TokioTimer;

#[cfg(feature = "runtime-smol")]
pub use impls::smol::SmolTimer;
