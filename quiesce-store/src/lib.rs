// Copyright 2025 Umberto Gotti <umberto.gotti@umbertogotti.dev>
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

//! Key-value storage boundary for the quiesce utilities.
//!
//! [`StorageBackend`] abstracts a string-keyed store with serialized text
//! values and change notifications (the shape of browser local storage
//! with its cross-tab `storage` events); [`MemoryBackend`] is the
//! in-process substitute for non-browser targets. [`StoredValue`] is a
//! typed handle over one key: JSON on write, parsed on read, and every
//! boundary failure is logged and recovered to the default value rather
//! than propagated.

pub mod backend;
pub mod error;
pub mod memory;
pub mod stored_value;

pub use backend::{StorageBackend, StorageEvent};
pub use error::{StoreError, StoreResult};
pub use memory::MemoryBackend;
pub use stored_value::StoredValue;
