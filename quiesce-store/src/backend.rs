// Copyright 2025 Umberto Gotti <umberto.gotti@umbertogotti.dev>
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

use tokio::sync::broadcast;

use crate::error::StoreResult;

/// A change notification: the key and its new serialized value
/// (`None` = removed).
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct StorageEvent {
    /// The changed key.
    pub key: String,
    /// The new serialized value, or `None` when the key was removed.
    pub raw: Option<String>,
}

/// String-keyed storage of serialized text values with change
/// notifications.
///
/// Values are structured text (JSON in practice); serialization policy
/// belongs to the caller ([`StoredValue`](crate::StoredValue)), not the
/// backend. Implementations must emit a [`StorageEvent`] for every
/// successful `store`/`remove` so other handles over the same backend
/// stay current.
pub trait StorageBackend: Send + Sync + 'static {
    /// Read the serialized value for `key`, if present.
    fn load(&self, key: &str) -> StoreResult<Option<String>>;

    /// Write the serialized value for `key`.
    fn store(&self, key: &str, raw: &str) -> StoreResult<()>;

    /// Remove `key`, if present.
    fn remove(&self, key: &str) -> StoreResult<()>;

    /// Subscribe to change notifications for all keys.
    fn subscribe(&self) -> broadcast::Receiver<StorageEvent>;
}
