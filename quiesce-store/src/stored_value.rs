// Copyright 2025 Umberto Gotti <umberto.gotti@umbertogotti.dev>
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

use std::sync::Arc;

use serde::de::DeserializeOwned;
use serde::Serialize;
use tokio::sync::{broadcast, watch};
use tokio::task::JoinHandle;

use crate::backend::StorageBackend;

/// Typed handle over one storage key.
///
/// Values are serialized as JSON on write and parsed on read. Storage is
/// a best-effort collaborator: any parse or write failure is logged and
/// the handle falls back to the default (on read) or keeps the local
/// value (on write) - errors never propagate to the caller.
///
/// External changes to the key (another handle, another "tab") are
/// applied to the local state via the backend's change notifications.
///
/// [`dispose`](Self::dispose) (also run on drop) stops applying external
/// changes.
pub struct StoredValue<T> {
    backend: Arc<dyn StorageBackend>,
    key: String,
    default: T,
    state: Arc<watch::Sender<T>>,
    driver: JoinHandle<()>,
}

impl<T> StoredValue<T>
where
    T: Serialize + DeserializeOwned + Clone + Send + Sync + 'static,
{
    /// Create a handle for `key`, seeding local state from the backend or
    /// from `default` when the key is missing or unreadable.
    pub fn new(backend: Arc<dyn StorageBackend>, key: impl Into<String>, default: T) -> Self {
        let key = key.into();
        let seed = default.clone();
        let initial = read_or_default(backend.as_ref(), &key, default.clone());
        let state = Arc::new(watch::channel(initial).0);

        let mut events = backend.subscribe();
        let worker_backend = Arc::clone(&backend);
        let worker_state = Arc::clone(&state);
        let worker_key = key.clone();
        let driver = tokio::spawn(async move {
            loop {
                match events.recv().await {
                    Ok(event) if event.key == worker_key => match event.raw {
                        Some(raw) => match serde_json::from_str::<T>(&raw) {
                            Ok(value) => {
                                worker_state.send_replace(value);
                            }
                            Err(error) => {
                                tracing::warn!(
                                    key = %worker_key,
                                    %error,
                                    "ignoring unparsable storage event"
                                );
                            }
                        },
                        None => {
                            worker_state.send_replace(default.clone());
                        }
                    },
                    Ok(_) => {}
                    Err(broadcast::error::RecvError::Lagged(missed)) => {
                        // Missed notifications; resync from the backend.
                        tracing::warn!(
                            key = %worker_key,
                            missed,
                            "storage events lagged, resyncing"
                        );
                        let value = read_or_default(
                            worker_backend.as_ref(),
                            &worker_key,
                            default.clone(),
                        );
                        worker_state.send_replace(value);
                    }
                    Err(broadcast::error::RecvError::Closed) => break,
                }
            }
        });

        Self {
            backend,
            key,
            default: seed,
            state,
            driver,
        }
    }

    /// The current value.
    pub fn get(&self) -> T {
        self.state.borrow().clone()
    }

    /// Update the value. Local state updates first; a failing backend
    /// write is logged and swallowed.
    pub fn set(&self, value: T) {
        self.state.send_replace(value.clone());

        let raw = match serde_json::to_string(&value) {
            Ok(raw) => raw,
            Err(error) => {
                tracing::warn!(key = %self.key, %error, "failed to serialize value");
                return;
            }
        };
        if let Err(error) = self.backend.store(&self.key, &raw) {
            tracing::warn!(key = %self.key, %error, "failed to persist value");
        }
    }

    /// Remove the key, resetting local state to the default the handle
    /// was created with. A failing backend removal is logged and
    /// swallowed.
    pub fn remove(&self) {
        self.state.send_replace(self.default.clone());
        if let Err(error) = self.backend.remove(&self.key) {
            tracing::warn!(key = %self.key, %error, "failed to remove value");
        }
    }

    /// Watch value changes.
    pub fn subscribe(&self) -> watch::Receiver<T> {
        self.state.subscribe()
    }

    /// The storage key this handle owns.
    pub fn key(&self) -> &str {
        &self.key
    }

    /// Stop applying external changes. Idempotent.
    pub fn dispose(&self) {
        self.driver.abort();
    }
}

impl<T> Drop for StoredValue<T> {
    fn drop(&mut self) {
        self.driver.abort();
    }
}

fn read_or_default<T>(backend: &dyn StorageBackend, key: &str, default: T) -> T
where
    T: DeserializeOwned,
{
    match backend.load(key) {
        Ok(Some(raw)) => match serde_json::from_str(&raw) {
            Ok(value) => value,
            Err(error) => {
                tracing::warn!(key = %key, %error, "stored value unreadable, using default");
                default
            }
        },
        Ok(None) => default,
        Err(error) => {
            tracing::warn!(key = %key, %error, "storage read failed, using default");
            default
        }
    }
}
