// Copyright 2025 Umberto Gotti <umberto.gotti@umbertogotti.dev>
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

use std::collections::HashMap;

use parking_lot::RwLock;
use tokio::sync::broadcast;

use crate::backend::{StorageBackend, StorageEvent};
use crate::error::StoreResult;

const EVENT_CHANNEL_CAPACITY: usize = 64;

/// In-process [`StorageBackend`], the substitute for browser storage on
/// non-browser targets. Infallible.
pub struct MemoryBackend {
    entries: RwLock<HashMap<String, String>>,
    events: broadcast::Sender<StorageEvent>,
}

impl MemoryBackend {
    pub fn new() -> Self {
        let (events, _) = broadcast::channel(EVENT_CHANNEL_CAPACITY);
        Self {
            entries: RwLock::new(HashMap::new()),
            events,
        }
    }

    fn notify(&self, key: &str, raw: Option<String>) {
        // Ignored send error just means nobody is subscribed.
        let _ = self.events.send(StorageEvent {
            key: key.to_string(),
            raw,
        });
    }
}

impl Default for MemoryBackend {
    fn default() -> Self {
        Self::new()
    }
}

impl StorageBackend for MemoryBackend {
    fn load(&self, key: &str) -> StoreResult<Option<String>> {
        Ok(self.entries.read().get(key).cloned())
    }

    fn store(&self, key: &str, raw: &str) -> StoreResult<()> {
        self.entries
            .write()
            .insert(key.to_string(), raw.to_string());
        self.notify(key, Some(raw.to_string()));
        Ok(())
    }

    fn remove(&self, key: &str) -> StoreResult<()> {
        let removed = self.entries.write().remove(key);
        if removed.is_some() {
            self.notify(key, None);
        }
        Ok(())
    }

    fn subscribe(&self) -> broadcast::Receiver<StorageEvent> {
        self.events.subscribe()
    }
}
