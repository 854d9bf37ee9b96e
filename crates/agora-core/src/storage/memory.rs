//! In-process shared store with per-context handles.
//!
//! Models the browser's client-local storage: every [`StoreContext`] sees the
//! same data, and a write through one context is announced to all the others.

use std::collections::HashMap;
use std::sync::Arc;

use parking_lot::RwLock;
use tokio::sync::broadcast;

use super::{ChangeStream, ContextId, PersistedStore, StoreChange, CHANGE_CHANNEL_CAPACITY};
use crate::error::ContentResult;

/// Shared in-memory key/value store.
#[derive(Clone)]
pub struct MemoryStore {
    items: Arc<RwLock<HashMap<String, String>>>,
    changes: broadcast::Sender<StoreChange>,
}

impl Default for MemoryStore {
    fn default() -> Self {
        Self::new()
    }
}

impl MemoryStore {
    /// Create an empty store.
    pub fn new() -> Self {
        let (changes, _) = broadcast::channel(CHANGE_CHANNEL_CAPACITY);
        Self {
            items: Arc::new(RwLock::new(HashMap::new())),
            changes,
        }
    }

    /// Open a new execution context on this store.
    pub fn context(&self) -> StoreContext {
        StoreContext {
            store: self.clone(),
            id: ContextId::next(),
        }
    }

    /// Number of keys currently stored.
    pub fn len(&self) -> usize {
        self.items.read().len()
    }

    /// Whether the store holds no keys.
    pub fn is_empty(&self) -> bool {
        self.items.read().is_empty()
    }

    fn announce(&self, key: Option<&str>, origin: ContextId) {
        // No subscribers is fine
        let _ = self.changes.send(StoreChange {
            key: key.map(str::to_string),
            origin,
        });
    }
}

/// One execution context's handle on a [`MemoryStore`].
///
/// Clones share the context id, so they count as the same writer.
#[derive(Clone)]
pub struct StoreContext {
    store: MemoryStore,
    id: ContextId,
}

impl StoreContext {
    /// This context's id.
    pub fn id(&self) -> ContextId {
        self.id
    }

    /// The store this context belongs to.
    pub fn store(&self) -> &MemoryStore {
        &self.store
    }

    /// Store `value` under `key` and notify the other contexts.
    pub fn set_item(&self, key: &str, value: &str) -> ContentResult<()> {
        self.store
            .items
            .write()
            .insert(key.to_string(), value.to_string());
        self.store.announce(Some(key), self.id);
        Ok(())
    }

    /// Remove `key` and notify the other contexts.
    pub fn remove_item(&self, key: &str) -> ContentResult<()> {
        let removed = self.store.items.write().remove(key).is_some();
        if removed {
            self.store.announce(Some(key), self.id);
        }
        Ok(())
    }

    /// Remove every key and notify the other contexts.
    pub fn clear(&self) -> ContentResult<()> {
        self.store.items.write().clear();
        self.store.announce(None, self.id);
        Ok(())
    }
}

impl PersistedStore for StoreContext {
    fn get_item(&self, key: &str) -> ContentResult<Option<String>> {
        Ok(self.store.items.read().get(key).cloned())
    }

    fn subscribe(&self) -> Option<ChangeStream> {
        Some(ChangeStream::new(self.store.changes.subscribe(), self.id))
    }
}
