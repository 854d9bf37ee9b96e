//! Read access to the shared key/value store holding the page content.
//!
//! The store is written by the admin surface, possibly from another process,
//! and read here. Reading never fails from the caller's point of view: a
//! missing key, an empty value, a malformed value or an I/O error all decode
//! to an empty list, which the renderer turns into placeholder content.
//!
//! Two backends are provided:
//! - [`MemoryStore`]: in-process map with per-context handles, used for
//!   tests and embedding
//! - [`FileStore`]: one `<key>.json` file per key in a shared directory,
//!   with filesystem-watcher change notifications

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

use serde::de::DeserializeOwned;
use tokio::sync::broadcast;
use tracing::{debug, trace, warn};

use crate::error::ContentResult;

// Submodules
mod file;
mod memory;

pub use file::FileStore;
pub use memory::{MemoryStore, StoreContext};

/// Store key holding the gallery images
pub const GALLERY_KEY: &str = "agoraGalleryImages";

/// Store key holding the events
pub const EVENTS_KEY: &str = "agoraEvents";

/// Capacity of the change broadcast channel shared by a store's contexts
pub(crate) const CHANGE_CHANNEL_CAPACITY: usize = 64;

/// Identifies one execution context (page, tab, window, process) using a store.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ContextId(u64);

impl ContextId {
    /// Writer outside this process; never equal to any local context.
    pub const EXTERNAL: ContextId = ContextId(0);

    /// Allocate a fresh, process-unique context id.
    pub fn next() -> Self {
        static NEXT: AtomicU64 = AtomicU64::new(1);
        ContextId(NEXT.fetch_add(1, Ordering::Relaxed))
    }
}

/// Notification that a store key was written by some context.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StoreChange {
    /// The key that changed; `None` when the whole store was cleared or
    /// notifications were lost
    pub key: Option<String>,
    /// The context that performed the write
    pub origin: ContextId,
}

impl StoreChange {
    /// Whether this change may affect any of `keys`.
    pub fn concerns(&self, keys: &[&str]) -> bool {
        match &self.key {
            Some(key) => keys.contains(&key.as_str()),
            None => true,
        }
    }
}

/// Stream of changes made by contexts other than the subscriber's own.
///
/// Writes performed through the subscribing context are filtered out,
/// matching how browsers deliver `storage` events only to other windows.
pub struct ChangeStream {
    rx: broadcast::Receiver<StoreChange>,
    context: ContextId,
}

impl ChangeStream {
    pub(crate) fn new(rx: broadcast::Receiver<StoreChange>, context: ContextId) -> Self {
        Self { rx, context }
    }

    /// Wait for the next foreign change.
    ///
    /// Returns `None` once the store is gone. If the subscriber fell behind,
    /// a keyless change is returned so the caller re-reads everything.
    pub async fn recv(&mut self) -> Option<StoreChange> {
        loop {
            match self.rx.recv().await {
                Ok(change) if change.origin == self.context => continue,
                Ok(change) => return Some(change),
                Err(broadcast::error::RecvError::Lagged(skipped)) => {
                    debug!(skipped, "Change stream lagged, requesting full reload");
                    return Some(StoreChange {
                        key: None,
                        origin: ContextId::EXTERNAL,
                    });
                }
                Err(broadcast::error::RecvError::Closed) => return None,
            }
        }
    }
}

/// Read-only access to a shared key/value string store.
pub trait PersistedStore: Send + Sync {
    /// Fetch the raw text stored under `key`, or `None` if absent.
    fn get_item(&self, key: &str) -> ContentResult<Option<String>>;

    /// Subscribe to writes made by other contexts.
    ///
    /// Returns `None` when the backend cannot deliver notifications; callers
    /// then rely on polling alone.
    fn subscribe(&self) -> Option<ChangeStream> {
        None
    }
}

impl<S: PersistedStore + ?Sized> PersistedStore for Arc<S> {
    fn get_item(&self, key: &str) -> ContentResult<Option<String>> {
        (**self).get_item(key)
    }

    fn subscribe(&self) -> Option<ChangeStream> {
        (**self).subscribe()
    }
}

impl<S: PersistedStore + ?Sized> PersistedStore for Box<S> {
    fn get_item(&self, key: &str) -> ContentResult<Option<String>> {
        (**self).get_item(key)
    }

    fn subscribe(&self) -> Option<ChangeStream> {
        (**self).subscribe()
    }
}

/// Why a read fell back to the empty list.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DecodeDiagnostic {
    /// Key has never been written
    Missing { key: String },
    /// Key holds an empty string
    Empty { key: String },
    /// Value is not a JSON array of the expected shape
    Malformed { key: String, reason: String },
    /// Backend failed to read the value
    Unreadable { key: String, reason: String },
}

impl DecodeDiagnostic {
    /// The key the diagnostic refers to.
    pub fn key(&self) -> &str {
        match self {
            DecodeDiagnostic::Missing { key }
            | DecodeDiagnostic::Empty { key }
            | DecodeDiagnostic::Malformed { key, .. }
            | DecodeDiagnostic::Unreadable { key, .. } => key,
        }
    }

    /// Whether the writer (or the backend) did something wrong, as opposed
    /// to simply not having written anything yet.
    pub fn is_fault(&self) -> bool {
        matches!(
            self,
            DecodeDiagnostic::Malformed { .. } | DecodeDiagnostic::Unreadable { .. }
        )
    }
}

/// Receives diagnostics about reads that fell back to the empty list.
pub trait DiagnosticSink: Send + Sync {
    fn report(&self, diagnostic: &DecodeDiagnostic);
}

impl<F> DiagnosticSink for F
where
    F: Fn(&DecodeDiagnostic) + Send + Sync,
{
    fn report(&self, diagnostic: &DecodeDiagnostic) {
        self(diagnostic)
    }
}

/// Sink that discards diagnostics (they are still logged).
#[derive(Debug, Clone, Copy, Default)]
pub struct IgnoreDiagnostics;

impl DiagnosticSink for IgnoreDiagnostics {
    fn report(&self, _diagnostic: &DecodeDiagnostic) {}
}

/// Read `key` as a JSON array of `T`, falling back to an empty list.
pub fn read_list<T, S>(store: &S, key: &str) -> Vec<T>
where
    T: DeserializeOwned,
    S: PersistedStore + ?Sized,
{
    read_list_with(store, key, &IgnoreDiagnostics)
}

/// Like [`read_list`], reporting the reason for any fallback to `sink`.
pub fn read_list_with<T, S>(store: &S, key: &str, sink: &dyn DiagnosticSink) -> Vec<T>
where
    T: DeserializeOwned,
    S: PersistedStore + ?Sized,
{
    let diagnostic = match store.get_item(key) {
        Ok(Some(text)) if text.is_empty() => DecodeDiagnostic::Empty {
            key: key.to_string(),
        },
        Ok(Some(text)) => match serde_json::from_str::<Vec<T>>(&text) {
            Ok(items) => return items,
            Err(e) => DecodeDiagnostic::Malformed {
                key: key.to_string(),
                reason: e.to_string(),
            },
        },
        Ok(None) => DecodeDiagnostic::Missing {
            key: key.to_string(),
        },
        Err(e) => DecodeDiagnostic::Unreadable {
            key: key.to_string(),
            reason: e.to_string(),
        },
    };

    match &diagnostic {
        DecodeDiagnostic::Malformed { reason, .. } => {
            warn!(key, %reason, "Stored content is malformed, showing fallback content");
        }
        DecodeDiagnostic::Unreadable { reason, .. } => {
            warn!(key, %reason, "Stored content is unreadable, showing fallback content");
        }
        _ => trace!(key, ?diagnostic, "No stored content"),
    }
    sink.report(&diagnostic);

    Vec::new()
}
