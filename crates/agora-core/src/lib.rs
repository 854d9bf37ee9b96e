//! Agora Core Library
//!
//! Keeps the landing page's gallery and events lists in step with content
//! written elsewhere into a shared key/value store.
//!
//! ## Overview
//!
//! ```text
//! ┌──────────────┐  Trigger   ┌───────────────────┐  read_list  ┌────────────────┐
//! │ ChangeSource │ ─────────> │ ContentSyncEngine │ ──────────> │ PersistedStore │
//! │ notify/tick  │            │ reconcile/select  │             │ memory / files │
//! └──────────────┘            └─────────┬─────────┘             └────────────────┘
//!                                       │ Renderer
//!                                       v
//!                               Document (gallery, events, detail overlay)
//! ```
//!
//! The engine never writes to the store. Every reconciliation is a full
//! read-render-replace, so missing or malformed data simply renders the
//! built-in placeholder content until the next run.
//!
//! ## Quick Start
//!
//! ```ignore
//! use agora_core::{ContentConfig, ContentSync, ContentSyncEngine, Document, FileStore};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let config = ContentConfig::default();
//!     let store = FileStore::open("~/.local/share/agora/store")?;
//!     let engine = ContentSyncEngine::with_config(store, Document::landing_page(), config.clone());
//!
//!     let sync = ContentSync::start(engine);
//!     let mut revisions = sync.revisions();
//!     while revisions.changed().await.is_ok() {
//!         let document = sync.document();
//!         println!("{} gallery nodes", document.gallery().map_or(0, |m| m.nodes().len()));
//!     }
//!     Ok(())
//! }
//! ```

pub mod config;
pub mod document;
pub mod engine;
pub mod error;
pub mod logging;
pub mod render;
pub mod storage;
pub mod sync;
pub mod types;

// Re-exports
pub use config::ContentConfig;
pub use document::{DetailFields, DetailOverlay, Document, Mount, ScrollMode};
pub use engine::{ContentSyncEngine, DetailState, MountUpdate, ReconcileOutcome, Snapshot};
pub use error::{ContentError, ContentResult};
pub use render::{
    render_events, render_gallery, sample_events, ClickAction, EventDate, Node, NodeElement,
    Renderer, Tag,
};
pub use storage::{
    read_list, read_list_with, ChangeStream, ContextId, DecodeDiagnostic, DiagnosticSink,
    FileStore, IgnoreDiagnostics, MemoryStore, PersistedStore, StoreChange, StoreContext,
    EVENTS_KEY, GALLERY_KEY,
};
pub use sync::{ChangeSource, ChangeSourceHandle, ContentSync, SharedContentEngine, Trigger};
pub use types::{Event, GalleryImage};
