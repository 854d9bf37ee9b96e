//! ContentSyncEngine - reconciles the stored content lists with the page.
//!
//! The engine has two independent facets:
//!
//! - **Reconciliation**: read both lists from the store, render them, replace
//!   both containers, remember what was read. Runs on every trigger, never
//!   diffs, never fails.
//! - **Detail view**: `select` captures a clicked event and opens the overlay
//!   with the full description; `dismiss` forgets it and closes the overlay.
//!
//! # Example
//!
//! ```ignore
//! use agora_core::{ContentSyncEngine, Document, MemoryStore, Trigger};
//!
//! let store = MemoryStore::new();
//! let mut engine = ContentSyncEngine::new(store.context(), Document::landing_page());
//! engine.reconcile(Trigger::Initial);
//!
//! // Click on the first event card
//! let card = &engine.document().events().unwrap().nodes()[0];
//! if let Some(action) = card.on_click().cloned() {
//!     engine.activate(action);
//! }
//! engine.dismiss();
//! ```

use std::sync::Arc;

use chrono::{DateTime, Utc};
use tracing::{debug, warn};

use crate::config::ContentConfig;
use crate::document::{DetailFields, Document, ScrollMode};
use crate::render::{ClickAction, EventDate, Node, Renderer};
use crate::storage::{read_list_with, DiagnosticSink, IgnoreDiagnostics, PersistedStore};
use crate::sync::Trigger;
use crate::types::{Event, GalleryImage};

/// The list read by a reconciliation run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Snapshot<T> {
    pub items: Vec<T>,
    /// Engine revision produced by the run
    pub revision: u64,
    pub reconciled_at: DateTime<Utc>,
}

/// What a run did to one container.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MountUpdate {
    /// Children replaced with these nodes
    Replaced { nodes: Vec<Node> },
    /// Container missing from the page
    Skipped,
}

impl MountUpdate {
    /// The rendered nodes, if the container was updated.
    pub fn nodes(&self) -> Option<&[Node]> {
        match self {
            MountUpdate::Replaced { nodes } => Some(nodes),
            MountUpdate::Skipped => None,
        }
    }
}

/// Result of one reconciliation run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReconcileOutcome {
    pub trigger: Trigger,
    pub revision: u64,
    pub gallery: MountUpdate,
    pub events: MountUpdate,
}

/// The transient detail-view selection.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct DetailState {
    selected: Option<Event>,
}

impl DetailState {
    pub fn selected(&self) -> Option<&Event> {
        self.selected.as_ref()
    }

    pub fn is_open(&self) -> bool {
        self.selected.is_some()
    }
}

/// Keeps the page's content containers in step with the shared store.
pub struct ContentSyncEngine<S> {
    store: S,
    config: ContentConfig,
    renderer: Renderer,
    document: Document,
    gallery_snapshot: Option<Snapshot<GalleryImage>>,
    events_snapshot: Option<Snapshot<Event>>,
    detail: DetailState,
    diagnostics: Arc<dyn DiagnosticSink>,
    revision: u64,
}

impl<S: PersistedStore> ContentSyncEngine<S> {
    /// Create an engine with the default configuration.
    pub fn new(store: S, document: Document) -> Self {
        Self::with_config(store, document, ContentConfig::default())
    }

    /// Create an engine with a custom configuration.
    pub fn with_config(store: S, document: Document, config: ContentConfig) -> Self {
        Self {
            store,
            renderer: Renderer::from_config(&config),
            config,
            document,
            gallery_snapshot: None,
            events_snapshot: None,
            detail: DetailState::default(),
            diagnostics: Arc::new(IgnoreDiagnostics),
            revision: 0,
        }
    }

    /// Report fallback reads to `sink` in addition to the log.
    pub fn with_diagnostics(mut self, sink: Arc<dyn DiagnosticSink>) -> Self {
        self.diagnostics = sink;
        self
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    pub fn config(&self) -> &ContentConfig {
        &self.config
    }

    pub fn document(&self) -> &Document {
        &self.document
    }

    /// Increases on every observable change to the document or selection.
    pub fn revision(&self) -> u64 {
        self.revision
    }

    pub fn gallery_snapshot(&self) -> Option<&Snapshot<GalleryImage>> {
        self.gallery_snapshot.as_ref()
    }

    pub fn events_snapshot(&self) -> Option<&Snapshot<Event>> {
        self.events_snapshot.as_ref()
    }

    pub fn detail(&self) -> &DetailState {
        &self.detail
    }

    pub fn selected_event(&self) -> Option<&Event> {
        self.detail.selected()
    }

    // ═══════════════════════════════════════════════════════════════════════
    // Reconciliation
    // ═══════════════════════════════════════════════════════════════════════

    /// Read both lists, re-render both containers and record the snapshots.
    pub fn reconcile(&mut self, trigger: Trigger) -> ReconcileOutcome {
        let images: Vec<GalleryImage> =
            read_list_with(&self.store, &self.config.gallery_key, self.diagnostics.as_ref());
        let events: Vec<Event> =
            read_list_with(&self.store, &self.config.events_key, self.diagnostics.as_ref());

        let gallery = match self.document.gallery_mut() {
            Some(mount) => {
                let nodes = self.renderer.render_gallery(&images);
                mount.replace_children(nodes.clone());
                MountUpdate::Replaced { nodes }
            }
            None => MountUpdate::Skipped,
        };
        let events_update = match self.document.events_mut() {
            Some(mount) => {
                let nodes = self.renderer.render_events(&events);
                mount.replace_children(nodes.clone());
                MountUpdate::Replaced { nodes }
            }
            None => MountUpdate::Skipped,
        };

        self.revision += 1;
        let now = Utc::now();
        debug!(
            ?trigger,
            revision = self.revision,
            images = images.len(),
            events = events.len(),
            "Reconciled content"
        );

        self.gallery_snapshot = Some(Snapshot {
            items: images,
            revision: self.revision,
            reconciled_at: now,
        });
        self.events_snapshot = Some(Snapshot {
            items: events,
            revision: self.revision,
            reconciled_at: now,
        });

        ReconcileOutcome {
            trigger,
            revision: self.revision,
            gallery,
            events: events_update,
        }
    }

    // ═══════════════════════════════════════════════════════════════════════
    // Detail View
    // ═══════════════════════════════════════════════════════════════════════

    /// Dispatch a click action bound to a rendered node.
    pub fn activate(&mut self, action: ClickAction) {
        match action {
            ClickAction::ShowEvent(event) => self.select(event),
        }
    }

    /// Show `event` in the detail overlay and lock page scrolling.
    ///
    /// Without an overlay on the page the selection is still recorded, but
    /// scrolling stays untouched.
    pub fn select(&mut self, event: Event) {
        match self.document.detail_mut() {
            Some(overlay) => {
                let date = EventDate::parse(&event.date);
                overlay.open(DetailFields {
                    day: date.day,
                    month: date.month,
                    title: event.title.clone(),
                    time: event.time.clone(),
                    location: event.location.clone(),
                    description: event.description.clone(),
                });
                self.document.set_scroll(ScrollMode::Locked);
            }
            None => warn!(title = %event.title, "No detail overlay on page, selection not shown"),
        }

        debug!(title = %event.title, "Selected event");
        self.detail.selected = Some(event);
        self.revision += 1;
    }

    /// Close the detail overlay, forget the selection and restore scrolling.
    ///
    /// Does nothing when no event is selected.
    pub fn dismiss(&mut self) {
        if self.detail.selected.take().is_none() {
            return;
        }

        if let Some(overlay) = self.document.detail_mut() {
            overlay.close();
            self.document.set_scroll(ScrollMode::Auto);
        }
        debug!("Dismissed event detail");
        self.revision += 1;
    }
}
