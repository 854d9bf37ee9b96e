//! Triggers that drive reconciliation, and the loop that consumes them.
//!
//! ## Overview
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────────┐
//! │  ChangeSource: two independent rails                            │
//! │  ├── Notification: store written by another context             │
//! │  └── Tick: fixed interval catch-up, also covers missed events   │
//! │                        │                                        │
//! │                        v  mpsc (single consumer)                │
//! │  run_reconciliation: lock engine → reconcile → publish revision │
//! └─────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Each run holds the engine lock for the whole read-render-snapshot
//! sequence and never awaits while holding it, so runs are serialized in
//! arrival order. Triggers that queue up while a run is in progress are
//! coalesced: one full re-read covers all of them.

use std::sync::Arc;
use std::time::Duration;

use parking_lot::Mutex;
use tokio::sync::{mpsc, watch};
use tokio::task::JoinHandle;
use tokio::time::MissedTickBehavior;
use tracing::{debug, info, trace};

use crate::config::ContentConfig;
use crate::document::Document;
use crate::engine::ContentSyncEngine;
use crate::render::ClickAction;
use crate::storage::{ChangeStream, PersistedStore};
use crate::types::Event;

/// Why a reconciliation run happened.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Trigger {
    /// First run after the page loaded
    Initial,
    /// Another context wrote a watched key
    Notification,
    /// Periodic catch-up tick
    Tick,
}

/// Engine shared between the reconciliation loop and the UI.
pub type SharedContentEngine<S> = Arc<Mutex<ContentSyncEngine<S>>>;

/// Produces reconciliation triggers from store notifications and a timer.
pub struct ChangeSource {
    interval: Duration,
    changes: Option<ChangeStream>,
    watched: Vec<String>,
}

impl ChangeSource {
    /// Build a source ticking at the configured interval.
    ///
    /// With `changes == None` the tick is the only rail.
    pub fn new(config: &ContentConfig, changes: Option<ChangeStream>) -> Self {
        Self {
            interval: config.poll_interval(),
            changes,
            watched: config.watched_keys().iter().map(|k| k.to_string()).collect(),
        }
    }

    /// Whether cross-context notifications are available.
    pub fn has_notifications(&self) -> bool {
        self.changes.is_some()
    }

    /// Spawn both rails; triggers arrive on the returned receiver.
    pub fn spawn(self) -> (mpsc::UnboundedReceiver<Trigger>, ChangeSourceHandle) {
        let (tx, rx) = mpsc::unbounded_channel();
        let mut tasks = Vec::with_capacity(2);

        let tick_tx = tx.clone();
        let interval = self.interval;
        tasks.push(tokio::spawn(async move {
            let mut ticker = tokio::time::interval(interval);
            ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);
            // The first tick completes immediately; the initial run covers it
            ticker.tick().await;
            loop {
                ticker.tick().await;
                trace!("Reconciliation tick");
                if tick_tx.send(Trigger::Tick).is_err() {
                    break;
                }
            }
        }));

        match self.changes {
            Some(mut changes) => {
                let watched = self.watched;
                tasks.push(tokio::spawn(async move {
                    while let Some(change) = changes.recv().await {
                        let keys: Vec<&str> = watched.iter().map(String::as_str).collect();
                        if !change.concerns(&keys) {
                            continue;
                        }
                        debug!(key = ?change.key, "Store changed in another context");
                        if tx.send(Trigger::Notification).is_err() {
                            break;
                        }
                    }
                }));
            }
            None => debug!(?interval, "No change notifications, polling only"),
        }

        (rx, ChangeSourceHandle { tasks })
    }
}

/// Owns the rail tasks; dropping it stops them.
pub struct ChangeSourceHandle {
    tasks: Vec<JoinHandle<()>>,
}

impl ChangeSourceHandle {
    /// Number of running rails.
    pub fn rails(&self) -> usize {
        self.tasks.iter().filter(|t| !t.is_finished()).count()
    }

    /// Stop all rails.
    pub fn abort(&self) {
        for task in &self.tasks {
            task.abort();
        }
    }
}

impl Drop for ChangeSourceHandle {
    fn drop(&mut self) {
        self.abort();
    }
}

/// Consume triggers until every rail has stopped, reconciling on each.
pub async fn run_reconciliation<S: PersistedStore>(
    engine: SharedContentEngine<S>,
    mut triggers: mpsc::UnboundedReceiver<Trigger>,
    revisions: Arc<watch::Sender<u64>>,
) {
    while let Some(mut trigger) = triggers.recv().await {
        while let Ok(next) = triggers.try_recv() {
            trigger = next;
        }
        let revision = engine.lock().reconcile(trigger).revision;
        revisions.send_replace(revision);
    }
    debug!("Trigger rails closed, reconciliation loop stopped");
}

/// A running content sync: engine, trigger rails and consumer loop.
///
/// Dropping it stops all background work.
pub struct ContentSync<S> {
    engine: SharedContentEngine<S>,
    revisions: Arc<watch::Sender<u64>>,
    source: ChangeSourceHandle,
    consumer: JoinHandle<()>,
}

impl<S: PersistedStore + 'static> ContentSync<S> {
    /// Run the initial reconciliation and start both trigger rails.
    ///
    /// Must be called from within a tokio runtime.
    pub fn start(mut engine: ContentSyncEngine<S>) -> Self {
        // Subscribe first so nothing written during the initial run is missed
        let changes = engine.store().subscribe();
        let source = ChangeSource::new(engine.config(), changes);
        info!(
            notifications = source.has_notifications(),
            interval_ms = engine.config().poll_interval_ms,
            "Starting content sync"
        );

        let initial = engine.reconcile(Trigger::Initial);
        let (revisions, _) = watch::channel(initial.revision);
        let revisions = Arc::new(revisions);
        let engine = Arc::new(Mutex::new(engine));

        let (triggers, source) = source.spawn();
        let consumer = tokio::spawn(run_reconciliation(
            engine.clone(),
            triggers,
            revisions.clone(),
        ));

        Self {
            engine,
            revisions,
            source,
            consumer,
        }
    }

    /// The shared engine.
    pub fn engine(&self) -> SharedContentEngine<S> {
        self.engine.clone()
    }

    /// Receiver notified whenever the engine revision changes.
    pub fn revisions(&self) -> watch::Receiver<u64> {
        self.revisions.subscribe()
    }

    /// Number of running trigger rails.
    pub fn rails(&self) -> usize {
        self.source.rails()
    }

    /// Copy of the current page state.
    pub fn document(&self) -> Document {
        self.engine.lock().document().clone()
    }

    pub fn selected_event(&self) -> Option<Event> {
        self.engine.lock().selected_event().cloned()
    }

    /// Dispatch a click action from a rendered node.
    pub fn activate(&self, action: ClickAction) {
        self.update(|engine| engine.activate(action));
    }

    pub fn select(&self, event: Event) {
        self.update(|engine| engine.select(event));
    }

    pub fn dismiss(&self) {
        self.update(ContentSyncEngine::dismiss);
    }

    fn update(&self, f: impl FnOnce(&mut ContentSyncEngine<S>)) {
        let revision = {
            let mut engine = self.engine.lock();
            f(&mut engine);
            engine.revision()
        };
        self.revisions.send_replace(revision);
    }
}

impl<S> Drop for ContentSync<S> {
    fn drop(&mut self) {
        self.source.abort();
        self.consumer.abort();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::{MemoryStore, EVENTS_KEY};

    fn fast_config() -> ContentConfig {
        ContentConfig {
            poll_interval_ms: 100,
            ..ContentConfig::default()
        }
    }

    #[tokio::test(start_paused = true)]
    async fn test_tick_rail_fires_on_interval() {
        let source = ChangeSource::new(&fast_config(), None);
        assert!(!source.has_notifications());

        let (mut triggers, handle) = source.spawn();
        assert_eq!(triggers.recv().await, Some(Trigger::Tick));
        assert_eq!(triggers.recv().await, Some(Trigger::Tick));
        assert_eq!(handle.rails(), 1);
    }

    #[tokio::test(start_paused = true)]
    async fn test_first_tick_is_skipped() {
        let source = ChangeSource::new(&fast_config(), None);
        let (mut triggers, _handle) = source.spawn();

        tokio::time::sleep(Duration::from_millis(50)).await;
        assert!(triggers.try_recv().is_err());
    }

    #[tokio::test]
    async fn test_notification_rail_filters_keys() {
        let store = MemoryStore::new();
        let admin = store.context();
        let page = store.context();

        let config = ContentConfig {
            poll_interval_ms: 60_000,
            ..ContentConfig::default()
        };
        let source = ChangeSource::new(&config, page.subscribe());
        let (mut triggers, handle) = source.spawn();
        assert_eq!(handle.rails(), 2);

        admin.set_item("unrelated", "x").unwrap();
        admin.set_item(EVENTS_KEY, "[]").unwrap();

        let trigger = tokio::time::timeout(Duration::from_secs(1), triggers.recv())
            .await
            .unwrap();
        assert_eq!(trigger, Some(Trigger::Notification));
        assert!(triggers.try_recv().is_err());
    }

    #[tokio::test]
    async fn test_dropping_handle_stops_rails() {
        let source = ChangeSource::new(&fast_config(), None);
        let (mut triggers, handle) = source.spawn();
        drop(handle);
        assert_eq!(triggers.recv().await, None);
    }
}
