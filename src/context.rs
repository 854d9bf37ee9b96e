//! Content context provider for Agora.
//!
//! Provides the running `ContentSync` and the latest page `Document` to all
//! components via use_context.
//!
//! ## Usage
//!
//! ```ignore
//! // In child components
//! let document = use_document();
//! let content = use_content();
//! dispatch(content, |sync| sync.dismiss());
//! ```

use std::path::PathBuf;
use std::sync::Arc;

use agora_core::{ContentConfig, ContentSync, Document, FileStore};
use dioxus::prelude::*;
use tokio::sync::RwLock;

/// Shared content sync type for context.
///
/// `None` until the store has been opened and the first reconciliation run.
pub type SharedContent = Arc<RwLock<Option<ContentSync<FileStore>>>>;

/// Get the data directory for the application.
pub fn get_data_dir() -> PathBuf {
    crate::get_data_dir()
}

/// Get the content settings for the application.
pub fn get_content_config() -> ContentConfig {
    crate::get_content_config()
}

/// Hook to access the running content sync from context.
pub fn use_content() -> Signal<SharedContent> {
    use_context::<Signal<SharedContent>>()
}

/// Hook to access the latest page state.
///
/// Updated by the App component each time the engine revision changes.
pub fn use_document() -> Signal<Document> {
    use_context::<Signal<Document>>()
}

/// Run `f` against the content sync once it is available.
///
/// Does nothing while the sync is still starting.
pub fn dispatch<F>(content: Signal<SharedContent>, f: F)
where
    F: FnOnce(&ContentSync<FileStore>) + 'static,
{
    spawn(async move {
        let shared = content();
        let guard = shared.read().await;
        match *guard {
            Some(ref sync) => f(sync),
            None => tracing::debug!("Content sync not ready, ignoring interaction"),
        }
    });
}
