use std::sync::Arc;

use agora_core::{ContentSync, ContentSyncEngine, Document, FileStore};
use dioxus::prelude::*;
use tokio::sync::RwLock;

use crate::context::{get_content_config, get_data_dir, SharedContent};
use crate::pages::Landing;
use crate::theme::GLOBAL_STYLES;

/// Application routes.
///
/// - `/` - Landing page with live gallery and events
#[derive(Clone, Routable, PartialEq)]
pub enum Route {
    #[route("/")]
    Landing {},
}

/// Root application component.
///
/// Opens the shared store, constructs the engine once and keeps the
/// document signal in step with engine revisions.
#[component]
pub fn App() -> Element {
    let content: Signal<SharedContent> = use_signal(|| Arc::new(RwLock::new(None)));
    let mut document: Signal<Document> = use_signal(Document::landing_page);

    use_context_provider(|| content);
    use_context_provider(|| document);

    use_effect(move || {
        spawn(async move {
            let store_dir = get_data_dir().join("store");
            let store = match FileStore::open(&store_dir) {
                Ok(store) => store,
                Err(e) => {
                    tracing::error!("Failed to open content store at {:?}: {}", store_dir, e);
                    return;
                }
            };

            let engine =
                ContentSyncEngine::with_config(store, Document::landing_page(), get_content_config());
            let sync = ContentSync::start(engine);
            let mut revisions = sync.revisions();
            document.set(sync.document());

            let shared = content();
            *shared.write().await = Some(sync);
            tracing::info!("Content sync started");

            while revisions.changed().await.is_ok() {
                let guard = shared.read().await;
                if let Some(ref sync) = *guard {
                    document.set(sync.document());
                }
            }
            tracing::debug!("Revision channel closed");
        });
    });

    rsx! {
        style { {GLOBAL_STYLES} }
        Router::<Route> {}
    }
}
