//! Property-based tests for rendering and reconciliation
//!
//! Uses proptest to verify the truncation law, date fallbacks and
//! idempotence of reconciliation.

use agora_core::{
    render_events, render_gallery, ClickAction, ContentSyncEngine, Document, Event, EventDate,
    GalleryImage, MemoryStore, Renderer, Trigger, EVENTS_KEY, GALLERY_KEY,
};
use proptest::prelude::*;

// ============================================================================
// Strategy Generators
// ============================================================================

/// Free text including multibyte characters
fn text_strategy(max: usize) -> impl Strategy<Value = String> {
    prop::string::string_regex(&format!("[a-zA-Z0-9 éü😀<>&]{{0,{max}}}")).expect("valid regex")
}

fn event_strategy() -> impl Strategy<Value = Event> {
    (
        text_strategy(30),
        text_strategy(250),
        text_strategy(20),
        text_strategy(10),
        text_strategy(20),
    )
        .prop_map(|(title, description, date, time, location)| {
            Event::new(title, description, date, time, location)
        })
}

fn image_strategy() -> impl Strategy<Value = GalleryImage> {
    (text_strategy(40), text_strategy(60)).prop_map(|(url, d)| GalleryImage::new(url, d))
}

fn summary_of(card: &agora_core::Node) -> String {
    card.find_class("event-content").unwrap().children[1].text()
}

// ============================================================================
// Property Tests
// ============================================================================

proptest! {
    /// Short descriptions are shown verbatim, long ones cut to 100 chars plus "..."
    #[test]
    fn truncation_law(description in text_strategy(250)) {
        let event = Event::new("t", description.clone(), "May 1", "t", "l");
        let nodes = render_events(std::slice::from_ref(&event));
        let summary = summary_of(&nodes[0]);

        if description.chars().count() <= 100 {
            prop_assert_eq!(summary, description);
        } else {
            let head: String = description.chars().take(100).collect();
            prop_assert_eq!(summary, format!("{head}..."));
        }
        // The click action always carries the full event
        prop_assert_eq!(nodes[0].on_click(), Some(&ClickAction::ShowEvent(event)));
    }

    /// The summary never exceeds limit + 3 characters
    #[test]
    fn summary_length_bounded(description in text_strategy(400), limit in 0usize..150) {
        let summary = Renderer::new(limit, 6).summarize(&description);
        prop_assert!(summary.chars().count() <= limit + 3);
    }

    /// Month and day are never empty
    #[test]
    fn date_parts_never_empty(date in text_strategy(30)) {
        let parsed = EventDate::parse(&date);
        prop_assert!(!parsed.month.is_empty());
        prop_assert!(!parsed.day.is_empty());
    }

    /// Rendering is a pure function of its input
    #[test]
    fn rendering_is_deterministic(
        images in prop::collection::vec(image_strategy(), 0..10),
        events in prop::collection::vec(event_strategy(), 0..10),
    ) {
        prop_assert_eq!(render_gallery(&images), render_gallery(&images));
        prop_assert_eq!(render_events(&events), render_events(&events));
    }

    /// Non-empty lists render exactly one node per item; empty lists the fallbacks
    #[test]
    fn node_count_matches_list(
        images in prop::collection::vec(image_strategy(), 0..20),
        events in prop::collection::vec(event_strategy(), 0..20),
    ) {
        let expected_gallery = if images.is_empty() { 6 } else { images.len() };
        let expected_events = if events.is_empty() { 3 } else { events.len() };
        prop_assert_eq!(render_gallery(&images).len(), expected_gallery);
        prop_assert_eq!(render_events(&events).len(), expected_events);
    }

    /// Reconciling twice with unchanged data yields the same subtrees
    #[test]
    fn reconcile_idempotent(
        images in prop::collection::vec(image_strategy(), 0..8),
        events in prop::collection::vec(event_strategy(), 0..8),
    ) {
        let store = MemoryStore::new();
        let admin = store.context();
        admin.set_item(GALLERY_KEY, &serde_json::to_string(&images).unwrap()).unwrap();
        admin.set_item(EVENTS_KEY, &serde_json::to_string(&events).unwrap()).unwrap();

        let mut engine = ContentSyncEngine::new(store.context(), Document::landing_page());
        let first = engine.reconcile(Trigger::Notification);
        let second = engine.reconcile(Trigger::Tick);

        prop_assert_eq!(first.gallery, second.gallery);
        prop_assert_eq!(first.events, second.events);
        prop_assert_eq!(&engine.gallery_snapshot().unwrap().items, &images);
        prop_assert_eq!(&engine.events_snapshot().unwrap().items, &events);
    }

    /// Select then dismiss always leaves no selection and unlocked scrolling
    #[test]
    fn select_dismiss_round_trip(event in event_strategy(), extra_dismisses in 0usize..3) {
        let store = MemoryStore::new();
        let mut engine = ContentSyncEngine::new(store.context(), Document::landing_page());

        engine.select(event.clone());
        prop_assert_eq!(
            &engine.document().detail().unwrap().fields().description,
            &event.description
        );
        engine.dismiss();
        for _ in 0..extra_dismisses {
            engine.dismiss();
        }
        prop_assert!(engine.selected_event().is_none());
        prop_assert_eq!(engine.document().scroll(), agora_core::ScrollMode::Auto);
    }
}
