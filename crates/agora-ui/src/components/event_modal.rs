//! Event Detail Modal
//!
//! Draws the detail overlay. The overlay stays in the tree while closed and
//! only its `active` class changes, so the last event's fields linger hidden
//! until the next selection overwrites them.

use agora_core::DetailOverlay;
use dioxus::prelude::*;

/// Class list of the overlay root.
pub fn modal_class(active: bool) -> &'static str {
    if active {
        "event-modal active"
    } else {
        "event-modal"
    }
}

/// Event detail overlay
///
/// Shows the full, untruncated event. Clicking the backdrop or the close
/// button calls `on_close`.
///
/// # Example
///
/// ```rust,ignore
/// rsx! {
///     if let Some(overlay) = document().detail().cloned() {
///         EventModal { overlay, on_close: move |_| sync.dismiss() }
///     }
/// }
/// ```
#[component]
pub fn EventModal(
    /// Overlay state from the engine's document
    overlay: DetailOverlay,
    /// Callback when the overlay is dismissed
    on_close: EventHandler<()>,
) -> Element {
    let active = overlay.is_active();
    let fields = overlay.fields().clone();

    rsx! {
        div {
            class: modal_class(active),
            id: "eventModal",
            "aria-hidden": if active { "false" } else { "true" },
            onclick: move |_| on_close.call(()),

            div {
                class: "modal-content",
                role: "dialog",
                onclick: move |e| e.stop_propagation(),

                button {
                    class: "modal-close",
                    "aria-label": "Close",
                    onclick: move |_| on_close.call(()),
                    "×"
                }

                div { class: "modal-date",
                    span { class: "day", id: "modalDay", "{fields.day}" }
                    span { class: "month", id: "modalMonth", "{fields.month}" }
                }

                h2 { class: "modal-title", id: "modalTitle", "{fields.title}" }

                div { class: "modal-meta",
                    span { class: "event-time", id: "modalTime", "{fields.time}" }
                    span { class: "event-location", id: "modalLocation", "{fields.location}" }
                }

                p { class: "modal-description", id: "modalDescription", "{fields.description}" }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_modal_class_tracks_active() {
        assert_eq!(modal_class(true), "event-modal active");
        assert_eq!(modal_class(false), "event-modal");
    }

    #[test]
    fn test_default_overlay_is_hidden() {
        let overlay = DetailOverlay::default();
        assert_eq!(modal_class(overlay.is_active()), "event-modal");
    }
}
