//! Landing page - the community's front door.
//!
//! Static hero and about copy, plus the two synced sections (gallery and
//! upcoming events) and the event detail overlay. Everything below the hero
//! is drawn from the engine's document.

use agora_core::{ClickAction, ScrollMode};
use agora_ui::{EventModal, MountView};
use dioxus::prelude::*;

use crate::context::{dispatch, use_content, use_document};

/// Inline style of the page root for a scroll mode.
pub fn scroll_style(scroll: ScrollMode) -> &'static str {
    match scroll {
        ScrollMode::Auto => "overflow: auto;",
        ScrollMode::Locked => "overflow: hidden;",
    }
}

/// Landing page component.
#[component]
pub fn Landing() -> Element {
    let document = use_document();
    let content = use_content();

    let on_activate = move |action: ClickAction| {
        dispatch(content, move |sync| sync.activate(action));
    };
    let on_close = move |_| {
        dispatch(content, |sync| sync.dismiss());
    };

    let doc = document();
    let gallery = doc.gallery().map(|mount| mount.nodes().to_vec());
    let events = doc.events().map(|mount| mount.nodes().to_vec());
    let detail = doc.detail().cloned();

    rsx! {
        main { class: "landing", style: scroll_style(doc.scroll()),
            header { class: "hero",
                h1 { class: "page-title", "Agora" }
                p { class: "tagline",
                    "a gathering place for the people who make this neighbourhood work"
                }
            }

            section { class: "about-section",
                h2 { class: "section-header", "Who We Are" }
                p { class: "body-text",
                    "We are neighbours organising cleanups, workshops and shared meals. "
                    "Everything below is kept up to date by our organisers."
                }
            }

            section { class: "gallery-section", id: "gallery",
                h2 { class: "section-header", "Gallery" }
                if let Some(nodes) = gallery {
                    MountView { class: "gallery-grid", nodes: nodes, on_activate: on_activate }
                }
            }

            section { class: "events-section", id: "events",
                h2 { class: "section-header", "Upcoming Events" }
                if let Some(nodes) = events {
                    MountView { class: "events-list", nodes: nodes, on_activate: on_activate }
                }
            }

            if let Some(overlay) = detail {
                EventModal { overlay: overlay, on_close: on_close }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_scroll_style_locks_page() {
        assert_eq!(scroll_style(ScrollMode::Auto), "overflow: auto;");
        assert_eq!(scroll_style(ScrollMode::Locked), "overflow: hidden;");
    }
}
