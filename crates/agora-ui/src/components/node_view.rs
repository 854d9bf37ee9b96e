//! Rendered Subtree Components
//!
//! Draws the renderer's [`Node`] trees. Elements carry their class and
//! attributes through unchanged; text is always drawn as text, never parsed
//! as markup.

use agora_core::{ClickAction, Node, NodeElement, Tag};
use dioxus::prelude::*;

/// CSS class of an element, empty when it has none.
pub fn element_class(element: &NodeElement) -> &'static str {
    element.class.unwrap_or_default()
}

/// Whether clicking the element dispatches an action.
pub fn is_clickable(element: &NodeElement) -> bool {
    element.on_click.is_some()
}

/// A single rendered node and its descendants.
///
/// Clicking an element that carries a [`ClickAction`] calls `on_activate`
/// with that action.
///
/// # Example
///
/// ```rust,ignore
/// rsx! {
///     NodeView {
///         node: card.clone(),
///         on_activate: move |action| sync.activate(action),
///     }
/// }
/// ```
#[component]
pub fn NodeView(node: Node, on_activate: EventHandler<ClickAction>) -> Element {
    let element = match node {
        Node::Text(text) => return rsx! { "{text}" },
        Node::Element(element) => element,
    };

    let class = element_class(&element);
    let clickable = is_clickable(&element);
    let action = element.on_click.clone();
    let onclick = move |_| {
        if let Some(action) = action.clone() {
            tracing::trace!("Node activated");
            on_activate.call(action);
        }
    };

    let children = rsx! {
        for (index, child) in element.children.iter().cloned().enumerate() {
            NodeView { key: "{index}", node: child, on_activate: on_activate }
        }
    };

    match element.tag {
        Tag::Div => rsx! {
            div {
                class: "{class}",
                role: if clickable { "button" } else { "" },
                onclick: onclick,
                {children}
            }
        },
        Tag::Span => rsx! {
            span { class: "{class}", onclick: onclick, {children} }
        },
        Tag::H3 => rsx! {
            h3 { class: "{class}", onclick: onclick, {children} }
        },
        Tag::P => rsx! {
            p { class: "{class}", onclick: onclick, {children} }
        },
        Tag::Img => {
            let src = element.attr("src").unwrap_or_default().to_string();
            let alt = element.attr("alt").unwrap_or_default().to_string();
            rsx! {
                img { class: "{class}", src: "{src}", alt: "{alt}", loading: "lazy" }
            }
        }
    }
}

/// Every child of a mount point, inside a container with the given class.
#[component]
pub fn MountView(
    /// Container class, e.g. "gallery-grid"
    class: &'static str,
    /// Current children of the mount
    nodes: Vec<Node>,
    /// Called with the action of a clicked node
    on_activate: EventHandler<ClickAction>,
) -> Element {
    rsx! {
        div { class: "{class}",
            for (index, node) in nodes.into_iter().enumerate() {
                NodeView { key: "{index}", node: node, on_activate: on_activate }
            }
        }
    }
}
