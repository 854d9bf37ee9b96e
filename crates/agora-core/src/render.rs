//! Pure rendering of the content lists into node trees.
//!
//! The output mirrors the landing page markup:
//!
//! ```text
//! gallery item   div.gallery-item > [img(src, alt), div.image-caption]
//! placeholder    div.gallery-item > div.gallery-placeholder > span "Image N"
//! event card     div.event-card (click) >
//!                  [div.event-date > [span.day, span.month],
//!                   div.event-content > [h3, p, div.event-meta > [span.event-time,
//!                                                                 span.event-location]]]
//! ```
//!
//! Text is kept as plain text in [`Node::Text`] and only escaped when
//! serialized, so admin-supplied content can never inject markup.

use std::fmt::Write as FmtWrite;

use crate::config::{ContentConfig, DEFAULT_DESCRIPTION_LIMIT, DEFAULT_PLACEHOLDER_SLOTS};
use crate::types::{Event, GalleryImage};

/// Caption shown for gallery images without a description
pub const MISSING_DESCRIPTION: &str = "No description available";

/// Alt text of every gallery image
pub const GALLERY_IMAGE_ALT: &str = "Gallery Image";

/// Month shown when an event date has no first token
pub const DEFAULT_MONTH: &str = "Soon";

/// Day shown when an event date has no second token
pub const DEFAULT_DAY: &str = "TBD";

const ELLIPSIS: &str = "...";

/// Element tags produced by the renderer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Tag {
    Div,
    Span,
    H3,
    P,
    Img,
}

impl Tag {
    /// The HTML tag name.
    pub fn name(&self) -> &'static str {
        match self {
            Tag::Div => "div",
            Tag::Span => "span",
            Tag::H3 => "h3",
            Tag::P => "p",
            Tag::Img => "img",
        }
    }

    fn is_void(&self) -> bool {
        matches!(self, Tag::Img)
    }
}

/// Action bound to a rendered node, dispatched back to the engine on click.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ClickAction {
    /// Open the detail view for this (untruncated) event
    ShowEvent(Event),
}

/// A node of a rendered subtree.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Node {
    Element(NodeElement),
    Text(String),
}

/// An element node.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NodeElement {
    pub tag: Tag,
    pub class: Option<&'static str>,
    pub attrs: Vec<(&'static str, String)>,
    pub children: Vec<Node>,
    pub on_click: Option<ClickAction>,
}

impl NodeElement {
    /// Value of attribute `name`, if set.
    pub fn attr(&self, name: &str) -> Option<&str> {
        self.attrs
            .iter()
            .find(|(n, _)| *n == name)
            .map(|(_, v)| v.as_str())
    }
}

impl Node {
    fn element(tag: Tag, class: &'static str) -> NodeElement {
        NodeElement {
            tag,
            class: Some(class),
            attrs: Vec::new(),
            children: Vec::new(),
            on_click: None,
        }
    }

    fn text_in(tag: Tag, class: Option<&'static str>, text: impl Into<String>) -> Node {
        Node::Element(NodeElement {
            tag,
            class,
            attrs: Vec::new(),
            children: vec![Node::Text(text.into())],
            on_click: None,
        })
    }

    /// The element, if this is an element node.
    pub fn as_element(&self) -> Option<&NodeElement> {
        match self {
            Node::Element(element) => Some(element),
            Node::Text(_) => None,
        }
    }

    /// Concatenated text content of this node and its descendants.
    pub fn text(&self) -> String {
        let mut out = String::new();
        self.collect_text(&mut out);
        out
    }

    fn collect_text(&self, out: &mut String) {
        match self {
            Node::Text(text) => out.push_str(text),
            Node::Element(element) => {
                for child in &element.children {
                    child.collect_text(out);
                }
            }
        }
    }

    /// Depth-first search for the first element carrying `class`.
    pub fn find_class(&self, class: &str) -> Option<&NodeElement> {
        let element = self.as_element()?;
        if element.class == Some(class) {
            return Some(element);
        }
        element.children.iter().find_map(|c| c.find_class(class))
    }

    /// Text content of the first descendant carrying `class`.
    pub fn text_of(&self, class: &str) -> Option<String> {
        self.find_class(class)
            .map(|e| e.children.iter().map(Node::text).collect())
    }

    /// The click action bound to this node, if any.
    pub fn on_click(&self) -> Option<&ClickAction> {
        self.as_element().and_then(|e| e.on_click.as_ref())
    }

    /// Serialize to HTML, escaping all text and attribute values.
    pub fn to_html(&self) -> String {
        let mut out = String::new();
        self.write_html(&mut out);
        out
    }

    fn write_html(&self, out: &mut String) {
        match self {
            Node::Text(text) => escape_into(text, out),
            Node::Element(element) => {
                let name = element.tag.name();
                let _ = write!(out, "<{name}");
                if let Some(class) = element.class {
                    let _ = write!(out, " class=\"{class}\"");
                }
                for (attr, value) in &element.attrs {
                    let _ = write!(out, " {attr}=\"");
                    escape_into(value, out);
                    out.push('"');
                }
                out.push('>');
                if element.tag.is_void() {
                    return;
                }
                for child in &element.children {
                    child.write_html(out);
                }
                let _ = write!(out, "</{name}>");
            }
        }
    }
}

/// Serialize a whole subtree (container children) to HTML.
pub fn nodes_to_html(nodes: &[Node]) -> String {
    nodes.iter().map(Node::to_html).collect()
}

fn escape_into(text: &str, out: &mut String) {
    for c in text.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(c),
        }
    }
}

/// Month/day pair parsed from an event's free-text date.
///
/// Only the first two space-separated tokens are used; `"March 5 2025"`
/// shows as month `March`, day `5`. This is a display split, not calendar
/// parsing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EventDate {
    pub month: String,
    pub day: String,
}

impl EventDate {
    pub fn parse(date: &str) -> Self {
        let mut tokens = date.split(' ');
        let month = tokens.next().filter(|t| !t.is_empty()).unwrap_or(DEFAULT_MONTH);
        let day = tokens.next().filter(|t| !t.is_empty()).unwrap_or(DEFAULT_DAY);
        Self {
            month: month.to_string(),
            day: day.to_string(),
        }
    }
}

/// The three events shown when the store holds none.
pub fn sample_events() -> Vec<Event> {
    const DATE: &str = "Soon TBD";
    const TIME: &str = "TBD";
    const LOCATION: &str = "School Grounds";
    vec![
        Event::new(
            "Environmental Issues Discussion",
            "Join us to discuss environmental challenges in our city and explore ways to maintain our school and community through service projects. We'll cover topics like waste reduction, energy conservation, and local environmental initiatives.",
            DATE,
            TIME,
            LOCATION,
        ),
        Event::new(
            "Science & Technology Showcase",
            "Present and discuss recent research breakthroughs in any scientific field and explore emerging technologies that interest you. This is your chance to share your passion for science and learn from your peers.",
            DATE,
            TIME,
            LOCATION,
        ),
        Event::new(
            "School Policy & Student Needs",
            "Voice your concerns about school policies and discuss ways to address student needs and create positive change. Your input matters in shaping our school community.",
            DATE,
            TIME,
            LOCATION,
        ),
    ]
}

/// Renders content lists into node trees.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Renderer {
    description_limit: usize,
    placeholder_slots: usize,
}

impl Default for Renderer {
    fn default() -> Self {
        Self {
            description_limit: DEFAULT_DESCRIPTION_LIMIT,
            placeholder_slots: DEFAULT_PLACEHOLDER_SLOTS,
        }
    }
}

impl Renderer {
    pub fn new(description_limit: usize, placeholder_slots: usize) -> Self {
        Self {
            description_limit,
            placeholder_slots,
        }
    }

    pub fn from_config(config: &ContentConfig) -> Self {
        Self::new(config.description_limit, config.placeholder_slots)
    }

    /// Render the gallery container's children.
    pub fn render_gallery(&self, images: &[GalleryImage]) -> Vec<Node> {
        if images.is_empty() {
            return (1..=self.placeholder_slots)
                .map(|n| {
                    let mut placeholder = Node::element(Tag::Div, "gallery-placeholder");
                    placeholder
                        .children
                        .push(Node::text_in(Tag::Span, None, format!("Image {n}")));

                    let mut item = Node::element(Tag::Div, "gallery-item");
                    item.children.push(Node::Element(placeholder));
                    Node::Element(item)
                })
                .collect();
        }

        images
            .iter()
            .map(|image| {
                let img = NodeElement {
                    tag: Tag::Img,
                    class: None,
                    attrs: vec![
                        ("src", image.url.clone()),
                        ("alt", GALLERY_IMAGE_ALT.to_string()),
                    ],
                    children: Vec::new(),
                    on_click: None,
                };
                let caption = if image.description.is_empty() {
                    MISSING_DESCRIPTION
                } else {
                    image.description.as_str()
                };

                let mut item = Node::element(Tag::Div, "gallery-item");
                item.children.push(Node::Element(img));
                item.children
                    .push(Node::text_in(Tag::Div, Some("image-caption"), caption));
                Node::Element(item)
            })
            .collect()
    }

    /// Render the events container's children.
    pub fn render_events(&self, events: &[Event]) -> Vec<Node> {
        if events.is_empty() {
            // Sample cards always show the cut-off form
            return sample_events()
                .into_iter()
                .map(|event| {
                    let summary = format!("{}{ELLIPSIS}", take_chars(&event.description, self.description_limit));
                    event_card(event, summary)
                })
                .collect();
        }

        events
            .iter()
            .map(|event| {
                let summary = self.summarize(&event.description);
                event_card(event.clone(), summary)
            })
            .collect()
    }

    /// The list-view form of a description.
    pub fn summarize(&self, description: &str) -> String {
        if description.chars().count() > self.description_limit {
            format!("{}{ELLIPSIS}", take_chars(description, self.description_limit))
        } else {
            description.to_string()
        }
    }
}

/// Render the gallery with the default rules.
pub fn render_gallery(images: &[GalleryImage]) -> Vec<Node> {
    Renderer::default().render_gallery(images)
}

/// Render the events with the default rules.
pub fn render_events(events: &[Event]) -> Vec<Node> {
    Renderer::default().render_events(events)
}

fn take_chars(text: &str, limit: usize) -> &str {
    match text.char_indices().nth(limit) {
        Some((end, _)) => &text[..end],
        None => text,
    }
}

fn event_card(event: Event, summary: String) -> Node {
    let date = EventDate::parse(&event.date);

    let mut date_block = Node::element(Tag::Div, "event-date");
    date_block.children = vec![
        Node::text_in(Tag::Span, Some("day"), date.day),
        Node::text_in(Tag::Span, Some("month"), date.month),
    ];

    let mut meta = Node::element(Tag::Div, "event-meta");
    meta.children = vec![
        Node::text_in(Tag::Span, Some("event-time"), event.time.clone()),
        Node::text_in(Tag::Span, Some("event-location"), event.location.clone()),
    ];

    let mut content = Node::element(Tag::Div, "event-content");
    content.children = vec![
        Node::text_in(Tag::H3, None, event.title.clone()),
        Node::text_in(Tag::P, None, summary),
        Node::Element(meta),
    ];

    let mut card = Node::element(Tag::Div, "event-card");
    card.children = vec![Node::Element(date_block), Node::Element(content)];
    card.on_click = Some(ClickAction::ShowEvent(event));
    Node::Element(card)
}
