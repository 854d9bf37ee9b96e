//! Model of the host page the engine renders into.
//!
//! The page supplies up to three mount points: the gallery container, the
//! events container and the event detail overlay. Any of them may be absent
//! from the markup; operations targeting a missing mount point do nothing.

use crate::render::Node;

/// Page scroll behaviour.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ScrollMode {
    /// Normal scrolling
    #[default]
    Auto,
    /// Background scrolling disabled while a modal is open
    Locked,
}

/// A container whose children are replaced wholesale on every render.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Mount {
    nodes: Vec<Node>,
    replacements: u64,
}

impl Mount {
    /// Current children.
    pub fn nodes(&self) -> &[Node] {
        &self.nodes
    }

    /// How many times the children have been replaced.
    pub fn replacements(&self) -> u64 {
        self.replacements
    }

    /// Swap in a new set of children.
    pub fn replace_children(&mut self, nodes: Vec<Node>) {
        self.nodes = nodes;
        self.replacements += 1;
    }
}

/// Labelled text fields of the detail overlay.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct DetailFields {
    pub day: String,
    pub month: String,
    pub title: String,
    pub time: String,
    pub location: String,
    pub description: String,
}

/// The event detail overlay.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct DetailOverlay {
    active: bool,
    fields: DetailFields,
}

impl DetailOverlay {
    /// Whether the overlay is shown.
    pub fn is_active(&self) -> bool {
        self.active
    }

    /// Field contents. Stale values remain after closing, as in the markup.
    pub fn fields(&self) -> &DetailFields {
        &self.fields
    }

    pub(crate) fn open(&mut self, fields: DetailFields) {
        self.fields = fields;
        self.active = true;
    }

    pub(crate) fn close(&mut self) {
        self.active = false;
    }
}

/// The host page.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Document {
    gallery: Option<Mount>,
    events: Option<Mount>,
    detail: Option<DetailOverlay>,
    scroll: ScrollMode,
}

impl Document {
    /// The landing page with every mount point present.
    pub fn landing_page() -> Self {
        Self::builder()
            .with_gallery()
            .with_events()
            .with_detail_overlay()
            .build()
    }

    /// Start from a page with no mount points.
    pub fn builder() -> DocumentBuilder {
        DocumentBuilder::default()
    }

    pub fn gallery(&self) -> Option<&Mount> {
        self.gallery.as_ref()
    }

    pub fn gallery_mut(&mut self) -> Option<&mut Mount> {
        self.gallery.as_mut()
    }

    pub fn events(&self) -> Option<&Mount> {
        self.events.as_ref()
    }

    pub fn events_mut(&mut self) -> Option<&mut Mount> {
        self.events.as_mut()
    }

    pub fn detail(&self) -> Option<&DetailOverlay> {
        self.detail.as_ref()
    }

    pub fn detail_mut(&mut self) -> Option<&mut DetailOverlay> {
        self.detail.as_mut()
    }

    pub fn scroll(&self) -> ScrollMode {
        self.scroll
    }

    pub fn set_scroll(&mut self, scroll: ScrollMode) {
        self.scroll = scroll;
    }
}

/// Builder selecting which mount points the page provides.
#[derive(Debug, Default)]
pub struct DocumentBuilder {
    document: Document,
}

impl DocumentBuilder {
    pub fn with_gallery(mut self) -> Self {
        self.document.gallery = Some(Mount::default());
        self
    }

    pub fn with_events(mut self) -> Self {
        self.document.events = Some(Mount::default());
        self
    }

    pub fn with_detail_overlay(mut self) -> Self {
        self.document.detail = Some(DetailOverlay::default());
        self
    }

    pub fn build(self) -> Document {
        self.document
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_landing_page_has_all_mounts() {
        let doc = Document::landing_page();
        assert!(doc.gallery().is_some());
        assert!(doc.events().is_some());
        assert!(doc.detail().is_some());
        assert_eq!(doc.scroll(), ScrollMode::Auto);
    }

    #[test]
    fn test_builder_omits_mounts() {
        let doc = Document::builder().with_events().build();
        assert!(doc.gallery().is_none());
        assert!(doc.events().is_some());
        assert!(doc.detail().is_none());
    }

    #[test]
    fn test_replace_children_counts() {
        let mut mount = Mount::default();
        mount.replace_children(vec![Node::Text("a".into())]);
        mount.replace_children(vec![]);
        assert_eq!(mount.replacements(), 2);
        assert!(mount.nodes().is_empty());
    }

    #[test]
    fn test_overlay_keeps_fields_after_close() {
        let mut overlay = DetailOverlay::default();
        overlay.open(DetailFields {
            title: "Cleanup".into(),
            ..DetailFields::default()
        });
        assert!(overlay.is_active());
        overlay.close();
        assert!(!overlay.is_active());
        assert_eq!(overlay.fields().title, "Cleanup");
    }
}
