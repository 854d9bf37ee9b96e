//! Components for the synced landing page sections.

mod event_modal;
mod node_view;

pub use event_modal::*;
pub use node_view::*;
