//! Agora UI Components
//!
//! Dioxus components that draw what `agora-core` renders:
//! - [`NodeView`] turns a rendered [`agora_core::Node`] subtree into elements
//!   and routes click actions back to the caller
//! - [`MountView`] draws a whole mount point (gallery grid or events list)
//! - [`EventModal`] draws the event detail overlay
//!
//! Components hold no content state of their own. Everything shown comes
//! from the engine's `Document`.

pub mod components;

pub use components::*;
