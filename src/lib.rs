//! Editing core of a drag-and-drop page builder.
//!
//! A page is a tree of regions holding placed components, which in turn hold more components in
//! named slots. [`layout`] owns that tree and every mutation of it; [`editor`] wraps one editing
//! session around it: dragging, selection, preview markup and keeping the CMS in sync.
//!
//! Nothing here touches the network or a real DOM. The host performs the requests the editor
//! hands out and implements [`preview::PreviewSurface`] and [`assets::AssetHost`] over its
//! document.

pub mod assets;
pub mod catalog;
pub mod dnd;
pub mod editor;
pub mod host;
pub mod layout;
pub mod navigation;
pub mod preview;
pub mod sync;
pub mod utils;

pub use editor::Editor;
