//! Drag-and-drop between regions and slots.
//!
//! [`DragSession`] turns pointer events into a [`DropIntent`]: what was dragged, the id of the
//! container it was dropped on and the index within it. [`apply_drop`] turns the intent into a
//! store mutation. Container ids come straight from the preview markup and are resolved against
//! the tree as it is at drop time, so edits landing mid-drag cannot make the drop go astray.

use pagecraft_api::{ComponentTypeId, NodeId, Section};
use tracing::debug;

use crate::layout::{Destination, LayoutError, LayoutStore};
use crate::preview::{DomMap, ElementData};

mod session;

pub use session::{
    DragData, DragOutcome, DragSession, DragState, DropTarget, Point, DRAG_START_THRESHOLD,
};

/// What is being dragged.
#[derive(Debug, Clone, PartialEq)]
pub enum DragSource {
    /// A component already on the page.
    Node(NodeId),
    /// A component type from the library; dropping it places a fresh instance.
    Library(ComponentTypeId),
    /// A saved section; dropping it places a copy with fresh uuids.
    Section(Section),
}

/// A completed drop, before it is applied.
#[derive(Debug, Clone, PartialEq)]
pub struct DropIntent {
    pub source: DragSource,
    pub container_id: String,
    pub index: usize,
}

/// Drag source for a press on a preview element.
///
/// Slot markers are structure and never draggable; neither is anything outside a component.
pub fn drag_source(map: &DomMap, element: &ElementData) -> Option<DragSource> {
    if element.is_slot() {
        return None;
    }
    map.owner(element.id).cloned().map(DragSource::Node)
}

/// Applies a drop to the store.
///
/// Returns the uuid of the placed component, or `None` if the drop changed nothing.
pub fn apply_drop(
    store: &mut LayoutStore,
    intent: DropIntent,
) -> Result<Option<NodeId>, LayoutError> {
    let Some(container) = store.layout().resolve_container_id(&intent.container_id) else {
        return Err(LayoutError::InvalidDestination(format!(
            "unknown drop container {:?}",
            intent.container_id
        )));
    };
    let dest = Destination {
        container,
        index: intent.index,
    };

    let node = match intent.source {
        DragSource::Node(uuid) => {
            let moved = store.move_node(&uuid, &dest)?;
            return Ok(moved.then_some(uuid));
        }
        DragSource::Library(component) => {
            store.catalog().instantiate(&component).ok_or_else(|| {
                LayoutError::InvalidDestination(format!("unknown component type {component}"))
            })?
        }
        DragSource::Section(section) => {
            let uuids = store.insert_section(&section, &dest)?;
            return Ok(uuids.into_iter().next());
        }
    };

    let uuid = node.uuid.clone();
    debug!("dropping new {} as {uuid}", node.component);
    store.insert_node(node, &dest)?;
    Ok(Some(uuid))
}
