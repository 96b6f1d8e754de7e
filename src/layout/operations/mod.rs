//! Structural mutations of the layout tree.
//!
//! ```text
//! operations/
//! ├── mod.rs       - destination validation and shared helpers
//! ├── insert.rs    - placing new components
//! ├── move_node.rs - moving components between and within containers
//! ├── remove.rs    - removing components with their subtree
//! └── update.rs    - settings and page-data patches
//! ```
//!
//! These are the raw operations on [`Layout`]; they validate and apply but do not record
//! history. [`LayoutStore`](super::LayoutStore) wraps them with undo snapshots.

use pagecraft_api::NodeId;

use super::{ComponentNode, Container, Destination, Layout, LayoutError};
use crate::catalog::Catalog;

mod insert;
mod move_node;
mod remove;
mod update;

impl Layout {
    /// Checks that `dest` can receive a component.
    ///
    /// When `moving` is set, the destination must not lie inside that node's subtree. New
    /// components only go into slots the catalog defines for the parent type.
    fn validate_destination(
        &self,
        catalog: &Catalog,
        dest: &Destination,
        moving: Option<&NodeId>,
    ) -> Result<(), LayoutError> {
        match &dest.container {
            Container::Region(idx) => {
                if *idx >= self.regions.len() {
                    return Err(LayoutError::InvalidDestination(format!(
                        "no region at index {idx}"
                    )));
                }
            }
            Container::Slot { parent, slot } => {
                let Some(parent_node) = self.find_node(parent) else {
                    return Err(LayoutError::InvalidDestination(format!(
                        "slot parent {parent} is not in the layout"
                    )));
                };

                if let Some(moving) = moving {
                    if self.is_within(parent, moving) {
                        return Err(LayoutError::InvalidDestination(format!(
                            "cannot move {moving} into its own subtree"
                        )));
                    }
                }

                // Moves may target any slot the parent already has, even one the catalog does
                // not know (yet).
                let existing = moving.is_some() && parent_node.slots.contains_key(slot);
                if !existing && !catalog.has_slot(&parent_node.component, slot) {
                    return Err(LayoutError::InvalidDestination(format!(
                        "component type {} has no slot {slot:?}",
                        parent_node.component
                    )));
                }
            }
        }

        Ok(())
    }

    /// Child list of a container, creating the slot list on first use.
    fn children_mut(&mut self, container: &Container) -> Option<&mut Vec<ComponentNode>> {
        match container {
            Container::Region(idx) => Some(&mut self.regions.get_mut(*idx)?.components),
            Container::Slot { parent, slot } => Some(
                self.find_node_mut(parent)?
                    .slots
                    .entry(slot.clone())
                    .or_default(),
            ),
        }
    }

    /// Places `node` at `index` in `container`, clamped to the end of the list.
    ///
    /// Hands the node back if the container does not exist. Leaves the index stale; callers
    /// reindex.
    fn place(
        &mut self,
        container: &Container,
        index: usize,
        node: ComponentNode,
    ) -> Result<(), ComponentNode> {
        match self.children_mut(container) {
            Some(children) => {
                children.insert(index.min(children.len()), node);
                Ok(())
            }
            None => Err(node),
        }
    }
}
