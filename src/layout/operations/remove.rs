use pagecraft_api::NodeId;

use crate::layout::{ComponentNode, Layout};

impl Layout {
    /// Detaches a component from its container and returns it with its subtree.
    ///
    /// Returns `None` if the uuid is not in the tree.
    pub(in crate::layout) fn take_node(&mut self, uuid: &NodeId) -> Option<ComponentNode> {
        let path = self.index.get(uuid)?.clone();

        let children = match (path.parent(), path.steps.last()) {
            (Some(parent), Some(step)) => {
                self.resolve_mut(&parent)?.slots.get_mut(&step.slot)?
            }
            _ => &mut self.regions.get_mut(path.region)?.components,
        };

        let position = path.position();
        if position >= children.len() {
            return None;
        }
        let node = children.remove(position);

        self.reindex();
        Some(node)
    }
}
