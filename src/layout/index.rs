use std::collections::HashMap;

use pagecraft_api::NodeId;

use super::{ComponentNode, LayoutError, NodePath, RegionNode};

/// Derived map from uuid to the node's current path.
///
/// Never patched incrementally; [`NodeIndex::build`] walks the whole tree.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct NodeIndex {
    paths: HashMap<NodeId, NodePath>,
}

impl NodeIndex {
    /// Indexes every node, failing on the first uuid seen twice.
    pub fn build(regions: &[RegionNode]) -> Result<Self, LayoutError> {
        let mut index = Self::default();
        for (region_idx, region) in regions.iter().enumerate() {
            for (idx, node) in region.components.iter().enumerate() {
                index.add(node, NodePath::top_level(region_idx, idx))?;
            }
        }
        Ok(index)
    }

    fn add(&mut self, node: &ComponentNode, path: NodePath) -> Result<(), LayoutError> {
        for (slot, children) in &node.slots {
            for (idx, child) in children.iter().enumerate() {
                self.add(child, path.child(slot, idx))?;
            }
        }

        if self.paths.insert(node.uuid.clone(), path).is_some() {
            return Err(LayoutError::DuplicateNode(node.uuid.clone()));
        }
        Ok(())
    }

    pub fn get(&self, uuid: &NodeId) -> Option<&NodePath> {
        self.paths.get(uuid)
    }

    pub fn contains(&self, uuid: &NodeId) -> bool {
        self.paths.contains_key(uuid)
    }

    pub fn len(&self) -> usize {
        self.paths.len()
    }

    pub fn is_empty(&self) -> bool {
        self.paths.is_empty()
    }
}
