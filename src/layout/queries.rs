//! Read-only lookups on the layout tree.

use pagecraft_api::NodeId;

use super::{parse_slot_id, slot_id, ComponentNode, Container, Layout, NodePath, RegionNode};

impl Layout {
    /// Follows a path down the tree.
    pub fn resolve(&self, path: &NodePath) -> Option<&ComponentNode> {
        let mut node = self.regions.get(path.region)?.components.get(path.index)?;
        for step in &path.steps {
            node = node.slots.get(&step.slot)?.get(step.index)?;
        }
        Some(node)
    }

    pub(super) fn resolve_mut(&mut self, path: &NodePath) -> Option<&mut ComponentNode> {
        let mut node = self
            .regions
            .get_mut(path.region)?
            .components
            .get_mut(path.index)?;
        for step in &path.steps {
            node = node.slots.get_mut(&step.slot)?.get_mut(step.index)?;
        }
        Some(node)
    }

    pub fn find_node(&self, uuid: &NodeId) -> Option<&ComponentNode> {
        self.resolve(self.index.get(uuid)?)
    }

    pub(super) fn find_node_mut(&mut self, uuid: &NodeId) -> Option<&mut ComponentNode> {
        let path = self.index.get(uuid)?.clone();
        self.resolve_mut(&path)
    }

    pub fn contains(&self, uuid: &NodeId) -> bool {
        self.index.contains(uuid)
    }

    /// Region the node ultimately sits in, however deep.
    pub fn find_parent_region(&self, uuid: &NodeId) -> Option<&RegionNode> {
        self.regions.get(self.index.get(uuid)?.region)
    }

    pub fn region_index(&self, id: &str) -> Option<usize> {
        self.regions.iter().position(|region| region.id == id)
    }

    pub fn region(&self, id: &str) -> Option<&RegionNode> {
        self.regions.iter().find(|region| region.id == id)
    }

    /// Container directly holding the node and the node's position in it.
    pub fn location(&self, uuid: &NodeId) -> Option<(Container, usize)> {
        let path = self.index.get(uuid)?;
        let container = match (path.parent(), path.steps.last()) {
            (Some(parent), Some(step)) => Container::Slot {
                parent: self.resolve(&parent)?.uuid.clone(),
                slot: step.slot.clone(),
            },
            _ => Container::Region(path.region),
        };
        Some((container, path.position()))
    }

    /// Whether `uuid` sits somewhere inside the subtree of `ancestor`, or is `ancestor` itself.
    pub fn is_within(&self, uuid: &NodeId, ancestor: &NodeId) -> bool {
        let Some(mut path) = self.index.get(uuid).cloned() else {
            return false;
        };

        loop {
            match self.resolve(&path) {
                Some(node) if &node.uuid == ancestor => return true,
                None => return false,
                Some(_) => (),
            }
            match path.parent() {
                Some(parent) => path = parent,
                None => return false,
            }
        }
    }

    /// Children of a container. A slot the component never filled reads as empty.
    pub fn children(&self, container: &Container) -> Option<&[ComponentNode]> {
        match container {
            Container::Region(idx) => Some(self.regions.get(*idx)?.components.as_slice()),
            Container::Slot { parent, slot } => {
                let parent = self.find_node(parent)?;
                Some(parent.slots.get(slot).map_or(&[][..], Vec::as_slice))
            }
        }
    }

    /// Maps a container id from the preview markup onto the current tree.
    ///
    /// Region ids win over slot ids; a slot id only resolves while its parent exists.
    pub fn resolve_container_id(&self, id: &str) -> Option<Container> {
        if let Some(idx) = self.region_index(id) {
            return Some(Container::Region(idx));
        }

        let (parent, slot) = parse_slot_id(id)?;
        self.contains(&parent).then(|| Container::Slot {
            parent,
            slot: slot.to_owned(),
        })
    }

    /// Inverse of [`Layout::resolve_container_id`].
    pub fn container_id(&self, container: &Container) -> Option<String> {
        match container {
            Container::Region(idx) => self.regions.get(*idx).map(|region| region.id.clone()),
            Container::Slot { parent, slot } => Some(slot_id(parent, slot)),
        }
    }

    /// Every node in render order.
    pub fn nodes(&self) -> impl Iterator<Item = &ComponentNode> + '_ {
        self.regions
            .iter()
            .flat_map(|region| &region.components)
            .flat_map(|node| node.descendants_with_depth().map(|(_, n)| n))
    }
}
