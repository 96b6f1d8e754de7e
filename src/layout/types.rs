//! Addressing types for containers and nodes.

use std::fmt;

use pagecraft_api::NodeId;

/// A list of components that accepts drops.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Container {
    /// Top-level region, by position in the region list.
    Region(usize),
    /// Named slot of a placed component.
    Slot { parent: NodeId, slot: String },
}

impl Container {
    pub fn slot(parent: impl Into<NodeId>, slot: impl Into<String>) -> Self {
        Self::Slot {
            parent: parent.into(),
            slot: slot.into(),
        }
    }
}

impl fmt::Display for Container {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Container::Region(idx) => write!(f, "region #{idx}"),
            Container::Slot { parent, slot } => write!(f, "slot {slot:?} of {parent}"),
        }
    }
}

/// Where a component should end up.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Destination {
    pub container: Container,
    /// Position the component occupies in the container once the operation is done.
    ///
    /// Out-of-range values are clamped to the end of the list.
    pub index: usize,
}

impl Destination {
    pub fn region(region: usize, index: usize) -> Self {
        Self {
            container: Container::Region(region),
            index,
        }
    }

    pub fn slot(parent: impl Into<NodeId>, slot: impl Into<String>, index: usize) -> Self {
        Self {
            container: Container::slot(parent, slot),
            index,
        }
    }
}

/// One step down into a slot.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct SlotStep {
    pub slot: String,
    pub index: usize,
}

/// Position of a node in the tree.
///
/// The node is `regions[region].components[index]`, then for each step the child at
/// `slots[step.slot][step.index]`.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct NodePath {
    pub region: usize,
    pub index: usize,
    pub steps: Vec<SlotStep>,
}

impl NodePath {
    pub fn top_level(region: usize, index: usize) -> Self {
        Self {
            region,
            index,
            steps: Vec::new(),
        }
    }

    /// Path of a child in one of this node's slots.
    pub fn child(&self, slot: &str, index: usize) -> Self {
        let mut path = self.clone();
        path.steps.push(SlotStep {
            slot: slot.to_owned(),
            index,
        });
        path
    }

    /// Path of the component owning the slot this node sits in, if it is not top-level.
    pub fn parent(&self) -> Option<Self> {
        let mut path = self.clone();
        path.steps.pop()?;
        Some(path)
    }

    /// Position of the node within its container.
    pub fn position(&self) -> usize {
        self.steps.last().map_or(self.index, |step| step.index)
    }

    /// Number of slots between the region and the node.
    pub fn depth(&self) -> usize {
        self.steps.len()
    }
}
