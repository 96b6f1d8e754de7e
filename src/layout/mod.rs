//! Layout tree of the page being edited.
//!
//! The page is a fixed list of *regions* handed out by the page template. Each region holds an
//! ordered list of placed components, and each component holds named *slots*, which are ordered
//! lists of further components. Regions and slots are both drop targets; only components move.
//!
//! The tree owns its nodes outright: a component lives in exactly one container and removing it
//! drops its whole subtree. Nothing stores a parent pointer. Instead, [`Layout`] keeps a derived
//! [`NodeIndex`] from uuid to path, which is rebuilt from scratch at the end of every mutation
//! inside the same `&mut self` call, so it can never be observed out of sync. Finding a node is a
//! hash lookup followed by walking a path as long as the node's depth.
//!
//! [`LayoutStore`] wraps a [`Layout`] with validation against the component catalog and with
//! whole-tree undo/redo snapshots. All editing goes through the store.

use pagecraft_api::{NodeId, RegionData};
use serde_json::Value;

pub mod error;
pub mod history;
mod index;
pub mod node;
mod operations;
mod queries;
pub mod store;
pub mod types;

#[cfg(test)]
pub mod snapshot;

#[cfg(test)]
pub(crate) mod tests;

pub use error::LayoutError;
pub use index::NodeIndex;
pub use node::ComponentNode;
pub use store::LayoutStore;
pub use types::{Container, Destination, NodePath, SlotStep};

/// Separator between the parent uuid and the slot name in a slot container id.
pub const SLOT_ID_SEPARATOR: char = '/';

/// A named top-level drop zone.
#[derive(Debug, Clone, PartialEq)]
pub struct RegionNode {
    pub id: String,
    pub name: String,
    /// Components in render order.
    pub components: Vec<ComponentNode>,
}

impl RegionNode {
    pub fn new(id: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            components: Vec::new(),
        }
    }

    /// Whether the region renders its empty-state placeholder.
    pub fn is_empty(&self) -> bool {
        self.components.is_empty()
    }
}

impl From<RegionData> for RegionNode {
    fn from(value: RegionData) -> Self {
        Self {
            id: value.id,
            name: value.name,
            components: value.components.into_iter().map(ComponentNode::from).collect(),
        }
    }
}

impl From<&RegionNode> for RegionData {
    fn from(value: &RegionNode) -> Self {
        Self {
            id: value.id.clone(),
            name: value.name.clone(),
            components: value.components.iter().map(Into::into).collect(),
        }
    }
}

/// The full editable state of one page: the region tree plus the page-data fields.
#[derive(Debug, Clone, Default)]
pub struct Layout {
    regions: Vec<RegionNode>,
    /// Page-data fields, opaque to the tree.
    model: Value,
    index: NodeIndex,
}

/// Undo step: the tree and the page data without the derived index.
#[derive(Debug, Clone, PartialEq)]
pub struct Snapshot {
    pub regions: Vec<RegionNode>,
    pub model: Value,
}

impl PartialEq for Layout {
    fn eq(&self, other: &Self) -> bool {
        // The index is derived from the regions.
        self.regions == other.regions && self.model == other.model
    }
}

impl Layout {
    /// Builds a layout, failing if any region id or uuid appears twice.
    pub fn new(regions: Vec<RegionNode>, model: Value) -> Result<Self, LayoutError> {
        for (idx, region) in regions.iter().enumerate() {
            if regions[..idx].iter().any(|r| r.id == region.id) {
                return Err(LayoutError::DuplicateRegion(region.id.clone()));
            }
        }

        let index = NodeIndex::build(&regions)?;
        Ok(Self {
            regions,
            model,
            index,
        })
    }

    /// Builds a layout from a server payload.
    ///
    /// The default region is appended empty if the payload does not have it.
    pub fn from_payload(
        regions: Vec<RegionData>,
        model: Value,
        default_region: &str,
    ) -> Result<Self, LayoutError> {
        let mut regions: Vec<RegionNode> = regions.into_iter().map(RegionNode::from).collect();
        if !regions.iter().any(|r| r.id == default_region) {
            regions.push(RegionNode::new(default_region, default_region));
        }
        Self::new(regions, model)
    }

    /// Serializes the tree into the shape the server stores.
    pub fn to_payload(&self) -> Vec<RegionData> {
        self.regions.iter().map(RegionData::from).collect()
    }

    pub fn regions(&self) -> &[RegionNode] {
        &self.regions
    }

    pub fn model(&self) -> &Value {
        &self.model
    }

    pub fn index(&self) -> &NodeIndex {
        &self.index
    }

    pub fn snapshot(&self) -> Snapshot {
        Snapshot {
            regions: self.regions.clone(),
            model: self.model.clone(),
        }
    }

    /// Replaces the whole state with a snapshot taken from this layout's history.
    pub(crate) fn restore(&mut self, snapshot: Snapshot) {
        self.regions = snapshot.regions;
        self.model = snapshot.model;
        self.reindex();
    }

    /// Rebuilds the uuid index after a structural change.
    ///
    /// Mutations validate uniqueness up front, so a rebuild can only fail on a bug.
    fn reindex(&mut self) {
        match NodeIndex::build(&self.regions) {
            Ok(index) => self.index = index,
            Err(err) => {
                tracing::error!("layout index rebuild failed: {err}");
            }
        }
    }

    #[cfg(test)]
    pub fn verify_invariants(&self) {
        use std::collections::HashSet;

        let mut seen = HashSet::new();
        let mut count = 0;
        for region in &self.regions {
            for node in &region.components {
                for (_, n) in node.descendants_with_depth() {
                    assert!(seen.insert(n.uuid.clone()), "duplicate uuid {}", n.uuid);
                    count += 1;
                }
            }
        }

        assert_eq!(self.index.len(), count, "index must cover every node");

        for uuid in &seen {
            let path = self
                .index
                .get(uuid)
                .unwrap_or_else(|| panic!("{uuid} missing from index"));
            let node = self.resolve(path).expect("index path must resolve");
            assert_eq!(&node.uuid, uuid, "index path must lead to the node");
        }

        let rebuilt = NodeIndex::build(&self.regions).unwrap();
        assert_eq!(self.index, rebuilt, "index must be up to date");

        let region_ids: HashSet<_> = self.regions.iter().map(|r| &r.id).collect();
        assert_eq!(region_ids.len(), self.regions.len(), "region ids must be unique");
    }
}

/// Looks up the parent uuid and slot name of a slot container id.
pub fn parse_slot_id(id: &str) -> Option<(NodeId, &str)> {
    let (parent, slot) = id.split_once(SLOT_ID_SEPARATOR)?;
    (!parent.is_empty() && !slot.is_empty()).then(|| (NodeId::from(parent), slot))
}

/// Container id of a slot as it appears in the preview markup.
pub fn slot_id(parent: &NodeId, slot: &str) -> String {
    format!("{parent}{SLOT_ID_SEPARATOR}{slot}")
}
