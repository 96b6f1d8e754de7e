//! The layout model store: the one place structural mutations happen.

use pagecraft_api::{ComponentData, NodeId, RegionData, Section};
use serde_json::Value;
use tracing::{debug, trace};

use super::history::History;
use super::{ComponentNode, Destination, Layout, LayoutError, RegionNode};
use crate::catalog::Catalog;

/// Owns the layout of the page being edited, its undo history, and the catalog mutations are
/// validated against.
///
/// Every successful mutation is one undo step and bumps [`LayoutStore::revision`]. Mutations that
/// would not change anything (removing an absent uuid, moving a component onto itself, a patch
/// that changes no value) succeed without recording a step.
#[derive(Debug)]
pub struct LayoutStore {
    layout: Layout,
    catalog: Catalog,
    history: History,
    default_region: String,
    revision: u64,
}

impl LayoutStore {
    /// Creates a store holding just the empty default region.
    pub fn new(default_region: impl Into<String>, max_history: Option<usize>) -> Self {
        let default_region = default_region.into();
        let regions = vec![RegionNode::new(default_region.clone(), default_region.clone())];

        Self {
            layout: Layout {
                regions,
                ..Layout::default()
            },
            catalog: Catalog::default(),
            history: History::new(max_history),
            default_region,
            revision: 0,
        }
    }

    /// Replaces the whole tree with one fetched from the server and forgets the history.
    pub fn load(&mut self, regions: Vec<RegionData>, model: Value) -> Result<(), LayoutError> {
        let _span = tracy_client::span!("LayoutStore::load");

        self.layout = Layout::from_payload(regions, model, &self.default_region)?;
        self.history.clear();
        self.revision += 1;
        debug!(
            "loaded layout with {} regions and {} components",
            self.layout.regions().len(),
            self.layout.index().len()
        );
        Ok(())
    }

    pub fn set_catalog(&mut self, catalog: Catalog) {
        self.catalog = catalog;
    }

    pub fn catalog(&self) -> &Catalog {
        &self.catalog
    }

    pub fn layout(&self) -> &Layout {
        &self.layout
    }

    pub fn default_region(&self) -> &str {
        &self.default_region
    }

    pub fn find_node(&self, uuid: &NodeId) -> Option<&ComponentNode> {
        self.layout.find_node(uuid)
    }

    pub fn find_parent_region(&self, uuid: &NodeId) -> Option<&RegionNode> {
        self.layout.find_parent_region(uuid)
    }

    /// Incremented by every change, including undo, redo and loads.
    pub fn revision(&self) -> u64 {
        self.revision
    }

    pub fn history(&self) -> &History {
        &self.history
    }

    /// Moves a component, see [`Layout::move_node`] for the index semantics.
    ///
    /// The component and the destination are looked up by uuid in the current tree, so a drop
    /// computed against an older tree still lands in the right container.
    pub fn move_node(&mut self, uuid: &NodeId, dest: &Destination) -> Result<bool, LayoutError> {
        let _span = tracy_client::span!("LayoutStore::move_node");
        self.mutate("move", |layout, catalog| layout.move_node(catalog, uuid, dest))
    }

    pub fn insert_node(
        &mut self,
        node: ComponentNode,
        dest: &Destination,
    ) -> Result<(), LayoutError> {
        let _span = tracy_client::span!("LayoutStore::insert_node");
        self.mutate("insert", |layout, catalog| {
            layout.insert_node(catalog, node, dest).map(|()| true)
        })
        .map(drop)
    }

    /// Inserts several components side by side starting at `dest`, as one undo step.
    ///
    /// Either all of them are placed or, on error, none.
    pub fn insert_nodes(
        &mut self,
        nodes: Vec<ComponentNode>,
        dest: &Destination,
    ) -> Result<(), LayoutError> {
        let _span = tracy_client::span!("LayoutStore::insert_nodes");
        self.mutate("insert", |layout, catalog| {
            if nodes.is_empty() {
                return Ok(false);
            }

            let snapshot = layout.snapshot();
            for (offset, node) in nodes.into_iter().enumerate() {
                let dest = Destination {
                    container: dest.container.clone(),
                    index: dest.index.saturating_add(offset),
                };
                if let Err(err) = layout.insert_node(catalog, node, &dest) {
                    layout.restore(snapshot);
                    return Err(err);
                }
            }
            Ok(true)
        })
        .map(drop)
    }

    /// Places a copy of a saved section with fresh uuids. Returns the uuids of its roots.
    pub fn insert_section(
        &mut self,
        section: &Section,
        dest: &Destination,
    ) -> Result<Vec<NodeId>, LayoutError> {
        let nodes: Vec<_> = section
            .layout
            .iter()
            .map(|data| ComponentNode::from(data.clone()).instantiate())
            .collect();
        let uuids = nodes.iter().map(|node| node.uuid.clone()).collect();
        self.insert_nodes(nodes, dest)?;
        Ok(uuids)
    }

    /// Copies a component and its subtree into a new, unsaved section.
    pub fn extract_section(&self, uuid: &NodeId, name: impl Into<String>) -> Option<Section> {
        let node = self.layout.find_node(uuid)?;
        Some(Section {
            id: None,
            name: name.into(),
            layout: vec![ComponentData::from(node)],
        })
    }

    /// Removes a component and its subtree. Removing an absent uuid succeeds and does nothing.
    pub fn remove_node(&mut self, uuid: &NodeId) -> Result<bool, LayoutError> {
        let _span = tracy_client::span!("LayoutStore::remove_node");
        self.mutate("remove", |layout, _| Ok(layout.take_node(uuid).is_some()))
    }

    pub fn update_node_settings(
        &mut self,
        uuid: &NodeId,
        patch: &Value,
    ) -> Result<bool, LayoutError> {
        self.mutate("update settings", |layout, _| {
            layout.update_node_settings(uuid, patch)
        })
    }

    pub fn update_page_data(&mut self, patch: &Value) -> bool {
        self.mutate("update page data", |layout, _| Ok(layout.update_page_data(patch)))
            .unwrap_or(false)
    }

    pub fn undo(&mut self) -> Result<(), LayoutError> {
        let previous = self
            .history
            .undo(self.layout.snapshot())
            .ok_or(LayoutError::NothingToUndo)?;
        self.layout.restore(previous);
        self.revision += 1;
        debug!("undo, {} steps left", self.history.undo_len());
        Ok(())
    }

    pub fn redo(&mut self) -> Result<(), LayoutError> {
        let next = self
            .history
            .redo(self.layout.snapshot())
            .ok_or(LayoutError::NothingToRedo)?;
        self.layout.restore(next);
        self.revision += 1;
        debug!("redo, {} steps left", self.history.redo_len());
        Ok(())
    }

    fn mutate(
        &mut self,
        what: &str,
        op: impl FnOnce(&mut Layout, &Catalog) -> Result<bool, LayoutError>,
    ) -> Result<bool, LayoutError> {
        let before = self.layout.snapshot();
        match op(&mut self.layout, &self.catalog) {
            Ok(true) => {
                self.history.record(before);
                self.revision += 1;
                trace!("{what} applied, revision {}", self.revision);
                Ok(true)
            }
            Ok(false) => {
                trace!("{what} changed nothing");
                Ok(false)
            }
            Err(err) => {
                debug!("{what} rejected: {err}");
                Err(err)
            }
        }
    }
}
