use std::collections::HashSet;

use crate::catalog::Catalog;
use crate::layout::{ComponentNode, Destination, Layout, LayoutError};

impl Layout {
    /// Inserts a new component, with whatever subtree it carries, at `dest`.
    pub(in crate::layout) fn insert_node(
        &mut self,
        catalog: &Catalog,
        node: ComponentNode,
        dest: &Destination,
    ) -> Result<(), LayoutError> {
        self.validate_destination(catalog, dest, None)?;

        let mut incoming = HashSet::new();
        for uuid in node.uuids() {
            if self.contains(uuid) || !incoming.insert(uuid) {
                return Err(LayoutError::DuplicateNode(uuid.clone()));
            }
        }

        if self.place(&dest.container, dest.index, node).is_err() {
            return Err(LayoutError::InvalidDestination(format!(
                "{} disappeared during insert",
                dest.container
            )));
        }
        self.reindex();
        Ok(())
    }
}
