use pagecraft_api::NodeId;
use tracing::error;

use crate::catalog::Catalog;
use crate::layout::{Destination, Layout, LayoutError};

impl Layout {
    /// Moves a component to `dest`.
    ///
    /// `dest.index` is the position the component occupies once the move is done, which is what
    /// the user sees when dropping it. Within one container this is equivalent to inserting into
    /// the list with the component already removed: moving up inserts before the component
    /// currently at that index, moving down lands after it, since removing the component first
    /// shifts everything behind it up by one. The index is clamped, so a stale index can only
    /// put the component at the end, never outside the list.
    ///
    /// Returns `Ok(false)` when the component is already there.
    pub(in crate::layout) fn move_node(
        &mut self,
        catalog: &Catalog,
        uuid: &NodeId,
        dest: &Destination,
    ) -> Result<bool, LayoutError> {
        let Some((origin, position)) = self.location(uuid) else {
            return Err(LayoutError::NodeNotFound(uuid.clone()));
        };

        self.validate_destination(catalog, dest, Some(uuid))?;

        if origin == dest.container {
            let len = self.children(&origin).map_or(0, <[_]>::len);
            if dest.index.min(len.saturating_sub(1)) == position {
                return Ok(false);
            }
        }

        let Some(node) = self.take_node(uuid) else {
            return Err(LayoutError::NodeNotFound(uuid.clone()));
        };

        // The destination is validated to lie outside the moved subtree, so it still exists.
        if let Err(node) = self.place(&dest.container, dest.index, node) {
            error!("destination {} vanished while moving {uuid}", dest.container);
            let _ = self.place(&origin, position, node);
            self.reindex();
            return Err(LayoutError::InvalidDestination(format!(
                "{} disappeared during move",
                dest.container
            )));
        }

        self.reindex();
        Ok(true)
    }
}
