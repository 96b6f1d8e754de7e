use pagecraft_api::NodeId;
use serde_json::Value;

use crate::layout::{Layout, LayoutError};
use crate::utils::merge_patch;

impl Layout {
    /// Merges `patch` into a component's props.
    ///
    /// Returns `Ok(false)` if the patch leaves the props as they were.
    pub(in crate::layout) fn update_node_settings(
        &mut self,
        uuid: &NodeId,
        patch: &Value,
    ) -> Result<bool, LayoutError> {
        let Some(node) = self.find_node_mut(uuid) else {
            return Err(LayoutError::NodeNotFound(uuid.clone()));
        };

        let mut props = node.props.clone();
        merge_patch(&mut props, patch);
        if props == node.props {
            return Ok(false);
        }

        node.props = props;
        Ok(true)
    }

    /// Merges `patch` into the page-data fields.
    pub(in crate::layout) fn update_page_data(&mut self, patch: &Value) -> bool {
        let mut model = self.model.clone();
        merge_patch(&mut model, patch);
        if model == self.model {
            return false;
        }

        self.model = model;
        true
    }
}
