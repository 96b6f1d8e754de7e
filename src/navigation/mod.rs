//! Selection and focus, derived from the editor path.
//!
//! The path is the source of truth: the selected component and the focused region are whatever
//! the current [`Route`] says, checked against the tree. Helpers compute the path to navigate to
//! for a node or a region; components in the default region are addressed without a region
//! segment.

use pagecraft_api::NodeId;
use pagecraft_config::EntityRef;
use tracing::{debug, warn};

use crate::host::HostEnvironment;
use crate::layout::Layout;

mod publisher;
mod route;

pub use publisher::{Registration, SelectionPublisher};
pub use route::Route;

/// What the editor currently points at.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Selection {
    /// Focused region; `None` for the default region.
    pub region: Option<String>,
    pub component: Option<NodeId>,
}

#[derive(Debug)]
pub struct NavigationController {
    editor_path: String,
    default_region: String,
    entity: Option<EntityRef>,
    selection: Selection,
    publisher: SelectionPublisher,
}

impl NavigationController {
    pub fn new(env: &HostEnvironment, publisher: SelectionPublisher) -> Self {
        Self {
            editor_path: env.editor_path.clone(),
            default_region: env.default_region.clone(),
            entity: env.entity.clone(),
            selection: Selection::default(),
            publisher,
        }
    }

    pub fn publisher(&self) -> &SelectionPublisher {
        &self.publisher
    }

    pub fn entity(&self) -> Option<&EntityRef> {
        self.entity.as_ref()
    }

    pub fn selection(&self) -> &Selection {
        &self.selection
    }

    /// Region overlays should spotlight.
    pub fn focused_region(&self) -> &str {
        self.selection
            .region
            .as_deref()
            .unwrap_or(&self.default_region)
    }

    /// Takes the selection from `path`.
    ///
    /// Returns `false`, keeping the current selection, if `path` is not an editor route.
    pub fn navigate(&mut self, path: &str, layout: &Layout) -> bool {
        let Some(route) = Route::parse(&self.editor_path, path) else {
            warn!("not an editor path: {path}");
            return false;
        };

        debug!("navigating to {path}");
        self.entity = Some(route.entity);
        self.selection = Selection {
            region: route.region.filter(|r| *r != self.default_region),
            component: route.component,
        };
        self.sync(layout);
        true
    }

    /// Drops parts of the selection that no longer exist in the tree and publishes the result.
    pub fn sync(&mut self, layout: &Layout) {
        if let Some(uuid) = &self.selection.component {
            if !layout.contains(uuid) {
                debug!("selected component {uuid} is gone");
                self.selection.component = None;
            }
        }
        if let Some(region) = &self.selection.region {
            if layout.region(region).is_none() {
                debug!("focused region {region} is gone");
                self.selection.region = None;
            }
        }

        self.publisher.publish(&self.selection);
    }

    /// Switches to editing `entity` with nothing selected.
    pub fn open(&mut self, entity: EntityRef) {
        self.entity = Some(entity);
        self.reset();
    }

    /// Clears everything, for when the editor closes.
    pub fn reset(&mut self) {
        self.selection = Selection::default();
        self.publisher.publish(&self.selection);
    }

    /// Path of the entity being edited, with nothing selected.
    pub fn entity_path(&self) -> Option<String> {
        let entity = self.entity.clone()?;
        Some(Route::entity(entity).to_path(&self.editor_path))
    }

    /// Path selecting `uuid`, with the region segment if it lives outside the default region.
    pub fn path_for_node(&self, layout: &Layout, uuid: &NodeId) -> Option<String> {
        let region = layout.find_parent_region(uuid)?;
        let route = Route {
            entity: self.entity.clone()?,
            region: (region.id != self.default_region).then(|| region.id.clone()),
            component: Some(uuid.clone()),
        };
        Some(route.to_path(&self.editor_path))
    }

    /// Path focusing `region`.
    pub fn path_for_region(&self, region: &str) -> Option<String> {
        let route = Route {
            entity: self.entity.clone()?,
            region: (region != self.default_region).then(|| region.to_owned()),
            component: None,
        };
        Some(route.to_path(&self.editor_path))
    }

    /// Path to go to when a region is clicked.
    ///
    /// Clicking the focused region again leaves it for the default region.
    pub fn click_region(&self, region: &str) -> Option<String> {
        if self.selection.region.as_deref() == Some(region) {
            return self.entity_path();
        }
        self.path_for_region(region)
    }
}
