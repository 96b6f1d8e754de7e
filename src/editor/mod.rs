//! One editing session: the layout of the entity being edited and everything around it.
//!
//! [`Editor`] is sans-IO. Input comes in through method calls (pointer events, navigation,
//! edits) and through [`Editor::handle_response`]; output goes out as [`OutgoingRequest`]s from
//! [`Editor::poll_requests`] and as writes to the preview surface. The host drives time: it
//! calls `poll_requests` whenever [`Editor::next_deadline`] passes.
//!
//! ```text
//! editor/
//! ├── mod.rs       - session lifecycle, edits, drag and selection
//! ├── responses.rs - applying what the host reports back
//! └── tests.rs
//! ```

use std::collections::HashMap;
use std::time::Duration;

use pagecraft_api::{
    ComponentTypeId, ContentEntity, FormResponse, NewContentEntity, NodeId, SaveRequest, Section,
};
use pagecraft_config::{EntityRef, FeatureFlags};
use serde_json::Value;
use tracing::{debug, info, warn};

use crate::assets::{AssetHost, AssetRegistry};
use crate::catalog::Catalog;
use crate::dnd::{self, DragOutcome, DragSession, DragSource, DropIntent, Point};
use crate::host::HostEnvironment;
use crate::layout::{ComponentNode, Destination, LayoutError, LayoutStore};
use crate::navigation::{NavigationController, SelectionPublisher};
use crate::preview::overlay::{self, HoverLabel, RegionSpotlight, SelectionOutline};
use crate::preview::{ElementData, PreviewRenderer, PreviewSurface};
use crate::sync::{
    Conflicts, Debouncer, OutgoingRequest, Outbox, Request, RequestError, RequestKind,
    RequestSequencer,
};
use crate::utils::Clock;

mod responses;


/// Which initial fetches of the current session have completed.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct FirstLoad {
    pub layout: bool,
    pub catalog: bool,
}

impl FirstLoad {
    pub fn is_done(&self) -> bool {
        self.layout && self.catalog
    }
}

/// What the open form edits.
#[derive(Debug, Clone, PartialEq)]
pub enum FormTarget {
    PageData,
    Component(NodeId),
}

/// A server-rendered form currently shown in the sidebar.
///
/// The markup is kept unparsed. The host classifies it with
/// [`Fragment::parse`](crate::preview::Fragment::parse).
#[derive(Debug, Clone, PartialEq)]
pub struct OpenForm {
    pub target: FormTarget,
    pub response: FormResponse,
}

pub struct Editor<S, H> {
    env: HostEnvironment,
    store: LayoutStore,
    navigation: NavigationController,
    drag: DragSession,
    preview: PreviewRenderer<S>,
    asset_host: H,
    assets: AssetRegistry,
    outbox: Outbox,
    save: Debouncer<()>,
    refresh: Debouncer<()>,
    /// Guards against a slow layout fetch for a previous entity overwriting the current one.
    layout_requests: RequestSequencer,
    form_requests: RequestSequencer,
    pending_form: Option<FormTarget>,
    /// Editor path to follow once the layout it points into has loaded.
    pending_route: Option<String>,
    conflicts: Conflicts,
    errors: HashMap<RequestKind, RequestError>,
    entity: Option<EntityRef>,
    first_load: FirstLoad,
    catalog_loaded: bool,
    sections: Vec<Section>,
    content: Vec<ContentEntity>,
    form: Option<OpenForm>,
}

impl<S: PreviewSurface, H: AssetHost> Editor<S, H> {
    pub fn new(env: HostEnvironment, surface: S, asset_host: H, clock: Clock) -> Self {
        let store = LayoutStore::new(env.default_region.clone(), env.history_limit);
        let navigation = NavigationController::new(&env, SelectionPublisher::default());

        Self {
            save: Debouncer::new(env.persistence_debounce, clock.clone()),
            refresh: Debouncer::new(env.preview_debounce, clock),
            store,
            navigation,
            drag: DragSession::default(),
            preview: PreviewRenderer::new(surface),
            asset_host,
            assets: AssetRegistry::default(),
            outbox: Outbox::default(),
            layout_requests: RequestSequencer::default(),
            form_requests: RequestSequencer::default(),
            pending_form: None,
            pending_route: None,
            conflicts: Conflicts::default(),
            errors: HashMap::new(),
            entity: None,
            first_load: FirstLoad::default(),
            catalog_loaded: false,
            sections: Vec::new(),
            content: Vec::new(),
            form: None,
            env,
        }
    }

    // =========================================================================
    // Lifecycle
    // =========================================================================

    /// Starts editing `entity`, closing whatever was open.
    pub fn open(&mut self, entity: EntityRef) {
        if self.entity.is_some() {
            self.close();
        }

        info!(
            "opening {} {} for editing",
            entity.entity_type, entity.entity_id
        );
        self.entity = Some(entity.clone());
        self.errors.clear();
        self.navigation.open(entity.clone());
        self.first_load = FirstLoad {
            layout: false,
            catalog: self.catalog_loaded,
        };

        let id = self.outbox.push(Request::LoadLayout(entity));
        self.layout_requests.issue(id);
        if !self.catalog_loaded {
            self.outbox.push(Request::LoadCatalog);
        }
        if self.env.has_feature(FeatureFlags::SECTIONS) {
            self.outbox.push(Request::ListSections);
        }
    }

    /// Opens the entity named by the host environment, if any.
    pub fn open_initial(&mut self) -> bool {
        match self.env.entity.clone() {
            Some(entity) => {
                self.open(entity);
                true
            }
            None => false,
        }
    }

    /// Stops editing.
    ///
    /// A pending save is sent right away. Responses to anything still in flight are ignored
    /// from here on.
    pub fn close(&mut self) {
        let Some(entity) = self.entity.take() else {
            return;
        };
        info!("closing {} {}", entity.entity_type, entity.entity_id);

        if self.save.flush().is_some() {
            let save = self.save_request(&entity);
            self.outbox.push(Request::Save(save));
        }
        self.refresh.cancel();
        self.outbox.forget_in_flight();
        self.layout_requests.reset();
        self.form_requests.reset();
        self.pending_form = None;
        self.pending_route = None;

        self.first_load = FirstLoad::default();
        self.drag.cancel();
        self.preview.clear();
        self.navigation.reset();
        self.form = None;
        self.errors.clear();

        let catalog = self.store.catalog().clone();
        self.store = LayoutStore::new(self.env.default_region.clone(), self.env.history_limit);
        self.store.set_catalog(catalog);
    }

    pub fn is_open(&self) -> bool {
        self.entity.is_some()
    }

    pub fn entity(&self) -> Option<&EntityRef> {
        self.entity.as_ref()
    }

    pub fn first_load(&self) -> FirstLoad {
        self.first_load
    }

    // =========================================================================
    // Requests
    // =========================================================================

    /// Fires debounced work that is due and hands out everything queued.
    pub fn poll_requests(&mut self) -> Vec<OutgoingRequest> {
        if let Some(entity) = self.entity.clone() {
            if self.save.poll().is_some() {
                let save = self.save_request(&entity);
                let id = self.outbox.push(Request::Save(save));
                self.preview.expect(id);
            }
            if self.refresh.poll().is_some() {
                let preview = self.save_request(&entity);
                let id = self.outbox.push(Request::Preview(preview));
                self.preview.expect(id);
            }
        }

        self.outbox.drain()
    }

    /// When [`Editor::poll_requests`] next has debounced work to do.
    pub fn next_deadline(&self) -> Option<Duration> {
        match (self.save.deadline(), self.refresh.deadline()) {
            (Some(a), Some(b)) => Some(a.min(b)),
            (a, b) => a.or(b),
        }
    }

    fn save_request(&self, entity: &EntityRef) -> SaveRequest {
        SaveRequest {
            entity_id: entity.entity_id.clone(),
            entity_type: entity.entity_type.clone(),
            layout: self.store.layout().to_payload(),
            model: self.store.layout().model().clone(),
        }
    }

    /// Error of the last request of `kind`, if it failed, for inline retry.
    pub fn error(&self, kind: RequestKind) -> Option<&RequestError> {
        self.errors.get(&kind)
    }

    /// Repeats a failed request.
    pub fn retry(&mut self, kind: RequestKind) {
        let Some(entity) = self.entity.clone() else {
            return;
        };
        if self.errors.remove(&kind).is_none() {
            return;
        }

        debug!("retrying {kind:?}");
        match kind {
            RequestKind::LoadLayout => {
                let id = self.outbox.push(Request::LoadLayout(entity));
                self.layout_requests.issue(id);
            }
            RequestKind::LoadCatalog => {
                self.outbox.push(Request::LoadCatalog);
            }
            RequestKind::Save => self.save.call(()),
            RequestKind::Preview => self.refresh.call(()),
            RequestKind::ListSections => {
                self.outbox.push(Request::ListSections);
            }
            RequestKind::ListContent => self.list_content(),
            _ => debug!("{kind:?} is not retried automatically"),
        }
    }

    pub fn conflicts(&self) -> &Conflicts {
        &self.conflicts
    }

    pub fn dismiss_conflicts(&mut self) {
        self.conflicts.dismiss();
    }

    // =========================================================================
    // Edits
    // =========================================================================

    pub fn store(&self) -> &LayoutStore {
        &self.store
    }

    pub fn move_node(&mut self, uuid: &NodeId, dest: &Destination) -> Result<bool, LayoutError> {
        let changed = self.store.move_node(uuid, dest)?;
        self.after_edit(changed);
        Ok(changed)
    }

    pub fn insert_node(
        &mut self,
        node: ComponentNode,
        dest: &Destination,
    ) -> Result<(), LayoutError> {
        self.store.insert_node(node, dest)?;
        self.after_edit(true);
        Ok(())
    }

    /// Places a fresh instance of a library component.
    pub fn insert_component(
        &mut self,
        component: &ComponentTypeId,
        dest: &Destination,
    ) -> Result<NodeId, LayoutError> {
        let node = self.store.catalog().instantiate(component).ok_or_else(|| {
            LayoutError::InvalidDestination(format!("unknown component type {component}"))
        })?;
        let uuid = node.uuid.clone();
        self.insert_node(node, dest)?;
        Ok(uuid)
    }

    pub fn remove_node(&mut self, uuid: &NodeId) -> Result<bool, LayoutError> {
        let changed = self.store.remove_node(uuid)?;
        self.after_edit(changed);
        Ok(changed)
    }

    pub fn update_node_settings(
        &mut self,
        uuid: &NodeId,
        patch: &Value,
    ) -> Result<bool, LayoutError> {
        let changed = self.store.update_node_settings(uuid, patch)?;
        self.after_edit(changed);
        Ok(changed)
    }

    pub fn update_page_data(&mut self, patch: &Value) -> bool {
        let changed = self.store.update_page_data(patch);
        self.after_edit(changed);
        changed
    }

    pub fn undo(&mut self) -> Result<(), LayoutError> {
        self.store.undo()?;
        self.after_edit(true);
        Ok(())
    }

    pub fn redo(&mut self) -> Result<(), LayoutError> {
        self.store.redo()?;
        self.after_edit(true);
        Ok(())
    }

    /// Schedules persistence and a preview refresh after a successful edit.
    fn after_edit(&mut self, changed: bool) {
        if !changed {
            return;
        }

        self.save.call(());
        self.refresh.call(());
        self.navigation.sync(self.store.layout());
    }

    // =========================================================================
    // Sections and content
    // =========================================================================

    pub fn sections(&self) -> &[Section] {
        &self.sections
    }

    /// Saves the subtree of `uuid` as a reusable section.
    pub fn save_section(&mut self, uuid: &NodeId, name: &str) -> Result<(), LayoutError> {
        if !self.env.has_feature(FeatureFlags::SECTIONS) {
            warn!("sections are disabled");
            return Ok(());
        }

        let section = self
            .store
            .extract_section(uuid, name)
            .ok_or_else(|| LayoutError::NodeNotFound(uuid.clone()))?;
        self.outbox.push(Request::SaveSection(section));
        Ok(())
    }

    pub fn insert_section(
        &mut self,
        section: &Section,
        dest: &Destination,
    ) -> Result<Vec<NodeId>, LayoutError> {
        let uuids = self.store.insert_section(section, dest)?;
        self.after_edit(!uuids.is_empty());
        Ok(uuids)
    }

    pub fn content(&self) -> &[ContentEntity] {
        &self.content
    }

    pub fn list_content(&mut self) {
        if !self.env.has_feature(FeatureFlags::CONTENT_LIST) {
            return;
        }
        if let Some(entity) = &self.entity {
            let entity_type = entity.entity_type.clone();
            self.outbox.push(Request::ListContent { entity_type });
        }
    }

    pub fn create_content(&mut self, title: &str) {
        if !self.env.has_feature(FeatureFlags::CONTENT_LIST) {
            warn!("the content list is disabled");
            return;
        }
        if let Some(entity) = &self.entity {
            let request = Request::CreateContent {
                entity_type: entity.entity_type.clone(),
                entity: NewContentEntity {
                    title: title.to_owned(),
                },
            };
            self.outbox.push(request);
        }
    }

    pub fn delete_content(&mut self, entity_id: &str) {
        if !self.env.has_feature(FeatureFlags::CONTENT_LIST) {
            warn!("the content list is disabled");
            return;
        }
        if let Some(entity) = &self.entity {
            let target = EntityRef {
                entity_type: entity.entity_type.clone(),
                entity_id: entity_id.to_owned(),
            };
            self.outbox.push(Request::DeleteContent(target));
        }
    }

    // =========================================================================
    // Forms
    // =========================================================================

    pub fn form(&self) -> Option<&OpenForm> {
        self.form.as_ref()
    }

    pub fn open_page_data_form(&mut self) {
        if let Some(entity) = self.entity.clone() {
            self.request_form(FormTarget::PageData, Request::PageDataForm(entity));
        }
    }

    pub fn open_component_form(&mut self, uuid: &NodeId) -> Result<(), LayoutError> {
        if !self.store.layout().contains(uuid) {
            return Err(LayoutError::NodeNotFound(uuid.clone()));
        }
        if let Some(entity) = self.entity.clone() {
            let request = Request::ComponentForm {
                entity,
                uuid: uuid.clone(),
            };
            self.request_form(FormTarget::Component(uuid.clone()), request);
        }
        Ok(())
    }

    fn request_form(&mut self, target: FormTarget, request: Request) {
        let id = self.outbox.push(request);
        self.form_requests.issue(id);
        self.pending_form = Some(target);
    }

    pub fn asset_host(&self) -> &H {
        &self.asset_host
    }

    // =========================================================================
    // Selection and drag
    // =========================================================================

    pub fn navigation(&self) -> &NavigationController {
        &self.navigation
    }

    /// Follows an editor path. Returns `false` if it is not one.
    pub fn navigate(&mut self, path: &str) -> bool {
        let Some(route) = crate::navigation::Route::parse(&self.env.editor_path, path) else {
            return self.navigation.navigate(path, self.store.layout());
        };

        if self.entity.as_ref() != Some(&route.entity) {
            self.open(route.entity);
        }
        if !self.first_load.layout {
            self.pending_route = Some(path.to_owned());
        }
        self.navigation.navigate(path, self.store.layout())
    }

    pub fn preview(&self) -> &PreviewRenderer<S> {
        &self.preview
    }

    /// Pointer pressed on a preview element.
    pub fn pointer_down(&mut self, element: &ElementData, pos: Point) -> bool {
        match dnd::drag_source(self.preview.map(), element) {
            Some(source) => self.drag.begin(source, pos),
            None => false,
        }
    }

    /// Pointer pressed on a library entry.
    pub fn pointer_down_library(&mut self, component: ComponentTypeId, pos: Point) -> bool {
        self.drag.begin(DragSource::Library(component), pos)
    }

    pub fn pointer_down_section(&mut self, section: Section, pos: Point) -> bool {
        self.drag.begin(DragSource::Section(section), pos)
    }

    pub fn pointer_motion(&mut self, pos: Point) -> bool {
        self.drag.motion(pos)
    }

    /// Pointer over a drop container at `index` among its children.
    pub fn pointer_over(&mut self, container_id: &str, index: usize) {
        self.drag.hover(container_id, index);
    }

    pub fn pointer_leave(&mut self) {
        self.drag.leave();
    }

    /// Pointer released. Returns the path to navigate to, selecting the clicked or dropped
    /// component.
    pub fn pointer_up(&mut self) -> Result<Option<String>, LayoutError> {
        let uuid = match self.drag.end() {
            None | Some(DragOutcome::Cancelled) => return Ok(None),
            Some(DragOutcome::Click(DragSource::Node(uuid))) => uuid,
            Some(DragOutcome::Click(_)) => return Ok(None),
            Some(DragOutcome::Drop(intent)) => match self.place(intent)? {
                Some(uuid) => uuid,
                None => return Ok(None),
            },
        };

        Ok(self.navigation.path_for_node(self.store.layout(), &uuid))
    }

    fn place(&mut self, intent: DropIntent) -> Result<Option<NodeId>, LayoutError> {
        let placed = dnd::apply_drop(&mut self.store, intent)?;
        self.after_edit(placed.is_some());
        Ok(placed)
    }

    pub fn cancel_drag(&mut self) {
        self.drag.cancel();
    }

    // =========================================================================
    // Overlays
    // =========================================================================

    pub fn hover_label(&self, uuid: &NodeId) -> Option<HoverLabel> {
        overlay::hover_label(
            self.preview.map(),
            self.preview.surface(),
            self.store.catalog(),
            uuid,
        )
    }

    pub fn selection_outline(&self) -> Option<SelectionOutline> {
        let uuid = self.navigation.selection().component.as_ref()?;
        overlay::selection_outline(self.preview.map(), self.preview.surface(), uuid)
    }

    pub fn region_spotlight(&self) -> Option<RegionSpotlight> {
        overlay::region_spotlight(
            self.preview.map(),
            self.preview.surface(),
            self.navigation.focused_region(),
        )
    }

    fn set_catalog(&mut self, catalog: Catalog) {
        self.store.set_catalog(catalog);
        self.catalog_loaded = true;
        self.first_load.catalog = true;
    }
}
