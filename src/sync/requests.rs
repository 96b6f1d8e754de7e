//! Requests the editor wants performed, and the queue they wait in.

use std::collections::{HashMap, VecDeque};

use pagecraft_api::{Endpoint, Method, NewContentEntity, NodeId, SaveRequest, Section};
use pagecraft_config::EntityRef;
use serde_json::Value;

use super::sequence::{RequestId, RequestIds};

/// Something the editor needs from the CMS.
#[derive(Debug, Clone, PartialEq)]
pub enum Request {
    LoadLayout(EntityRef),
    LoadCatalog,
    /// Persist the layout; the response carries fresh preview markup.
    Save(SaveRequest),
    /// Render the layout without persisting it.
    Preview(SaveRequest),
    ListSections,
    SaveSection(Section),
    ListContent { entity_type: String },
    CreateContent {
        entity_type: String,
        entity: NewContentEntity,
    },
    DeleteContent(EntityRef),
    PageDataForm(EntityRef),
    ComponentForm { entity: EntityRef, uuid: NodeId },
}

/// What kind of request a response answers, without the payload.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RequestKind {
    LoadLayout,
    LoadCatalog,
    Save,
    Preview,
    ListSections,
    SaveSection,
    ListContent,
    CreateContent,
    DeleteContent,
    PageDataForm,
    ComponentForm,
}

impl Request {
    pub fn kind(&self) -> RequestKind {
        match self {
            Request::LoadLayout(_) => RequestKind::LoadLayout,
            Request::LoadCatalog => RequestKind::LoadCatalog,
            Request::Save(_) => RequestKind::Save,
            Request::Preview(_) => RequestKind::Preview,
            Request::ListSections => RequestKind::ListSections,
            Request::SaveSection(_) => RequestKind::SaveSection,
            Request::ListContent { .. } => RequestKind::ListContent,
            Request::CreateContent { .. } => RequestKind::CreateContent,
            Request::DeleteContent(_) => RequestKind::DeleteContent,
            Request::PageDataForm(_) => RequestKind::PageDataForm,
            Request::ComponentForm { .. } => RequestKind::ComponentForm,
        }
    }

    pub fn method(&self) -> Method {
        match self {
            Request::Save(_)
            | Request::Preview(_)
            | Request::SaveSection(_)
            | Request::CreateContent { .. } => Method::Post,
            Request::DeleteContent(_) => Method::Delete,
            _ => Method::Get,
        }
    }

    pub fn endpoint(&self) -> Endpoint {
        match self {
            Request::LoadLayout(entity) => Endpoint::Layout {
                entity_type: entity.entity_type.clone(),
                entity_id: entity.entity_id.clone(),
            },
            Request::Save(save) => Endpoint::Layout {
                entity_type: save.entity_type.clone(),
                entity_id: save.entity_id.clone(),
            },
            Request::Preview(save) => Endpoint::Preview {
                entity_type: save.entity_type.clone(),
                entity_id: save.entity_id.clone(),
            },
            Request::LoadCatalog => Endpoint::ComponentCatalog,
            Request::ListSections | Request::SaveSection(_) => Endpoint::Sections,
            Request::ListContent { entity_type } | Request::CreateContent { entity_type, .. } => {
                Endpoint::ContentEntities {
                    entity_type: entity_type.clone(),
                }
            }
            Request::DeleteContent(entity) => Endpoint::ContentEntity {
                entity_type: entity.entity_type.clone(),
                entity_id: entity.entity_id.clone(),
            },
            Request::PageDataForm(entity) => Endpoint::PageDataForm {
                entity_type: entity.entity_type.clone(),
                entity_id: entity.entity_id.clone(),
            },
            Request::ComponentForm { entity, uuid } => Endpoint::ComponentForm {
                entity_type: entity.entity_type.clone(),
                entity_id: entity.entity_id.clone(),
                component: uuid.to_string(),
            },
        }
    }

    /// JSON body, for requests that have one.
    pub fn body(&self) -> serde_json::Result<Option<Value>> {
        match self {
            Request::Save(save) | Request::Preview(save) => serde_json::to_value(save).map(Some),
            Request::SaveSection(section) => serde_json::to_value(section).map(Some),
            Request::CreateContent { entity, .. } => serde_json::to_value(entity).map(Some),
            _ => Ok(None),
        }
    }
}

/// A request handed to the host for execution.
///
/// The host reports the outcome back with the same id.
#[derive(Debug, Clone, PartialEq)]
pub struct OutgoingRequest {
    pub id: RequestId,
    pub request: Request,
}

/// Requests waiting to be picked up by the host, and the ones it is still working on.
#[derive(Debug, Default)]
pub struct Outbox {
    ids: RequestIds,
    queued: VecDeque<OutgoingRequest>,
    in_flight: HashMap<RequestId, RequestKind>,
}

impl Outbox {
    pub fn push(&mut self, request: Request) -> RequestId {
        let id = self.ids.next();
        self.in_flight.insert(id, request.kind());
        self.queued.push_back(OutgoingRequest { id, request });
        id
    }

    /// Hands out everything queued so far, oldest first.
    pub fn drain(&mut self) -> Vec<OutgoingRequest> {
        self.queued.drain(..).collect()
    }

    /// Marks a request as answered, returning what it was.
    ///
    /// Returns `None` for ids that were never issued or were already answered.
    pub fn complete(&mut self, id: RequestId) -> Option<RequestKind> {
        self.in_flight.remove(&id)
    }

    /// Stops waiting for every request handed out so far; their responses will be ignored.
    ///
    /// Queued requests stay queued.
    pub fn forget_in_flight(&mut self) {
        let queued: HashMap<_, _> = self.queued.iter().map(|r| (r.id, r.request.kind())).collect();
        self.in_flight = queued;
    }

    pub fn in_flight(&self) -> usize {
        self.in_flight.len()
    }

    pub fn is_empty(&self) -> bool {
        self.queued.is_empty()
    }
}
