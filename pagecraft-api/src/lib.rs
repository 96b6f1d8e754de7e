//! Types for communicating with the CMS layout endpoints.
//!
//! This crate is shared between the editing core and whatever performs the actual HTTP requests
//! on its behalf. All types serialize to the JSON shapes the CMS emits and accepts.
//!
//! Identifiers are newtypes over strings: the CMS mints component uuids server-side for existing
//! content, and the client mints fresh ones with [`NodeId::generate`] for newly placed
//! components.

use std::fmt;

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

mod endpoint;

pub use endpoint::{Endpoint, Method};

/// Unique id of one placed component instance.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct NodeId(pub String);

impl NodeId {
    /// Mints a fresh random id for a component placed on the client.
    pub fn generate() -> Self {
        Self(uuid::Uuid::new_v4().to_string())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for NodeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for NodeId {
    fn from(value: &str) -> Self {
        Self(value.to_owned())
    }
}

/// Id of a component type in the component catalog.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ComponentTypeId(pub String);

impl ComponentTypeId {
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ComponentTypeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for ComponentTypeId {
    fn from(value: &str) -> Self {
        Self(value.to_owned())
    }
}

/// One top-level region of the page, as stored by the CMS.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RegionData {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub components: Vec<ComponentData>,
}

/// One placed component instance with its slot children.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ComponentData {
    pub uuid: NodeId,
    pub component: ComponentTypeId,
    #[serde(default, skip_serializing_if = "IndexMap::is_empty")]
    pub slots: IndexMap<String, Vec<ComponentData>>,
    #[serde(default)]
    pub props: Value,
}

/// Response of `GET /api/layout/{type}/{id}`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LayoutResponse {
    pub layout: Vec<RegionData>,
    /// Page-data fields of the content entity.
    #[serde(default)]
    pub model: Value,
    /// Rendered preview, if the server included one.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub html: Option<String>,
}

/// Body of `POST /api/layout/{type}/{id}`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SaveRequest {
    pub entity_id: String,
    pub entity_type: String,
    pub layout: Vec<RegionData>,
    pub model: Value,
}

/// Response of a layout save or a preview request.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PreviewResponse {
    pub html: String,
}

/// Definition of one slot on a component type.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SlotDefinition {
    pub id: String,
    #[serde(default)]
    pub name: String,
}

/// Catalog metadata for one component type.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ComponentMeta {
    pub name: String,
    #[serde(default)]
    pub slots: Vec<SlotDefinition>,
    /// JSON schema of the component props.
    #[serde(default)]
    pub props: Value,
    /// Props a freshly placed instance starts with.
    #[serde(default)]
    pub default_props: Value,
}

/// Response of `GET /api/config/component`.
pub type ComponentCatalog = IndexMap<ComponentTypeId, ComponentMeta>;

/// A reusable layout fragment.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Section {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    pub name: String,
    pub layout: Vec<ComponentData>,
}

/// A content entity as listed by the content endpoints.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ContentEntity {
    pub id: String,
    pub title: String,
}

/// Body for creating a content entity.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewContentEntity {
    pub title: String,
}

/// Assets a server-rendered form needs attached to the host document.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Attachments {
    #[serde(default)]
    pub css: Vec<String>,
    #[serde(default)]
    pub js: Vec<String>,
    #[serde(default)]
    pub settings: Value,
}

/// Response of the page-data and component-instance form endpoints.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FormResponse {
    pub html: String,
    #[serde(default)]
    pub attachments: Attachments,
}

/// Body of a `409 Conflict` response.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ConflictReport {
    #[serde(default)]
    pub errors: Vec<ConflictEntry>,
    /// Top-level members other than `errors`, such as a summary message.
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// One reported divergence between the client's state and what the server holds.
///
/// Members this type does not name are kept in `extra`, so the entry re-serializes to what the
/// server sent.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ConflictEntry {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub code: Option<String>,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub detail: String,
    #[serde(default, skip_serializing_if = "Value::is_null")]
    pub source: Value,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}
