//! Live preview of the page being edited.
//!
//! The preview is server-rendered markup written into an isolated surface provided by the host
//! (an iframe, in a browser). Rendered elements carry data attributes naming the region,
//! component or slot they belong to. After every write the surface is scanned and a [`DomMap`]
//! is rebuilt from those attributes; overlays and the drag adapter only ever look at the map.

use std::collections::BTreeMap;

use pagecraft_api::NodeId;

use crate::layout::{parse_slot_id, slot_id};

mod dom_map;
pub mod fragment;
pub mod overlay;
mod renderer;

pub use dom_map::DomMap;
pub use fragment::{Fragment, RawFragment};
pub use renderer::PreviewRenderer;

/// Marks the element rendering a region; the value is the region id.
pub const REGION_ATTR: &str = "data-layout-region";
/// Marks an element rendering (part of) a component; the value is the component uuid.
pub const COMPONENT_ATTR: &str = "data-layout-component";
/// Component type of a [`COMPONENT_ATTR`] element.
pub const COMPONENT_TYPE_ATTR: &str = "data-layout-component-type";
/// Marks the element holding a slot's children; the value is `{parent uuid}/{slot}`.
pub const SLOT_ATTR: &str = "data-layout-slot";

/// Opaque handle of an element on the preview surface.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ElementId(pub u64);

/// An element found while scanning the surface, with its data attributes.
#[derive(Debug, Clone, PartialEq)]
pub struct ElementData {
    pub id: ElementId,
    pub attributes: BTreeMap<String, String>,
}

impl ElementData {
    pub fn new(id: u64) -> Self {
        Self {
            id: ElementId(id),
            attributes: BTreeMap::new(),
        }
    }

    pub fn with_attr(mut self, name: &str, value: impl Into<String>) -> Self {
        self.attributes.insert(name.to_owned(), value.into());
        self
    }

    pub fn region(id: u64, region: &str) -> Self {
        Self::new(id).with_attr(REGION_ATTR, region)
    }

    pub fn component(id: u64, uuid: &NodeId, component: &str) -> Self {
        Self::new(id)
            .with_attr(COMPONENT_ATTR, uuid.as_str())
            .with_attr(COMPONENT_TYPE_ATTR, component)
    }

    pub fn slot(id: u64, parent: &NodeId, slot: &str) -> Self {
        Self::new(id).with_attr(SLOT_ATTR, slot_id(parent, slot))
    }

    pub fn attr(&self, name: &str) -> Option<&str> {
        self.attributes.get(name).map(String::as_str)
    }

    /// Container id if the element is a drop target.
    pub fn container_id(&self) -> Option<&str> {
        self.attr(REGION_ATTR).or_else(|| self.attr(SLOT_ATTR))
    }

    /// Whether the element is a slot marker, which can never be dragged.
    pub fn is_slot(&self) -> bool {
        self.attr(SLOT_ATTR).and_then(parse_slot_id).is_some()
    }
}

/// Axis-aligned rectangle in surface coordinates.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Rect {
    pub x: f64,
    pub y: f64,
    pub w: f64,
    pub h: f64,
}

impl Rect {
    pub fn new(x: f64, y: f64, w: f64, h: f64) -> Self {
        Self { x, y, w, h }
    }

    /// Smallest rectangle covering both.
    pub fn merge(self, other: Self) -> Self {
        let x = f64::min(self.x, other.x);
        let y = f64::min(self.y, other.y);
        let right = f64::max(self.x + self.w, other.x + other.w);
        let bottom = f64::max(self.y + self.h, other.y + other.h);
        Self::new(x, y, right - x, bottom - y)
    }
}

/// The isolated surface the preview renders into.
pub trait PreviewSurface {
    /// Replaces the surface contents with `html`.
    fn write_html(&mut self, html: &str) -> anyhow::Result<()>;
    /// Every element carrying one of the layout data attributes, in document order.
    fn scan(&self) -> Vec<ElementData>;
    /// Current bounds of an element, if it is still on the surface and laid out.
    fn bounds(&self, element: ElementId) -> Option<Rect>;
}
