//! Affordances drawn over the preview.
//!
//! Overlays are computed from the [`DomMap`] and the surface geometry only. A component that has
//! no element yet (its render is still in flight) simply gets no overlay.

use pagecraft_api::NodeId;

use super::{DomMap, PreviewSurface, Rect};
use crate::catalog::Catalog;

/// Name tag shown while hovering a component.
#[derive(Debug, Clone, PartialEq)]
pub struct HoverLabel {
    pub uuid: NodeId,
    pub name: String,
    pub rect: Rect,
}

/// Outline around the selected component.
#[derive(Debug, Clone, PartialEq)]
pub struct SelectionOutline {
    pub uuid: NodeId,
    pub rect: Rect,
}

/// Highlight of the focused region, dimming everything else.
#[derive(Debug, Clone, PartialEq)]
pub struct RegionSpotlight {
    pub region: String,
    pub rect: Rect,
}

/// Union of the bounds of every element a component rendered into.
pub fn component_bounds(map: &DomMap, surface: &dyn PreviewSurface, uuid: &NodeId) -> Option<Rect> {
    map.component(uuid)
        .iter()
        .filter_map(|&element| surface.bounds(element))
        .reduce(Rect::merge)
}

pub fn hover_label(
    map: &DomMap,
    surface: &dyn PreviewSurface,
    catalog: &Catalog,
    uuid: &NodeId,
) -> Option<HoverLabel> {
    let rect = component_bounds(map, surface, uuid)?;
    let name = match map.component_type(uuid) {
        Some(component) => catalog.name(component).to_owned(),
        None => uuid.to_string(),
    };

    Some(HoverLabel {
        uuid: uuid.clone(),
        name,
        rect,
    })
}

pub fn selection_outline(
    map: &DomMap,
    surface: &dyn PreviewSurface,
    uuid: &NodeId,
) -> Option<SelectionOutline> {
    Some(SelectionOutline {
        uuid: uuid.clone(),
        rect: component_bounds(map, surface, uuid)?,
    })
}

pub fn region_spotlight(
    map: &DomMap,
    surface: &dyn PreviewSurface,
    region: &str,
) -> Option<RegionSpotlight> {
    let rect = surface.bounds(map.region(region)?)?;
    Some(RegionSpotlight {
        region: region.to_owned(),
        rect,
    })
}
