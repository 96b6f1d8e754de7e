use std::collections::HashMap;

use pagecraft_api::{ComponentTypeId, NodeId};
use tracing::trace;

use super::{ElementData, ElementId, COMPONENT_ATTR, COMPONENT_TYPE_ATTR, REGION_ATTR, SLOT_ATTR};
use crate::layout::parse_slot_id;

/// Lookup from layout nodes to the rendered elements, rebuilt wholesale after every render.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct DomMap {
    regions: HashMap<String, ElementId>,
    /// A component may render into several top-level elements.
    components: HashMap<NodeId, Vec<ElementId>>,
    component_types: HashMap<NodeId, ComponentTypeId>,
    slots: HashMap<(NodeId, String), ElementId>,
    /// Reverse lookup for hit testing.
    owners: HashMap<ElementId, NodeId>,
}

impl DomMap {
    pub fn scan(elements: &[ElementData]) -> Self {
        let _span = tracy_client::span!("DomMap::scan");

        let mut map = Self::default();
        for element in elements {
            if let Some(region) = element.attr(REGION_ATTR) {
                map.regions.insert(region.to_owned(), element.id);
            }

            if let Some(uuid) = element.attr(COMPONENT_ATTR) {
                let uuid = NodeId::from(uuid);
                map.components
                    .entry(uuid.clone())
                    .or_default()
                    .push(element.id);
                if let Some(component) = element.attr(COMPONENT_TYPE_ATTR) {
                    map.component_types
                        .insert(uuid.clone(), ComponentTypeId::from(component));
                }
                map.owners.insert(element.id, uuid);
            }

            if let Some((parent, slot)) = element.attr(SLOT_ATTR).and_then(parse_slot_id) {
                map.slots.insert((parent, slot.to_owned()), element.id);
            }
        }

        trace!(
            "mapped {} regions, {} components, {} slots",
            map.regions.len(),
            map.components.len(),
            map.slots.len()
        );
        map
    }

    pub fn region(&self, id: &str) -> Option<ElementId> {
        self.regions.get(id).copied()
    }

    /// Elements of a component; empty while the component has not been rendered yet.
    pub fn component(&self, uuid: &NodeId) -> &[ElementId] {
        self.components.get(uuid).map_or(&[][..], Vec::as_slice)
    }

    pub fn component_type(&self, uuid: &NodeId) -> Option<&ComponentTypeId> {
        self.component_types.get(uuid)
    }

    pub fn slot(&self, parent: &NodeId, slot: &str) -> Option<ElementId> {
        self.slots.get(&(parent.clone(), slot.to_owned())).copied()
    }

    /// Component an element belongs to.
    pub fn owner(&self, element: ElementId) -> Option<&NodeId> {
        self.owners.get(&element)
    }

    pub fn is_empty(&self) -> bool {
        self.regions.is_empty() && self.components.is_empty() && self.slots.is_empty()
    }
}
