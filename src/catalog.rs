//! Component catalog: what each component type is called and which slots it has.

use pagecraft_api::{ComponentCatalog, ComponentMeta, ComponentTypeId, NodeId};
use serde_json::Value;

use crate::layout::ComponentNode;

/// Fetched component metadata, keyed by component type.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Catalog {
    types: ComponentCatalog,
}

impl Catalog {
    pub fn new(types: ComponentCatalog) -> Self {
        Self { types }
    }

    pub fn get(&self, component: &ComponentTypeId) -> Option<&ComponentMeta> {
        self.types.get(component)
    }

    pub fn is_empty(&self) -> bool {
        self.types.is_empty()
    }

    /// Human-readable name, falling back to the type id for unknown types.
    pub fn name<'a>(&'a self, component: &'a ComponentTypeId) -> &'a str {
        self.get(component)
            .map_or(component.as_str(), |meta| meta.name.as_str())
    }

    /// Whether instances of `component` accept children in `slot`.
    pub fn has_slot(&self, component: &ComponentTypeId, slot: &str) -> bool {
        self.get(component)
            .is_some_and(|meta| meta.slots.iter().any(|def| def.id == slot))
    }

    pub fn slot_ids<'a>(
        &'a self,
        component: &ComponentTypeId,
    ) -> impl Iterator<Item = &'a str> + 'a {
        self.get(component)
            .into_iter()
            .flat_map(|meta| meta.slots.iter().map(|def| def.id.as_str()))
    }

    /// A fresh instance of `component`: new uuid, an empty list for every slot, default props.
    pub fn instantiate(&self, component: &ComponentTypeId) -> Option<ComponentNode> {
        let meta = self.get(component)?;
        let props = match &meta.default_props {
            Value::Null => Value::Object(Default::default()),
            props => props.clone(),
        };

        let mut node = ComponentNode::new(NodeId::generate(), component.clone()).with_props(props);
        for def in &meta.slots {
            node.slots.insert(def.id.clone(), Vec::new());
        }
        Some(node)
    }
}
