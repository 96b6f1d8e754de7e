use indexmap::IndexMap;
use pagecraft_api::{ComponentData, ComponentTypeId, NodeId};
use serde_json::Value;

/// One placed component instance.
#[derive(Debug, Clone, PartialEq)]
pub struct ComponentNode {
    pub uuid: NodeId,
    pub component: ComponentTypeId,
    /// Slot name to children, in the order the slots were first filled.
    pub slots: IndexMap<String, Vec<ComponentNode>>,
    /// Settings blob; interpreted by the renderer only.
    pub props: Value,
}

impl ComponentNode {
    pub fn new(uuid: impl Into<NodeId>, component: impl Into<ComponentTypeId>) -> Self {
        Self {
            uuid: uuid.into(),
            component: component.into(),
            slots: IndexMap::new(),
            props: Value::Object(Default::default()),
        }
    }

    pub fn with_props(mut self, props: Value) -> Self {
        self.props = props;
        self
    }

    pub fn with_slot(mut self, slot: impl Into<String>, children: Vec<ComponentNode>) -> Self {
        self.slots.insert(slot.into(), children);
        self
    }

    /// This node and everything below it, depth-first in render order, with the depth relative
    /// to this node.
    pub fn descendants_with_depth(&self) -> impl Iterator<Item = (usize, &ComponentNode)> + '_ {
        let mut stack = vec![(0, self)];
        std::iter::from_fn(move || {
            let (depth, node) = stack.pop()?;
            // Push in reverse so children come out in order.
            for children in node.slots.values().rev() {
                for child in children.iter().rev() {
                    stack.push((depth + 1, child));
                }
            }
            Some((depth, node))
        })
    }

    /// Uuids of this node and all its descendants.
    pub fn uuids(&self) -> impl Iterator<Item = &NodeId> + '_ {
        self.descendants_with_depth().map(|(_, node)| &node.uuid)
    }

    /// Whether `uuid` is this node or one of its descendants.
    pub fn contains(&self, uuid: &NodeId) -> bool {
        self.uuids().any(|id| id == uuid)
    }

    /// Deep copy with a fresh uuid for every node, for inserting a section again.
    pub fn instantiate(&self) -> Self {
        Self {
            uuid: NodeId::generate(),
            component: self.component.clone(),
            slots: self
                .slots
                .iter()
                .map(|(name, children)| {
                    (
                        name.clone(),
                        children.iter().map(ComponentNode::instantiate).collect(),
                    )
                })
                .collect(),
            props: self.props.clone(),
        }
    }
}

impl From<ComponentData> for ComponentNode {
    fn from(value: ComponentData) -> Self {
        Self {
            uuid: value.uuid,
            component: value.component,
            slots: value
                .slots
                .into_iter()
                .map(|(name, children)| {
                    (name, children.into_iter().map(ComponentNode::from).collect())
                })
                .collect(),
            props: value.props,
        }
    }
}

impl From<&ComponentNode> for ComponentData {
    fn from(value: &ComponentNode) -> Self {
        Self {
            uuid: value.uuid.clone(),
            component: value.component.clone(),
            slots: value
                .slots
                .iter()
                .map(|(name, children)| (name.clone(), children.iter().map(Into::into).collect()))
                .collect(),
            props: value.props.clone(),
        }
    }
}
