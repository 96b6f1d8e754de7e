//! Snapshot helpers for golden testing.
//!
//! The outline is a plain-text rendering of the tree, one node per line, indented by depth. It
//! makes before/after comparisons of structural mutations readable in test failures.

use super::{ComponentNode, Layout};

/// Placeholder line for a region with nothing in it.
pub const EMPTY_REGION: &str = "(empty)";

/// Renders the tree as an indented outline.
///
/// ```text
/// content
///   c1 card
///     body
///       t1 text
///     footer
/// sidebar
///   (empty)
/// ```
pub fn outline(layout: &Layout) -> String {
    let mut lines = Vec::new();
    for region in layout.regions() {
        lines.push(region.id.clone());
        if region.is_empty() {
            lines.push(format!("  {EMPTY_REGION}"));
        }
        for node in &region.components {
            outline_node(node, 1, &mut lines);
        }
    }
    lines.join("\n")
}

fn outline_node(node: &ComponentNode, depth: usize, lines: &mut Vec<String>) {
    let indent = "  ".repeat(depth);
    lines.push(format!("{indent}{} {}", node.uuid, node.component));
    for (slot, children) in &node.slots {
        lines.push(format!("{indent}  {slot}"));
        for child in children {
            outline_node(child, depth + 2, lines);
        }
    }
}

/// Top-level order of one region.
#[derive(Debug, Clone, PartialEq)]
pub struct RegionOrderSnapshot {
    pub region: String,
    pub components: Vec<String>,
}

pub fn region_order(layout: &Layout) -> Vec<RegionOrderSnapshot> {
    layout
        .regions()
        .iter()
        .map(|region| RegionOrderSnapshot {
            region: region.id.clone(),
            components: region
                .components
                .iter()
                .map(|node| node.uuid.to_string())
                .collect(),
        })
        .collect()
}
