//! Outline snapshots of the tree after structural edits.
//!
//! Each test starts from [`sample_store`] and checks the whole tree, not only the container that
//! was touched, so an edit that leaks into a sibling container shows up here.

use serde_json::json;

use super::{sample_store, store_with};
use crate::layout::snapshot::{outline, region_order};
use crate::layout::{ComponentNode, Destination, RegionNode};

#[test]
fn golden_sample() {
    insta::assert_snapshot!(outline(sample_store().layout()), @r"
    content
      c1 card
        body
          t1 text
          t2 text
        footer
      t3 text
    sidebar
      (empty)
    ");
}

#[test]
fn golden_move_into_slot() {
    let mut store = sample_store();
    store
        .move_node(&"t3".into(), &Destination::slot("c1", "footer", 0))
        .unwrap();

    insta::assert_snapshot!(outline(store.layout()), @r"
    content
      c1 card
        body
          t1 text
          t2 text
        footer
          t3 text
    sidebar
      (empty)
    ");
}

#[test]
fn golden_move_out_of_slot() {
    let mut store = sample_store();
    store
        .move_node(&"t2".into(), &Destination::region(0, 0))
        .unwrap();

    insta::assert_snapshot!(outline(store.layout()), @r"
    content
      t2 text
      c1 card
        body
          t1 text
        footer
      t3 text
    sidebar
      (empty)
    ");
}

#[test]
fn golden_move_subtree_to_other_region() {
    let mut store = sample_store();
    store
        .move_node(&"c1".into(), &Destination::region(1, 0))
        .unwrap();

    insta::assert_snapshot!(outline(store.layout()), @r"
    content
      t3 text
    sidebar
      c1 card
        body
          t1 text
          t2 text
        footer
    ");
}

#[test]
fn golden_reorder_within_slot() {
    let mut store = sample_store();
    store
        .move_node(&"t1".into(), &Destination::slot("c1", "body", 1))
        .unwrap();

    insta::assert_snapshot!(outline(store.layout()), @r"
    content
      c1 card
        body
          t2 text
          t1 text
        footer
      t3 text
    sidebar
      (empty)
    ");
}

#[test]
fn golden_insert_nested_columns() {
    let mut store = sample_store();
    let columns = ComponentNode::new("k1", "columns")
        .with_slot("left", vec![ComponentNode::new("t4", "text")])
        .with_props(json!({ "gap": 2 }));
    store
        .insert_node(columns, &Destination::slot("c1", "body", 1))
        .unwrap();

    insta::assert_snapshot!(outline(store.layout()), @r"
    content
      c1 card
        body
          t1 text
          k1 columns
            left
              t4 text
          t2 text
        footer
      t3 text
    sidebar
      (empty)
    ");
}

#[test]
fn golden_remove_then_undo() {
    let mut store = sample_store();
    store.remove_node(&"c1".into()).unwrap();

    insta::assert_snapshot!(outline(store.layout()), @r"
    content
      t3 text
    sidebar
      (empty)
    ");

    store.undo().unwrap();
    assert_eq!(outline(store.layout()), outline(sample_store().layout()));
}

#[test]
fn golden_region_order() {
    let mut a = RegionNode::new("content", "Content");
    a.components = vec![
        ComponentNode::new("a1", "text"),
        ComponentNode::new("b1", "text"),
        ComponentNode::new("c1", "text"),
    ];
    let mut store = store_with(vec![RegionNode::new("header", "Header"), a]);
    store
        .move_node(&"a1".into(), &Destination::region(1, 2))
        .unwrap();
    store
        .move_node(&"b1".into(), &Destination::region(0, 0))
        .unwrap();

    let order: Vec<_> = region_order(store.layout())
        .into_iter()
        .map(|r| (r.region, r.components))
        .collect();
    assert_eq!(
        order,
        [
            ("header".to_owned(), vec!["b1".to_owned()]),
            ("content".to_owned(), vec!["c1".to_owned(), "a1".to_owned()]),
        ]
    );
}
