//! Level 5: Keyboard Tests
//!
//! Tests node deletion via the Delete key and its cascade onto links.

mod common;

use common::harness::EditorHarness;
use common::SharedStore;
use function_graph_editor::{GraphDocument, InputOutcome, Key, PinAddress, Selection};

#[test]
fn test_delete_removes_selected_node() {
    let mut harness = EditorHarness::new();
    harness.click(harness.grab_point(0));

    let outcome = harness.key_tap(Key::Delete);

    assert_eq!(outcome, InputOutcome::NodeRemoved(0));
    assert_eq!(harness.graph().node_count(), 1);
    assert!(!harness.graph().contains_node(0));
    assert_eq!(harness.selection(), Selection::Unselected);
}

#[test]
fn test_delete_cascades_to_links() {
    let mut harness = EditorHarness::new();
    let cos = harness.add_node("Cos", 100.0, 300.0);
    harness.connect(PinAddress::new(0, 0), PinAddress::new(1, 1));
    harness.connect(PinAddress::new(cos, 0), PinAddress::new(1, 2));
    harness.connect(PinAddress::new(1, 0), PinAddress::new(0, 1));
    assert_eq!(harness.graph().link_count(), 3);

    harness.click(harness.grab_point(0));
    harness.key_tap(Key::Delete);

    // Only Cos -> Add survives
    let links = harness.graph().links();
    assert_eq!(links.len(), 1);
    assert_eq!(links[0].from(), PinAddress::new(cos, 0));
    assert!(harness.graph().links().iter().all(|link| !link.touches_node(0)));
}

#[test]
fn test_delete_fires_one_change() {
    let mut harness = EditorHarness::new();
    harness.connect(PinAddress::new(0, 0), PinAddress::new(1, 2));
    harness.click(harness.grab_point(1));
    harness.tracker.clear();

    harness.key_tap(Key::Delete);
    assert_eq!(harness.tracker.changes(), 1);
}

#[test]
fn test_delete_without_selection_is_ignored() {
    let mut harness = EditorHarness::new();

    assert_eq!(harness.key_tap(Key::Delete), InputOutcome::Ignored);
    assert_eq!(harness.graph().node_count(), 2);
    assert_eq!(harness.tracker.changes(), 0);
}

#[test]
fn test_delete_with_pin_selected_is_ignored() {
    let mut harness = EditorHarness::new();
    harness.mouse_down(harness.pin_center(1, 0));

    assert_eq!(harness.key_tap(Key::Delete), InputOutcome::Ignored);
    assert_eq!(harness.graph().node_count(), 2);
    assert!(harness.graph().is_pin_selected());
}

#[test]
fn test_other_keys_are_ignored() {
    let mut harness = EditorHarness::new();
    harness.click(harness.grab_point(1));

    assert_eq!(harness.key_tap(Key::Other), InputOutcome::Ignored);
    assert_eq!(harness.selection(), Selection::Node(1));
}

#[test]
fn test_second_delete_does_nothing() {
    let mut harness = EditorHarness::new();
    harness.click(harness.grab_point(1));

    harness.key_tap(Key::Delete);
    assert_eq!(harness.key_tap(Key::Delete), InputOutcome::Ignored);
    assert_eq!(harness.graph().node_count(), 1);
}

#[test]
fn test_ids_not_reused_after_delete() {
    let mut harness = EditorHarness::new();
    harness.click(harness.grab_point(1));
    harness.key_tap(Key::Delete);

    let id = harness.add_node("Multiply", 400.0, 200.0);
    assert_eq!(id, 2);
    assert!(harness.graph().node(1).is_none());
}

#[test]
fn test_deleted_node_leaves_scene() {
    let mut harness = EditorHarness::new();
    harness.connect(PinAddress::new(0, 0), PinAddress::new(1, 1));
    harness.click(harness.grab_point(1));
    harness.key_tap(Key::Delete);

    let scene = harness.ctrl.scene();
    assert_eq!(scene.nodes.len(), 1);
    assert_eq!(scene.nodes[0].id, 0);
    assert!(scene.links.is_empty());
}

#[test]
fn test_delete_is_autosaved() {
    let mut harness = EditorHarness::new();
    let store = SharedStore::new();
    harness.ctrl.set_store(store.clone());
    // Flush the setup
    assert!(harness.ctrl.save_if_dirty().unwrap());

    // Selecting changes nothing worth saving
    harness.click(harness.grab_point(0));
    assert_eq!(store.save_count(), 1);

    harness.key_tap(Key::Delete);
    assert_eq!(store.save_count(), 2);
    assert!(!harness.ctrl.is_dirty());

    let document = GraphDocument::from_json(&store.contents().unwrap()).unwrap();
    assert_eq!(document.nodes.len(), 1);
    assert_eq!(document.nodes[0].name, "Add");
    assert_eq!(document.next_node_id, 2);
}
