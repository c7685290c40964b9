//! Test harness for a complete editing session.
//!
//! Wraps an [`InteractionController`] over the built-in math catalog with
//! change tracking and helpers that simulate what a user does with the
//! mouse and keyboard.

#![allow(dead_code)]

use super::ChangeTracker;
use function_graph_editor::{
    math_library, EditorConfig, FunctionCatalog, Graph, InputOutcome, InteractionController, Key, MouseButton, PinAddress, Point,
    Rect, Selection, Subscription, MATH_LIBRARY,
};

/// Install a log subscriber once so failing tests show the editor's diagnostics.
fn init_logging() {
    let _ = tracing_subscriber::fmt().with_test_writer().try_init();
}

/// Editing session over the math catalog.
pub struct EditorHarness {
    pub ctrl: InteractionController,
    pub tracker: ChangeTracker,
    watch: Option<Subscription>,
}

impl EditorHarness {
    /// Session with "Sin" (id 0) at (100, 100) and "Add" (id 1) at (400, 200).
    pub fn new() -> Self {
        let mut harness = Self::empty();
        harness.add_node("Sin", 100.0, 100.0);
        harness.add_node("Add", 400.0, 200.0);
        harness.tracker.clear();
        harness
    }

    /// Session with an empty graph.
    pub fn empty() -> Self {
        Self::with_graph(Graph::new())
    }

    pub fn with_graph(graph: Graph) -> Self {
        Self::with_catalog(graph, math_library())
    }

    /// Empty session over the math catalog with a custom configuration.
    pub fn with_config(config: EditorConfig) -> Self {
        init_logging();
        let ctrl = InteractionController::with_config(Graph::new(), Box::new(math_library()), config);
        Self::wrap(ctrl)
    }

    /// Session over a host-provided catalog.
    pub fn with_catalog(graph: Graph, catalog: impl FunctionCatalog + 'static) -> Self {
        init_logging();
        Self::wrap(InteractionController::new(graph, Box::new(catalog)))
    }

    fn wrap(ctrl: InteractionController) -> Self {
        let tracker = ChangeTracker::new();
        let watch = Some(tracker.watch(ctrl.graph()));
        Self { ctrl, tracker, watch }
    }

    /// Swap the edited graph, moving change tracking along.
    pub fn replace_graph(&mut self, graph: Graph) -> Graph {
        if let Some(watch) = self.watch.take() {
            self.ctrl.graph().unsubscribe(watch);
        }
        let old = self.ctrl.set_graph(graph);
        self.watch = Some(self.tracker.watch(self.ctrl.graph()));
        old
    }

    pub fn graph(&self) -> &Graph {
        self.ctrl.graph()
    }

    pub fn selection(&self) -> Selection {
        self.graph().selection()
    }

    /// Add a math function node at (x, y).
    pub fn add_node(&mut self, function: &str, x: f32, y: f32) -> i32 {
        self.add_library_node(MATH_LIBRARY, function, x, y)
    }

    pub fn add_library_node(&mut self, library: &str, function: &str, x: f32, y: f32) -> i32 {
        self.ctrl
            .add_function_node(library, function, Point::new(x, y))
            .expect("catalog function exists")
    }

    // === Geometry queries ===

    pub fn node_position(&self, node_id: i32) -> Point {
        self.graph().node(node_id).expect("node exists").position()
    }

    pub fn node_rect(&self, node_id: i32) -> Rect {
        self.graph().node_rect(node_id).expect("node exists")
    }

    /// A point on the node's title strip, inside the body and clear of all pins.
    pub fn grab_point(&self, node_id: i32) -> Point {
        let rect = self.node_rect(node_id);
        Point::new(rect.x + rect.width / 2.0, rect.y + 8.0)
    }

    pub fn pin_center(&self, node_id: i32, pin_id: i32) -> Point {
        self.graph()
            .pin_anchor(PinAddress::new(node_id, pin_id))
            .expect("pin exists")
    }

    // === Input simulation ===

    fn record(&self, outcome: InputOutcome) -> InputOutcome {
        self.tracker.record(&outcome);
        outcome
    }

    /// Simulate a primary-button press.
    pub fn mouse_down(&mut self, point: Point) -> InputOutcome {
        self.mouse_down_button(point, MouseButton::Primary)
    }

    pub fn mouse_down_button(&mut self, point: Point, button: MouseButton) -> InputOutcome {
        let outcome = self.ctrl.mouse_down(button, point);
        self.record(outcome)
    }

    /// Simulate pointer movement with a button held.
    pub fn mouse_drag(&mut self, point: Point) -> InputOutcome {
        let outcome = self.ctrl.mouse_drag(point);
        self.record(outcome)
    }

    /// Simulate pointer movement with no button held.
    pub fn mouse_move(&mut self, point: Point) -> InputOutcome {
        let outcome = self.ctrl.mouse_move(point);
        self.record(outcome)
    }

    /// Simulate a primary-button release.
    pub fn mouse_up(&mut self, point: Point) -> InputOutcome {
        self.mouse_up_button(point, MouseButton::Primary)
    }

    pub fn mouse_up_button(&mut self, point: Point, button: MouseButton) -> InputOutcome {
        let outcome = self.ctrl.mouse_up(button, point);
        self.record(outcome)
    }

    /// Simulate a complete click (down + up) at the given position.
    pub fn click(&mut self, point: Point) -> InputOutcome {
        self.mouse_down(point);
        self.mouse_up(point)
    }

    /// Simulate a complete drag in `steps` equal moves. Returns the release outcome.
    pub fn drag(&mut self, start: Point, end: Point, steps: usize) -> InputOutcome {
        let steps = steps.max(1);
        self.mouse_down(start);
        for step in 1..=steps {
            let t = step as f32 / steps as f32;
            self.mouse_drag(Point::new(
                start.x + (end.x - start.x) * t,
                start.y + (end.y - start.y) * t,
            ));
        }
        self.mouse_up(end)
    }

    /// Drag from one pin and release on another.
    pub fn connect(&mut self, from: PinAddress, to: PinAddress) -> InputOutcome {
        let start = self.pin_center(from.node_id, from.pin_id);
        let end = self.pin_center(to.node_id, to.pin_id);
        self.drag(start, end, 4)
    }

    pub fn key_tap(&mut self, key: Key) -> InputOutcome {
        let outcome = self.ctrl.key_press(key);
        self.record(outcome)
    }
}

impl Default for EditorHarness {
    fn default() -> Self {
        Self::new()
    }
}
