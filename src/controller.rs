//! Interaction controller.
//!
//! The [`InteractionController`] owns the edited [`Graph`] and turns
//! normalized input events into graph operations: selecting, dragging,
//! linking and deleting. It also owns the transient pointer state and the
//! optional autosave hook.
//!
//! # Example
//!
//! ```ignore
//! use function_graph_editor::*;
//!
//! let mut ctrl = InteractionController::new(Graph::new(), Box::new(math_library()));
//! ctrl.add_function_node("Math", "Add", Point::new(40.0, 40.0))?;
//!
//! // Forward host events
//! ctrl.mouse_down(MouseButton::Primary, Point::new(45.0, 45.0));
//! ctrl.mouse_drag(Point::new(95.0, 60.0));
//! ctrl.mouse_up(MouseButton::Primary, Point::new(95.0, 60.0));
//!
//! // Paint
//! let scene = ctrl.scene();
//! ```

use crate::catalog::FunctionCatalog;
use crate::config::EditorConfig;
use crate::error::GraphError;
use crate::graph::Graph;
use crate::hit_test::Point;
use crate::link::Link;
use crate::node::Node;
use crate::persistence::GraphStore;
use crate::pin::PinAddress;
use crate::scene::Scene;
use crate::selection::Selection;
use crate::signal::Subscription;
use crate::validation::{LinkValidator, PinCompatibility, ValidationError, ValidationResult};
use std::cell::Cell;
use std::fmt;
use std::rc::Rc;
use tracing::{debug, error, warn};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MouseButton {
    Primary,
    Secondary,
    Middle,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Key {
    Delete,
    Other,
}

/// What an input event did.
#[derive(Debug, Clone, PartialEq)]
pub enum InputOutcome {
    Ignored,
    SelectionChanged,
    NodeMoved(i32),
    /// The pointer moved while dragging from a pin.
    PreviewMoved,
    LinkCreated(Link),
    LinkRejected(ValidationError),
    NodeRemoved(i32),
    /// The host should open the function menu at this point.
    ContextMenu(Point),
}

/// One entry of the add-node context menu.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MenuEntry {
    pub library: String,
    pub function: String,
}

impl MenuEntry {
    /// Menu path, `"Library/Function"`.
    pub fn label(&self) -> String {
        self.to_string()
    }
}

impl fmt::Display for MenuEntry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}", self.library, self.function)
    }
}

pub struct InteractionController {
    graph: Graph,
    catalog: Box<dyn FunctionCatalog>,
    validator: Box<dyn LinkValidator>,
    store: Option<Box<dyn GraphStore>>,
    config: EditorConfig,
    last_pointer: Point,
    pointer: Point,
    dirty: Rc<Cell<bool>>,
    graph_subscription: Option<Subscription>,
}

impl InteractionController {
    pub fn new(graph: Graph, catalog: Box<dyn FunctionCatalog>) -> Self {
        Self::with_config(graph, catalog, EditorConfig::default())
    }

    pub fn with_config(graph: Graph, catalog: Box<dyn FunctionCatalog>, config: EditorConfig) -> Self {
        let mut controller = Self {
            graph: Graph::new(),
            catalog,
            validator: Box::new(PinCompatibility),
            store: None,
            config,
            last_pointer: Point::default(),
            pointer: Point::default(),
            dirty: Rc::new(Cell::new(false)),
            graph_subscription: None,
        };
        controller.set_graph(graph);
        controller
    }

    /// Replace the rule used when the user drops a link.
    pub fn set_validator(&mut self, validator: impl LinkValidator + 'static) {
        self.validator = Box::new(validator);
    }

    pub fn set_store(&mut self, store: impl GraphStore + 'static) {
        self.store = Some(Box::new(store));
    }

    pub fn store(&self) -> Option<&dyn GraphStore> {
        self.store.as_deref()
    }

    pub fn graph(&self) -> &Graph {
        &self.graph
    }

    pub fn graph_mut(&mut self) -> &mut Graph {
        &mut self.graph
    }

    pub fn config(&self) -> &EditorConfig {
        &self.config
    }

    pub fn catalog(&self) -> &dyn FunctionCatalog {
        self.catalog.as_ref()
    }

    /// Last pointer position seen by any mouse handler.
    pub fn pointer(&self) -> Point {
        self.pointer
    }

    /// Whether the graph changed since the last save.
    pub fn is_dirty(&self) -> bool {
        self.dirty.get()
    }

    /// Swap in another graph and return the previous one.
    ///
    /// The new graph adopts the configured layout metrics and starts with
    /// nothing selected and a clean dirty flag.
    pub fn set_graph(&mut self, mut graph: Graph) -> Graph {
        if let Some(subscription) = self.graph_subscription.take() {
            self.graph.unsubscribe(subscription);
        }

        if *graph.metrics() != self.config.metrics {
            graph.set_metrics(self.config.metrics);
        }
        graph.deselect();

        let dirty = self.dirty.clone();
        self.graph_subscription = Some(graph.subscribe(move || dirty.set(true)));
        self.dirty.set(false);

        debug!(nodes = graph.node_count(), links = graph.link_count(), "graph attached");
        std::mem::replace(&mut self.graph, graph)
    }

    /// Replace the graph with the store's contents.
    ///
    /// Returns `Ok(false)` when there is no store or it holds nothing yet.
    pub fn load_from_store(&mut self) -> Result<bool, GraphError> {
        let Some(store) = &self.store else {
            return Ok(false);
        };
        match store.load(self.config.metrics)? {
            Some(graph) => {
                self.set_graph(graph);
                Ok(true)
            }
            None => Ok(false),
        }
    }

    /// Save now if the graph changed since the last save.
    pub fn save_if_dirty(&mut self) -> Result<bool, GraphError> {
        if !self.dirty.get() {
            return Ok(false);
        }
        let Some(store) = self.store.as_mut() else {
            return Ok(false);
        };
        store.save(&self.graph)?;
        self.dirty.set(false);
        Ok(true)
    }

    fn autosave(&mut self) {
        if !self.config.autosave {
            return;
        }
        if let Err(err) = self.save_if_dirty() {
            error!(%err, "autosave failed");
        }
    }

    // ========================================================================
    // Input
    // ========================================================================

    pub fn mouse_down(&mut self, button: MouseButton, point: Point) -> InputOutcome {
        self.pointer = point;
        self.last_pointer = point;

        match button {
            MouseButton::Primary => {
                let before = self.graph.selection();
                if let Some(address) = self.graph.pin_at(point) {
                    self.graph.select_pin(address);
                } else if let Some(node_id) = self.graph.node_at(point) {
                    self.graph.deselect();
                    self.graph.select_node(node_id);
                } else {
                    self.graph.deselect();
                }
                selection_outcome(before, self.graph.selection())
            }
            MouseButton::Secondary => InputOutcome::ContextMenu(point),
            MouseButton::Middle => InputOutcome::Ignored,
        }
    }

    pub fn mouse_up(&mut self, button: MouseButton, point: Point) -> InputOutcome {
        self.pointer = point;

        let outcome = match button {
            MouseButton::Primary => self.release_primary(point),
            MouseButton::Secondary => InputOutcome::ContextMenu(point),
            MouseButton::Middle => InputOutcome::Ignored,
        };

        self.autosave();
        outcome
    }

    fn release_primary(&mut self, point: Point) -> InputOutcome {
        let before = self.graph.selection();

        if let Selection::Pin(selected) = before {
            let outcome = match self.graph.pin_at(point) {
                Some(target) if target.node_id != selected.node_id => self.try_link(selected, target),
                _ => InputOutcome::SelectionChanged,
            };
            self.graph.deselect();
            return outcome;
        }

        if self.graph.node_at(point).is_none() {
            self.graph.deselect();
        }
        selection_outcome(before, self.graph.selection())
    }

    /// Link `from` (the pin the drag started on) into `to` (the release target).
    fn try_link(&mut self, from: PinAddress, to: PinAddress) -> InputOutcome {
        match self.connect(from, to) {
            Ok(link) => InputOutcome::LinkCreated(link),
            Err(GraphError::InvalidLink(reason)) => {
                warn!(%from, %to, %reason, "link rejected");
                InputOutcome::LinkRejected(reason)
            }
            Err(err) => {
                error!(%from, %to, %err, "link failed");
                InputOutcome::Ignored
            }
        }
    }

    /// Link two pins through the active validator.
    ///
    /// Unlike [`Graph::link_pins`] this refuses links the validator rejects,
    /// including links to pins that do not resolve.
    pub fn connect(&mut self, from: PinAddress, to: PinAddress) -> Result<Link, GraphError> {
        let (Some(from_pin), Some(to_pin)) = (self.graph.pin(from), self.graph.pin(to)) else {
            let missing = if self.graph.pin(from).is_none() { from } else { to };
            return Err(GraphError::InvalidLink(ValidationError::PinNotFound(missing)));
        };

        match self.validator.validate(from_pin, to_pin, self.graph.links()) {
            ValidationResult::Valid => {
                self.graph.link_pins(from, to);
                Ok(Link::new(from, to))
            }
            ValidationResult::Invalid(reason) => Err(GraphError::InvalidLink(reason)),
        }
    }

    /// Pointer moved with a button held.
    pub fn mouse_drag(&mut self, point: Point) -> InputOutcome {
        let delta = point - self.last_pointer;
        self.last_pointer = point;
        self.pointer = point;

        match self.graph.selection() {
            Selection::Node(node_id) => match self.graph.node_mut(node_id) {
                Some(node) => {
                    node.translate(delta);
                    InputOutcome::NodeMoved(node_id)
                }
                None => InputOutcome::Ignored,
            },
            Selection::Pin(_) => InputOutcome::PreviewMoved,
            Selection::Unselected => InputOutcome::Ignored,
        }
    }

    /// Pointer moved with no button held. Only updates the preview end point.
    pub fn mouse_move(&mut self, point: Point) -> InputOutcome {
        self.pointer = point;
        if self.graph.is_pin_selected() {
            InputOutcome::PreviewMoved
        } else {
            InputOutcome::Ignored
        }
    }

    pub fn key_press(&mut self, key: Key) -> InputOutcome {
        let outcome = match (key, self.graph.selection()) {
            (Key::Delete, Selection::Node(node_id)) => {
                let removed = self.graph.remove_node(node_id);
                self.graph.deselect();
                if removed {
                    InputOutcome::NodeRemoved(node_id)
                } else {
                    error!(node_id, "selected node no longer in graph");
                    InputOutcome::Ignored
                }
            }
            _ => InputOutcome::Ignored,
        };

        self.autosave();
        outcome
    }

    // ========================================================================
    // Context menu
    // ========================================================================

    /// Every catalog function, ordered by library then declaration order.
    pub fn context_menu_entries(&self) -> Vec<MenuEntry> {
        self.catalog
            .libraries()
            .into_iter()
            .flat_map(|library| {
                self.catalog
                    .functions(&library)
                    .into_iter()
                    .map(move |function| MenuEntry { library: library.clone(), function })
            })
            .collect()
    }

    /// Create a node for `library.function` at `position`.
    pub fn add_function_node(&mut self, library: &str, function: &str, position: Point) -> Result<i32, GraphError> {
        let mut node = Node::from_function_signature(
            &mut self.graph,
            self.catalog.as_ref(),
            library,
            function,
            false,
            false,
        )?;
        node.set_position(position);
        let node_id = self.graph.add_node(node);

        self.autosave();
        Ok(node_id)
    }

    // ========================================================================
    // Rendering
    // ========================================================================

    pub fn scene(&self) -> Scene {
        Scene::build(&self.graph, self.pointer)
    }
}

impl Drop for InteractionController {
    fn drop(&mut self) {
        if let Some(subscription) = self.graph_subscription.take() {
            self.graph.unsubscribe(subscription);
        }
    }
}

impl fmt::Debug for InteractionController {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("InteractionController")
            .field("graph", &self.graph)
            .field("pointer", &self.pointer)
            .field("dirty", &self.dirty.get())
            .field("has_store", &self.store.is_some())
            .finish()
    }
}

fn selection_outcome(before: Selection, after: Selection) -> InputOutcome {
    if before == after {
        InputOutcome::Ignored
    } else {
        InputOutcome::SelectionChanged
    }
}
