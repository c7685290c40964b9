//! Common test utilities for integration tests.

#![allow(dead_code)]

pub mod harness;

use function_graph_editor::{Graph, GraphError, GraphStore, InputOutcome, LayoutMetrics, MemoryStore, Subscription};
use std::cell::{Cell, RefCell};
use std::rc::Rc;

/// Records what the editor reported back during a session.
#[derive(Default, Clone)]
pub struct ChangeTracker {
    /// Number of graph change notifications
    pub graph_changed: Rc<Cell<usize>>,
    /// Outcome of every input event, in order
    pub outcomes: Rc<RefCell<Vec<InputOutcome>>>,
}

impl ChangeTracker {
    pub fn new() -> Self {
        Self::default()
    }

    /// Count change notifications of `graph`.
    pub fn watch(&self, graph: &Graph) -> Subscription {
        let counter = self.graph_changed.clone();
        graph.subscribe(move || counter.set(counter.get() + 1))
    }

    pub fn record(&self, outcome: &InputOutcome) {
        self.outcomes.borrow_mut().push(outcome.clone());
    }

    pub fn changes(&self) -> usize {
        self.graph_changed.get()
    }

    pub fn last_outcome(&self) -> Option<InputOutcome> {
        self.outcomes.borrow().last().cloned()
    }

    /// Clear all recorded data.
    pub fn clear(&self) {
        self.graph_changed.set(0);
        self.outcomes.borrow_mut().clear();
    }
}

/// [`MemoryStore`] the test keeps a handle to after giving it to the controller.
#[derive(Default, Clone)]
pub struct SharedStore(pub Rc<RefCell<MemoryStore>>);

impl SharedStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn save_count(&self) -> usize {
        self.0.borrow().save_count()
    }

    pub fn contents(&self) -> Option<String> {
        self.0.borrow().contents().map(str::to_string)
    }
}

impl GraphStore for SharedStore {
    fn load(&self, metrics: LayoutMetrics) -> Result<Option<Graph>, GraphError> {
        self.0.borrow().load(metrics)
    }

    fn save(&mut self, graph: &Graph) -> Result<(), GraphError> {
        self.0.borrow_mut().save(graph)
    }
}
