//! Nodes: a titled box that owns an ordered list of pins.

use crate::catalog::FunctionCatalog;
use crate::error::GraphError;
use crate::graph::Graph;
use crate::hit_test::{Point, Rect};
use crate::layout::{
    compute_node_layout, compute_pin_label_rect, compute_pin_rect, LayoutMetrics, NodeLayout,
};
use crate::pin::{Pin, PinAddress, PinDirection, PinTypeInfo, UNSET_ID};
use crate::signal::ChangeSignal;

/// Name given to the value pin of function-derived nodes.
pub const OUTPUT_PIN_NAME: &str = "Output";

/// A node in the graph.
///
/// The id is assigned once at creation. Layout is never stored; every
/// geometry query recomputes it from `position` and the pin labels.
#[derive(Debug)]
pub struct Node {
    id: i32,
    name: String,
    position: Point,
    pins: Vec<Pin>,
    changed: ChangeSignal,
}

impl Node {
    /// Create an empty node whose id is issued by `graph`.
    pub fn new(graph: &mut Graph, name: impl Into<String>) -> Self {
        Self::with_id(graph.generate_node_id(), name)
    }

    /// Create a node without an owning graph.
    ///
    /// The node cannot get a unique id, so it carries [`UNSET_ID`] until a
    /// graph adopts it in [`Graph::add_node`].
    pub fn detached(name: impl Into<String>) -> Self {
        let name = name.into();
        tracing::error!(
            node = %name,
            "node constructed without its owning graph, unable to generate a unique id"
        );
        Self::with_id(UNSET_ID, name)
    }

    pub(crate) fn with_id(id: i32, name: impl Into<String>) -> Self {
        Self {
            id,
            name: name.into(),
            position: Point::default(),
            pins: Vec::new(),
            changed: ChangeSignal::new(),
        }
    }

    /// Build a node for `library.function`.
    ///
    /// Pins are appended in a fixed order: flow output (if requested), flow
    /// input (if requested), the return value named "Output", then one input
    /// per parameter in declaration order.
    pub fn from_function_signature(
        graph: &mut Graph,
        catalog: &dyn FunctionCatalog,
        library: &str,
        function: &str,
        has_flow_output: bool,
        has_flow_input: bool,
    ) -> Result<Self, GraphError> {
        let Some(signature) = catalog.resolve(library, function) else {
            tracing::error!(library, function, "function not found in catalog");
            return Err(GraphError::FunctionNotFound {
                library: library.to_string(),
                function: function.to_string(),
            });
        };

        let mut node = Node::new(graph, display_name(&signature.name));
        if has_flow_output {
            node.add_pin(PinDirection::Output, None, "");
        }
        if has_flow_input {
            node.add_pin(PinDirection::Input, None, "");
        }
        node.add_pin(PinDirection::Output, Some(&signature.return_type), OUTPUT_PIN_NAME);
        for parameter in &signature.parameters {
            node.add_pin(PinDirection::Input, Some(&parameter.type_name), &parameter.name);
        }

        Ok(node)
    }

    pub fn id(&self) -> i32 { self.id }

    pub fn name(&self) -> &str { &self.name }

    pub fn set_name(&mut self, name: impl Into<String>) {
        self.name = name.into();
    }

    pub fn position(&self) -> Point { self.position }

    /// Move the node and notify listeners.
    pub fn set_position(&mut self, position: Point) {
        self.position = position;
        self.changed.emit();
    }

    pub fn translate(&mut self, delta: Point) {
        self.set_position(self.position + delta);
    }

    pub fn pins(&self) -> &[Pin] { &self.pins }

    pub fn pin_count(&self) -> usize { self.pins.len() }

    /// Pin with local id `local_id`.
    pub fn pin(&self, local_id: i32) -> Result<&Pin, GraphError> {
        usize::try_from(local_id)
            .ok()
            .and_then(|index| self.pins.get(index))
            .ok_or_else(|| {
                tracing::error!(
                    node_id = self.id,
                    pin_id = local_id,
                    pin_count = self.pins.len(),
                    "attempted to get pin of invalid index"
                );
                GraphError::PinOutOfRange {
                    node_id: self.id,
                    pin_id: local_id,
                    pin_count: self.pins.len(),
                }
            })
    }

    pub fn pin_address(&self, local_id: i32) -> PinAddress {
        PinAddress::new(self.id, local_id)
    }

    /// Append a pin and return its local id. `type_name` of `None` makes a flow pin.
    pub fn add_pin(&mut self, direction: PinDirection, type_name: Option<&str>, name: &str) -> i32 {
        let local_id = self.pins.len() as i32;
        tracing::debug!(node_id = self.id, pin_id = local_id, name, "adding pin");
        self.pins.push(Pin::new(
            self.id,
            local_id,
            name,
            type_name.map(PinTypeInfo::new),
            direction,
        ));
        local_id
    }

    pub fn clear_pins(&mut self) {
        self.pins.clear();
    }

    /// Signal fired when the node moves.
    pub fn changed(&self) -> &ChangeSignal {
        &self.changed
    }

    pub(crate) fn reassign_id(&mut self, id: i32) {
        self.id = id;
        for pin in &mut self.pins {
            pin.set_owner_id(id);
        }
    }

    // === Geometry ===

    pub fn compute_layout(&self, metrics: &LayoutMetrics) -> NodeLayout {
        compute_node_layout(self.position, &self.pins, metrics)
    }

    pub fn rect(&self, metrics: &LayoutMetrics) -> Rect {
        self.compute_layout(metrics).node_rect
    }

    pub fn pin_rect(&self, local_id: i32, metrics: &LayoutMetrics) -> Option<Rect> {
        let index = usize::try_from(local_id).ok()?;
        compute_pin_rect(&self.compute_layout(metrics), &self.pins, index)
    }

    pub fn pin_label_rect(&self, local_id: i32, metrics: &LayoutMetrics) -> Option<Rect> {
        let index = usize::try_from(local_id).ok()?;
        compute_pin_label_rect(&self.compute_layout(metrics), &self.pins, index, metrics)
    }
}

/// Turn a camel-case identifier into a spaced label.
///
/// A space goes before every uppercase letter that does not directly follow
/// another uppercase letter, so runs of capitals stay together:
/// `"DoSomethingCool"` becomes `"Do Something Cool"`, `"XMLParser"` is unchanged.
pub fn display_name(identifier: &str) -> String {
    let mut result = String::with_capacity(identifier.len() + 4);
    let mut chars = identifier.chars();
    let Some(first) = chars.next() else {
        return result;
    };

    result.push(first);
    let mut was_capital = first.is_ascii_uppercase();
    for c in chars {
        let is_capital = c.is_ascii_uppercase();
        if is_capital && !was_capital {
            result.push(' ');
        }
        result.push(c);
        was_capital = is_capital;
    }
    result
}
