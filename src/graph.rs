//! The graph: owner of nodes and links.
//!
//! [`Graph`] hands out node ids, keeps links consistent with the node list,
//! tracks the current [`Selection`] and broadcasts a payload-free change
//! signal after every structural mutation.

use crate::catalog::FunctionCatalog;
use crate::error::GraphError;
use crate::hit_test::{find_node_at, find_pin_at, Point, Rect, SimpleNodeGeometry, SimplePinGeometry};
use crate::layout::LayoutMetrics;
use crate::link::Link;
use crate::node::Node;
use crate::persistence::{GraphDocument, NodeRecord, PinRecord, DOCUMENT_VERSION};
use crate::pin::{Pin, PinAddress, UNSET_ID};
use crate::selection::Selection;
use crate::signal::{ChangeSignal, Subscription};
use crate::state::LookupCache;
use std::collections::HashMap;
use tracing::{debug, error, warn};

/// A function graph.
///
/// Node order is insertion order; it is both the draw order and the
/// hit-testing order. Links are kept in insertion order and may repeat.
#[derive(Debug)]
pub struct Graph {
    nodes: Vec<Node>,
    links: Vec<Link>,
    last_node_id: i32,
    selection: Selection,
    cache: LookupCache,
    changed: ChangeSignal,
    node_subscriptions: HashMap<i32, Subscription>,
    metrics: LayoutMetrics,
    viewport_offset: Point,
}

impl Default for Graph {
    fn default() -> Self {
        Self::new()
    }
}

impl Graph {
    pub fn new() -> Self {
        Self::with_metrics(LayoutMetrics::default())
    }

    pub fn with_metrics(metrics: LayoutMetrics) -> Self {
        Self {
            nodes: Vec::new(),
            links: Vec::new(),
            last_node_id: UNSET_ID,
            selection: Selection::Unselected,
            cache: LookupCache::new(),
            changed: ChangeSignal::new(),
            node_subscriptions: HashMap::new(),
            metrics,
            viewport_offset: Point::default(),
        }
    }

    // ========================================================================
    // Identity
    // ========================================================================

    /// Issue the next node id. Ids start at 0 and are never reused.
    pub fn generate_node_id(&mut self) -> i32 {
        self.last_node_id += 1;
        self.last_node_id
    }

    /// The id the next call to [`Graph::generate_node_id`] will return.
    pub fn next_node_id(&self) -> i32 {
        self.last_node_id + 1
    }

    // ========================================================================
    // Structure
    // ========================================================================

    /// Take ownership of `node` and return its id.
    ///
    /// A node built without this graph (unset id) or whose id is already in
    /// use gets a fresh id first.
    pub fn add_node(&mut self, mut node: Node) -> i32 {
        if node.id() == UNSET_ID || self.cache.node_slot(&self.nodes, node.id()).is_some() {
            let id = self.generate_node_id();
            warn!(old_id = node.id(), new_id = id, node = node.name(), "assigning fresh node id");
            node.reassign_id(id);
        } else if node.id() > self.last_node_id {
            self.last_node_id = node.id();
        }

        let id = node.id();
        let relay = self.changed.downgrade();
        let subscription = node.changed().subscribe(move || {
            if let Some(signal) = relay.upgrade() {
                signal.emit();
            }
        });
        self.node_subscriptions.insert(id, subscription);

        self.cache.insert_node(id, self.nodes.len());
        debug!(node_id = id, name = node.name(), pins = node.pin_count(), "node added");
        self.nodes.push(node);

        self.changed.emit();
        id
    }

    /// Remove a node and every link touching it.
    ///
    /// Returns `false` if no node has `node_id`.
    pub fn remove_node(&mut self, node_id: i32) -> bool {
        let Some(slot) = self.cache.node_slot(&self.nodes, node_id) else {
            debug!(node_id, "remove_node: not in graph");
            return false;
        };
        let node = self.nodes.remove(slot);

        let before = self.links.len();
        for index in (0..self.links.len()).rev() {
            if self.links[index].touches_node(node_id) {
                self.links.remove(index);
            }
        }

        if let Some(subscription) = self.node_subscriptions.remove(&node_id) {
            node.changed().unsubscribe(subscription);
        }

        if self.selection.involves_node(node_id) {
            self.selection = Selection::Unselected;
        }

        debug!(node_id, links_removed = before - self.links.len(), "node removed");
        self.changed.emit();
        true
    }

    /// Append a link without validating it.
    ///
    /// Interactive callers check compatibility first; programmatic callers may
    /// build any graph they like, including duplicate links.
    pub fn link_pins(&mut self, from: PinAddress, to: PinAddress) {
        let link = Link::new(from, to);
        debug!(%link, "link added");
        self.links.push(link);
        self.changed.emit();
    }

    /// Build a node from a catalog function and add it.
    pub fn create_function_node(
        &mut self,
        catalog: &dyn FunctionCatalog,
        library: &str,
        function: &str,
        has_flow_output: bool,
        has_flow_input: bool,
    ) -> Result<i32, GraphError> {
        let node = Node::from_function_signature(
            self,
            catalog,
            library,
            function,
            has_flow_output,
            has_flow_input,
        )?;
        Ok(self.add_node(node))
    }

    /// Drop every node and link. The id counter keeps counting.
    pub fn clear(&mut self) {
        for node in self.nodes.drain(..) {
            if let Some(subscription) = self.node_subscriptions.remove(&node.id()) {
                node.changed().unsubscribe(subscription);
            }
        }
        self.links.clear();
        self.cache.clear();
        self.selection = Selection::Unselected;
        self.changed.emit();
    }

    // ========================================================================
    // Lookup
    // ========================================================================

    pub fn nodes(&self) -> &[Node] {
        &self.nodes
    }

    pub fn links(&self) -> &[Link] {
        &self.links
    }

    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    pub fn link_count(&self) -> usize {
        self.links.len()
    }

    pub fn contains_node(&self, node_id: i32) -> bool {
        self.cache.node_slot(&self.nodes, node_id).is_some()
    }

    /// Node with `node_id`. Logs and returns `None` if there is none.
    pub fn node(&self, node_id: i32) -> Option<&Node> {
        match self.cache.node_slot(&self.nodes, node_id) {
            Some(slot) => Some(&self.nodes[slot]),
            None => {
                error!(node_id, "no node with this id in graph");
                None
            }
        }
    }

    pub fn node_mut(&mut self, node_id: i32) -> Option<&mut Node> {
        match self.cache.node_slot(&self.nodes, node_id) {
            Some(slot) => Some(&mut self.nodes[slot]),
            None => {
                error!(node_id, "no node with this id in graph");
                None
            }
        }
    }

    /// Like [`Graph::node`] but as a `Result`.
    pub fn try_node(&self, node_id: i32) -> Result<&Node, GraphError> {
        self.cache
            .node_slot(&self.nodes, node_id)
            .map(|slot| &self.nodes[slot])
            .ok_or(GraphError::NodeNotFound(node_id))
    }

    /// Pin at `address`. Logs and returns `None` for unknown nodes and
    /// out-of-range pins.
    pub fn pin(&self, address: PinAddress) -> Option<&Pin> {
        match self.cache.pin_slot(&self.nodes, address) {
            Some(slot) => usize::try_from(address.pin_id)
                .ok()
                .and_then(|index| self.nodes[slot].pins().get(index)),
            None => {
                if !self.contains_node(address.node_id) {
                    error!(%address, "pin lookup on unknown node");
                }
                None
            }
        }
    }

    /// Links with an endpoint on `node_id`.
    pub fn links_of(&self, node_id: i32) -> impl Iterator<Item = &Link> + '_ {
        self.links.iter().filter(move |link| link.touches_node(node_id))
    }

    /// Lookup tables, exposed for diagnostics.
    pub fn lookup_cache(&self) -> &LookupCache {
        &self.cache
    }

    // ========================================================================
    // Selection
    // ========================================================================

    pub fn selection(&self) -> Selection {
        self.selection
    }

    pub fn selected_element(&self) -> PinAddress {
        self.selection.element()
    }

    pub fn select_node(&mut self, node_id: i32) {
        self.selection = Selection::Node(node_id);
    }

    pub fn select_pin(&mut self, address: PinAddress) {
        self.selection = Selection::Pin(address);
    }

    pub fn deselect(&mut self) {
        self.selection = Selection::Unselected;
    }

    pub fn is_node_selected(&self) -> bool {
        self.selection.is_node_selected()
    }

    pub fn is_pin_selected(&self) -> bool {
        self.selection.is_pin_selected()
    }

    /// The selected node, if a whole node is selected.
    pub fn selected_node(&self) -> Option<&Node> {
        match self.selection {
            Selection::Node(node_id) => self.node(node_id),
            _ => None,
        }
    }

    pub fn selected_pin(&self) -> Option<&Pin> {
        self.selection.pin().and_then(|address| self.pin(address))
    }

    // ========================================================================
    // Notification
    // ========================================================================

    pub fn changed(&self) -> &ChangeSignal {
        &self.changed
    }

    pub fn subscribe(&self, listener: impl Fn() + 'static) -> Subscription {
        self.changed.subscribe(listener)
    }

    pub fn unsubscribe(&self, subscription: Subscription) -> bool {
        self.changed.unsubscribe(subscription)
    }

    // ========================================================================
    // Geometry
    // ========================================================================

    pub fn metrics(&self) -> &LayoutMetrics {
        &self.metrics
    }

    pub fn set_metrics(&mut self, metrics: LayoutMetrics) {
        self.metrics = metrics;
        self.changed.emit();
    }

    pub fn viewport_offset(&self) -> Point {
        self.viewport_offset
    }

    pub fn set_viewport_offset(&mut self, offset: Point) {
        self.viewport_offset = offset;
        self.changed.emit();
    }

    pub fn node_rect(&self, node_id: i32) -> Option<Rect> {
        self.node(node_id).map(|node| node.rect(&self.metrics))
    }

    pub fn pin_rect(&self, address: PinAddress) -> Option<Rect> {
        self.pin(address)?;
        let node = self.node(address.node_id)?;
        node.pin_rect(address.pin_id, &self.metrics)
    }

    /// Pin center, where links attach.
    pub fn pin_anchor(&self, address: PinAddress) -> Option<Point> {
        self.pin_rect(address).map(|rect| rect.center())
    }

    /// Hit-test geometry for every pin, in node-then-pin order.
    pub fn pin_geometries(&self) -> Vec<SimplePinGeometry> {
        self.nodes
            .iter()
            .flat_map(|node| {
                let layout = node.compute_layout(&self.metrics);
                (0..node.pin_count()).filter_map(move |index| {
                    crate::layout::compute_pin_rect(&layout, node.pins(), index).map(|rect| {
                        SimplePinGeometry {
                            address: node.pin_address(index as i32),
                            rect,
                        }
                    })
                })
            })
            .collect()
    }

    /// Hit-test geometry for every node body, in node order.
    pub fn node_geometries(&self) -> Vec<SimpleNodeGeometry> {
        self.nodes
            .iter()
            .map(|node| SimpleNodeGeometry { id: node.id(), rect: node.rect(&self.metrics) })
            .collect()
    }

    /// First pin whose button contains `point`.
    pub fn pin_at(&self, point: Point) -> Option<PinAddress> {
        find_pin_at(point, self.pin_geometries())
    }

    /// First node whose body contains `point`.
    pub fn node_at(&self, point: Point) -> Option<i32> {
        find_node_at(point, self.node_geometries())
    }

    // ========================================================================
    // Documents
    // ========================================================================

    pub fn to_document(&self) -> GraphDocument {
        GraphDocument {
            version: DOCUMENT_VERSION,
            nodes: self
                .nodes
                .iter()
                .map(|node| NodeRecord {
                    id: node.id(),
                    name: node.name().to_string(),
                    position: node.position(),
                    pins: node.pins().iter().map(PinRecord::from).collect(),
                })
                .collect(),
            links: self.links.clone(),
            next_node_id: self.next_node_id(),
            viewport_offset: self.viewport_offset,
        }
    }

    /// Rebuild a graph from a document.
    ///
    /// Ids, pins and the id counter are restored as saved. The counter never
    /// goes below 0 or below the highest stored id plus one. Links whose
    /// endpoints do not resolve are dropped with a warning.
    pub fn from_document(document: &GraphDocument, metrics: LayoutMetrics) -> Result<Self, GraphError> {
        if !document.is_compatible() {
            return Err(GraphError::IncompatibleDocument {
                found: document.version,
                expected: DOCUMENT_VERSION,
            });
        }

        let mut graph = Graph::with_metrics(metrics);
        if document.next_node_id < 0 {
            warn!(next_node_id = document.next_node_id, "negative id counter in document, restarting at 0");
        }
        // Records with higher ids raise the counter again in add_node
        graph.last_node_id = document.next_node_id.max(0) - 1;
        graph.viewport_offset = document.viewport_offset;

        for record in &document.nodes {
            let mut node = Node::with_id(record.id, record.name.clone());
            for pin in &record.pins {
                node.add_pin(pin.direction, pin.type_name.as_deref(), &pin.name);
            }
            node.set_position(record.position);
            graph.add_node(node);
        }

        for link in &document.links {
            if graph.pin(link.from()).is_some() && graph.pin(link.to()).is_some() {
                graph.links.push(*link);
            } else {
                warn!(%link, "dropping link with a dangling endpoint");
            }
        }

        debug!(nodes = graph.node_count(), links = graph.link_count(), "graph loaded from document");
        Ok(graph)
    }
}
