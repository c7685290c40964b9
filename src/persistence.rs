//! Graph documents and the load/save boundary.
//!
//! The editor never touches the filesystem. A host supplies a [`GraphStore`]
//! and the editor calls it around batches of mutations; the document format
//! is plain serde JSON.

use crate::error::GraphError;
use crate::graph::Graph;
use crate::hit_test::Point;
use crate::layout::LayoutMetrics;
use crate::link::Link;
use crate::pin::{Pin, PinDirection};
use serde::{Deserialize, Serialize};

/// Current document format version. Bump on breaking format changes.
pub const DOCUMENT_VERSION: u32 = 1;

/// Serialized form of a whole graph.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GraphDocument {
    pub version: u32,
    pub nodes: Vec<NodeRecord>,
    pub links: Vec<Link>,
    /// Id the graph will issue next, so reloaded graphs never reuse ids.
    pub next_node_id: i32,
    #[serde(default)]
    pub viewport_offset: Point,
}

impl GraphDocument {
    pub fn is_compatible(&self) -> bool {
        self.version <= DOCUMENT_VERSION
    }

    pub fn to_json(&self) -> Result<String, GraphError> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    pub fn from_json(json: &str) -> Result<Self, GraphError> {
        Ok(serde_json::from_str(json)?)
    }
}

/// One node. Pins are stored in local-id order.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NodeRecord {
    pub id: i32,
    pub name: String,
    pub position: Point,
    pub pins: Vec<PinRecord>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PinRecord {
    pub name: String,
    /// `None` for flow pins.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub type_name: Option<String>,
    pub direction: PinDirection,
}

impl From<&Pin> for PinRecord {
    fn from(pin: &Pin) -> Self {
        Self {
            name: pin.name().to_string(),
            type_name: pin.type_info().map(|type_info| type_info.name().to_string()),
            direction: pin.direction(),
        }
    }
}

/// Host-provided load/save hooks.
pub trait GraphStore {
    /// The stored graph, or `None` if nothing has been saved yet.
    fn load(&self, metrics: LayoutMetrics) -> Result<Option<Graph>, GraphError>;

    fn save(&mut self, graph: &Graph) -> Result<(), GraphError>;
}

/// Store that keeps the JSON text in memory.
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    contents: Option<String>,
    save_count: usize,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Seed the store with an existing document.
    pub fn with_contents(json: impl Into<String>) -> Self {
        Self { contents: Some(json.into()), save_count: 0 }
    }

    pub fn contents(&self) -> Option<&str> {
        self.contents.as_deref()
    }

    /// Number of successful saves.
    pub fn save_count(&self) -> usize {
        self.save_count
    }
}

impl GraphStore for MemoryStore {
    fn load(&self, metrics: LayoutMetrics) -> Result<Option<Graph>, GraphError> {
        let Some(json) = &self.contents else {
            return Ok(None);
        };
        let document = GraphDocument::from_json(json)?;
        Graph::from_document(&document, metrics).map(Some)
    }

    fn save(&mut self, graph: &Graph) -> Result<(), GraphError> {
        self.contents = Some(graph.to_document().to_json()?);
        self.save_count += 1;
        Ok(())
    }
}
