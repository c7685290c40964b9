//! # Function Graph Editor
//!
//! Graph model and interaction layer for visual function-graph editors:
//! users place nodes that stand for typed functions, connect typed
//! input/output pins with links and drag nodes around a 2D canvas.
//!
//! ## Features
//!
//! - **Typed pins** - Output-into-input linking with exact type matching and untyped flow pins
//! - **Function catalog** - Nodes are synthesized from `(library, function)` signatures
//! - **Pure layout** - Node and pin rectangles derive from position and label lengths only
//! - **Lazy lookup caches** - O(1) id and pin-address probes that repair themselves on a miss
//! - **Change notification** - Payload-free signal with explicit subscription handles
//! - **Render boundary** - Scene snapshots and draw commands carrying Slint colors and strings
//!
//! ## Quick Start
//!
//! ```ignore
//! use function_graph_editor::*;
//!
//! let mut ctrl = InteractionController::new(Graph::new(), Box::new(math_library()));
//! let sin = ctrl.add_function_node("Math", "Sin", Point::new(0.0, 0.0))?;
//! let add = ctrl.add_function_node("Math", "Add", Point::new(200.0, 0.0))?;
//!
//! // Drag from Sin's output onto Add's first input
//! let from = ctrl.graph().pin_anchor(PinAddress::new(sin, 0)).unwrap();
//! let to = ctrl.graph().pin_anchor(PinAddress::new(add, 1)).unwrap();
//! ctrl.mouse_down(MouseButton::Primary, from);
//! ctrl.mouse_up(MouseButton::Primary, to);
//!
//! assert_eq!(ctrl.graph().link_count(), 1);
//! ```
//!
//! ## Core Types
//!
//! - [`Graph`] - Owns nodes and links, ids, selection and the change signal
//! - [`Node`] / [`Pin`] / [`Link`] - The graph's elements
//! - [`InteractionController`] - Normalized mouse/key events to graph operations
//! - [`Scene`] - What to paint, in paint order
//! - [`GraphStore`] - Host-provided load/save hooks

pub mod catalog;
pub mod config;
pub mod controller;
pub mod error;
pub mod graph;
pub mod grid;
pub mod hit_test;
pub mod layout;
pub mod link;
pub mod node;
pub mod path;
pub mod persistence;
pub mod pin;
pub mod scene;
pub mod selection;
pub mod signal;
pub mod state;
pub mod validation;

pub use catalog::{math_library, FunctionCatalog, FunctionSignature, ParameterInfo, StaticCatalog, MATH_LIBRARY};
pub use config::EditorConfig;
pub use controller::{InputOutcome, InteractionController, Key, MenuEntry, MouseButton};
pub use error::GraphError;
pub use graph::Graph;
pub use grid::{default_grid_layers, generate_grid_commands, generate_layered_grid, GridLayer};
pub use hit_test::{
    find_node_at, find_pin_at, NodeGeometry, PinGeometry, Point, Rect, SimpleNodeGeometry,
    SimplePinGeometry,
};
pub use layout::{LayoutMetrics, NodeLayout};
pub use link::Link;
pub use node::{display_name, Node, OUTPUT_PIN_NAME};
pub use path::{generate_link_path, CubicBezier};
pub use persistence::{GraphDocument, GraphStore, MemoryStore, NodeRecord, PinRecord, DOCUMENT_VERSION};
pub use pin::{Pin, PinAddress, PinDirection, PinTypeInfo, UNSET_ID};
pub use scene::{DrawCommand, LinkVisual, NodeVisual, PinVisual, Scene, SceneRenderer, SceneStyle};
pub use selection::Selection;
pub use signal::{ChangeSignal, Subscription, WeakChangeSignal};
pub use state::LookupCache;
pub use validation::{
    validate_link, CompositeValidator, LinkValidator, NoDuplicateLinks, PinCompatibility,
    ValidationError, ValidationResult,
};
