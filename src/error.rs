use crate::validation::ValidationError;
use thiserror::Error;

/// Errors surfaced by graph construction, lookup and persistence.
///
/// Interactive paths log these and fall back to an absent result; only
/// constructors, programmatic linking and the persistence boundary return
/// them to the caller.
#[derive(Debug, Error)]
pub enum GraphError {
    #[error("no node with id {0}")]
    NodeNotFound(i32),

    #[error("pin {pin_id} out of range on node {node_id} (pin count {pin_count})")]
    PinOutOfRange { node_id: i32, pin_id: i32, pin_count: usize },

    #[error("function '{library}.{function}' not found")]
    FunctionNotFound { library: String, function: String },

    #[error("link rejected: {0}")]
    InvalidLink(ValidationError),

    #[error("incompatible graph document version: found {found}, expected <= {expected}")]
    IncompatibleDocument { found: u32, expected: u32 },

    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// Raised by host [`GraphStore`](crate::GraphStore) implementations.
    #[error("graph store error: {0}")]
    Store(String),
}
