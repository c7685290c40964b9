use crate::pin::PinAddress;
use serde::{Deserialize, Serialize};
use std::fmt;

/// A directed edge between two pins.
///
/// A link has no identity beyond its endpoints: two links with the same
/// endpoints are indistinguishable, and the graph keeps both.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Link {
    from: PinAddress,
    to: PinAddress,
}

impl Link {
    pub fn new(from: PinAddress, to: PinAddress) -> Self {
        Self { from, to }
    }

    pub fn from(&self) -> PinAddress { self.from }
    pub fn to(&self) -> PinAddress { self.to }

    /// Whether either endpoint belongs to `node_id`.
    pub fn touches_node(&self, node_id: i32) -> bool {
        self.from.node_id == node_id || self.to.node_id == node_id
    }
}

impl fmt::Display for Link {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} to {}", self.from, self.to)
    }
}
