use crate::node::Node;
use crate::pin::PinAddress;
use std::cell::{Cell, RefCell};
use std::collections::HashMap;

/// Two-tier lookup tables for the graph: node id → slot and pin address → slot,
/// where a slot is an index into the graph's node list.
///
/// The tables are derived data. They are filled lazily on a miss by a linear
/// scan of the node list and are never invalidated eagerly. A stale entry is
/// detected on hit (the slot no longer holds the requested id) and handled as
/// a miss, so the node list stays the only source of truth.
#[derive(Debug, Default)]
pub struct LookupCache {
    node_slots: RefCell<HashMap<i32, usize>>,
    pin_slots: RefCell<HashMap<PinAddress, usize>>,
    scans: Cell<usize>,
}

impl LookupCache {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record where `node_id` lives without scanning.
    pub fn insert_node(&self, node_id: i32, slot: usize) {
        self.node_slots.borrow_mut().insert(node_id, slot);
    }

    /// Slot of the node with `node_id`, scanning `nodes` on a miss.
    pub fn node_slot(&self, nodes: &[Node], node_id: i32) -> Option<usize> {
        let cached = self.node_slots.borrow().get(&node_id).copied();
        if let Some(slot) = cached {
            if nodes.get(slot).is_some_and(|node| node.id() == node_id) {
                return Some(slot);
            }
        }

        self.scans.set(self.scans.get() + 1);
        let slot = nodes.iter().position(|node| node.id() == node_id)?;
        self.node_slots.borrow_mut().insert(node_id, slot);
        Some(slot)
    }

    /// Slot of the node owning the pin at `address`, provided the pin exists.
    pub fn pin_slot(&self, nodes: &[Node], address: PinAddress) -> Option<usize> {
        let cached = self.pin_slots.borrow().get(&address).copied();
        if let Some(slot) = cached {
            let still_valid = nodes.get(slot).is_some_and(|node| {
                node.id() == address.node_id
                    && usize::try_from(address.pin_id).is_ok_and(|pin| pin < node.pin_count())
            });
            if still_valid {
                return Some(slot);
            }
        }

        let slot = self.node_slot(nodes, address.node_id)?;
        nodes[slot].pin(address.pin_id).ok()?;
        self.pin_slots.borrow_mut().insert(address, slot);
        Some(slot)
    }

    /// Drop every entry. The next lookups rebuild from the node list.
    pub fn clear(&self) {
        self.node_slots.borrow_mut().clear();
        self.pin_slots.borrow_mut().clear();
    }

    pub fn cached_nodes(&self) -> usize {
        self.node_slots.borrow().len()
    }

    pub fn cached_pins(&self) -> usize {
        self.pin_slots.borrow().len()
    }

    /// Number of fallback scans performed so far.
    pub fn scan_count(&self) -> usize {
        self.scans.get()
    }
}
