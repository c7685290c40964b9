//! Pins: typed, directional connection points owned by a node.

use crate::validation::{ValidationError, ValidationResult};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Sentinel used by [`PinAddress`] fields that do not refer to anything.
pub const UNSET_ID: i32 = -1;

/// Opaque type-name wrapper. Two pins carry compatible values only when
/// their type names are equal by value.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PinTypeInfo(String);

impl PinTypeInfo {
    pub fn new(type_name: impl Into<String>) -> Self {
        Self(type_name.into())
    }

    pub fn name(&self) -> &str {
        &self.0
    }
}

/// Which side of a node a pin sits on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum PinDirection {
    /// Placeholder direction of a default-constructed pin. Never links.
    #[default]
    None,
    Input,
    Output,
}

/// `(node_id, pin_id)` pair identifying a pin within a graph.
///
/// Either field may be [`UNSET_ID`]. With `pin_id` unset the address names a
/// whole node, which is how the graph encodes "a node is selected".
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct PinAddress {
    pub node_id: i32,
    pub pin_id: i32,
}

impl PinAddress {
    pub const UNSET: PinAddress = PinAddress { node_id: UNSET_ID, pin_id: UNSET_ID };

    pub const fn new(node_id: i32, pin_id: i32) -> Self {
        Self { node_id, pin_id }
    }

    pub fn is_unset(&self) -> bool {
        self.node_id == UNSET_ID
    }
}

impl Default for PinAddress {
    fn default() -> Self {
        Self::UNSET
    }
}

impl fmt::Display for PinAddress {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}.{}", self.node_id, self.pin_id)
    }
}

/// A connection point on a node.
///
/// `local_id` is the pin's index in its owner's pin list; pins are only ever
/// appended, so the index stays valid for the node's lifetime.
#[derive(Debug, Clone, PartialEq)]
pub struct Pin {
    owner_id: i32,
    local_id: i32,
    name: String,
    type_info: Option<PinTypeInfo>,
    direction: PinDirection,
}

impl Default for Pin {
    fn default() -> Self {
        Self {
            owner_id: UNSET_ID,
            local_id: UNSET_ID,
            name: String::new(),
            type_info: None,
            direction: PinDirection::None,
        }
    }
}

impl Pin {
    pub fn new(
        owner_id: i32,
        local_id: i32,
        name: impl Into<String>,
        type_info: Option<PinTypeInfo>,
        direction: PinDirection,
    ) -> Self {
        Self {
            owner_id,
            local_id,
            name: name.into(),
            type_info,
            direction,
        }
    }

    pub fn owner_id(&self) -> i32 { self.owner_id }
    pub fn local_id(&self) -> i32 { self.local_id }
    pub fn name(&self) -> &str { &self.name }
    pub fn direction(&self) -> PinDirection { self.direction }
    pub fn type_info(&self) -> Option<&PinTypeInfo> { self.type_info.as_ref() }

    /// Untyped pins sequence execution (flow pins) rather than carry a value.
    pub fn is_untyped(&self) -> bool {
        self.type_info.is_none()
    }

    pub fn address(&self) -> PinAddress {
        PinAddress::new(self.owner_id, self.local_id)
    }

    pub(crate) fn set_owner_id(&mut self, owner_id: i32) {
        self.owner_id = owner_id;
    }

    /// Check whether `other` may feed into this pin.
    ///
    /// Direction is checked from the receiver's side: `self` must be an input
    /// and `other` an output. Callers unsure of the direction try both orders.
    pub fn check_link_to(&self, other: &Pin) -> ValidationResult {
        if self.owner_id == other.owner_id {
            return ValidationResult::Invalid(ValidationError::SameNode(self.owner_id));
        }

        if self.direction != PinDirection::Input || other.direction != PinDirection::Output {
            return ValidationResult::Invalid(ValidationError::IncompatibleDirection {
                receiver: self.direction,
                source: other.direction,
            });
        }

        match (&self.type_info, &other.type_info) {
            (None, None) => ValidationResult::Valid,
            (Some(_), None) | (None, Some(_)) => {
                ValidationResult::Invalid(ValidationError::UntypedMismatch)
            }
            (Some(expected), Some(found)) if expected == found => ValidationResult::Valid,
            (Some(expected), Some(found)) => ValidationResult::Invalid(ValidationError::TypeMismatch {
                expected: expected.name().to_string(),
                found: found.name().to_string(),
            }),
        }
    }

    pub fn can_link_to(&self, other: &Pin) -> bool {
        self.check_link_to(other).is_valid()
    }
}

impl fmt::Display for Pin {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.type_info {
            Some(type_info) => write!(f, "({}) {}", type_info.name(), self.name),
            None => f.write_str(&self.name),
        }
    }
}
