use crate::pin::{PinAddress, UNSET_ID};

/// What the user currently has selected. At most one element at a time.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Selection {
    #[default]
    Unselected,
    Node(i32),
    Pin(PinAddress),
}

impl Selection {
    /// Decode the flat address form, where an unset node id means nothing is
    /// selected and an unset pin id means the whole node is.
    pub fn from_element(element: PinAddress) -> Self {
        if element.node_id == UNSET_ID {
            Selection::Unselected
        } else if element.pin_id == UNSET_ID {
            Selection::Node(element.node_id)
        } else {
            Selection::Pin(element)
        }
    }

    /// Flat address form of the selection.
    pub fn element(&self) -> PinAddress {
        match *self {
            Selection::Unselected => PinAddress::UNSET,
            Selection::Node(node_id) => PinAddress::new(node_id, UNSET_ID),
            Selection::Pin(address) => address,
        }
    }

    pub fn is_node_selected(&self) -> bool {
        matches!(self, Selection::Node(_))
    }

    pub fn is_pin_selected(&self) -> bool {
        matches!(self, Selection::Pin(_))
    }

    /// Id of the node that is selected or owns the selected pin.
    pub fn node_id(&self) -> Option<i32> {
        match *self {
            Selection::Unselected => None,
            Selection::Node(node_id) => Some(node_id),
            Selection::Pin(address) => Some(address.node_id),
        }
    }

    pub fn pin(&self) -> Option<PinAddress> {
        match *self {
            Selection::Pin(address) => Some(address),
            _ => None,
        }
    }

    /// Whether the selection refers to `node_id` or one of its pins.
    pub fn involves_node(&self, node_id: i32) -> bool {
        self.node_id() == Some(node_id)
    }
}
