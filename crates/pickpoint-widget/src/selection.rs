//! Selection state of the delivery widget.

use pickpoint_core::Coordinates;

/// Current destination selection. Exactly one variant is active at a time;
/// transitions happen only through [`crate::DeliveryWidget`] methods, which
/// keep marker styling on the map consistent with this state.
#[derive(Debug, Clone, PartialEq, Default)]
pub enum SelectionState {
    #[default]
    NoSelection,
    /// A pickup point is selected; its marker carries the active style.
    PickupPoint { point_id: String },
    /// A courier address is selected; the draggable courier marker is on
    /// the map. `request_seq` identifies the address resolution this state
    /// came from, so stale resolutions can be discarded.
    CourierAddress {
        coordinates: Coordinates,
        resolved_address: String,
        request_seq: u64,
    },
}

impl SelectionState {
    /// The selected pickup point id, if a pickup point is selected.
    #[must_use]
    pub fn selected_point_id(&self) -> Option<&str> {
        match self {
            SelectionState::PickupPoint { point_id } => Some(point_id),
            _ => None,
        }
    }

    #[must_use]
    pub fn is_courier(&self) -> bool {
        matches!(self, SelectionState::CourierAddress { .. })
    }
}
