//! Delivery destination descriptors.

use serde::{Deserialize, Serialize};

use crate::point::Coordinates;

/// Destination of a delivery request, discriminated by delivery mode.
///
/// The serialized form is exactly what the backend availability and
/// cost-calculation endpoints accept:
/// `{"deliveryMode": "self_pickup", "code": ..}` or
/// `{"deliveryMode": "time_interval", "address": .., "coordinates": ..}`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "deliveryMode", rename_all = "snake_case")]
pub enum Destination {
    /// Collection at a pickup point, referenced by its provider-native code.
    SelfPickup { code: String },
    /// Courier delivery to a resolved address within a time interval.
    TimeInterval {
        address: String,
        coordinates: Coordinates,
    },
}

impl Destination {
    /// The wire name of the delivery mode, for log context.
    #[must_use]
    pub fn mode(&self) -> &'static str {
        match self {
            Destination::SelfPickup { .. } => "self_pickup",
            Destination::TimeInterval { .. } => "time_interval",
        }
    }
}
