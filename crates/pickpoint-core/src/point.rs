//! Pickup point domain types.

use serde::{Deserialize, Serialize};

/// Namespace prefix for pickup point ids.
///
/// Point ids share a flat id space with other checkout entities on the
/// embedding page; the prefix keeps them unambiguous. The provider-native
/// id (without the prefix) lives in [`Point::raw_id`].
pub const POINT_ID_PREFIX: &str = "pt-";

/// A `(latitude, longitude)` pair in degrees.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Coordinates {
    pub latitude: f64,
    pub longitude: f64,
}

impl Coordinates {
    #[must_use]
    pub fn new(latitude: f64, longitude: f64) -> Self {
        Self {
            latitude,
            longitude,
        }
    }
}

/// A pickup location.
///
/// Built in bulk from the backend listing when the widget initializes and
/// immutable afterwards; the whole set is discarded and rebuilt on re-init.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Point {
    /// Stable namespaced id (see [`POINT_ID_PREFIX`]).
    pub id: String,
    /// Provider-native id, used when calling backend delivery APIs.
    pub raw_id: String,
    pub coordinates: Coordinates,
    pub name: String,
    pub address: String,
    pub phone: Option<String>,
    /// Human-readable open-hours string, see [`crate::schedule`].
    pub schedule: String,
    /// Formatted list of exception dates.
    pub dayoffs: String,
}

/// Normalizes a point id to its namespaced form, adding the prefix when
/// missing. Already-prefixed ids pass through unchanged.
#[must_use]
pub fn normalize_point_id(id: &str) -> String {
    if id.starts_with(POINT_ID_PREFIX) {
        id.to_owned()
    } else {
        format!("{POINT_ID_PREFIX}{id}")
    }
}

/// Joins whatever address sub-fields exist into one display string.
///
/// Missing and blank parts are skipped rather than failing; an all-empty
/// input yields an empty string.
#[must_use]
pub fn join_address_parts(parts: &[Option<&str>]) -> String {
    parts
        .iter()
        .filter_map(|part| *part)
        .map(str::trim)
        .filter(|part| !part.is_empty())
        .collect::<Vec<_>>()
        .join(", ")
}
