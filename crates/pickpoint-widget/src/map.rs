//! Contract between the widget and the external map SDK.

use serde::{Deserialize, Serialize};

use pickpoint_core::Coordinates;

/// Marker id reserved for the draggable courier-address marker.
pub const COURIER_MARKER_ID: &str = "courier";

/// Visual style of a map marker.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MarkerStyle {
    /// Unselected pickup point.
    Default,
    /// The currently selected pickup point.
    Active,
    /// The draggable courier-address marker.
    Courier,
}

/// Rectangular map extent.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Bounds {
    pub south_west: Coordinates,
    pub north_east: Coordinates,
}

/// One forward-geocode candidate returned by the map SDK.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GeoCandidate {
    pub display_name: String,
    /// Provider kind, e.g. `"house"`, `"street"`, `"locality"`.
    pub kind: String,
    pub coordinates: Coordinates,
    #[serde(default)]
    pub bounds: Option<Bounds>,
}

/// Thin wrapper over the external mapping SDK.
///
/// The widget drives markers, panning and geocoding through this trait; the
/// embedding application implements it over the concrete SDK and forwards
/// SDK click/drag events into [`crate::DeliveryWidget`] methods. Geocode
/// failures are indistinguishable from "nothing found" at this seam: both
/// surface as an empty candidate list.
#[allow(async_fn_in_trait)]
pub trait MapAdapter {
    /// Places the marker `id`, replacing any marker with the same id.
    fn add_marker(
        &mut self,
        id: &str,
        coordinates: Coordinates,
        style: MarkerStyle,
        draggable: bool,
    );

    /// Removes the marker `id`. Unknown ids are a no-op.
    fn remove_marker(&mut self, id: &str);

    /// Restyles an existing marker.
    fn set_marker_style(&mut self, id: &str, style: MarkerStyle);

    /// Removes every marker and any clustering layer.
    fn clear_markers(&mut self);

    /// Enables marker clustering over the currently placed markers.
    fn enable_clustering(&mut self);

    fn pan_to(&mut self, coordinates: Coordinates, zoom: Option<u8>);

    fn fit_bounds(&mut self, bounds: Bounds);

    /// Opens the info balloon attached to a marker.
    fn open_balloon(&mut self, id: &str);

    /// Forward geocode: up to `limit` candidates for a free-text query.
    async fn geocode(&self, query: &str, limit: usize) -> Vec<GeoCandidate>;

    /// Reverse geocode through the SDK's own geocoder.
    async fn reverse_geocode(&self, coordinates: Coordinates) -> Option<String>;

    /// The device position, when the SDK can provide one.
    async fn locate(&self) -> Option<Coordinates>;
}
