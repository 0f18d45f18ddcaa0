//! Headless core of the delivery-point selection widget.
//!
//! Owns the pickup point index, the selection state machine, the geocode
//! cache and suggestion dropdown, and the availability/cost pipeline. The
//! embedding application owns the DOM and the concrete map SDK; it talks to
//! this crate through the [`MapAdapter`] and [`WidgetHost`] traits and
//! forwards SDK events into [`DeliveryWidget`] methods.

pub mod cache;
pub mod debounce;
mod error;
mod gate;
pub mod host;
pub mod index;
pub mod map;
mod pipeline;
pub mod selection;
pub mod suggest;
mod widget;

pub use error::WidgetError;
pub use host::{WidgetHost, DELIVERY_COST_STORAGE_KEY};
pub use map::{Bounds, GeoCandidate, MapAdapter, MarkerStyle, COURIER_MARKER_ID};
pub use selection::SelectionState;
pub use widget::DeliveryWidget;
