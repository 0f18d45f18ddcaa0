//! Contract between the widget and its embedding page.

use pickpoint_core::{CostQuote, OrderMetrics, Point};

/// Storage key under which the last computed delivery cost is written, so
/// the embedding checkout page can read it without re-querying the backend.
pub const DELIVERY_COST_STORAGE_KEY: &str = "pickpoint.delivery_cost";

/// Callbacks and services the embedding page provides to the widget.
///
/// All methods take `&self`; the page is free to use interior mutability
/// for whatever bookkeeping it needs.
pub trait WidgetHost {
    /// Fired once initialization has completed and markers are on the map.
    fn on_ready(&self);

    /// Fired when a destination choice completes. `point` is set for
    /// pickup destinations and `None` for courier delivery.
    fn on_choose(&self, point: Option<&Point>, quote: &CostQuote);

    /// Raises a blocking user-facing notice (not deliverable, no points).
    fn notify(&self, message: &str);

    /// Displays a delivery cost in the cost panel.
    fn show_cost(&self, cost: f64);

    /// Clears the cost panel.
    fn clear_cost(&self);

    /// Writes to the embedding page's key-value storage.
    fn set_stored_value(&self, key: &str, value: &str);

    /// Order metrics for cost calculation; `None` falls back to zeroed
    /// defaults.
    fn order_metrics(&self) -> Option<OrderMetrics> {
        None
    }
}
