//! Deliverability gate in front of the cost pipeline.

use pickpoint_api::DeliveryApiClient;
use pickpoint_core::Destination;

use crate::host::{WidgetHost, DELIVERY_COST_STORAGE_KEY};

/// Notice raised when a destination cannot be served.
pub(crate) const NOT_DELIVERABLE_NOTICE: &str = "Delivery to this destination is not available";

/// Checks that a destination is deliverable before any cost is computed.
///
/// Backend failures never escape this boundary: they are logged and
/// converted into the same user-facing "not deliverable" state, leaving
/// the widget re-triggerable.
pub(crate) struct AvailabilityGate<'a, H: WidgetHost> {
    api: &'a DeliveryApiClient,
    host: &'a H,
}

impl<'a, H: WidgetHost> AvailabilityGate<'a, H> {
    pub(crate) fn new(api: &'a DeliveryApiClient, host: &'a H) -> Self {
        Self { api, host }
    }

    /// Returns whether `destination` is deliverable.
    ///
    /// On `deliverable: true` a cost hint, when extractable, is shown and
    /// written to the host storage key; the check succeeds either way.
    /// On `deliverable: false` or any backend failure, the displayed cost
    /// is cleared and a blocking notice is raised.
    pub(crate) async fn check(&self, destination: &Destination) -> bool {
        match self.api.check_availability(destination).await {
            Ok(availability) if availability.deliverable => {
                if let Some(cost) = availability.cost_hint() {
                    self.host.show_cost(cost);
                    self.host
                        .set_stored_value(DELIVERY_COST_STORAGE_KEY, &cost.to_string());
                }
                true
            }
            Ok(_) => {
                tracing::debug!(mode = destination.mode(), "destination not deliverable");
                self.host.clear_cost();
                self.host.notify(NOT_DELIVERABLE_NOTICE);
                false
            }
            Err(e) => {
                tracing::warn!(
                    mode = destination.mode(),
                    error = %e,
                    "availability check failed; treating as not deliverable"
                );
                self.host.clear_cost();
                self.host.notify(NOT_DELIVERABLE_NOTICE);
                false
            }
        }
    }
}
