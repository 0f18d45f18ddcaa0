//! The choose-destination pipeline.

use pickpoint_api::{CostRequest, DeliveryApiClient};
use pickpoint_core::{CostQuote, Destination};
use serde_json::Value;

use crate::gate::AvailabilityGate;
use crate::host::{WidgetHost, DELIVERY_COST_STORAGE_KEY};

/// Runs the full pipeline for one destination choice:
///
/// 1. availability gate; aborts with no quote when not deliverable;
/// 2. cost calculation with host-supplied order metrics (zeroed defaults
///    when the host has none);
/// 3. merge of the destination descriptor into the calculation.
///
/// A failed calculation does not abort: it yields a quote whose
/// calculation carries an `"error"` marker, and the embedding page decides
/// how to present it.
pub(crate) struct CostPipeline<'a, H: WidgetHost> {
    api: &'a DeliveryApiClient,
    host: &'a H,
}

impl<'a, H: WidgetHost> CostPipeline<'a, H> {
    pub(crate) fn new(api: &'a DeliveryApiClient, host: &'a H) -> Self {
        Self { api, host }
    }

    pub(crate) async fn choose(&self, destination: Destination) -> Option<CostQuote> {
        let gate = AvailabilityGate::new(self.api, self.host);
        if !gate.check(&destination).await {
            return None;
        }

        let metrics = self.host.order_metrics().unwrap_or_default();
        let request = CostRequest::new(&destination, &metrics);
        let calculation = match self.api.calculate_cost(&request).await {
            Ok(value) => value,
            Err(e) => {
                tracing::warn!(
                    mode = destination.mode(),
                    error = %e,
                    "cost calculation failed"
                );
                serde_json::json!({ "error": e.to_string() })
            }
        };

        // The final calculated cost supersedes the gate's hint in storage.
        if let Some(cost) = calculation.get("cost").and_then(Value::as_f64) {
            self.host
                .set_stored_value(DELIVERY_COST_STORAGE_KEY, &cost.to_string());
            self.host.show_cost(cost);
        }

        Some(CostQuote::merged(destination, calculation))
    }
}
