//! Cost quotes and the order metrics that feed cost calculation.

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::destination::Destination;

/// Order metrics supplied by the embedding page for cost calculation.
///
/// When the page has nothing to supply (cart not yet priced), the zeroed
/// [`Default`] is sent instead.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct OrderMetrics {
    pub weight_grams: u32,
    pub assessed_price: f64,
    pub client_price: f64,
    pub payment_method: String,
    pub parcel_count: u32,
    pub oversized: bool,
}

/// Result of the choose-destination pipeline.
///
/// `calculation` is the opaque backend calculation payload merged with the
/// serialized destination descriptor. The quote itself is transient; the
/// embedding page decides what to persist.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CostQuote {
    pub destination: Destination,
    pub calculation: Value,
}

impl CostQuote {
    /// Builds a quote by merging the destination descriptor into the
    /// calculation object. Backend fields win on key collisions; a
    /// non-object calculation is kept untouched.
    #[must_use]
    pub fn merged(destination: Destination, mut calculation: Value) -> Self {
        if let Value::Object(calc) = &mut calculation {
            if let Ok(Value::Object(descriptor)) = serde_json::to_value(&destination) {
                for (key, value) in descriptor {
                    calc.entry(key).or_insert(value);
                }
            }
        }
        Self {
            destination,
            calculation,
        }
    }

    /// The error marker set when cost calculation failed, if any.
    #[must_use]
    pub fn calculation_error(&self) -> Option<&str> {
        self.calculation.get("error").and_then(Value::as_str)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::point::Coordinates;

    #[test]
    fn merged_adds_descriptor_fields_to_calculation() {
        let quote = CostQuote::merged(
            Destination::SelfPickup {
                code: "100".to_owned(),
            },
            serde_json::json!({"cost": 400.0, "period": "1-3"}),
        );
        assert_eq!(
            quote.calculation,
            serde_json::json!({
                "cost": 400.0,
                "period": "1-3",
                "deliveryMode": "self_pickup",
                "code": "100"
            })
        );
    }

    #[test]
    fn merged_keeps_backend_fields_on_collision() {
        let quote = CostQuote::merged(
            Destination::SelfPickup {
                code: "100".to_owned(),
            },
            serde_json::json!({"code": "backend-wins"}),
        );
        assert_eq!(quote.calculation["code"], "backend-wins");
    }

    #[test]
    fn merged_leaves_non_object_calculation_untouched() {
        let quote = CostQuote::merged(
            Destination::TimeInterval {
                address: "Arbat, 1".to_owned(),
                coordinates: Coordinates::new(55.75, 37.59),
            },
            Value::Null,
        );
        assert_eq!(quote.calculation, Value::Null);
    }

    #[test]
    fn calculation_error_reads_the_marker() {
        let quote = CostQuote::merged(
            Destination::SelfPickup {
                code: "1".to_owned(),
            },
            serde_json::json!({"error": "backend unreachable"}),
        );
        assert_eq!(quote.calculation_error(), Some("backend unreachable"));
    }

    #[test]
    fn default_metrics_are_zeroed() {
        let metrics = OrderMetrics::default();
        assert_eq!(metrics.weight_grams, 0);
        assert!(!metrics.oversized);
        assert!(metrics.payment_method.is_empty());
    }
}
