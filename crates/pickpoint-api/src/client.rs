//! HTTP client for the delivery backend REST API.
//!
//! Wraps `reqwest` with backend-specific error handling and typed response
//! deserialization. Every endpoint checks the `{"error": ..}` envelope the
//! backend uses for application-level failures and surfaces it as
//! [`ApiError::Api`], so callers see one consistent result shape.

use std::time::Duration;

use reqwest::{Client, Url};

use pickpoint_core::{Coordinates, Destination};

use crate::error::ApiError;
use crate::types::{
    Availability, CostRequest, PointListing, PointListingResponse, ReverseGeocodeResponse,
};

/// Client for the delivery backend.
///
/// Manages the HTTP client and base URL. Point it at a mock server in tests
/// by passing the mock's URI as `base_url`.
pub struct DeliveryApiClient {
    client: Client,
    base_url: Url,
}

impl DeliveryApiClient {
    /// Creates a new client for the backend at `base_url`.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError::Http`] if the underlying `reqwest::Client` cannot
    /// be constructed, or [`ApiError::Api`] if `base_url` is not a valid URL.
    pub fn new(base_url: &str, timeout_secs: u64) -> Result<Self, ApiError> {
        let client = Client::builder()
            .timeout(Duration::from_secs(timeout_secs))
            .connect_timeout(Duration::from_secs(10))
            .user_agent("pickpoint/0.1 (delivery-widget)")
            .build()?;

        // Normalise: ensure the base URL ends with exactly one slash so that
        // Url::join appends endpoint paths instead of replacing the last
        // path segment.
        let normalised = format!("{}/", base_url.trim_end_matches('/'));
        let base_url = Url::parse(&normalised)
            .map_err(|e| ApiError::Api(format!("invalid base URL '{base_url}': {e}")))?;

        Ok(Self { client, base_url })
    }

    /// Fetches the pickup point listing.
    ///
    /// # Errors
    ///
    /// - [`ApiError::Api`] if the backend returns an error envelope.
    /// - [`ApiError::Http`] on network failure or non-2xx HTTP status.
    /// - [`ApiError::Deserialize`] if the response does not match the
    ///   expected shape.
    pub async fn list_points(&self) -> Result<Vec<PointListing>, ApiError> {
        let url = self.endpoint_url("delivery/points")?;
        let body = self.get_json(url).await?;
        Self::check_api_error(&body)?;

        let envelope: PointListingResponse =
            serde_json::from_value(body).map_err(|e| ApiError::Deserialize {
                context: "delivery/points".to_owned(),
                source: e,
            })?;

        Ok(envelope.points)
    }

    /// Resolves coordinates to a formatted address.
    ///
    /// # Errors
    ///
    /// - [`ApiError::Api`] if the backend returns an error envelope.
    /// - [`ApiError::Http`] on network failure or non-2xx HTTP status.
    /// - [`ApiError::Deserialize`] if the response does not match the
    ///   expected shape.
    pub async fn reverse_geocode(&self, coordinates: Coordinates) -> Result<String, ApiError> {
        let mut url = self.endpoint_url("geocode/reverse")?;
        url.query_pairs_mut()
            .append_pair("latitude", &coordinates.latitude.to_string())
            .append_pair("longitude", &coordinates.longitude.to_string());

        let body = self.get_json(url).await?;
        Self::check_api_error(&body)?;

        let envelope: ReverseGeocodeResponse =
            serde_json::from_value(body).map_err(|e| ApiError::Deserialize {
                context: "geocode/reverse".to_owned(),
                source: e,
            })?;

        Ok(envelope.address)
    }

    /// Checks whether a destination is deliverable.
    ///
    /// # Errors
    ///
    /// - [`ApiError::Api`] if the backend returns an error envelope.
    /// - [`ApiError::Http`] on network failure or non-2xx HTTP status.
    /// - [`ApiError::Deserialize`] if the response does not match the
    ///   expected shape.
    pub async fn check_availability(
        &self,
        destination: &Destination,
    ) -> Result<Availability, ApiError> {
        let url = self.endpoint_url("delivery/availability")?;
        let body = self.post_json(url, destination).await?;
        Self::check_api_error(&body)?;

        serde_json::from_value(body).map_err(|e| ApiError::Deserialize {
            context: "delivery/availability".to_owned(),
            source: e,
        })
    }

    /// Requests a cost calculation for a destination.
    ///
    /// The calculation payload is intentionally opaque: whatever object the
    /// backend returns is handed to the caller as is (after the error
    /// envelope check).
    ///
    /// # Errors
    ///
    /// - [`ApiError::Api`] if the backend returns an error envelope.
    /// - [`ApiError::Http`] on network failure or non-2xx HTTP status.
    /// - [`ApiError::Deserialize`] if the body is not valid JSON.
    pub async fn calculate_cost(
        &self,
        request: &CostRequest<'_>,
    ) -> Result<serde_json::Value, ApiError> {
        let url = self.endpoint_url("delivery/calculate")?;
        let body = self.post_json(url, request).await?;
        Self::check_api_error(&body)?;
        Ok(body)
    }

    /// Resolves an endpoint path against the stored base URL.
    fn endpoint_url(&self, path: &str) -> Result<Url, ApiError> {
        self.base_url
            .join(path)
            .map_err(|e| ApiError::Api(format!("invalid endpoint path '{path}': {e}")))
    }

    /// Sends a GET request, asserts a 2xx HTTP status, and parses the
    /// response body as JSON.
    async fn get_json(&self, url: Url) -> Result<serde_json::Value, ApiError> {
        let response = self.client.get(url.clone()).send().await?;
        let response = response.error_for_status()?;
        let body = response.text().await?;
        serde_json::from_str(&body).map_err(|e| ApiError::Deserialize {
            context: url.to_string(),
            source: e,
        })
    }

    /// Sends a POST request with a JSON body, asserts a 2xx HTTP status,
    /// and parses the response body as JSON.
    async fn post_json<B: serde::Serialize>(
        &self,
        url: Url,
        body: &B,
    ) -> Result<serde_json::Value, ApiError> {
        let response = self.client.post(url.clone()).json(body).send().await?;
        let response = response.error_for_status()?;
        let text = response.text().await?;
        serde_json::from_str(&text).map_err(|e| ApiError::Deserialize {
            context: url.to_string(),
            source: e,
        })
    }

    /// Checks the `{"error": ..}` envelope and returns an error if present.
    ///
    /// The backend reports application failures either as a plain string
    /// (`{"error": "zone not served"}`) or as an object with a `message`
    /// field; both are normalized here.
    fn check_api_error(body: &serde_json::Value) -> Result<(), ApiError> {
        let Some(error) = body.get("error") else {
            return Ok(());
        };
        let message = match error {
            serde_json::Value::String(s) => s.clone(),
            other => other
                .get("message")
                .and_then(serde_json::Value::as_str)
                .unwrap_or("unknown error")
                .to_owned(),
        };
        Err(ApiError::Api(message))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn test_client(base_url: &str) -> DeliveryApiClient {
        DeliveryApiClient::new(base_url, 30).expect("client construction should not fail")
    }

    #[test]
    fn endpoint_url_joins_against_base_path() {
        let client = test_client("https://api.shop.example/v1");
        let url = client.endpoint_url("delivery/points").unwrap();
        assert_eq!(url.as_str(), "https://api.shop.example/v1/delivery/points");
    }

    #[test]
    fn endpoint_url_tolerates_trailing_slash() {
        let client = test_client("https://api.shop.example/v1/");
        let url = client.endpoint_url("delivery/calculate").unwrap();
        assert_eq!(
            url.as_str(),
            "https://api.shop.example/v1/delivery/calculate"
        );
    }

    #[test]
    fn check_api_error_passes_clean_bodies() {
        let body = serde_json::json!({"deliverable": true});
        assert!(DeliveryApiClient::check_api_error(&body).is_ok());
    }

    #[test]
    fn check_api_error_reads_string_envelope() {
        let body = serde_json::json!({"error": "zone not served"});
        let err = DeliveryApiClient::check_api_error(&body).unwrap_err();
        assert!(matches!(err, ApiError::Api(ref msg) if msg == "zone not served"));
    }

    #[test]
    fn check_api_error_reads_object_envelope() {
        let body = serde_json::json!({"error": {"code": 17, "message": "courier zone closed"}});
        let err = DeliveryApiClient::check_api_error(&body).unwrap_err();
        assert!(matches!(err, ApiError::Api(ref msg) if msg == "courier zone closed"));
    }

    #[test]
    fn check_api_error_defaults_unknown_object_shape() {
        let body = serde_json::json!({"error": {"code": 17}});
        let err = DeliveryApiClient::check_api_error(&body).unwrap_err();
        assert!(matches!(err, ApiError::Api(ref msg) if msg == "unknown error"));
    }
}
