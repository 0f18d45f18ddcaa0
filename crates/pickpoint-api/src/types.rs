//! Delivery backend wire types.
//!
//! All types model the JSON structures returned by the delivery backend.
//! Backend errors arrive as an `{"error": ..}` envelope regardless of the
//! endpoint; [`crate::client::DeliveryApiClient`] checks that envelope
//! before any of these types are deserialized, so the widget never has to
//! branch on response shape.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use pickpoint_core::schedule::{format_dayoffs, format_schedule, OpenHours};
use pickpoint_core::{
    join_address_parts, normalize_point_id, Coordinates, Destination, OrderMetrics, Point,
};

/// Envelope of the point listing: `{ "points": [ ... ] }`.
#[derive(Debug, Deserialize)]
pub(crate) struct PointListingResponse {
    pub points: Vec<PointListing>,
}

/// One pickup point record from the `GET /delivery/points` listing.
#[derive(Debug, Clone, Deserialize)]
pub struct PointListing {
    /// Provider-native id.
    pub id: String,
    pub name: String,
    pub latitude: f64,
    pub longitude: f64,
    #[serde(default)]
    pub address: Option<AddressParts>,
    #[serde(default)]
    pub phone: Option<String>,
    #[serde(default)]
    pub work_time: Vec<OpenHours>,
    /// Exception dates in `"YYYY-MM-DD"` format.
    #[serde(default)]
    pub dayoffs: Vec<String>,
}

/// Address sub-fields of a listing record. Providers fill these unevenly;
/// conversion joins whatever is present.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct AddressParts {
    #[serde(default)]
    pub full: Option<String>,
    #[serde(default)]
    pub city: Option<String>,
    #[serde(default)]
    pub street: Option<String>,
    #[serde(default)]
    pub house: Option<String>,
}

impl PointListing {
    /// Converts the raw listing record into a domain [`Point`].
    ///
    /// Missing address parts are joined from whatever sub-fields exist,
    /// a missing schedule yields an empty string, and unparseable dayoff
    /// dates are skipped.
    #[must_use]
    pub fn into_point(self) -> Point {
        let address = match &self.address {
            Some(parts) => match &parts.full {
                Some(full) if !full.trim().is_empty() => full.trim().to_owned(),
                _ => join_address_parts(&[
                    parts.city.as_deref(),
                    parts.street.as_deref(),
                    parts.house.as_deref(),
                ]),
            },
            None => String::new(),
        };

        let dayoff_dates: Vec<NaiveDate> = self
            .dayoffs
            .iter()
            .filter_map(|raw| NaiveDate::parse_from_str(raw, "%Y-%m-%d").ok())
            .collect();

        let phone = self.phone.filter(|p| !p.is_empty());

        Point {
            id: normalize_point_id(&self.id),
            raw_id: self.id,
            coordinates: Coordinates::new(self.latitude, self.longitude),
            name: self.name,
            address,
            phone,
            schedule: format_schedule(&self.work_time),
            dayoffs: format_dayoffs(&dayoff_dates),
        }
    }
}

/// Envelope of the reverse geocode response: `{ "address": ".." }`.
#[derive(Debug, Deserialize)]
pub(crate) struct ReverseGeocodeResponse {
    pub address: String,
}

/// Result of the availability check for a destination.
#[derive(Debug, Clone, Deserialize)]
pub struct Availability {
    pub deliverable: bool,
    #[serde(default)]
    pub nearest: Option<NearestTariff>,
}

/// Pricing details of the nearest serving tariff, when the backend knows it.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct NearestTariff {
    #[serde(default)]
    pub price_rub: Option<f64>,
    /// Free-text pricing description, e.g. `"350 руб"` or `"от 120,50"`.
    #[serde(default)]
    pub pricing_total: Option<String>,
}

impl Availability {
    /// Extracts a numeric cost hint.
    ///
    /// Prefers the direct `price_rub` field; otherwise parses the first
    /// numeric token out of `pricing_total`. Returns `None` when neither
    /// yields a number.
    #[must_use]
    pub fn cost_hint(&self) -> Option<f64> {
        let nearest = self.nearest.as_ref()?;
        if let Some(price) = nearest.price_rub {
            return Some(price);
        }
        parse_price_token(nearest.pricing_total.as_deref()?)
    }
}

/// Request body for `POST /delivery/calculate`.
///
/// Flattens the destination descriptor and the order metrics into one
/// object, which is the shape the backend expects.
#[derive(Debug, Clone, Serialize)]
pub struct CostRequest<'a> {
    #[serde(flatten)]
    pub destination: &'a Destination,
    #[serde(flatten)]
    pub metrics: &'a OrderMetrics,
}

impl<'a> CostRequest<'a> {
    #[must_use]
    pub fn new(destination: &'a Destination, metrics: &'a OrderMetrics) -> Self {
        Self {
            destination,
            metrics,
        }
    }
}

/// Parses the first numeric token out of a free-text pricing description.
///
/// Tolerates a comma decimal separator: `"350 руб"` parses to `350.0`,
/// `"от 120,50"` to `120.5`.
#[must_use]
pub fn parse_price_token(text: &str) -> Option<f64> {
    let re = regex::Regex::new(r"\d+(?:[.,]\d+)?").expect("valid regex");
    let token = re.find(text)?.as_str().replace(',', ".");
    token.parse().ok()
}
