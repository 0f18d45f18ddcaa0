pub mod client;
pub mod error;
pub mod types;

pub use client::DeliveryApiClient;
pub use error::ApiError;
pub use types::{Availability, CostRequest, NearestTariff, PointListing};
