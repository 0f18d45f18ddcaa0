use thiserror::Error;

pub mod app_config;
pub mod config;
mod destination;
mod point;
mod quote;
pub mod schedule;

pub use app_config::WidgetConfig;
pub use config::{load_widget_config, load_widget_config_from_env};
pub use destination::Destination;
pub use point::{join_address_parts, normalize_point_id, Coordinates, Point, POINT_ID_PREFIX};
pub use quote::{CostQuote, OrderMetrics};

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("missing required env var: {0}")]
    MissingEnvVar(String),
    #[error("invalid value for {var}: {reason}")]
    InvalidEnvVar { var: String, reason: String },
}
