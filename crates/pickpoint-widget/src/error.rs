use thiserror::Error;

use pickpoint_api::ApiError;

/// Errors surfaced by the delivery widget.
#[derive(Debug, Error)]
pub enum WidgetError {
    /// A backend call failed during initialization or point loading.
    #[error("delivery API error: {0}")]
    Api(#[from] ApiError),

    /// Initialization did not complete within the configured ceiling.
    #[error("widget initialization timed out after {secs}s")]
    InitTimeout { secs: u64 },

    /// A point id could not be resolved in the loaded index.
    #[error("unknown pickup point: {0}")]
    UnknownPoint(String),

    /// A choose was requested while nothing is selected.
    #[error("no destination selected")]
    NothingSelected,
}
