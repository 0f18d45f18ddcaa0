use crate::point::Coordinates;

/// Runtime configuration for the delivery widget.
#[derive(Debug, Clone)]
pub struct WidgetConfig {
    /// Base URL of the delivery backend.
    pub api_base_url: String,
    /// Per-request HTTP timeout.
    pub request_timeout_secs: u64,
    /// Ceiling on widget initialization (point listing fetch).
    pub init_timeout_secs: u64,
    /// Delay applied to search input before a geocode lookup fires.
    pub geocode_debounce_ms: u64,
    /// Maximum number of cached geocode queries.
    pub geocode_cache_capacity: usize,
    /// Maximum number of suggestion candidates requested per lookup.
    pub suggest_limit: usize,
    /// Map center used when auto-locate is off or fails.
    pub default_center: Coordinates,
    pub default_zoom: u8,
    /// Pan to the SDK-reported position after init.
    pub auto_locate: bool,
}

impl WidgetConfig {
    /// Configuration with embedder-facing defaults; only the backend base
    /// URL has no sensible default.
    #[must_use]
    pub fn new(api_base_url: impl Into<String>) -> Self {
        Self {
            api_base_url: api_base_url.into(),
            request_timeout_secs: 30,
            init_timeout_secs: 10,
            geocode_debounce_ms: 250,
            geocode_cache_capacity: 50,
            suggest_limit: 5,
            default_center: Coordinates::new(55.751_244, 37.618_423),
            default_zoom: 12,
            auto_locate: false,
        }
    }
}
