use crate::app_config::WidgetConfig;
use crate::point::Coordinates;
use crate::ConfigError;

/// Load widget configuration from environment variables.
///
/// Calls `dotenvy::dotenv().ok()` to load `.env` files before reading env vars.
///
/// # Errors
///
/// Returns `ConfigError` if required env vars are missing or values are invalid.
pub fn load_widget_config() -> Result<WidgetConfig, ConfigError> {
    dotenvy::dotenv().ok();
    load_widget_config_from_env()
}

/// Load widget configuration from environment variables already in the process.
///
/// Unlike [`load_widget_config`], this does NOT load `.env` files — useful for
/// testing or when the caller manages env setup.
///
/// # Errors
///
/// Returns `ConfigError` if required env vars are missing or values are invalid.
pub fn load_widget_config_from_env() -> Result<WidgetConfig, ConfigError> {
    build_widget_config(|key| std::env::var(key))
}

/// Build widget configuration using the provided env-var lookup function.
///
/// This is the core parsing/validation logic, decoupled from the actual
/// environment so it can be tested with a pure `HashMap` lookup.
fn build_widget_config<F>(lookup: F) -> Result<WidgetConfig, ConfigError>
where
    F: Fn(&str) -> Result<String, std::env::VarError>,
{
    let require = |var: &str| -> Result<String, ConfigError> {
        lookup(var).map_err(|_| ConfigError::MissingEnvVar(var.to_string()))
    };

    let or_default = |var: &str, default: &str| -> String {
        lookup(var).unwrap_or_else(|_| default.to_string())
    };

    let parse_u64 = |var: &str, default: &str| -> Result<u64, ConfigError> {
        let raw = or_default(var, default);
        raw.parse::<u64>().map_err(|e| ConfigError::InvalidEnvVar {
            var: var.to_string(),
            reason: e.to_string(),
        })
    };

    let parse_u8 = |var: &str, default: &str| -> Result<u8, ConfigError> {
        let raw = or_default(var, default);
        raw.parse::<u8>().map_err(|e| ConfigError::InvalidEnvVar {
            var: var.to_string(),
            reason: e.to_string(),
        })
    };

    let parse_usize = |var: &str, default: &str| -> Result<usize, ConfigError> {
        let raw = or_default(var, default);
        raw.parse::<usize>()
            .map_err(|e| ConfigError::InvalidEnvVar {
                var: var.to_string(),
                reason: e.to_string(),
            })
    };

    let parse_bool = |var: &str, default: &str| -> Result<bool, ConfigError> {
        match or_default(var, default).as_str() {
            "true" | "1" => Ok(true),
            "false" | "0" => Ok(false),
            other => Err(ConfigError::InvalidEnvVar {
                var: var.to_string(),
                reason: format!("expected true/false, got '{other}'"),
            }),
        }
    };

    let api_base_url = require("PICKPOINT_API_BASE_URL")?;

    let request_timeout_secs = parse_u64("PICKPOINT_REQUEST_TIMEOUT_SECS", "30")?;
    let init_timeout_secs = parse_u64("PICKPOINT_INIT_TIMEOUT_SECS", "10")?;
    let geocode_debounce_ms = parse_u64("PICKPOINT_GEOCODE_DEBOUNCE_MS", "250")?;
    let geocode_cache_capacity = parse_usize("PICKPOINT_GEOCODE_CACHE_CAPACITY", "50")?;
    let suggest_limit = parse_usize("PICKPOINT_SUGGEST_LIMIT", "5")?;
    let default_center = parse_center(
        "PICKPOINT_DEFAULT_CENTER",
        &or_default("PICKPOINT_DEFAULT_CENTER", "55.751244,37.618423"),
    )?;
    let default_zoom = parse_u8("PICKPOINT_DEFAULT_ZOOM", "12")?;
    let auto_locate = parse_bool("PICKPOINT_AUTO_LOCATE", "false")?;

    Ok(WidgetConfig {
        api_base_url,
        request_timeout_secs,
        init_timeout_secs,
        geocode_debounce_ms,
        geocode_cache_capacity,
        suggest_limit,
        default_center,
        default_zoom,
        auto_locate,
    })
}

/// Parse a `"latitude,longitude"` pair.
fn parse_center(var: &str, raw: &str) -> Result<Coordinates, ConfigError> {
    let invalid = |reason: &str| ConfigError::InvalidEnvVar {
        var: var.to_string(),
        reason: reason.to_string(),
    };

    let (lat, lon) = raw
        .split_once(',')
        .ok_or_else(|| invalid("expected 'latitude,longitude'"))?;
    let latitude = lat
        .trim()
        .parse::<f64>()
        .map_err(|e| invalid(&e.to_string()))?;
    let longitude = lon
        .trim()
        .parse::<f64>()
        .map_err(|e| invalid(&e.to_string()))?;
    Ok(Coordinates::new(latitude, longitude))
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;
    use std::env::VarError;

    use super::*;

    fn lookup_from_map<'a>(
        map: &'a HashMap<&'a str, &'a str>,
    ) -> impl Fn(&str) -> Result<String, VarError> + 'a {
        move |key| {
            map.get(key)
                .map(|v| (*v).to_string())
                .ok_or(VarError::NotPresent)
        }
    }

    /// Returns a map with all required env vars populated with valid defaults.
    fn full_env<'a>() -> HashMap<&'a str, &'a str> {
        let mut m = HashMap::new();
        m.insert("PICKPOINT_API_BASE_URL", "https://api.shop.example/v1");
        m
    }

    #[test]
    fn build_widget_config_fails_without_base_url() {
        let map: HashMap<&str, &str> = HashMap::new();
        let result = build_widget_config(lookup_from_map(&map));
        assert!(
            matches!(result, Err(ConfigError::MissingEnvVar(ref v)) if v == "PICKPOINT_API_BASE_URL"),
            "expected MissingEnvVar(PICKPOINT_API_BASE_URL), got: {result:?}"
        );
    }

    #[test]
    fn build_widget_config_succeeds_with_defaults() {
        let map = full_env();
        let cfg = build_widget_config(lookup_from_map(&map)).unwrap();
        assert_eq!(cfg.api_base_url, "https://api.shop.example/v1");
        assert_eq!(cfg.request_timeout_secs, 30);
        assert_eq!(cfg.init_timeout_secs, 10);
        assert_eq!(cfg.geocode_debounce_ms, 250);
        assert_eq!(cfg.geocode_cache_capacity, 50);
        assert_eq!(cfg.suggest_limit, 5);
        assert_eq!(cfg.default_zoom, 12);
        assert!(!cfg.auto_locate);
        assert!((cfg.default_center.latitude - 55.751_244).abs() < 1e-9);
    }

    #[test]
    fn debounce_override_is_applied() {
        let mut map = full_env();
        map.insert("PICKPOINT_GEOCODE_DEBOUNCE_MS", "400");
        let cfg = build_widget_config(lookup_from_map(&map)).unwrap();
        assert_eq!(cfg.geocode_debounce_ms, 400);
    }

    #[test]
    fn invalid_cache_capacity_is_rejected() {
        let mut map = full_env();
        map.insert("PICKPOINT_GEOCODE_CACHE_CAPACITY", "many");
        let result = build_widget_config(lookup_from_map(&map));
        assert!(
            matches!(result, Err(ConfigError::InvalidEnvVar { ref var, .. }) if var == "PICKPOINT_GEOCODE_CACHE_CAPACITY"),
            "expected InvalidEnvVar(PICKPOINT_GEOCODE_CACHE_CAPACITY), got: {result:?}"
        );
    }

    #[test]
    fn center_parses_latitude_and_longitude() {
        let mut map = full_env();
        map.insert("PICKPOINT_DEFAULT_CENTER", "59.93, 30.31");
        let cfg = build_widget_config(lookup_from_map(&map)).unwrap();
        assert!((cfg.default_center.latitude - 59.93).abs() < 1e-9);
        assert!((cfg.default_center.longitude - 30.31).abs() < 1e-9);
    }

    #[test]
    fn center_without_comma_is_rejected() {
        let mut map = full_env();
        map.insert("PICKPOINT_DEFAULT_CENTER", "59.93 30.31");
        let result = build_widget_config(lookup_from_map(&map));
        assert!(
            matches!(result, Err(ConfigError::InvalidEnvVar { ref var, .. }) if var == "PICKPOINT_DEFAULT_CENTER"),
            "expected InvalidEnvVar(PICKPOINT_DEFAULT_CENTER), got: {result:?}"
        );
    }

    #[test]
    fn auto_locate_accepts_numeric_booleans() {
        let mut map = full_env();
        map.insert("PICKPOINT_AUTO_LOCATE", "1");
        let cfg = build_widget_config(lookup_from_map(&map)).unwrap();
        assert!(cfg.auto_locate);
    }

    #[test]
    fn auto_locate_rejects_garbage() {
        let mut map = full_env();
        map.insert("PICKPOINT_AUTO_LOCATE", "yes");
        let result = build_widget_config(lookup_from_map(&map));
        assert!(
            matches!(result, Err(ConfigError::InvalidEnvVar { ref var, .. }) if var == "PICKPOINT_AUTO_LOCATE"),
            "expected InvalidEnvVar(PICKPOINT_AUTO_LOCATE), got: {result:?}"
        );
    }
}
