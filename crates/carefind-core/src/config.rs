use crate::app_config::{AppConfig, Environment};
use crate::ConfigError;

/// Load engine configuration from environment variables.
///
/// Calls `dotenvy::dotenv().ok()` to load `.env` files before reading env vars.
///
/// # Errors
///
/// Returns `ConfigError` if a variable is present but cannot be parsed.
pub fn load_app_config() -> Result<AppConfig, ConfigError> {
    dotenvy::dotenv().ok();
    load_app_config_from_env()
}

/// Load engine configuration from environment variables already in the process.
///
/// Unlike [`load_app_config`], this does NOT load `.env` files.
///
/// # Errors
///
/// Returns `ConfigError` if a variable is present but cannot be parsed.
pub fn load_app_config_from_env() -> Result<AppConfig, ConfigError> {
    build_app_config(|key| std::env::var(key))
}

/// Parsing/validation core, decoupled from the process environment so tests
/// can drive it with a plain `HashMap` lookup.
fn build_app_config<F>(lookup: F) -> Result<AppConfig, ConfigError>
where
    F: Fn(&str) -> Result<String, std::env::VarError>,
{
    use std::path::PathBuf;

    let or_default = |var: &str, default: &str| -> String {
        lookup(var).unwrap_or_else(|_| default.to_string())
    };

    let invalid = |var: &str, reason: String| ConfigError::InvalidEnvVar {
        var: var.to_string(),
        reason,
    };

    let parse_u32 = |var: &str, default: &str| -> Result<u32, ConfigError> {
        or_default(var, default)
            .parse::<u32>()
            .map_err(|e| invalid(var, e.to_string()))
    };

    let parse_u64 = |var: &str, default: &str| -> Result<u64, ConfigError> {
        or_default(var, default)
            .parse::<u64>()
            .map_err(|e| invalid(var, e.to_string()))
    };

    let parse_positive_usize = |var: &str, default: &str| -> Result<usize, ConfigError> {
        let value = or_default(var, default)
            .parse::<usize>()
            .map_err(|e| invalid(var, e.to_string()))?;
        if value == 0 {
            return Err(invalid(var, "must be greater than zero".to_string()));
        }
        Ok(value)
    };

    let parse_radius = |var: &str, default: &str| -> Result<f64, ConfigError> {
        let value = or_default(var, default)
            .parse::<f64>()
            .map_err(|e| invalid(var, e.to_string()))?;
        if !value.is_finite() || value <= 0.0 {
            return Err(invalid(var, "must be a positive number of meters".to_string()));
        }
        Ok(value)
    };

    let env = parse_environment(&or_default("CAREFIND_ENV", "development"))?;
    let log_level = or_default("CAREFIND_LOG_LEVEL", "info");
    let nominatim_url = or_default(
        "CAREFIND_NOMINATIM_URL",
        "https://nominatim.openstreetmap.org/search",
    );
    let overpass_url = or_default(
        "CAREFIND_OVERPASS_URL",
        "https://overpass-api.de/api/interpreter",
    );
    let user_agent = or_default("CAREFIND_USER_AGENT", "carefind/0.1 (facility-search)");

    let geocode_timeout_secs = parse_u64("CAREFIND_GEOCODE_TIMEOUT_SECS", "10")?;
    let facility_timeout_secs = parse_u64("CAREFIND_FACILITY_TIMEOUT_SECS", "25")?;
    let facility_max_retries = parse_u32("CAREFIND_FACILITY_MAX_RETRIES", "2")?;
    let facility_backoff_base_ms = parse_u64("CAREFIND_FACILITY_BACKOFF_BASE_MS", "500")?;
    let search_radius_m = parse_radius("CAREFIND_SEARCH_RADIUS_M", "5000")?;
    let suggestion_limit = parse_positive_usize("CAREFIND_SUGGESTION_LIMIT", "8")?;
    let debounce_ms = parse_u64("CAREFIND_DEBOUNCE_MS", "300")?;

    let gazetteer_path = PathBuf::from(or_default(
        "CAREFIND_GAZETTEER_PATH",
        "./config/places.yaml",
    ));
    let fallback_facilities_path = lookup("CAREFIND_FALLBACK_FACILITIES_PATH")
        .ok()
        .filter(|p| !p.trim().is_empty())
        .map(PathBuf::from);

    Ok(AppConfig {
        env,
        log_level,
        nominatim_url,
        overpass_url,
        user_agent,
        geocode_timeout_secs,
        facility_timeout_secs,
        facility_max_retries,
        facility_backoff_base_ms,
        search_radius_m,
        suggestion_limit,
        debounce_ms,
        gazetteer_path,
        fallback_facilities_path,
    })
}

fn parse_environment(s: &str) -> Result<Environment, ConfigError> {
    match s {
        "development" => Ok(Environment::Development),
        "test" => Ok(Environment::Test),
        "production" => Ok(Environment::Production),
        other => Err(ConfigError::InvalidEnvVar {
            var: "CAREFIND_ENV".to_string(),
            reason: format!("unknown environment '{other}'"),
        }),
    }
}

#[cfg(test)]
#[path = "config_test.rs"]
mod tests;
