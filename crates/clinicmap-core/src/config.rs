use crate::app_config::{AppConfig, Environment, GeocoderConfig};
use crate::ConfigError;

/// Load application configuration from environment variables.
///
/// Calls `dotenvy::dotenv().ok()` to load `.env` files before reading env vars.
///
/// # Errors
///
/// Returns `ConfigError` if a value is present but invalid.
pub fn load_app_config() -> Result<AppConfig, ConfigError> {
    dotenvy::dotenv().ok();
    load_app_config_from_env()
}

/// Load application configuration from environment variables already in the process.
///
/// Unlike [`load_app_config`], this does NOT load `.env` files.
///
/// # Errors
///
/// Returns `ConfigError` if a value is present but invalid.
pub fn load_app_config_from_env() -> Result<AppConfig, ConfigError> {
    build_app_config(|key| std::env::var(key))
}

/// Build application configuration using the provided env-var lookup function.
///
/// Decoupled from the real environment so it can be tested with a plain
/// `HashMap` lookup.
fn build_app_config<F>(lookup: F) -> Result<AppConfig, ConfigError>
where
    F: Fn(&str) -> Result<String, std::env::VarError>,
{
    use std::net::SocketAddr;
    use std::path::PathBuf;

    let or_default = |var: &str, default: &str| -> String {
        lookup(var).unwrap_or_else(|_| default.to_string())
    };

    let invalid = |var: &str, reason: String| ConfigError::InvalidEnvVar {
        var: var.to_string(),
        reason,
    };

    let parse_addr = |var: &str, default: &str| -> Result<SocketAddr, ConfigError> {
        or_default(var, default)
            .parse::<SocketAddr>()
            .map_err(|e| invalid(var, e.to_string()))
    };

    let parse_u64 = |var: &str, default: &str| -> Result<u64, ConfigError> {
        or_default(var, default)
            .parse::<u64>()
            .map_err(|e| invalid(var, e.to_string()))
    };

    let parse_usize = |var: &str, default: &str| -> Result<usize, ConfigError> {
        or_default(var, default)
            .parse::<usize>()
            .map_err(|e| invalid(var, e.to_string()))
    };

    let env = parse_environment(&or_default("CLINICMAP_ENV", "development"))?;
    let bind_addr = parse_addr("CLINICMAP_BIND_ADDR", "0.0.0.0:3000")?;
    let log_level = or_default("CLINICMAP_LOG_LEVEL", "info");
    let clinics_path = PathBuf::from(or_default(
        "CLINICMAP_CLINICS_PATH",
        "./config/clinics.yaml",
    ));

    let page_size = parse_usize("CLINICMAP_PAGE_SIZE", "12")?;
    if page_size == 0 {
        return Err(invalid("CLINICMAP_PAGE_SIZE", "must be at least 1".to_string()));
    }

    // A blank token is treated the same as a missing one.
    let access_token = lookup("MAPBOX_ACCESS_TOKEN")
        .ok()
        .map(|t| t.trim().to_string())
        .filter(|t| !t.is_empty());

    let country = or_default("CLINICMAP_GEOCODER_COUNTRY", "us").to_lowercase();
    if country.len() != 2 || !country.chars().all(|c| c.is_ascii_alphabetic()) {
        return Err(invalid(
            "CLINICMAP_GEOCODER_COUNTRY",
            format!("expected a two-letter country code, got '{country}'"),
        ));
    }

    let geocoder = GeocoderConfig {
        access_token,
        base_url: or_default("CLINICMAP_GEOCODER_BASE_URL", "https://api.mapbox.com"),
        country,
        request_timeout_secs: parse_u64("CLINICMAP_GEOCODER_TIMEOUT_SECS", "10")?,
        inter_request_delay_ms: parse_u64("CLINICMAP_GEOCODER_DELAY_MS", "100")?,
    };

    Ok(AppConfig {
        env,
        bind_addr,
        log_level,
        clinics_path,
        page_size,
        geocoder,
    })
}

fn parse_environment(s: &str) -> Result<Environment, ConfigError> {
    match s {
        "development" => Ok(Environment::Development),
        "test" => Ok(Environment::Test),
        "production" => Ok(Environment::Production),
        other => Err(ConfigError::InvalidEnvVar {
            var: "CLINICMAP_ENV".to_string(),
            reason: format!("unknown environment '{other}'"),
        }),
    }
}

#[cfg(test)]
#[path = "config_test.rs"]
mod tests;
