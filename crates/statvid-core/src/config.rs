use crate::app_config::{AppConfig, DEFAULT_YOUTUBE_BASE_URL};
use crate::ConfigError;

/// Load application configuration from environment variables.
///
/// Calls `dotenvy::dotenv().ok()` to load `.env` files before reading env vars.
///
/// # Errors
///
/// Returns `ConfigError` if a numeric env var cannot be parsed.
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
/// Returns `ConfigError` if a numeric env var cannot be parsed.
pub fn load_app_config_from_env() -> Result<AppConfig, ConfigError> {
    build_app_config(|key| std::env::var(key))
}

/// Build application configuration using the provided env-var lookup function.
///
/// Decoupled from the real environment so tests can drive it with a
/// `HashMap` lookup instead of `set_var`/`remove_var`.
fn build_app_config<F>(lookup: F) -> Result<AppConfig, ConfigError>
where
    F: Fn(&str) -> Result<String, std::env::VarError>,
{
    use std::path::PathBuf;

    let or_default = |var: &str, default: &str| -> String {
        lookup(var).unwrap_or_else(|_| default.to_string())
    };

    let optional = |var: &str| -> Option<String> {
        lookup(var)
            .ok()
            .map(|v| v.trim().to_string())
            .filter(|v| !v.is_empty())
    };

    let parse_u32 = |var: &str, default: &str| -> Result<u32, ConfigError> {
        let raw = or_default(var, default);
        raw.trim()
            .parse::<u32>()
            .map_err(|e| ConfigError::InvalidEnvVar {
                var: var.to_string(),
                reason: e.to_string(),
            })
    };

    let parse_u64 = |var: &str, default: &str| -> Result<u64, ConfigError> {
        let raw = or_default(var, default);
        raw.trim()
            .parse::<u64>()
            .map_err(|e| ConfigError::InvalidEnvVar {
                var: var.to_string(),
                reason: e.to_string(),
            })
    };

    let youtube_api_key = optional("YOUTUBE_API_KEY");
    let data_dir = PathBuf::from(or_default("DATA_DIR", "./data"));
    let log_level = or_default("LOG_LEVEL", "INFO");
    let youtube_base_url = or_default("STATVID_YOUTUBE_BASE_URL", DEFAULT_YOUTUBE_BASE_URL);

    let request_timeout_secs = parse_u64("STATVID_REQUEST_TIMEOUT_SECS", "30")?;
    let max_retries = parse_u32("STATVID_MAX_RETRIES", "3")?;
    let retry_backoff_base_ms = parse_u64("STATVID_RETRY_BACKOFF_BASE_MS", "1500")?;
    let discovery_path = optional("STATVID_DISCOVERY_PATH").map(PathBuf::from);

    Ok(AppConfig {
        youtube_api_key,
        data_dir,
        log_level,
        youtube_base_url,
        request_timeout_secs,
        max_retries,
        retry_backoff_base_ms,
        discovery_path,
    })
}

#[cfg(test)]
#[path = "config_test.rs"]
mod tests;
