use std::path::PathBuf;

use crate::app_config::AppConfig;
use crate::ConfigError;

/// Desktop Chrome identification. The forum serves a reduced page to
/// unrecognised agents.
pub const DEFAULT_USER_AGENT: &str = "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/124.0.0.0 Safari/537.36";

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
/// Decoupled from the real environment so tests can drive it with a `HashMap`.
fn build_app_config<F>(lookup: F) -> Result<AppConfig, ConfigError>
where
    F: Fn(&str) -> Result<String, std::env::VarError>,
{
    let or_default = |var: &str, default: &str| -> String {
        lookup(var).unwrap_or_else(|_| default.to_string())
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

    let config_path = PathBuf::from(or_default("STOCKWATCH_CONFIG_PATH", "./config.yaml"));
    let filter_path = PathBuf::from(or_default(
        "STOCKWATCH_FILTER_PATH",
        "./filter_keywords.yaml",
    ));
    let data_file = PathBuf::from(or_default("STOCKWATCH_DATA_FILE", "./news_data.json"));
    let shard_dir = PathBuf::from(or_default("STOCKWATCH_SHARD_DIR", "./stock_data"));
    let log_level = or_default("STOCKWATCH_LOG_LEVEL", "info");

    let request_timeout_secs = parse_u64("STOCKWATCH_REQUEST_TIMEOUT_SECS", "30")?;
    if request_timeout_secs == 0 {
        return Err(ConfigError::InvalidEnvVar {
            var: "STOCKWATCH_REQUEST_TIMEOUT_SECS".to_string(),
            reason: "timeout must be at least 1 second".to_string(),
        });
    }
    let request_delay_secs = parse_u64("STOCKWATCH_REQUEST_DELAY_SECS", "2")?;
    let user_agent = or_default("STOCKWATCH_USER_AGENT", DEFAULT_USER_AGENT);
    let debug_page_path = lookup("STOCKWATCH_DEBUG_PAGE_PATH")
        .ok()
        .filter(|p| !p.trim().is_empty())
        .map(PathBuf::from);

    Ok(AppConfig {
        config_path,
        filter_path,
        data_file,
        shard_dir,
        log_level,
        request_timeout_secs,
        request_delay_secs,
        user_agent,
        debug_page_path,
    })
}

#[cfg(test)]
#[path = "config_test.rs"]
mod tests;
