use std::collections::HashMap;
use std::env::VarError;
use std::path::Path;

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

#[test]
fn build_app_config_uses_defaults_for_empty_env() {
    let map: HashMap<&str, &str> = HashMap::new();
    let cfg = build_app_config(lookup_from_map(&map)).unwrap();
    assert_eq!(cfg.config_path, Path::new("./config.yaml"));
    assert_eq!(cfg.filter_path, Path::new("./filter_keywords.yaml"));
    assert_eq!(cfg.data_file, Path::new("./news_data.json"));
    assert_eq!(cfg.shard_dir, Path::new("./stock_data"));
    assert_eq!(cfg.log_level, "info");
    assert_eq!(cfg.request_timeout_secs, 30);
    assert_eq!(cfg.request_delay_secs, 2);
    assert_eq!(cfg.user_agent, DEFAULT_USER_AGENT);
    assert!(cfg.debug_page_path.is_none());
}

#[test]
fn build_app_config_reads_overrides() {
    let mut map = HashMap::new();
    map.insert("STOCKWATCH_CONFIG_PATH", "/etc/stockwatch/config.json");
    map.insert("STOCKWATCH_SHARD_DIR", "/var/lib/stockwatch/shards");
    map.insert("STOCKWATCH_REQUEST_DELAY_SECS", "0");
    map.insert("STOCKWATCH_USER_AGENT", "custom-agent/2.0");
    map.insert("STOCKWATCH_DEBUG_PAGE_PATH", "debug_page.html");
    let cfg = build_app_config(lookup_from_map(&map)).unwrap();
    assert_eq!(cfg.config_path, Path::new("/etc/stockwatch/config.json"));
    assert_eq!(cfg.shard_dir, Path::new("/var/lib/stockwatch/shards"));
    assert_eq!(cfg.request_delay_secs, 0);
    assert_eq!(cfg.user_agent, "custom-agent/2.0");
    assert_eq!(
        cfg.debug_page_path.as_deref(),
        Some(Path::new("debug_page.html"))
    );
}

#[test]
fn blank_debug_page_path_is_treated_as_unset() {
    let mut map = HashMap::new();
    map.insert("STOCKWATCH_DEBUG_PAGE_PATH", "  ");
    let cfg = build_app_config(lookup_from_map(&map)).unwrap();
    assert!(cfg.debug_page_path.is_none());
}

#[test]
fn request_timeout_secs_invalid() {
    let mut map = HashMap::new();
    map.insert("STOCKWATCH_REQUEST_TIMEOUT_SECS", "not-a-number");
    let result = build_app_config(lookup_from_map(&map));
    assert!(
        matches!(result, Err(ConfigError::InvalidEnvVar { ref var, .. }) if var == "STOCKWATCH_REQUEST_TIMEOUT_SECS"),
        "expected InvalidEnvVar(STOCKWATCH_REQUEST_TIMEOUT_SECS), got: {result:?}"
    );
}

#[test]
fn request_timeout_secs_zero_is_rejected() {
    let mut map = HashMap::new();
    map.insert("STOCKWATCH_REQUEST_TIMEOUT_SECS", "0");
    let result = build_app_config(lookup_from_map(&map));
    assert!(
        matches!(result, Err(ConfigError::InvalidEnvVar { ref var, .. }) if var == "STOCKWATCH_REQUEST_TIMEOUT_SECS"),
        "expected InvalidEnvVar(STOCKWATCH_REQUEST_TIMEOUT_SECS), got: {result:?}"
    );
}

#[test]
fn request_delay_secs_invalid() {
    let mut map = HashMap::new();
    map.insert("STOCKWATCH_REQUEST_DELAY_SECS", "-1");
    let result = build_app_config(lookup_from_map(&map));
    assert!(
        matches!(result, Err(ConfigError::InvalidEnvVar { ref var, .. }) if var == "STOCKWATCH_REQUEST_DELAY_SECS"),
        "expected InvalidEnvVar(STOCKWATCH_REQUEST_DELAY_SECS), got: {result:?}"
    );
}
