use std::collections::HashSet;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::site::{Site, DEFAULT_ORIGIN, DEFAULT_URL_TEMPLATE};
use crate::ConfigError;

pub const DEFAULT_INDUSTRY: &str = "Other";
pub const DEFAULT_OUTPUT_FILE: &str = "stock_news.html";
pub const DEFAULT_UPDATE_INTERVAL_MINUTES: u64 = 60;
/// One week.
pub const MAX_UPDATE_INTERVAL_MINUTES: u64 = 7 * 24 * 60;

/// One watched instrument as written in the watchlist document.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TargetConfig {
    pub code: String,
    pub name: String,
    pub industry: Option<String>,
    /// Explicit list-page URL; overrides `url_template`.
    pub url: Option<String>,
}

/// The watchlist document as written on disk.
///
/// Parsed with `serde_yaml`, so the JSON spelling of the same document
/// (including the older `stocks` key) loads as well.
#[derive(Debug, Deserialize)]
pub struct WatchlistFile {
    #[serde(alias = "stocks")]
    pub targets: Vec<TargetConfig>,
    pub update_interval_minutes: Option<u64>,
    pub output_file: Option<PathBuf>,
    pub max_news_per_stock: Option<usize>,
    pub url_template: Option<String>,
    pub site_origin: Option<String>,
    pub article_prefix: Option<String>,
    #[serde(default)]
    pub strip_price_moves: bool,
}

/// A resolved, validated target.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Target {
    pub code: String,
    pub name: String,
    pub industry: String,
    pub source_url: String,
}

/// Everything a crawl cycle needs from the watchlist, with defaults applied.
#[derive(Debug, Clone)]
pub struct Watchlist {
    pub targets: Vec<Target>,
    pub update_interval_minutes: u64,
    pub output_file: PathBuf,
    pub max_news_per_stock: Option<usize>,
    pub site: Site,
    pub strip_price_moves: bool,
}

/// Whether `code` is usable as a target code.
///
/// Codes name shard files on disk, so only ASCII letters, digits, `_` and
/// `-` are accepted.
#[must_use]
pub fn is_valid_code(code: &str) -> bool {
    !code.is_empty()
        && code
            .bytes()
            .all(|b| b.is_ascii_alphanumeric() || b == b'_' || b == b'-')
}

/// Load and validate the watchlist from a YAML or JSON file.
///
/// # Errors
///
/// Returns `ConfigError` if the file cannot be read, parsed, or fails validation.
pub fn load_watchlist(path: &Path) -> Result<Watchlist, ConfigError> {
    let content = std::fs::read_to_string(path).map_err(|e| ConfigError::FileIo {
        path: path.display().to_string(),
        source: e,
    })?;

    let file: WatchlistFile = serde_yaml::from_str(&content).map_err(|e| ConfigError::FileParse {
        path: path.display().to_string(),
        source: e,
    })?;

    resolve_watchlist(file)
}

/// Apply defaults and validate a parsed watchlist document.
///
/// # Errors
///
/// Returns [`ConfigError::Validation`] for an empty target list, a blank,
/// duplicate or non-filename-safe code, a blank name, an interval outside
/// `1..=MAX_UPDATE_INTERVAL_MINUTES`, or a URL template without a `{code}`
/// placeholder.
pub fn resolve_watchlist(file: WatchlistFile) -> Result<Watchlist, ConfigError> {
    if file.targets.is_empty() {
        return Err(ConfigError::Validation(
            "watchlist must contain at least one target".to_string(),
        ));
    }

    let update_interval_minutes = file
        .update_interval_minutes
        .unwrap_or(DEFAULT_UPDATE_INTERVAL_MINUTES);
    if update_interval_minutes == 0 {
        return Err(ConfigError::Validation(
            "update_interval_minutes must be at least 1".to_string(),
        ));
    }
    if update_interval_minutes > MAX_UPDATE_INTERVAL_MINUTES {
        return Err(ConfigError::Validation(format!(
            "update_interval_minutes must be at most {MAX_UPDATE_INTERVAL_MINUTES}, got {update_interval_minutes}"
        )));
    }

    let url_template = file
        .url_template
        .unwrap_or_else(|| DEFAULT_URL_TEMPLATE.to_string());
    if !url_template.contains("{code}") {
        return Err(ConfigError::Validation(format!(
            "url_template '{url_template}' has no {{code}} placeholder"
        )));
    }

    let site = Site::new(
        file.site_origin.as_deref().unwrap_or(DEFAULT_ORIGIN),
        file.article_prefix.as_deref(),
    );

    let mut seen_codes = HashSet::new();
    let mut targets = Vec::with_capacity(file.targets.len());

    for raw in file.targets {
        let code = raw.code.trim().to_string();
        if code.is_empty() {
            return Err(ConfigError::Validation(
                "target code must be non-empty".to_string(),
            ));
        }
        if !is_valid_code(&code) {
            return Err(ConfigError::Validation(format!(
                "target code '{code}' may only contain ASCII letters, digits, '_' and '-'"
            )));
        }
        if raw.name.trim().is_empty() {
            return Err(ConfigError::Validation(format!(
                "target '{code}' has an empty name"
            )));
        }
        if !seen_codes.insert(code.clone()) {
            return Err(ConfigError::Validation(format!(
                "duplicate target code: '{code}'"
            )));
        }

        let source_url = raw
            .url
            .filter(|u| !u.trim().is_empty())
            .unwrap_or_else(|| url_template.replace("{code}", &code));
        let industry = raw
            .industry
            .filter(|i| !i.trim().is_empty())
            .unwrap_or_else(|| DEFAULT_INDUSTRY.to_string());

        targets.push(Target {
            code,
            name: raw.name.trim().to_string(),
            industry,
            source_url,
        });
    }

    Ok(Watchlist {
        targets,
        update_interval_minutes,
        output_file: file
            .output_file
            .unwrap_or_else(|| PathBuf::from(DEFAULT_OUTPUT_FILE)),
        max_news_per_stock: file.max_news_per_stock,
        site,
        strip_price_moves: file.strip_price_moves,
    })
}

#[cfg(test)]
#[path = "watchlist_test.rs"]
mod tests;
