//! Shared domain types and configuration for stockwatch.
//!
//! Holds the watched [`Target`] list, the persisted [`NewsRecord`] shape, the
//! [`TitleFilter`] rule set and the process-level [`AppConfig`]. Nothing in
//! this crate performs network I/O.

pub mod app_config;
pub mod config;
pub mod filter;
pub mod news;
pub mod site;
pub mod watchlist;

use thiserror::Error;

pub use app_config::AppConfig;
pub use config::{load_app_config, load_app_config_from_env};
pub use filter::{load_filter, TitleFilter};
pub use news::{compute_id, NewsRecord};
pub use site::Site;
pub use watchlist::{is_valid_code, load_watchlist, Target, Watchlist};

/// Fatal startup errors. Any of these aborts the process before the first cycle.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("invalid value for {var}: {reason}")]
    InvalidEnvVar { var: String, reason: String },

    #[error("failed to read {path}: {source}")]
    FileIo {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse {path}: {source}")]
    FileParse {
        path: String,
        #[source]
        source: serde_yaml::Error,
    },

    #[error("config validation failed: {0}")]
    Validation(String),
}
