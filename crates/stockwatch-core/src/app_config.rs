use std::path::PathBuf;

/// Process-level settings read from the environment.
///
/// The watchlist itself (targets, interval, report path) lives in the
/// document at `config_path`; this struct only says where things are and
/// how the fetcher behaves.
#[derive(Debug, Clone)]
pub struct AppConfig {
    pub config_path: PathBuf,
    pub filter_path: PathBuf,
    pub data_file: PathBuf,
    pub shard_dir: PathBuf,
    pub log_level: String,
    pub request_timeout_secs: u64,
    pub request_delay_secs: u64,
    pub user_agent: String,
    pub debug_page_path: Option<PathBuf>,
}
