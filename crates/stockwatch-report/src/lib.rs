//! Static HTML report over the per-target shards.

mod escape;
pub mod render;

use std::path::Path;

use stockwatch_core::Watchlist;
use stockwatch_store::{load_shard, Shards};
use thiserror::Error;

pub use render::{render_report, ITEMS_PER_PAGE};

#[derive(Debug, Error)]
pub enum ReportError {
    #[error("failed to write report {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },
}

/// Read the shard of every watchlist target from `shard_dir`.
///
/// Absent shards are empty. An unreadable shard is logged and also treated
/// as empty so one bad file never blocks the report.
#[must_use]
pub fn load_shards_for(watchlist: &Watchlist, shard_dir: &Path) -> Shards {
    let mut shards = Shards::new();
    for target in &watchlist.targets {
        let records = match load_shard(shard_dir, &target.code) {
            Ok(records) => records,
            Err(e) => {
                tracing::error!(target = %target.code, error = %e, "failed to read shard; rendering as empty");
                Vec::new()
            }
        };
        shards.insert(target.code.clone(), records);
    }
    shards
}

/// Write rendered report markup to `path`.
///
/// # Errors
///
/// Returns [`ReportError::Io`] if the parent directory or the file cannot be written.
pub fn write_report(path: &Path, html: &str) -> Result<(), ReportError> {
    let io_error = |source| ReportError::Io {
        path: path.display().to_string(),
        source,
    };
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent).map_err(io_error)?;
    }
    std::fs::write(path, html).map_err(io_error)?;
    tracing::info!(path = %path.display(), bytes = html.len(), "report written");
    Ok(())
}

/// Load shards, render, and write the report to the watchlist's `output_file`.
///
/// # Errors
///
/// Returns [`ReportError`] if the report file cannot be written.
pub fn generate_report(
    watchlist: &Watchlist,
    shard_dir: &Path,
    generated_at: &str,
) -> Result<(), ReportError> {
    let shards = load_shards_for(watchlist, shard_dir);
    let html = render_report(watchlist, &shards, generated_at);
    write_report(&watchlist.output_file, &html)
}
