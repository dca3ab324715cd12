//! Handlers for the one-shot subcommands.

use stockwatch_core::news::now_fetch_time;
use stockwatch_core::AppConfig;
use stockwatch_store::{partition_and_save, Corpus};

use crate::cycle::{run_cycle, CrawlContext};

/// Run a single crawl cycle and exit.
///
/// # Errors
///
/// Returns an error if startup configuration cannot be loaded.
pub(crate) async fn crawl_once(config: AppConfig) -> anyhow::Result<()> {
    let mut ctx = CrawlContext::load(config)?;
    let summary = run_cycle(&mut ctx).await;
    println!(
        "crawl finished: {} new records ({} targets fetched, {} failed)",
        summary.new_records, summary.targets_fetched, summary.targets_failed
    );
    Ok(())
}

/// Reload the corpus and rewrite every shard using the current filter rules.
///
/// # Errors
///
/// Returns an error if the watchlist or filter document cannot be loaded, or
/// if the corpus file exists but cannot be read or decoded. Nothing is
/// written in that case.
pub(crate) fn repartition(config: &AppConfig) -> anyhow::Result<()> {
    let watchlist = stockwatch_core::load_watchlist(&config.config_path)?;
    let filter = stockwatch_core::load_filter(&config.filter_path)?;
    let corpus = Corpus::load(&config.data_file)?;

    let summary = partition_and_save(
        &corpus,
        &watchlist.site,
        &filter,
        &config.data_file,
        &config.shard_dir,
    );
    println!(
        "partitioned {} records into {} shards ({} failed)",
        corpus.len(),
        summary.shards,
        summary.shards_failed
    );
    Ok(())
}

/// Render the report from the shards currently on disk.
///
/// # Errors
///
/// Returns an error if the watchlist cannot be loaded or the report cannot be written.
pub(crate) fn rerender(config: &AppConfig) -> anyhow::Result<()> {
    let watchlist = stockwatch_core::load_watchlist(&config.config_path)?;
    stockwatch_report::generate_report(&watchlist, &config.shard_dir, &now_fetch_time())?;
    println!("report written to {}", watchlist.output_file.display());
    Ok(())
}

#[cfg(test)]
#[path = "commands_test.rs"]
mod tests;
