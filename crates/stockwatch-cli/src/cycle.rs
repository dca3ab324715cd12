//! One crawl cycle: fetch every target, extract, merge, persist, report.
//!
//! Targets are processed strictly in order with a fixed pause after every
//! fetch. A failing target only loses its own batch. Files are rewritten
//! only when the cycle added at least one record to the corpus.

use std::path::Path;
use std::time::{Duration, Instant};

use stockwatch_core::news::now_fetch_time;
use stockwatch_core::{AppConfig, TitleFilter, Watchlist};
use stockwatch_scraper::{extract_records, ExtractOptions, PageClient};
use stockwatch_store::{partition_and_save, Corpus};

/// Everything a cycle reads or mutates, built once at startup.
#[derive(Debug)]
pub(crate) struct CrawlContext {
    pub config: AppConfig,
    pub watchlist: Watchlist,
    pub filter: TitleFilter,
    pub client: PageClient,
    pub corpus: Corpus,
}

impl CrawlContext {
    /// Load the watchlist, filter rules and persisted corpus named by `config`.
    ///
    /// # Errors
    ///
    /// Returns an error if the watchlist or filter document is invalid, the
    /// HTTP client cannot be built, or the corpus file cannot be read. An
    /// undecodable corpus file is moved aside rather than treated as fatal.
    pub(crate) fn load(config: AppConfig) -> anyhow::Result<Self> {
        let watchlist = stockwatch_core::load_watchlist(&config.config_path)?;
        let filter = stockwatch_core::load_filter(&config.filter_path)?;
        let client = PageClient::new(config.request_timeout_secs, &config.user_agent)
            .map_err(|e| anyhow::anyhow!("failed to build page client: {e}"))?;
        let corpus = Corpus::load_or_quarantine(&config.data_file)?;

        tracing::info!(
            targets = watchlist.targets.len(),
            filters = filter.len(),
            corpus = corpus.len(),
            interval_minutes = watchlist.update_interval_minutes,
            "crawl context ready"
        );

        Ok(Self {
            config,
            watchlist,
            filter,
            client,
            corpus,
        })
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub(crate) struct CycleSummary {
    pub targets_fetched: usize,
    pub targets_failed: usize,
    pub new_records: usize,
}

pub(crate) async fn run_cycle(ctx: &mut CrawlContext) -> CycleSummary {
    let started = Instant::now();
    let delay = Duration::from_secs(ctx.config.request_delay_secs);
    tracing::info!(targets = ctx.watchlist.targets.len(), "crawl cycle starting");

    let mut summary = CycleSummary::default();
    let mut batch = Vec::new();

    for target in &ctx.watchlist.targets {
        tracing::info!(target = %target.code, name = %target.name, url = %target.source_url, "fetching");
        match ctx.client.fetch_page(&target.source_url).await {
            Ok(body) => {
                summary.targets_fetched += 1;
                if let Some(path) = &ctx.config.debug_page_path {
                    write_debug_page(path, &body).await;
                }

                let fetch_time = now_fetch_time();
                let opts = ExtractOptions {
                    site: &ctx.watchlist.site,
                    filter: &ctx.filter,
                    strip_price_moves: ctx.watchlist.strip_price_moves,
                    fetch_time: &fetch_time,
                };
                let extraction = extract_records(&body, target, &opts);
                batch.extend(extraction.records);
            }
            Err(e) => {
                summary.targets_failed += 1;
                tracing::error!(target = %target.code, error = %e, "fetch failed; skipping target this cycle");
            }
        }

        if !delay.is_zero() {
            tokio::time::sleep(delay).await;
        }
    }

    let batch_len = batch.len();
    summary.new_records = ctx.corpus.merge(batch);
    tracing::info!(
        extracted = batch_len,
        new = summary.new_records,
        corpus = ctx.corpus.len(),
        "batch merged"
    );

    if summary.new_records == 0 {
        tracing::info!("no new records; corpus, shards and report left untouched");
    } else {
        persist_and_report(ctx);
    }

    tracing::info!(
        fetched = summary.targets_fetched,
        failed = summary.targets_failed,
        new = summary.new_records,
        elapsed_ms = u64::try_from(started.elapsed().as_millis()).unwrap_or(u64::MAX),
        "crawl cycle finished"
    );
    summary
}

fn persist_and_report(ctx: &CrawlContext) {
    partition_and_save(
        &ctx.corpus,
        &ctx.watchlist.site,
        &ctx.filter,
        &ctx.config.data_file,
        &ctx.config.shard_dir,
    );

    if let Err(e) =
        stockwatch_report::generate_report(&ctx.watchlist, &ctx.config.shard_dir, &now_fetch_time())
    {
        tracing::error!(error = %e, "failed to write report");
    }
}

async fn write_debug_page(path: &Path, body: &str) {
    match tokio::fs::write(path, body).await {
        Ok(()) => tracing::debug!(path = %path.display(), "saved fetched page"),
        Err(e) => tracing::warn!(path = %path.display(), error = %e, "failed to save fetched page"),
    }
}

#[cfg(test)]
#[path = "cycle_test.rs"]
mod tests;
