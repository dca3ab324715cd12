//! Per-target shards derived from the corpus.

use std::cmp::Ordering;
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use stockwatch_core::{is_valid_code, NewsRecord, Site, TitleFilter};

use crate::corpus::Corpus;
use crate::error::PersistenceError;
use crate::json_file::{read_json, write_json};

/// Target code → that target's visible records, newest first.
pub type Shards = BTreeMap<String, Vec<NewsRecord>>;

/// Outcome of one [`partition_and_save`] pass.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct PartitionSummary {
    pub shards: usize,
    pub shards_written: usize,
    pub shards_failed: usize,
    pub corpus_saved: bool,
}

/// Group the corpus by target code, dropping records that fail the article
/// prefix rule or the title filter.
///
/// Records whose code is not [`is_valid_code`] are skipped entirely, since
/// the code becomes a shard file name. Every other code present in the
/// corpus gets an entry, possibly empty, so a
/// shard whose records were all filtered out is rewritten as empty rather
/// than left stale.
///
/// Each shard is sorted by `pub_time` descending as a plain string
/// comparison. Ties fall back to `fetch_time` descending, then id.
#[must_use]
pub fn partition(corpus: &Corpus, site: &Site, filter: &TitleFilter) -> Shards {
    let mut shards = Shards::new();

    for record in corpus.records() {
        if !is_valid_code(&record.target_code) {
            tracing::warn!(
                id = %record.id,
                code = %record.target_code,
                "excluded from shards: code is not a safe file name"
            );
            continue;
        }
        let shard = shards.entry(record.target_code.clone()).or_default();
        if !site.is_article_url(&record.url) {
            tracing::debug!(id = %record.id, url = %record.url, "excluded from shard: not an article url");
            continue;
        }
        if let Some(rule) = filter.matched_rule(&record.title) {
            tracing::debug!(id = %record.id, rule, "excluded from shard: title filtered");
            continue;
        }
        shard.push(record.clone());
    }

    for records in shards.values_mut() {
        records.sort_by(newest_first);
    }
    shards
}

fn newest_first(a: &NewsRecord, b: &NewsRecord) -> Ordering {
    b.pub_time
        .cmp(&a.pub_time)
        .then_with(|| b.fetch_time.cmp(&a.fetch_time))
        .then_with(|| a.id.cmp(&b.id))
}

#[must_use]
pub fn shard_path(dir: &Path, code: &str) -> PathBuf {
    dir.join(format!("{code}.json"))
}

/// Write every shard to `<dir>/<code>.json`. A failing shard is logged and
/// does not stop the rest. Returns the number of failures.
pub fn save_shards(dir: &Path, shards: &Shards) -> usize {
    let mut failed = 0;
    for (code, records) in shards {
        let path = shard_path(dir, code);
        match write_json(&path, records) {
            Ok(()) => {
                tracing::debug!(target = %code, count = records.len(), path = %path.display(), "shard saved");
            }
            Err(e) => {
                tracing::error!(target = %code, error = %e, "failed to save shard");
                failed += 1;
            }
        }
    }
    failed
}

/// Read one target's shard. An absent shard is empty.
///
/// # Errors
///
/// Returns [`PersistenceError`] if the shard exists but cannot be read or decoded.
pub fn load_shard(dir: &Path, code: &str) -> Result<Vec<NewsRecord>, PersistenceError> {
    Ok(read_json(&shard_path(dir, code))?.unwrap_or_default())
}

/// Re-derive every shard from `corpus`, write them, then write the corpus.
///
/// Nothing here aborts: each file failure is logged and counted in the
/// returned summary.
pub fn partition_and_save(
    corpus: &Corpus,
    site: &Site,
    filter: &TitleFilter,
    corpus_path: &Path,
    shard_dir: &Path,
) -> PartitionSummary {
    let shards = partition(corpus, site, filter);
    let shards_failed = save_shards(shard_dir, &shards);

    let corpus_saved = match corpus.save(corpus_path) {
        Ok(()) => true,
        Err(e) => {
            tracing::error!(error = %e, "failed to save corpus");
            false
        }
    };

    let summary = PartitionSummary {
        shards: shards.len(),
        shards_written: shards.len() - shards_failed,
        shards_failed,
        corpus_saved,
    };
    tracing::info!(
        shards = summary.shards,
        written = summary.shards_written,
        failed = summary.shards_failed,
        corpus_saved,
        "partition pass finished"
    );
    summary
}

#[cfg(test)]
#[path = "shards_test.rs"]
mod tests;
