//! The deduplicated, append-only record set.

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use stockwatch_core::NewsRecord;

use crate::error::PersistenceError;
use crate::json_file::{read_json, write_json};

/// All records ever accepted, keyed by [`NewsRecord::id`].
///
/// Records are only ever inserted. The first sighting of an id wins, so its
/// counters and timestamps stay frozen at that sighting.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Corpus {
    records: BTreeMap<String, NewsRecord>,
}

impl Corpus {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Load the corpus persisted at `path`.
    ///
    /// An absent file is a fresh start.
    ///
    /// # Errors
    ///
    /// Returns [`PersistenceError`] if the file exists but cannot be read or
    /// decoded. The file is left untouched.
    pub fn load(path: &Path) -> Result<Self, PersistenceError> {
        match read_json::<BTreeMap<String, NewsRecord>>(path)? {
            Some(records) => {
                tracing::info!(path = %path.display(), count = records.len(), "corpus loaded");
                Ok(Self { records })
            }
            None => {
                tracing::info!(path = %path.display(), "no corpus file; starting empty");
                Ok(Self::default())
            }
        }
    }

    /// Like [`Corpus::load`], but a file that exists and does not decode is
    /// renamed to `<name>.corrupt-<timestamp>` and an empty corpus is
    /// returned. Later saves therefore never overwrite the undecodable bytes.
    ///
    /// # Errors
    ///
    /// Returns [`PersistenceError`] if the file cannot be read or the rename
    /// fails.
    pub fn load_or_quarantine(path: &Path) -> Result<Self, PersistenceError> {
        match Self::load(path) {
            Err(e @ PersistenceError::Decode { .. }) => {
                let moved_to = quarantine(path)?;
                tracing::error!(
                    error = %e,
                    moved_to = %moved_to.display(),
                    "corpus undecodable; moved aside and starting empty"
                );
                Ok(Self::default())
            }
            other => other,
        }
    }

    /// Insert every record whose id is not yet present. Returns how many
    /// were inserted. Merging the same batch twice inserts nothing the
    /// second time.
    pub fn merge<I>(&mut self, batch: I) -> usize
    where
        I: IntoIterator<Item = NewsRecord>,
    {
        let mut inserted = 0;
        for record in batch {
            if self.records.contains_key(&record.id) {
                continue;
            }
            self.records.insert(record.id.clone(), record);
            inserted += 1;
        }
        inserted
    }

    /// Persist the full id → record map to `path`.
    ///
    /// # Errors
    ///
    /// Returns [`PersistenceError`] if the file cannot be written.
    pub fn save(&self, path: &Path) -> Result<(), PersistenceError> {
        write_json(path, &self.records)?;
        tracing::info!(path = %path.display(), count = self.records.len(), "corpus saved");
        Ok(())
    }

    #[must_use]
    pub fn get(&self, id: &str) -> Option<&NewsRecord> {
        self.records.get(id)
    }

    #[must_use]
    pub fn contains(&self, id: &str) -> bool {
        self.records.contains_key(id)
    }

    pub fn records(&self) -> impl Iterator<Item = &NewsRecord> {
        self.records.values()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.records.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}

/// Rename `path` to a timestamped `.corrupt-` sibling and return the new path.
fn quarantine(path: &Path) -> Result<PathBuf, PersistenceError> {
    let mut name = path.file_name().unwrap_or_default().to_os_string();
    name.push(format!(".corrupt-{}", chrono::Local::now().format("%Y%m%d%H%M%S")));
    let target = path.with_file_name(name);
    std::fs::rename(path, &target).map_err(|e| PersistenceError::Io {
        path: path.display().to_string(),
        source: e,
    })?;
    Ok(target)
}

#[cfg(test)]
#[path = "corpus_test.rs"]
mod tests;
