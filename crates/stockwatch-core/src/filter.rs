//! Title exclusion rules.

use std::path::Path;

use serde::Deserialize;

use crate::ConfigError;

/// Case-sensitive substring blocklist for post titles.
///
/// The same instance is consulted at extraction time and again whenever the
/// corpus is re-partitioned, so a rule added later also hides records that
/// were persisted before it existed.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TitleFilter {
    rules: Vec<String>,
}

#[derive(Debug, Deserialize)]
struct FilterFile {
    #[serde(default)]
    filter_keywords: Vec<String>,
}

impl TitleFilter {
    /// Empty rules are dropped: an empty substring would match every title.
    #[must_use]
    pub fn new<I, S>(rules: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            rules: rules
                .into_iter()
                .map(Into::into)
                .filter(|r: &String| !r.is_empty())
                .collect(),
        }
    }

    /// Returns the first rule contained in `title`, if any.
    #[must_use]
    pub fn matched_rule(&self, title: &str) -> Option<&str> {
        self.rules
            .iter()
            .find(|rule| title.contains(rule.as_str()))
            .map(String::as_str)
    }

    #[must_use]
    pub fn rejects(&self, title: &str) -> bool {
        self.matched_rule(title).is_some()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.rules.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }
}

/// Load the filter document at `path`.
///
/// A missing file is not an error: the filter degrades to an empty rule set.
///
/// # Errors
///
/// Returns `ConfigError` if the file exists but cannot be read or parsed.
pub fn load_filter(path: &Path) -> Result<TitleFilter, ConfigError> {
    if !path.exists() {
        tracing::warn!(
            path = %path.display(),
            "filter file not found; continuing with no title filters"
        );
        return Ok(TitleFilter::default());
    }

    let content = std::fs::read_to_string(path).map_err(|e| ConfigError::FileIo {
        path: path.display().to_string(),
        source: e,
    })?;

    let file: FilterFile = serde_yaml::from_str(&content).map_err(|e| ConfigError::FileParse {
        path: path.display().to_string(),
        source: e,
    })?;

    let filter = TitleFilter::new(file.filter_keywords);
    tracing::info!(count = filter.len(), "title filters loaded");
    Ok(filter)
}
