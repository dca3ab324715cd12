use thiserror::Error;

/// A target's list page could not be retrieved. The caller drops that
/// target's batch for the cycle.
#[derive(Debug, Error)]
pub enum FetchError {
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("unexpected HTTP status {status} from {url}")]
    UnexpectedStatus { status: u16, url: String },
}

/// One fragment could not be turned into a record. The fragment is skipped;
/// the rest of the batch continues.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ParseError {
    #[error("no anchor with a non-empty title")]
    MissingTitle,

    #[error("anchor for \"{title}\" has no href")]
    MissingUrl { title: String },

    #[error("not an article url: {url}")]
    NotArticle { url: String },

    #[error("no publish time for \"{title}\"")]
    MissingPubTime { title: String },

    #[error("title is empty after removing price moves")]
    EmptyAfterCleaning,
}
