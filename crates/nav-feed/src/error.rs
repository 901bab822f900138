//! Error types for nav-feed.

use nav_core::NavError;
use thiserror::Error;

/// Errors raised while loading, delivering or recording snapshots.
#[derive(Debug, Error)]
pub enum FeedError {
    #[error("snapshot feed parse error: {0}")]
    Parse(String),

    #[error("invalid snapshot on line {line}: {source}")]
    Snapshot {
        line:   u64,
        #[source]
        source: NavError,
    },

    #[error("navigation error: {0}")]
    Nav(#[from] NavError),

    #[error("snapshot consumer has shut down")]
    Disconnected,

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Alias for `Result<T, FeedError>`.
pub type FeedResult<T> = Result<T, FeedError>;
