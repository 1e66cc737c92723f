// Error types for ghfeed.
// Covers GitHub API failures, transport and decode errors, and cache writes.

use std::io;
use std::path::PathBuf;

use thiserror::Error;

#[derive(Error, Debug)]
pub enum FeedError {
    #[error("Error: User '{0}' not found.")]
    UserNotFound(String),

    #[error("Error: Unable to fetch data. Status code: {0}")]
    Api(u16),

    #[error("An unexpected error occurred: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("An unexpected error occurred: {0}")]
    Decode(#[from] serde_json::Error),

    #[error("Failed to write cache file {}: {source}", path.display())]
    CacheWrite {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("IO error: {0}")]
    Io(#[from] io::Error),
}

impl FeedError {
    /// Whether this error should terminate the process.
    /// Fetch failures are reported and swallowed; local I/O failures are not.
    pub fn is_fatal(&self) -> bool {
        matches!(self, FeedError::CacheWrite { .. } | FeedError::Io(_))
    }
}

pub type Result<T> = std::result::Result<T, FeedError>;
