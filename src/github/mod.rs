// GitHub API module.
// Provides the client, the event feed endpoint, and typed event views.

pub mod client;
pub mod endpoints;
pub mod types;

use serde_json::Value;

use crate::error::Result;

pub use client::{DEFAULT_TIMEOUT, GitHubClient};
pub use types::{Event, EventKind};

/// Anything that can produce a user's raw event feed.
pub trait EventSource {
    /// Fetch the raw event objects for `username`, most recent first.
    async fn user_events(&mut self, username: &str) -> Result<Vec<Value>>;
}
