// Activity fetcher.
// Serves a user's feed from the cache when fresh, otherwise from the API.

use chrono::{DateTime, Utc};
use log::info;

use crate::cache::CacheStore;
use crate::error::Result;
use crate::github::{Event, EventSource};

/// Where a feed was read from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Origin {
    Cache,
    Network,
}

impl Origin {
    /// Progress note shown before the feed.
    pub fn notice(&self) -> &'static str {
        match self {
            Origin::Cache => "Fetching data from cache...",
            Origin::Network => "Fetching data from GitHub API...",
        }
    }
}

/// A fetched feed.
#[derive(Debug, Clone)]
pub struct Activity {
    pub events: Vec<Event>,
    pub origin: Origin,
}

/// Cache-first feed fetcher.
pub struct ActivityFetcher<S> {
    source: S,
    cache: CacheStore,
}

impl<S: EventSource> ActivityFetcher<S> {
    pub fn new(source: S, cache: CacheStore) -> Self {
        Self { source, cache }
    }

    /// Fetch a user's activity as of now.
    pub async fn fetch(&mut self, username: &str) -> Result<Activity> {
        self.fetch_at(username, Utc::now()).await
    }

    /// Fetch a user's activity, judging cache freshness against `now`.
    /// A successful network fetch is always cached, even when empty.
    pub async fn fetch_at(&mut self, username: &str, now: DateTime<Utc>) -> Result<Activity> {
        if let Some(entry) = self.cache.load(username) {
            if self.cache.is_fresh(&entry, now) {
                info!("serving {} from cache", username);
                return Ok(Activity {
                    events: entry.events.iter().map(Event::from_raw).collect(),
                    origin: Origin::Cache,
                });
            }
        }

        info!("requesting {} from GitHub API", username);
        let raw = self.source.user_events(username).await?;
        self.cache.save(username, &raw, now)?;

        Ok(Activity {
            events: raw.iter().map(Event::from_raw).collect(),
            origin: Origin::Network,
        })
    }
}
