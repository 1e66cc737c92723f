// Cache store for a user's activity feed.
// Handles JSON serialization, TTL checking, and filesystem operations.

use std::fs;
use std::io::{self, Write};
use std::path::{Path, PathBuf};
use std::time::Duration;

use chrono::{DateTime, Utc};
use log::{debug, warn};
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::error::{FeedError, Result};

use super::paths::{DEFAULT_CACHE_DIR, events_path};

/// How long a fetched feed stays fresh: 10 minutes.
pub const CACHE_TTL: Duration = Duration::from_secs(10 * 60);

/// Contents of one user's cache file.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CacheEntry {
    /// When the events were fetched.
    pub timestamp: DateTime<Utc>,
    /// Raw event objects as returned by the API.
    pub events: Vec<Value>,
}

impl CacheEntry {
    /// Check if this entry is still fresh at `now`.
    pub fn is_fresh(&self, now: DateTime<Utc>, ttl: Duration) -> bool {
        let Ok(ttl) = chrono::Duration::from_std(ttl) else {
            return false;
        };
        now.signed_duration_since(self.timestamp) < ttl
    }
}

/// Filesystem-backed cache, one JSON file per user.
#[derive(Debug, Clone)]
pub struct CacheStore {
    dir: PathBuf,
    ttl: Duration,
}

impl Default for CacheStore {
    fn default() -> Self {
        Self::new(DEFAULT_CACHE_DIR)
    }
}

impl CacheStore {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self {
            dir: dir.into(),
            ttl: CACHE_TTL,
        }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    pub fn path_for(&self, username: &str) -> PathBuf {
        events_path(&self.dir, username)
    }

    /// Load a user's cache entry.
    /// Missing, unreadable, or malformed files are all a miss.
    pub fn load(&self, username: &str) -> Option<CacheEntry> {
        let path = self.path_for(username);
        if !path.exists() {
            debug!("no cache file at {}", path.display());
            return None;
        }

        let contents = match fs::read_to_string(&path) {
            Ok(contents) => contents,
            Err(e) => {
                warn!("ignoring unreadable cache file {}: {}", path.display(), e);
                return None;
            }
        };

        match serde_json::from_str(&contents) {
            Ok(entry) => Some(entry),
            Err(e) => {
                debug!("ignoring malformed cache file {}: {}", path.display(), e);
                None
            }
        }
    }

    /// Check an entry against this store's TTL.
    pub fn is_fresh(&self, entry: &CacheEntry, now: DateTime<Utc>) -> bool {
        entry.is_fresh(now, self.ttl)
    }

    /// Write a user's events, replacing any previous entry.
    pub fn save(&self, username: &str, events: &[Value], now: DateTime<Utc>) -> Result<()> {
        let path = self.path_for(username);
        let entry = CacheEntry {
            timestamp: now,
            events: events.to_vec(),
        };

        write_entry(&path, &entry).map_err(|source| FeedError::CacheWrite {
            path: path.clone(),
            source,
        })?;
        debug!("cached {} events at {}", events.len(), path.display());
        Ok(())
    }
}

fn write_entry(path: &Path, entry: &CacheEntry) -> io::Result<()> {
    // Ensure parent directory exists
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)?;
    }

    let json = serde_json::to_string(entry).map_err(io::Error::other)?;

    // Write atomically via temp file
    let temp_path = path.with_extension("tmp");
    let mut file = fs::File::create(&temp_path)?;
    file.write_all(json.as_bytes())?;
    file.sync_all()?;
    fs::rename(&temp_path, path)?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;
    use serde_json::json;
    use tempfile::TempDir;

    fn sample_events() -> Vec<Value> {
        vec![
            json!({"type": "PushEvent", "repo": {"name": "octo/repo"}, "payload": {"commits": [{}, {}]}}),
            json!({"type": "WatchEvent", "repo": {"name": "octo/other"}, "payload": {"action": "started"}}),
        ]
    }

    #[test]
    fn test_save_and_load() {
        let temp_dir = TempDir::new().unwrap();
        let store = CacheStore::new(temp_dir.path());
        let now = Utc.with_ymd_and_hms(2024, 5, 1, 12, 0, 0).unwrap();

        store.save("octocat", &sample_events(), now).unwrap();

        let entry = store.load("octocat").unwrap();
        assert_eq!(entry.events, sample_events());
        assert_eq!(entry.timestamp, now);
    }

    #[test]
    fn test_save_creates_directory() {
        let temp_dir = TempDir::new().unwrap();
        let store = CacheStore::new(temp_dir.path().join("nested").join("cache"));

        store.save("octocat", &[], Utc::now()).unwrap();

        assert!(store.path_for("octocat").exists());
        assert!(!store.path_for("octocat").with_extension("tmp").exists());
    }

    #[test]
    fn test_save_overwrites() {
        let temp_dir = TempDir::new().unwrap();
        let store = CacheStore::new(temp_dir.path());

        store.save("octocat", &sample_events(), Utc::now()).unwrap();
        store.save("octocat", &[], Utc::now()).unwrap();

        assert!(store.load("octocat").unwrap().events.is_empty());
    }

    #[test]
    fn test_save_failure_is_fatal() {
        let temp_dir = TempDir::new().unwrap();
        let blocker = temp_dir.path().join("blocker");
        fs::write(&blocker, "not a directory").unwrap();
        let store = CacheStore::new(&blocker);

        let err = store.save("octocat", &[], Utc::now()).unwrap_err();
        assert!(err.is_fatal());
    }

    #[test]
    fn test_load_missing() {
        let temp_dir = TempDir::new().unwrap();
        let store = CacheStore::new(temp_dir.path());

        assert!(store.load("nobody").is_none());
    }

    #[test]
    fn test_load_malformed_is_miss() {
        let temp_dir = TempDir::new().unwrap();
        let store = CacheStore::new(temp_dir.path());
        let path = store.path_for("octocat");

        let cases = [
            "not json at all",
            r#"{"events": []}"#,
            r#"{"timestamp": "2024-05-01T12:00:00+00:00"}"#,
            r#"{"timestamp": "2024-05-01T12:00:00", "events": []}"#,
            r#"[1, 2, 3]"#,
        ];
        for contents in cases {
            fs::write(&path, contents).unwrap();
            assert!(store.load("octocat").is_none(), "{contents}");
        }
    }

    #[test]
    fn test_load_accepts_offset_timestamp() {
        let temp_dir = TempDir::new().unwrap();
        let store = CacheStore::new(temp_dir.path());
        fs::write(
            store.path_for("octocat"),
            r#"{"timestamp": "2024-05-01T12:00:00.123456+00:00", "events": [{"type": "PushEvent"}]}"#,
        )
        .unwrap();

        let entry = store.load("octocat").unwrap();
        assert_eq!(entry.events.len(), 1);
    }

    #[test]
    fn test_freshness_boundary() {
        let store = CacheStore::default();
        let timestamp = Utc.with_ymd_and_hms(2024, 5, 1, 12, 0, 0).unwrap();
        let entry = CacheEntry {
            timestamp,
            events: vec![],
        };

        assert!(store.is_fresh(&entry, timestamp));
        assert!(store.is_fresh(&entry, timestamp + chrono::Duration::seconds(599)));
        assert!(!store.is_fresh(&entry, timestamp + chrono::Duration::seconds(600)));
        assert!(!store.is_fresh(&entry, timestamp + chrono::Duration::hours(2)));
    }

    #[test]
    fn test_unrepresentable_ttl_is_stale() {
        let entry = CacheEntry {
            timestamp: Utc::now(),
            events: vec![],
        };

        assert!(!entry.is_fresh(Utc::now(), Duration::MAX));
    }
}
