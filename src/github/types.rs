// GitHub event types.
// Typed view over the raw event objects returned by the user events endpoint.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Deserializer};
use serde::de::DeserializeOwned;
use serde_json::Value;

/// Kind-specific part of an event, decoded from its payload.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EventKind {
    Push { commits: usize },
    Create { ref_type: Option<String> },
    Issues { action: Option<String>, title: Option<String> },
    IssueComment,
    PullRequest { action: Option<String>, title: Option<String> },
    Watch { action: Option<String> },
    Other,
}

/// One activity record from a user's feed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Event {
    /// Raw `type` tag, e.g. `PushEvent`.
    pub type_name: Option<String>,
    /// Full repository name, `owner/name`.
    pub repo: Option<String>,
    pub created_at: Option<DateTime<Utc>>,
    pub kind: EventKind,
}

#[derive(Debug, Default, Deserialize)]
struct RawEvent {
    #[serde(rename = "type", default, deserialize_with = "or_none")]
    type_name: Option<String>,
    #[serde(default, deserialize_with = "or_none")]
    repo: Option<RepoRef>,
    #[serde(default)]
    payload: Value,
    #[serde(default, deserialize_with = "or_none")]
    created_at: Option<String>,
}

#[derive(Debug, Deserialize)]
struct RepoRef {
    #[serde(default, deserialize_with = "or_none")]
    name: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
struct PushPayload {
    #[serde(default, deserialize_with = "or_none")]
    commits: Option<Vec<Value>>,
}

#[derive(Debug, Default, Deserialize)]
struct CreatePayload {
    #[serde(default, deserialize_with = "or_none")]
    ref_type: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
struct ActionPayload {
    #[serde(default, deserialize_with = "or_none")]
    action: Option<String>,
    #[serde(default, deserialize_with = "or_none")]
    issue: Option<Titled>,
    #[serde(default, deserialize_with = "or_none")]
    pull_request: Option<Titled>,
}

#[derive(Debug, Deserialize)]
struct Titled {
    #[serde(default, deserialize_with = "or_none")]
    title: Option<String>,
}

impl Event {
    /// Build the typed view of a raw event object.
    /// Fields that are missing or have an unexpected shape become `None`.
    pub fn from_raw(raw: &Value) -> Self {
        let RawEvent {
            type_name,
            repo,
            payload,
            created_at,
        } = lenient(raw);

        let kind = match type_name.as_deref() {
            Some("PushEvent") => {
                let p: PushPayload = lenient(&payload);
                EventKind::Push {
                    commits: p.commits.map_or(0, |c| c.len()),
                }
            }
            Some("CreateEvent") => {
                let p: CreatePayload = lenient(&payload);
                EventKind::Create {
                    ref_type: p.ref_type,
                }
            }
            Some("IssuesEvent") => {
                let p: ActionPayload = lenient(&payload);
                EventKind::Issues {
                    action: p.action,
                    title: p.issue.and_then(|i| i.title),
                }
            }
            Some("IssueCommentEvent") => EventKind::IssueComment,
            Some("PullRequestEvent") => {
                let p: ActionPayload = lenient(&payload);
                EventKind::PullRequest {
                    action: p.action,
                    title: p.pull_request.and_then(|pr| pr.title),
                }
            }
            Some("WatchEvent") => {
                let p: ActionPayload = lenient(&payload);
                EventKind::Watch { action: p.action }
            }
            _ => EventKind::Other,
        };

        Self {
            type_name,
            repo: repo.and_then(|r| r.name),
            created_at: created_at
                .and_then(|s| DateTime::parse_from_rfc3339(&s).ok())
                .map(|dt| dt.with_timezone(&Utc)),
            kind,
        }
    }
}

/// Decode a value, falling back to the type's default on any mismatch.
fn lenient<T: DeserializeOwned + Default>(value: &Value) -> T {
    T::deserialize(value).unwrap_or_default()
}

/// Field deserializer that maps a wrongly shaped value to `None`.
fn or_none<'de, D, T>(deserializer: D) -> Result<Option<T>, D::Error>
where
    D: Deserializer<'de>,
    T: DeserializeOwned,
{
    let value = Value::deserialize(deserializer)?;
    Ok(T::deserialize(value).ok())
}
