// GitHub API endpoint functions.
// Fetches a user's public event feed.

use percent_encoding::{AsciiSet, CONTROLS, utf8_percent_encode};
use serde_json::Value;

use crate::error::{FeedError, Result};

use super::EventSource;
use super::client::GitHubClient;

/// Characters escaped when a name is used as one URL path segment.
const PATH_SEGMENT: &AsciiSet = &CONTROLS
    .add(b' ')
    .add(b'"')
    .add(b'#')
    .add(b'%')
    .add(b'/')
    .add(b'<')
    .add(b'>')
    .add(b'?')
    .add(b'\\')
    .add(b'`')
    .add(b'{')
    .add(b'}');

/// Path of a user's public events feed.
pub fn user_events_path(username: &str) -> String {
    format!(
        "/users/{}/events",
        utf8_percent_encode(username, PATH_SEGMENT)
    )
}

impl GitHubClient {
    /// Get the raw public events for a user, most recent first.
    pub async fn get_user_events(&self, username: &str) -> Result<Vec<Value>> {
        let response = self
            .get(&user_events_path(username))
            .await
            .map_err(|e| match e {
                FeedError::Api(404) => FeedError::UserNotFound(username.to_string()),
                e => e,
            })?;

        // Read as text so a malformed body is a decode error, not a transport one.
        let body = response.text().await?;
        let events: Vec<Value> = serde_json::from_str(&body)?;
        Ok(events)
    }
}

impl EventSource for GitHubClient {
    async fn user_events(&mut self, username: &str) -> Result<Vec<Value>> {
        self.get_user_events(username).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::github::DEFAULT_TIMEOUT;
    use serde_json::json;

    fn client_for(server: &mockito::ServerGuard) -> GitHubClient {
        GitHubClient::with_base_url(&server.url(), DEFAULT_TIMEOUT).unwrap()
    }

    #[test]
    fn test_user_events_path() {
        assert_eq!(user_events_path("octocat"), "/users/octocat/events");
        assert_eq!(user_events_path("mona-lisa"), "/users/mona-lisa/events");
    }

    #[test]
    fn test_user_events_path_escapes_url_syntax() {
        assert_eq!(
            user_events_path("a?per_page=1"),
            "/users/a%3Fper_page=1/events"
        );
        assert_eq!(user_events_path("a/b#c"), "/users/a%2Fb%23c/events");
        assert_eq!(user_events_path("100%"), "/users/100%25/events");
    }

    #[tokio::test]
    async fn test_get_user_events_ok() {
        let mut server = mockito::Server::new_async().await;
        let mock = server
            .mock("GET", "/users/octocat/events")
            .with_status(200)
            .with_header("content-type", "application/json")
            .with_body(r#"[{"type":"PushEvent","repo":{"name":"octo/repo"}},{"type":"WatchEvent"}]"#)
            .expect(1)
            .create_async()
            .await;

        let client = client_for(&server);
        let events = client.get_user_events("octocat").await.unwrap();

        assert_eq!(
            events,
            vec![
                json!({"type": "PushEvent", "repo": {"name": "octo/repo"}}),
                json!({"type": "WatchEvent"}),
            ]
        );
        mock.assert_async().await;
    }

    #[tokio::test]
    async fn test_get_user_events_not_found() {
        let mut server = mockito::Server::new_async().await;
        let _mock = server
            .mock("GET", "/users/ghost/events")
            .with_status(404)
            .with_body(r#"{"message":"Not Found"}"#)
            .create_async()
            .await;

        let client = client_for(&server);
        let err = client.get_user_events("ghost").await.unwrap_err();
        assert!(matches!(err, FeedError::UserNotFound(ref u) if u == "ghost"));
    }

    #[tokio::test]
    async fn test_get_user_events_server_error() {
        let mut server = mockito::Server::new_async().await;
        let _mock = server
            .mock("GET", "/users/octocat/events")
            .with_status(500)
            .create_async()
            .await;

        let client = client_for(&server);
        let err = client.get_user_events("octocat").await.unwrap_err();
        assert!(matches!(err, FeedError::Api(500)));
        assert!(!err.is_fatal());
    }

    #[tokio::test]
    async fn test_get_user_events_malformed_body() {
        let mut server = mockito::Server::new_async().await;
        let _mock = server
            .mock("GET", "/users/octocat/events")
            .with_status(200)
            .with_header("content-type", "application/json")
            .with_body(r#"{"message":"not a list"}"#)
            .create_async()
            .await;

        let client = client_for(&server);
        let err = client.get_user_events("octocat").await.unwrap_err();
        assert!(matches!(err, FeedError::Decode(_)));
        assert!(
            err.to_string()
                .starts_with("An unexpected error occurred: ")
        );
    }
}
