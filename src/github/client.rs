// GitHub API HTTP client.
// Sends unauthenticated requests to the public REST API and classifies responses.

use std::time::Duration;

use log::debug;
use reqwest::{
    Client, Response, StatusCode,
    header::{ACCEPT, HeaderMap, HeaderValue, USER_AGENT},
};

use crate::error::{FeedError, Result};

const GITHUB_API_BASE: &str = "https://api.github.com";
const GITHUB_API_VERSION: &str = "2022-11-28";

/// Default hard timeout for a single request.
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);

/// GitHub API client for public, unauthenticated endpoints.
pub struct GitHubClient {
    client: Client,
    base_url: String,
}

impl GitHubClient {
    /// Create a new client whose requests give up after `timeout`.
    pub fn new(timeout: Duration) -> Result<Self> {
        Self::with_base_url(GITHUB_API_BASE, timeout)
    }

    /// Create a client against another API root, e.g. a GitHub Enterprise host.
    pub fn with_base_url(base_url: &str, timeout: Duration) -> Result<Self> {
        let mut headers = HeaderMap::new();

        headers.insert(
            ACCEPT,
            HeaderValue::from_static("application/vnd.github+json"),
        );
        headers.insert(
            "X-GitHub-Api-Version",
            HeaderValue::from_static(GITHUB_API_VERSION),
        );
        headers.insert(
            USER_AGENT,
            HeaderValue::from_static(concat!("ghfeed/", env!("CARGO_PKG_VERSION"))),
        );

        let client = Client::builder()
            .default_headers(headers)
            .timeout(timeout)
            .build()?;

        Ok(Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
        })
    }

    /// Make a GET request to the GitHub API.
    /// Only a 200 response is returned; any other status is an error.
    pub async fn get(&self, endpoint: &str) -> Result<Response> {
        let url = format!("{}{}", self.base_url, endpoint);
        let response = self.client.get(&url).send().await?;
        debug!("GET {} -> {}", url, response.status());

        check_status(response.status())?;
        Ok(response)
    }
}

/// Check response status and convert errors.
/// Only 200 passes. Every other status, 404 included, becomes `Api(code)`;
/// endpoint methods remap 404 to the resource that was missing.
pub fn check_status(status: StatusCode) -> Result<()> {
    match status {
        StatusCode::OK => Ok(()),
        status => Err(FeedError::Api(status.as_u16())),
    }
}
