// GitHub API HTTP client.
// Handles authentication, rate limiting, and response classification.

use std::sync::Mutex;

use reqwest::{
    Client, Response, StatusCode,
    header::{ACCEPT, AUTHORIZATION, HeaderMap, HeaderValue, USER_AGENT},
};

use crate::cache::CacheStore;
use crate::error::{PulseError, Result};

use super::endpoints::ResourceKind;
use super::types::RateLimit;

pub const GITHUB_API_BASE: &str = "https://api.github.com";
const GITHUB_API_VERSION: &str = "2022-11-28";

/// GitHub API client with optional authentication, a response cache, and
/// rate limit tracking.
pub struct GitHubClient {
    client: Client,
    base_url: String,
    cache: CacheStore,
    rate_limit: Mutex<RateLimit>,
}

impl GitHubClient {
    /// Create a new GitHub client. Without a token, requests are unauthenticated.
    pub fn new(token: Option<&str>, cache: CacheStore) -> Result<Self> {
        let mut headers = HeaderMap::new();

        if let Some(token) = token.filter(|t| !t.trim().is_empty()) {
            headers.insert(
                AUTHORIZATION,
                HeaderValue::from_str(&format!("Bearer {}", token.trim()))
                    .map_err(|e| PulseError::Other(e.to_string()))?,
            );
        }
        headers.insert(
            ACCEPT,
            HeaderValue::from_static("application/vnd.github.v3+json"),
        );
        headers.insert(
            "X-GitHub-Api-Version",
            HeaderValue::from_static(GITHUB_API_VERSION),
        );
        headers.insert(USER_AGENT, HeaderValue::from_static("repopulse"));

        let client = Client::builder()
            .default_headers(headers)
            .build()
            .map_err(PulseError::Api)?;

        Ok(Self {
            client,
            base_url: GITHUB_API_BASE.to_string(),
            cache,
            rate_limit: Mutex::new(RateLimit::default()),
        })
    }

    /// Point the client at a different API root.
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into().trim_end_matches('/').to_string();
        self
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub fn cache(&self) -> &CacheStore {
        &self.cache
    }

    /// Get the most recent rate limit information.
    pub fn rate_limit(&self) -> RateLimit {
        self.rate_limit
            .lock()
            .map(|rl| rl.clone())
            .unwrap_or_default()
    }

    /// Make a GET request to the GitHub API.
    pub async fn get(&self, endpoint: &str) -> Result<Response> {
        let url = format!("{}{}", self.base_url, endpoint);
        tracing::debug!(url = %url, "GET");
        let response = self.client.get(&url).send().await.map_err(PulseError::Api)?;

        self.update_rate_limit(&response);
        Ok(response)
    }

    /// Make a GET request with query parameters.
    pub async fn get_with_params<T: serde::Serialize + ?Sized>(
        &self,
        endpoint: &str,
        params: &T,
    ) -> Result<Response> {
        let url = format!("{}{}", self.base_url, endpoint);
        tracing::debug!(url = %url, "GET");
        let response = self
            .client
            .get(&url)
            .query(params)
            .send()
            .await
            .map_err(PulseError::Api)?;

        self.update_rate_limit(&response);
        Ok(response)
    }

    /// Update rate limit from response headers.
    fn update_rate_limit(&self, response: &Response) {
        let Ok(mut rate_limit) = self.rate_limit.lock() else {
            return;
        };

        let headers = response.headers();
        if let Some(limit) = header_u64(headers, "x-ratelimit-limit") {
            rate_limit.limit = limit;
        }
        if let Some(remaining) = header_u64(headers, "x-ratelimit-remaining") {
            rate_limit.remaining = remaining;
        }
        if let Some(reset) = header_u64(headers, "x-ratelimit-reset") {
            rate_limit.reset = reset;
        }
    }

    /// Check response status and convert errors for the given resource.
    ///
    /// Every 2xx, including 202, passes through unchanged.
    pub(crate) fn check_response(
        &self,
        response: Response,
        kind: ResourceKind,
        owner: &str,
        name: &str,
    ) -> Result<Response> {
        let status = response.status();
        if status.is_success() {
            return Ok(response);
        }

        match status {
            StatusCode::NOT_FOUND if kind == ResourceKind::Repository => {
                Err(PulseError::not_found(owner, name))
            }
            StatusCode::FORBIDDEN => {
                let reset_at = reset_time(response.headers());
                tracing::warn!(resource = kind.label(), reset_at = ?reset_at, "Rate limited");
                Err(PulseError::rate_limited(reset_at.as_deref()))
            }
            status => Err(PulseError::Upstream {
                resource: kind.label(),
                status: status.as_u16(),
                status_text: status.canonical_reason().unwrap_or_default().to_string(),
            }),
        }
    }
}

/// Reset time, when these headers report an exhausted limit.
fn reset_time(headers: &HeaderMap) -> Option<String> {
    if header_u64(headers, "x-ratelimit-remaining") != Some(0) {
        return None;
    }
    let reset = header_u64(headers, "x-ratelimit-reset").filter(|&r| r != 0)?;
    chrono::DateTime::from_timestamp(i64::try_from(reset).ok()?, 0)
        .map(|dt| dt.format("%H:%M:%S UTC").to_string())
}

fn header_u64(headers: &HeaderMap, name: &str) -> Option<u64> {
    headers
        .get(name)
        .and_then(|v| v.to_str().ok())
        .and_then(|v| v.parse().ok())
}
