// GitHub API endpoint functions.
// One cached fetcher per repository resource.

use reqwest::StatusCode;
use serde::{Serialize, de::DeserializeOwned};
use serde_json::Value;

use crate::error::Result;

use super::client::GitHubClient;
use super::types::{CommitActivityWeek, Contributor, Languages, Repository};

/// Number of contributors requested.
pub const CONTRIBUTORS_PER_PAGE: u32 = 10;

/// The repository resources this client knows how to fetch.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ResourceKind {
    Repository,
    Languages,
    CommitActivity,
    Contributors,
}

impl ResourceKind {
    /// Segment used in cache keys.
    pub fn cache_segment(&self) -> &'static str {
        match self {
            ResourceKind::Repository => "repo",
            ResourceKind::Languages => "languages",
            ResourceKind::CommitActivity => "commits",
            ResourceKind::Contributors => "contributors",
        }
    }

    /// Name used in error messages.
    pub fn label(&self) -> &'static str {
        match self {
            ResourceKind::Repository => "repository",
            ResourceKind::Languages => "languages",
            ResourceKind::CommitActivity => "commit activity",
            ResourceKind::Contributors => "contributors",
        }
    }

    pub fn path(&self, owner: &str, name: &str) -> String {
        match self {
            ResourceKind::Repository => format!("/repos/{}/{}", owner, name),
            ResourceKind::Languages => format!("/repos/{}/{}/languages", owner, name),
            ResourceKind::CommitActivity => {
                format!("/repos/{}/{}/stats/commit_activity", owner, name)
            }
            ResourceKind::Contributors => format!("/repos/{}/{}/contributors", owner, name),
        }
    }

    /// Cache key, without the store prefix.
    pub fn cache_key(&self, owner: &str, name: &str) -> String {
        format!("{}-{}-{}", self.cache_segment(), owner, name)
    }
}

impl GitHubClient {
    /// Get repository metadata. A 404 means the repository is missing or private.
    pub async fn fetch_repository(&self, owner: &str, name: &str) -> Result<Repository> {
        self.fetch_object(ResourceKind::Repository, owner, name).await
    }

    /// Get the language breakdown in bytes.
    pub async fn fetch_languages(&self, owner: &str, name: &str) -> Result<Languages> {
        self.fetch_object(ResourceKind::Languages, owner, name).await
    }

    /// Get the last year of weekly commit activity.
    ///
    /// Returns an empty list while GitHub is still computing the statistic (202).
    pub async fn fetch_commit_activity(
        &self,
        owner: &str,
        name: &str,
    ) -> Result<Vec<CommitActivityWeek>> {
        let kind = ResourceKind::CommitActivity;
        let key = kind.cache_key(owner, name);
        if let Some(cached) = self.cache().get(&key) {
            tracing::debug!(key = %key, "Cache hit");
            return Ok(cached);
        }

        let response = self.get(&kind.path(owner, name)).await?;
        let response = self.check_response(response, kind, owner, name)?;

        if response.status() == StatusCode::ACCEPTED {
            tracing::info!(owner = %owner, name = %name, "Commit activity still being computed");
            return Ok(Vec::new());
        }

        let weeks: Vec<CommitActivityWeek> = decode_list(&response.text().await?)?;
        self.cache().set(&key, &weeks);
        Ok(weeks)
    }

    /// Get the top contributors.
    pub async fn fetch_contributors(&self, owner: &str, name: &str) -> Result<Vec<Contributor>> {
        let kind = ResourceKind::Contributors;
        let key = kind.cache_key(owner, name);
        if let Some(cached) = self.cache().get(&key) {
            tracing::debug!(key = %key, "Cache hit");
            return Ok(cached);
        }

        let params = [("per_page", CONTRIBUTORS_PER_PAGE.to_string())];
        let response = self
            .get_with_params(&kind.path(owner, name), &params)
            .await?;
        let response = self.check_response(response, kind, owner, name)?;

        let contributors: Vec<Contributor> = decode_list(&response.text().await?)?;
        self.cache().set(&key, &contributors);
        Ok(contributors)
    }

    async fn fetch_object<T: DeserializeOwned + Serialize>(
        &self,
        kind: ResourceKind,
        owner: &str,
        name: &str,
    ) -> Result<T> {
        let key = kind.cache_key(owner, name);
        if let Some(cached) = self.cache().get(&key) {
            tracing::debug!(key = %key, "Cache hit");
            return Ok(cached);
        }

        let response = self.get(&kind.path(owner, name)).await?;
        let response = self.check_response(response, kind, owner, name)?;

        let data: T = serde_json::from_str(&response.text().await?)?;
        self.cache().set(&key, &data);
        Ok(data)
    }
}

/// Decode a list body. Anything other than a JSON array, including an empty
/// body, becomes an empty list.
fn decode_list<T: DeserializeOwned>(body: &str) -> Result<Vec<T>> {
    if body.trim().is_empty() {
        return Ok(Vec::new());
    }

    match serde_json::from_str::<Value>(body)? {
        value @ Value::Array(_) => Ok(serde_json::from_value(value)?),
        other => {
            tracing::warn!(body = %other, "Expected a JSON array, treating as empty");
            Ok(Vec::new())
        }
    }
}
