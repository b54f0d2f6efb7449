// Repository aggregate fetching.
// Runs the four resource fetchers concurrently and fails as a whole on the first error.

use crate::error::Result;
use crate::github::{GitHubClient, RepositoryData, RepositoryIdentity};

impl GitHubClient {
    /// Fetch all four resources for a repository.
    ///
    /// The fetches run concurrently; the first failure is returned unchanged
    /// and the remaining fetches are dropped.
    pub async fn fetch_aggregate(&self, owner: &str, name: &str) -> Result<RepositoryData> {
        let (repository, languages, commit_activity, contributors) = tokio::try_join!(
            self.fetch_repository(owner, name),
            self.fetch_languages(owner, name),
            self.fetch_commit_activity(owner, name),
            self.fetch_contributors(owner, name),
        )?;

        Ok(RepositoryData {
            repository,
            languages,
            commit_activity,
            contributors,
        })
    }

    /// Fetch aggregates for two repositories side by side.
    pub async fn fetch_comparison(
        &self,
        first: &RepositoryIdentity,
        second: &RepositoryIdentity,
    ) -> Result<(RepositoryData, RepositoryData)> {
        tokio::try_join!(
            self.fetch_aggregate(&first.owner, &first.name),
            self.fetch_aggregate(&second.owner, &second.name),
        )
    }
}
