// repopulse library.
// Fetches and caches GitHub repository data, aggregates it, and derives insights.

pub mod aggregate;
pub mod cache;
pub mod config;
pub mod error;
pub mod github;
pub mod input;
pub mod insights;
pub mod stats;

#[cfg(test)]
mod test_support;

pub use cache::{CacheStore, FileBackend, MemoryBackend, StorageBackend};
pub use config::Config;
pub use error::{PulseError, Result};
pub use github::{GitHubClient, RepositoryData, RepositoryIdentity};
pub use input::parse_repository;
pub use insights::{CompletionService, Insights, InsightsGenerator};
pub use stats::RepositoryStats;
