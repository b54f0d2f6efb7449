// GitHub API module.
// Provides the client, cached resource fetchers, and response types.

pub mod client;
pub mod endpoints;
pub mod types;

pub use client::{GITHUB_API_BASE, GitHubClient};
pub use endpoints::{CONTRIBUTORS_PER_PAGE, ResourceKind};
pub use types::*;
