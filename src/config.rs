// Runtime configuration.
// Collects the token, endpoints, cache location, and insights settings and builds the services.

use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;

use crate::cache::{self, CacheStore, DEFAULT_TTL, FileBackend};
use crate::error::{PulseError, Result};
use crate::github::{GITHUB_API_BASE, GitHubClient};
use crate::insights::gemini::DEFAULT_GEMINI_MODEL;
use crate::insights::{CompletionService, GeminiService, InsightsGenerator};

#[derive(Debug, Clone)]
pub struct Config {
    /// GitHub token. Requests are unauthenticated without one.
    pub token: Option<String>,
    pub api_base: String,
    /// Defaults to the platform cache directory.
    pub cache_dir: Option<PathBuf>,
    pub ttl: Duration,
    pub gemini_api_key: Option<String>,
    pub gemini_model: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            token: None,
            api_base: GITHUB_API_BASE.to_string(),
            cache_dir: None,
            ttl: DEFAULT_TTL,
            gemini_api_key: None,
            gemini_model: DEFAULT_GEMINI_MODEL.to_string(),
        }
    }
}

impl Config {
    pub fn resolved_cache_dir(&self) -> Result<PathBuf> {
        self.cache_dir
            .clone()
            .or_else(cache::cache_dir)
            .ok_or_else(|| PulseError::Other("could not determine a cache directory".to_string()))
    }

    pub fn cache_store(&self) -> Result<CacheStore> {
        let backend = FileBackend::new(self.resolved_cache_dir()?);
        Ok(CacheStore::with_ttl(Arc::new(backend), self.ttl))
    }

    pub fn github_client(&self) -> Result<GitHubClient> {
        let client = GitHubClient::new(self.token.as_deref(), self.cache_store()?)?;
        Ok(client.with_base_url(self.api_base.clone()))
    }

    /// Live insights when a Gemini key is set, fixed rules otherwise.
    pub fn insights_generator(&self) -> InsightsGenerator {
        let service = self.gemini_api_key.as_ref().map(|key| {
            Arc::new(GeminiService::new(key.clone()).with_model(self.gemini_model.clone()))
                as Arc<dyn CompletionService>
        });
        InsightsGenerator::new(service)
    }
}

/// Cache lifetime for a minute count. Saturates instead of overflowing.
pub fn ttl_from_minutes(minutes: u64) -> Duration {
    Duration::from_secs(minutes.saturating_mul(60))
}
