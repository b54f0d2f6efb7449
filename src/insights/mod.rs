// Repository insights.
// Asks a completion service for three short analyses and falls back to fixed rules.

pub mod fallback;
pub mod gemini;
pub mod prompt;

use std::sync::Arc;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::error::InsightsError;
use crate::github::RepositoryData;

pub use gemini::GeminiService;

/// Three short analyses of a repository.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Insights {
    pub summary: String,
    pub language_analysis: String,
    pub contribution_patterns: String,
}

/// A text completion capability, such as a hosted language model.
#[async_trait]
pub trait CompletionService: Send + Sync {
    async fn complete(&self, prompt: &str) -> Result<String, InsightsError>;
}

/// Produces insights for an aggregate, never failing.
#[derive(Clone, Default)]
pub struct InsightsGenerator {
    service: Option<Arc<dyn CompletionService>>,
}

impl InsightsGenerator {
    pub fn new(service: Option<Arc<dyn CompletionService>>) -> Self {
        Self { service }
    }

    /// A generator that always uses the fixed rules.
    pub fn fallback_only() -> Self {
        Self::default()
    }

    pub fn has_service(&self) -> bool {
        self.service.is_some()
    }

    /// Generate insights, using the fixed rules when the live call fails.
    pub async fn generate(&self, data: &RepositoryData) -> Insights {
        match self.try_generate(data).await {
            Ok(insights) => insights,
            Err(InsightsError::Unconfigured) => {
                tracing::debug!("No completion service configured, using fallback insights");
                fallback::generate(data)
            }
            Err(e) => {
                tracing::warn!(error = %e, "Insights generation failed, using fallback");
                fallback::generate(data)
            }
        }
    }

    /// Generate insights with the completion service only.
    pub async fn try_generate(&self, data: &RepositoryData) -> Result<Insights, InsightsError> {
        let service = self.service.as_ref().ok_or(InsightsError::Unconfigured)?;
        let text = service.complete(&prompt::build_prompt(data)).await?;
        Ok(prompt::parse_response(&text))
    }
}
