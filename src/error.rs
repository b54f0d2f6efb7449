// Error types for repopulse.
// Fetch errors reach the caller; cache and insights errors stay inside their components.

use thiserror::Error;

/// Message shown for any 403 from the GitHub API.
pub const RATE_LIMIT_MESSAGE: &str =
    "GitHub API rate limit exceeded. Please add a GitHub token or try again later.";

#[derive(Error, Debug)]
pub enum PulseError {
    #[error("GitHub API error: {0}")]
    Api(#[from] reqwest::Error),

    /// Repository does not exist or is private.
    #[error("{0}")]
    NotFound(String),

    #[error("{message}")]
    RateLimited { message: String },

    /// Any other non-success status.
    #[error("Failed to fetch {resource}: {status} {status_text}")]
    Upstream {
        resource: &'static str,
        status: u16,
        status_text: String,
    },

    #[error("JSON parsing error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("{0}")]
    InvalidInput(String),

    #[error("{0}")]
    Other(String),
}

impl PulseError {
    /// Build the not-found error for a repository.
    pub fn not_found(owner: &str, name: &str) -> Self {
        PulseError::NotFound(format!(
            "Repository \"{}/{}\" not found. Please check the repository name and ensure it's public.",
            owner, name
        ))
    }

    /// Build the rate-limit error, optionally naming when the limit resets.
    pub fn rate_limited(reset_at: Option<&str>) -> Self {
        let message = match reset_at {
            Some(reset_at) => format!("{} (resets at {})", RATE_LIMIT_MESSAGE, reset_at),
            None => RATE_LIMIT_MESSAGE.to_string(),
        };
        PulseError::RateLimited { message }
    }

    pub fn is_rate_limited(&self) -> bool {
        matches!(self, PulseError::RateLimited { .. })
    }

    pub fn is_not_found(&self) -> bool {
        matches!(self, PulseError::NotFound(_))
    }
}

pub type Result<T> = std::result::Result<T, PulseError>;

/// Failure inside the cache store. Never returned from the store's public API.
#[derive(Error, Debug)]
pub enum CacheError {
    #[error("cache backend I/O failed: {0}")]
    Io(#[from] std::io::Error),

    #[error("cache entry is not valid JSON: {0}")]
    Json(#[from] serde_json::Error),

    #[error("cache backend unavailable: {0}")]
    Backend(String),
}

/// Failure of the live insights path. Always replaced by the fallback generator.
#[derive(Error, Debug)]
pub enum InsightsError {
    #[error("no completion service configured")]
    Unconfigured,

    #[error("completion request failed: {0}")]
    Request(#[from] reqwest::Error),

    #[error("completion service returned {status}: {body}")]
    Status { status: u16, body: String },

    #[error("completion response had no text")]
    EmptyResponse,
}
