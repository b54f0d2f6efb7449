// Repository identifier parsing.
// Accepts `owner/repo` or a github.com URL.

use crate::error::{PulseError, Result};
use crate::github::RepositoryIdentity;

const GITHUB_HOST: &str = "github.com/";

/// Parse user input into an owner/name pair.
pub fn parse_repository(input: &str) -> Result<RepositoryIdentity> {
    let input = input.trim();
    if input.is_empty() {
        return Err(PulseError::InvalidInput(
            "Please enter a repository URL or owner/repo format".to_string(),
        ));
    }

    let (owner, name) = if let Some(pos) = input.find(GITHUB_HOST) {
        let rest = &input[pos + GITHUB_HOST.len()..];
        let mut segments = rest.split('/');
        let owner = segments.next().unwrap_or_default();
        let name = segments
            .next()
            .and_then(|s| s.split(['?', '#']).next())
            .unwrap_or_default();
        (owner, name)
    } else if input.contains('/') {
        let mut segments = input.split('/');
        (
            segments.next().unwrap_or_default(),
            segments.next().unwrap_or_default(),
        )
    } else {
        return Err(PulseError::InvalidInput(
            "Please use format: owner/repo or full GitHub URL".to_string(),
        ));
    };

    let owner = owner.trim();
    let name = name.trim();
    let name = name.strip_suffix(".git").unwrap_or(name);

    if owner.is_empty() || name.is_empty() {
        return Err(PulseError::InvalidInput(
            "Invalid format. Use: owner/repo or GitHub URL".to_string(),
        ));
    }

    Ok(RepositoryIdentity::new(owner, name))
}
