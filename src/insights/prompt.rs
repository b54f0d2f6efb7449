// Prompt construction and response parsing for the completion service.

use crate::github::RepositoryData;

use super::Insights;

const SEGMENT_DELIMITER: char = '|';

const SUMMARY_UNAVAILABLE: &str = "AI analysis unavailable";
const LANGUAGES_UNAVAILABLE: &str = "Language analysis unavailable";
const CONTRIBUTIONS_UNAVAILABLE: &str = "Contribution analysis unavailable";

/// Build the analysis prompt for a repository.
pub fn build_prompt(data: &RepositoryData) -> String {
    let repository = &data.repository;
    let description = repository
        .description
        .as_deref()
        .filter(|d| !d.is_empty())
        .unwrap_or("No description");
    let languages = data.languages.names().collect::<Vec<_>>().join(", ");

    format!(
        "Analyze this GitHub repository and provide insights:

Repository: {}
Description: {}
Languages: {}
Stars: {}
Forks: {}
Contributors: {}

Please provide:
1. A 2-3 sentence summary of the repository's purpose and key features
2. Analysis of the language composition and technology stack
3. Assessment of contribution patterns and project health

Format as: SUMMARY: ... | LANGUAGES: ... | CONTRIBUTIONS: ...",
        repository.full_name,
        description,
        languages,
        repository.stargazers_count,
        repository.forks_count,
        data.contributors.len(),
    )
}

/// Split a `SUMMARY: ... | LANGUAGES: ... | CONTRIBUTIONS: ...` reply.
///
/// Missing or empty segments get a placeholder.
pub fn parse_response(text: &str) -> Insights {
    let mut parts = text.split(SEGMENT_DELIMITER);

    Insights {
        summary: segment(parts.next(), "SUMMARY:", SUMMARY_UNAVAILABLE),
        language_analysis: segment(parts.next(), "LANGUAGES:", LANGUAGES_UNAVAILABLE),
        contribution_patterns: segment(parts.next(), "CONTRIBUTIONS:", CONTRIBUTIONS_UNAVAILABLE),
    }
}

fn segment(part: Option<&str>, label: &str, placeholder: &str) -> String {
    part.map(|p| p.replacen(label, "", 1).trim().to_string())
        .filter(|p| !p.is_empty())
        .unwrap_or_else(|| placeholder.to_string())
}
