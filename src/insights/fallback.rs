// Rule-based insights.
// Used whenever the completion service is unconfigured or fails.

use crate::github::RepositoryData;

use super::Insights;

const STRONG_INTEREST_STARS: u64 = 100;
const SMALL_TEAM_CONTRIBUTORS: usize = 5;
const WELL_MAINTAINED_ISSUES: u64 = 10;

/// Build insights from fixed rules. Total over every aggregate.
pub fn generate(data: &RepositoryData) -> Insights {
    Insights {
        summary: summary(data),
        language_analysis: language_analysis(data),
        contribution_patterns: contribution_patterns(data),
    }
}

fn primary_language(data: &RepositoryData) -> &str {
    data.languages.primary().unwrap_or("Unknown")
}

/// Plural suffix, only for counts above one.
fn plural(count: usize) -> &'static str {
    if count > 1 { "s" } else { "" }
}

fn summary(data: &RepositoryData) -> String {
    let repository = &data.repository;
    let focus = repository
        .description
        .as_deref()
        .filter(|d| !d.is_empty())
        .map(|d| format!(" focused on {}", d.to_lowercase()))
        .unwrap_or_default();
    let interest = if repository.stargazers_count > STRONG_INTEREST_STARS {
        "strong"
    } else {
        "growing"
    };

    format!(
        "{} is a {} project{}. With {} stars and {} forks, it demonstrates {} community interest.",
        repository.name,
        primary_language(data),
        focus,
        repository.stargazers_count,
        repository.forks_count,
        interest
    )
}

fn language_analysis(data: &RepositoryData) -> String {
    let count = data.languages.len();
    let primary = primary_language(data);
    let detail = if count > 1 {
        let lower = primary.to_lowercase();
        let architecture = if lower.contains("javascript") || lower.contains("typescript") {
            "full-stack web"
        } else {
            "multi-component"
        };
        format!(
            "The diverse language mix suggests a {} application architecture.",
            architecture
        )
    } else {
        format!(
            "The single-language approach indicates a focused {} implementation.",
            primary
        )
    };

    format!(
        "This project uses {} programming language{}, with {} as the primary language. {}",
        count,
        plural(count),
        primary,
        detail
    )
}

fn contribution_patterns(data: &RepositoryData) -> String {
    let count = data.contributors.len();
    let team = match count {
        1 => "This appears to be a personal project with single maintainer ownership.",
        c if c < SMALL_TEAM_CONTRIBUTORS => {
            "This suggests a small team collaboration with close coordination."
        }
        _ => "This indicates a healthy open-source project with diverse community involvement.",
    };

    let issues = data.repository.open_issues_count;
    let status = if issues < WELL_MAINTAINED_ISSUES {
        "well-maintained"
    } else {
        "active development"
    };

    format!(
        "The project has {} active contributor{}. {} Recent activity shows {} open issues, indicating {} status.",
        count,
        plural(count),
        team,
        issues,
        status
    )
}
