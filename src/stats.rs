// Derived repository statistics.
// Language shares, commit totals, and display formatting for the presentation layer.

use chrono::{DateTime, NaiveDate};
use serde::Serialize;

use crate::github::{CommitActivityWeek, RepositoryData};

/// One language's share of the codebase.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LanguageShare {
    pub name: String,
    pub bytes: u64,
    /// Percentage of all bytes, rounded to one decimal.
    pub percentage: f64,
}

/// Summary numbers derived from an aggregate.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RepositoryStats {
    pub total_language_bytes: u64,
    /// Largest first.
    pub languages: Vec<LanguageShare>,
    pub weeks: usize,
    pub total_commits: u64,
    /// Rounded to the nearest commit.
    pub average_weekly_commits: u64,
    pub peak_weekly_commits: u64,
    pub size: String,
}

impl RepositoryStats {
    pub fn from_data(data: &RepositoryData) -> Self {
        let total_language_bytes = data.languages.total_bytes();

        let mut languages: Vec<LanguageShare> = data
            .languages
            .iter()
            .map(|(name, bytes)| LanguageShare {
                name: name.to_string(),
                bytes,
                percentage: percentage(bytes, total_language_bytes),
            })
            .collect();
        // Stable sort keeps upstream order among equal sizes
        languages.sort_by(|a, b| b.bytes.cmp(&a.bytes));

        let weeks = data.commit_activity.len();
        let total_commits: u64 = data.commit_activity.iter().map(|w| w.total).sum();
        let average_weekly_commits = if weeks == 0 {
            0
        } else {
            (total_commits as f64 / weeks as f64).round() as u64
        };
        let peak_weekly_commits = data
            .commit_activity
            .iter()
            .map(|w| w.total)
            .max()
            .unwrap_or(0);

        Self {
            total_language_bytes,
            languages,
            weeks,
            total_commits,
            average_weekly_commits,
            peak_weekly_commits,
            size: format_size(data.repository.size),
        }
    }
}

fn percentage(part: u64, total: u64) -> f64 {
    if total == 0 {
        return 0.0;
    }
    (part as f64 / total as f64 * 1000.0).round() / 10.0
}

/// Render a size in kibibytes as KB, MB, or GB.
pub fn format_size(size_kib: u64) -> String {
    if size_kib < 1024 {
        return format!("{} KB", size_kib);
    }
    let mib = size_kib as f64 / 1024.0;
    if mib < 1024.0 {
        return format!("{:.1} MB", mib);
    }
    format!("{:.1} GB", mib / 1024.0)
}

/// Render an ISO 8601 timestamp as e.g. "January 26, 2011". Unparseable input is returned as is.
pub fn format_date(iso: &str) -> String {
    DateTime::parse_from_rfc3339(iso)
        .map(|dt| dt.format("%B %-d, %Y").to_string())
        .unwrap_or_else(|_| iso.to_string())
}

/// Calendar date a commit-activity week starts on.
pub fn week_start(week: &CommitActivityWeek) -> Option<NaiveDate> {
    DateTime::from_timestamp(week.week, 0).map(|dt| dt.date_naive())
}
