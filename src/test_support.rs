// Shared fixtures for unit tests.

use crate::github::{Contributor, Languages, Repository, RepositoryData};

pub(crate) fn repository(name: &str, stars: u64, open_issues: u64) -> Repository {
    Repository {
        id: 1,
        name: name.to_string(),
        full_name: format!("acme/{}", name),
        description: Some("Metrics Dashboard".to_string()),
        html_url: format!("https://github.com/acme/{}", name),
        stargazers_count: stars,
        forks_count: 1,
        open_issues_count: open_issues,
        license: None,
        created_at: "2024-01-01T00:00:00Z".to_string(),
        updated_at: "2024-02-01T00:00:00Z".to_string(),
        size: 10,
        default_branch: "main".to_string(),
        language: Some("TypeScript".to_string()),
    }
}

pub(crate) fn contributors(count: usize) -> Vec<Contributor> {
    (0..count)
        .map(|i| Contributor {
            login: format!("dev{}", i),
            contributions: 10,
            avatar_url: String::new(),
            html_url: String::new(),
        })
        .collect()
}

pub(crate) fn sample_data() -> RepositoryData {
    RepositoryData {
        repository: repository("dash", 5, 2),
        languages: [("TypeScript", 900), ("CSS", 100)]
            .into_iter()
            .collect::<Languages>(),
        commit_activity: Vec::new(),
        contributors: contributors(1),
    }
}
