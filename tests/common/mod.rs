#![allow(dead_code)]

use std::net::TcpListener;
use std::sync::Arc;

use httpmock::MockServer;
use repopulse::{CacheStore, GitHubClient, MemoryBackend};
use serde_json::{Value, json};

pub fn can_bind_localhost() -> bool {
    TcpListener::bind("127.0.0.1:0").is_ok()
}

/// Client pointed at `server`, with an in-memory cache the test can inspect.
pub fn client(server: &MockServer, token: Option<&str>) -> (GitHubClient, Arc<MemoryBackend>) {
    let backend = Arc::new(MemoryBackend::new());
    let cache = CacheStore::new(backend.clone());
    let client = GitHubClient::new(token, cache)
        .unwrap()
        .with_base_url(server.base_url());
    (client, backend)
}

pub fn repo_json(owner: &str, name: &str) -> Value {
    json!({
        "id": 1296269,
        "name": name,
        "full_name": format!("{owner}/{name}"),
        "description": "This your first repo!",
        "html_url": format!("https://github.com/{owner}/{name}"),
        "stargazers_count": 80,
        "forks_count": 9,
        "open_issues_count": 0,
        "license": null,
        "created_at": "2011-01-26T19:01:12Z",
        "updated_at": "2011-01-26T19:14:43Z",
        "size": 108,
        "default_branch": "master",
        "language": "C"
    })
}

pub fn languages_json() -> Value {
    json!({ "C": 78769, "Makefile": 1200 })
}

pub fn commit_activity_json() -> Value {
    json!([
        { "week": 1_699_747_200, "total": 3, "days": [0, 1, 0, 2, 0, 0, 0] },
        { "week": 1_700_352_000, "total": 5, "days": [1, 1, 1, 1, 1, 0, 0] }
    ])
}

pub fn contributors_json() -> Value {
    json!([
        {
            "login": "octocat",
            "contributions": 32,
            "avatar_url": "https://avatars.githubusercontent.com/u/583231",
            "html_url": "https://github.com/octocat"
        }
    ])
}
