mod common;

use chrono::Utc;
use httpmock::Method::GET;
use httpmock::MockServer;
use repopulse::cache::CachedData;
use repopulse::{PulseError, StorageBackend};
use serde_json::json;

use common::{
    can_bind_localhost, client, commit_activity_json, contributors_json, languages_json,
    repo_json,
};

macro_rules! require_localhost {
    () => {
        if !can_bind_localhost() {
            eprintln!("Skipping httpmock tests: cannot bind to localhost");
            return;
        }
    };
}

#[tokio::test]
async fn repository_is_served_from_cache_within_window() {
    require_localhost!();

    let server = MockServer::start_async().await;
    let mock = server
        .mock_async(|when, then| {
            when.method(GET)
                .path("/repos/octocat/Hello-World")
                .header("accept", "application/vnd.github.v3+json");
            then.status(200).json_body(repo_json("octocat", "Hello-World"));
        })
        .await;

    let (client, backend) = client(&server, None);

    let first = client.fetch_repository("octocat", "Hello-World").await.unwrap();
    let second = client.fetch_repository("octocat", "Hello-World").await.unwrap();

    assert_eq!(first.full_name, "octocat/Hello-World");
    assert_eq!(second.full_name, first.full_name);
    assert_eq!(mock.hits_async().await, 1);
    assert!(
        backend
            .get_item("github-analytics-repo-octocat-Hello-World")
            .unwrap()
            .is_some()
    );
}

#[tokio::test]
async fn expired_entry_is_refetched_and_restamped() {
    require_localhost!();

    let server = MockServer::start_async().await;
    let mock = server
        .mock_async(|when, then| {
            when.method(GET).path("/repos/octocat/Hello-World");
            then.status(200).json_body(repo_json("octocat", "Hello-World"));
        })
        .await;

    let (client, backend) = client(&server, None);

    let old_timestamp = Utc::now().timestamp_millis() - 16 * 60 * 1000;
    let mut stale = repo_json("octocat", "Hello-World");
    stale["stargazers_count"] = json!(1);
    let entry = CachedData {
        data: stale,
        timestamp: old_timestamp,
    };
    backend
        .set_item(
            "github-analytics-repo-octocat-Hello-World",
            &serde_json::to_string(&entry).unwrap(),
        )
        .unwrap();

    let repo = client.fetch_repository("octocat", "Hello-World").await.unwrap();
    assert_eq!(repo.stargazers_count, 80);
    assert_eq!(mock.hits_async().await, 1);

    let raw = backend
        .get_item("github-analytics-repo-octocat-Hello-World")
        .unwrap()
        .unwrap();
    let refreshed: CachedData<serde_json::Value> = serde_json::from_str(&raw).unwrap();
    assert!(refreshed.timestamp > old_timestamp);
    assert_eq!(refreshed.data["stargazers_count"], 80);
}

#[tokio::test]
async fn forbidden_is_rate_limited_for_every_resource() {
    require_localhost!();

    let paths = [
        "/repos/o/n",
        "/repos/o/n/languages",
        "/repos/o/n/stats/commit_activity",
        "/repos/o/n/contributors",
    ];

    for path in paths {
        let server = MockServer::start_async().await;
        server
            .mock_async(|when, then| {
                when.method(GET).path(path);
                then.status(403)
                    .json_body(json!({ "message": "API rate limit exceeded" }));
            })
            .await;

        let (client, backend) = client(&server, None);
        let err = match path {
            "/repos/o/n" => client.fetch_repository("o", "n").await.map(|_| ()),
            "/repos/o/n/languages" => client.fetch_languages("o", "n").await.map(|_| ()),
            "/repos/o/n/stats/commit_activity" => {
                client.fetch_commit_activity("o", "n").await.map(|_| ())
            }
            _ => client.fetch_contributors("o", "n").await.map(|_| ()),
        }
        .unwrap_err();

        assert!(err.is_rate_limited(), "{path}: {err}");
        assert!(err.to_string().contains("rate limit exceeded"));
        assert!(backend.is_empty());
    }
}

#[tokio::test]
async fn rate_limit_reset_is_reported() {
    require_localhost!();

    let server = MockServer::start_async().await;
    server
        .mock_async(|when, then| {
            when.method(GET).path("/repos/o/n/languages");
            then.status(403)
                .header("x-ratelimit-limit", "60")
                .header("x-ratelimit-remaining", "0")
                .header("x-ratelimit-reset", "1700000000");
        })
        .await;

    let (client, _) = client(&server, None);
    let err = client.fetch_languages("o", "n").await.unwrap_err();

    assert!(err.to_string().contains("resets at 22:13:20 UTC"), "{err}");
    let rate_limit = client.rate_limit();
    assert_eq!(rate_limit.limit, 60);
    assert_eq!(rate_limit.remaining, 0);
}

#[tokio::test]
async fn forbidden_reset_comes_from_its_own_response() {
    require_localhost!();

    let server = MockServer::start_async().await;
    server
        .mock_async(|when, then| {
            when.method(GET).path("/repos/o/n/languages");
            then.status(403)
                .header("x-ratelimit-remaining", "0")
                .header("x-ratelimit-reset", "1700000000");
        })
        .await;
    server
        .mock_async(|when, then| {
            when.method(GET).path("/repos/o/n/contributors");
            then.status(403);
        })
        .await;

    let (client, _) = client(&server, None);
    let first = client.fetch_languages("o", "n").await.unwrap_err();
    assert!(first.to_string().contains("resets at"), "{first}");

    let second = client.fetch_contributors("o", "n").await.unwrap_err();
    assert!(second.is_rate_limited(), "{second}");
    assert!(!second.to_string().contains("resets at"), "{second}");
}

#[tokio::test]
async fn missing_repository_is_not_found() {
    require_localhost!();

    let server = MockServer::start_async().await;
    server
        .mock_async(|when, then| {
            when.method(GET).path("/repos/octocat/nope");
            then.status(404).json_body(json!({ "message": "Not Found" }));
        })
        .await;

    let (client, _) = client(&server, None);
    let err = client.fetch_repository("octocat", "nope").await.unwrap_err();

    assert!(err.is_not_found());
    assert!(err.to_string().contains("octocat/nope"));
}

#[tokio::test]
async fn not_found_on_other_resources_is_upstream_error() {
    require_localhost!();

    let server = MockServer::start_async().await;
    server
        .mock_async(|when, then| {
            when.method(GET).path("/repos/o/n/languages");
            then.status(404);
        })
        .await;

    let (client, _) = client(&server, None);
    let err = client.fetch_languages("o", "n").await.unwrap_err();

    match err {
        PulseError::Upstream {
            resource, status, ..
        } => {
            assert_eq!(resource, "languages");
            assert_eq!(status, 404);
        }
        other => panic!("unexpected error: {other}"),
    }
}

#[tokio::test]
async fn server_error_carries_status_text() {
    require_localhost!();

    let server = MockServer::start_async().await;
    server
        .mock_async(|when, then| {
            when.method(GET).path("/repos/o/n/contributors");
            then.status(500);
        })
        .await;

    let (client, _) = client(&server, None);
    let err = client.fetch_contributors("o", "n").await.unwrap_err();

    assert_eq!(
        err.to_string(),
        "Failed to fetch contributors: 500 Internal Server Error"
    );
}

#[tokio::test]
async fn pending_commit_activity_is_empty_and_uncached() {
    require_localhost!();

    let server = MockServer::start_async().await;
    let mock = server
        .mock_async(|when, then| {
            when.method(GET).path("/repos/o/n/stats/commit_activity");
            then.status(202).json_body(json!({}));
        })
        .await;

    let (client, backend) = client(&server, None);

    let weeks = client.fetch_commit_activity("o", "n").await.unwrap();
    assert!(weeks.is_empty());
    assert!(backend.is_empty());

    client.fetch_commit_activity("o", "n").await.unwrap();
    assert_eq!(mock.hits_async().await, 2);
}

#[tokio::test]
async fn commit_activity_is_decoded_and_cached() {
    require_localhost!();

    let server = MockServer::start_async().await;
    let mock = server
        .mock_async(|when, then| {
            when.method(GET).path("/repos/o/n/stats/commit_activity");
            then.status(200).json_body(commit_activity_json());
        })
        .await;

    let (client, _) = client(&server, None);

    let weeks = client.fetch_commit_activity("o", "n").await.unwrap();
    assert_eq!(weeks.len(), 2);
    assert_eq!(weeks[1].total, 5);
    assert_eq!(weeks[1].days.len(), 7);

    let again = client.fetch_commit_activity("o", "n").await.unwrap();
    assert_eq!(again, weeks);
    assert_eq!(mock.hits_async().await, 1);
}

#[tokio::test]
async fn non_array_list_bodies_become_empty() {
    require_localhost!();

    let server = MockServer::start_async().await;
    server
        .mock_async(|when, then| {
            when.method(GET).path("/repos/o/n/stats/commit_activity");
            then.status(200).json_body(json!({ "message": "odd" }));
        })
        .await;
    server
        .mock_async(|when, then| {
            when.method(GET).path("/repos/o/n/contributors");
            then.status(200).json_body(json!({ "message": "odd" }));
        })
        .await;

    let (client, backend) = client(&server, None);

    assert!(client.fetch_commit_activity("o", "n").await.unwrap().is_empty());
    assert!(client.fetch_contributors("o", "n").await.unwrap().is_empty());
    assert!(backend.get_item("github-analytics-commits-o-n").unwrap().is_some());
    assert!(
        backend
            .get_item("github-analytics-contributors-o-n")
            .unwrap()
            .is_some()
    );
}

#[tokio::test]
async fn contributors_request_fixed_page_size() {
    require_localhost!();

    let server = MockServer::start_async().await;
    let mock = server
        .mock_async(|when, then| {
            when.method(GET)
                .path("/repos/o/n/contributors")
                .query_param("per_page", "10");
            then.status(200).json_body(contributors_json());
        })
        .await;

    let (client, _) = client(&server, None);
    let contributors = client.fetch_contributors("o", "n").await.unwrap();

    assert_eq!(contributors.len(), 1);
    assert_eq!(contributors[0].login, "octocat");
    mock.assert_async().await;
}

#[tokio::test]
async fn token_is_sent_as_bearer() {
    require_localhost!();

    let server = MockServer::start_async().await;
    let mock = server
        .mock_async(|when, then| {
            when.method(GET)
                .path("/repos/o/n/languages")
                .header("authorization", "Bearer secret-token");
            then.status(200).json_body(languages_json());
        })
        .await;

    let (client, _) = client(&server, Some("secret-token"));
    let languages = client.fetch_languages("o", "n").await.unwrap();

    assert_eq!(languages.primary(), Some("C"));
    assert_eq!(languages.get("Makefile"), Some(1200));
    mock.assert_async().await;
}

#[tokio::test]
async fn malformed_repository_body_is_an_error() {
    require_localhost!();

    let server = MockServer::start_async().await;
    server
        .mock_async(|when, then| {
            when.method(GET).path("/repos/o/n");
            then.status(200).body("<html>not json</html>");
        })
        .await;

    let (client, backend) = client(&server, None);
    let err = client.fetch_repository("o", "n").await.unwrap_err();

    assert!(matches!(err, PulseError::Json(_)));
    assert!(backend.is_empty());
}
