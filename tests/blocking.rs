//! The blocking client against a mocked lawg API.
//!
//! `reqwest::blocking` must not run on an async worker, so each test drives
//! the client from `spawn_blocking` while wiremock serves on the runtime.

use lawg::{BlockingClient, LawgError, NewLog, Pagination};
use serde_json::json;
use wiremock::matchers::{body_json, method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn log_json(id: &str, title: &str) -> serde_json::Value {
    json!({
        "id": id,
        "project_id": "project_xyz",
        "feed_id": "feed_abc",
        "title": title,
        "description": null,
        "emoji": null
    })
}

#[tokio::test(flavor = "multi_thread")]
async fn test_blocking_log_lifecycle() {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/v1/projects/acme/feeds/releases/logs"))
        .and(body_json(json!({
            "title": "Deployed",
            "description": null,
            "emoji": null,
            "tags": null,
            "timestamp": null,
            "notify": null
        })))
        .respond_with(ResponseTemplate::new(201).set_body_json(json!({
            "success": true,
            "data": log_json("log_1", "Deployed")
        })))
        .expect(1)
        .mount(&mock_server)
        .await;

    Mock::given(method("DELETE"))
        .and(path("/v1/projects/acme/feeds/releases/logs/log_1"))
        .respond_with(ResponseTemplate::new(204))
        .expect(1)
        .mount(&mock_server)
        .await;

    let uri = mock_server.uri();
    tokio::task::spawn_blocking(move || {
        let client = BlockingClient::new("test-token", &uri).unwrap();
        let mut log = client
            .project("acme")
            .feed("releases")
            .log(NewLog::new("Deployed"))
            .unwrap();

        assert_eq!(log.title, "Deployed");

        log.delete().unwrap();
        assert!(matches!(log.delete(), Err(LawgError::AlreadyDeleted("log"))));
    })
    .await
    .unwrap();
}

#[tokio::test(flavor = "multi_thread")]
async fn test_blocking_fetch_logs_page() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/v1/projects/acme/feeds/releases/logs"))
        .and(query_param("limit", "2"))
        .and(query_param("offset", "0"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "success": true,
            "data": [log_json("log_1", "Deployed"), log_json("log_2", "Rolled back")]
        })))
        .expect(1)
        .mount(&mock_server)
        .await;

    let uri = mock_server.uri();
    let titles = tokio::task::spawn_blocking(move || {
        let client = BlockingClient::new("test-token", &uri).unwrap();
        let page = client
            .project("acme")
            .feed("releases")
            .fetch_logs(Pagination::new(2, 0))
            .unwrap();
        assert!(page.has_more);
        page.items
            .iter()
            .map(|log| log.title.clone())
            .collect::<Vec<_>>()
    })
    .await
    .unwrap();

    assert_eq!(titles, ["Deployed", "Rolled back"]);
}

#[tokio::test(flavor = "multi_thread")]
async fn test_blocking_error_mapping() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/v1/projects/acme/insights/insight_1"))
        .respond_with(ResponseTemplate::new(404).set_body_json(json!({
            "success": false,
            "error": {"code": "not_found", "message": "No insight found"}
        })))
        .mount(&mock_server)
        .await;

    let uri = mock_server.uri();
    let err = tokio::task::spawn_blocking(move || {
        let client = BlockingClient::new("test-token", &uri).unwrap();
        client.project("acme").fetch_insight("insight_1").unwrap_err()
    })
    .await
    .unwrap();

    assert_eq!(err.status(), Some(404));
    assert_eq!(err.to_string(), "lawg API error (404, not_found): No insight found");
}
