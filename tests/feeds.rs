//! Feed operations against a mocked lawg API.

use lawg::{FeedEdit, LawgClient, LawgError, Pagination, Patch};
use serde_json::json;
use wiremock::matchers::{any, body_json, method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn feed_json(id: &str, name: &str) -> serde_json::Value {
    json!({
        "id": id,
        "project_id": "project_xyz",
        "name": name,
        "description": null,
        "emoji": null
    })
}

#[tokio::test]
async fn test_create_feed_sends_explicit_nulls() {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/v1/projects/acme/feeds"))
        .and(body_json(json!({
            "name": "releases",
            "description": null,
            "emoji": null
        })))
        .respond_with(ResponseTemplate::new(201).set_body_json(json!({
            "success": true,
            "data": feed_json("feed_abc", "releases")
        })))
        .expect(1)
        .mount(&mock_server)
        .await;

    let client = LawgClient::new("test-token", &mock_server.uri()).unwrap();
    let feed = client
        .project("acme")
        .feed("releases")
        .create(None, None)
        .await
        .unwrap();

    assert_eq!(feed.id, "feed_abc");
    assert_eq!(feed.project_id, "project_xyz");
    assert_eq!(feed.name, "releases");
    assert!(feed.description.is_none());
    assert!(feed.emoji.is_none());
    assert_eq!(feed.namespace(), "acme");
    assert!(!feed.is_deleted());
}

#[tokio::test]
async fn test_rename_rebinds_later_calls() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/v1/projects/acme/feeds/releases"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "success": true,
            "data": feed_json("feed_abc", "releases")
        })))
        .mount(&mock_server)
        .await;

    Mock::given(method("PATCH"))
        .and(path("/v1/projects/acme/feeds/releases"))
        .and(body_json(json!({"name": "deploys"})))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "success": true,
            "data": feed_json("feed_abc", "deploys")
        })))
        .expect(1)
        .mount(&mock_server)
        .await;

    Mock::given(method("DELETE"))
        .and(path("/v1/projects/acme/feeds/deploys"))
        .respond_with(ResponseTemplate::new(204))
        .expect(1)
        .mount(&mock_server)
        .await;

    let client = LawgClient::new("test-token", &mock_server.uri()).unwrap();
    let mut feed = client.project("acme").feed("releases").fetch().await.unwrap();

    let edit = FeedEdit {
        name: Patch::Set("deploys".to_string()),
        ..FeedEdit::default()
    };
    feed.edit(&edit).await.unwrap();
    assert_eq!(feed.name, "deploys");
    assert_eq!(feed.manager().name(), "deploys");

    feed.delete().await.unwrap();
    assert!(feed.is_deleted());
}

#[tokio::test]
async fn test_clearing_a_field_sends_null() {
    let mock_server = MockServer::start().await;

    let mut updated = feed_json("feed_abc", "releases");
    updated["emoji"] = json!("📦");

    Mock::given(method("PATCH"))
        .and(path("/v1/projects/acme/feeds/releases"))
        .and(body_json(json!({"description": null, "emoji": "📦"})))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "success": true,
            "data": updated
        })))
        .expect(1)
        .mount(&mock_server)
        .await;

    let client = LawgClient::new("test-token", &mock_server.uri()).unwrap();
    let edit = FeedEdit {
        description: Patch::Clear,
        emoji: Patch::Set("📦".to_string()),
        ..FeedEdit::default()
    };
    let feed = client
        .project("acme")
        .feed("releases")
        .edit(&edit)
        .await
        .unwrap();

    assert_eq!(feed.emoji.as_deref(), Some("📦"));
}

#[tokio::test]
async fn test_empty_edit_is_rejected_before_sending() {
    let mock_server = MockServer::start().await;

    Mock::given(any())
        .respond_with(ResponseTemplate::new(500))
        .expect(0)
        .mount(&mock_server)
        .await;

    let client = LawgClient::new("test-token", &mock_server.uri()).unwrap();
    let result = client
        .project("acme")
        .feed("releases")
        .edit(&FeedEdit::default())
        .await;

    assert!(matches!(result, Err(LawgError::EmptyBody)));
}

#[tokio::test]
async fn test_fetch_feeds_pages_with_query() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/v1/projects/acme/feeds"))
        .and(query_param("limit", "2"))
        .and(query_param("offset", "4"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "success": true,
            "data": [feed_json("feed_1", "a"), feed_json("feed_2", "b")]
        })))
        .expect(1)
        .mount(&mock_server)
        .await;

    let client = LawgClient::new("test-token", &mock_server.uri()).unwrap();
    let page = client
        .project("acme")
        .fetch_feeds(Pagination::new(2, 4))
        .await
        .unwrap();

    assert_eq!(page.len(), 2);
    assert!(page.has_more);
    assert_eq!(page.next().effective_offset(), 6);
    assert_eq!(page.items[1].name, "b");
}

#[tokio::test]
async fn test_feed_name_too_long_is_a_validation_error() {
    let client = LawgClient::new("test-token", "http://127.0.0.1:1").unwrap();

    let result = client
        .project("acme")
        .feed("a-feed-name-that-is-far-too-long")
        .fetch()
        .await;

    match result {
        Err(LawgError::Validation(errors)) => {
            assert_eq!(errors.schema, "FeedSlugs");
            assert!(errors.field("feed").is_some());
        }
        other => panic!("expected validation error, got {other:?}"),
    }
}
