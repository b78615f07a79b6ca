//! E2E tests using the mock lawg server.
//!
//! These tests exercise full workflows against the mock server,
//! testing realistic scenarios rather than individual endpoints.

#![cfg(feature = "test-server")]

use lawg::mock_server::{Fixtures, MockServer, MockState};
use lawg::{
    BlockingClient, FeedEdit, HttpErrorKind, LawgClient, LawgError, LogEdit, NewInsight, NewLog,
    Pagination, Patch,
};

fn is_http(err: &LawgError, kind: HttpErrorKind) -> bool {
    err.http_kind() == Some(kind)
}

// =============================================================================
// Server Lifecycle Tests
// =============================================================================

#[tokio::test]
async fn test_server_starts_on_random_port() {
    let server1 = MockServer::start().await;
    let server2 = MockServer::start().await;

    // Both servers should have different URLs
    assert_ne!(server1.url(), server2.url());

    server1.shutdown().await;
    server2.shutdown().await;
}

#[tokio::test]
async fn test_server_shutdown_is_clean() {
    let server = MockServer::start().await;
    let url = server.url().to_string();

    server.shutdown().await;

    // After shutdown, server should not respond
    let client = reqwest::Client::new();
    let result = client.get(format!("{}/health", url)).send().await;

    assert!(result.is_err());
}

// =============================================================================
// Project Workflow Tests
// =============================================================================

#[tokio::test]
async fn test_project_lifecycle() {
    let server = MockServer::start_empty().await;
    let client = LawgClient::new("test-token", server.url()).unwrap();
    let manager = client.project("newco");

    // Name defaults to the namespace
    let mut project = manager.create(None).await.unwrap();
    assert_eq!(project.name, "newco");
    assert!(project.id.starts_with("project_"));

    // A second create with the same namespace conflicts
    let err = manager.create(Some("Again")).await.unwrap_err();
    assert!(is_http(&err, HttpErrorKind::Conflict));

    project.edit("New Co").await.unwrap();
    assert_eq!(project.name, "New Co");
    assert_eq!(manager.fetch().await.unwrap().name, "New Co");

    project.delete().await.unwrap();
    assert!(matches!(
        project.delete().await,
        Err(LawgError::AlreadyDeleted("project"))
    ));

    let err = manager.fetch().await.unwrap_err();
    assert!(is_http(&err, HttpErrorKind::NotFound));

    server.shutdown().await;
}

#[tokio::test]
async fn test_fetch_projects_pages() {
    let state = MockState::new()
        .with_project(Fixtures::project("project_a", "alpha", "Alpha"))
        .with_project(Fixtures::project("project_b", "beta", "Beta"))
        .with_project(Fixtures::project("project_c", "gamma", "Gamma"));
    let server = MockServer::with_state(state).await;
    let client = LawgClient::new("test-token", server.url()).unwrap();

    let first = client.fetch_projects(Pagination::new(2, 0)).await.unwrap();
    assert_eq!(first.len(), 2);
    assert!(first.has_more);

    let second = client.fetch_projects(first.next()).await.unwrap();
    assert_eq!(second.len(), 1);
    assert!(!second.has_more);
    assert_eq!(second.items[0].namespace, "gamma");

    server.shutdown().await;
}

#[tokio::test]
async fn test_membership_workflow() {
    let server = MockServer::start().await;
    let client = LawgClient::new("test-token", server.url()).unwrap();
    let project = client.project("acme");

    project.invite_member("bob").await.unwrap();
    let err = project.invite_member("bob").await.unwrap_err();
    assert!(is_http(&err, HttpErrorKind::Conflict));

    project.revoke_invite("bob").await.unwrap();
    let err = project.revoke_invite("bob").await.unwrap_err();
    assert!(is_http(&err, HttpErrorKind::NotFound));

    let err = project.invite_member("nobody").await.unwrap_err();
    assert!(is_http(&err, HttpErrorKind::NotFound));

    project.remove_member("alice").await.unwrap();
    assert!(project.fetch().await.unwrap().members.is_empty());

    server.shutdown().await;
}

// =============================================================================
// Feed and Log Workflow Tests
// =============================================================================

#[tokio::test]
async fn test_feed_and_log_workflow() {
    let server = MockServer::start().await;
    let client = LawgClient::new("test-token", server.url()).unwrap();
    let project = client.project("acme");

    let mut feed = project
        .feed("changelog")
        .create(Some("Product changes"), Some("📝"))
        .await
        .unwrap();
    assert_eq!(feed.description.as_deref(), Some("Product changes"));

    feed.log(NewLog::new("Shipped search").tag("team", "core"))
        .await
        .unwrap();
    let mut second = feed
        .log(NewLog::new("Shipped export").description("CSV only"))
        .await
        .unwrap();

    // Clearing a field
    let edit = LogEdit {
        description: Patch::Clear,
        ..LogEdit::default()
    };
    second.edit(&edit).await.unwrap();
    assert!(second.description.is_none());

    // Rename, then keep using the facade
    let rename = FeedEdit {
        name: Patch::Set("news".to_string()),
        ..FeedEdit::default()
    };
    feed.edit(&rename).await.unwrap();
    assert_eq!(feed.name, "news");

    let logs = feed.fetch_logs(Pagination::default()).await.unwrap();
    assert_eq!(logs.len(), 2);
    assert_eq!(logs.items[0].title, "Shipped search");
    assert_eq!(logs.items[1].feed(), "news");

    // The old name is gone
    let err = project.feed("changelog").fetch().await.unwrap_err();
    assert!(is_http(&err, HttpErrorKind::NotFound));

    feed.delete().await.unwrap();
    assert!(matches!(
        feed.log(NewLog::new("Too late")).await,
        Err(LawgError::AlreadyDeleted("feed"))
    ));

    let project = project.fetch().await.unwrap();
    assert!(project.info().feed("news").is_none());

    server.shutdown().await;
}

#[tokio::test]
async fn test_created_log_is_visible_in_state() {
    let server = MockServer::start().await;
    let client = LawgClient::new("test-token", server.url()).unwrap();

    let log = client
        .project("acme")
        .feed("alerts")
        .log(NewLog::new("Disk full"))
        .await
        .unwrap();

    let state = server.state();
    let state = state.read().await;
    let stored = state.list_logs("feed_alerts");
    assert_eq!(stored.len(), 1);
    assert_eq!(stored[0].id, log.id);

    drop(state);
    server.shutdown().await;
}

// =============================================================================
// Insight Workflow Tests
// =============================================================================

#[tokio::test]
async fn test_insight_workflow() {
    let server = MockServer::start().await;
    let client = LawgClient::new("test-token", server.url()).unwrap();
    let project = client.project("acme");

    let mut insight = project
        .create_insight(&NewInsight::new("Revenue").value(100.0))
        .await
        .unwrap();
    assert_eq!(insight.value, 100.0);
    assert!(insight.updated_at.is_none());

    insight.increment(5.0).await.unwrap();
    assert_eq!(insight.value, 105.0);
    assert!(insight.updated_at.is_some());

    insight.set(1.0).await.unwrap();
    assert_eq!(insight.value, 1.0);

    // The seeded counter is untouched
    let signups = project.fetch_insight("insight_signups").await.unwrap();
    assert_eq!(signups.value, 10.0);

    let id = insight.id.clone();
    insight.delete().await.unwrap();
    let err = project.fetch_insight(&id).await.unwrap_err();
    assert!(is_http(&err, HttpErrorKind::NotFound));

    server.shutdown().await;
}

// =============================================================================
// Authentication and Transport Tests
// =============================================================================

#[tokio::test]
async fn test_required_token_is_enforced() {
    let state = MockState::new()
        .with_project(Fixtures::project("project_a", "acme", "Acme"))
        .with_required_token("secret");
    let server = MockServer::with_state(state).await;

    let wrong = LawgClient::new("wrong", server.url()).unwrap();
    let err = wrong.project("acme").fetch().await.unwrap_err();
    assert!(is_http(&err, HttpErrorKind::Unauthorized));
    assert_eq!(err.status(), Some(401));

    let right = LawgClient::new("secret", server.url()).unwrap();
    assert_eq!(right.project("acme").fetch().await.unwrap().name, "Acme");

    server.shutdown().await;
}

#[tokio::test(flavor = "multi_thread")]
async fn test_blocking_client_against_mock_server() {
    let server = MockServer::start().await;
    let url = server.url().to_string();

    let value = tokio::task::spawn_blocking(move || {
        let client = BlockingClient::new("test-token", &url).unwrap();
        let mut insight = client
            .project("acme")
            .fetch_insight("insight_signups")
            .unwrap();
        insight.increment(2.0).unwrap();
        insight.value
    })
    .await
    .unwrap();

    assert_eq!(value, 12.0);

    server.shutdown().await;
}
