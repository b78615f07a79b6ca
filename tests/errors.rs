//! HTTP error mapping and response validation.

use lawg::{FieldError, HttpErrorKind, LawgClient, LawgError};
use serde_json::json;
use wiremock::matchers::{header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

const PROJECT_PATH: &str = "/v1/projects/acme";

async fn fetch_with(response: ResponseTemplate) -> LawgError {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path(PROJECT_PATH))
        .respond_with(response)
        .mount(&mock_server)
        .await;

    let client = LawgClient::new("test-token", &mock_server.uri()).unwrap();
    client.project("acme").fetch().await.unwrap_err()
}

#[tokio::test]
async fn test_error_envelope_maps_code_and_message() {
    let err = fetch_with(ResponseTemplate::new(409).set_body_json(json!({
        "success": false,
        "error": {"code": "conflict", "message": "Namespace taken"}
    })))
    .await;

    assert_eq!(err.http_kind(), Some(HttpErrorKind::Conflict));
    assert_eq!(err.status(), Some(409));
    match err {
        LawgError::Http { message, .. } => assert_eq!(message, "Namespace taken"),
        other => panic!("expected http error, got {other:?}"),
    }
}

#[tokio::test]
async fn test_unknown_error_code_is_other() {
    let err = fetch_with(ResponseTemplate::new(418).set_body_json(json!({
        "success": false,
        "error": {"code": "teapot", "message": "short and stout"}
    })))
    .await;

    assert_eq!(err.http_kind(), Some(HttpErrorKind::Other));
    assert_eq!(err.status(), Some(418));
}

#[tokio::test]
async fn test_plain_404_is_not_found_with_body_text() {
    let err = fetch_with(ResponseTemplate::new(404).set_body_string("no such project")).await;

    assert_eq!(err.http_kind(), Some(HttpErrorKind::NotFound));
    match err {
        LawgError::Http { message, .. } => assert_eq!(message, "no such project"),
        other => panic!("expected http error, got {other:?}"),
    }
}

#[tokio::test]
async fn test_404_message_field_is_used() {
    let err = fetch_with(
        ResponseTemplate::new(404).set_body_json(json!({"message": "gone fishing"})),
    )
    .await;

    assert_eq!(err.http_kind(), Some(HttpErrorKind::NotFound));
    match err {
        LawgError::Http { message, .. } => assert_eq!(message, "gone fishing"),
        other => panic!("expected http error, got {other:?}"),
    }
}

#[tokio::test]
async fn test_unparseable_500_uses_default_message() {
    let err = fetch_with(ResponseTemplate::new(500).set_body_string("<html>oops</html>")).await;

    assert_eq!(err.http_kind(), Some(HttpErrorKind::Other));
    assert_eq!(err.status(), Some(500));
    match err {
        LawgError::Http { message, .. } => assert_eq!(message, "An HTTP error occurred."),
        other => panic!("expected http error, got {other:?}"),
    }
}

#[tokio::test]
async fn test_failure_envelope_with_200_is_raised() {
    let err = fetch_with(ResponseTemplate::new(200).set_body_json(json!({
        "success": false,
        "error": {"code": "forbidden", "message": "not your project"}
    })))
    .await;

    assert_eq!(err.http_kind(), Some(HttpErrorKind::Forbidden));
}

#[tokio::test]
async fn test_failure_envelope_on_delete_is_raised() {
    let mock_server = MockServer::start().await;

    Mock::given(method("DELETE"))
        .and(path(PROJECT_PATH))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "success": false,
            "error": {"code": "forbidden", "message": "only owners can delete"}
        })))
        .expect(1)
        .mount(&mock_server)
        .await;

    let client = LawgClient::new("test-token", &mock_server.uri()).unwrap();
    let err = client.project("acme").delete().await.unwrap_err();

    assert_eq!(err.http_kind(), Some(HttpErrorKind::Forbidden));
    assert_eq!(err.status(), Some(200));
}

#[tokio::test]
async fn test_malformed_payload_is_a_validation_error() {
    let err = fetch_with(ResponseTemplate::new(200).set_body_json(json!({
        "success": true,
        "data": {
            "id": "project_1",
            "namespace": "acme",
            "name": "Acme",
            "flags": 0,
            "icon": null,
            "feeds": [{
                "id": "log_1",
                "project_id": "project_1",
                "name": "releases",
                "description": null,
                "emoji": null
            }],
            "members": []
        }
    })))
    .await;

    match err {
        LawgError::Validation(errors) => {
            assert_eq!(errors.schema, "Project");
            assert_eq!(
                errors.field("feeds[0].id"),
                Some(&FieldError::InvalidId { prefix: "feed" })
            );
        }
        other => panic!("expected validation error, got {other:?}"),
    }
}

#[tokio::test]
async fn test_token_is_sent_verbatim() {
    let mock_server = MockServer::start().await;

    Mock::given(method("DELETE"))
        .and(path(PROJECT_PATH))
        .and(header("authorization", "secret-token"))
        .respond_with(ResponseTemplate::new(204))
        .expect(1)
        .mount(&mock_server)
        .await;

    let client = LawgClient::new("secret-token", &mock_server.uri()).unwrap();
    client.project("acme").delete().await.unwrap();
}

#[test]
fn test_client_debug_hides_token() {
    let client = LawgClient::new("secret-token", "https://api.lawg.dev").unwrap();
    let debug = format!("{client:?}");
    assert!(!debug.contains("secret-token"));
    assert_eq!(client.base_url().as_str(), "https://api.lawg.dev/v1/");
}
