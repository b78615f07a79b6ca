//! Response normalization.
//!
//! Every lawg response is wrapped in an envelope:
//!
//! ```text
//! {"success": true,  "data": <object-or-array>}
//! {"success": false, "error": {"code": "...", "message": "..."}}
//! ```
//!
//! Failure statuses are turned into [`LawgError::Http`] before anything
//! looks at `data`.

use serde::Deserialize;
use serde_json::Value;

use crate::error::{FieldError, HttpErrorKind, LawgError, Result, ValidationErrors};
use crate::schema::Schema;

/// Message used when the server gives none.
pub const DEFAULT_ERROR_MESSAGE: &str = "An HTTP error occurred.";

/// How to validate the `data` of a success envelope.
#[derive(Debug, Clone, Copy)]
pub struct ResponseShape {
    pub schema: &'static Schema,
    /// `data` is a list of objects rather than a single object.
    pub many: bool,
}

impl ResponseShape {
    pub const fn one(schema: &'static Schema) -> Self {
        Self {
            schema,
            many: false,
        }
    }

    pub const fn many(schema: &'static Schema) -> Self {
        Self { schema, many: true }
    }
}

#[derive(Debug, Deserialize)]
struct ErrorEnvelope {
    success: bool,
    error: ApiError,
}

#[derive(Debug, Deserialize)]
struct ApiError {
    code: String,
    message: String,
}

/// Validate a raw response and unwrap its payload.
///
/// Returns `Value::Null` for `204 No Content` and for operations that expect
/// no payload (`shape` of `None`). An error envelope raises even on a 2xx
/// status, shaped or not.
///
/// # Errors
///
/// Returns [`LawgError::Http`] for failure statuses and error envelopes,
/// [`LawgError::Parse`] if a success body is not JSON, and
/// [`LawgError::Validation`] if the envelope or its payload is malformed.
pub fn normalize_response(status: u16, body: &str, shape: Option<ResponseShape>) -> Result<Value> {
    raise_for_status(status, body)?;

    if status == 204 {
        return Ok(Value::Null);
    }

    // Unshaped operations tolerate any body except an error envelope.
    let envelope: Value = match (serde_json::from_str(body), shape) {
        (Ok(envelope), _) => envelope,
        (Err(_), None) => return Ok(Value::Null),
        (Err(err), Some(_)) => return Err(err.into()),
    };
    if envelope.get("success") == Some(&Value::Bool(false)) {
        return Err(error_from_body(status, body));
    }
    let Some(shape) = shape else {
        return Ok(Value::Null);
    };

    let data = unwrap_success(envelope)?;
    if shape.many {
        Ok(Value::Array(shape.schema.load_many(&data)?))
    } else {
        Ok(Value::Object(shape.schema.load_value(&data)?))
    }
}

/// Fail with the mapped API error unless `status` is 2xx.
pub fn raise_for_status(status: u16, body: &str) -> Result<()> {
    if (200..300).contains(&status) {
        Ok(())
    } else {
        Err(error_from_body(status, body))
    }
}

/// Map an error body to a [`LawgError::Http`].
fn error_from_body(status: u16, body: &str) -> LawgError {
    match serde_json::from_str::<ErrorEnvelope>(body) {
        Ok(envelope) if !envelope.success => LawgError::Http {
            kind: HttpErrorKind::from_code(&envelope.error.code),
            status,
            message: envelope.error.message,
        },
        _ => {
            tracing::warn!(status, "response has no lawg error envelope");
            fallback_error(status, body)
        }
    }
}

/// Error for a body that never reached the API (gateway pages, framework
/// 404s and the like).
fn fallback_error(status: u16, body: &str) -> LawgError {
    if status != 404 {
        return LawgError::Http {
            kind: HttpErrorKind::Other,
            status,
            message: DEFAULT_ERROR_MESSAGE.to_string(),
        };
    }

    let from_json = serde_json::from_str::<Value>(body)
        .ok()
        .and_then(|json| json.get("message")?.as_str().map(str::to_string));
    let message = from_json
        .or_else(|| {
            let text = body.trim();
            (!text.is_empty()).then(|| text.to_string())
        })
        .unwrap_or_else(|| DEFAULT_ERROR_MESSAGE.to_string());

    LawgError::Http {
        kind: HttpErrorKind::NotFound,
        status,
        message,
    }
}

fn unwrap_success(envelope: Value) -> Result<Value> {
    let invalid = |field: &str, error| ValidationErrors::single("SuccessEnvelope", field, error);

    let Value::Object(mut envelope) = envelope else {
        return Err(invalid("_schema", FieldError::InvalidType { expected: "object" }).into());
    };

    match envelope.get("success") {
        Some(Value::Bool(true)) => {}
        None => return Err(invalid("success", FieldError::Missing).into()),
        Some(_) => {
            return Err(invalid("success", FieldError::InvalidType { expected: "boolean" }).into())
        }
    }

    envelope
        .remove("data")
        .ok_or_else(|| invalid("data", FieldError::Missing).into())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::schema::definitions::{FEED, LOG};
    use serde_json::json;

    fn feed_json() -> Value {
        json!({
            "id": "feed_abc",
            "project_id": "project_xyz",
            "name": "releases",
            "description": null,
            "emoji": null
        })
    }

    fn http_parts(err: LawgError) -> (HttpErrorKind, u16, String) {
        match err {
            LawgError::Http {
                kind,
                status,
                message,
            } => (kind, status, message),
            other => panic!("expected Http error, got {other:?}"),
        }
    }

    #[test]
    fn test_no_content_is_empty_regardless_of_body() {
        let shape = Some(ResponseShape::one(&FEED));
        assert_eq!(normalize_response(204, "", shape).unwrap(), Value::Null);
        assert_eq!(
            normalize_response(204, "not json at all", shape).unwrap(),
            Value::Null
        );
        assert_eq!(normalize_response(204, "{}", None).unwrap(), Value::Null);
    }

    #[test]
    fn test_no_shape_skips_payload() {
        let body = json!({"success": true, "data": null}).to_string();
        assert_eq!(normalize_response(200, &body, None).unwrap(), Value::Null);
    }

    #[test]
    fn test_success_unwraps_and_validates_data() {
        let body = json!({"success": true, "data": feed_json()}).to_string();
        let data = normalize_response(200, &body, Some(ResponseShape::one(&FEED))).unwrap();
        assert_eq!(data, feed_json());
    }

    #[test]
    fn test_many_mode_requires_list() {
        let body = json!({"success": true, "data": feed_json()}).to_string();
        let err = normalize_response(200, &body, Some(ResponseShape::many(&FEED))).unwrap_err();
        assert!(matches!(err, LawgError::Validation(_)));

        let body = json!({"success": true, "data": [feed_json(), feed_json()]}).to_string();
        let data = normalize_response(200, &body, Some(ResponseShape::many(&FEED))).unwrap();
        assert_eq!(data.as_array().map(Vec::len), Some(2));
    }

    #[test]
    fn test_not_found_envelope_carries_message() {
        let body = json!({
            "success": false,
            "error": {"code": "not_found", "message": "Feed not found"}
        })
        .to_string();
        let shape = Some(ResponseShape::one(&FEED));
        let (kind, status, message) =
            http_parts(normalize_response(404, &body, shape).unwrap_err());
        assert_eq!(kind, HttpErrorKind::NotFound);
        assert_eq!(status, 404);
        assert_eq!(message, "Feed not found");
    }

    #[test]
    fn test_error_codes_map_regardless_of_status() {
        let body = json!({
            "success": false,
            "error": {"code": "conflict", "message": "Feed already exists"}
        })
        .to_string();
        let (kind, status, _) = http_parts(raise_for_status(400, &body).unwrap_err());
        assert_eq!(kind, HttpErrorKind::Conflict);
        assert_eq!(status, 400);
    }

    #[test]
    fn test_unknown_code_is_generic() {
        let body = json!({
            "success": false,
            "error": {"code": "im_a_teapot", "message": "short and stout"}
        })
        .to_string();
        let (kind, status, message) = http_parts(raise_for_status(418, &body).unwrap_err());
        assert_eq!(kind, HttpErrorKind::Other);
        assert_eq!(status, 418);
        assert_eq!(message, "short and stout");
    }

    #[test]
    fn test_unparseable_404_uses_message_field() {
        let body = json!({
            "message": "Route GET:/v1/nope not found",
            "error": "Not Found",
            "statusCode": 404
        })
        .to_string();
        let (kind, _, message) = http_parts(raise_for_status(404, &body).unwrap_err());
        assert_eq!(kind, HttpErrorKind::NotFound);
        assert_eq!(message, "Route GET:/v1/nope not found");
    }

    #[test]
    fn test_unparseable_404_falls_back_to_text() {
        let (kind, _, message) = http_parts(raise_for_status(404, "no such page\n").unwrap_err());
        assert_eq!(kind, HttpErrorKind::NotFound);
        assert_eq!(message, "no such page");

        let (_, _, message) = http_parts(raise_for_status(404, "").unwrap_err());
        assert_eq!(message, DEFAULT_ERROR_MESSAGE);
    }

    #[test]
    fn test_unparseable_error_is_generic() {
        let (kind, status, message) =
            http_parts(raise_for_status(502, "<html>Bad Gateway</html>").unwrap_err());
        assert_eq!(kind, HttpErrorKind::Other);
        assert_eq!(status, 502);
        assert_eq!(message, DEFAULT_ERROR_MESSAGE);
    }

    #[test]
    fn test_success_status_with_error_envelope_raises() {
        let body = json!({
            "success": false,
            "error": {"code": "forbidden", "message": "nope"}
        })
        .to_string();
        let (kind, status, _) =
            http_parts(normalize_response(200, &body, Some(ResponseShape::one(&LOG))).unwrap_err());
        assert_eq!(kind, HttpErrorKind::Forbidden);
        assert_eq!(status, 200);
    }

    #[test]
    fn test_unshaped_success_with_error_envelope_raises() {
        let body = json!({
            "success": false,
            "error": {"code": "not_found", "message": "No such member"}
        })
        .to_string();
        let (kind, status, message) = http_parts(normalize_response(200, &body, None).unwrap_err());
        assert_eq!(kind, HttpErrorKind::NotFound);
        assert_eq!(status, 200);
        assert_eq!(message, "No such member");
    }

    #[test]
    fn test_unshaped_success_ignores_non_json_body() {
        assert_eq!(normalize_response(200, "OK", None).unwrap(), Value::Null);
        assert_eq!(normalize_response(200, "", None).unwrap(), Value::Null);
    }

    #[test]
    fn test_success_envelope_requires_data() {
        let body = json!({"success": true}).to_string();
        let err = normalize_response(200, &body, Some(ResponseShape::one(&FEED))).unwrap_err();
        match err {
            LawgError::Validation(errors) => {
                assert_eq!(errors.field("data"), Some(&FieldError::Missing));
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn test_response_payload_with_bad_id_fails() {
        let mut feed = feed_json();
        feed["id"] = json!("log_abc");
        let body = json!({"success": true, "data": feed}).to_string();
        let err = normalize_response(201, &body, Some(ResponseShape::one(&FEED))).unwrap_err();
        assert!(matches!(err, LawgError::Validation(_)));
    }
}
