//! Request construction.
//!
//! Turns a path template plus raw slug, body and query data into the final
//! relative URL, JSON body and query pairs. Everything here is pure: no I/O,
//! no shared state, safe to call from any thread.

use serde_json::{Map, Value};

use crate::error::{FieldError, LawgError, Result, ValidationErrors};
use crate::patch::Payload;
use crate::schema::Schema;

/// Raw data paired with the schema that must accept it.
#[derive(Debug, Clone)]
pub struct WithSchema {
    pub data: Payload,
    pub schema: &'static Schema,
}

impl WithSchema {
    pub fn new(data: Payload, schema: &'static Schema) -> Self {
        Self { data, schema }
    }

    /// Strip unchanged fields and validate the rest.
    fn load(self) -> Result<Map<String, Value>> {
        let data = self.data.strip_unset();
        Ok(self.schema.load(&data.to_map())?)
    }
}

/// Build the final URL and body for a request.
///
/// # Errors
///
/// Returns [`LawgError::EmptyBody`] if a body is given but nothing is left
/// once [`Patch::Unchanged`](crate::Patch::Unchanged) fields are dropped and
/// the schema has run, and
/// [`LawgError::Validation`] if a slug or body field fails its schema or a
/// placeholder has no slug.
pub fn build_request(
    template: &str,
    body: Option<WithSchema>,
    slugs: Option<WithSchema>,
) -> Result<(String, Option<Value>)> {
    let body = prepare_body(body)?;
    let url = prepare_url(template, slugs)?;
    Ok((url, body))
}

/// Strip unchanged fields from a body and validate what is left.
///
/// Emptiness is judged on the validated body, after defaults are filled in.
pub fn prepare_body(body: Option<WithSchema>) -> Result<Option<Value>> {
    let Some(body) = body else {
        return Ok(None);
    };

    let loaded = body.load()?;
    if loaded.is_empty() {
        return Err(LawgError::EmptyBody);
    }
    Ok(Some(Value::Object(loaded)))
}

/// Validate slugs and substitute them into `{name}` placeholders.
///
/// Substituted values are percent-encoded.
pub fn prepare_url(template: &str, slugs: Option<WithSchema>) -> Result<String> {
    let (schema_name, slugs) = match slugs {
        Some(slugs) => (slugs.schema.name, slugs.load()?),
        None => ("UrlSlugs", Map::new()),
    };

    let mut url = String::with_capacity(template.len());
    let mut rest = template;

    while let Some(open) = rest.find('{') {
        let Some(close) = rest[open..].find('}').map(|i| open + i) else {
            break;
        };
        let name = &rest[open + 1..close];
        let value = slugs.get(name).and_then(slug_text).ok_or_else(|| {
            ValidationErrors::single(schema_name, name, FieldError::Missing)
        })?;

        url.push_str(&rest[..open]);
        url.push_str(&urlencoding::encode(&value));
        rest = &rest[close + 1..];
    }
    url.push_str(rest);

    Ok(url)
}

/// Validate query parameters, filling in declared defaults.
///
/// Unlike bodies, an empty query is fine.
pub fn prepare_query(query: Option<WithSchema>) -> Result<Vec<(String, String)>> {
    let Some(query) = query else {
        return Ok(Vec::new());
    };

    Ok(query
        .load()?
        .into_iter()
        .filter_map(|(key, value)| slug_text(&value).map(|v| (key, v)))
        .collect())
}

fn slug_text(value: &Value) -> Option<String> {
    match value {
        Value::String(s) => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        Value::Bool(b) => Some(b.to_string()),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::patch::Patch;
    use crate::schema::definitions::{
        FEED_CREATE_BODY, FEED_PATCH_BODY, FEED_SLUGS, LOG_PATCH_BODY, LOG_SLUGS,
        NAMESPACE_SLUGS, PAGINATION_QUERY,
    };
    use serde_json::json;

    fn slugs(pairs: &[(&str, &str)], schema: &'static Schema) -> WithSchema {
        let data = pairs
            .iter()
            .fold(Payload::new(), |p, (k, v)| p.set(k, *v).unwrap());
        WithSchema::new(data, schema)
    }

    #[test]
    fn test_create_feed_body_keeps_explicit_nulls() {
        let body = Payload::new()
            .set("name", "releases")
            .unwrap()
            .nullable("description", None::<String>)
            .unwrap()
            .nullable("emoji", None::<String>)
            .unwrap();

        let (url, body) = build_request(
            "projects/{namespace}/feeds",
            Some(WithSchema::new(body, &FEED_CREATE_BODY)),
            Some(slugs(&[("namespace", "acme")], &NAMESPACE_SLUGS)),
        )
        .unwrap();

        assert_eq!(url, "projects/acme/feeds");
        assert_eq!(
            body,
            Some(json!({"name": "releases", "description": null, "emoji": null}))
        );
    }

    #[test]
    fn test_patch_body_contains_only_changed_fields() {
        let body = Payload::new()
            .field("title", &Patch::<String>::Unchanged)
            .unwrap()
            .field("description", &Patch::Set("new desc"))
            .unwrap()
            .field("emoji", &Patch::<String>::Unchanged)
            .unwrap();

        let (url, body) = build_request(
            "projects/{namespace}/feeds/{feed}/logs/{log_id}",
            Some(WithSchema::new(body, &LOG_PATCH_BODY)),
            Some(slugs(
                &[("namespace", "acme"), ("feed", "releases"), ("log_id", "log_1")],
                &LOG_SLUGS,
            )),
        )
        .unwrap();

        assert_eq!(url, "projects/acme/feeds/releases/logs/log_1");
        assert_eq!(body, Some(json!({"description": "new desc"})));
    }

    #[test]
    fn test_empty_patch_body_is_rejected() {
        let body = Payload::new()
            .field("name", &Patch::<String>::Unchanged)
            .unwrap()
            .field("description", &Patch::<String>::Unchanged)
            .unwrap();

        let err = build_request(
            "projects/{namespace}/feeds/{feed}",
            Some(WithSchema::new(body, &FEED_PATCH_BODY)),
            Some(slugs(&[("namespace", "acme"), ("feed", "releases")], &FEED_SLUGS)),
        )
        .unwrap_err();

        assert!(matches!(err, LawgError::EmptyBody));
    }

    #[test]
    fn test_empty_body_reports_missing_required_fields() {
        let err = prepare_body(Some(WithSchema::new(Payload::new(), &FEED_CREATE_BODY)))
            .unwrap_err();
        match err {
            LawgError::Validation(errors) => {
                assert_eq!(errors.field("name"), Some(&FieldError::Missing));
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn test_schema_defaults_make_body_non_empty() {
        let body = prepare_body(Some(WithSchema::new(Payload::new(), &PAGINATION_QUERY))).unwrap();
        assert_eq!(body, Some(json!({"limit": 25, "offset": 0})));
    }

    #[test]
    fn test_cleared_field_is_not_empty() {
        let body = Payload::new()
            .field("emoji", &Patch::<String>::Clear)
            .unwrap();
        let body = prepare_body(Some(WithSchema::new(body, &FEED_PATCH_BODY))).unwrap();
        assert_eq!(body, Some(json!({"emoji": null})));
    }

    #[test]
    fn test_slugs_resolve_every_placeholder() {
        let url = prepare_url(
            "projects/{namespace}/feeds/{feed}/logs/{log_id}",
            Some(slugs(
                &[("namespace", "acme"), ("feed", "releases"), ("log_id", "log_1")],
                &LOG_SLUGS,
            )),
        )
        .unwrap();
        assert!(!url.contains('{') && !url.contains('}'));
    }

    #[test]
    fn test_slug_values_are_percent_encoded() {
        let url = prepare_url(
            "projects/{namespace}/feeds/{feed}",
            Some(slugs(&[("namespace", "acme"), ("feed", "ci/cd builds")], &FEED_SLUGS)),
        )
        .unwrap();
        assert_eq!(url, "projects/acme/feeds/ci%2Fcd%20builds");
    }

    #[test]
    fn test_missing_slug_is_validation_error() {
        let err = prepare_url("projects/{namespace}/feeds/{feed}", None).unwrap_err();
        match err {
            LawgError::Validation(errors) => {
                assert_eq!(errors.field("namespace"), Some(&FieldError::Missing));
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn test_invalid_slug_fails_schema() {
        let err = prepare_url(
            "projects/{namespace}",
            Some(slugs(&[("namespace", "Not Valid")], &NAMESPACE_SLUGS)),
        )
        .unwrap_err();
        assert!(matches!(err, LawgError::Validation(_)));
    }

    #[test]
    fn test_log_slug_requires_log_prefix() {
        let err = prepare_url(
            "projects/{namespace}/feeds/{feed}/logs/{log_id}",
            Some(slugs(
                &[("namespace", "acme"), ("feed", "releases"), ("log_id", "insight_1")],
                &LOG_SLUGS,
            )),
        )
        .unwrap_err();
        match err {
            LawgError::Validation(errors) => assert_eq!(
                errors.field("log_id"),
                Some(&FieldError::InvalidId { prefix: "log" })
            ),
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn test_query_applies_defaults() {
        let query =
            prepare_query(Some(WithSchema::new(Payload::new(), &PAGINATION_QUERY))).unwrap();
        assert_eq!(
            query,
            vec![
                ("limit".to_string(), "25".to_string()),
                ("offset".to_string(), "0".to_string())
            ]
        );
    }

    #[test]
    fn test_template_without_placeholders_passes_through() {
        assert_eq!(prepare_url("projects", None).unwrap(), "projects");
    }
}
