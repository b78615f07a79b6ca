//! Field validators.
//!
//! Each function checks one primitive constraint and reports the first
//! violation as a [`FieldError`]. The schema engine decides which field the
//! error belongs to.

use std::sync::LazyLock;

use regex::Regex;
use serde_json::{Map, Value};

use super::IdPrefix;
use crate::error::FieldError;

/// Pattern a project namespace must fully match.
pub const NAMESPACE_PATTERN: &str = r"^[a-z0-9_-]+$";

/// Namespace length bounds.
pub const NAMESPACE_MAX_LEN: usize = 32;

/// Maximum length of a tag key.
pub const TAG_KEY_MAX_LEN: usize = 175;

static NAMESPACE_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(NAMESPACE_PATTERN).expect("namespace pattern is valid"));

/// Inclusive length bounds, counted in characters.
pub fn length(value: &str, min: usize, max: usize) -> Result<(), FieldError> {
    let len = value.chars().count();
    if len < min || len > max {
        return Err(FieldError::Length { min, max });
    }
    Ok(())
}

/// Project namespace: 1-32 characters of `[a-z0-9_-]`.
pub fn namespace(value: &str) -> Result<(), FieldError> {
    length(value, 1, NAMESPACE_MAX_LEN)?;
    if !NAMESPACE_RE.is_match(value) {
        return Err(FieldError::Pattern {
            pattern: NAMESPACE_PATTERN,
        });
    }
    Ok(())
}

/// Server-assigned identifier starting with `{prefix}_`.
///
/// Non-strings fail as [`FieldError::InvalidType`], the empty string as
/// [`FieldError::Blank`], and anything else without the prefix as
/// [`FieldError::InvalidId`].
pub fn prefixed_id(value: &Value, prefix: IdPrefix) -> Result<(), FieldError> {
    let Value::String(id) = value else {
        return Err(FieldError::InvalidType { expected: "string" });
    };
    if id.is_empty() {
        return Err(FieldError::Blank);
    }
    let tag = prefix.as_str();
    match id.strip_prefix(tag) {
        Some(rest) if rest.starts_with('_') => Ok(()),
        _ => Err(FieldError::InvalidId { prefix: tag }),
    }
}

/// Tag map: keys of 1-175 characters, scalar values.
///
/// On failure returns the offending key along with the error.
pub fn tags(map: &Map<String, Value>) -> Result<(), (String, FieldError)> {
    for (key, value) in map {
        length(key, 1, TAG_KEY_MAX_LEN).map_err(|err| (key.clone(), err))?;
        match value {
            Value::String(_) | Value::Number(_) | Value::Bool(_) => {}
            _ => {
                return Err((
                    key.clone(),
                    FieldError::InvalidType {
                        expected: "string, integer, float or boolean",
                    },
                ))
            }
        }
    }
    Ok(())
}

/// Integer range, `max` of `None` meaning unbounded.
pub fn range(value: i64, min: i64, max: Option<i64>) -> Result<(), FieldError> {
    if value < min || max.is_some_and(|m| value > m) {
        return Err(FieldError::Range { min, max });
    }
    Ok(())
}

/// RFC 3339 timestamp.
pub fn datetime(value: &str) -> Result<(), FieldError> {
    chrono::DateTime::parse_from_rfc3339(value)
        .map(|_| ())
        .map_err(|_| FieldError::InvalidType {
            expected: "datetime",
        })
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_length_counts_characters() {
        assert!(length("🚀", 1, 1).is_ok());
        assert_eq!(length("", 1, 32), Err(FieldError::Length { min: 1, max: 32 }));
        assert!(length(&"a".repeat(24), 1, 24).is_ok());
        assert!(length(&"a".repeat(25), 1, 24).is_err());
    }

    #[test]
    fn test_namespace() {
        assert!(namespace("acme").is_ok());
        assert!(namespace("lawg-py_2").is_ok());
        assert!(matches!(namespace("Acme"), Err(FieldError::Pattern { .. })));
        assert!(matches!(namespace("a b"), Err(FieldError::Pattern { .. })));
        assert!(matches!(namespace(""), Err(FieldError::Length { .. })));
        assert!(matches!(
            namespace(&"a".repeat(33)),
            Err(FieldError::Length { .. })
        ));
    }

    #[test]
    fn test_prefixed_id_distinguishes_failures() {
        assert!(prefixed_id(&json!("log_123"), IdPrefix::Log).is_ok());
        assert_eq!(
            prefixed_id(&json!(""), IdPrefix::Log),
            Err(FieldError::Blank)
        );
        assert_eq!(
            prefixed_id(&json!(42), IdPrefix::Log),
            Err(FieldError::InvalidType { expected: "string" })
        );
        assert_eq!(
            prefixed_id(&json!("feed_123"), IdPrefix::Log),
            Err(FieldError::InvalidId { prefix: "log" })
        );
        // the underscore is part of the prefix
        assert_eq!(
            prefixed_id(&json!("logs123"), IdPrefix::Log),
            Err(FieldError::InvalidId { prefix: "log" })
        );
        assert_eq!(
            prefixed_id(&json!("log"), IdPrefix::Log),
            Err(FieldError::InvalidId { prefix: "log" })
        );
    }

    #[test]
    fn test_tags() {
        let ok = json!({"env": "prod", "retries": 3, "ratio": 0.5, "paid": true});
        assert!(tags(ok.as_object().unwrap()).is_ok());

        let nested = json!({"meta": {"a": 1}});
        let (key, err) = tags(nested.as_object().unwrap()).unwrap_err();
        assert_eq!(key, "meta");
        assert!(matches!(err, FieldError::InvalidType { .. }));

        let mut long_key = Map::new();
        long_key.insert("k".repeat(176), json!("v"));
        assert!(tags(&long_key).is_err());
    }

    #[test]
    fn test_range() {
        assert!(range(1, 1, Some(100)).is_ok());
        assert!(range(100, 1, Some(100)).is_ok());
        assert!(range(0, 1, Some(100)).is_err());
        assert!(range(101, 1, Some(100)).is_err());
        assert!(range(1_000_000, 0, None).is_ok());
    }

    #[test]
    fn test_datetime() {
        assert!(datetime("2023-06-01T12:00:00Z").is_ok());
        assert!(datetime("2023-06-01T12:00:00.123+02:00").is_ok());
        assert!(datetime("yesterday").is_err());
    }
}
