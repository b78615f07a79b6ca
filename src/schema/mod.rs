//! Validation schemas.
//!
//! A [`Schema`] is a named list of [`Field`]s, each pairing a key with a
//! [`Rule`] and its presence requirements. Schemas validate raw JSON objects
//! on the way out (request bodies, slugs, query strings) and on the way in
//! (response payloads). Request schemas reject unknown keys; response
//! schemas drop them so new server fields never break old clients.

pub mod definitions;
pub mod fields;

use serde_json::{Map, Value};

use crate::error::{FieldError, FieldIssue, ValidationErrors};

/// Resource prefixes used by server-assigned identifiers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum IdPrefix {
    Project,
    Feed,
    Log,
    Insight,
    User,
}

impl IdPrefix {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Project => "project",
            Self::Feed => "feed",
            Self::Log => "log",
            Self::Insight => "insight",
            Self::User => "user",
        }
    }
}

/// What to do with keys a schema does not declare.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Unknown {
    /// Report each as [`FieldError::Unknown`].
    Raise,
    /// Drop them silently.
    Exclude,
}

/// Constraint on a single value.
#[derive(Debug, Clone, Copy)]
pub enum Rule {
    /// String with inclusive character-length bounds.
    Str { min: usize, max: usize },
    /// Any string.
    Text,
    /// Project namespace.
    Namespace,
    /// Prefixed identifier.
    Id(IdPrefix),
    /// Map of short keys to scalar values.
    Tags,
    /// Any number.
    Float,
    /// Integer in range; `default` is filled in when the key is absent.
    Int {
        min: i64,
        max: Option<i64>,
        default: Option<i64>,
    },
    Bool,
    /// RFC 3339 timestamp string.
    DateTime,
    /// Object validated by another schema.
    Nested(&'static Schema),
    /// Array of objects validated by another schema.
    List(&'static Schema),
}

/// A key in a schema.
#[derive(Debug, Clone, Copy)]
pub struct Field {
    pub name: &'static str,
    pub rule: Rule,
    pub required: bool,
    pub nullable: bool,
}

/// A named validation shape.
#[derive(Debug)]
pub struct Schema {
    pub name: &'static str,
    pub fields: &'static [Field],
    pub unknown: Unknown,
    /// When non-empty, exactly one of these keys must hold a non-null value.
    pub exactly_one_of: &'static [&'static str],
}

impl Schema {
    /// Validate an object, returning the accepted fields.
    ///
    /// Declared defaults are filled in for absent keys; unknown keys are
    /// handled per [`Schema::unknown`].
    pub fn load(&self, data: &Map<String, Value>) -> Result<Map<String, Value>, ValidationErrors> {
        let mut issues = Vec::new();
        let loaded = self.load_object(data, "", &mut issues);
        self.finish(loaded, issues)
    }

    /// Validate a single JSON value that must be an object.
    pub fn load_value(&self, value: &Value) -> Result<Map<String, Value>, ValidationErrors> {
        match value {
            Value::Object(map) => self.load(map),
            _ => Err(ValidationErrors::single(
                self.name,
                "_schema",
                FieldError::InvalidType { expected: "object" },
            )),
        }
    }

    /// Validate a JSON array of objects.
    pub fn load_many(&self, value: &Value) -> Result<Vec<Value>, ValidationErrors> {
        let Value::Array(items) = value else {
            return Err(ValidationErrors::single(
                self.name,
                "_schema",
                FieldError::InvalidType { expected: "list" },
            ));
        };

        let mut issues = Vec::new();
        let loaded = self.load_list(items, "", &mut issues);
        self.finish(loaded, issues)
    }

    fn finish<T>(&self, loaded: T, issues: Vec<FieldIssue>) -> Result<T, ValidationErrors> {
        if issues.is_empty() {
            Ok(loaded)
        } else {
            Err(ValidationErrors {
                schema: self.name,
                issues,
            })
        }
    }

    fn load_object(
        &self,
        data: &Map<String, Value>,
        path: &str,
        issues: &mut Vec<FieldIssue>,
    ) -> Map<String, Value> {
        let mut loaded = Map::new();

        for field in self.fields {
            let key = join_path(path, field.name);
            match data.get(field.name) {
                None => {
                    if let Rule::Int {
                        default: Some(default),
                        ..
                    } = field.rule
                    {
                        loaded.insert(field.name.to_string(), Value::from(default));
                    } else if field.required {
                        push(issues, key, FieldError::Missing);
                    }
                }
                Some(Value::Null) => {
                    if field.nullable {
                        loaded.insert(field.name.to_string(), Value::Null);
                    } else {
                        push(issues, key, FieldError::Null);
                    }
                }
                Some(value) => {
                    if let Some(value) = field.rule.check(value, &key, issues) {
                        loaded.insert(field.name.to_string(), value);
                    }
                }
            }
        }

        if self.unknown == Unknown::Raise {
            for key in data.keys() {
                if !self.fields.iter().any(|f| f.name == key.as_str()) {
                    push(issues, join_path(path, key), FieldError::Unknown);
                }
            }
        }

        if !self.exactly_one_of.is_empty() {
            let given = self
                .exactly_one_of
                .iter()
                .filter(|name| loaded.get(**name).is_some_and(|v| !v.is_null()))
                .count();
            if given != 1 {
                let key = if path.is_empty() { "_schema" } else { path };
                push(
                    issues,
                    key.to_string(),
                    FieldError::Exclusive {
                        fields: self.exactly_one_of,
                    },
                );
            }
        }

        loaded
    }

    fn load_list(&self, items: &[Value], path: &str, issues: &mut Vec<FieldIssue>) -> Vec<Value> {
        items
            .iter()
            .enumerate()
            .filter_map(|(i, item)| {
                let key = format!("{path}[{i}]");
                match item {
                    Value::Object(map) => Some(Value::Object(self.load_object(map, &key, issues))),
                    _ => {
                        push(issues, key, FieldError::InvalidType { expected: "object" });
                        None
                    }
                }
            })
            .collect()
    }
}

impl Rule {
    /// Check a non-null value, returning what to keep on success.
    fn check(&self, value: &Value, key: &str, issues: &mut Vec<FieldIssue>) -> Option<Value> {
        let result = match self {
            Self::Str { min, max } => as_str(value).and_then(|s| fields::length(s, *min, *max)),
            Self::Text => as_str(value).map(|_| ()),
            Self::Namespace => as_str(value).and_then(fields::namespace),
            Self::Id(prefix) => fields::prefixed_id(value, *prefix),
            Self::Tags => {
                return match value {
                    Value::Object(map) => match fields::tags(map) {
                        Ok(()) => Some(value.clone()),
                        Err((tag, err)) => {
                            push(issues, format!("{key}.{tag}"), err);
                            None
                        }
                    },
                    _ => {
                        let error = FieldError::InvalidType { expected: "mapping" };
                        push(issues, key.to_string(), error);
                        None
                    }
                };
            }
            Self::Float => {
                if value.is_number() {
                    Ok(())
                } else {
                    Err(FieldError::InvalidType { expected: "number" })
                }
            }
            Self::Int { min, max, .. } => match value.as_i64() {
                Some(n) => fields::range(n, *min, *max),
                None => Err(FieldError::InvalidType { expected: "integer" }),
            },
            Self::Bool => {
                if value.is_boolean() {
                    Ok(())
                } else {
                    Err(FieldError::InvalidType { expected: "boolean" })
                }
            }
            Self::DateTime => as_str(value).and_then(fields::datetime),
            Self::Nested(schema) => {
                return match value {
                    Value::Object(map) => {
                        Some(Value::Object(schema.load_object(map, key, issues)))
                    }
                    _ => {
                        let error = FieldError::InvalidType { expected: "object" };
                        push(issues, key.to_string(), error);
                        None
                    }
                };
            }
            Self::List(schema) => {
                return match value {
                    Value::Array(items) => Some(Value::Array(schema.load_list(items, key, issues))),
                    _ => {
                        push(issues, key.to_string(), FieldError::InvalidType { expected: "list" });
                        None
                    }
                };
            }
        };

        match result {
            Ok(()) => Some(value.clone()),
            Err(err) => {
                push(issues, key.to_string(), err);
                None
            }
        }
    }
}

fn as_str(value: &Value) -> Result<&str, FieldError> {
    value
        .as_str()
        .ok_or(FieldError::InvalidType { expected: "string" })
}

fn join_path(path: &str, name: &str) -> String {
    if path.is_empty() {
        name.to_string()
    } else {
        format!("{path}.{name}")
    }
}

fn push(issues: &mut Vec<FieldIssue>, field: String, error: FieldError) {
    issues.push(FieldIssue { field, error });
}
