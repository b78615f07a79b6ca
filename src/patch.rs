//! Partial-update values.
//!
//! Edit calls need three states per field: leave it alone, clear it, or set
//! it. [`Patch`] models that directly; [`Payload`] is the key-to-patch map the
//! request builder consumes for bodies, slugs and query strings.

use std::collections::BTreeMap;

use serde::Serialize;
use serde_json::{Map, Value};

use crate::error::Result;

/// A field in a partial update.
#[derive(Debug, Clone, Default, PartialEq)]
pub enum Patch<T> {
    /// Leave the field unchanged. Never sent.
    #[default]
    Unchanged,
    /// Clear the field. Sent as `null`.
    Clear,
    /// Set the field to a value.
    Set(T),
}

impl<T> Patch<T> {
    /// Returns true if the field should be left out of the request.
    pub fn is_unchanged(&self) -> bool {
        matches!(self, Self::Unchanged)
    }

    /// Borrow the inner value.
    pub fn as_ref(&self) -> Patch<&T> {
        match self {
            Self::Unchanged => Patch::Unchanged,
            Self::Clear => Patch::Clear,
            Self::Set(value) => Patch::Set(value),
        }
    }

    /// Map the value if set.
    pub fn map<U, F: FnOnce(T) -> U>(self, f: F) -> Patch<U> {
        match self {
            Self::Unchanged => Patch::Unchanged,
            Self::Clear => Patch::Clear,
            Self::Set(value) => Patch::Set(f(value)),
        }
    }
}

impl<T: Serialize> Patch<T> {
    /// Convert the value to JSON, keeping the patch state.
    pub fn to_json(&self) -> Result<Patch<Value>> {
        Ok(match self {
            Self::Unchanged => Patch::Unchanged,
            Self::Clear => Patch::Clear,
            Self::Set(value) => Patch::Set(serde_json::to_value(value)?),
        })
    }
}

/// `None` clears, `Some` sets. Create calls use this to send explicit nulls.
impl<T> From<Option<T>> for Patch<T> {
    fn from(value: Option<T>) -> Self {
        match value {
            Some(v) => Self::Set(v),
            None => Self::Clear,
        }
    }
}

/// Raw field data paired with a schema by the request builder.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Payload(BTreeMap<String, Patch<Value>>);

impl Payload {
    /// Create an empty payload.
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a field.
    pub fn field<T: Serialize>(mut self, key: &str, value: &Patch<T>) -> Result<Self> {
        self.0.insert(key.to_string(), value.to_json()?);
        Ok(self)
    }

    /// Add a field that is always set.
    pub fn set<T: Serialize>(self, key: &str, value: T) -> Result<Self> {
        self.field(key, &Patch::Set(value))
    }

    /// Add a field that is set when `Some` and cleared when `None`.
    pub fn nullable<T: Serialize>(self, key: &str, value: Option<T>) -> Result<Self> {
        self.field(key, &Patch::from(value))
    }

    /// Add a field that is set when `Some` and left out when `None`.
    pub fn optional<T: Serialize>(self, key: &str, value: Option<T>) -> Result<Self> {
        let patch = value.map_or(Patch::Unchanged, Patch::Set);
        self.field(key, &patch)
    }

    pub fn get(&self, key: &str) -> Option<&Patch<Value>> {
        self.0.get(key)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Drop every field marked [`Patch::Unchanged`]. Cleared fields stay.
    #[must_use]
    pub fn strip_unset(self) -> Self {
        Self(
            self.0
                .into_iter()
                .filter(|(_, value)| !value.is_unchanged())
                .collect(),
        )
    }

    /// Render as a JSON object. Unchanged fields are skipped.
    pub fn to_map(&self) -> Map<String, Value> {
        self.0
            .iter()
            .filter_map(|(key, value)| match value {
                Patch::Unchanged => None,
                Patch::Clear => Some((key.clone(), Value::Null)),
                Patch::Set(v) => Some((key.clone(), v.clone())),
            })
            .collect()
    }
}

impl FromIterator<(String, Patch<Value>)> for Payload {
    fn from_iter<I: IntoIterator<Item = (String, Patch<Value>)>>(iter: I) -> Self {
        Self(iter.into_iter().collect())
    }
}
