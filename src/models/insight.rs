//! Insight model and parameters.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::error::Result;
use crate::patch::{Patch, Payload};

/// A named numeric counter in a project.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InsightInfo {
    /// Server-assigned id (`insight_...`).
    pub id: String,
    pub title: String,
    #[serde(default)]
    pub description: Option<String>,
    /// Current value, as last reported by the server.
    pub value: f64,
    #[serde(default)]
    pub emoji: Option<String>,
    #[serde(default)]
    pub updated_at: Option<DateTime<Utc>>,
    pub created_at: DateTime<Utc>,
}

/// How an edit changes an insight's value.
///
/// Serializes as `{"set": v}` or `{"increment": v}`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum InsightValue {
    /// Replace the value.
    Set(f64),
    /// Add to the value on the server. Negative amounts decrement.
    Increment(f64),
}

/// An insight to create.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct NewInsight {
    pub title: String,
    pub description: Option<String>,
    pub emoji: Option<String>,
    /// Starting value. The server defaults to zero.
    pub value: Option<f64>,
}

impl NewInsight {
    pub fn new(title: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            ..Self::default()
        }
    }

    #[must_use]
    pub fn description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    #[must_use]
    pub fn emoji(mut self, emoji: impl Into<String>) -> Self {
        self.emoji = Some(emoji.into());
        self
    }

    #[must_use]
    pub fn value(mut self, value: f64) -> Self {
        self.value = Some(value);
        self
    }

    pub(crate) fn to_payload(&self) -> Result<Payload> {
        Payload::new()
            .set("title", &self.title)?
            .nullable("description", self.description.as_ref())?
            .nullable("emoji", self.emoji.as_ref())?
            .nullable("value", self.value)
    }
}

/// Changes to an insight. Fields left [`Patch::Unchanged`] are not sent.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct InsightEdit {
    pub title: Patch<String>,
    pub description: Patch<String>,
    pub emoji: Patch<String>,
    /// A value change, if any. One edit carries at most one.
    pub value: Option<InsightValue>,
}

impl InsightEdit {
    /// An edit that only changes the value.
    pub fn value(value: InsightValue) -> Self {
        Self {
            value: Some(value),
            ..Self::default()
        }
    }

    pub(crate) fn to_payload(&self) -> Result<Payload> {
        Payload::new()
            .field("title", &self.title)?
            .field("description", &self.description)?
            .field("emoji", &self.emoji)?
            .optional("value", self.value)
    }
}
