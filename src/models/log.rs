//! Log model, tags and parameters.

use std::collections::BTreeMap;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::error::Result;
use crate::patch::{Patch, Payload};

/// A single log entry in a feed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LogInfo {
    /// Server-assigned id (`log_...`).
    pub id: String,
    pub project_id: String,
    pub feed_id: String,
    pub title: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub emoji: Option<String>,
}

/// Key-value metadata attached to a log.
pub type Tags = BTreeMap<String, TagValue>;

/// A scalar tag value.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum TagValue {
    Bool(bool),
    Int(i64),
    Float(f64),
    String(String),
}

impl From<bool> for TagValue {
    fn from(value: bool) -> Self {
        Self::Bool(value)
    }
}

impl From<i64> for TagValue {
    fn from(value: i64) -> Self {
        Self::Int(value)
    }
}

impl From<i32> for TagValue {
    fn from(value: i32) -> Self {
        Self::Int(value.into())
    }
}

impl From<f64> for TagValue {
    fn from(value: f64) -> Self {
        Self::Float(value)
    }
}

impl From<&str> for TagValue {
    fn from(value: &str) -> Self {
        Self::String(value.to_string())
    }
}

impl From<String> for TagValue {
    fn from(value: String) -> Self {
        Self::String(value)
    }
}

/// A log to create.
///
/// # Example
///
/// ```
/// use lawg::NewLog;
///
/// let log = NewLog::new("Deployed")
///     .description("v1.2.0 is live")
///     .emoji("🚀")
///     .tag("env", "prod")
///     .tag("build", 812);
/// assert_eq!(log.tags.as_ref().map(|t| t.len()), Some(2));
/// ```
#[derive(Debug, Clone, Default, PartialEq)]
pub struct NewLog {
    pub title: String,
    pub description: Option<String>,
    pub emoji: Option<String>,
    pub tags: Option<Tags>,
    /// When the logged event happened. The server uses the receive time if unset.
    pub timestamp: Option<DateTime<Utc>>,
    /// Whether project members should be notified.
    pub notify: Option<bool>,
}

impl NewLog {
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
    pub fn tag(mut self, key: impl Into<String>, value: impl Into<TagValue>) -> Self {
        self.tags
            .get_or_insert_with(Tags::new)
            .insert(key.into(), value.into());
        self
    }

    #[must_use]
    pub fn timestamp(mut self, timestamp: DateTime<Utc>) -> Self {
        self.timestamp = Some(timestamp);
        self
    }

    #[must_use]
    pub fn notify(mut self, notify: bool) -> Self {
        self.notify = Some(notify);
        self
    }

    pub(crate) fn to_payload(&self) -> Result<Payload> {
        Payload::new()
            .set("title", &self.title)?
            .nullable("description", self.description.as_ref())?
            .nullable("emoji", self.emoji.as_ref())?
            .nullable("tags", self.tags.as_ref())?
            .nullable("timestamp", self.timestamp.as_ref())?
            .nullable("notify", self.notify)
    }
}

/// Changes to a log. Fields left [`Patch::Unchanged`] are not sent.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct LogEdit {
    pub title: Patch<String>,
    pub description: Patch<String>,
    pub emoji: Patch<String>,
    pub tags: Patch<Tags>,
    pub timestamp: Patch<DateTime<Utc>>,
}

impl LogEdit {
    pub(crate) fn to_payload(&self) -> Result<Payload> {
        Payload::new()
            .field("title", &self.title)?
            .field("description", &self.description)?
            .field("emoji", &self.emoji)?
            .field("tags", &self.tags)?
            .field("timestamp", &self.timestamp)
    }
}
