//! Named event templates.
//!
//! An application registers the events it emits once (title, description,
//! emoji) and then logs them by name. Looking up an unregistered name fails
//! with [`LawgError::EventUndefined`].

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::error::{LawgError, Result};
use crate::models::NewLog;

/// Default fields for a named event. Every field is optional.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct EventTemplate {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub emoji: Option<String>,
}

/// Registry of event templates by name.
///
/// Deserializes from a JSON object of name to template:
///
/// ```
/// use lawg::EventTemplates;
///
/// let templates: EventTemplates = serde_json::from_str(r#"{
///     "deploy": {"title": "Deployed", "emoji": "🚀"},
///     "signup": {"description": "A new user signed up"}
/// }"#).unwrap();
///
/// let log = templates.new_log("signup", None).unwrap();
/// assert_eq!(log.title, "signup");
/// assert_eq!(log.description.as_deref(), Some("A new user signed up"));
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct EventTemplates {
    events: BTreeMap<String, EventTemplate>,
}

impl EventTemplates {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register or replace a template.
    pub fn register(&mut self, name: impl Into<String>, template: EventTemplate) -> &mut Self {
        self.events.insert(name.into(), template);
        self
    }

    pub fn get(&self, name: &str) -> Option<&EventTemplate> {
        self.events.get(name)
    }

    pub fn len(&self) -> usize {
        self.events.len()
    }

    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }

    /// Build a log for `event`.
    ///
    /// An explicit `description` wins over the template's. The title falls
    /// back to the event name when the template has none.
    ///
    /// # Errors
    ///
    /// Returns [`LawgError::EventUndefined`] if `event` is not registered.
    pub fn new_log(&self, event: &str, description: Option<&str>) -> Result<NewLog> {
        let template = self
            .get(event)
            .ok_or_else(|| LawgError::EventUndefined(event.to_string()))?;

        Ok(NewLog {
            title: template.title.clone().unwrap_or_else(|| event.to_string()),
            description: description
                .map(str::to_string)
                .or_else(|| template.description.clone()),
            emoji: template.emoji.clone(),
            ..NewLog::default()
        })
    }
}

impl<S: Into<String>> FromIterator<(S, EventTemplate)> for EventTemplates {
    fn from_iter<I: IntoIterator<Item = (S, EventTemplate)>>(iter: I) -> Self {
        Self {
            events: iter.into_iter().map(|(k, v)| (k.into(), v)).collect(),
        }
    }
}
