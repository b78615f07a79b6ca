//! Feed model and parameters.

use serde::{Deserialize, Serialize};

use crate::error::Result;
use crate::patch::{Patch, Payload};

/// A named stream of logs within a project.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FeedInfo {
    /// Server-assigned id (`feed_...`).
    pub id: String,

    /// Id of the owning project.
    pub project_id: String,

    /// Feed name, unique within the project. Used in URLs.
    pub name: String,

    #[serde(default)]
    pub description: Option<String>,

    #[serde(default)]
    pub emoji: Option<String>,
}

/// Changes to a feed. Fields left [`Patch::Unchanged`] are not sent.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FeedEdit {
    /// New name. Renaming changes the feed's URL.
    pub name: Patch<String>,
    pub description: Patch<String>,
    pub emoji: Patch<String>,
}

impl FeedEdit {
    pub(crate) fn to_payload(&self) -> Result<Payload> {
        Payload::new()
            .field("name", &self.name)?
            .field("description", &self.description)?
            .field("emoji", &self.emoji)
    }
}
