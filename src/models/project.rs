//! Project and member models.

use serde::{Deserialize, Serialize};

use super::FeedInfo;

/// A lawg project.
///
/// Projects are the top-level containers, addressed by their namespace.
/// Every feed and insight belongs to exactly one project.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProjectInfo {
    /// Server-assigned id (`project_...`).
    pub id: String,

    /// Unique slug the project is addressed by.
    pub namespace: String,

    /// Display name.
    pub name: String,

    /// Server-defined flag bits.
    pub flags: i64,

    #[serde(default)]
    pub icon: Option<String>,

    /// Feeds in this project.
    #[serde(default)]
    pub feeds: Vec<FeedInfo>,

    /// Users with access to this project.
    #[serde(default)]
    pub members: Vec<Member>,
}

impl ProjectInfo {
    /// Look up a feed by name.
    pub fn feed(&self, name: &str) -> Option<&FeedInfo> {
        self.feeds.iter().find(|f| f.name == name)
    }
}

/// A project member.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Member {
    /// User id (`user_...`).
    pub id: String,
    pub username: String,
    #[serde(default)]
    pub icon: Option<String>,
}
