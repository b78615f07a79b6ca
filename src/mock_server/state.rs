//! Mock server state management.
//!
//! Provides the in-memory data store for the mock lawg API server.

use std::collections::{BTreeMap, BTreeSet};
use std::sync::Arc;
use tokio::sync::RwLock;

use crate::{FeedInfo, InsightInfo, LogInfo, Member, ProjectInfo};

/// State shared between the server task and the test.
pub type SharedState = Arc<RwLock<MockState>>;

/// Shared state for the mock server.
///
/// Feeds and members live inside their [`ProjectInfo`], so fetching a
/// project returns them the way the real API does.
#[derive(Debug, Default)]
pub struct MockState {
    /// Projects indexed by namespace.
    pub projects: BTreeMap<String, ProjectInfo>,

    /// Logs indexed by feed id, oldest first.
    pub logs: BTreeMap<String, Vec<LogInfo>>,

    /// Insights indexed by project namespace, oldest first.
    pub insights: BTreeMap<String, Vec<InsightInfo>>,

    /// Pending invites: namespace to invited usernames.
    pub invites: BTreeMap<String, BTreeSet<String>>,

    /// Users that can be invited, by username.
    pub users: BTreeMap<String, Member>,

    /// Optional authentication token. If set, requests must send it as the
    /// `Authorization` header.
    pub required_token: Option<String>,

    next_id: u64,
}

impl MockState {
    /// Create a new empty state.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create state wrapped in Arc<RwLock> for sharing.
    pub fn shared(self) -> SharedState {
        Arc::new(RwLock::new(self))
    }

    /// Add a project to the state.
    pub fn with_project(mut self, project: ProjectInfo) -> Self {
        self.projects.insert(project.namespace.clone(), project);
        self
    }

    /// Add a feed to an existing project. Unknown namespaces are ignored.
    pub fn with_feed(mut self, namespace: &str, feed: FeedInfo) -> Self {
        if let Some(project) = self.projects.get_mut(namespace) {
            project.feeds.push(feed);
        }
        self
    }

    /// Add a log to the feed it names.
    pub fn with_log(mut self, log: LogInfo) -> Self {
        self.logs.entry(log.feed_id.clone()).or_default().push(log);
        self
    }

    /// Add an insight to a project.
    pub fn with_insight(mut self, namespace: &str, insight: InsightInfo) -> Self {
        self.insights
            .entry(namespace.to_string())
            .or_default()
            .push(insight);
        self
    }

    /// Register a user that can be invited.
    pub fn with_user(mut self, user: Member) -> Self {
        self.users.insert(user.username.clone(), user);
        self
    }

    /// Set the required authentication token.
    pub fn with_required_token(mut self, token: &str) -> Self {
        self.required_token = Some(token.to_string());
        self
    }

    /// Allocate a fresh `{prefix}_{n}` id.
    pub fn next_id(&mut self, prefix: &str) -> String {
        self.next_id += 1;
        format!("{prefix}_{}", self.next_id)
    }

    /// Get a project by namespace.
    pub fn get_project(&self, namespace: &str) -> Option<&ProjectInfo> {
        self.projects.get(namespace)
    }

    pub fn get_project_mut(&mut self, namespace: &str) -> Option<&mut ProjectInfo> {
        self.projects.get_mut(namespace)
    }

    /// Get a feed by project namespace and feed name.
    pub fn get_feed(&self, namespace: &str, name: &str) -> Option<&FeedInfo> {
        self.get_project(namespace)?
            .feeds
            .iter()
            .find(|f| f.name == name)
    }

    pub fn get_feed_mut(&mut self, namespace: &str, name: &str) -> Option<&mut FeedInfo> {
        self.get_project_mut(namespace)?
            .feeds
            .iter_mut()
            .find(|f| f.name == name)
    }

    /// Logs of a feed, oldest first.
    pub fn list_logs(&self, feed_id: &str) -> &[LogInfo] {
        self.logs.get(feed_id).map(Vec::as_slice).unwrap_or_default()
    }

    /// Insights of a project, oldest first.
    pub fn list_insights(&self, namespace: &str) -> &[InsightInfo] {
        self.insights
            .get(namespace)
            .map(Vec::as_slice)
            .unwrap_or_default()
    }

    /// Remove a project with everything that belongs to it.
    pub fn remove_project(&mut self, namespace: &str) -> Option<ProjectInfo> {
        let project = self.projects.remove(namespace)?;
        for feed in &project.feeds {
            self.logs.remove(&feed.id);
        }
        self.insights.remove(namespace);
        self.invites.remove(namespace);
        Some(project)
    }

    /// Remove a feed and its logs.
    pub fn remove_feed(&mut self, namespace: &str, name: &str) -> Option<FeedInfo> {
        let project = self.projects.get_mut(namespace)?;
        let index = project.feeds.iter().position(|f| f.name == name)?;
        let feed = project.feeds.remove(index);
        self.logs.remove(&feed.id);
        Some(feed)
    }
}
