//! Test data fixtures for the mock server.
//!
//! Provides factory functions for creating realistic test data. Fixture ids
//! are named (`feed_releases`) so they never collide with the numbered ids
//! the server allocates.

use chrono::DateTime;

use crate::{FeedInfo, InsightInfo, LogInfo, Member, ProjectInfo};

/// Collection of fixture factories for test data.
pub struct Fixtures;

impl Fixtures {
    /// Create a project without feeds or members.
    pub fn project(id: &str, namespace: &str, name: &str) -> ProjectInfo {
        ProjectInfo {
            id: id.to_string(),
            namespace: namespace.to_string(),
            name: name.to_string(),
            flags: 0,
            icon: None,
            feeds: vec![],
            members: vec![],
        }
    }

    pub fn member(id: &str, username: &str) -> Member {
        Member {
            id: id.to_string(),
            username: username.to_string(),
            icon: None,
        }
    }

    /// Create a feed with no description or emoji.
    pub fn feed(id: &str, project_id: &str, name: &str) -> FeedInfo {
        FeedInfo {
            id: id.to_string(),
            project_id: project_id.to_string(),
            name: name.to_string(),
            description: None,
            emoji: None,
        }
    }

    pub fn log(id: &str, project_id: &str, feed_id: &str, title: &str) -> LogInfo {
        LogInfo {
            id: id.to_string(),
            project_id: project_id.to_string(),
            feed_id: feed_id.to_string(),
            title: title.to_string(),
            description: None,
            emoji: None,
        }
    }

    /// Create an insight that has never been updated.
    pub fn insight(id: &str, title: &str, value: f64) -> InsightInfo {
        InsightInfo {
            id: id.to_string(),
            title: title.to_string(),
            description: None,
            value,
            emoji: None,
            updated_at: None,
            // 2024-01-01T00:00:00Z
            created_at: DateTime::from_timestamp(1_704_067_200, 0).unwrap_or_default(),
        }
    }

    /// Get the default scenario with a complete set of related entities.
    pub fn default_scenario() -> DefaultScenario {
        DefaultScenario::new()
    }
}

/// A complete test scenario with related entities.
///
/// One project `acme` owned by `alice`, with a `releases` feed holding two
/// logs, an empty `alerts` feed and a `Signups` insight at 10. `bob` exists
/// but is not a member.
pub struct DefaultScenario {
    pub projects: Vec<ProjectInfo>,
    pub logs: Vec<LogInfo>,
    pub insights: Vec<(String, InsightInfo)>,
    pub users: Vec<Member>,
}

impl DefaultScenario {
    fn new() -> Self {
        let project_id = "project_acme";
        let alice = Fixtures::member("user_alice", "alice");
        let bob = Fixtures::member("user_bob", "bob");

        let mut releases = Fixtures::feed("feed_releases", project_id, "releases");
        releases.emoji = Some("📦".to_string());
        let alerts = Fixtures::feed("feed_alerts", project_id, "alerts");

        let mut project = Fixtures::project(project_id, "acme", "Acme");
        project.feeds = vec![releases, alerts];
        project.members = vec![alice.clone()];

        let mut deployed = Fixtures::log("log_deployed", project_id, "feed_releases", "Deployed");
        deployed.description = Some("v1.0.0 is live".to_string());
        let rolled_back =
            Fixtures::log("log_rollback", project_id, "feed_releases", "Rolled back");

        Self {
            projects: vec![project],
            logs: vec![deployed, rolled_back],
            insights: vec![(
                "acme".to_string(),
                Fixtures::insight("insight_signups", "Signups", 10.0),
            )],
            users: vec![alice, bob],
        }
    }
}
