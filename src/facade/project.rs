use std::ops::Deref;

use super::{page_of, Feed, FeedManager, Insight, Lifecycle};
use crate::blocking::BlockingClient;
use crate::client::LawgClient;
use crate::error::Result;
use crate::models::{FeedInfo, InsightEdit, InsightInfo, InsightValue, NewInsight, ProjectInfo};
use crate::operation::Operation;
use crate::pagination::{Page, Pagination};
use crate::resources;

const KIND: &str = "project";

/// Operations on one project, addressed by namespace.
///
/// Returned by [`LawgClient::project`] and [`BlockingClient::project`].
#[derive(Debug, Clone)]
pub struct ProjectManager<C> {
    client: C,
    namespace: String,
}

impl<C: Clone> ProjectManager<C> {
    pub(crate) fn new(client: C, namespace: String) -> Self {
        Self { client, namespace }
    }

    pub fn namespace(&self) -> &str {
        &self.namespace
    }

    /// Operations on a feed in this project. Does not contact the API.
    pub fn feed(&self, name: impl Into<String>) -> FeedManager<C> {
        FeedManager::new(self.client.clone(), self.namespace.clone(), name.into())
    }

    fn project(&self, info: ProjectInfo) -> Project<C> {
        Project::new(self.client.clone(), info)
    }

    fn insight(&self, info: InsightInfo) -> Insight<C> {
        Insight::new(self.client.clone(), self.namespace.clone(), info)
    }

    fn feed_facade(&self, info: FeedInfo) -> Feed<C> {
        Feed::new(self.client.clone(), self.namespace.clone(), info)
    }

    /// Project names default to the namespace.
    fn create_operation(&self, name: Option<&str>) -> Result<Operation<ProjectInfo>> {
        resources::create_project(&self.namespace, name.unwrap_or(&self.namespace))
    }
}

impl ProjectManager<LawgClient> {
    /// Create this project. `name` defaults to the namespace.
    pub async fn create(&self, name: Option<&str>) -> Result<Project<LawgClient>> {
        let op = self.create_operation(name)?;
        Ok(self.project(self.client.execute(op).await?))
    }

    pub async fn fetch(&self) -> Result<Project<LawgClient>> {
        let op = resources::fetch_project(&self.namespace)?;
        Ok(self.project(self.client.execute(op).await?))
    }

    /// Rename the project.
    pub async fn edit(&self, name: &str) -> Result<Project<LawgClient>> {
        let op = resources::edit_project(&self.namespace, name)?;
        Ok(self.project(self.client.execute(op).await?))
    }

    pub async fn delete(&self) -> Result<()> {
        let op = resources::delete_project(&self.namespace)?;
        self.client.execute(op).await
    }

    pub async fn invite_member(&self, username: &str) -> Result<()> {
        let op = resources::invite_member(&self.namespace, username)?;
        self.client.execute(op).await
    }

    pub async fn revoke_invite(&self, username: &str) -> Result<()> {
        let op = resources::revoke_invite(&self.namespace, username)?;
        self.client.execute(op).await
    }

    pub async fn remove_member(&self, username: &str) -> Result<()> {
        let op = resources::remove_member(&self.namespace, username)?;
        self.client.execute(op).await
    }

    pub async fn fetch_feeds(&self, pagination: Pagination) -> Result<Page<Feed<LawgClient>>> {
        let op = resources::fetch_feeds(&self.namespace, pagination)?;
        let items = self.client.execute(op).await?;
        Ok(page_of(items, pagination, |info| self.feed_facade(info)))
    }

    pub async fn create_insight(&self, insight: &NewInsight) -> Result<Insight<LawgClient>> {
        let op = resources::create_insight(&self.namespace, insight)?;
        Ok(self.insight(self.client.execute(op).await?))
    }

    pub async fn fetch_insight(&self, insight_id: &str) -> Result<Insight<LawgClient>> {
        let op = resources::fetch_insight(&self.namespace, insight_id)?;
        Ok(self.insight(self.client.execute(op).await?))
    }

    pub async fn fetch_insights(
        &self,
        pagination: Pagination,
    ) -> Result<Page<Insight<LawgClient>>> {
        let op = resources::fetch_insights(&self.namespace, pagination)?;
        let items = self.client.execute(op).await?;
        Ok(page_of(items, pagination, |info| self.insight(info)))
    }

    pub async fn edit_insight(
        &self,
        insight_id: &str,
        edit: &InsightEdit,
    ) -> Result<Insight<LawgClient>> {
        let op = resources::edit_insight(&self.namespace, insight_id, edit)?;
        Ok(self.insight(self.client.execute(op).await?))
    }

    /// Add `amount` to an insight's value on the server.
    pub async fn increment(&self, insight_id: &str, amount: f64) -> Result<Insight<LawgClient>> {
        self.edit_insight(insight_id, &InsightEdit::value(InsightValue::Increment(amount)))
            .await
    }

    /// Replace an insight's value.
    pub async fn set(&self, insight_id: &str, value: f64) -> Result<Insight<LawgClient>> {
        self.edit_insight(insight_id, &InsightEdit::value(InsightValue::Set(value)))
            .await
    }

    pub async fn delete_insight(&self, insight_id: &str) -> Result<()> {
        let op = resources::delete_insight(&self.namespace, insight_id)?;
        self.client.execute(op).await
    }
}

impl ProjectManager<BlockingClient> {
    /// Create this project. `name` defaults to the namespace.
    pub fn create(&self, name: Option<&str>) -> Result<Project<BlockingClient>> {
        let op = self.create_operation(name)?;
        Ok(self.project(self.client.execute(op)?))
    }

    pub fn fetch(&self) -> Result<Project<BlockingClient>> {
        let op = resources::fetch_project(&self.namespace)?;
        Ok(self.project(self.client.execute(op)?))
    }

    /// Rename the project.
    pub fn edit(&self, name: &str) -> Result<Project<BlockingClient>> {
        let op = resources::edit_project(&self.namespace, name)?;
        Ok(self.project(self.client.execute(op)?))
    }

    pub fn delete(&self) -> Result<()> {
        let op = resources::delete_project(&self.namespace)?;
        self.client.execute(op)
    }

    pub fn invite_member(&self, username: &str) -> Result<()> {
        let op = resources::invite_member(&self.namespace, username)?;
        self.client.execute(op)
    }

    pub fn revoke_invite(&self, username: &str) -> Result<()> {
        let op = resources::revoke_invite(&self.namespace, username)?;
        self.client.execute(op)
    }

    pub fn remove_member(&self, username: &str) -> Result<()> {
        let op = resources::remove_member(&self.namespace, username)?;
        self.client.execute(op)
    }

    pub fn fetch_feeds(&self, pagination: Pagination) -> Result<Page<Feed<BlockingClient>>> {
        let op = resources::fetch_feeds(&self.namespace, pagination)?;
        let items = self.client.execute(op)?;
        Ok(page_of(items, pagination, |info| self.feed_facade(info)))
    }

    pub fn create_insight(&self, insight: &NewInsight) -> Result<Insight<BlockingClient>> {
        let op = resources::create_insight(&self.namespace, insight)?;
        Ok(self.insight(self.client.execute(op)?))
    }

    pub fn fetch_insight(&self, insight_id: &str) -> Result<Insight<BlockingClient>> {
        let op = resources::fetch_insight(&self.namespace, insight_id)?;
        Ok(self.insight(self.client.execute(op)?))
    }

    pub fn fetch_insights(&self, pagination: Pagination) -> Result<Page<Insight<BlockingClient>>> {
        let op = resources::fetch_insights(&self.namespace, pagination)?;
        let items = self.client.execute(op)?;
        Ok(page_of(items, pagination, |info| self.insight(info)))
    }

    pub fn edit_insight(
        &self,
        insight_id: &str,
        edit: &InsightEdit,
    ) -> Result<Insight<BlockingClient>> {
        let op = resources::edit_insight(&self.namespace, insight_id, edit)?;
        Ok(self.insight(self.client.execute(op)?))
    }

    /// Add `amount` to an insight's value on the server.
    pub fn increment(&self, insight_id: &str, amount: f64) -> Result<Insight<BlockingClient>> {
        self.edit_insight(insight_id, &InsightEdit::value(InsightValue::Increment(amount)))
    }

    /// Replace an insight's value.
    pub fn set(&self, insight_id: &str, value: f64) -> Result<Insight<BlockingClient>> {
        self.edit_insight(insight_id, &InsightEdit::value(InsightValue::Set(value)))
    }

    pub fn delete_insight(&self, insight_id: &str) -> Result<()> {
        let op = resources::delete_insight(&self.namespace, insight_id)?;
        self.client.execute(op)
    }
}

/// A project.
///
/// Dereferences to its [`ProjectInfo`], including the feeds and members the
/// API returned with it.
#[derive(Debug, Clone)]
pub struct Project<C> {
    client: C,
    info: ProjectInfo,
    lifecycle: Lifecycle,
}

impl<C: Clone> Project<C> {
    pub(crate) fn new(client: C, info: ProjectInfo) -> Self {
        Self {
            client,
            info,
            lifecycle: Lifecycle::default(),
        }
    }

    pub fn info(&self) -> &ProjectInfo {
        &self.info
    }

    pub fn is_deleted(&self) -> bool {
        self.lifecycle.deleted
    }

    pub fn into_info(self) -> ProjectInfo {
        self.info
    }

    /// Stateless operations on this project.
    pub fn manager(&self) -> ProjectManager<C> {
        ProjectManager::new(self.client.clone(), self.info.namespace.clone())
    }

    /// Operations on a feed in this project. Does not contact the API.
    pub fn feed(&self, name: impl Into<String>) -> FeedManager<C> {
        self.manager().feed(name)
    }

    fn live_manager(&self) -> Result<ProjectManager<C>> {
        self.lifecycle.ensure_live(KIND)?;
        Ok(self.manager())
    }
}

impl<C> Deref for Project<C> {
    type Target = ProjectInfo;

    fn deref(&self) -> &ProjectInfo {
        &self.info
    }
}

impl Project<LawgClient> {
    /// Rename the project and replace the cached fields with the server's copy.
    pub async fn edit(&mut self, name: &str) -> Result<()> {
        let op = resources::edit_project(&self.live_manager()?.namespace, name)?;
        self.info = self.client.execute(op).await?;
        Ok(())
    }

    pub async fn delete(&mut self) -> Result<()> {
        self.live_manager()?.delete().await?;
        self.lifecycle.mark_deleted();
        Ok(())
    }

    pub async fn invite_member(&self, username: &str) -> Result<()> {
        self.live_manager()?.invite_member(username).await
    }

    pub async fn revoke_invite(&self, username: &str) -> Result<()> {
        self.live_manager()?.revoke_invite(username).await
    }

    pub async fn remove_member(&self, username: &str) -> Result<()> {
        self.live_manager()?.remove_member(username).await
    }
}

impl Project<BlockingClient> {
    /// Rename the project and replace the cached fields with the server's copy.
    pub fn edit(&mut self, name: &str) -> Result<()> {
        let op = resources::edit_project(&self.live_manager()?.namespace, name)?;
        self.info = self.client.execute(op)?;
        Ok(())
    }

    pub fn delete(&mut self) -> Result<()> {
        self.live_manager()?.delete()?;
        self.lifecycle.mark_deleted();
        Ok(())
    }

    pub fn invite_member(&self, username: &str) -> Result<()> {
        self.live_manager()?.invite_member(username)
    }

    pub fn revoke_invite(&self, username: &str) -> Result<()> {
        self.live_manager()?.revoke_invite(username)
    }

    pub fn remove_member(&self, username: &str) -> Result<()> {
        self.live_manager()?.remove_member(username)
    }
}

impl LawgClient {
    /// List the projects the token can see.
    pub async fn fetch_projects(&self, pagination: Pagination) -> Result<Page<Project<Self>>> {
        let op = resources::fetch_projects(pagination)?;
        let items = self.execute(op).await?;
        Ok(page_of(items, pagination, |info| Project::new(self.clone(), info)))
    }
}

impl BlockingClient {
    /// List the projects the token can see.
    pub fn fetch_projects(&self, pagination: Pagination) -> Result<Page<Project<Self>>> {
        let op = resources::fetch_projects(pagination)?;
        let items = self.execute(op)?;
        Ok(page_of(items, pagination, |info| Project::new(self.clone(), info)))
    }
}
