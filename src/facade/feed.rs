use std::ops::Deref;

use super::{page_of, Lifecycle, Log};
use crate::blocking::BlockingClient;
use crate::client::LawgClient;
use crate::error::Result;
use crate::models::{FeedEdit, FeedInfo, LogEdit, LogInfo, NewLog};
use crate::operation::Operation;
use crate::pagination::{Page, Pagination};
use crate::resources;
use crate::templates::EventTemplates;

const KIND: &str = "feed";

/// Operations on one feed, addressed by project namespace and feed name.
///
/// Holds no cached state, so it can be created for feeds that do not
/// exist yet.
#[derive(Debug, Clone)]
pub struct FeedManager<C> {
    client: C,
    namespace: String,
    name: String,
}

impl<C: Clone> FeedManager<C> {
    pub(crate) fn new(client: C, namespace: String, name: String) -> Self {
        Self {
            client,
            namespace,
            name,
        }
    }

    pub fn namespace(&self) -> &str {
        &self.namespace
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    fn feed(&self, info: FeedInfo) -> Feed<C> {
        Feed::new(self.client.clone(), self.namespace.clone(), info)
    }

    fn log_facade(&self, info: LogInfo) -> Log<C> {
        Log::new(
            self.client.clone(),
            self.namespace.clone(),
            self.name.clone(),
            info,
        )
    }

    fn event_operation(
        &self,
        templates: &EventTemplates,
        event: &str,
        description: Option<&str>,
    ) -> Result<Operation<LogInfo>> {
        let log = templates.new_log(event, description)?;
        resources::create_log(&self.namespace, &self.name, &log)
    }
}

impl FeedManager<LawgClient> {
    /// Create this feed.
    pub async fn create(
        &self,
        description: Option<&str>,
        emoji: Option<&str>,
    ) -> Result<Feed<LawgClient>> {
        let op = resources::create_feed(&self.namespace, &self.name, description, emoji)?;
        Ok(self.feed(self.client.execute(op).await?))
    }

    pub async fn fetch(&self) -> Result<Feed<LawgClient>> {
        let op = resources::fetch_feed(&self.namespace, &self.name)?;
        Ok(self.feed(self.client.execute(op).await?))
    }

    pub async fn edit(&self, edit: &FeedEdit) -> Result<Feed<LawgClient>> {
        let op = resources::edit_feed(&self.namespace, &self.name, edit)?;
        Ok(self.feed(self.client.execute(op).await?))
    }

    pub async fn delete(&self) -> Result<()> {
        let op = resources::delete_feed(&self.namespace, &self.name)?;
        self.client.execute(op).await
    }

    /// Create a log in this feed.
    pub async fn log(&self, log: NewLog) -> Result<Log<LawgClient>> {
        let op = resources::create_log(&self.namespace, &self.name, &log)?;
        Ok(self.log_facade(self.client.execute(op).await?))
    }

    /// Create a log from a registered event template.
    ///
    /// # Errors
    ///
    /// Returns [`LawgError::EventUndefined`](crate::LawgError::EventUndefined)
    /// if `event` is not registered in `templates`.
    pub async fn event(
        &self,
        templates: &EventTemplates,
        event: &str,
        description: Option<&str>,
    ) -> Result<Log<LawgClient>> {
        let op = self.event_operation(templates, event, description)?;
        Ok(self.log_facade(self.client.execute(op).await?))
    }

    pub async fn fetch_log(&self, log_id: &str) -> Result<Log<LawgClient>> {
        let op = resources::fetch_log(&self.namespace, &self.name, log_id)?;
        Ok(self.log_facade(self.client.execute(op).await?))
    }

    pub async fn fetch_logs(&self, pagination: Pagination) -> Result<Page<Log<LawgClient>>> {
        let op = resources::fetch_logs(&self.namespace, &self.name, pagination)?;
        let items = self.client.execute(op).await?;
        Ok(page_of(items, pagination, |info| self.log_facade(info)))
    }

    pub async fn edit_log(&self, log_id: &str, edit: &LogEdit) -> Result<Log<LawgClient>> {
        let op = resources::edit_log(&self.namespace, &self.name, log_id, edit)?;
        Ok(self.log_facade(self.client.execute(op).await?))
    }

    pub async fn delete_log(&self, log_id: &str) -> Result<()> {
        let op = resources::delete_log(&self.namespace, &self.name, log_id)?;
        self.client.execute(op).await
    }
}

impl FeedManager<BlockingClient> {
    /// Create this feed.
    pub fn create(
        &self,
        description: Option<&str>,
        emoji: Option<&str>,
    ) -> Result<Feed<BlockingClient>> {
        let op = resources::create_feed(&self.namespace, &self.name, description, emoji)?;
        Ok(self.feed(self.client.execute(op)?))
    }

    pub fn fetch(&self) -> Result<Feed<BlockingClient>> {
        let op = resources::fetch_feed(&self.namespace, &self.name)?;
        Ok(self.feed(self.client.execute(op)?))
    }

    pub fn edit(&self, edit: &FeedEdit) -> Result<Feed<BlockingClient>> {
        let op = resources::edit_feed(&self.namespace, &self.name, edit)?;
        Ok(self.feed(self.client.execute(op)?))
    }

    pub fn delete(&self) -> Result<()> {
        let op = resources::delete_feed(&self.namespace, &self.name)?;
        self.client.execute(op)
    }

    /// Create a log in this feed.
    pub fn log(&self, log: NewLog) -> Result<Log<BlockingClient>> {
        let op = resources::create_log(&self.namespace, &self.name, &log)?;
        Ok(self.log_facade(self.client.execute(op)?))
    }

    /// Create a log from a registered event template.
    pub fn event(
        &self,
        templates: &EventTemplates,
        event: &str,
        description: Option<&str>,
    ) -> Result<Log<BlockingClient>> {
        let op = self.event_operation(templates, event, description)?;
        Ok(self.log_facade(self.client.execute(op)?))
    }

    pub fn fetch_log(&self, log_id: &str) -> Result<Log<BlockingClient>> {
        let op = resources::fetch_log(&self.namespace, &self.name, log_id)?;
        Ok(self.log_facade(self.client.execute(op)?))
    }

    pub fn fetch_logs(&self, pagination: Pagination) -> Result<Page<Log<BlockingClient>>> {
        let op = resources::fetch_logs(&self.namespace, &self.name, pagination)?;
        let items = self.client.execute(op)?;
        Ok(page_of(items, pagination, |info| self.log_facade(info)))
    }

    pub fn edit_log(&self, log_id: &str, edit: &LogEdit) -> Result<Log<BlockingClient>> {
        let op = resources::edit_log(&self.namespace, &self.name, log_id, edit)?;
        Ok(self.log_facade(self.client.execute(op)?))
    }

    pub fn delete_log(&self, log_id: &str) -> Result<()> {
        let op = resources::delete_log(&self.namespace, &self.name, log_id)?;
        self.client.execute(op)
    }
}

/// A feed.
///
/// Dereferences to its [`FeedInfo`]. Calls are addressed by the cached name,
/// so a rename through [`Feed::edit`] carries over to later calls.
#[derive(Debug, Clone)]
pub struct Feed<C> {
    client: C,
    namespace: String,
    info: FeedInfo,
    lifecycle: Lifecycle,
}

impl<C: Clone> Feed<C> {
    pub(crate) fn new(client: C, namespace: String, info: FeedInfo) -> Self {
        Self {
            client,
            namespace,
            info,
            lifecycle: Lifecycle::default(),
        }
    }

    pub fn info(&self) -> &FeedInfo {
        &self.info
    }

    pub fn namespace(&self) -> &str {
        &self.namespace
    }

    pub fn is_deleted(&self) -> bool {
        self.lifecycle.deleted
    }

    pub fn into_info(self) -> FeedInfo {
        self.info
    }

    /// Stateless operations on this feed, bound to its current name.
    pub fn manager(&self) -> FeedManager<C> {
        FeedManager::new(
            self.client.clone(),
            self.namespace.clone(),
            self.info.name.clone(),
        )
    }

    fn live_manager(&self) -> Result<FeedManager<C>> {
        self.lifecycle.ensure_live(KIND)?;
        Ok(self.manager())
    }

    fn edit_operation(&self, edit: &FeedEdit) -> Result<Operation<FeedInfo>> {
        self.lifecycle.ensure_live(KIND)?;
        resources::edit_feed(&self.namespace, &self.info.name, edit)
    }

    fn delete_operation(&self) -> Result<Operation<()>> {
        self.lifecycle.ensure_live(KIND)?;
        resources::delete_feed(&self.namespace, &self.info.name)
    }
}

impl<C> Deref for Feed<C> {
    type Target = FeedInfo;

    fn deref(&self) -> &FeedInfo {
        &self.info
    }
}

impl Feed<LawgClient> {
    /// Apply `edit` and replace the cached fields with the server's copy.
    pub async fn edit(&mut self, edit: &FeedEdit) -> Result<()> {
        let op = self.edit_operation(edit)?;
        self.info = self.client.execute(op).await?;
        Ok(())
    }

    pub async fn delete(&mut self) -> Result<()> {
        let op = self.delete_operation()?;
        self.client.execute(op).await?;
        self.lifecycle.mark_deleted();
        Ok(())
    }

    /// Create a log in this feed.
    pub async fn log(&self, log: NewLog) -> Result<Log<LawgClient>> {
        self.live_manager()?.log(log).await
    }

    pub async fn fetch_logs(&self, pagination: Pagination) -> Result<Page<Log<LawgClient>>> {
        self.manager().fetch_logs(pagination).await
    }
}

impl Feed<BlockingClient> {
    /// Apply `edit` and replace the cached fields with the server's copy.
    pub fn edit(&mut self, edit: &FeedEdit) -> Result<()> {
        let op = self.edit_operation(edit)?;
        self.info = self.client.execute(op)?;
        Ok(())
    }

    pub fn delete(&mut self) -> Result<()> {
        let op = self.delete_operation()?;
        self.client.execute(op)?;
        self.lifecycle.mark_deleted();
        Ok(())
    }

    /// Create a log in this feed.
    pub fn log(&self, log: NewLog) -> Result<Log<BlockingClient>> {
        self.live_manager()?.log(log)
    }

    pub fn fetch_logs(&self, pagination: Pagination) -> Result<Page<Log<BlockingClient>>> {
        self.manager().fetch_logs(pagination)
    }
}
