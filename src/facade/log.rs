use std::ops::Deref;

use super::Lifecycle;
use crate::blocking::BlockingClient;
use crate::client::LawgClient;
use crate::error::Result;
use crate::models::{LogEdit, LogInfo};
use crate::operation::Operation;
use crate::resources;

const KIND: &str = "log";

/// A log entry.
///
/// Dereferences to its [`LogInfo`].
#[derive(Debug, Clone)]
pub struct Log<C> {
    client: C,
    namespace: String,
    feed: String,
    info: LogInfo,
    lifecycle: Lifecycle,
}

impl<C> Log<C> {
    pub(crate) fn new(client: C, namespace: String, feed: String, info: LogInfo) -> Self {
        Self {
            client,
            namespace,
            feed,
            info,
            lifecycle: Lifecycle::default(),
        }
    }

    pub fn info(&self) -> &LogInfo {
        &self.info
    }

    pub fn namespace(&self) -> &str {
        &self.namespace
    }

    /// Name of the feed this log was addressed through.
    pub fn feed(&self) -> &str {
        &self.feed
    }

    pub fn is_deleted(&self) -> bool {
        self.lifecycle.deleted
    }

    pub fn into_info(self) -> LogInfo {
        self.info
    }

    fn edit_operation(&self, edit: &LogEdit) -> Result<Operation<LogInfo>> {
        self.lifecycle.ensure_live(KIND)?;
        resources::edit_log(&self.namespace, &self.feed, &self.info.id, edit)
    }

    fn delete_operation(&self) -> Result<Operation<()>> {
        self.lifecycle.ensure_live(KIND)?;
        resources::delete_log(&self.namespace, &self.feed, &self.info.id)
    }
}

impl<C> Deref for Log<C> {
    type Target = LogInfo;

    fn deref(&self) -> &LogInfo {
        &self.info
    }
}

impl Log<LawgClient> {
    /// Apply `edit` and replace the cached fields with the server's copy.
    ///
    /// # Errors
    ///
    /// Fails with [`LawgError::AlreadyDeleted`](crate::LawgError::AlreadyDeleted)
    /// after [`Log::delete`], and with
    /// [`LawgError::EmptyBody`](crate::LawgError::EmptyBody) if nothing changes.
    pub async fn edit(&mut self, edit: &LogEdit) -> Result<()> {
        let op = self.edit_operation(edit)?;
        self.info = self.client.execute(op).await?;
        Ok(())
    }

    /// Delete the log. Later calls fail without contacting the API.
    pub async fn delete(&mut self) -> Result<()> {
        let op = self.delete_operation()?;
        self.client.execute(op).await?;
        self.lifecycle.mark_deleted();
        Ok(())
    }
}

impl Log<BlockingClient> {
    /// Apply `edit` and replace the cached fields with the server's copy.
    pub fn edit(&mut self, edit: &LogEdit) -> Result<()> {
        let op = self.edit_operation(edit)?;
        self.info = self.client.execute(op)?;
        Ok(())
    }

    /// Delete the log. Later calls fail without contacting the API.
    pub fn delete(&mut self) -> Result<()> {
        let op = self.delete_operation()?;
        self.client.execute(op)?;
        self.lifecycle.mark_deleted();
        Ok(())
    }
}
