use std::ops::Deref;

use super::Lifecycle;
use crate::blocking::BlockingClient;
use crate::client::LawgClient;
use crate::error::Result;
use crate::models::{InsightEdit, InsightInfo, InsightValue};
use crate::operation::Operation;
use crate::resources;

const KIND: &str = "insight";

/// A numeric counter in a project.
///
/// [`set`](Insight::set) and [`increment`](Insight::increment) replace the
/// cached payload with the server's response; the client never computes the
/// new value itself.
#[derive(Debug, Clone)]
pub struct Insight<C> {
    client: C,
    namespace: String,
    info: InsightInfo,
    lifecycle: Lifecycle,
}

impl<C> Insight<C> {
    pub(crate) fn new(client: C, namespace: String, info: InsightInfo) -> Self {
        Self {
            client,
            namespace,
            info,
            lifecycle: Lifecycle::default(),
        }
    }

    pub fn info(&self) -> &InsightInfo {
        &self.info
    }

    pub fn namespace(&self) -> &str {
        &self.namespace
    }

    pub fn is_deleted(&self) -> bool {
        self.lifecycle.deleted
    }

    pub fn into_info(self) -> InsightInfo {
        self.info
    }

    fn edit_operation(&self, edit: &InsightEdit) -> Result<Operation<InsightInfo>> {
        self.lifecycle.ensure_live(KIND)?;
        resources::edit_insight(&self.namespace, &self.info.id, edit)
    }

    fn delete_operation(&self) -> Result<Operation<()>> {
        self.lifecycle.ensure_live(KIND)?;
        resources::delete_insight(&self.namespace, &self.info.id)
    }
}

impl<C> Deref for Insight<C> {
    type Target = InsightInfo;

    fn deref(&self) -> &InsightInfo {
        &self.info
    }
}

impl Insight<LawgClient> {
    pub async fn edit(&mut self, edit: &InsightEdit) -> Result<()> {
        let op = self.edit_operation(edit)?;
        self.info = self.client.execute(op).await?;
        Ok(())
    }

    /// Replace the value.
    pub async fn set(&mut self, value: f64) -> Result<()> {
        self.edit(&InsightEdit::value(InsightValue::Set(value))).await
    }

    /// Add `amount` to the value on the server.
    pub async fn increment(&mut self, amount: f64) -> Result<()> {
        self.edit(&InsightEdit::value(InsightValue::Increment(amount)))
            .await
    }

    pub async fn delete(&mut self) -> Result<()> {
        let op = self.delete_operation()?;
        self.client.execute(op).await?;
        self.lifecycle.mark_deleted();
        Ok(())
    }
}

impl Insight<BlockingClient> {
    pub fn edit(&mut self, edit: &InsightEdit) -> Result<()> {
        let op = self.edit_operation(edit)?;
        self.info = self.client.execute(op)?;
        Ok(())
    }

    /// Replace the value.
    pub fn set(&mut self, value: f64) -> Result<()> {
        self.edit(&InsightEdit::value(InsightValue::Set(value)))
    }

    /// Add `amount` to the value on the server.
    pub fn increment(&mut self, amount: f64) -> Result<()> {
        self.edit(&InsightEdit::value(InsightValue::Increment(amount)))
    }

    pub fn delete(&mut self) -> Result<()> {
        let op = self.delete_operation()?;
        self.client.execute(op)?;
        self.lifecycle.mark_deleted();
        Ok(())
    }
}
