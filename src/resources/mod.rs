//! Resource operations.
//!
//! One function per API call, grouped by resource family. Each validates its
//! arguments and returns an [`Operation`](crate::operation::Operation) ready
//! for either client to execute; nothing here performs I/O.

mod feed;
mod insight;
mod log;
mod project;

pub use feed::*;
pub use insight::*;
pub use log::*;
pub use project::*;

use crate::error::Result;
use crate::pagination::Pagination;
use crate::patch::Payload;
use crate::request::WithSchema;
use crate::schema::definitions::{
    FEED_SLUGS, INSIGHT_SLUGS, LOG_SLUGS, MEMBER_SLUGS, NAMESPACE_SLUGS, PAGINATION_QUERY,
};

fn namespace_slugs(namespace: &str) -> Result<WithSchema> {
    let data = Payload::new().set("namespace", namespace)?;
    Ok(WithSchema::new(data, &NAMESPACE_SLUGS))
}

fn member_slugs(namespace: &str, username: &str) -> Result<WithSchema> {
    let data = Payload::new()
        .set("namespace", namespace)?
        .set("username", username)?;
    Ok(WithSchema::new(data, &MEMBER_SLUGS))
}

fn feed_slugs(namespace: &str, feed: &str) -> Result<WithSchema> {
    let data = Payload::new()
        .set("namespace", namespace)?
        .set("feed", feed)?;
    Ok(WithSchema::new(data, &FEED_SLUGS))
}

fn log_slugs(namespace: &str, feed: &str, log_id: &str) -> Result<WithSchema> {
    let data = Payload::new()
        .set("namespace", namespace)?
        .set("feed", feed)?
        .set("log_id", log_id)?;
    Ok(WithSchema::new(data, &LOG_SLUGS))
}

fn insight_slugs(namespace: &str, insight_id: &str) -> Result<WithSchema> {
    let data = Payload::new()
        .set("namespace", namespace)?
        .set("insight_id", insight_id)?;
    Ok(WithSchema::new(data, &INSIGHT_SLUGS))
}

fn pagination_query(pagination: Pagination) -> Result<WithSchema> {
    Ok(WithSchema::new(pagination.to_payload()?, &PAGINATION_QUERY))
}
