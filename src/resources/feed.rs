//! Feed operations.

use reqwest::Method;

use super::{feed_slugs, namespace_slugs, pagination_query};
use crate::error::Result;
use crate::models::{FeedEdit, FeedInfo};
use crate::operation::{routes, Operation};
use crate::pagination::Pagination;
use crate::patch::Payload;
use crate::request::WithSchema;
use crate::response::ResponseShape;
use crate::schema::definitions::{FEED, FEED_CREATE_BODY, FEED_PATCH_BODY};

/// `POST /projects/{namespace}/feeds`
pub fn create_feed(
    namespace: &str,
    name: &str,
    description: Option<&str>,
    emoji: Option<&str>,
) -> Result<Operation<FeedInfo>> {
    let body = Payload::new()
        .set("name", name)?
        .nullable("description", description)?
        .nullable("emoji", emoji)?;

    Ok(Operation::new(
        Method::POST,
        routes::FEEDS,
        Some(namespace_slugs(namespace)?),
        Some(WithSchema::new(body, &FEED_CREATE_BODY)),
    )?
    .returning(ResponseShape::one(&FEED)))
}

/// `GET /projects/{namespace}/feeds/{feed}`
pub fn fetch_feed(namespace: &str, feed: &str) -> Result<Operation<FeedInfo>> {
    Ok(
        Operation::new(Method::GET, routes::FEED, Some(feed_slugs(namespace, feed)?), None)?
            .returning(ResponseShape::one(&FEED)),
    )
}

/// `GET /projects/{namespace}/feeds`
pub fn fetch_feeds(namespace: &str, pagination: Pagination) -> Result<Operation<Vec<FeedInfo>>> {
    Ok(
        Operation::new(Method::GET, routes::FEEDS, Some(namespace_slugs(namespace)?), None)?
            .with_query(pagination_query(pagination)?)?
            .returning(ResponseShape::many(&FEED)),
    )
}

/// `PATCH /projects/{namespace}/feeds/{feed}`
pub fn edit_feed(namespace: &str, feed: &str, edit: &FeedEdit) -> Result<Operation<FeedInfo>> {
    Ok(Operation::new(
        Method::PATCH,
        routes::FEED,
        Some(feed_slugs(namespace, feed)?),
        Some(WithSchema::new(edit.to_payload()?, &FEED_PATCH_BODY)),
    )?
    .returning(ResponseShape::one(&FEED)))
}

/// `DELETE /projects/{namespace}/feeds/{feed}`
pub fn delete_feed(namespace: &str, feed: &str) -> Result<Operation<()>> {
    Operation::new(Method::DELETE, routes::FEED, Some(feed_slugs(namespace, feed)?), None)
}
