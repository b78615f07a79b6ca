//! Log operations.

use reqwest::Method;

use super::{feed_slugs, log_slugs, pagination_query};
use crate::error::Result;
use crate::models::{LogEdit, LogInfo, NewLog};
use crate::operation::{routes, Operation};
use crate::pagination::Pagination;
use crate::request::WithSchema;
use crate::response::ResponseShape;
use crate::schema::definitions::{LOG, LOG_CREATE_BODY, LOG_PATCH_BODY};

/// `POST /projects/{namespace}/feeds/{feed}/logs`
pub fn create_log(namespace: &str, feed: &str, log: &NewLog) -> Result<Operation<LogInfo>> {
    Ok(Operation::new(
        Method::POST,
        routes::LOGS,
        Some(feed_slugs(namespace, feed)?),
        Some(WithSchema::new(log.to_payload()?, &LOG_CREATE_BODY)),
    )?
    .returning(ResponseShape::one(&LOG)))
}

/// `GET /projects/{namespace}/feeds/{feed}/logs/{log_id}`
pub fn fetch_log(namespace: &str, feed: &str, log_id: &str) -> Result<Operation<LogInfo>> {
    Ok(Operation::new(
        Method::GET,
        routes::LOG,
        Some(log_slugs(namespace, feed, log_id)?),
        None,
    )?
    .returning(ResponseShape::one(&LOG)))
}

/// `GET /projects/{namespace}/feeds/{feed}/logs`
pub fn fetch_logs(
    namespace: &str,
    feed: &str,
    pagination: Pagination,
) -> Result<Operation<Vec<LogInfo>>> {
    Ok(
        Operation::new(Method::GET, routes::LOGS, Some(feed_slugs(namespace, feed)?), None)?
            .with_query(pagination_query(pagination)?)?
            .returning(ResponseShape::many(&LOG)),
    )
}

/// `PATCH /projects/{namespace}/feeds/{feed}/logs/{log_id}`
pub fn edit_log(
    namespace: &str,
    feed: &str,
    log_id: &str,
    edit: &LogEdit,
) -> Result<Operation<LogInfo>> {
    Ok(Operation::new(
        Method::PATCH,
        routes::LOG,
        Some(log_slugs(namespace, feed, log_id)?),
        Some(WithSchema::new(edit.to_payload()?, &LOG_PATCH_BODY)),
    )?
    .returning(ResponseShape::one(&LOG)))
}

/// `DELETE /projects/{namespace}/feeds/{feed}/logs/{log_id}`
pub fn delete_log(namespace: &str, feed: &str, log_id: &str) -> Result<Operation<()>> {
    Operation::new(
        Method::DELETE,
        routes::LOG,
        Some(log_slugs(namespace, feed, log_id)?),
        None,
    )
}
