//! Insight operations.

use reqwest::Method;

use super::{insight_slugs, namespace_slugs, pagination_query};
use crate::error::Result;
use crate::models::{InsightEdit, InsightInfo, NewInsight};
use crate::operation::{routes, Operation};
use crate::pagination::Pagination;
use crate::request::WithSchema;
use crate::response::ResponseShape;
use crate::schema::definitions::{INSIGHT, INSIGHT_CREATE_BODY, INSIGHT_PATCH_BODY};

/// `POST /projects/{namespace}/insights`
pub fn create_insight(namespace: &str, insight: &NewInsight) -> Result<Operation<InsightInfo>> {
    Ok(Operation::new(
        Method::POST,
        routes::INSIGHTS,
        Some(namespace_slugs(namespace)?),
        Some(WithSchema::new(insight.to_payload()?, &INSIGHT_CREATE_BODY)),
    )?
    .returning(ResponseShape::one(&INSIGHT)))
}

/// `GET /projects/{namespace}/insights/{insight_id}`
pub fn fetch_insight(namespace: &str, insight_id: &str) -> Result<Operation<InsightInfo>> {
    Ok(Operation::new(
        Method::GET,
        routes::INSIGHT,
        Some(insight_slugs(namespace, insight_id)?),
        None,
    )?
    .returning(ResponseShape::one(&INSIGHT)))
}

/// `GET /projects/{namespace}/insights`
pub fn fetch_insights(
    namespace: &str,
    pagination: Pagination,
) -> Result<Operation<Vec<InsightInfo>>> {
    Ok(
        Operation::new(Method::GET, routes::INSIGHTS, Some(namespace_slugs(namespace)?), None)?
            .with_query(pagination_query(pagination)?)?
            .returning(ResponseShape::many(&INSIGHT)),
    )
}

/// `PATCH /projects/{namespace}/insights/{insight_id}`
///
/// Set and increment both go through here with `value` holding the change.
pub fn edit_insight(
    namespace: &str,
    insight_id: &str,
    edit: &InsightEdit,
) -> Result<Operation<InsightInfo>> {
    Ok(Operation::new(
        Method::PATCH,
        routes::INSIGHT,
        Some(insight_slugs(namespace, insight_id)?),
        Some(WithSchema::new(edit.to_payload()?, &INSIGHT_PATCH_BODY)),
    )?
    .returning(ResponseShape::one(&INSIGHT)))
}

/// `DELETE /projects/{namespace}/insights/{insight_id}`
pub fn delete_insight(namespace: &str, insight_id: &str) -> Result<Operation<()>> {
    Operation::new(
        Method::DELETE,
        routes::INSIGHT,
        Some(insight_slugs(namespace, insight_id)?),
        None,
    )
}
