//! Project and membership operations.

use reqwest::Method;

use super::{member_slugs, namespace_slugs, pagination_query};
use crate::error::Result;
use crate::models::ProjectInfo;
use crate::operation::{routes, Operation};
use crate::pagination::Pagination;
use crate::patch::Payload;
use crate::request::WithSchema;
use crate::response::ResponseShape;
use crate::schema::definitions::{PROJECT, PROJECT_CREATE_BODY, PROJECT_PATCH_BODY};

/// `POST /projects`
pub fn create_project(namespace: &str, name: &str) -> Result<Operation<ProjectInfo>> {
    let body = Payload::new()
        .set("namespace", namespace)?
        .set("name", name)?;

    Ok(Operation::new(
        Method::POST,
        routes::PROJECTS,
        None,
        Some(WithSchema::new(body, &PROJECT_CREATE_BODY)),
    )?
    .returning(ResponseShape::one(&PROJECT)))
}

/// `GET /projects/{namespace}`
pub fn fetch_project(namespace: &str) -> Result<Operation<ProjectInfo>> {
    Ok(
        Operation::new(Method::GET, routes::PROJECT, Some(namespace_slugs(namespace)?), None)?
            .returning(ResponseShape::one(&PROJECT)),
    )
}

/// `GET /projects`
pub fn fetch_projects(pagination: Pagination) -> Result<Operation<Vec<ProjectInfo>>> {
    Ok(Operation::new(Method::GET, routes::PROJECTS, None, None)?
        .with_query(pagination_query(pagination)?)?
        .returning(ResponseShape::many(&PROJECT)))
}

/// `PATCH /projects/{namespace}`
pub fn edit_project(namespace: &str, name: &str) -> Result<Operation<ProjectInfo>> {
    let body = Payload::new().set("name", name)?;

    Ok(Operation::new(
        Method::PATCH,
        routes::PROJECT,
        Some(namespace_slugs(namespace)?),
        Some(WithSchema::new(body, &PROJECT_PATCH_BODY)),
    )?
    .returning(ResponseShape::one(&PROJECT)))
}

/// `DELETE /projects/{namespace}`
pub fn delete_project(namespace: &str) -> Result<Operation<()>> {
    Operation::new(Method::DELETE, routes::PROJECT, Some(namespace_slugs(namespace)?), None)
}

/// `POST /projects/{namespace}/invites/{username}`
pub fn invite_member(namespace: &str, username: &str) -> Result<Operation<()>> {
    Operation::new(
        Method::POST,
        routes::INVITE,
        Some(member_slugs(namespace, username)?),
        None,
    )
}

/// `DELETE /projects/{namespace}/invites/{username}`
pub fn revoke_invite(namespace: &str, username: &str) -> Result<Operation<()>> {
    Operation::new(
        Method::DELETE,
        routes::INVITE,
        Some(member_slugs(namespace, username)?),
        None,
    )
}

/// `DELETE /projects/{namespace}/members/{username}`
pub fn remove_member(namespace: &str, username: &str) -> Result<Operation<()>> {
    Operation::new(
        Method::DELETE,
        routes::MEMBER,
        Some(member_slugs(namespace, username)?),
        None,
    )
}
