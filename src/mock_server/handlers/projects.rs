//! Project and membership endpoint handlers.

use axum::{
    extract::{rejection::JsonRejection, rejection::QueryRejection, Path, Query, State},
    http::StatusCode,
    response::Response,
    Json,
};
use serde::Deserialize;

use super::{no_content, ok, ApiError, ApiResult, PageQuery};
use crate::mock_server::state::SharedState;
use crate::ProjectInfo;

/// Body of `POST /v1/projects`.
#[derive(Debug, Deserialize)]
pub struct CreateProjectParams {
    pub namespace: String,
    pub name: String,
}

/// Body of `PATCH /v1/projects/{namespace}`.
#[derive(Debug, Deserialize)]
pub struct UpdateProjectParams {
    pub name: Option<String>,
}

pub(super) fn project_not_found(namespace: &str) -> ApiError {
    ApiError::not_found(format!("No project found with namespace: {namespace}"))
}

/// POST /v1/projects
pub async fn create_project(
    State(state): State<SharedState>,
    payload: Result<Json<CreateProjectParams>, JsonRejection>,
) -> ApiResult {
    let Json(params) = payload?;
    let mut state = state.write().await;

    if state.get_project(&params.namespace).is_some() {
        return Err(ApiError::conflict(format!(
            "Namespace {} is already taken",
            params.namespace
        )));
    }

    let project = ProjectInfo {
        id: state.next_id("project"),
        namespace: params.namespace.clone(),
        name: params.name,
        flags: 0,
        icon: None,
        feeds: vec![],
        members: vec![],
    };
    state.projects.insert(params.namespace, project.clone());

    Ok(ok(StatusCode::CREATED, project))
}

/// GET /v1/projects
pub async fn list_projects(
    State(state): State<SharedState>,
    query: Result<Query<PageQuery>, QueryRejection>,
) -> ApiResult {
    let Query(query) = query?;
    let state = state.read().await;

    let all: Vec<ProjectInfo> = state.projects.values().cloned().collect();
    Ok(ok(StatusCode::OK, query.apply(&all)))
}

/// GET /v1/projects/{namespace}
pub async fn get_project(
    State(state): State<SharedState>,
    Path(namespace): Path<String>,
) -> ApiResult {
    let state = state.read().await;

    state
        .get_project(&namespace)
        .map(|project| ok(StatusCode::OK, project))
        .ok_or_else(|| project_not_found(&namespace))
}

/// PATCH /v1/projects/{namespace}
pub async fn update_project(
    State(state): State<SharedState>,
    Path(namespace): Path<String>,
    payload: Result<Json<UpdateProjectParams>, JsonRejection>,
) -> ApiResult {
    let Json(params) = payload?;
    let mut state = state.write().await;

    let project = state
        .get_project_mut(&namespace)
        .ok_or_else(|| project_not_found(&namespace))?;
    if let Some(name) = params.name {
        project.name = name;
    }

    Ok(ok(StatusCode::OK, project.clone()))
}

/// DELETE /v1/projects/{namespace}
pub async fn delete_project(
    State(state): State<SharedState>,
    Path(namespace): Path<String>,
) -> ApiResult {
    let mut state = state.write().await;

    state
        .remove_project(&namespace)
        .map(|_| no_content())
        .ok_or_else(|| project_not_found(&namespace))
}

/// POST /v1/projects/{namespace}/invites/{username}
pub async fn invite_member(
    State(state): State<SharedState>,
    Path((namespace, username)): Path<(String, String)>,
) -> ApiResult {
    let mut state = state.write().await;

    let project = state
        .get_project(&namespace)
        .ok_or_else(|| project_not_found(&namespace))?;
    if project.members.iter().any(|m| m.username == username) {
        return Err(ApiError::conflict(format!("{username} is already a member")));
    }
    if !state.users.contains_key(&username) {
        return Err(ApiError::not_found(format!("No user named {username}")));
    }

    let invited = state.invites.entry(namespace).or_default();
    if !invited.insert(username.clone()) {
        return Err(ApiError::conflict(format!("{username} is already invited")));
    }

    Ok(no_content())
}

/// DELETE /v1/projects/{namespace}/invites/{username}
pub async fn revoke_invite(
    State(state): State<SharedState>,
    Path((namespace, username)): Path<(String, String)>,
) -> ApiResult {
    let mut state = state.write().await;

    if state.get_project(&namespace).is_none() {
        return Err(project_not_found(&namespace));
    }
    let removed = state
        .invites
        .get_mut(&namespace)
        .is_some_and(|invited| invited.remove(&username));

    if removed {
        Ok(no_content())
    } else {
        Err(ApiError::not_found(format!("{username} has no pending invite")))
    }
}

/// DELETE /v1/projects/{namespace}/members/{username}
pub async fn remove_member(
    State(state): State<SharedState>,
    Path((namespace, username)): Path<(String, String)>,
) -> ApiResult<Response> {
    let mut state = state.write().await;

    let project = state
        .get_project_mut(&namespace)
        .ok_or_else(|| project_not_found(&namespace))?;
    let before = project.members.len();
    project.members.retain(|m| m.username != username);

    if project.members.len() < before {
        Ok(no_content())
    } else {
        Err(ApiError::not_found(format!("{username} is not a member")))
    }
}
