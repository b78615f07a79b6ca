//! Feed endpoint handlers.

use axum::{
    extract::{rejection::JsonRejection, rejection::QueryRejection, Path, Query, State},
    http::StatusCode,
    Json,
};
use serde::Deserialize;

use super::projects::project_not_found;
use super::{no_content, ok, ApiError, ApiResult, PageQuery};
use crate::mock_server::state::SharedState;
use crate::FeedInfo;

/// Body of `POST /v1/projects/{namespace}/feeds`.
#[derive(Debug, Deserialize)]
pub struct CreateFeedParams {
    pub name: String,
    pub description: Option<String>,
    pub emoji: Option<String>,
}

/// Body of `PATCH /v1/projects/{namespace}/feeds/{feed}`.
///
/// An absent key leaves the field alone; `null` clears it.
#[derive(Debug, Deserialize)]
pub struct UpdateFeedParams {
    pub name: Option<String>,
    #[serde(default, with = "serde_with::rust::double_option")]
    pub description: Option<Option<String>>,
    #[serde(default, with = "serde_with::rust::double_option")]
    pub emoji: Option<Option<String>>,
}

pub(super) fn feed_not_found(name: &str) -> ApiError {
    ApiError::not_found(format!("No feed named {name}"))
}

/// POST /v1/projects/{namespace}/feeds
pub async fn create_feed(
    State(state): State<SharedState>,
    Path(namespace): Path<String>,
    payload: Result<Json<CreateFeedParams>, JsonRejection>,
) -> ApiResult {
    let Json(params) = payload?;
    let mut state = state.write().await;

    let project_id = state
        .get_project(&namespace)
        .map(|p| p.id.clone())
        .ok_or_else(|| project_not_found(&namespace))?;
    if state.get_feed(&namespace, &params.name).is_some() {
        return Err(ApiError::conflict(format!(
            "A feed named {} already exists",
            params.name
        )));
    }

    let feed = FeedInfo {
        id: state.next_id("feed"),
        project_id,
        name: params.name,
        description: params.description,
        emoji: params.emoji,
    };
    if let Some(project) = state.get_project_mut(&namespace) {
        project.feeds.push(feed.clone());
    }

    Ok(ok(StatusCode::CREATED, feed))
}

/// GET /v1/projects/{namespace}/feeds
pub async fn list_feeds(
    State(state): State<SharedState>,
    Path(namespace): Path<String>,
    query: Result<Query<PageQuery>, QueryRejection>,
) -> ApiResult {
    let Query(query) = query?;
    let state = state.read().await;

    let project = state
        .get_project(&namespace)
        .ok_or_else(|| project_not_found(&namespace))?;
    Ok(ok(StatusCode::OK, query.apply(&project.feeds)))
}

/// GET /v1/projects/{namespace}/feeds/{feed}
pub async fn get_feed(
    State(state): State<SharedState>,
    Path((namespace, name)): Path<(String, String)>,
) -> ApiResult {
    let state = state.read().await;

    if state.get_project(&namespace).is_none() {
        return Err(project_not_found(&namespace));
    }
    state
        .get_feed(&namespace, &name)
        .map(|feed| ok(StatusCode::OK, feed))
        .ok_or_else(|| feed_not_found(&name))
}

/// PATCH /v1/projects/{namespace}/feeds/{feed}
pub async fn update_feed(
    State(state): State<SharedState>,
    Path((namespace, name)): Path<(String, String)>,
    payload: Result<Json<UpdateFeedParams>, JsonRejection>,
) -> ApiResult {
    let Json(params) = payload?;
    let mut state = state.write().await;

    if state.get_project(&namespace).is_none() {
        return Err(project_not_found(&namespace));
    }
    if let Some(ref new_name) = params.name {
        if *new_name != name && state.get_feed(&namespace, new_name).is_some() {
            return Err(ApiError::conflict(format!(
                "A feed named {new_name} already exists"
            )));
        }
    }

    let feed = state
        .get_feed_mut(&namespace, &name)
        .ok_or_else(|| feed_not_found(&name))?;
    if let Some(new_name) = params.name {
        feed.name = new_name;
    }
    if let Some(description) = params.description {
        feed.description = description;
    }
    if let Some(emoji) = params.emoji {
        feed.emoji = emoji;
    }

    Ok(ok(StatusCode::OK, feed.clone()))
}

/// DELETE /v1/projects/{namespace}/feeds/{feed}
pub async fn delete_feed(
    State(state): State<SharedState>,
    Path((namespace, name)): Path<(String, String)>,
) -> ApiResult {
    let mut state = state.write().await;

    if state.get_project(&namespace).is_none() {
        return Err(project_not_found(&namespace));
    }
    state
        .remove_feed(&namespace, &name)
        .map(|_| no_content())
        .ok_or_else(|| feed_not_found(&name))
}
