//! Log endpoint handlers.

use axum::{
    extract::{rejection::JsonRejection, rejection::QueryRejection, Path, Query, State},
    http::StatusCode,
    Json,
};
use serde::Deserialize;

use super::feeds::feed_not_found;
use super::projects::project_not_found;
use super::{no_content, ok, ApiError, ApiResult, PageQuery};
use crate::mock_server::state::{MockState, SharedState};
use crate::LogInfo;

/// Body of `POST .../logs`. Tags, timestamp and notify are accepted and
/// dropped, since the log payload does not echo them.
#[derive(Debug, Deserialize)]
pub struct CreateLogParams {
    pub title: String,
    pub description: Option<String>,
    pub emoji: Option<String>,
}

/// Body of `PATCH .../logs/{log_id}`.
#[derive(Debug, Deserialize)]
pub struct UpdateLogParams {
    pub title: Option<String>,
    #[serde(default, with = "serde_with::rust::double_option")]
    pub description: Option<Option<String>>,
    #[serde(default, with = "serde_with::rust::double_option")]
    pub emoji: Option<Option<String>>,
}

/// Resolve `(project_id, feed_id)` for a feed name.
fn feed_ids(state: &MockState, namespace: &str, feed: &str) -> Result<(String, String), ApiError> {
    let project = state
        .get_project(namespace)
        .ok_or_else(|| project_not_found(namespace))?;
    let feed = state
        .get_feed(namespace, feed)
        .ok_or_else(|| feed_not_found(feed))?;
    Ok((project.id.clone(), feed.id.clone()))
}

fn log_not_found(log_id: &str) -> ApiError {
    ApiError::not_found(format!("No log found with id: {log_id}"))
}

/// POST /v1/projects/{namespace}/feeds/{feed}/logs
pub async fn create_log(
    State(state): State<SharedState>,
    Path((namespace, feed)): Path<(String, String)>,
    payload: Result<Json<CreateLogParams>, JsonRejection>,
) -> ApiResult {
    let Json(params) = payload?;
    let mut state = state.write().await;

    let (project_id, feed_id) = feed_ids(&state, &namespace, &feed)?;
    let log = LogInfo {
        id: state.next_id("log"),
        project_id,
        feed_id,
        title: params.title,
        description: params.description,
        emoji: params.emoji,
    };
    state
        .logs
        .entry(log.feed_id.clone())
        .or_default()
        .push(log.clone());

    Ok(ok(StatusCode::CREATED, log))
}

/// GET /v1/projects/{namespace}/feeds/{feed}/logs
pub async fn list_logs(
    State(state): State<SharedState>,
    Path((namespace, feed)): Path<(String, String)>,
    query: Result<Query<PageQuery>, QueryRejection>,
) -> ApiResult {
    let Query(query) = query?;
    let state = state.read().await;

    let (_, feed_id) = feed_ids(&state, &namespace, &feed)?;
    Ok(ok(StatusCode::OK, query.apply(state.list_logs(&feed_id))))
}

/// GET /v1/projects/{namespace}/feeds/{feed}/logs/{log_id}
pub async fn get_log(
    State(state): State<SharedState>,
    Path((namespace, feed, log_id)): Path<(String, String, String)>,
) -> ApiResult {
    let state = state.read().await;

    let (_, feed_id) = feed_ids(&state, &namespace, &feed)?;
    state
        .list_logs(&feed_id)
        .iter()
        .find(|log| log.id == log_id)
        .map(|log| ok(StatusCode::OK, log))
        .ok_or_else(|| log_not_found(&log_id))
}

/// PATCH /v1/projects/{namespace}/feeds/{feed}/logs/{log_id}
pub async fn update_log(
    State(state): State<SharedState>,
    Path((namespace, feed, log_id)): Path<(String, String, String)>,
    payload: Result<Json<UpdateLogParams>, JsonRejection>,
) -> ApiResult {
    let Json(params) = payload?;
    let mut state = state.write().await;

    let (_, feed_id) = feed_ids(&state, &namespace, &feed)?;
    let log = state
        .logs
        .get_mut(&feed_id)
        .and_then(|logs| logs.iter_mut().find(|log| log.id == log_id))
        .ok_or_else(|| log_not_found(&log_id))?;

    if let Some(title) = params.title {
        log.title = title;
    }
    if let Some(description) = params.description {
        log.description = description;
    }
    if let Some(emoji) = params.emoji {
        log.emoji = emoji;
    }

    Ok(ok(StatusCode::OK, log.clone()))
}

/// DELETE /v1/projects/{namespace}/feeds/{feed}/logs/{log_id}
pub async fn delete_log(
    State(state): State<SharedState>,
    Path((namespace, feed, log_id)): Path<(String, String, String)>,
) -> ApiResult {
    let mut state = state.write().await;

    let (_, feed_id) = feed_ids(&state, &namespace, &feed)?;
    let logs = state.logs.entry(feed_id).or_default();
    let before = logs.len();
    logs.retain(|log| log.id != log_id);

    if logs.len() < before {
        Ok(no_content())
    } else {
        Err(log_not_found(&log_id))
    }
}
