//! Insight endpoint handlers.

use axum::{
    extract::{rejection::JsonRejection, rejection::QueryRejection, Path, Query, State},
    http::StatusCode,
    Json,
};
use chrono::Utc;
use serde::Deserialize;

use super::projects::project_not_found;
use super::{no_content, ok, ApiError, ApiResult, PageQuery};
use crate::mock_server::state::SharedState;
use crate::InsightInfo;

/// Body of `POST /v1/projects/{namespace}/insights`.
#[derive(Debug, Deserialize)]
pub struct CreateInsightParams {
    pub title: String,
    pub description: Option<String>,
    pub emoji: Option<String>,
    pub value: Option<f64>,
}

/// `{"set": n}` or `{"increment": n}`.
#[derive(Debug, Deserialize)]
pub struct ValueChange {
    pub set: Option<f64>,
    pub increment: Option<f64>,
}

/// Body of `PATCH /v1/projects/{namespace}/insights/{insight_id}`.
#[derive(Debug, Deserialize)]
pub struct UpdateInsightParams {
    pub title: Option<String>,
    #[serde(default, with = "serde_with::rust::double_option")]
    pub description: Option<Option<String>>,
    #[serde(default, with = "serde_with::rust::double_option")]
    pub emoji: Option<Option<String>>,
    pub value: Option<ValueChange>,
}

fn insight_not_found(insight_id: &str) -> ApiError {
    ApiError::not_found(format!("No insight found with id: {insight_id}"))
}

/// POST /v1/projects/{namespace}/insights
pub async fn create_insight(
    State(state): State<SharedState>,
    Path(namespace): Path<String>,
    payload: Result<Json<CreateInsightParams>, JsonRejection>,
) -> ApiResult {
    let Json(params) = payload?;
    let mut state = state.write().await;

    if state.get_project(&namespace).is_none() {
        return Err(project_not_found(&namespace));
    }
    let insight = InsightInfo {
        id: state.next_id("insight"),
        title: params.title,
        description: params.description,
        value: params.value.unwrap_or_default(),
        emoji: params.emoji,
        updated_at: None,
        created_at: Utc::now(),
    };
    state
        .insights
        .entry(namespace)
        .or_default()
        .push(insight.clone());

    Ok(ok(StatusCode::CREATED, insight))
}

/// GET /v1/projects/{namespace}/insights
pub async fn list_insights(
    State(state): State<SharedState>,
    Path(namespace): Path<String>,
    query: Result<Query<PageQuery>, QueryRejection>,
) -> ApiResult {
    let Query(query) = query?;
    let state = state.read().await;

    if state.get_project(&namespace).is_none() {
        return Err(project_not_found(&namespace));
    }
    Ok(ok(StatusCode::OK, query.apply(state.list_insights(&namespace))))
}

/// GET /v1/projects/{namespace}/insights/{insight_id}
pub async fn get_insight(
    State(state): State<SharedState>,
    Path((namespace, insight_id)): Path<(String, String)>,
) -> ApiResult {
    let state = state.read().await;

    if state.get_project(&namespace).is_none() {
        return Err(project_not_found(&namespace));
    }
    state
        .list_insights(&namespace)
        .iter()
        .find(|insight| insight.id == insight_id)
        .map(|insight| ok(StatusCode::OK, insight))
        .ok_or_else(|| insight_not_found(&insight_id))
}

/// PATCH /v1/projects/{namespace}/insights/{insight_id}
pub async fn update_insight(
    State(state): State<SharedState>,
    Path((namespace, insight_id)): Path<(String, String)>,
    payload: Result<Json<UpdateInsightParams>, JsonRejection>,
) -> ApiResult {
    let Json(params) = payload?;
    let mut state = state.write().await;

    if state.get_project(&namespace).is_none() {
        return Err(project_not_found(&namespace));
    }
    let insight = state
        .insights
        .get_mut(&namespace)
        .and_then(|insights| insights.iter_mut().find(|i| i.id == insight_id))
        .ok_or_else(|| insight_not_found(&insight_id))?;

    match params.value {
        Some(ValueChange {
            set: Some(value),
            increment: None,
        }) => insight.value = value,
        Some(ValueChange {
            set: None,
            increment: Some(amount),
        }) => insight.value += amount,
        Some(_) => {
            return Err(ApiError::bad_request(
                "value must contain exactly one of set or increment",
            ))
        }
        None => {}
    }
    if let Some(title) = params.title {
        insight.title = title;
    }
    if let Some(description) = params.description {
        insight.description = description;
    }
    if let Some(emoji) = params.emoji {
        insight.emoji = emoji;
    }
    insight.updated_at = Some(Utc::now());

    Ok(ok(StatusCode::OK, insight.clone()))
}

/// DELETE /v1/projects/{namespace}/insights/{insight_id}
pub async fn delete_insight(
    State(state): State<SharedState>,
    Path((namespace, insight_id)): Path<(String, String)>,
) -> ApiResult {
    let mut state = state.write().await;

    if state.get_project(&namespace).is_none() {
        return Err(project_not_found(&namespace));
    }
    let insights = state.insights.entry(namespace).or_default();
    let before = insights.len();
    insights.retain(|insight| insight.id != insight_id);

    if insights.len() < before {
        Ok(no_content())
    } else {
        Err(insight_not_found(&insight_id))
    }
}
