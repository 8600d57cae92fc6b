//! Route handlers.
//!
//! Core operations touch the filesystem synchronously, so each handler moves
//! its work onto the blocking pool.

use std::sync::Arc;

use axum::{
    Json,
    extract::{Path, Query, State},
};
use serde::Deserialize;
use serde_json::{Value, json};
use tracing::warn;

use topicshelf_core::ContentRoot;
use topicshelf_shared::{SearchResult, TopicDetail, TopicSummary};

use crate::error::ApiError;

const READ_TOPIC_FAILED: &str = "Failed to read topic";
const READ_TOPICS_FAILED: &str = "Failed to read topics";

/// Shared handler state.
#[derive(Clone)]
pub struct AppState {
    pub content: Arc<ContentRoot>,
    pub max_results: usize,
}

#[derive(Debug, Default, Deserialize)]
pub struct SearchParams {
    pub q: Option<String>,
    pub scope: Option<String>,
}

pub async fn list_topics(
    State(state): State<AppState>,
) -> Result<Json<Vec<TopicSummary>>, ApiError> {
    let content = Arc::clone(&state.content);
    let topics = blocking(move || content.list_root(), READ_TOPICS_FAILED).await?;
    Ok(Json(topics))
}

pub async fn get_topic(
    State(state): State<AppState>,
    Path(path): Path<String>,
) -> Result<Json<TopicDetail>, ApiError> {
    let content = Arc::clone(&state.content);
    let detail = blocking(move || content.topic(&path), READ_TOPIC_FAILED).await?;
    Ok(Json(detail))
}

pub async fn search(
    State(state): State<AppState>,
    Query(params): Query<SearchParams>,
) -> Result<Json<Vec<SearchResult>>, ApiError> {
    let query = params.q.unwrap_or_default();
    if query.trim().is_empty() {
        return Ok(Json(Vec::new()));
    }
    let scope = params.scope.filter(|s| !s.trim().is_empty());

    let content = Arc::clone(&state.content);
    let max_results = state.max_results;
    let results = blocking(
        move || content.search(scope.as_deref(), &query, max_results),
        READ_TOPICS_FAILED,
    )
    .await?;
    Ok(Json(results))
}

pub async fn health() -> Json<Value> {
    Json(json!({ "status": "ok" }))
}

async fn blocking<T, F>(work: F, internal_message: &'static str) -> Result<T, ApiError>
where
    F: FnOnce() -> topicshelf_shared::Result<T> + Send + 'static,
    T: Send + 'static,
{
    match tokio::task::spawn_blocking(work).await {
        Ok(result) => result.map_err(|e| ApiError::from_core(e, internal_message)),
        Err(e) => {
            warn!(error = %e, "blocking task failed");
            Err(ApiError::internal(internal_message))
        }
    }
}
