//! HTTP request handlers

use super::state::AppState;
use crate::error::SourceError;
use crate::results::{SuggestionResult, SuggestionRow};
use axum::{
    extract::{Query, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::{Deserialize, Serialize};
use tracing::warn;

/// Query parameters for suggestions
#[derive(Debug, Deserialize)]
pub struct SuggestParams {
    /// Query text
    pub q: Option<String>,
    /// Rows per source
    pub limit: Option<usize>,
}

/// Query parameters for a shortcut refresh
#[derive(Debug, Deserialize)]
pub struct RefreshParams {
    /// Flattened component name of the source
    pub source: String,
    /// Shortcut id
    pub id: String,
    /// Intent extra data
    pub data: Option<String>,
}

/// One source's answer to a suggestion query
#[derive(Debug, Serialize)]
pub struct SuggestionResponse {
    pub source: String,
    pub label: String,
    pub query: Option<String>,
    pub rows: Vec<SuggestionRow>,
}

#[derive(Debug, Serialize)]
pub struct RefreshResponse {
    pub source: String,
    /// Whether the provider still knows the shortcut
    pub valid: bool,
    pub row: Option<SuggestionRow>,
}

#[derive(Debug, Serialize)]
pub struct SourceResponse {
    pub name: String,
    pub label: String,
    pub threshold: u32,
    pub web: bool,
    pub icon: Option<String>,
}

fn suggestion_response(state: &AppState, result: SuggestionResult) -> SuggestionResponse {
    let label = state
        .registry
        .get_by_component(result.source())
        .map(|source| source.label().to_string())
        .unwrap_or_default();

    SuggestionResponse {
        source: result.source().flatten_to_short_string(),
        label,
        query: result.query().map(str::to_string),
        rows: result.into_rows(),
    }
}

/// Suggestions from every eligible source
pub async fn suggest(
    State(state): State<AppState>,
    Query(params): Query<SuggestParams>,
) -> impl IntoResponse {
    let query = params.q.unwrap_or_default();
    let results = state.search.execute(&query, params.limit).await;

    let response: Vec<SuggestionResponse> = results
        .into_iter()
        .map(|result| suggestion_response(&state, result))
        .collect();

    Json(response)
}

/// Refresh a single shortcut
pub async fn refresh(
    State(state): State<AppState>,
    Query(params): Query<RefreshParams>,
) -> Response {
    match state
        .search
        .refresh(&params.source, &params.id, params.data.as_deref())
        .await
    {
        Ok(Some(result)) => Json(RefreshResponse {
            source: result.source().flatten_to_short_string(),
            valid: result.current().is_some(),
            row: result.current().cloned(),
        })
        .into_response(),
        Ok(None) => (
            StatusCode::BAD_GATEWAY,
            Json(serde_json::json!({
                "error": format!("refresh of {} failed", params.id),
            })),
        )
            .into_response(),
        Err(e @ SourceError::UnknownSource(_)) => (
            StatusCode::NOT_FOUND,
            Json(serde_json::json!({ "error": e.to_string() })),
        )
            .into_response(),
        Err(e) => {
            warn!("Refresh of {} failed: {}", params.id, e);
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(serde_json::json!({ "error": e.to_string() })),
            )
                .into_response()
        }
    }
}

/// Registered sources
pub async fn sources(State(state): State<AppState>) -> impl IntoResponse {
    let response: Vec<SourceResponse> = state
        .registry
        .sources()
        .into_iter()
        .map(|source| SourceResponse {
            name: source.flattened_component_name(),
            label: source.label().to_string(),
            threshold: source.query_threshold(),
            web: source.is_web_suggestion_source(),
            icon: source.source_icon_locator().map(|url| url.to_string()),
        })
        .collect();

    Json(response)
}

/// Health check endpoint
pub async fn health(State(state): State<AppState>) -> impl IntoResponse {
    Json(serde_json::json!({
        "status": "ok",
        "instance": state.instance_name(),
        "version": crate::VERSION,
    }))
}
