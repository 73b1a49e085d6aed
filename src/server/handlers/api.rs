//! JSON API endpoint handlers.

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    response::IntoResponse,
    Json,
};
use serde::Deserialize;
use serde_json::json;

use super::super::AppState;
use crate::models::ScheduleDocument;
use crate::schedule::LoadError;

/// Health check endpoint for container orchestration.
pub async fn health() -> impl IntoResponse {
    StatusCode::OK
}

fn load_failed(err: LoadError) -> axum::response::Response {
    (
        StatusCode::SERVICE_UNAVAILABLE,
        Json(json!({ "error": err.to_string() })),
    )
        .into_response()
}

fn not_found(what: &str) -> axum::response::Response {
    (
        StatusCode::NOT_FOUND,
        Json(json!({ "error": format!("{} not found", what) })),
    )
        .into_response()
}

/// List days with labels and entry counts.
pub async fn api_days(State(state): State<AppState>) -> impl IntoResponse {
    let doc = match state.service.load().await {
        Ok(doc) => doc,
        Err(err) => return load_failed(err),
    };

    let days: Vec<_> = doc
        .days()
        .map(|(key, day)| {
            json!({
                "key": key,
                "label": ScheduleDocument::day_label(key),
                "date": day.date,
                "venue": day.venue,
                "entry_count": day.entries.len(),
            })
        })
        .collect();

    Json(days).into_response()
}

/// Full schedule for one day.
pub async fn api_day(State(state): State<AppState>, Path(day): Path<String>) -> impl IntoResponse {
    match state.service.get_day(&day).await {
        Ok(Some(schedule)) => Json(schedule).into_response(),
        Ok(None) => not_found("day"),
        Err(err) => load_failed(err),
    }
}

/// Single entry lookup. Absence is a 404, never a panic.
pub async fn api_entry(
    State(state): State<AppState>,
    Path((day, id)): Path<(String, String)>,
) -> impl IntoResponse {
    match state.service.get_entry(&day, &id).await {
        Ok(Some(entry)) => Json(entry).into_response(),
        Ok(None) => not_found("entry"),
        Err(err) => load_failed(err),
    }
}

/// Search parameters.
#[derive(Debug, Deserialize)]
pub struct SearchParams {
    pub q: Option<String>,
    pub day: Option<String>,
}

/// Text search across titles and presenters.
pub async fn api_search(
    State(state): State<AppState>,
    Query(params): Query<SearchParams>,
) -> impl IntoResponse {
    let term = params.q.unwrap_or_default();
    match state.service.search(&term, params.day.as_deref()).await {
        Ok(hits) => Json(hits).into_response(),
        Err(err) => load_failed(err),
    }
}

/// Drop the cached document and load fresh data.
pub async fn api_reload(State(state): State<AppState>) -> impl IntoResponse {
    match state.service.reload().await {
        Ok(doc) => {
            let days = doc.days().count();
            Json(json!({ "status": "ok", "days": days })).into_response()
        }
        Err(err) => load_failed(err),
    }
}
