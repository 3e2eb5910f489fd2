use std::sync::Arc;

use axum::{
    extract::{Query, State},
    http::StatusCode,
    response::{IntoResponse, Json},
};
use serde::Deserialize;

use trendwatch_discovery::DiscoveryError;

use crate::AppState;

// --- Query structs ---

#[derive(Deserialize)]
pub struct DiscoveryQuery {
    scenario: String,
    geo: Option<String>,
    top_n: Option<usize>,
    force_refresh: Option<bool>,
}

#[derive(Deserialize)]
pub struct NewsQuery {
    kw: String,
    scenario: Option<String>,
    max: Option<usize>,
}

// --- Handlers ---

pub async fn api_keyword_discovery(
    State(state): State<Arc<AppState>>,
    Query(params): Query<DiscoveryQuery>,
) -> impl IntoResponse {
    let geo = params.geo.as_deref().unwrap_or(&state.default_geo);
    let top_n = params.top_n.unwrap_or(5).clamp(1, 5);
    let force_refresh = params.force_refresh.unwrap_or(false);

    match state
        .orchestrator
        .discover(&params.scenario, geo, top_n, force_refresh)
        .await
    {
        Ok(view) => Json(view).into_response(),
        Err(e @ DiscoveryError::UnknownScenario(_)) => (
            StatusCode::BAD_REQUEST,
            Json(serde_json::json!({
                "error": e.to_string(),
                "scenarios": state.orchestrator.list_scenarios(),
            })),
        )
            .into_response(),
    }
}

pub async fn api_scenarios(State(state): State<Arc<AppState>>) -> impl IntoResponse {
    Json(serde_json::json!({
        "scenarios": state.orchestrator.list_scenarios(),
    }))
}

pub async fn api_keyword_news(
    State(state): State<Arc<AppState>>,
    Query(params): Query<NewsQuery>,
) -> impl IntoResponse {
    let max = params.max.unwrap_or(5).min(10);
    let scenario = params.scenario.as_deref().unwrap_or("");

    let articles = state.news.fetch(&params.kw, scenario, max).await;
    Json(serde_json::json!({
        "keyword": params.kw,
        "articles": articles,
    }))
}

pub async fn health() -> impl IntoResponse {
    StatusCode::OK
}
