// HTTP request handlers
use crate::application::dashboard_service::DashboardError;
use crate::infrastructure::chunked_json::stream_response;
use crate::infrastructure::http_response::{accepts_brotli, error_response, json_response};
use crate::presentation::app_state::AppState;
use axum::{
    extract::{Path, Query, State},
    http::{HeaderMap, StatusCode},
    response::{IntoResponse, Response},
};
use serde::{Deserialize, Serialize};
use std::sync::Arc;

#[derive(Debug, Default, Deserialize)]
pub struct TabQuery {
    pub view: Option<String>,
    pub occasion: Option<String>,
}

/// Health check endpoint
pub async fn health_check() -> &'static str {
    "ok"
}

/// Dashboard layout: title and tab summaries
pub async fn get_dashboard(headers: HeaderMap, State(state): State<Arc<AppState>>) -> Response {
    match state.dashboard_service.get_dashboard().await {
        Ok(dashboard) => send_json(&dashboard, accepts_brotli(&headers)).await,
        Err(e) => {
            tracing::error!("Error building dashboard: {:#}", e);
            error_response(StatusCode::INTERNAL_SERVER_ERROR, "dashboard unavailable")
        }
    }
}

/// Stream the whole dashboard (progressive loading)
pub async fn stream_dashboard(headers: HeaderMap, State(state): State<Arc<AppState>>) -> impl IntoResponse {
    let compress = accepts_brotli(&headers);
    stream_response(state.streaming_service.stream_dashboard(), compress)
}

/// One tab with its panels; `view` and `occasion` drive the selectors
pub async fn get_tab(
    Path(slug): Path<String>,
    Query(query): Query<TabQuery>,
    headers: HeaderMap,
    State(state): State<Arc<AppState>>,
) -> Response {
    let result = state
        .dashboard_service
        .get_tab(&slug, query.view.as_deref(), query.occasion.as_deref())
        .await;

    match result {
        Ok(tab) => send_json(&tab, accepts_brotli(&headers)).await,
        Err(e) => dashboard_error(e),
    }
}

/// A single dataset by id
pub async fn get_dataset(
    Path(id): Path<String>,
    headers: HeaderMap,
    State(state): State<Arc<AppState>>,
) -> Response {
    match state.dashboard_service.get_dataset(&id).await {
        Ok(dataset) => send_json(&dataset, accepts_brotli(&headers)).await,
        Err(e) => dashboard_error(e),
    }
}

/// Names of the configured commemorative dates
pub async fn list_occasions(headers: HeaderMap, State(state): State<Arc<AppState>>) -> Response {
    match state.dashboard_service.list_occasions().await {
        Ok(names) => send_json(&names, accepts_brotli(&headers)).await,
        Err(e) => {
            tracing::error!("Error listing occasions: {:#}", e);
            error_response(StatusCode::INTERNAL_SERVER_ERROR, "survey data unavailable")
        }
    }
}

async fn send_json<T: Serialize>(data: &T, compress: bool) -> Response {
    match json_response(data, compress).await {
        Ok(response) => response,
        Err(status) => status.into_response(),
    }
}

fn dashboard_error(error: DashboardError) -> Response {
    match error {
        DashboardError::Repository(e) => {
            tracing::error!("Repository error: {:#}", e);
            error_response(StatusCode::INTERNAL_SERVER_ERROR, "survey data unavailable")
        }
        lookup => {
            tracing::debug!("Lookup failed: {}", lookup);
            error_response(StatusCode::NOT_FOUND, &lookup.to_string())
        }
    }
}
