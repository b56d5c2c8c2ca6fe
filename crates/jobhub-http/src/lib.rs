//! HTTP surface of the search service.
//!
//! # Endpoints
//!
//! - `GET /api/search` - search every (or the listed) category
//! - `GET /api/search/:category` - search a single category
//! - `GET /health` - liveness check
//!
//! Responses use the `{result, msg, data, totalCount}` envelope. Validation
//! failures map to 400, orchestration failures to 500, everything else to 200.

use axum::{
    extract::{rejection::QueryRejection, Path, Query, State},
    http::StatusCode,
    response::IntoResponse,
    routing::get,
    Json, Router,
};
use serde::Serialize;
use std::sync::Arc;
use tower_http::trace::TraceLayer;
use tracing::error;

use jobhub_search::{ApiResponse, GlobalSearch, SearchError, SearchRequest, SearchResponseData};

/// Application state shared across handlers.
pub struct AppState {
    pub search: GlobalSearch,
}

impl AppState {
    pub fn new(search: GlobalSearch) -> Self {
        Self { search }
    }
}

pub fn build_router(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/api/search", get(handle_global_search))
        .route("/api/search/:category", get(handle_category_search))
        .route("/health", get(handle_health))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// Handle GET /api/search
async fn handle_global_search(
    State(state): State<Arc<AppState>>,
    request: Result<Query<SearchRequest>, QueryRejection>,
) -> impl IntoResponse {
    match request {
        Ok(Query(request)) => respond(state.search.global_search(&request).await),
        Err(rejection) => respond(Err(invalid_query(&rejection))),
    }
}

/// Handle GET /api/search/:category
async fn handle_category_search(
    State(state): State<Arc<AppState>>,
    Path(category): Path<String>,
    request: Result<Query<SearchRequest>, QueryRejection>,
) -> impl IntoResponse {
    match request {
        Ok(Query(request)) => respond(state.search.category_search(&category, &request).await),
        Err(rejection) => respond(Err(invalid_query(&rejection))),
    }
}

/// Undecodable query strings are reported in the envelope like any other validation failure.
fn invalid_query(rejection: &QueryRejection) -> SearchError {
    SearchError::Validation(rejection.body_text())
}

fn respond(result: Result<SearchResponseData, SearchError>) -> (StatusCode, Json<ApiResponse<SearchResponseData>>) {
    let status = match &result {
        Ok(_) => StatusCode::OK,
        Err(SearchError::Validation(_)) => StatusCode::BAD_REQUEST,
        Err(e @ SearchError::Orchestration(_)) => {
            error!(error = %e, "search request failed");
            StatusCode::INTERNAL_SERVER_ERROR
        }
    };
    (status, Json(ApiResponse::from_search(result)))
}

#[derive(Serialize)]
struct HealthResponse {
    status: &'static str,
    version: &'static str,
}

/// Handle GET /health
async fn handle_health() -> impl IntoResponse {
    Json(HealthResponse { status: "ok", version: env!("CARGO_PKG_VERSION") })
}
