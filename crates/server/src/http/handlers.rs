//! HTTP handlers for the REST API.
//!
//! Queries run inline against the shared catalog; recommendations are
//! delegated to the orchestrator. JSON bodies are taken as
//! `Result<Json<T>, JsonRejection>` so a bad body still gets an
//! `ApiError` reply.

use axum::{
    extract::{rejection::JsonRejection, Path, Query, State},
    Json,
};
use data_loader::{LiquorRecord, RecordId};
use pipeline::{execute, QueryParams};

use super::dto::{
    HealthResponse, LiquorListResponse, PersonalRequest, RoomRequest, StatsResponse,
};
use super::error::AppError;
use super::state::AppState;
use crate::orchestrator::{PersonalRecommendations, RoomRecommendations};

/// Result type for handlers.
pub type HandlerResult<T> = Result<Json<T>, AppError>;

// =============================================================================
// Health Check
// =============================================================================

/// GET /health
pub async fn health_check(State(state): State<AppState>) -> HandlerResult<HealthResponse> {
    Ok(Json(HealthResponse {
        status: "ok".to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
        records: state.catalog.len(),
    }))
}

// =============================================================================
// Catalog
// =============================================================================

/// GET /v1/liquors
///
/// Query options arrive as raw pairs so unknown and repeated keys can be
/// rejected rather than silently dropped.
pub async fn list_liquors(
    State(state): State<AppState>,
    Query(pairs): Query<Vec<(String, String)>>,
) -> HandlerResult<LiquorListResponse> {
    let params = QueryParams::from_pairs(pairs)?;
    let page = execute(&state.catalog, &params)?;

    let records: Vec<LiquorRecord> = page.records.into_iter().cloned().collect();
    Ok(Json(LiquorListResponse {
        count: records.len(),
        total: page.total_matched,
        offset: params.offset,
        records,
    }))
}

/// GET /v1/liquors/{id}
pub async fn get_liquor(
    State(state): State<AppState>,
    Path(id): Path<RecordId>,
) -> HandlerResult<LiquorRecord> {
    state
        .catalog
        .get(id)
        .cloned()
        .map(Json)
        .ok_or_else(|| AppError::NotFound(format!("No liquor with id {}", id)))
}

/// GET /v1/stats
pub async fn get_stats(State(state): State<AppState>) -> HandlerResult<StatsResponse> {
    let report = state.catalog.load_report();
    Ok(Json(StatsResponse {
        stats: state.catalog.stats().clone(),
        rows_read: report.rows_read,
        rows_loaded: report.rows_loaded,
        rows_skipped: report.rows_skipped(),
    }))
}

// =============================================================================
// Recommendations
// =============================================================================

/// POST /v1/recommendations/personal
pub async fn recommend_personal(
    State(state): State<AppState>,
    payload: Result<Json<PersonalRequest>, JsonRejection>,
) -> HandlerResult<PersonalRecommendations> {
    let Json(request) = payload?;
    if request.username.trim().is_empty() {
        return Err(AppError::BadRequest("username must not be empty".to_string()));
    }

    let result = state
        .orchestrator
        .recommend_personal(request.username, request.bar)
        .await?;
    Ok(Json(result))
}

/// POST /v1/recommendations/room
pub async fn recommend_room(
    State(state): State<AppState>,
    payload: Result<Json<RoomRequest>, JsonRejection>,
) -> HandlerResult<RoomRecommendations> {
    let Json(request) = payload?;
    if request.members.iter().any(|m| m.username.trim().is_empty()) {
        return Err(AppError::BadRequest("username must not be empty".to_string()));
    }

    let members = request
        .members
        .into_iter()
        .map(|member| (member.username, member.bar))
        .collect();
    let result = state.orchestrator.recommend_room(members).await?;
    Ok(Json(result))
}
