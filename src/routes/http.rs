// HTTP handlers: version, stats, target CRUD and per-target views

use axum::{
    Json,
    extract::{Path, State},
    http::StatusCode,
    response::IntoResponse,
};
use serde::Deserialize;

use super::{ApiError, AppState};
use crate::dashboard::DashboardStats;
use crate::models::{ChartSeries, MonitoredTarget, TargetStatus, TracerouteSnapshot};
use crate::{NAME, VERSION};

#[derive(Debug, Deserialize)]
pub(super) struct AddTargetRequest {
    address: String,
    #[serde(default)]
    label: Option<String>,
}

/// GET /version: service name and version (from Cargo.toml at build time).
pub(super) async fn version_handler() -> impl IntoResponse {
    Json(serde_json::json!({
        "name": NAME,
        "version": VERSION,
    }))
}

/// GET /api/stats
pub(super) async fn stats_handler(
    State(state): State<AppState>,
) -> Result<Json<DashboardStats>, ApiError> {
    Ok(Json(state.session.stats().await?))
}

/// GET /api/targets: every target with its latest sample, in registration order.
pub(super) async fn list_targets_handler(
    State(state): State<AppState>,
) -> Result<Json<Vec<TargetStatus>>, ApiError> {
    Ok(Json(state.session.statuses().await?))
}

/// POST /api/targets
pub(super) async fn add_target_handler(
    State(state): State<AppState>,
    Json(req): Json<AddTargetRequest>,
) -> Result<(StatusCode, Json<MonitoredTarget>), ApiError> {
    let target = state
        .session
        .add_target(&req.address, req.label.as_deref())
        .await?;
    Ok((StatusCode::CREATED, Json(target)))
}

/// DELETE /api/targets/{address}
pub(super) async fn remove_target_handler(
    State(state): State<AppState>,
    Path(address): Path<String>,
) -> Result<StatusCode, ApiError> {
    state.session.remove_target(&address).await?;
    Ok(StatusCode::NO_CONTENT)
}

/// GET /api/targets/{address}
pub(super) async fn target_status_handler(
    State(state): State<AppState>,
    Path(address): Path<String>,
) -> Result<Json<TargetStatus>, ApiError> {
    state
        .session
        .status(&address)
        .await?
        .map(Json)
        .ok_or(ApiError::NotFound(address))
}

/// GET /api/targets/{address}/series
pub(super) async fn series_handler(
    State(state): State<AppState>,
    Path(address): Path<String>,
) -> Result<Json<ChartSeries>, ApiError> {
    state
        .session
        .series(&address)
        .await?
        .map(Json)
        .ok_or(ApiError::NotFound(address))
}

/// GET /api/targets/{address}/route: `null` until the first traceroute arrives.
pub(super) async fn route_handler(
    State(state): State<AppState>,
    Path(address): Path<String>,
) -> Result<Json<Option<TracerouteSnapshot>>, ApiError> {
    state
        .session
        .route(&address)
        .await?
        .map(Json)
        .ok_or(ApiError::NotFound(address))
}
